//! "Still interested" flags for in-flight requests
//!
//! A screen owns an `Interest` for as long as it is mounted and hands a token
//! to each request it starts. Requests are not cancelled; instead their result
//! is dropped if the screen went away before it arrived.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Owned by the screen. Dropping it withdraws interest.
#[derive(Debug)]
pub struct Interest {
    live: Arc<AtomicBool>,
}

/// Handed to a request; checked before the result is applied
#[derive(Debug, Clone)]
pub struct InterestToken {
    live: Arc<AtomicBool>,
}

impl Default for Interest {
    fn default() -> Self {
        Self::new()
    }
}

impl Interest {
    pub fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn token(&self) -> InterestToken {
        InterestToken {
            live: Arc::clone(&self.live),
        }
    }

    /// Withdraw interest without dropping (e.g., the screen lost focus)
    pub fn withdraw(&self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

impl Drop for Interest {
    fn drop(&mut self) {
        self.withdraw();
    }
}

impl InterestToken {
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    /// Apply `value` only if the owner is still interested.
    /// Returns whether it was applied.
    pub fn deliver<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_live() {
            apply(value);
            true
        } else {
            debug!("discarding result for a withdrawn request");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_delivers_while_mounted() {
        let interest = Interest::new();
        let token = interest.token();
        let mut applied = None;

        assert!(token.deliver(5, |v| applied = Some(v)));
        assert_eq!(applied, Some(5));
    }

    #[test]
    fn test_late_result_after_unmount_is_discarded() {
        let interest = Interest::new();
        let token = interest.token();
        let (started_tx, started_rx) = mpsc::channel();
        let (go_tx, go_rx) = mpsc::channel::<()>();

        let request = thread::spawn(move || {
            started_tx.send(()).unwrap();
            go_rx.recv().unwrap();
            let mut applied = false;
            let delivered = token.deliver("groups", |_| applied = true);
            (delivered, applied)
        });

        started_rx.recv().unwrap();
        drop(interest);
        go_tx.send(()).unwrap();

        let (delivered, applied) = request.join().unwrap();
        assert!(!delivered);
        assert!(!applied);
    }

    #[test]
    fn test_withdraw_affects_all_tokens() {
        let interest = Interest::new();
        let a = interest.token();
        let b = a.clone();
        interest.withdraw();
        assert!(!a.is_live());
        assert!(!b.is_live());
    }
}
