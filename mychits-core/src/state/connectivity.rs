//! Process-wide connectivity state
//!
//! The store starts optimistic (`{true, true}`), is written by the platform
//! change callback and by active probes, and is read by every screen. A probe
//! failure never moves the store: it is treated as "no information".

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::observable::{Observable, Subscription};
use crate::domain::result::{Error, Result};
use crate::domain::{ConnectivityEvent, ConnectivitySnapshot};
use crate::ports::ReachabilityProbe;

/// Observable connectivity snapshot. Clones share the same state.
#[derive(Debug, Clone)]
pub struct ConnectivityStore {
    inner: Observable<ConnectivitySnapshot>,
}

impl Default for ConnectivityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityStore {
    pub fn new() -> Self {
        Self::with_snapshot(ConnectivitySnapshot::default())
    }

    pub fn with_snapshot(snapshot: ConnectivitySnapshot) -> Self {
        Self {
            inner: Observable::new(snapshot),
        }
    }

    /// Latest known snapshot
    pub fn snapshot(&self) -> ConnectivitySnapshot {
        self.inner.get()
    }

    /// Listen for changes until the subscription is dropped
    pub fn subscribe(
        &self,
        listener: impl Fn(ConnectivitySnapshot) + Send + Sync + 'static,
    ) -> Subscription {
        self.inner.subscribe(move |snapshot| listener(*snapshot))
    }

    /// Apply a platform change event. Returns the resulting snapshot.
    pub fn apply(&self, event: ConnectivityEvent) -> ConnectivitySnapshot {
        let mut result = ConnectivitySnapshot::default();
        let changed = self.inner.update(|current| {
            *current = current.merged(event);
            result = *current;
        });
        if changed {
            info!(
                is_connected = result.is_connected,
                is_internet_reachable = result.is_internet_reachable,
                "connectivity changed"
            );
        }
        result
    }

    /// Run one active probe and store its answer.
    ///
    /// On probe failure the stored snapshot is left as it was and the error
    /// is returned to the caller.
    pub fn fetch_current(&self, probe: &dyn ReachabilityProbe) -> Result<ConnectivitySnapshot> {
        match probe.probe() {
            Ok(snapshot) => {
                debug!(probe = probe.name(), ?snapshot, "reachability probe resolved");
                Ok(self.apply(snapshot.into()))
            }
            Err(e) => {
                warn!(probe = probe.name(), error = %e, "reachability probe failed, keeping last known state");
                Err(e)
            }
        }
    }
}

/// Checks the latest connectivity right before a network action.
///
/// Hold one of these instead of a snapshot taken at render time.
#[derive(Debug, Clone)]
pub struct NetworkGate {
    store: ConnectivityStore,
}

impl NetworkGate {
    pub fn new(store: ConnectivityStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ConnectivityStore {
        &self.store
    }

    /// `Err(Error::Offline)` if the latest snapshot is offline
    pub fn check(&self) -> Result<()> {
        let snapshot = self.store.snapshot();
        if snapshot.is_offline() {
            debug!(?snapshot, "network action blocked while offline");
            return Err(Error::Offline);
        }
        Ok(())
    }

    /// Run `op` only if online at this moment
    pub fn run<T>(&self, op: impl FnOnce() -> Result<T>) -> Result<T> {
        self.check()?;
        op()
    }
}

/// Keeps the connectivity store fresh for as long as it is alive.
///
/// Starting it performs the start-up probe on a background thread, then
/// re-probes on every interval. Dropping the monitor stops and joins the
/// thread.
pub struct ConnectivityMonitor {
    stop: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ConnectivityMonitor {
    pub fn start(
        store: ConnectivityStore,
        probe: Arc<dyn ReachabilityProbe>,
        interval: Duration,
    ) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("connectivity-monitor".to_string())
            .spawn(move || loop {
                let _ = store.fetch_current(probe.as_ref());
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop requested or monitor dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop probing and wait for the background thread
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Probe that replays scripted answers, then repeats the last one
    struct ScriptedProbe {
        answers: Mutex<Vec<Result<ConnectivitySnapshot>>>,
        calls: AtomicUsize,
    }

    impl ScriptedProbe {
        fn new(answers: Vec<Result<ConnectivitySnapshot>>) -> Self {
            Self {
                answers: Mutex::new(answers),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ReachabilityProbe for ScriptedProbe {
        fn name(&self) -> &str {
            "scripted"
        }

        fn probe(&self) -> Result<ConnectivitySnapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut answers = self.answers.lock().unwrap();
            if answers.len() > 1 {
                answers.remove(0)
            } else {
                match answers.first() {
                    Some(Ok(s)) => Ok(*s),
                    _ => Err(Error::transport("probe unavailable")),
                }
            }
        }
    }

    #[test]
    fn test_fetch_current_updates_snapshot() {
        let store = ConnectivityStore::new();
        let probe = ScriptedProbe::new(vec![Ok(ConnectivitySnapshot::new(true, false))]);

        let resolved = store.fetch_current(&probe).unwrap();

        assert_eq!(resolved, ConnectivitySnapshot::new(true, false));
        assert_eq!(store.snapshot(), resolved);
    }

    #[test]
    fn test_probe_failure_keeps_last_known_state() {
        let store = ConnectivityStore::with_snapshot(ConnectivitySnapshot::new(true, false));
        let probe = ScriptedProbe::new(vec![Err(Error::transport("timed out"))]);

        assert!(store.fetch_current(&probe).is_err());
        assert_eq!(store.snapshot(), ConnectivitySnapshot::new(true, false));
    }

    #[test]
    fn test_partial_platform_event() {
        let store = ConnectivityStore::new();
        store.apply(ConnectivityEvent::connected(false));

        let snapshot = store.snapshot();
        assert!(!snapshot.is_connected);
        assert!(snapshot.is_internet_reachable);

        store.apply(ConnectivityEvent::reachable(false));
        assert_eq!(store.snapshot(), ConnectivitySnapshot::OFFLINE);
    }

    #[test]
    fn test_gate_reads_latest_snapshot() {
        let store = ConnectivityStore::new();
        let gate = NetworkGate::new(store.clone());
        assert!(gate.check().is_ok());

        store.apply(ConnectivityEvent::connected(false));
        let calls = AtomicUsize::new(0);
        let result = gate.run(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        assert!(matches!(result, Err(Error::Offline)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.apply(ConnectivityEvent::connected(true));
        assert!(gate.run(|| Ok(())).is_ok());
    }

    #[test]
    fn test_monitor_probes_on_start_and_stops_on_drop() {
        let store = ConnectivityStore::new();
        let probe = Arc::new(ScriptedProbe::new(vec![Ok(ConnectivitySnapshot::OFFLINE)]));
        let (tx, rx) = mpsc::channel();
        let _sub = store.subscribe(move |snapshot| {
            let _ = tx.send(snapshot);
        });

        let mut monitor = ConnectivityMonitor::start(
            store.clone(),
            probe.clone(),
            Duration::from_secs(60),
        )
        .unwrap();

        let first = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first, ConnectivitySnapshot::OFFLINE);
        assert!(monitor.is_running());

        monitor.stop();
        assert!(!monitor.is_running());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }
}
