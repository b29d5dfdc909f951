//! Session identity
//!
//! Holds the backend-issued user id. The empty string is the "no session"
//! sentinel. Written by the authentication flow, read by every screen before
//! issuing a user-scoped request.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::observable::{Observable, Subscription};
use crate::domain::result::{Error, Result};

/// What signing out does to the stored identity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogoutBehavior {
    /// Reset to anonymous
    #[default]
    ClearIdentity,
    /// Leave the id in place; only navigation changes
    RetainIdentity,
}

/// Observable session store. Clones share the same state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    user_id: Observable<String>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// New anonymous session
    pub fn new() -> Self {
        Self {
            user_id: Observable::new(String::new()),
        }
    }

    /// Current user id, `""` when anonymous
    pub fn user_id(&self) -> String {
        self.user_id.get()
    }

    /// Record the id returned by a successful login or registration
    pub fn set_user_id(&self, id: impl Into<String>) {
        let id = id.into();
        if self.user_id.set(id) {
            info!("session identity set");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.user_id().trim().is_empty()
    }

    /// The user id, or `Error::NotLoggedIn` for the empty sentinel.
    ///
    /// User-scoped requests go through this so they are never sent for an
    /// anonymous session.
    pub fn require_user_id(&self) -> Result<String> {
        let id = self.user_id();
        if id.trim().is_empty() {
            return Err(Error::NotLoggedIn);
        }
        Ok(id)
    }

    /// Back to anonymous
    pub fn clear(&self) {
        if self.user_id.set(String::new()) {
            info!("session identity cleared");
        }
    }

    /// Sign out according to the configured behavior
    pub fn sign_out(&self, behavior: LogoutBehavior) {
        match behavior {
            LogoutBehavior::ClearIdentity => self.clear(),
            LogoutBehavior::RetainIdentity => {}
        }
    }

    /// Listen for identity changes until the subscription is dropped
    pub fn subscribe(&self, listener: impl Fn(&str) + Send + Sync + 'static) -> Subscription {
        self.user_id.subscribe(move |id: &String| listener(id.as_str()))
    }
}
