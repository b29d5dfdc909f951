//! Network reachability snapshot

use serde::{Deserialize, Serialize};

/// Current known network state.
///
/// `is_connected` means attached to a network interface,
/// `is_internet_reachable` means that interface reaches the public internet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivitySnapshot {
    pub is_connected: bool,
    pub is_internet_reachable: bool,
}

impl ConnectivitySnapshot {
    pub const ONLINE: Self = Self {
        is_connected: true,
        is_internet_reachable: true,
    };

    pub const OFFLINE: Self = Self {
        is_connected: false,
        is_internet_reachable: false,
    };

    pub fn new(is_connected: bool, is_internet_reachable: bool) -> Self {
        Self {
            is_connected,
            is_internet_reachable,
        }
    }

    /// Network-gated actions must not run when this is true
    pub fn is_offline(&self) -> bool {
        !self.is_connected || !self.is_internet_reachable
    }

    /// Apply a platform change event. Indeterminate fields keep their value.
    pub fn merged(self, event: ConnectivityEvent) -> Self {
        Self {
            is_connected: event.is_connected.unwrap_or(self.is_connected),
            is_internet_reachable: event
                .is_internet_reachable
                .unwrap_or(self.is_internet_reachable),
        }
    }
}

/// Optimistic default until the first probe resolves
impl Default for ConnectivitySnapshot {
    fn default() -> Self {
        Self::ONLINE
    }
}

/// A connectivity change reported by the platform.
///
/// `None` means the platform did not say (indeterminate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityEvent {
    #[serde(default)]
    pub is_connected: Option<bool>,
    #[serde(default)]
    pub is_internet_reachable: Option<bool>,
}

impl ConnectivityEvent {
    pub fn connected(is_connected: bool) -> Self {
        Self {
            is_connected: Some(is_connected),
            is_internet_reachable: None,
        }
    }

    pub fn reachable(is_internet_reachable: bool) -> Self {
        Self {
            is_connected: None,
            is_internet_reachable: Some(is_internet_reachable),
        }
    }
}

impl From<ConnectivitySnapshot> for ConnectivityEvent {
    fn from(snapshot: ConnectivitySnapshot) -> Self {
        Self {
            is_connected: Some(snapshot.is_connected),
            is_internet_reachable: Some(snapshot.is_internet_reachable),
        }
    }
}
