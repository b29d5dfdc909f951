//! Reachability probe port
//!
//! An active check of the current network state. Platform change events are
//! pushed into the connectivity store directly; this port covers the
//! on-demand probe done at start-up and on refresh.

use crate::domain::result::Result;
use crate::domain::ConnectivitySnapshot;

/// Active network reachability check
pub trait ReachabilityProbe: Send + Sync {
    /// Probe name for logs (e.g., "http")
    fn name(&self) -> &str;

    /// Perform one probe.
    ///
    /// An `Err` means the probe itself failed and says nothing about the
    /// network. A definite "no network" answer is `Ok(ConnectivitySnapshot::OFFLINE)`.
    fn probe(&self) -> Result<ConnectivitySnapshot>;
}
