//! Status service - connectivity and session summary

use serde::Serialize;

use crate::domain::ConnectivitySnapshot;
use crate::ports::ReachabilityProbe;
use crate::state::{ConnectivityStore, SessionStore};

pub struct StatusService {
    connectivity: ConnectivityStore,
    session: SessionStore,
}

impl StatusService {
    pub fn new(connectivity: ConnectivityStore, session: SessionStore) -> Self {
        Self {
            connectivity,
            session,
        }
    }

    /// Probe once, then report what the stores hold
    pub fn get_status(&self, probe: &dyn ReachabilityProbe) -> StatusSummary {
        let probe_error = self
            .connectivity
            .fetch_current(probe)
            .err()
            .map(|e| e.to_string());
        let connectivity = self.connectivity.snapshot();
        let user_id = self.session.user_id();

        StatusSummary {
            online: !connectivity.is_offline(),
            connectivity,
            probe_error,
            logged_in: self.session.is_authenticated(),
            user_id: if user_id.is_empty() { None } else { Some(user_id) },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub online: bool,
    pub connectivity: ConnectivitySnapshot,
    /// Set when the probe itself failed; `connectivity` is then the last known state
    pub probe_error: Option<String>,
    pub logged_in: bool,
    pub user_id: Option<String>,
}
