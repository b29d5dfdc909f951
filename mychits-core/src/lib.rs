//! MyChits Core - client logic for the MyChits chit-fund app
//!
//! This crate implements the client core following hexagonal architecture:
//!
//! - **domain**: Core entities (ChitGroup, CurrencyAmount, PhoneNumber, etc.)
//! - **ports**: Trait definitions for external dependencies (ChitsBackend, ReachabilityProbe)
//! - **state**: Shared observable stores (connectivity, session)
//! - **format**: Currency and date display
//! - **services**: The flows screens run
//! - **adapters**: Concrete implementations (HTTP client, reachability probe)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod format;
pub mod logging;
pub mod ports;
pub mod services;
pub mod state;

use std::sync::Arc;

use adapters::{HttpReachabilityProbe, MyChitsClient};
use config::Config;
use format::DateFormatter;
use services::{AuthService, GroupService, StatusService};
use state::{ConnectivityMonitor, ConnectivityStore, NetworkGate, SessionStore};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Notice, NoticeKind, OperationResult, Result};
pub use domain::{
    ChitGroup, ConnectivityEvent, ConnectivitySnapshot, CurrencyAmount, EnrolledGroup, PhoneNumber,
};
pub use format::{format_amount, format_amount_fixed, format_iso_date, CurrencyFormat};

/// Main context for MyChits operations
///
/// Owns the shared stores and wires every service to them. Clones of the
/// stores held by services all see the same state.
pub struct MyChitsContext {
    pub config: Config,
    pub connectivity: ConnectivityStore,
    pub session: SessionStore,
    pub gate: NetworkGate,
    pub client: Arc<MyChitsClient>,
    pub probe: Arc<HttpReachabilityProbe>,
    pub dates: DateFormatter,
    pub auth_service: AuthService,
    pub group_service: GroupService,
    pub status_service: StatusService,
}

impl MyChitsContext {
    pub fn new(config: Config) -> Result<Self> {
        let dates = config.date_formatter()?;
        let connectivity = ConnectivityStore::new();
        let session = SessionStore::new();
        let gate = NetworkGate::new(connectivity.clone());

        let client = Arc::new(
            MyChitsClient::new(&config.base_url, gate.clone(), config.timeout())
                .map_err(|e| Error::Config(format!("{:#}", e)))?,
        );
        let probe = Arc::new(
            HttpReachabilityProbe::new(&config.probe_url, config.timeout())
                .map_err(|e| Error::Config(format!("{:#}", e)))?,
        );

        let auth_service = AuthService::new(client.clone(), session.clone(), config.logout_behavior);
        let group_service = GroupService::new(client.clone(), session.clone());
        let status_service = StatusService::new(connectivity.clone(), session.clone());

        Ok(Self {
            config,
            connectivity,
            session,
            gate,
            client,
            probe,
            dates,
            auth_service,
            group_service,
            status_service,
        })
    }

    /// Probe now and keep probing in the background until the monitor is dropped
    pub fn start_monitor(&self) -> std::io::Result<ConnectivityMonitor> {
        ConnectivityMonitor::start(
            self.connectivity.clone(),
            self.probe.clone(),
            self.config.probe_interval(),
        )
    }
}
