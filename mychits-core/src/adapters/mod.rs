//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the ChitsBackend port
//! - HTTP HEAD probe for the ReachabilityProbe port

pub mod client;
pub mod probe;

#[cfg(test)]
pub mod mock_backend;

pub use client::MyChitsClient;
pub use probe::HttpReachabilityProbe;
