//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core depends
//! only on these traits, not on concrete implementations.

mod backend;
mod reachability;

pub use backend::{ChitsBackend, Registration};
pub use reachability::ReachabilityProbe;
