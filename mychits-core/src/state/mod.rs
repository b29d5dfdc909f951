//! Process-wide client state
//!
//! Connectivity and session are the only shared mutable state in the app.
//! Each has one writer role and many readers, and both are passed around as
//! cloneable handles rather than globals.

mod connectivity;
mod interest;
mod observable;
mod session;
mod view;

pub use connectivity::{ConnectivityMonitor, ConnectivityStore, NetworkGate};
pub use interest::{Interest, InterestToken};
pub use observable::{Observable, Subscription};
pub use session::{LogoutBehavior, SessionStore};
pub use view::ViewState;
