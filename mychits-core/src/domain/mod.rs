//! Core domain entities
//!
//! Plain data types with their validation. No I/O lives here.

mod amount;
mod connectivity;
mod group;
pub mod menu;
mod phone;
pub mod result;

pub use amount::CurrencyAmount;
pub use connectivity::{ConnectivityEvent, ConnectivitySnapshot};
pub use group::{ChitGroup, EnrolledGroup, EnrollmentRecord, LoginResponse, PaidSummary};
pub use menu::{MenuAction, MenuItem, Navigator};
pub use phone::PhoneNumber;
