//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on one flow a screen runs.

mod auth;
mod groups;
mod status;

pub use auth::AuthService;
pub use groups::{EnrolledGroups, GroupService};
pub use status::{StatusService, StatusSummary};
