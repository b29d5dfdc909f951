//! MyChits backend port
//!
//! The REST backend is an external collaborator. Services talk to it only
//! through this trait so flows can be tested without a network.

use crate::domain::result::Result;
use crate::domain::{ChitGroup, EnrollmentRecord, LoginResponse, PaidSummary, PhoneNumber};

/// Registration form
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub phone: PhoneNumber,
    pub password: String,
}

/// Backend operations used by the app's screens
pub trait ChitsBackend: Send + Sync {
    /// Exchange phone number and password for the opaque user id
    fn login(&self, phone: &PhoneNumber, password: &str) -> Result<LoginResponse>;

    /// Create an account; returns the new user id
    fn register(&self, registration: &Registration) -> Result<LoginResponse>;

    /// All chit groups open for enrollment
    fn groups(&self) -> Result<Vec<ChitGroup>>;

    /// Groups the user is enrolled in
    fn enrollments(&self, user_id: &str) -> Result<Vec<EnrollmentRecord>>;

    /// Amount the user has paid towards one group
    fn paid_summary(&self, user_id: &str, group_id: &str) -> Result<PaidSummary>;
}
