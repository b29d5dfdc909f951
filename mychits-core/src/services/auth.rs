//! Auth service - login, registration and logout

use std::sync::Arc;

use tracing::info;

use crate::domain::result::{Error, Result};
use crate::domain::{LoginResponse, PhoneNumber};
use crate::ports::{ChitsBackend, Registration};
use crate::state::{LogoutBehavior, SessionStore};

/// Runs the authentication flows and is the only writer of the session
pub struct AuthService {
    backend: Arc<dyn ChitsBackend>,
    session: SessionStore,
    logout_behavior: LogoutBehavior,
}

impl AuthService {
    pub fn new(
        backend: Arc<dyn ChitsBackend>,
        session: SessionStore,
        logout_behavior: LogoutBehavior,
    ) -> Self {
        Self {
            backend,
            session,
            logout_behavior,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Log in and store the returned user id. Returns the id.
    ///
    /// The session is untouched on any failure.
    pub fn login(&self, phone: &str, password: &str) -> Result<String> {
        let phone = PhoneNumber::parse(phone)?;
        if password.is_empty() {
            return Err(Error::validation("Password is required"));
        }

        let response = self.backend.login(&phone, password)?;
        let user_id = self.accept(response)?;
        info!(phone = %phone.masked(), "logged in");
        Ok(user_id)
    }

    /// Create an account and sign straight in with it
    pub fn register(&self, full_name: &str, phone: &str, password: &str) -> Result<String> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(Error::validation("Full name is required"));
        }
        let phone = PhoneNumber::parse(phone)?;
        if password.len() < 6 {
            return Err(Error::validation("Password must be at least 6 characters"));
        }

        let registration = Registration {
            full_name: full_name.to_string(),
            phone,
            password: password.to_string(),
        };
        let response = self.backend.register(&registration)?;
        let user_id = self.accept(response)?;
        info!(phone = %registration.phone.masked(), "registered");
        Ok(user_id)
    }

    pub fn logout(&self) {
        self.session.sign_out(self.logout_behavior);
    }

    fn accept(&self, response: LoginResponse) -> Result<String> {
        let user_id = response.user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(Error::api(200, Some("Login response did not include a user id".to_string())));
        }
        self.session.set_user_id(user_id.clone());
        Ok(user_id)
    }
}
