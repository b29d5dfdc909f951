//! Result and error types for the core library

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown when a request is blocked by the connectivity gate
pub const OFFLINE_MESSAGE: &str =
    "You are offline. Please check your internet connection and try again.";

/// Message shown when a request fails below the HTTP layer
pub const TRANSPORT_MESSAGE: &str =
    "Unable to reach MyChits. Please check your connection and try again.";

/// Fallback when the server gives no usable `message`
pub const GENERIC_API_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("You are offline")]
    Offline,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an API error from a status and an optional server message
    pub fn api(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_API_MESSAGE.to_string());
        Self::Api { status, message }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// User-facing notice for this error
    pub fn notice(&self) -> Notice {
        match self {
            Error::Offline => Notice::blocking(OFFLINE_MESSAGE),
            Error::NotLoggedIn => Notice::blocking("Please log in to continue."),
            Error::Validation(msg) => Notice::toast(msg.clone()),
            Error::Api { message, .. } => Notice::toast(message.clone()),
            Error::Transport(_) => Notice::toast(TRANSPORT_MESSAGE),
            Error::Config(msg) => Notice::blocking(format!("Configuration problem: {}", msg)),
            Error::Io(_) | Error::Json(_) => Notice::toast(GENERIC_API_MESSAGE),
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// How a notice is shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Dismissible, transient
    Toast,
    /// Stays until the user retries or the condition clears
    Blocking,
}

/// A user-visible message derived from an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn toast(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Toast,
            message: message.into(),
        }
    }

    pub fn blocking(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Blocking,
            message: message.into(),
        }
    }
}

/// Success or failure envelope for `--json` output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.notice().message),
        }
    }
}
