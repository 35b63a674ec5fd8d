//! Unified error handling for relayd.
//!
//! Every command failure is recoverable: it is turned into an `ERR` reply for
//! the originating connection and never affects other connections.

use crate::state::RegistryError;
use relay_proto::{ErrorReason, NameError, Reply};
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("name taken: {0}")]
    NameTaken(String),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("already authenticated")]
    AlreadyAuthenticated,

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("malformed DM")]
    MalformedDm,

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

impl HandlerError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "invalid_name",
            Self::NameTaken(_) => "name_taken",
            Self::NotAuthenticated => "not_authenticated",
            Self::AlreadyAuthenticated => "already_authenticated",
            Self::UserNotFound(_) => "user_not_found",
            Self::MalformedDm => "malformed_dm",
            Self::UnknownCommand(_) => "unknown_command",
        }
    }

    /// Convert to an `ERR` reply for the originating connection.
    pub fn to_reply(&self) -> Reply {
        let reason = match self {
            Self::InvalidName(_) => ErrorReason::InvalidUsername,
            Self::NameTaken(_) => ErrorReason::UsernameTaken,
            Self::NotAuthenticated => ErrorReason::NotLoggedIn,
            Self::AlreadyAuthenticated => ErrorReason::AlreadyLoggedIn,
            Self::UserNotFound(name) => ErrorReason::UserNotFound(name.clone()),
            Self::MalformedDm => ErrorReason::InvalidDmFormat,
            Self::UnknownCommand(_) => ErrorReason::UnknownCommand,
        };
        Reply::err(reason)
    }
}

impl From<RegistryError> for HandlerError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::InvalidName(e) => Self::InvalidName(e),
            RegistryError::NameTaken(name) => Self::NameTaken(name),
            RegistryError::AlreadyRegistered => Self::AlreadyAuthenticated,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
