//! Error model for the session store, its storage backends and configuration.
//!
//! Only storage, serialization and configuration failures travel as `Err` out of
//! the library; a failed login and a denied navigation are ordinary outcomes.

use thiserror::Error;

/// Generic message shown for every failed login. It never says whether the email,
/// the password or the account state was the problem.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please try again.";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("corrupt persisted session: {0}")]
    CorruptPersistedSession(String),

    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("credential error: {0}")]
    Credential(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AuthError {
    /// Short machine-readable code, used as a structured log field.
    pub fn code_str(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::CorruptPersistedSession(_) => "corrupt_persisted_session",
            AuthError::Storage(_) => "storage",
            AuthError::Serialization(_) => "serialization",
            AuthError::Credential(_) => "credential",
            AuthError::Config(_) => "config",
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
