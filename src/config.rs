//! Runtime configuration read from `WECONNECT_*` environment variables.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::error::{AuthError, AuthResult};
use crate::identity::{AcceptAnyPassword, Argon2Verifier, CredentialVerifier};

pub const DEFAULT_SESSION_DIR: &str = ".weconnect";
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    /// Development stub, any password passes.
    AcceptAny,
    Argon2,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub session_dir: PathBuf,
    pub login_delay: Duration,
    pub credentials: CredentialMode,
    /// PHC string applied to every directory identity in `Argon2` mode.
    pub password_hash: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            credentials: CredentialMode::AcceptAny,
            password_hash: None,
        }
    }
}

impl Config {
    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AuthResult<Self> {
        let mut cfg = Config::default();

        if let Some(dir) = lookup("WECONNECT_SESSION_DIR").filter(|s| !s.trim().is_empty()) {
            cfg.session_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("WECONNECT_LOGIN_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => cfg.login_delay = Duration::from_millis(ms),
                Err(_) => warn!(
                    target: "config",
                    "WECONNECT_LOGIN_DELAY_MS='{}' is not a number; using {}ms", raw, DEFAULT_LOGIN_DELAY_MS
                ),
            }
        }

        if let Some(mode) = lookup("WECONNECT_CREDENTIALS") {
            cfg.credentials = match mode.trim().to_ascii_lowercase().as_str() {
                "" | "accept-any" => CredentialMode::AcceptAny,
                "argon2" => CredentialMode::Argon2,
                other => return Err(AuthError::Config(format!("unknown WECONNECT_CREDENTIALS '{}'", other))),
            };
        }

        cfg.password_hash = lookup("WECONNECT_PASSWORD_HASH").filter(|s| !s.trim().is_empty());
        if cfg.credentials == CredentialMode::Argon2 && cfg.password_hash.is_none() {
            return Err(AuthError::Config("WECONNECT_CREDENTIALS=argon2 requires WECONNECT_PASSWORD_HASH".into()));
        }

        Ok(cfg)
    }

    pub fn build_verifier(&self) -> AuthResult<Arc<dyn CredentialVerifier>> {
        match self.credentials {
            CredentialMode::AcceptAny => Ok(Arc::new(AcceptAnyPassword::new())),
            CredentialMode::Argon2 => {
                let phc = self
                    .password_hash
                    .clone()
                    .ok_or_else(|| AuthError::Config("missing WECONNECT_PASSWORD_HASH".into()))?;
                Ok(Arc::new(Argon2Verifier::new().with_default_hash(phc)?))
            }
        }
    }
}
