use std::collections::HashMap;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use tracing::warn;

use super::account::Identity;
use crate::error::{AuthError, AuthResult};

/// Checks a submitted password against an identity the directory already matched.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, identity: &Identity, password: &str) -> bool;
}

/// DEVELOPMENT STUB: accepts every password once the email matched an active account.
///
/// Mirrors the mock dashboard login. It must be replaced with real credential
/// verification (for example [`Argon2Verifier`]) before any production use.
#[derive(Debug)]
pub struct AcceptAnyPassword(());

impl AcceptAnyPassword {
    pub fn new() -> Self {
        warn!(target: "auth", "credential verification disabled: any password is accepted (development stub)");
        Self(())
    }
}

impl Default for AcceptAnyPassword {
    fn default() -> Self { Self::new() }
}

impl CredentialVerifier for AcceptAnyPassword {
    fn verify(&self, _identity: &Identity, _password: &str) -> bool {
        true
    }
}

/// Verifies passwords against Argon2 PHC strings keyed by identity id.
#[derive(Debug, Default, Clone)]
pub struct Argon2Verifier {
    hashes: HashMap<String, String>,
    default_hash: Option<String>,
}

impl Argon2Verifier {
    pub fn new() -> Self { Self::default() }

    pub fn with_hash(mut self, identity_id: impl Into<String>, phc: impl Into<String>) -> AuthResult<Self> {
        let phc = phc.into();
        validate_phc(&phc)?;
        self.hashes.insert(identity_id.into(), phc);
        Ok(self)
    }

    /// Hash used for identities without an entry of their own.
    pub fn with_default_hash(mut self, phc: impl Into<String>) -> AuthResult<Self> {
        let phc = phc.into();
        validate_phc(&phc)?;
        self.default_hash = Some(phc);
        Ok(self)
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, identity: &Identity, password: &str) -> bool {
        let Some(phc) = self.hashes.get(&identity.id).or(self.default_hash.as_ref()) else {
            return false;
        };
        verify_password(phc, password)
    }
}

fn validate_phc(phc: &str) -> AuthResult<()> {
    PasswordHash::new(phc)
        .map(|_| ())
        .map_err(|e| AuthError::Credential(format!("invalid PHC string: {}", e)))
}

/// Produce an Argon2 PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| AuthError::Credential(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Credential(e.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Credential(e.to_string()))?
        .to_string();
    Ok(phc)
}

pub fn verify_password(phc: &str, password: &str) -> bool {
    if let Ok(parsed) = PasswordHash::new(phc) {
        Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
    } else {
        false
    }
}
