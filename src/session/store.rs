use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::storage::SessionStorage;
use crate::error::{AuthError, AuthResult};
use crate::gate::permits;
use crate::identity::{CredentialVerifier, Identity, IdentityDirectory, Role};

/// Storage key of the persisted session record.
pub const SESSION_KEY: &str = "weconnect-user";

/// Current layout of the persisted record.
pub const SESSION_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    version: u32,
    identity: Identity,
}

fn encode(identity: &Identity) -> AuthResult<String> {
    let record = PersistedSession { version: SESSION_FORMAT_VERSION, identity: identity.clone() };
    Ok(serde_json::to_string(&record)?)
}

fn decode(raw: &str) -> AuthResult<Identity> {
    let record: PersistedSession = serde_json::from_str(raw)
        .map_err(|e| AuthError::CorruptPersistedSession(e.to_string()))?;
    if record.version != SESSION_FORMAT_VERSION {
        return Err(AuthError::CorruptPersistedSession(format!(
            "unsupported session format version {}",
            record.version
        )));
    }
    Ok(record.identity)
}

/// Tracks which identity, if any, is logged in.
///
/// Cloning yields another handle onto the same session. Login and logout replace
/// the whole value under the write lock, and the persisted record is written or
/// removed while that lock is held, so memory and storage never disagree.
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Identity>>>,
    directory: Arc<dyn IdentityDirectory>,
    verifier: Arc<dyn CredentialVerifier>,
    storage: Arc<dyn SessionStorage>,
    login_delay: Duration,
}

impl SessionStore {
    /// Logged-out store with no login delay.
    pub fn new(
        directory: Arc<dyn IdentityDirectory>,
        verifier: Arc<dyn CredentialVerifier>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self { current: Arc::new(RwLock::new(None)), directory, verifier, storage, login_delay: Duration::ZERO }
    }

    pub fn with_login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = delay;
        self
    }

    /// Load the persisted session, if any. Unreadable, malformed or inactive
    /// records are discarded and the store starts logged out.
    pub fn restore(self) -> Self {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(target: "auth", code = e.code_str(), "session.restore: storage unreadable: {}", e);
                None
            }
        };
        if let Some(raw) = raw {
            let decoded = decode(&raw).and_then(|identity| {
                if identity.active {
                    Ok(identity)
                } else {
                    Err(AuthError::CorruptPersistedSession(format!("identity {} is inactive", identity.id)))
                }
            });
            match decoded {
                Ok(identity) => {
                    info!(target: "auth", user_id = %identity.id, role = %identity.role, "session.restore");
                    *self.current.write() = Some(identity);
                }
                Err(e) => {
                    warn!(target: "auth", code = e.code_str(), "session.restore: discarding persisted session: {}", e);
                    if let Err(e) = self.storage.remove(SESSION_KEY) {
                        warn!(target: "auth", "session.restore: failed to remove corrupt record: {}", e);
                    }
                }
            }
        }
        self
    }

    /// Attempt a login. Returns `true` and replaces the session on success; on
    /// failure returns `false` and leaves the session as it was.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.try_login(email, password).await.is_ok()
    }

    /// Like [`login`](Self::login) but hands back the logged-in identity, or
    /// [`AuthError::InvalidCredentials`] for every kind of rejection.
    pub async fn try_login(&self, email: &str, password: &str) -> AuthResult<Identity> {
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let Some(matched) = self.directory.find_active_by_email(email) else {
            debug!(target: "auth", "login rejected");
            return Err(AuthError::InvalidCredentials);
        };
        if !matched.active || !self.verifier.verify(&matched, password) {
            debug!(target: "auth", "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let mut identity = matched;
        identity.last_login = Some(Utc::now());

        let encoded = encode(&identity);
        {
            let mut current = self.current.write();
            if let Err(e) = encoded.and_then(|raw| self.storage.set(SESSION_KEY, &raw)) {
                warn!(target: "auth", code = e.code_str(), "session not persisted: {}", e);
            }
            *current = Some(identity.clone());
        }

        info!(target: "auth", user_id = %identity.id, role = %identity.role, "login");
        Ok(identity)
    }

    /// Clear the session and its persisted record. Always succeeds.
    pub fn logout(&self) {
        let previous = {
            let mut current = self.current.write();
            if let Err(e) = self.storage.remove(SESSION_KEY) {
                warn!(target: "auth", code = e.code_str(), "logout: failed to remove persisted session: {}", e);
            }
            current.take()
        };
        if let Some(identity) = previous {
            info!(target: "auth", user_id = %identity.id, "logout");
        }
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.current.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Empty `required_roles` admits any logged-in identity.
    pub fn can_access(&self, required_roles: &[Role]) -> bool {
        permits(self.current.read().as_ref(), required_roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{AcceptAnyPassword, MockDirectory};
    use crate::session::MemoryStorage;

    fn store_with(storage: Arc<MemoryStorage>) -> SessionStore {
        SessionStore::new(Arc::new(MockDirectory::seeded()), Arc::new(AcceptAnyPassword::new()), storage)
    }

    #[test]
    fn encode_then_decode_keeps_identity() {
        let id = Identity::new("view-1", "viewer@weconnect.com", "Viewer User", Role::Viewer);
        let raw = encode(&id).unwrap();
        assert!(raw.contains("\"version\":1"));
        assert_eq!(decode(&raw).unwrap(), id);
    }

    #[test]
    fn decode_rejects_unknown_version_and_garbage() {
        let id = Identity::new("view-1", "viewer@weconnect.com", "Viewer User", Role::Viewer);
        let raw = serde_json::json!({ "version": 99, "identity": id }).to_string();
        assert!(matches!(decode(&raw), Err(AuthError::CorruptPersistedSession(_))));
        assert!(matches!(decode("{not json"), Err(AuthError::CorruptPersistedSession(_))));
        // a bare identity without the envelope is not accepted either
        let bare = serde_json::to_string(&id).unwrap();
        assert!(decode(&bare).is_err());
    }

    #[tokio::test]
    async fn login_persists_and_logout_clears() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());

        assert!(store.login("db@weconnect.com", "anything").await);
        assert!(storage.contains(SESSION_KEY));
        let current = store.current_identity().unwrap();
        assert_eq!(current.id, "db-1");
        assert!(current.last_login.is_some());

        store.logout();
        assert!(!store.is_authenticated());
        assert!(!storage.contains(SESSION_KEY));
        store.logout();
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_leaves_existing_session_alone() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        assert!(store.login("viewer@weconnect.com", "x").await);
        assert!(!store.login("ghost@weconnect.com", "x").await);
        assert_eq!(store.current_identity().unwrap().id, "view-1");
    }

    #[tokio::test]
    async fn clones_share_one_session() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        let other = store.clone();
        assert!(store.login("admin@weconnect.com", "x").await);
        assert!(other.is_authenticated());
        other.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn restore_discards_corrupt_record() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(SESSION_KEY, "][").unwrap();
        let store = store_with(storage.clone()).restore();
        assert!(!store.is_authenticated());
        assert!(!storage.contains(SESSION_KEY));
    }

    #[test]
    fn restore_discards_inactive_identity() {
        let storage = Arc::new(MemoryStorage::new());
        let id = Identity::new("view-1", "viewer@weconnect.com", "Viewer User", Role::Viewer).inactive();
        storage.set(SESSION_KEY, &encode(&id).unwrap()).unwrap();
        let store = store_with(storage.clone()).restore();
        assert!(!store.is_authenticated());
        assert!(!storage.contains(SESSION_KEY));
    }
}
