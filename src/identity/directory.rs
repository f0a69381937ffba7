use tracing::debug;

use super::account::Identity;
use super::role::Role;

/// Read-only lookup of user accounts by email.
///
/// Implementations must match email case-insensitively and must never return an
/// inactive identity.
pub trait IdentityDirectory: Send + Sync {
    fn find_active_by_email(&self, email: &str) -> Option<Identity>;
}

/// In-memory directory seeded with the demo accounts, one per role.
#[derive(Debug, Clone)]
pub struct MockDirectory {
    identities: Vec<Identity>,
}

impl MockDirectory {
    pub fn seeded() -> Self {
        Self::with_identities(vec![
            Identity::new("admin-1", "admin@weconnect.com", "Admin User", Role::Admin),
            Identity::new("sender-1", "sender@weconnect.com", "Message Sender", Role::MessageSender),
            Identity::new("db-1", "db@weconnect.com", "Database Manager", Role::DatabaseManager),
            Identity::new("view-1", "viewer@weconnect.com", "Viewer User", Role::Viewer),
        ])
    }

    pub fn with_identities(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }
}

impl Default for MockDirectory {
    fn default() -> Self { Self::seeded() }
}

impl IdentityDirectory for MockDirectory {
    fn find_active_by_email(&self, email: &str) -> Option<Identity> {
        let found = self
            .identities
            .iter()
            .find(|i| i.active && i.email_matches(email))
            .cloned();
        debug!(target: "auth", matched = found.is_some(), "directory.lookup");
        found
    }
}
