use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;

/// A dashboard user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl Identity {
    /// New active account, created now and never logged in.
    pub fn new(id: impl Into<String>, email: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
            role,
            active: true,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Case-insensitive email comparison used by directory lookups.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    /// Up to two upper-cased initials taken from the display name words.
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .flat_map(|c| c.to_uppercase())
            .take(2)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_match_ignores_case() {
        let id = Identity::new("admin-1", "admin@weconnect.com", "Admin User", Role::Admin);
        assert!(id.email_matches("ADMIN@weconnect.com"));
        assert!(id.email_matches("Admin@WeConnect.Com"));
        assert!(!id.email_matches("admin@weconnect.org"));
    }

    #[test]
    fn initials_from_display_name() {
        let id = Identity::new("db-1", "db@weconnect.com", "database manager extra", Role::DatabaseManager);
        assert_eq!(id.initials(), "DM");
        let single = Identity::new("x", "x@weconnect.com", "viewer", Role::Viewer);
        assert_eq!(single.initials(), "V");
    }

    #[test]
    fn last_login_defaults_when_missing() {
        let json = r#"{"id":"view-1","email":"viewer@weconnect.com","display_name":"Viewer User",
            "role":"viewer","active":true,"created_at":"2024-01-01T00:00:00Z"}"#;
        let id: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(id.role, Role::Viewer);
        assert!(id.last_login.is_none());
    }
}
