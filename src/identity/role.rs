use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of dashboard roles. Every identity carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    MessageSender,
    DatabaseManager,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::MessageSender, Role::DatabaseManager, Role::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::MessageSender => "message_sender",
            Role::DatabaseManager => "database_manager",
            Role::Viewer => "viewer",
        }
    }

    /// Human-facing label used in the user list and the navigation header.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::MessageSender => "Message Sender",
            Role::DatabaseManager => "Database Manager",
            Role::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
