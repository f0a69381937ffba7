use serde::Serialize;

use crate::identity::{Identity, Role};

/// Protected dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Clients,
    Messages,
    Templates,
    Calendar,
    Users,
    Settings,
}

const ANY_AUTHENTICATED: &[Role] = &[];

/// Required-role set per view, in navigation menu order. An empty set admits any
/// authenticated identity.
pub const VIEW_POLICY: &[(View, &[Role])] = &[
    (View::Dashboard, ANY_AUTHENTICATED),
    (View::Clients, &[Role::Admin, Role::DatabaseManager, Role::MessageSender]),
    (View::Messages, &[Role::Admin, Role::MessageSender]),
    (View::Templates, &[Role::Admin, Role::MessageSender]),
    (View::Calendar, ANY_AUTHENTICATED),
    (View::Users, &[Role::Admin]),
    (View::Settings, &[Role::Admin]),
];

impl View {
    pub fn all() -> impl Iterator<Item = View> {
        VIEW_POLICY.iter().map(|(v, _)| *v)
    }

    pub fn path(&self) -> &'static str {
        match self {
            View::Dashboard => "/dashboard",
            View::Clients => "/clients",
            View::Messages => "/messages",
            View::Templates => "/templates",
            View::Calendar => "/calendar",
            View::Users => "/users",
            View::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Clients => "Clients",
            View::Messages => "Messages",
            View::Templates => "Templates",
            View::Calendar => "Calendar",
            View::Users => "Users",
            View::Settings => "Settings",
        }
    }

    /// Exact, case-sensitive match on an already normalized path.
    pub fn from_path(path: &str) -> Option<View> {
        View::all().find(|v| v.path() == path)
    }

    pub fn required_roles(&self) -> &'static [Role] {
        VIEW_POLICY
            .iter()
            .find(|(v, _)| v == self)
            .map(|(_, roles)| *roles)
            .unwrap_or(ANY_AUTHENTICATED)
    }
}

/// Capability check shared by the session store and the gate.
pub fn permits(identity: Option<&Identity>, required_roles: &[Role]) -> bool {
    match identity {
        None => false,
        Some(_) if required_roles.is_empty() => true,
        Some(identity) => required_roles.contains(&identity.role),
    }
}
