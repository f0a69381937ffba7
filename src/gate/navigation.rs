use serde::Serialize;
use tracing::debug;

use super::policy::{permits, View};
use crate::session::SessionStore;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const LANDING_PATH: &str = "/";
/// Where a successful login lands when no earlier destination was recorded.
pub const DEFAULT_AFTER_LOGIN: &str = "/dashboard";

/// Pages reachable without a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicPage {
    Landing,
    Login,
    Unauthorized,
}

/// Result of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavOutcome {
    /// Show the protected view.
    Render { view: View },
    /// Not logged in; `from` is the path originally asked for.
    RedirectLogin { from: String },
    /// Logged in but the role is not in the view's required set.
    RedirectUnauthorized,
    /// Show a page that needs no session.
    Public { page: PublicPage },
    /// Plain redirect, e.g. the landing page for a logged-in identity.
    Redirect { to: String },
    NotFound { path: String },
}

impl NavOutcome {
    /// Path the shell should end up on after this outcome.
    pub fn location(&self, requested: &str) -> String {
        match self {
            NavOutcome::Render { view } => view.path().to_string(),
            NavOutcome::RedirectLogin { .. } => LOGIN_PATH.to_string(),
            NavOutcome::RedirectUnauthorized => UNAUTHORIZED_PATH.to_string(),
            NavOutcome::Public { page } => match page {
                PublicPage::Landing => LANDING_PATH.to_string(),
                PublicPage::Login => LOGIN_PATH.to_string(),
                PublicPage::Unauthorized => UNAUTHORIZED_PATH.to_string(),
            },
            NavOutcome::Redirect { to } => to.clone(),
            NavOutcome::NotFound { .. } => normalize_path(requested),
        }
    }
}

/// Strip query and fragment, collapse a trailing slash. Matching stays case-sensitive.
pub fn normalize_path(path: &str) -> String {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let trimmed = path[..end].trim();
    let mut p = if trimmed.starts_with('/') { trimmed.to_string() } else { format!("/{}", trimmed) };
    while p.len() > 1 && p.ends_with('/') {
        p.pop();
    }
    p
}

/// Destination after a successful login: the recorded `from` path when it is an
/// internal path, else the dashboard.
pub fn post_login_destination(from: Option<&str>) -> String {
    match from {
        Some(p)
            if p.starts_with('/')
                && !p.starts_with("//")
                && !p.starts_with("/\\")
                && normalize_path(p) != LOGIN_PATH =>
        {
            p.to_string()
        }
        _ => DEFAULT_AFTER_LOGIN.to_string(),
    }
}

/// Per-navigation access decision over a shared session.
///
/// Nothing is cached: every call reads the session afresh, so a logout or a new
/// login is reflected on the very next navigation.
#[derive(Clone)]
pub struct AccessGate {
    session: SessionStore,
}

impl AccessGate {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Decide the outcome of navigating to `path`.
    pub fn navigate(&self, path: &str) -> NavOutcome {
        let normalized = normalize_path(path);
        let outcome = match normalized.as_str() {
            LANDING_PATH => {
                if self.session.is_authenticated() {
                    NavOutcome::Redirect { to: DEFAULT_AFTER_LOGIN.to_string() }
                } else {
                    NavOutcome::Public { page: PublicPage::Landing }
                }
            }
            LOGIN_PATH => NavOutcome::Public { page: PublicPage::Login },
            UNAUTHORIZED_PATH => NavOutcome::Public { page: PublicPage::Unauthorized },
            other => match View::from_path(other) {
                Some(view) => self.guard(view, path),
                None => NavOutcome::NotFound { path: normalized.clone() },
            },
        };
        debug!(target: "gate", path = %normalized, ?outcome, "navigate");
        outcome
    }

    /// Apply the view's required-role set. `requested` is carried into a login
    /// redirect verbatim so the caller can return there afterwards.
    pub fn guard(&self, view: View, requested: &str) -> NavOutcome {
        let identity = self.session.current_identity();
        let Some(identity) = identity.as_ref() else {
            return NavOutcome::RedirectLogin { from: requested.to_string() };
        };
        if permits(Some(identity), view.required_roles()) {
            NavOutcome::Render { view }
        } else {
            debug!(target: "gate", user_id = %identity.id, role = %identity.role, ?view, "unauthorized");
            NavOutcome::RedirectUnauthorized
        }
    }

    /// Views the current identity may open, in menu order. Empty when logged out.
    pub fn menu(&self) -> Vec<View> {
        let identity = self.session.current_identity();
        View::all()
            .filter(|v| permits(identity.as_ref(), v.required_roles()))
            .collect()
    }
}
