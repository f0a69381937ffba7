//! Route protection: the view policy table and the per-navigation gate built on it.

mod navigation;
mod policy;

pub use navigation::{
    normalize_path, post_login_destination, AccessGate, NavOutcome, PublicPage, DEFAULT_AFTER_LOGIN, LANDING_PATH,
    LOGIN_PATH, UNAUTHORIZED_PATH,
};
pub use policy::{permits, View, VIEW_POLICY};
