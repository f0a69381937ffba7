//! WEConnect access core: who is logged in to the dashboard, and which views they
//! may open.
//!
//! - [`session::SessionStore`] holds the current identity and persists it between runs.
//! - [`gate::AccessGate`] turns a navigation into render / login redirect / unauthorized.
//! - [`console::Console`] drives both from a line-oriented shell.

pub mod config;
pub mod console;
pub mod error;
pub mod gate;
pub mod identity;
pub mod session;

pub use config::Config;
pub use error::{AuthError, AuthResult};
pub use gate::{AccessGate, NavOutcome, View};
pub use identity::{Identity, IdentityDirectory, MockDirectory, Role};
pub use session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};
