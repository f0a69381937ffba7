//! The logged-in session: who is signed in, and where that fact is persisted
//! between process runs.

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{SessionStore, SESSION_FORMAT_VERSION, SESSION_KEY};
