//! User accounts, roles and the collaborators that resolve a login attempt to an
//! account. Keep the public surface thin and split implementation across sub-modules.

mod account;
mod credentials;
mod directory;
mod role;

pub use account::Identity;
pub use credentials::{hash_password, verify_password, AcceptAnyPassword, Argon2Verifier, CredentialVerifier};
pub use directory::{IdentityDirectory, MockDirectory};
pub use role::Role;
