//! Authentication module.
//!
//! Provides device pairing, user token derivation and device token storage.

mod credentials;
mod pairing;

pub use credentials::{CredentialStore, FileCredentialStore, DEFAULT_TOKEN_FILE};
pub use pairing::{login, user_token};
