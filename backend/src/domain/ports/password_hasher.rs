//! Port for one-way password digests.

use crate::domain::CredentialHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised while deriving a password digest.
    pub enum PasswordHashError {
        /// The adapter could not produce a digest.
        Derivation { message: String } => "password hashing failed: {message}",
    }
}

/// Derives and checks stored credentials.
///
/// Hashing is CPU-bound and synchronous; async callers run it on the
/// blocking pool.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest for `password`.
    fn hash(&self, password: &str) -> Result<CredentialHash, PasswordHashError>;

    /// Check `password` against a stored digest.
    ///
    /// Malformed digests simply fail verification.
    fn verify(&self, password: &str, stored: &CredentialHash) -> bool;
}
