//! bcrypt password digests.
//!
//! Stored form is the standard modular crypt string (`$2b$<cost>$...`). The
//! cost travels with each digest, so raising it only affects new accounts.

use crate::domain::CredentialHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Cost factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;
/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// `PasswordHasher` backed by the `bcrypt` crate.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl BcryptPasswordHasher {
    /// Build a hasher for `cost`, clamped to the range bcrypt accepts.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    /// Cost applied to new digests.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<CredentialHash, PasswordHashError> {
        bcrypt::hash(password, self.cost)
            .map(CredentialHash::new)
            .map_err(|err| PasswordHashError::derivation(err.to_string()))
    }

    fn verify(&self, password: &str, stored: &CredentialHash) -> bool {
        bcrypt::verify(password, stored.as_str()).unwrap_or(false)
    }
}
