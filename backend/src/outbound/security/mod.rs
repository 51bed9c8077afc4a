//! Credential adapters.

mod bcrypt_password_hasher;

pub use bcrypt_password_hasher::{BcryptPasswordHasher, DEFAULT_COST, MAX_COST, MIN_COST};
