//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: record stores behind the repository ports
//! - **security**: password digests behind the `PasswordHasher` port
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
pub mod security;
