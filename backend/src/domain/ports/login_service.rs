//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! knowing the backing identity store, so handler tests can substitute a
//! mock instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal, Role};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials within `role` and return the authenticated
    /// principal.
    ///
    /// Unknown emails and wrong passwords fail identically with
    /// `Unauthorized`.
    async fn authenticate(
        &self,
        role: Role,
        credentials: &LoginCredentials,
    ) -> Result<Principal, Error>;
}
