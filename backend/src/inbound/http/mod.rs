//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod courses;
pub mod error;
pub mod faculty;
pub mod guard;
pub mod health;
pub mod registrations;
pub mod schemas;
pub mod session;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
