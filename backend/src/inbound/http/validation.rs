//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors reject bad input with typed errors; these helpers
//! turn them into `InvalidRequest` payloads carrying `{field, code}` details.

use serde_json::json;

use crate::domain::{
    CourseValidationError, CredentialValidationError, Error, ProfileValidationError,
};

fn field_error(field: &str, code: &str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

pub(crate) fn profile_error(err: ProfileValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

pub(crate) fn course_error(err: CourseValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

pub(crate) fn credential_error(err: CredentialValidationError) -> Error {
    let (field, code) = match err {
        CredentialValidationError::EmptyEmail => ("email", "empty_email"),
        CredentialValidationError::EmptyPassword => ("password", "empty_password"),
        CredentialValidationError::PasswordTooShort { .. } => ("password", "password_too_short"),
    };
    field_error(field, code, err.to_string())
}
