//! Validated personal details shared by students and faculty.
//!
//! Inbound adapters parse raw strings into these types before calling a
//! service, so services only ever see normalised values.

use std::fmt;

/// Validation errors raised while building a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    /// Name was blank once trimmed.
    EmptyName,
    /// Email was blank or lacked a single `@` separating two non-empty parts.
    InvalidEmail,
    /// Address was blank once trimmed.
    EmptyAddress,
    /// Study year must be at least one.
    InvalidYear,
}

impl ProfileValidationError {
    /// Field the error refers to, in camelCase wire naming.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::InvalidEmail => "email",
            Self::EmptyAddress => "address",
            Self::InvalidYear => "year",
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyAddress => "empty_address",
            Self::InvalidYear => "invalid_year",
        }
    }
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@domain"),
            Self::EmptyAddress => write!(f, "address must not be empty"),
            Self::InvalidYear => write!(f, "year must be at least 1"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Normalise an email address: trimmed, lower-cased, one `@` with text on
/// both sides.
pub fn normalise_email(raw: &str) -> Result<String, ProfileValidationError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(ProfileValidationError::InvalidEmail),
    }
}

fn non_blank(raw: &str, error: ProfileValidationError) -> Result<String, ProfileValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Personal details of a student.
///
/// ## Invariants
/// - `name` and `address` are trimmed and non-empty.
/// - `email` is normalised by [`normalise_email`].
/// - `year >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    name: String,
    email: String,
    address: String,
    year: u32,
}

impl StudentProfile {
    /// Validate raw inputs.
    ///
    /// # Examples
    /// ```
    /// use registrar::domain::StudentProfile;
    ///
    /// let profile = StudentProfile::try_new(" Ada ", "ADA@uni.test", "1 Loop", 2).unwrap();
    /// assert_eq!(profile.name(), "Ada");
    /// assert_eq!(profile.email(), "ada@uni.test");
    /// ```
    pub fn try_new(
        name: &str,
        email: &str,
        address: &str,
        year: u32,
    ) -> Result<Self, ProfileValidationError> {
        let name = non_blank(name, ProfileValidationError::EmptyName)?;
        let email = normalise_email(email)?;
        let address = non_blank(address, ProfileValidationError::EmptyAddress)?;
        if year == 0 {
            return Err(ProfileValidationError::InvalidYear);
        }
        Ok(Self {
            name,
            email,
            address,
            year,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Year of study.
    pub fn year(&self) -> u32 {
        self.year
    }
}

/// Personal details of a faculty member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyProfile {
    name: String,
    email: String,
    address: String,
}

impl FacultyProfile {
    /// Validate raw inputs.
    pub fn try_new(name: &str, email: &str, address: &str) -> Result<Self, ProfileValidationError> {
        Ok(Self {
            name: non_blank(name, ProfileValidationError::EmptyName)?,
            email: normalise_email(email)?,
            address: non_blank(address, ProfileValidationError::EmptyAddress)?,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        &self.address
    }
}
