//! Numeric record identifiers.
//!
//! Students, faculty, and courses are addressed by positive integers that are
//! allocated sequentially by the stores. Each kind gets its own newtype so a
//! course id can never be passed where a student id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw identifier.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Raw integer value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Label used in logs and error details.
            #[must_use]
            pub const fn label() -> &'static str {
                $label
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a [`crate::domain::Student`].
    StudentId,
    "student"
);
numeric_id!(
    /// Identifier of a [`crate::domain::Course`].
    CourseId,
    "course"
);
numeric_id!(
    /// Identifier of a [`crate::domain::Faculty`] member.
    FacultyId,
    "faculty"
);
