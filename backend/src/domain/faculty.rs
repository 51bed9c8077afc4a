//! Faculty records.

use serde::Serialize;

use super::{CredentialHash, FacultyId, FacultyProfile};

/// A faculty member. Faculty manage the catalogue and rosters but never
/// register for courses themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    id: FacultyId,
    name: String,
    email: String,
    address: String,
    #[serde(skip)]
    credential: CredentialHash,
    #[serde(skip)]
    revision: u64,
}

impl Faculty {
    /// Build a freshly signed-up faculty member.
    pub fn new(id: FacultyId, profile: FacultyProfile, credential: CredentialHash) -> Self {
        Self {
            id,
            name: profile.name().to_owned(),
            email: profile.email().to_owned(),
            address: profile.address().to_owned(),
            credential,
            revision: 1,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> FacultyId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised email, unique among faculty.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Stored credential hash.
    pub fn credential(&self) -> &CredentialHash {
        &self.credential
    }

    /// Optimistic-concurrency revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the personal details.
    pub(crate) fn apply_profile(&mut self, profile: FacultyProfile) {
        self.name = profile.name().to_owned();
        self.email = profile.email().to_owned();
        self.address = profile.address().to_owned();
        self.revision += 1;
    }
}
