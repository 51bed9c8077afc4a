//! Student records.

use serde::Serialize;

use super::{Course, CourseId, CredentialHash, StudentId, StudentProfile};

/// Maximum total credit weight a student may hold at once. Reaching the cap
/// exactly is allowed.
pub const CREDIT_LIMIT: u32 = 20;

/// Direction of a membership change applied to a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Membership {
    Join,
    Leave,
}

/// A registered student.
///
/// ## Invariants
/// - `registered_courses` has no duplicates.
/// - `points_tracker` equals the summed credit weight of
///   `registered_courses`; it changes only through [`Student::enroll`] and
///   [`Student::withdraw`], which share one update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: StudentId,
    name: String,
    email: String,
    address: String,
    year: u32,
    registered_courses: Vec<CourseId>,
    points_tracker: u32,
    #[serde(skip)]
    credential: CredentialHash,
    #[serde(skip)]
    revision: u64,
}

impl Student {
    /// Build a freshly signed-up student with no registrations.
    pub fn new(id: StudentId, profile: StudentProfile, credential: CredentialHash) -> Self {
        Self {
            id,
            name: profile.name().to_owned(),
            email: profile.email().to_owned(),
            address: profile.address().to_owned(),
            year: profile.year(),
            registered_courses: Vec::new(),
            points_tracker: 0,
            credential,
            revision: 1,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> StudentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised email, unique among students.
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

    /// Registered courses in registration order.
    pub fn registered_courses(&self) -> &[CourseId] {
        &self.registered_courses
    }

    /// Cached credit total of the registered courses.
    pub fn points_tracker(&self) -> u32 {
        self.points_tracker
    }

    /// Stored credential hash.
    pub fn credential(&self) -> &CredentialHash {
        &self.credential
    }

    /// Optimistic-concurrency revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the student is registered for `course`.
    pub fn is_registered_for(&self, course: CourseId) -> bool {
        self.registered_courses.contains(&course)
    }

    /// Replace the personal details, keeping registrations untouched.
    pub(crate) fn apply_profile(&mut self, profile: StudentProfile) {
        self.name = profile.name().to_owned();
        self.email = profile.email().to_owned();
        self.address = profile.address().to_owned();
        self.year = profile.year();
        self.revision += 1;
    }

    /// Record a registration for `course`.
    pub(crate) fn enroll(&mut self, course: &Course) {
        self.record_membership(course, Membership::Join);
    }

    /// Drop the registration for `course`.
    pub(crate) fn withdraw(&mut self, course: &Course) {
        self.record_membership(course, Membership::Leave);
    }

    fn record_membership(&mut self, course: &Course, change: Membership) {
        let course_id = course.id();
        let position = self.registered_courses.iter().position(|id| *id == course_id);
        match (change, position) {
            (Membership::Join, None) => {
                self.registered_courses.push(course_id);
                self.points_tracker = self.points_tracker.saturating_add(course.credit_points());
            }
            (Membership::Leave, Some(index)) => {
                self.registered_courses.remove(index);
                self.points_tracker = self.points_tracker.saturating_sub(course.credit_points());
            }
            (Membership::Join, Some(_)) | (Membership::Leave, None) => {}
        }
        self.revision += 1;
    }
}
