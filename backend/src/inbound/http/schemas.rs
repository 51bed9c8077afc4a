//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A registration or catalogue rule rejected the request.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Conflicts name the violated rule in `details.code`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "course 2 is full (30 seats)")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as `{"code":"course_full","courseId":2}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Student`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Student, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentSchema {
    #[schema(example = 4)]
    id: u64,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@uni.test")]
    email: String,
    address: String,
    #[schema(example = 2)]
    year: u32,
    /// Courses in registration order.
    registered_courses: Vec<u64>,
    /// Summed credit weight of `registeredCourses`.
    #[schema(example = 12)]
    points_tracker: u32,
}

/// OpenAPI schema for [`crate::domain::Faculty`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Faculty)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FacultySchema {
    #[schema(example = 1)]
    id: u64,
    #[schema(example = "Grace Hopper")]
    name: String,
    #[schema(example = "grace@uni.test")]
    email: String,
    address: String,
}

/// OpenAPI schema for [`crate::domain::Course`], the faculty view.
#[derive(ToSchema)]
#[schema(as = crate::domain::Course, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CourseSchema {
    #[schema(example = 2)]
    id: u64,
    #[schema(example = "Set Theory")]
    name: String,
    #[schema(example = "G. Cantor")]
    instructor: String,
    #[schema(example = 4)]
    credit_points: u32,
    #[schema(example = 30)]
    max_students: u32,
    /// Roster in enrolment order.
    enrolled_students: Vec<u64>,
}

/// OpenAPI schema for [`crate::domain::CourseSummary`], the student view.
#[derive(ToSchema)]
#[schema(as = crate::domain::CourseSummary, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CourseSummarySchema {
    #[schema(example = 2)]
    id: u64,
    #[schema(example = "Set Theory")]
    name: String,
    #[schema(example = "G. Cantor")]
    instructor: String,
    #[schema(example = 4)]
    credit_points: u32,
}

/// OpenAPI schema for [`crate::domain::RosterStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RosterStatus, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct RosterStatusSchema {
    id: u64,
    name: String,
    instructor: String,
    credit_points: u32,
    max_students: u32,
    enrolled_count: u32,
    seats_remaining: u32,
    enrolled_students: Vec<u64>,
}

/// OpenAPI schema for [`crate::domain::ports::Enrollment`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Enrollment)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnrollmentSchema {
    /// The student after the change.
    student: StudentSchema,
    /// The course after the change.
    course: CourseSchema,
}

/// OpenAPI schema for [`crate::domain::ports::CourseRemoval`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CourseRemoval, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CourseRemovalSchema {
    course: u64,
    /// Students whose registration was released.
    released_students: Vec<u64>,
    /// Enrolled ids that no longer resolved to a student.
    skipped_students: Vec<u64>,
}

/// OpenAPI schema for [`crate::domain::ports::StudentRemoval`].
#[derive(ToSchema)]
#[schema(as = crate::domain::StudentRemoval, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StudentRemovalSchema {
    student: u64,
    /// Courses the student was removed from.
    released_courses: Vec<u64>,
    /// Registered ids that no longer resolved to a course.
    skipped_courses: Vec<u64>,
}
