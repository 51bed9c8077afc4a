//! Registration handlers.
//!
//! ```text
//! POST   /api/v1/registrations {"studentId":4,"courseId":2}
//! DELETE /api/v1/registrations {"studentId":4,"courseId":2}
//! ```
//!
//! Only the student named in the body may change their own registrations.

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::Enrollment;
use crate::domain::{CourseId, StudentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::require_student_owner;
use crate::inbound::http::schemas::{EnrollmentSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Student and course a registration change applies to.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationBody {
    #[schema(value_type = u64)]
    pub student_id: StudentId,
    #[schema(value_type = u64)]
    pub course_id: CourseId,
}

/// Register the calling student for a course.
#[utoipa::path(
    post,
    path = "/api/v1/registrations",
    request_body = RegistrationBody,
    responses(
        (status = 201, description = "Registered", body = EnrollmentSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner, or not a student", body = ErrorSchema),
        (status = 404, description = "Unknown student or course", body = ErrorSchema),
        (status = 409, description = "Already registered, course full, credit limit, or contention", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "register"
)]
#[post("/registrations")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegistrationBody>,
) -> ApiResult<HttpResponse> {
    let RegistrationBody {
        student_id,
        course_id,
    } = payload.into_inner();
    let student = require_student_owner(session.require_principal()?, student_id)?;
    let enrollment: Enrollment = state.registration.register(student, course_id).await?;
    Ok(HttpResponse::Created().json(enrollment))
}

/// Withdraw the calling student from a course.
#[utoipa::path(
    delete,
    path = "/api/v1/registrations",
    request_body = RegistrationBody,
    responses(
        (status = 200, description = "Deregistered", body = EnrollmentSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner, or not a student", body = ErrorSchema),
        (status = 404, description = "Unknown student or course", body = ErrorSchema),
        (status = 409, description = "Not registered, or contention", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "deregister"
)]
#[delete("/registrations")]
pub async fn deregister(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegistrationBody>,
) -> ApiResult<web::Json<Enrollment>> {
    let RegistrationBody {
        student_id,
        course_id,
    } = payload.into_inner();
    let student = require_student_owner(session.require_principal()?, student_id)?;
    let enrollment = state.registration.deregister(student, course_id).await?;
    Ok(web::Json(enrollment))
}
