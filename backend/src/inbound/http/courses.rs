//! Course catalogue handlers.
//!
//! ```text
//! GET    /api/v1/courses
//! GET    /api/v1/courses/{id}
//! POST   /api/v1/courses {"name":"Sets","instructor":"Cantor","creditPoints":4,"maxStudents":30}
//! PUT    /api/v1/courses/{id}
//! DELETE /api/v1/courses/{id}
//! GET    /api/v1/courses/{id}/registration
//! ```
//!
//! Students read the catalogue as [`CourseSummary`] values; faculty see full
//! records including the roster.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::CourseRemoval;
use crate::domain::{Course, CourseDetails, CourseId, CourseSummary, Error, Principal, RosterStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::require_faculty;
use crate::inbound::http::schemas::{
    CourseRemovalSchema, CourseSchema, CourseSummarySchema, ErrorSchema, RosterStatusSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::course_error;

/// Editable course attributes.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseBody {
    pub name: String,
    pub instructor: String,
    pub credit_points: u32,
    pub max_students: u32,
}

impl CourseBody {
    fn details(&self) -> Result<CourseDetails, Error> {
        CourseDetails::try_new(
            &self.name,
            &self.instructor,
            self.credit_points,
            self.max_students,
        )
        .map_err(course_error)
    }
}

/// List the catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "Full records for faculty, summaries for students", body = [CourseSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let courses = state.courses.list_courses().await?;
    Ok(match principal {
        Principal::Faculty(_) => HttpResponse::Ok().json(courses),
        Principal::Student(_) => {
            let summaries: Vec<CourseSummary> = courses.iter().map(Course::summary).collect();
            HttpResponse::Ok().json(summaries)
        }
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = u64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Full record for faculty, summary for students", body = CourseSummarySchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CourseId>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let course = state.courses.course(path.into_inner()).await?;
    Ok(match principal {
        Principal::Faculty(_) => HttpResponse::Ok().json(course),
        Principal::Student(_) => HttpResponse::Ok().json(course.summary()),
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CourseBody,
    responses(
        (status = 201, description = "Course created", body = CourseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CourseBody>,
) -> ApiResult<HttpResponse> {
    require_faculty(session.require_principal()?)?;
    let details = payload.details()?;
    let course = state.courses.create_course(details).await?;
    Ok(HttpResponse::Created().json(course))
}

/// Replace a course's attributes.
///
/// Capacity may not drop below the enrolled count and credit points are
/// locked while anyone is enrolled; both surface as `409`.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = u64, Path, description = "Course id")),
    request_body = CourseBody,
    responses(
        (status = 200, description = "Updated course", body = CourseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema),
        (status = 409, description = "Edit conflicts with the roster", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CourseId>,
    payload: web::Json<CourseBody>,
) -> ApiResult<web::Json<Course>> {
    require_faculty(session.require_principal()?)?;
    let details = payload.details()?;
    let course = state
        .courses
        .update_course(path.into_inner(), details)
        .await?;
    Ok(web::Json(course))
}

/// Delete a course and release every enrolled student.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id" = u64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course removed", body = CourseRemovalSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CourseId>,
) -> ApiResult<web::Json<CourseRemoval>> {
    require_faculty(session.require_principal()?)?;
    let removal = state.courses.delete_course(path.into_inner()).await?;
    Ok(web::Json(removal))
}

/// Capacity and roster of one course.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}/registration",
    params(("id" = u64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Roster status", body = RosterStatusSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema),
        (status = 404, description = "Unknown course", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "getRosterStatus"
)]
#[get("/courses/{id}/registration")]
pub async fn roster_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CourseId>,
) -> ApiResult<web::Json<RosterStatus>> {
    require_faculty(session.require_principal()?)?;
    let status = state
        .registration_query
        .roster_status(path.into_inner())
        .await?;
    Ok(web::Json(status))
}

#[cfg(test)]
mod tests;
