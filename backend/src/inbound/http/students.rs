//! Student record handlers.
//!
//! ```text
//! GET    /api/v1/students
//! GET    /api/v1/students/{id}
//! POST   /api/v1/students {"name":"Ada","email":"ada@uni.test","address":"1 Loop","year":2,"password":"hunter22"}
//! PUT    /api/v1/students/{id} {"name":"Ada","email":"ada@uni.test","address":"2 Loop","year":3}
//! DELETE /api/v1/students/{id}
//! GET    /api/v1/students/{id}/courses
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SignupRequest, StudentRemoval};
use crate::domain::{CourseSummary, Error, Password, Student, StudentId, StudentProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::created_account;
use crate::inbound::http::guard::{require_faculty, require_faculty_or_owner, require_student_owner};
use crate::inbound::http::schemas::{
    CourseSummarySchema, ErrorSchema, StudentRemovalSchema, StudentSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{credential_error, profile_error};

/// Editable student attributes.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentBody {
    pub name: String,
    pub email: String,
    pub address: String,
    pub year: u32,
}

impl StudentBody {
    fn profile(&self) -> Result<StudentProfile, Error> {
        StudentProfile::try_new(&self.name, &self.email, &self.address, self.year)
            .map_err(profile_error)
    }
}

/// Body for `POST /api/v1/students`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentBody {
    #[serde(flatten)]
    pub student: StudentBody,
    pub password: String,
}

/// List every student.
#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Students", body = [StudentSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Student>>> {
    require_faculty(session.require_principal()?)?;
    let students = state.students.list_students().await?;
    Ok(web::Json(students))
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id" = u64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student", body = StudentSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown student", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<StudentId>,
) -> ApiResult<web::Json<Student>> {
    let id = path.into_inner();
    require_faculty_or_owner(session.require_principal()?, id)?;
    let student = state.students.student(id).await?;
    Ok(web::Json(student))
}

/// Create a student account on someone's behalf.
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = NewStudentBody,
    responses(
        (status = 201, description = "Student created", body = StudentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewStudentBody>,
) -> ApiResult<HttpResponse> {
    require_faculty(session.require_principal()?)?;
    let body = payload.into_inner();
    let password = Password::new_secret(&body.password).map_err(credential_error)?;
    let profile = body.student.profile()?;
    let account = state
        .signup
        .signup(SignupRequest::Student { profile, password })
        .await?;
    Ok(created_account(&account))
}

/// Replace a student's personal details.
///
/// Registrations and the credit counter are not editable here.
#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    params(("id" = u64, Path, description = "Student id")),
    request_body = StudentBody,
    responses(
        (status = 200, description = "Updated student", body = StudentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown student", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<StudentId>,
    payload: web::Json<StudentBody>,
) -> ApiResult<web::Json<Student>> {
    let id = path.into_inner();
    require_faculty_or_owner(session.require_principal()?, id)?;
    let profile = payload.profile()?;
    let student = state.students.update_student(id, profile).await?;
    Ok(web::Json(student))
}

/// Delete a student and release every registration it held.
#[utoipa::path(
    delete,
    path = "/api/v1/students/{id}",
    params(("id" = u64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student removed", body = StudentRemovalSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema),
        (status = 404, description = "Unknown student", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<StudentId>,
) -> ApiResult<web::Json<StudentRemoval>> {
    require_faculty(session.require_principal()?)?;
    let removal = state.students.delete_student(path.into_inner()).await?;
    Ok(web::Json(removal))
}

/// Courses the calling student is registered for.
#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/courses",
    params(("id" = u64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Registered courses", body = [CourseSummarySchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the owner", body = ErrorSchema),
        (status = 404, description = "Unknown student", body = ErrorSchema)
    ),
    tags = ["registrations"],
    operation_id = "listRegisteredCourses"
)]
#[get("/students/{id}/courses")]
pub async fn registered_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<StudentId>,
) -> ApiResult<web::Json<Vec<CourseSummary>>> {
    let id = require_student_owner(session.require_principal()?, path.into_inner())?;
    let courses = state.registration_query.registered_courses(id).await?;
    Ok(web::Json(courses))
}

#[cfg(test)]
mod tests;
