//! Faculty record handlers. Every route is faculty-only.
//!
//! ```text
//! GET    /api/v1/faculty
//! GET    /api/v1/faculty/{id}
//! POST   /api/v1/faculty {"name":"Grace","email":"grace@uni.test","address":"2 Loop","password":"correct horse"}
//! PUT    /api/v1/faculty/{id} {"name":"Grace","email":"grace@uni.test","address":"3 Loop"}
//! DELETE /api/v1/faculty/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::SignupRequest;
use crate::domain::{Error, Faculty, FacultyId, FacultyProfile, Password};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::created_account;
use crate::inbound::http::guard::require_faculty;
use crate::inbound::http::schemas::{ErrorSchema, FacultySchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{credential_error, profile_error};

/// Editable faculty attributes.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacultyBody {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl FacultyBody {
    fn profile(&self) -> Result<FacultyProfile, Error> {
        FacultyProfile::try_new(&self.name, &self.email, &self.address).map_err(profile_error)
    }
}

/// Body for `POST /api/v1/faculty`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewFacultyBody {
    #[serde(flatten)]
    pub faculty: FacultyBody,
    pub password: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/faculty",
    responses(
        (status = 200, description = "Faculty members", body = [FacultySchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema)
    ),
    tags = ["faculty"],
    operation_id = "listFaculty"
)]
#[get("/faculty")]
pub async fn list_faculty(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Faculty>>> {
    require_faculty(session.require_principal()?)?;
    Ok(web::Json(state.faculty.list_faculty().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/faculty/{id}",
    params(("id" = u64, Path, description = "Faculty id")),
    responses(
        (status = 200, description = "Faculty member", body = FacultySchema),
        (status = 403, description = "Faculty only", body = ErrorSchema),
        (status = 404, description = "Unknown faculty member", body = ErrorSchema)
    ),
    tags = ["faculty"],
    operation_id = "getFaculty"
)]
#[get("/faculty/{id}")]
pub async fn get_faculty(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<FacultyId>,
) -> ApiResult<web::Json<Faculty>> {
    require_faculty(session.require_principal()?)?;
    Ok(web::Json(state.faculty.faculty(path.into_inner()).await?))
}

/// Create a faculty account.
#[utoipa::path(
    post,
    path = "/api/v1/faculty",
    request_body = NewFacultyBody,
    responses(
        (status = 201, description = "Faculty member created", body = FacultySchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema)
    ),
    tags = ["faculty"],
    operation_id = "createFaculty"
)]
#[post("/faculty")]
pub async fn create_faculty(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NewFacultyBody>,
) -> ApiResult<HttpResponse> {
    require_faculty(session.require_principal()?)?;
    let body = payload.into_inner();
    let password = Password::new_secret(&body.password).map_err(credential_error)?;
    let profile = body.faculty.profile()?;
    let account = state
        .signup
        .signup(SignupRequest::Faculty { profile, password })
        .await?;
    Ok(created_account(&account))
}

#[utoipa::path(
    put,
    path = "/api/v1/faculty/{id}",
    params(("id" = u64, Path, description = "Faculty id")),
    request_body = FacultyBody,
    responses(
        (status = 200, description = "Updated faculty member", body = FacultySchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 403, description = "Faculty only", body = ErrorSchema),
        (status = 404, description = "Unknown faculty member", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema)
    ),
    tags = ["faculty"],
    operation_id = "updateFaculty"
)]
#[put("/faculty/{id}")]
pub async fn update_faculty(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<FacultyId>,
    payload: web::Json<FacultyBody>,
) -> ApiResult<web::Json<Faculty>> {
    require_faculty(session.require_principal()?)?;
    let profile = payload.profile()?;
    let member = state
        .faculty
        .update_faculty(path.into_inner(), profile)
        .await?;
    Ok(web::Json(member))
}

#[utoipa::path(
    delete,
    path = "/api/v1/faculty/{id}",
    params(("id" = u64, Path, description = "Faculty id")),
    responses(
        (status = 204, description = "Faculty member removed"),
        (status = 403, description = "Faculty only", body = ErrorSchema),
        (status = 404, description = "Unknown faculty member", body = ErrorSchema)
    ),
    tags = ["faculty"],
    operation_id = "deleteFaculty"
)]
#[delete("/faculty/{id}")]
pub async fn delete_faculty(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<FacultyId>,
) -> ApiResult<HttpResponse> {
    require_faculty(session.require_principal()?)?;
    state.faculty.delete_faculty(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
