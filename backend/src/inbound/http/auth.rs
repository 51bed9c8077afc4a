//! Account handlers: signup, login, and logout.
//!
//! ```text
//! POST /api/v1/auth/signup {"role":"student","name":"Ada","email":"ada@uni.test","address":"1 Loop","year":2,"password":"hunter22"}
//! POST /api/v1/auth/login {"role":"student","email":"ada@uni.test","password":"hunter22"}
//! POST /api/v1/auth/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{Account, SignupRequest};
use crate::domain::{Error, FacultyProfile, LoginCredentials, Password, Role, StudentProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, StudentSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{credential_error, profile_error};

/// Signup request body for `POST /api/v1/auth/signup`.
///
/// `year` is required for students and ignored for faculty.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    #[schema(value_type = String, example = "student")]
    pub role: Role,
    pub name: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub year: Option<u32>,
    pub password: String,
}

impl TryFrom<SignupBody> for SignupRequest {
    type Error = Error;

    fn try_from(body: SignupBody) -> Result<Self, Self::Error> {
        let password = Password::new_secret(&body.password).map_err(credential_error)?;
        match body.role {
            Role::Student => {
                let profile = StudentProfile::try_new(
                    &body.name,
                    &body.email,
                    &body.address,
                    body.year.unwrap_or(0),
                )
                .map_err(profile_error)?;
                Ok(Self::Student { profile, password })
            }
            Role::Faculty => {
                let profile = FacultyProfile::try_new(&body.name, &body.email, &body.address)
                    .map_err(profile_error)?;
                Ok(Self::Faculty { profile, password })
            }
        }
    }
}

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[schema(value_type = String, example = "faculty")]
    pub role: Role,
    pub email: String,
    pub password: String,
}

/// Render a freshly created account as `201 Created`.
pub(crate) fn created_account(account: &Account) -> HttpResponse {
    match account {
        Account::Student(student) => HttpResponse::Created().json(student),
        Account::Faculty(member) => HttpResponse::Created().json(member),
    }
}

/// Create an account and log it in.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupBody,
    responses(
        (status = 201, description = "Account created; faculty signups return the faculty record", body = StudentSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let request = SignupRequest::try_from(payload.into_inner())?;
    let account = state.signup.signup(request).await?;
    session.persist_principal(account.principal())?;
    Ok(created_account(&account))
}

/// Authenticate and establish a session.
///
/// Unknown email and wrong password produce the same `401`.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginBody>,
) -> ApiResult<HttpResponse> {
    let LoginBody {
        role,
        email,
        password,
    } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&email, &password).map_err(credential_error)?;
    let principal = state.login.authenticate(role, &credentials).await?;
    session.persist_principal(principal)?;
    Ok(HttpResponse::Ok().json(principal))
}

/// Drop the current session. Succeeds for anonymous callers too.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}
