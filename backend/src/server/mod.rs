//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ConfigError, SESSION_KEY_MIN_LEN, ServerSettings, key_fingerprint};
pub use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, courses, faculty, registrations, students};
use crate::middleware::Trace;
use crate::outbound::persistence::InMemoryCampusStore;

/// Session lifetime, matching the issued-credential expiry clients expect.
pub const SESSION_TTL_MINUTES: i64 = 10;

/// Everything [`build_app`] needs, cloned into each worker.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
}

/// Register every `/api/v1` handler on `cfg`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::signup)
        .service(auth::login)
        .service(auth::logout)
        .service(students::list_students)
        .service(students::registered_courses)
        .service(students::get_student)
        .service(students::create_student)
        .service(students::update_student)
        .service(students::delete_student)
        .service(faculty::list_faculty)
        .service(faculty::get_faculty)
        .service(faculty::create_faculty)
        .service(faculty::update_faculty)
        .service(faculty::delete_faculty)
        .service(courses::list_courses)
        .service(courses::roster_status)
        .service(courses::get_course)
        .service(courses::create_course)
        .service(courses::update_course)
        .service(courses::delete_course)
        .service(registrations::register)
        .service(registrations::deregister);
}

/// Assemble the application: sessions and JSON error handling on the API
/// scope, tracing around everything, probes at the root.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(
            actix_web::cookie::time::Duration::minutes(SESSION_TTL_MINUTES),
        ))
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server from loaded settings.
///
/// The campus store starts empty; accounts arrive through signup.
///
/// # Errors
/// Returns [`std::io::Error`] when the settings are unusable or binding the
/// socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> std::io::Result<Server> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let key = settings.session_key().map_err(std::io::Error::other)?;
    info!(fingerprint = %key_fingerprint(&key), "session key loaded");
    let http_state = build_http_state(InMemoryCampusStore::new(), settings.password_cost());
    let cookie_secure = settings.cookie_secure;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
