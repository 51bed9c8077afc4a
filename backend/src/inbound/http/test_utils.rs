//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::Principal;
use crate::domain::ports::{
    MockCourseCatalogue, MockFacultyDirectory, MockLoginService, MockRegistrationCommand,
    MockRegistrationQuery, MockSignupCommand, MockStudentDirectory,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the session cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mocked driving ports; set expectations on the fields you need.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub signup: MockSignupCommand,
    pub students: MockStudentDirectory,
    pub faculty: MockFacultyDirectory,
    pub courses: MockCourseCatalogue,
    pub registration: MockRegistrationCommand,
    pub registration_query: MockRegistrationQuery,
}

impl MockPorts {
    /// Wrap the mocks as handler state.
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: Arc::new(self.login),
            signup: Arc::new(self.signup),
            students: Arc::new(self.students),
            faculty: Arc::new(self.faculty),
            courses: Arc::new(self.courses),
            registration: Arc::new(self.registration),
            registration_query: Arc::new(self.registration_query),
        })
    }
}

const TEST_LOGIN_PATH: &str = "/__test/login";

/// Register a route that stores the posted [`Principal`] in the session.
pub fn test_login_route(cfg: &mut web::ServiceConfig) {
    cfg.route(
        TEST_LOGIN_PATH,
        web::post().to(
            |session: SessionContext, principal: web::Json<Principal>| async move {
                session.persist_principal(principal.into_inner())?;
                Ok::<_, crate::domain::Error>(HttpResponse::NoContent().finish())
            },
        ),
    );
}

/// Log in through [`test_login_route`] and return the session cookie.
pub async fn login_as<S, B>(app: &S, principal: Principal) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(TEST_LOGIN_PATH)
            .set_json(principal)
            .to_request(),
    )
    .await;
    session_cookie(&res)
}

/// App with mocked state, test sessions, the test login route, and
/// `routes` mounted under `/api/v1`.
pub fn api_app<F>(
    ports: MockPorts,
    routes: F,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    App::new()
        .app_data(ports.into_state())
        .wrap(test_session_middleware())
        .configure(test_login_route)
        .service(web::scope("/api/v1").configure(routes))
}
