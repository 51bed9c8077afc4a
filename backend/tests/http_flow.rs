//! Full HTTP flows through the assembled application.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{Value, json};

use registrar::inbound::http::health::HealthState;
use registrar::outbound::persistence::InMemoryCampusStore;
use registrar::outbound::security::MIN_COST;
use registrar::server::{AppDependencies, build_app, build_http_state};

fn deps() -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: build_http_state(InMemoryCampusStore::new(), MIN_COST),
        key: Key::generate(),
        cookie_secure: false,
    }
}

fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

async fn signup<S, B>(app: &S, body: Value) -> (Cookie<'static>, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let cookie = session_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    (cookie, body)
}

fn student(name: &str) -> Value {
    json!({
        "role": "student",
        "name": name,
        "email": format!("{name}@uni.test"),
        "address": "1 Loop",
        "year": 2,
        "password": "hunter22",
    })
}

fn faculty_member() -> Value {
    json!({
        "role": "faculty",
        "name": "Grace",
        "email": "grace@uni.test",
        "address": "2 Loop",
        "password": "correct horse",
    })
}

#[actix_web::test]
async fn registration_flow_enforces_guards_and_rules() {
    let app = test::init_service(build_app(deps())).await;
    let (faculty, _) = signup(&app, faculty_member()).await;
    let (ada, ada_body) = signup(&app, student("ada")).await;
    let (_, grace_body) = signup(&app, student("grace")).await;
    let ada_id = ada_body["id"].as_u64().expect("ada id");
    let grace_id = grace_body["id"].as_u64().expect("grace id");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(faculty.clone())
            .set_json(json!({ "name": "Seminar", "instructor": "Grace", "creditPoints": 2, "maxStudents": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let course: Value = test::read_body_json(res).await;
    let course_id = course["id"].as_u64().expect("course id");

    // anonymous
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/registrations")
            .set_json(json!({ "studentId": ada_id, "courseId": course_id }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // another student's record
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/registrations")
            .cookie(ada.clone())
            .set_json(json!({ "studentId": grace_id, "courseId": course_id }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // faculty never register
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/registrations")
            .cookie(faculty.clone())
            .set_json(json!({ "studentId": ada_id, "courseId": course_id }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/registrations")
            .cookie(ada.clone())
            .set_json(json!({ "studentId": ada_id, "courseId": course_id }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let enrollment: Value = test::read_body_json(res).await;
    assert_eq!(enrollment["student"]["pointsTracker"], 2);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/registrations")
            .cookie(ada.clone())
            .set_json(json!({ "studentId": ada_id, "courseId": course_id }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert!(res.headers().contains_key("trace-id"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "already_registered");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}/registration"))
            .cookie(faculty)
            .to_request(),
    )
    .await;
    let status: Value = test::read_body_json(res).await;
    assert_eq!(status["enrolledStudents"], json!([ada_id]));
    assert_eq!(status["seatsRemaining"], 0);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/students/{ada_id}/courses"))
            .cookie(ada)
            .to_request(),
    )
    .await;
    let courses: Value = test::read_body_json(res).await;
    assert_eq!(courses[0]["id"], course_id);
    assert!(courses[0].get("maxStudents").is_none());
}

#[actix_web::test]
async fn login_after_logout_restores_access() {
    let app = test::init_service(build_app(deps())).await;
    let (cookie, body) = signup(&app, student("ada")).await;
    let id = body["id"].as_u64().expect("id");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "role": "student", "email": "ADA@uni.test", "password": "hunter22" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cookie = session_cookie(&res);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/students/{id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = test::init_service(build_app(deps())).await;
    signup(&app, student("ada")).await;

    let mut messages = Vec::new();
    for (email, password) in [("ada@uni.test", "wrong-pass"), ("nobody@uni.test", "hunter22")] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(json!({ "role": "student", "email": email, "password": password }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        messages.push(body["message"].clone());
    }

    assert_eq!(messages[0], messages[1]);
}

#[actix_web::test]
async fn malformed_bodies_and_paths_are_invalid_requests() {
    let app = test::init_service(build_app(deps())).await;
    let (faculty, _) = signup(&app, faculty_member()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(faculty.clone())
            .set_json(json!({ "name": "Sets" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_body");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/courses/abc")
            .cookie(faculty)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "invalid_path");
}

#[actix_web::test]
async fn probes_are_served_outside_the_api_scope() {
    let deps = deps();
    deps.health_state.mark_ready();
    let app = test::init_service(build_app(deps)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
}
