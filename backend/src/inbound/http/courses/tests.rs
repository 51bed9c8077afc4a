//! Tests for course catalogue handlers.

use super::*;
use crate::domain::{FacultyId, StudentId};
use crate::inbound::http::test_utils::{MockPorts, api_app, login_as};
use actix_web::http::StatusCode;
use actix_web::test;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

const FACULTY: Principal = Principal::Faculty(FacultyId::new(1));
const STUDENT: Principal = Principal::Student(StudentId::new(4));

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_courses)
        .service(roster_status)
        .service(get_course)
        .service(create_course)
        .service(update_course)
        .service(delete_course);
}

fn sets() -> Course {
    let details = CourseDetails::try_new("Sets", "Cantor", 4, 2).expect("valid details");
    let mut course = Course::new(CourseId::new(2), details);
    course.admit(StudentId::new(7));
    course
}

#[rstest]
#[case(STUDENT, json!([{ "id": 2, "name": "Sets", "instructor": "Cantor", "creditPoints": 4 }]))]
#[case(FACULTY, json!([{
    "id": 2,
    "name": "Sets",
    "instructor": "Cantor",
    "creditPoints": 4,
    "maxStudents": 2,
    "enrolledStudents": [7],
}]))]
#[actix_web::test]
async fn catalogue_view_depends_on_role(#[case] caller: Principal, #[case] expected: Value) {
    let mut ports = MockPorts::default();
    ports
        .courses
        .expect_list_courses()
        .returning(|| Ok(vec![sets()]));
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, caller).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/courses")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, expected);
}

#[actix_web::test]
async fn anonymous_catalogue_is_unauthorised() {
    let mut ports = MockPorts::default();
    ports.courses.expect_course().times(0);
    let app = test::init_service(api_app(ports, routes)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/courses/2").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn students_cannot_create_courses() {
    let mut ports = MockPorts::default();
    ports.courses.expect_create_course().times(0);
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, STUDENT).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(cookie)
            .set_json(json!({ "name": "Sets", "instructor": "Cantor", "creditPoints": 4, "maxStudents": 2 }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case(json!({ "name": "Sets", "instructor": "Cantor", "creditPoints": 0, "maxStudents": 2 }), "creditPoints")]
#[case(json!({ "name": "Sets", "instructor": "Cantor", "creditPoints": 4, "maxStudents": 0 }), "maxStudents")]
#[actix_web::test]
async fn zero_weights_are_invalid(#[case] body: Value, #[case] field: &str) {
    let mut ports = MockPorts::default();
    ports.courses.expect_create_course().times(0);
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, FACULTY).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn faculty_creates_a_course() {
    let mut ports = MockPorts::default();
    ports
        .courses
        .expect_create_course()
        .withf(|details| details.name() == "Sets" && details.max_students() == 2)
        .returning(|details| Ok(Course::new(CourseId::new(2), details)));
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, FACULTY).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .cookie(cookie)
            .set_json(json!({ "name": "Sets", "instructor": "Cantor", "creditPoints": 4, "maxStudents": 2 }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["enrolledStudents"], json!([]));
}

#[actix_web::test]
async fn capacity_conflict_surfaces_rule_code() {
    let mut ports = MockPorts::default();
    ports.courses.expect_update_course().returning(|_, _| {
        Err(Error::rule_conflict(
            "capacity cannot drop",
            "capacity_below_enrollment",
            json!({ "enrolledCount": 1, "maxStudents": 0 }),
        ))
    });
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, FACULTY).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/courses/2")
            .cookie(cookie)
            .set_json(json!({ "name": "Sets", "instructor": "Cantor", "creditPoints": 4, "maxStudents": 1 }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "capacity_below_enrollment");
}

#[actix_web::test]
async fn delete_reports_released_students() {
    let mut ports = MockPorts::default();
    ports
        .courses
        .expect_delete_course()
        .with(eq(CourseId::new(2)))
        .returning(|course| {
            Ok(CourseRemoval {
                course,
                released_students: vec![StudentId::new(7)],
                skipped_students: vec![StudentId::new(8)],
            })
        });
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, FACULTY).await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/courses/2")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({ "course": 2, "releasedStudents": [7], "skippedStudents": [8] })
    );
}

#[rstest]
#[case(STUDENT, StatusCode::FORBIDDEN)]
#[case(FACULTY, StatusCode::OK)]
#[actix_web::test]
async fn roster_status_is_faculty_only(#[case] caller: Principal, #[case] expected: StatusCode) {
    let mut ports = MockPorts::default();
    ports
        .registration_query
        .expect_roster_status()
        .returning(|_| Ok(sets().roster_status()));
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, caller).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/courses/2/registration")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
    if expected == StatusCode::OK {
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["seatsRemaining"], 1);
        assert_eq!(body["enrolledCount"], 1);
    }
}
