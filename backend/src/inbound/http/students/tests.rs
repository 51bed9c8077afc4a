//! Tests for student record handlers.

use super::*;
use crate::domain::ports::Account;
use crate::domain::{CourseId, CredentialHash, FacultyId, Principal};
use crate::inbound::http::test_utils::{MockPorts, api_app, login_as};
use actix_web::http::StatusCode;
use actix_web::test;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

const FACULTY: Principal = Principal::Faculty(FacultyId::new(1));
const ADA: Principal = Principal::Student(StudentId::new(4));
const GRACE: Principal = Principal::Student(StudentId::new(5));

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_students)
        .service(registered_courses)
        .service(get_student)
        .service(create_student)
        .service(update_student)
        .service(delete_student);
}

fn ada() -> Student {
    let profile =
        StudentProfile::try_new("Ada", "ada@uni.test", "1 Loop", 2).expect("valid profile");
    Student::new(StudentId::new(4), profile, CredentialHash::new("digest"))
}

#[actix_web::test]
async fn anonymous_list_is_unauthorised() {
    let app = test::init_service(api_app(MockPorts::default(), routes)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/students").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn students_cannot_list_students() {
    let mut ports = MockPorts::default();
    ports.students.expect_list_students().times(0);
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, ADA).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/students")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case(FACULTY, StatusCode::OK)]
#[case(ADA, StatusCode::OK)]
#[case(GRACE, StatusCode::FORBIDDEN)]
#[actix_web::test]
async fn student_record_is_visible_to_faculty_and_owner(
    #[case] caller: Principal,
    #[case] expected: StatusCode,
) {
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_student()
        .with(eq(StudentId::new(4)))
        .returning(|_| Ok(ada()));
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, caller).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/students/4")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
}

#[actix_web::test]
async fn student_body_uses_camel_case() {
    let mut ports = MockPorts::default();
    ports.students.expect_student().returning(|_| Ok(ada()));
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, ADA).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/students/4")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({
            "id": 4,
            "name": "Ada",
            "email": "ada@uni.test",
            "address": "1 Loop",
            "year": 2,
            "registeredCourses": [],
            "pointsTracker": 0,
        })
    );
}

#[actix_web::test]
async fn faculty_creates_students_through_signup() {
    let mut ports = MockPorts::default();
    ports
        .signup
        .expect_signup()
        .withf(|request| {
            matches!(request, SignupRequest::Student { profile, password }
                if profile.email() == "ada@uni.test" && password.expose() == "hunter22")
        })
        .times(1)
        .returning(|_| Ok(Account::Student(ada())));
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, FACULTY).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/students")
            .cookie(cookie)
            .set_json(json!({
                "name": "Ada",
                "email": "ada@uni.test",
                "address": "1 Loop",
                "year": 2,
                "password": "hunter22",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn owner_update_rejects_blank_name() {
    let mut ports = MockPorts::default();
    ports.students.expect_update_student().times(0);
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, ADA).await;

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/students/4")
            .cookie(cookie)
            .set_json(json!({ "name": " ", "email": "ada@uni.test", "address": "1 Loop", "year": 2 }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "name");
}

#[actix_web::test]
async fn delete_reports_released_courses() {
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_delete_student()
        .with(eq(StudentId::new(4)))
        .returning(|student| {
            Ok(StudentRemoval {
                student,
                released_courses: vec![CourseId::new(1), CourseId::new(2)],
                skipped_courses: Vec::new(),
            })
        });
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, FACULTY).await;

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/students/4")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({ "student": 4, "releasedCourses": [1, 2], "skippedCourses": [] })
    );
}

#[rstest]
#[case(FACULTY)]
#[case(GRACE)]
#[actix_web::test]
async fn registered_courses_are_owner_only(#[case] caller: Principal) {
    let mut ports = MockPorts::default();
    ports.registration_query.expect_registered_courses().times(0);
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, caller).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/students/4/courses")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn owner_lists_registered_courses() {
    let mut ports = MockPorts::default();
    ports
        .registration_query
        .expect_registered_courses()
        .with(eq(StudentId::new(4)))
        .returning(|_| {
            Ok(vec![CourseSummary {
                id: CourseId::new(2),
                name: "Sets".to_owned(),
                instructor: "Cantor".to_owned(),
                credit_points: 4,
            }])
        });
    let app = test::init_service(api_app(ports, routes)).await;
    let cookie = login_as(&app, ADA).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/students/4/courses")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!([{ "id": 2, "name": "Sets", "instructor": "Cantor", "creditPoints": 4 }])
    );
}
