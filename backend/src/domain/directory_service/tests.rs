//! Unit coverage for the directory service.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    MockCourseRepository, MockFacultyRepository, MockRegistrationCommand, MockStudentRepository,
    StoreError,
};
use crate::domain::{CredentialHash, StudentProfile};
use mockall::predicate::eq;
use rstest::rstest;

type Service = DirectoryService<MockStudentRepository, MockFacultyRepository, MockCourseRepository>;

fn service_with(
    students: MockStudentRepository,
    faculty: MockFacultyRepository,
    courses: MockCourseRepository,
    registration: MockRegistrationCommand,
) -> Service {
    DirectoryService::new(
        Arc::new(students),
        Arc::new(faculty),
        Arc::new(courses),
        Arc::new(registration),
    )
}

fn courses_service(courses: MockCourseRepository) -> Service {
    service_with(
        MockStudentRepository::new(),
        MockFacultyRepository::new(),
        courses,
        MockRegistrationCommand::new(),
    )
}

fn enrolled_course(enrolled: u64) -> Course {
    let details = CourseDetails::try_new("Sets", "Cantor", 4, 5).expect("valid details");
    let mut course = Course::new(CourseId::new(3), details);
    for id in 1..=enrolled {
        course.admit(StudentId::new(id));
    }
    course
}

fn details(credit_points: u32, max_students: u32) -> CourseDetails {
    CourseDetails::try_new("Sets", "Cantor", credit_points, max_students).expect("valid details")
}

#[rstest]
#[case(3, details(4, 2), "capacity_below_enrollment")]
#[case(2, details(6, 5), "credit_points_locked")]
#[tokio::test]
async fn course_edits_that_break_rosters_are_rejected(
    #[case] enrolled: u64,
    #[case] edit: CourseDetails,
    #[case] rule: &str,
) {
    let stored = enrolled_course(enrolled);
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    courses.expect_update().times(0);

    let err = courses_service(courses)
        .update_course(CourseId::new(3), edit)
        .await
        .expect_err("edit is rejected");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.detail_code(), Some(rule));
}

#[tokio::test]
async fn credit_points_may_change_on_an_empty_course() {
    let stored = enrolled_course(0);
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    courses
        .expect_update()
        .withf(|course, expected| course.credit_points() == 6 && *expected == 1)
        .times(1)
        .returning(|_, _| Ok(()));

    let updated = courses_service(courses)
        .update_course(CourseId::new(3), details(6, 5))
        .await
        .expect("edit applies");

    assert_eq!(updated.credit_points(), 6);
    assert_eq!(updated.revision(), 2);
}

#[tokio::test]
async fn stale_course_edit_is_retried() {
    let stored = enrolled_course(1);
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(Some(stored.clone())));
    let mut seq = mockall::Sequence::new();
    courses
        .expect_update()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(StoreError::revision_mismatch("course", 3_u64, 2_u64, 3_u64)));
    courses
        .expect_update()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    courses_service(courses)
        .update_course(CourseId::new(3), details(4, 9))
        .await
        .expect("second attempt applies");
}

#[tokio::test]
async fn duplicate_email_on_update_is_email_taken() {
    let profile =
        StudentProfile::try_new("Ada", "ada@uni.test", "1 Loop", 2).expect("valid profile");
    let stored = Student::new(StudentId::new(1), profile, CredentialHash::new("hash"));
    let mut students = MockStudentRepository::new();
    students
        .expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    students
        .expect_update()
        .returning(|_, _| Err(StoreError::duplicate("student", "email")));

    let edit =
        StudentProfile::try_new("Ada", "grace@uni.test", "1 Loop", 2).expect("valid profile");
    let err = service_with(
        students,
        MockFacultyRepository::new(),
        MockCourseRepository::new(),
        MockRegistrationCommand::new(),
    )
    .update_student(StudentId::new(1), edit)
    .await
    .expect_err("email is taken");

    assert_eq!(err.detail_code(), Some("email_taken"));
}

#[tokio::test]
async fn deleting_a_course_runs_the_cascade() {
    let mut registration = MockRegistrationCommand::new();
    registration
        .expect_cascade_remove_course()
        .with(eq(CourseId::new(3)))
        .times(1)
        .returning(|course| {
            Ok(CourseRemoval {
                course,
                released_students: vec![StudentId::new(1)],
                skipped_students: Vec::new(),
            })
        });

    let removal = service_with(
        MockStudentRepository::new(),
        MockFacultyRepository::new(),
        MockCourseRepository::new(),
        registration,
    )
    .delete_course(CourseId::new(3))
    .await
    .expect("cascade succeeds");

    assert_eq!(removal.released_students, vec![StudentId::new(1)]);
}

#[tokio::test]
async fn deleting_unknown_faculty_is_not_found() {
    let mut faculty = MockFacultyRepository::new();
    faculty.expect_delete().returning(|_| Ok(false));

    let err = service_with(
        MockStudentRepository::new(),
        faculty,
        MockCourseRepository::new(),
        MockRegistrationCommand::new(),
    )
    .delete_faculty(FacultyId::new(8))
    .await
    .expect_err("nothing to delete");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        err.details(),
        Some(&json!({ "resource": "faculty", "id": 8 }))
    );
}

#[tokio::test]
async fn unreachable_store_is_service_unavailable() {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_list()
        .returning(|| Err(StoreError::connection("refused")));

    let err = courses_service(courses)
        .list_courses()
        .await
        .expect_err("store is down");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
