//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! schema wrappers from [`crate::inbound::http::schemas`], and the session
//! cookie security scheme. The document backs Swagger UI in debug builds and
//! is exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    CourseRemovalSchema, CourseSchema, CourseSummarySchema, EnrollmentSchema, ErrorCodeSchema,
    ErrorSchema, FacultySchema, RosterStatusSchema, StudentRemovalSchema, StudentSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login or /api/v1/auth/signup.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Registrar API",
        description = "Course registration: accounts, catalogue, and capacity-checked enrolment.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::students::registered_courses,
        crate::inbound::http::faculty::list_faculty,
        crate::inbound::http::faculty::get_faculty,
        crate::inbound::http::faculty::create_faculty,
        crate::inbound::http::faculty::update_faculty,
        crate::inbound::http::faculty::delete_faculty,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::roster_status,
        crate::inbound::http::registrations::register,
        crate::inbound::http::registrations::deregister,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        StudentSchema,
        FacultySchema,
        CourseSchema,
        CourseSummarySchema,
        RosterStatusSchema,
        EnrollmentSchema,
        CourseRemovalSchema,
        StudentRemovalSchema,
    )),
    tags(
        (name = "auth", description = "Signup, login, and logout"),
        (name = "students", description = "Student records"),
        (name = "faculty", description = "Faculty records"),
        (name = "courses", description = "Course catalogue"),
        (name = "registrations", description = "Registering students for courses"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const STUDENT_SCHEMA_NAME: &str = "crate.domain.Student";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "details");
    }

    #[test]
    fn openapi_student_schema_has_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let student_schema = schemas.get(STUDENT_SCHEMA_NAME).expect("Student schema");

        assert_object_schema_has_field(student_schema, "registeredCourses");
        assert_object_schema_has_field(student_schema, "pointsTracker");
    }

    #[test]
    fn registration_paths_are_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/registrations",
            "/api/v1/students/{id}/courses",
            "/api/v1/courses/{id}/registration",
            "/api/v1/auth/login",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
