//! Role and ownership checks applied before handlers reach a service.
//!
//! Every check matches on [`Principal`] exhaustively, so adding a role
//! forces each route to decide what it may do.

use tracing::warn;

use crate::domain::{Error, FacultyId, Principal, StudentId};

/// Allow faculty only.
pub fn require_faculty(principal: Principal) -> Result<FacultyId, Error> {
    match principal {
        Principal::Faculty(id) => Ok(id),
        Principal::Student(_) => Err(Error::forbidden("faculty access required")),
    }
}

/// Allow only the student identified by `target`.
pub fn require_student_owner(principal: Principal, target: StudentId) -> Result<StudentId, Error> {
    match principal {
        Principal::Student(id) if id == target => Ok(id),
        Principal::Student(id) => {
            warn!(caller = %id, target = %target, "student acted on another student's record");
            Err(Error::forbidden("students may only act on their own record"))
        }
        Principal::Faculty(_) => Err(Error::forbidden("student access required")),
    }
}

/// Allow faculty, or the student identified by `target`.
pub fn require_faculty_or_owner(principal: Principal, target: StudentId) -> Result<(), Error> {
    match principal {
        Principal::Faculty(_) => Ok(()),
        Principal::Student(id) if id == target => Ok(()),
        Principal::Student(id) => {
            warn!(caller = %id, target = %target, "student read another student's record");
            Err(Error::forbidden("students may only access their own record"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const ADA: Principal = Principal::Student(StudentId::new(1));
    const GRACE: Principal = Principal::Faculty(FacultyId::new(1));

    #[rstest]
    #[case(GRACE, true)]
    #[case(ADA, false)]
    fn faculty_routes_reject_students(#[case] principal: Principal, #[case] allowed: bool) {
        assert_eq!(require_faculty(principal).is_ok(), allowed);
    }

    #[rstest]
    #[case(ADA, 1, None)]
    #[case(ADA, 2, Some(ErrorCode::Forbidden))]
    #[case(GRACE, 1, Some(ErrorCode::Forbidden))]
    fn student_routes_require_the_owner(
        #[case] principal: Principal,
        #[case] target: u64,
        #[case] failure: Option<ErrorCode>,
    ) {
        let result = require_student_owner(principal, StudentId::new(target));
        assert_eq!(result.err().map(|err| err.code()), failure);
    }

    #[rstest]
    #[case(GRACE, 7, true)]
    #[case(ADA, 1, true)]
    #[case(ADA, 7, false)]
    fn shared_routes_admit_faculty_and_owner(
        #[case] principal: Principal,
        #[case] target: u64,
        #[case] allowed: bool,
    ) {
        assert_eq!(
            require_faculty_or_owner(principal, StudentId::new(target)).is_ok(),
            allowed
        );
    }
}
