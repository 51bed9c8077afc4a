//! Signup and login for students and faculty.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    Account, FacultyDraft, FacultyRepository, LoginService, PasswordHasher, SignupCommand,
    SignupRequest, StudentDraft, StudentRepository, persistence_failure, write_failure,
};
use crate::domain::{CredentialHash, Error, LoginCredentials, Password, Principal, Role};

const LOGIN_FAILED: &str = "invalid email or password";
const DECOY_PASSWORD: &str = "decoy password for unknown accounts";

/// Account service implementing the signup and login driving ports.
pub struct AccountService<S, F, H> {
    students: Arc<S>,
    faculty: Arc<F>,
    hasher: Arc<H>,
    decoy: Arc<OnceLock<CredentialHash>>,
}

impl<S, F, H> Clone for AccountService<S, F, H> {
    fn clone(&self) -> Self {
        Self {
            students: Arc::clone(&self.students),
            faculty: Arc::clone(&self.faculty),
            hasher: Arc::clone(&self.hasher),
            decoy: Arc::clone(&self.decoy),
        }
    }
}

impl<S, F, H> AccountService<S, F, H> {
    /// Create a new service over the identity stores and a hasher.
    pub fn new(students: Arc<S>, faculty: Arc<F>, hasher: Arc<H>) -> Self {
        Self {
            students,
            faculty,
            hasher,
            decoy: Arc::new(OnceLock::new()),
        }
    }
}

fn hashing_task_failed(err: &tokio::task::JoinError) -> Error {
    warn!(error = %err, "password hashing task failed");
    Error::internal("password hashing task failed")
}

impl<S, F, H> AccountService<S, F, H>
where
    H: PasswordHasher + 'static,
{
    async fn digest(&self, password: &Password) -> Result<CredentialHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let raw = Zeroizing::new(password.expose().to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&raw))
            .await
            .map_err(|err| hashing_task_failed(&err))?
            .map_err(|err| {
                warn!(error = %err, "password hashing failed");
                Error::internal(err.to_string())
            })
    }

    /// Check `credentials` against `stored`, or against a decoy digest when
    /// no account matched. Both paths run exactly one `verify`.
    async fn verified(
        &self,
        credentials: &LoginCredentials,
        stored: Option<CredentialHash>,
    ) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let decoy = Arc::clone(&self.decoy);
        let raw = Zeroizing::new(credentials.password().to_owned());
        tokio::task::spawn_blocking(move || match stored {
            Some(stored) => hasher.verify(&raw, &stored),
            None => {
                let decoy = decoy.get_or_init(|| {
                    hasher.hash(DECOY_PASSWORD).unwrap_or_else(|err| {
                        warn!(error = %err, "decoy digest unavailable");
                        CredentialHash::new("")
                    })
                });
                hasher.verify(&raw, decoy);
                false
            }
        })
        .await
        .map_err(|err| hashing_task_failed(&err))
    }
}

#[async_trait]
impl<S, F, H> SignupCommand for AccountService<S, F, H>
where
    S: StudentRepository,
    F: FacultyRepository,
    H: PasswordHasher + 'static,
{
    async fn signup(&self, request: SignupRequest) -> Result<Account, Error> {
        let account = match request {
            SignupRequest::Student { profile, password } => {
                let credential = self.digest(&password).await?;
                let student = self
                    .students
                    .create(StudentDraft {
                        profile,
                        credential,
                    })
                    .await
                    .map_err(write_failure)?;
                Account::Student(student)
            }
            SignupRequest::Faculty { profile, password } => {
                let credential = self.digest(&password).await?;
                let member = self
                    .faculty
                    .create(FacultyDraft {
                        profile,
                        credential,
                    })
                    .await
                    .map_err(write_failure)?;
                Account::Faculty(member)
            }
        };
        let principal = account.principal();
        info!(role = %principal.role(), id = principal.raw_id(), "account created");
        Ok(account)
    }
}

#[async_trait]
impl<S, F, H> LoginService for AccountService<S, F, H>
where
    S: StudentRepository,
    F: FacultyRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(
        &self,
        role: Role,
        credentials: &LoginCredentials,
    ) -> Result<Principal, Error> {
        let account = match role {
            Role::Student => self
                .students
                .find_by_email(credentials.email())
                .await
                .map_err(persistence_failure)?
                .map(|student| (Principal::Student(student.id()), student.credential().clone())),
            Role::Faculty => self
                .faculty
                .find_by_email(credentials.email())
                .await
                .map_err(persistence_failure)?
                .map(|member| (Principal::Faculty(member.id()), member.credential().clone())),
        };
        let (principal, stored) = account.unzip();
        let accepted = self.verified(credentials, stored).await?;
        let principal = principal.filter(|_| accepted);
        match principal {
            Some(principal) => {
                info!(role = %role, id = principal.raw_id(), "login succeeded");
                Ok(principal)
            }
            None => {
                warn!(role = %role, "login rejected");
                Err(Error::unauthorized(LOGIN_FAILED))
            }
        }
    }
}
