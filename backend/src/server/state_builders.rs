//! Wire stores, services, and the password hasher into HTTP state.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::RegistrationCommand;
use crate::domain::{AccountService, DirectoryService, RegistrationService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::InMemoryCampusStore;
use crate::outbound::security::BcryptPasswordHasher;

/// Build the handler state over one shared campus store.
///
/// Every service sees the same store, so registrations, cascades, and
/// directory edits all validate against the same revisions.
pub fn build_http_state(store: InMemoryCampusStore, password_cost: u32) -> web::Data<HttpState> {
    let store = Arc::new(store);
    let registration = Arc::new(RegistrationService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
    ));
    let cascade: Arc<dyn RegistrationCommand> = registration.clone();
    let directory = Arc::new(DirectoryService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        cascade,
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::new(BcryptPasswordHasher::new(password_cost)),
    ));

    web::Data::new(HttpState {
        login: accounts.clone(),
        signup: accounts,
        students: directory.clone(),
        faculty: directory.clone(),
        courses: directory,
        registration: registration.clone(),
        registration_query: registration,
    })
}
