//! Builds HTTP handler state from the selected storage backend.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use paintapp::inbound::http::state::HttpState;
use paintapp::outbound::persistence::{DieselPaintingRepository, DieselUserRepository};
use paintapp::startup::StorageBackend;

/// Wire domain services over PostgreSQL when a pool exists, otherwise over
/// the shared in-memory store.
pub(super) fn build_http_state(storage: &StorageBackend) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let state = match storage {
        StorageBackend::Postgres(pool) => HttpState::from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselPaintingRepository::new(pool.clone())),
            clock,
        ),
        StorageBackend::InMemory(store) => {
            HttpState::from_repositories(store.clone(), store.clone(), clock)
        }
    };
    web::Data::new(state)
}
