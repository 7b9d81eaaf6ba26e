//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::Trace;
use crate::domain::ports::{PaintingCommand, PaintingQuery};
use crate::domain::{Error, Painting, PaintingDraft, PaintingId, UserId, default_users};
use crate::inbound::http::paintings::{painting_by_id, paintings_for_user, save_painting};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::list_users;
use crate::inbound::http::validation::json_config;
use crate::outbound::memory::InMemoryStore;

/// Clock pinned to a fixed instant.
pub struct FixtureClock {
    pub utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// The instant every fixture clock reports.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
        .single()
        .expect("valid timestamp")
}

/// In-memory state holding the three default users and no paintings.
pub fn seeded_state() -> HttpState {
    let store = Arc::new(InMemoryStore::with_users(
        default_users().expect("valid default users"),
    ));
    HttpState::from_repositories(
        store.clone(),
        store,
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

struct UnreachablePaintings;

#[async_trait]
impl PaintingCommand for UnreachablePaintings {
    async fn save_painting(&self, _draft: PaintingDraft) -> Result<Painting, Error> {
        Err(Error::service_unavailable("painting repository unavailable"))
    }
}

#[async_trait]
impl PaintingQuery for UnreachablePaintings {
    async fn painting_for_user(&self, _user_id: &UserId) -> Result<Option<Painting>, Error> {
        Err(Error::service_unavailable("painting repository unavailable"))
    }

    async fn painting_by_id(&self, _id: &PaintingId) -> Result<Painting, Error> {
        Err(Error::service_unavailable("painting repository unavailable"))
    }
}

/// Painting ports that fail every call as if the database were down.
pub fn unreachable_painting_ports() -> (Arc<dyn PaintingCommand>, Arc<dyn PaintingQuery>) {
    let ports = Arc::new(UnreachablePaintings);
    (ports.clone(), ports)
}

/// App exposing every API route over `state`, wired like production.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(Trace)
        .service(list_users)
        .service(save_painting)
        .service(painting_by_id)
        .service(paintings_for_user)
}
