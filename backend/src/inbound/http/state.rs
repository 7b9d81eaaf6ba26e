//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    PaintingCommand, PaintingQuery, PaintingRepository, UserRepository, UsersQuery,
};
use crate::domain::{PaintingService, UsersService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersQuery>,
    pub paintings: Arc<dyn PaintingCommand>,
    pub painting_queries: Arc<dyn PaintingQuery>,
}

impl HttpState {
    pub fn new(
        users: Arc<dyn UsersQuery>,
        paintings: Arc<dyn PaintingCommand>,
        painting_queries: Arc<dyn PaintingQuery>,
    ) -> Self {
        Self {
            users,
            paintings,
            painting_queries,
        }
    }

    /// Wire the domain services over a pair of repository adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use paintapp::inbound::http::state::HttpState;
    /// use paintapp::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let state = HttpState::from_repositories(store.clone(), store, Arc::new(DefaultClock));
    /// let _users = state.users.clone();
    /// ```
    pub fn from_repositories<U, P>(users: Arc<U>, paintings: Arc<P>, clock: Arc<dyn Clock>) -> Self
    where
        U: UserRepository + 'static,
        P: PaintingRepository + 'static,
    {
        let painting_service = Arc::new(PaintingService::new(paintings, users.clone(), clock));
        Self::new(
            Arc::new(UsersService::new(users)),
            painting_service.clone(),
            painting_service,
        )
    }
}
