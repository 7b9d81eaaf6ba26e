//! Painting domain service.
//!
//! Implements the painting command and query ports: resolves the owning user,
//! stamps creation time from the injected clock, and delegates the atomic
//! replacement to the painting repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    PaintingCommand, PaintingPersistenceError, PaintingQuery, PaintingRepository, UserRepository,
};
use crate::domain::users_service::map_user_persistence_error;
use crate::domain::{Error, NewPainting, Painting, PaintingDraft, PaintingId, User, UserId};

fn map_painting_persistence_error(error: PaintingPersistenceError) -> Error {
    match error {
        PaintingPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("painting repository unavailable: {message}"))
        }
        PaintingPersistenceError::Query { message } => {
            Error::internal(format!("painting repository error: {message}"))
        }
        PaintingPersistenceError::Conflict { message } => Error::conflict(message),
    }
}

/// Painting service implementing both painting driving ports.
#[derive(Clone)]
pub struct PaintingService<P, U> {
    painting_repo: Arc<P>,
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> PaintingService<P, U> {
    /// Create a service over the painting and user repositories.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use paintapp::domain::PaintingService;
    /// use paintapp::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let _service = PaintingService::new(store.clone(), store, Arc::new(DefaultClock));
    /// ```
    pub fn new(painting_repo: Arc<P>, user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            painting_repo,
            user_repo,
            clock,
        }
    }
}

impl<P, U> PaintingService<P, U>
where
    U: UserRepository,
{
    async fn require_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}

#[async_trait]
impl<P, U> PaintingCommand for PaintingService<P, U>
where
    P: PaintingRepository,
    U: UserRepository,
{
    async fn save_painting(&self, draft: PaintingDraft) -> Result<Painting, Error> {
        let PaintingDraft {
            user_id,
            title,
            shapes_data,
        } = draft;
        let user = self.require_user(&user_id).await?;

        let painting = self
            .painting_repo
            .replace_for_user(NewPainting {
                user,
                title,
                shapes_data,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_painting_persistence_error)?;

        debug!(
            user_id = %user_id,
            painting_id = %painting.id(),
            "painting replaced"
        );
        Ok(painting)
    }
}

#[async_trait]
impl<P, U> PaintingQuery for PaintingService<P, U>
where
    P: PaintingRepository,
    U: UserRepository,
{
    async fn painting_for_user(&self, user_id: &UserId) -> Result<Option<Painting>, Error> {
        self.require_user(user_id).await?;
        self.painting_repo
            .find_by_user(user_id)
            .await
            .map_err(map_painting_persistence_error)
    }

    async fn painting_by_id(&self, id: &PaintingId) -> Result<Painting, Error> {
        self.painting_repo
            .find_by_id(id)
            .await
            .map_err(map_painting_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("painting {id} not found")))
    }
}

#[cfg(test)]
#[path = "painting_service_tests.rs"]
mod tests;
