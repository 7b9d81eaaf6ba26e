//! Driving port for painting lookups.

use async_trait::async_trait;

use crate::domain::{Error, Painting, PaintingId, UserId};

/// Domain use-case port for reading paintings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaintingQuery: Send + Sync {
    /// The user's current painting; `Ok(None)` when they have not saved one.
    ///
    /// Fails with `not_found` when the user does not exist.
    async fn painting_for_user(&self, user_id: &UserId) -> Result<Option<Painting>, Error>;

    /// Fetch a painting by id, failing with `not_found` when absent.
    async fn painting_by_id(&self, id: &PaintingId) -> Result<Painting, Error>;
}
