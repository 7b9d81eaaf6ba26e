//! Driven port for painting persistence.

use async_trait::async_trait;

use crate::domain::{NewPainting, Painting, PaintingId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by painting repository adapters.
    pub enum PaintingPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "painting repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "painting repository query failed: {message}",
        /// A storage constraint rejected the write.
        Conflict { message: String } => "painting repository constraint violated: {message}",
    }
}

/// Port for reading and replacing paintings.
///
/// Implementations must keep at most one painting per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaintingRepository: Send + Sync {
    /// The painting owned by `user_id`, if any.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Painting>, PaintingPersistenceError>;

    /// Fetch a painting by its identifier.
    async fn find_by_id(
        &self,
        id: &PaintingId,
    ) -> Result<Option<Painting>, PaintingPersistenceError>;

    /// Delete the owner's current painting (if any) and insert `painting`.
    ///
    /// Both steps happen atomically; concurrent replacements for the same
    /// user are serialised. Returns the stored record with its new id.
    async fn replace_for_user(
        &self,
        painting: NewPainting,
    ) -> Result<Painting, PaintingPersistenceError>;
}
