//! Driving port for saving paintings.

use async_trait::async_trait;

use crate::domain::{Error, Painting, PaintingDraft};

/// Domain use-case port for saving or replacing a user's painting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaintingCommand: Send + Sync {
    /// Replace the owner's painting with `draft` and return the stored record.
    ///
    /// Fails with `not_found` when the owner does not exist; nothing is
    /// persisted in that case.
    async fn save_painting(&self, draft: PaintingDraft) -> Result<Painting, Error>;
}
