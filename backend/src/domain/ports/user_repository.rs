//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A uniqueness constraint (id or username) rejected the write.
        Conflict { message: String } => "user repository constraint violated: {message}",
    }
}

/// Outcome of a conditional seed insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// The store was empty and the users were inserted.
    Applied,
    /// At least one user already existed; nothing was written.
    AlreadySeeded,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user, ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Insert `users` only if the store holds no users at all.
    ///
    /// The emptiness check and the inserts form one atomic unit.
    async fn insert_if_empty(&self, users: &[User]) -> Result<SeedingResult, UserPersistenceError>;
}
