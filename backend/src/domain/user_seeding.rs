//! Bootstrap seeding of placeholder users.
//!
//! A fresh store receives three fixed users so the canvas client has accounts
//! to pick from. Seeding is keyed on emptiness: once any user exists, even
//! one that was not seeded, nothing is written.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::ports::{SeedingResult, UserPersistenceError, UserRepository};
use crate::domain::{User, UserValidationError};

const DEFAULT_USERS: [(i64, &str, &str); 3] = [
    (1, "default1", "User1"),
    (2, "default2", "User2"),
    (3, "default3", "User3"),
];

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserSeedOutcome {
    /// Number of users offered to the store.
    pub user_count: usize,
    /// Whether the store accepted them.
    pub result: SeedingResult,
}

/// Errors raised while seeding default users.
#[derive(Debug, Error)]
pub enum UserSeedingError {
    /// A built-in user failed validation.
    #[error("default user failed validation: {0}")]
    InvalidUser(#[from] UserValidationError),
    /// Persistence adapter failed while seeding.
    #[error("user seeding persistence error: {0}")]
    Persistence(#[from] UserPersistenceError),
}

/// The placeholder users inserted into an empty store.
///
/// # Errors
///
/// Returns [`UserValidationError`] if a built-in entry is malformed.
pub fn default_users() -> Result<Vec<User>, UserValidationError> {
    DEFAULT_USERS
        .iter()
        .map(|(id, username, display_name)| User::try_from_parts(*id, *username, *display_name))
        .collect()
}

/// Seeds default users through the user repository port.
#[derive(Clone)]
pub struct DefaultUserSeeder<R> {
    repository: Arc<R>,
}

impl<R> DefaultUserSeeder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> DefaultUserSeeder<R>
where
    R: UserRepository,
{
    /// Insert the default users if the store is empty.
    ///
    /// # Errors
    ///
    /// Returns [`UserSeedingError`] if validation or persistence fails.
    pub async fn seed(&self) -> Result<UserSeedOutcome, UserSeedingError> {
        let users = default_users()?;
        let result = self.repository.insert_if_empty(&users).await?;
        Ok(UserSeedOutcome {
            user_count: users.len(),
            result,
        })
    }
}
