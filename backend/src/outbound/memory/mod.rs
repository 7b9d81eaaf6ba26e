//! In-memory store implementing both repository ports.
//!
//! Used when no database URL is configured and by the HTTP tests. All state
//! sits behind one `std::sync::Mutex`; the guard is never held across an
//! await point, so each port call is atomic with respect to the others.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    PaintingPersistenceError, PaintingRepository, SeedingResult, UserPersistenceError,
    UserRepository,
};
use crate::domain::{NewPainting, Painting, PaintingId, User, UserId};

#[derive(Debug, Default)]
struct StoreState {
    users: BTreeMap<UserId, User>,
    paintings: BTreeMap<PaintingId, Painting>,
    next_painting_id: i64,
}

impl StoreState {
    fn painting_for(&self, user_id: UserId) -> Option<&Painting> {
        self.paintings
            .values()
            .find(|painting| painting.user().id() == user_id)
    }

    fn allocate_painting_id(&mut self) -> PaintingId {
        self.next_painting_id += 1;
        PaintingId::new(self.next_painting_id)
    }
}

/// Mutex-guarded user and painting store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    /// Create a store pre-populated with `users`.
    ///
    /// Later entries win when ids repeat.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                users: users.into_iter().map(|user| (user.id(), user)).collect(),
                ..StoreState::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        Ok(state.users.get(id).cloned())
    }

    async fn insert_if_empty(
        &self,
        seed_users: &[User],
    ) -> Result<SeedingResult, UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::connection)?;
        if !state.users.is_empty() {
            return Ok(SeedingResult::AlreadySeeded);
        }

        let mut staged = BTreeMap::new();
        for user in seed_users {
            let clashes = staged
                .values()
                .any(|existing: &User| existing.username() == user.username());
            if clashes || staged.insert(user.id(), user.clone()).is_some() {
                return Err(UserPersistenceError::conflict(format!(
                    "user {} clashes with another seeded user",
                    user.id()
                )));
            }
        }
        state.users = staged;
        Ok(SeedingResult::Applied)
    }
}

#[async_trait]
impl PaintingRepository for InMemoryStore {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Painting>, PaintingPersistenceError> {
        let state = self.lock().map_err(PaintingPersistenceError::connection)?;
        Ok(state.painting_for(*user_id).cloned())
    }

    async fn find_by_id(
        &self,
        id: &PaintingId,
    ) -> Result<Option<Painting>, PaintingPersistenceError> {
        let state = self.lock().map_err(PaintingPersistenceError::connection)?;
        Ok(state.paintings.get(id).cloned())
    }

    async fn replace_for_user(
        &self,
        painting: NewPainting,
    ) -> Result<Painting, PaintingPersistenceError> {
        let mut state = self.lock().map_err(PaintingPersistenceError::connection)?;
        let user_id = painting.user.id();
        if !state.users.contains_key(&user_id) {
            return Err(PaintingPersistenceError::conflict(format!(
                "painting owner {user_id} does not exist"
            )));
        }

        state
            .paintings
            .retain(|_, existing| existing.user().id() != user_id);
        let id = state.allocate_painting_id();
        let stored = painting.into_painting(id);
        state.paintings.insert(id, stored.clone());
        Ok(stored)
    }
}
