//! User directory service implementing the users driving port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersQuery};
use crate::domain::{Error, User};

/// Map user persistence failures onto HTTP-safe domain errors.
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Conflict { message } => Error::conflict(message),
    }
}

/// Lists users straight from the repository.
#[derive(Clone)]
pub struct UsersService<R> {
    user_repo: Arc<R>,
}

impl<R> UsersService<R> {
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .list_all()
            .await
            .map_err(map_user_persistence_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use rstest::rstest;

    #[tokio::test]
    async fn list_users_returns_repository_contents() {
        let users = vec![
            User::try_from_parts(1, "default1", "User1").expect("valid user"),
            User::try_from_parts(2, "default2", "User2").expect("valid user"),
        ];
        let expected = users.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_list_all().times(1).return_once(move || Ok(users));

        let listed = UsersService::new(Arc::new(repo))
            .list_users()
            .await
            .expect("listing succeeds");

        assert_eq!(listed, expected);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::conflict("users_username_key"), ErrorCode::Conflict)]
    #[tokio::test]
    async fn list_users_maps_persistence_failures(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockUserRepository::new();
        repo.expect_list_all().times(1).return_once(move || Err(failure));

        let err = UsersService::new(Arc::new(repo))
            .list_users()
            .await
            .expect_err("failure propagates");

        assert_eq!(err.code(), expected);
    }
}
