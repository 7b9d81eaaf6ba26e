//! User data model.
//!
//! Users are identified by caller-chosen integer ids; nothing in the service
//! generates them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length, in characters, of usernames and display names.
pub const USER_TEXT_MAX: usize = 255;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("display name must not be empty")]
    EmptyDisplayName,
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong { max: usize },
}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier as stored in the `users.id` column.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

fn validate_text(
    value: String,
    empty: UserValidationError,
    too_long: UserValidationError,
) -> Result<String, UserValidationError> {
    if value.trim().is_empty() {
        return Err(empty);
    }
    if value.chars().count() > USER_TEXT_MAX {
        return Err(too_long);
    }
    Ok(value)
}

/// Unique login-style handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        validate_text(
            username.into(),
            UserValidationError::EmptyUsername,
            UserValidationError::UsernameTooLong { max: USER_TEXT_MAX },
        )
        .map(Self)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable label; not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        validate_text(
            display_name.into(),
            UserValidationError::EmptyDisplayName,
            UserValidationError::DisplayNameTooLong { max: USER_TEXT_MAX },
        )
        .map(Self)
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// Serialises as `{"id": 1, "username": "default1", "displayName": "User1"}`.
///
/// # Examples
/// ```
/// use paintapp::domain::User;
///
/// let user = User::try_from_parts(1, "default1", "User1").expect("valid user");
/// assert_eq!(user.username().as_ref(), "default1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: Username,
    display_name: DisplayName,
}

impl User {
    /// Build a user from validated components.
    pub fn new(id: UserId, username: Username, display_name: DisplayName) -> Self {
        Self {
            id,
            username,
            display_name,
        }
    }

    /// Fallible constructor from raw parts.
    pub fn try_from_parts(
        id: i64,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id),
            Username::new(username)?,
            DisplayName::new(display_name)?,
        ))
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }
}
