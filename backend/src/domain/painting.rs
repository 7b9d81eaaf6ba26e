//! Painting data model.
//!
//! A painting pairs a title with an opaque shape payload. The payload is
//! whatever the canvas client serialised; it is stored and returned verbatim.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{User, UserId};

/// Store-generated painting identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaintingId(i64);

impl PaintingId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PaintingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PaintingId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Opaque serialised shape list. Never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapesData(String);

impl ShapesData {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for ShapesData {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ShapesData {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Caller input for saving a painting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintingDraft {
    /// Owner of the painting.
    pub user_id: UserId,
    pub title: String,
    pub shapes_data: ShapesData,
}

/// A painting ready to be persisted; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPainting {
    pub user: User,
    pub title: String,
    pub shapes_data: ShapesData,
    pub created_at: DateTime<Utc>,
}

impl NewPainting {
    /// Attach the store-assigned identifier.
    pub fn into_painting(self, id: PaintingId) -> Painting {
        let Self {
            user,
            title,
            shapes_data,
            created_at,
        } = self;
        Painting {
            id,
            title,
            shapes_data,
            created_at,
            user,
        }
    }
}

/// Stored painting.
///
/// ## Invariants
/// - At most one painting exists per user at any time.
///
/// Serialises as `{"id", "title", "shapesData", "createdAt", "user"}` with the
/// owning user embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Painting {
    id: PaintingId,
    title: String,
    shapes_data: ShapesData,
    created_at: DateTime<Utc>,
    user: User,
}

impl Painting {
    pub fn id(&self) -> PaintingId {
        self.id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn shapes_data(&self) -> &ShapesData {
        &self.shapes_data
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Owning user.
    pub fn user(&self) -> &User {
        &self.user
    }
}
