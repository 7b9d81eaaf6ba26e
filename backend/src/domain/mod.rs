//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the services implementing the driving ports.
//! Keep types immutable and document invariants and serialisation contracts
//! (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error response payload and stable identifier.
//! - User / Painting: identity records and the single painting per user.
//! - UsersService / PaintingService: use cases over the driven ports.
//! - DefaultUserSeeder: startup seeding of placeholder users.

pub mod error;
pub mod painting;
pub mod painting_service;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_seeding;
pub mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::painting::{NewPainting, Painting, PaintingDraft, PaintingId, ShapesData};
pub use self::painting_service::PaintingService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DisplayName, User, UserId, UserValidationError, Username};
pub use self::user_seeding::{
    DefaultUserSeeder, UserSeedOutcome, UserSeedingError, default_users,
};
pub use self::users_service::UsersService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use paintapp::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
