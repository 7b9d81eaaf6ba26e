//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`) describe what the domain needs from storage
//! and expose strongly typed errors. Driving ports (`*Query`, `*Command`) are
//! the use cases inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod painting_command;
mod painting_query;
mod painting_repository;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use painting_command::MockPaintingCommand;
pub use painting_command::PaintingCommand;
#[cfg(test)]
pub use painting_query::MockPaintingQuery;
pub use painting_query::PaintingQuery;
#[cfg(test)]
pub use painting_repository::MockPaintingRepository;
pub use painting_repository::{PaintingPersistenceError, PaintingRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{SeedingResult, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
