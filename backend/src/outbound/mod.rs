//! Outbound adapters implementing the driven ports.
//!
//! - `persistence`: PostgreSQL through Diesel and a bb8 pool.
//! - `memory`: process-local fallback used without a database.

pub mod memory;
pub mod persistence;
