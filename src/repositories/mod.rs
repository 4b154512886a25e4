//! Repositories module - persistence of trips, clients and enrollments
//!
//! The services only see the [`TripStore`] / [`EnrollmentTx`] traits. Two
//! backends implement them:
//! - [`MySqlStore`]: the production store on top of a `sqlx` MySQL pool
//! - [`MemoryStore`]: an in-process store with the same constraints, used by
//!   the tests and for running without a database

// ************************* NOTE ON SQLX ************************* //

/*
   Queries use the runtime checked `sqlx::query_as::<_, Entity>(..)` with
   `#[derive(sqlx::FromRow)]` entities instead of the `query_as!` macros, so
   the crate builds without a live DATABASE_URL.
   Pick the fetch method by the number of rows:
   None          .execute(..)         INSERT/UPDATE/DELETE
   Zero or One   .fetch_optional(..)  Option<Entity>
   Exactly One   .fetch_one(..)       aggregates such as COUNT(*)
   Multiple      .fetch_all(..)       Vec<Entity>
   Inside a transaction pass `&mut *tx` as executor instead of the pool.
*/

pub mod error;
pub mod memory;
pub mod mysql;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use mysql::MySqlStore;
pub use traits::{EnrollmentTx, TripStore};
