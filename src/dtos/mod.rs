//! DTOs module - Data Transfer Objects
//!
//! DTOs separate the external representation (JSON API) from the entities
//! stored in the database. Create DTOs carry the data for new rows, without
//! the ids assigned by the store.

pub mod client;
pub mod client_trip;
pub mod query;
pub mod trip;

pub use client::{AssignClientDTO, CreateClientDTO};
pub use client_trip::CreateClientTripDTO;
pub use query::TripsQuery;
pub use trip::{ClientNameDTO, CountryDTO, PagedTripsDTO, TripDTO};
