//! Entities module - domain entities persisted by the store
//!
//! Each entity maps onto one table of the schema in `migrations/`.
//! `TripCountry` and `TripParticipant` are read-only join rows used by the
//! trip listing.

pub mod client;
pub mod client_trip;
pub mod country;
pub mod trip;

pub use client::Client;
pub use client_trip::ClientTrip;
pub use country::{Country, TripCountry};
pub use trip::{Trip, TripParticipant};
