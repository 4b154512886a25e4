//! Trips module - listing of trips and enrollment of clients
//!
//! Both operations are written against the [`TripStore`](crate::repositories::TripStore)
//! trait and know nothing about HTTP; the axum handlers in `services` wrap them.

pub mod enrollment;
pub mod error;
pub mod listing;
pub mod pagination;

pub use enrollment::{ClientData, ClientLookup, assign_client_to_trip};
pub use error::EnrollmentError;
pub use listing::{ClientName, PagedResult, TripSummary, get_trips};
pub use pagination::{PageRequest, Paginate};
