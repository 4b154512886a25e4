//! Store traits
//!
//! `TripStore` is the read side used by the listing plus the entry point of
//! enrollment transactions. `EnrollmentTx` is one open transaction: every
//! read and write goes through it and nothing is visible to others until
//! `commit`. Dropping a transaction without committing rolls it back.

use super::StoreError;
use crate::dtos::{CreateClientDTO, CreateClientTripDTO};
use crate::entities::{Client, ClientTrip, Trip, TripCountry, TripParticipant};
use crate::trips::PageRequest;
use async_trait::async_trait;

#[async_trait]
pub trait TripStore: Send + Sync {
    /// Number of trips in the store
    async fn count_trips(&self) -> Result<i64, StoreError>;

    /// One page of trips ordered by `date_from` descending, ties broken by
    /// `id_trip` descending
    ///
    /// # Arguments
    /// * `page` - must not be empty, see [`PageRequest::is_empty`]
    async fn trips_page(&self, page: PageRequest) -> Result<Vec<Trip>, StoreError>;

    /// Countries of the given trips, ordered by trip then `id_country`
    async fn countries_of(&self, trip_ids: &[i32]) -> Result<Vec<TripCountry>, StoreError>;

    /// Clients enrolled in the given trips, ordered by trip, then registration
    /// time, then `id_client`
    async fn participants_of(&self, trip_ids: &[i32])
    -> Result<Vec<TripParticipant>, StoreError>;

    /// Opens a new enrollment transaction
    async fn begin(&self) -> Result<Box<dyn EnrollmentTx>, StoreError>;
}

#[async_trait]
pub trait EnrollmentTx: Send {
    async fn find_client_by_pesel(&mut self, pesel: &str) -> Result<Option<Client>, StoreError>;

    async fn find_enrollment(
        &mut self,
        id_client: i32,
        id_trip: i32,
    ) -> Result<Option<ClientTrip>, StoreError>;

    async fn find_trip(&mut self, id_trip: i32) -> Result<Option<Trip>, StoreError>;

    /// Inserts a client; a taken pesel fails with [`StoreError::UniqueViolation`]
    async fn insert_client(&mut self, data: &CreateClientDTO) -> Result<Client, StoreError>;

    /// Inserts an enrollment; an existing (client, trip) pair fails with
    /// [`StoreError::UniqueViolation`]
    async fn insert_enrollment(
        &mut self,
        data: &CreateClientTripDTO,
    ) -> Result<ClientTrip, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
