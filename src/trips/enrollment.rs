//! Client enrollment - find or create a client and assign it to a trip

use super::EnrollmentError;
use crate::dtos::{CreateClientDTO, CreateClientTripDTO};
use crate::entities::{Client, ClientTrip};
use crate::repositories::{EnrollmentTx, StoreError, TripStore};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

// a first time client can race with another request for the same pesel;
// the second attempt then sees the committed client
const MAX_ATTEMPTS: u32 = 2;

/// Identity and payment data of the client to enroll
#[derive(Debug, Clone, PartialEq)]
pub struct ClientData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    pub pesel: String,
    pub payment_date: Option<DateTime<Utc>>,
}

/// Result of looking a client up by pesel
#[derive(Debug, Clone, PartialEq)]
pub enum ClientLookup {
    Found(Client),
    NotFound,
}

impl From<Option<Client>> for ClientLookup {
    fn from(value: Option<Client>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

// the client an enrollment will point at
enum Enrollee {
    Existing(Client),
    New(CreateClientDTO),
}

enum Attempt {
    Enrolled(ClientTrip),
    ClientRaced,
}

/// Enrolls a client onto a trip
///
/// The client is looked up by pesel and reused when it exists, otherwise it
/// is created from `data`. Only an existing client can already be enrolled,
/// so the duplicate check is skipped for new clients. Everything runs in one
/// store transaction: on any error nothing is persisted.
///
/// # Errors
/// * `DuplicateEnrollment` - the existing client is already on this trip
/// * `TripNotFound` - `trip_id` does not resolve to a trip
/// * `Storage` - the store failed
#[instrument(skip(store, data))]
pub async fn assign_client_to_trip(
    store: &dyn TripStore,
    trip_id: i32,
    data: &ClientData,
) -> Result<ClientTrip, EnrollmentError> {
    let mut attempt = 1;
    loop {
        let tx = store.begin().await?;
        match try_assign(tx, trip_id, data).await? {
            Attempt::Enrolled(enrollment) => return Ok(enrollment),
            Attempt::ClientRaced if attempt < MAX_ATTEMPTS => {
                warn!("Client was created concurrently, retrying enrollment");
                attempt += 1;
            }
            Attempt::ClientRaced => {
                return Err(StoreError::UniqueViolation(
                    "client pesel kept colliding with concurrent inserts".to_string(),
                )
                .into());
            }
        }
    }
}

async fn try_assign(
    mut tx: Box<dyn EnrollmentTx>,
    trip_id: i32,
    data: &ClientData,
) -> Result<Attempt, EnrollmentError> {
    let lookup = ClientLookup::from(tx.find_client_by_pesel(&data.pesel).await?);

    // new clients are staged in memory and written only once the trip is known
    let enrollee = match lookup {
        ClientLookup::NotFound => {
            debug!("No client with this pesel, a new one will be created");
            Enrollee::New(CreateClientDTO::from(data))
        }
        ClientLookup::Found(client) => {
            debug!("Found existing client {}", client.id_client);
            if tx.find_enrollment(client.id_client, trip_id).await?.is_some() {
                warn!(
                    "Client {} is already assigned to trip {}",
                    client.id_client, trip_id
                );
                return Err(EnrollmentError::DuplicateEnrollment);
            }
            Enrollee::Existing(client)
        }
    };

    let trip = tx.find_trip(trip_id).await?.ok_or_else(|| {
        warn!("Trip {} does not exist", trip_id);
        EnrollmentError::TripNotFound(trip_id)
    })?;

    let client = match enrollee {
        Enrollee::Existing(client) => client,
        Enrollee::New(new_client) => match tx.insert_client(&new_client).await {
            Ok(client) => {
                info!("Client created with id {}", client.id_client);
                client
            }
            Err(StoreError::UniqueViolation(_)) => return Ok(Attempt::ClientRaced),
            Err(e) => return Err(e.into()),
        },
    };

    let new_enrollment = CreateClientTripDTO {
        id_client: client.id_client,
        id_trip: trip.id_trip,
        registered_at: Utc::now(),
        payment_date: data.payment_date,
    };
    let enrollment = match tx.insert_enrollment(&new_enrollment).await {
        Ok(enrollment) => enrollment,
        Err(StoreError::UniqueViolation(_)) => {
            warn!(
                "Concurrent enrollment of client {} on trip {}",
                client.id_client, trip.id_trip
            );
            return Err(EnrollmentError::DuplicateEnrollment);
        }
        Err(e) => return Err(e.into()),
    };

    tx.commit().await?;
    info!(
        "Client {} assigned to trip {}",
        enrollment.id_client, enrollment.id_trip
    );
    Ok(Attempt::Enrolled(enrollment))
}
