//! MemoryStore - in-process store with the same constraints as the schema
//!
//! Tables live behind one async mutex. An enrollment transaction holds the
//! lock for its whole life, so transactions are serialized, and keeps its
//! writes staged until `commit`; a dropped transaction leaves no trace.

use super::{EnrollmentTx, StoreError, TripStore};
use crate::dtos::{CreateClientDTO, CreateClientTripDTO};
use crate::entities::{Client, ClientTrip, Country, Trip, TripCountry, TripParticipant};
use crate::trips::{PageRequest, Paginate};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument};

#[derive(Debug, Default)]
struct Tables {
    trips: BTreeMap<i32, Trip>,
    countries: BTreeMap<i32, Country>,
    // (id_country, id_trip)
    country_trip: Vec<(i32, i32)>,
    clients: BTreeMap<i32, Client>,
    client_trip: Vec<ClientTrip>,
}

impl Tables {
    fn client_by_pesel(&self, pesel: &str) -> Option<&Client> {
        self.clients.values().find(|c| c.pesel == pesel)
    }

    fn enrollment(&self, id_client: i32, id_trip: i32) -> Option<&ClientTrip> {
        self.client_trip
            .iter()
            .find(|e| e.id_client == id_client && e.id_trip == id_trip)
    }

    fn next_client_id(&self) -> i32 {
        self.clients.keys().next_back().map_or(1, |id| id + 1)
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_trip(&self, trip: Trip) {
        self.tables.lock().await.trips.insert(trip.id_trip, trip);
    }

    /// Adds a country and links it to the given trips
    pub async fn add_country(&self, country: Country, trip_ids: &[i32]) {
        let mut tables = self.tables.lock().await;
        for id_trip in trip_ids {
            tables.country_trip.push((country.id_country, *id_trip));
        }
        tables.countries.insert(country.id_country, country);
    }

    pub async fn add_client(&self, client: Client) {
        self.tables.lock().await.clients.insert(client.id_client, client);
    }

    pub async fn add_enrollment(&self, enrollment: ClientTrip) {
        self.tables.lock().await.client_trip.push(enrollment);
    }

    pub async fn clients(&self) -> Vec<Client> {
        self.tables.lock().await.clients.values().cloned().collect()
    }

    pub async fn enrollments(&self) -> Vec<ClientTrip> {
        self.tables.lock().await.client_trip.clone()
    }
}

#[async_trait]
impl TripStore for MemoryStore {
    async fn count_trips(&self) -> Result<i64, StoreError> {
        Ok(self.tables.lock().await.trips.len() as i64)
    }

    #[instrument(skip(self), fields(offset = page.offset(), limit = page.limit()))]
    async fn trips_page(&self, page: PageRequest) -> Result<Vec<Trip>, StoreError> {
        let tables = self.tables.lock().await;
        let mut trips: Vec<&Trip> = tables.trips.values().collect();
        trips.sort_by(|a, b| {
            b.date_from
                .cmp(&a.date_from)
                .then_with(|| b.id_trip.cmp(&a.id_trip))
        });
        Ok(trips.into_iter().paginate(page).cloned().collect())
    }

    async fn countries_of(&self, trip_ids: &[i32]) -> Result<Vec<TripCountry>, StoreError> {
        let tables = self.tables.lock().await;
        let mut countries: Vec<TripCountry> = tables
            .country_trip
            .iter()
            .filter(|(_, id_trip)| trip_ids.contains(id_trip))
            .filter_map(|(id_country, id_trip)| {
                tables.countries.get(id_country).map(|country| TripCountry {
                    id_trip: *id_trip,
                    id_country: country.id_country,
                    name: country.name.clone(),
                })
            })
            .collect();
        countries.sort_by_key(|c| (c.id_trip, c.id_country));
        Ok(countries)
    }

    async fn participants_of(
        &self,
        trip_ids: &[i32],
    ) -> Result<Vec<TripParticipant>, StoreError> {
        let tables = self.tables.lock().await;
        let mut enrollments: Vec<&ClientTrip> = tables
            .client_trip
            .iter()
            .filter(|e| trip_ids.contains(&e.id_trip))
            .collect();
        enrollments.sort_by_key(|e| (e.id_trip, e.registered_at, e.id_client));

        let participants = enrollments
            .into_iter()
            .filter_map(|e| {
                tables.clients.get(&e.id_client).map(|client| TripParticipant {
                    id_trip: e.id_trip,
                    id_client: client.id_client,
                    first_name: client.first_name.clone(),
                    last_name: client.last_name.clone(),
                })
            })
            .collect();
        Ok(participants)
    }

    async fn begin(&self) -> Result<Box<dyn EnrollmentTx>, StoreError> {
        let tables = self.tables.clone().lock_owned().await;
        debug!("In-memory transaction started");
        Ok(Box::new(MemoryEnrollmentTx {
            tables,
            staged_clients: Vec::new(),
            staged_enrollments: Vec::new(),
        }))
    }
}

pub struct MemoryEnrollmentTx {
    tables: OwnedMutexGuard<Tables>,
    staged_clients: Vec<Client>,
    staged_enrollments: Vec<ClientTrip>,
}

impl MemoryEnrollmentTx {
    fn client_exists(&self, id_client: i32) -> bool {
        self.tables.clients.contains_key(&id_client)
            || self.staged_clients.iter().any(|c| c.id_client == id_client)
    }
}

#[async_trait]
impl EnrollmentTx for MemoryEnrollmentTx {
    async fn find_client_by_pesel(&mut self, pesel: &str) -> Result<Option<Client>, StoreError> {
        let staged = self.staged_clients.iter().find(|c| c.pesel == pesel);
        Ok(staged.or_else(|| self.tables.client_by_pesel(pesel)).cloned())
    }

    async fn find_enrollment(
        &mut self,
        id_client: i32,
        id_trip: i32,
    ) -> Result<Option<ClientTrip>, StoreError> {
        let staged = self
            .staged_enrollments
            .iter()
            .find(|e| e.id_client == id_client && e.id_trip == id_trip);
        Ok(staged
            .or_else(|| self.tables.enrollment(id_client, id_trip))
            .cloned())
    }

    async fn find_trip(&mut self, id_trip: i32) -> Result<Option<Trip>, StoreError> {
        Ok(self.tables.trips.get(&id_trip).cloned())
    }

    async fn insert_client(&mut self, data: &CreateClientDTO) -> Result<Client, StoreError> {
        if self.find_client_by_pesel(&data.pesel).await?.is_some() {
            return Err(StoreError::UniqueViolation(format!(
                "Duplicate entry '{}' for key 'client.uq_client_pesel'",
                data.pesel
            )));
        }

        let staged_max = self.staged_clients.iter().map(|c| c.id_client).max();
        let id_client = staged_max.map_or_else(|| self.tables.next_client_id(), |id| id + 1);

        let client = Client {
            id_client,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            telephone: data.telephone.clone(),
            pesel: data.pesel.clone(),
        };
        self.staged_clients.push(client.clone());
        Ok(client)
    }

    async fn insert_enrollment(
        &mut self,
        data: &CreateClientTripDTO,
    ) -> Result<ClientTrip, StoreError> {
        if !self.client_exists(data.id_client) || !self.tables.trips.contains_key(&data.id_trip) {
            return Err(StoreError::Constraint(format!(
                "client_trip references missing client {} or trip {}",
                data.id_client, data.id_trip
            )));
        }
        if self
            .find_enrollment(data.id_client, data.id_trip)
            .await?
            .is_some()
        {
            return Err(StoreError::UniqueViolation(format!(
                "Duplicate entry '{}-{}' for key 'client_trip.PRIMARY'",
                data.id_client, data.id_trip
            )));
        }

        let enrollment = ClientTrip {
            id_client: data.id_client,
            id_trip: data.id_trip,
            registered_at: data.registered_at,
            payment_date: data.payment_date,
        };
        self.staged_enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemoryEnrollmentTx {
            mut tables,
            staged_clients,
            staged_enrollments,
        } = *self;
        debug!(
            "Committing {} clients and {} enrollments",
            staged_clients.len(),
            staged_enrollments.len()
        );
        for client in staged_clients {
            tables.clients.insert(client.id_client, client);
        }
        tables.client_trip.extend(staged_enrollments);
        Ok(())
    }
}
