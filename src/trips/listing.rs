//! Trip listing - paginated trips with their countries and clients

use super::PageRequest;
use crate::entities::{Trip, TripCountry, TripParticipant};
use crate::repositories::{StoreError, TripStore};
use chrono::{DateTime, Utc};
use futures::future::try_join;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct ClientName {
    pub first_name: String,
    pub last_name: String,
}

/// A trip projected for the listing
#[derive(Debug, Clone, PartialEq)]
pub struct TripSummary {
    pub name: String,
    pub description: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub max_people: i32,
    pub countries: Vec<String>,
    pub clients: Vec<ClientName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<T> {
    pub page_num: i32,
    pub page_size: i32,
    pub total_pages: i32,
    pub items: Vec<T>,
}

/// Lists one page of trips, most recent `date_from` first
///
/// The ordering is applied by the store before slicing, so consecutive pages
/// never overlap nor skip a trip. A page past the end, or a non positive page
/// or page size, yields an empty `items`.
#[instrument(skip(store, page), fields(page = page.page, page_size = page.page_size))]
pub async fn get_trips(
    store: &dyn TripStore,
    page: PageRequest,
) -> Result<PagedResult<TripSummary>, StoreError> {
    debug!("Listing trips");
    let total = store.count_trips().await?;
    let total_pages = page.total_pages(total);

    let trips = if page.is_empty() {
        debug!("Empty page request, skipping trip lookup");
        Vec::new()
    } else {
        store.trips_page(page).await?
    };

    let items = if trips.is_empty() {
        Vec::new()
    } else {
        let trip_ids: Vec<i32> = trips.iter().map(|t| t.id_trip).collect();
        let (countries, participants) = try_join(
            store.countries_of(&trip_ids),
            store.participants_of(&trip_ids),
        )
        .await?;
        project(trips, countries, participants)
    };

    info!(
        "Listed {} of {} trips (page {}/{})",
        items.len(),
        total,
        page.page,
        total_pages
    );

    Ok(PagedResult {
        page_num: page.page,
        page_size: page.page_size,
        total_pages,
        items,
    })
}

// keeps the store order of trips, countries and participants
fn project(
    trips: Vec<Trip>,
    countries: Vec<TripCountry>,
    participants: Vec<TripParticipant>,
) -> Vec<TripSummary> {
    let mut countries_by_trip: HashMap<i32, Vec<String>> = HashMap::new();
    for country in countries {
        countries_by_trip
            .entry(country.id_trip)
            .or_default()
            .push(country.name);
    }

    let mut clients_by_trip: HashMap<i32, Vec<ClientName>> = HashMap::new();
    for participant in participants {
        clients_by_trip
            .entry(participant.id_trip)
            .or_default()
            .push(ClientName {
                first_name: participant.first_name,
                last_name: participant.last_name,
            });
    }

    trips
        .into_iter()
        .map(|trip| TripSummary {
            countries: countries_by_trip.remove(&trip.id_trip).unwrap_or_default(),
            clients: clients_by_trip.remove(&trip.id_trip).unwrap_or_default(),
            name: trip.name,
            description: trip.description,
            date_from: trip.date_from,
            date_to: trip.date_to,
            max_people: trip.max_people,
        })
        .collect()
}
