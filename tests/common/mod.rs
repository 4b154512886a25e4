#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use trip_service::core::AppState;
use trip_service::entities::{Client, ClientTrip, Country, Trip};
use trip_service::repositories::MemoryStore;

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn trip(id_trip: i32, name: &str, date_from: DateTime<Utc>) -> Trip {
    Trip {
        id_trip,
        name: name.to_string(),
        description: format!("{} description", name),
        date_from,
        date_to: date_from + chrono::Duration::days(7),
        max_people: 20,
    }
}

/// Builds a store with three trips
///
/// * 1 "Alps" (2024-01-01): Austria, Switzerland; clients Jan and Anna
/// * 2 "Lisbon" (2024-06-01): Portugal
/// * 7 "Baltic" (2024-03-15): Poland
///
/// Jan Kowalski has pesel "90010112345".
pub async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.add_trip(trip(1, "Alps", date(2024, 1, 1))).await;
    store.add_trip(trip(2, "Lisbon", date(2024, 6, 1))).await;
    store.add_trip(trip(7, "Baltic", date(2024, 3, 15))).await;

    for (id_country, name, trips) in [
        (1, "Austria", vec![1]),
        (2, "Switzerland", vec![1]),
        (3, "Portugal", vec![2]),
        (4, "Poland", vec![7]),
    ] {
        store
            .add_country(
                Country {
                    id_country,
                    name: name.to_string(),
                },
                &trips,
            )
            .await;
    }

    store
        .add_client(Client {
            id_client: 1,
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            email: "jan@example.com".to_string(),
            telephone: "+48 600 100 200".to_string(),
            pesel: "90010112345".to_string(),
        })
        .await;
    store
        .add_client(Client {
            id_client: 2,
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            email: "anna@example.com".to_string(),
            telephone: "+48 600 300 400".to_string(),
            pesel: "85050554321".to_string(),
        })
        .await;
    store
        .add_enrollment(ClientTrip {
            id_client: 1,
            id_trip: 1,
            registered_at: date(2023, 11, 1),
            payment_date: Some(date(2023, 11, 2)),
        })
        .await;
    store
        .add_enrollment(ClientTrip {
            id_client: 2,
            id_trip: 1,
            registered_at: date(2023, 11, 3),
            payment_date: None,
        })
        .await;

    store
}

/// Creates an AppState for the tests
///
/// # Arguments
/// * `store` - store shared with the test, to inspect rows afterwards
pub fn create_test_state(store: &MemoryStore) -> Arc<AppState> {
    Arc::new(AppState::new(Arc::new(store.clone())))
}

/// Creates a TestServer for the tests
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = trip_service::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}
