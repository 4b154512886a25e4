//! MySqlStore - trips, clients and enrollments on MySQL

use super::{EnrollmentTx, StoreError, TripStore};
use crate::core::Config;
use crate::dtos::{CreateClientDTO, CreateClientTripDTO};
use crate::entities::{Client, ClientTrip, Trip, TripCountry, TripParticipant};
use crate::trips::PageRequest;
use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, MySqlPool, QueryBuilder, Transaction};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

// type alias for the pool, in case we ever switch database
pub type PoolType = MySqlPool;

pub struct MySqlStore {
    connection_pool: PoolType,
}

impl MySqlStore {
    pub fn new(connection_pool: PoolType) -> Self {
        Self { connection_pool }
    }

    /// Opens the connection pool described by the configuration
    #[instrument(skip(config), fields(max_connections = config.max_connections))]
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        debug!("Opening MySQL connection pool");
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
            .connect(&config.database_url)
            .await?;
        info!("MySQL connection pool ready");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PoolType {
        &self.connection_pool
    }
}

#[async_trait]
impl TripStore for MySqlStore {
    #[instrument(skip(self))]
    async fn count_trips(&self) -> Result<i64, StoreError> {
        debug!("Counting trips");
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trip")
            .fetch_one(&self.connection_pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self), fields(offset = page.offset(), limit = page.limit()))]
    async fn trips_page(&self, page: PageRequest) -> Result<Vec<Trip>, StoreError> {
        debug!("Reading page of trips");
        let trips = sqlx::query_as::<_, Trip>(
            r#"
            SELECT
                id_trip,
                name,
                description,
                date_from,
                date_to,
                max_people
            FROM trip
            ORDER BY date_from DESC, id_trip DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Read {} trips", trips.len());
        Ok(trips)
    }

    #[instrument(skip(self, trip_ids), fields(trips = trip_ids.len()))]
    async fn countries_of(&self, trip_ids: &[i32]) -> Result<Vec<TripCountry>, StoreError> {
        if trip_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query_builder = QueryBuilder::<MySql>::new(
            r#"
            SELECT ct.id_trip, c.id_country, c.name
            FROM country_trip ct
            INNER JOIN country c ON c.id_country = ct.id_country
            WHERE ct.id_trip IN (
            "#,
        );
        let mut separated = query_builder.separated(", ");
        for id in trip_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY ct.id_trip, c.id_country");

        let countries = query_builder
            .build_query_as::<TripCountry>()
            .fetch_all(&self.connection_pool)
            .await?;
        Ok(countries)
    }

    #[instrument(skip(self, trip_ids), fields(trips = trip_ids.len()))]
    async fn participants_of(
        &self,
        trip_ids: &[i32],
    ) -> Result<Vec<TripParticipant>, StoreError> {
        if trip_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query_builder = QueryBuilder::<MySql>::new(
            r#"
            SELECT ct.id_trip, c.id_client, c.first_name, c.last_name
            FROM client_trip ct
            INNER JOIN client c ON c.id_client = ct.id_client
            WHERE ct.id_trip IN (
            "#,
        );
        let mut separated = query_builder.separated(", ");
        for id in trip_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY ct.id_trip, ct.registered_at, c.id_client");

        let participants = query_builder
            .build_query_as::<TripParticipant>()
            .fetch_all(&self.connection_pool)
            .await?;
        Ok(participants)
    }

    #[instrument(skip(self))]
    async fn begin(&self) -> Result<Box<dyn EnrollmentTx>, StoreError> {
        let tx = self.connection_pool.begin().await?;
        debug!("Transaction started");
        Ok(Box::new(MySqlEnrollmentTx { tx }))
    }
}

// client.id_client is a signed INT
fn client_id(last_insert_id: u64) -> Result<i32, StoreError> {
    i32::try_from(last_insert_id).map_err(|_| {
        error!("Generated client id {} overflows INT", last_insert_id);
        StoreError::IdOutOfRange(last_insert_id)
    })
}

/// Open MySQL transaction; `sqlx` rolls it back when dropped uncommitted
pub struct MySqlEnrollmentTx {
    tx: Transaction<'static, MySql>,
}

#[async_trait]
impl EnrollmentTx for MySqlEnrollmentTx {
    #[instrument(skip(self, pesel))]
    async fn find_client_by_pesel(&mut self, pesel: &str) -> Result<Option<Client>, StoreError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id_client, first_name, last_name, email, telephone, pesel
            FROM client
            WHERE pesel = ?
            "#,
        )
        .bind(pesel)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(client)
    }

    #[instrument(skip(self))]
    async fn find_enrollment(
        &mut self,
        id_client: i32,
        id_trip: i32,
    ) -> Result<Option<ClientTrip>, StoreError> {
        let enrollment = sqlx::query_as::<_, ClientTrip>(
            r#"
            SELECT id_client, id_trip, registered_at, payment_date
            FROM client_trip
            WHERE id_client = ? AND id_trip = ?
            "#,
        )
        .bind(id_client)
        .bind(id_trip)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(enrollment)
    }

    #[instrument(skip(self))]
    async fn find_trip(&mut self, id_trip: i32) -> Result<Option<Trip>, StoreError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            SELECT id_trip, name, description, date_from, date_to, max_people
            FROM trip
            WHERE id_trip = ?
            "#,
        )
        .bind(id_trip)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(trip)
    }

    #[instrument(skip(self, data))]
    async fn insert_client(&mut self, data: &CreateClientDTO) -> Result<Client, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO client (first_name, last_name, email, telephone, pesel)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.telephone)
        .bind(&data.pesel)
        .execute(&mut *self.tx)
        .await?;

        let new_id = client_id(result.last_insert_id())?;
        debug!("Client inserted with id {}", new_id);

        Ok(Client {
            id_client: new_id,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            telephone: data.telephone.clone(),
            pesel: data.pesel.clone(),
        })
    }

    #[instrument(skip(self, data), fields(id_client = data.id_client, id_trip = data.id_trip))]
    async fn insert_enrollment(
        &mut self,
        data: &CreateClientTripDTO,
    ) -> Result<ClientTrip, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO client_trip (id_client, id_trip, registered_at, payment_date)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(data.id_client)
        .bind(data.id_trip)
        .bind(data.registered_at)
        .bind(data.payment_date)
        .execute(&mut *self.tx)
        .await?;

        Ok(ClientTrip {
            id_client: data.id_client,
            id_trip: data.id_trip,
            registered_at: data.registered_at,
            payment_date: data.payment_date,
        })
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        debug!("Transaction committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::CreateClientDTO;
    use crate::trips::{self, ClientData, EnrollmentError};
    use chrono::{TimeZone, Utc};

    #[test]
    fn client_id_fits_int() {
        assert_eq!(client_id(42).unwrap(), 42);
        assert_eq!(client_id(i32::MAX as u64).unwrap(), i32::MAX);
    }

    #[test]
    fn client_id_overflow_is_an_error() {
        let result = client_id(i32::MAX as u64 + 1);
        assert!(matches!(result, Err(StoreError::IdOutOfRange(2_147_483_648))));
    }

    // These tests need a live MySQL server: DATABASE_URL=mysql://.. cargo test -- --ignored

    fn client_data(pesel: &str) -> ClientData {
        ClientData {
            first_name: "Piotr".to_string(),
            last_name: "Wisniewski".to_string(),
            email: "piotr@example.com".to_string(),
            telephone: "+48 600 500 600".to_string(),
            pesel: pesel.to_string(),
            payment_date: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
        }
    }

    async fn clients_with_pesel(pool: &MySqlPool, pesel: &str) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM client WHERE pesel = ?")
            .bind(pesel)
            .fetch_one(pool)
            .await
            .expect("count clients")
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("trips", "clients")))]
    #[ignore]
    async fn trips_page_orders_by_date_from_descending(pool: MySqlPool) -> sqlx::Result<()> {
        let store = MySqlStore::new(pool);

        let page = store
            .trips_page(PageRequest::new(1, 10))
            .await
            .expect("page of trips");
        let ids: Vec<i32> = page.iter().map(|t| t.id_trip).collect();
        assert_eq!(ids, vec![2, 7, 1]);
        assert_eq!(store.count_trips().await.expect("count"), 3);

        let participants = store.participants_of(&[1]).await.expect("participants");
        let names: Vec<&str> = participants.iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(names, vec!["Jan", "Anna"]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("trips", "clients")))]
    #[ignore]
    async fn duplicate_pesel_is_a_unique_violation(pool: MySqlPool) -> sqlx::Result<()> {
        let store = MySqlStore::new(pool);
        let mut tx = store.begin().await.expect("transaction");

        let result = tx
            .insert_client(&CreateClientDTO {
                first_name: "Jan".to_string(),
                last_name: "Kowalski".to_string(),
                email: "jan@example.com".to_string(),
                telephone: "+48 600 100 200".to_string(),
                pesel: "90010112345".to_string(),
            })
            .await;

        assert!(matches!(result, Err(StoreError::UniqueViolation(_))));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("trips", "clients")))]
    #[ignore]
    async fn new_client_on_missing_trip_is_not_persisted(pool: MySqlPool) -> sqlx::Result<()> {
        let store = MySqlStore::new(pool.clone());

        let result = trips::assign_client_to_trip(&store, 99, &client_data("12345")).await;

        assert!(matches!(result, Err(EnrollmentError::TripNotFound(99))));
        assert_eq!(clients_with_pesel(&pool, "12345").await, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("trips", "clients")))]
    #[ignore]
    async fn dropped_transaction_rolls_back(pool: MySqlPool) -> sqlx::Result<()> {
        let store = MySqlStore::new(pool.clone());

        {
            let mut tx = store.begin().await.expect("transaction");
            let client = tx
                .insert_client(&CreateClientDTO::from(&client_data("12345")))
                .await
                .expect("client inserted");
            tx.insert_enrollment(&CreateClientTripDTO {
                id_client: client.id_client,
                id_trip: 7,
                registered_at: Utc::now(),
                payment_date: None,
            })
            .await
            .expect("enrollment inserted");
            assert!(tx.find_trip(7).await.expect("trip lookup").is_some());
        }

        assert_eq!(clients_with_pesel(&pool, "12345").await, 0);
        let enrollments =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM client_trip WHERE id_trip = 7")
                .fetch_one(&pool)
                .await?;
        assert_eq!(enrollments, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("trips", "clients")))]
    #[ignore]
    async fn existing_enrollment_is_a_duplicate(pool: MySqlPool) -> sqlx::Result<()> {
        let store = MySqlStore::new(pool.clone());

        // Jan Kowalski is already on trip 1
        let result = trips::assign_client_to_trip(&store, 1, &client_data("90010112345")).await;

        assert!(matches!(result, Err(EnrollmentError::DuplicateEnrollment)));
        let enrollments = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM client_trip WHERE id_client = 1 AND id_trip = 1",
        )
        .fetch_one(&pool)
        .await?;
        assert_eq!(enrollments, 1);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("trips", "clients")))]
    #[ignore]
    async fn enrollment_dates_round_trip(pool: MySqlPool) -> sqlx::Result<()> {
        let store = MySqlStore::new(pool.clone());

        let created = trips::assign_client_to_trip(&store, 7, &client_data("12345"))
            .await
            .expect("enrolled");

        let mut tx = store.begin().await.expect("transaction");
        let stored = tx
            .find_enrollment(created.id_client, 7)
            .await
            .expect("enrollment lookup")
            .expect("enrollment stored");
        drop(tx);
        assert_eq!(
            stored.payment_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        // DATETIME keeps whole seconds
        let drift = (stored.registered_at - created.registered_at).num_milliseconds();
        assert!(drift.abs() <= 1000, "drift {}ms", drift);
        assert_eq!(clients_with_pesel(&pool, "12345").await, 1);

        let again = trips::assign_client_to_trip(&store, 7, &client_data("12345")).await;
        assert!(matches!(again, Err(EnrollmentError::DuplicateEnrollment)));
        Ok(())
    }
}
