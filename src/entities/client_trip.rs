//! ClientTrip entity - enrollment of a client onto a trip

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ClientTrip {
    pub id_client: i32,
    pub id_trip: i32,
    // always the server clock, never taken from the request
    pub registered_at: DateTime<Utc>,
    pub payment_date: Option<DateTime<Utc>>,
}
