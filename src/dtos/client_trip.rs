//! ClientTrip DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// DTO to create a new enrollment
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateClientTripDTO {
    pub id_client: i32,
    pub id_trip: i32,
    pub registered_at: DateTime<Utc>,
    pub payment_date: Option<DateTime<Utc>>,
}
