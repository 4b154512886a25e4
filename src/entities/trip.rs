//! Trip entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Trip {
    pub id_trip: i32,
    pub name: String,
    pub description: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub max_people: i32,
}

/// A client enrolled in a trip, as seen from the trip side of `client_trip`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TripParticipant {
    pub id_trip: i32,
    pub id_client: i32,
    pub first_name: String,
    pub last_name: String,
}
