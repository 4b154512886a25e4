//! Trip DTOs - response shapes of the trip listing

use crate::trips::{ClientName, PagedResult, TripSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CountryDTO {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientNameDTO {
    pub first_name: String,
    pub last_name: String,
}

impl From<ClientName> for ClientNameDTO {
    fn from(value: ClientName) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripDTO {
    pub name: String,
    pub description: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub max_people: i32,
    pub countries: Vec<CountryDTO>,
    pub clients: Vec<ClientNameDTO>,
}

impl From<TripSummary> for TripDTO {
    fn from(value: TripSummary) -> Self {
        Self {
            name: value.name,
            description: value.description,
            date_from: value.date_from,
            date_to: value.date_to,
            max_people: value.max_people,
            countries: value
                .countries
                .into_iter()
                .map(|name| CountryDTO { name })
                .collect(),
            clients: value.clients.into_iter().map(ClientNameDTO::from).collect(),
        }
    }
}

/// Page of trips, `{pageNum, pageSize, allPages, trips}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedTripsDTO {
    pub page_num: i32,
    pub page_size: i32,
    pub all_pages: i32,
    pub trips: Vec<TripDTO>,
}

impl From<PagedResult<TripSummary>> for PagedTripsDTO {
    fn from(value: PagedResult<TripSummary>) -> Self {
        Self {
            page_num: value.page_num,
            page_size: value.page_size,
            all_pages: value.total_pages,
            trips: value.items.into_iter().map(TripDTO::from).collect(),
        }
    }
}
