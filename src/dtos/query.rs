//! Query DTOs - query string parameters

use serde::{Deserialize, Serialize};

/// Query parameters of `GET /api/trips?page=..&pageSize=..`
///
/// Missing values are filled in by the handler (`page = 1`, `pageSize` from
/// the configured default).
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TripsQuery {
    #[serde(default)]
    pub page: Option<i32>,
    #[serde(default)]
    pub page_size: Option<i32>,
}
