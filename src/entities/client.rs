//! Client entity - a person identified by their pesel

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Client {
    pub id_client: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    // natural key, unique across clients
    pub pesel: String,
}
