//! Client DTOs - Data Transfer Objects for clients

use crate::trips::ClientData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/trips/{trip_id}/clients`
///
/// Only the column widths are checked here, the enrollment itself treats the
/// fields as opaque strings.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignClientDTO {
    #[validate(length(max = 120, message = "First name must be at most 120 characters"))]
    pub first_name: String,

    #[validate(length(max = 120, message = "Last name must be at most 120 characters"))]
    pub last_name: String,

    #[validate(length(max = 120, message = "Email must be at most 120 characters"))]
    pub email: String,

    #[validate(length(max = 120, message = "Telephone must be at most 120 characters"))]
    pub telephone: String,

    #[validate(length(min = 1, max = 120, message = "Pesel must be between 1 and 120 characters"))]
    pub pesel: String,

    #[serde(default, deserialize_with = "payment_date::deserialize")]
    pub payment_date: Option<DateTime<Utc>>,
}

/// Lenient `paymentDate` parsing
///
/// Accepts an RFC 3339 timestamp, a date-time without offset (taken as UTC)
/// or a bare `YYYY-MM-DD` date (UTC midnight).
mod payment_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }

    pub(super) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
            return Ok(date_time.with_timezone(&Utc));
        }
        if let Ok(date_time) = raw.parse::<NaiveDateTime>() {
            return Ok(date_time.and_utc());
        }
        if let Ok(date) = raw.parse::<NaiveDate>() {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
        Err(format!(
            "invalid payment date '{}', expected YYYY-MM-DD or an ISO 8601 date-time",
            raw
        ))
    }
}

impl From<AssignClientDTO> for ClientData {
    fn from(value: AssignClientDTO) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            telephone: value.telephone,
            pesel: value.pesel,
            payment_date: value.payment_date,
        }
    }
}

/// DTO to create a new client (without id_client)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateClientDTO {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    pub pesel: String,
}

impl From<&ClientData> for CreateClientDTO {
    fn from(value: &ClientData) -> Self {
        Self {
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
            email: value.email.clone(),
            telephone: value.telephone.clone(),
            pesel: value.pesel.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn march_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn payment_date_accepts_date_and_date_time_forms() {
        assert_eq!(payment_date::parse("2024-03-01").unwrap(), march_first());
        assert_eq!(payment_date::parse("2024-03-01T00:00:00").unwrap(), march_first());
        assert_eq!(payment_date::parse("2024-03-01T00:00:00Z").unwrap(), march_first());
        assert_eq!(
            payment_date::parse("2024-03-01T02:00:00+02:00").unwrap(),
            march_first()
        );
        assert_eq!(
            payment_date::parse("2024-03-01T10:30:15.250").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 15).unwrap()
                + chrono::Duration::milliseconds(250)
        );
    }

    #[test]
    fn payment_date_rejects_garbage() {
        assert!(payment_date::parse("next week").is_err());
        assert!(payment_date::parse("2024-13-01").is_err());
    }

    #[test]
    fn assign_body_with_date_only_payment() {
        let body: AssignClientDTO = serde_json::from_str(
            r#"{"firstName":"Jan","lastName":"Kowalski","email":"jan@example.com",
                "telephone":"600100200","pesel":"12345","paymentDate":"2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(body.payment_date, Some(march_first()));
    }

    #[test]
    fn assign_body_with_missing_or_null_payment() {
        let missing: AssignClientDTO = serde_json::from_str(
            r#"{"firstName":"Jan","lastName":"Kowalski","email":"jan@example.com",
                "telephone":"600100200","pesel":"12345"}"#,
        )
        .unwrap();
        assert_eq!(missing.payment_date, None);

        let null: AssignClientDTO = serde_json::from_str(
            r#"{"firstName":"Jan","lastName":"Kowalski","email":"jan@example.com",
                "telephone":"600100200","pesel":"12345","paymentDate":null}"#,
        )
        .unwrap();
        assert_eq!(null.payment_date, None);
    }
}
