use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => models::reservation::STATUS_PENDING,
            Self::Confirmed => models::reservation::STATUS_CONFIRMED,
            Self::Completed => models::reservation::STATUS_COMPLETED,
            Self::Cancelled => models::reservation::STATUS_CANCELLED,
        }
    }

    /// Whether the reservation still holds its slot.
    pub fn holds_slot(&self) -> bool { !matches!(self, Self::Cancelled) }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ReservationStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = models::reservation::validate_status(s)?;
        Ok(match s.as_str() {
            models::reservation::STATUS_CONFIRMED => Self::Confirmed,
            models::reservation::STATUS_COMPLETED => Self::Completed,
            models::reservation::STATUS_CANCELLED => Self::Cancelled,
            _ => Self::Pending,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub id: Uuid,
    pub account_id: Uuid,
    pub counselor_id: Uuid,
    pub counsel_date: NaiveDate,
    pub counsel_time: NaiveTime,
    pub location: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Body of a reservation request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationInput {
    pub counselor_id: Uuid,
    pub counsel_date: NaiveDate,
    pub counsel_time: NaiveTime,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationView {
    pub reservation_id: Uuid,
    pub counselor_id: Uuid,
    pub counselor_name: String,
    pub counsel_date: NaiveDate,
    pub counsel_time: NaiveTime,
    pub location: Option<String>,
    pub status: ReservationStatus,
}
