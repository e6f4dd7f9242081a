use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::domain::{CreateReservationInput, Reservation, ReservationView};
use crate::errors::ServiceError;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Whether a non-cancelled reservation holds the counselor's slot.
    async fn slot_taken(&self, counselor_id: Uuid, date: NaiveDate, time: NaiveTime) -> Result<bool, ServiceError>;
    /// Persist a `pending` reservation.
    async fn insert_reservation(&self, account_id: Uuid, input: &CreateReservationInput) -> Result<Reservation, ServiceError>;
    /// Account's reservations by date then time, ascending.
    async fn list_reservations(&self, account_id: Uuid) -> Result<Vec<ReservationView>, ServiceError>;
}
