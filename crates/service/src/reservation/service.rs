use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use super::domain::{CreateReservationInput, ReservationView};
use super::repository::ReservationRepository;
use crate::account::{resolve_account, AccountRepository};
use crate::counselor::{require_counselor, CounselorRepository};
use crate::errors::ServiceError;
use crate::token::Principal;

/// Status text returned by a successful reservation.
pub const RESERVATION_CREATED: &str = "Reservation created";

pub struct ReservationService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> ReservationService<R>
where
    R: AccountRepository + CounselorRepository + ReservationRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, principal, input), fields(email = %principal.email, counselor_id = %input.counselor_id))]
    pub async fn create_reservation(&self, principal: &Principal, input: CreateReservationInput) -> Result<&'static str, ServiceError> {
        self.create_reservation_on(principal, input, Utc::now().date_naive()).await
    }

    /// Same as `create_reservation` with an explicit "today".
    pub async fn create_reservation_on(
        &self,
        principal: &Principal,
        mut input: CreateReservationInput,
        today: NaiveDate,
    ) -> Result<&'static str, ServiceError> {
        let account = resolve_account(self.repo.as_ref(), principal).await?;
        let counselor = require_counselor(self.repo.as_ref(), input.counselor_id).await?;

        if input.counsel_date < today {
            return Err(ServiceError::Validation(format!("counsel_date {} is in the past", input.counsel_date)));
        }
        input.location = input.location.map(|l| l.trim().to_string()).filter(|l| !l.is_empty());
        models::reservation::validate_location(input.location.as_deref())?;

        if self.repo.slot_taken(counselor.id, input.counsel_date, input.counsel_time).await? {
            return Err(slot_conflict(&counselor.name, &input));
        }

        // the slot unique index still rejects a concurrent insert that passed the check above
        let reservation = match self.repo.insert_reservation(account.id, &input).await {
            Ok(r) => r,
            Err(ServiceError::Conflict(_)) => return Err(slot_conflict(&counselor.name, &input)),
            Err(e) => return Err(e),
        };
        info!(reservation_id = %reservation.id, account_id = %account.id, event = "reservation_created", "reservation created");
        Ok(RESERVATION_CREATED)
    }

    pub async fn get_reservations(&self, principal: &Principal) -> Result<Vec<ReservationView>, ServiceError> {
        let account = resolve_account(self.repo.as_ref(), principal).await?;
        self.repo.list_reservations(account.id).await
    }
}

fn slot_conflict(counselor_name: &str, input: &CreateReservationInput) -> ServiceError {
    ServiceError::Conflict(format!("{} is already reserved at {} {}", counselor_name, input.counsel_date, input.counsel_time))
}
