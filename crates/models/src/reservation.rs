use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{account, counselor, errors::ModelError};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub counselor_id: Uuid,
    pub counsel_date: Date,
    pub counsel_time: Time,
    pub location: Option<String>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Account, Counselor }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Account => Entity::belongs_to(account::Entity).from(Column::AccountId).to(account::Column::Id).into(),
            Relation::Counselor => Entity::belongs_to(counselor::Entity).from(Column::CounselorId).to(counselor::Column::Id).into(),
        }
    }
}

impl Related<counselor::Entity> for Entity {
    fn to() -> RelationDef { Relation::Counselor.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_status(s: &str) -> Result<String, ModelError> {
    let lower = s.trim().to_ascii_lowercase();
    let valid = [STATUS_PENDING, STATUS_CONFIRMED, STATUS_COMPLETED, STATUS_CANCELLED];
    if !valid.contains(&lower.as_str()) {
        return Err(ModelError::Validation(format!("invalid reservation status: {s}")));
    }
    Ok(lower)
}

pub fn validate_location(location: Option<&str>) -> Result<(), ModelError> {
    if location.is_some_and(|l| l.chars().count() > 255) {
        return Err(ModelError::Validation("location too long (<=255)".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    account_id: Uuid,
    counselor_id: Uuid,
    counsel_date: NaiveDate,
    counsel_time: NaiveTime,
    location: Option<&str>,
) -> Result<Model, ModelError> {
    validate_location(location)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(account_id),
        counselor_id: Set(counselor_id),
        counsel_date: Set(counsel_date),
        counsel_time: Set(counsel_time),
        location: Set(location.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())),
        status: Set(STATUS_PENDING.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

/// Whether a non-cancelled reservation already holds the counselor's slot.
pub async fn slot_taken<C: ConnectionTrait>(db: &C, counselor_id: Uuid, counsel_date: NaiveDate, counsel_time: NaiveTime) -> Result<bool, ModelError> {
    use sea_orm::PaginatorTrait;
    let n = Entity::find()
        .filter(Column::CounselorId.eq(counselor_id))
        .filter(Column::CounselDate.eq(counsel_date))
        .filter(Column::CounselTime.eq(counsel_time))
        .filter(Column::Status.ne(STATUS_CANCELLED))
        .count(db)
        .await
        .map_err(ModelError::from_db)?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_validation_normalizes_case() {
        assert_eq!(validate_status("Completed").unwrap(), "completed");
        assert!(validate_status("done").is_err());
    }

    #[test]
    fn location_length_limit() {
        assert!(validate_location(None).is_ok());
        assert!(validate_location(Some("Room 3")).is_ok());
        assert!(validate_location(Some(&"x".repeat(256))).is_err());
    }
}
