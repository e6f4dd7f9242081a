use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One past consultation, flattened with its reservation and counselor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultDetailView {
    pub consult_detail_id: Uuid,
    pub reservation_id: Uuid,
    pub counselor_id: Uuid,
    pub counselor_name: String,
    pub counsel_date: NaiveDate,
    pub counsel_time: NaiveTime,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}
