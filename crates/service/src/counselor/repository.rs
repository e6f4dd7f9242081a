use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Counselor, CounselorFilter, NewCounselor};
use crate::errors::ServiceError;

#[async_trait]
pub trait CounselorRepository: Send + Sync {
    async fn find_counselor(&self, id: Uuid) -> Result<Option<Counselor>, ServiceError>;
    /// Field labels as stored, duplicates included.
    async fn counseling_fields(&self, counselor_id: Uuid) -> Result<Vec<String>, ServiceError>;
    /// Persist the counselor and its field rows.
    async fn create_counselor(&self, input: &NewCounselor) -> Result<Counselor, ServiceError>;
    /// Matching counselors ordered by name.
    async fn list_counselors(&self, filter: &CounselorFilter) -> Result<Vec<Counselor>, ServiceError>;
}
