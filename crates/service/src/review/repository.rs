use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewReview, ReviewView};
use crate::errors::ServiceError;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Review row plus tag upserts and links, all or nothing. Tags arrive normalized.
    async fn insert_review(&self, account_id: Uuid, counselor_id: Uuid, input: &NewReview) -> Result<ReviewView, ServiceError>;
    /// Newest first.
    async fn list_reviews(&self, counselor_id: Uuid) -> Result<Vec<ReviewView>, ServiceError>;
    /// New count, or `None` for an unknown review.
    async fn increment_recommendation(&self, review_id: Uuid) -> Result<Option<i32>, ServiceError>;
}
