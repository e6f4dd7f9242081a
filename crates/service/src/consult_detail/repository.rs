use async_trait::async_trait;
use uuid::Uuid;

use super::domain::ConsultDetailView;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

/// Ordering for both queries: reservation date desc, then reservation time desc.
#[async_trait]
pub trait ConsultDetailRepository: Send + Sync {
    async fn latest_consult_details(&self, account_id: Uuid, limit: u64) -> Result<Vec<ConsultDetailView>, ServiceError>;
    async fn consult_detail_page(&self, account_id: Uuid, opts: Pagination) -> Result<Page<ConsultDetailView>, ServiceError>;
}
