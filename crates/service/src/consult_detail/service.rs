use std::sync::Arc;

use super::domain::ConsultDetailView;
use super::repository::ConsultDetailRepository;
use crate::account::{resolve_account, AccountRepository};
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::token::Principal;

pub const DEFAULT_LATEST_SIZE: u64 = 3;
const MAX_LATEST_SIZE: u64 = 100;

pub struct ConsultDetailService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> ConsultDetailService<R>
where
    R: AccountRepository + ConsultDetailRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// At most `size` most recent records; `None` or 0 means the default of 3.
    pub async fn find_latest(&self, principal: &Principal, size: Option<u64>) -> Result<Vec<ConsultDetailView>, ServiceError> {
        let account = resolve_account(self.repo.as_ref(), principal).await?;
        let limit = match size {
            Some(0) | None => DEFAULT_LATEST_SIZE,
            Some(n) => n.min(MAX_LATEST_SIZE),
        };
        self.repo.latest_consult_details(account.id, limit).await
    }

    pub async fn find_all(&self, principal: &Principal, opts: Pagination) -> Result<Page<ConsultDetailView>, ServiceError> {
        let account = resolve_account(self.repo.as_ref(), principal).await?;
        self.repo.consult_detail_page(account.id, opts).await
    }
}
