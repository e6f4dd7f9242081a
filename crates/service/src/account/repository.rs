use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Account, Credentials};
use crate::errors::ServiceError;

/// Repository abstraction for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, ServiceError>;
    /// Fails with `Conflict` when the email is taken.
    async fn create_account(&self, email: &str, name: &str, password_hash: &str) -> Result<Account, ServiceError>;
    async fn get_credentials(&self, account_id: Uuid) -> Result<Option<Credentials>, ServiceError>;
}
