use async_trait::async_trait;
use uuid::Uuid;

use super::domain::Bookmark;
use crate::errors::ServiceError;

#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    async fn bookmark_exists(&self, account_id: Uuid, counselor_id: Uuid) -> Result<bool, ServiceError>;
    /// `None` when the pair is already bookmarked; never creates a second row.
    async fn insert_bookmark(&self, account_id: Uuid, counselor_id: Uuid) -> Result<Option<Bookmark>, ServiceError>;
    /// Deletes every row of the pair and returns how many went away.
    async fn delete_bookmarks(&self, account_id: Uuid, counselor_id: Uuid) -> Result<u64, ServiceError>;
    /// Newest first.
    async fn list_bookmarks(&self, account_id: Uuid) -> Result<Vec<Bookmark>, ServiceError>;
}
