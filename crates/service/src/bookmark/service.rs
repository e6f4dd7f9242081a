use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{Bookmark, BookmarkView};
use super::repository::BookmarkRepository;
use crate::account::{resolve_account, AccountRepository};
use crate::counselor::{counselor_view, require_counselor, CounselorRepository};
use crate::errors::ServiceError;
use crate::token::Principal;

pub struct BookmarkService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> BookmarkService<R>
where
    R: AccountRepository + CounselorRepository + BookmarkRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Bookmark a counselor for the principal's account.
    ///
    /// # Examples
    /// ```
    /// use service::bookmark::BookmarkService;
    /// use service::repo::memory::InMemoryStore;
    /// use service::token::Principal;
    /// use std::sync::Arc;
    /// let store = Arc::new(InMemoryStore::default());
    /// let account = store.seed_account("me@example.com", "Me");
    /// let counselor = store.seed_counselor("Dr. Kim", &["career"]);
    /// let svc = BookmarkService::new(store);
    /// let b = tokio_test::block_on(svc.add_bookmark(&Principal::new("me@example.com"), counselor)).unwrap();
    /// assert_eq!(b.account_id, account);
    /// ```
    #[instrument(skip(self, principal), fields(email = %principal.email))]
    pub async fn add_bookmark(&self, principal: &Principal, counselor_id: Uuid) -> Result<Bookmark, ServiceError> {
        let account = resolve_account(self.repo.as_ref(), principal).await?;
        let counselor = require_counselor(self.repo.as_ref(), counselor_id).await?;

        if self.repo.bookmark_exists(account.id, counselor.id).await? {
            debug!(account_id = %account.id, counselor_id = %counselor.id, "bookmark exists");
            return Err(already_bookmarked());
        }
        // unique index decides a concurrent insert
        let bookmark = self.repo.insert_bookmark(account.id, counselor.id).await?.ok_or_else(already_bookmarked)?;
        info!(bookmark_id = %bookmark.id, account_id = %account.id, counselor_id = %counselor.id, event = "bookmark_added", "bookmark added");
        Ok(bookmark)
    }

    #[instrument(skip(self, principal), fields(email = %principal.email))]
    pub async fn remove_bookmark(&self, principal: &Principal, counselor_id: Uuid) -> Result<(), ServiceError> {
        let account = resolve_account(self.repo.as_ref(), principal).await?;
        let counselor = require_counselor(self.repo.as_ref(), counselor_id).await?;

        let removed = self.repo.delete_bookmarks(account.id, counselor.id).await?;
        if removed == 0 {
            return Err(ServiceError::NotFound("Bookmark not found".into()));
        }
        info!(account_id = %account.id, counselor_id = %counselor.id, removed, event = "bookmark_removed", "bookmark removed");
        Ok(())
    }

    /// All bookmarks of the account, newest first, each with its counselor view.
    pub async fn list_bookmarks(&self, principal: &Principal) -> Result<Vec<BookmarkView>, ServiceError> {
        let account = resolve_account(self.repo.as_ref(), principal).await?;
        let bookmarks = self.repo.list_bookmarks(account.id).await?;

        let mut views = Vec::with_capacity(bookmarks.len());
        for b in bookmarks {
            let counselor = require_counselor(self.repo.as_ref(), b.counselor_id).await?;
            views.push(BookmarkView {
                bookmark_id: b.id,
                created_at: b.created_at,
                counselor: counselor_view(self.repo.as_ref(), &counselor).await?,
            });
        }
        Ok(views)
    }
}

fn already_bookmarked() -> ServiceError {
    ServiceError::Conflict("Already bookmarked this counselor".into())
}
