use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{NewReview, Recommendation, ReviewView};
use super::repository::ReviewRepository;
use crate::account::{resolve_account, AccountRepository};
use crate::counselor::{require_counselor, CounselorRepository};
use crate::errors::ServiceError;
use crate::token::Principal;

pub struct ReviewService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> ReviewService<R>
where
    R: AccountRepository + CounselorRepository + ReviewRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, principal, input), fields(email = %principal.email))]
    pub async fn write_review(&self, principal: &Principal, counselor_id: Uuid, input: NewReview) -> Result<ReviewView, ServiceError> {
        let account = resolve_account(self.repo.as_ref(), principal).await?;
        let counselor = require_counselor(self.repo.as_ref(), counselor_id).await?;

        models::review::validate_title(&input.title)?;
        models::review::validate_content(&input.content)?;
        models::review::validate_rating(input.rating)?;
        let mut tags = BTreeSet::new();
        for raw in input.tags.iter().filter(|t| !t.trim().is_empty()) {
            tags.insert(models::review_tag::normalize_name(raw)?);
        }
        let input = NewReview { title: input.title.trim().to_string(), tags: tags.into_iter().collect(), ..input };

        let review = self.repo.insert_review(account.id, counselor.id, &input).await?;
        info!(review_id = %review.review_id, counselor_id = %counselor.id, rating = review.rating, event = "review_written", "review written");
        Ok(review)
    }

    pub async fn list_reviews(&self, counselor_id: Uuid) -> Result<Vec<ReviewView>, ServiceError> {
        let counselor = require_counselor(self.repo.as_ref(), counselor_id).await?;
        self.repo.list_reviews(counselor.id).await
    }

    #[instrument(skip(self))]
    pub async fn recommend(&self, review_id: Uuid) -> Result<Recommendation, ServiceError> {
        let recommendation_count = self
            .repo
            .increment_recommendation(review_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("review"))?;
        Ok(Recommendation { review_id, recommendation_count })
    }
}
