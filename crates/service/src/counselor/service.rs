use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{CounselorFilter, CounselorProfile, CounselorView, NewCounselor};
use super::repository::CounselorRepository;
use super::{counselor_view, require_counselor};
use crate::errors::ServiceError;

pub struct CounselorService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: CounselorRepository + ?Sized> CounselorService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewCounselor) -> Result<CounselorProfile, ServiceError> {
        models::counselor::validate_name(&input.name)?;
        // distinct, trimmed, non-blank labels
        let fields: BTreeSet<String> = input
            .counseling_fields
            .iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if let Some(long) = fields.iter().find(|f| f.chars().count() > 64) {
            return Err(ServiceError::Validation(format!("counseling field too long (<=64): {long}")));
        }
        let input = NewCounselor {
            name: input.name.trim().to_string(),
            introduction: input.introduction.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            counseling_fields: fields.into_iter().collect(),
        };
        let counselor = self.repo.create_counselor(&input).await?;
        info!(counselor_id = %counselor.id, fields = input.counseling_fields.len(), event = "counselor_created", "counselor created");
        self.profile(counselor).await
    }

    pub async fn get(&self, id: Uuid) -> Result<CounselorProfile, ServiceError> {
        let counselor = require_counselor(self.repo.as_ref(), id).await?;
        self.profile(counselor).await
    }

    pub async fn list(&self, filter: &CounselorFilter) -> Result<Vec<CounselorView>, ServiceError> {
        let counselors = self.repo.list_counselors(&filter.normalized()).await?;
        let mut out = Vec::with_capacity(counselors.len());
        for c in &counselors {
            out.push(counselor_view(self.repo.as_ref(), c).await?);
        }
        Ok(out)
    }

    async fn profile(&self, counselor: super::Counselor) -> Result<CounselorProfile, ServiceError> {
        let view = counselor_view(self.repo.as_ref(), &counselor).await?;
        Ok(CounselorProfile { view, introduction: counselor.introduction, created_at: counselor.created_at })
    }
}
