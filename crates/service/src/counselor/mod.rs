//! Counselor directory: profiles and their counseling-field labels.

pub mod domain;
pub mod repository;
pub mod service;

use std::collections::BTreeSet;

use uuid::Uuid;

pub use domain::{Counselor, CounselorView};
pub use repository::CounselorRepository;
pub use service::CounselorService;

use crate::errors::ServiceError;

/// Counselor by id or `NotFound`.
pub async fn require_counselor<R>(repo: &R, id: Uuid) -> Result<Counselor, ServiceError>
where
    R: CounselorRepository + ?Sized,
{
    repo.find_counselor(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Not found counselor".into()))
}

/// Expand a counselor into its view; field labels come from a secondary lookup.
pub async fn counselor_view<R>(repo: &R, counselor: &Counselor) -> Result<CounselorView, ServiceError>
where
    R: CounselorRepository + ?Sized,
{
    let counseling_fields: BTreeSet<String> = repo.counseling_fields(counselor.id).await?.into_iter().collect();
    Ok(CounselorView { counselor_id: counselor.id, name: counselor.name.clone(), counseling_fields })
}
