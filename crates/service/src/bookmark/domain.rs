use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::counselor::CounselorView;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub account_id: Uuid,
    pub counselor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Bookmark expanded with the bookmarked counselor.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkView {
    pub bookmark_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub counselor: CounselorView,
}
