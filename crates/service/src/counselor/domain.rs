use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Counselor {
    pub id: Uuid,
    pub name: String,
    pub introduction: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Counselor as embedded in other views: id, name and distinct field labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounselorView {
    pub counselor_id: Uuid,
    pub name: String,
    pub counseling_fields: BTreeSet<String>,
}

/// Full profile returned by the directory.
#[derive(Debug, Clone, Serialize)]
pub struct CounselorProfile {
    #[serde(flatten)]
    pub view: CounselorView,
    pub introduction: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCounselor {
    pub name: String,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub counseling_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CounselorFilter {
    /// Exact counseling-field label
    pub field: Option<String>,
    /// Case-insensitive substring of the name
    pub keyword: Option<String>,
}

impl CounselorFilter {
    /// Drop blank criteria so "?field=" behaves like no filter.
    pub fn normalized(&self) -> Self {
        let clean = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        Self { field: clean(&self.field), keyword: clean(&self.keyword) }
    }
}
