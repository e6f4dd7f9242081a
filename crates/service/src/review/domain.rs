use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub title: String,
    pub content: String,
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewView {
    pub review_id: Uuid,
    pub counselor_id: Uuid,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub rating: f64,
    pub recommendation_count: i32,
    pub created_at: DateTime<Utc>,
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub review_id: Uuid,
    pub recommendation_count: i32,
}
