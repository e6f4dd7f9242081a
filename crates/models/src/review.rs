use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{account, counselor, errors::ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub counselor_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub recommendation_count: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Account, Counselor }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Account => Entity::belongs_to(account::Entity).from(Column::AccountId).to(account::Column::Id).into(),
            Relation::Counselor => Entity::belongs_to(counselor::Entity).from(Column::CounselorId).to(counselor::Column::Id).into(),
        }
    }
}

impl Related<account::Entity> for Entity {
    fn to() -> RelationDef { Relation::Account.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const MAX_RATING: f64 = 5.0;

pub fn validate_title(title: &str) -> Result<(), ModelError> {
    let len = title.trim().chars().count();
    if len == 0 { return Err(ModelError::Validation("review title required".into())); }
    if len > 100 { return Err(ModelError::Validation("review title too long (<=100)".into())); }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ModelError> {
    if content.trim().is_empty() { return Err(ModelError::Validation("review content required".into())); }
    Ok(())
}

pub fn validate_rating(rating: f64) -> Result<(), ModelError> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ModelError::Validation(format!("rating must be within 0..={MAX_RATING}")));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    account_id: Uuid,
    counselor_id: Uuid,
    title: &str,
    content: &str,
    rating: f64,
) -> Result<Model, ModelError> {
    validate_title(title)?;
    validate_content(content)?;
    validate_rating(rating)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(account_id),
        counselor_id: Set(counselor_id),
        title: Set(title.trim().to_string()),
        content: Set(content.to_string()),
        rating: Set(rating),
        recommendation_count: Set(0),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

/// Atomically bump `recommendation_count`; `None` if the review does not exist.
pub async fn increment_recommendation<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<i32>, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::RecommendationCount, Expr::col(Column::RecommendationCount).add(1))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(ModelError::from_db)?;
    if res.rows_affected == 0 {
        return Ok(None);
    }
    let found = Entity::find_by_id(id).one(db).await.map_err(ModelError::from_db)?;
    Ok(found.map(|r| r.recommendation_count))
}
