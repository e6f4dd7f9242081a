use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "counselor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub introduction: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    let len = name.trim().chars().count();
    if len == 0 { return Err(ModelError::Validation("counselor name required".into())); }
    if len > 64 { return Err(ModelError::Validation("counselor name too long (<=64)".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, introduction: Option<&str>) -> Result<Model, ModelError> {
    validate_name(name)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        introduction: Set(introduction.map(str::to_string).filter(|s| !s.trim().is_empty())),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}
