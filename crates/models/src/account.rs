use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    if email.is_empty() || email.len() > 255 || !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    let len = name.trim().chars().count();
    if len == 0 { return Err(ModelError::Validation("name required".into())); }
    if len > 64 { return Err(ModelError::Validation("name too long (<=64)".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, email: &str, name: &str, password_hash: &str) -> Result<Model, ModelError> {
    validate_email(email)?;
    validate_name(name)?;
    if password_hash.trim().is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.trim().to_string()),
        name: Set(name.trim().to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email.trim()))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}
