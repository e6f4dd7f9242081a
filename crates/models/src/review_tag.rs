use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn normalize_name(name: &str) -> Result<String, ModelError> {
    let n = name.trim();
    if n.is_empty() { return Err(ModelError::Validation("tag name required".into())); }
    if n.chars().count() > 32 { return Err(ModelError::Validation("tag name too long (<=32)".into())); }
    Ok(n.to_lowercase())
}

/// Fetch a tag by name, inserting it first if missing.
pub async fn find_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, ModelError> {
    let name = normalize_name(name)?;
    let am = ActiveModel { id: Set(Uuid::new_v4()), name: Set(name.clone()) };
    Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
        .exec_without_returning(db)
        .await
        .map_err(ModelError::from_db)?;
    Entity::find()
        .filter(Column::Name.eq(name.as_str()))
        .one(db)
        .await
        .map_err(ModelError::from_db)?
        .ok_or_else(|| ModelError::Db(format!("tag {name} vanished after upsert")))
}
