use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, review, review_tag};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review_tag_map")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub review_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Review, Tag }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Review => Entity::belongs_to(review::Entity).from(Column::ReviewId).to(review::Column::Id).into(),
            Relation::Tag => Entity::belongs_to(review_tag::Entity).from(Column::TagId).to(review_tag::Column::Id).into(),
        }
    }
}

impl Related<review_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tag.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn link<C: ConnectionTrait>(db: &C, review_id: Uuid, tag_id: Uuid) -> Result<(), ModelError> {
    let am = ActiveModel { review_id: Set(review_id), tag_id: Set(tag_id) };
    Entity::insert(am)
        .on_conflict(OnConflict::columns([Column::ReviewId, Column::TagId]).do_nothing().to_owned())
        .exec_without_returning(db)
        .await
        .map_err(ModelError::from_db)?;
    Ok(())
}
