use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{counselor, errors::ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "counseling_field")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub counselor_id: Uuid,
    pub field: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Counselor }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Counselor => Entity::belongs_to(counselor::Entity).from(Column::CounselorId).to(counselor::Column::Id).into() }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, counselor_id: Uuid, field: &str) -> Result<Model, ModelError> {
    let field = field.trim();
    if field.is_empty() { return Err(ModelError::Validation("counseling field required".into())); }
    if field.chars().count() > 64 { return Err(ModelError::Validation("counseling field too long (<=64)".into())); }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        counselor_id: Set(counselor_id),
        field: Set(field.to_string()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}

/// Field labels of one counselor, in insertion order (may repeat).
pub async fn labels_for<C: ConnectionTrait>(db: &C, counselor_id: Uuid) -> Result<Vec<String>, ModelError> {
    let rows = Entity::find()
        .filter(Column::CounselorId.eq(counselor_id))
        .all(db)
        .await
        .map_err(ModelError::from_db)?;
    Ok(rows.into_iter().map(|r| r.field).collect())
}
