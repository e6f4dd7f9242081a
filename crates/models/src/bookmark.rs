use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{account, counselor, errors::ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookmark")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub counselor_id: Uuid,
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

impl Related<counselor::Entity> for Entity {
    fn to() -> RelationDef { Relation::Counselor.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert a bookmark unless the (account, counselor) pair already has one.
///
/// Relies on the `uniq_bookmark_account_counselor` index; returns `None`
/// when the row was not inserted because of it.
pub async fn create_if_absent<C: ConnectionTrait>(db: &C, account_id: Uuid, counselor_id: Uuid) -> Result<Option<Model>, ModelError> {
    let model = Model { id: Uuid::new_v4(), account_id, counselor_id, created_at: Utc::now().into() };
    let am = ActiveModel {
        id: Set(model.id),
        account_id: Set(account_id),
        counselor_id: Set(counselor_id),
        created_at: Set(model.created_at),
    };
    let inserted = Entity::insert(am)
        .on_conflict(
            OnConflict::columns([Column::AccountId, Column::CounselorId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map_err(ModelError::from_db)?;
    Ok((inserted > 0).then_some(model))
}

pub async fn find_pair<C: ConnectionTrait>(db: &C, account_id: Uuid, counselor_id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find()
        .filter(Column::AccountId.eq(account_id))
        .filter(Column::CounselorId.eq(counselor_id))
        .one(db)
        .await
        .map_err(ModelError::from_db)
}

/// Bulk delete by (account, counselor); returns affected rows.
pub async fn delete_pair<C: ConnectionTrait>(db: &C, account_id: Uuid, counselor_id: Uuid) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::AccountId.eq(account_id))
        .filter(Column::CounselorId.eq(counselor_id))
        .exec(db)
        .await
        .map_err(ModelError::from_db)?;
    Ok(res.rows_affected)
}
