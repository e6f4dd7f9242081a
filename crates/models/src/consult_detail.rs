use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{account, errors::ModelError, reservation};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "consult_detail")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    pub reservation_id: Uuid,
    pub content: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Account, Reservation }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Account => Entity::belongs_to(account::Entity).from(Column::AccountId).to(account::Column::Id).into(),
            Relation::Reservation => Entity::belongs_to(reservation::Entity).from(Column::ReservationId).to(reservation::Column::Id).into(),
        }
    }
}

impl Related<reservation::Entity> for Entity {
    fn to() -> RelationDef { Relation::Reservation.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create<C: ConnectionTrait>(db: &C, account_id: Uuid, reservation_id: Uuid, content: Option<&str>) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(account_id),
        reservation_id: Set(reservation_id),
        content: Set(content.map(str::to_string)),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::from_db)
}
