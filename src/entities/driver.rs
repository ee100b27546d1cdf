use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Delivery driver with a simulated position. `current_stop_index` points at
/// the next stop in the assigned route order; `is_moving` drives the
/// simulation tick between position updates.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "drivers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub vehicle: String,
    pub latitude: f64,
    pub longitude: f64,
    pub current_stop_index: i32,
    pub is_moving: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::delivery_stop::Entity")]
    Stops,
}

impl Related<super::delivery_stop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
