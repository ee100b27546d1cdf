use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Catalogue item with a live stock level. Quantities are decimal so goods
/// sold by weight (e.g. cuts of meat) can carry fractional stock.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub sku: String,
    pub stock: Decimal,
    pub price: Decimal,
    pub cost_price: Decimal,
    pub min_stock: Decimal,
    pub max_stock: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_movement::Entity")]
    StockMovements,
}

impl Related<super::stock_movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// An item is critical when its stock has fallen to or below a
    /// configured minimum. A zero minimum means no threshold is set.
    pub fn is_below_minimum(&self) -> bool {
        self.min_stock > Decimal::ZERO && self.stock <= self.min_stock
    }
}
