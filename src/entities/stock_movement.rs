use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Append-only ledger of stock changes. Rows are never updated or deleted;
/// the current stock level on the item is the sum of its history.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub sku: String,
    pub direction: MovementDirection,
    pub reason: MovementReason,
    pub quantity: Decimal,
    #[sea_orm(nullable)]
    pub notes: Option<String>,
    pub recorded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory_item::Entity",
        from = "Column::ItemId",
        to = "super::inventory_item::Column::Id"
    )]
    Item,
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum MovementDirection {
    #[sea_orm(string_value = "inbound")]
    Inbound,
    #[sea_orm(string_value = "outbound")]
    Outbound,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(30))")]
#[serde(rename_all = "snake_case")]
pub enum MovementReason {
    /// Goods received from a purchase or delivery
    #[sea_orm(string_value = "stock_entry")]
    StockEntry,
    /// Deducted automatically at checkout
    #[sea_orm(string_value = "sale")]
    Sale,
    /// Loss, breakage or theft
    #[sea_orm(string_value = "shrinkage")]
    Shrinkage,
    /// Goods sent back to the supplier
    #[sea_orm(string_value = "supplier_return")]
    SupplierReturn,
    /// Manual correction that lowers stock
    #[sea_orm(string_value = "negative_adjustment")]
    NegativeAdjustment,
    /// A customer returned goods
    #[sea_orm(string_value = "customer_return")]
    CustomerReturn,
    /// Manual correction that raises stock
    #[sea_orm(string_value = "positive_adjustment")]
    PositiveAdjustment,
}

impl MovementReason {
    /// Direction this reason is allowed to move stock in. `None` means the
    /// reason is reserved for system-generated movements and cannot be
    /// submitted through the manual movement endpoint.
    pub fn manual_direction(&self) -> Option<MovementDirection> {
        match self {
            Self::Shrinkage | Self::SupplierReturn | Self::NegativeAdjustment => {
                Some(MovementDirection::Outbound)
            }
            Self::CustomerReturn | Self::PositiveAdjustment => Some(MovementDirection::Inbound),
            Self::StockEntry | Self::Sale => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_reasons_map_to_fixed_directions() {
        assert_eq!(
            MovementReason::Shrinkage.manual_direction(),
            Some(MovementDirection::Outbound)
        );
        assert_eq!(
            MovementReason::CustomerReturn.manual_direction(),
            Some(MovementDirection::Inbound)
        );
        assert_eq!(MovementReason::Sale.manual_direction(), None);
        assert_eq!(MovementReason::StockEntry.manual_direction(), None);
    }
}
