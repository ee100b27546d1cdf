use crate::{
    auth::TenantContext,
    entities::inventory_item::{self, Entity as InventoryItems},
    entities::stock_movement::{self, Entity as StockMovements, MovementDirection, MovementReason},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Manual stock corrections: shrinkage, returns and adjustments. Checkout
/// and goods receipt write their own ledger rows elsewhere.
#[derive(Clone)]
pub struct StockMovementService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordMovementInput {
    /// SKU of the item being corrected
    pub sku: String,
    pub reason: MovementReason,
    pub quantity: Decimal,
    pub notes: Option<String>,
}

impl StockMovementService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Records a manual movement and applies it to the item's stock in one
    /// transaction. Outbound movements never drive stock below zero: the
    /// decrement is guarded by a `stock >= quantity` condition and the whole
    /// transaction fails with an insufficient-stock error when it misses.
    #[instrument(skip(self, input))]
    pub async fn record_movement(
        &self,
        ctx: TenantContext,
        input: RecordMovementInput,
    ) -> Result<(stock_movement::Model, inventory_item::Model), ServiceError> {
        if input.quantity <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Quantity must be greater than zero".into(),
            ));
        }
        let direction = input.reason.manual_direction().ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "Reason '{:?}' is reserved for system-generated movements",
                input.reason
            ))
        })?;

        let sku = input.sku.trim().to_string();
        let txn = self.db.begin().await?;

        let item = InventoryItems::find()
            .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
            .filter(inventory_item::Column::Sku.eq(sku.clone()))
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item with SKU '{}' not found", sku)))?;

        let now = Utc::now();
        match direction {
            MovementDirection::Inbound => {
                InventoryItems::update_many()
                    .col_expr(
                        inventory_item::Column::Stock,
                        Expr::col(inventory_item::Column::Stock).add(input.quantity),
                    )
                    .col_expr(inventory_item::Column::UpdatedAt, Expr::value(now))
                    .filter(inventory_item::Column::Id.eq(item.id))
                    .exec(&txn)
                    .await?;
            }
            MovementDirection::Outbound => {
                let result = InventoryItems::update_many()
                    .col_expr(
                        inventory_item::Column::Stock,
                        Expr::col(inventory_item::Column::Stock).sub(input.quantity),
                    )
                    .col_expr(inventory_item::Column::UpdatedAt, Expr::value(now))
                    .filter(inventory_item::Column::Id.eq(item.id))
                    .filter(inventory_item::Column::Stock.gte(input.quantity))
                    .exec(&txn)
                    .await?;
                if result.rows_affected == 0 {
                    warn!(
                        "Rejected outbound movement of {} for '{}': stock {}",
                        input.quantity, item.sku, item.stock
                    );
                    return Err(ServiceError::InsufficientStock(format!(
                        "{}: requested {}, available {}",
                        item.name, input.quantity, item.stock
                    )));
                }
            }
        }

        let movement = stock_movement::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(ctx.tenant_id),
            item_id: Set(item.id),
            item_name: Set(item.name.clone()),
            sku: Set(item.sku.clone()),
            direction: Set(direction),
            reason: Set(input.reason),
            quantity: Set(input.quantity),
            notes: Set(input.notes.clone()),
            recorded_by: Set(ctx.user_id),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Movement {:?}/{:?} of {} recorded for '{}'",
            direction, input.reason, input.quantity, item.sku
        );
        self.event_sender
            .send(Event::StockMovementRecorded {
                movement_id: movement.id,
                item_id: item.id,
            })
            .await
            .map_err(ServiceError::EventError)?;

        let updated = InventoryItems::find_by_id(item.id)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Item with ID {} not found", item.id))
            })?;

        Ok((movement, updated))
    }

    /// Movement history for a tenant, newest first.
    #[instrument(skip(self))]
    pub async fn list_movements(
        &self,
        ctx: TenantContext,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<stock_movement::Model>, u64), ServiceError> {
        let paginator = StockMovements::find()
            .filter(stock_movement::Column::TenantId.eq(ctx.tenant_id))
            .order_by_desc(stock_movement::Column::CreatedAt)
            .paginate(self.db.as_ref(), limit.max(1));
        let total = paginator.num_items().await?;
        let movements = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((movements, total))
    }
}
