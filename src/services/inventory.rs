use crate::{
    auth::TenantContext,
    entities::inventory_item::{self, Entity as InventoryItems},
    entities::stock_movement::{self, MovementDirection, MovementReason},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Service for managing the item catalogue and its stock levels
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
    #[serde(default)]
    pub stock: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub cost_price: Decimal,
    #[serde(default)]
    pub min_stock: Decimal,
    #[serde(default)]
    pub max_stock: Decimal,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateItemInput {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub min_stock: Option<Decimal>,
    pub max_stock: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StockEntryInput {
    pub quantity: Decimal,
    pub notes: Option<String>,
}

impl InventoryService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Lists items for a tenant, newest first, with optional name/SKU search.
    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        ctx: TenantContext,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<(Vec<inventory_item::Model>, u64), ServiceError> {
        let mut query = InventoryItems::find()
            .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
            .order_by_desc(inventory_item::Column::CreatedAt);

        if let Some(term) = search.filter(|t| !t.trim().is_empty()) {
            let term = term.trim().to_string();
            query = query.filter(
                Condition::any()
                    .add(inventory_item::Column::Name.contains(&term))
                    .add(inventory_item::Column::Sku.contains(&term)),
            );
        }

        let paginator = query.paginate(self.db.as_ref(), limit.max(1));
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((items, total))
    }

    #[instrument(skip(self))]
    pub async fn get_item(
        &self,
        ctx: TenantContext,
        id: Uuid,
    ) -> Result<inventory_item::Model, ServiceError> {
        InventoryItems::find_by_id(id)
            .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item with ID {} not found", id)))
    }

    /// Looks an item up by SKU, the scanner path at the register.
    #[instrument(skip(self))]
    pub async fn find_by_sku(
        &self,
        ctx: TenantContext,
        sku: &str,
    ) -> Result<inventory_item::Model, ServiceError> {
        InventoryItems::find()
            .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
            .filter(inventory_item::Column::Sku.eq(sku))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item with SKU '{}' not found", sku)))
    }

    #[instrument(skip(self, input))]
    pub async fn create_item(
        &self,
        ctx: TenantContext,
        input: CreateItemInput,
    ) -> Result<inventory_item::Model, ServiceError> {
        input.validate()?;
        ensure_non_negative(&[
            ("stock", input.stock),
            ("price", input.price),
            ("cost_price", input.cost_price),
            ("min_stock", input.min_stock),
            ("max_stock", input.max_stock),
        ])?;

        let sku = input.sku.trim().to_string();
        let duplicate = InventoryItems::find()
            .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
            .filter(inventory_item::Column::Sku.eq(sku.clone()))
            .one(self.db.as_ref())
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(format!(
                "SKU '{}' is already in use",
                sku
            )));
        }

        let now = Utc::now();
        let item = inventory_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(ctx.tenant_id),
            name: Set(input.name.trim().to_string()),
            sku: Set(sku),
            stock: Set(input.stock),
            price: Set(input.price),
            cost_price: Set(input.cost_price),
            min_stock: Set(input.min_stock),
            max_stock: Set(input.max_stock),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db.as_ref())
        .await?;

        info!("Created item {} ({})", item.id, item.sku);
        self.event_sender
            .send(Event::ItemCreated(item.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(item)
    }

    /// Partial update of catalogue fields. Stock is deliberately absent:
    /// stock only changes through entries, movements and checkout.
    #[instrument(skip(self, input))]
    pub async fn update_item(
        &self,
        ctx: TenantContext,
        id: Uuid,
        input: UpdateItemInput,
    ) -> Result<inventory_item::Model, ServiceError> {
        let existing = self.get_item(ctx, id).await?;

        if let Some(name) = &input.name {
            if name.trim().is_empty() {
                return Err(ServiceError::ValidationError("Name is required".into()));
            }
        }
        if let Some(sku) = &input.sku {
            let sku = sku.trim();
            if sku.is_empty() {
                return Err(ServiceError::ValidationError("SKU is required".into()));
            }
            if sku != existing.sku {
                let duplicate = InventoryItems::find()
                    .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
                    .filter(inventory_item::Column::Sku.eq(sku))
                    .one(self.db.as_ref())
                    .await?;
                if duplicate.is_some() {
                    return Err(ServiceError::Conflict(format!(
                        "SKU '{}' is already in use",
                        sku
                    )));
                }
            }
        }
        let mut non_negative = Vec::new();
        if let Some(price) = input.price {
            non_negative.push(("price", price));
        }
        if let Some(cost_price) = input.cost_price {
            non_negative.push(("cost_price", cost_price));
        }
        if let Some(min_stock) = input.min_stock {
            non_negative.push(("min_stock", min_stock));
        }
        if let Some(max_stock) = input.max_stock {
            non_negative.push(("max_stock", max_stock));
        }
        ensure_non_negative(&non_negative)?;

        let mut model: inventory_item::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(sku) = input.sku {
            model.sku = Set(sku.trim().to_string());
        }
        if let Some(price) = input.price {
            model.price = Set(price);
        }
        if let Some(cost_price) = input.cost_price {
            model.cost_price = Set(cost_price);
        }
        if let Some(min_stock) = input.min_stock {
            model.min_stock = Set(min_stock);
        }
        if let Some(max_stock) = input.max_stock {
            model.max_stock = Set(max_stock);
        }
        model.updated_at = Set(Utc::now());

        let item = model.update(self.db.as_ref()).await?;

        self.event_sender
            .send(Event::ItemUpdated(item.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, ctx: TenantContext, id: Uuid) -> Result<(), ServiceError> {
        let item = self.get_item(ctx, id).await?;
        InventoryItems::delete_by_id(item.id)
            .exec(self.db.as_ref())
            .await?;

        info!("Deleted item {} ({})", item.id, item.sku);
        self.event_sender
            .send(Event::ItemDeleted(item.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    /// Items at or below their minimum stock level. Items with a zero
    /// minimum have no threshold set and never count as low.
    #[instrument(skip(self))]
    pub async fn low_stock_items(
        &self,
        ctx: TenantContext,
    ) -> Result<Vec<inventory_item::Model>, ServiceError> {
        let items = InventoryItems::find()
            .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
            .filter(inventory_item::Column::MinStock.gt(Decimal::ZERO))
            .filter(
                Expr::col(inventory_item::Column::Stock)
                    .lte(Expr::col(inventory_item::Column::MinStock)),
            )
            .order_by_asc(inventory_item::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(items)
    }

    /// Receives goods: raises stock and appends a `stock_entry` ledger row,
    /// both inside one transaction.
    #[instrument(skip(self, input))]
    pub async fn record_stock_entry(
        &self,
        ctx: TenantContext,
        item_id: Uuid,
        input: StockEntryInput,
    ) -> Result<inventory_item::Model, ServiceError> {
        if input.quantity <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Quantity must be greater than zero".into(),
            ));
        }

        let txn = self.db.begin().await?;

        let item = InventoryItems::find_by_id(item_id)
            .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item with ID {} not found", item_id)))?;

        let now = Utc::now();
        InventoryItems::update_many()
            .col_expr(
                inventory_item::Column::Stock,
                Expr::col(inventory_item::Column::Stock).add(input.quantity),
            )
            .col_expr(inventory_item::Column::UpdatedAt, Expr::value(now))
            .filter(inventory_item::Column::Id.eq(item.id))
            .exec(&txn)
            .await?;

        stock_movement::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(ctx.tenant_id),
            item_id: Set(item.id),
            item_name: Set(item.name.clone()),
            sku: Set(item.sku.clone()),
            direction: Set(MovementDirection::Inbound),
            reason: Set(MovementReason::StockEntry),
            quantity: Set(input.quantity),
            notes: Set(input.notes.clone()),
            recorded_by: Set(ctx.user_id),
            created_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Stock entry of {} recorded for item {} ({})",
            input.quantity, item.id, item.sku
        );
        self.event_sender
            .send(Event::StockEntryRecorded {
                item_id: item.id,
                quantity: input.quantity,
            })
            .await
            .map_err(ServiceError::EventError)?;

        self.get_item(ctx, item.id).await
    }
}

fn ensure_non_negative(fields: &[(&str, Decimal)]) -> Result<(), ServiceError> {
    for (name, value) in fields {
        if *value < Decimal::ZERO {
            return Err(ServiceError::ValidationError(format!(
                "{} cannot be negative",
                name
            )));
        }
    }
    Ok(())
}
