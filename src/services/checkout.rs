use crate::{
    auth::TenantContext,
    entities::{
        cash_session::{self, Entity as CashSessions},
        inventory_item::{self, Entity as InventoryItems},
        sale::{self, Entity as Sales, PaymentMethod},
        sale_line::{self, Entity as SaleLines},
        stock_movement::{self, MovementDirection, MovementReason},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// Point-of-sale checkout. A sale, its lines, the stock decrements and the
/// ledger entries all land in one transaction; any failure rolls the whole
/// cart back.
#[derive(Clone)]
pub struct CheckoutService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
    logger: Logger,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutLine {
    pub item_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutInput {
    pub lines: Vec<CheckoutLine>,
    pub payment_method: PaymentMethod,
    pub customer_id: Option<Uuid>,
    pub cash_session_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Receipt {
    pub sale: sale::Model,
    pub lines: Vec<sale_line::Model>,
}

impl CheckoutService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender, logger: Logger) -> Self {
        Self {
            db,
            event_sender,
            logger,
        }
    }

    /// Completes a cart. Cash payments must reference an open cash session,
    /// which absorbs the sale total.
    #[instrument(skip(self, input), fields(lines = input.lines.len()))]
    pub async fn checkout(
        &self,
        ctx: TenantContext,
        input: CheckoutInput,
    ) -> Result<Receipt, ServiceError> {
        if input.lines.is_empty() {
            return Err(ServiceError::ValidationError("Cart is empty".into()));
        }
        for line in &input.lines {
            if line.quantity <= Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Line quantity must be positive".into(),
                ));
            }
            if line.unit_price < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Unit price cannot be negative".into(),
                ));
            }
        }

        let total: Decimal = input
            .lines
            .iter()
            .map(|l| l.quantity * l.unit_price)
            .sum();

        let txn = self.db.begin().await?;

        // Cash needs an open register to absorb the payment.
        if input.payment_method == PaymentMethod::Cash {
            let session_id = input.cash_session_id.ok_or_else(|| {
                ServiceError::ValidationError(
                    "Cash payments require an open cash session".into(),
                )
            })?;
            let session = CashSessions::find_by_id(session_id)
                .filter(cash_session::Column::TenantId.eq(ctx.tenant_id))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Cash session {} not found", session_id))
                })?;
            if !session.is_open() {
                return Err(ServiceError::InvalidOperation(
                    "Cash session is closed".into(),
                ));
            }
            CashSessions::update_many()
                .col_expr(
                    cash_session::Column::CashTotal,
                    Expr::col(cash_session::Column::CashTotal).add(total),
                )
                .filter(cash_session::Column::Id.eq(session_id))
                .exec(&txn)
                .await?;
        }

        let sale = sale::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(ctx.tenant_id),
            total: Set(total),
            payment_method: Set(input.payment_method),
            cashier_id: Set(ctx.user_id),
            customer_id: Set(input.customer_id),
            cash_session_id: Set(input.cash_session_id),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let item = InventoryItems::find_by_id(line.item_id)
                .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Item {} not found", line.item_id))
                })?;

            // Guarded decrement: only succeeds while stock covers the line.
            let result = InventoryItems::update_many()
                .col_expr(
                    inventory_item::Column::Stock,
                    Expr::col(inventory_item::Column::Stock).sub(line.quantity),
                )
                .col_expr(
                    inventory_item::Column::UpdatedAt,
                    Expr::value(Utc::now()),
                )
                .filter(inventory_item::Column::Id.eq(line.item_id))
                .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
                .filter(inventory_item::Column::Stock.gte(line.quantity))
                .exec(&txn)
                .await?;
            if result.rows_affected == 0 {
                return Err(ServiceError::InsufficientStock(format!(
                    "{}: requested {}, available {}",
                    item.name, line.quantity, item.stock
                )));
            }

            let saved = sale_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                sale_id: Set(sale.id),
                item_id: Set(item.id),
                name: Set(item.name.clone()),
                sku: Set(item.sku.clone()),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                line_total: Set(line.quantity * line.unit_price),
            }
            .insert(&txn)
            .await?;
            lines.push(saved);

            stock_movement::ActiveModel {
                id: Set(Uuid::new_v4()),
                tenant_id: Set(ctx.tenant_id),
                item_id: Set(item.id),
                item_name: Set(item.name),
                sku: Set(item.sku),
                direction: Set(MovementDirection::Outbound),
                reason: Set(MovementReason::Sale),
                quantity: Set(line.quantity),
                notes: Set(None),
                recorded_by: Set(ctx.user_id),
                created_at: Set(Utc::now()),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        slog::info!(
            self.logger,
            "sale completed";
            "sale_id" => %sale.id,
            "total" => %sale.total,
            "lines" => lines.len(),
        );
        self.event_sender
            .send(Event::SaleCompleted {
                sale_id: sale.id,
                total: sale.total,
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(Receipt { sale, lines })
    }

    /// Sale history, newest first.
    #[instrument(skip(self))]
    pub async fn list_sales(
        &self,
        ctx: TenantContext,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<sale::Model>, u64), ServiceError> {
        let paginator = Sales::find()
            .filter(sale::Column::TenantId.eq(ctx.tenant_id))
            .order_by_desc(sale::Column::CreatedAt)
            .paginate(self.db.as_ref(), limit.max(1));
        let total = paginator.num_items().await?;
        let sales = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((sales, total))
    }

    /// A sale with its lines, for receipt reprints.
    #[instrument(skip(self))]
    pub async fn get_sale(&self, ctx: TenantContext, id: Uuid) -> Result<Receipt, ServiceError> {
        let sale = Sales::find_by_id(id)
            .filter(sale::Column::TenantId.eq(ctx.tenant_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Sale {} not found", id)))?;
        let lines = SaleLines::find()
            .filter(sale_line::Column::SaleId.eq(id))
            .all(self.db.as_ref())
            .await?;

        Ok(Receipt { sale, lines })
    }
}
