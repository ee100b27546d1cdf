use crate::{
    auth::TenantContext,
    entities::{
        customer::{self, Entity as Customers},
        inventory_item::{self, Entity as InventoryItems},
        sale::{self, Entity as Sales},
        sale_line::{self, Entity as SaleLines},
    },
    errors::ServiceError,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::Serialize;
use slog::Logger;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// Read-only aggregations over sales, inventory and customers.
#[derive(Clone)]
pub struct ReportsService {
    db: Arc<DatabaseConnection>,
    logger: Logger,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sale_count: u64,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopProduct {
    pub item_id: Uuid,
    pub name: String,
    pub sku: String,
    pub quantity_sold: Decimal,
    pub revenue: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventorySummary {
    pub total_items: u64,
    pub total_valuation: Decimal,
    pub critical_items: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopCustomer {
    pub customer_id: Uuid,
    pub name: String,
    pub purchase_count: u64,
    pub total_spent: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerSummary {
    pub total_customers: u64,
    pub customers_with_sales: u64,
    /// Registered customers ranked by lifetime spend, best first.
    pub top_customers: Vec<TopCustomer>,
}

const TOP_CUSTOMERS_LIMIT: usize = 10;

/// Argentine VAT rate; sale totals are VAT-inclusive.
const IVA_RATE: Decimal = dec!(0.21);

/// One row of the "Libro IVA Ventas": the sale total split into its taxed
/// net amount and the VAT portion.
#[derive(Debug, Serialize, ToSchema)]
pub struct IvaBookEntry {
    pub sale_id: Uuid,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub voucher: String,
    pub net_amount: Decimal,
    pub iva_amount: Decimal,
    pub total: Decimal,
}

impl ReportsService {
    pub fn new(db: Arc<DatabaseConnection>, logger: Logger) -> Self {
        Self { db, logger }
    }

    /// Revenue and sale counts bucketed per calendar day, oldest first.
    #[instrument(skip(self))]
    pub async fn daily_sales(
        &self,
        ctx: TenantContext,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<DailySales>, ServiceError> {
        let mut query = Sales::find().filter(sale::Column::TenantId.eq(ctx.tenant_id));
        if let Some(from) = from {
            query = query.filter(sale::Column::CreatedAt.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(sale::Column::CreatedAt.lte(to));
        }
        let sales = query.all(self.db.as_ref()).await?;

        let mut buckets: BTreeMap<NaiveDate, (u64, Decimal)> = BTreeMap::new();
        for sale in sales {
            let entry = buckets
                .entry(sale.created_at.date_naive())
                .or_insert((0, Decimal::ZERO));
            entry.0 += 1;
            entry.1 += sale.total;
        }

        Ok(buckets
            .into_iter()
            .map(|(date, (sale_count, revenue))| DailySales {
                date,
                sale_count,
                revenue,
            })
            .collect())
    }

    /// Best sellers ranked by quantity sold.
    #[instrument(skip(self))]
    pub async fn top_products(
        &self,
        ctx: TenantContext,
        limit: usize,
    ) -> Result<Vec<TopProduct>, ServiceError> {
        let lines = SaleLines::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                sale_line::Relation::Sale.def(),
            )
            .filter(sale::Column::TenantId.eq(ctx.tenant_id))
            .all(self.db.as_ref())
            .await?;

        let mut totals: HashMap<Uuid, TopProduct> = HashMap::new();
        for line in lines {
            let entry = totals.entry(line.item_id).or_insert_with(|| TopProduct {
                item_id: line.item_id,
                name: line.name.clone(),
                sku: line.sku.clone(),
                quantity_sold: Decimal::ZERO,
                revenue: Decimal::ZERO,
            });
            entry.quantity_sold += line.quantity;
            entry.revenue += line.line_total;
        }

        let mut ranked: Vec<TopProduct> = totals.into_values().collect();
        ranked.sort_by(|a, b| {
            b.quantity_sold
                .cmp(&a.quantity_sold)
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked.truncate(limit);

        slog::debug!(self.logger, "top products computed"; "count" => ranked.len());
        Ok(ranked)
    }

    /// Stock valuation at cost and the count of items at or below their
    /// minimum level.
    #[instrument(skip(self))]
    pub async fn inventory_summary(
        &self,
        ctx: TenantContext,
    ) -> Result<InventorySummary, ServiceError> {
        let items = InventoryItems::find()
            .filter(inventory_item::Column::TenantId.eq(ctx.tenant_id))
            .all(self.db.as_ref())
            .await?;

        let total_items = items.len() as u64;
        let mut total_valuation = Decimal::ZERO;
        let mut critical_items = 0;
        for item in &items {
            total_valuation += item.stock * item.cost_price;
            if item.is_below_minimum() {
                critical_items += 1;
            }
        }

        Ok(InventorySummary {
            total_items,
            total_valuation,
            critical_items,
        })
    }

    #[instrument(skip(self))]
    pub async fn customer_summary(
        &self,
        ctx: TenantContext,
    ) -> Result<CustomerSummary, ServiceError> {
        let total_customers = Customers::find()
            .filter(customer::Column::TenantId.eq(ctx.tenant_id))
            .count(self.db.as_ref())
            .await?;
        // Anonymous walk-in sales carry no customer and stay out of the
        // ranking.
        let rows: Vec<(Option<Uuid>, Decimal)> = Sales::find()
            .filter(sale::Column::TenantId.eq(ctx.tenant_id))
            .filter(sale::Column::CustomerId.is_not_null())
            .select_only()
            .column(sale::Column::CustomerId)
            .column(sale::Column::Total)
            .into_tuple()
            .all(self.db.as_ref())
            .await?;

        let mut spending: HashMap<Uuid, (u64, Decimal)> = HashMap::new();
        for (customer_id, total) in rows {
            if let Some(id) = customer_id {
                let entry = spending.entry(id).or_insert((0, Decimal::ZERO));
                entry.0 += 1;
                entry.1 += total;
            }
        }
        let customers_with_sales = spending.len() as u64;

        let names: HashMap<Uuid, String> = Customers::find()
            .filter(customer::Column::TenantId.eq(ctx.tenant_id))
            .filter(customer::Column::Id.is_in(spending.keys().copied().collect::<Vec<_>>()))
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut top_customers: Vec<TopCustomer> = spending
            .into_iter()
            .map(|(id, (purchase_count, total_spent))| TopCustomer {
                customer_id: id,
                name: names.get(&id).cloned().unwrap_or_default(),
                purchase_count,
                total_spent,
            })
            .collect();
        top_customers.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
        top_customers.truncate(TOP_CUSTOMERS_LIMIT);

        Ok(CustomerSummary {
            total_customers,
            customers_with_sales,
            top_customers,
        })
    }

    /// Per-sale VAT book, oldest sale first. Totals are gross, so the net
    /// is total / (1 + rate) and the VAT is the remainder.
    #[instrument(skip(self))]
    pub async fn iva_book(
        &self,
        ctx: TenantContext,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<IvaBookEntry>, ServiceError> {
        let mut query = Sales::find()
            .filter(sale::Column::TenantId.eq(ctx.tenant_id))
            .order_by_asc(sale::Column::CreatedAt);
        if let Some(from) = from {
            query = query.filter(sale::Column::CreatedAt.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(sale::Column::CreatedAt.lte(to));
        }
        let sales = query.all(self.db.as_ref()).await?;

        let customer_ids: Vec<Uuid> = sales.iter().filter_map(|s| s.customer_id).collect();
        let names: HashMap<Uuid, String> = Customers::find()
            .filter(customer::Column::TenantId.eq(ctx.tenant_id))
            .filter(customer::Column::Id.is_in(customer_ids))
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let book: Vec<IvaBookEntry> = sales
            .into_iter()
            .map(|sale| {
                let net_amount = (sale.total / (Decimal::ONE + IVA_RATE)).round_dp(2);
                let iva_amount = sale.total - net_amount;
                let customer_name = sale
                    .customer_id
                    .and_then(|id| names.get(&id).cloned())
                    .unwrap_or_else(|| "Consumidor Final".to_string());
                let voucher = format!("FAC-{}", &sale.id.simple().to_string()[..8])
                    .to_uppercase();
                IvaBookEntry {
                    sale_id: sale.id,
                    date: sale.created_at,
                    customer_name,
                    voucher,
                    net_amount,
                    iva_amount,
                    total: sale.total,
                }
            })
            .collect();

        slog::debug!(self.logger, "iva book generated"; "entries" => book.len());
        Ok(book)
    }
}
