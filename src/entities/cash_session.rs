use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A cash register shift. At most one open session (no `closed_at`) may
/// exist per cashier. `cash_total` accumulates cash-paid sale totals while
/// the session is open; `opening_amount` is the float counted at open.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "cash_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub opened_by: Uuid,
    pub opening_amount: Decimal,
    pub cash_total: Decimal,
    pub opened_at: DateTime<Utc>,
    #[sea_orm(nullable)]
    pub closed_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    /// Cash expected in the drawer: opening float plus cash sales.
    pub fn expected_cash(&self) -> Decimal {
        self.opening_amount + self.cash_total
    }
}
