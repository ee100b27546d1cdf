use crate::{
    auth::TenantContext,
    entities::cash_session::{self, Entity as CashSessions},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// Cash register shifts: open with a counted float, accumulate cash sales,
/// close with the expected drawer total.
#[derive(Clone)]
pub struct CashSessionService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
    logger: Logger,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenSessionInput {
    pub opening_amount: Decimal,
}

impl CashSessionService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender, logger: Logger) -> Self {
        Self {
            db,
            event_sender,
            logger,
        }
    }

    /// Opens a session for the calling cashier. Rejected with a conflict
    /// while another of their sessions is still open.
    #[instrument(skip(self, input))]
    pub async fn open_session(
        &self,
        ctx: TenantContext,
        input: OpenSessionInput,
    ) -> Result<cash_session::Model, ServiceError> {
        if input.opening_amount < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Opening amount cannot be negative".into(),
            ));
        }

        let open = self.find_active(ctx).await?;
        if open.is_some() {
            return Err(ServiceError::Conflict(
                "A cash session is already open for this user".into(),
            ));
        }

        let session = cash_session::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(ctx.tenant_id),
            opened_by: Set(ctx.user_id),
            opening_amount: Set(input.opening_amount),
            cash_total: Set(Decimal::ZERO),
            opened_at: Set(Utc::now()),
            closed_at: Set(None),
        }
        .insert(self.db.as_ref())
        .await?;

        slog::info!(
            self.logger,
            "cash session opened";
            "session_id" => %session.id,
            "opening_amount" => %session.opening_amount,
        );
        self.event_sender
            .send(Event::CashSessionOpened(session.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(session)
    }

    /// The calling cashier's open session, if any.
    #[instrument(skip(self))]
    pub async fn find_active(
        &self,
        ctx: TenantContext,
    ) -> Result<Option<cash_session::Model>, ServiceError> {
        let session = CashSessions::find()
            .filter(cash_session::Column::TenantId.eq(ctx.tenant_id))
            .filter(cash_session::Column::OpenedBy.eq(ctx.user_id))
            .filter(cash_session::Column::ClosedAt.is_null())
            .one(self.db.as_ref())
            .await?;
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn get_session(
        &self,
        ctx: TenantContext,
        id: Uuid,
    ) -> Result<cash_session::Model, ServiceError> {
        CashSessions::find_by_id(id)
            .filter(cash_session::Column::TenantId.eq(ctx.tenant_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Cash session {} not found", id)))
    }

    /// Closes a session, freezing its totals.
    #[instrument(skip(self))]
    pub async fn close_session(
        &self,
        ctx: TenantContext,
        id: Uuid,
    ) -> Result<cash_session::Model, ServiceError> {
        let session = self.get_session(ctx, id).await?;
        if !session.is_open() {
            return Err(ServiceError::InvalidOperation(
                "Cash session is already closed".into(),
            ));
        }

        let expected = session.expected_cash();
        let mut model: cash_session::ActiveModel = session.into();
        model.closed_at = Set(Some(Utc::now()));
        let closed = model.update(self.db.as_ref()).await?;

        slog::info!(
            self.logger,
            "cash session closed";
            "session_id" => %closed.id,
            "expected_cash" => %expected,
        );
        self.event_sender
            .send(Event::CashSessionClosed(closed.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(closed)
    }

    /// Session history for the tenant, newest first.
    #[instrument(skip(self))]
    pub async fn list_sessions(
        &self,
        ctx: TenantContext,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<cash_session::Model>, u64), ServiceError> {
        let paginator = CashSessions::find()
            .filter(cash_session::Column::TenantId.eq(ctx.tenant_id))
            .order_by_desc(cash_session::Column::OpenedAt)
            .paginate(self.db.as_ref(), limit.max(1));
        let total = paginator.num_items().await?;
        let sessions = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((sessions, total))
    }
}
