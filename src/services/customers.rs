use crate::{
    auth::TenantContext,
    entities::customer::{self, Entity as Customers},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Customer directory service
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub tax_id: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCustomerInput {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Lists customers alphabetically with optional search across name,
    /// tax id and address.
    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        ctx: TenantContext,
        page: u64,
        limit: u64,
        search: Option<String>,
    ) -> Result<(Vec<customer::Model>, u64), ServiceError> {
        let mut query = Customers::find()
            .filter(customer::Column::TenantId.eq(ctx.tenant_id))
            .order_by_asc(customer::Column::Name);

        if let Some(term) = search.filter(|t| !t.trim().is_empty()) {
            let term = term.trim().to_string();
            query = query.filter(
                Condition::any()
                    .add(customer::Column::Name.contains(&term))
                    .add(customer::Column::TaxId.contains(&term))
                    .add(customer::Column::Address.contains(&term)),
            );
        }

        let paginator = query.paginate(self.db.as_ref(), limit.max(1));
        let total = paginator.num_items().await?;
        let customers = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((customers, total))
    }

    #[instrument(skip(self))]
    pub async fn get_customer(
        &self,
        ctx: TenantContext,
        id: Uuid,
    ) -> Result<customer::Model, ServiceError> {
        Customers::find_by_id(id)
            .filter(customer::Column::TenantId.eq(ctx.tenant_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer with ID {} not found", id)))
    }

    #[instrument(skip(self, input))]
    pub async fn create_customer(
        &self,
        ctx: TenantContext,
        input: CreateCustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        input.validate()?;

        let now = Utc::now();
        let created = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(ctx.tenant_id),
            name: Set(input.name.trim().to_string()),
            tax_id: Set(input.tax_id),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db.as_ref())
        .await?;

        info!("Created customer {}", created.id);
        self.event_sender
            .send(Event::CustomerCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update_customer(
        &self,
        ctx: TenantContext,
        id: Uuid,
        input: UpdateCustomerInput,
    ) -> Result<customer::Model, ServiceError> {
        let existing = self.get_customer(ctx, id).await?;

        if let Some(name) = &input.name {
            if name.trim().is_empty() {
                return Err(ServiceError::ValidationError("Name is required".into()));
            }
        }

        let mut model: customer::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(tax_id) = input.tax_id {
            model.tax_id = Set(Some(tax_id));
        }
        if let Some(email) = input.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = input.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(address) = input.address {
            model.address = Set(Some(address));
        }
        model.updated_at = Set(Utc::now());

        let updated = model.update(self.db.as_ref()).await?;

        self.event_sender
            .send(Event::CustomerUpdated(updated.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, ctx: TenantContext, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get_customer(ctx, id).await?;
        Customers::delete_by_id(existing.id)
            .exec(self.db.as_ref())
            .await?;

        info!("Deleted customer {}", existing.id);
        self.event_sender
            .send(Event::CustomerDeleted(existing.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }
}
