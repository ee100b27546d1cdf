use crate::{
    auth::TenantContext,
    entities::{
        delivery_stop::{self, Entity as DeliveryStops, StopStatus},
        driver::{self, Entity as Drivers},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::route::{self, GeoPoint},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Delivery planning: drivers, stops and greedy route sequencing.
#[derive(Clone)]
pub struct LogisticsService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
    logger: Logger,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStopInput {
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoutePlan {
    pub driver: driver::Model,
    pub stops: Vec<delivery_stop::Model>,
}

impl LogisticsService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender, logger: Logger) -> Self {
        Self {
            db,
            event_sender,
            logger,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_drivers(
        &self,
        ctx: TenantContext,
    ) -> Result<Vec<driver::Model>, ServiceError> {
        let drivers = Drivers::find()
            .filter(driver::Column::TenantId.eq(ctx.tenant_id))
            .order_by_asc(driver::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(drivers)
    }

    #[instrument(skip(self))]
    pub async fn list_stops(
        &self,
        ctx: TenantContext,
    ) -> Result<Vec<delivery_stop::Model>, ServiceError> {
        let stops = DeliveryStops::find()
            .filter(delivery_stop::Column::TenantId.eq(ctx.tenant_id))
            .order_by_asc(delivery_stop::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(stops)
    }

    #[instrument(skip(self, input))]
    pub async fn create_stop(
        &self,
        ctx: TenantContext,
        input: CreateStopInput,
    ) -> Result<delivery_stop::Model, ServiceError> {
        input.validate()?;
        if !(-90.0..=90.0).contains(&input.latitude)
            || !(-180.0..=180.0).contains(&input.longitude)
        {
            return Err(ServiceError::ValidationError(
                "Coordinates are out of range".into(),
            ));
        }

        let stop = delivery_stop::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(ctx.tenant_id),
            address: Set(input.address),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            status: Set(StopStatus::Pending),
            driver_id: Set(None),
            route_position: Set(None),
            created_at: Set(Utc::now()),
        }
        .insert(self.db.as_ref())
        .await?;

        self.event_sender
            .send(Event::StopCreated(stop.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(stop)
    }

    /// Seeds a small demo fleet around Buenos Aires. Idempotent: does nothing
    /// once the tenant already has drivers.
    #[instrument(skip(self))]
    pub async fn seed_fixtures(&self, ctx: TenantContext) -> Result<Vec<driver::Model>, ServiceError> {
        let existing = self.list_drivers(ctx).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let fixtures = [
            ("Carlos Gutierrez", "Moto Honda CG 150", -34.6037, -58.3816),
            ("Maria Lopez", "Fiat Fiorino", -34.5956, -58.3947),
        ];
        for (name, vehicle, lat, lng) in fixtures {
            driver::ActiveModel {
                id: Set(Uuid::new_v4()),
                tenant_id: Set(ctx.tenant_id),
                name: Set(name.to_string()),
                vehicle: Set(vehicle.to_string()),
                latitude: Set(lat),
                longitude: Set(lng),
                current_stop_index: Set(0),
                is_moving: Set(false),
                created_at: Set(Utc::now()),
            }
            .insert(self.db.as_ref())
            .await?;
        }

        slog::info!(self.logger, "logistics fixtures seeded"; "drivers" => fixtures.len());
        self.list_drivers(ctx).await
    }

    /// Assigns every unassigned pending stop to the driver, sequenced
    /// nearest-neighbor from the driver's current position.
    #[instrument(skip(self))]
    pub async fn assign_route(
        &self,
        ctx: TenantContext,
        driver_id: Uuid,
    ) -> Result<RoutePlan, ServiceError> {
        let driver = self.get_driver(ctx, driver_id).await?;

        let pending = DeliveryStops::find()
            .filter(delivery_stop::Column::TenantId.eq(ctx.tenant_id))
            .filter(delivery_stop::Column::Status.eq(StopStatus::Pending))
            .filter(delivery_stop::Column::DriverId.is_null())
            .all(self.db.as_ref())
            .await?;
        if pending.is_empty() {
            return Err(ServiceError::InvalidOperation(
                "No unassigned pending stops".into(),
            ));
        }

        let start = GeoPoint::new(driver.latitude, driver.longitude);
        let ordered = route::sequence_nearest_neighbor(start, pending, |stop| {
            GeoPoint::new(stop.latitude, stop.longitude)
        });

        let txn = self.db.begin().await?;
        let mut assigned = Vec::with_capacity(ordered.len());
        for (position, stop) in ordered.into_iter().enumerate() {
            let mut model: delivery_stop::ActiveModel = stop.into();
            model.driver_id = Set(Some(driver.id));
            model.status = Set(StopStatus::InProgress);
            model.route_position = Set(Some(position as i32));
            assigned.push(model.update(&txn).await?);
        }
        let mut driver_model: driver::ActiveModel = driver.into();
        driver_model.current_stop_index = Set(0);
        driver_model.is_moving = Set(false);
        let driver = driver_model.update(&txn).await?;
        txn.commit().await?;

        slog::info!(
            self.logger,
            "route assigned";
            "driver_id" => %driver.id,
            "stops" => assigned.len(),
        );
        self.event_sender
            .send(Event::RouteAssigned {
                driver_id: driver.id,
                stops: assigned.len(),
            })
            .await
            .map_err(ServiceError::EventError)?;

        Ok(RoutePlan {
            driver,
            stops: assigned,
        })
    }

    /// Marks the driver's current stop completed and advances to the next.
    #[instrument(skip(self))]
    pub async fn complete_stop(
        &self,
        ctx: TenantContext,
        driver_id: Uuid,
    ) -> Result<RoutePlan, ServiceError> {
        let driver = self.get_driver(ctx, driver_id).await?;

        let current = DeliveryStops::find()
            .filter(delivery_stop::Column::TenantId.eq(ctx.tenant_id))
            .filter(delivery_stop::Column::DriverId.eq(driver.id))
            .filter(delivery_stop::Column::Status.eq(StopStatus::InProgress))
            .filter(delivery_stop::Column::RoutePosition.eq(driver.current_stop_index))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| {
                ServiceError::InvalidOperation("Driver has no current stop".into())
            })?;

        let txn = self.db.begin().await?;
        let stop_id = current.id;
        let mut stop_model: delivery_stop::ActiveModel = current.into();
        stop_model.status = Set(StopStatus::Completed);
        stop_model.update(&txn).await?;

        let next_index = driver.current_stop_index + 1;
        let mut driver_model: driver::ActiveModel = driver.into();
        driver_model.current_stop_index = Set(next_index);
        driver_model.is_moving = Set(false);
        let driver = driver_model.update(&txn).await?;
        txn.commit().await?;

        self.event_sender
            .send(Event::StopCompleted {
                driver_id: driver.id,
                stop_id,
            })
            .await
            .map_err(ServiceError::EventError)?;

        let stops = self.driver_stops(ctx, driver.id).await?;
        Ok(RoutePlan { driver, stops })
    }

    /// Toggles whether the driver is en route to their current stop. Only
    /// meaningful while a route is in progress.
    #[instrument(skip(self))]
    pub async fn toggle_movement(
        &self,
        ctx: TenantContext,
        driver_id: Uuid,
    ) -> Result<driver::Model, ServiceError> {
        let driver = self.get_driver(ctx, driver_id).await?;

        let remaining = DeliveryStops::find()
            .filter(delivery_stop::Column::TenantId.eq(ctx.tenant_id))
            .filter(delivery_stop::Column::DriverId.eq(driver.id))
            .filter(delivery_stop::Column::Status.eq(StopStatus::InProgress))
            .count(self.db.as_ref())
            .await?;
        if remaining == 0 {
            return Err(ServiceError::InvalidOperation(
                "Driver has no route in progress".into(),
            ));
        }

        let moving = !driver.is_moving;
        let mut model: driver::ActiveModel = driver.into();
        model.is_moving = Set(moving);
        let driver = model.update(self.db.as_ref()).await?;

        Ok(driver)
    }

    async fn get_driver(
        &self,
        ctx: TenantContext,
        id: Uuid,
    ) -> Result<driver::Model, ServiceError> {
        Drivers::find_by_id(id)
            .filter(driver::Column::TenantId.eq(ctx.tenant_id))
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Driver {} not found", id)))
    }

    async fn driver_stops(
        &self,
        ctx: TenantContext,
        driver_id: Uuid,
    ) -> Result<Vec<delivery_stop::Model>, ServiceError> {
        let stops = DeliveryStops::find()
            .filter(delivery_stop::Column::TenantId.eq(ctx.tenant_id))
            .filter(delivery_stop::Column::DriverId.eq(driver_id))
            .order_by_asc(delivery_stop::Column::RoutePosition)
            .all(self.db.as_ref())
            .await?;
        Ok(stops)
    }
}
