use crate::{
    auth::TenantContext,
    entities::employee::{self, Entity as Employees, EmployeeStatus},
    errors::ServiceError,
};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use slog::Logger;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Staff directory. Fixture-backed until a real HR integration lands; the
/// repository interface stays the same either way.
#[derive(Clone)]
pub struct HrService {
    db: Arc<DatabaseConnection>,
    logger: Logger,
}

impl HrService {
    pub fn new(db: Arc<DatabaseConnection>, logger: Logger) -> Self {
        Self { db, logger }
    }

    #[instrument(skip(self))]
    pub async fn list_employees(
        &self,
        ctx: TenantContext,
    ) -> Result<Vec<employee::Model>, ServiceError> {
        let employees = Employees::find()
            .filter(employee::Column::TenantId.eq(ctx.tenant_id))
            .order_by_asc(employee::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(employees)
    }

    /// Seeds a small demo roster. Idempotent: does nothing once the tenant
    /// already has employees.
    #[instrument(skip(self))]
    pub async fn seed_fixtures(
        &self,
        ctx: TenantContext,
    ) -> Result<Vec<employee::Model>, ServiceError> {
        let existing = self.list_employees(ctx).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let fixtures = [
            (
                "Ana Rodriguez",
                "ana.rodriguez@example.com",
                "admin",
                "Gerencia",
                EmployeeStatus::Active,
                1200,
                15,
                3,
            ),
            (
                "Carlos Gomez",
                "carlos.gomez@example.com",
                "cajero",
                "Ventas",
                EmployeeStatus::Active,
                800,
                10,
                1,
            ),
            (
                "Lucia Fernandez",
                "lucia.fernandez@example.com",
                "ventas",
                "Ventas",
                EmployeeStatus::Inactive,
                700,
                10,
                5,
            ),
            (
                "Marcos Herrera",
                "marcos.herrera@example.com",
                "empleado",
                "Logística",
                EmployeeStatus::Pending,
                5,
                0,
                0,
            ),
        ];
        for (name, email, role, department, status, days_ago, vacation, sick) in fixtures {
            employee::ActiveModel {
                id: Set(Uuid::new_v4()),
                tenant_id: Set(ctx.tenant_id),
                name: Set(name.to_string()),
                email: Set(email.to_string()),
                role: Set(role.to_string()),
                department: Set(department.to_string()),
                status: Set(status),
                start_date: Set(Utc::now() - Duration::days(days_ago)),
                vacation_days: Set(vacation),
                sick_days: Set(sick),
                created_at: Set(Utc::now()),
            }
            .insert(self.db.as_ref())
            .await?;
        }

        slog::info!(self.logger, "hr fixtures seeded"; "employees" => fixtures.len());
        self.list_employees(ctx).await
    }
}
