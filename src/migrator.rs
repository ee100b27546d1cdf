use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_tables::Migration),
            Box::new(m20250301_000002_create_inventory_tables::Migration),
            Box::new(m20250301_000003_create_sales_tables::Migration),
            Box::new(m20250301_000004_create_logistics_tables::Migration),
            Box::new(m20250301_000005_create_hr_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20250301_000001_create_users_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_users_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::TenantId).uuid().not_null())
                        .col(ColumnDef::new(Users::Name).string().not_null())
                        .col(
                            ColumnDef::new(Users::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(
                            ColumnDef::new(Users::Active)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RefreshTokens::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RefreshTokens::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RefreshTokens::UserId).uuid().not_null())
                        .col(
                            ColumnDef::new(RefreshTokens::TokenId)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(RefreshTokens::ExpiresAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RefreshTokens::Revoked)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(RefreshTokens::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_refresh_tokens_user_id")
                        .table(RefreshTokens::Table)
                        .col(RefreshTokens::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RefreshTokens::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Users {
        Table,
        Id,
        TenantId,
        Name,
        Email,
        PasswordHash,
        Active,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum RefreshTokens {
        Table,
        Id,
        UserId,
        TokenId,
        ExpiresAt,
        Revoked,
        CreatedAt,
    }
}

mod m20250301_000002_create_inventory_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_inventory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryItems::TenantId).uuid().not_null())
                        .col(ColumnDef::new(InventoryItems::Name).string().not_null())
                        .col(ColumnDef::new(InventoryItems::Sku).string().not_null())
                        .col(
                            ColumnDef::new(InventoryItems::Stock)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::Price)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::CostPrice)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::MinStock)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::MaxStock)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InventoryItems::UpdatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // SKUs are unique per tenant, not globally
            manager
                .create_index(
                    Index::create()
                        .name("idx_inventory_items_tenant_sku")
                        .table(InventoryItems::Table)
                        .col(InventoryItems::TenantId)
                        .col(InventoryItems::Sku)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StockMovements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StockMovements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockMovements::TenantId).uuid().not_null())
                        .col(ColumnDef::new(StockMovements::ItemId).uuid().not_null())
                        .col(ColumnDef::new(StockMovements::ItemName).string().not_null())
                        .col(ColumnDef::new(StockMovements::Sku).string().not_null())
                        .col(
                            ColumnDef::new(StockMovements::Direction)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StockMovements::Reason).string().not_null())
                        .col(ColumnDef::new(StockMovements::Quantity).decimal().not_null())
                        .col(ColumnDef::new(StockMovements::Notes).string().null())
                        .col(ColumnDef::new(StockMovements::RecordedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(StockMovements::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_stock_movements_tenant_created")
                        .table(StockMovements::Table)
                        .col(StockMovements::TenantId)
                        .col(StockMovements::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StockMovements::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum InventoryItems {
        Table,
        Id,
        TenantId,
        Name,
        Sku,
        Stock,
        Price,
        CostPrice,
        MinStock,
        MaxStock,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum StockMovements {
        Table,
        Id,
        TenantId,
        ItemId,
        ItemName,
        Sku,
        Direction,
        Reason,
        Quantity,
        Notes,
        RecordedBy,
        CreatedAt,
    }
}

mod m20250301_000003_create_sales_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_sales_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::TenantId).uuid().not_null())
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::TaxId).string().null())
                        .col(ColumnDef::new(Customers::Email).string().null())
                        .col(ColumnDef::new(Customers::Phone).string().null())
                        .col(ColumnDef::new(Customers::Address).string().null())
                        .col(ColumnDef::new(Customers::CreatedAt).timestamp().not_null())
                        .col(ColumnDef::new(Customers::UpdatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CashSessions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CashSessions::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CashSessions::TenantId).uuid().not_null())
                        .col(ColumnDef::new(CashSessions::OpenedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(CashSessions::OpeningAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CashSessions::CashTotal)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(CashSessions::OpenedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CashSessions::ClosedAt).timestamp().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Sales::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Sales::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Sales::TenantId).uuid().not_null())
                        .col(ColumnDef::new(Sales::Total).decimal().not_null().default(0))
                        .col(ColumnDef::new(Sales::PaymentMethod).string().not_null())
                        .col(ColumnDef::new(Sales::CashierId).uuid().not_null())
                        .col(ColumnDef::new(Sales::CustomerId).uuid().null())
                        .col(ColumnDef::new(Sales::CashSessionId).uuid().null())
                        .col(ColumnDef::new(Sales::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_sales_tenant_created")
                        .table(Sales::Table)
                        .col(Sales::TenantId)
                        .col(Sales::CreatedAt)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SaleLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SaleLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(SaleLines::SaleId).uuid().not_null())
                        .col(ColumnDef::new(SaleLines::ItemId).uuid().not_null())
                        .col(ColumnDef::new(SaleLines::Name).string().not_null())
                        .col(ColumnDef::new(SaleLines::Sku).string().not_null())
                        .col(ColumnDef::new(SaleLines::Quantity).decimal().not_null())
                        .col(ColumnDef::new(SaleLines::UnitPrice).decimal().not_null())
                        .col(ColumnDef::new(SaleLines::LineTotal).decimal().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_sale_lines_sale_id")
                        .table(SaleLines::Table)
                        .col(SaleLines::SaleId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SaleLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Sales::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CashSessions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Customers {
        Table,
        Id,
        TenantId,
        Name,
        TaxId,
        Email,
        Phone,
        Address,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum CashSessions {
        Table,
        Id,
        TenantId,
        OpenedBy,
        OpeningAmount,
        CashTotal,
        OpenedAt,
        ClosedAt,
    }

    #[derive(DeriveIden)]
    enum Sales {
        Table,
        Id,
        TenantId,
        Total,
        PaymentMethod,
        CashierId,
        CustomerId,
        CashSessionId,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum SaleLines {
        Table,
        Id,
        SaleId,
        ItemId,
        Name,
        Sku,
        Quantity,
        UnitPrice,
        LineTotal,
    }
}

mod m20250301_000004_create_logistics_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000004_create_logistics_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Drivers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Drivers::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Drivers::TenantId).uuid().not_null())
                        .col(ColumnDef::new(Drivers::Name).string().not_null())
                        .col(ColumnDef::new(Drivers::Vehicle).string().not_null())
                        .col(ColumnDef::new(Drivers::Latitude).double().not_null())
                        .col(ColumnDef::new(Drivers::Longitude).double().not_null())
                        .col(
                            ColumnDef::new(Drivers::CurrentStopIndex)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Drivers::IsMoving)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Drivers::CreatedAt).timestamp().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DeliveryStops::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DeliveryStops::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(DeliveryStops::TenantId).uuid().not_null())
                        .col(ColumnDef::new(DeliveryStops::Address).string().not_null())
                        .col(ColumnDef::new(DeliveryStops::Latitude).double().not_null())
                        .col(ColumnDef::new(DeliveryStops::Longitude).double().not_null())
                        .col(ColumnDef::new(DeliveryStops::Status).string().not_null())
                        .col(ColumnDef::new(DeliveryStops::DriverId).uuid().null())
                        .col(
                            ColumnDef::new(DeliveryStops::RoutePosition)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DeliveryStops::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_delivery_stops_tenant_status")
                        .table(DeliveryStops::Table)
                        .col(DeliveryStops::TenantId)
                        .col(DeliveryStops::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DeliveryStops::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Drivers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Drivers {
        Table,
        Id,
        TenantId,
        Name,
        Vehicle,
        Latitude,
        Longitude,
        CurrentStopIndex,
        IsMoving,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum DeliveryStops {
        Table,
        Id,
        TenantId,
        Address,
        Latitude,
        Longitude,
        Status,
        DriverId,
        RoutePosition,
        CreatedAt,
    }
}

mod m20250301_000005_create_hr_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000005_create_hr_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Employees::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Employees::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Employees::TenantId).uuid().not_null())
                        .col(ColumnDef::new(Employees::Name).string().not_null())
                        .col(ColumnDef::new(Employees::Email).string().not_null())
                        .col(ColumnDef::new(Employees::Role).string().not_null())
                        .col(ColumnDef::new(Employees::Department).string().not_null())
                        .col(ColumnDef::new(Employees::Status).string().not_null())
                        .col(
                            ColumnDef::new(Employees::StartDate)
                                .timestamp()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Employees::VacationDays)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Employees::SickDays)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Employees::CreatedAt)
                                .timestamp()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_employees_tenant_name")
                        .table(Employees::Table)
                        .col(Employees::TenantId)
                        .col(Employees::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Employees::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Employees {
        Table,
        Id,
        TenantId,
        Name,
        Email,
        Role,
        Department,
        Status,
        StartDate,
        VacationDays,
        SickDays,
        CreatedAt,
    }
}
