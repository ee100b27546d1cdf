//! Permission strings gating the HTTP surface. Checks are string matches on
//! the `permissions` claim; the `admin` role bypasses them entirely.

/// Permission string constants for compile-time safety
pub mod consts {
    // Inventory
    pub const INVENTORY_READ: &str = "inventory:read";
    pub const INVENTORY_MANAGE: &str = "inventory:manage";

    // Stock movements
    pub const STOCK_MOVEMENTS_READ: &str = "stock-movements:read";
    pub const STOCK_MOVEMENTS_CREATE: &str = "stock-movements:create";

    // Customers
    pub const CUSTOMERS_READ: &str = "customers:read";
    pub const CUSTOMERS_MANAGE: &str = "customers:manage";

    // Sales / checkout
    pub const SALES_READ: &str = "sales:read";
    pub const SALES_CREATE: &str = "sales:create";

    // Cash register sessions
    pub const CASH_SESSIONS_MANAGE: &str = "cash-sessions:manage";

    // Reports
    pub const REPORTS_READ: &str = "reports:read";

    // Logistics
    pub const LOGISTICS_READ: &str = "logistics:read";
    pub const LOGISTICS_MANAGE: &str = "logistics:manage";

    // Staff directory
    pub const HR_READ: &str = "hr:read";
    pub const HR_MANAGE: &str = "hr:manage";
}

/// Full permission set granted to a newly registered account. Accounts own
/// their tenant, so they start with every permission on it.
pub fn owner_permissions() -> Vec<String> {
    [
        consts::INVENTORY_READ,
        consts::INVENTORY_MANAGE,
        consts::STOCK_MOVEMENTS_READ,
        consts::STOCK_MOVEMENTS_CREATE,
        consts::CUSTOMERS_READ,
        consts::CUSTOMERS_MANAGE,
        consts::SALES_READ,
        consts::SALES_CREATE,
        consts::CASH_SESSIONS_MANAGE,
        consts::REPORTS_READ,
        consts::LOGISTICS_READ,
        consts::LOGISTICS_MANAGE,
        consts::HR_READ,
        consts::HR_MANAGE,
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}
