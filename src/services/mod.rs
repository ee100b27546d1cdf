pub mod cash_sessions;
pub mod checkout;
pub mod customers;
pub mod hr;
pub mod inventory;
pub mod logistics;
pub mod reports;
pub mod route;
pub mod stock_movements;

pub use cash_sessions::CashSessionService;
pub use checkout::CheckoutService;
pub use customers::CustomerService;
pub use hr::HrService;
pub use inventory::InventoryService;
pub use logistics::LogisticsService;
pub use reports::ReportsService;
pub use stock_movements::StockMovementService;
