pub mod cash_sessions;
pub mod common;
pub mod customers;
pub mod hr;
pub mod inventory;
pub mod logistics;
pub mod reports;
pub mod sales;
pub mod stock_movements;

use crate::{
    db::DbPool,
    events::EventSender,
    logging::component_logger,
    services::{
        CashSessionService, CheckoutService, CustomerService, HrService, InventoryService,
        LogisticsService, ReportsService, StockMovementService,
    },
};
use slog::Logger;
use std::sync::Arc;

pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub inventory: Arc<InventoryService>,
    pub stock_movements: Arc<StockMovementService>,
    pub customers: Arc<CustomerService>,
    pub checkout: Arc<CheckoutService>,
    pub cash_sessions: Arc<CashSessionService>,
    pub reports: Arc<ReportsService>,
    pub logistics: Arc<LogisticsService>,
    pub hr: Arc<HrService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>, event_sender: EventSender, logger: &Logger) -> Self {
        Self {
            inventory: Arc::new(InventoryService::new(db.clone(), event_sender.clone())),
            stock_movements: Arc::new(StockMovementService::new(
                db.clone(),
                event_sender.clone(),
            )),
            customers: Arc::new(CustomerService::new(db.clone(), event_sender.clone())),
            checkout: Arc::new(CheckoutService::new(
                db.clone(),
                event_sender.clone(),
                component_logger(logger, "checkout"),
            )),
            cash_sessions: Arc::new(CashSessionService::new(
                db.clone(),
                event_sender.clone(),
                component_logger(logger, "cash_sessions"),
            )),
            reports: Arc::new(ReportsService::new(
                db.clone(),
                component_logger(logger, "reports"),
            )),
            logistics: Arc::new(LogisticsService::new(
                db.clone(),
                event_sender,
                component_logger(logger, "logistics"),
            )),
            hr: Arc::new(HrService::new(db, component_logger(logger, "hr"))),
        }
    }
}
