pub mod cash_session;
pub mod customer;
pub mod delivery_stop;
pub mod driver;
pub mod employee;
pub mod inventory_item;
pub mod sale;
pub mod sale_line;
pub mod stock_movement;
