pub mod migrations;
pub mod stock_repo;
