pub mod quote_provider;
pub mod stock_repository;
