pub mod lookup_stock;
pub mod show_stock;
