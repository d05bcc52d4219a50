pub mod http;
pub mod quotes;
pub mod sqlite;
