pub mod proxy;

/// Quote proxy used when no `QUOTE_API_BASE` is configured.
pub const DEFAULT_QUOTE_API_BASE: &str =
    "https://stock-price-checker-proxy.freecodecamp.rocks/v1/stock";
