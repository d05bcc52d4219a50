use crate::domain::error::DomainError;
use crate::domain::values::symbol::Symbol;
use async_trait::async_trait;
use serde::Serialize;

/// A live price for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
}

/// Source of live stock prices.
///
/// Errors are always reported as `ProviderUnavailable` or `ProviderBadResponse`;
/// degrading to a sentinel price is the caller's decision.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, DomainError>;
}
