//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use stockcheck::domain::error::DomainError;
use stockcheck::domain::ports::quote_provider::{Quote, QuoteProvider};
use stockcheck::domain::values::symbol::Symbol;
use stockcheck::{LookupOptions, StockChecker};

/// In-process quote source. Symbols without a price fail as a bad response;
/// symbols listed as down fail as unavailable.
pub struct FakeQuotes {
    prices: HashMap<String, f64>,
    down: Vec<String>,
    calls: AtomicUsize,
}

impl FakeQuotes {
    pub fn new(prices: &[(&str, f64)]) -> Self {
        Self {
            prices: prices.iter().map(|(s, p)| (s.to_string(), *p)).collect(),
            down: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_down(mut self, symbol: &str) -> Self {
        self.down.push(symbol.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteProvider for FakeQuotes {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.down.iter().any(|s| s == symbol.as_str()) {
            return Err(DomainError::ProviderUnavailable(format!("{symbol}: down")));
        }
        self.prices
            .get(symbol.as_str())
            .map(|price| Quote {
                symbol: symbol.clone(),
                price: *price,
            })
            .ok_or_else(|| DomainError::ProviderBadResponse(format!("{symbol}: no latestPrice")))
    }
}

pub fn default_quotes() -> FakeQuotes {
    FakeQuotes::new(&[("GOOG", 2801.12), ("MSFT", 410.5), ("AAPL", 189.3)])
}

pub fn setup() -> StockChecker {
    setup_with(Arc::new(default_quotes()), LookupOptions::default())
}

pub fn setup_with(provider: Arc<dyn QuoteProvider>, options: LookupOptions) -> StockChecker {
    StockChecker::with_providers(":memory:", provider, options).unwrap()
}
