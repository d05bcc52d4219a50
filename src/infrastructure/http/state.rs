use crate::StockChecker;
use std::sync::Arc;

pub struct AppState {
    pub checker: StockChecker,
    /// Prefer the first `X-Forwarded-For` entry over the socket peer address.
    pub trust_proxy: bool,
}

impl AppState {
    pub fn new(checker: StockChecker, trust_proxy: bool) -> Arc<Self> {
        Arc::new(Self {
            checker,
            trust_proxy,
        })
    }
}
