use crate::domain::entities::stock_record::StockRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::stock_repository::StockRepository;
use crate::domain::values::symbol::Symbol;
use std::sync::Arc;

pub struct ShowStockUseCase {
    repo: Arc<dyn StockRepository>,
}

impl ShowStockUseCase {
    pub fn new(repo: Arc<dyn StockRepository>) -> Self {
        Self { repo }
    }

    pub fn execute(&self, symbol: &str) -> Result<Option<StockRecord>, DomainError> {
        let symbol = Symbol::new(symbol).map_err(DomainError::InvalidInput)?;
        self.repo.get(&symbol)
    }
}
