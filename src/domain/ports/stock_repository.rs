use crate::domain::entities::stock_record::StockRecord;
use crate::domain::error::DomainError;
use crate::domain::values::identity::IdentityToken;
use crate::domain::values::symbol::Symbol;

/// Durable mapping from ticker symbol to its like state.
///
/// Implementations are blocking; async callers are expected to move calls onto
/// a blocking thread.
pub trait StockRepository: Send + Sync {
    /// Returns the record for `symbol`, persisting an empty one if absent.
    fn find_or_create(&self, symbol: &Symbol) -> Result<StockRecord, DomainError>;

    /// Adds `identity` to the likers of `symbol`. A no-op when already present.
    fn record_like(
        &self,
        symbol: &Symbol,
        identity: &IdentityToken,
    ) -> Result<StockRecord, DomainError>;

    /// Read-only lookup that never creates a record.
    fn get(&self, symbol: &Symbol) -> Result<Option<StockRecord>, DomainError>;
}
