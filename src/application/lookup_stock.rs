use crate::domain::entities::stock_record::StockRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::quote_provider::QuoteProvider;
use crate::domain::ports::stock_repository::StockRepository;
use crate::domain::values::failure_policy::ProviderFailurePolicy;
use crate::domain::values::identity::{IdentityStrategy, IdentityToken};
use crate::domain::values::symbol::Symbol;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info_span, warn, Instrument};

const MAX_SYMBOLS: usize = 2;

/// One price lookup, optionally liking every requested symbol.
#[derive(Debug, Clone, Default)]
pub struct LookupRequest {
    pub symbols: Vec<String>,
    pub like: bool,
    pub caller_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResponse {
    #[serde(rename = "stockData")]
    pub stock_data: StockData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StockData {
    Single(SingleStock),
    Pair([ComparedStock; 2]),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleStock {
    pub stock: String,
    /// NaN when the provider failed under the sentinel policy; serialized as `null`.
    pub price: f64,
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedStock {
    pub stock: String,
    pub price: f64,
    pub rel_likes: i64,
}

struct ResolvedStock {
    symbol: Symbol,
    price: f64,
    likes: u64,
}

pub struct LookupStockUseCase {
    repo: Arc<dyn StockRepository>,
    provider: Arc<dyn QuoteProvider>,
    identity: IdentityStrategy,
    failure_policy: ProviderFailurePolicy,
}

impl LookupStockUseCase {
    pub fn new(
        repo: Arc<dyn StockRepository>,
        provider: Arc<dyn QuoteProvider>,
        identity: IdentityStrategy,
        failure_policy: ProviderFailurePolicy,
    ) -> Self {
        Self {
            repo,
            provider,
            identity,
            failure_policy,
        }
    }

    pub async fn execute(&self, request: LookupRequest) -> Result<LookupResponse, DomainError> {
        let span = info_span!(
            "lookup",
            request_id = %uuid::Uuid::new_v4(),
            like = request.like
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: LookupRequest) -> Result<LookupResponse, DomainError> {
        let raw: Vec<&str> = request
            .symbols
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if raw.is_empty() {
            return Err(DomainError::InvalidInput("Stock parameter is required".into()));
        }
        if raw.len() > MAX_SYMBOLS {
            return Err(too_many_symbols());
        }

        let symbols = raw
            .into_iter()
            .map(Symbol::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DomainError::InvalidInput)?;

        let identity = self.identity.anonymize(&request.caller_address);

        let stock_data = match symbols.as_slice() {
            [only] => {
                let resolved = self.resolve(only, request.like, &identity).await?;
                StockData::Single(SingleStock {
                    stock: resolved.symbol.to_string(),
                    price: resolved.price,
                    likes: resolved.likes,
                })
            }
            [first, second] => {
                let (a, b) = tokio::try_join!(
                    self.resolve(first, request.like, &identity),
                    self.resolve(second, request.like, &identity),
                )?;
                StockData::Pair(compare(a, b))
            }
            _ => return Err(too_many_symbols()),
        };

        Ok(LookupResponse { stock_data })
    }

    async fn resolve(
        &self,
        symbol: &Symbol,
        like: bool,
        identity: &IdentityToken,
    ) -> Result<ResolvedStock, DomainError> {
        let record = self
            .load_record(symbol.clone(), like.then(|| identity.clone()))
            .await?;

        let price = match self.provider.fetch(symbol).await {
            Ok(quote) => quote.price,
            Err(e) => match self.failure_policy {
                ProviderFailurePolicy::Fail => return Err(e),
                ProviderFailurePolicy::Sentinel => {
                    warn!(%symbol, provider = self.provider.name(), error = %e, "quote failed, using sentinel price");
                    f64::NAN
                }
            },
        };

        Ok(ResolvedStock {
            symbol: symbol.clone(),
            price,
            likes: record.likes,
        })
    }

    /// Find-or-create plus the optional like, on the blocking pool.
    async fn load_record(
        &self,
        symbol: Symbol,
        like: Option<IdentityToken>,
    ) -> Result<StockRecord, DomainError> {
        let repo = self.repo.clone();
        tokio::task::spawn_blocking(move || {
            let record = repo.find_or_create(&symbol)?;
            match like {
                Some(identity) if !record.is_liked_by(&identity) => {
                    repo.record_like(&symbol, &identity)
                }
                _ => Ok(record),
            }
        })
        .await
        .map_err(|e| DomainError::StoreUnavailable(format!("Store task failed: {e}")))?
    }
}

fn too_many_symbols() -> DomainError {
    DomainError::InvalidInput("At most two stocks can be compared".into())
}

fn compare(a: ResolvedStock, b: ResolvedStock) -> [ComparedStock; 2] {
    let diff = a.likes as i64 - b.likes as i64;
    [
        ComparedStock {
            stock: a.symbol.to_string(),
            price: a.price,
            rel_likes: diff,
        },
        ComparedStock {
            stock: b.symbol.to_string(),
            price: b.price,
            rel_likes: -diff,
        },
    ]
}
