pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::lookup_stock::{LookupRequest, LookupResponse, LookupStockUseCase};
use crate::application::show_stock::ShowStockUseCase;
use crate::config::Config;
use crate::domain::entities::stock_record::StockRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::quote_provider::QuoteProvider;
use crate::domain::ports::stock_repository::StockRepository;
use crate::domain::values::failure_policy::ProviderFailurePolicy;
use crate::domain::values::identity::IdentityStrategy;
use crate::infrastructure::quotes::proxy::ProxyQuoteClient;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::stock_repo::SqliteStockRepo;
use rusqlite::Connection;
use std::sync::Arc;
use tracing::info;

/// Policies applied to every lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupOptions {
    pub identity: IdentityStrategy,
    pub provider_failure: ProviderFailurePolicy,
}

pub struct StockChecker {
    lookup_uc: LookupStockUseCase,
    show_uc: ShowStockUseCase,
}

impl StockChecker {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let provider: Arc<dyn QuoteProvider> =
            Arc::new(ProxyQuoteClient::new(Some(config.quote_api_base.clone())));

        Self::with_providers(
            &config.db_path,
            provider,
            LookupOptions {
                identity: config.identity_strategy,
                provider_failure: config.provider_failure,
            },
        )
    }

    pub fn with_providers(
        db_path: &str,
        provider: Arc<dyn QuoteProvider>,
        options: LookupOptions,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::StoreUnavailable(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::StoreUnavailable(format!("WAL error: {e}")))?;

        run_migrations(&conn)?;

        info!(
            db = db_path,
            provider = provider.name(),
            identity = %options.identity,
            provider_failure = %options.provider_failure,
            "stock store ready"
        );

        let repo: Arc<dyn StockRepository> = Arc::new(SqliteStockRepo::new(conn));

        Ok(Self {
            lookup_uc: LookupStockUseCase::new(
                repo.clone(),
                provider,
                options.identity,
                options.provider_failure,
            ),
            show_uc: ShowStockUseCase::new(repo),
        })
    }

    pub async fn lookup(&self, request: LookupRequest) -> Result<LookupResponse, DomainError> {
        self.lookup_uc.execute(request).await
    }

    pub fn show(&self, symbol: &str) -> Result<Option<StockRecord>, DomainError> {
        self.show_uc.execute(symbol)
    }
}
