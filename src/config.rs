use crate::domain::error::DomainError;
use crate::domain::values::failure_policy::ProviderFailurePolicy;
use crate::domain::values::identity::IdentityStrategy;
use crate::infrastructure::quotes::DEFAULT_QUOTE_API_BASE;
use std::{env, fmt::Display, str::FromStr};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub quote_api_base: String,
    pub identity_strategy: IdentityStrategy,
    pub provider_failure: ProviderFailurePolicy,
    pub trust_proxy: bool,
}

impl Config {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: try_load(&get, "HOST", "0.0.0.0")?,
            port: try_load(&get, "PORT", "3000")?,
            db_path: try_load(&get, "STOCK_DB", "./stocks.db")?,
            quote_api_base: try_load(&get, "QUOTE_API_BASE", DEFAULT_QUOTE_API_BASE)?,
            identity_strategy: try_load(&get, "IDENTITY_STRATEGY", "hash")?,
            provider_failure: try_load(&get, "PROVIDER_FAILURE", "fail")?,
            trust_proxy: try_load(&get, "TRUST_PROXY", "false")?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<F, T>(get: &F, key: &str, default: &str) -> Result<T, DomainError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    get(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .trim()
        .parse()
        .map_err(|e| DomainError::Config(format!("Invalid {key} value: {e}")))
}
