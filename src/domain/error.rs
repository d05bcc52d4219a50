use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Quote provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Quote provider bad response: {0}")]
    ProviderBadResponse(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl DomainError {
    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::InvalidInput(_))
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::StoreUnavailable(e.to_string())
    }
}
