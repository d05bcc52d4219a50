use super::DEFAULT_QUOTE_API_BASE;
use crate::domain::error::DomainError;
use crate::domain::ports::quote_provider::{Quote, QuoteProvider};
use crate::domain::values::symbol::Symbol;
use async_trait::async_trait;
use tracing::debug;

/// Client for an IEX-style quote proxy: `GET {base}/{SYMBOL}/quote`.
///
/// One request per fetch; no retries and no timeout beyond reqwest's defaults.
pub struct ProxyQuoteClient {
    base_url: String,
    client: reqwest::Client,
}

impl ProxyQuoteClient {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_QUOTE_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(concat!("stockcheck/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn quote_url(&self, symbol: &Symbol) -> String {
        format!("{}/{}/quote", self.base_url, symbol)
    }
}

/// Extracts the numeric `latestPrice` from a quote body.
pub fn parse_latest_price(symbol: &Symbol, body: &str) -> Result<f64, DomainError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| DomainError::ProviderBadResponse(format!("{symbol}: not JSON ({e})")))?;

    value
        .get("latestPrice")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| DomainError::ProviderBadResponse(format!("{symbol}: no latestPrice")))
}

#[async_trait]
impl QuoteProvider for ProxyQuoteClient {
    fn name(&self) -> &str {
        "quote_proxy"
    }

    async fn fetch(&self, symbol: &Symbol) -> Result<Quote, DomainError> {
        let url = self.quote_url(symbol);
        debug!(%url, "fetching quote");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::ProviderUnavailable(format!("{symbol}: {e}")))?;

        if !resp.status().is_success() {
            return Err(DomainError::ProviderUnavailable(format!(
                "Quote API returned {} for {symbol}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::ProviderUnavailable(format!("{symbol}: {e}")))?;

        let price = parse_latest_price(symbol, &body)?;
        Ok(Quote {
            symbol: symbol.clone(),
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goog() -> Symbol {
        Symbol::new("GOOG").unwrap()
    }

    #[test]
    fn test_default_base_url() {
        let client = ProxyQuoteClient::new(None);
        assert_eq!(client.base_url(), DEFAULT_QUOTE_API_BASE);
        assert_eq!(client.name(), "quote_proxy");
    }

    #[test]
    fn test_quote_url_strips_trailing_slash() {
        let client = ProxyQuoteClient::new(Some("http://localhost:9000/v1/stock/".into()));
        assert_eq!(
            client.quote_url(&goog()),
            "http://localhost:9000/v1/stock/GOOG/quote"
        );
    }

    #[test]
    fn test_parse_latest_price() {
        let body = r#"{"symbol":"GOOG","latestPrice":2801.12,"change":3.1}"#;
        assert_eq!(parse_latest_price(&goog(), body).unwrap(), 2801.12);
    }

    #[test]
    fn test_parse_integer_price() {
        assert_eq!(parse_latest_price(&goog(), r#"{"latestPrice":100}"#).unwrap(), 100.0);
    }

    #[test]
    fn test_parse_non_json() {
        let err = parse_latest_price(&goog(), "<html>oops</html>").unwrap_err();
        assert!(matches!(err, DomainError::ProviderBadResponse(_)));
    }

    #[test]
    fn test_parse_missing_price() {
        for body in [r#""Unknown symbol""#, r#"{"symbol":"GOOG"}"#, r#"{"latestPrice":"12.5"}"#] {
            let err = parse_latest_price(&goog(), body).unwrap_err();
            assert!(matches!(err, DomainError::ProviderBadResponse(_)), "{body}");
        }
    }
}
