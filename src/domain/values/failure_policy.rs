use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a lookup does when the quote provider fails for one symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderFailurePolicy {
    /// The whole request fails with a service error.
    #[default]
    Fail,
    /// That symbol's price becomes NaN (`null` in JSON); the request succeeds.
    Sentinel,
}

impl fmt::Display for ProviderFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderFailurePolicy::Fail => write!(f, "fail"),
            ProviderFailurePolicy::Sentinel => write!(f, "sentinel"),
        }
    }
}

impl FromStr for ProviderFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(ProviderFailurePolicy::Fail),
            "sentinel" => Ok(ProviderFailurePolicy::Sentinel),
            _ => Err(format!(
                "Unknown provider failure policy: '{s}'. Use 'fail' or 'sentinel'"
            )),
        }
    }
}
