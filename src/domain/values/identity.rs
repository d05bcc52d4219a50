use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Anonymized caller identity, used only to deduplicate likes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Wraps an already-anonymized value, e.g. one read back from storage.
    pub fn from_raw(value: impl Into<String>) -> Self {
        IdentityToken(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a raw caller address is reduced to an [`IdentityToken`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityStrategy {
    /// First 128 bits of SHA-256 over the raw address, hex encoded.
    #[default]
    Hash,
    /// Zero the last IPv4 octet or the last five IPv6 segments.
    Truncate,
}

impl IdentityStrategy {
    pub fn anonymize(&self, raw_address: &str) -> IdentityToken {
        match self {
            IdentityStrategy::Hash => IdentityToken(hash_address(raw_address)),
            IdentityStrategy::Truncate => IdentityToken(truncate_address(raw_address)),
        }
    }
}

fn hash_address(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    digest[..16].iter().map(|b| format!("{b:02x}")).collect()
}

fn truncate_address(raw: &str) -> String {
    match raw.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => truncate_v4(v4).to_string(),
        Ok(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
            Some(v4) => truncate_v4(v4).to_string(),
            None => truncate_v6(v6).to_string(),
        },
        // Not an address: keep as-is so the mapping stays deterministic.
        Err(_) => raw.to_string(),
    }
}

fn truncate_v4(addr: Ipv4Addr) -> Ipv4Addr {
    let [a, b, c, _] = addr.octets();
    Ipv4Addr::new(a, b, c, 0)
}

fn truncate_v6(addr: Ipv6Addr) -> Ipv6Addr {
    let s = addr.segments();
    Ipv6Addr::new(s[0], s[1], s[2], 0, 0, 0, 0, 0)
}

impl fmt::Display for IdentityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityStrategy::Hash => write!(f, "hash"),
            IdentityStrategy::Truncate => write!(f, "truncate"),
        }
    }
}

impl FromStr for IdentityStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hash" => Ok(IdentityStrategy::Hash),
            "truncate" => Ok(IdentityStrategy::Truncate),
            _ => Err(format!(
                "Unknown identity strategy: '{s}'. Use 'hash' or 'truncate'"
            )),
        }
    }
}
