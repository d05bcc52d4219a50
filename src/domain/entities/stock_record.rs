use crate::domain::values::identity::IdentityToken;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted like state for one ticker symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub symbol: String,
    pub likes: u64,
    pub likers: Vec<IdentityToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockRecord {
    pub fn new(symbol: String) -> Self {
        let now = Utc::now();
        Self {
            symbol,
            likes: 0,
            likers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_liked_by(&self, identity: &IdentityToken) -> bool {
        self.likers.contains(identity)
    }

    /// Adds `identity` to the likers. Returns false when it was already present.
    pub fn add_like(&mut self, identity: IdentityToken) -> bool {
        if self.is_liked_by(&identity) {
            return false;
        }
        self.likers.push(identity);
        self.likes = self.likers.len() as u64;
        self.updated_at = Utc::now();
        true
    }
}
