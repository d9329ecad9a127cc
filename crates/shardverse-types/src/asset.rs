//! Digital asset identifiers
//!
//! An asset id is minted exactly once and is owned by exactly one avatar for
//! the rest of the engine's lifetime. The owner map itself lives in the
//! engine's asset ledger.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a mintable, non-fungible asset
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    /// Create a new asset ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random asset ID
    pub fn generate() -> Self {
        Self(format!("asset-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id() {
        assert_ne!(AssetId::generate(), AssetId::generate());
        assert_eq!(AssetId::new("asset-dragon-bike").as_str(), "asset-dragon-bike");
    }
}
