//! Shard and portal types
//!
//! The world is partitioned into shards. Avatars exist in shards and travel
//! between them through **directed, level-gated portals**. A return path must
//! be linked explicitly if it is wanted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a shard
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShardId(String);

impl ShardId {
    /// Create a new shard ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random shard ID
    pub fn generate() -> Self {
        Self(format!("shard-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ShardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ShardId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A zone instance hosted in the shardverse
///
/// The id is immutable after registration; there is no deregistration path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shard {
    /// Unique identifier
    pub id: ShardId,
    /// Display title
    pub title: String,
    /// Maximum number of avatars the shard can hold (always > 0)
    pub max_players: u32,
    /// Biome descriptor, e.g. "city" or "forest"
    pub biome: String,
}

impl Shard {
    /// Create a new shard
    pub fn new(
        id: impl Into<ShardId>,
        title: impl Into<String>,
        max_players: u32,
        biome: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            max_players,
            biome: biome.into(),
        }
    }
}

/// A directed travel edge between two shards
///
/// Passing through a portal requires the traveler's level to be at least
/// `unlock_level`. The optional experience multiplier is part of the portal
/// record; nothing in the core engine consumes it yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortalLink {
    /// Origin shard
    pub from_shard: ShardId,
    /// Destination shard
    pub to_shard: ShardId,
    /// Minimum level required to pass (always >= 1)
    pub unlock_level: u32,
    /// Optional experience multiplier carried by this route (>= 1.0 when set)
    pub experience_multiplier: Option<f64>,
}

impl PortalLink {
    /// Create a new portal link
    pub fn new(from: impl Into<ShardId>, to: impl Into<ShardId>, unlock_level: u32) -> Self {
        Self {
            from_shard: from.into(),
            to_shard: to.into(),
            unlock_level,
            experience_multiplier: None,
        }
    }

    /// Set the experience multiplier
    pub fn with_experience_multiplier(mut self, multiplier: f64) -> Self {
        self.experience_multiplier = Some(multiplier);
        self
    }

    /// Check whether this link leads to the given shard
    pub fn leads_to(&self, shard_id: &ShardId) -> bool {
        &self.to_shard == shard_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_id() {
        let id1 = ShardId::generate();
        let id2 = ShardId::generate();
        assert_ne!(id1, id2);

        let id3 = ShardId::new("hub");
        assert_eq!(id3.as_str(), "hub");
        assert_eq!(id3.to_string(), "hub");
    }

    #[test]
    fn test_shard_creation() {
        let shard = Shard::new("hub", "Hub", 100, "city");
        assert_eq!(shard.id, ShardId::new("hub"));
        assert_eq!(shard.title, "Hub");
        assert_eq!(shard.max_players, 100);
        assert_eq!(shard.biome, "city");
    }

    #[test]
    fn test_portal_link() {
        let link = PortalLink::new("hub", "forest", 1);
        assert!(link.leads_to(&ShardId::new("forest")));
        assert!(!link.leads_to(&ShardId::new("hub")));
        assert_eq!(link.experience_multiplier, None);

        let boosted = PortalLink::new("forest", "arena", 5).with_experience_multiplier(1.5);
        assert_eq!(boosted.experience_multiplier, Some(1.5));
    }

    #[test]
    fn test_serialization() {
        let shard = Shard::new("arena", "Sky Arena", 20, "floating");
        let json = serde_json::to_string(&shard).unwrap();
        let deserialized: Shard = serde_json::from_str(&json).unwrap();
        assert_eq!(shard, deserialized);
    }
}
