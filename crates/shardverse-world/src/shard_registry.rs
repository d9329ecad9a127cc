//! Shard catalog and portal graph
//!
//! Shards and portals are registered once at world-build time and are
//! immutable afterwards. Portal links are directional; the adjacency map is
//! keyed by origin shard and may hold several links to the same destination
//! with different unlock levels.

use serde::{Deserialize, Serialize};
use shardverse_types::errors::{WorldError, WorldResult};
use shardverse_types::world::{PortalLink, Shard, ShardId};
use std::collections::HashMap;

/// The catalog of shards and the directed portal graph connecting them
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShardRegistry {
    shards: HashMap<ShardId, Shard>,
    portals: HashMap<ShardId, Vec<PortalLink>>,
}

impl ShardRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shard
    pub fn register_shard(&mut self, shard: Shard) -> WorldResult<()> {
        if shard.max_players == 0 {
            return Err(WorldError::InvalidCapacity {
                shard_id: shard.id.clone(),
                max_players: shard.max_players,
            });
        }
        if self.shards.contains_key(&shard.id) {
            return Err(WorldError::ShardAlreadyExists(shard.id.clone()));
        }

        tracing::info!("Registered shard '{}' (capacity {})", shard.id, shard.max_players);
        let shard_id = shard.id.clone();
        self.shards.insert(shard_id.clone(), shard);
        self.portals.insert(shard_id, Vec::new());

        Ok(())
    }

    /// Link a directed portal between two registered shards
    pub fn link_portal(&mut self, link: PortalLink) -> WorldResult<()> {
        if !self.shards.contains_key(&link.from_shard) {
            return Err(WorldError::ShardNotFound(link.from_shard.clone()));
        }
        if !self.shards.contains_key(&link.to_shard) {
            return Err(WorldError::ShardNotFound(link.to_shard.clone()));
        }
        if link.unlock_level < 1 {
            return Err(WorldError::InvalidUnlockLevel {
                from: link.from_shard.clone(),
                to: link.to_shard.clone(),
                unlock_level: link.unlock_level,
            });
        }
        if let Some(multiplier) = link.experience_multiplier {
            if multiplier < 1.0 {
                return Err(WorldError::InvalidMultiplier { multiplier });
            }
        }

        tracing::debug!(
            "Linked portal {} -> {} (unlock level {})",
            link.from_shard,
            link.to_shard,
            link.unlock_level
        );
        self.portals
            .entry(link.from_shard.clone())
            .or_default()
            .push(link);

        Ok(())
    }

    /// Get a shard by ID
    pub fn shard(&self, shard_id: &ShardId) -> Option<&Shard> {
        self.shards.get(shard_id)
    }

    /// Get a shard or fail with [`WorldError::ShardNotFound`]
    pub fn require_shard(&self, shard_id: &ShardId) -> WorldResult<&Shard> {
        self.shards
            .get(shard_id)
            .ok_or_else(|| WorldError::ShardNotFound(shard_id.clone()))
    }

    /// Whether a shard is registered
    pub fn contains(&self, shard_id: &ShardId) -> bool {
        self.shards.contains_key(shard_id)
    }

    /// All portal links leaving the given shard
    pub fn links_from(&self, shard_id: &ShardId) -> &[PortalLink] {
        self.portals.get(shard_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All registered shard IDs
    pub fn shard_ids(&self) -> impl Iterator<Item = &ShardId> {
        self.shards.keys()
    }

    /// All registered shards
    pub fn shards(&self) -> impl Iterator<Item = &Shard> {
        self.shards.values()
    }

    /// Number of registered shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}
