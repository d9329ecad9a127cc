//! Avatar identity, location, and progression types

use crate::asset::AssetId;
use crate::world::ShardId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for an avatar
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AvatarId(String);

impl AvatarId {
    /// Create a new avatar ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random avatar ID
    pub fn generate() -> Self {
        Self(format!("avatar-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AvatarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AvatarId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AvatarId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A point in shard-local space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// The zone entry point. Travel always lands here.
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a position
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Live state of a connected actor
///
/// `shard_id` always references a registered shard; the engine rejects spawns
/// into unknown shards and relocation only happens through travel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    /// Unique identifier
    pub id: AvatarId,
    /// Shard the avatar is currently located in
    pub shard_id: ShardId,
    /// Position within the current shard
    pub position: Position,
    /// Asset ids held by this avatar
    pub inventory: HashSet<AssetId>,
}

impl AvatarState {
    /// Create a new avatar at the origin of the given shard
    pub fn new(id: impl Into<AvatarId>, shard_id: impl Into<ShardId>) -> Self {
        Self {
            id: id.into(),
            shard_id: shard_id.into(),
            position: Position::ORIGIN,
            inventory: HashSet::new(),
        }
    }

    /// Set the spawn position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// Leveling state for an avatar
///
/// `experience` is the lifetime cumulative total and never decreases. The
/// level is recomputed from that total: reaching level N+1 consumes
/// `N * experience_per_level` from the running remainder, so feeding the same
/// total through many small grants or one large grant lands on the same level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarProgress {
    /// Current level (always >= 1)
    pub level: u32,
    /// Lifetime cumulative experience
    pub experience: u64,
}

impl Default for AvatarProgress {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
        }
    }
}

impl AvatarProgress {
    /// Fresh progression state: level 1, no experience
    pub fn new() -> Self {
        Self::default()
    }

    /// Add experience and recompute the level
    ///
    /// Returns the level after the grant.
    pub fn gain(&mut self, amount: u64, experience_per_level: u64) -> u32 {
        self.experience += amount;
        self.level = level_for_experience(self.experience, experience_per_level);
        self.level
    }
}

/// Level reached with the given lifetime experience total
///
/// Level N requires `N * experience_per_level` cumulative experience to reach
/// N+1; the level-up loop consumes that threshold from the remainder until it
/// no longer fits.
pub fn level_for_experience(total_experience: u64, experience_per_level: u64) -> u32 {
    if experience_per_level == 0 {
        return 1;
    }
    let mut level: u32 = 1;
    let mut remainder = total_experience;
    loop {
        let threshold = u64::from(level) * experience_per_level;
        if remainder < threshold {
            return level;
        }
        remainder -= threshold;
        level += 1;
    }
}
