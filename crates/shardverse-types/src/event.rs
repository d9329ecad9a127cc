//! Time-boxed global events
//!
//! An event is live for the inclusive interval `[starts_at, ends_at]` and
//! applies its experience multiplier to the shards in its active set.
//! Liveness is a pure function of the queried instant; nothing is
//! pre-materialized.

use crate::world::ShardId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Unique identifier for an event
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Create a new event ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random event ID
    pub fn generate() -> Self {
        Self(format!("event-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A global live event scoped to a set of shards
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeboxedEvent {
    /// Unique identifier
    pub id: EventId,
    /// Display title
    pub title: String,
    /// Start of the live window (inclusive)
    pub starts_at: DateTime<Utc>,
    /// End of the live window (inclusive)
    pub ends_at: DateTime<Utc>,
    /// Shards the event is active in
    pub active_shards: HashSet<ShardId>,
    /// Experience multiplier applied while live (always >= 1.0)
    pub experience_multiplier: f64,
}

impl TimeboxedEvent {
    /// Create a new event with no active shards and a neutral multiplier
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            starts_at,
            ends_at,
            active_shards: HashSet::new(),
            experience_multiplier: 1.0,
        }
    }

    /// Add a shard to the active set
    pub fn with_shard(mut self, shard_id: impl Into<ShardId>) -> Self {
        self.active_shards.insert(shard_id.into());
        self
    }

    /// Set the experience multiplier
    pub fn with_experience_multiplier(mut self, multiplier: f64) -> Self {
        self.experience_multiplier = multiplier;
        self
    }

    /// Whether the event is live at `now` (both bounds inclusive)
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now <= self.ends_at
    }

    /// Whether the event is active in the given shard
    pub fn covers_shard(&self, shard_id: &ShardId) -> bool {
        self.active_shards.contains(shard_id)
    }
}
