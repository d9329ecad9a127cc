//! Time-boxed event scheduling
//!
//! Events are scheduled once; liveness is computed per query against the
//! inclusive `[starts_at, ends_at]` window. Shard-set validity against the
//! registry is checked by [`crate::WorldState`] before an event reaches the
//! scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shardverse_types::errors::{WorldError, WorldResult};
use shardverse_types::event::{EventId, TimeboxedEvent};
use shardverse_types::world::ShardId;
use std::collections::HashMap;

/// The schedule of global events
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventScheduler {
    events: HashMap<EventId, TimeboxedEvent>,
}

impl EventScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an event
    pub fn schedule(&mut self, event: TimeboxedEvent) -> WorldResult<()> {
        if self.events.contains_key(&event.id) {
            return Err(WorldError::EventAlreadyExists(event.id.clone()));
        }
        if event.starts_at > event.ends_at {
            return Err(WorldError::InvalidTimeRange {
                event_id: event.id.clone(),
            });
        }
        if event.experience_multiplier < 1.0 {
            return Err(WorldError::InvalidMultiplier {
                multiplier: event.experience_multiplier,
            });
        }

        tracing::info!(
            "Scheduled event '{}' over {} shard(s)",
            event.id,
            event.active_shards.len()
        );
        self.events.insert(event.id.clone(), event);

        Ok(())
    }

    /// Get an event by ID
    pub fn event(&self, event_id: &EventId) -> Option<&TimeboxedEvent> {
        self.events.get(event_id)
    }

    /// All events live at `now`
    pub fn live_events(&self, now: DateTime<Utc>) -> Vec<&TimeboxedEvent> {
        self.events.values().filter(|e| e.is_live(now)).collect()
    }

    /// Product of the multipliers of every live event covering the shard
    ///
    /// With no live coverage the multiplier is a neutral 1.0.
    pub fn experience_multiplier_for(&self, shard_id: &ShardId, now: DateTime<Utc>) -> f64 {
        self.events
            .values()
            .filter(|e| e.is_live(now) && e.covers_shard(shard_id))
            .map(|e| e.experience_multiplier)
            .product()
    }

    /// Number of scheduled events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}
