//! # Shardverse World
//!
//! Synchronous world-state engine for the shardverse: shards and the portal
//! graph between them, connected avatars with level progression, friendships
//! and parties, a single-owner asset ledger, time-boxed events, and a quest
//! log.
//!
//! ## Contract
//!
//! Every public operation on [`WorldState`] is a single logical transaction:
//! it either fully succeeds or fails with one typed [`WorldError`] and leaves
//! no observable mutation behind. Nothing blocks, suspends, or touches I/O;
//! a host exposing the engine to concurrent callers must serialize access per
//! world instance.
//!
//! ## Components
//!
//! - [`WorldState`]: the engine, orchestrating all subsystems
//! - [`ShardRegistry`]: shard catalog and directed portal graph
//! - [`AvatarDirectory`]: avatar identity, location, inventory, progression
//! - [`SocialGraph`]: symmetric friendships and party membership
//! - [`AssetLedger`]: single-owner registry of minted asset ids
//! - [`EventScheduler`]: time-boxed events with experience multipliers
//! - [`QuestLog`]: quest registry, assignments, and completion tracking
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       WorldState                            │
//! │  ┌──────────────┐  ┌───────────────┐  ┌─────────────────┐   │
//! │  │ShardRegistry │  │AvatarDirectory│  │  SocialGraph    │   │
//! │  │(shards+ports)│  │(location+xp)  │  │(friends+parties)│   │
//! │  └──────────────┘  └───────────────┘  └─────────────────┘   │
//! │  ┌──────────────┐  ┌───────────────┐  ┌─────────────────┐   │
//! │  │ AssetLedger  │  │EventScheduler │  │    QuestLog     │   │
//! │  │(single owner)│  │(live windows) │  │(progress+done)  │   │
//! │  └──────────────┘  └───────────────┘  └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod asset_ledger;
pub mod avatar_directory;
pub mod event_scheduler;
pub mod quest_log;
pub mod shard_registry;
pub mod social_graph;
mod travel;
pub mod world_state;

// Re-export primary types
pub use asset_ledger::AssetLedger;
pub use avatar_directory::AvatarDirectory;
pub use event_scheduler::EventScheduler;
pub use quest_log::QuestLog;
pub use shard_registry::ShardRegistry;
pub use shardverse_types::errors::{WorldError, WorldResult};
pub use social_graph::SocialGraph;
pub use world_state::WorldState;

/// Prelude for convenient imports
pub mod prelude {
    //! Convenient re-exports for the Shardverse engine
    pub use super::asset_ledger::AssetLedger;
    pub use super::avatar_directory::AvatarDirectory;
    pub use super::event_scheduler::EventScheduler;
    pub use super::quest_log::QuestLog;
    pub use super::shard_registry::ShardRegistry;
    pub use super::social_graph::SocialGraph;
    pub use super::world_state::WorldState;

    // Re-export types from shardverse-types
    pub use shardverse_types::prelude::*;
}
