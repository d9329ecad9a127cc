//! The world-state engine
//!
//! [`WorldState`] owns every subsystem and is the only mutation path into
//! them. Each public operation validates fully before it commits, so a caller
//! observes either the whole effect or none of it. One instance per world;
//! independent worlds coexist freely.

use crate::asset_ledger::AssetLedger;
use crate::avatar_directory::AvatarDirectory;
use crate::event_scheduler::EventScheduler;
use crate::quest_log::QuestLog;
use crate::shard_registry::ShardRegistry;
use crate::social_graph::SocialGraph;
use crate::travel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shardverse_types::asset::AssetId;
use shardverse_types::avatar::{AvatarId, AvatarProgress, AvatarState};
use shardverse_types::config::WorldConfig;
use shardverse_types::errors::WorldResult;
use shardverse_types::event::TimeboxedEvent;
use shardverse_types::quest::{Quest, QuestId};
use shardverse_types::social::{Party, PartyId};
use shardverse_types::world::{PortalLink, Shard, ShardId};
use std::collections::HashMap;

/// The complete state of one world instance
///
/// Serializable as a whole so that reporting collaborators can take and ship
/// snapshots; the engine itself never does I/O.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    config: WorldConfig,
    registry: ShardRegistry,
    avatars: AvatarDirectory,
    social: SocialGraph,
    ledger: AssetLedger,
    scheduler: EventScheduler,
    quests: QuestLog,
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldState {
    /// Create a world with the default configuration
    pub fn new() -> Self {
        Self::from_config(WorldConfig::default())
    }

    /// Create a world with the given configuration
    pub fn with_config(config: WorldConfig) -> WorldResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: WorldConfig) -> Self {
        tracing::info!("Creating world '{}'", config.world_name);
        Self {
            avatars: AvatarDirectory::new(config.progression.clone()),
            registry: ShardRegistry::new(),
            social: SocialGraph::new(),
            ledger: AssetLedger::new(),
            scheduler: EventScheduler::new(),
            quests: QuestLog::new(),
            config,
        }
    }

    /// This world's configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // =========================================================================
    // World registry
    // =========================================================================

    /// Register a shard
    pub fn register_shard(&mut self, shard: Shard) -> WorldResult<()> {
        self.registry.register_shard(shard)
    }

    /// Link a directed portal between two registered shards
    pub fn link_portal(&mut self, link: PortalLink) -> WorldResult<()> {
        self.registry.link_portal(link)
    }

    /// Get a shard by ID
    pub fn shard(&self, shard_id: &ShardId) -> Option<&Shard> {
        self.registry.shard(shard_id)
    }

    /// Avatar count per registered shard, zero-filled for empty shards
    pub fn shard_population(&self) -> HashMap<ShardId, usize> {
        let mut counts: HashMap<ShardId, usize> = self
            .registry
            .shard_ids()
            .map(|id| (id.clone(), 0))
            .collect();
        for avatar in self.avatars.avatars() {
            if let Some(count) = counts.get_mut(&avatar.shard_id) {
                *count += 1;
            }
        }
        counts
    }

    // =========================================================================
    // Avatar directory
    // =========================================================================

    /// Spawn an avatar into a registered shard
    pub fn spawn_avatar(&mut self, avatar: AvatarState) -> WorldResult<()> {
        self.registry.require_shard(&avatar.shard_id)?;
        self.avatars.spawn(avatar)
    }

    /// Get an avatar by ID
    pub fn avatar(&self, avatar_id: &AvatarId) -> Option<&AvatarState> {
        self.avatars.avatar(avatar_id)
    }

    /// Get an avatar's progression state
    pub fn avatar_progress(&self, avatar_id: &AvatarId) -> Option<&AvatarProgress> {
        self.avatars.progress(avatar_id)
    }

    /// Add cumulative experience; returns the level after the grant
    pub fn gain_experience(&mut self, avatar_id: &AvatarId, amount: u64) -> WorldResult<u32> {
        self.avatars.gain_experience(avatar_id, amount)
    }

    /// Grant activity experience boosted by live events
    ///
    /// The effective multiplier is the product of the multipliers of every
    /// live event whose active-shard set contains the avatar's current shard;
    /// the boosted amount truncates to whole experience points. Returns the
    /// amount actually granted.
    pub fn grant_activity_experience(
        &mut self,
        avatar_id: &AvatarId,
        base_experience: u64,
        now: DateTime<Utc>,
    ) -> WorldResult<u64> {
        let shard_id = self.avatars.require_avatar(avatar_id)?.shard_id.clone();
        let multiplier = self.scheduler.experience_multiplier_for(&shard_id, now);
        let effective = (base_experience as f64 * multiplier).trunc() as u64;

        self.avatars.gain_experience(avatar_id, effective)?;
        Ok(effective)
    }

    /// The `limit` highest-experience avatars, descending, ties by spawn order
    pub fn top_avatars_by_experience(&self, limit: usize) -> WorldResult<Vec<(AvatarId, u64)>> {
        self.avatars.top_by_experience(limit)
    }

    // =========================================================================
    // Social graph
    // =========================================================================

    /// Record a symmetric friendship between two spawned avatars
    pub fn add_friendship(&mut self, a: &AvatarId, b: &AvatarId) -> WorldResult<()> {
        self.avatars.require_avatar(a)?;
        self.avatars.require_avatar(b)?;
        self.social.add_friendship(a, b)
    }

    /// Whether two avatars are friends
    pub fn are_friends(&self, a: &AvatarId, b: &AvatarId) -> bool {
        self.social.are_friends(a, b)
    }

    /// Create a party containing only its leader
    pub fn create_party(&mut self, party_id: PartyId, leader: &AvatarId) -> WorldResult<()> {
        self.avatars.require_avatar(leader)?;
        self.social.create_party(party_id, leader)
    }

    /// Add a spawned avatar to a party, subject to the friendship gate
    pub fn add_party_member(&mut self, party_id: &PartyId, avatar_id: &AvatarId) -> WorldResult<()> {
        self.avatars.require_avatar(avatar_id)?;
        self.social.add_party_member(party_id, avatar_id)
    }

    /// Remove an avatar from a party; the last member leaving removes it
    pub fn leave_party(&mut self, party_id: &PartyId, avatar_id: &AvatarId) -> WorldResult<()> {
        self.social.leave_party(party_id, avatar_id)
    }

    /// Remove a party outright
    pub fn disband_party(&mut self, party_id: &PartyId) -> WorldResult<()> {
        self.social.disband_party(party_id)?;
        Ok(())
    }

    /// Get a party by ID
    pub fn party(&self, party_id: &PartyId) -> Option<&Party> {
        self.social.party(party_id)
    }

    // =========================================================================
    // Asset ledger
    // =========================================================================

    /// Mint an asset to a spawned avatar
    pub fn mint_asset(&mut self, asset_id: AssetId, owner: &AvatarId) -> WorldResult<()> {
        self.avatars.require_avatar(owner)?;
        self.ledger.mint(asset_id.clone(), owner.clone())?;
        self.avatars.insert_asset(owner, asset_id);
        Ok(())
    }

    /// Transfer a minted asset to a new owner
    ///
    /// A transfer to the current owner is an Ok no-op. Otherwise the old
    /// inventory, new inventory, and ledger record move together.
    pub fn transfer_asset(&mut self, asset_id: &AssetId, new_owner: &AvatarId) -> WorldResult<()> {
        self.avatars.require_avatar(new_owner)?;
        let current = self.ledger.require_owner(asset_id)?;
        if current == new_owner {
            return Ok(());
        }

        let previous = self.ledger.reassign(asset_id, new_owner.clone())?;
        self.avatars.remove_asset(&previous, asset_id);
        self.avatars.insert_asset(new_owner, asset_id.clone());
        Ok(())
    }

    /// Current owner of an asset, if minted
    pub fn asset_owner(&self, asset_id: &AssetId) -> Option<&AvatarId> {
        self.ledger.owner(asset_id)
    }

    // =========================================================================
    // Event scheduler
    // =========================================================================

    /// Schedule a time-boxed event over registered shards
    pub fn schedule_event(&mut self, event: TimeboxedEvent) -> WorldResult<()> {
        for shard_id in &event.active_shards {
            self.registry.require_shard(shard_id)?;
        }
        self.scheduler.schedule(event)
    }

    /// All events live at `now`
    pub fn live_events(&self, now: DateTime<Utc>) -> Vec<&TimeboxedEvent> {
        self.scheduler.live_events(now)
    }

    // =========================================================================
    // Travel
    // =========================================================================

    /// Move an avatar through a portal to another shard
    ///
    /// The effective level is `level_override` when given, else the avatar's
    /// stored progression level. On success the avatar lands at the
    /// destination origin; returns the destination id.
    pub fn travel(
        &mut self,
        avatar_id: &AvatarId,
        to_shard: &ShardId,
        level_override: Option<u32>,
    ) -> WorldResult<ShardId> {
        let from = self.avatars.require_avatar(avatar_id)?.shard_id.clone();
        self.registry.require_shard(to_shard)?;
        let level = match level_override {
            Some(level) => level,
            None => self.avatars.require_progress(avatar_id)?.level,
        };

        travel::check_route(&self.registry, avatar_id, &from, to_shard, level)?;

        self.avatars.relocate(avatar_id, to_shard.clone());
        tracing::info!("Avatar '{}' traveled {} -> {}", avatar_id, from, to_shard);
        Ok(to_shard.clone())
    }

    /// Move a whole party through portals to another shard, all-or-nothing
    ///
    /// Members are validated in ascending id order with their stored levels;
    /// the first route or level failure aborts the operation with no member
    /// moved. The destination must then hold its current population plus
    /// every member not already there. On success all members land at the
    /// destination origin; returns the member ids in ascending order.
    pub fn party_travel(
        &mut self,
        party_id: &PartyId,
        to_shard: &ShardId,
    ) -> WorldResult<Vec<AvatarId>> {
        let members: Vec<AvatarId> = self
            .social
            .require_party(party_id)?
            .members
            .iter()
            .cloned()
            .collect();
        let destination = self.registry.require_shard(to_shard)?.clone();

        // Validate every member before anything moves.
        let mut incoming = 0usize;
        for member in &members {
            let from = self.avatars.require_avatar(member)?.shard_id.clone();
            if &from == to_shard {
                continue;
            }
            let level = self.avatars.require_progress(member)?.level;
            if let Err(err) = travel::check_route(&self.registry, member, &from, to_shard, level) {
                tracing::warn!("Party '{}' travel to '{}' blocked: {}", party_id, to_shard, err);
                return Err(err);
            }
            incoming += 1;
        }

        let population = self.avatars.count_in_shard(to_shard);
        travel::check_destination_capacity(&destination, population, incoming)?;

        for member in &members {
            self.avatars.relocate(member, to_shard.clone());
        }
        tracing::info!(
            "Party '{}' ({} members) traveled to '{}'",
            party_id,
            members.len(),
            to_shard
        );
        Ok(members)
    }

    // =========================================================================
    // Quest log
    // =========================================================================

    /// Register a quest definition
    pub fn register_quest(&mut self, quest: Quest) -> WorldResult<()> {
        self.quests.register(quest)
    }

    /// Assign a registered quest to a spawned avatar
    pub fn assign_quest(&mut self, avatar_id: &AvatarId, quest_id: &QuestId) -> WorldResult<()> {
        self.avatars.require_avatar(avatar_id)?;
        self.quests.assign(avatar_id, quest_id)
    }

    /// Record progress on an avatar's active quest assignment
    pub fn record_quest_progress(
        &mut self,
        avatar_id: &AvatarId,
        quest_id: &QuestId,
        amount: u32,
    ) -> WorldResult<()> {
        self.avatars.require_avatar(avatar_id)?;
        self.quests.record_progress(avatar_id, quest_id, amount)
    }

    /// Complete a quest whose progress has reached the target
    ///
    /// Pays the quest's experience reward through the normal progression
    /// path. Returns whether the quest completed now.
    pub fn complete_quest(&mut self, avatar_id: &AvatarId, quest_id: &QuestId) -> WorldResult<bool> {
        self.avatars.require_avatar(avatar_id)?;
        match self.quests.complete(avatar_id, quest_id)? {
            Some(reward) => {
                self.avatars.gain_experience(avatar_id, reward)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// All quest ids the avatar has completed, in id order
    pub fn completed_quests(&self, avatar_id: &AvatarId) -> WorldResult<Vec<QuestId>> {
        self.avatars.require_avatar(avatar_id)?;
        Ok(self
            .quests
            .completed_quests(avatar_id)
            .map(|done| done.iter().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shardverse_types::errors::WorldError;

    fn world() -> WorldState {
        let mut world = WorldState::new();
        world.register_shard(Shard::new("hub", "Hub", 100, "city")).unwrap();
        world
            .register_shard(Shard::new("forest", "Verdant Rim", 40, "forest"))
            .unwrap();
        world
            .register_shard(Shard::new("arena", "Sky Arena", 20, "floating"))
            .unwrap();
        world.link_portal(PortalLink::new("hub", "forest", 1)).unwrap();
        world.link_portal(PortalLink::new("forest", "arena", 5)).unwrap();
        world.link_portal(PortalLink::new("hub", "arena", 5)).unwrap();
        world.spawn_avatar(AvatarState::new("ava-1", "hub")).unwrap();
        world.spawn_avatar(AvatarState::new("ava-2", "hub")).unwrap();
        world
    }

    #[test]
    fn test_spawn_requires_registered_shard() {
        let mut world = world();
        let result = world.spawn_avatar(AvatarState::new("ava-3", "void"));
        assert!(matches!(result, Err(WorldError::ShardNotFound(_))));
        assert!(world.avatar(&AvatarId::new("ava-3")).is_none());
    }

    #[test]
    fn test_shard_population_zero_fills() {
        let world = world();
        let population = world.shard_population();
        assert_eq!(population[&ShardId::new("hub")], 2);
        assert_eq!(population[&ShardId::new("forest")], 0);
        assert_eq!(population[&ShardId::new("arena")], 0);
    }

    #[test]
    fn test_friendship_requires_spawned_avatars() {
        let mut world = world();
        let result = world.add_friendship(&AvatarId::new("ava-1"), &AvatarId::new("ghost"));
        assert!(matches!(result, Err(WorldError::AvatarNotFound(_))));
    }

    #[test]
    fn test_transfer_requires_spawned_recipient() {
        let mut world = world();
        world.mint_asset(AssetId::new("asset-x"), &AvatarId::new("ava-1")).unwrap();

        let result = world.transfer_asset(&AssetId::new("asset-x"), &AvatarId::new("ghost"));
        assert!(matches!(result, Err(WorldError::AvatarNotFound(_))));
        // Failed transfer left the ledger and inventory alone.
        assert_eq!(world.asset_owner(&AssetId::new("asset-x")), Some(&AvatarId::new("ava-1")));
        assert!(world
            .avatar(&AvatarId::new("ava-1"))
            .unwrap()
            .inventory
            .contains(&AssetId::new("asset-x")));
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let mut world = world();
        world.mint_asset(AssetId::new("asset-x"), &AvatarId::new("ava-1")).unwrap();
        world
            .transfer_asset(&AssetId::new("asset-x"), &AvatarId::new("ava-1"))
            .unwrap();
        assert_eq!(world.asset_owner(&AssetId::new("asset-x")), Some(&AvatarId::new("ava-1")));
    }

    #[test]
    fn test_schedule_event_requires_registered_shards() {
        let mut world = world();
        let now = Utc::now();
        let result = world.schedule_event(
            TimeboxedEvent::new("surge", "Surge", now, now + Duration::minutes(5)).with_shard("void"),
        );
        assert!(matches!(result, Err(WorldError::ShardNotFound(_))));
        assert!(world.live_events(now).is_empty());
    }

    #[test]
    fn test_travel_uses_stored_level_without_override() {
        let mut world = world();
        // Fresh avatar is level 1: the hub -> arena portal needs 5.
        let result = world.travel(&AvatarId::new("ava-1"), &ShardId::new("arena"), None);
        assert!(matches!(result, Err(WorldError::InsufficientLevel { .. })));

        // 100 + 200 + 300 + 400 cumulative reaches level 5.
        world.gain_experience(&AvatarId::new("ava-1"), 1000).unwrap();
        world.travel(&AvatarId::new("ava-1"), &ShardId::new("arena"), None).unwrap();
        assert_eq!(
            world.avatar(&AvatarId::new("ava-1")).unwrap().shard_id,
            ShardId::new("arena")
        );
    }

    #[test]
    fn test_travel_resets_position_to_origin() {
        let mut world = world();
        world
            .spawn_avatar(
                AvatarState::new("ava-3", "hub")
                    .with_position(shardverse_types::avatar::Position::new(4.0, 2.0, 7.0)),
            )
            .unwrap();

        world
            .travel(&AvatarId::new("ava-3"), &ShardId::new("forest"), Some(1))
            .unwrap();
        let avatar = world.avatar(&AvatarId::new("ava-3")).unwrap();
        assert_eq!(avatar.position, shardverse_types::avatar::Position::ORIGIN);
    }

    #[test]
    fn test_party_travel_is_all_or_nothing() {
        let mut world = world();
        world.create_party(PartyId::new("party-1"), &AvatarId::new("ava-1")).unwrap();
        world
            .add_party_member(&PartyId::new("party-1"), &AvatarId::new("ava-2"))
            .unwrap();

        // ava-1 qualifies for the hub -> arena portal, ava-2 does not.
        world.gain_experience(&AvatarId::new("ava-1"), 1000).unwrap();
        let result = world.party_travel(&PartyId::new("party-1"), &ShardId::new("arena"));
        assert!(matches!(result, Err(WorldError::InsufficientLevel { .. })));

        // Nobody moved.
        assert_eq!(world.avatar(&AvatarId::new("ava-1")).unwrap().shard_id, ShardId::new("hub"));
        assert_eq!(world.avatar(&AvatarId::new("ava-2")).unwrap().shard_id, ShardId::new("hub"));

        world.gain_experience(&AvatarId::new("ava-2"), 1000).unwrap();
        let moved = world
            .party_travel(&PartyId::new("party-1"), &ShardId::new("arena"))
            .unwrap();
        assert_eq!(moved, vec![AvatarId::new("ava-1"), AvatarId::new("ava-2")]);
    }

    #[test]
    fn test_party_travel_checks_destination_capacity() {
        let mut world = world();
        world.register_shard(Shard::new("closet", "Closet", 1, "indoor")).unwrap();
        world.link_portal(PortalLink::new("hub", "closet", 1)).unwrap();

        world.create_party(PartyId::new("party-1"), &AvatarId::new("ava-1")).unwrap();
        world
            .add_party_member(&PartyId::new("party-1"), &AvatarId::new("ava-2"))
            .unwrap();

        let result = world.party_travel(&PartyId::new("party-1"), &ShardId::new("closet"));
        assert!(matches!(result, Err(WorldError::DestinationFull { max_players: 1, .. })));
        assert_eq!(world.shard_population()[&ShardId::new("closet")], 0);
    }

    #[test]
    fn test_quest_completion_awards_experience() {
        let mut world = world();
        world
            .register_quest(
                Quest::new("quest-meteor-sample", "Meteor Sampling", "collect")
                    .with_target_amount(2)
                    .with_reward_experience(150),
            )
            .unwrap();
        world
            .assign_quest(&AvatarId::new("ava-1"), &QuestId::new("quest-meteor-sample"))
            .unwrap();
        world
            .record_quest_progress(&AvatarId::new("ava-1"), &QuestId::new("quest-meteor-sample"), 2)
            .unwrap();

        assert!(world
            .complete_quest(&AvatarId::new("ava-1"), &QuestId::new("quest-meteor-sample"))
            .unwrap());
        let progress = world.avatar_progress(&AvatarId::new("ava-1")).unwrap();
        assert_eq!(progress.experience, 150);
        assert_eq!(progress.level, 2);
        assert_eq!(
            world.completed_quests(&AvatarId::new("ava-1")).unwrap(),
            vec![QuestId::new("quest-meteor-sample")]
        );
    }

    #[test]
    fn test_assign_quest_requires_known_quest() {
        let mut world = world();
        let result = world.assign_quest(&AvatarId::new("ava-1"), &QuestId::new("ghost"));
        assert!(matches!(result, Err(WorldError::QuestNotFound(_))));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut world = world();
        world.mint_asset(AssetId::new("asset-x"), &AvatarId::new("ava-1")).unwrap();
        world.gain_experience(&AvatarId::new("ava-1"), 250).unwrap();

        let json = serde_json::to_string(&world).unwrap();
        let restored: WorldState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.shard_population(), world.shard_population());
        assert_eq!(
            restored.avatar_progress(&AvatarId::new("ava-1")),
            world.avatar_progress(&AvatarId::new("ava-1"))
        );
        assert_eq!(restored.asset_owner(&AssetId::new("asset-x")), Some(&AvatarId::new("ava-1")));
    }
}
