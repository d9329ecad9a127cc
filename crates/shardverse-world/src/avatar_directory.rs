//! Avatar identity, location, inventory, and progression
//!
//! The directory owns the avatar and progression maps. Shard validity of a
//! spawn is the caller's concern ([`crate::WorldState`] checks the registry
//! first); everything keyed purely by avatar id is enforced here.

use serde::{Deserialize, Serialize};
use shardverse_types::asset::AssetId;
use shardverse_types::avatar::{AvatarId, AvatarProgress, AvatarState, Position};
use shardverse_types::config::ProgressionConfig;
use shardverse_types::errors::{WorldError, WorldResult};
use shardverse_types::world::ShardId;
use std::collections::HashMap;

/// The directory of connected avatars and their leveling state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AvatarDirectory {
    avatars: HashMap<AvatarId, AvatarState>,
    progress: HashMap<AvatarId, AvatarProgress>,
    /// Spawn order, used to break ties when ranking by experience
    spawn_order: Vec<AvatarId>,
    progression: ProgressionConfig,
}

impl AvatarDirectory {
    /// Create an empty directory with the given progression curve
    pub fn new(progression: ProgressionConfig) -> Self {
        Self {
            avatars: HashMap::new(),
            progress: HashMap::new(),
            spawn_order: Vec::new(),
            progression,
        }
    }

    /// Add an avatar with fresh progression state
    pub fn spawn(&mut self, avatar: AvatarState) -> WorldResult<()> {
        if self.avatars.contains_key(&avatar.id) {
            return Err(WorldError::AvatarAlreadyExists(avatar.id.clone()));
        }

        tracing::info!("Spawned avatar '{}' in shard '{}'", avatar.id, avatar.shard_id);
        let avatar_id = avatar.id.clone();
        self.avatars.insert(avatar_id.clone(), avatar);
        self.progress.insert(avatar_id.clone(), AvatarProgress::new());
        self.spawn_order.push(avatar_id);

        Ok(())
    }

    /// Get an avatar by ID
    pub fn avatar(&self, avatar_id: &AvatarId) -> Option<&AvatarState> {
        self.avatars.get(avatar_id)
    }

    /// Get an avatar or fail with [`WorldError::AvatarNotFound`]
    pub fn require_avatar(&self, avatar_id: &AvatarId) -> WorldResult<&AvatarState> {
        self.avatars
            .get(avatar_id)
            .ok_or_else(|| WorldError::AvatarNotFound(avatar_id.clone()))
    }

    /// Whether an avatar is spawned
    pub fn contains(&self, avatar_id: &AvatarId) -> bool {
        self.avatars.contains_key(avatar_id)
    }

    /// Get an avatar's progression state
    pub fn progress(&self, avatar_id: &AvatarId) -> Option<&AvatarProgress> {
        self.progress.get(avatar_id)
    }

    /// Get progression state or fail with [`WorldError::AvatarNotFound`]
    pub fn require_progress(&self, avatar_id: &AvatarId) -> WorldResult<&AvatarProgress> {
        self.progress
            .get(avatar_id)
            .ok_or_else(|| WorldError::AvatarNotFound(avatar_id.clone()))
    }

    /// Add cumulative experience and recompute the level
    ///
    /// Returns the level after the grant.
    pub fn gain_experience(&mut self, avatar_id: &AvatarId, amount: u64) -> WorldResult<u32> {
        let progress = self
            .progress
            .get_mut(avatar_id)
            .ok_or_else(|| WorldError::AvatarNotFound(avatar_id.clone()))?;

        let before = progress.level;
        let after = progress.gain(amount, self.progression.experience_per_level);
        if after > before {
            tracing::info!("Avatar '{}' reached level {}", avatar_id, after);
        }
        Ok(after)
    }

    /// The `limit` highest-experience avatars, descending
    ///
    /// Ties keep spawn order. Fails with [`WorldError::InvalidLimit`] when
    /// `limit` is zero.
    pub fn top_by_experience(&self, limit: usize) -> WorldResult<Vec<(AvatarId, u64)>> {
        if limit == 0 {
            return Err(WorldError::InvalidLimit { limit });
        }

        let mut ranked: Vec<(AvatarId, u64)> = self
            .spawn_order
            .iter()
            .filter_map(|id| self.progress.get(id).map(|p| (id.clone(), p.experience)))
            .collect();
        // Stable sort over spawn order keeps insertion order for ties.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);

        Ok(ranked)
    }

    /// Move an avatar to a shard, resetting its position to the origin
    ///
    /// The destination must already be validated; this is the commit half of
    /// a travel operation.
    pub(crate) fn relocate(&mut self, avatar_id: &AvatarId, to_shard: ShardId) {
        if let Some(avatar) = self.avatars.get_mut(avatar_id) {
            avatar.shard_id = to_shard;
            avatar.position = Position::ORIGIN;
        }
    }

    /// Insert an asset into an avatar's inventory
    pub(crate) fn insert_asset(&mut self, avatar_id: &AvatarId, asset_id: AssetId) {
        if let Some(avatar) = self.avatars.get_mut(avatar_id) {
            avatar.inventory.insert(asset_id);
        }
    }

    /// Remove an asset from an avatar's inventory
    pub(crate) fn remove_asset(&mut self, avatar_id: &AvatarId, asset_id: &AssetId) {
        if let Some(avatar) = self.avatars.get_mut(avatar_id) {
            avatar.inventory.remove(asset_id);
        }
    }

    /// Number of avatars currently located in the given shard
    pub fn count_in_shard(&self, shard_id: &ShardId) -> usize {
        self.avatars.values().filter(|a| &a.shard_id == shard_id).count()
    }

    /// All spawned avatars
    pub fn avatars(&self) -> impl Iterator<Item = &AvatarState> {
        self.avatars.values()
    }

    /// Number of spawned avatars
    pub fn avatar_count(&self) -> usize {
        self.avatars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shardverse_types::avatar::level_for_experience;

    fn directory() -> AvatarDirectory {
        let mut directory = AvatarDirectory::new(ProgressionConfig::default());
        directory.spawn(AvatarState::new("ava-1", "hub")).unwrap();
        directory.spawn(AvatarState::new("ava-2", "hub")).unwrap();
        directory
    }

    #[test]
    fn test_spawn_rejects_duplicates() {
        let mut directory = directory();
        let result = directory.spawn(AvatarState::new("ava-1", "forest"));
        assert!(matches!(result, Err(WorldError::AvatarAlreadyExists(_))));
        assert_eq!(directory.avatar_count(), 2);
    }

    #[test]
    fn test_fresh_progress_starts_at_level_one() {
        let directory = directory();
        let progress = directory.progress(&AvatarId::new("ava-1")).unwrap();
        assert_eq!(progress.level, 1);
        assert_eq!(progress.experience, 0);
    }

    #[test]
    fn test_gain_experience_levels_up() {
        let mut directory = directory();
        let level = directory.gain_experience(&AvatarId::new("ava-1"), 300).unwrap();
        assert_eq!(level, 3);

        let progress = directory.progress(&AvatarId::new("ava-1")).unwrap();
        assert_eq!(progress.experience, 300);
    }

    #[test]
    fn test_gain_experience_unknown_avatar() {
        let mut directory = directory();
        let result = directory.gain_experience(&AvatarId::new("ghost"), 10);
        assert!(matches!(result, Err(WorldError::AvatarNotFound(_))));
    }

    #[test]
    fn test_top_by_experience_ranks_descending() {
        let mut directory = directory();
        directory.gain_experience(&AvatarId::new("ava-1"), 120).unwrap();
        directory.gain_experience(&AvatarId::new("ava-2"), 260).unwrap();

        let top = directory.top_by_experience(1).unwrap();
        assert_eq!(top, vec![(AvatarId::new("ava-2"), 260)]);

        let all = directory.top_by_experience(10).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].0, AvatarId::new("ava-2"));
    }

    #[test]
    fn test_top_by_experience_ties_keep_spawn_order() {
        let directory = directory();
        let top = directory.top_by_experience(2).unwrap();
        assert_eq!(top[0].0, AvatarId::new("ava-1"));
        assert_eq!(top[1].0, AvatarId::new("ava-2"));
    }

    #[test]
    fn test_top_by_experience_rejects_zero_limit() {
        let directory = directory();
        assert!(matches!(
            directory.top_by_experience(0),
            Err(WorldError::InvalidLimit { limit: 0 })
        ));
    }

    #[test]
    fn test_count_in_shard() {
        let mut directory = directory();
        assert_eq!(directory.count_in_shard(&ShardId::new("hub")), 2);

        directory.relocate(&AvatarId::new("ava-1"), ShardId::new("forest"));
        assert_eq!(directory.count_in_shard(&ShardId::new("hub")), 1);
        assert_eq!(directory.count_in_shard(&ShardId::new("forest")), 1);
    }

    proptest! {
        #[test]
        fn property_experience_is_order_independent(grants in proptest::collection::vec(0u64..500, 0..20)) {
            let mut incremental = AvatarDirectory::new(ProgressionConfig::default());
            incremental.spawn(AvatarState::new("ava-1", "hub")).unwrap();
            for grant in &grants {
                incremental.gain_experience(&AvatarId::new("ava-1"), *grant).unwrap();
            }

            let total: u64 = grants.iter().sum();
            let mut lump = AvatarDirectory::new(ProgressionConfig::default());
            lump.spawn(AvatarState::new("ava-1", "hub")).unwrap();
            lump.gain_experience(&AvatarId::new("ava-1"), total).unwrap();

            let a = incremental.progress(&AvatarId::new("ava-1")).unwrap();
            let b = lump.progress(&AvatarId::new("ava-1")).unwrap();
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.level, level_for_experience(total, 100));
        }
    }
}
