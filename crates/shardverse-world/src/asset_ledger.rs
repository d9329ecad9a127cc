//! Single-owner asset ledger
//!
//! An asset id is minted exactly once and always has exactly one owner
//! afterwards. The ledger holds the owner map; inventory mirroring is the
//! engine's commit step so that a failed transfer leaves both sides
//! untouched.

use serde::{Deserialize, Serialize};
use shardverse_types::asset::AssetId;
use shardverse_types::avatar::AvatarId;
use shardverse_types::errors::{WorldError, WorldResult};
use std::collections::HashMap;

/// The registry mapping minted asset ids to their current owner
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AssetLedger {
    owners: HashMap<AssetId, AvatarId>,
}

impl AssetLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a one-time mint
    pub fn mint(&mut self, asset_id: AssetId, owner: AvatarId) -> WorldResult<()> {
        if self.owners.contains_key(&asset_id) {
            return Err(WorldError::AssetAlreadyMinted(asset_id));
        }

        tracing::info!("Minted asset '{}' for avatar '{}'", asset_id, owner);
        self.owners.insert(asset_id, owner);

        Ok(())
    }

    /// Current owner of an asset, if minted
    pub fn owner(&self, asset_id: &AssetId) -> Option<&AvatarId> {
        self.owners.get(asset_id)
    }

    /// Current owner or [`WorldError::AssetNotFound`]
    pub fn require_owner(&self, asset_id: &AssetId) -> WorldResult<&AvatarId> {
        self.owners
            .get(asset_id)
            .ok_or_else(|| WorldError::AssetNotFound(asset_id.clone()))
    }

    /// Reassign a minted asset to a new owner, returning the previous one
    pub fn reassign(&mut self, asset_id: &AssetId, new_owner: AvatarId) -> WorldResult<AvatarId> {
        let owner = self
            .owners
            .get_mut(asset_id)
            .ok_or_else(|| WorldError::AssetNotFound(asset_id.clone()))?;

        let previous = std::mem::replace(owner, new_owner);
        tracing::info!(
            "Transferred asset '{}' from '{}' to '{}'",
            asset_id,
            previous,
            self.owners[asset_id]
        );
        Ok(previous)
    }

    /// Number of minted assets
    pub fn minted_count(&self) -> usize {
        self.owners.len()
    }

    /// All assets currently owned by the given avatar
    pub fn assets_of(&self, owner: &AvatarId) -> impl Iterator<Item = &AssetId> + '_ {
        let owner = owner.clone();
        self.owners
            .iter()
            .filter(move |(_, o)| **o == owner)
            .map(|(asset_id, _)| asset_id)
    }
}
