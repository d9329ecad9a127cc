//! Travel validation
//!
//! Pure checks shared by single-avatar and party travel. Validation never
//! mutates; the engine commits relocations only after every check has passed,
//! which is what makes party travel all-or-nothing.

use crate::shard_registry::ShardRegistry;
use shardverse_types::avatar::AvatarId;
use shardverse_types::errors::{WorldError, WorldResult};
use shardverse_types::world::{PortalLink, Shard, ShardId};

/// Minimum unlock level among links leading to `to`
///
/// The easiest qualifying portal wins when several links connect the same
/// pair of shards. `None` when no link matches.
pub(crate) fn min_unlock_level(links: &[PortalLink], to: &ShardId) -> Option<u32> {
    links
        .iter()
        .filter(|link| link.leads_to(to))
        .map(|link| link.unlock_level)
        .min()
}

/// Validate one traveler's route from `from` to `to` at the given level
pub(crate) fn check_route(
    registry: &ShardRegistry,
    avatar_id: &AvatarId,
    from: &ShardId,
    to: &ShardId,
    level: u32,
) -> WorldResult<()> {
    // Check 1: a portal must exist between the shards
    let required = min_unlock_level(registry.links_from(from), to).ok_or_else(|| {
        WorldError::NoPortal {
            from: from.clone(),
            to: to.clone(),
        }
    })?;

    // Check 2: the traveler must meet the easiest portal's gate
    if level < required {
        return Err(WorldError::InsufficientLevel {
            avatar_id: avatar_id.clone(),
            level,
            required,
        });
    }

    Ok(())
}

/// Validate that the destination can absorb `incoming` additional travelers
pub(crate) fn check_destination_capacity(
    destination: &Shard,
    current_population: usize,
    incoming: usize,
) -> WorldResult<()> {
    if current_population + incoming > destination.max_players as usize {
        return Err(WorldError::DestinationFull {
            shard_id: destination.id.clone(),
            max_players: destination.max_players,
        });
    }
    Ok(())
}
