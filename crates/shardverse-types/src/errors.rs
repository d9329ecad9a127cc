//! Error types for shardverse operations
//!
//! Every failure is typed and recoverable by the caller; the engine never
//! terminates the process. Multi-step operations leave state unchanged on any
//! failure.

use crate::asset::AssetId;
use crate::avatar::AvatarId;
use crate::event::EventId;
use crate::quest::QuestId;
use crate::social::PartyId;
use crate::world::ShardId;
use thiserror::Error;

/// Errors that can occur in world-state operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    // =========================================================================
    // Not-found Errors
    // =========================================================================
    /// Shard not found
    #[error("Unknown shard: {0}")]
    ShardNotFound(ShardId),

    /// Avatar not found
    #[error("Unknown avatar: {0}")]
    AvatarNotFound(AvatarId),

    /// Party not found
    #[error("Unknown party: {0}")]
    PartyNotFound(PartyId),

    /// Asset was never minted
    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),

    /// Quest not found
    #[error("Unknown quest: {0}")]
    QuestNotFound(QuestId),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    /// Shard id already registered
    #[error("Shard already exists: {0}")]
    ShardAlreadyExists(ShardId),

    /// Avatar id already spawned
    #[error("Avatar already exists: {0}")]
    AvatarAlreadyExists(AvatarId),

    /// Party id already created
    #[error("Party already exists: {0}")]
    PartyAlreadyExists(PartyId),

    /// Asset id already minted
    #[error("Asset already minted: {0}")]
    AssetAlreadyMinted(AssetId),

    /// Event id already scheduled
    #[error("Event already scheduled: {0}")]
    EventAlreadyExists(EventId),

    /// Quest id already registered
    #[error("Quest already exists: {0}")]
    QuestAlreadyExists(QuestId),

    /// Quest already completed by this avatar
    #[error("Quest '{quest_id}' already completed by avatar '{avatar_id}'")]
    QuestAlreadyCompleted {
        /// The avatar that completed the quest
        avatar_id: AvatarId,
        /// The completed quest
        quest_id: QuestId,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// Shard capacity must be positive
    #[error("Shard '{shard_id}' has invalid capacity {max_players}: max_players must be > 0")]
    InvalidCapacity {
        /// The rejected shard
        shard_id: ShardId,
        /// The rejected capacity
        max_players: u32,
    },

    /// Portal unlock level must be at least 1
    #[error("Portal {from} -> {to} has invalid unlock level {unlock_level}: must be >= 1")]
    InvalidUnlockLevel {
        /// Origin shard
        from: ShardId,
        /// Destination shard
        to: ShardId,
        /// The rejected level
        unlock_level: u32,
    },

    /// Event window ends before it starts
    #[error("Event '{event_id}' has an invalid time range: start is after end")]
    InvalidTimeRange {
        /// The rejected event
        event_id: EventId,
    },

    /// Experience multiplier below 1.0
    #[error("Invalid experience multiplier {multiplier}: must be >= 1.0")]
    InvalidMultiplier {
        /// The rejected multiplier
        multiplier: f64,
    },

    /// An avatar cannot befriend itself
    #[error("Avatar '{0}' cannot befriend itself")]
    SelfFriendship(AvatarId),

    /// Ranking limit must be positive
    #[error("Invalid limit {limit}: must be > 0")]
    InvalidLimit {
        /// The rejected limit
        limit: usize,
    },

    /// Malformed amount
    #[error("Invalid amount: {reason}")]
    InvalidAmount {
        /// Why the amount is invalid
        reason: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration is invalid
        reason: String,
    },

    // =========================================================================
    // Precondition Errors
    // =========================================================================
    /// No portal connects the two shards
    #[error("No portal from '{from}' to '{to}'")]
    NoPortal {
        /// Origin shard
        from: ShardId,
        /// Destination shard
        to: ShardId,
    },

    /// Traveler level below the portal's unlock level
    #[error("Avatar '{avatar_id}' level {level} is below required level {required}")]
    InsufficientLevel {
        /// The traveler
        avatar_id: AvatarId,
        /// Effective level used for the check
        level: u32,
        /// Minimum unlock level among matching portals
        required: u32,
    },

    /// Candidate is not friends with any current party member
    #[error("Avatar '{avatar_id}' is not friends with any member of party '{party_id}'")]
    NotFriends {
        /// The party being joined
        party_id: PartyId,
        /// The rejected candidate
        avatar_id: AvatarId,
    },

    /// Destination shard cannot hold the incoming travelers
    #[error("Shard '{shard_id}' is full ({max_players} players)")]
    DestinationFull {
        /// The full shard
        shard_id: ShardId,
        /// Its capacity
        max_players: u32,
    },

    /// Avatar is not a member of the party
    #[error("Avatar '{avatar_id}' is not a member of party '{party_id}'")]
    NotAPartyMember {
        /// The party
        party_id: PartyId,
        /// The non-member
        avatar_id: AvatarId,
    },
}

/// Failure classes from the error-handling design
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller supplied an id that does not exist
    NotFound,
    /// Caller attempted to create something that already exists
    Conflict,
    /// Malformed input; the argument must be fixed before retrying
    Validation,
    /// Well-formed request forbidden by the current world state
    Precondition,
}

impl WorldError {
    /// The failure class this error belongs to
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ShardNotFound(_)
            | Self::AvatarNotFound(_)
            | Self::PartyNotFound(_)
            | Self::AssetNotFound(_)
            | Self::QuestNotFound(_) => ErrorClass::NotFound,

            Self::ShardAlreadyExists(_)
            | Self::AvatarAlreadyExists(_)
            | Self::PartyAlreadyExists(_)
            | Self::AssetAlreadyMinted(_)
            | Self::EventAlreadyExists(_)
            | Self::QuestAlreadyExists(_)
            | Self::QuestAlreadyCompleted { .. } => ErrorClass::Conflict,

            Self::InvalidCapacity { .. }
            | Self::InvalidUnlockLevel { .. }
            | Self::InvalidTimeRange { .. }
            | Self::InvalidMultiplier { .. }
            | Self::SelfFriendship(_)
            | Self::InvalidLimit { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidConfiguration { .. } => ErrorClass::Validation,

            Self::NoPortal { .. }
            | Self::InsufficientLevel { .. }
            | Self::NotFriends { .. }
            | Self::DestinationFull { .. }
            | Self::NotAPartyMember { .. } => ErrorClass::Precondition,
        }
    }

    /// Whether the same request may succeed later without changes
    ///
    /// Only precondition failures can resolve on their own (leveling up,
    /// befriending, a population change). Everything else needs a different
    /// argument from the caller.
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Precondition
    }
}

/// Result type for world-state operations
pub type WorldResult<T> = Result<T, WorldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(
            WorldError::ShardNotFound(ShardId::new("hub")).class(),
            ErrorClass::NotFound
        );
        assert_eq!(
            WorldError::AssetAlreadyMinted(AssetId::new("asset-x")).class(),
            ErrorClass::Conflict
        );
        assert_eq!(
            WorldError::SelfFriendship(AvatarId::new("ava-1")).class(),
            ErrorClass::Validation
        );
        assert_eq!(
            WorldError::DestinationFull {
                shard_id: ShardId::new("arena"),
                max_players: 20,
            }
            .class(),
            ErrorClass::Precondition
        );
    }

    #[test]
    fn test_only_preconditions_are_retryable() {
        assert!(WorldError::NoPortal {
            from: ShardId::new("hub"),
            to: ShardId::new("arena"),
        }
        .is_retryable());
        assert!(!WorldError::ShardAlreadyExists(ShardId::new("hub")).is_retryable());
        assert!(!WorldError::InvalidLimit { limit: 0 }.is_retryable());
    }

    #[test]
    fn test_insufficient_level_message() {
        let err = WorldError::InsufficientLevel {
            avatar_id: AvatarId::new("ava-1"),
            level: 3,
            required: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("level 3"));
        assert!(msg.contains("required level 5"));
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            WorldError::AvatarNotFound(AvatarId::new("ava-1")),
            WorldError::PartyNotFound(PartyId::new("party-1")),
            WorldError::QuestNotFound(QuestId::new("quest-1")),
            WorldError::InvalidTimeRange {
                event_id: EventId::new("event-1"),
            },
            WorldError::InvalidMultiplier { multiplier: 0.5 },
        ];

        for err in errors {
            // Just verify we can format all error types
            let _ = format!("{}", err);
            let _ = format!("{:?}", err);
        }
    }
}
