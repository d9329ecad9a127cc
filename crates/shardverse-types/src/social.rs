//! Party types
//!
//! A party is an ad-hoc, friendship-gated group. Membership is an ordered set
//! so that party-wide operations process members in a reproducible order.

use crate::avatar::AvatarId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Unique identifier for a party
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartyId(String);

impl PartyId {
    /// Create a new party ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random party ID
    pub fn generate() -> Self {
        Self(format!("party-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PartyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PartyId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An ad-hoc group of avatars
///
/// `leader` records the founder and is always a member at creation. A party
/// never exists with zero members; the engine removes it when the last member
/// leaves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Unique identifier
    pub id: PartyId,
    /// Founding member
    pub leader: AvatarId,
    /// Current members, ordered by id
    pub members: BTreeSet<AvatarId>,
}

impl Party {
    /// Create a party containing only its leader
    pub fn new(id: impl Into<PartyId>, leader: impl Into<AvatarId>) -> Self {
        let leader = leader.into();
        let mut members = BTreeSet::new();
        members.insert(leader.clone());
        Self {
            id: id.into(),
            leader,
            members,
        }
    }

    /// Whether the avatar is currently a member
    pub fn contains(&self, avatar_id: &AvatarId) -> bool {
        self.members.contains(avatar_id)
    }

    /// Number of current members
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
