//! Friendships and parties
//!
//! Friendship is symmetric and stored as both directed edges in an adjacency
//! map. Party joins are friendship-gated: once a party holds more than its
//! leader, a candidate needs a friend among the current members.

use serde::{Deserialize, Serialize};
use shardverse_types::avatar::AvatarId;
use shardverse_types::errors::{WorldError, WorldResult};
use shardverse_types::social::{Party, PartyId};
use std::collections::{BTreeSet, HashMap};

/// Friendship adjacency and party membership
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SocialGraph {
    friendships: HashMap<AvatarId, BTreeSet<AvatarId>>,
    parties: HashMap<PartyId, Party>,
}

impl SocialGraph {
    /// Create an empty social graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a symmetric friendship between two avatars
    ///
    /// Adding an existing friendship is an idempotent no-op. Avatar existence
    /// is the caller's concern; self-friendship is rejected here.
    pub fn add_friendship(&mut self, a: &AvatarId, b: &AvatarId) -> WorldResult<()> {
        if a == b {
            return Err(WorldError::SelfFriendship(a.clone()));
        }

        self.friendships.entry(a.clone()).or_default().insert(b.clone());
        self.friendships.entry(b.clone()).or_default().insert(a.clone());
        tracing::debug!("Avatars '{}' and '{}' are now friends", a, b);

        Ok(())
    }

    /// Whether two avatars are friends
    pub fn are_friends(&self, a: &AvatarId, b: &AvatarId) -> bool {
        self.friendships
            .get(a)
            .map(|friends| friends.contains(b))
            .unwrap_or(false)
    }

    /// All friends of an avatar
    pub fn friends_of(&self, avatar_id: &AvatarId) -> Option<&BTreeSet<AvatarId>> {
        self.friendships.get(avatar_id)
    }

    /// Create a party containing only its leader
    pub fn create_party(&mut self, party_id: PartyId, leader: &AvatarId) -> WorldResult<()> {
        if self.parties.contains_key(&party_id) {
            return Err(WorldError::PartyAlreadyExists(party_id));
        }

        tracing::info!("Created party '{}' led by '{}'", party_id, leader);
        self.parties
            .insert(party_id.clone(), Party::new(party_id, leader.clone()));

        Ok(())
    }

    /// Get a party by ID
    pub fn party(&self, party_id: &PartyId) -> Option<&Party> {
        self.parties.get(party_id)
    }

    /// Get a party or fail with [`WorldError::PartyNotFound`]
    pub fn require_party(&self, party_id: &PartyId) -> WorldResult<&Party> {
        self.parties
            .get(party_id)
            .ok_or_else(|| WorldError::PartyNotFound(party_id.clone()))
    }

    /// Add an avatar to a party
    ///
    /// A leader-only party accepts its first extra member unconditionally
    /// (the leader may always invite). Once a second member exists, the
    /// candidate must be friends with at least one current member. Joining a
    /// party one is already in is an idempotent no-op.
    pub fn add_party_member(&mut self, party_id: &PartyId, avatar_id: &AvatarId) -> WorldResult<()> {
        let party = self.require_party(party_id)?;
        if party.contains(avatar_id) {
            return Ok(());
        }

        if party.member_count() > 1 {
            let sponsored = party
                .members
                .iter()
                .any(|member| self.are_friends(member, avatar_id));
            if !sponsored {
                tracing::warn!(
                    "Avatar '{}' denied joining party '{}': no friend among members",
                    avatar_id,
                    party_id
                );
                return Err(WorldError::NotFriends {
                    party_id: party_id.clone(),
                    avatar_id: avatar_id.clone(),
                });
            }
        }

        // Validated above; the party is present.
        self.parties
            .get_mut(party_id)
            .unwrap()
            .members
            .insert(avatar_id.clone());
        tracing::info!("Avatar '{}' joined party '{}'", avatar_id, party_id);

        Ok(())
    }

    /// Remove an avatar from a party
    ///
    /// The last member leaving removes the party; a party never exists empty.
    pub fn leave_party(&mut self, party_id: &PartyId, avatar_id: &AvatarId) -> WorldResult<()> {
        let party = self
            .parties
            .get_mut(party_id)
            .ok_or_else(|| WorldError::PartyNotFound(party_id.clone()))?;

        if !party.members.remove(avatar_id) {
            return Err(WorldError::NotAPartyMember {
                party_id: party_id.clone(),
                avatar_id: avatar_id.clone(),
            });
        }

        if party.members.is_empty() {
            self.parties.remove(party_id);
            tracing::info!("Party '{}' emptied and was removed", party_id);
        }

        Ok(())
    }

    /// Remove a party outright
    pub fn disband_party(&mut self, party_id: &PartyId) -> WorldResult<Party> {
        let party = self
            .parties
            .remove(party_id)
            .ok_or_else(|| WorldError::PartyNotFound(party_id.clone()))?;
        tracing::info!("Disbanded party '{}'", party_id);
        Ok(party)
    }

    /// Number of existing parties
    pub fn party_count(&self) -> usize {
        self.parties.len()
    }
}
