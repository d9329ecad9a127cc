//! Quest registry, assignments, and completion tracking
//!
//! Assignments accumulate progress per avatar, clamped at the quest's target.
//! Completion moves the quest id into the avatar's completed set; the
//! experience reward is paid out by the engine through the normal progression
//! path.

use serde::{Deserialize, Serialize};
use shardverse_types::avatar::AvatarId;
use shardverse_types::errors::{WorldError, WorldResult};
use shardverse_types::quest::{Quest, QuestId};
use std::collections::{BTreeSet, HashMap};

/// The quest catalog and per-avatar quest state
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QuestLog {
    quests: HashMap<QuestId, Quest>,
    /// Progress per active assignment
    active: HashMap<AvatarId, HashMap<QuestId, u32>>,
    /// Completed quest ids per avatar
    completed: HashMap<AvatarId, BTreeSet<QuestId>>,
}

impl QuestLog {
    /// Create an empty quest log
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quest definition
    pub fn register(&mut self, quest: Quest) -> WorldResult<()> {
        if quest.target_amount == 0 {
            return Err(WorldError::InvalidAmount {
                reason: format!("quest '{}' target_amount must be > 0", quest.id),
            });
        }
        if self.quests.contains_key(&quest.id) {
            return Err(WorldError::QuestAlreadyExists(quest.id.clone()));
        }

        tracing::info!("Registered quest '{}'", quest.id);
        self.quests.insert(quest.id.clone(), quest);

        Ok(())
    }

    /// Get a quest by ID
    pub fn quest(&self, quest_id: &QuestId) -> Option<&Quest> {
        self.quests.get(quest_id)
    }

    /// Assign a quest to an avatar with zero progress
    ///
    /// Idempotent while the assignment is active; a completed quest cannot be
    /// taken again.
    pub fn assign(&mut self, avatar_id: &AvatarId, quest_id: &QuestId) -> WorldResult<()> {
        if !self.quests.contains_key(quest_id) {
            return Err(WorldError::QuestNotFound(quest_id.clone()));
        }
        if self.is_completed(avatar_id, quest_id) {
            return Err(WorldError::QuestAlreadyCompleted {
                avatar_id: avatar_id.clone(),
                quest_id: quest_id.clone(),
            });
        }

        self.active
            .entry(avatar_id.clone())
            .or_default()
            .entry(quest_id.clone())
            .or_insert(0);

        Ok(())
    }

    /// Record progress on an active assignment, clamped at the target
    ///
    /// Progress against a quest the avatar never took is silently ignored;
    /// an unregistered quest id is an error.
    pub fn record_progress(
        &mut self,
        avatar_id: &AvatarId,
        quest_id: &QuestId,
        amount: u32,
    ) -> WorldResult<()> {
        let quest = self
            .quests
            .get(quest_id)
            .ok_or_else(|| WorldError::QuestNotFound(quest_id.clone()))?;

        if let Some(progress) = self
            .active
            .get_mut(avatar_id)
            .and_then(|assignments| assignments.get_mut(quest_id))
        {
            *progress = (*progress).saturating_add(amount).min(quest.target_amount);
        }

        Ok(())
    }

    /// Progress on an active assignment, if any
    pub fn progress(&self, avatar_id: &AvatarId, quest_id: &QuestId) -> Option<u32> {
        self.active
            .get(avatar_id)
            .and_then(|assignments| assignments.get(quest_id))
            .copied()
    }

    /// Complete a quest whose progress has reached the target
    ///
    /// Returns the experience reward when the quest completes now, `None`
    /// when the quest is not assigned or progress is still short.
    pub fn complete(&mut self, avatar_id: &AvatarId, quest_id: &QuestId) -> WorldResult<Option<u64>> {
        let quest = self
            .quests
            .get(quest_id)
            .ok_or_else(|| WorldError::QuestNotFound(quest_id.clone()))?;

        let ready = self
            .active
            .get(avatar_id)
            .and_then(|assignments| assignments.get(quest_id))
            .map(|progress| *progress >= quest.target_amount)
            .unwrap_or(false);
        if !ready {
            return Ok(None);
        }

        let reward = quest.reward_experience;
        if let Some(assignments) = self.active.get_mut(avatar_id) {
            assignments.remove(quest_id);
        }
        self.completed
            .entry(avatar_id.clone())
            .or_default()
            .insert(quest_id.clone());
        tracing::info!("Avatar '{}' completed quest '{}'", avatar_id, quest_id);

        Ok(Some(reward))
    }

    /// Whether the avatar has completed the quest
    pub fn is_completed(&self, avatar_id: &AvatarId, quest_id: &QuestId) -> bool {
        self.completed
            .get(avatar_id)
            .map(|done| done.contains(quest_id))
            .unwrap_or(false)
    }

    /// All quest ids the avatar has completed
    pub fn completed_quests(&self, avatar_id: &AvatarId) -> Option<&BTreeSet<QuestId>> {
        self.completed.get(avatar_id)
    }

    /// Number of registered quests
    pub fn quest_count(&self) -> usize {
        self.quests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quest() -> Quest {
        Quest::new("quest-meteor-sample", "Meteor Sampling", "collect")
            .with_target_amount(3)
            .with_reward_experience(50)
    }

    #[test]
    fn test_register_rejects_duplicates_and_zero_target() {
        let mut log = QuestLog::new();
        log.register(sample_quest()).unwrap();

        assert!(matches!(
            log.register(sample_quest()),
            Err(WorldError::QuestAlreadyExists(_))
        ));
        assert!(matches!(
            log.register(Quest::new("quest-empty", "Empty", "none").with_target_amount(0)),
            Err(WorldError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_assign_unknown_quest_fails() {
        let mut log = QuestLog::new();
        let result = log.assign(&AvatarId::new("ava-1"), &QuestId::new("ghost"));
        assert!(matches!(result, Err(WorldError::QuestNotFound(_))));
    }

    #[test]
    fn test_progress_clamps_at_target() {
        let mut log = QuestLog::new();
        log.register(sample_quest()).unwrap();
        log.assign(&AvatarId::new("ava-1"), &QuestId::new("quest-meteor-sample"))
            .unwrap();

        log.record_progress(&AvatarId::new("ava-1"), &QuestId::new("quest-meteor-sample"), 10)
            .unwrap();
        assert_eq!(
            log.progress(&AvatarId::new("ava-1"), &QuestId::new("quest-meteor-sample")),
            Some(3)
        );
    }

    #[test]
    fn test_progress_without_assignment_is_ignored() {
        let mut log = QuestLog::new();
        log.register(sample_quest()).unwrap();

        log.record_progress(&AvatarId::new("ava-1"), &QuestId::new("quest-meteor-sample"), 2)
            .unwrap();
        assert_eq!(
            log.progress(&AvatarId::new("ava-1"), &QuestId::new("quest-meteor-sample")),
            None
        );
    }

    #[test]
    fn test_completion_lifecycle() {
        let mut log = QuestLog::new();
        log.register(sample_quest()).unwrap();
        let ava = AvatarId::new("ava-1");
        let quest = QuestId::new("quest-meteor-sample");

        log.assign(&ava, &quest).unwrap();

        // Not ready yet.
        assert_eq!(log.complete(&ava, &quest).unwrap(), None);

        log.record_progress(&ava, &quest, 3).unwrap();
        assert_eq!(log.complete(&ava, &quest).unwrap(), Some(50));
        assert!(log.is_completed(&ava, &quest));

        // Completing again does nothing; re-assignment is refused.
        assert_eq!(log.complete(&ava, &quest).unwrap(), None);
        assert!(matches!(
            log.assign(&ava, &quest),
            Err(WorldError::QuestAlreadyCompleted { .. })
        ));
    }
}
