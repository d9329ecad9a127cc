//! Quest types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a quest
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestId(String);

impl QuestId {
    /// Create a new quest ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random quest ID
    pub fn generate() -> Self {
        Self(format!("quest-{}", Uuid::new_v4()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuestId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QuestId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A quest definition with an objective tag and progress target
///
/// Progress against the objective accumulates per avatar in the quest log;
/// completion awards `reward_experience` through the normal progression path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Unique identifier
    pub id: QuestId,
    /// Display title
    pub title: String,
    /// Objective tag matched when progress is recorded, e.g. "defeat"
    pub objective: String,
    /// Units of progress required for completion (always >= 1)
    pub target_amount: u32,
    /// Experience awarded on completion
    pub reward_experience: u64,
}

impl Quest {
    /// Create a new quest with a target of one unit and no reward
    pub fn new(id: impl Into<QuestId>, title: impl Into<String>, objective: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            objective: objective.into(),
            target_amount: 1,
            reward_experience: 0,
        }
    }

    /// Set the progress target
    pub fn with_target_amount(mut self, target_amount: u32) -> Self {
        self.target_amount = target_amount;
        self
    }

    /// Set the completion reward
    pub fn with_reward_experience(mut self, reward_experience: u64) -> Self {
        self.reward_experience = reward_experience;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_builders() {
        let quest = Quest::new("quest-meteor-sample", "Meteor Sampling", "collect")
            .with_target_amount(3)
            .with_reward_experience(50);
        assert_eq!(quest.target_amount, 3);
        assert_eq!(quest.reward_experience, 50);
    }
}
