//! Quest progress and claiming.
//!
//! Progress is monotone and clamped at the target. Claiming is the only
//! path to `completed = true`, is gated by `progress >= target`, credits
//! the reward exactly once, and records a `quest_<id>` achievement.

use babai_types::{PlayerState, QuestReward};
use tracing::info;

use crate::error::StateError;
use crate::{economy, roster};

/// Quest id: evict five tenants.
pub const FIRST_FRIGHT: &str = "first_fright";
/// Quest id: collect three watermelons.
pub const TRIBUTE_COLLECTOR: &str = "tribute_collector";
/// Quest id: defeat a boss.
pub const WATERMELON_MAGNATE: &str = "watermelon_magnate";
/// Quest id: raise telekinesis to level five.
pub const TELEKINESIS_MASTER: &str = "telekinesis_master";

/// Add progress to a quest, clamped at its target.
///
/// Completed quests and unknown ids are ignored. Returns whether any
/// progress was recorded.
pub fn advance(state: &mut PlayerState, quest_id: &str, amount: u64) -> bool {
    let Some(quest) = state.quests.iter_mut().find(|q| q.id == quest_id) else {
        return false;
    };
    if quest.completed || amount == 0 {
        return false;
    }
    let before = quest.progress;
    quest.progress = quest.progress.saturating_add(amount).min(quest.target);
    quest.progress > before
}

/// Raise a quest's progress to at least `value` (clamped at the target).
///
/// Used for level-tracking quests where progress mirrors a tier rather
/// than accumulating events. Never lowers progress.
pub fn raise_to(state: &mut PlayerState, quest_id: &str, value: u64) -> bool {
    let Some(quest) = state.quests.iter_mut().find(|q| q.id == quest_id) else {
        return false;
    };
    if quest.completed {
        return false;
    }
    let clamped = value.min(quest.target);
    if clamped <= quest.progress {
        return false;
    }
    quest.progress = clamped;
    true
}

/// Claim a quest's reward.
///
/// Marks the quest completed, credits the reward, and records the
/// `quest_<id>` achievement. Returns the reward that was credited.
///
/// # Errors
///
/// Returns [`StateError::UnknownQuest`] for an unknown id,
/// [`StateError::QuestAlreadyClaimed`] if already completed, or
/// [`StateError::QuestNotReady`] while `progress < target`.
pub fn claim(state: &mut PlayerState, quest_id: &str) -> Result<QuestReward, StateError> {
    let quest = state
        .quests
        .iter_mut()
        .find(|q| q.id == quest_id)
        .ok_or_else(|| StateError::UnknownQuest(quest_id.to_owned()))?;

    if quest.completed {
        return Err(StateError::QuestAlreadyClaimed(quest_id.to_owned()));
    }
    if quest.progress < quest.target {
        return Err(StateError::QuestNotReady {
            id: quest_id.to_owned(),
            progress: quest.progress,
            target: quest.target,
        });
    }

    quest.completed = true;
    let reward = quest.reward;
    economy::earn(state, reward.currency, reward.amount);
    roster::add_achievement(state, &format!("quest_{quest_id}"));
    info!(quest_id, amount = reward.amount, currency = %reward.currency, "quest claimed");
    Ok(reward)
}
