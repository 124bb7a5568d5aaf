//! Game session bookkeeping.
//!
//! A session is one run up the apartment tower: numbered stages, a score
//! of successful evictions, and a supervisor checkpoint every fifth
//! stage. Sessions are ephemeral (they live in server memory, not in the
//! save file); all durable effects go through the economy operations.

use babai_types::Difficulty;
use serde::Serialize;

use crate::scaling;

/// How often the supervisor interrupts the run, in stages.
const CHECKPOINT_EVERY: u32 = 5;

/// An active run through the tower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSession {
    /// The chosen difficulty.
    pub difficulty: Difficulty,
    /// Current stage number, 1-based.
    pub stage: u32,
    /// Successful evictions so far.
    pub score: u32,
    /// Whether the run is paused at a supervisor checkpoint.
    pub awaiting_supervisor: bool,
}

/// Where the run goes after a stage resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageTransition {
    /// Play the next stage; `fresh_background` marks stages that get a
    /// newly generated backdrop.
    Scenario {
        /// The stage about to be played.
        stage: u32,
        /// Whether a new background should be generated for it.
        fresh_background: bool,
    },
    /// The supervisor wants a word before the run continues.
    SupervisorCheckpoint {
        /// The checkpoint stage.
        stage: u32,
    },
    /// The run is over.
    Finished {
        /// Total stages the difficulty allowed.
        stages_cleared: u32,
    },
}

impl GameSession {
    /// Start a new run at stage 1.
    pub const fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            stage: 1,
            score: 0,
            awaiting_supervisor: false,
        }
    }

    /// The stage limit for this run, `None` when endless.
    pub const fn stage_limit(&self) -> Option<u32> {
        scaling::stage_limit(self.difficulty)
    }

    /// Record a successful eviction.
    pub const fn record_eviction(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    /// Move past the current stage.
    ///
    /// Checkpoint stages pause the run (`awaiting_supervisor`) instead of
    /// producing a scenario; [`Self::resume`] plays on from there.
    pub fn advance(&mut self) -> StageTransition {
        let next = self.stage.saturating_add(1);
        if let Some(limit) = self.stage_limit()
            && next > limit
        {
            return StageTransition::Finished {
                stages_cleared: limit,
            };
        }
        self.stage = next;
        if next.checked_rem(CHECKPOINT_EVERY) == Some(0) {
            self.awaiting_supervisor = true;
            return StageTransition::SupervisorCheckpoint { stage: next };
        }
        StageTransition::Scenario {
            stage: next,
            fresh_background: false,
        }
    }

    /// Leave a supervisor checkpoint and move to the next stage.
    ///
    /// A no-op `Scenario` for the current stage is returned when the run
    /// was not actually paused.
    pub fn resume(&mut self) -> StageTransition {
        if !self.awaiting_supervisor {
            return StageTransition::Scenario {
                stage: self.stage,
                fresh_background: false,
            };
        }
        self.awaiting_supervisor = false;
        let next = self.stage.saturating_add(1);
        if let Some(limit) = self.stage_limit()
            && next > limit
        {
            return StageTransition::Finished {
                stages_cleared: limit,
            };
        }
        self.stage = next;
        StageTransition::Scenario {
            stage: next,
            // Checkpoint floors redecorate: the backdrop regenerates
            // when the run resumes.
            fresh_background: true,
        }
    }
}
