//! Generated-content payload types.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A generated narrative stage: situation text, three choices, and the
/// outcome texts for each branch.
///
/// The correct choice index is kept server-side and never leaks to the
/// client before the answer is graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StageScenario {
    /// Situation description shown to the player.
    pub text: String,
    /// The three choices offered for this stage.
    pub options: Vec<String>,
    /// Index into `options` of the choice that evicts the tenant.
    pub correct_answer: usize,
    /// Narration shown after the correct choice.
    pub success_text: String,
    /// Narration shown after a wrong choice.
    pub failure_text: String,
}

impl StageScenario {
    /// A client-safe copy with the correct index redacted.
    ///
    /// The grading index is replaced by `options.len()` so it can never
    /// match a real choice.
    pub fn redacted(&self) -> Self {
        Self {
            correct_answer: self.options.len(),
            ..self.clone()
        }
    }
}
