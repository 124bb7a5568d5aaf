//! Tier cost and reward formulas.
//!
//! The single place where `base * multiplier^(tier-1)` is evaluated.
//! Screens and handlers never compute a cost themselves; they ask here,
//! so the shop card, the confirmation dialog, and the actual charge can
//! never drift apart.

use babai_types::Difficulty;

use crate::config::EconomyTuning;

/// Evaluate `base * multiplier^(tier-1)`, saturating at `u64::MAX`.
///
/// Tier 0 is treated as tier 1 (tiers are 1-based everywhere).
fn tier_scaled(base: u64, multiplier: u64, tier: u32) -> u64 {
    let exponent = tier.saturating_sub(1);
    multiplier
        .checked_pow(exponent)
        .and_then(|factor| base.checked_mul(factor))
        .unwrap_or(u64::MAX)
}

/// Fear cost of the next telekinesis upgrade at the given current tier.
pub fn telekinesis_cost(tuning: &EconomyTuning, tier: u32) -> u64 {
    tier_scaled(
        tuning.telekinesis_cost_base,
        tuning.telekinesis_cost_multiplier,
        tier,
    )
}

/// Watermelon cost of the next boss upgrade at the given current tier.
pub fn boss_upgrade_cost(tuning: &EconomyTuning, tier: u32) -> u64 {
    tier_scaled(tuning.boss_cost_base, tuning.boss_cost_multiplier, tier)
}

/// Watermelons paid out for defeating the boss at the given tier.
pub fn boss_reward(tuning: &EconomyTuning, tier: u32) -> u64 {
    tier_scaled(tuning.boss_reward_base, tuning.boss_reward_multiplier, tier)
}

/// Fear credited for one eviction: the base reward plus one per
/// telekinesis tier above the first.
pub fn fear_per_eviction(tuning: &EconomyTuning, telekinesis_level: u32) -> u64 {
    let bonus = u64::from(telekinesis_level.saturating_sub(1));
    tuning.base_eviction_fear.saturating_add(bonus)
}

/// Energy cost to start a session at the given difficulty.
pub const fn session_energy_cost(tuning: &EconomyTuning, difficulty: Difficulty) -> u64 {
    match difficulty {
        Difficulty::Hard => tuning.energy_cost_hard,
        Difficulty::Impossible => tuning.energy_cost_impossible,
        Difficulty::Endless => tuning.energy_cost_endless,
    }
}

/// Number of stages in a session, or `None` for an endless run.
pub const fn stage_limit(difficulty: Difficulty) -> Option<u32> {
    match difficulty {
        Difficulty::Hard => Some(15),
        Difficulty::Impossible => Some(45),
        Difficulty::Endless => None,
    }
}
