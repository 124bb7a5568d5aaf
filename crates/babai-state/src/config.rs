//! Economy tuning knobs.
//!
//! All cost bases, multipliers, and timing constants live here so that
//! no formula input is ever re-derived at a call site. The defaults are
//! the canonical game values; operators can override any of them in the
//! `economy` section of `babai-config.yaml`.

use serde::Deserialize;

/// Tuning constants for the whole economy.
///
/// Every field has a serde default matching the shipped game balance, so
/// a partial (or absent) config section still yields a playable game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyTuning {
    /// Real-time seconds per regenerated energy unit.
    #[serde(default = "default_energy_regen_interval_secs")]
    pub energy_regen_interval_secs: u64,

    /// Energy balance for a freshly created player.
    #[serde(default = "default_starting_energy")]
    pub starting_energy: u64,

    /// Maximum number of gallery entries kept (oldest evicted first).
    #[serde(default = "default_gallery_cap")]
    pub gallery_cap: usize,

    /// Fear credited for one eviction before the telekinesis bonus.
    #[serde(default = "default_base_eviction_fear")]
    pub base_eviction_fear: u64,

    /// Telekinesis upgrade cost at tier 1 (in fear).
    #[serde(default = "default_telekinesis_cost_base")]
    pub telekinesis_cost_base: u64,

    /// Telekinesis cost growth factor per tier.
    #[serde(default = "default_telekinesis_cost_multiplier")]
    pub telekinesis_cost_multiplier: u64,

    /// Boss upgrade cost at tier 1 (in watermelons).
    #[serde(default = "default_boss_cost_base")]
    pub boss_cost_base: u64,

    /// Boss upgrade cost growth factor per tier.
    #[serde(default = "default_boss_cost_multiplier")]
    pub boss_cost_multiplier: u64,

    /// Watermelons paid out for a boss kill at tier 1.
    #[serde(default = "default_boss_reward_base")]
    pub boss_reward_base: u64,

    /// Boss reward growth factor per tier.
    #[serde(default = "default_boss_reward_multiplier")]
    pub boss_reward_multiplier: u64,

    /// Energy cost to start a Hard session.
    #[serde(default = "default_energy_cost_hard")]
    pub energy_cost_hard: u64,

    /// Energy cost to start an Impossible session.
    #[serde(default = "default_energy_cost_impossible")]
    pub energy_cost_impossible: u64,

    /// Energy cost to start an Endless session.
    #[serde(default = "default_energy_cost_endless")]
    pub energy_cost_endless: u64,

    /// Energy credited when a referred player joins.
    #[serde(default = "default_referral_energy_bonus")]
    pub referral_energy_bonus: u64,

    /// Fear credited when a referred player joins.
    #[serde(default = "default_referral_fear_bonus")]
    pub referral_fear_bonus: u64,

    /// Energy spent when sharing energy with a friend.
    #[serde(default = "default_share_energy_cost")]
    pub share_energy_cost: u64,
}

impl EconomyTuning {
    /// The regeneration interval in milliseconds.
    ///
    /// Clamped into `i64` for use with [`chrono::Duration`] arithmetic.
    pub fn regen_interval_ms(&self) -> i64 {
        let ms = self.energy_regen_interval_secs.saturating_mul(1000);
        i64::try_from(ms).unwrap_or(i64::MAX)
    }
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            energy_regen_interval_secs: default_energy_regen_interval_secs(),
            starting_energy: default_starting_energy(),
            gallery_cap: default_gallery_cap(),
            base_eviction_fear: default_base_eviction_fear(),
            telekinesis_cost_base: default_telekinesis_cost_base(),
            telekinesis_cost_multiplier: default_telekinesis_cost_multiplier(),
            boss_cost_base: default_boss_cost_base(),
            boss_cost_multiplier: default_boss_cost_multiplier(),
            boss_reward_base: default_boss_reward_base(),
            boss_reward_multiplier: default_boss_reward_multiplier(),
            energy_cost_hard: default_energy_cost_hard(),
            energy_cost_impossible: default_energy_cost_impossible(),
            energy_cost_endless: default_energy_cost_endless(),
            referral_energy_bonus: default_referral_energy_bonus(),
            referral_fear_bonus: default_referral_fear_bonus(),
            share_energy_cost: default_share_energy_cost(),
        }
    }
}

const fn default_energy_regen_interval_secs() -> u64 {
    300
}

const fn default_starting_energy() -> u64 {
    50
}

const fn default_gallery_cap() -> usize {
    6
}

const fn default_base_eviction_fear() -> u64 {
    1
}

const fn default_telekinesis_cost_base() -> u64 {
    50
}

const fn default_telekinesis_cost_multiplier() -> u64 {
    2
}

const fn default_boss_cost_base() -> u64 {
    500
}

const fn default_boss_cost_multiplier() -> u64 {
    5
}

const fn default_boss_reward_base() -> u64 {
    25
}

const fn default_boss_reward_multiplier() -> u64 {
    2
}

const fn default_energy_cost_hard() -> u64 {
    1
}

const fn default_energy_cost_impossible() -> u64 {
    5
}

const fn default_energy_cost_endless() -> u64 {
    25
}

const fn default_referral_energy_bonus() -> u64 {
    100
}

const fn default_referral_fear_bonus() -> u64 {
    100
}

const fn default_share_energy_cost() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_balance() {
        let tuning = EconomyTuning::default();
        assert_eq!(tuning.energy_regen_interval_secs, 300);
        assert_eq!(tuning.starting_energy, 50);
        assert_eq!(tuning.gallery_cap, 6);
        assert_eq!(tuning.telekinesis_cost_base, 50);
        assert_eq!(tuning.boss_cost_base, 500);
        assert_eq!(tuning.boss_reward_base, 25);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let parsed: Result<EconomyTuning, _> =
            serde_json::from_str(r#"{"starting_energy": 10}"#);
        let tuning = parsed.unwrap_or_default();
        assert_eq!(tuning.starting_energy, 10);
        assert_eq!(tuning.energy_regen_interval_secs, 300);
    }

    #[test]
    fn regen_interval_is_five_minutes_in_ms() {
        let tuning = EconomyTuning::default();
        assert_eq!(tuning.regen_interval_ms(), 300_000);
    }
}
