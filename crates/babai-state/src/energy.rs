//! Energy regeneration over real time.
//!
//! Energy regenerates one unit per tick interval. The watermark
//! (`last_energy_update`) advances only in whole intervals, so partial
//! progress toward the next unit is never lost: checking twice in the
//! same instant credits nothing and moves nothing.

use babai_types::PlayerState;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::EconomyTuning;

/// Credit all whole regeneration ticks elapsed since the watermark.
///
/// Returns the number of energy units credited (zero when less than one
/// full interval has passed, or when the clock appears to have moved
/// backwards). The watermark advances by exactly `ticks * interval`.
pub fn regenerate(state: &mut PlayerState, now: DateTime<Utc>, tuning: &EconomyTuning) -> u64 {
    let interval_ms = tuning.regen_interval_ms();
    if interval_ms <= 0 {
        return 0;
    }

    let elapsed_ms = now
        .signed_duration_since(state.last_energy_update)
        .num_milliseconds();
    if elapsed_ms < interval_ms {
        return 0;
    }

    let ticks = elapsed_ms.checked_div(interval_ms).unwrap_or(0);
    let credited = u64::try_from(ticks).unwrap_or(0);
    if credited == 0 {
        return 0;
    }

    state.energy = state.energy.saturating_add(credited);

    let advance_ms = ticks.checked_mul(interval_ms).unwrap_or(elapsed_ms);
    state.last_energy_update = state
        .last_energy_update
        .checked_add_signed(Duration::milliseconds(advance_ms))
        .unwrap_or(now);

    debug!(credited, energy = state.energy, "energy regenerated");
    credited
}

/// Milliseconds until the next energy unit lands, for the client
/// countdown next to the energy readout.
pub fn millis_until_next_unit(
    state: &PlayerState,
    now: DateTime<Utc>,
    tuning: &EconomyTuning,
) -> i64 {
    let interval_ms = tuning.regen_interval_ms();
    if interval_ms <= 0 {
        return 0;
    }
    let elapsed_ms = now
        .signed_duration_since(state.last_energy_update)
        .num_milliseconds();
    if elapsed_ms <= 0 {
        return interval_ms;
    }
    let into_tick = elapsed_ms.checked_rem(interval_ms).unwrap_or(0);
    interval_ms.saturating_sub(into_tick)
}
