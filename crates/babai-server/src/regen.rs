//! Background energy regeneration task.
//!
//! Energy catch-up also runs opportunistically on every player fetch;
//! this task exists so the save blob and any connected client stay
//! current even while the player is idle.

use std::sync::Arc;
use std::time::Duration;

use babai_state::energy;
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::state::AppState;

/// How often the background task checks for elapsed ticks.
const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn the periodic regeneration task.
pub fn spawn(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CHECK_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let mut world = state.world.write().await;
            let credited = energy::regenerate(&mut world.player, Utc::now(), &state.tuning);
            if credited == 0 {
                continue;
            }
            debug!(credited, energy = world.player.energy, "background regen credited");
            if let Err(e) = state.persist(&world.player).await {
                warn!(error = %e, "failed to persist regenerated energy");
            }
        }
    })
}
