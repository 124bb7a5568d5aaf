//! Background side-effect worker.
//!
//! Cosmetic follow-ups to economy operations run here, decoupled from
//! the synchronous state transition that triggered them: the purchase
//! is already committed and saved before the worker ever wakes up, and
//! a failed refresh costs nothing but the refresh.

use std::sync::Arc;

use babai_state::{catalog, gallery};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// A queued side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Regenerate the avatar portrait to show a newly purchased item.
    RefreshAvatar {
        /// Display name of the item to highlight.
        new_item_name: String,
    },
}

/// Spawn the worker draining the effect queue.
///
/// The worker runs until the sender side is dropped.
pub fn spawn_worker(state: Arc<AppState>, mut rx: mpsc::Receiver<Effect>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(effect) = rx.recv().await {
            match effect {
                Effect::RefreshAvatar { new_item_name } => {
                    refresh_avatar(&state, &new_item_name).await;
                }
            }
        }
        debug!("effect queue closed, worker exiting");
    })
}

/// Regenerate the avatar with the new item, archiving the old portrait.
///
/// Best-effort: any failure is logged and the current portrait stays.
async fn refresh_avatar(state: &Arc<AppState>, new_item_name: &str) {
    // Snapshot the inputs without holding the lock across the backend call.
    let (character, owned_names) = {
        let world = state.world.read().await;
        let Some(character) = world.player.character.clone() else {
            return;
        };
        let owned_names: Vec<String> = world
            .player
            .inventory
            .iter()
            .filter_map(|id| catalog::find_item(id).map(|item| item.name))
            .collect();
        (character, owned_names)
    };

    let Some(new_avatar) = state
        .content
        .avatar_with_item(&character, &owned_names, new_item_name)
        .await
    else {
        debug!(new_item_name, "avatar refresh unavailable, keeping portrait");
        return;
    };

    let mut world = state.world.write().await;
    let cap = state.tuning.gallery_cap;
    if let Some(current) = world.player.character.as_ref().map(|c| c.avatar_url.clone()) {
        gallery::add(&mut world.player, current, cap);
    }
    if let Some(character) = world.player.character.as_mut() {
        character.avatar_url = new_avatar;
    }
    if let Err(e) = state.persist(&world.player).await {
        warn!(error = %e, "failed to persist refreshed avatar");
        return;
    }
    info!(new_item_name, "avatar refreshed with new item");
}
