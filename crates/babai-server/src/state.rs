//! Shared application state for the game server.
//!
//! [`AppState`] owns the single mutable game world behind one `RwLock`.
//! Handlers take the write lock for the whole read-modify-write of a
//! request, so mutations serialize exactly like UI events on a single
//! thread; there is no finer-grained locking to get wrong.

use std::sync::Arc;

use babai_content::ContentService;
use babai_state::{EconomyTuning, GameSession};
use babai_store::{SaveStore, StoreError};
use babai_types::{PlayerState, SessionId, StageScenario};
use tokio::sync::{mpsc, RwLock};

use crate::effects::Effect;

/// Capacity of the side-effect queue.
///
/// Effects are best-effort: if the queue is somehow full, the send fails
/// and the triggering operation proceeds without the cosmetic refresh.
const EFFECT_QUEUE_CAPACITY: usize = 32;

/// The active run, including the server-side scenario being played.
///
/// The full scenario (with the grading index) lives only here; clients
/// get a redacted copy.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    /// Identifier for this run (appears in logs and the session view).
    pub id: SessionId,
    /// Stage/score bookkeeping.
    pub session: GameSession,
    /// The scenario awaiting an answer, absent at checkpoints.
    pub scenario: Option<StageScenario>,
    /// The current backdrop for the run.
    pub background_url: Option<String>,
}

/// The mutable game world: durable player state plus the ephemeral run.
#[derive(Debug)]
pub struct GameWorld {
    /// The durable player state (persisted on every change).
    pub player: PlayerState,
    /// The in-flight session, if a run is active.
    pub session: Option<ActiveSession>,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
pub struct AppState {
    /// The game world behind the single mutation lock.
    pub world: RwLock<GameWorld>,
    /// Save blob handle.
    pub store: SaveStore,
    /// Generative content facade.
    pub content: ContentService,
    /// Economy tuning constants.
    pub tuning: EconomyTuning,
    /// Sender side of the background side-effect queue.
    pub effects: mpsc::Sender<Effect>,
}

impl AppState {
    /// Assemble the application state.
    ///
    /// Returns the state and the receiver half of the effect queue; the
    /// caller hands the receiver to [`crate::effects::spawn_worker`].
    pub fn new(
        player: PlayerState,
        store: SaveStore,
        content: ContentService,
        tuning: EconomyTuning,
    ) -> (Arc<Self>, mpsc::Receiver<Effect>) {
        let (tx, rx) = mpsc::channel(EFFECT_QUEUE_CAPACITY);
        let state = Arc::new(Self {
            world: RwLock::new(GameWorld {
                player,
                session: None,
            }),
            store,
            content,
            tuning,
            effects: tx,
        });
        (state, rx)
    }

    /// Persist the player state to the save blob.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the blob cannot be written.
    pub async fn persist(&self, player: &PlayerState) -> Result<(), StoreError> {
        self.store.save(player).await
    }

    /// Fire a best-effort side effect.
    ///
    /// A full queue only costs the cosmetic refresh; the triggering
    /// operation already succeeded.
    pub fn enqueue_effect(&self, effect: Effect) {
        if let Err(e) = self.effects.try_send(effect) {
            tracing::warn!(error = %e, "side-effect queue full, dropping effect");
        }
    }
}
