//! Pure state transitions for the Babai game.
//!
//! This crate owns every mutation of [`PlayerState`]: guarded economy
//! operations, timed energy regeneration, quest progress, the gallery
//! cap, the friend roster, and session bookkeeping. All functions are
//! synchronous and side-effect free beyond the state they are handed,
//! which keeps them unit-testable without storage or network.
//!
//! # Invariants enforced here
//!
//! 1. **No negative balances**: every spend checks before deducting.
//! 2. **Set-semantics inventory**: an item can be bought at most once.
//! 3. **Monotone tiers**: boss and telekinesis levels only increase,
//!    with costs from one formula in [`scaling`].
//! 4. **Fair regeneration**: the energy watermark advances in whole
//!    ticks only, so sub-tick progress is never lost.
//!
//! [`PlayerState`]: babai_types::PlayerState

pub mod catalog;
pub mod config;
pub mod economy;
pub mod energy;
pub mod error;
pub mod gallery;
pub mod player;
pub mod quests;
pub mod roster;
pub mod scaling;
pub mod session;

pub use config::EconomyTuning;
pub use error::{EconomyError, StateError};
pub use session::{GameSession, StageTransition};
