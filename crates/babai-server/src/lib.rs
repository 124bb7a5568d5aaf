//! Game API server for Babai.
//!
//! This crate binds the workspace together: the Axum HTTP surface over
//! the pure transitions in `babai-state`, the save blob in
//! `babai-store`, and the never-fail generators in `babai-content`.
//! Two background tasks run alongside the server: the energy
//! regeneration timer and the side-effect worker that refreshes the
//! avatar after purchases.
//!
//! # Architecture
//!
//! ```text
//! HTTP request --> handler --> babai-state transition --> save blob
//!                     |                                      ^
//!                     +--> babai-content (never fails)       |
//!                     +--> effect queue --> worker ----------+
//! ```
//!
//! All mutation happens under one `RwLock` held for the whole request,
//! so operations serialize exactly like UI events on a single thread.

pub mod config;
pub mod effects;
pub mod error;
pub mod handlers;
pub mod regen;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use config::{ConfigError, GameConfig};
pub use error::ApiError;
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::{ActiveSession, AppState, GameWorld};
