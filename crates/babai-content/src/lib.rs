//! Generative content adapters for the Babai game.
//!
//! The game asks an external generative API for narrative stages,
//! portraits, backdrops, chat replies, and narration. This crate wraps
//! those calls behind [`ContentService`], whose contract is simple:
//! **every call resolves to something playable**. Rate limits retry with
//! bounded exponential backoff, other failures log and fall back to
//! static content, and with no API key the backend is never touched.
//!
//! # Architecture
//!
//! ```text
//! templates/*.j2 --> PromptEngine --> GeminiClient --> parse/validate
//!                                        |                  |
//!                                   RetryPolicy        fallback on error
//! ```
//!
//! # Modules
//!
//! - [`service`] -- the never-fail facade the rest of the game uses
//! - [`gemini`] -- HTTP backend (text, JSON mode, image, speech)
//! - [`prompt`] -- `minijinja` template loading and rendering
//! - [`retry`] -- the shared backoff policy for rate limits
//! - [`scenario`] -- JSON-mode scenario parsing and validation
//! - [`fallback`] -- deterministic offline content
//! - [`config`] -- environment configuration
//! - [`error`] -- internal error types (never cross the facade)

pub mod config;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod prompt;
pub mod retry;
pub mod scenario;
pub mod service;

// Re-export primary types for convenience.
pub use config::ContentConfig;
pub use error::ContentError;
pub use retry::RetryPolicy;
pub use service::ContentService;
