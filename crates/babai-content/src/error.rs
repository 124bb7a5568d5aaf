//! Error types for the content adapters.
//!
//! These errors never cross the service boundary: the facade in
//! [`crate::service`] catches every one of them and substitutes a static
//! fallback. They exist so the retry policy can tell a quota rejection
//! apart from everything else.

/// Errors that can occur while generating content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The backend rejected the call with a quota / rate limit (HTTP 429).
    ///
    /// The only retryable error: the retry policy backs off and tries
    /// again a bounded number of times.
    #[error("rate limited by the generative API")]
    RateLimited,

    /// The backend returned an error or was unreachable.
    #[error("generative backend error: {0}")]
    Backend(String),

    /// No API key is configured; the service runs on fallbacks only.
    #[error("content backend not configured")]
    Offline,

    /// Failed to load or render a prompt template.
    #[error("template error: {0}")]
    Template(String),

    /// The response could not be parsed into the expected shape.
    #[error("response parse error: {0}")]
    Parse(String),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}
