//! Configuration for the content adapters.
//!
//! All configuration is read from environment variables. Only the API
//! key is secret; everything else has a working default. With no key at
//! all the service still constructs and serves fallbacks, so local
//! development and tests never need network access.

use crate::error::ContentError;

/// Complete content-adapter configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// API key for the generative backend; `None` means fallback-only.
    pub api_key: Option<String>,
    /// Base API URL.
    pub api_url: String,
    /// Model for narrative text and chat.
    pub text_model: String,
    /// Model for image generation.
    pub image_model: String,
    /// Model for speech synthesis.
    pub tts_model: String,
    /// Directory holding the `*.j2` prompt templates.
    pub templates_dir: String,
    /// Total call attempts on rate limiting (first try included).
    pub max_attempts: u32,
    /// Base backoff delay in milliseconds (doubles per retry).
    pub retry_base_ms: u64,
}

impl ContentConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables (all optional):
    /// - `GEMINI_API_KEY` -- backend API key; absent means fallback-only
    /// - `GEMINI_API_URL` -- base URL (default
    ///   `https://generativelanguage.googleapis.com/v1beta`)
    /// - `GEMINI_TEXT_MODEL` -- text model (default `gemini-3-flash-preview`)
    /// - `GEMINI_IMAGE_MODEL` -- image model (default `gemini-2.5-flash-image`)
    /// - `GEMINI_TTS_MODEL` -- speech model (default
    ///   `gemini-2.5-flash-preview-tts`)
    /// - `TEMPLATES_DIR` -- prompt template directory (default `templates`)
    /// - `CONTENT_MAX_ATTEMPTS` -- attempts on rate limiting (default 3)
    /// - `CONTENT_RETRY_BASE_MS` -- base backoff in ms (default 1000)
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Config`] if a numeric variable fails to
    /// parse.
    pub fn from_env() -> Result<Self, ContentError> {
        let max_attempts: u32 = std::env::var("CONTENT_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "3".to_owned())
            .parse()
            .map_err(|e| ContentError::Config(format!("invalid CONTENT_MAX_ATTEMPTS: {e}")))?;

        let retry_base_ms: u64 = std::env::var("CONTENT_RETRY_BASE_MS")
            .unwrap_or_else(|_| "1000".to_owned())
            .parse()
            .map_err(|e| ContentError::Config(format!("invalid CONTENT_RETRY_BASE_MS: {e}")))?;

        Ok(Self {
            api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            api_url: std::env::var("GEMINI_API_URL").unwrap_or_else(|_| {
                String::from("https://generativelanguage.googleapis.com/v1beta")
            }),
            text_model: std::env::var("GEMINI_TEXT_MODEL")
                .unwrap_or_else(|_| String::from("gemini-3-flash-preview")),
            image_model: std::env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or_else(|_| String::from("gemini-2.5-flash-image")),
            tts_model: std::env::var("GEMINI_TTS_MODEL")
                .unwrap_or_else(|_| String::from("gemini-2.5-flash-preview-tts")),
            templates_dir: std::env::var("TEMPLATES_DIR")
                .unwrap_or_else(|_| String::from("templates")),
            max_attempts,
            retry_base_ms,
        })
    }

    /// A fallback-only configuration pointed at a template directory.
    ///
    /// Used by tests and by deployments that deliberately run without a
    /// backend.
    pub fn offline(templates_dir: impl Into<String>) -> Self {
        Self {
            api_key: None,
            api_url: String::from("https://generativelanguage.googleapis.com/v1beta"),
            text_model: String::from("gemini-3-flash-preview"),
            image_model: String::from("gemini-2.5-flash-image"),
            tts_model: String::from("gemini-2.5-flash-preview-tts"),
            templates_dir: templates_dir.into(),
            max_attempts: 3,
            retry_base_ms: 1000,
        }
    }
}
