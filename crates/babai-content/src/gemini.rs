//! Gemini `generateContent` backend over HTTP via `reqwest`.
//!
//! One client struct, one method per response modality. The backend does
//! not interpret content beyond extracting the payload: text comes back
//! as a string, images and audio as base64 `inlineData` wrapped into
//! data URIs the way the web client consumes them.

use serde_json::{json, Value};

use crate::config::ContentConfig;
use crate::error::ContentError;

/// HTTP client for the Gemini `generateContent` API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client from configuration.
    ///
    /// Returns `None` when no API key is configured (fallback-only mode).
    pub fn from_config(config: &ContentConfig) -> Option<Self> {
        config.api_key.as_ref().map(|key| Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: key.clone(),
        })
    }

    /// Generate plain text from a prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::RateLimited`] on HTTP 429, or
    /// [`ContentError::Backend`] / [`ContentError::Parse`] otherwise.
    pub async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, ContentError> {
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
        });
        let response = self.post(model, &body).await?;
        extract_text(&response)
    }

    /// Generate structured JSON from a prompt with a response schema.
    ///
    /// Returns the raw JSON text for the caller to parse and validate.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::generate_text`].
    pub async fn generate_json(
        &self,
        model: &str,
        prompt: &str,
        schema: &Value,
    ) -> Result<String, ContentError> {
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            },
        });
        let response = self.post(model, &body).await?;
        extract_text(&response)
    }

    /// Generate an image, returned as a `data:image/png;base64,` URI.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::generate_text`].
    pub async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        aspect_ratio: &str,
    ) -> Result<String, ContentError> {
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "imageConfig": {"aspectRatio": aspect_ratio},
            },
        });
        let response = self.post(model, &body).await?;
        let data = extract_inline_data(&response)?;
        Ok(format!("data:image/png;base64,{data}"))
    }

    /// Synthesize speech, returned as a raw-PCM data URI.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::generate_text`].
    pub async fn generate_speech(
        &self,
        model: &str,
        prompt: &str,
        voice: &str,
    ) -> Result<String, ContentError> {
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": {"voiceName": voice},
                    },
                },
            },
        });
        let response = self.post(model, &body).await?;
        let data = extract_inline_data(&response)?;
        Ok(format!("data:audio/pcm;rate=24000;base64,{data}"))
    }

    /// POST a `generateContent` request and return the parsed JSON body.
    async fn post(&self, model: &str, body: &Value) -> Result<Value, ContentError> {
        let url = format!("{}/models/{}:generateContent", self.api_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ContentError::Backend(format!("request failed: {e}")))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ContentError::RateLimited);
        }
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(ContentError::Backend(format!(
                "backend returned {status}: {error_body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ContentError::Backend(format!("response parse failed: {e}")))
    }
}

/// Extract the first text part from a `generateContent` response.
fn extract_text(json: &Value) -> Result<String, ContentError> {
    json.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            ContentError::Parse("response missing candidates[0].content.parts[0].text".to_owned())
        })
}

/// Extract the first base64 `inlineData` payload from a response.
///
/// Image and audio responses may interleave text parts, so every part is
/// scanned in order.
fn extract_inline_data(json: &Value) -> Result<String, ContentError> {
    let parts = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ContentError::Parse("response missing candidates[0].content.parts".to_owned())
        })?;

    parts
        .iter()
        .find_map(|part| {
            part.get("inlineData")
                .and_then(|d| d.get("data"))
                .and_then(Value::as_str)
        })
        .map(ToOwned::to_owned)
        .ok_or_else(|| ContentError::Parse("response has no inlineData part".to_owned()))
}
