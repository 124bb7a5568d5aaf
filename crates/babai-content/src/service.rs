//! The content service facade.
//!
//! One method per generator the game needs. Every method resolves to a
//! usable value: backend errors are logged and replaced by the static
//! fallbacks, rate limits go through the shared retry policy first, and
//! with no API key configured the backend is skipped entirely.

use std::time::Duration;

use babai_types::{Character, Difficulty, Gender, StageScenario, VisualStyle};
use serde_json::json;
use tracing::{debug, warn};

use crate::config::ContentConfig;
use crate::error::ContentError;
use crate::fallback;
use crate::gemini::GeminiClient;
use crate::prompt::PromptEngine;
use crate::retry::RetryPolicy;
use crate::scenario;

/// The speech voice used for scenario narration.
const NARRATION_VOICE: &str = "Charon";

/// Facade over the generative backend with fallbacks for every call.
pub struct ContentService {
    backend: Option<GeminiClient>,
    prompts: PromptEngine,
    retry: RetryPolicy,
    text_model: String,
    image_model: String,
    tts_model: String,
}

impl ContentService {
    /// Build the service from configuration.
    ///
    /// Template problems surface here, at startup; a missing API key
    /// does not (the service then serves fallbacks only).
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Template`] if the prompt templates cannot
    /// be loaded.
    pub fn new(config: &ContentConfig) -> Result<Self, ContentError> {
        let backend = GeminiClient::from_config(config);
        if backend.is_none() {
            warn!("no API key configured, content service running on fallbacks only");
        }
        Ok(Self {
            backend,
            prompts: PromptEngine::new(&config.templates_dir)?,
            retry: RetryPolicy {
                max_attempts: config.max_attempts,
                base_delay: Duration::from_millis(config.retry_base_ms),
                max_jitter: Duration::from_millis(250),
            },
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            tts_model: config.tts_model.clone(),
        })
    }

    /// Whether a real backend is configured.
    pub const fn is_online(&self) -> bool {
        self.backend.is_some()
    }

    // -----------------------------------------------------------------------
    // Narrative
    // -----------------------------------------------------------------------

    /// Generate a stage scenario, or a canned one on any failure.
    pub async fn scenario(
        &self,
        stage: u32,
        difficulty: Difficulty,
        style: VisualStyle,
    ) -> StageScenario {
        let context = json!({
            "stage": stage,
            "difficulty": difficulty.to_string(),
            "style": style.to_string(),
        });
        match self.try_scenario(&context).await {
            Ok(generated) => generated,
            Err(e) => {
                log_fallback("scenario", &e);
                fallback::scenario(stage)
            }
        }
    }

    async fn try_scenario(
        &self,
        context: &serde_json::Value,
    ) -> Result<StageScenario, ContentError> {
        let backend = self.backend.as_ref().ok_or(ContentError::Offline)?;
        let prompt = self.prompts.render("scenario", context)?;
        let schema = scenario::response_schema();
        let raw = self
            .retry
            .run(|| backend.generate_json(&self.text_model, &prompt, &schema))
            .await?;
        scenario::parse_scenario(&raw)
    }

    /// Generate character lore, or the fog-of-quota line on failure.
    pub async fn lore(&self, name: &str, gender: Gender, style: VisualStyle) -> String {
        let context = json!({
            "name": name,
            "gender": gender.to_string(),
            "style": style.to_string(),
        });
        match self.try_text("lore", &context).await {
            Ok(text) => text,
            Err(e) => {
                log_fallback("lore", &e);
                fallback::LORE_FALLBACK.to_owned()
            }
        }
    }

    /// Generate a character name, or pick one offline.
    pub async fn character_name(&self, gender: Gender, style: VisualStyle) -> String {
        let context = json!({
            "gender": gender.to_string(),
            "style": style.to_string(),
        });
        match self.try_text("name", &context).await {
            Ok(text) => {
                let name = text.trim();
                if name.is_empty() {
                    fallback::character_name()
                } else {
                    name.to_owned()
                }
            }
            Err(e) => {
                log_fallback("character name", &e);
                fallback::character_name()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Chat
    // -----------------------------------------------------------------------

    /// The supervisor's checkpoint reply, or a canned scolding.
    pub async fn supervisor_reply(
        &self,
        player_name: &str,
        stage: u32,
        message: &str,
        style: VisualStyle,
    ) -> String {
        let context = json!({
            "player_name": player_name,
            "stage": stage,
            "message": message,
            "style": style.to_string(),
        });
        match self.try_text("supervisor", &context).await {
            Ok(text) => text.trim().to_owned(),
            Err(e) => {
                log_fallback("supervisor reply", &e);
                fallback::supervisor_reply()
            }
        }
    }

    /// An AI stand-in reply for a friend chat.
    pub async fn friend_reply(
        &self,
        friend_name: &str,
        message: &str,
        style: VisualStyle,
    ) -> String {
        let context = json!({
            "friend_name": friend_name,
            "message": message,
            "style": style.to_string(),
        });
        match self.try_text("friend", &context).await {
            Ok(text) => text.trim().to_owned(),
            Err(e) => {
                log_fallback("friend reply", &e);
                fallback::friend_reply(message)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Images
    // -----------------------------------------------------------------------

    /// Generate a character portrait, or the default portrait URL.
    pub async fn avatar(&self, gender: Gender, style: VisualStyle, wishes: &[String]) -> String {
        let context = json!({
            "gender": gender.to_string(),
            "style": style.to_string(),
            "wishes": wishes.join(", "),
        });
        match self.try_image("avatar", &context, "1:1").await {
            Ok(data_uri) => data_uri,
            Err(e) => {
                log_fallback("avatar", &e);
                fallback::DEFAULT_AVATAR_URL.to_owned()
            }
        }
    }

    /// Regenerate the portrait with a newly purchased item highlighted.
    ///
    /// Returns `None` on failure so the caller keeps the current
    /// portrait; the purchase itself is never affected.
    pub async fn avatar_with_item(
        &self,
        character: &Character,
        owned_item_names: &[String],
        new_item_name: &str,
    ) -> Option<String> {
        let context = json!({
            "name": character.name,
            "gender": character.gender.to_string(),
            "style": character.style.to_string(),
            "telekinesis_level": character.telekinesis_level,
            "wishes": character.wishes.join(", "),
            "owned_items": owned_item_names.join(", "),
            "new_item": new_item_name,
        });
        match self.try_image("avatar_edit", &context, "1:1").await {
            Ok(data_uri) => Some(data_uri),
            Err(e) => {
                log_fallback("avatar edit", &e);
                None
            }
        }
    }

    /// Generate a boss portrait, or the placeholder.
    pub async fn boss_portrait(&self, style: VisualStyle) -> String {
        let context = json!({"style": style.to_string()});
        match self.try_image("boss", &context, "1:1").await {
            Ok(data_uri) => data_uri,
            Err(e) => {
                log_fallback("boss portrait", &e);
                fallback::BOSS_PORTRAIT_URL.to_owned()
            }
        }
    }

    /// Generate a floor backdrop, or a seeded placeholder.
    pub async fn stage_background(&self, stage: u32, style: VisualStyle) -> String {
        let context = json!({"stage": stage, "style": style.to_string()});
        match self.try_image("background", &context, "16:9").await {
            Ok(data_uri) => data_uri,
            Err(e) => {
                log_fallback("stage background", &e);
                fallback::stage_background(stage)
            }
        }
    }

    /// Generate the global interface background, or the placeholder.
    pub async fn global_background(
        &self,
        interior_style: &str,
        style: VisualStyle,
        theme: &str,
    ) -> String {
        let context = json!({
            "interior_style": interior_style,
            "style": style.to_string(),
            "theme": theme,
        });
        match self.try_image("global_background", &context, "16:9").await {
            Ok(data_uri) => data_uri,
            Err(e) => {
                log_fallback("global background", &e);
                fallback::GLOBAL_BACKGROUND_URL.to_owned()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Speech
    // -----------------------------------------------------------------------

    /// Narrate a scenario line in the spooky voice.
    ///
    /// Returns `None` on any failure; the client then falls back to its
    /// own speech synthesis.
    pub async fn narration(&self, text: &str) -> Option<String> {
        let backend = self.backend.as_ref()?;
        let prompt = format!("Speak in a creepy, frightening voice: {text}");
        let result = self
            .retry
            .run(|| backend.generate_speech(&self.tts_model, &prompt, NARRATION_VOICE))
            .await;
        match result {
            Ok(data_uri) => Some(data_uri),
            Err(e) => {
                log_fallback("narration", &e);
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Shared plumbing
    // -----------------------------------------------------------------------

    /// Render a template and run a retried text generation.
    async fn try_text(
        &self,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String, ContentError> {
        let backend = self.backend.as_ref().ok_or(ContentError::Offline)?;
        let prompt = self.prompts.render(template, context)?;
        self.retry
            .run(|| backend.generate_text(&self.text_model, &prompt))
            .await
    }

    /// Render a template and run a retried image generation.
    async fn try_image(
        &self,
        template: &str,
        context: &serde_json::Value,
        aspect_ratio: &str,
    ) -> Result<String, ContentError> {
        let backend = self.backend.as_ref().ok_or(ContentError::Offline)?;
        let prompt = self.prompts.render(template, context)?;
        self.retry
            .run(|| backend.generate_image(&self.image_model, &prompt, aspect_ratio))
            .await
    }
}

/// Log a substitution. Offline mode is routine and stays at debug.
fn log_fallback(what: &str, error: &ContentError) {
    if matches!(error, ContentError::Offline) {
        debug!(what, "offline, serving fallback");
    } else {
        warn!(what, error = %error, "generation failed, serving fallback");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an offline service over throwaway templates.
    fn offline_service() -> Option<(ContentService, std::path::PathBuf)> {
        let unique = format!(
            "babai_service_test_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        for name in [
            "scenario",
            "lore",
            "name",
            "avatar",
            "avatar_edit",
            "boss",
            "background",
            "global_background",
            "supervisor",
            "friend",
        ] {
            std::fs::write(dir.join(format!("{name}.j2")), "stub {{ style }}").ok();
        }
        let config = ContentConfig::offline(dir.to_str().unwrap_or(""));
        ContentService::new(&config).ok().map(|s| (s, dir))
    }

    #[tokio::test]
    async fn offline_scenario_is_the_canned_one() {
        let Some((service, dir)) = offline_service() else {
            return;
        };
        assert!(!service.is_online());

        let scenario = service
            .scenario(7, Difficulty::Hard, VisualStyle::Horror)
            .await;
        assert_eq!(scenario.options.len(), 3);
        assert!(scenario.text.contains("Floor 7"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn offline_avatar_is_the_default_portrait() {
        let Some((service, dir)) = offline_service() else {
            return;
        };
        let url = service
            .avatar(Gender::Babay, VisualStyle::PostSoviet, &[])
            .await;
        assert_eq!(url, fallback::DEFAULT_AVATAR_URL);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn offline_narration_is_absent() {
        let Some((service, dir)) = offline_service() else {
            return;
        };
        assert!(service.narration("Boo.").await.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn offline_avatar_edit_keeps_current_portrait() {
        let Some((service, dir)) = offline_service() else {
            return;
        };
        let character = Character {
            name: String::from("Zhmykh"),
            gender: Gender::Babay,
            style: VisualStyle::PostSoviet,
            wishes: vec![],
            avatar_url: String::from("current"),
            telekinesis_level: 1,
            lore: None,
        };
        let refreshed = service
            .avatar_with_item(&character, &[String::from("Haunted Samovar")], "Vine Whip")
            .await;
        assert!(refreshed.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
