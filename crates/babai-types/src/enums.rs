//! Enumeration types for the Babai game.
//!
//! Closed vocabularies shared between the state machine, the content
//! adapters, and the HTTP layer: currencies, difficulties, visual styles,
//! and the client-facing settings enums.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Currencies
// ---------------------------------------------------------------------------

/// A virtual currency tracked on the player state.
///
/// Every balance is a non-negative integer. `Fear` is earned by scaring
/// tenants, `Energy` gates session starts and regenerates over real time,
/// `Watermelons` come from boss kills and buy boss gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// Primary currency, earned via correct stage choices.
    Fear,
    /// Action-gating currency, regenerates one unit per tick interval.
    Energy,
    /// Premium currency, earned by defeating bosses.
    Watermelons,
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Fear => "fear",
            Self::Energy => "energy",
            Self::Watermelons => "watermelons",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Difficulty tier chosen when starting a game session.
///
/// Difficulty controls the energy cost to start and the number of stages
/// before the run ends (`Endless` has no stage limit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// 15 stages, cheapest entry.
    Hard,
    /// 45 stages.
    Impossible,
    /// No stage limit, premium entry cost.
    Endless,
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Hard => "hard",
            Self::Impossible => "impossible",
            Self::Endless => "endless",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// The spirit's gender, which flavors name and portrait generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// The old-man spirit.
    Babay,
    /// The old-woman spirit.
    Babayka,
}

impl core::fmt::Display for Gender {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Babay => "Babay (old man)",
            Self::Babayka => "Babayka (old woman)",
        };
        write!(f, "{name}")
    }
}

/// Visual style applied to every generated text, image, and scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum VisualStyle {
    /// Photorealistic renders.
    Photoreal,
    /// Straight horror.
    Horror,
    /// Brass and steam.
    Steampunk,
    /// Neon and chrome.
    Cyberpunk,
    /// Anime linework.
    Anime,
    /// Concrete-panel post-Soviet gloom.
    PostSoviet,
    /// Slavic folk tale illustration.
    SlavicFolkTale,
    /// Flat 2D cartoon.
    Cartoon2d,
    /// Rural fantasy village.
    FantasyVillage,
}

impl core::fmt::Display for VisualStyle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Photoreal => "photorealistic",
            Self::Horror => "horror",
            Self::Steampunk => "steampunk",
            Self::Cyberpunk => "cyberpunk",
            Self::Anime => "anime",
            Self::PostSoviet => "post-soviet",
            Self::SlavicFolkTale => "slavic folk tale",
            Self::Cartoon2d => "2d cartoon",
            Self::FantasyVillage => "fantasy village",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Quests and shop
// ---------------------------------------------------------------------------

/// Whether a quest resets daily or spans the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    /// Short-cycle quest.
    Daily,
    /// Long-running quest.
    Global,
}

/// Category of a purchasable shop item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Worn by the spirit; shows up on the generated portrait.
    Clothing,
    /// Haunted household props.
    Household,
    /// Supernatural trinkets.
    Artifact,
    /// Equipment for boss encounters, priced in watermelons.
    BossGear,
}

// ---------------------------------------------------------------------------
// Client settings
// ---------------------------------------------------------------------------

/// Button sizing preference for the client UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ButtonSize {
    /// Compact buttons.
    Small,
    /// Default sizing.
    #[default]
    Medium,
    /// Oversized touch targets.
    Large,
}

/// Font family preference for the client UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Default sans.
    #[default]
    Inter,
    /// Roboto sans.
    Roboto,
    /// Montserrat display sans.
    Montserrat,
    /// Playfair Display serif (headers).
    PlayfairDisplay,
    /// Monospace.
    JetBrainsMono,
    /// Pixel font.
    PressStart2p,
    /// Russo One display.
    RussoOne,
    /// Handwritten.
    Neucha,
    /// Ornamental Cyrillic display.
    RuslanDisplay,
}

/// Interface color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// The default dark horror theme.
    #[default]
    Normal,
    /// Neon cyberpunk accents.
    Cyberpunk,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_serializes_snake_case() {
        let json = serde_json::to_string(&Currency::Watermelons).unwrap_or_default();
        assert_eq!(json, "\"watermelons\"");
    }

    #[test]
    fn difficulty_roundtrips() {
        let parsed: Result<Difficulty, _> = serde_json::from_str("\"impossible\"");
        assert_eq!(parsed.ok(), Some(Difficulty::Impossible));
    }

    #[test]
    fn defaults_match_original_client() {
        assert_eq!(ButtonSize::default(), ButtonSize::Medium);
        assert_eq!(FontFamily::default(), FontFamily::Inter);
        assert_eq!(Theme::default(), Theme::Normal);
    }
}
