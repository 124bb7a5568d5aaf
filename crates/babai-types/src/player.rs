//! Core player entity structs.
//!
//! [`PlayerState`] is the single durable record of the game: currencies,
//! character, inventory, gallery, quests, friends, and settings. It is
//! persisted as one JSON blob and mutated only through the transition
//! functions in `babai-state`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ButtonSize, Currency, FontFamily, Gender, QuestKind, Theme, VisualStyle};
use crate::ids::GroupChatId;

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// The player's spirit character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Character {
    /// Display name (player-chosen or generated).
    pub name: String,
    /// The spirit's gender.
    pub gender: Gender,
    /// Visual style applied to all generated content.
    pub style: VisualStyle,
    /// Free-text appearance wishes chosen at creation (at most four).
    pub wishes: Vec<String>,
    /// Current portrait: a URL or a base64 data URI.
    pub avatar_url: String,
    /// Telekinesis upgrade tier, starts at 1 and only increases.
    pub telekinesis_level: u32,
    /// Generated backstory, if the player requested one.
    pub lore: Option<String>,
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// The reward credited when a quest is claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuestReward {
    /// Which currency the reward pays out in.
    pub currency: Currency,
    /// Amount credited on claim.
    pub amount: u64,
}

/// A quest with monotone progress toward a fixed target.
///
/// Completion is a one-way transition gated by `progress >= target`;
/// claiming a completed quest credits [`QuestReward`] exactly once and
/// records an achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Quest {
    /// Stable quest id (e.g. `"first_fright"`).
    pub id: String,
    /// Daily or global.
    pub kind: QuestKind,
    /// Short display title.
    pub title: String,
    /// One-line description of what to do.
    pub description: String,
    /// Reward credited on claim.
    pub reward: QuestReward,
    /// Whether the reward has been claimed.
    pub completed: bool,
    /// Progress so far; never decreases and never exceeds `target`.
    pub progress: u64,
    /// Progress needed before the reward can be claimed.
    pub target: u64,
}

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

/// A friend on the player's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Friend {
    /// The friend's display name (unique on the roster).
    pub name: String,
    /// Whether an AI stand-in answers chat messages for this friend.
    pub is_ai_enabled: bool,
}

/// A group chat created by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GroupChat {
    /// Server-generated chat id.
    pub id: GroupChatId,
    /// Chat display name.
    pub name: String,
    /// Member names, drawn from the friend roster.
    pub members: Vec<String>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Client presentation settings, persisted with the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Settings {
    /// Button sizing preference.
    pub button_size: ButtonSize,
    /// Font family preference.
    pub font_family: FontFamily,
    /// Base font size in pixels.
    pub font_size: u8,
    /// Interface color theme.
    pub theme: Theme,
    /// Music volume, 0 to 100.
    pub music_volume: u8,
    /// Whether scenario narration audio is requested.
    pub tts_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            button_size: ButtonSize::Medium,
            font_family: FontFamily::Inter,
            font_size: 16,
            theme: Theme::Normal,
            music_volume: 50,
            tts_enabled: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Player state
// ---------------------------------------------------------------------------

/// The complete durable game state for one player.
///
/// Invariants maintained by the transition functions in `babai-state`:
/// 1. No currency balance ever goes negative (spends are guarded).
/// 2. `inventory` is a set: an item id appears at most once.
/// 3. `boss_level` and `character.telekinesis_level` only increase.
/// 4. `last_energy_update` advances in whole tick intervals only, so the
///    fractional remainder of a regeneration period is never lost.
/// 5. `gallery` is newest-first, deduplicated, and capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerState {
    /// The spirit character, absent until creation completes.
    pub character: Option<Character>,
    /// Fear balance.
    pub fear: u64,
    /// Energy balance.
    pub energy: u64,
    /// Watermelon balance.
    pub watermelons: u64,
    /// Boss upgrade tier, starts at 1 and only increases.
    pub boss_level: u32,
    /// Watermark for energy regeneration; advanced in whole ticks.
    pub last_energy_update: DateTime<Utc>,
    /// Owned shop item ids.
    pub inventory: BTreeSet<String>,
    /// Portrait and background gallery, newest-first, capped.
    pub gallery: Vec<String>,
    /// Earned achievement ids.
    pub achievements: BTreeSet<String>,
    /// Friend roster.
    pub friends: Vec<Friend>,
    /// Group chats the player created.
    pub group_chats: Vec<GroupChat>,
    /// Active quests.
    pub quests: Vec<Quest>,
    /// Client presentation settings.
    pub settings: Settings,
    /// Generated global background, if any.
    pub global_background_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults_match_original_client() {
        let s = Settings::default();
        assert_eq!(s.font_size, 16);
        assert_eq!(s.music_volume, 50);
        assert!(!s.tts_enabled);
    }

    #[test]
    fn quest_roundtrips_through_json() {
        let quest = Quest {
            id: String::from("first_fright"),
            kind: QuestKind::Daily,
            title: String::from("First Fright"),
            description: String::from("Evict 5 tenants"),
            reward: QuestReward {
                currency: Currency::Fear,
                amount: 50,
            },
            completed: false,
            progress: 2,
            target: 5,
        };
        let json = serde_json::to_string(&quest).unwrap_or_default();
        let back: Result<Quest, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(quest));
    }
}
