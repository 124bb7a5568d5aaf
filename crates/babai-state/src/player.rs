//! Initial player state seeding.
//!
//! A fresh player gets the starting energy balance, the default gallery,
//! the supervisor on the friend roster, and the four launch quests.

use babai_types::{
    Currency, Friend, PlayerState, Quest, QuestKind, QuestReward, Settings,
};
use chrono::{DateTime, Utc};

use crate::config::EconomyTuning;
use crate::quests;

/// The images every fresh gallery starts with.
const DEFAULT_GALLERY: [&str; 5] = [
    "https://images.unsplash.com/photo-1505635552518-3448ff116af3?q=80&w=1080&auto=format&fit=crop",
    "https://i.ibb.co/BVgY7XrT/babai.png",
    "https://images.unsplash.com/photo-1519074002996-a69e7ac46a42?q=80&w=1080&auto=format&fit=crop",
    "https://picsum.photos/seed/boss/400/400",
    "https://picsum.photos/seed/babai/400/400",
];

/// The AI supervisor who is always on the roster.
pub const SUPERVISOR_NAME: &str = "DanAIl";

/// Build the state for a brand-new player.
///
/// `now` seeds the energy watermark so regeneration starts counting from
/// first launch.
pub fn new_player(now: DateTime<Utc>, tuning: &EconomyTuning) -> PlayerState {
    PlayerState {
        character: None,
        fear: 0,
        energy: tuning.starting_energy,
        watermelons: 0,
        boss_level: 1,
        last_energy_update: now,
        inventory: std::collections::BTreeSet::new(),
        gallery: DEFAULT_GALLERY.iter().map(|&url| url.to_owned()).collect(),
        achievements: std::collections::BTreeSet::new(),
        friends: vec![Friend {
            name: SUPERVISOR_NAME.to_owned(),
            is_ai_enabled: true,
        }],
        group_chats: Vec::new(),
        quests: launch_quests(),
        settings: Settings::default(),
        global_background_url: None,
    }
}

/// The four quests every new player starts with.
fn launch_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: String::from(quests::FIRST_FRIGHT),
            kind: QuestKind::Daily,
            title: String::from("First Fright"),
            description: String::from("Evict 5 tenants"),
            reward: QuestReward {
                currency: Currency::Fear,
                amount: 50,
            },
            completed: false,
            progress: 0,
            target: 5,
        },
        Quest {
            id: String::from(quests::TRIBUTE_COLLECTOR),
            kind: QuestKind::Daily,
            title: String::from("Tribute Collector"),
            description: String::from("Collect 3 watermelons"),
            reward: QuestReward {
                currency: Currency::Watermelons,
                amount: 3,
            },
            completed: false,
            progress: 0,
            target: 3,
        },
        Quest {
            id: String::from(quests::WATERMELON_MAGNATE),
            kind: QuestKind::Global,
            title: String::from("Watermelon Magnate"),
            description: String::from("Defeat a boss"),
            reward: QuestReward {
                currency: Currency::Watermelons,
                amount: 15,
            },
            completed: false,
            progress: 0,
            target: 1,
        },
        Quest {
            id: String::from(quests::TELEKINESIS_MASTER),
            kind: QuestKind::Global,
            title: String::from("Telekinesis Master"),
            description: String::from("Raise telekinesis to level 5"),
            reward: QuestReward {
                currency: Currency::Energy,
                amount: 100,
            },
            completed: false,
            progress: 0,
            target: 5,
        },
    ]
}

/// A minimal character for unit tests.
#[cfg(test)]
pub(crate) fn test_character() -> babai_types::Character {
    babai_types::Character {
        name: String::from("Zhmykh"),
        gender: babai_types::Gender::Babay,
        style: babai_types::VisualStyle::PostSoviet,
        wishes: vec![String::from("extra long tongue")],
        avatar_url: String::from("https://i.ibb.co/BVgY7XrT/babai.png"),
        telekinesis_level: 1,
        lore: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_player_matches_launch_balance() {
        let tuning = EconomyTuning::default();
        let now = Utc::now();
        let state = new_player(now, &tuning);

        assert_eq!(state.energy, 50);
        assert_eq!(state.fear, 0);
        assert_eq!(state.watermelons, 0);
        assert_eq!(state.boss_level, 1);
        assert_eq!(state.last_energy_update, now);
        assert!(state.character.is_none());
        assert_eq!(state.gallery.len(), 5);
        assert_eq!(state.quests.len(), 4);
        assert!(state.inventory.is_empty());
    }

    #[test]
    fn quest_ids_are_unique() {
        let tuning = EconomyTuning::default();
        let state = new_player(Utc::now(), &tuning);
        let mut ids: Vec<&str> = state.quests.iter().map(|q| q.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), state.quests.len());
    }

    #[test]
    fn state_roundtrips_through_json() {
        let tuning = EconomyTuning::default();
        let state = new_player(Utc::now(), &tuning);
        let json = serde_json::to_string(&state).unwrap_or_default();
        let back: Result<PlayerState, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(state));
    }
}
