//! Shared type definitions for the Babai game service.
//!
//! This crate is the single source of truth for the data shapes used
//! across the workspace. Types defined here flow downstream to
//! `TypeScript` via `ts-rs` for the game's web client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for server-generated identifiers
//! - [`enums`] -- Closed vocabularies (currencies, difficulties, styles)
//! - [`player`] -- The durable [`PlayerState`] and its component structs
//! - [`shop`] -- Shop catalog entries
//! - [`content`] -- Generated-content payloads

pub mod content;
pub mod enums;
pub mod ids;
pub mod player;
pub mod shop;

// Re-export all public types at crate root for convenience.
pub use content::StageScenario;
pub use enums::{
    ButtonSize, Currency, Difficulty, FontFamily, Gender, ItemKind, QuestKind, Theme, VisualStyle,
};
pub use ids::{GroupChatId, SessionId};
pub use player::{Character, Friend, GroupChat, PlayerState, Quest, QuestReward, Settings};
pub use shop::ShopItem;

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::GroupChatId::export_all();
        let _ = crate::ids::SessionId::export_all();

        // Enums
        let _ = crate::enums::Currency::export_all();
        let _ = crate::enums::Difficulty::export_all();
        let _ = crate::enums::Gender::export_all();
        let _ = crate::enums::VisualStyle::export_all();
        let _ = crate::enums::QuestKind::export_all();
        let _ = crate::enums::ItemKind::export_all();
        let _ = crate::enums::ButtonSize::export_all();
        let _ = crate::enums::FontFamily::export_all();
        let _ = crate::enums::Theme::export_all();

        // Structs
        let _ = crate::player::PlayerState::export_all();
        let _ = crate::player::Character::export_all();
        let _ = crate::player::Quest::export_all();
        let _ = crate::player::Friend::export_all();
        let _ = crate::player::GroupChat::export_all();
        let _ = crate::player::Settings::export_all();
        let _ = crate::shop::ShopItem::export_all();
        let _ = crate::content::StageScenario::export_all();
    }
}
