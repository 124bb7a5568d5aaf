//! The shop catalog.
//!
//! A fixed list of cosmetic items: fear-priced goods that dress up the
//! spirit's portrait, and watermelon-priced boss gear. Item ids are the
//! stable keys stored in the inventory set.

use babai_types::{Currency, ItemKind, ShopItem};

/// Catalog row: (id, name, kind, icon, description, cost, currency).
type Row = (
    &'static str,
    &'static str,
    ItemKind,
    &'static str,
    &'static str,
    u64,
    Currency,
);

const ROWS: [Row; 12] = [
    (
        "felt_slippers",
        "Felt Slippers",
        ItemKind::Clothing,
        "🥿",
        "Absolutely silent on parquet. Tenants hear nothing until it is too late.",
        25,
        Currency::Fear,
    ),
    (
        "tongue_wax",
        "Tongue Wax",
        ItemKind::Artifact,
        "👅",
        "Keeps the meter-long tongue glossy and quick.",
        30,
        Currency::Fear,
    ),
    (
        "ushanka",
        "Moth-Eaten Ushanka",
        ItemKind::Clothing,
        "🧢",
        "Radiates the cold of a thousand stairwells.",
        50,
        Currency::Fear,
    ),
    (
        "night_lamp",
        "Flickering Night Lamp",
        ItemKind::Household,
        "🪔",
        "Flickers in morse code. Nobody has decoded it and slept well.",
        60,
        Currency::Fear,
    ),
    (
        "samovar",
        "Haunted Samovar",
        ItemKind::Household,
        "🫖",
        "Whistles lullabies backwards at three in the morning.",
        75,
        Currency::Fear,
    ),
    (
        "wall_carpet",
        "Wall Carpet",
        ItemKind::Household,
        "🧶",
        "The pattern rearranges itself when nobody watches.",
        90,
        Currency::Fear,
    ),
    (
        "dentures",
        "Chattering Dentures",
        ItemKind::Artifact,
        "🦷",
        "Chatter from inside the cupboard. Sometimes answer questions.",
        120,
        Currency::Fear,
    ),
    (
        "tv_remote",
        "Poltergeist Remote",
        ItemKind::Artifact,
        "📺",
        "Changes the channel to static. Any channel. Any television.",
        150,
        Currency::Fear,
    ),
    (
        "melon_armor",
        "Watermelon Rind Armor",
        ItemKind::BossGear,
        "🍉",
        "Layered rind plating. Smells faintly of August.",
        40,
        Currency::Watermelons,
    ),
    (
        "seed_blaster",
        "Seed Blaster",
        ItemKind::BossGear,
        "🌱",
        "Full-auto. Spits seeds faster than a summer picnic.",
        60,
        Currency::Watermelons,
    ),
    (
        "vine_whip",
        "Vine Whip",
        ItemKind::BossGear,
        "🌿",
        "Reaches across the whole stairwell landing.",
        85,
        Currency::Watermelons,
    ),
    (
        "rind_crown",
        "Crown of Rinds",
        ItemKind::BossGear,
        "👑",
        "Marks the one boss the other bosses fear.",
        120,
        Currency::Watermelons,
    ),
];

/// The full shop catalog.
pub fn shop_items() -> Vec<ShopItem> {
    ROWS.iter()
        .map(|&(id, name, kind, icon, description, cost, currency)| ShopItem {
            id: id.to_owned(),
            name: name.to_owned(),
            kind,
            icon: icon.to_owned(),
            description: description.to_owned(),
            cost,
            currency,
        })
        .collect()
}

/// Look up a catalog item by id.
pub fn find_item(id: &str) -> Option<ShopItem> {
    ROWS.iter()
        .find(|row| row.0 == id)
        .map(|&(id, name, kind, icon, description, cost, currency)| ShopItem {
            id: id.to_owned(),
            name: name.to_owned(),
            kind,
            icon: icon.to_owned(),
            description: description.to_owned(),
            cost,
            currency,
        })
}
