//! Shop catalog entry type.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Currency, ItemKind};

/// A purchasable cosmetic item.
///
/// Items are bought at most once; ownership is tracked by id in the
/// player's inventory set. Clothing and artifact purchases feed the
/// avatar-refresh side effect so the new item appears on the portrait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ShopItem {
    /// Stable item id (e.g. `"felt_slippers"`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Item category.
    pub kind: ItemKind,
    /// Emoji icon shown on the shop card.
    pub icon: String,
    /// Flavor description.
    pub description: String,
    /// Purchase cost in `currency`.
    pub cost: u64,
    /// Which currency the item is priced in.
    pub currency: Currency,
}
