//! Guarded currency and inventory mutations.
//!
//! Every operation here is atomic within one call: it either applies
//! completely or leaves the state untouched and reports why. Spends are
//! guarded (balance checked before deducting), purchases are idempotent
//! per item, and upgrades are spend-then-increment, both-or-neither.

use babai_types::{Currency, PlayerState};
use tracing::{debug, info};

use crate::config::EconomyTuning;
use crate::error::EconomyError;
use crate::{quests, scaling};

/// Read the balance of a currency.
pub const fn balance(state: &PlayerState, currency: Currency) -> u64 {
    match currency {
        Currency::Fear => state.fear,
        Currency::Energy => state.energy,
        Currency::Watermelons => state.watermelons,
    }
}

/// Mutable access to the balance of a currency.
const fn balance_mut(state: &mut PlayerState, currency: Currency) -> &mut u64 {
    match currency {
        Currency::Fear => &mut state.fear,
        Currency::Energy => &mut state.energy,
        Currency::Watermelons => &mut state.watermelons,
    }
}

/// Credit a currency unconditionally. Returns the new balance.
pub fn earn(state: &mut PlayerState, currency: Currency, amount: u64) -> u64 {
    let slot = balance_mut(state, currency);
    *slot = slot.saturating_add(amount);
    let new_balance = *slot;
    debug!(%currency, amount, new_balance, "currency earned");
    new_balance
}

/// Deduct a currency iff the balance covers the amount.
///
/// Returns the new balance on success. On failure the state is untouched
/// and the error carries the exact deficit for the UI.
///
/// # Errors
///
/// Returns [`EconomyError::Insufficient`] when `balance < amount`.
pub fn spend(
    state: &mut PlayerState,
    currency: Currency,
    amount: u64,
) -> Result<u64, EconomyError> {
    let slot = balance_mut(state, currency);
    let current = *slot;
    let Some(remaining) = current.checked_sub(amount) else {
        return Err(EconomyError::Insufficient {
            currency,
            cost: amount,
            balance: current,
            deficit: amount.saturating_sub(current),
        });
    };
    *slot = remaining;
    debug!(%currency, amount, new_balance = remaining, "currency spent");
    Ok(remaining)
}

/// Buy an item: spend the cost and insert the item id, both-or-neither.
///
/// Returns the new balance of the purchase currency.
///
/// # Errors
///
/// Returns [`EconomyError::AlreadyOwned`] (before any charge) if the item
/// is in the inventory, or [`EconomyError::Insufficient`] if the balance
/// does not cover the cost.
pub fn purchase(
    state: &mut PlayerState,
    item_id: &str,
    cost: u64,
    currency: Currency,
) -> Result<u64, EconomyError> {
    if state.inventory.contains(item_id) {
        return Err(EconomyError::AlreadyOwned {
            item: item_id.to_owned(),
        });
    }
    let new_balance = spend(state, currency, cost)?;
    state.inventory.insert(item_id.to_owned());
    info!(item_id, cost, %currency, "item purchased");
    Ok(new_balance)
}

/// Upgrade telekinesis: spend the tier-scaled fear cost and raise the
/// tier, both-or-neither. Returns the new tier.
///
/// Also raises the telekinesis-mastery quest to the new tier.
///
/// # Errors
///
/// Returns [`EconomyError::NoCharacter`] if no character exists, or
/// [`EconomyError::Insufficient`] if fear does not cover the cost.
pub fn upgrade_telekinesis(
    state: &mut PlayerState,
    tuning: &EconomyTuning,
) -> Result<u32, EconomyError> {
    let current = state
        .character
        .as_ref()
        .map(|c| c.telekinesis_level)
        .ok_or(EconomyError::NoCharacter)?;

    let cost = scaling::telekinesis_cost(tuning, current);
    spend(state, Currency::Fear, cost)?;

    let new_level = current.saturating_add(1);
    if let Some(character) = state.character.as_mut() {
        character.telekinesis_level = new_level;
    }
    quests::raise_to(state, quests::TELEKINESIS_MASTER, u64::from(new_level));
    info!(new_level, cost, "telekinesis upgraded");
    Ok(new_level)
}

/// Upgrade the boss tier: spend the tier-scaled watermelon cost and raise
/// the tier, both-or-neither. Returns the new tier.
///
/// # Errors
///
/// Returns [`EconomyError::Insufficient`] if watermelons do not cover the
/// cost.
pub fn upgrade_boss(
    state: &mut PlayerState,
    tuning: &EconomyTuning,
) -> Result<u32, EconomyError> {
    let cost = scaling::boss_upgrade_cost(tuning, state.boss_level);
    spend(state, Currency::Watermelons, cost)?;
    state.boss_level = state.boss_level.saturating_add(1);
    info!(new_level = state.boss_level, cost, "boss tier upgraded");
    Ok(state.boss_level)
}

/// Record a boss kill: credit the tier-scaled watermelon reward and drive
/// the boss and tribute quests. Returns the reward credited.
pub fn defeat_boss(state: &mut PlayerState, tuning: &EconomyTuning) -> u64 {
    let reward = scaling::boss_reward(tuning, state.boss_level);
    earn(state, Currency::Watermelons, reward);
    quests::advance(state, quests::WATERMELON_MAGNATE, 1);
    quests::advance(state, quests::TRIBUTE_COLLECTOR, reward);
    info!(boss_level = state.boss_level, reward, "boss defeated");
    reward
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::new_player;
    use chrono::Utc;

    fn fresh() -> (PlayerState, EconomyTuning) {
        let tuning = EconomyTuning::default();
        (new_player(Utc::now(), &tuning), tuning)
    }

    #[test]
    fn earn_increases_balance() {
        let (mut state, _) = fresh();
        let balance_after = earn(&mut state, Currency::Fear, 40);
        assert_eq!(balance_after, 40);
        assert_eq!(state.fear, 40);
    }

    #[test]
    fn spend_succeeds_iff_covered() {
        let (mut state, _) = fresh();
        state.fear = 30;
        assert_eq!(spend(&mut state, Currency::Fear, 30).ok(), Some(0));
        assert_eq!(state.fear, 0);
    }

    #[test]
    fn spend_failure_leaves_balance_untouched() {
        let (mut state, _) = fresh();
        state.fear = 10;
        let result = spend(&mut state, Currency::Fear, 25);
        assert_eq!(
            result,
            Err(EconomyError::Insufficient {
                currency: Currency::Fear,
                cost: 25,
                balance: 10,
                deficit: 15,
            })
        );
        assert_eq!(state.fear, 10);
    }

    #[test]
    fn purchase_story_from_forty_fear() {
        // Start with 40 fear, fail to buy a 50-fear item (deficit 10),
        // earn 20, buy it, then get refused with "already owned".
        let (mut state, _) = fresh();
        state.fear = 40;

        let first = purchase(&mut state, "samovar", 50, Currency::Fear);
        assert_eq!(
            first,
            Err(EconomyError::Insufficient {
                currency: Currency::Fear,
                cost: 50,
                balance: 40,
                deficit: 10,
            })
        );
        assert!(!state.inventory.contains("samovar"));

        earn(&mut state, Currency::Fear, 20);
        assert_eq!(state.fear, 60);

        let second = purchase(&mut state, "samovar", 50, Currency::Fear);
        assert_eq!(second.ok(), Some(10));
        assert!(state.inventory.contains("samovar"));

        let third = purchase(&mut state, "samovar", 50, Currency::Fear);
        assert_eq!(
            third,
            Err(EconomyError::AlreadyOwned {
                item: String::from("samovar")
            })
        );
        assert_eq!(state.fear, 10);
    }

    #[test]
    fn failed_purchase_does_not_touch_inventory() {
        let (mut state, _) = fresh();
        state.watermelons = 5;
        let result = purchase(&mut state, "seed_blaster", 60, Currency::Watermelons);
        assert!(result.is_err());
        assert!(state.inventory.is_empty());
        assert_eq!(state.watermelons, 5);
    }

    #[test]
    fn telekinesis_upgrade_requires_character() {
        let (mut state, tuning) = fresh();
        state.fear = 1_000;
        let result = upgrade_telekinesis(&mut state, &tuning);
        assert_eq!(result, Err(EconomyError::NoCharacter));
        assert_eq!(state.fear, 1_000);
    }

    #[test]
    fn telekinesis_upgrade_spends_and_increments() {
        let (mut state, tuning) = fresh();
        state.character = Some(crate::player::test_character());
        state.fear = 60;
        let result = upgrade_telekinesis(&mut state, &tuning);
        assert_eq!(result.ok(), Some(2));
        assert_eq!(state.fear, 10);

        // Next tier costs 100; 10 fear is not enough and nothing changes.
        let blocked = upgrade_telekinesis(&mut state, &tuning);
        assert!(blocked.is_err());
        assert_eq!(state.fear, 10);
        assert_eq!(
            state.character.as_ref().map(|c| c.telekinesis_level),
            Some(2)
        );
    }

    #[test]
    fn boss_upgrade_spends_and_increments() {
        let (mut state, tuning) = fresh();
        state.watermelons = 3_000;
        assert_eq!(upgrade_boss(&mut state, &tuning).ok(), Some(2));
        assert_eq!(state.watermelons, 2_500);
        assert_eq!(upgrade_boss(&mut state, &tuning).ok(), Some(3));
        assert_eq!(state.watermelons, 0);
    }

    #[test]
    fn tiers_never_decrease() {
        let (mut state, tuning) = fresh();
        state.watermelons = 10;
        let before = state.boss_level;
        let _ = upgrade_boss(&mut state, &tuning);
        assert_eq!(state.boss_level, before);
    }

    #[test]
    fn defeating_boss_credits_scaled_reward() {
        let (mut state, tuning) = fresh();
        assert_eq!(defeat_boss(&mut state, &tuning), 25);
        assert_eq!(state.watermelons, 25);

        state.boss_level = 3;
        assert_eq!(defeat_boss(&mut state, &tuning), 100);
        assert_eq!(state.watermelons, 125);
    }
}
