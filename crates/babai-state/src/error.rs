//! Error types for state transitions.
//!
//! Two families: [`EconomyError`] for guarded currency and tier mutations
//! (where "not enough" is a normal, user-correctable outcome carrying the
//! exact deficit), and [`StateError`] for quest and roster operations.

use babai_types::Currency;

/// Failures of guarded economy operations.
///
/// These are expected outcomes, not faults: the HTTP layer turns them
/// into structured responses (with the deficit for the "come back later"
/// dialog), never into 5xx errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    /// The balance does not cover the cost. No mutation happened.
    #[error("insufficient {currency}: need {cost}, have {balance} (short {deficit})")]
    Insufficient {
        /// The currency that ran short.
        currency: Currency,
        /// The full cost of the operation.
        cost: u64,
        /// The balance at the time of the attempt.
        balance: u64,
        /// Exactly how much is missing (`cost - balance`).
        deficit: u64,
    },

    /// The item is already in the inventory. No charge happened.
    #[error("item already owned: {item}")]
    AlreadyOwned {
        /// The offending item id.
        item: String,
    },

    /// The operation needs a created character.
    #[error("no character has been created yet")]
    NoCharacter,
}

/// Failures of quest and roster operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// No quest with the given id exists.
    #[error("unknown quest: {0}")]
    UnknownQuest(String),

    /// The quest's progress has not reached its target yet.
    #[error("quest not ready to claim: {id} ({progress}/{target})")]
    QuestNotReady {
        /// The quest id.
        id: String,
        /// Current progress.
        progress: u64,
        /// Required progress.
        target: u64,
    },

    /// The quest reward was already claimed.
    #[error("quest already claimed: {0}")]
    QuestAlreadyClaimed(String),

    /// A friend with this name is already on the roster.
    #[error("friend already added: {0}")]
    FriendExists(String),

    /// The player tried to befriend their own character.
    #[error("cannot add your own character as a friend")]
    OwnName,

    /// No friend with the given name is on the roster.
    #[error("unknown friend: {0}")]
    UnknownFriend(String),

    /// A group chat needs a name and at least one member.
    #[error("group chat needs a name and at least one member")]
    EmptyGroup,
}
