//! Friends, group chats, and achievements.

use babai_types::{Friend, GroupChat, GroupChatId, PlayerState};
use tracing::info;

use crate::error::StateError;

/// Add a friend to the roster.
///
/// # Errors
///
/// Returns [`StateError::OwnName`] if the name matches the player's
/// character, or [`StateError::FriendExists`] for a duplicate.
pub fn add_friend(state: &mut PlayerState, name: &str) -> Result<(), StateError> {
    let name = name.trim();
    if state
        .character
        .as_ref()
        .is_some_and(|c| c.name == name)
    {
        return Err(StateError::OwnName);
    }
    if state.friends.iter().any(|f| f.name == name) {
        return Err(StateError::FriendExists(name.to_owned()));
    }
    state.friends.push(Friend {
        name: name.to_owned(),
        is_ai_enabled: false,
    });
    info!(name, "friend added");
    Ok(())
}

/// Toggle a friend's AI stand-in. Returns the new flag value.
///
/// # Errors
///
/// Returns [`StateError::UnknownFriend`] if the name is not on the roster.
pub fn toggle_friend_ai(state: &mut PlayerState, name: &str) -> Result<bool, StateError> {
    let friend = state
        .friends
        .iter_mut()
        .find(|f| f.name == name)
        .ok_or_else(|| StateError::UnknownFriend(name.to_owned()))?;
    friend.is_ai_enabled = !friend.is_ai_enabled;
    Ok(friend.is_ai_enabled)
}

/// Look up a friend by name.
pub fn find_friend<'a>(state: &'a PlayerState, name: &str) -> Option<&'a Friend> {
    state.friends.iter().find(|f| f.name == name)
}

/// Create a group chat from roster members. Returns the new chat id.
///
/// # Errors
///
/// Returns [`StateError::EmptyGroup`] for a blank name or no members, or
/// [`StateError::UnknownFriend`] if any member is not on the roster.
pub fn create_group_chat(
    state: &mut PlayerState,
    name: &str,
    members: Vec<String>,
) -> Result<GroupChatId, StateError> {
    let name = name.trim();
    if name.is_empty() || members.is_empty() {
        return Err(StateError::EmptyGroup);
    }
    for member in &members {
        if !state.friends.iter().any(|f| &f.name == member) {
            return Err(StateError::UnknownFriend(member.clone()));
        }
    }
    let id = GroupChatId::new();
    state.group_chats.push(GroupChat {
        id,
        name: name.to_owned(),
        members,
    });
    info!(name, %id, "group chat created");
    Ok(id)
}

/// Record an achievement. Returns whether it was newly earned.
pub fn add_achievement(state: &mut PlayerState, id: &str) -> bool {
    state.achievements.insert(id.to_owned())
}
