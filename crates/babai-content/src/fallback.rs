//! Static fallback content.
//!
//! Whatever the backend does, gameplay continues: every adapter has a
//! deterministic substitute. Scenario fallbacks rotate by stage so an
//! offline run still varies a little.

use babai_types::StageScenario;
use rand::prelude::IndexedRandom;
use rand::Rng;

/// Default portrait used when avatar generation fails.
pub const DEFAULT_AVATAR_URL: &str = "https://i.ibb.co/BVgY7XrT/babai.png";

/// Placeholder boss portrait.
pub const BOSS_PORTRAIT_URL: &str = "https://picsum.photos/seed/boss/800/800";

/// Placeholder global background.
pub const GLOBAL_BACKGROUND_URL: &str = "https://picsum.photos/seed/globalbg/1920/1080";

/// Lore text when the backend cannot remember the past.
pub const LORE_FALLBACK: &str =
    "The past is hidden in fog. Somewhere between the ninth floor and the \
     basement, the memories ran out of quota.";

/// Name stems for offline character naming.
const NAME_STEMS: [&str; 6] = ["Babay", "Booka", "Zhmykh", "Cyber-Leshy", "Yaga-Bot", "Screech"];

/// Canned supervisor lines for offline checkpoints.
const SUPERVISOR_LINES: [&str; 4] = [
    "Too much talk, Babai. Back to work.",
    "Your reports are full of errors. Fix that on the next floor.",
    "I am watching you. Do not disappoint the system.",
    "Energy is not infinite. Hurry up with the evictions.",
];

/// Placeholder backdrop for a given floor.
pub fn stage_background(stage: u32) -> String {
    format!("https://picsum.photos/seed/floor{stage}/1920/1080?blur=2")
}

/// A canned scenario, rotated by stage number.
pub fn scenario(stage: u32) -> StageScenario {
    let scripts = [
        StageScenario {
            text: format!(
                "Floor {stage}. A tenant has locked themselves in the bathroom \
                 and is singing. What do you do?"
            ),
            options: vec![
                String::from("Slide your long tongue under the door"),
                String::from("Use telekinesis on the tap"),
                String::from("Howl loudly"),
            ],
            correct_answer: 1,
            success_text: String::from(
                "The water turned ice-cold, then boiled. The tenant bolted out \
                 of the bathroom in terror.",
            ),
            failure_text: String::from(
                "The tenant just sang louder, ignoring your efforts.",
            ),
        },
        StageScenario {
            text: format!(
                "Floor {stage}. A group of teenagers is summoning spirits in \
                 the stairwell."
            ),
            options: vec![
                String::from("Appear before them in pajamas"),
                String::from("Kill the lights in the whole building"),
                String::from("Levitate their phones"),
            ],
            correct_answer: 2,
            success_text: String::from(
                "The phones rose into the air and broadcast static. The \
                 teenagers scattered, dropping their caps.",
            ),
            failure_text: String::from(
                "They took you for a cosplayer and started taking selfies. \
                 The shame.",
            ),
        },
    ];
    let index = usize::try_from(stage).unwrap_or(0) % scripts.len();
    scripts
        .into_iter()
        .nth(index)
        .unwrap_or_else(|| scenario_of_last_resort(stage))
}

/// The scenario used if rotation ever fails to pick one.
fn scenario_of_last_resort(stage: u32) -> StageScenario {
    StageScenario {
        text: format!("Floor {stage}. A tenant stares at the wall. So do you."),
        options: vec![
            String::from("Knock from inside the wall"),
            String::from("Whisper the rent is doubling"),
            String::from("Wait"),
        ],
        correct_answer: 1,
        success_text: String::from("The tenant packed within the hour."),
        failure_text: String::from("The staring contest continues."),
    }
}

/// An offline character name: a stem plus a number.
pub fn character_name() -> String {
    let mut rng = rand::rng();
    let stem = NAME_STEMS.choose(&mut rng).copied().unwrap_or("Babay");
    let number: u32 = rng.random_range(0..100);
    format!("{stem} {number}")
}

/// An offline supervisor reply.
pub fn supervisor_reply() -> String {
    let mut rng = rand::rng();
    SUPERVISOR_LINES
        .choose(&mut rng)
        .copied()
        .unwrap_or("Keep working.")
        .to_owned()
}

/// An offline AI stand-in reply for a friend.
pub fn friend_reply(user_message: &str) -> String {
    format!(
        "(AI stand-in) Busy evicting tenants right now! But I got your \
         message: \"{user_message}\"."
    )
}
