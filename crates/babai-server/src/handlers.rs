//! REST API endpoint handlers for the game server.
//!
//! All handlers mutate the world through the transition functions in
//! `babai-state` while holding the single world lock, then persist the
//! save blob before responding. Economy refusals (insufficient balance,
//! already owned) are structured 200 responses, not errors.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/player` | Player state with derived costs |
//! | `POST` | `/api/player/reset` | Destructive reset to a fresh player |
//! | `POST` | `/api/character` | Create the character |
//! | `POST` | `/api/character/lore` | Generate and store the backstory |
//! | `POST` | `/api/session/start` | Spend energy, start a run |
//! | `GET` | `/api/session` | The active run |
//! | `POST` | `/api/session/answer` | Grade a stage choice |
//! | `POST` | `/api/session/message` | Chat with the supervisor |
//! | `POST` | `/api/session/continue` | Leave a checkpoint |
//! | `DELETE` | `/api/session` | Abandon the run |
//! | `POST` | `/api/boss/defeat` | Credit a boss kill |
//! | `GET` | `/api/shop` | Catalog with ownership and upgrade costs |
//! | `POST` | `/api/shop/buy` | Buy an item |
//! | `POST` | `/api/shop/upgrade/telekinesis` | Upgrade telekinesis |
//! | `POST` | `/api/shop/upgrade/boss` | Upgrade the boss tier |
//! | `GET` | `/api/quests` | Quest list |
//! | `POST` | `/api/quests/{id}/claim` | Claim a quest reward |
//! | `GET` | `/api/gallery` | Gallery images |
//! | `POST` | `/api/background` | Generate the global background |
//! | `GET` | `/api/friends` | Roster and group chats |
//! | `POST` | `/api/friends` | Add a friend |
//! | `POST` | `/api/friends/{name}/ai` | Toggle the AI stand-in |
//! | `POST` | `/api/friends/{name}/share-energy` | Gift energy |
//! | `POST` | `/api/friends/{name}/chat` | Message a friend |
//! | `GET` | `/api/friends/referral-link` | The invite link |
//! | `POST` | `/api/friends/referral-joined` | Credit a referral bonus |
//! | `POST` | `/api/chats/group` | Create a group chat |
//! | `GET` | `/api/leaderboard` | Ranking with the player spliced in |
//! | `PATCH` | `/api/settings` | Partial settings update |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use babai_state::{
    catalog, economy, energy, gallery, player, quests, roster, scaling, EconomyError, GameSession,
    StageTransition,
};
use babai_types::{
    Currency, Difficulty, Gender, GroupChatId, PlayerState, SessionId, Settings, ShopItem,
    StageScenario, Theme, VisualStyle,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::effects::Effect;
use crate::error::ApiError;
use crate::state::{ActiveSession, AppState};

/// Maximum number of appearance wishes at character creation.
const MAX_WISHES: usize = 4;

/// Static rivals on the leaderboard.
const RIVALS: [(&str, u64, &str); 4] = [
    ("Babayka_99", 15_000, "https://picsum.photos/seed/b1/100/100"),
    ("DarkLord", 12_400, "https://picsum.photos/seed/b2/100/100"),
    ("NightTerror", 10_200, "https://picsum.photos/seed/b3/100/100"),
    ("Screamer", 7_100, "https://picsum.photos/seed/b4/100/100"),
];

// ---------------------------------------------------------------------------
// Shared response shapes
// ---------------------------------------------------------------------------

/// The player state plus the derived numbers every screen shows.
#[derive(Debug, Serialize)]
pub struct PlayerView {
    /// The full durable state.
    pub player: PlayerState,
    /// Fear cost of the next telekinesis upgrade.
    pub telekinesis_upgrade_cost: u64,
    /// Watermelon cost of the next boss upgrade.
    pub boss_upgrade_cost: u64,
    /// Watermelons the current boss tier pays out.
    pub boss_reward: u64,
    /// Milliseconds until the next energy unit.
    pub next_energy_in_ms: i64,
}

/// A client-safe view of the active run.
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// Identifier for this run.
    pub id: SessionId,
    /// Chosen difficulty.
    pub difficulty: Difficulty,
    /// Current stage, 1-based.
    pub stage: u32,
    /// Evictions so far.
    pub score: u32,
    /// Whether the run is paused at a supervisor checkpoint.
    pub awaiting_supervisor: bool,
    /// Stage limit, absent for endless runs.
    pub stage_limit: Option<u32>,
    /// The scenario awaiting an answer, with the grading index redacted.
    pub scenario: Option<StageScenario>,
    /// Current backdrop.
    pub background_url: Option<String>,
}

impl SessionView {
    fn from_active(active: &ActiveSession) -> Self {
        Self {
            id: active.id,
            difficulty: active.session.difficulty,
            stage: active.session.stage,
            score: active.session.score,
            awaiting_supervisor: active.session.awaiting_supervisor,
            stage_limit: active.session.stage_limit(),
            scenario: active.scenario.as_ref().map(StageScenario::redacted),
            background_url: active.background_url.clone(),
        }
    }
}

/// Outcome of a purchase attempt.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    /// The item was bought and charged.
    Purchased {
        /// The item bought.
        item_id: String,
        /// Remaining balance of the purchase currency.
        balance: u64,
    },
    /// The item is already owned; nothing was charged.
    AlreadyOwned {
        /// The item in question.
        item_id: String,
    },
    /// The balance does not cover the cost; nothing was charged.
    Insufficient {
        /// The currency that ran short.
        currency: Currency,
        /// The full cost.
        cost: u64,
        /// The current balance.
        balance: u64,
        /// Exactly how much is missing.
        deficit: u64,
    },
}

/// Outcome of an upgrade attempt.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpgradeOutcome {
    /// The tier was raised.
    Upgraded {
        /// The new tier.
        level: u32,
        /// Cost of the following upgrade.
        next_cost: u64,
    },
    /// The balance does not cover the cost; nothing changed.
    Insufficient {
        /// The currency that ran short.
        currency: Currency,
        /// The full cost.
        cost: u64,
        /// The current balance.
        balance: u64,
        /// Exactly how much is missing.
        deficit: u64,
    },
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let world = state.world.read().await;
    let name = world
        .player
        .character
        .as_ref()
        .map_or_else(|| String::from("(no character)"), |c| c.name.clone());
    let fear = world.player.fear;
    let energy = world.player.energy;
    let watermelons = world.player.watermelons;
    let boss_level = world.player.boss_level;
    let backend = if state.content.is_online() {
        "online"
    } else {
        "fallbacks only"
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Babai</title>
    <style>
        body {{
            background: #0a0a0a;
            color: #d4d4d4;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #dc2626; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #737373; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #171717;
            border: 1px solid #262626;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #737373; font-size: 0.85rem; }}
        .metric .value {{ color: #dc2626; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #dc2626; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
    </style>
</head>
<body>
    <h1>Babai</h1>
    <p class="subtitle">horror-comedy eviction service -- content backend: {backend}</p>

    <div>
        <div class="metric"><div class="label">Spirit</div><div class="value">{name}</div></div>
        <div class="metric"><div class="label">Fear</div><div class="value">{fear}</div></div>
        <div class="metric"><div class="label">Energy</div><div class="value">{energy}</div></div>
        <div class="metric"><div class="label">Watermelons</div><div class="value">{watermelons}</div></div>
        <div class="metric"><div class="label">Boss tier</div><div class="value">{boss_level}</div></div>
    </div>

    <p>Try <a href="/api/player">/api/player</a>, <a href="/api/shop">/api/shop</a>,
       <a href="/api/quests">/api/quests</a>, <a href="/api/leaderboard">/api/leaderboard</a>.</p>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// `GET /api/player` -- catch up regeneration, then the full view.
pub async fn get_player(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PlayerView>, ApiError> {
    let now = Utc::now();
    let mut world = state.world.write().await;
    let credited = energy::regenerate(&mut world.player, now, &state.tuning);
    if credited > 0 {
        state.persist(&world.player).await?;
    }

    let telekinesis_level = world
        .player
        .character
        .as_ref()
        .map_or(1, |c| c.telekinesis_level);
    Ok(Json(PlayerView {
        telekinesis_upgrade_cost: scaling::telekinesis_cost(&state.tuning, telekinesis_level),
        boss_upgrade_cost: scaling::boss_upgrade_cost(&state.tuning, world.player.boss_level),
        boss_reward: scaling::boss_reward(&state.tuning, world.player.boss_level),
        next_energy_in_ms: energy::millis_until_next_unit(&world.player, now, &state.tuning),
        player: world.player.clone(),
    }))
}

/// `POST /api/player/reset` -- clear the save blob and start over.
pub async fn reset_player(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut world = state.world.write().await;
    state.store.reset().await?;
    world.player = player::new_player(Utc::now(), &state.tuning);
    world.session = None;
    state.persist(&world.player).await?;
    Ok(Json(serde_json::json!({"reset": true})))
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// Request body for `POST /api/character`.
#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    /// Optional explicit name; generated when absent.
    pub name: Option<String>,
    /// The spirit's gender.
    pub gender: Gender,
    /// Visual style for all generated content.
    pub style: VisualStyle,
    /// Appearance wishes, at most four.
    #[serde(default)]
    pub wishes: Vec<String>,
}

/// `POST /api/character` -- create the character with a generated
/// portrait.
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<Json<PlayerView>, ApiError> {
    if request.wishes.len() > MAX_WISHES {
        return Err(ApiError::InvalidRequest(format!(
            "at most {MAX_WISHES} wishes allowed"
        )));
    }

    let mut world = state.world.write().await;
    if world.player.character.is_some() {
        return Err(ApiError::Conflict(String::from(
            "character already created; reset first",
        )));
    }

    let name = match request.name.map(|n| n.trim().to_owned()) {
        Some(n) if !n.is_empty() => n,
        _ => state.content.character_name(request.gender, request.style).await,
    };
    let avatar_url = state
        .content
        .avatar(request.gender, request.style, &request.wishes)
        .await;

    world.player.character = Some(babai_types::Character {
        name,
        gender: request.gender,
        style: request.style,
        wishes: request.wishes,
        avatar_url: avatar_url.clone(),
        telekinesis_level: 1,
        lore: None,
    });
    let cap = state.tuning.gallery_cap;
    gallery::add(&mut world.player, avatar_url, cap);
    state.persist(&world.player).await?;

    let now = Utc::now();
    Ok(Json(PlayerView {
        telekinesis_upgrade_cost: scaling::telekinesis_cost(&state.tuning, 1),
        boss_upgrade_cost: scaling::boss_upgrade_cost(&state.tuning, world.player.boss_level),
        boss_reward: scaling::boss_reward(&state.tuning, world.player.boss_level),
        next_energy_in_ms: energy::millis_until_next_unit(&world.player, now, &state.tuning),
        player: world.player.clone(),
    }))
}

/// `POST /api/character/lore` -- generate and store the backstory.
pub async fn generate_lore(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut world = state.world.write().await;
    let (name, gender, style) = world
        .player
        .character
        .as_ref()
        .map(|c| (c.name.clone(), c.gender, c.style))
        .ok_or_else(|| ApiError::Conflict(String::from("create a character first")))?;

    let lore = state.content.lore(&name, gender, style).await;
    if let Some(character) = world.player.character.as_mut() {
        character.lore = Some(lore.clone());
    }
    state.persist(&world.player).await?;
    Ok(Json(serde_json::json!({"lore": lore})))
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Request body for `POST /api/session/start`.
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Difficulty for the run.
    pub difficulty: Difficulty,
}

/// Response for `POST /api/session/start`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StartSessionResponse {
    /// The run started; energy was spent.
    Started {
        /// The new run.
        session: SessionView,
        /// Narration audio for the first scenario, when TTS is enabled.
        narration: Option<String>,
    },
    /// Not enough energy; nothing was spent.
    InsufficientEnergy {
        /// The energy cost of this difficulty.
        cost: u64,
        /// Current energy balance.
        balance: u64,
        /// Exactly how much is missing.
        deficit: u64,
    },
}

/// `POST /api/session/start` -- spend energy and open stage 1.
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, ApiError> {
    let now = Utc::now();
    let mut world = state.world.write().await;
    let style = world
        .player
        .character
        .as_ref()
        .map(|c| c.style)
        .ok_or_else(|| ApiError::Conflict(String::from("create a character first")))?;

    // Opportunistic catch-up before the guard, so a player who waited
    // out the regen timer is not refused stale-ly.
    let _ = energy::regenerate(&mut world.player, now, &state.tuning);

    let cost = scaling::session_energy_cost(&state.tuning, request.difficulty);
    match economy::spend(&mut world.player, Currency::Energy, cost) {
        Err(EconomyError::Insufficient {
            cost,
            balance,
            deficit,
            ..
        }) => {
            return Ok(Json(StartSessionResponse::InsufficientEnergy {
                cost,
                balance,
                deficit,
            }));
        }
        Err(e) => return Err(ApiError::Internal(e.to_string())),
        Ok(_) => {}
    }

    let session = GameSession::new(request.difficulty);
    let scenario = state.content.scenario(1, request.difficulty, style).await;
    let background_url = Some(state.content.stage_background(1, style).await);
    let narration = if world.player.settings.tts_enabled {
        state.content.narration(&scenario.text).await
    } else {
        None
    };

    world.session = Some(ActiveSession {
        id: SessionId::new(),
        session,
        scenario: Some(scenario),
        background_url,
    });
    state.persist(&world.player).await?;

    let view = world
        .session
        .as_ref()
        .map(SessionView::from_active)
        .ok_or_else(|| ApiError::Internal(String::from("session vanished")))?;
    Ok(Json(StartSessionResponse::Started {
        session: view,
        narration,
    }))
}

/// `GET /api/session` -- the active run.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let world = state.world.read().await;
    world
        .session
        .as_ref()
        .map(SessionView::from_active)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(String::from("no active session")))
}

/// `DELETE /api/session` -- abandon the run.
pub async fn end_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut world = state.world.write().await;
    if world.session.take().is_none() {
        return Err(ApiError::NotFound(String::from("no active session")));
    }
    Ok(Json(serde_json::json!({"ended": true})))
}

/// Request body for `POST /api/session/answer`.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Index of the chosen option.
    pub choice: usize,
}

/// What the run does after an answer.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextStep {
    /// The next stage's scenario.
    Scenario {
        /// The stage about to be played.
        stage: u32,
        /// The scenario, with the grading index redacted.
        scenario: StageScenario,
        /// New backdrop, when one was generated.
        background_url: Option<String>,
        /// Narration audio, when TTS is enabled.
        narration: Option<String>,
    },
    /// The supervisor wants a word.
    SupervisorCheckpoint {
        /// The checkpoint stage.
        stage: u32,
        /// The supervisor's opening line.
        greeting: String,
    },
    /// The run is over.
    Finished {
        /// Stages the difficulty allowed.
        stages_cleared: u32,
        /// Total successful evictions.
        evicted: u32,
    },
}

/// Response for `POST /api/session/answer`.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// Whether the choice evicted the tenant.
    pub correct: bool,
    /// Fear credited for this answer.
    pub fear_earned: u64,
    /// The success or failure narration for this stage.
    pub outcome_text: String,
    /// Evictions so far this run.
    pub score: u32,
    /// Where the run goes next.
    pub next: NextStep,
}

/// `POST /api/session/answer` -- grade a choice and advance the run.
pub async fn answer_stage(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let mut world = state.world.write().await;

    let (style, telekinesis_level, player_name) = world
        .player
        .character
        .as_ref()
        .map(|c| (c.style, c.telekinesis_level, c.name.clone()))
        .ok_or_else(|| ApiError::Conflict(String::from("create a character first")))?;

    let Some(active) = world.session.as_mut() else {
        return Err(ApiError::NotFound(String::from("no active session")));
    };
    if active.session.awaiting_supervisor {
        return Err(ApiError::Conflict(String::from(
            "the supervisor is waiting; continue the checkpoint first",
        )));
    }
    let Some(scenario) = active.scenario.take() else {
        return Err(ApiError::Conflict(String::from("no scenario to answer")));
    };
    if request.choice >= scenario.options.len() {
        // Put the scenario back; the stage is still live.
        active.scenario = Some(scenario);
        return Err(ApiError::InvalidRequest(String::from(
            "choice index out of range",
        )));
    }

    let correct = request.choice == scenario.correct_answer;
    let outcome_text = if correct {
        scenario.success_text.clone()
    } else {
        scenario.failure_text.clone()
    };
    if correct {
        active.session.record_eviction();
    }
    let difficulty = active.session.difficulty;
    let transition = active.session.advance();
    let score = active.session.score;

    let mut fear_earned = 0;
    if correct {
        fear_earned = scaling::fear_per_eviction(&state.tuning, telekinesis_level);
    }

    let next = match transition {
        StageTransition::Finished { stages_cleared } => {
            world.session = None;
            NextStep::Finished {
                stages_cleared,
                evicted: score,
            }
        }
        StageTransition::SupervisorCheckpoint { stage } => {
            // No scenario at a checkpoint; the chat takes its place.
            NextStep::SupervisorCheckpoint {
                stage,
                greeting: format!("Well, {player_name}, how goes it on floor {stage}?"),
            }
        }
        StageTransition::Scenario { stage, .. } => {
            let next_scenario = state.content.scenario(stage, difficulty, style).await;
            let narration = if world.player.settings.tts_enabled {
                state.content.narration(&next_scenario.text).await
            } else {
                None
            };
            let redacted = next_scenario.redacted();
            if let Some(active) = world.session.as_mut() {
                active.scenario = Some(next_scenario);
            }
            NextStep::Scenario {
                stage,
                scenario: redacted,
                background_url: None,
                narration,
            }
        }
    };

    if correct {
        economy::earn(&mut world.player, Currency::Fear, fear_earned);
        quests::advance(&mut world.player, quests::FIRST_FRIGHT, 1);
    }
    state.persist(&world.player).await?;

    Ok(Json(AnswerResponse {
        correct,
        fear_earned,
        outcome_text,
        score,
        next,
    }))
}

/// Request body for `POST /api/session/message`.
#[derive(Debug, Deserialize)]
pub struct SupervisorMessageRequest {
    /// The player's message to the supervisor.
    pub text: String,
}

/// `POST /api/session/message` -- chat with the supervisor at a
/// checkpoint.
pub async fn supervisor_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SupervisorMessageRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let world = state.world.read().await;
    let (name, style) = world
        .player
        .character
        .as_ref()
        .map(|c| (c.name.clone(), c.style))
        .ok_or_else(|| ApiError::Conflict(String::from("create a character first")))?;
    let Some(active) = world.session.as_ref() else {
        return Err(ApiError::NotFound(String::from("no active session")));
    };
    if !active.session.awaiting_supervisor {
        return Err(ApiError::Conflict(String::from(
            "the supervisor only chats at checkpoints",
        )));
    }
    let stage = active.session.stage;
    drop(world);

    let reply = state
        .content
        .supervisor_reply(&name, stage, &request.text, style)
        .await;
    Ok(Json(serde_json::json!({"reply": reply})))
}

/// `POST /api/session/continue` -- leave the checkpoint and play on.
pub async fn continue_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let mut world = state.world.write().await;
    let style = world
        .player
        .character
        .as_ref()
        .map(|c| c.style)
        .ok_or_else(|| ApiError::Conflict(String::from("create a character first")))?;

    let Some(active) = world.session.as_mut() else {
        return Err(ApiError::NotFound(String::from("no active session")));
    };
    if !active.session.awaiting_supervisor {
        return Err(ApiError::Conflict(String::from("no checkpoint to leave")));
    }
    let difficulty = active.session.difficulty;
    let transition = active.session.resume();
    let score = active.session.score;

    let next = match transition {
        StageTransition::Finished { stages_cleared } => {
            world.session = None;
            NextStep::Finished {
                stages_cleared,
                evicted: score,
            }
        }
        StageTransition::SupervisorCheckpoint { stage } => NextStep::SupervisorCheckpoint {
            stage,
            greeting: String::from("Still here?"),
        },
        StageTransition::Scenario {
            stage,
            fresh_background,
        } => {
            let next_scenario = state.content.scenario(stage, difficulty, style).await;
            let background_url = if fresh_background {
                Some(state.content.stage_background(stage, style).await)
            } else {
                None
            };
            let narration = if world.player.settings.tts_enabled {
                state.content.narration(&next_scenario.text).await
            } else {
                None
            };
            let redacted = next_scenario.redacted();
            if let Some(active) = world.session.as_mut() {
                active.scenario = Some(next_scenario);
                if background_url.is_some() {
                    active.background_url = background_url.clone();
                }
            }
            NextStep::Scenario {
                stage,
                scenario: redacted,
                background_url,
                narration,
            }
        }
    };

    Ok(Json(AnswerResponse {
        correct: false,
        fear_earned: 0,
        outcome_text: String::new(),
        score,
        next,
    }))
}

// ---------------------------------------------------------------------------
// Boss
// ---------------------------------------------------------------------------

/// `POST /api/boss/defeat` -- credit a boss kill.
pub async fn defeat_boss(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut world = state.world.write().await;
    let style = world
        .player
        .character
        .as_ref()
        .map(|c| c.style)
        .ok_or_else(|| ApiError::Conflict(String::from("create a character first")))?;

    let reward = economy::defeat_boss(&mut world.player, &state.tuning);
    state.persist(&world.player).await?;
    let watermelons = world.player.watermelons;
    let boss_level = world.player.boss_level;
    drop(world);

    let portrait_url = state.content.boss_portrait(style).await;
    Ok(Json(serde_json::json!({
        "reward": reward,
        "watermelons": watermelons,
        "boss_level": boss_level,
        "portrait_url": portrait_url,
    })))
}

// ---------------------------------------------------------------------------
// Shop
// ---------------------------------------------------------------------------

/// A catalog entry with ownership.
#[derive(Debug, Serialize)]
pub struct ShopListing {
    /// The catalog item.
    #[serde(flatten)]
    pub item: ShopItem,
    /// Whether the player already owns it.
    pub owned: bool,
}

/// Response for `GET /api/shop`.
#[derive(Debug, Serialize)]
pub struct ShopView {
    /// All purchasable items.
    pub items: Vec<ShopListing>,
    /// Current telekinesis tier.
    pub telekinesis_level: u32,
    /// Fear cost of the next telekinesis upgrade.
    pub telekinesis_upgrade_cost: u64,
    /// Current boss tier.
    pub boss_level: u32,
    /// Watermelon cost of the next boss upgrade.
    pub boss_upgrade_cost: u64,
    /// Watermelons the current boss tier pays out.
    pub boss_reward: u64,
}

/// `GET /api/shop` -- catalog with ownership flags and upgrade costs.
pub async fn get_shop(State(state): State<Arc<AppState>>) -> Json<ShopView> {
    let world = state.world.read().await;
    let telekinesis_level = world
        .player
        .character
        .as_ref()
        .map_or(1, |c| c.telekinesis_level);
    let items = catalog::shop_items()
        .into_iter()
        .map(|item| ShopListing {
            owned: world.player.inventory.contains(&item.id),
            item,
        })
        .collect();
    Json(ShopView {
        items,
        telekinesis_level,
        telekinesis_upgrade_cost: scaling::telekinesis_cost(&state.tuning, telekinesis_level),
        boss_level: world.player.boss_level,
        boss_upgrade_cost: scaling::boss_upgrade_cost(&state.tuning, world.player.boss_level),
        boss_reward: scaling::boss_reward(&state.tuning, world.player.boss_level),
    })
}

/// Request body for `POST /api/shop/buy`.
#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    /// The catalog item to buy.
    pub item_id: String,
}

/// `POST /api/shop/buy` -- buy an item; success queues an avatar
/// refresh.
pub async fn buy_item(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BuyRequest>,
) -> Result<Json<PurchaseOutcome>, ApiError> {
    let item = catalog::find_item(&request.item_id)
        .ok_or_else(|| ApiError::NotFound(format!("unknown item: {}", request.item_id)))?;

    let mut world = state.world.write().await;
    match economy::purchase(&mut world.player, &item.id, item.cost, item.currency) {
        Ok(balance) => {
            state.persist(&world.player).await?;
            state.enqueue_effect(Effect::RefreshAvatar {
                new_item_name: item.name,
            });
            Ok(Json(PurchaseOutcome::Purchased {
                item_id: item.id,
                balance,
            }))
        }
        Err(EconomyError::AlreadyOwned { item }) => {
            Ok(Json(PurchaseOutcome::AlreadyOwned { item_id: item }))
        }
        Err(EconomyError::Insufficient {
            currency,
            cost,
            balance,
            deficit,
        }) => Ok(Json(PurchaseOutcome::Insufficient {
            currency,
            cost,
            balance,
            deficit,
        })),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

/// `POST /api/shop/upgrade/telekinesis` -- raise the telekinesis tier.
pub async fn upgrade_telekinesis(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UpgradeOutcome>, ApiError> {
    let mut world = state.world.write().await;
    match economy::upgrade_telekinesis(&mut world.player, &state.tuning) {
        Ok(level) => {
            state.persist(&world.player).await?;
            Ok(Json(UpgradeOutcome::Upgraded {
                level,
                next_cost: scaling::telekinesis_cost(&state.tuning, level),
            }))
        }
        Err(EconomyError::Insufficient {
            currency,
            cost,
            balance,
            deficit,
        }) => Ok(Json(UpgradeOutcome::Insufficient {
            currency,
            cost,
            balance,
            deficit,
        })),
        Err(EconomyError::NoCharacter) => Err(ApiError::Conflict(String::from(
            "create a character first",
        ))),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

/// `POST /api/shop/upgrade/boss` -- raise the boss tier.
pub async fn upgrade_boss(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UpgradeOutcome>, ApiError> {
    let mut world = state.world.write().await;
    match economy::upgrade_boss(&mut world.player, &state.tuning) {
        Ok(level) => {
            state.persist(&world.player).await?;
            Ok(Json(UpgradeOutcome::Upgraded {
                level,
                next_cost: scaling::boss_upgrade_cost(&state.tuning, level),
            }))
        }
        Err(EconomyError::Insufficient {
            currency,
            cost,
            balance,
            deficit,
        }) => Ok(Json(UpgradeOutcome::Insufficient {
            currency,
            cost,
            balance,
            deficit,
        })),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

/// `GET /api/quests` -- the quest list.
pub async fn get_quests(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let world = state.world.read().await;
    Json(serde_json::json!({"quests": world.player.quests}))
}

/// `POST /api/quests/{id}/claim` -- claim a quest reward.
pub async fn claim_quest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut world = state.world.write().await;
    let reward = quests::claim(&mut world.player, &id)?;
    state.persist(&world.player).await?;
    Ok(Json(serde_json::json!({
        "claimed": true,
        "reward": reward,
    })))
}

// ---------------------------------------------------------------------------
// Gallery and backgrounds
// ---------------------------------------------------------------------------

/// `GET /api/gallery` -- the gallery images, newest first.
pub async fn get_gallery(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let world = state.world.read().await;
    Json(serde_json::json!({"images": world.player.gallery}))
}

/// Request body for `POST /api/background`.
#[derive(Debug, Deserialize)]
pub struct BackgroundRequest {
    /// Free-text interior description.
    pub interior_style: Option<String>,
}

/// `POST /api/background` -- generate and set the global background.
pub async fn generate_background(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BackgroundRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut world = state.world.write().await;
    let style = world
        .player
        .character
        .as_ref()
        .map(|c| c.style)
        .ok_or_else(|| ApiError::Conflict(String::from("create a character first")))?;
    let theme = match world.player.settings.theme {
        Theme::Cyberpunk => "cyberpunk",
        Theme::Normal => "normal",
    };
    let interior = request
        .interior_style
        .unwrap_or_else(|| String::from("a gloomy stairwell"));

    let url = state.content.global_background(&interior, style, theme).await;
    world.player.global_background_url = Some(url.clone());
    let cap = state.tuning.gallery_cap;
    gallery::add(&mut world.player, url.clone(), cap);
    state.persist(&world.player).await?;
    Ok(Json(serde_json::json!({"url": url})))
}

// ---------------------------------------------------------------------------
// Friends and chats
// ---------------------------------------------------------------------------

/// `GET /api/friends` -- the roster and group chats.
pub async fn get_friends(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let world = state.world.read().await;
    Json(serde_json::json!({
        "friends": world.player.friends,
        "group_chats": world.player.group_chats,
    }))
}

/// Request body for `POST /api/friends`.
#[derive(Debug, Deserialize)]
pub struct AddFriendRequest {
    /// The friend's name.
    pub name: String,
}

/// `POST /api/friends` -- add a friend.
pub async fn add_friend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddFriendRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidRequest(String::from("name is empty")));
    }
    let mut world = state.world.write().await;
    roster::add_friend(&mut world.player, &request.name)?;
    state.persist(&world.player).await?;
    Ok(Json(serde_json::json!({"friends": world.player.friends})))
}

/// `POST /api/friends/{name}/ai` -- toggle the AI stand-in.
pub async fn toggle_friend_ai(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut world = state.world.write().await;
    let enabled = roster::toggle_friend_ai(&mut world.player, &name)?;
    state.persist(&world.player).await?;
    Ok(Json(serde_json::json!({"name": name, "is_ai_enabled": enabled})))
}

/// Outcome of sharing energy with a friend.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShareOutcome {
    /// The energy was sent.
    Shared {
        /// The recipient.
        friend: String,
        /// Units shared.
        amount: u64,
        /// Remaining energy balance.
        balance: u64,
    },
    /// Not enough energy; nothing was sent.
    Insufficient {
        /// The energy cost of sharing.
        cost: u64,
        /// Current energy balance.
        balance: u64,
        /// Exactly how much is missing.
        deficit: u64,
    },
}

/// `POST /api/friends/{name}/share-energy` -- gift energy to a friend.
pub async fn share_energy(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ShareOutcome>, ApiError> {
    let mut world = state.world.write().await;
    if roster::find_friend(&world.player, &name).is_none() {
        return Err(ApiError::NotFound(format!("unknown friend: {name}")));
    }
    let amount = state.tuning.share_energy_cost;
    match economy::spend(&mut world.player, Currency::Energy, amount) {
        Ok(balance) => {
            state.persist(&world.player).await?;
            Ok(Json(ShareOutcome::Shared {
                friend: name,
                amount,
                balance,
            }))
        }
        Err(EconomyError::Insufficient {
            cost,
            balance,
            deficit,
            ..
        }) => Ok(Json(ShareOutcome::Insufficient {
            cost,
            balance,
            deficit,
        })),
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}

/// Request body for `POST /api/friends/{name}/chat`.
#[derive(Debug, Deserialize)]
pub struct FriendChatRequest {
    /// The message to send.
    pub text: String,
}

/// `POST /api/friends/{name}/chat` -- message a friend.
///
/// An AI stand-in replies when enabled; otherwise the message is only
/// acknowledged (real multiplayer delivery is out of scope).
pub async fn friend_chat(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(request): Json<FriendChatRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let world = state.world.read().await;
    let friend = roster::find_friend(&world.player, &name)
        .ok_or_else(|| ApiError::NotFound(format!("unknown friend: {name}")))?;
    let ai_enabled = friend.is_ai_enabled;
    let style = world
        .player
        .character
        .as_ref()
        .map_or(VisualStyle::PostSoviet, |c| c.style);
    drop(world);

    let reply = if ai_enabled {
        Some(state.content.friend_reply(&name, &request.text, style).await)
    } else {
        None
    };
    Ok(Json(serde_json::json!({"delivered": true, "reply": reply})))
}

/// `GET /api/friends/referral-link` -- the invite link and its bonuses.
pub async fn referral_link(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let world = state.world.read().await;
    let name = world
        .player
        .character
        .as_ref()
        .map_or("babai", |c| c.name.as_str());
    Json(serde_json::json!({
        "link": format!("https://bab-ai.ru/invite/{name}"),
        "energy_bonus": state.tuning.referral_energy_bonus,
        "fear_bonus": state.tuning.referral_fear_bonus,
    }))
}

/// `POST /api/friends/referral-joined` -- credit a referral bonus.
pub async fn referral_joined(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut world = state.world.write().await;
    economy::earn(
        &mut world.player,
        Currency::Energy,
        state.tuning.referral_energy_bonus,
    );
    economy::earn(
        &mut world.player,
        Currency::Fear,
        state.tuning.referral_fear_bonus,
    );
    state.persist(&world.player).await?;
    Ok(Json(serde_json::json!({
        "energy": world.player.energy,
        "fear": world.player.fear,
    })))
}

/// Request body for `POST /api/chats/group`.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    /// The chat's display name.
    pub name: String,
    /// Member names from the roster.
    pub members: Vec<String>,
}

/// Response for `POST /api/chats/group`.
#[derive(Debug, Serialize)]
pub struct CreateGroupResponse {
    /// The new chat's id.
    pub id: GroupChatId,
}

/// `POST /api/chats/group` -- create a group chat.
pub async fn create_group_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<Json<CreateGroupResponse>, ApiError> {
    let mut world = state.world.write().await;
    let id = roster::create_group_chat(&mut world.player, &request.name, request.members)?;
    state.persist(&world.player).await?;
    Ok(Json(CreateGroupResponse { id }))
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// One row of the leaderboard.
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    /// Rank, 1-based.
    pub rank: u32,
    /// Display name.
    pub name: String,
    /// Fear score.
    pub score: u64,
    /// Portrait.
    pub avatar_url: String,
    /// Whether this row is the player.
    pub is_player: bool,
}

/// `GET /api/leaderboard` -- the static rivals with the player spliced
/// in by fear total.
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<LeaderboardEntry>> {
    let world = state.world.read().await;
    let (player_name, player_avatar) = world.player.character.as_ref().map_or_else(
        || {
            (
                String::from("You"),
                String::from("https://picsum.photos/seed/user/100/100"),
            )
        },
        |c| (c.name.clone(), c.avatar_url.clone()),
    );

    let mut rows: Vec<(String, u64, String, bool)> = RIVALS
        .iter()
        .map(|&(name, score, avatar)| (name.to_owned(), score, avatar.to_owned(), false))
        .collect();
    rows.push((player_name, world.player.fear, player_avatar, true));
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    let entries = rows
        .into_iter()
        .enumerate()
        .map(|(i, (name, score, avatar_url, is_player))| LeaderboardEntry {
            rank: u32::try_from(i.saturating_add(1)).unwrap_or(u32::MAX),
            name,
            score,
            avatar_url,
            is_player,
        })
        .collect();
    Json(entries)
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Partial settings update; absent fields keep their value.
#[derive(Debug, Deserialize)]
pub struct SettingsPatch {
    /// Button sizing preference.
    pub button_size: Option<babai_types::ButtonSize>,
    /// Font family preference.
    pub font_family: Option<babai_types::FontFamily>,
    /// Base font size in pixels.
    pub font_size: Option<u8>,
    /// Interface color theme.
    pub theme: Option<Theme>,
    /// Music volume, clamped to 0-100.
    pub music_volume: Option<u8>,
    /// Whether narration audio is requested.
    pub tts_enabled: Option<bool>,
}

/// `PATCH /api/settings` -- merge a partial settings update.
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<Settings>, ApiError> {
    let mut world = state.world.write().await;
    let settings = &mut world.player.settings;
    if let Some(v) = patch.button_size {
        settings.button_size = v;
    }
    if let Some(v) = patch.font_family {
        settings.font_family = v;
    }
    if let Some(v) = patch.font_size {
        settings.font_size = v;
    }
    if let Some(v) = patch.theme {
        settings.theme = v;
    }
    if let Some(v) = patch.music_volume {
        settings.music_volume = v.min(100);
    }
    if let Some(v) = patch.tts_enabled {
        settings.tts_enabled = v;
    }
    let updated = settings.clone();
    state.persist(&world.player).await?;
    Ok(Json(updated))
}
