//! Integration tests for the game API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The content service runs in offline mode
//! (fallbacks only) and the save blob lives in a per-test temp
//! directory, so no network or shared state is involved.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use babai_content::{ContentConfig, ContentService};
use babai_server::router::build_router;
use babai_server::state::AppState;
use babai_state::{player, EconomyTuning};
use babai_store::SaveStore;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Template names the content service expects.
const TEMPLATE_NAMES: [&str; 10] = [
    "scenario",
    "lore",
    "name",
    "avatar",
    "avatar_edit",
    "boss",
    "background",
    "global_background",
    "supervisor",
    "friend",
];

/// Build an isolated app: offline content, temp save blob, default
/// tuning.
fn make_test_state() -> Arc<AppState> {
    let dir = std::env::temp_dir().join(format!("babai_api_test_{}", uuid::Uuid::now_v7()));
    std::fs::create_dir_all(&dir).unwrap();
    for name in TEMPLATE_NAMES {
        std::fs::write(dir.join(format!("{name}.j2")), "stub {{ style }}").unwrap();
    }

    let content_config = ContentConfig::offline(dir.to_str().unwrap());
    let content = ContentService::new(&content_config).unwrap();

    let tuning = EconomyTuning::default();
    let store = SaveStore::new(dir.join("save.json"));
    let initial = player::new_player(Utc::now(), &tuning);

    let (state, _effect_rx) = AppState::new(initial, store, content, tuning);
    state
}

fn make_router(state: &Arc<AppState>) -> Router {
    build_router(Arc::clone(state))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

fn post(path: &str, payload: &Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(payload).unwrap()))
        .unwrap()
}

fn post_empty(path: &str) -> Request<Body> {
    Request::post(path).body(Body::empty()).unwrap()
}

/// Create the character through the API (offline generators).
async fn create_character(state: &Arc<AppState>) -> Value {
    let response = make_router(state)
        .oneshot(post(
            "/api/character",
            &json!({"gender": "babay", "style": "post_soviet", "wishes": ["long tongue"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body()).await
}

#[tokio::test]
async fn index_returns_html() {
    let state = make_test_state();
    let response = make_router(&state).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Babai"));
}

#[tokio::test]
async fn fresh_player_has_starting_energy() {
    let state = make_test_state();
    let response = make_router(&state).oneshot(get("/api/player")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["player"]["energy"], 50);
    assert_eq!(body["player"]["fear"], 0);
    assert_eq!(body["telekinesis_upgrade_cost"], 50);
    assert_eq!(body["boss_upgrade_cost"], 500);
    assert_eq!(body["boss_reward"], 25);
}

#[tokio::test]
async fn purchase_story_reports_deficit_then_succeeds() {
    let state = make_test_state();

    // Start with 40 fear.
    {
        let mut world = state.world.write().await;
        world.player.fear = 40;
    }

    // The samovar costs 75: refused with the exact deficit, no charge.
    let response = make_router(&state)
        .oneshot(post("/api/shop/buy", &json!({"item_id": "samovar"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "insufficient");
    assert_eq!(body["deficit"], 35);
    assert_eq!(body["balance"], 40);

    // A referral bonus credits 100 fear.
    let response = make_router(&state)
        .oneshot(post_empty("/api/friends/referral-joined"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["fear"], 140);

    // Now the purchase succeeds and charges exactly the cost.
    let response = make_router(&state)
        .oneshot(post("/api/shop/buy", &json!({"item_id": "samovar"})))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "purchased");
    assert_eq!(body["balance"], 65);

    // Buying again is refused without a second charge.
    let response = make_router(&state)
        .oneshot(post("/api/shop/buy", &json!({"item_id": "samovar"})))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "already_owned");

    let world = state.world.read().await;
    assert_eq!(world.player.fear, 65);
    assert!(world.player.inventory.contains("samovar"));
}

#[tokio::test]
async fn unknown_item_is_not_found() {
    let state = make_test_state();
    let response = make_router(&state)
        .oneshot(post("/api/shop/buy", &json!({"item_id": "crowbar"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn regeneration_is_idempotent_and_keeps_remainder() {
    let state = make_test_state();
    {
        let mut world = state.world.write().await;
        world.player.energy = 0;
        world.player.last_energy_update = Utc::now() - Duration::minutes(11);
    }

    // 11 minutes at a 5-minute tick: exactly 2 units.
    let response = make_router(&state).oneshot(get("/api/player")).await.unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["player"]["energy"], 2);

    // A second fetch in the same instant credits nothing more.
    let response = make_router(&state).oneshot(get("/api/player")).await.unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["player"]["energy"], 2);
    // The remainder survived: roughly 4 minutes to the next unit.
    let next_ms = body["next_energy_in_ms"].as_i64().unwrap();
    assert!(next_ms > 230_000 && next_ms <= 240_000, "next_ms = {next_ms}");
}

#[tokio::test]
async fn session_needs_a_character() {
    let state = make_test_state();
    let response = make_router(&state)
        .oneshot(post("/api/session/start", &json!({"difficulty": "hard"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn character_creation_uses_fallbacks_offline() {
    let state = make_test_state();
    let body = create_character(&state).await;
    let name = body["player"]["character"]["name"].as_str().unwrap();
    assert!(!name.is_empty());
    assert_eq!(
        body["player"]["character"]["avatar_url"],
        "https://i.ibb.co/BVgY7XrT/babai.png"
    );

    // Creating twice is a conflict.
    let response = make_router(&state)
        .oneshot(post(
            "/api/character",
            &json!({"gender": "babay", "style": "horror"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn too_many_wishes_are_rejected() {
    let state = make_test_state();
    let response = make_router(&state)
        .oneshot(post(
            "/api/character",
            &json!({
                "gender": "babayka",
                "style": "anime",
                "wishes": ["a", "b", "c", "d", "e"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn session_start_spends_energy_and_serves_a_scenario() {
    let state = make_test_state();
    create_character(&state).await;

    let response = make_router(&state)
        .oneshot(post("/api/session/start", &json!({"difficulty": "hard"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "started");
    assert_eq!(body["session"]["stage"], 1);
    assert_eq!(body["session"]["stage_limit"], 15);
    let options = body["session"]["scenario"]["options"].as_array().unwrap();
    assert_eq!(options.len(), 3);
    // The grading index is redacted to options.len().
    assert_eq!(body["session"]["scenario"]["correct_answer"], 3);

    let world = state.world.read().await;
    assert_eq!(world.player.energy, 49);
}

#[tokio::test]
async fn session_start_without_energy_reports_the_deficit() {
    let state = make_test_state();
    create_character(&state).await;
    {
        let mut world = state.world.write().await;
        world.player.energy = 3;
        // Keep the watermark current so no catch-up interferes.
        world.player.last_energy_update = Utc::now();
    }

    let response = make_router(&state)
        .oneshot(post("/api/session/start", &json!({"difficulty": "endless"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "insufficient_energy");
    assert_eq!(body["cost"], 25);
    assert_eq!(body["deficit"], 22);

    let world = state.world.read().await;
    assert_eq!(world.player.energy, 3);
}

#[tokio::test]
async fn correct_answer_earns_fear_and_advances() {
    let state = make_test_state();
    create_character(&state).await;

    make_router(&state)
        .oneshot(post("/api/session/start", &json!({"difficulty": "hard"})))
        .await
        .unwrap();

    // The offline stage-1 scenario is the seance script: answer 2 evicts.
    let response = make_router(&state)
        .oneshot(post("/api/session/answer", &json!({"choice": 2})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["correct"], true);
    assert_eq!(body["fear_earned"], 1);
    assert_eq!(body["score"], 1);
    assert_eq!(body["next"]["kind"], "scenario");
    assert_eq!(body["next"]["stage"], 2);

    let world = state.world.read().await;
    assert_eq!(world.player.fear, 1);
    // The eviction quest advanced.
    let quest = world
        .player
        .quests
        .iter()
        .find(|q| q.id == "first_fright")
        .unwrap();
    assert_eq!(quest.progress, 1);
}

#[tokio::test]
async fn wrong_answer_earns_nothing() {
    let state = make_test_state();
    create_character(&state).await;

    make_router(&state)
        .oneshot(post("/api/session/start", &json!({"difficulty": "hard"})))
        .await
        .unwrap();

    // Stage 1 offline scenario: correct is 2, so 0 is wrong.
    let response = make_router(&state)
        .oneshot(post("/api/session/answer", &json!({"choice": 0})))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["correct"], false);
    assert_eq!(body["fear_earned"], 0);

    let world = state.world.read().await;
    assert_eq!(world.player.fear, 0);
}

#[tokio::test]
async fn fifth_stage_checkpoint_blocks_answers_until_continue() {
    let state = make_test_state();
    create_character(&state).await;

    make_router(&state)
        .oneshot(post("/api/session/start", &json!({"difficulty": "hard"})))
        .await
        .unwrap();

    // Answer stages 1 through 4 (any choice advances the run).
    let mut last = Value::Null;
    for _ in 0..4 {
        let response = make_router(&state)
            .oneshot(post("/api/session/answer", &json!({"choice": 0})))
            .await
            .unwrap();
        last = body_to_json(response.into_body()).await;
    }
    assert_eq!(last["next"]["kind"], "supervisor_checkpoint");
    assert_eq!(last["next"]["stage"], 5);

    // Answering during the checkpoint is refused.
    let response = make_router(&state)
        .oneshot(post("/api/session/answer", &json!({"choice": 0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The supervisor replies (offline: a canned scolding).
    let response = make_router(&state)
        .oneshot(post("/api/session/message", &json!({"text": "all quiet"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert!(body["reply"].as_str().is_some_and(|r| !r.is_empty()));

    // Continue resumes at stage 6 with a fresh backdrop.
    let response = make_router(&state)
        .oneshot(post_empty("/api/session/continue"))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["next"]["kind"], "scenario");
    assert_eq!(body["next"]["stage"], 6);
    assert!(body["next"]["background_url"].as_str().is_some());
}

#[tokio::test]
async fn boss_defeat_credits_scaled_reward_and_quests() {
    let state = make_test_state();
    create_character(&state).await;

    let response = make_router(&state)
        .oneshot(post_empty("/api/boss/defeat"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["reward"], 25);
    assert_eq!(body["watermelons"], 25);
    assert!(body["portrait_url"].as_str().is_some());

    let world = state.world.read().await;
    let magnate = world
        .player
        .quests
        .iter()
        .find(|q| q.id == "watermelon_magnate")
        .unwrap();
    assert_eq!(magnate.progress, 1);
    let tribute = world
        .player
        .quests
        .iter()
        .find(|q| q.id == "tribute_collector")
        .unwrap();
    assert_eq!(tribute.progress, 3);
}

#[tokio::test]
async fn upgrades_scale_and_report_deficits() {
    let state = make_test_state();
    create_character(&state).await;
    {
        let mut world = state.world.write().await;
        world.player.watermelons = 3_000;
        world.player.fear = 60;
    }

    let response = make_router(&state)
        .oneshot(post_empty("/api/shop/upgrade/boss"))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "upgraded");
    assert_eq!(body["level"], 2);
    assert_eq!(body["next_cost"], 2500);

    let response = make_router(&state)
        .oneshot(post_empty("/api/shop/upgrade/telekinesis"))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "upgraded");
    assert_eq!(body["level"], 2);
    assert_eq!(body["next_cost"], 100);

    // 10 fear left; the next tier costs 100.
    let response = make_router(&state)
        .oneshot(post_empty("/api/shop/upgrade/telekinesis"))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "insufficient");
    assert_eq!(body["deficit"], 90);
}

#[tokio::test]
async fn quest_claim_is_gated() {
    let state = make_test_state();

    let response = make_router(&state)
        .oneshot(post_empty("/api/quests/first_fright/claim"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = make_router(&state)
        .oneshot(post_empty("/api/quests/no_such_quest/claim"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    {
        let mut world = state.world.write().await;
        if let Some(q) = world.player.quests.iter_mut().find(|q| q.id == "first_fright") {
            q.progress = 5;
        }
    }
    let response = make_router(&state)
        .oneshot(post_empty("/api/quests/first_fright/claim"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["claimed"], true);
    assert_eq!(body["reward"]["amount"], 50);

    let world = state.world.read().await;
    assert_eq!(world.player.fear, 50);
    assert!(world.player.achievements.contains("quest_first_fright"));
}

#[tokio::test]
async fn friends_roster_and_energy_sharing() {
    let state = make_test_state();

    // The supervisor is pre-seeded with the AI stand-in enabled.
    let response = make_router(&state).oneshot(get("/api/friends")).await.unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["friends"][0]["name"], "DanAIl");
    assert_eq!(body["friends"][0]["is_ai_enabled"], true);

    // Chatting with an AI-enabled friend gets a reply even offline.
    let response = make_router(&state)
        .oneshot(post("/api/friends/DanAIl/chat", &json!({"text": "report"})))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert!(body["reply"].as_str().is_some());

    // Sharing energy spends 10 units.
    let response = make_router(&state)
        .oneshot(post_empty("/api/friends/DanAIl/share-energy"))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["status"], "shared");
    assert_eq!(body["balance"], 40);

    // Sharing with a stranger is a 404.
    let response = make_router(&state)
        .oneshot(post_empty("/api/friends/Nobody/share-energy"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Duplicate friends are refused.
    let response = make_router(&state)
        .oneshot(post("/api/friends", &json!({"name": "DanAIl"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn group_chat_requires_roster_members() {
    let state = make_test_state();

    let response = make_router(&state)
        .oneshot(post(
            "/api/chats/group",
            &json!({"name": "Night Shift", "members": ["Ghost"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = make_router(&state)
        .oneshot(post(
            "/api/chats/group",
            &json!({"name": "Night Shift", "members": ["DanAIl"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert!(body["id"].as_str().is_some());
}

#[tokio::test]
async fn leaderboard_splices_the_player_in() {
    let state = make_test_state();
    {
        let mut world = state.world.write().await;
        world.player.fear = 11_000;
    }
    let response = make_router(&state)
        .oneshot(get("/api/leaderboard"))
        .await
        .unwrap();
    let body = body_to_json(response.into_body()).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    // 11k fear lands between DarkLord (12.4k) and NightTerror (10.2k).
    assert_eq!(rows[2]["is_player"], true);
    assert_eq!(rows[2]["rank"], 3);
}

#[tokio::test]
async fn settings_patch_merges_and_clamps() {
    let state = make_test_state();
    let response = make_router(&state)
        .oneshot(
            Request::patch("/api/settings")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({"music_volume": 180, "theme": "cyberpunk"}))
                        .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["music_volume"], 100);
    assert_eq!(body["theme"], "cyberpunk");
    // Untouched fields keep their defaults.
    assert_eq!(body["font_size"], 16);
}

#[tokio::test]
async fn reset_returns_to_a_fresh_player() {
    let state = make_test_state();
    create_character(&state).await;
    {
        let mut world = state.world.write().await;
        world.player.fear = 999;
    }

    let response = make_router(&state)
        .oneshot(post_empty("/api/player/reset"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = make_router(&state).oneshot(get("/api/player")).await.unwrap();
    let body = body_to_json(response.into_body()).await;
    assert_eq!(body["player"]["fear"], 0);
    assert_eq!(body["player"]["energy"], 50);
    assert!(body["player"]["character"].is_null());
}

#[tokio::test]
async fn session_endpoints_without_a_session_are_not_found() {
    let state = make_test_state();
    create_character(&state).await;

    let response = make_router(&state).oneshot(get("/api/session")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = make_router(&state)
        .oneshot(post("/api/session/answer", &json!({"choice": 0})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = make_router(&state)
        .oneshot(
            Request::delete("/api/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shop_view_reflects_ownership() {
    let state = make_test_state();
    {
        let mut world = state.world.write().await;
        world.player.inventory.insert(String::from("felt_slippers"));
    }
    let response = make_router(&state).oneshot(get("/api/shop")).await.unwrap();
    let body = body_to_json(response.into_body()).await;
    let items = body["items"].as_array().unwrap();
    let slippers = items
        .iter()
        .find(|i| i["id"] == "felt_slippers")
        .unwrap();
    assert_eq!(slippers["owned"], true);
    let samovar = items.iter().find(|i| i["id"] == "samovar").unwrap();
    assert_eq!(samovar["owned"], false);
    assert_eq!(body["telekinesis_upgrade_cost"], 50);
}
