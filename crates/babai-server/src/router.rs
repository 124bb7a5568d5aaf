//! Axum router construction for the game API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled so the web client can call from any origin during
//! development.

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the game server.
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Player
        .route("/api/player", get(handlers::get_player))
        .route("/api/player/reset", post(handlers::reset_player))
        .route("/api/character", post(handlers::create_character))
        .route("/api/character/lore", post(handlers::generate_lore))
        // Sessions
        .route("/api/session/start", post(handlers::start_session))
        .route(
            "/api/session",
            get(handlers::get_session).delete(handlers::end_session),
        )
        .route("/api/session/answer", post(handlers::answer_stage))
        .route("/api/session/message", post(handlers::supervisor_message))
        .route("/api/session/continue", post(handlers::continue_session))
        // Boss
        .route("/api/boss/defeat", post(handlers::defeat_boss))
        // Shop
        .route("/api/shop", get(handlers::get_shop))
        .route("/api/shop/buy", post(handlers::buy_item))
        .route(
            "/api/shop/upgrade/telekinesis",
            post(handlers::upgrade_telekinesis),
        )
        .route("/api/shop/upgrade/boss", post(handlers::upgrade_boss))
        // Quests
        .route("/api/quests", get(handlers::get_quests))
        .route("/api/quests/{id}/claim", post(handlers::claim_quest))
        // Gallery
        .route("/api/gallery", get(handlers::get_gallery))
        .route("/api/background", post(handlers::generate_background))
        // Friends
        .route(
            "/api/friends",
            get(handlers::get_friends).post(handlers::add_friend),
        )
        .route("/api/friends/referral-link", get(handlers::referral_link))
        .route(
            "/api/friends/referral-joined",
            post(handlers::referral_joined),
        )
        .route("/api/friends/{name}/ai", post(handlers::toggle_friend_ai))
        .route(
            "/api/friends/{name}/share-energy",
            post(handlers::share_energy),
        )
        .route("/api/friends/{name}/chat", post(handlers::friend_chat))
        .route("/api/chats/group", post(handlers::create_group_chat))
        // Leaderboard
        .route("/api/leaderboard", get(handlers::get_leaderboard))
        // Settings
        .route("/api/settings", patch(handlers::update_settings))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
