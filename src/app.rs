use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/analyze", post(handlers::analyze_form))
        .route("/draft/clear", post(handlers::clear_input_form))
        .route("/history/clear", post(handlers::clear_history_form))
        .route("/history/:index/replay", post(handlers::replay_form))
        .route("/theme/toggle", post(handlers::toggle_theme_form))
        .route("/api/analyze", post(handlers::api_analyze))
        .route(
            "/api/history",
            get(handlers::api_history).delete(handlers::api_clear_history),
        )
        .route("/api/history/:index/replay", post(handlers::api_replay))
        .route("/api/theme", get(handlers::api_theme))
        .route("/api/theme/toggle", post(handlers::api_toggle_theme))
        .with_state(state)
}
