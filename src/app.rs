use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/loops/trivia", post(handlers::start_trivia))
        .route("/api/loops/trivia/answer", post(handlers::answer_trivia))
        .route("/api/loops/meme", post(handlers::show_meme))
        .route("/api/loops/quick_win", post(handlers::show_quick_win))
        .with_state(state)
}
