use crate::errors::AppError;
use crate::models::{AnswerRequest, CatalogSummary, ContentKind, LoopOutcome, StatsRecord};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let stats = state.stats.load().await;
    Html(render_index(&stats))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsRecord> {
    Json(state.stats.load().await)
}

pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogSummary> {
    Json(state.catalog.summary().await)
}

pub async fn start_trivia(State(state): State<AppState>) -> Result<Json<LoopOutcome>, AppError> {
    start_loop(&state, ContentKind::Trivia).await
}

pub async fn show_meme(State(state): State<AppState>) -> Result<Json<LoopOutcome>, AppError> {
    start_loop(&state, ContentKind::Meme).await
}

pub async fn show_quick_win(State(state): State<AppState>) -> Result<Json<LoopOutcome>, AppError> {
    start_loop(&state, ContentKind::QuickWin).await
}

pub async fn answer_trivia(
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<LoopOutcome>, AppError> {
    if payload.choice.trim().is_empty() {
        return Err(AppError::bad_request("choice must not be empty"));
    }

    Ok(Json(state.loops.answer(&payload.choice).await?))
}

async fn start_loop(state: &AppState, kind: ContentKind) -> Result<Json<LoopOutcome>, AppError> {
    Ok(Json(state.loops.start(kind).await?))
}
