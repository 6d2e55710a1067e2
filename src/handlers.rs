use crate::errors::{AnalysisError, AppError};
use crate::history::RenderableEntry;
use crate::models::{AnalyzeForm, AnalyzeRequest, IndexQuery, ThemeResponse};
use crate::session::IN_FLIGHT_MESSAGE;
use crate::state::AppState;
use crate::ui::render_page;
use crate::view::ViewCommands;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub view: ViewCommands,
    pub history: Vec<RenderableEntry>,
}

pub enum SubmitError {
    InFlight,
    Analysis(AnalysisError),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::InFlight => AppError::conflict(IN_FLIGHT_MESSAGE),
            SubmitError::Analysis(err) => err.into(),
        }
    }
}

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let page = state.session.lock().await.page(query.draft);
    Html(render_page(&page))
}

pub async fn analyze_form(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> Redirect {
    // Failures are already queued as notices for the next render.
    let _ = submit_text(&state, &form.text).await;
    Redirect::to("/")
}

pub async fn replay_form(State(state): State<AppState>, Path(index): Path<usize>) -> Redirect {
    let _ = replay_entry(&state, index).await;
    Redirect::to("/")
}

pub async fn clear_history_form(State(state): State<AppState>) -> Redirect {
    state.session.lock().await.clear_history();
    Redirect::to("/")
}

pub async fn clear_input_form(State(state): State<AppState>) -> Redirect {
    state.session.lock().await.clear_input();
    Redirect::to("/")
}

pub async fn toggle_theme_form(State(state): State<AppState>) -> Redirect {
    state.session.lock().await.toggle_theme();
    Redirect::to("/")
}

pub async fn api_analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let view = submit_text(&state, &payload.text).await?;
    let history = state.session.lock().await.history_rows();
    Ok(Json(AnalyzeResponse { view, history }))
}

pub async fn api_replay(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let view = replay_entry(&state, index).await?;
    let history = state.session.lock().await.history_rows();
    Ok(Json(AnalyzeResponse { view, history }))
}

pub async fn api_history(State(state): State<AppState>) -> Json<Vec<RenderableEntry>> {
    Json(state.session.lock().await.history_rows())
}

pub async fn api_clear_history(State(state): State<AppState>) -> Json<Vec<RenderableEntry>> {
    Json(state.session.lock().await.clear_history())
}

pub async fn api_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let theme = state.session.lock().await.theme();
    Json(ThemeResponse { theme })
}

pub async fn api_toggle_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let theme = state.session.lock().await.toggle_theme();
    Json(ThemeResponse { theme })
}

/// Runs one analysis end to end. The session lock is not held while the
/// upstream request is outstanding.
async fn submit_text(state: &AppState, text: &str) -> Result<ViewCommands, SubmitError> {
    let Some(_slot) = state.try_begin_submission() else {
        state.session.lock().await.record_in_flight();
        return Err(SubmitError::InFlight);
    };

    state.session.lock().await.set_draft(text);
    let outcome = state.client.analyze(text).await;
    if let Ok(result) = &outcome {
        info!(sentiment = %result.sentiment, confidence = result.confidence, "analysis complete");
    }

    let mut session = state.session.lock().await;
    session.apply(text, outcome).map_err(SubmitError::Analysis)
}

async fn replay_entry(state: &AppState, index: usize) -> Result<ViewCommands, AppError> {
    let text = {
        let mut session = state.session.lock().await;
        match session.history_text(index) {
            Some(text) => text,
            None => {
                session.record_missing_entry(index);
                return Err(AppError::not_found(format!("no history entry at {index}")));
            }
        }
    };
    Ok(submit_text(state, &text).await?)
}
