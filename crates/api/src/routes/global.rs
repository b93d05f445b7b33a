use axum::{extract::State, routing::{get, post}, Json, Router};

use page_content_core::{FetchState, GlobalView};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/global", get(get_global))
        .route("/v1/global/refresh", post(refresh_global))
}

/// The resolved site-wide view. Answers 503 until the first load finishes.
async fn get_global(State(state): State<AppState>) -> ApiResult<Json<GlobalView>> {
    respond(&state, state.store().global_state().await)
}

async fn refresh_global(State(state): State<AppState>) -> ApiResult<Json<GlobalView>> {
    respond(&state, state.store().load_global().await)
}

fn respond(
    state: &AppState,
    global: FetchState<page_content_core::GlobalPayload>,
) -> ApiResult<Json<GlobalView>> {
    match global {
        FetchState::Loading => Err(ApiError::Loading),
        FetchState::Ready(payload) => Ok(Json(GlobalView::build(payload, state.resolve_context()))),
        FetchState::Failed(failure) => Err(failure.into()),
    }
}
