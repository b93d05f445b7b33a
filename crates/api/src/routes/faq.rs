use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use page_content_core::{FaqView, FetchFailure, FetchState};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/faqs", get(list_faqs))
}

#[derive(Debug, Deserialize)]
struct FaqQuery {
    category: Option<String>,
}

/// FAQ entries of one category. An unreachable FAQ collection renders the
/// built-in entries unless fallbacks are hidden.
async fn list_faqs(
    State(state): State<AppState>,
    Query(query): Query<FaqQuery>,
) -> ApiResult<Json<FaqView>> {
    let fetched = match state.gateway().fetch_faqs().await {
        Ok(entries) => FetchState::Ready(entries),
        Err(err) => {
            tracing::warn!(error = %err, "faq collection unavailable");
            FetchState::Failed(FetchFailure::from(&err))
        }
    };
    FaqView::build(&fetched, query.category.as_deref(), state.resolve_context())
        .map(Json)
        .ok_or_else(|| match fetched {
            FetchState::Failed(failure) => failure.into(),
            _ => ApiError::NotFound("no faq entries".into()),
        })
}
