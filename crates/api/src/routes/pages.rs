use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};

use page_content_core::page::{render_named, SECTION_NAMES};
use page_content_core::slug::PageSlug;
use page_content_core::{FetchState, PagePayload, PageView, SectionView};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/pages", get(home_page))
        .route("/v1/pages/{slug}", get(get_page))
        .route("/v1/pages/{slug}/refresh", post(refresh_page))
        .route("/v1/pages/{slug}/sections/{name}", get(get_section))
}

async fn home_page(State(state): State<AppState>) -> ApiResult<Json<PageView>> {
    page_view(&state, &PageSlug::Home).await
}

/// A resolved page. `/v1/pages/home` redirects to the bare pages route.
async fn get_page(State(state): State<AppState>, Path(raw): Path<String>) -> ApiResult<Response> {
    if PageSlug::redirect_target(&raw).is_some() {
        return Ok(Redirect::permanent("/v1/pages").into_response());
    }
    let slug = PageSlug::parse(&raw);
    Ok(page_view(&state, &slug).await?.into_response())
}

/// Refetch a page past the cache.
async fn refresh_page(State(state): State<AppState>, Path(raw): Path<String>) -> ApiResult<Json<PageView>> {
    let slug = PageSlug::parse(&raw);
    tracing::info!(slug = slug.as_str(), "page refresh requested");
    render(&state, state.store().refresh_page(slug.as_str()).await)
}

/// One renderer resolved against the page, whether or not the page lists
/// a block for it.
async fn get_section(
    State(state): State<AppState>,
    Path((raw, name)): Path<(String, String)>,
) -> ApiResult<Json<SectionView>> {
    if !SECTION_NAMES.contains(&name.as_str()) {
        return Err(ApiError::NotFound(format!("unknown section {name}")));
    }
    let slug = PageSlug::parse(&raw);
    let page = state.store().page(slug.as_str()).await;
    match &page {
        FetchState::Loading => return Err(ApiError::Loading),
        FetchState::Failed(failure) => return Err(failure.clone().into()),
        FetchState::Ready(_) => {}
    }
    render_named(&name, &page, state.resolve_context())
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("section {name} has no content on {}", slug.as_str())))
}

async fn page_view(state: &AppState, slug: &PageSlug) -> ApiResult<Json<PageView>> {
    tracing::debug!(slug = slug.as_str(), reserved = slug.is_reserved(), "page requested");
    render(state, state.store().page(slug.as_str()).await)
}

fn render(state: &AppState, page: FetchState<PagePayload>) -> ApiResult<Json<PageView>> {
    match page {
        FetchState::Loading => Err(ApiError::Loading),
        FetchState::Ready(payload) => Ok(Json(PageView::build(payload, state.resolve_context()))),
        FetchState::Failed(failure) => Err(failure.into()),
    }
}
