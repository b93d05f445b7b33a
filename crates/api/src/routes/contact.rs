use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Map, Value};
use tower_http::limit::RequestBodyLimitLayer;

use page_content_core::form::ContactForm;
use page_content_core::sections::ContactFormView;
use page_content_core::slug::ReservedRoute;
use page_content_core::FetchState;

use crate::error::ApiResult;
use crate::state::AppState;

/// Larger submission bodies are rejected with 413 before they are read.
pub const CONTACT_BODY_LIMIT: usize = 16 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/contact", get(form_view).post(submit_contact))
        .route_layer(RequestBodyLimitLayer::new(CONTACT_BODY_LIMIT))
}

/// Labels, placeholders and inquiry types for the contact form. The form
/// block on the contact page is optional; without it every label defaults.
async fn form_view(State(state): State<AppState>) -> Json<ContactFormView> {
    let page = state.store().page(ReservedRoute::Contact.as_str()).await;
    let section = match &page {
        FetchState::Ready(page) => page
            .blocks
            .iter()
            .find(|b| b.kind_tag.ends_with("contact-form"))
            .map(|b| b.to_value()),
        _ => None,
    };
    let inquiry_types = section
        .as_ref()
        .and_then(|s| s.get("inquiry_types").or_else(|| s.get("inquiryTypes")))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    Json(ContactFormView::resolve(section.as_ref(), &inquiry_types))
}

/// Validate a contact submission and forward it upstream.
async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut form = ContactForm::from_json(&body);
    form.submit(state.gateway()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": form.status() })),
    ))
}
