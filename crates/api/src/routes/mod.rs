pub mod contact;
pub mod events;
pub mod faq;
pub mod global;
pub mod health;
pub mod pages;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(global::routes())
        .merge(pages::routes())
        .merge(contact::routes())
        .merge(faq::routes())
        .merge(events::routes())
        .with_state(state)
}
