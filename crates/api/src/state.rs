use std::sync::Arc;

use page_content_core::events::EventBus;
use page_content_core::{ContentGateway, ContentStore, ResolveContext};

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: AppConfig,
    store: ContentStore,
    resolve: ResolveContext,
}

impl AppState {
    pub fn new(config: AppConfig, gateway: ContentGateway, event_bus: EventBus) -> Self {
        let resolve = ResolveContext::new(
            page_content_core::MediaResolver::new(&config.media_base_url),
            config.hide_fallbacks,
        );
        Self {
            inner: Arc::new(InnerState {
                store: ContentStore::new(gateway, event_bus).with_page_ttl(config.page_cache_ttl()),
                config,
                resolve,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &ContentStore {
        &self.inner.store
    }

    pub fn gateway(&self) -> &ContentGateway {
        self.inner.store.gateway()
    }

    pub fn event_bus(&self) -> &EventBus {
        self.inner.store.bus()
    }

    pub fn resolve_context(&self) -> &ResolveContext {
        &self.inner.resolve
    }
}
