//! Shared content snapshots.
//!
//! The store owns one [`FetchState`] for the global scope and one per page
//! slug. Readers always get an immutable snapshot; every state change is
//! announced on the [`EventBus`].
//!
//! Pages are cached only once they load. Failed lookups are never kept, and
//! a loaded page is refetched after the page TTL.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, error};

use crate::block::{GlobalPayload, PagePayload, Relation};
use crate::error::FetchFailure;
use crate::events::{ContentEvent, ContentScope, EventBus, ReadyEvent};
use crate::gateway::{ContentGateway, HOME_SLUG};
use crate::resolve::FetchState;

pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CachedPage {
    state: FetchState<PagePayload>,
    stored_at: Instant,
}

impl CachedPage {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

#[derive(Debug)]
pub struct ContentStore {
    gateway: ContentGateway,
    bus: EventBus,
    global: RwLock<FetchState<GlobalPayload>>,
    pages: RwLock<HashMap<String, CachedPage>>,
    page_ttl: Duration,
}

impl ContentStore {
    /// The global scope starts out loading; nothing is fetched until
    /// [`load_global`](Self::load_global) runs.
    pub fn new(gateway: ContentGateway, bus: EventBus) -> Self {
        Self {
            gateway,
            bus,
            global: RwLock::new(FetchState::Loading),
            pages: RwLock::new(HashMap::new()),
            page_ttl: DEFAULT_PAGE_TTL,
        }
    }

    pub fn with_page_ttl(mut self, ttl: Duration) -> Self {
        self.page_ttl = ttl;
        self
    }

    pub fn page_ttl(&self) -> Duration {
        self.page_ttl
    }

    pub fn gateway(&self) -> &ContentGateway {
        &self.gateway
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub async fn global_state(&self) -> FetchState<GlobalPayload> {
        self.global.read().await.clone()
    }

    /// `None` when the page is not cached: never requested, failed, or cleared.
    pub async fn page_state(&self, slug: &str) -> Option<FetchState<PagePayload>> {
        self.pages.read().await.get(slug).map(|cached| cached.state.clone())
    }

    pub async fn cached_pages(&self) -> usize {
        self.pages.read().await.len()
    }

    /// Fetch (or refetch) the global scope.
    pub async fn load_global(&self) -> FetchState<GlobalPayload> {
        *self.global.write().await = FetchState::Loading;
        self.emit(ContentEvent::Loading {
            scope: ContentScope::Global,
        });

        let state = match self.gateway.fetch_global().await {
            Ok(payload) => {
                let blocks = payload.home.as_ref().map_or(0, |h| h.blocks.len());
                let mut degraded = payload.degraded.clone();
                if let Some(home) = &payload.home {
                    degraded.extend(home.degraded.iter().copied());
                }
                self.emit_ready(ContentScope::Global, blocks, &degraded);
                FetchState::Ready(payload)
            }
            Err(err) => {
                error!(error = %err, "failed to load global content");
                let failure = FetchFailure::from(&err);
                self.emit_failed(ContentScope::Global, &failure);
                FetchState::Failed(failure)
            }
        };
        *self.global.write().await = state.clone();
        state
    }

    /// Fetch (or refetch) one page. `home` is served from the global scope
    /// once that has loaded.
    pub async fn load_page(&self, slug: &str) -> FetchState<PagePayload> {
        if slug == HOME_SLUG {
            if let FetchState::Ready(GlobalPayload { home: Some(home), .. }) = &*self.global.read().await {
                return FetchState::Ready(home.clone());
            }
        }

        let scope = ContentScope::Page(slug.to_string());
        self.set_page(slug, FetchState::Loading).await;
        self.emit(ContentEvent::Loading { scope: scope.clone() });

        let state = match self.gateway.fetch_page(slug).await {
            Ok(page) => {
                self.emit_ready(scope, page.blocks.len(), &page.degraded);
                FetchState::Ready(page)
            }
            Err(err) => {
                if err.is_not_found() {
                    debug!(slug, "page not found");
                } else {
                    error!(slug, error = %err, "failed to load page");
                }
                self.pages.write().await.remove(slug);
                let failure = FetchFailure::from(&err);
                self.emit_failed(scope, &failure);
                return FetchState::Failed(failure);
            }
        };
        self.set_page(slug, state.clone()).await;
        state
    }

    /// Cached page state if it is ready and fresh, else a new load.
    pub async fn page(&self, slug: &str) -> FetchState<PagePayload> {
        let cached = self.pages.read().await.get(slug).cloned();
        match cached {
            Some(cached @ CachedPage { state: FetchState::Ready(_), .. }) if cached.is_fresh(self.page_ttl) => {
                cached.state
            }
            _ => self.load_page(slug).await,
        }
    }

    /// Refetch a page regardless of the cache. `home` reloads the global scope.
    pub async fn refresh_page(&self, slug: &str) -> FetchState<PagePayload> {
        if slug == HOME_SLUG {
            self.load_global().await;
        }
        self.load_page(slug).await
    }

    /// Store a page state. Expired entries are dropped on the way.
    pub async fn set_page(&self, slug: &str, state: FetchState<PagePayload>) {
        let ttl = self.page_ttl;
        let mut pages = self.pages.write().await;
        pages.retain(|_, cached| cached.state.is_loading() || cached.is_fresh(ttl));
        pages.insert(
            slug.to_string(),
            CachedPage {
                state,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop a scope's content. Global goes back to loading.
    pub async fn clear(&self, scope: ContentScope) {
        match &scope {
            ContentScope::Global => *self.global.write().await = FetchState::Loading,
            ContentScope::Page(slug) => {
                self.pages.write().await.remove(slug);
            }
        }
        self.emit(ContentEvent::Cleared { scope });
    }

    fn emit_ready(&self, scope: ContentScope, blocks: usize, degraded: &[Relation]) {
        self.emit(ContentEvent::Ready(ReadyEvent {
            scope,
            blocks,
            degraded: degraded.iter().map(|r| r.as_str().to_string()).collect(),
            timestamp: Utc::now(),
        }));
    }

    fn emit_failed(&self, scope: ContentScope, failure: &FetchFailure) {
        self.emit(ContentEvent::Failed {
            scope,
            status: failure.status,
            message: failure.message.clone(),
        });
    }

    fn emit(&self, event: ContentEvent) {
        // No subscribers is not an error for the store.
        if let Ok(receivers) = self.bus.publish(event) {
            debug!(receivers, "content event published");
        }
    }
}
