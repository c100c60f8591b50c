use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::session::FeedSession;
use super::trigger::{CatalogHorizon, ScrollPosition};
use crate::catalog::Catalog;
use crate::config::FeedConfig;
use crate::model::Movie;

struct LiveSession {
    generation: u64,
    token: CancellationToken,
    session: FeedSession,
}

/// Drives the listing view: starts page fetches and applies their results.
///
/// Each `open` mounts a new view. Fetches started for an earlier view are
/// cancelled, and anything they return afterwards is dropped.
pub struct FeedController {
    catalog: Arc<dyn Catalog>,
    config: FeedConfig,
    live: Arc<Mutex<LiveSession>>,
}

/// A page fetch running in the background.
#[derive(Debug)]
pub struct PageTask {
    page: u32,
    handle: JoinHandle<()>,
}

impl PageTask {
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Waits until the fetch has finished and its result has been applied or dropped.
    pub async fn finished(self) {
        if let Err(e) = self.handle.await {
            warn!("Page {} fetch task failed: {}", self.page, e);
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub movies: Vec<Movie>,
    pub page: u32,
    pub loading: bool,
    pub first_load: bool,
    pub error: Option<String>,
    pub horizon: CatalogHorizon,
}

impl FeedController {
    pub fn new(catalog: Arc<dyn Catalog>, config: FeedConfig) -> Self {
        let session = FeedSession::new(&config);
        Self {
            catalog,
            config,
            live: Arc::new(Mutex::new(LiveSession {
                generation: 0,
                token: CancellationToken::new(),
                session,
            })),
        }
    }

    /// Mounts a fresh listing view and starts loading its first page.
    pub async fn open(&self) -> PageTask {
        let mut live = self.live.lock().await;
        self.remount(&mut live)
    }

    /// Mounts a listing view unless one is already mounted.
    pub async fn ensure_open(&self) -> Option<PageTask> {
        let mut live = self.live.lock().await;
        if live.generation == 0 {
            Some(self.remount(&mut live))
        } else {
            None
        }
    }

    fn remount(&self, live: &mut LiveSession) -> PageTask {
        live.token.cancel();
        live.generation += 1;
        live.token = CancellationToken::new();
        live.session = FeedSession::new(&self.config);
        info!("Listing view mounted (generation {})", live.generation);

        let page = live.session.initial_page();
        self.spawn_fetch(live, page)
    }

    /// Feeds a scroll position to the trigger, starting a fetch if it fires.
    pub async fn scroll(&self, position: ScrollPosition) -> Option<PageTask> {
        let mut live = self.live.lock().await;
        if live.generation == 0 {
            return None;
        }
        let page = live.session.on_scroll(position)?;
        debug!("Scroll triggered page {}", page);
        Some(self.spawn_fetch(&live, page))
    }

    fn spawn_fetch(&self, live: &LiveSession, page: u32) -> PageTask {
        let catalog = Arc::clone(&self.catalog);
        let shared = Arc::clone(&self.live);
        let generation = live.generation;
        let token = live.token.clone();

        let handle = tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    debug!("Page {} fetch cancelled", page);
                    return;
                }
                result = catalog.popular(page) => result,
            };

            let mut live = shared.lock().await;
            if live.generation != generation {
                debug!("Dropping page {} from unmounted view {}", page, generation);
                return;
            }
            live.session.complete(page, result);
        });

        PageTask { page, handle }
    }

    /// The listing as the view should render it, filtered by `term`.
    pub async fn snapshot(&self, term: &str) -> FeedSnapshot {
        let live = self.live.lock().await;
        let session = &live.session;
        FeedSnapshot {
            movies: session.visible(term),
            page: session.page(),
            loading: session.is_loading(),
            first_load: session.is_first_load(),
            error: session.error().map(str::to_string),
            horizon: session.horizon(),
        }
    }

    pub async fn find_movie(&self, id: i64) -> Option<Movie> {
        let live = self.live.lock().await;
        live.session.find(id).cloned()
    }
}
