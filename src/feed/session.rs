use tracing::{info, warn};

use super::accumulator::merge;
use super::filter::filter;
use super::sequencer::PageSequencer;
use super::trigger::{CatalogHorizon, ScrollPosition, ScrollTrigger};
use super::FIRST_PAGE;
use crate::catalog::{CatalogPage, FetchError};
use crate::config::FeedConfig;
use crate::model::Movie;

pub const LOAD_ERROR: &str = "Failed to load movies. Try reloading?";

/// State of one mounted listing view.
///
/// The feed only ever grows, and only through results released by the
/// sequencer, so pages land in page order whatever order their fetches end in.
#[derive(Debug)]
pub struct FeedSession {
    feed: Vec<Movie>,
    trigger: ScrollTrigger,
    sequencer: PageSequencer<Result<CatalogPage, String>>,
    first_load: bool,
    error: Option<String>,
}

impl FeedSession {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            feed: Vec::new(),
            trigger: ScrollTrigger::new(config.scroll_threshold, config.stop_at_catalog_end),
            sequencer: PageSequencer::new(FIRST_PAGE),
            first_load: true,
            error: None,
        }
    }

    pub fn initial_page(&self) -> u32 {
        FIRST_PAGE
    }

    pub fn on_scroll(&mut self, position: ScrollPosition) -> Option<u32> {
        self.trigger.on_scroll(position)
    }

    /// Applies the outcome of the fetch for `page`.
    pub fn complete(&mut self, page: u32, result: Result<CatalogPage, FetchError>) {
        self.trigger.settle(page);
        self.first_load = false;

        let outcome = result.map_err(|e| e.to_string());
        for (page, outcome) in self.sequencer.complete(page, outcome) {
            match outcome {
                Ok(catalog_page) => self.apply(page, catalog_page),
                Err(cause) => {
                    warn!("Page {} failed to load: {}", page, cause);
                    self.error = Some(LOAD_ERROR.to_string());
                }
            }
        }
    }

    fn apply(&mut self, page: u32, catalog_page: CatalogPage) {
        let end_reached = catalog_page.movies.is_empty()
            || catalog_page.total_pages.is_some_and(|total| page >= total);
        if end_reached {
            info!("Catalog ends at page {}", page);
            self.trigger.mark_exhausted(page);
        }

        let before = self.feed.len();
        self.feed = merge(&self.feed, &catalog_page.movies);
        self.error = None;
        info!(
            "Page {} merged: {} new of {} movies, feed holds {}",
            page,
            self.feed.len() - before,
            catalog_page.movies.len(),
            self.feed.len()
        );
    }

    pub fn feed(&self) -> &[Movie] {
        &self.feed
    }

    pub fn visible(&self, term: &str) -> Vec<Movie> {
        filter(&self.feed, term)
    }

    pub fn find(&self, id: i64) -> Option<&Movie> {
        self.feed.iter().find(|m| m.id == id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.trigger.is_loading()
    }

    pub fn is_first_load(&self) -> bool {
        self.first_load
    }

    pub fn page(&self) -> u32 {
        self.trigger.page()
    }

    pub fn horizon(&self) -> CatalogHorizon {
        self.trigger.horizon()
    }

    pub fn held_back(&self) -> usize {
        self.sequencer.held_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::movie;

    fn page(page: u32, ids: &[i64]) -> Result<CatalogPage, FetchError> {
        Ok(CatalogPage {
            page,
            total_pages: Some(500),
            movies: ids.iter().map(|&id| movie(id, &format!("Movie {}", id))).collect(),
        })
    }

    fn failed() -> Result<CatalogPage, FetchError> {
        Err(FetchError::Status {
            endpoint: "/movie/popular".to_string(),
            status: 500,
        })
    }

    fn bottom() -> ScrollPosition {
        ScrollPosition {
            viewport_height: 800.0,
            scroll_y: 1200.0,
            document_height: 2000.0,
        }
    }

    fn ids(session: &FeedSession) -> Vec<i64> {
        session.feed().iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_two_overlapping_pages() {
        let mut session = FeedSession::new(&FeedConfig::default());
        assert!(session.is_first_load());
        session.complete(1, page(1, &[1, 2]));
        assert!(!session.is_first_load());

        assert_eq!(session.on_scroll(bottom()), Some(2));
        session.complete(2, page(2, &[2, 3]));
        assert_eq!(ids(&session), vec![1, 2, 3]);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_failed_page_keeps_feed_and_allows_retry() {
        let mut session = FeedSession::new(&FeedConfig::default());
        session.complete(1, page(1, &[1, 2]));

        assert_eq!(session.on_scroll(bottom()), Some(2));
        session.complete(2, failed());
        assert_eq!(ids(&session), vec![1, 2]);
        assert_eq!(session.error(), Some(LOAD_ERROR));
        assert!(!session.is_loading());

        // The cursor does not roll back: the retry asks for the next page.
        assert_eq!(session.on_scroll(bottom()), Some(3));
        session.complete(3, page(3, &[3]));
        assert_eq!(ids(&session), vec![1, 2, 3]);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_late_first_page_lands_first() {
        let mut session = FeedSession::new(&FeedConfig::default());
        assert_eq!(session.on_scroll(bottom()), Some(2));

        session.complete(2, page(2, &[3, 4]));
        assert!(ids(&session).is_empty());
        assert_eq!(session.held_back(), 1);
        assert!(!session.is_loading());

        session.complete(1, page(1, &[1, 2, 3]));
        assert_eq!(ids(&session), vec![1, 2, 3, 4]);
        assert_eq!(session.held_back(), 0);
    }

    #[test]
    fn test_empty_page_closes_horizon() {
        let mut session = FeedSession::new(&FeedConfig::default());
        session.complete(1, page(1, &[1]));
        assert_eq!(session.horizon(), CatalogHorizon::Open);

        session.on_scroll(bottom());
        session.complete(2, page(2, &[]));
        assert_eq!(session.horizon(), CatalogHorizon::Exhausted { page: 2 });
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_last_reported_page_closes_horizon() {
        let config = FeedConfig {
            stop_at_catalog_end: true,
            ..FeedConfig::default()
        };
        let mut session = FeedSession::new(&config);
        session.complete(
            1,
            Ok(CatalogPage {
                page: 1,
                total_pages: Some(1),
                movies: vec![movie(1, "Only")],
            }),
        );
        assert_eq!(session.horizon(), CatalogHorizon::Exhausted { page: 1 });
        assert_eq!(session.on_scroll(bottom()), None);
    }

    #[test]
    fn test_visible_and_find() {
        let mut session = FeedSession::new(&FeedConfig::default());
        session.complete(
            1,
            Ok(CatalogPage {
                page: 1,
                total_pages: None,
                movies: vec![movie(1, "Dune"), movie(2, "Dune: Part Two"), movie(3, "Arrival")],
            }),
        );
        let visible: Vec<i64> = session.visible("dune").iter().map(|m| m.id).collect();
        assert_eq!(visible, vec![1, 2]);
        assert_eq!(session.visible("").len(), 3);
        assert_eq!(session.find(3).map(|m| m.title.as_str()), Some("Arrival"));
        assert!(session.find(4).is_none());
    }
}
