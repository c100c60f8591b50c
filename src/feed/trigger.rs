use serde::{Deserialize, Serialize};
use tracing::debug;

use super::FIRST_PAGE;

/// Where the reader is in the rendered listing.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ScrollPosition {
    pub viewport_height: f64,
    pub scroll_y: f64,
    pub document_height: f64,
}

impl ScrollPosition {
    pub fn distance_to_bottom(&self) -> f64 {
        self.document_height - (self.viewport_height + self.scroll_y)
    }
}

/// What is known about the end of the catalog.
///
/// The catalog is assumed to have more pages until an empty page, or the
/// reported last page, has been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CatalogHorizon {
    Open,
    Exhausted { page: u32 },
}

/// Turns scroll positions into page requests, one at a time.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    page: u32,
    loading: bool,
    threshold: f64,
    stop_at_catalog_end: bool,
    horizon: CatalogHorizon,
}

impl ScrollTrigger {
    pub fn new(threshold: f64, stop_at_catalog_end: bool) -> Self {
        Self {
            page: FIRST_PAGE,
            loading: false,
            threshold,
            stop_at_catalog_end,
            horizon: CatalogHorizon::Open,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn horizon(&self) -> CatalogHorizon {
        self.horizon
    }

    /// Advances the page cursor when the reader is close enough to the bottom
    /// and no triggered fetch is outstanding. Returns the page to fetch.
    pub fn on_scroll(&mut self, position: ScrollPosition) -> Option<u32> {
        if self.loading || position.distance_to_bottom() > self.threshold {
            return None;
        }
        if self.stop_at_catalog_end {
            if let CatalogHorizon::Exhausted { page } = self.horizon {
                debug!("Catalog ended at page {}, not advancing", page);
                return None;
            }
        }

        self.loading = true;
        self.page += 1;
        Some(self.page)
    }

    /// Records that the fetch for `page` finished, whatever its outcome.
    pub fn settle(&mut self, page: u32) {
        if self.loading && page == self.page {
            self.loading = false;
        }
    }

    pub fn mark_exhausted(&mut self, page: u32) {
        match self.horizon {
            CatalogHorizon::Exhausted { page: seen } if seen <= page => {}
            _ => self.horizon = CatalogHorizon::Exhausted { page },
        }
    }
}
