pub mod client;
pub mod image;
pub mod types;

pub use client::TmdbClient;
pub use image::ImageUrls;

use async_trait::async_trait;

use crate::model::{Movie, MovieDetail};

/// One page of the popular listing.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub page: u32,
    pub total_pages: Option<u32>,
    pub movies: Vec<Movie>,
}

/// Read access to the remote movie catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn popular(&self, page: u32) -> Result<CatalogPage, FetchError>;
    async fn movie_detail(&self, id: i64) -> Result<MovieDetail, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Catalog returned HTTP {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },
}
