use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::{DetailResponse, PopularResponse};
use super::{Catalog, CatalogPage, FetchError};
use crate::config::CatalogConfig;
use crate::model::MovieDetail;

/// HTTP client for the remote movie catalog.
pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: &CatalogConfig, api_key: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    // The api key travels as a query parameter, so only the endpoint path
    // is ever logged or put into an error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Catalog request {} failed with HTTP {}", endpoint, status.as_u16());
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn popular(&self, page: u32) -> Result<CatalogPage, FetchError> {
        debug!("Fetching popular movies, page {}", page);
        let resp: PopularResponse = self
            .get_json("/movie/popular", &[("page", page.to_string())])
            .await?;

        Ok(CatalogPage {
            page: resp.page.unwrap_or(page),
            total_pages: resp.total_pages,
            movies: resp.into_movies(),
        })
    }

    async fn movie_detail(&self, id: i64) -> Result<MovieDetail, FetchError> {
        debug!("Fetching movie detail {}", id);
        let endpoint = format!("/movie/{}", id);
        let resp: DetailResponse = self
            .get_json(&endpoint, &[("append_to_response", "credits".to_string())])
            .await?;
        Ok(MovieDetail::from(resp))
    }
}
