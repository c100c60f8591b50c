use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::Layer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::catalog::{Catalog, ImageUrls};
use crate::config::Config;
use crate::favorites::FavoritesStore;
use crate::feed::FeedController;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn Catalog>,
    pub feed: Arc<FeedController>,
    pub favorites: Arc<FavoritesStore>,
    pub images: Arc<ImageUrls>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Arc<dyn Catalog>,
        favorites: Arc<FavoritesStore>,
    ) -> Self {
        let feed = Arc::new(FeedController::new(catalog.clone(), config.feed.clone()));
        let images = Arc::new(ImageUrls::new(&config.catalog.image_base_url));
        Self {
            config: Arc::new(config),
            catalog,
            feed,
            favorites,
            images,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/movies", get(crate::views::get_listing))
        .route("/api/movies/open", post(crate::views::open_listing))
        .route("/api/movies/scroll", post(crate::views::scroll_listing))
        .route("/api/movies/:id/favorite", post(crate::views::toggle_favorite))
        .route("/api/movie/:id", get(crate::views::get_movie))
        .route("/api/favorites", get(crate::views::get_favorites))
        .route("/api/favorites/:id", delete(crate::views::remove_favorite));

    let mut router = Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    let app = router
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Paths are rewritten before the inner router matches them.
    let normalize = axum::middleware::from_fn(crate::middleware::normalize_path);
    Router::new().fallback_service(normalize.layer(app))
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
