use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info, warn};

use super::types::*;
use crate::db::DbError;
use crate::feed::ScrollPosition;
use crate::server::AppState;

pub async fn get_listing(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Json<ListingView> {
    // The task keeps running after the response is sent.
    let _ = state.feed.ensure_open().await;

    let snapshot = state.feed.snapshot(&query.q).await;
    let favorites = state.favorites.load().await;

    // A load error replaces the listing until a later page succeeds.
    let movies = if snapshot.error.is_some() {
        Vec::new()
    } else {
        snapshot
            .movies
            .iter()
            .map(|m| MovieCard::new(m, &state.images, &favorites))
            .collect()
    };

    Json(ListingView {
        movies,
        page: snapshot.page,
        loading: snapshot.loading,
        first_load: snapshot.first_load,
        error: snapshot.error,
        horizon: snapshot.horizon,
    })
}

pub async fn open_listing(State(state): State<AppState>) -> StatusCode {
    let task = state.feed.open().await;
    info!("Listing opened, loading page {}", task.page());
    StatusCode::ACCEPTED
}

pub async fn scroll_listing(
    State(state): State<AppState>,
    Json(position): Json<ScrollPosition>,
) -> Json<ScrollOutcome> {
    let page = state.feed.scroll(position).await.map(|task| task.page());
    Json(ScrollOutcome {
        triggered: page.is_some(),
        page,
    })
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> Result<Json<FavoriteState>, StatusCode> {
    let movie = match state.feed.find_movie(movie_id).await {
        Some(movie) => movie,
        // Something scrolled away or listed on another view can still be unfavorited.
        None => state
            .favorites
            .try_load()
            .await
            .map_err(storage_unavailable)?
            .get(movie_id)
            .cloned()
            .ok_or(StatusCode::NOT_FOUND)?,
    };

    let favorites = state
        .favorites
        .toggle_and_persist(&movie)
        .await
        .map_err(storage_unavailable)?;
    Ok(Json(FavoriteState {
        id: movie_id,
        is_favorite: favorites.contains(movie_id),
        count: favorites.len(),
    }))
}

pub async fn get_favorites(State(state): State<AppState>) -> Json<FavoritesView> {
    let favorites = state.favorites.load().await;
    let movies = favorites
        .iter()
        .map(|m| MovieCard::new(m, &state.images, &favorites))
        .collect();
    Json(FavoritesView { movies })
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> Result<Json<FavoriteState>, StatusCode> {
    let favorites = state
        .favorites
        .remove_and_persist(movie_id)
        .await
        .map_err(storage_unavailable)?;
    Ok(Json(FavoriteState {
        id: movie_id,
        is_favorite: false,
        count: favorites.len(),
    }))
}

// Stored favorites could not be read; nothing was written.
fn storage_unavailable(e: DbError) -> StatusCode {
    error!("Favorites storage unavailable: {}", e);
    StatusCode::SERVICE_UNAVAILABLE
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> Result<Json<DetailView>, (StatusCode, Json<ErrorBody>)> {
    match state.catalog.movie_detail(movie_id).await {
        Ok(detail) => Ok(Json(DetailView::new(detail, &state.images))),
        Err(e) => {
            warn!("Detail for movie {} unavailable: {}", movie_id, e);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: NOT_FOUND_MESSAGE.to_string(),
                }),
            ))
        }
    }
}
