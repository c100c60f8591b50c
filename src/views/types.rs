use serde::{Deserialize, Serialize};

use crate::catalog::ImageUrls;
use crate::favorites::FavoriteSet;
use crate::feed::CatalogHorizon;
use crate::model::{Movie, MovieDetail};

pub const NOT_FOUND_MESSAGE: &str = "Oops, no movie found!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCard {
    pub id: i64,
    pub title: String,
    pub release_date: String,
    pub vote_average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub is_favorite: bool,
}

impl MovieCard {
    pub fn new(movie: &Movie, images: &ImageUrls, favorites: &FavoriteSet) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            poster_url: images.poster(movie.poster_path.as_deref()),
            is_favorite: favorites.contains(movie.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub movies: Vec<MovieCard>,
    pub page: u32,
    pub loading: bool,
    pub first_load: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub horizon: CatalogHorizon,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollOutcome {
    pub triggered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteState {
    pub id: i64,
    pub is_favorite: bool,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesView {
    pub movies: Vec<MovieCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastView {
    pub name: String,
    pub character: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailView {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub release_date: String,
    pub vote_average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub cast: Vec<CastView>,
}

impl DetailView {
    pub fn new(detail: MovieDetail, images: &ImageUrls) -> Self {
        Self {
            id: detail.id,
            poster_url: images.poster(detail.poster_path.as_deref()),
            cast: detail
                .cast
                .into_iter()
                .map(|c| CastView {
                    profile_url: images.profile(c.profile_path.as_deref()),
                    name: c.name,
                    character: c.character,
                })
                .collect(),
            title: detail.title,
            overview: detail.overview,
            genres: detail.genres,
            release_date: detail.release_date,
            vote_average: detail.vote_average,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
