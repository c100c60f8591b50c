use serde::Deserialize;

use crate::model::{CastMember, Movie, MovieDetail};

// Wire types for the remote catalog. Everything except the id may be missing
// or null on the wire and falls back to a default.

#[derive(Debug, Clone, Deserialize)]
pub struct PopularResponse {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub results: Option<Vec<MovieEntry>>,
}

impl PopularResponse {
    pub fn into_movies(self) -> Vec<Movie> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .map(Movie::from)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieEntry {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl From<MovieEntry> for Movie {
    fn from(entry: MovieEntry) -> Self {
        Movie {
            id: entry.id,
            title: entry.title.unwrap_or_default(),
            release_date: entry.release_date.unwrap_or_default(),
            vote_average: entry.vote_average.unwrap_or_default(),
            poster_path: entry.poster_path,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<GenreEntry>>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreEntry {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Option<Vec<CastEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl From<DetailResponse> for MovieDetail {
    fn from(resp: DetailResponse) -> Self {
        let cast = resp
            .credits
            .and_then(|c| c.cast)
            .unwrap_or_default()
            .into_iter()
            .map(|c| CastMember {
                name: c.name.unwrap_or_default(),
                character: c.character.unwrap_or_default(),
                profile_path: c.profile_path,
            })
            .collect();

        MovieDetail {
            id: resp.id,
            title: resp.title.unwrap_or_default(),
            overview: resp.overview.unwrap_or_default(),
            genres: resp
                .genres
                .unwrap_or_default()
                .into_iter()
                .filter_map(|g| g.name)
                .collect(),
            release_date: resp.release_date.unwrap_or_default(),
            vote_average: resp.vote_average.unwrap_or_default(),
            poster_path: resp.poster_path,
            cast,
        }
    }
}
