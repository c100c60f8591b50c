use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A movie as it appears in the popular listing.
///
/// Records are never edited after they are fetched. Two records with the same
/// `id` are the same movie, whatever their other fields say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
}

/// Extended attributes of a single movie, fetched fresh for every detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub release_date: String,
    pub vote_average: f64,
    pub poster_path: Option<String>,
    pub cast: Vec<CastMember>,
}

#[cfg(test)]
pub(crate) fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        release_date: "2024-01-01".to_string(),
        vote_average: 7.5,
        poster_path: Some(format!("/poster{}.jpg", id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_is_by_id() {
        let a = movie(1, "Alien");
        let mut b = movie(1, "Aliens");
        b.vote_average = 1.0;
        assert_eq!(a, b);
        assert_ne!(a, movie(2, "Alien"));

        let set: HashSet<Movie> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_deserialize_tolerates_nulls() {
        let json = r#"{"id": 7, "title": "Heat", "poster_path": null}"#;
        let m: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, 7);
        assert_eq!(m.release_date, "");
        assert_eq!(m.poster_path, None);
    }
}
