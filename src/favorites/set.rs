use serde::{Deserialize, Serialize};

use crate::model::Movie;

/// Favorited movies keyed by id, kept in the order they were added.
///
/// Serializes as a plain JSON array of movie objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    movies: Vec<Movie>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    pub fn get(&self, id: i64) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    pub(crate) fn insert(&mut self, movie: Movie) {
        if !self.contains(movie.id) {
            self.movies.push(movie);
        }
    }

    pub(crate) fn remove(&mut self, id: i64) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != id);
        self.movies.len() != before
    }
}

impl FromIterator<Movie> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        let mut set = FavoriteSet::new();
        for movie in iter {
            set.insert(movie);
        }
        set
    }
}

// Set semantics: insertion order does not take part in equality.
impl PartialEq for FavoriteSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.movies.iter().all(|m| other.contains(m.id))
    }
}

impl Eq for FavoriteSet {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::movie;

    #[test]
    fn test_duplicates_are_collapsed() {
        let set: FavoriteSet = vec![movie(1, "A"), movie(1, "A again"), movie(2, "B")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).map(|m| m.title.as_str()), Some("A"));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: FavoriteSet = vec![movie(1, "A"), movie(2, "B")].into_iter().collect();
        let b: FavoriteSet = vec![movie(2, "B"), movie(1, "A")].into_iter().collect();
        let c: FavoriteSet = vec![movie(1, "A")].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serializes_as_array() {
        let set: FavoriteSet = vec![movie(5, "Five")].into_iter().collect();
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], 5);
    }
}
