use std::collections::HashSet;

use crate::model::Movie;

/// Appends the movies of `incoming` whose id is not yet known to `existing`.
///
/// The existing prefix is returned untouched and admitted movies keep their
/// relative order. A repeated id inside `incoming` is admitted once.
pub fn merge(existing: &[Movie], incoming: &[Movie]) -> Vec<Movie> {
    let mut seen: HashSet<i64> = existing.iter().map(|m| m.id).collect();
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());
    merged.extend_from_slice(existing);
    merged.extend(incoming.iter().filter(|m| seen.insert(m.id)).cloned());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::movie;
    use proptest::prelude::*;

    fn ids(movies: &[Movie]) -> Vec<i64> {
        movies.iter().map(|m| m.id).collect()
    }

    fn movies(ids: &[i64]) -> Vec<Movie> {
        ids.iter().map(|&id| movie(id, &format!("Movie {}", id))).collect()
    }

    #[test]
    fn test_overlapping_pages() {
        let page1 = movies(&[1, 2]);
        let page2 = movies(&[2, 3]);
        let feed = merge(&[], &page1);
        let feed = merge(&feed, &page2);
        assert_eq!(ids(&feed), vec![1, 2, 3]);
    }

    #[test]
    fn test_existing_entry_wins() {
        let existing = vec![movie(1, "Original")];
        let merged = merge(&existing, &[movie(1, "Replacement")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title, "Original");
    }

    #[test]
    fn test_duplicates_within_incoming() {
        let merged = merge(&movies(&[1]), &movies(&[4, 4, 1, 5, 4]));
        assert_eq!(ids(&merged), vec![1, 4, 5]);
    }

    #[test]
    fn test_empty_incoming_is_identity() {
        let existing = movies(&[3, 1, 2]);
        assert_eq!(ids(&merge(&existing, &[])), vec![3, 1, 2]);
    }

    proptest! {
        #[test]
        fn test_merge_properties(
            existing in proptest::collection::hash_set(0i64..12, 0..8),
            incoming in proptest::collection::vec(0i64..12, 0..10),
        ) {
            let existing_ids: Vec<i64> = existing.into_iter().collect();
            let merged_ids = ids(&merge(&movies(&existing_ids), &movies(&incoming)));

            let unique: HashSet<i64> = merged_ids.iter().copied().collect();
            prop_assert_eq!(unique.len(), merged_ids.len());
            prop_assert_eq!(&merged_ids[..existing_ids.len()], &existing_ids[..]);

            let mut expected_suffix = Vec::new();
            for id in &incoming {
                if !existing_ids.contains(id) && !expected_suffix.contains(id) {
                    expected_suffix.push(*id);
                }
            }
            prop_assert_eq!(&merged_ids[existing_ids.len()..], &expected_suffix[..]);
        }
    }
}
