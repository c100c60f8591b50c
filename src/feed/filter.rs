use crate::model::Movie;

/// Movies whose title contains `term`, ignoring case, in feed order.
pub fn filter(feed: &[Movie], term: &str) -> Vec<Movie> {
    if term.is_empty() {
        return feed.to_vec();
    }

    let needle = term.to_lowercase();
    feed.iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::movie;
    use proptest::prelude::*;

    fn feed() -> Vec<Movie> {
        vec![
            movie(1, "The Matrix"),
            movie(2, "Matrix Reloaded"),
            movie(3, "Alien"),
            movie(4, "THE MATRIX RESURRECTIONS"),
        ]
    }

    #[test]
    fn test_empty_term_returns_feed() {
        let feed = feed();
        let all = filter(&feed, "");
        assert_eq!(all.len(), feed.len());
        assert!(all.iter().zip(feed.iter()).all(|(a, b)| a.id == b.id && a.title == b.title));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let ids: Vec<i64> = filter(&feed(), "mAtRiX").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    fn titled(titles: &[String]) -> Vec<Movie> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| movie(i as i64, title))
            .collect()
    }

    proptest! {
        #[test]
        fn test_empty_term_is_identity(titles in proptest::collection::vec("[a-cA-C ]{0,6}", 0..10)) {
            let feed = titled(&titles);
            let ids: Vec<i64> = filter(&feed, "").iter().map(|m| m.id).collect();
            let expected: Vec<i64> = feed.iter().map(|m| m.id).collect();
            prop_assert_eq!(ids, expected);
        }

        #[test]
        fn test_result_is_matching_subsequence(
            titles in proptest::collection::vec("[a-cA-C ]{0,6}", 0..10),
            term in "[a-cA-C ]{0,3}",
        ) {
            let feed = titled(&titles);
            let result = filter(&feed, &term);
            let needle = term.to_lowercase();

            let mut pos = 0;
            for m in &result {
                prop_assert!(m.title.to_lowercase().contains(&needle));
                let found = feed[pos..].iter().position(|f| f.id == m.id);
                prop_assert!(found.is_some(), "{} out of order for {:?}", m.id, term);
                pos += found.unwrap_or(0) + 1;
            }

            let matching = feed
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .count();
            prop_assert_eq!(result.len(), matching);
        }
    }

    #[test]
    fn test_no_match() {
        assert!(filter(&feed(), "godfather").is_empty());
    }
}
