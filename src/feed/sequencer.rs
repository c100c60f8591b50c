use std::collections::BTreeMap;

use tracing::debug;

/// Releases page results strictly in page order.
///
/// Fetches may finish in any order; a result is held back until every
/// earlier page has been released. Failed pages are released like any other,
/// so a failure never blocks the pages after it.
#[derive(Debug, Clone)]
pub struct PageSequencer<T> {
    next: u32,
    ready: BTreeMap<u32, T>,
}

impl<T> PageSequencer<T> {
    pub fn new(first_page: u32) -> Self {
        Self {
            next: first_page,
            ready: BTreeMap::new(),
        }
    }

    /// Accepts the outcome for `page` and returns every outcome that is now
    /// releasable, in page order.
    pub fn complete(&mut self, page: u32, outcome: T) -> Vec<(u32, T)> {
        if page < self.next || self.ready.contains_key(&page) {
            debug!("Ignoring repeated result for page {}", page);
            return Vec::new();
        }
        self.ready.insert(page, outcome);

        let mut released = Vec::new();
        while let Some(outcome) = self.ready.remove(&self.next) {
            released.push((self.next, outcome));
            self.next += 1;
        }
        released
    }

    pub fn held_back(&self) -> usize {
        self.ready.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_passes_through() {
        let mut seq = PageSequencer::new(1);
        assert_eq!(seq.complete(1, "a"), vec![(1, "a")]);
        assert_eq!(seq.complete(2, "b"), vec![(2, "b")]);
    }

    #[test]
    fn test_out_of_order_is_held_back() {
        let mut seq = PageSequencer::new(1);
        assert!(seq.complete(3, "c").is_empty());
        assert!(seq.complete(2, "b").is_empty());
        assert_eq!(seq.held_back(), 2);
        assert_eq!(seq.complete(1, "a"), vec![(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(seq.held_back(), 0);
    }

    #[test]
    fn test_repeats_are_ignored() {
        let mut seq = PageSequencer::new(1);
        seq.complete(1, "a");
        assert!(seq.complete(1, "again").is_empty());
        seq.complete(3, "c");
        assert!(seq.complete(3, "again").is_empty());
        assert_eq!(seq.complete(2, "b"), vec![(2, "b"), (3, "c")]);
    }
}
