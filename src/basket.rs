//! Baskets
//!
//! A basket is a multiset of scanned item labels awaiting pricing.

use std::fmt;

use rustc_hash::FxHashMap;

/// A single-character item label, e.g. `'A'`.
pub type ItemLabel = char;

/// A multiset of scanned item labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    counts: FxHashMap<ItemLabel, u32>,
    len: usize,
}

impl Basket {
    /// Create an empty basket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single occurrence of a label.
    pub fn add(&mut self, label: ItemLabel) {
        *self.counts.entry(label).or_insert(0) += 1;
        self.len += 1;
    }

    /// Remove exactly one occurrence of a label.
    ///
    /// Returns `true` if an occurrence was present and removed, `false` if
    /// the basket holds none (the basket is left untouched).
    pub fn take(&mut self, label: ItemLabel) -> bool {
        match self.counts.get_mut(&label) {
            Some(count) => {
                *count -= 1;

                if *count == 0 {
                    self.counts.remove(&label);
                }

                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Number of occurrences of a label.
    #[must_use]
    pub fn count(&self, label: ItemLabel) -> u32 {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    /// Total number of items across all labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the basket holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over the distinct labels and their counts.
    pub fn iter(&self) -> impl Iterator<Item = (ItemLabel, u32)> + '_ {
        self.counts.iter().map(|(&label, &count)| (label, count))
    }
}

impl FromIterator<ItemLabel> for Basket {
    fn from_iter<I: IntoIterator<Item = ItemLabel>>(labels: I) -> Self {
        let mut basket = Basket::new();

        for label in labels {
            basket.add(label);
        }

        basket
    }
}

impl From<&str> for Basket {
    fn from(labels: &str) -> Self {
        labels.chars().collect()
    }
}

impl fmt::Display for Basket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels: Vec<ItemLabel> = self.counts.keys().copied().collect();
        labels.sort_unstable();

        for label in labels {
            for _ in 0..self.count(label) {
                write!(f, "{label}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_counts() {
        let mut basket = Basket::new();

        basket.add('A');
        basket.add('A');
        basket.add('B');

        assert_eq!(basket.count('A'), 2);
        assert_eq!(basket.count('B'), 1);
        assert_eq!(basket.len(), 3);
    }

    #[test]
    fn take_removes_exactly_one_occurrence() {
        let mut basket = Basket::from("AAB");

        assert!(basket.take('A'));

        assert_eq!(basket.count('A'), 1);
        assert_eq!(basket.len(), 2);
    }

    #[test]
    fn take_missing_label_leaves_basket_untouched() {
        let mut basket = Basket::from("AB");

        assert!(!basket.take('C'));

        assert_eq!(basket.len(), 2);
        assert_eq!(basket.count('A'), 1);
        assert_eq!(basket.count('B'), 1);
    }

    #[test]
    fn take_exhausted_label_returns_false() {
        let mut basket = Basket::from("A");

        assert!(basket.take('A'));
        assert!(!basket.take('A'));

        assert!(basket.is_empty());
    }

    #[test]
    fn from_str_counts_repeats() {
        let basket = Basket::from("AAAAAA");

        assert_eq!(basket.count('A'), 6);
        assert_eq!(basket.len(), 6);
    }

    #[test]
    fn is_empty_on_new_basket() {
        assert!(Basket::new().is_empty());
        assert!(!Basket::from("A").is_empty());
    }

    #[test]
    fn display_sorts_labels() {
        let basket = Basket::from("BACBA");

        assert_eq!(basket.to_string(), "AABBC");
    }

    #[test]
    fn iter_yields_distinct_labels_with_counts() {
        let basket = Basket::from("AAB");

        let mut pairs: Vec<(ItemLabel, u32)> = basket.iter().collect();
        pairs.sort_unstable();

        assert_eq!(pairs, vec![('A', 2), ('B', 1)]);
    }
}
