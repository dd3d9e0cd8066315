//! Frequency distributions.
//!
//! [`FreqDist`] counts hashable keys while remembering the order in which
//! each key was first seen. That order is the tie-breaker for
//! [`FreqDist::most_common`], which makes rankings deterministic across runs
//! regardless of hash seeds.
//!
//! Memory layout:
//! - Entries live in one `Vec<(K, u64)>` in first-seen order
//! - An `FxHashMap<K, usize>` maps each key to its slot in that vector

use core::hash::Hash;

use reviewlens_types::{NGram, NGramOrder};
use rustc_hash::FxHashMap;

use crate::analyzer::ngram::{count_ngrams, extract_ngrams};

/// Mapping from key to occurrence count with stable top-k queries.
#[derive(Debug, Clone)]
pub struct FreqDist<K> {
    index: FxHashMap<K, usize>,
    entries: Vec<(K, u64)>,
    total: u64,
}

impl<K> Default for FreqDist<K> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
            entries: Vec::new(),
            total: 0,
        }
    }
}

impl<K: Eq + Hash + Clone> FreqDist<K> {
    /// Creates an empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty distribution with room for `capacity` distinct keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            entries: Vec::with_capacity(capacity),
            total: 0,
        }
    }

    /// Counts one occurrence of `key`.
    #[inline]
    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    /// Counts `n` occurrences of `key`.
    pub fn add_n(&mut self, key: K, n: u64) {
        self.total += n;
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 += n;
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, n));
    }

    /// Count for `key`, zero if never seen.
    #[inline]
    pub fn get(&self, key: &K) -> u64 {
        self.index
            .get(key)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    /// Share of all counted occurrences that are `key`, in percent.
    ///
    /// Returns 0.0 for an empty distribution.
    pub fn percent(&self, key: &K) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.get(key) as f64 * 100.0 / self.total as f64
    }

    /// Up to `k` keys with the highest counts, descending.
    ///
    /// Ties keep first-seen order.
    ///
    /// ```
    /// use reviewlens_core::FreqDist;
    ///
    /// let dist: FreqDist<&str> = ["ads", "skip", "ads", "crash", "skip"].into_iter().collect();
    /// assert_eq!(dist.most_common(2), [("ads", 2), ("skip", 2)]);
    /// ```
    pub fn most_common(&self, k: usize) -> Vec<(K, u64)> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        // stable: equal counts stay in slot (first-seen) order
        order.sort_by(|&a, &b| self.entries[b].1.cmp(&self.entries[a].1));
        order.truncate(k);
        order
            .into_iter()
            .map(|slot| self.entries[slot].clone())
            .collect()
    }
}

impl<K> FreqDist<K> {
    /// Total number of counted occurrences.
    #[inline(always)]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct keys.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been counted.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(key, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.entries.iter().map(|(k, n)| (k, *n))
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FreqDist<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut dist = Self::new();
        dist.extend(iter);
        dist
    }
}

impl<K: Eq + Hash + Clone> Extend<K> for FreqDist<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

/// Counts the n-grams of `tokens` for one order.
///
/// Order 1 counts tokens directly; higher orders count sliding windows.
pub fn ngram_distribution<S: AsRef<str>>(tokens: &[S], order: NGramOrder) -> FreqDist<NGram<'_>> {
    let mut dist = FreqDist::with_capacity(count_ngrams(tokens.len(), order).min(1 << 16));
    extract_ngrams(tokens, order, |gram| dist.add(gram));
    dist
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FreqDist<&'static str> {
        ["play", "skip", "ads", "skip", "ads", "ads", "shuffle", "play"]
            .into_iter()
            .collect()
    }

    #[test]
    fn counts_and_total() {
        let dist = sample();
        assert_eq!(dist.get(&"ads"), 3);
        assert_eq!(dist.get(&"skip"), 2);
        assert_eq!(dist.get(&"missing"), 0);
        assert_eq!(dist.total(), 8);
        assert_eq!(dist.len(), 4);
    }

    #[test]
    fn most_common_descending_with_first_seen_ties() {
        let dist = sample();
        assert_eq!(
            dist.most_common(10),
            [("ads", 3), ("play", 2), ("skip", 2), ("shuffle", 1)]
        );
    }

    #[test]
    fn most_common_properties() {
        let dist = sample();
        for k in 0..6 {
            let top = dist.most_common(k);
            assert!(top.len() <= k);
            for pair in top.windows(2) {
                assert!(pair[0].1 >= pair[1].1);
            }
            for (key, count) in &top {
                assert_eq!(dist.get(key), *count);
            }
        }
    }

    #[test]
    fn most_common_zero() {
        assert!(sample().most_common(0).is_empty());
    }

    #[test]
    fn percent() {
        let dist = sample();
        assert!((dist.percent(&"ads") - 37.5).abs() < 1e-9);
        assert_eq!(dist.percent(&"missing"), 0.0);
        assert_eq!(FreqDist::<&str>::new().percent(&"x"), 0.0);
    }

    #[test]
    fn add_n_accumulates() {
        let mut dist = FreqDist::new();
        dist.add_n("a", 4);
        dist.add("a");
        dist.add_n("b", 5);
        assert_eq!(dist.most_common(2), [("a", 5), ("b", 5)]);
        assert_eq!(dist.total(), 10);
    }

    #[test]
    fn iter_in_first_seen_order() {
        let dist = sample();
        let keys: Vec<&str> = dist.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, ["play", "skip", "ads", "shuffle"]);
    }

    #[test]
    fn empty_distribution() {
        let dist: FreqDist<String> = FreqDist::new();
        assert!(dist.is_empty());
        assert_eq!(dist.total(), 0);
        assert!(dist.most_common(20).is_empty());
    }

    #[test]
    fn bigram_distribution() {
        let tokens = ["please", "fix", "please", "fix", "app"];
        let dist = ngram_distribution(&tokens, NGramOrder::Bigram);
        assert_eq!(dist.total(), 4);
        assert_eq!(
            dist.most_common(1),
            [(NGram::Bigram("please", "fix"), 2)]
        );
        assert_eq!(dist.get(&NGram::Bigram("fix", "please")), 1);
    }

    #[test]
    fn distribution_of_empty_stream() {
        let dist = ngram_distribution::<String>(&[], NGramOrder::Trigram);
        assert!(dist.is_empty());
    }
}
