//! Bigram collocations scored by log-likelihood ratio.

use core::fmt;

use rustc_hash::FxHashMap;

use crate::analyzer::stopwords::StopwordSet;
use crate::context::Text;

/// Pairs seen fewer times than this are never collocations.
const MIN_PAIR_COUNT: u64 = 2;

/// Words shorter than this (in characters) are ignored.
const MIN_WORD_CHARS: usize = 3;

const SMALL: f64 = 1e-20;

/// An adjacent word pair and its association score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collocation<'a> {
    /// First word.
    pub first: &'a str,
    /// Second word.
    pub second: &'a str,
    /// Times the pair occurred.
    pub count: u64,
    /// Log-likelihood ratio (higher is stronger).
    pub score: f64,
}

impl fmt::Display for Collocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

impl Text {
    /// Up to `k` strongest collocations, best first.
    ///
    /// Pairs seen fewer than twice, or containing a word shorter than three
    /// characters or an English stopword (case-insensitive), are skipped.
    /// Equal scores sort alphabetically.
    pub fn collocations(&self, k: usize) -> Vec<Collocation<'_>> {
        self.collocations_with(&StopwordSet::english(), k)
    }

    /// Like [`Text::collocations`] with a caller-supplied ignore list.
    pub fn collocations_with(&self, ignored: &StopwordSet, k: usize) -> Vec<Collocation<'_>> {
        let tokens = self.tokens();
        if tokens.len() < 2 || k == 0 {
            return Vec::new();
        }

        let mut words: FxHashMap<&str, u64> = FxHashMap::default();
        for token in tokens {
            *words.entry(token.as_str()).or_insert(0) += 1;
        }

        let mut pairs: FxHashMap<(&str, &str), u64> = FxHashMap::default();
        for window in tokens.windows(2) {
            *pairs
                .entry((window[0].as_str(), window[1].as_str()))
                .or_insert(0) += 1;
        }

        let total = tokens.len() as f64;
        let ignore =
            |w: &str| w.chars().count() < MIN_WORD_CHARS || ignored.contains(&w.to_lowercase());

        let mut scored: Vec<Collocation<'_>> = pairs
            .into_iter()
            .filter(|&((a, b), n)| n >= MIN_PAIR_COUNT && !ignore(a) && !ignore(b))
            .map(|((first, second), count)| Collocation {
                first,
                second,
                count,
                score: likelihood_ratio(count, words[first], words[second], total),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| (a.first, a.second).cmp(&(b.first, b.second)))
        });
        scored.truncate(k);
        scored
    }
}

/// Dunning log-likelihood ratio of a bigram's 2x2 contingency table.
///
/// `n_ii` pair count, `n_ix` / `n_xi` counts of the first / second word,
/// `n_xx` total tokens.
fn likelihood_ratio(n_ii: u64, n_ix: u64, n_xi: u64, n_xx: f64) -> f64 {
    let n_ii = n_ii as f64;
    let n_io = n_ix as f64 - n_ii;
    let n_oi = n_xi as f64 - n_ii;
    let n_oo = n_xx - n_ii - n_io - n_oi;

    let observed = [n_ii, n_oi, n_io, n_oo];
    // row and column marginals for each cell, same order as `observed`
    let expected = [
        (n_ii + n_io) * (n_ii + n_oi) / n_xx,
        (n_oi + n_oo) * (n_ii + n_oi) / n_xx,
        (n_ii + n_io) * (n_io + n_oo) / n_xx,
        (n_oi + n_oo) * (n_io + n_oo) / n_xx,
    ];

    2.0 * observed
        .iter()
        .zip(expected)
        .filter(|&(&obs, _)| obs > 0.0)
        .map(|(&obs, exp)| obs * (obs / (exp + SMALL) + SMALL).ln())
        .sum::<f64>()
}
