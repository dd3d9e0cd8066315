//! N-gram extraction module.
//!
//! Provides sliding-window extraction of 1-, 2- and 3-token sequences from a
//! token stream. N-grams borrow from the stream; nothing is copied.

use reviewlens_types::{NGram, NGramOrder};

/// Extracts n-grams from a token stream using a sliding window.
///
/// Window width is `order.width()`, stride 1. The last `width - 1` tokens
/// start no window, so a stream of length L yields `L - width + 1` n-grams
/// (none when L is shorter than the width).
///
/// # Example
///
/// ```
/// use reviewlens_core::analyzer::ngram::extract_ngrams;
/// use reviewlens_types::{NGram, NGramOrder};
///
/// let tokens = ["a", "b", "c", "d"];
/// let mut grams = Vec::new();
/// extract_ngrams(&tokens, NGramOrder::Bigram, |g| grams.push(g));
///
/// assert_eq!(
///     grams,
///     [NGram::Bigram("a", "b"), NGram::Bigram("b", "c"), NGram::Bigram("c", "d")]
/// );
/// ```
#[inline]
pub fn extract_ngrams<'a, S, F>(tokens: &'a [S], order: NGramOrder, mut callback: F)
where
    S: AsRef<str>,
    F: FnMut(NGram<'a>),
{
    extract_ngrams_with_pos(tokens, order, |gram, _| callback(gram));
}

/// Extracts n-grams with the index of their first token.
#[inline]
pub fn extract_ngrams_with_pos<'a, S, F>(tokens: &'a [S], order: NGramOrder, mut callback: F)
where
    S: AsRef<str>,
    F: FnMut(NGram<'a>, usize),
{
    let width = order.width();
    if tokens.len() < width {
        return;
    }

    for (i, window) in tokens.windows(width).enumerate() {
        if let Some(gram) = NGram::from_window(window) {
            callback(gram, i);
        }
    }
}

/// Number of n-grams a stream of `len` tokens yields, without extracting them.
#[inline(always)]
pub const fn count_ngrams(len: usize, order: NGramOrder) -> usize {
    let width = order.width();
    if len < width {
        0
    } else {
        len - width + 1
    }
}
