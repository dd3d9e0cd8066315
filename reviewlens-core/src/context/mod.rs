//! Context queries over the unfiltered token sequence.
//!
//! Stopwords and punctuation are kept here so the surrounding grammar stays
//! readable:
//!
//! - **Collocations**: adjacent word pairs that co-occur far more often than
//!   their individual frequencies predict
//! - **Concordance**: every occurrence of a word with its surrounding tokens

mod collocation;
mod concordance;

pub use collocation::Collocation;
pub use concordance::ConcordanceLine;

use crate::analyzer::tokenizer::raw_tokens;

/// Raw token sequence of a corpus, case and stopwords preserved.
#[derive(Debug, Clone, Default)]
pub struct Text {
    tokens: Vec<String>,
}

impl Text {
    /// Tokenizes `raw` without filtering.
    pub fn from_raw(raw: &str) -> Self {
        Self {
            tokens: raw_tokens(raw),
        }
    }

    /// The tokens, in document order.
    #[inline(always)]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if there are no tokens.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
