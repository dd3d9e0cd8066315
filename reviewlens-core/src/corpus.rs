//! Concatenated review text.
//!
//! The bodies of a review subset are joined into one string so the tokenizer
//! runs over a single input:
//!
//! ```text
//! [body0]\n[body1]\n[body2]
//! ```
//!
//! The newline is a sentence boundary for the tokenizer, so the last word of
//! one review never fuses with the first word of the next.

use reviewlens_types::Review;

const SEPARATOR: char = '\n';

/// Ordered, append-only concatenation of review bodies.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    buffer: String,
    bodies: usize,
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a corpus from reviews, keeping their order.
    pub fn from_reviews<'r, I>(reviews: I) -> Self
    where
        I: IntoIterator<Item = &'r Review>,
    {
        let mut corpus = Self::new();
        for review in reviews {
            corpus.push(&review.body);
        }
        corpus
    }

    /// Appends a body.
    pub fn push(&mut self, body: &str) {
        if self.bodies > 0 {
            self.buffer.push(SEPARATOR);
        }
        self.buffer.push_str(body);
        self.bodies += 1;
    }

    /// The whole concatenated text.
    #[inline(always)]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Number of bodies.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bodies
    }

    /// Returns `true` if no body has been added.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bodies == 0
    }
}
