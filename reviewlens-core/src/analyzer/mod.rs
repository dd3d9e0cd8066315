//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Lowercases tokens and checks they are purely alphabetic
//! - **Stopwords**: The immutable English stopword set
//! - **Tokenizer**: Splits raw review text into sentences, then words
//! - **NGram**: Extracts 1-, 2- and 3-token windows for counting

pub mod ngram;
pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::TokenNormalizer;
pub use stopwords::StopwordSet;
pub use tokenizer::Tokenizer;
