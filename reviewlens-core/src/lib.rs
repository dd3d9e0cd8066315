//! Rating time series and term analysis for product reviews.
//!
//! The pipeline runs strictly forward:
//!
//! 1. [`loader`] reads review records from CSV
//! 2. [`series`] aggregates ratings per day and picks the lowest-rated days
//! 3. [`partition`] splits reviews into a "bad" and a "good" subset
//! 4. [`analyzer`] tokenizes each subset and builds n-grams
//! 5. [`freq`] counts n-grams and answers top-k queries
//! 6. [`context`] answers collocation and concordance queries
//! 7. [`report`] renders everything as plain text
//!
//! [`analysis`] wires the stages together.

pub mod analysis;
pub mod analyzer;
pub mod context;
pub mod corpus;
pub mod freq;
pub mod loader;
pub mod mention;
pub mod partition;
pub mod report;
pub mod series;

pub use analysis::{Analysis, CorpusAnalysis};
pub use freq::FreqDist;
pub use reviewlens_types as types;
