//! The end-to-end analysis: time series, anomalous days, partition, and one
//! term analysis per review subset.

use log::{info, warn};
use reviewlens_types::{AnalysisConfig, DailyAggregate, NGram, NGramOrder, Rating, Review};

use crate::analyzer::{StopwordSet, Tokenizer};
use crate::context::Text;
use crate::corpus::Corpus;
use crate::freq::{ngram_distribution, FreqDist};
use crate::mention::{mention_stats, MentionStats};
use crate::partition::{partition_reviews, Partition};
use crate::series::{aggregate_daily, lowest_days, mean_rating, rating_histogram, AnomalousDays};

/// Term analysis of one review subset.
#[derive(Debug, Clone)]
pub struct CorpusAnalysis {
    /// Name used in report headings.
    pub label: &'static str,
    /// Concatenated review bodies.
    pub corpus: Corpus,
    /// Filtered, lowercased token stream.
    pub tokens: Vec<String>,
    /// Unfiltered tokens for context queries.
    pub text: Text,
}

impl CorpusAnalysis {
    /// Concatenates `reviews` and tokenizes the result both ways.
    pub fn build(label: &'static str, reviews: &[&Review], tokenizer: &Tokenizer<'_>) -> Self {
        let corpus = Corpus::from_reviews(reviews.iter().copied());
        let tokens = tokenizer.tokenize(corpus.text());
        let text = Text::from_raw(corpus.text());

        info!(
            "{}: {} reviews, {} tokens ({} after filtering)",
            label,
            corpus.len(),
            text.len(),
            tokens.len()
        );

        Self {
            label,
            corpus,
            tokens,
            text,
        }
    }

    /// Frequency distribution of the filtered stream for one n-gram order.
    pub fn distribution(&self, order: NGramOrder) -> FreqDist<NGram<'_>> {
        ngram_distribution(&self.tokens, order)
    }

    /// The `k` most frequent n-grams of one order.
    pub fn top(&self, order: NGramOrder, k: usize) -> Vec<(NGram<'_>, u64)> {
        self.distribution(order).most_common(k)
    }
}

/// Result of a full run over one dataset.
#[derive(Debug, Clone)]
pub struct Analysis<'r> {
    /// Per-day aggregates, chronological.
    pub daily: Vec<DailyAggregate>,
    /// Review count per rating; index 0 is rating 1.
    pub histogram: [u32; Rating::MAX as usize],
    /// Mean over every review.
    pub overall_mean: Option<f64>,
    /// The lowest-rated days inside the target range.
    pub anomalous: AnomalousDays,
    /// Bad and good review subsets.
    pub partition: Partition<'r>,
    /// Terms of the bad subset.
    pub bad: CorpusAnalysis,
    /// Terms of the good subset.
    pub good: CorpusAnalysis,
}

impl<'r> Analysis<'r> {
    /// Runs every stage over `reviews`.
    ///
    /// Never fails: an empty dataset yields empty aggregates, no anomalous
    /// days and empty token streams.
    pub fn run(reviews: &'r [Review], config: &AnalysisConfig) -> Self {
        if reviews.is_empty() {
            warn!("dataset is empty");
        }

        let daily = aggregate_daily(reviews, config.rolling_window_days);
        let anomalous = lowest_days(&daily, config.range.as_ref(), config.lowest_days);
        info!(
            "{} anomalous days: {}",
            anomalous.len(),
            anomalous
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let partition = partition_reviews(reviews, &anomalous, config.rating_threshold);

        let stopwords = StopwordSet::english().without(&config.retained_stopwords);
        let tokenizer = Tokenizer::new(&stopwords);
        let bad = CorpusAnalysis::build("Bad reviews", &partition.bad, &tokenizer);
        let good = CorpusAnalysis::build("Good reviews", &partition.good, &tokenizer);

        Self {
            histogram: rating_histogram(reviews),
            overall_mean: mean_rating(reviews),
            daily,
            anomalous,
            partition,
            bad,
            good,
        }
    }

    /// Compares good reviews mentioning `phrase` against all good reviews.
    pub fn mention(&self, phrase: &str) -> MentionStats {
        mention_stats(&self.partition.good, phrase)
    }
}
