//! Splitting reviews into the "bad" and "good" subsets.
//!
//! - **bad**: posted on an anomalous day AND rated below the threshold
//! - **good**: posted on any other day, whatever the rating
//!
//! The threshold only applies to the bad side, so a high rating posted on an
//! anomalous day lands in neither subset.

use chrono::NaiveDate;
use log::info;
use reviewlens_types::Review;
use rustc_hash::FxHashSet;

/// The two review subsets, borrowed and in original row order.
#[derive(Debug, Clone, Default)]
pub struct Partition<'r> {
    /// Low-rated reviews from anomalous days.
    pub bad: Vec<&'r Review>,
    /// Every review from a non-anomalous day.
    pub good: Vec<&'r Review>,
}

impl Partition<'_> {
    /// Reviews that ended up in neither subset.
    pub fn dropped(&self, total: usize) -> usize {
        total - self.bad.len() - self.good.len()
    }
}

/// Returns `true` if `review` belongs to the bad subset.
#[inline]
pub fn is_bad(review: &Review, anomalous: &FxHashSet<NaiveDate>, threshold: u8) -> bool {
    anomalous.contains(&review.date()) && review.rating.get() < threshold
}

/// Returns `true` if `review` belongs to the good subset.
#[inline]
pub fn is_good(review: &Review, anomalous: &FxHashSet<NaiveDate>) -> bool {
    !anomalous.contains(&review.date())
}

/// Partitions `reviews` against the anomalous days and rating threshold.
pub fn partition_reviews<'r>(
    reviews: &'r [Review],
    anomalous: &[NaiveDate],
    threshold: u8,
) -> Partition<'r> {
    let days: FxHashSet<NaiveDate> = anomalous.iter().copied().collect();

    let partition = Partition {
        bad: reviews
            .iter()
            .filter(|r| is_bad(r, &days, threshold))
            .collect(),
        good: reviews.iter().filter(|r| is_good(r, &days)).collect(),
    };

    info!(
        "partitioned {} reviews: {} bad, {} good, {} dropped",
        reviews.len(),
        partition.bad.len(),
        partition.good.len(),
        partition.dropped(reviews.len())
    );
    partition
}
