//! Daily rating time series and anomaly selection.

use chrono::NaiveDate;
use log::{debug, warn};
use reviewlens_types::{DailyAggregate, DateRange, Rating, Review};
use smallvec::SmallVec;

/// Lowest-rated days, chronological. Inline for the usual handful of days.
pub type AnomalousDays = SmallVec<[NaiveDate; 16]>;

/// Aggregates ratings per calendar day.
///
/// Produces one entry for every day from the first to the last review day,
/// chronologically. Days without reviews have `count == 0` and no mean.
/// The rolling mean at day D averages the daily means of the days in
/// `[D - (window_days - 1), D]` that have one; with fewer days available it
/// averages what there is.
///
/// Empty input yields an empty series.
pub fn aggregate_daily(reviews: &[Review], window_days: u32) -> Vec<DailyAggregate> {
    let Some(first) = reviews.iter().map(Review::date).min() else {
        return Vec::new();
    };
    let last = reviews.iter().map(Review::date).max().unwrap_or(first);

    let span = (last - first).num_days() as usize + 1;
    if is_sparse(span, reviews.len()) {
        warn!(
            "{} reviews spread over {} days ({}..={}); check for stray timestamps",
            reviews.len(),
            span,
            first,
            last
        );
    }
    let mut sums = vec![0u64; span];
    let mut counts = vec![0u32; span];

    for review in reviews {
        let slot = (review.date() - first).num_days() as usize;
        sums[slot] += review.rating.get() as u64;
        counts[slot] += 1;
    }

    let means: Vec<Option<f64>> = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &count)| (count > 0).then(|| sum as f64 / count as f64))
        .collect();

    let width = window_days.max(1) as usize;
    let days: Vec<DailyAggregate> = first
        .iter_days()
        .take(span)
        .enumerate()
        .map(|(i, date)| {
            let window = &means[i.saturating_sub(width - 1)..=i];
            DailyAggregate {
                date,
                mean_rating: means[i],
                count: counts[i],
                rolling_mean: mean_of(window.iter().flatten().copied()),
            }
        })
        .collect();

    debug!(
        "aggregated {} reviews into {} days ({}..={})",
        reviews.len(),
        days.len(),
        first,
        last
    );
    days
}

/// Spans shorter than this are never reported as sparse.
const SPARSE_MIN_DAYS: usize = 366;

/// A span is sparse when it has this many times more days than reviews.
const SPARSE_DAYS_PER_REVIEW: usize = 10;

/// Returns `true` if a series of `span` days over `reviews` reviews is mostly empty.
fn is_sparse(span: usize, reviews: usize) -> bool {
    span >= SPARSE_MIN_DAYS && span > reviews.saturating_mul(SPARSE_DAYS_PER_REVIEW)
}

/// Picks the `n` lowest-rated days, then keeps those inside `range`.
///
/// Days are ranked by mean rating ascending; equal means keep chronological
/// order. Days without reviews are never candidates. The result is
/// chronological and may hold fewer than `n` days.
pub fn lowest_days(days: &[DailyAggregate], range: Option<&DateRange>, n: usize) -> AnomalousDays {
    let mut ranked: Vec<(NaiveDate, f64)> = days
        .iter()
        .filter_map(|d| d.mean_rating.map(|m| (d.date, m)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(n);

    let mut selected: AnomalousDays = ranked
        .into_iter()
        .map(|(date, _)| date)
        .filter(|&date| range.map_or(true, |r| r.contains(date)))
        .collect();
    selected.sort_unstable();

    if selected.len() < n {
        warn!(
            "only {} of the {} lowest-rated days fall in the target range",
            selected.len(),
            n
        );
    }
    selected
}

/// Mean rating of `reviews`, `None` when empty.
pub fn mean_rating<'r, I>(reviews: I) -> Option<f64>
where
    I: IntoIterator<Item = &'r Review>,
{
    mean_of(reviews.into_iter().map(|r| r.rating.get() as f64))
}

/// Number of reviews per rating value; index 0 is rating 1.
pub fn rating_histogram(reviews: &[Review]) -> [u32; Rating::MAX as usize] {
    let mut counts = [0u32; Rating::MAX as usize];
    for review in reviews {
        counts[(review.rating.get() - Rating::MIN) as usize] += 1;
    }
    counts
}

fn mean_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0u32), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, d).unwrap()
    }

    fn review(d: u32, rating: u8) -> Review {
        Review::new(
            day(d).and_hms_opt(12, 0, 0).unwrap(),
            Rating::new(rating).unwrap(),
            "",
        )
    }

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    fn series(means: &[Option<f64>]) -> Vec<DailyAggregate> {
        means
            .iter()
            .enumerate()
            .map(|(i, &m)| DailyAggregate {
                date: day(i as u32 + 1),
                mean_rating: m,
                count: m.map_or(0, |_| 1),
                rolling_mean: None,
            })
            .collect()
    }

    #[test]
    fn empty_input() {
        assert!(aggregate_daily(&[], 7).is_empty());
        assert!(lowest_days(&[], None, 10).is_empty());
        assert_eq!(mean_rating(&Vec::<Review>::new()), None);
    }

    #[test]
    fn daily_mean_and_count() {
        let reviews = [review(1, 5), review(1, 2), review(2, 1)];
        let days = aggregate_daily(&reviews, 7);
        assert_eq!(days.len(), 2);
        assert!(approx(days[0].mean_rating, 3.5));
        assert_eq!(days[0].count, 2);
        assert!(approx(days[1].mean_rating, 1.0));
        assert_eq!(days[1].count, 1);
    }

    #[test]
    fn rolling_mean_over_ten_days() {
        let ratings = [5u8, 4, 3, 2, 1, 5, 4, 3, 2, 1];
        let reviews: Vec<Review> = ratings
            .iter()
            .enumerate()
            .map(|(i, &r)| review(i as u32 + 1, r))
            .collect();
        let days = aggregate_daily(&reviews, 7);
        assert_eq!(days.len(), 10);

        for (i, d) in days.iter().enumerate() {
            let window = &ratings[i.saturating_sub(6)..=i];
            let expected =
                window.iter().map(|&r| r as f64).sum::<f64>() / window.len() as f64;
            assert!(
                approx(d.rolling_mean, expected),
                "day {}: {:?} != {}",
                i + 1,
                d.rolling_mean,
                expected
            );
        }
    }

    #[test]
    fn gaps_are_null_days_and_skipped_by_rolling_mean() {
        let reviews = [review(1, 4), review(4, 2)];
        let days = aggregate_daily(&reviews, 7);
        assert_eq!(days.len(), 4);
        assert_eq!(days[1].mean_rating, None);
        assert_eq!(days[1].count, 0);
        assert!(approx(days[1].rolling_mean, 4.0));
        assert!(approx(days[3].rolling_mean, 3.0));
    }

    #[test]
    fn rolling_window_drops_old_days() {
        let reviews = [review(1, 1), review(8, 5)];
        let days = aggregate_daily(&reviews, 7);
        assert!(approx(days[6].rolling_mean, 1.0));
        assert!(approx(days[7].rolling_mean, 5.0));
    }

    #[test]
    fn stray_timestamp_makes_sparse_series() {
        let stray = Review::new(
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            Rating::new(3).unwrap(),
            "",
        );
        let reviews = [stray, review(1, 4), review(2, 5)];
        let days = aggregate_daily(&reviews, 7);

        assert!(is_sparse(days.len(), reviews.len()));
        assert_eq!(days.iter().filter(|d| d.count > 0).count(), 3);
    }

    #[test]
    fn dense_series_is_not_sparse() {
        assert!(!is_sparse(31, 2));
        assert!(!is_sparse(400, 100));
        assert!(is_sparse(400, 39));
        assert!(!is_sparse(0, 0));
    }

    #[test]
    fn unordered_input() {
        let reviews = [review(3, 2), review(1, 4)];
        let days = aggregate_daily(&reviews, 7);
        assert_eq!(days.first().map(|d| d.date), Some(day(1)));
        assert_eq!(days.last().map(|d| d.date), Some(day(3)));
    }

    #[test]
    fn lowest_day_in_range_is_selected() {
        let means = [4.5, 4.0, 3.8, 4.2, 1.2, 4.4, 3.9, 4.1, 4.6, 4.3];
        let days = series(&means.map(Some));
        let range = DateRange::new(day(3), day(8)).unwrap();
        let picked = lowest_days(&days, Some(&range), 3);
        assert!(picked.contains(&day(5)));
        assert_eq!(picked.as_slice(), [day(3), day(5), day(7)]);
    }

    #[test]
    fn out_of_range_day_never_selected() {
        let means = [0.5, 4.0, 3.0, 4.2, 2.0, 4.4, 3.9, 4.1, 4.6, 4.3];
        let days = series(&means.map(Some));
        let range = DateRange::new(day(3), day(8)).unwrap();
        let picked = lowest_days(&days, Some(&range), 3);
        assert!(!picked.contains(&day(1)));
        assert_eq!(picked.as_slice(), [day(3), day(5)]);
    }

    #[test]
    fn ties_keep_chronological_order() {
        let days = series(&[Some(2.0), Some(1.0), Some(2.0), Some(2.0)]);
        let picked = lowest_days(&days, None, 2);
        assert_eq!(picked.as_slice(), [day(1), day(2)]);
    }

    #[test]
    fn null_days_are_not_candidates() {
        let days = series(&[None, Some(3.0), None]);
        let picked = lowest_days(&days, None, 10);
        assert_eq!(picked.as_slice(), [day(2)]);
    }

    #[test]
    fn histogram_and_mean() {
        let reviews = [review(1, 1), review(1, 5), review(2, 5)];
        assert_eq!(rating_histogram(&reviews), [1, 0, 0, 0, 2]);
        assert!(approx(mean_rating(&reviews), 11.0 / 3.0));
    }
}
