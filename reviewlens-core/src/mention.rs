//! Phrase mentions: how reviews naming a phrase are rated against the rest.

use core::fmt;

use memchr::memmem;
use reviewlens_types::Review;

use crate::series::mean_rating;

/// Mean rating of reviews mentioning a phrase, next to the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionStats {
    /// The phrase searched for.
    pub phrase: String,
    /// Number of reviews whose body contains the phrase.
    pub matches: usize,
    /// Mean rating of those reviews.
    pub mean: Option<f64>,
    /// Mean rating of all reviews searched.
    pub baseline: Option<f64>,
}

/// Finds reviews containing `phrase` (case-insensitive) and compares ratings.
///
/// ```
/// use chrono::NaiveDate;
/// use reviewlens_core::mention::mention_stats;
/// use reviewlens_types::{Rating, Review};
///
/// let at = NaiveDate::from_ymd_opt(2022, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let reviews = [
///     Review::new(at, Rating::new(1).unwrap(), "Too many podcasts"),
///     Review::new(at, Rating::new(5).unwrap(), "Great playlists"),
/// ];
/// let refs: Vec<&Review> = reviews.iter().collect();
///
/// let stats = mention_stats(&refs, "PODCAST");
/// assert_eq!(stats.matches, 1);
/// assert_eq!(stats.mean, Some(1.0));
/// assert_eq!(stats.baseline, Some(3.0));
/// ```
pub fn mention_stats(reviews: &[&Review], phrase: &str) -> MentionStats {
    let needle = phrase.to_lowercase();
    let finder = memmem::Finder::new(needle.as_bytes());

    let matching: Vec<&Review> = reviews
        .iter()
        .copied()
        .filter(|r| finder.find(r.body.to_lowercase().as_bytes()).is_some())
        .collect();

    MentionStats {
        phrase: phrase.to_string(),
        matches: matching.len(),
        mean: mean_rating(matching.iter().copied()),
        baseline: mean_rating(reviews.iter().copied()),
    }
}

impl fmt::Display for MentionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {} reviews", self.phrase, self.matches)?;
        match self.mean {
            Some(mean) => write!(f, ", mean rating {:.2}", mean)?,
            None => write!(f, ", mean rating n/a")?,
        }
        if let Some(baseline) = self.baseline {
            write!(f, " (all: {:.2})", baseline)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use reviewlens_types::Rating;

    fn review(rating: u8, body: &str) -> Review {
        let at = NaiveDate::from_ymd_opt(2022, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Review::new(at, Rating::new(rating).unwrap(), body)
    }

    #[test]
    fn case_insensitive_match() {
        let reviews = [
            review(2, "Joe Rogan everywhere"),
            review(4, "more joe rogan please"),
            review(5, "love the playlists"),
        ];
        let refs: Vec<&Review> = reviews.iter().collect();
        let stats = mention_stats(&refs, "Joe Rogan");
        assert_eq!(stats.matches, 2);
        assert_eq!(stats.mean, Some(3.0));
        assert!((stats.baseline.unwrap() - 11.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn no_match() {
        let reviews = [review(5, "fine")];
        let refs: Vec<&Review> = reviews.iter().collect();
        let stats = mention_stats(&refs, "lyrics");
        assert_eq!(stats.matches, 0);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.baseline, Some(5.0));
        assert_eq!(
            stats.to_string(),
            "\"lyrics\": 0 reviews, mean rating n/a (all: 5.00)"
        );
    }

    #[test]
    fn empty_reviews() {
        let stats = mention_stats(&[], "ads");
        assert_eq!(stats.matches, 0);
        assert_eq!(stats.baseline, None);
    }
}
