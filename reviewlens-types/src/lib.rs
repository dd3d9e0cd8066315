//! Core types for the reviewlens review analysis toolkit.
//!
//! This crate holds the value types shared by the analysis library and the
//! command-line front end. Keeping them separate ensures:
//!
//! - **Immutable records**: Reviews are loaded once and only ever borrowed
//! - **Borrowed keys**: N-grams point into the token stream instead of copying it
//! - **Clean boundaries**: Parsing and analysis code never depend on each other

#![warn(missing_docs)]

use core::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// A star rating attached to a review.
///
/// Ratings are bounded to `1..=5`. The newtype keeps out-of-range values
/// from ever reaching the aggregation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Lowest valid rating.
    pub const MIN: u8 = 1;
    /// Highest valid rating.
    pub const MAX: u8 = 5;

    /// Creates a rating, rejecting values outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, RecordError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RecordError::InvalidRating {
                value: value.to_string(),
            })
        }
    }

    /// Parses a rating field.
    ///
    /// Accepts integers (`"4"`) and integral decimals (`"4.0"`), since
    /// spreadsheet exports often write ratings as floats.
    ///
    /// ```
    /// use reviewlens_types::Rating;
    ///
    /// assert_eq!(Rating::parse("4").unwrap().get(), 4);
    /// assert_eq!(Rating::parse(" 2.0 ").unwrap().get(), 2);
    /// assert!(Rating::parse("4.5").is_err());
    /// ```
    pub fn parse(field: &str) -> Result<Self, RecordError> {
        let field = field.trim();
        let invalid = || RecordError::InvalidRating {
            value: field.to_string(),
        };

        if let Ok(value) = field.parse::<u8>() {
            return Self::new(value).map_err(|_| invalid());
        }

        let value = field.parse::<f64>().map_err(|_| invalid())?;
        if value.fract() != 0.0 || value < Self::MIN as f64 || value > Self::MAX as f64 {
            return Err(invalid());
        }
        Ok(Self(value as u8))
    }

    /// Returns the numeric rating.
    #[inline(always)]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single review as loaded from the input file.
///
/// Records are immutable once loaded; every later stage borrows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// When the review was submitted.
    pub submitted: NaiveDateTime,
    /// Star rating.
    pub rating: Rating,
    /// Free-text review body.
    pub body: String,
}

impl Review {
    /// Creates a review record.
    pub fn new(submitted: NaiveDateTime, rating: Rating, body: impl Into<String>) -> Self {
        Self {
            submitted,
            rating,
            body: body.into(),
        }
    }

    /// Calendar day of submission (timestamp floored to the day).
    #[inline(always)]
    pub fn date(&self) -> NaiveDate {
        self.submitted.date()
    }
}

/// Ratings aggregated over one calendar day.
///
/// Days inside the observed span with no reviews are still present, with
/// `count == 0` and no mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyAggregate {
    /// The calendar day.
    pub date: NaiveDate,
    /// Mean rating of the day's reviews, `None` if there were none.
    pub mean_rating: Option<f64>,
    /// Number of reviews submitted that day.
    pub count: u32,
    /// Trailing rolling mean of daily means, `None` if no day in the window has a mean.
    pub rolling_mean: Option<f64>,
}

/// Width of an n-gram window.
///
/// `#[repr(u8)]` so the discriminant is the window width itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NGramOrder {
    /// Single tokens.
    Unigram = 1,
    /// Adjacent token pairs.
    Bigram = 2,
    /// Adjacent token triples.
    Trigram = 3,
}

impl NGramOrder {
    /// All supported orders, smallest first.
    pub const ALL: [NGramOrder; 3] = [NGramOrder::Unigram, NGramOrder::Bigram, NGramOrder::Trigram];

    /// Number of tokens in one n-gram of this order.
    #[inline(always)]
    pub const fn width(self) -> usize {
        self as usize
    }

    /// Human-readable plural label, used in report headings.
    pub const fn label(self) -> &'static str {
        match self {
            NGramOrder::Unigram => "Words",
            NGramOrder::Bigram => "Bigrams",
            NGramOrder::Trigram => "Trigrams",
        }
    }
}

/// A contiguous run of 1 to 3 tokens, borrowed from a token stream.
///
/// Order within the tuple matters: `Bigram("log", "in")` and
/// `Bigram("in", "log")` are different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NGram<'a> {
    /// One token.
    Unigram(&'a str),
    /// Two adjacent tokens.
    Bigram(&'a str, &'a str),
    /// Three adjacent tokens.
    Trigram(&'a str, &'a str, &'a str),
}

impl<'a> NGram<'a> {
    /// Builds an n-gram from a window of 1 to 3 tokens.
    ///
    /// Returns `None` for any other window length.
    #[inline(always)]
    pub fn from_window<S: AsRef<str>>(window: &'a [S]) -> Option<Self> {
        match window {
            [a] => Some(NGram::Unigram(a.as_ref())),
            [a, b] => Some(NGram::Bigram(a.as_ref(), b.as_ref())),
            [a, b, c] => Some(NGram::Trigram(a.as_ref(), b.as_ref(), c.as_ref())),
            _ => None,
        }
    }

    /// The order (width) of this n-gram.
    #[inline(always)]
    pub const fn order(&self) -> NGramOrder {
        match self {
            NGram::Unigram(..) => NGramOrder::Unigram,
            NGram::Bigram(..) => NGramOrder::Bigram,
            NGram::Trigram(..) => NGramOrder::Trigram,
        }
    }
}

impl fmt::Display for NGram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NGram::Unigram(a) => f.write_str(a),
            NGram::Bigram(a, b) => write!(f, "{} {}", a, b),
            NGram::Trigram(a, b, c) => write!(f, "{} {} {}", a, b, c),
        }
    }
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day in the range.
    pub start: NaiveDate,
    /// Last day in the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RecordError> {
        if start > end {
            return Err(RecordError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns `true` if `date` lies inside the range.
    #[inline(always)]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Parses a lower bound: `YYYY-MM-DD`, or `YYYY-MM` meaning the first of the month.
    pub fn parse_lower(text: &str) -> Result<NaiveDate, RecordError> {
        parse_bound(text, false)
    }

    /// Parses an upper bound: `YYYY-MM-DD`, or `YYYY-MM` meaning the last day of the month.
    ///
    /// ```
    /// use reviewlens_types::DateRange;
    ///
    /// let end = DateRange::parse_upper("2024-02").unwrap();
    /// assert_eq!(end.to_string(), "2024-02-29");
    /// ```
    pub fn parse_upper(text: &str) -> Result<NaiveDate, RecordError> {
        parse_bound(text, true)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

fn parse_bound(text: &str, upper: bool) -> Result<NaiveDate, RecordError> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }

    let invalid = || RecordError::InvalidTimestamp {
        value: text.to_string(),
    };

    let (year, month) = text.split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;

    if !upper {
        return Ok(first);
    }

    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month.and_then(|d| d.pred_opt()).ok_or_else(invalid)
}

/// Errors raised while turning raw input into typed records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Rating field is not an integer in `1..=5`.
    InvalidRating {
        /// The offending field text.
        value: String,
    },
    /// Timestamp or date field could not be parsed.
    InvalidTimestamp {
        /// The offending field text.
        value: String,
    },
    /// A required column is absent from the header row.
    MissingColumn {
        /// The column that was looked up.
        name: String,
    },
    /// A date range whose start lies after its end.
    InvalidDateRange {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::InvalidRating { value } => {
                write!(
                    f,
                    "invalid rating {:?} (expected an integer {}-{})",
                    value,
                    Rating::MIN,
                    Rating::MAX
                )
            }
            RecordError::InvalidTimestamp { value } => {
                write!(f, "invalid timestamp {:?}", value)
            }
            RecordError::MissingColumn { name } => {
                write!(f, "missing column {:?} in header row", name)
            }
            RecordError::InvalidDateRange { start, end } => {
                write!(f, "date range starts ({}) after it ends ({})", start, end)
            }
        }
    }
}

impl core::error::Error for RecordError {}

/// Analysis configuration options.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// How many lowest-rated days to consider anomalous before range filtering.
    /// Default: 10
    pub lowest_days: usize,
    /// Only days inside this range may be anomalous. `None` means the whole dataset.
    pub range: Option<DateRange>,
    /// Reviews on anomalous days rated strictly below this are "bad".
    /// Default: 3
    pub rating_threshold: u8,
    /// Rolling mean window, in calendar days.
    /// Default: 7
    pub rolling_window_days: u32,
    /// Entries printed per n-gram ranking.
    pub top_k: usize,
    /// Bars in the top-words chart.
    pub chart_k: usize,
    /// Collocations printed per corpus.
    pub collocation_count: usize,
    /// Concordance line width in characters.
    pub concordance_width: usize,
    /// Maximum concordance lines printed per word.
    pub concordance_lines: usize,
    /// Words removed from the English stopword list because they carry signal here.
    /// Default: `["in"]` ("log in", "sign in").
    pub retained_stopwords: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lowest_days: 10,
            range: None,
            rating_threshold: 3,
            rolling_window_days: 7,
            top_k: 20,
            chart_k: 20,
            collocation_count: 20,
            concordance_width: 79,
            concordance_lines: 25,
            retained_stopwords: vec!["in".to_string()],
        }
    }
}
