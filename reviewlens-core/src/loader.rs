//! Loading review records from CSV.
//!
//! The file must have a header row; columns are located by name so their
//! order does not matter and extra columns are ignored.

use core::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info};
use reviewlens_types::{Rating, RecordError, Review};

/// Header names of the three columns the loader reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    /// Submission timestamp column.
    pub time: String,
    /// Rating column.
    pub rating: String,
    /// Review text column.
    pub review: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            time: "Time_submitted".to_string(),
            rating: "Rating".to_string(),
            review: "Review".to_string(),
        }
    }
}

/// Errors that abort loading.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    Io(io::Error),
    /// The CSV itself is malformed.
    Csv(csv::Error),
    /// A row parsed as CSV but holds an invalid field.
    Record {
        /// 1-based line number in the file.
        line: u64,
        /// What was wrong with it.
        source: RecordError,
    },
    /// The header row lacks a required column.
    Header(RecordError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read input: {}", e),
            LoadError::Csv(e) => write!(f, "malformed CSV: {}", e),
            LoadError::Record { line, source } => write!(f, "line {}: {}", line, source),
            LoadError::Header(e) => write!(f, "{}", e),
        }
    }
}

impl core::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Csv(e) => Some(e),
            LoadError::Record { source, .. } => Some(source),
            LoadError::Header(e) => Some(e),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::Csv(e)
    }
}

/// Loads every review from the CSV file at `path`.
pub fn load_reviews(path: &Path, columns: &Columns) -> Result<Vec<Review>, LoadError> {
    let file = File::open(path)?;
    let reviews = read_reviews(file, columns)?;
    info!("loaded {} reviews from {}", reviews.len(), path.display());
    Ok(reviews)
}

/// Reads reviews from any CSV source.
///
/// Fails on the first invalid row; there is no partial result.
pub fn read_reviews<R: Read>(input: R, columns: &Columns) -> Result<Vec<Review>, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| {
                LoadError::Header(RecordError::MissingColumn {
                    name: name.to_string(),
                })
            })
    };
    let time_col = find(&columns.time)?;
    let rating_col = find(&columns.rating)?;
    let review_col = find(&columns.review)?;
    debug!(
        "columns: time={} rating={} review={}",
        time_col, rating_col, review_col
    );

    let mut reviews = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let field = |i: usize| record.get(i).unwrap_or("");

        let parsed = parse_timestamp(field(time_col)).and_then(|submitted| {
            Rating::parse(field(rating_col))
                .map(|rating| Review::new(submitted, rating, field(review_col)))
        });

        match parsed {
            Ok(review) => reviews.push(review),
            Err(source) => return Err(LoadError::Record { line, source }),
        }
    }

    Ok(reviews)
}

/// Parses a submission timestamp.
///
/// Accepts RFC 3339 (the offset is dropped, local wall time kept),
/// `YYYY-MM-DD HH:MM[:SS[.fff]]` with a space or `T`, and bare `YYYY-MM-DD`.
///
/// ```
/// use reviewlens_core::loader::parse_timestamp;
///
/// let ts = parse_timestamp("2022-03-09 14:31:07").unwrap();
/// assert_eq!(ts.to_string(), "2022-03-09 14:31:07");
/// assert!(parse_timestamp("yesterday").is_err());
/// ```
pub fn parse_timestamp(field: &str) -> Result<NaiveDateTime, RecordError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    let field = field.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(field) {
        return Ok(ts.naive_local());
    }

    for format in FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(field, format) {
            return Ok(ts);
        }
    }

    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| RecordError::InvalidTimestamp {
            value: field.to_string(),
        })
}
