use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use reviewlens_core::analysis::Analysis;
use reviewlens_core::loader::{load_reviews, Columns};
use reviewlens_core::report::write_report;
use reviewlens_core::types::{AnalysisConfig, DateRange, Review};

#[derive(Parser)]
#[command(
    name = "reviewlens",
    about = "Find the worst-rated days in a review dataset and what people wrote on them",
    version
)]
struct Cli {
    /// CSV file with a header row
    input: PathBuf,

    /// First day of the target range (YYYY-MM-DD or YYYY-MM)
    #[arg(long, value_name = "DATE")]
    from: Option<String>,

    /// Last day of the target range (YYYY-MM-DD or YYYY-MM)
    #[arg(long, value_name = "DATE")]
    to: Option<String>,

    /// Number of lowest-rated days to select
    #[arg(long, value_name = "N", default_value_t = 10)]
    lowest: usize,

    /// Reviews on selected days rated below this are "bad"
    #[arg(long, value_name = "R", default_value_t = 3)]
    threshold: u8,

    /// How many n-grams to list per order
    #[arg(long, value_name = "K", default_value_t = 20)]
    top: usize,

    /// Extra stopword to keep in the token stream, on top of "in" (repeatable)
    #[arg(long = "keep-stopword", value_name = "WORD")]
    keep_stopword: Vec<String>,

    /// Word to show in context (repeatable)
    #[arg(long, value_name = "WORD")]
    concordance: Vec<String>,

    /// Phrase to compare against good reviews (repeatable)
    #[arg(long, value_name = "PHRASE")]
    mention: Vec<String>,

    /// Name of the timestamp column
    #[arg(long, value_name = "NAME", default_value = "Time_submitted")]
    time_column: String,

    /// Name of the rating column
    #[arg(long, value_name = "NAME", default_value = "Rating")]
    rating_column: String,

    /// Name of the review text column
    #[arg(long, value_name = "NAME", default_value = "Review")]
    review_column: String,
}

/// The default retained stopwords plus every `--keep-stopword`.
fn retained_stopwords(cli: &Cli) -> Vec<String> {
    let mut words = AnalysisConfig::default().retained_stopwords;
    for word in &cli.keep_stopword {
        if !words.iter().any(|w| w.eq_ignore_ascii_case(word)) {
            words.push(word.clone());
        }
    }
    words
}

/// Resolves `--from`/`--to`; a missing bound falls back to the dataset's edge.
fn target_range(cli: &Cli, reviews: &[Review]) -> Result<Option<DateRange>> {
    if cli.from.is_none() && cli.to.is_none() {
        return Ok(None);
    }

    let first = reviews.iter().map(Review::date).min();
    let last = reviews.iter().map(Review::date).max();

    let start = match &cli.from {
        Some(text) => Some(DateRange::parse_lower(text).context("invalid --from")?),
        None => first,
    };
    let end = match &cli.to {
        Some(text) => Some(DateRange::parse_upper(text).context("invalid --to")?),
        None => last,
    };

    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end)?)),
        _ => Ok(None),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let columns = Columns {
        time: cli.time_column.clone(),
        rating: cli.rating_column.clone(),
        review: cli.review_column.clone(),
    };
    let reviews = load_reviews(&cli.input, &columns)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let config = AnalysisConfig {
        lowest_days: cli.lowest,
        range: target_range(&cli, &reviews)?,
        rating_threshold: cli.threshold,
        top_k: cli.top,
        retained_stopwords: retained_stopwords(&cli),
        ..AnalysisConfig::default()
    };
    if let Some(range) = &config.range {
        info!("target range {}", range);
    }

    let analysis = Analysis::run(&reviews, &config);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_report(&mut out, &analysis, &config, &cli.concordance, &cli.mention)
        .context("failed to write report")?;
    out.flush().context("failed to write report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(["reviewlens", "reviews.csv"].into_iter().chain(args.iter().copied()))
    }

    #[test]
    fn in_is_retained_by_default() {
        assert_eq!(retained_stopwords(&parse(&[])), ["in"]);
    }

    #[test]
    fn keep_stopword_adds_to_the_default() {
        let cli = parse(&["--keep-stopword", "not", "--keep-stopword", "IN"]);
        assert_eq!(retained_stopwords(&cli), ["in", "not"]);
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.lowest, 10);
        assert_eq!(cli.threshold, 3);
        assert_eq!(cli.time_column, "Time_submitted");
        assert!(cli.from.is_none() && cli.to.is_none());
    }

    #[test]
    fn range_falls_back_to_dataset_edges() {
        let at = |d: u32| {
            chrono::NaiveDate::from_ymd_opt(2022, 3, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        };
        let rating = reviewlens_core::types::Rating::new(3).unwrap();
        let reviews = [Review::new(at(2), rating, "a"), Review::new(at(20), rating, "b")];

        assert_eq!(target_range(&parse(&[]), &reviews).unwrap(), None);

        let range = target_range(&parse(&["--from", "2022-03-10"]), &reviews)
            .unwrap()
            .unwrap();
        assert_eq!(range.start.to_string(), "2022-03-10");
        assert_eq!(range.end.to_string(), "2022-03-20");

        assert!(target_range(&parse(&["--from", "2022-04"]), &reviews).is_err());
    }
}
