//! Plain-text rendering of an [`Analysis`].
//!
//! Every writer takes any [`Write`] sink so the binary can print to stdout
//! and tests can render into a buffer.

use std::io::{self, Write};

use reviewlens_types::{AnalysisConfig, DailyAggregate, NGram, NGramOrder, Rating};

use crate::analysis::{Analysis, CorpusAnalysis};

/// Width of the longest bar in a chart, in characters.
pub const BAR_WIDTH: usize = 40;

/// Renders ranked n-grams as display strings, best first.
///
/// ```
/// use reviewlens_core::report::ranked_terms;
/// use reviewlens_types::NGram;
///
/// let top = [(NGram::Bigram("please", "fix"), 4), (NGram::Unigram("ads"), 3)];
/// assert_eq!(ranked_terms(&top), ["please fix", "ads"]);
/// ```
pub fn ranked_terms(top: &[(NGram<'_>, u64)]) -> Vec<String> {
    top.iter().map(|(gram, _)| gram.to_string()).collect()
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = (value / max * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.min(BAR_WIDTH))
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Writes a horizontal bar chart scaled to its largest value.
pub fn write_bar_chart<W: Write>(
    out: &mut W,
    title: &str,
    bars: &[(String, f64)],
    precision: usize,
    unit: &str,
) -> io::Result<()> {
    writeln!(out, "{}", title)?;
    if bars.is_empty() {
        return writeln!(out, "  (no data)");
    }

    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = bars.iter().map(|&(_, v)| v).fold(0.0, f64::max);
    for (label, value) in bars {
        writeln!(
            out,
            "  {:<lw$} {:>9.prec$}{} |{}",
            label,
            value,
            unit,
            bar(*value, max),
            lw = label_width,
            prec = precision
        )?;
    }
    Ok(())
}

/// Writes the daily series as a table with a bar per day's mean.
pub fn write_daily<W: Write>(out: &mut W, days: &[DailyAggregate], window_days: u32) -> io::Result<()> {
    writeln!(out, "Daily ratings")?;
    writeln!(
        out,
        "  {:<10}  {:>5}  {:>5}  {:>6}",
        "date",
        "mean",
        format!("{}d", window_days),
        "count"
    )?;
    for day in days {
        writeln!(
            out,
            "  {}  {:>5}  {:>5}  {:>6}  |{}",
            day.date,
            optional(day.mean_rating),
            optional(day.rolling_mean),
            day.count,
            bar(day.mean_rating.unwrap_or(0.0), Rating::MAX as f64)
        )?;
    }
    Ok(())
}

/// Writes the number of reviews per rating value.
pub fn write_rating_counts<W: Write>(
    out: &mut W,
    histogram: &[u32; Rating::MAX as usize],
) -> io::Result<()> {
    let bars: Vec<(String, f64)> = histogram
        .iter()
        .zip(Rating::MIN..)
        .map(|(&count, rating)| (rating.to_string(), count as f64))
        .collect();
    write_bar_chart(out, "Reviews per rating", &bars, 0, "")
}

/// Writes the rankings, word chart, collocations and concordances of one corpus.
pub fn write_corpus<W: Write>(
    out: &mut W,
    corpus: &CorpusAnalysis,
    config: &AnalysisConfig,
    concordance_words: &[String],
) -> io::Result<()> {
    writeln!(
        out,
        "== {} ({} reviews, {} tokens) ==",
        corpus.label,
        corpus.corpus.len(),
        corpus.tokens.len()
    )?;

    for order in NGramOrder::ALL {
        let top = corpus.top(order, config.top_k);
        writeln!(out, "{}: {}", order.label(), ranked_terms(&top).join(", "))?;
    }
    writeln!(out)?;

    let words = corpus.distribution(NGramOrder::Unigram);
    let bars: Vec<(String, f64)> = words
        .most_common(config.chart_k)
        .into_iter()
        .map(|(gram, _)| (gram.to_string(), words.percent(&gram)))
        .collect();
    write_bar_chart(
        out,
        &format!("Top {} words (% of tokens)", config.chart_k),
        &bars,
        2,
        "%",
    )?;
    writeln!(out)?;

    let collocations = corpus.text.collocations(config.collocation_count);
    if collocations.is_empty() {
        writeln!(out, "Collocations: (none)")?;
    } else {
        let joined: Vec<String> = collocations.iter().map(|c| c.to_string()).collect();
        writeln!(out, "Collocations: {}", joined.join("; "))?;
    }

    for word in concordance_words {
        let lines = corpus
            .text
            .concordance_with(word, config.concordance_width / 4);
        writeln!(out)?;
        if lines.is_empty() {
            writeln!(out, "Concordance for {:?}: no matches", word)?;
            continue;
        }
        writeln!(
            out,
            "Concordance for {:?}: displaying {} of {} matches",
            word,
            lines.len().min(config.concordance_lines),
            lines.len()
        )?;
        for line in lines.iter().take(config.concordance_lines) {
            writeln!(out, "{}", line.render(config.concordance_width))?;
        }
    }
    Ok(())
}

/// Writes the full report.
pub fn write_report<W: Write>(
    out: &mut W,
    analysis: &Analysis<'_>,
    config: &AnalysisConfig,
    concordance_words: &[String],
    mentions: &[String],
) -> io::Result<()> {
    let total: u32 = analysis.histogram.iter().sum();
    writeln!(
        out,
        "{} reviews over {} days, mean rating {}",
        total,
        analysis.daily.len(),
        optional(analysis.overall_mean)
    )?;
    writeln!(out)?;

    write_daily(out, &analysis.daily, config.rolling_window_days)?;
    writeln!(out)?;
    write_rating_counts(out, &analysis.histogram)?;
    writeln!(out)?;

    let days: Vec<String> = analysis.anomalous.iter().map(|d| d.to_string()).collect();
    match &config.range {
        Some(range) => writeln!(
            out,
            "Lowest-rated days in {}: {}",
            range,
            days.join(", ")
        )?,
        None => writeln!(out, "Lowest-rated days: {}", days.join(", "))?,
    }
    writeln!(
        out,
        "Bad reviews: {} (rating below {} on those days), good reviews: {}",
        analysis.partition.bad.len(),
        config.rating_threshold,
        analysis.partition.good.len()
    )?;
    writeln!(out)?;

    write_corpus(out, &analysis.bad, config, concordance_words)?;
    writeln!(out)?;
    write_corpus(out, &analysis.good, config, concordance_words)?;

    if !mentions.is_empty() {
        writeln!(out)?;
        writeln!(out, "Mentions in good reviews")?;
        for phrase in mentions {
            writeln!(out, "  {}", analysis.mention(phrase))?;
        }
    }
    Ok(())
}
