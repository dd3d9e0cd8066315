//! Sentence and word tokenizer.
//!
//! Raw review text goes through two splitting passes:
//!
//! 1. **Sentences**: Unicode sentence boundaries (UAX #29)
//! 2. **Words**: Unicode word boundaries within each sentence
//!
//! Whitespace segments are discarded, punctuation survives as its own token,
//! hyphenated words stay whole (`log-in`), and English contractions are split
//! the way Treebank tokenizers do it:
//!
//! ```text
//! "Don't stop!"  ->  ("Do", 0) ("n't", 0) ("stop", 0) ("!", 0)
//! ```
//!
//! The raw pass is zero-allocation: every emitted token is a slice of the
//! input. [`Tokenizer`] layers the normalizing filter on top of it
//! (lowercase, drop stopwords, drop anything not purely alphabetic).

use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

use crate::analyzer::normalizer::{is_alphabetic, TokenNormalizer};
use crate::analyzer::stopwords::StopwordSet;

/// Contraction suffixes split off after an apostrophe.
const CLITICS: [&str; 6] = ["s", "re", "ve", "ll", "d", "m"];

#[inline(always)]
fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

#[inline(always)]
fn is_hyphen(segment: &str) -> bool {
    matches!(segment, "-" | "\u{2010}")
}

/// Word-like segment: starts with a letter or digit.
#[inline(always)]
fn is_word(segment: &str) -> bool {
    segment.chars().next().is_some_and(char::is_alphanumeric)
}

/// Splits a word into stem and contraction suffix, if it has one.
///
/// `"don't"` -> `("do", "n't")`, `"she's"` -> `("she", "'s")`.
fn split_contraction(word: &str) -> SmallVec<[&str; 2]> {
    let mut parts = SmallVec::new();

    let Some(apos) = word.rfind(is_apostrophe) else {
        parts.push(word);
        return parts;
    };

    let after = &word[apos..];
    let after = &after[after.chars().next().map_or(0, char::len_utf8)..];

    // "n't" belongs to the suffix; the 'n' is one ASCII byte
    if apos > 1 && after.eq_ignore_ascii_case("t") && word[..apos].ends_with(['n', 'N']) {
        parts.push(&word[..apos - 1]);
        parts.push(&word[apos - 1..]);
        return parts;
    }

    if apos > 0 && CLITICS.iter().any(|c| after.eq_ignore_ascii_case(c)) {
        parts.push(&word[..apos]);
        parts.push(&word[apos..]);
        return parts;
    }

    parts.push(word);
    parts
}

/// Emits raw tokens as `(text, sentence_index)`, in document order.
///
/// Tokens keep their original case and include punctuation. Sentence
/// indices start at zero and only count sentences that produced a token.
///
/// ```
/// use reviewlens_core::analyzer::tokenizer::split_words;
///
/// let mut out = Vec::new();
/// split_words("Great app. Can't log in!", |t, s| out.push((t, s)));
///
/// assert_eq!(
///     out,
///     [("Great", 0), ("app", 0), (".", 0), ("Ca", 1), ("n't", 1), ("log", 1), ("in", 1), ("!", 1)]
/// );
/// ```
pub fn split_words<'t, F>(text: &'t str, mut emit: F)
where
    F: FnMut(&'t str, u32),
{
    let mut sentence = 0u32;

    for raw_sentence in text.split_sentence_bounds() {
        let mut emitted = false;

        let mut segments = raw_sentence.split_word_bound_indices();
        while let Some((start, segment)) = segments.next() {
            if segment.chars().all(char::is_whitespace) {
                continue;
            }

            let mut end = start + segment.len();
            if is_word(segment) {
                // absorb "-word" runs: "log-in", "re-download"
                loop {
                    let mut ahead = segments.clone();
                    match (ahead.next(), ahead.next()) {
                        (Some((_, hyphen)), Some((_, next))) if is_hyphen(hyphen) && is_word(next) => {
                            end += hyphen.len() + next.len();
                            segments = ahead;
                        }
                        _ => break,
                    }
                }
            }

            for part in split_contraction(&raw_sentence[start..end]) {
                if !part.is_empty() {
                    emit(part, sentence);
                    emitted = true;
                }
            }
        }

        if emitted {
            sentence = sentence.saturating_add(1);
        }
    }
}

/// Collects the raw token sequence of `text` (case kept, stopwords kept).
pub fn raw_tokens(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    split_words(text, |token, _| out.push(token.to_string()));
    out
}

/// Filtering tokenizer: raw split, lowercase, drop stopwords and non-alphabetic tokens.
///
/// ## Example
///
/// ```
/// use reviewlens_core::analyzer::{StopwordSet, Tokenizer};
///
/// let stop = StopwordSet::from_words(["i", "am", "in"]).without(["in"]);
/// let tokenizer = Tokenizer::new(&stop);
///
/// assert_eq!(tokenizer.tokenize("I am in love 123!!"), ["in", "love"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'s> {
    stopwords: &'s StopwordSet,
    normalizer: TokenNormalizer,
}

impl<'s> Tokenizer<'s> {
    /// Creates a tokenizer filtering against `stopwords`.
    #[inline]
    pub const fn new(stopwords: &'s StopwordSet) -> Self {
        Self {
            stopwords,
            normalizer: TokenNormalizer::new(),
        }
    }

    /// Returns `true` if a lowercased token survives filtering.
    #[inline(always)]
    pub fn keeps(&self, token: &str) -> bool {
        is_alphabetic(token) && !self.stopwords.contains(token)
    }

    /// Tokenizes `text` into the filtered, normalized token stream.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut buf = String::with_capacity(32);

        split_words(text, |token, _| {
            self.normalizer.normalize_into(token, &mut buf);
            if self.keeps(&buf) {
                out.push(buf.clone());
            }
        });

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<(&str, u32)> {
        let mut out = Vec::new();
        split_words(input, |text, sentence| out.push((text, sentence)));
        out
    }

    fn words(input: &str) -> Vec<&str> {
        collect(input).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("   \n\t ").is_empty());
    }

    #[test]
    fn punctuation_is_its_own_token() {
        assert_eq!(words("love 123!!"), ["love", "123", "!", "!"]);
    }

    #[test]
    fn sentence_indices_advance() {
        let out = collect("Bad update. Songs skip. Fix it!");
        let sentences: Vec<u32> = out.iter().map(|(_, s)| *s).collect();
        assert_eq!(sentences, [0, 0, 0, 1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn newline_separated_reviews_are_separate_sentences() {
        let out = collect("works great\nkeeps crashing");
        assert_eq!(out[1], ("great", 0));
        assert_eq!(out[2], ("keeps", 1));
    }

    #[test]
    fn contractions_split() {
        assert_eq!(words("don't"), ["do", "n't"]);
        assert_eq!(words("can't"), ["ca", "n't"]);
        assert_eq!(words("it's"), ["it", "'s"]);
        assert_eq!(words("they're"), ["they", "'re"]);
        assert_eq!(words("I'M"), ["I", "'M"]);
        assert_eq!(words("don\u{2019}t"), ["do", "n\u{2019}t"]);
    }

    #[test]
    fn hyphenated_words_stay_whole() {
        assert_eq!(words("log-in wi-fi re-download"), ["log-in", "wi-fi", "re-download"]);
        assert_eq!(words("state-of-the-art"), ["state-of-the-art"]);
        assert_eq!(words("can't log-in"), ["ca", "n't", "log-in"]);
    }

    #[test]
    fn loose_hyphens_are_tokens() {
        assert_eq!(words("good - bad"), ["good", "-", "bad"]);
        assert_eq!(words("pre- and post-"), ["pre", "-", "and", "post", "-"]);
        assert_eq!(words("-- ok"), ["-", "-", "ok"]);
    }

    #[test]
    fn tokenize_drops_hyphenated_and_non_alpha() {
        let stop = StopwordSet::english().without(["in"]);
        let tokenizer = Tokenizer::new(&stop);
        assert_eq!(
            tokenizer.tokenize("Can't log-in \u{1F621}\u{1F621} mp3 ok... I'm here\n\nwon't"),
            ["ca", "ok", "wo"]
        );
    }

    #[test]
    fn non_clitic_apostrophe_kept() {
        assert_eq!(words("rock'n'roll"), ["rock'n'roll"]);
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello world, don't");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        split_words(&input, |text, _| {
            let ptr = text.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        });
    }

    #[test]
    fn tokenize_filters_stopwords_and_non_alpha() {
        let stop = StopwordSet::from_words(["i", "am", "in"]).without(["in"]);
        let tokenizer = Tokenizer::new(&stop);
        assert_eq!(tokenizer.tokenize("I am in love 123!!"), ["in", "love"]);
    }

    #[test]
    fn tokenize_lowercases() {
        let stop = StopwordSet::default();
        let tokenizer = Tokenizer::new(&stop);
        assert_eq!(tokenizer.tokenize("Shuffle PLAY"), ["shuffle", "play"]);
    }

    #[test]
    fn tokenize_drops_contraction_suffixes() {
        let stop = StopwordSet::english().without(["in"]);
        let tokenizer = Tokenizer::new(&stop);
        assert_eq!(
            tokenizer.tokenize("Can't log in since the update."),
            ["ca", "log", "in", "since", "update"]
        );
    }

    #[test]
    fn tokenize_empty() {
        let stop = StopwordSet::english();
        assert!(Tokenizer::new(&stop).tokenize("").is_empty());
    }

    #[test]
    fn raw_tokens_keep_case_and_stopwords() {
        assert_eq!(raw_tokens("The App."), ["The", "App", "."]);
    }

    #[test]
    fn tokenizer_is_reusable() {
        let stop = StopwordSet::english();
        let t = Tokenizer::new(&stop);
        assert_eq!(t.tokenize("music stops").len(), 2);
        assert_eq!(t.tokenize("ads ads ads").len(), 3);
    }
}
