//! English stopword set.

use rustc_hash::FxHashSet;

/// The standard English stopword list (179 words).
#[rustfmt::skip]
pub const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing",
    "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o",
    "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't",
    "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't",
    "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// An immutable set of lowercase stopwords.
///
/// Build it once and pass it by reference to every tokenizer. Adjustments
/// such as re-including `"in"` produce a new set instead of mutating a
/// shared list.
///
/// ```
/// use reviewlens_core::analyzer::StopwordSet;
///
/// let stop = StopwordSet::english().without(["in"]);
/// assert!(stop.contains("the"));
/// assert!(!stop.contains("in"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: FxHashSet<String>,
}

impl StopwordSet {
    /// The standard English list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    /// Builds a set from arbitrary words; they are lowercased on the way in.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns this set minus `words`.
    #[must_use]
    pub fn without<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.words.remove(&word.as_ref().to_lowercase());
        }
        self
    }

    /// Returns `true` if `word` (already lowercase) is a stopword.
    #[inline(always)]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stopwords in the set.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list_has_no_duplicates() {
        assert_eq!(StopwordSet::english().len(), ENGLISH.len());
        assert_eq!(ENGLISH.len(), 179);
    }

    #[test]
    fn without_removes_only_named_words() {
        let base = StopwordSet::english();
        let trimmed = base.clone().without(["in"]);
        assert!(base.contains("in"));
        assert!(!trimmed.contains("in"));
        assert_eq!(trimmed.len(), base.len() - 1);
        assert!(trimmed.contains("on"));
    }

    #[test]
    fn without_unknown_word_is_noop() {
        let trimmed = StopwordSet::english().without(["spotify"]);
        assert_eq!(trimmed.len(), 179);
    }

    #[test]
    fn from_words_lowercases() {
        let set = StopwordSet::from_words(["I", "Am"]);
        assert!(set.contains("i"));
        assert!(set.contains("am"));
        assert!(!set.contains("I"));
    }

    #[test]
    fn empty_set() {
        let set = StopwordSet::default();
        assert!(set.is_empty());
        assert!(!set.contains("the"));
    }
}
