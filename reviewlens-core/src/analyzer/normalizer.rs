//! Token normalization.
//!
//! Tokens coming out of the word splitter keep their original case. Before
//! counting they are lowercased, and anything that is not made purely of
//! letters (numbers, punctuation, `n't`, mixed tokens like `mp3`) is dropped.

/// Lowercases tokens and tests them for being purely alphabetic.
///
/// ASCII tokens (the vast majority of English review text) take a fast path
/// that lowercases bytes in place; anything else goes through Unicode
/// lowercasing, which may expand one character into several.
///
/// # Examples
///
/// ```
/// use reviewlens_core::analyzer::normalizer::TokenNormalizer;
///
/// let normalizer = TokenNormalizer::default();
/// assert_eq!(normalizer.normalize("Spotify"), "spotify");
/// assert_eq!(normalizer.normalize("ÉCOUTE"), "écoute");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenNormalizer;

impl TokenNormalizer {
    /// Creates a normalizer.
    pub const fn new() -> Self {
        Self
    }

    /// Lowercases `token` into `out`, clearing it first.
    #[inline]
    pub fn normalize_into(&self, token: &str, out: &mut String) {
        out.clear();
        if token.is_ascii() {
            out.push_str(token);
            out.make_ascii_lowercase();
            return;
        }

        out.reserve(token.len());
        for ch in token.chars() {
            out.extend(ch.to_lowercase());
        }
    }

    /// Lowercases `token` into a new string.
    pub fn normalize(&self, token: &str) -> String {
        let mut out = String::with_capacity(token.len());
        self.normalize_into(token, &mut out);
        out
    }
}

/// Returns `true` if `token` is non-empty and every character is a letter.
#[inline]
pub fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}
