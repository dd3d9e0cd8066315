//! Keyword-in-context lines.

use crate::context::Text;

/// Default line width in characters; context defaults to a quarter of it in tokens.
pub const DEFAULT_WIDTH: usize = 79;

/// One occurrence of a word with the tokens around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcordanceLine<'a> {
    /// Token index of the match.
    pub offset: usize,
    /// Tokens before the match, nearest last.
    pub left: &'a [String],
    /// The matched token as written.
    pub query: &'a str,
    /// Tokens after the match.
    pub right: &'a [String],
}

impl ConcordanceLine<'_> {
    /// Renders the line `width` characters wide with the match centred.
    ///
    /// Left context is right-aligned and cut from the front, right context is
    /// cut from the back.
    pub fn render(&self, width: usize) -> String {
        let query_chars = self.query.chars().count();
        let half = width.saturating_sub(query_chars + 2) / 2;

        let left = self.left.join(" ");
        let left_chars = left.chars().count();
        let left: String = left.chars().skip(left_chars.saturating_sub(half)).collect();

        let right: String = self.right.join(" ").chars().take(half).collect();

        format!("{:>half$} {} {}", left, self.query, right, half = half)
            .trim_end()
            .to_string()
    }
}

impl Text {
    /// Every occurrence of `word` (case-insensitive), in document order.
    ///
    /// Uses `DEFAULT_WIDTH / 4` tokens of left context and one fewer on the
    /// right. An absent word yields no lines.
    ///
    /// ```
    /// use reviewlens_core::context::Text;
    ///
    /// let text = Text::from_raw("The update broke shuffle. Another update, more ads.");
    /// let lines = text.concordance("UPDATE");
    ///
    /// assert_eq!(lines.len(), 2);
    /// assert_eq!(lines[0].query, "update");
    /// assert_eq!(lines[1].left.last().map(String::as_str), Some("Another"));
    /// ```
    pub fn concordance(&self, word: &str) -> Vec<ConcordanceLine<'_>> {
        self.concordance_with(word, DEFAULT_WIDTH / 4)
    }

    /// Like [`Text::concordance`] with `context` tokens before the match and
    /// `context - 1` after it.
    pub fn concordance_with(&self, word: &str, context: usize) -> Vec<ConcordanceLine<'_>> {
        let target = word.to_lowercase();
        let tokens = self.tokens();

        tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.to_lowercase() == target)
            .map(|(i, token)| ConcordanceLine {
                offset: i,
                left: &tokens[i.saturating_sub(context)..i],
                query: token.as_str(),
                right: &tokens[i + 1..(i + context).clamp(i + 1, tokens.len())],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Text {
        Text::from_raw("song disappears from playlist after update and the song disappears again")
    }

    #[test]
    fn finds_all_occurrences_in_order() {
        let text = sample();
        let lines = text.concordance("disappears");
        let offsets: Vec<usize> = lines.iter().map(|l| l.offset).collect();
        assert_eq!(offsets, [1, 9]);
    }

    #[test]
    fn context_is_bounded() {
        let text = sample();
        let lines = text.concordance_with("update", 3);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].left, ["from", "playlist", "after"]);
        assert_eq!(lines[0].right, ["and", "the"]);
    }

    #[test]
    fn context_clamps_at_edges() {
        let text = sample();
        let lines = text.concordance_with("song", 3);
        assert!(lines[0].left.is_empty());
        assert_eq!(lines[1].right, ["disappears", "again"]);
    }

    #[test]
    fn zero_or_one_context_has_no_right_side() {
        let text = sample();
        assert!(text.concordance_with("update", 1)[0].right.is_empty());
        let line = text.concordance_with("update", 0)[0];
        assert!(line.left.is_empty() && line.right.is_empty());
    }

    #[test]
    fn absent_word_is_empty() {
        assert!(sample().concordance("lyrics").is_empty());
    }

    #[test]
    fn case_insensitive() {
        let text = Text::from_raw("Update UPDATE update");
        assert_eq!(text.concordance("uPdAtE").len(), 3);
    }

    #[test]
    fn render_centres_the_match() {
        let text = sample();
        let lines = text.concordance("update");
        let rendered = lines[0].render(40);
        // half width: (40 - 6 - 2) / 2 = 16
        assert_eq!(rendered.find("update"), Some(17));
        assert!(rendered.chars().count() <= 40);
        assert!(rendered.ends_with("after update and the song dis"));
    }

    #[test]
    fn render_pads_short_left_context() {
        let text = Text::from_raw("update now");
        let rendered = text.concordance("update")[0].render(20);
        // half width: (20 - 6 - 2) / 2 = 6
        assert_eq!(rendered, "       update now");
    }
}
