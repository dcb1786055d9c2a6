//! Rule-language front end
//!
//!     This module tokenizes a mask rule string and assembles the tokens into
//!     rule chains. The actual tokenization is handled entirely by logos.
//!
//!     A rule string is a comma-separated list of chains. Each chain is a
//!     dot-separated sequence of segments, optionally prefixed with `-` to
//!     mark the chain as excluding. `\,` and `\.` escape literal separators
//!     inside a segment; any other escape is kept verbatim, backslash
//!     included. A segment spelled exactly `*` is the wildcard.
//!
//!     Parsing is permissive and never fails: empty chains and empty segments
//!     are skipped, stray backslashes are treated as literal characters.

use logos::Logos;

/// All possible tokens in a mask rule string
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum RuleToken {
    /// Chain separator
    #[token(",")]
    Comma,

    /// Segment separator
    #[token(".")]
    Dot,

    /// A backslash followed by any character
    #[regex(r"\\[^\n]")]
    Escape,

    /// A lone backslash at the end of input or before a newline
    #[token("\\")]
    Backslash,

    /// A run of characters containing no separator and no backslash
    #[regex(r"[^,.\\]+")]
    Text,
}

/// Key under which a mask-tree child is stored: a literal document key or
/// the wildcard marker.
///
/// The wildcard is a distinct variant rather than the string `"*"`, so a
/// document key literally named `*` can never collide with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentKey {
    Literal(String),
    Wildcard,
}

impl SegmentKey {
    /// Build a key from an unescaped rule segment. Only the rule language
    /// maps `*` to the wildcard; document keys always stay literal.
    pub fn from_segment(segment: String) -> SegmentKey {
        if segment == "*" {
            SegmentKey::Wildcard
        } else {
            SegmentKey::Literal(segment)
        }
    }
}

/// One comma-separated clause of a rule string, reduced to its polarity and
/// unescaped segments, e.g. `-foo.bar` -> `{ select: false, [foo, bar] }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleChain {
    /// False when the chain began with `-` (exclusion)
    pub select: bool,
    pub segments: Vec<SegmentKey>,
}

/// Parse a rule string into its chains.
///
/// One pass over the token stream: `Comma` ends a chain, `Dot` ends a
/// segment, an escape of `,` or `.` appends the bare separator to the
/// current segment, any other escape is appended verbatim. This reproduces
/// the two-level escaped split (chains by comma, segments by dot) without
/// re-scanning each chain.
pub fn parse_rules(rules: &str) -> Vec<RuleChain> {
    let mut chains = Vec::new();
    let mut chain = ChainBuilder::new();
    let mut lexer = RuleToken::lexer(rules);
    while let Some(result) = lexer.next() {
        let Ok(token) = result else { continue };
        match token {
            RuleToken::Comma => chain.finish_into(&mut chains),
            RuleToken::Dot => chain.finish_segment(),
            RuleToken::Escape => chain.push_escape(&lexer.slice()[1..]),
            RuleToken::Backslash => chain.push_text("\\"),
            RuleToken::Text => chain.push_text(lexer.slice()),
        }
    }
    chain.finish_into(&mut chains);
    chains
}

/// Accumulates one chain at a time while walking the token stream.
struct ChainBuilder {
    select: bool,
    /// Polarity applies only before the first fragment of a chain
    started: bool,
    segment: String,
    segments: Vec<SegmentKey>,
}

impl ChainBuilder {
    fn new() -> Self {
        ChainBuilder {
            select: true,
            started: false,
            segment: String::new(),
            segments: Vec::new(),
        }
    }

    fn push_text(&mut self, text: &str) {
        let text = if !self.started && text.starts_with('-') {
            self.select = false;
            &text[1..]
        } else {
            text
        };
        self.started = true;
        self.segment.push_str(text);
    }

    fn push_escape(&mut self, escaped: &str) {
        self.started = true;
        if escaped == "," || escaped == "." {
            self.segment.push_str(escaped);
        } else {
            // Not an escapable separator; keep the backslash as written
            self.segment.push('\\');
            self.segment.push_str(escaped);
        }
    }

    fn finish_segment(&mut self) {
        self.started = true;
        if !self.segment.is_empty() {
            let segment = std::mem::take(&mut self.segment);
            self.segments.push(SegmentKey::from_segment(segment));
        }
    }

    fn finish_into(&mut self, chains: &mut Vec<RuleChain>) {
        self.finish_segment();
        if !self.segments.is_empty() {
            chains.push(RuleChain {
                select: self.select,
                segments: std::mem::take(&mut self.segments),
            });
        }
        self.select = true;
        self.started = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to tokenize a rule string and collect tokens with their slices
    fn tokenize(input: &str) -> Vec<(RuleToken, &str)> {
        let mut lexer = RuleToken::lexer(input);
        let mut tokens = Vec::new();
        while let Some(result) = lexer.next() {
            if let Ok(token) = result {
                tokens.push((token, lexer.slice()));
            }
        }
        tokens
    }

    fn literal(name: &str) -> SegmentKey {
        SegmentKey::Literal(name.to_string())
    }

    fn chain(select: bool, segments: &[SegmentKey]) -> RuleChain {
        RuleChain {
            select,
            segments: segments.to_vec(),
        }
    }

    #[test]
    fn test_separator_tokenization() {
        assert_eq!(
            tokenize("foo.bar,baz"),
            vec![
                (RuleToken::Text, "foo"),
                (RuleToken::Dot, "."),
                (RuleToken::Text, "bar"),
                (RuleToken::Comma, ","),
                (RuleToken::Text, "baz"),
            ]
        );
    }

    #[test]
    fn test_escape_tokenization() {
        assert_eq!(
            tokenize(r"a\,b\.c\x"),
            vec![
                (RuleToken::Text, "a"),
                (RuleToken::Escape, r"\,"),
                (RuleToken::Text, "b"),
                (RuleToken::Escape, r"\."),
                (RuleToken::Text, "c"),
                (RuleToken::Escape, r"\x"),
            ]
        );
    }

    #[test]
    fn test_trailing_backslash_tokenization() {
        assert_eq!(
            tokenize(r"a\"),
            vec![(RuleToken::Text, "a"), (RuleToken::Backslash, r"\")]
        );
    }

    #[test]
    fn test_single_inclusion_chain() {
        assert_eq!(
            parse_rules("foo.bar"),
            vec![chain(true, &[literal("foo"), literal("bar")])]
        );
    }

    #[test]
    fn test_exclusion_polarity_stripped() {
        assert_eq!(
            parse_rules("-foo.bar"),
            vec![chain(false, &[literal("foo"), literal("bar")])]
        );
    }

    #[test]
    fn test_dash_inside_segment_is_literal() {
        assert_eq!(
            parse_rules("foo-bar.-baz"),
            vec![chain(true, &[literal("foo-bar"), literal("-baz")])]
        );
    }

    #[test]
    fn test_multiple_chains() {
        assert_eq!(
            parse_rules("*,-foo.quux,foo.bar"),
            vec![
                chain(true, &[SegmentKey::Wildcard]),
                chain(false, &[literal("foo"), literal("quux")]),
                chain(true, &[literal("foo"), literal("bar")]),
            ]
        );
    }

    #[test]
    fn test_wildcard_segment_mid_chain() {
        assert_eq!(
            parse_rules("-*.bar"),
            vec![chain(false, &[SegmentKey::Wildcard, literal("bar")])]
        );
    }

    #[test]
    fn test_escaped_separators_join_segments() {
        assert_eq!(
            parse_rules(r"comma\,key.period\.key"),
            vec![chain(true, &[literal("comma,key"), literal("period.key")])]
        );
    }

    #[test]
    fn test_escaped_comma_does_not_split_chains() {
        assert_eq!(
            parse_rules(r"a\,b,c"),
            vec![chain(true, &[literal("a,b")]), chain(true, &[literal("c")])]
        );
    }

    #[test]
    fn test_non_separator_escape_kept_verbatim() {
        assert_eq!(parse_rules(r"a\xb"), vec![chain(true, &[literal(r"a\xb")])]);
    }

    #[test]
    fn test_trailing_backslash_kept_verbatim() {
        assert_eq!(parse_rules(r"a\"), vec![chain(true, &[literal(r"a\")])]);
    }

    #[test]
    fn test_escaped_dash_keeps_chain_including() {
        assert_eq!(
            parse_rules(r"\-foo"),
            vec![chain(true, &[literal(r"\-foo")])]
        );
    }

    #[test]
    fn test_escaped_star_stays_literal() {
        assert_eq!(parse_rules(r"\*"), vec![chain(true, &[literal(r"\*")])]);
    }

    #[test]
    fn test_empty_input_yields_no_chains() {
        assert_eq!(parse_rules(""), vec![]);
    }

    #[test]
    fn test_empty_chains_skipped() {
        assert_eq!(
            parse_rules("a,,b"),
            vec![chain(true, &[literal("a")]), chain(true, &[literal("b")])]
        );
    }

    #[test]
    fn test_empty_segments_skipped() {
        assert_eq!(
            parse_rules("a..b"),
            vec![chain(true, &[literal("a"), literal("b")])]
        );
    }

    #[test]
    fn test_bare_dash_yields_no_chain() {
        assert_eq!(parse_rules("-"), vec![]);
    }

    #[test]
    fn test_separators_at_boundaries() {
        assert_eq!(
            parse_rules(",a.b."),
            vec![chain(true, &[literal("a"), literal("b")])]
        );
    }

    #[test]
    fn test_polarity_resets_between_chains() {
        assert_eq!(
            parse_rules("-a,b"),
            vec![chain(false, &[literal("a")]), chain(true, &[literal("b")])]
        );
    }
}
