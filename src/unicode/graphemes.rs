//! Grapheme cluster segmentation (UAX#29, extended clusters).

use super::codepoint::CodePoint;
use super::props::{GraphemeClusterBreak, PropertyTables};

/// An iterator over grapheme cluster ranges of a codepoint sequence.
///
/// Each item is the `start..end` codepoint range of one cluster.
#[derive(Clone, Debug)]
pub struct GraphemeClusters<'a> {
    codepoints: &'a [CodePoint],
    pos: usize,
}

impl<'a> GraphemeClusters<'a> {
    /// Creates an iterator over `codepoints`.
    pub fn new(codepoints: &'a [CodePoint]) -> Self {
        GraphemeClusters { codepoints, pos: 0 }
    }
}

impl Iterator for GraphemeClusters<'_> {
    type Item = core::ops::Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.codepoints.len() {
            return None;
        }

        let tables = PropertyTables::global();
        let start = self.pos;
        let mut prev = tables.grapheme_cluster_break(self.codepoints[self.pos]);
        let mut ri_run = u32::from(prev == GraphemeClusterBreak::RegionalIndicator);
        self.pos += 1;

        while self.pos < self.codepoints.len() {
            let next = tables.grapheme_cluster_break(self.codepoints[self.pos]);
            if breaks_between(prev, next, ri_run) {
                break;
            }
            ri_run = if next == GraphemeClusterBreak::RegionalIndicator {
                ri_run + 1
            } else {
                0
            };
            prev = next;
            self.pos += 1;
        }

        Some(start..self.pos)
    }
}

/// The GB rules over a class pair; `ri_run` counts the preceding regional
/// indicators.
fn breaks_between(prev: GraphemeClusterBreak, next: GraphemeClusterBreak, ri_run: u32) -> bool {
    use GraphemeClusterBreak as G;

    match (prev, next) {
        // GB3: CR x LF.
        (G::CarriageReturn, G::LineFeed) => false,
        // GB4/GB5: controls break on both sides.
        (G::Control | G::CarriageReturn | G::LineFeed, _) => true,
        (_, G::Control | G::CarriageReturn | G::LineFeed) => true,
        // GB6-GB8: Hangul syllable composition.
        (G::HangulL, G::HangulL | G::HangulV | G::HangulLV | G::HangulLVT) => false,
        (G::HangulLV | G::HangulV, G::HangulV | G::HangulT) => false,
        (G::HangulLVT | G::HangulT, G::HangulT) => false,
        // GB9, GB9a: extenders and spacing marks attach.
        (_, G::Extend | G::ZeroWidthJoiner | G::SpacingMark) => false,
        // GB9b: prepended characters attach forward.
        (G::Prepend, _) => false,
        // GB12/GB13: regional indicators pair up.
        (G::RegionalIndicator, G::RegionalIndicator) => ri_run % 2 != 0,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusters(text: &str) -> Vec<usize> {
        let codepoints: Vec<CodePoint> = text.chars().map(CodePoint::from).collect();
        GraphemeClusters::new(&codepoints).map(|r| r.len()).collect()
    }

    #[test]
    fn ascii_is_one_per_char() {
        assert_eq!(clusters("abc"), [1, 1, 1]);
    }

    #[test]
    fn combining_marks_attach() {
        // e + COMBINING ACUTE ACCENT.
        assert_eq!(clusters("e\u{0301}x"), [2, 1]);
    }

    #[test]
    fn crlf_is_one_cluster() {
        assert_eq!(clusters("a\r\nb"), [1, 2, 1]);
    }

    #[test]
    fn hangul_jamo_compose() {
        // L + V + T.
        assert_eq!(clusters("\u{1100}\u{1161}\u{11A8}"), [3]);
    }

    #[test]
    fn regional_indicators_pair() {
        // Two flags back to back split after each pair.
        assert_eq!(
            clusters("\u{1F1FA}\u{1F1F8}\u{1F1E9}\u{1F1EA}"),
            [2, 2]
        );
    }
}
