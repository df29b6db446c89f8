// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unicode character classification over UTF-16 code units.

use icu_properties::props::{BidiControl, CanonicalCombiningClass, GeneralCategory, LineBreak};
use icu_properties::{CodePointMapData, CodePointSetData};
use icu_segmenter::options::WordBreakInvariantOptions;
use icu_segmenter::{GraphemeClusterSegmenter, WordSegmenter};

/// U+FFFC, the code unit standing in for an inline placeholder.
pub const OBJECT_REPLACEMENT_CHAR: u16 = 0xFFFC;

/// U+FFFD, substituted for unpaired surrogates.
pub const REPLACEMENT_CHAR: u16 = 0xFFFD;

/// Returns `true` for the spaces that separate words for justification.
pub(crate) fn is_word_space(c: u16) -> bool {
    c == 0x20 || c == 0xA0
}

/// Returns `true` for spaces that are trimmed from the visible end of a line.
///
/// U+2007 FIGURE SPACE is excluded since it behaves like a digit.
pub(crate) fn is_line_end_space(c: u16) -> bool {
    c == 0x20
        || c == 0x1680
        || ((0x2000..=0x200A).contains(&c) && c != 0x2007)
        || c == 0x205F
        || c == 0x3000
}

/// Returns `true` if the code point forces a line break after it.
pub(crate) fn is_hard_break(c: u32) -> bool {
    let lb = CodePointMapData::<LineBreak>::new().get32(c);
    lb == LineBreak::LineFeed || lb == LineBreak::MandatoryBreak
}

/// Returns `true` for explicit directional formatting characters.
pub(crate) fn is_bidi_control(c: u32) -> bool {
    CodePointSetData::new::<BidiControl>().contains32(c)
}

/// Decodes the code point starting at `index`, returning it with its length
/// in code units. Unpaired surrogates decode to U+FFFD.
pub(crate) fn code_point_at(text: &[u16], index: usize) -> (u32, usize) {
    let Some(&unit) = text.get(index) else {
        return (u32::from(REPLACEMENT_CHAR), 1);
    };
    if (0xD800..0xDC00).contains(&unit) {
        if let Some(&low) = text.get(index + 1) {
            if (0xDC00..0xE000).contains(&low) {
                let c = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                return (c, 2);
            }
        }
        return (u32::from(REPLACEMENT_CHAR), 1);
    }
    if (0xDC00..0xE000).contains(&unit) {
        return (u32::from(REPLACEMENT_CHAR), 1);
    }
    (u32::from(unit), 1)
}

/// Decodes the code point ending right before `index`.
pub(crate) fn code_point_before(text: &[u16], index: usize) -> (u32, usize) {
    if index >= 2 {
        let (c, len) = code_point_at(text, index - 2);
        if len == 2 {
            return (c, 2);
        }
    }
    code_point_at(text, index.saturating_sub(1))
}

fn is_virama(c: u32) -> bool {
    CodePointMapData::<CanonicalCombiningClass>::new().get32(c) == CanonicalCombiningClass::Virama
}

fn is_other_letter(c: u32) -> bool {
    CodePointMapData::<GeneralCategory>::new().get32(c) == GeneralCategory::OtherLetter
}

/// Grapheme cluster boundaries of a text, tailored with shaping results.
///
/// A boundary between a virama and a following letter is suppressed when the
/// shaper gave the letter no advance of its own, since it was merged into a
/// conjunct.
pub(crate) struct GraphemeBreaks {
    breaks: Vec<bool>,
}

impl GraphemeBreaks {
    /// Computes boundaries for `text`. `advances` holds the per code unit
    /// advances produced by shaping, indexed like `text`.
    pub(crate) fn new(text: &[u16], advances: &[f32]) -> Self {
        let mut breaks = vec![false; text.len() + 1];
        for offset in GraphemeClusterSegmenter::new().segment_utf16(text) {
            if let Some(slot) = breaks.get_mut(offset) {
                *slot = true;
            }
        }
        for offset in 1..text.len() {
            if !breaks[offset] || advances.get(offset).copied().unwrap_or(1.0) != 0.0 {
                continue;
            }
            let (prev, _) = code_point_before(text, offset);
            let (next, _) = code_point_at(text, offset);
            if is_virama(prev) && is_other_letter(next) {
                breaks[offset] = false;
            }
        }
        Self { breaks }
    }

    /// Returns `true` if a grapheme boundary lies at `offset`.
    pub(crate) fn is_break(&self, offset: usize) -> bool {
        self.breaks.get(offset).copied().unwrap_or(false)
    }

    /// Number of graphemes that start in `start..end`.
    pub(crate) fn count(&self, start: usize, end: usize) -> usize {
        (start..end).filter(|&offset| self.is_break(offset)).count()
    }
}

/// Word boundaries of `text`, in ascending order, including `0` and the
/// end of the text.
pub(crate) fn word_boundaries(text: &[u16]) -> Vec<usize> {
    let mut boundaries: Vec<usize> = WordSegmenter::new_auto(WordBreakInvariantOptions::default())
        .segment_utf16(text)
        .collect();
    if boundaries.first() != Some(&0) {
        boundaries.insert(0, 0);
    }
    if boundaries.last() != Some(&text.len()) {
        boundaries.push(text.len());
    }
    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn space_classes() {
        assert!(is_word_space(0x20));
        assert!(is_word_space(0xA0));
        assert!(!is_word_space(0x3000));
        assert!(is_line_end_space(0x3000));
        assert!(is_line_end_space(0x2003));
        assert!(!is_line_end_space(0x2007));
        assert!(!is_line_end_space(0xA0));
    }

    #[test]
    fn hard_breaks_and_controls() {
        assert!(is_hard_break(u32::from('\n')));
        assert!(is_hard_break(0x2029));
        assert!(!is_hard_break(u32::from(' ')));
        assert!(is_bidi_control(0x202B));
        assert!(is_bidi_control(0x200F));
        assert!(!is_bidi_control(u32::from('a')));
    }

    #[test]
    fn surrogate_decoding() {
        let text = utf16("a\u{1F600}b");
        assert_eq!(code_point_at(&text, 1), (0x1F600, 2));
        assert_eq!(code_point_before(&text, 3), (0x1F600, 2));
        assert_eq!(code_point_at(&text, 2).0, u32::from(REPLACEMENT_CHAR));
    }

    #[test]
    fn grapheme_counts() {
        let text = utf16("e\u{301}fi");
        let breaks = GraphemeBreaks::new(&text, &[1.0, 0.0, 1.0, 1.0]);
        assert!(breaks.is_break(0));
        assert!(!breaks.is_break(1));
        assert!(breaks.is_break(2));
        assert_eq!(breaks.count(0, 4), 3);
        assert_eq!(breaks.count(2, 4), 2);
    }

    #[test]
    fn word_boundaries_cover_text() {
        let text = utf16("hello world");
        assert_eq!(word_boundaries(&text), [0, 5, 6, 11]);
        assert_eq!(word_boundaries(&[]), [0]);
    }
}
