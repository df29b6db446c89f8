// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic font collection that needs no font files.
//!
//! Every code point is one em wide, except combining marks and zero width
//! format characters, which have no advance. "fi" forms a two em ligature
//! unless the `liga` feature is turned off. Emoji are drawn from a separate
//! typeface with taller metrics.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::font::{
    FontCollection, FontMetrics, FontSetId, GlyphBuffer, ShapeRequest, ShapedGlyph, Typeface,
};
use crate::style::{FontStyle, FontWeight};

/// Typeface used for emoji, whatever the requested family.
pub(crate) const EMOJI_TYPEFACE: Typeface = Typeface(99);

const LIGATURE_FI: u32 = 0xFB01;

pub(crate) struct TestFonts {
    families: Vec<String>,
    shape_calls: AtomicUsize,
}

impl TestFonts {
    /// A collection with the families `Test` and `Serif`.
    pub(crate) fn new() -> Self {
        Self::with_families(&["Test", "Serif"])
    }

    pub(crate) fn with_families(families: &[&str]) -> Self {
        Self {
            families: families.iter().map(|f| f.to_string()).collect(),
            shape_calls: AtomicUsize::new(0),
        }
    }

    /// Number of times [`FontCollection::shape`] was called.
    pub(crate) fn shape_calls(&self) -> usize {
        self.shape_calls.load(Ordering::Relaxed)
    }
}

fn decode(text: &[u16], index: usize) -> (u32, usize) {
    char::decode_utf16(text[index..].iter().copied())
        .next()
        .map_or((0xFFFD, 1), |c| match c {
            Ok(c) => (u32::from(c), c.len_utf16()),
            Err(_) => (0xFFFD, 1),
        })
}

fn is_mark(c: u32) -> bool {
    (0x0300..=0x036F).contains(&c) || (0x0900..=0x0903).contains(&c) || c == 0x094D
}

fn is_zero_width(c: u32) -> bool {
    (0x200B..=0x200F).contains(&c)
        || (0x202A..=0x202E).contains(&c)
        || (0x2066..=0x2069).contains(&c)
}

fn is_emoji(c: u32) -> bool {
    (0x1F300..=0x1FAFF).contains(&c)
}

impl FontCollection for TestFonts {
    fn resolve(&self, families: &[String], _locale: Option<&str>) -> Option<FontSetId> {
        families
            .iter()
            .find_map(|family| self.families.iter().position(|f| f == family))
            .map(|index| FontSetId(index as u32))
    }

    fn base_typeface(
        &self,
        set: FontSetId,
        _weight: FontWeight,
        _style: FontStyle,
    ) -> Option<Typeface> {
        Some(Typeface(set.0))
    }

    fn metrics(&self, typeface: Typeface, font_size: f32) -> FontMetrics {
        let (ascent, descent) = if typeface == EMOJI_TYPEFACE {
            (1.0, 0.25)
        } else {
            (0.8, 0.2)
        };
        FontMetrics {
            ascent: -ascent * font_size,
            descent: descent * font_size,
            leading: 0.0,
            x_height: font_size / 2.0,
            underline_thickness: Some(font_size / 10.0),
            underline_position: Some(font_size / 10.0),
            strikeout_thickness: None,
            strikeout_position: None,
        }
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> GlyphBuffer {
        self.shape_calls.fetch_add(1, Ordering::Relaxed);
        let text = request.text;
        let size = request.font_size;
        let typeface = Typeface(request.font_set.0);
        let ligatures = !request
            .features
            .iter()
            .any(|feature| &feature.tag == b"liga" && feature.value == 0);
        let glyph = |id, advance, cluster, typeface| ShapedGlyph {
            id,
            x: 0.0,
            y: 0.0,
            advance,
            cluster,
            typeface,
        };

        // Clusters in logical order.
        let mut clusters: Vec<Vec<ShapedGlyph>> = Vec::new();
        let mut index = 0;
        while index < text.len() {
            let fi =
                text[index] == u16::from(b'f') && text.get(index + 1) == Some(&u16::from(b'i'));
            if ligatures && fi {
                clusters.push(vec![glyph(LIGATURE_FI, 2.0 * size, index, typeface)]);
                index += 2;
                continue;
            }
            let (c, len) = decode(text, index);
            if is_mark(c) {
                if let Some(last) = clusters.last_mut() {
                    let cluster = last[0].cluster;
                    last.push(glyph(c, 0.0, cluster, last[0].typeface));
                    index += len;
                    continue;
                }
            }
            let advance = if is_zero_width(c) || is_mark(c) { 0.0 } else { size };
            let face = if is_emoji(c) { EMOJI_TYPEFACE } else { typeface };
            clusters.push(vec![glyph(c, advance, index, face)]);
            index += len;
        }
        if request.is_rtl {
            clusters.reverse();
        }

        let mut glyphs = Vec::with_capacity(text.len());
        let mut x = 0.0;
        for mut shaped in clusters.into_iter().flatten() {
            shaped.x = x;
            x += shaped.advance;
            glyphs.push(shaped);
        }
        GlyphBuffer { glyphs, advance: x }
    }
}
