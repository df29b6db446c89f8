// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaping of single-style, single-direction runs through a [`FontCollection`].

use hashbrown::HashMap;

use crate::analysis::is_word_space;
use crate::error::LayoutError;
use crate::font::{
    FontCollection, FontMetrics, FontSetId, ShapeRequest, ShapedGlyph, Typeface,
};
use crate::style::{Brush, FontStyle, FontWeight, TextStyle};

/// Resolves and memoizes font sets for the duration of one layout pass.
pub(crate) struct FontSets<'a> {
    collection: &'a dyn FontCollection,
    resolved: HashMap<(Vec<String>, Option<String>), FontSetId>,
}

impl<'a> FontSets<'a> {
    pub(crate) fn new(collection: &'a dyn FontCollection) -> Self {
        Self {
            collection,
            resolved: HashMap::new(),
        }
    }

    pub(crate) fn collection(&self) -> &'a dyn FontCollection {
        self.collection
    }

    /// Resolves a family list, failing if none of the families exist.
    pub(crate) fn resolve(
        &mut self,
        families: &[String],
        locale: Option<&str>,
    ) -> Result<FontSetId, LayoutError> {
        let key = (families.to_vec(), locale.map(str::to_string));
        if let Some(set) = self.resolved.get(&key) {
            return Ok(*set);
        }
        let Some(set) = self.collection.resolve(families, locale) else {
            log::warn!("unable to resolve font families {families:?}");
            return Err(LayoutError::FontFamilyNotFound {
                families: families.to_vec(),
            });
        };
        self.resolved.insert(key, set);
        Ok(set)
    }

    /// Returns the primary typeface for a family list, weight and style.
    pub(crate) fn base_typeface(
        &mut self,
        families: &[String],
        locale: Option<&str>,
        weight: FontWeight,
        style: FontStyle,
    ) -> Result<Typeface, LayoutError> {
        let set = self.resolve(families, locale)?;
        self.collection
            .base_typeface(set, weight, style)
            .ok_or_else(|| {
                log::warn!("font set for {families:?} has no typeface");
                LayoutError::FontFamilyNotFound {
                    families: families.to_vec(),
                }
            })
    }

    /// Returns the metrics of the primary typeface of a text style.
    pub(crate) fn style_metrics<B: Brush>(
        &mut self,
        style: &TextStyle<B>,
    ) -> Result<FontMetrics, LayoutError> {
        let typeface = self.base_typeface(
            &style.font_families,
            style.locale.as_deref(),
            style.font_weight,
            style.font_style,
        )?;
        Ok(self.collection.metrics(typeface, style.font_size))
    }

    pub(crate) fn metrics(&self, typeface: Typeface, font_size: f32) -> FontMetrics {
        self.collection.metrics(typeface, font_size)
    }
}

/// Glyphs of a shaped run with per code unit advances.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShapedRun {
    /// Glyphs in visual order, positioned from the start of the run.
    pub glyphs: Vec<ShapedGlyph>,
    /// Advance of each code unit. A cluster's whole advance is assigned to
    /// its first code unit; the others get zero.
    pub char_advances: Vec<f32>,
    /// Total advance.
    pub advance: f32,
}

impl ShapedRun {
    /// A single pseudo glyph standing in for an inline placeholder box.
    pub(crate) fn placeholder(width: f32, typeface: Typeface) -> Self {
        Self {
            glyphs: vec![ShapedGlyph {
                id: 0,
                x: 0.0,
                y: 0.0,
                advance: width,
                cluster: 0,
                typeface,
            }],
            char_advances: vec![width],
            advance: width,
        }
    }
}

/// Shapes `text` with `style`, then applies letter and word spacing.
///
/// Spacing is added after each cluster: letter spacing after every one and
/// word spacing after word spaces. Glyphs that follow are shifted along.
pub(crate) fn shape_run<B: Brush>(
    fonts: &mut FontSets<'_>,
    style: &TextStyle<B>,
    text: &[u16],
    is_rtl: bool,
) -> Result<ShapedRun, LayoutError> {
    if text.is_empty() {
        return Ok(ShapedRun::default());
    }
    let font_set = fonts.resolve(&style.font_families, style.locale.as_deref())?;
    let request = ShapeRequest {
        text,
        is_rtl,
        font_set,
        font_size: style.font_size,
        font_weight: style.font_weight,
        font_style: style.font_style,
        locale: style.locale.as_deref(),
        features: &style.font_features,
    };
    let buffer = fonts.collection().shape(&request);
    let mut glyphs = buffer.glyphs;
    let mut advance = buffer.advance;

    if style.letter_spacing != 0.0 || style.word_spacing != 0.0 {
        let mut shift = 0.0;
        let mut index = 0;
        while index < glyphs.len() {
            let cluster = glyphs[index].cluster;
            let mut last = index;
            while last + 1 < glyphs.len() && glyphs[last + 1].cluster == cluster {
                last += 1;
            }
            let mut spacing = style.letter_spacing;
            if text.get(cluster).copied().is_some_and(is_word_space) {
                spacing += style.word_spacing;
            }
            for glyph in &mut glyphs[index..=last] {
                glyph.x += shift;
            }
            glyphs[last].advance += spacing;
            shift += spacing;
            index = last + 1;
        }
        advance += shift;
    }

    let mut char_advances = vec![0.0; text.len()];
    for glyph in &glyphs {
        if let Some(slot) = char_advances.get_mut(glyph.cluster) {
            *slot += glyph.advance;
        }
    }
    Ok(ShapedRun {
        glyphs,
        char_advances,
        advance,
    })
}
