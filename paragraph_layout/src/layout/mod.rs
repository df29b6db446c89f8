// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph layout.

mod data;
mod engine;
mod line;
mod metrics;
mod paint;
mod query;

use std::cell::OnceCell;
use std::sync::Arc;

use hashbrown::HashSet;

use crate::error::LayoutError;
use crate::font::FontCollection;
use crate::inline_placeholder::PlaceholderRun;
use crate::line_break::LineRange;
use crate::style::{Brush, ParagraphStyle, StyledRuns};

use engine::{LayoutData, LayoutInput};

pub use data::{
    Affinity, CodeUnitRun, GlyphLine, GlyphPosition, PositionWithAffinity, Rect, RectHeightStyle,
    RectWidthStyle, TextBox,
};
pub use metrics::StrutMetrics;
pub use paint::{BlobGlyph, Canvas, GlyphBlob, PaintRecord, QuadSegment, Stroke, WavePath};

/// A paragraph of styled UTF-16 text that can be laid out, painted and queried.
///
/// Any mutation marks the paragraph dirty. [`Paragraph::layout`] then
/// recomputes every derived table from scratch; there is no incremental
/// update. Queries and painting read the tables of the last successful
/// layout and must not be used before one.
pub struct Paragraph<B: Brush> {
    text: Vec<u16>,
    styled_runs: StyledRuns<B>,
    paragraph_style: ParagraphStyle,
    font_collection: Option<Arc<dyn FontCollection>>,
    placeholders: Vec<PlaceholderRun>,
    placeholder_indices: HashSet<usize>,
    needs_layout: bool,
    laid_out: bool,
    width: f64,
    word_breaks: OnceCell<Vec<usize>>,
    data: LayoutData<B>,
}

impl<B: Brush> Default for Paragraph<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Brush> core::fmt::Debug for Paragraph<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Paragraph")
            .field("text_size", &self.text.len())
            .field("needs_layout", &self.needs_layout)
            .field("laid_out", &self.laid_out)
            .field("width", &self.width)
            .field("line_count", &self.line_count())
            .finish_non_exhaustive()
    }
}

impl<B: Brush> Paragraph<B> {
    /// Creates an empty paragraph with the default style and no font collection.
    pub fn new() -> Self {
        Self {
            text: Vec::new(),
            styled_runs: StyledRuns::new(),
            paragraph_style: ParagraphStyle::default(),
            font_collection: None,
            placeholders: Vec::new(),
            placeholder_indices: HashSet::new(),
            needs_layout: true,
            laid_out: false,
            width: 0.0,
            word_breaks: OnceCell::new(),
            data: LayoutData::default(),
        }
    }

    /// Replaces the text and its style runs.
    pub fn set_text(&mut self, text: Vec<u16>, styled_runs: StyledRuns<B>) {
        self.needs_layout = true;
        self.text = text;
        self.styled_runs = styled_runs;
        self.word_breaks = OnceCell::new();
    }

    /// Replaces the inline placeholders and the set of U+FFFC code unit
    /// offsets that stand for them.
    pub fn set_inline_placeholders(
        &mut self,
        placeholders: Vec<PlaceholderRun>,
        object_replacement_indices: HashSet<usize>,
    ) {
        self.needs_layout = true;
        self.placeholders = placeholders;
        self.placeholder_indices = object_replacement_indices;
    }

    /// Replaces the paragraph style.
    pub fn set_paragraph_style(&mut self, style: ParagraphStyle) {
        self.needs_layout = true;
        self.paragraph_style = style;
    }

    /// Replaces the font collection.
    pub fn set_font_collection(&mut self, collection: Arc<dyn FontCollection>) {
        self.needs_layout = true;
        self.font_collection = Some(collection);
    }

    /// Marks the paragraph as needing layout, or not.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.needs_layout = dirty;
    }

    /// Lays out the paragraph at `width`, rounded down to a whole pixel.
    ///
    /// Does nothing if the paragraph is clean and was last laid out at the
    /// same width. On error the previous layout results are kept, the
    /// paragraph reports [`is_laid_out`](Self::is_laid_out) as `false` and
    /// stays dirty so the next call retries.
    pub fn layout(&mut self, width: f64) -> Result<(), LayoutError> {
        self.layout_impl(width, false)
    }

    /// Lays out the paragraph at `width` even if nothing changed.
    pub fn force_layout(&mut self, width: f64) -> Result<(), LayoutError> {
        self.layout_impl(width, true)
    }

    fn layout_impl(&mut self, width: f64, force: bool) -> Result<(), LayoutError> {
        let width = width.floor();
        if !self.needs_layout && width == self.width && !force {
            log::debug!("layout skipped, paragraph unchanged at width {width}");
            return Ok(());
        }
        self.laid_out = false;
        let Some(collection) = self.font_collection.as_deref() else {
            log::warn!("layout requested without a font collection");
            self.needs_layout = true;
            return Err(LayoutError::NoFontCollection);
        };
        let input = LayoutInput {
            text: &self.text,
            styled_runs: &self.styled_runs,
            style: &self.paragraph_style,
            placeholders: &self.placeholders,
            placeholder_indices: &self.placeholder_indices,
            collection,
        };
        match engine::layout(&input, width) {
            Ok(data) => {
                self.data = data;
                self.width = width;
                self.needs_layout = false;
                self.laid_out = true;
                Ok(())
            }
            Err(err) => {
                log::warn!("paragraph layout failed: {err}");
                self.needs_layout = true;
                Err(err)
            }
        }
    }

    /// Returns `true` if the last layout call succeeded.
    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    /// Returns the code units of the paragraph.
    pub fn text(&self) -> &[u16] {
        &self.text
    }

    /// Returns the number of code units.
    pub fn text_size(&self) -> usize {
        self.text.len()
    }

    /// Returns the paragraph style.
    pub fn paragraph_style(&self) -> &ParagraphStyle {
        &self.paragraph_style
    }

    /// Returns the style runs.
    pub fn styled_runs(&self) -> &StyledRuns<B> {
        &self.styled_runs
    }

    /// Returns the inline placeholders.
    pub fn placeholders(&self) -> &[PlaceholderRun] {
        &self.placeholders
    }

    /// Returns the width used by the last layout.
    pub fn max_width(&self) -> f64 {
        self.width
    }

    /// Returns the total height of the laid out lines.
    pub fn height(&self) -> f64 {
        self.data.line_heights.last().copied().unwrap_or(0.0)
    }

    /// Returns the width of the widest line.
    pub fn longest_line(&self) -> f64 {
        self.data.longest_line
    }

    /// Returns the distance from the top of the paragraph to the alphabetic
    /// baseline of the first line.
    pub fn alphabetic_baseline(&self) -> f64 {
        self.data.alphabetic_baseline
    }

    /// Returns the distance from the top of the paragraph to the ideographic
    /// baseline of the first line.
    pub fn ideographic_baseline(&self) -> f64 {
        self.data.ideographic_baseline
    }

    /// Returns the width the paragraph would take with no line wrapping.
    pub fn max_intrinsic_width(&self) -> f64 {
        self.data.max_intrinsic_width
    }

    /// Returns the narrowest width the paragraph can take without words
    /// overflowing.
    pub fn min_intrinsic_width(&self) -> f64 {
        self.data.min_intrinsic_width
    }

    /// Returns the number of laid out lines.
    pub fn line_count(&self) -> usize {
        self.data.line_heights.len()
    }

    /// Returns `true` if lines were dropped because of the line limit or an
    /// ellipsis.
    pub fn did_exceed_max_lines(&self) -> bool {
        self.data.did_exceed_max_lines
    }

    /// Returns the code unit extent of every line the text breaks into,
    /// including lines beyond the line limit.
    pub fn line_ranges(&self) -> &[LineRange] {
        &self.data.line_ranges
    }

    /// Returns the visible width of every line in [`line_ranges`](Self::line_ranges).
    pub fn line_widths(&self) -> &[f64] {
        &self.data.line_widths
    }

    /// Returns the graphemes of each laid out line in visual order.
    pub fn glyph_lines(&self) -> &[GlyphLine] {
        &self.data.glyph_lines
    }

    /// Returns all laid out runs sorted by code unit.
    pub fn code_unit_runs(&self) -> &[CodeUnitRun] {
        &self.data.code_unit_runs
    }

    /// Returns the paint records in drawing order.
    pub fn paint_records(&self) -> &[PaintRecord<B>] {
        &self.data.records
    }

    /// Returns the baseline of each laid out line.
    pub fn line_baselines(&self) -> &[f64] {
        &self.data.line_baselines
    }

    /// Returns the bottom of each laid out line.
    pub fn line_heights(&self) -> &[f64] {
        &self.data.line_heights
    }

    /// Returns the strut metrics of the last layout.
    pub fn strut_metrics(&self) -> &StrutMetrics {
        &self.data.strut
    }

    /// Paints the paragraph with its top left corner at `(x, y)`.
    pub fn paint(&self, canvas: &mut impl Canvas<B>, x: f64, y: f64) {
        paint::paint_records(&self.data.records, canvas, x, y);
    }
}
