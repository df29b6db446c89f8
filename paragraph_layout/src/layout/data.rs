// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::font::FontMetrics;
use crate::style::TextDirection;

/// Horizontal extent and code units of one rendered grapheme.
///
/// When a ligature covers several graphemes, its advance is split evenly
/// between them.
#[derive(Clone, PartialEq, Debug)]
pub struct GlyphPosition {
    /// Code units of the grapheme.
    pub code_units: Range<usize>,
    /// Horizontal extent of the grapheme, relative to the paragraph.
    pub x_pos: Range<f64>,
}

impl GlyphPosition {
    pub(crate) fn new(
        x_start: f64,
        advance: f64,
        code_unit_start: usize,
        code_unit_count: usize,
    ) -> Self {
        Self {
            code_units: code_unit_start..code_unit_start + code_unit_count,
            x_pos: x_start..x_start + advance,
        }
    }

    pub(crate) fn shift(&mut self, delta: f64) {
        self.x_pos.start += delta;
        self.x_pos.end += delta;
    }

    /// Horizontal center of the grapheme.
    pub fn center(&self) -> f64 {
        (self.x_pos.start + self.x_pos.end) / 2.0
    }
}

/// The graphemes of one line in visual order.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct GlyphLine {
    /// Grapheme positions sorted by x.
    pub positions: Vec<GlyphPosition>,
    /// Number of code units from the start of this line to the start of the
    /// next one.
    pub total_code_units: usize,
}

/// A laid out run of graphemes sharing one typeface and direction.
#[derive(Clone, PartialEq, Debug)]
pub struct CodeUnitRun {
    /// Grapheme positions sorted by code unit.
    pub positions: Vec<GlyphPosition>,
    /// Code units covered by the run.
    pub code_units: Range<usize>,
    /// Horizontal extent of the run.
    pub x_pos: Range<f64>,
    /// Line the run is on.
    pub line_number: usize,
    /// Metrics of the run's font.
    pub font_metrics: FontMetrics,
    /// Direction of the run.
    pub direction: TextDirection,
    /// Index of the placeholder this run stands for, if any.
    pub placeholder: Option<usize>,
}

impl CodeUnitRun {
    pub(crate) fn shift(&mut self, delta: f64) {
        self.x_pos.start += delta;
        self.x_pos.end += delta;
        for position in &mut self.positions {
            position.shift(delta);
        }
    }
}

/// Rectangle with `f32` edges.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Creates a rectangle from its edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// A rectangle covering part of the text, with the direction of that text.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TextBox {
    /// Extent of the box.
    pub rect: Rect,
    /// Direction of the text in the box.
    pub direction: TextDirection,
}

impl TextBox {
    /// Creates a box.
    pub const fn new(rect: Rect, direction: TextDirection) -> Self {
        Self { rect, direction }
    }
}

/// Which side of a code unit boundary a position belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Affinity {
    /// The position belongs to the code unit before it.
    Upstream,
    /// The position belongs to the code unit after it.
    Downstream,
}

/// A caret position in code units.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PositionWithAffinity {
    /// Code unit offset.
    pub position: usize,
    /// Side of the offset the position belongs to.
    pub affinity: Affinity,
}

impl PositionWithAffinity {
    /// Creates a position.
    pub const fn new(position: usize, affinity: Affinity) -> Self {
        Self { position, affinity }
    }
}

/// How the height of selection boxes is computed.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum RectHeightStyle {
    /// Tight box around the run's font ascent and descent.
    #[default]
    Tight,
    /// The same height for every box on a line: the line's tallest ascent
    /// and descent, without leading.
    Max,
    /// Like [`RectHeightStyle::Max`], with the spacing between lines split
    /// evenly above and below.
    IncludeLineSpacingMiddle,
    /// Like [`RectHeightStyle::Max`], with the spacing between lines added
    /// to the top of each box.
    IncludeLineSpacingTop,
    /// Like [`RectHeightStyle::Max`], with the spacing between lines added
    /// to the bottom of each box.
    IncludeLineSpacingBottom,
    /// Boxes span the strut around the baseline, when a strut is set.
    Strut,
}

/// How the width of selection boxes is computed.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum RectWidthStyle {
    /// Boxes cover only the selected glyphs.
    #[default]
    Tight,
    /// Lines of a multi-line selection are extended to the paragraph's
    /// widest extent.
    Max,
}
