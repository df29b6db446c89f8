// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint records and the drawing of a laid out paragraph.

use crate::font::{FontMetrics, Typeface};
use crate::style::{Brush, TextDecoration, TextDecorationStyle, TextStyle};

use super::data::Rect;

/// Gap between the two strokes of a double decoration, in multiples of the
/// stroke width.
const DOUBLE_DECORATION_SPACING: f32 = 3.0;

/// A glyph of a [`GlyphBlob`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct BlobGlyph {
    /// Glyph identifier.
    pub id: u32,
    /// Horizontal position relative to the record offset.
    pub x: f32,
    /// Vertical position relative to the baseline.
    pub y: f32,
}

/// Glyphs sharing a typeface and size, drawn together.
#[derive(Clone, PartialEq, Debug)]
pub struct GlyphBlob {
    /// Typeface of every glyph.
    pub typeface: Typeface,
    /// Font size in pixels.
    pub font_size: f32,
    /// Positioned glyphs.
    pub glyphs: Vec<BlobGlyph>,
}

/// Everything needed to draw one glyph blob of a laid out paragraph.
#[derive(Clone, PartialEq, Debug)]
pub struct PaintRecord<B: Brush> {
    /// Style of the text.
    pub style: TextStyle<B>,
    /// Position of the blob origin relative to the paragraph, on the baseline.
    pub offset: (f64, f64),
    /// Glyphs to draw.
    pub blob: GlyphBlob,
    /// Metrics of the blob's font.
    pub metrics: FontMetrics,
    /// Line the record is on.
    pub line: usize,
    /// Left edge of the record's content, relative to `offset`.
    pub x_start: f64,
    /// Right edge of the record's content, relative to `offset`.
    pub x_end: f64,
    /// The record belongs to trailing whitespace.
    pub is_ghost: bool,
    /// Index of the placeholder this record reserves space for, if any.
    pub placeholder: Option<usize>,
}

impl<B: Brush> PaintRecord<B> {
    /// Width of the record's content.
    pub fn run_width(&self) -> f64 {
        self.x_end - self.x_start
    }
}

/// Stroke settings for lines and waves.
#[derive(Clone, PartialEq, Debug)]
pub struct Stroke<'a, B: Brush> {
    /// Brush of the stroke.
    pub brush: &'a B,
    /// Stroke width.
    pub width: f32,
    /// On/off dash intervals, `None` for a continuous stroke.
    pub dash: Option<[f32; 4]>,
}

/// A quadratic curve segment of a [`WavePath`], in absolute coordinates.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct QuadSegment {
    /// Control point.
    pub control: (f32, f32),
    /// End point.
    pub to: (f32, f32),
}

/// A wavy decoration line.
#[derive(Clone, PartialEq, Debug)]
pub struct WavePath {
    /// Start point.
    pub start: (f32, f32),
    /// Segments following `start`.
    pub segments: Vec<QuadSegment>,
}

impl WavePath {
    /// Builds a wave from `(x, y)` with alternating quadratic arcs, stopping
    /// before it would exceed `width`.
    pub(crate) fn new(x: f32, y: f32, width: f32, wavelength: f32) -> Self {
        let mut segments = Vec::new();
        let mut cursor = (x, y);
        let mut x_start = 0.0;
        let mut count = 0;
        if wavelength > 0.0 {
            while x_start + wavelength * 2.0 < width {
                let dy = if count % 2 != 0 { wavelength } else { -wavelength };
                segments.push(QuadSegment {
                    control: (cursor.0 + wavelength, cursor.1 + dy),
                    to: (cursor.0 + wavelength * 2.0, cursor.1),
                });
                cursor.0 += wavelength * 2.0;
                x_start += wavelength * 2.0;
                count += 1;
            }
        }
        Self {
            start: (x, y),
            segments,
        }
    }

    fn offset(&self, dy: f32) -> Self {
        let shift = |(x, y): (f32, f32)| (x, y + dy);
        Self {
            start: shift(self.start),
            segments: self
                .segments
                .iter()
                .map(|segment| QuadSegment {
                    control: shift(segment.control),
                    to: shift(segment.to),
                })
                .collect(),
        }
    }
}

/// The drawing surface a paragraph is painted onto.
pub trait Canvas<B: Brush> {
    /// Fills a rectangle.
    fn draw_rect(&mut self, rect: Rect, brush: &B);

    /// Draws glyphs with their origin at `origin`. A non-zero `blur_radius`
    /// asks for a blurred rendering, used for shadows.
    fn draw_glyphs(&mut self, blob: &GlyphBlob, origin: (f32, f32), brush: &B, blur_radius: f64);

    /// Strokes a straight line.
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke<'_, B>);

    /// Strokes a wavy line.
    fn draw_wave(&mut self, wave: &WavePath, stroke: &Stroke<'_, B>);
}

/// Draws every record at `(x, y)`: all backgrounds first, then for each record
/// its shadows, glyphs and decorations.
pub(crate) fn paint_records<B: Brush>(
    records: &[PaintRecord<B>],
    canvas: &mut impl Canvas<B>,
    x: f64,
    y: f64,
) {
    for record in records {
        paint_background(canvas, record, x, y);
    }
    for record in records {
        let origin = (
            (x + record.offset.0) as f32,
            (y + record.offset.1) as f32,
        );
        if record.placeholder.is_none() {
            paint_shadows(canvas, record, origin);
            canvas.draw_glyphs(&record.blob, origin, &record.style.brush, 0.0);
        }
        paint_decorations(canvas, record, origin);
    }
}

fn paint_background<B: Brush>(
    canvas: &mut impl Canvas<B>,
    record: &PaintRecord<B>,
    x: f64,
    y: f64,
) {
    let Some(background) = &record.style.background else {
        return;
    };
    let left = x + record.offset.0;
    let top = y + record.offset.1;
    let rect = Rect::new(
        (left + record.x_start) as f32,
        top as f32 + record.metrics.ascent,
        (left + record.x_end) as f32,
        top as f32 + record.metrics.descent,
    );
    canvas.draw_rect(rect, background);
}

fn paint_shadows<B: Brush>(
    canvas: &mut impl Canvas<B>,
    record: &PaintRecord<B>,
    origin: (f32, f32),
) {
    for shadow in &record.style.shadows {
        if !shadow.has_shadow() {
            continue;
        }
        let shadow_origin = (origin.0 + shadow.offset.0, origin.1 + shadow.offset.1);
        canvas.draw_glyphs(&record.blob, shadow_origin, &shadow.brush, shadow.blur_radius);
    }
}

fn paint_decorations<B: Brush>(
    canvas: &mut impl Canvas<B>,
    record: &PaintRecord<B>,
    origin: (f32, f32),
) {
    let style = &record.style;
    if style.decoration.is_none() || record.is_ghost {
        return;
    }
    let metrics = &record.metrics;
    let brush = style.decoration_brush.as_ref().unwrap_or(&style.brush);
    let thickness = metrics
        .underline_thickness
        .filter(|&t| t > 0.0)
        .unwrap_or(style.font_size / 14.0);
    let scale = style.font_size / 14.0;
    let dash = match style.decoration_style {
        TextDecorationStyle::Dotted => Some([1.0 * scale, 1.5 * scale, 1.0 * scale, 1.5 * scale]),
        TextDecorationStyle::Dashed => Some([4.0 * scale, 2.0 * scale, 4.0 * scale, 2.0 * scale]),
        _ => None,
    };
    let mut stroke = Stroke {
        brush,
        width: thickness * style.decoration_thickness_multiplier,
        dash,
    };
    let count = if style.decoration_style == TextDecorationStyle::Double {
        2
    } else {
        1
    };
    let width = record.run_width() as f32;
    let x = origin.0 + record.x_start as f32;
    let y = origin.1;
    let wave = (style.decoration_style == TextDecorationStyle::Wavy).then(|| {
        WavePath::new(x, y, width, thickness * style.decoration_thickness_multiplier)
    });

    for i in 0..count {
        let base = i as f32 * thickness * DOUBLE_DECORATION_SPACING;
        if style.decoration.contains(TextDecoration::UNDERLINE) {
            let dy = base + metrics.underline_position.unwrap_or(thickness);
            draw_decoration(canvas, wave.as_ref(), (x, y), width, dy, &stroke);
        }
        if style.decoration.contains(TextDecoration::OVERLINE) {
            // Subtracting makes the second stroke of a double overline go up.
            let dy = -(base - metrics.ascent);
            draw_decoration(canvas, wave.as_ref(), (x, y), width, dy, &stroke);
        }
        if style.decoration.contains(TextDecoration::LINE_THROUGH) {
            if let Some(strikeout) = metrics.strikeout_thickness {
                stroke.width = strikeout * style.decoration_thickness_multiplier;
            }
            let centering = (count as f32 - 1.0) * thickness * DOUBLE_DECORATION_SPACING / -2.0;
            let position = match (metrics.strikeout_thickness, metrics.strikeout_position) {
                (Some(_), Some(position)) => position,
                _ => metrics.x_height / -2.0,
            };
            draw_decoration(
                canvas,
                wave.as_ref(),
                (x, y),
                width,
                base + centering + position,
                &stroke,
            );
        }
    }
}

fn draw_decoration<B: Brush>(
    canvas: &mut impl Canvas<B>,
    wave: Option<&WavePath>,
    (x, y): (f32, f32),
    width: f32,
    dy: f32,
    stroke: &Stroke<'_, B>,
) {
    match wave {
        Some(wave) => canvas.draw_wave(&wave.offset(dy), stroke),
        None => canvas.draw_line((x, y + dy), (x + width, y + dy), stroke),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_stays_within_width() {
        let wave = WavePath::new(10.0, 5.0, 20.0, 2.0);
        // Each arc spans 4 units; the loop stops before reaching 20.
        assert_eq!(wave.segments.len(), 4);
        assert_eq!(wave.segments[0].control, (12.0, 3.0));
        assert_eq!(wave.segments[1].control, (16.0, 7.0));
        assert_eq!(wave.segments[3].to, (26.0, 5.0));
        assert!(WavePath::new(0.0, 0.0, 20.0, 0.0).segments.is_empty());
    }
}
