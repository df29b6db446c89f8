// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::layout::{Canvas, GlyphBlob, Rect, Stroke, WavePath};

/// A brush that is just a packed RGBA color.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub(crate) struct ColorBrush(pub u32);

/// A drawing call recorded by [`RecordingCanvas`].
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum DrawOp {
    Rect {
        rect: Rect,
        brush: ColorBrush,
    },
    Glyphs {
        ids: Vec<u32>,
        origin: (f32, f32),
        brush: ColorBrush,
        blur_radius: f64,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        dashed: bool,
    },
    Wave {
        start: (f32, f32),
        segments: usize,
    },
}

/// A canvas that records what is drawn on it.
#[derive(Default, Debug)]
pub(crate) struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub(crate) fn glyph_draws(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Glyphs { .. }))
    }

    pub(crate) fn lines(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Line { .. }))
    }
}

impl Canvas<ColorBrush> for RecordingCanvas {
    fn draw_rect(&mut self, rect: Rect, brush: &ColorBrush) {
        self.ops.push(DrawOp::Rect {
            rect,
            brush: *brush,
        });
    }

    fn draw_glyphs(
        &mut self,
        blob: &GlyphBlob,
        origin: (f32, f32),
        brush: &ColorBrush,
        blur_radius: f64,
    ) {
        self.ops.push(DrawOp::Glyphs {
            ids: blob.glyphs.iter().map(|glyph| glyph.id).collect(),
            origin,
            brush: *brush,
            blur_radius,
        });
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke<'_, ColorBrush>) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width: stroke.width,
            dashed: stroke.dash.is_some(),
        });
    }

    fn draw_wave(&mut self, wave: &WavePath, _stroke: &Stroke<'_, ColorBrush>) {
        self.ops.push(DrawOp::Wave {
            start: wave.start,
            segments: wave.segments.len(),
        });
    }
}
