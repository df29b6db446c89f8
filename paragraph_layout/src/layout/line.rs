// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembly of a single line: run selection, shaping, grapheme positions,
//! justification and horizontal alignment.

use core::ops::Range;
use std::borrow::Cow;

use hashbrown::HashMap;
use smallvec::{SmallVec, smallvec};

use crate::analysis::{GraphemeBreaks, is_word_space};
use crate::bidi::BidiRun;
use crate::error::LayoutError;
use crate::font::ShapedGlyph;
use crate::inline_placeholder::PlaceholderRun;
use crate::line_break::LineRange;
use crate::shape::{FontSets, ShapedRun, shape_run};
use crate::style::{Brush, ParagraphStyle, StyledRuns, TextAlign, TextStyle};

use super::data::{CodeUnitRun, GlyphPosition};
use super::paint::{BlobGlyph, GlyphBlob, PaintRecord};

/// Inputs shared by every line of a layout pass.
pub(crate) struct LineContext<'a, B: Brush> {
    pub text: &'a [u16],
    pub styled_runs: &'a StyledRuns<B>,
    pub style: &'a ParagraphStyle,
    pub placeholders: &'a [PlaceholderRun],
    pub placeholder_slots: &'a HashMap<usize, usize>,
    pub bidi_runs: &'a [BidiRun],
    /// Layout width, possibly infinite.
    pub width: f64,
    /// Alignment with start and end resolved.
    pub align: TextAlign,
}

impl<B: Brush> LineContext<'_, B> {
    fn run_style(&self, run: &BidiRun) -> Result<&TextStyle<B>, LayoutError> {
        self.styled_runs
            .get(run.style_run)
            .map(|styled| styled.style)
            .ok_or(LayoutError::UnstyledText { offset: run.start })
    }
}

/// Splits `start..end` into maximal runs of non word space code units.
pub(crate) fn find_words(text: &[u16], start: usize, end: usize) -> Vec<Range<usize>> {
    let mut words = Vec::new();
    let mut word_start = None;
    for (i, &c) in text.iter().enumerate().take(end).skip(start) {
        match (word_start, is_word_space(c)) {
            (None, false) => word_start = Some(i),
            (Some(s), true) => {
                words.push(s..i);
                word_start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = word_start {
        words.push(s..end);
    }
    words
}

/// State accumulated while laying out one line.
pub(crate) struct LineLayout<B: Brush> {
    pub line_number: usize,
    pub range: LineRange,
    words: Vec<Range<usize>>,
    word_index: usize,
    word_gap_width: f64,
    justify_line: bool,
    runs: Vec<BidiRun>,
    all_rtl: bool,
    run_x_offset: f64,
    justify_x_offset: f64,
    /// Graphemes in visual order.
    pub glyph_positions: Vec<GlyphPosition>,
    pub code_unit_runs: Vec<CodeUnitRun>,
    pub records: Vec<PaintRecord<B>>,
    /// Widest word seen on the line.
    pub max_word_width: f64,
    /// Horizontal extent of the non-ghost content.
    pub min_left: f64,
    pub max_right: f64,
    /// Offset applied by [`LineLayout::align`].
    pub x_offset: f64,
}

impl<B: Brush> LineLayout<B> {
    /// Starts a line. `line_width` is the visible width computed by the line
    /// breaker and `is_last` tells whether this is the last line to lay out.
    pub(crate) fn new(
        ctx: &LineContext<'_, B>,
        line_number: usize,
        range: LineRange,
        line_width: f64,
        is_last: bool,
    ) -> Self {
        let words = find_words(ctx.text, range.start, range.end);
        let justify_line =
            ctx.style.text_align == TextAlign::Justify && !is_last && !range.hard_break;
        let word_gap_width = if justify_line && words.len() > 1 {
            (ctx.width - line_width) / (words.len() - 1) as f64
        } else {
            0.0
        };
        Self {
            line_number,
            range,
            words,
            word_index: 0,
            word_gap_width,
            justify_line,
            runs: Vec::new(),
            all_rtl: false,
            run_x_offset: 0.0,
            justify_x_offset: 0.0,
            glyph_positions: Vec::new(),
            code_unit_runs: Vec::new(),
            records: Vec::new(),
            max_word_width: 0.0,
            min_left: f64::INFINITY,
            max_right: f64::NEG_INFINITY,
            x_offset: 0.0,
        }
    }

    /// Collects the runs of the line in visual order.
    ///
    /// Trailing whitespace beyond the aligned end of the line becomes a ghost
    /// run, placed before its run in RTL text and after it in LTR text.
    pub(crate) fn assemble_runs(&mut self, ctx: &LineContext<'_, B>) {
        let range = self.range;
        let line_end = match ctx.align {
            TextAlign::Right | TextAlign::Center | TextAlign::Justify => {
                range.end_excluding_whitespace
            }
            _ => range.end,
        };
        let wants_ghosts = !ctx.style.ellipsized() && range.end_excluding_whitespace < range.end;
        for bidi_run in ctx.bidi_runs {
            let ghost = (wants_ghosts && bidi_run.start <= range.end && bidi_run.end > line_end)
                .then(|| BidiRun {
                    start: bidi_run.start.max(line_end),
                    end: bidi_run.end.min(range.end),
                    is_ghost: true,
                    ..*bidi_run
                })
                .filter(|ghost| ghost.start < ghost.end);
            if bidi_run.is_rtl() {
                self.runs.extend(ghost);
            }
            if bidi_run.start < line_end && bidi_run.end > range.start {
                let mut run = BidiRun {
                    start: bidi_run.start.max(range.start),
                    end: bidi_run.end.min(line_end),
                    ..*bidi_run
                };
                if run.len() == 1 {
                    run.placeholder = ctx.placeholder_slots.get(&run.start).copied();
                }
                self.runs.push(run);
            }
            if !bidi_run.is_rtl() {
                self.runs.extend(ghost);
            }
        }
        self.all_rtl = !self.runs.is_empty() && self.runs.iter().all(BidiRun::is_rtl);
        if self.all_rtl {
            self.words.reverse();
        }
    }

    /// Shapes and positions every run of the line.
    ///
    /// `may_ellipsize` allows truncating the last run with the paragraph's
    /// ellipsis. Returns `true` if the line was truncated.
    pub(crate) fn shape_runs(
        &mut self,
        ctx: &LineContext<'_, B>,
        fonts: &mut FontSets<'_>,
        may_ellipsize: bool,
    ) -> Result<bool, LayoutError> {
        let mut truncated = false;
        let runs = core::mem::take(&mut self.runs);
        for (index, run) in runs.iter().enumerate() {
            let style = ctx.run_style(run)?;
            let placeholder = run.placeholder.and_then(|slot| ctx.placeholders.get(slot));

            let mut text = Cow::Borrowed(&ctx.text[run.start..run.end]);
            let mut ellipsis_cluster = None;
            let shaped = if let Some(placeholder) = placeholder {
                let typeface = fonts.base_typeface(
                    &style.font_families,
                    style.locale.as_deref(),
                    style.font_weight,
                    style.font_style,
                )?;
                ShapedRun::placeholder(placeholder.width as f32, typeface)
            } else {
                let ellipsize = may_ellipsize
                    && ctx.style.ellipsized()
                    && ctx.width.is_finite()
                    && !self.range.hard_break
                    && index + 1 == runs.len();
                if ellipsize {
                    let kept = self.truncate_for_ellipsis(ctx, fonts, style, run)?;
                    let mut owned = text[..kept].to_vec();
                    owned.extend(ctx.style.ellipsis.encode_utf16());
                    text = Cow::Owned(owned);
                    ellipsis_cluster = Some(kept);
                    truncated = true;
                }
                let mut shaped = shape_run(fonts, style, &text, run.is_rtl())?;
                if let Some(kept) = ellipsis_cluster {
                    // The ellipsis glyphs stand for the truncated code units.
                    for glyph in &mut shaped.glyphs {
                        glyph.cluster = glyph.cluster.min(kept);
                    }
                }
                shaped
            };

            if shaped.glyphs.is_empty() {
                continue;
            }
            if run.is_ghost && run.is_rtl() {
                self.run_x_offset -= f64::from(shaped.advance);
            }
            self.position_run(
                ctx,
                fonts,
                style,
                run,
                placeholder,
                &text,
                &shaped,
                ellipsis_cluster,
            );
            if (!run.is_ghost || run.is_rtl()) && placeholder.is_none() {
                self.run_x_offset += f64::from(shaped.advance);
            }
        }
        self.runs = runs;
        Ok(truncated)
    }

    /// Returns how many code units of `run` fit on the line together with
    /// the ellipsis.
    fn truncate_for_ellipsis(
        &self,
        ctx: &LineContext<'_, B>,
        fonts: &mut FontSets<'_>,
        style: &TextStyle<B>,
        run: &BidiRun,
    ) -> Result<usize, LayoutError> {
        let ellipsis: Vec<u16> = ctx.style.ellipsis.encode_utf16().collect();
        let ellipsis_width = f64::from(shape_run(fonts, style, &ellipsis, run.is_rtl())?.advance);
        let measured = shape_run(fonts, style, &ctx.text[run.start..run.end], run.is_rtl())?;
        let mut text_width = f64::from(measured.advance);
        let mut kept = run.len();
        while kept > 0 && self.run_x_offset + text_width + ellipsis_width > ctx.width {
            kept -= 1;
            text_width -= f64::from(measured.char_advances[kept]);
        }
        log::debug!(
            "ellipsizing line {} at code unit {}",
            self.line_number,
            run.start + kept
        );
        Ok(kept)
    }

    fn position_run(
        &mut self,
        ctx: &LineContext<'_, B>,
        fonts: &FontSets<'_>,
        style: &TextStyle<B>,
        run: &BidiRun,
        placeholder: Option<&PlaceholderRun>,
        text: &[u16],
        shaped: &ShapedRun,
        ellipsis_cluster: Option<usize>,
    ) {
        let graphemes = GraphemeBreaks::new(text, &shaped.char_advances);
        let glyphs = &shaped.glyphs;
        let mut word_start_position = None;

        for blob in typeface_blobs(glyphs) {
            let typeface = glyphs[blob.start].typeface;
            let metrics = fonts.metrics(typeface, style.font_size);
            let record_x = self.run_x_offset + self.justify_x_offset;
            let mut blob_glyphs = Vec::with_capacity(blob.len());
            let mut positions: Vec<GlyphPosition> = Vec::new();
            let mut justify_delta = 0.0;

            let mut glyph_index = blob.start;
            while glyph_index < blob.end {
                let cluster_start = glyph_index;
                let cluster = glyphs[glyph_index].cluster;
                let mut cluster_advance = 0.0;
                while glyph_index < blob.end && glyphs[glyph_index].cluster == cluster {
                    let glyph = &glyphs[glyph_index];
                    blob_glyphs.push(BlobGlyph {
                        id: glyph.id,
                        x: glyph.x + justify_delta as f32,
                        y: glyph.y,
                    });
                    cluster_advance += f64::from(glyph.advance);
                    glyph_index += 1;
                }
                let glyph_x = f64::from(glyphs[cluster_start].x) + justify_delta;

                let run_len = run.len();
                let start = cluster.min(run_len);
                let end = if run.is_rtl() {
                    cluster_start
                        .checked_sub(1)
                        .map_or(text.len(), |prev| glyphs[prev].cluster)
                } else {
                    glyphs.get(glyph_index).map_or(text.len(), |next| next.cluster)
                }
                .clamp(start, run_len);

                let counts = grapheme_counts(
                    &graphemes,
                    start,
                    end,
                    run.is_rtl() || ellipsis_cluster == Some(cluster),
                );
                let advance = match placeholder {
                    Some(placeholder) => placeholder.width,
                    None => cluster_advance,
                };
                let grapheme_advance = advance / counts.len() as f64;
                let mut x = self.run_x_offset + self.justify_x_offset + glyph_x;
                let mut code_unit = run.start + start;
                let first = positions.len();
                for &count in &counts {
                    positions.push(GlyphPosition::new(x, grapheme_advance, code_unit, count));
                    x += grapheme_advance;
                    code_unit += count;
                }

                let (mut at_word_start, mut at_word_end) = match self.words.get(self.word_index) {
                    Some(word) => (word.start == run.start + start, word.end == run.start + end),
                    None => (false, false),
                };
                if self.all_rtl {
                    core::mem::swap(&mut at_word_start, &mut at_word_end);
                }
                if at_word_start {
                    word_start_position = Some(positions[first].x_pos.start);
                }
                if at_word_end {
                    if self.justify_line {
                        justify_delta += self.word_gap_width;
                    }
                    self.word_index += 1;
                    if let (Some(word_start), Some(last)) =
                        (word_start_position.take(), positions.last())
                    {
                        self.max_word_width = self.max_word_width.max(last.x_pos.end - word_start);
                    }
                }
            }

            let (Some(first), Some(last)) = (positions.first(), positions.last()) else {
                continue;
            };
            let x_start = first.x_pos.start - record_x;
            let x_end = match placeholder {
                Some(placeholder) => x_start + placeholder.width,
                None => last.x_pos.end - record_x,
            };
            let run_x_pos = first.x_pos.start..match placeholder {
                Some(placeholder) => last.x_pos.start + placeholder.width,
                None => last.x_pos.end,
            };
            if !run.is_ghost {
                self.min_left = self.min_left.min(first.x_pos.start);
                self.max_right = self.max_right.max(last.x_pos.end);
            }
            self.records.push(PaintRecord {
                style: style.clone(),
                offset: (record_x, 0.0),
                blob: GlyphBlob {
                    typeface,
                    font_size: style.font_size,
                    glyphs: blob_glyphs,
                },
                metrics,
                line: self.line_number,
                x_start,
                x_end,
                is_ghost: run.is_ghost,
                placeholder: run.placeholder.filter(|_| placeholder.is_some()),
            });
            if let Some(placeholder) = placeholder {
                self.run_x_offset += placeholder.width;
            }
            self.justify_x_offset += justify_delta;

            self.glyph_positions.extend(positions.iter().cloned());
            positions.sort_by_key(|position| position.code_units.start);
            let code_units = positions
                .first()
                .map_or(run.start, |p| p.code_units.start)
                ..positions
                    .iter()
                    .map(|p| p.code_units.end)
                    .max()
                    .unwrap_or(run.end);
            self.code_unit_runs.push(CodeUnitRun {
                positions,
                code_units,
                x_pos: run_x_pos,
                line_number: self.line_number,
                font_metrics: metrics,
                direction: run.direction,
                placeholder: run.placeholder.filter(|_| placeholder.is_some()),
            });
        }
    }

    /// Offsets the line horizontally according to the paragraph alignment.
    pub(crate) fn align(&mut self, ctx: &LineContext<'_, B>) {
        self.x_offset = if ctx.width.is_infinite() {
            0.0
        } else {
            match ctx.align {
                TextAlign::Right => ctx.width - self.run_x_offset,
                TextAlign::Center => (ctx.width - self.run_x_offset) / 2.0,
                _ => 0.0,
            }
        };
        if self.x_offset == 0.0 {
            return;
        }
        for run in &mut self.code_unit_runs {
            run.shift(self.x_offset);
        }
        for position in &mut self.glyph_positions {
            position.shift(self.x_offset);
        }
        for record in &mut self.records {
            record.offset.0 += self.x_offset;
        }
        self.min_left += self.x_offset;
        self.max_right += self.x_offset;
    }
}

/// Splits glyphs into maximal ranges sharing a typeface.
fn typeface_blobs(glyphs: &[ShapedGlyph]) -> Vec<Range<usize>> {
    let mut blobs = Vec::new();
    let mut start = 0;
    for i in 1..=glyphs.len() {
        if i == glyphs.len() || glyphs[i].typeface != glyphs[start].typeface {
            blobs.push(start..i);
            start = i;
        }
    }
    blobs
}

/// Code unit counts of the graphemes in `start..end`.
///
/// A cluster that is kept whole yields a single count. An empty cluster
/// yields a single empty grapheme.
fn grapheme_counts(
    graphemes: &GraphemeBreaks,
    start: usize,
    end: usize,
    whole: bool,
) -> SmallVec<[usize; 4]> {
    if end <= start {
        return smallvec![0];
    }
    if whole {
        return smallvec![end - start];
    }
    let mut counts = SmallVec::new();
    let mut count = 1;
    for offset in start + 1..end {
        if graphemes.is_break(offset) {
            counts.push(count);
            count = 1;
        } else {
            count += 1;
        }
    }
    counts.push(count);
    counts
}
