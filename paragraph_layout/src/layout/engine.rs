// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout pass: line breaking, bidi analysis, then one [`LineLayout`]
//! per line followed by vertical metrics.

use hashbrown::{HashMap, HashSet};

use crate::bidi::compute_bidi_runs;
use crate::error::LayoutError;
use crate::font::FontCollection;
use crate::inline_placeholder::{PlaceholderRun, placeholder_slots};
use crate::line_break::{BreakInput, LineRange, break_lines};
use crate::shape::FontSets;
use crate::style::{Brush, ParagraphStyle, StyledRuns, TextAlign};

use super::data::{CodeUnitRun, GlyphLine};
use super::line::{LineContext, LineLayout};
use super::metrics::{LineExtent, StrutMetrics, compute_strut};
use super::paint::PaintRecord;

/// Everything a layout pass derives from the paragraph's inputs.
#[derive(Clone, Debug)]
pub(crate) struct LayoutData<B: Brush> {
    pub line_ranges: Vec<LineRange>,
    pub line_widths: Vec<f64>,
    pub records: Vec<PaintRecord<B>>,
    pub glyph_lines: Vec<GlyphLine>,
    /// Sorted by code unit.
    pub code_unit_runs: Vec<CodeUnitRun>,
    /// Runs of placeholders, in line order.
    pub placeholder_runs: Vec<CodeUnitRun>,
    /// Distance from the top of each placeholder box to the line baseline.
    pub placeholder_baselines: Vec<f64>,
    /// Bottom of each line.
    pub line_heights: Vec<f64>,
    pub line_baselines: Vec<f64>,
    /// Scaled ascent of each line, including half leading.
    pub line_max_spacings: Vec<f64>,
    pub line_max_descent: Vec<f64>,
    /// Unscaled ascent of each line.
    pub line_max_ascent: Vec<f64>,
    pub strut: StrutMetrics,
    pub max_intrinsic_width: f64,
    pub min_intrinsic_width: f64,
    pub longest_line: f64,
    pub alphabetic_baseline: f64,
    pub ideographic_baseline: f64,
    pub did_exceed_max_lines: bool,
    /// Horizontal extent of all non-ghost content.
    pub min_left: f64,
    pub max_right: f64,
}

impl<B: Brush> Default for LayoutData<B> {
    fn default() -> Self {
        Self {
            line_ranges: Vec::new(),
            line_widths: Vec::new(),
            records: Vec::new(),
            glyph_lines: Vec::new(),
            code_unit_runs: Vec::new(),
            placeholder_runs: Vec::new(),
            placeholder_baselines: Vec::new(),
            line_heights: Vec::new(),
            line_baselines: Vec::new(),
            line_max_spacings: Vec::new(),
            line_max_descent: Vec::new(),
            line_max_ascent: Vec::new(),
            strut: StrutMetrics::default(),
            max_intrinsic_width: 0.0,
            min_intrinsic_width: 0.0,
            longest_line: 0.0,
            alphabetic_baseline: f64::MAX,
            ideographic_baseline: f64::MAX,
            did_exceed_max_lines: false,
            min_left: f64::INFINITY,
            max_right: f64::NEG_INFINITY,
        }
    }
}

/// Inputs of a layout pass.
pub(crate) struct LayoutInput<'a, B: Brush> {
    pub text: &'a [u16],
    pub styled_runs: &'a StyledRuns<B>,
    pub style: &'a ParagraphStyle,
    pub placeholders: &'a [PlaceholderRun],
    pub placeholder_indices: &'a HashSet<usize>,
    pub collection: &'a dyn FontCollection,
}

/// Lays out the paragraph at `width`, producing fresh derived tables.
pub(crate) fn layout<B: Brush>(
    input: &LayoutInput<'_, B>,
    width: f64,
) -> Result<LayoutData<B>, LayoutError> {
    let style = input.style;
    let mut fonts = FontSets::new(input.collection);
    let slots: HashMap<usize, usize> = placeholder_slots(
        input.text,
        input.styled_runs,
        input.placeholder_indices,
        input.placeholders.len(),
    );
    let align = style.effective_align();

    let breaks = break_lines(
        &mut fonts,
        &BreakInput {
            text: input.text,
            styled_runs: input.styled_runs,
            placeholders: input.placeholders,
            placeholder_slots: &slots,
            is_rtl: style.text_direction.is_rtl(),
            strategy: style.break_strategy,
            justify: align == TextAlign::Justify,
        },
        width,
    )?;
    let bidi_runs = compute_bidi_runs(input.text, style.text_direction, input.styled_runs)?;

    let mut data = LayoutData {
        strut: compute_strut(style, input.collection),
        max_intrinsic_width: breaks.max_intrinsic_width,
        placeholder_baselines: input.placeholders.iter().map(|p| p.baseline_offset).collect(),
        ..LayoutData::default()
    };
    let ctx = LineContext {
        text: input.text,
        styled_runs: input.styled_runs,
        style,
        placeholders: input.placeholders,
        placeholder_slots: &slots,
        bidi_runs: &bidi_runs,
        width,
        align,
    };

    let line_count = breaks.lines.len();
    let mut line_limit = style.max_lines.min(line_count);
    data.did_exceed_max_lines = line_count > style.max_lines;
    let mut y_offset = 0.0;
    let mut prev_max_descent = 0.0;
    let mut max_word_width: f64 = 0.0;

    let mut line_number = 0;
    while line_number < line_limit {
        let range = breaks.lines[line_number];
        let mut line = LineLayout::new(
            &ctx,
            line_number,
            range,
            breaks.widths[line_number],
            line_number + 1 == line_limit,
        );
        line.assemble_runs(&ctx);
        let may_ellipsize = line_number + 1 == line_limit || style.unlimited_lines();
        let truncated = line.shape_runs(&ctx, &mut fonts, may_ellipsize)?;
        if truncated && style.unlimited_lines() {
            line_limit = line_number + 1;
            data.did_exceed_max_lines = true;
        }
        line.align(&ctx);
        max_word_width = max_word_width.max(line.max_word_width);
        data.min_left = data.min_left.min(line.min_left);
        data.max_right = data.max_right.max(line.max_right);

        let mut extent = LineExtent::new(&data.strut);
        for record in &line.records {
            let placeholder = record.placeholder.and_then(|slot| input.placeholders.get(slot));
            if let (Some(slot), Some(resolved)) =
                (record.placeholder, extent.add(&record.metrics, &record.style, placeholder))
            {
                data.placeholder_baselines[slot] = resolved;
            }
        }
        if line.records.is_empty() {
            // Nothing was drawn; use the paragraph's default font.
            let default_style = style.text_style::<B>();
            match fonts.style_metrics(&default_style) {
                Ok(metrics) => {
                    extent.add(&metrics, &default_style, None);
                }
                Err(err) => log::debug!("no metrics for empty line {line_number}: {err}"),
            }
        }

        if line_number == 0 {
            data.alphabetic_baseline = extent.max_ascent;
            // Approximated as the bottom of the first line's text.
            data.ideographic_baseline = extent.max_ascent + extent.max_descent;
        }
        let line_bottom = data.line_heights.last().copied().unwrap_or(0.0)
            + (extent.max_ascent + extent.max_descent).round();
        data.line_heights.push(line_bottom);
        data.line_baselines.push(line_bottom - extent.max_descent);
        y_offset += (extent.max_ascent + prev_max_descent).round();
        prev_max_descent = extent.max_descent;
        data.line_max_spacings.push(extent.max_ascent);
        data.line_max_descent.push(extent.max_descent);
        data.line_max_ascent.push(extent.max_unscaled_ascent);

        let next_line_start = breaks
            .lines
            .get(line_number + 1)
            .map_or(input.text.len(), |next| next.start);
        data.glyph_lines.push(GlyphLine {
            positions: core::mem::take(&mut line.glyph_positions),
            total_code_units: next_line_start - range.start,
        });
        for run in &line.code_unit_runs {
            if run.placeholder.is_some() {
                data.placeholder_runs.push(run.clone());
            }
        }
        data.code_unit_runs.append(&mut line.code_unit_runs);
        for mut record in line.records {
            record.offset.1 = y_offset;
            data.records.push(record);
        }
        line_number += 1;
    }

    let single_line = style.max_lines == 1 || (style.unlimited_lines() && style.ellipsized());
    data.min_intrinsic_width = if single_line {
        data.max_intrinsic_width
    } else {
        max_word_width.min(data.max_intrinsic_width)
    };
    data.code_unit_runs.sort_by_key(|run| run.code_units.start);
    data.longest_line = if data.max_right >= data.min_left {
        data.max_right - data.min_left
    } else {
        0.0
    };
    data.line_ranges = breaks.lines;
    data.line_widths = breaks.widths;
    Ok(data)
}
