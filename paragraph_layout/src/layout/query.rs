// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing and selection geometry.

use core::ops::Range;
use std::collections::BTreeMap;

use crate::analysis::word_boundaries;
use crate::style::{Brush, TextAlign, TextDirection};

use super::Paragraph;
use super::data::{
    Affinity, CodeUnitRun, PositionWithAffinity, Rect, RectHeightStyle, RectWidthStyle, TextBox,
};
use super::metrics::is_strut_valid;

/// Boxes of one line, with the horizontal extent of its run boxes.
struct LineBoxes {
    boxes: Vec<TextBox>,
    has_runs: bool,
    min_left: f64,
    max_right: f64,
}

impl Default for LineBoxes {
    fn default() -> Self {
        Self {
            boxes: Vec::new(),
            has_runs: false,
            min_left: f64::MAX,
            max_right: f64::MIN,
        }
    }
}

fn text_box(left: f64, top: f64, right: f64, bottom: f64, direction: TextDirection) -> TextBox {
    TextBox::new(
        Rect::new(left as f32, top as f32, right as f32, bottom as f32),
        direction,
    )
}

impl<B: Brush> Paragraph<B> {
    /// Returns the vertical extent `(top, bottom)` of a run.
    fn run_extent(&self, run: &CodeUnitRun) -> (f64, f64) {
        let baseline = self.data.line_baselines[run.line_number];
        let placeholder = run.placeholder.and_then(|slot| {
            let height = self.placeholders.get(slot)?.height;
            let offset = *self.data.placeholder_baselines.get(slot)?;
            Some((height, offset))
        });
        match placeholder {
            Some((height, offset)) => (baseline - offset, baseline + height - offset),
            None => (
                baseline + f64::from(run.font_metrics.ascent),
                baseline + f64::from(run.font_metrics.descent),
            ),
        }
    }

    /// Returns the boxes covering the code units in `range`.
    ///
    /// Boxes are grouped by line, top to bottom. Within a line, run boxes come
    /// in code unit order, followed by any extension boxes added by
    /// [`RectWidthStyle::Max`]. A line break inside the range yields a zero
    /// width box at the end of its line when the line has no other box.
    pub fn rects_for_range(
        &self,
        range: Range<usize>,
        height_style: RectHeightStyle,
        width_style: RectWidthStyle,
    ) -> Vec<TextBox> {
        let Range { start, end } = range;
        let mut lines: BTreeMap<usize, LineBoxes> = BTreeMap::new();
        let mut first_line_dir = TextDirection::Ltr;
        let mut min_line = usize::MAX;
        let mut max_line = 0;

        for run in &self.data.code_unit_runs {
            if run.code_units.start >= end {
                break;
            }
            if run.code_units.end <= start {
                continue;
            }
            let (top, bottom) = self.run_extent(run);
            max_line = max_line.max(run.line_number);
            min_line = min_line.min(run.line_number);

            let (left, right) = if run.code_units.start >= start && run.code_units.end <= end {
                (run.x_pos.start, run.x_pos.end)
            } else {
                let mut left = f64::MAX;
                let mut right = f64::MIN;
                for position in &run.positions {
                    let units = &position.code_units;
                    let inside = units.start >= start && units.end <= end;
                    // A range ending inside a combining sequence still
                    // selects the whole grapheme.
                    let combining = units.end == end
                        && units.start == start.saturating_sub(units.len().saturating_sub(1));
                    if inside || combining {
                        left = left.min(position.x_pos.start);
                        right = right.max(position.x_pos.end);
                    }
                }
                if left == f64::MAX || right == f64::MIN {
                    continue;
                }
                (left, right)
            };

            let line = lines.entry(run.line_number).or_default();
            line.has_runs = true;
            if width_style == RectWidthStyle::Max {
                line.max_right = line.max_right.max(right);
                line.min_left = line.min_left.min(left);
                if min_line == run.line_number {
                    first_line_dir = run.direction;
                }
            }
            line.boxes
                .push(text_box(left, top, right, bottom, run.direction));
        }

        let laid_out_lines = self.data.line_heights.len();
        for (line_number, line) in self.data.line_ranges.iter().enumerate() {
            if line_number >= laid_out_lines || line.start >= end {
                break;
            }
            if line.end_including_newline <= start || lines.contains_key(&line_number) {
                continue;
            }
            if line.end != line.end_including_newline
                && line.end >= start
                && line.end_including_newline <= end
            {
                let mut x = self.data.line_widths[line_number];
                if x == 0.0
                    && self.width.is_finite()
                    && self.paragraph_style.effective_align() == TextAlign::Center
                {
                    x = self.width / 2.0;
                }
                let top = match line_number {
                    0 => 0.0,
                    _ => self.data.line_heights[line_number - 1],
                };
                let bottom = self.data.line_heights[line_number];
                lines
                    .entry(line_number)
                    .or_default()
                    .boxes
                    .push(text_box(x, top, x, bottom, TextDirection::Ltr));
            }
        }

        let data = &self.data;
        let mut boxes = Vec::new();
        for (&line_number, line) in &mut lines {
            let baseline = data.line_baselines[line_number];
            let max_top = baseline - data.line_max_ascent[line_number];
            let max_bottom = baseline + data.line_max_descent[line_number];

            // The last selected line is only partly covered, so it is never
            // extended.
            if width_style == RectWidthStyle::Max && line.has_runs && line_number != max_line {
                if line.min_left > data.min_left
                    && (line_number != min_line || first_line_dir == TextDirection::Rtl)
                {
                    line.boxes.push(text_box(
                        data.min_left,
                        max_top,
                        line.min_left,
                        max_bottom,
                        TextDirection::Rtl,
                    ));
                }
                if line.max_right < data.max_right
                    && (line_number != min_line || first_line_dir == TextDirection::Ltr)
                {
                    line.boxes.push(text_box(
                        line.max_right,
                        max_top,
                        data.max_right,
                        max_bottom,
                        TextDirection::Ltr,
                    ));
                }
            }

            let has_next_line = line_number + 1 < data.line_max_spacings.len();
            let vertical = match height_style {
                RectHeightStyle::Tight => None,
                RectHeightStyle::Max => Some((max_top, max_bottom)),
                RectHeightStyle::IncludeLineSpacingMiddle => {
                    let mut top = max_top;
                    let mut bottom = max_bottom;
                    if has_next_line {
                        bottom += (data.line_max_spacings[line_number + 1]
                            - data.line_max_ascent[line_number + 1])
                            / 2.0;
                    }
                    if line_number != 0 {
                        top -= (data.line_max_spacings[line_number]
                            - data.line_max_ascent[line_number])
                            / 2.0;
                    }
                    Some((top, bottom))
                }
                RectHeightStyle::IncludeLineSpacingTop => {
                    let top = match line_number {
                        0 => max_top,
                        _ => baseline - data.line_max_spacings[line_number],
                    };
                    Some((top, max_bottom))
                }
                RectHeightStyle::IncludeLineSpacingBottom => {
                    let mut bottom = max_bottom;
                    if has_next_line {
                        bottom += data.line_max_spacings[line_number]
                            - data.line_max_ascent[line_number];
                    }
                    Some((max_top, bottom))
                }
                RectHeightStyle::Strut => is_strut_valid(&self.paragraph_style)
                    .then(|| (baseline - data.strut.ascent, baseline + data.strut.descent)),
            };
            match vertical {
                None => boxes.append(&mut line.boxes),
                Some((top, bottom)) => boxes.extend(line.boxes.iter().map(|b| {
                    TextBox::new(
                        Rect::new(b.rect.left, top as f32, b.rect.right, bottom as f32),
                        b.direction,
                    )
                })),
            }
        }
        boxes
    }

    /// Returns the caret position closest to the point `(dx, dy)`, relative
    /// to the top left of the paragraph.
    pub fn glyph_position_at_coordinate(&self, dx: f64, dy: f64) -> PositionWithAffinity {
        let line_heights = &self.data.line_heights;
        if line_heights.is_empty() {
            return PositionWithAffinity::new(0, Affinity::Downstream);
        }
        let line_index = line_heights
            .iter()
            .position(|&bottom| dy < bottom)
            .unwrap_or(line_heights.len() - 1)
            .min(self.data.glyph_lines.len().saturating_sub(1));
        let Some(line) = self.data.glyph_lines.get(line_index) else {
            return PositionWithAffinity::new(0, Affinity::Downstream);
        };
        let positions = &line.positions;
        let Some(last) = positions.last() else {
            let line_start = self.data.glyph_lines[..line_index]
                .iter()
                .map(|line| line.total_code_units)
                .sum();
            return PositionWithAffinity::new(line_start, Affinity::Downstream);
        };

        let hit = positions.iter().enumerate().find(|(index, position)| {
            let glyph_end = positions
                .get(index + 1)
                .map_or(position.x_pos.end, |next| next.x_pos.start);
            dx < glyph_end
        });
        let Some((_, glyph)) = hit else {
            return PositionWithAffinity::new(last.code_units.end, Affinity::Upstream);
        };

        let direction = self
            .data
            .code_unit_runs
            .iter()
            .find(|run| {
                glyph.code_units.start >= run.code_units.start
                    && glyph.code_units.end <= run.code_units.end
            })
            .map_or(TextDirection::Ltr, |run| run.direction);
        let center = glyph.center();
        let before = match direction {
            TextDirection::Ltr => dx < center,
            TextDirection::Rtl => dx >= center,
        };
        if before {
            PositionWithAffinity::new(glyph.code_units.start, Affinity::Downstream)
        } else {
            PositionWithAffinity::new(glyph.code_units.end, Affinity::Upstream)
        }
    }

    /// Returns one box per laid out placeholder, in line order.
    pub fn rects_for_placeholders(&self) -> Vec<TextBox> {
        self.data
            .placeholder_runs
            .iter()
            .map(|run| {
                let (top, bottom) = self.run_extent(run);
                text_box(run.x_pos.start, top, run.x_pos.end, bottom, run.direction)
            })
            .collect()
    }

    /// Returns the word containing the code unit at `offset`.
    ///
    /// The range runs from the last word boundary at or before `offset` to
    /// the next boundary after it. Does not require layout.
    pub fn word_boundary(&self, offset: usize) -> Range<usize> {
        if self.text.is_empty() {
            return 0..0;
        }
        if offset > self.text.len() {
            return offset..offset;
        }
        let boundaries = self.word_breaks.get_or_init(|| word_boundaries(&self.text));
        let index = boundaries.partition_point(|&boundary| boundary <= offset);
        let prev = index
            .checked_sub(1)
            .and_then(|i| boundaries.get(i))
            .copied()
            .unwrap_or(offset);
        let next = boundaries.get(index).copied().unwrap_or(offset);
        prev..next
    }
}
