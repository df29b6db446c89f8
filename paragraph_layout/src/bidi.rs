// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional analysis of a paragraph.

use unicode_bidi::Level;
use unicode_bidi::utf16::BidiInfo;

use crate::analysis::is_bidi_control;
use crate::error::LayoutError;
use crate::style::{Brush, StyledRuns, TextDirection};

/// A directional, single-style span of text in visual order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct BidiRun {
    pub start: usize,
    pub end: usize,
    pub direction: TextDirection,
    /// Index of the style run covering the span.
    pub style_run: usize,
    /// Trailing whitespace that takes part in queries but not in line width.
    pub is_ghost: bool,
    /// Index into the paragraph's placeholders for placeholder runs.
    pub placeholder: Option<usize>,
}

impl BidiRun {
    pub(crate) fn new(
        start: usize,
        end: usize,
        direction: TextDirection,
        style_run: usize,
    ) -> Self {
        Self {
            start,
            end,
            direction,
            style_run,
            is_ghost: false,
            placeholder: None,
        }
    }

    pub(crate) fn is_rtl(&self) -> bool {
        self.direction.is_rtl()
    }

    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Splits `text` into visual runs of uniform direction and style.
///
/// Bidi control characters are stripped from the ends of each directional
/// run, dropping runs that become empty. Each directional run is then cut at
/// style boundaries, emitting the pieces of RTL runs in reverse so that the
/// result is in visual order.
pub(crate) fn compute_bidi_runs<B: Brush>(
    text: &[u16],
    direction: TextDirection,
    styled_runs: &StyledRuns<B>,
) -> Result<Vec<BidiRun>, LayoutError> {
    let base_level = match direction {
        TextDirection::Rtl => Level::rtl(),
        TextDirection::Ltr => Level::ltr(),
    };
    let info = BidiInfo::new(text, Some(base_level));
    let mut result = Vec::new();
    for paragraph in &info.paragraphs {
        let (levels, runs) = info.visual_runs(paragraph, paragraph.range.clone());
        for run in runs {
            let run_direction = if levels[run.start].is_rtl() {
                TextDirection::Rtl
            } else {
                TextDirection::Ltr
            };
            let mut start = run.start;
            let mut end = run.end;
            while start < end && is_bidi_control(u32::from(text[start])) {
                start += 1;
            }
            while end > start && is_bidi_control(u32::from(text[end - 1])) {
                end -= 1;
            }
            if start == end {
                continue;
            }
            let first = result.len();
            let mut chunk_start = start;
            while chunk_start < end {
                let style_run = styled_runs
                    .run_index_at(chunk_start)
                    .ok_or(LayoutError::UnstyledText {
                        offset: chunk_start,
                    })?;
                let run_end = styled_runs
                    .get(style_run)
                    .map_or(end, |run| run.end)
                    .min(end);
                if run_end <= chunk_start {
                    return Err(LayoutError::UnstyledText {
                        offset: chunk_start,
                    });
                }
                result.push(BidiRun::new(chunk_start, run_end, run_direction, style_run));
                chunk_start = run_end;
            }
            if run_direction.is_rtl() {
                result[first..].reverse();
            }
        }
    }
    Ok(result)
}
