// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::{HashMap, HashSet};

use crate::analysis::OBJECT_REPLACEMENT_CHAR;
use crate::style::{Brush, StyledRuns};

/// Vertical placement of an inline placeholder relative to the text around it.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum PlaceholderAlignment {
    /// Match the placeholder's baseline (at `baseline_offset` from its top)
    /// with the text baseline.
    #[default]
    Baseline,
    /// Put the bottom edge of the placeholder on the baseline.
    AboveBaseline,
    /// Put the top edge of the placeholder on the baseline.
    BelowBaseline,
    /// Align the top edge of the placeholder with the top of the tallest
    /// text on the line.
    Top,
    /// Align the bottom edge of the placeholder with the bottom of the
    /// lowest text on the line.
    Bottom,
    /// Center the placeholder on the middle of the line's text.
    Middle,
}

/// Text baseline a placeholder aligns against.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum TextBaseline {
    /// Latin style baseline.
    #[default]
    Alphabetic,
    /// Baseline under ideographic characters, approximated as the bottom of
    /// the line's text.
    Ideographic,
}

/// An inline box reserved for non-text content.
///
/// Each placeholder is anchored to one U+FFFC code unit registered as a real
/// placeholder index. Placeholders are matched with those code units in
/// buffer order.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct PlaceholderRun {
    /// Width of the box in pixels.
    pub width: f64,
    /// Height of the box in pixels.
    pub height: f64,
    /// How the box is positioned vertically.
    pub alignment: PlaceholderAlignment,
    /// Baseline used with [`PlaceholderAlignment::Baseline`].
    pub baseline: TextBaseline,
    /// Distance from the top of the box to its own baseline.
    pub baseline_offset: f64,
}

impl PlaceholderRun {
    /// Creates a placeholder box.
    pub fn new(
        width: f64,
        height: f64,
        alignment: PlaceholderAlignment,
        baseline: TextBaseline,
        baseline_offset: f64,
    ) -> Self {
        Self {
            width,
            height,
            alignment,
            baseline,
            baseline_offset,
        }
    }
}

/// Maps each code unit that stands for a placeholder to the index of its
/// [`PlaceholderRun`].
///
/// A code unit qualifies when it is U+FFFC, registered in `indices` and
/// styled as a run of its own. Qualifying code units are numbered in buffer
/// order; those beyond `count` are treated as plain text.
pub(crate) fn placeholder_slots<B: Brush>(
    text: &[u16],
    styled_runs: &StyledRuns<B>,
    indices: &HashSet<usize>,
    count: usize,
) -> HashMap<usize, usize> {
    let mut slots = HashMap::new();
    for run in styled_runs.iter() {
        if slots.len() >= count {
            break;
        }
        if run.end == run.start + 1
            && text.get(run.start) == Some(&OBJECT_REPLACEMENT_CHAR)
            && indices.contains(&run.start)
        {
            let slot = slots.len();
            slots.insert(run.start, slot);
        }
    }
    slots
}
