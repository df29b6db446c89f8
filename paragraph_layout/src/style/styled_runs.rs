// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Brush, TextStyle};

/// A run of text sharing one style, borrowed from a [`StyledRuns`].
#[derive(Copy, Clone, Debug)]
pub struct StyledRun<'a, B: Brush> {
    /// Style of the run.
    pub style: &'a TextStyle<B>,
    /// Code unit offset where the run starts.
    pub start: usize,
    /// Code unit offset where the run ends (exclusive).
    pub end: usize,
}

#[derive(Copy, Clone, PartialEq, Debug)]
struct IndexedRun {
    style_index: usize,
    start: usize,
    end: usize,
}

/// An ordered partition of a code unit buffer into style runs.
///
/// Styles are stored once in a table and referenced by index from each run.
/// Runs are contiguous, sorted by start offset and never overlap.
#[derive(Clone, PartialEq, Debug)]
pub struct StyledRuns<B: Brush> {
    styles: Vec<TextStyle<B>>,
    runs: Vec<IndexedRun>,
}

impl<B: Brush> Default for StyledRuns<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Brush> StyledRuns<B> {
    /// Creates an empty set of runs.
    pub fn new() -> Self {
        Self {
            styles: Vec::new(),
            runs: Vec::new(),
        }
    }

    /// Adds a style to the table and returns its index.
    pub fn add_style(&mut self, style: TextStyle<B>) -> usize {
        let index = self.styles.len();
        self.styles.push(style);
        index
    }

    /// Returns the style stored at `index`.
    pub fn style(&self, index: usize) -> Option<&TextStyle<B>> {
        self.styles.get(index)
    }

    /// Starts a new run with the style at `style_index`, beginning at `start`.
    ///
    /// The previous run is closed at `start`. A previous run that would be
    /// empty is replaced instead.
    pub fn start_run(&mut self, style_index: usize, start: usize) {
        self.end_run_if_needed(start);
        self.runs.push(IndexedRun {
            style_index,
            start,
            end: start,
        });
    }

    /// Closes the last run at `end`, dropping it if it would be empty.
    pub fn end_run_if_needed(&mut self, end: usize) {
        if let Some(last) = self.runs.last_mut() {
            if last.start == end {
                self.runs.pop();
            } else {
                last.end = end;
            }
        }
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` if there are no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Returns the run at `index`.
    pub fn get(&self, index: usize) -> Option<StyledRun<'_, B>> {
        let run = self.runs.get(index)?;
        Some(StyledRun {
            style: self.styles.get(run.style_index)?,
            start: run.start,
            end: run.end,
        })
    }

    /// Iterates over the runs in order.
    pub fn iter(&self) -> impl Iterator<Item = StyledRun<'_, B>> + '_ {
        (0..self.runs.len()).filter_map(|index| self.get(index))
    }

    /// Returns the index of the run covering `offset`: the last run starting
    /// at or before it.
    pub fn run_index_at(&self, offset: usize) -> Option<usize> {
        self.runs
            .partition_point(|run| run.start <= offset)
            .checked_sub(1)
    }

    /// Returns the run covering `offset`.
    pub fn run_at(&self, offset: usize) -> Option<StyledRun<'_, B>> {
        self.get(self.run_index_at(offset)?)
    }
}
