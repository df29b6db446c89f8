// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking.
//!
//! The text is first cut into blocks at hard breaks. Each block is measured
//! run by run (placeholders contribute their own width instead of a shaped
//! one) and then broken at the opportunities found by the ICU line segmenter.
//! Words that cannot fit on a line on their own may additionally be broken at
//! grapheme boundaries.

use hashbrown::HashMap;
use icu_segmenter::options::LineBreakOptions;
use icu_segmenter::{GraphemeClusterSegmenter, LineSegmenter};

use crate::analysis::{is_hard_break, is_line_end_space};
use crate::error::LayoutError;
use crate::inline_placeholder::PlaceholderRun;
use crate::shape::{FontSets, shape_run};
use crate::style::{BreakStrategy, Brush, StyledRuns};

/// The code unit extent of one line of a laid out paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct LineRange {
    /// First code unit of the line.
    pub start: usize,
    /// End of the line's content, before any hard break character.
    pub end: usize,
    /// End of the line's content without trailing whitespace.
    pub end_excluding_whitespace: usize,
    /// End of the line including its hard break character, which is the
    /// start of the next line.
    pub end_including_newline: usize,
    /// The line ends a block: it is followed by a hard break or the end of
    /// the text.
    pub hard_break: bool,
}

/// Lines and widths computed by [`break_lines`].
#[derive(Clone, Default, Debug)]
pub(crate) struct LineBreaks {
    pub lines: Vec<LineRange>,
    /// Width of each line's visible content, trailing spaces excluded.
    pub widths: Vec<f64>,
    /// Width of the widest block laid out on a single line.
    pub max_intrinsic_width: f64,
}

/// Inputs of [`break_lines`].
pub(crate) struct BreakInput<'a, B: Brush> {
    pub text: &'a [u16],
    pub styled_runs: &'a StyledRuns<B>,
    pub placeholders: &'a [PlaceholderRun],
    /// Placeholder index of each code unit standing for a placeholder.
    pub placeholder_slots: &'a HashMap<usize, usize>,
    pub is_rtl: bool,
    pub strategy: BreakStrategy,
    pub justify: bool,
}

/// Breaks the text into lines no wider than `max_width`.
pub(crate) fn break_lines<B: Brush>(
    fonts: &mut FontSets<'_>,
    input: &BreakInput<'_, B>,
    max_width: f64,
) -> Result<LineBreaks, LayoutError> {
    let text = input.text;
    let mut hard_breaks: Vec<usize> = (0..text.len())
        .filter(|&i| is_hard_break(u32::from(text[i])))
        .collect();
    hard_breaks.push(text.len());

    let mut result = LineBreaks::default();
    let mut block_start = 0;
    for &block_end in &hard_breaks {
        let start = block_start;
        block_start = block_end + 1;
        if start == block_end {
            result.lines.push(LineRange {
                start,
                end: block_end,
                end_excluding_whitespace: block_end,
                end_including_newline: (block_end + 1).min(text.len()),
                hard_break: true,
            });
            result.widths.push(0.0);
            continue;
        }

        let advances = measure_block(fonts, input, start, block_end)?;
        let block_width: f64 = advances.iter().map(|&a| f64::from(a)).sum();
        result.max_intrinsic_width = result.max_intrinsic_width.max(block_width);

        let block = Block::new(&text[start..block_end], &advances);
        let breaks = match input.strategy {
            BreakStrategy::Greedy => block.greedy(max_width),
            BreakStrategy::HighQuality => block.optimal(max_width, true),
            BreakStrategy::Balanced => block.optimal(max_width, input.justify),
        };

        let mut line_start = 0;
        for (i, &line_end) in breaks.iter().enumerate() {
            let hard_break = i == breaks.len() - 1;
            let end = start + line_end;
            let end_including_newline = if hard_break && end < text.len() {
                end + 1
            } else {
                end
            };
            result.lines.push(LineRange {
                start: start + line_start,
                end,
                end_excluding_whitespace: start + block.visible_end(line_start, line_end),
                end_including_newline,
                hard_break,
            });
            result.widths.push(block.width(line_start, line_end));
            line_start = line_end;
        }
    }
    Ok(result)
}

/// Per code unit advances of `text[start..end]`.
fn measure_block<B: Brush>(
    fonts: &mut FontSets<'_>,
    input: &BreakInput<'_, B>,
    start: usize,
    end: usize,
) -> Result<Vec<f32>, LayoutError> {
    let mut advances = vec![0.0; end - start];
    for run in input.styled_runs.iter() {
        let run_start = run.start.max(start);
        let run_end = run.end.min(end);
        if run_start >= run_end {
            continue;
        }
        let placeholder = input
            .placeholder_slots
            .get(&run.start)
            .and_then(|&slot| input.placeholders.get(slot));
        if let Some(placeholder) = placeholder {
            advances[run_start - start] = placeholder.width as f32;
            continue;
        }
        let shaped = shape_run(fonts, run.style, &input.text[run_start..run_end], input.is_rtl)?;
        advances[run_start - start..run_end - start].copy_from_slice(&shaped.char_advances);
    }
    Ok(advances)
}

const LINE_PENALTY: f64 = 1.0;
const DESPERATE_PENALTY: f64 = 1.0e6;
const OVERFLOW_PENALTY: f64 = 1.0e12;

#[derive(Copy, Clone, Debug)]
struct Candidate {
    offset: usize,
    desperate: bool,
}

/// A block of text between hard breaks, with its break candidates.
struct Block<'a> {
    text: &'a [u16],
    /// `prefix[i]` is the advance of `text[..i]`.
    prefix: Vec<f64>,
    /// Regular break opportunities, ending with the block length.
    breaks: Vec<usize>,
    /// Grapheme boundaries, for breaking inside overlong words.
    graphemes: Vec<usize>,
}

impl<'a> Block<'a> {
    fn new(text: &'a [u16], advances: &[f32]) -> Self {
        let mut prefix = Vec::with_capacity(advances.len() + 1);
        let mut sum = 0.0;
        prefix.push(sum);
        for &advance in advances {
            sum += f64::from(advance);
            prefix.push(sum);
        }
        let mut breaks: Vec<usize> = LineSegmenter::new_auto(LineBreakOptions::default())
            .segment_utf16(text)
            .filter(|&offset| offset > 0 && offset <= text.len())
            .collect();
        if breaks.last() != Some(&text.len()) {
            breaks.push(text.len());
        }
        let graphemes = GraphemeClusterSegmenter::new()
            .segment_utf16(text)
            .filter(|&offset| offset > 0 && offset <= text.len())
            .collect();
        Self {
            text,
            prefix,
            breaks,
            graphemes,
        }
    }

    /// End of `start..end` with trailing line end spaces removed.
    fn visible_end(&self, start: usize, end: usize) -> usize {
        let mut visible = end;
        while visible > start && is_line_end_space(self.text[visible - 1]) {
            visible -= 1;
        }
        visible
    }

    /// Width of the visible content of `start..end`.
    fn width(&self, start: usize, end: usize) -> f64 {
        self.prefix[self.visible_end(start, end)] - self.prefix[start]
    }

    /// Grapheme boundaries strictly inside `start..end`.
    fn graphemes_within(&self, start: usize, end: usize) -> impl Iterator<Item = usize> + '_ {
        self.graphemes
            .iter()
            .copied()
            .filter(move |&g| g > start && g < end)
    }

    /// Takes the furthest fitting opportunity for each line.
    fn greedy(&self, max_width: f64) -> Vec<usize> {
        let mut result = Vec::new();
        let mut start = 0;
        while start < self.text.len() {
            let mut next = self.breaks.partition_point(|&b| b <= start);
            let mut chosen = None;
            while let Some(&b) = self.breaks.get(next) {
                if self.width(start, b) > max_width {
                    break;
                }
                chosen = Some(b);
                next += 1;
            }
            let end = match chosen {
                Some(b) => b,
                None => {
                    // The first word alone overflows: break it where it fits,
                    // keeping at least one grapheme on the line.
                    let word_end = self.breaks.get(next).copied().unwrap_or(self.text.len());
                    let mut end = word_end;
                    for g in self.graphemes_within(start, word_end) {
                        if end == word_end || self.width(start, g) <= max_width {
                            end = g;
                        } else {
                            break;
                        }
                    }
                    if end != word_end && self.width(start, end) > max_width {
                        end = self.graphemes_within(start, word_end).next().unwrap_or(word_end);
                    }
                    end
                }
            };
            result.push(end);
            start = end;
        }
        if result.is_empty() {
            result.push(self.text.len());
        }
        result
    }

    /// Minimizes the sum of squared slack over the block.
    ///
    /// When `loose_last_line` is set the final line's slack is free.
    fn optimal(&self, max_width: f64, loose_last_line: bool) -> Vec<usize> {
        let mut candidates = vec![Candidate {
            offset: 0,
            desperate: false,
        }];
        let mut previous = 0;
        for &b in &self.breaks {
            if self.width(previous, b) > max_width {
                for g in self.graphemes_within(previous, b) {
                    candidates.push(Candidate {
                        offset: g,
                        desperate: true,
                    });
                }
            }
            candidates.push(Candidate {
                offset: b,
                desperate: false,
            });
            previous = b;
        }

        let len = self.text.len();
        let mut cost = vec![f64::INFINITY; candidates.len()];
        let mut from = vec![0; candidates.len()];
        cost[0] = 0.0;
        for j in 1..candidates.len() {
            let end = candidates[j].offset;
            let is_last = end == len;
            for i in (0..j).rev() {
                if cost[i].is_infinite() {
                    continue;
                }
                let start = candidates[i].offset;
                let width = self.width(start, end);
                let line_cost = if width > max_width {
                    if i + 1 != j {
                        break;
                    }
                    OVERFLOW_PENALTY
                } else if is_last && loose_last_line {
                    0.0
                } else {
                    let slack = if max_width.is_finite() {
                        max_width - width
                    } else {
                        0.0
                    };
                    slack * slack
                };
                let penalty = if candidates[j].desperate {
                    DESPERATE_PENALTY
                } else {
                    0.0
                };
                let total = cost[i] + line_cost + LINE_PENALTY + penalty;
                if total < cost[j] {
                    cost[j] = total;
                    from[j] = i;
                }
            }
        }

        let mut result = Vec::new();
        let mut j = candidates.len() - 1;
        while j > 0 {
            result.push(candidates[j].offset);
            j = from[j];
        }
        result.reverse();
        if result.is_empty() {
            result.push(len);
        }
        result
    }
}
