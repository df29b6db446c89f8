// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental construction of a [`Paragraph`].

use std::sync::Arc;

use hashbrown::HashSet;

use crate::analysis::OBJECT_REPLACEMENT_CHAR;
use crate::font::FontCollection;
use crate::inline_placeholder::PlaceholderRun;
use crate::layout::Paragraph;
use crate::style::{Brush, ParagraphStyle, StyledRuns, TextStyle};

/// Builder for a [`Paragraph`] made of styled text and inline placeholders.
///
/// Text styles form a stack whose base is the paragraph style's default
/// text style. Text added is styled with the top of the stack.
pub struct ParagraphBuilder<B: Brush> {
    text: Vec<u16>,
    styled_runs: StyledRuns<B>,
    style_stack: Vec<usize>,
    paragraph_style: ParagraphStyle,
    paragraph_style_index: usize,
    font_collection: Arc<dyn FontCollection>,
    placeholders: Vec<PlaceholderRun>,
    placeholder_indices: HashSet<usize>,
}

impl<B: Brush> ParagraphBuilder<B> {
    /// Creates a builder for paragraphs with `style`, shaped with `font_collection`.
    pub fn new(style: ParagraphStyle, font_collection: Arc<dyn FontCollection>) -> Self {
        let mut builder = Self {
            text: Vec::new(),
            styled_runs: StyledRuns::new(),
            style_stack: Vec::new(),
            paragraph_style: ParagraphStyle::default(),
            paragraph_style_index: 0,
            font_collection,
            placeholders: Vec::new(),
            placeholder_indices: HashSet::new(),
        };
        builder.set_paragraph_style(style);
        builder
    }

    /// Replaces the paragraph style. Text added after this call uses its
    /// default text style until another style is pushed.
    pub fn set_paragraph_style(&mut self, style: ParagraphStyle) {
        self.paragraph_style_index = self.styled_runs.add_style(style.text_style());
        self.paragraph_style = style;
        self.styled_runs
            .start_run(self.paragraph_style_index, self.text.len());
    }

    /// Pushes a text style used for text added until the matching [`pop`](Self::pop).
    pub fn push_style(&mut self, style: TextStyle<B>) {
        let index = self.styled_runs.add_style(style);
        self.style_stack.push(index);
        self.styled_runs.start_run(index, self.text.len());
    }

    /// Pops the last pushed style. Does nothing if the stack only holds the
    /// paragraph's default style.
    pub fn pop(&mut self) {
        if self.style_stack.pop().is_none() {
            return;
        }
        self.styled_runs
            .start_run(self.peek_style_index(), self.text.len());
    }

    fn peek_style_index(&self) -> usize {
        self.style_stack
            .last()
            .copied()
            .unwrap_or(self.paragraph_style_index)
    }

    /// Returns the style applied to text added now.
    pub fn peek_style(&self) -> &TextStyle<B> {
        // Every index on the stack was returned by `add_style`.
        match self.styled_runs.style(self.peek_style_index()) {
            Some(style) => style,
            None => unreachable!("style stack refers to a missing style"),
        }
    }

    /// Appends UTF-8 text.
    pub fn add_text(&mut self, text: &str) {
        self.text.extend(text.encode_utf16());
    }

    /// Appends UTF-16 code units.
    pub fn add_text_utf16(&mut self, text: &[u16]) {
        self.text.extend_from_slice(text);
    }

    /// Appends an inline placeholder, represented in the text by a single
    /// U+FFFC in a style run of its own.
    pub fn add_placeholder(&mut self, placeholder: PlaceholderRun) {
        let style_index = self.peek_style_index();
        self.placeholder_indices.insert(self.text.len());
        self.styled_runs.start_run(style_index, self.text.len());
        self.text.push(OBJECT_REPLACEMENT_CHAR);
        self.styled_runs.start_run(style_index, self.text.len());
        self.placeholders.push(placeholder);
    }

    /// Returns the number of code units added so far.
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Builds the paragraph and resets the builder, keeping its paragraph
    /// style and font collection.
    pub fn build(&mut self) -> Paragraph<B> {
        self.styled_runs.end_run_if_needed(self.text.len());
        let mut paragraph = Paragraph::new();
        paragraph.set_text(
            core::mem::take(&mut self.text),
            core::mem::take(&mut self.styled_runs),
        );
        paragraph.set_inline_placeholders(
            core::mem::take(&mut self.placeholders),
            core::mem::take(&mut self.placeholder_indices),
        );
        paragraph.set_paragraph_style(self.paragraph_style.clone());
        paragraph.set_font_collection(Arc::clone(&self.font_collection));
        self.style_stack.clear();
        self.set_paragraph_style(self.paragraph_style.clone());
        paragraph
    }
}

impl<B: Brush> core::fmt::Debug for ParagraphBuilder<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParagraphBuilder")
            .field("text_len", &self.text.len())
            .field("style_depth", &self.style_stack.len())
            .field("placeholders", &self.placeholders.len())
            .finish_non_exhaustive()
    }
}
