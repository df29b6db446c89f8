// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::layout::Paragraph;
use crate::style::{ParagraphStyle, TextStyle};
use crate::{FontCollection, ParagraphBuilder};

use super::{ColorBrush, TestFonts};

/// Font size used by the helpers; each code unit is this many pixels wide.
pub(crate) const FONT_SIZE: f32 = 10.0;

pub(crate) struct TestEnv {
    fonts: Arc<dyn FontCollection>,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::with_fonts(Arc::new(TestFonts::new()))
    }

    pub(crate) fn with_fonts(fonts: Arc<dyn FontCollection>) -> Self {
        Self { fonts }
    }

    /// A paragraph style whose default text uses the `Test` family at
    /// [`FONT_SIZE`].
    pub(crate) fn paragraph_style(&self) -> ParagraphStyle {
        ParagraphStyle {
            font_families: vec!["Test".to_string()],
            font_size: FONT_SIZE,
            ..ParagraphStyle::default()
        }
    }

    pub(crate) fn text_style(&self) -> TextStyle<ColorBrush> {
        TextStyle {
            font_families: vec!["Test".to_string()],
            font_size: FONT_SIZE,
            ..TextStyle::default()
        }
    }

    pub(crate) fn builder(&self, style: ParagraphStyle) -> ParagraphBuilder<ColorBrush> {
        ParagraphBuilder::new(style, Arc::clone(&self.fonts))
    }

    /// Builds `text` with `style` and lays it out at `width`.
    pub(crate) fn layout(
        &self,
        text: &str,
        style: ParagraphStyle,
        width: f64,
    ) -> Paragraph<ColorBrush> {
        let mut builder = self.builder(style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(width).unwrap();
        paragraph
    }
}
