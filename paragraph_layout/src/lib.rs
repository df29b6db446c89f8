// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph layout over UTF-16 text.
//!
//! A [`Paragraph`] holds code units partitioned into style runs, optional
//! inline placeholders and a [`ParagraphStyle`]. Laying it out at a width
//! breaks it into lines, reorders each line for bidirectional text, shapes
//! the runs through a [`FontCollection`] and positions every grapheme. The
//! result can be painted onto a [`Canvas`] and queried for selection boxes,
//! caret positions and word boundaries.
//!
//! ```ignore
//! let mut builder = ParagraphBuilder::<Color>::new(ParagraphStyle::default(), fonts);
//! builder.push_style(style);
//! builder.add_text("Hello world");
//! let mut paragraph = builder.build();
//! paragraph.layout(200.0)?;
//! paragraph.paint(&mut canvas, 0.0, 0.0);
//! ```

mod analysis;
mod bidi;
mod builder;
mod error;
mod inline_placeholder;
mod line_break;
mod lru_cache;
mod shape;

pub mod font;
pub mod layout;
pub mod style;

#[cfg(test)]
mod tests;

pub use analysis::{OBJECT_REPLACEMENT_CHAR, REPLACEMENT_CHAR};
pub use builder::ParagraphBuilder;
pub use error::LayoutError;
pub use font::{CachedFontCollection, FontCollection};
pub use inline_placeholder::{PlaceholderAlignment, PlaceholderRun, TextBaseline};
pub use layout::{Canvas, Paragraph};
pub use line_break::LineRange;
pub use style::{ParagraphStyle, TextStyle};
