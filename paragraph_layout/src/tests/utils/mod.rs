// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod canvas;
mod env;
mod fonts;

pub(crate) use canvas::{ColorBrush, DrawOp, RecordingCanvas};
pub(crate) use env::TestEnv;
pub(crate) use fonts::{EMOJI_TYPEFACE, TestFonts};
