// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Reasons a [`Paragraph::layout`](crate::Paragraph::layout) call can fail.
///
/// A failed layout leaves every derived table as it was before the call and
/// marks the paragraph as not laid out.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LayoutError {
    /// No font collection was set on the paragraph.
    NoFontCollection,

    /// None of the requested font families could be resolved.
    FontFamilyNotFound {
        /// The families that were requested.
        families: Vec<String>,
    },

    /// A code unit at `offset` is not covered by any style run.
    UnstyledText {
        /// The offending code unit offset.
        offset: usize,
    },
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoFontCollection => write!(f, "no font collection set"),
            Self::FontFamilyNotFound { families } => {
                write!(f, "no font found for families [{}]", families.join(", "))
            }
            Self::UnstyledText { offset } => {
                write!(f, "code unit {offset} is not covered by a style run")
            }
        }
    }
}

impl core::error::Error for LayoutError {}
