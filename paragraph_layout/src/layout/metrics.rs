// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical metrics: strut, placeholder extents and per-line ascent/descent.

use crate::font::{FontCollection, FontMetrics};
use crate::inline_placeholder::{PlaceholderAlignment, PlaceholderRun, TextBaseline};
use crate::style::{Brush, ParagraphStyle, TextStyle};

/// Line metrics imposed by the paragraph's strut.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct StrutMetrics {
    /// Ascent, positive upwards.
    pub ascent: f64,
    /// Descent, positive downwards.
    pub descent: f64,
    /// Leading in total.
    pub leading: f64,
    /// Half of `leading`, added above and below the line.
    pub half_leading: f64,
    /// `ascent + descent + leading`.
    pub line_height: f64,
    /// Every line uses exactly these metrics.
    pub force_strut: bool,
}

/// Returns `true` if the paragraph style describes a usable strut.
pub(crate) fn is_strut_valid(style: &ParagraphStyle) -> bool {
    style.strut_enabled && style.strut_font_size >= 0.0
}

/// Measures the strut described by `style`.
///
/// A strut whose fonts cannot be resolved has zero metrics, which still
/// pins every line to zero extra height when forced.
pub(crate) fn compute_strut(
    style: &ParagraphStyle,
    collection: &dyn FontCollection,
) -> StrutMetrics {
    let mut strut = StrutMetrics::default();
    if !is_strut_valid(style) {
        return strut;
    }
    strut.force_strut = style.force_strut_height;
    let typeface = collection
        .resolve(&style.strut_font_families, None)
        .and_then(|set| {
            collection.base_typeface(set, style.strut_font_weight, style.strut_font_style)
        });
    let Some(typeface) = typeface else {
        log::debug!(
            "strut families {:?} did not resolve, using zero strut",
            style.strut_font_families
        );
        return strut;
    };
    let metrics = collection.metrics(typeface, style.strut_font_size);
    let ascent = f64::from(metrics.ascent);
    let descent = f64::from(metrics.descent);
    strut.ascent = style.strut_height * -ascent;
    strut.descent = style.strut_height * descent;
    strut.leading = if style.strut_leading < 0.0 {
        f64::from(metrics.leading)
    } else {
        style.strut_leading * (descent - ascent)
    };
    strut.half_leading = strut.leading / 2.0;
    strut.line_height = strut.ascent + strut.descent + strut.leading;
    strut
}

/// Converts the text ascent and descent of a line position into the extent
/// of a placeholder box placed there. Returns the box's `(ascent, descent)`.
pub(crate) fn placeholder_extent(
    placeholder: &PlaceholderRun,
    ascent: f64,
    descent: f64,
) -> (f64, f64) {
    let adjustment = match placeholder.baseline {
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Ideographic => -descent / 2.0,
    };
    let height = placeholder.height;
    match placeholder.alignment {
        PlaceholderAlignment::Baseline => (
            adjustment + placeholder.baseline_offset,
            -adjustment + height - placeholder.baseline_offset,
        ),
        PlaceholderAlignment::AboveBaseline => (adjustment + height, -adjustment),
        PlaceholderAlignment::BelowBaseline => (-adjustment, adjustment + height),
        PlaceholderAlignment::Top => (ascent, height - ascent),
        PlaceholderAlignment::Bottom => (height - descent, descent),
        PlaceholderAlignment::Middle => {
            let mid = (ascent - descent) / 2.0;
            (mid + height / 2.0, -mid + height / 2.0)
        }
    }
}

/// Running maximum of the ascents and descents on one line.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LineExtent {
    pub max_ascent: f64,
    pub max_descent: f64,
    /// Largest unscaled ascent, or resolved placeholder baseline offset.
    pub max_unscaled_ascent: f64,
    force_strut: bool,
}

impl LineExtent {
    pub(crate) fn new(strut: &StrutMetrics) -> Self {
        Self {
            max_ascent: strut.ascent + strut.half_leading,
            max_descent: strut.descent + strut.half_leading,
            max_unscaled_ascent: 0.0,
            force_strut: strut.force_strut,
        }
    }

    /// Folds in one run's metrics. For a placeholder run, returns the
    /// resolved distance from the top of the box to the line baseline.
    pub(crate) fn add<B: Brush>(
        &mut self,
        metrics: &FontMetrics,
        style: &TextStyle<B>,
        placeholder: Option<&PlaceholderRun>,
    ) -> Option<f64> {
        let mut resolved = placeholder.map(|p| p.baseline_offset);
        if !self.force_strut {
            let leading = f64::from(metrics.leading) / 2.0;
            let mut ascent = (-f64::from(metrics.ascent) + leading) * style.height;
            let mut descent = (f64::from(metrics.descent) + leading) * style.height;
            if let Some(placeholder) = placeholder {
                (ascent, descent) = placeholder_extent(placeholder, ascent, descent);
                resolved = Some(ascent);
            }
            self.max_ascent = self.max_ascent.max(ascent);
            self.max_descent = self.max_descent.max(descent);
        }
        let unscaled = resolved.unwrap_or(-f64::from(metrics.ascent));
        self.max_unscaled_ascent = self.max_unscaled_ascent.max(unscaled);
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholder(alignment: PlaceholderAlignment, baseline: TextBaseline) -> PlaceholderRun {
        PlaceholderRun::new(50.0, 20.0, alignment, baseline, 15.0)
    }

    #[test]
    fn placeholder_extents() {
        let (a, d) = (10.0, 4.0);
        let cases = [
            (PlaceholderAlignment::Baseline, (15.0, 5.0)),
            (PlaceholderAlignment::AboveBaseline, (20.0, 0.0)),
            (PlaceholderAlignment::BelowBaseline, (0.0, 20.0)),
            (PlaceholderAlignment::Top, (10.0, 10.0)),
            (PlaceholderAlignment::Bottom, (16.0, 4.0)),
            (PlaceholderAlignment::Middle, (13.0, 7.0)),
        ];
        for (alignment, expected) in cases {
            let got = placeholder_extent(&placeholder(alignment, TextBaseline::Alphabetic), a, d);
            assert_eq!(got, expected, "{alignment:?}");
        }
        let ideographic = placeholder(PlaceholderAlignment::Baseline, TextBaseline::Ideographic);
        let ideographic = placeholder_extent(&ideographic, a, d);
        assert_eq!(ideographic, (13.0, 7.0));
    }

    #[test]
    fn forced_strut_ignores_runs() {
        let strut = StrutMetrics {
            ascent: 8.0,
            descent: 2.0,
            leading: 2.0,
            half_leading: 1.0,
            line_height: 12.0,
            force_strut: true,
        };
        let mut extent = LineExtent::new(&strut);
        let metrics = FontMetrics {
            ascent: -30.0,
            descent: 10.0,
            ..FontMetrics::default()
        };
        extent.add(&metrics, &TextStyle::<[u8; 4]>::default(), None);
        assert_eq!((extent.max_ascent, extent.max_descent), (9.0, 3.0));
        assert_eq!(extent.max_unscaled_ascent, 30.0);
    }
}
