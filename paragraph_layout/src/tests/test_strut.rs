// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ParagraphStyle;
use crate::layout::{RectHeightStyle, RectWidthStyle, StrutMetrics};

use super::utils::TestEnv;

fn strut(env: &TestEnv, size: f32, leading: f64, force: bool) -> ParagraphStyle {
    ParagraphStyle {
        strut_enabled: true,
        strut_font_families: vec!["Test".to_string()],
        strut_font_size: size,
        strut_leading: leading,
        force_strut_height: force,
        ..env.paragraph_style()
    }
}

#[test]
fn strut_raises_short_lines() {
    let env = TestEnv::new();
    let paragraph = env.layout("ab\ncd", strut(&env, 20.0, -1.0, false), 100.0);

    assert_eq!(
        *paragraph.strut_metrics(),
        StrutMetrics {
            ascent: 16.0,
            descent: 4.0,
            leading: 0.0,
            half_leading: 0.0,
            line_height: 20.0,
            force_strut: false,
        }
    );
    assert_eq!(paragraph.line_heights(), &[20.0, 40.0]);
    assert_eq!(paragraph.line_baselines(), &[16.0, 36.0]);
}

#[test]
fn strut_leading_is_split_around_the_line() {
    let env = TestEnv::new();
    let paragraph = env.layout("ab", strut(&env, 20.0, 0.5, false), 100.0);

    assert_eq!(paragraph.strut_metrics().leading, 10.0);
    assert_eq!(paragraph.strut_metrics().line_height, 30.0);
    assert_eq!(paragraph.line_heights(), &[30.0]);
    assert_eq!(paragraph.line_baselines(), &[21.0]);
}

#[test]
fn taller_text_beats_an_unforced_strut() {
    let env = TestEnv::new();
    let style = ParagraphStyle {
        font_size: 40.0,
        ..strut(&env, 20.0, -1.0, false)
    };
    let paragraph = env.layout("ab", style, 1000.0);
    assert_eq!(paragraph.line_heights(), &[40.0]);
}

#[test]
fn forced_strut_pins_every_line() {
    let env = TestEnv::new();
    let style = ParagraphStyle {
        font_size: 40.0,
        ..strut(&env, 20.0, -1.0, true)
    };
    let paragraph = env.layout("ab\ncd", style, 1000.0);
    assert_eq!(paragraph.line_heights(), &[20.0, 40.0]);
    assert_eq!(paragraph.line_baselines(), &[16.0, 36.0]);
}

#[test]
fn strut_rect_height_style() {
    let env = TestEnv::new();
    let paragraph = env.layout("ab", strut(&env, 20.0, -1.0, false), 100.0);
    let boxes = paragraph.rects_for_range(0..2, RectHeightStyle::Strut, RectWidthStyle::Tight);
    assert_eq!((boxes[0].rect.top, boxes[0].rect.bottom), (0.0, 20.0));
    let tight = paragraph.rects_for_range(0..2, RectHeightStyle::Tight, RectWidthStyle::Tight);
    assert_eq!((tight[0].rect.top, tight[0].rect.bottom), (8.0, 18.0));
}

#[test]
fn disabled_or_negative_strut_is_ignored() {
    let env = TestEnv::new();
    let negative = ParagraphStyle {
        strut_font_size: -1.0,
        ..strut(&env, 20.0, -1.0, true)
    };
    let paragraph = env.layout("ab", negative, 100.0);
    assert_eq!(*paragraph.strut_metrics(), StrutMetrics::default());
    assert_eq!(paragraph.line_heights(), &[10.0]);
}

#[test]
fn forced_strut_with_missing_fonts_collapses_lines() {
    let env = TestEnv::new();
    let style = ParagraphStyle {
        strut_font_families: vec!["Missing".to_string()],
        ..strut(&env, 20.0, -1.0, true)
    };
    let paragraph = env.layout("ab", style, 100.0);
    assert!(paragraph.strut_metrics().force_strut);
    assert_eq!(paragraph.strut_metrics().line_height, 0.0);
    assert_eq!(paragraph.line_heights(), &[0.0]);
}
