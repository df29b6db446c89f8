// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ParagraphStyle;
use crate::layout::{Affinity, PositionWithAffinity, Rect, RectHeightStyle, RectWidthStyle};
use crate::style::{TextAlign, TextDirection};

use super::utils::TestEnv;

fn vertical(boxes: &[crate::layout::TextBox]) -> Vec<(f32, f32)> {
    boxes.iter().map(|b| (b.rect.top, b.rect.bottom)).collect()
}

#[test]
fn rects_for_whole_lines() {
    let env = TestEnv::new();
    let paragraph = env.layout("hello world", env.paragraph_style(), 60.0);

    let boxes = paragraph.rects_for_range(0..11, RectHeightStyle::Tight, RectWidthStyle::Tight);
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].rect, Rect::new(0.0, 0.0, 60.0, 10.0));
    assert_eq!(boxes[1].rect, Rect::new(0.0, 10.0, 50.0, 20.0));
    assert_eq!(boxes[0].direction, TextDirection::Ltr);
}

#[test]
fn rects_for_partial_runs() {
    let env = TestEnv::new();
    let paragraph = env.layout("hello world", env.paragraph_style(), 60.0);

    let boxes = paragraph.rects_for_range(2..8, RectHeightStyle::Tight, RectWidthStyle::Tight);
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].rect, Rect::new(20.0, 0.0, 60.0, 10.0));
    assert_eq!(boxes[1].rect, Rect::new(0.0, 10.0, 20.0, 20.0));

    assert!(paragraph
        .rects_for_range(4..4, RectHeightStyle::Tight, RectWidthStyle::Tight)
        .is_empty());
    assert!(paragraph
        .rects_for_range(20..30, RectHeightStyle::Tight, RectWidthStyle::Tight)
        .is_empty());
}

#[test]
fn rects_are_ordered_by_line() {
    let env = TestEnv::new();
    let text = "one two three four five six seven";
    let paragraph = env.layout(text, env.paragraph_style(), 70.0);
    let boxes =
        paragraph.rects_for_range(0..text.len(), RectHeightStyle::Max, RectWidthStyle::Tight);
    assert_eq!(boxes.len(), paragraph.line_count());
    for pair in boxes.windows(2) {
        assert!(pair[0].rect.top < pair[1].rect.top, "{pair:?}");
    }
}

#[test]
fn max_width_extends_inner_lines() {
    let env = TestEnv::new();
    // Lines: "aaaa ", "b ", "cccc".
    let paragraph = env.layout("aaaa b cccc", env.paragraph_style(), 45.0);
    assert_eq!(paragraph.line_count(), 3);

    let boxes = paragraph.rects_for_range(2..9, RectHeightStyle::Tight, RectWidthStyle::Max);
    assert_eq!(boxes.len(), 4);
    assert_eq!(boxes[0].rect, Rect::new(20.0, 0.0, 50.0, 10.0));
    assert_eq!(boxes[1].rect, Rect::new(0.0, 10.0, 20.0, 20.0));
    assert_eq!(boxes[2].rect, Rect::new(20.0, 10.0, 50.0, 20.0), "filler up to the widest line");
    assert_eq!(boxes[2].direction, TextDirection::Ltr);
    assert_eq!(boxes[3].rect, Rect::new(0.0, 20.0, 20.0, 30.0), "last line is never extended");

    let tight = paragraph.rects_for_range(2..9, RectHeightStyle::Tight, RectWidthStyle::Tight);
    assert_eq!(tight.len(), 3);
}

#[test]
fn height_styles() {
    let env = TestEnv::new();
    let style = ParagraphStyle {
        height: 2.0,
        ..env.paragraph_style()
    };
    let paragraph = env.layout("hello world", style, 60.0);
    assert_eq!(paragraph.line_heights(), &[20.0, 40.0]);
    assert_eq!(paragraph.line_baselines(), &[16.0, 36.0]);

    let rects = |height| paragraph.rects_for_range(0..11, height, RectWidthStyle::Tight);
    assert_eq!(vertical(&rects(RectHeightStyle::Tight)), [(8.0, 18.0), (28.0, 38.0)]);
    assert_eq!(vertical(&rects(RectHeightStyle::Max)), [(8.0, 20.0), (28.0, 40.0)]);
    assert_eq!(
        vertical(&rects(RectHeightStyle::IncludeLineSpacingMiddle)),
        [(8.0, 24.0), (24.0, 40.0)]
    );
    assert_eq!(
        vertical(&rects(RectHeightStyle::IncludeLineSpacingTop)),
        [(8.0, 20.0), (20.0, 40.0)]
    );
    assert_eq!(
        vertical(&rects(RectHeightStyle::IncludeLineSpacingBottom)),
        [(8.0, 28.0), (28.0, 40.0)]
    );
    assert_eq!(
        vertical(&rects(RectHeightStyle::Strut)),
        vertical(&rects(RectHeightStyle::Tight)),
        "no strut falls back to tight boxes"
    );
}

#[test]
fn newline_boxes() {
    let env = TestEnv::new();
    let paragraph = env.layout("ab\n\ncd", env.paragraph_style(), 100.0);

    let boxes = paragraph.rects_for_range(0..6, RectHeightStyle::Tight, RectWidthStyle::Tight);
    assert_eq!(boxes.len(), 3);
    assert_eq!(boxes[1].rect, Rect::new(0.0, 10.0, 0.0, 20.0), "zero width box for the empty line");

    let centered = ParagraphStyle {
        text_align: TextAlign::Center,
        ..env.paragraph_style()
    };
    let paragraph = env.layout("ab\n\ncd", centered, 100.0);
    let boxes = paragraph.rects_for_range(0..6, RectHeightStyle::Tight, RectWidthStyle::Tight);
    assert_eq!(boxes[1].rect, Rect::new(50.0, 10.0, 50.0, 20.0));
}

#[test]
fn combining_sequences_are_selected_whole() {
    let env = TestEnv::new();
    let paragraph = env.layout("e\u{301}x", env.paragraph_style(), 100.0);
    let boxes = paragraph.rects_for_range(1..2, RectHeightStyle::Tight, RectWidthStyle::Tight);
    assert_eq!(boxes.len(), 1);
    assert_eq!((boxes[0].rect.left, boxes[0].rect.right), (0.0, 10.0));
}

#[test]
fn hit_testing() {
    let env = TestEnv::new();
    let paragraph = env.layout("hello world", env.paragraph_style(), 60.0);
    let at = |x, y| paragraph.glyph_position_at_coordinate(x, y);

    assert_eq!(at(12.0, 5.0), PositionWithAffinity::new(1, Affinity::Downstream));
    assert_eq!(at(18.0, 5.0), PositionWithAffinity::new(2, Affinity::Upstream));
    assert_eq!(at(-5.0, -5.0), PositionWithAffinity::new(0, Affinity::Downstream));
    assert_eq!(at(3.0, 15.0), PositionWithAffinity::new(6, Affinity::Downstream));
    assert_eq!(at(500.0, 15.0), PositionWithAffinity::new(11, Affinity::Upstream));
    assert_eq!(
        at(500.0, 500.0),
        PositionWithAffinity::new(11, Affinity::Upstream),
        "below the text is the last line"
    );
}

#[test]
fn hit_testing_empty_lines() {
    let env = TestEnv::new();
    let paragraph = env.layout("ab\n\ncd", env.paragraph_style(), 100.0);
    assert_eq!(
        paragraph.glyph_position_at_coordinate(40.0, 15.0),
        PositionWithAffinity::new(3, Affinity::Downstream)
    );
}

#[test]
fn word_boundaries() {
    let env = TestEnv::new();
    let paragraph = env.layout("hello world", env.paragraph_style(), 100.0);

    assert_eq!(paragraph.word_boundary(1), 0..5);
    assert_eq!(paragraph.word_boundary(0), 0..5);
    assert_eq!(paragraph.word_boundary(5), 5..6);
    assert_eq!(paragraph.word_boundary(7), 6..11);
    assert_eq!(paragraph.word_boundary(11), 11..11);
    assert_eq!(paragraph.word_boundary(20), 20..20);

    let empty = env.layout("", env.paragraph_style(), 100.0);
    assert_eq!(empty.word_boundary(0), 0..0);
}
