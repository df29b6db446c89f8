// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{OBJECT_REPLACEMENT_CHAR, PlaceholderRun, TextStyle};

use super::utils::{ColorBrush, TestEnv};

fn sized(env: &TestEnv, font_size: f32) -> TextStyle<ColorBrush> {
    TextStyle {
        font_size,
        ..env.text_style()
    }
}

#[test]
fn style_stack_produces_runs() {
    let env = TestEnv::new();
    let mut builder = env.builder(env.paragraph_style());
    builder.add_text("ab");
    builder.push_style(sized(&env, 20.0));
    builder.add_text("cd");
    builder.push_style(sized(&env, 30.0));
    assert_eq!(builder.peek_style().font_size, 30.0);
    builder.add_text("e");
    builder.pop();
    assert_eq!(builder.peek_style().font_size, 20.0);
    builder.pop();
    builder.add_text("f");
    let paragraph = builder.build();

    let runs: Vec<_> = paragraph
        .styled_runs()
        .iter()
        .map(|run| (run.start, run.end, run.style.font_size))
        .collect();
    assert_eq!(runs, [(0, 2, 10.0), (2, 4, 20.0), (4, 5, 30.0), (5, 6, 10.0)]);
}

#[test]
fn popping_the_base_style_does_nothing() {
    let env = TestEnv::new();
    let mut builder = env.builder(env.paragraph_style());
    builder.pop();
    builder.pop();
    assert_eq!(builder.peek_style().font_size, 10.0);
    builder.add_text("abc");
    let paragraph = builder.build();
    assert_eq!(paragraph.styled_runs().len(), 1);
}

#[test]
fn styles_without_text_leave_no_runs() {
    let env = TestEnv::new();
    let mut builder = env.builder(env.paragraph_style());
    builder.push_style(sized(&env, 20.0));
    builder.pop();
    builder.push_style(sized(&env, 30.0));
    builder.add_text("ab");
    let paragraph = builder.build();

    let run = paragraph.styled_runs().get(0).unwrap();
    assert_eq!(paragraph.styled_runs().len(), 1);
    assert_eq!((run.start, run.end, run.style.font_size), (0, 2, 30.0));
}

#[test]
fn placeholders_get_their_own_run() {
    let env = TestEnv::new();
    let mut builder = env.builder(env.paragraph_style());
    builder.add_text("a");
    builder.add_placeholder(PlaceholderRun::default());
    builder.add_text_utf16(&[u16::from(b'b')]);
    let paragraph = builder.build();

    assert_eq!(paragraph.text(), &[u16::from(b'a'), OBJECT_REPLACEMENT_CHAR, u16::from(b'b')]);
    assert_eq!(paragraph.placeholders().len(), 1);
    let spans: Vec<_> = paragraph.styled_runs().iter().map(|run| (run.start, run.end)).collect();
    assert_eq!(spans, [(0, 1), (1, 2), (2, 3)]);
}

#[test]
fn build_resets_the_builder() {
    let env = TestEnv::new();
    let mut builder = env.builder(env.paragraph_style());
    builder.push_style(sized(&env, 20.0));
    builder.add_text("first");
    builder.add_placeholder(PlaceholderRun::default());
    let first = builder.build();
    assert_eq!(first.text_size(), 6);
    assert_eq!(builder.text_len(), 0);
    assert_eq!(builder.peek_style().font_size, 10.0, "the style stack is cleared");

    builder.add_text("second");
    let mut second = builder.build();
    assert_eq!(second.text_size(), 6);
    assert!(second.placeholders().is_empty());
    assert_eq!(second.styled_runs().len(), 1);
    second.layout(100.0).unwrap();
    assert_eq!(second.longest_line(), 60.0);
}

#[test]
fn utf8_text_is_converted() {
    let env = TestEnv::new();
    let mut builder = env.builder(env.paragraph_style());
    builder.add_text("h\u{e9}\u{1F600}");
    assert_eq!(builder.text_len(), 4, "the emoji takes two code units");
}
