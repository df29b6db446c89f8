// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich styling support.

mod styled_runs;

pub use styled_runs::{StyledRun, StyledRuns};

/// Paint used for glyphs, backgrounds, shadows and decorations.
///
/// Layout never inspects a brush; it only copies brushes into paint records
/// and compares styles.
pub trait Brush: Clone + PartialEq + Default + core::fmt::Debug {}

impl<B> Brush for B where B: Clone + PartialEq + Default + core::fmt::Debug {}

/// Visual direction of a run of text.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
pub enum TextDirection {
    /// Right-to-left.
    Rtl,
    /// Left-to-right.
    #[default]
    Ltr,
}

impl TextDirection {
    /// Returns `true` for [`TextDirection::Rtl`].
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }
}

/// Horizontal alignment of the lines of a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum TextAlign {
    /// Align content to the left edge.
    Left,
    /// Align content to the right edge.
    Right,
    /// Center each line within the layout width.
    Center,
    /// Stretch word gaps so each line fills the layout width, except the last
    /// line of a paragraph and lines ending in a hard break.
    Justify,
    /// [`TextAlign::Left`] for LTR paragraphs and [`TextAlign::Right`] for RTL ones.
    #[default]
    Start,
    /// [`TextAlign::Right`] for LTR paragraphs and [`TextAlign::Left`] for RTL ones.
    End,
}

/// Line breaking strategy.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BreakStrategy {
    /// Fill each line as much as possible before moving to the next one.
    #[default]
    Greedy,
    /// Minimize raggedness over the whole block; the last line of a block is
    /// allowed to be short.
    HighQuality,
    /// Minimize raggedness over the whole block, including its last line.
    Balanced,
}

/// Visual weight class of a font, on a scale from 100 to 900.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct FontWeight(u16);

impl FontWeight {
    /// Weight value of 100.
    pub const THIN: Self = Self(100);
    /// Weight value of 200.
    pub const EXTRA_LIGHT: Self = Self(200);
    /// Weight value of 300.
    pub const LIGHT: Self = Self(300);
    /// Weight value of 400.
    pub const NORMAL: Self = Self(400);
    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500);
    /// Weight value of 600.
    pub const SEMI_BOLD: Self = Self(600);
    /// Weight value of 700.
    pub const BOLD: Self = Self(700);
    /// Weight value of 800.
    pub const EXTRA_BOLD: Self = Self(800);
    /// Weight value of 900.
    pub const BLACK: Self = Self(900);

    /// Creates a new weight, clamped to `100..=900` and rounded down to a multiple of 100.
    pub fn new(weight: u16) -> Self {
        Self(weight.clamp(100, 900) / 100 * 100)
    }

    /// Returns the numeric weight.
    pub fn value(self) -> u16 {
        self.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Slant of a font.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Italic glyphs.
    Italic,
}

/// An OpenType feature setting, e.g. `liga` = 0.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct FontFeature {
    /// Four byte feature tag.
    pub tag: [u8; 4],
    /// Feature value; 0 disables, 1 enables.
    pub value: u16,
}

impl FontFeature {
    /// Creates a feature setting from a tag and a value.
    pub const fn new(tag: [u8; 4], value: u16) -> Self {
        Self { tag, value }
    }
}

/// Set of lines drawn through or around text.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
pub struct TextDecoration(u8);

impl TextDecoration {
    /// No decoration.
    pub const NONE: Self = Self(0);
    /// Line below the text.
    pub const UNDERLINE: Self = Self(1);
    /// Line above the text.
    pub const OVERLINE: Self = Self(2);
    /// Line through the middle of the text.
    pub const LINE_THROUGH: Self = Self(4);

    /// Returns `true` if no decoration is set.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if all decorations in `other` are set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

impl core::ops::BitOr for TextDecoration {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Stroke style of a [`TextDecoration`].
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
pub enum TextDecorationStyle {
    /// A single solid line.
    #[default]
    Solid,
    /// Two parallel solid lines.
    Double,
    /// A dotted line.
    Dotted,
    /// A dashed line.
    Dashed,
    /// A wavy line.
    Wavy,
}

/// A shadow painted behind a run of text.
#[derive(Clone, PartialEq, Debug)]
pub struct TextShadow<B: Brush> {
    /// Brush used for the shadow glyphs.
    pub brush: B,
    /// Offset of the shadow from the glyphs.
    pub offset: (f32, f32),
    /// Blur radius; zero for a sharp shadow.
    pub blur_radius: f64,
}

impl<B: Brush> TextShadow<B> {
    /// Returns `true` if painting this shadow has a visible effect.
    pub fn has_shadow(&self) -> bool {
        self.offset != (0.0, 0.0) || self.blur_radius != 0.0
    }
}

/// Style applied to a run of text.
#[derive(Clone, PartialEq, Debug)]
pub struct TextStyle<B: Brush> {
    /// Font families in order of preference.
    pub font_families: Vec<String>,
    /// Font size in pixels.
    pub font_size: f32,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Font style.
    pub font_style: FontStyle,
    /// BCP 47 locale used for font selection and shaping.
    pub locale: Option<String>,
    /// Extra space added after every cluster, in pixels.
    pub letter_spacing: f32,
    /// Extra space added to every word space, in pixels.
    pub word_spacing: f32,
    /// Multiplier applied to the font ascent and descent when computing line heights.
    pub height: f64,
    /// Font feature settings.
    pub font_features: Vec<FontFeature>,
    /// Brush for the glyphs.
    pub brush: B,
    /// Brush for the background behind the run, if any.
    pub background: Option<B>,
    /// Decorations drawn for the run.
    pub decoration: TextDecoration,
    /// Stroke style of the decorations.
    pub decoration_style: TextDecorationStyle,
    /// Brush for the decorations; the glyph brush is used when `None`.
    pub decoration_brush: Option<B>,
    /// Multiplier applied to the decoration stroke width.
    pub decoration_thickness_multiplier: f32,
    /// Shadows painted behind the glyphs.
    pub shadows: Vec<TextShadow<B>>,
}

impl<B: Brush> Default for TextStyle<B> {
    fn default() -> Self {
        Self {
            font_families: vec![String::from("sans-serif")],
            font_size: 14.0,
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            locale: None,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            height: 1.0,
            font_features: Vec::new(),
            brush: B::default(),
            background: None,
            decoration: TextDecoration::NONE,
            decoration_style: TextDecorationStyle::default(),
            decoration_brush: None,
            decoration_thickness_multiplier: 1.0,
            shadows: Vec::new(),
        }
    }
}

/// Paragraph wide layout settings.
#[derive(Clone, PartialEq, Debug)]
pub struct ParagraphStyle {
    /// Horizontal alignment of lines.
    pub text_align: TextAlign,
    /// Base direction of the paragraph.
    pub text_direction: TextDirection,
    /// Maximum number of lines; `usize::MAX` for no limit.
    pub max_lines: usize,
    /// Text appended to the last visible line when it is truncated. Empty for none.
    pub ellipsis: String,
    /// Line breaking strategy.
    pub break_strategy: BreakStrategy,

    /// Font families of the default text style.
    pub font_families: Vec<String>,
    /// Font size of the default text style.
    pub font_size: f32,
    /// Height multiplier of the default text style.
    pub height: f64,
    /// Font weight of the default text style.
    pub font_weight: FontWeight,
    /// Font style of the default text style.
    pub font_style: FontStyle,
    /// Locale of the default text style.
    pub locale: Option<String>,

    /// Enables the strut.
    pub strut_enabled: bool,
    /// Font families used to measure the strut.
    pub strut_font_families: Vec<String>,
    /// Font size used to measure the strut. Negative values disable the strut.
    pub strut_font_size: f32,
    /// Multiplier applied to the strut font's ascent and descent.
    pub strut_height: f64,
    /// Leading as a multiple of the strut font height; negative to use the font's own leading.
    pub strut_leading: f64,
    /// Font weight used to measure the strut.
    pub strut_font_weight: FontWeight,
    /// Font style used to measure the strut.
    pub strut_font_style: FontStyle,
    /// Forces every line to use exactly the strut metrics.
    pub force_strut_height: bool,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            text_align: TextAlign::default(),
            text_direction: TextDirection::default(),
            max_lines: usize::MAX,
            ellipsis: String::new(),
            break_strategy: BreakStrategy::default(),
            font_families: vec![String::from("sans-serif")],
            font_size: 14.0,
            height: 1.0,
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            locale: None,
            strut_enabled: false,
            strut_font_families: Vec::new(),
            strut_font_size: 14.0,
            strut_height: 1.0,
            strut_leading: -1.0,
            strut_font_weight: FontWeight::default(),
            strut_font_style: FontStyle::default(),
            force_strut_height: false,
        }
    }
}

impl ParagraphStyle {
    /// Builds the default text style of the paragraph.
    pub fn text_style<B: Brush>(&self) -> TextStyle<B> {
        TextStyle {
            font_families: self.font_families.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight,
            font_style: self.font_style,
            locale: self.locale.clone(),
            height: self.height,
            ..TextStyle::default()
        }
    }

    /// Returns `true` if the number of lines is not limited.
    pub fn unlimited_lines(&self) -> bool {
        self.max_lines == usize::MAX
    }

    /// Returns `true` if an ellipsis is configured.
    pub fn ellipsized(&self) -> bool {
        !self.ellipsis.is_empty()
    }

    /// Resolves [`TextAlign::Start`] and [`TextAlign::End`] against the paragraph direction.
    pub fn effective_align(&self) -> TextAlign {
        match (self.text_align, self.text_direction) {
            (TextAlign::Start, TextDirection::Ltr) | (TextAlign::End, TextDirection::Rtl) => {
                TextAlign::Left
            }
            (TextAlign::Start, TextDirection::Rtl) | (TextAlign::End, TextDirection::Ltr) => {
                TextAlign::Right
            }
            (align, _) => align,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_align_follows_direction() {
        let mut style = ParagraphStyle::default();
        assert_eq!(style.effective_align(), TextAlign::Left);
        style.text_direction = TextDirection::Rtl;
        assert_eq!(style.effective_align(), TextAlign::Right);
        style.text_align = TextAlign::End;
        assert_eq!(style.effective_align(), TextAlign::Left);
        style.text_align = TextAlign::Center;
        assert_eq!(style.effective_align(), TextAlign::Center);
    }

    #[test]
    fn decoration_flags() {
        let both = TextDecoration::UNDERLINE | TextDecoration::LINE_THROUGH;
        assert!(both.contains(TextDecoration::UNDERLINE));
        assert!(both.contains(TextDecoration::LINE_THROUGH));
        assert!(!both.contains(TextDecoration::OVERLINE));
        assert!(TextDecoration::NONE.is_none());
        assert_eq!(FontWeight::new(750), FontWeight::BOLD);
    }
}
