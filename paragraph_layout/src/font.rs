// Copyright 2025 the Paragraph Layout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font collection and shaping collaborator interface.
//!
//! The layout engine never parses fonts or runs a shaper itself. It asks a
//! [`FontCollection`] to resolve family lists into font sets, to report
//! metrics and to shape runs of text into glyphs.

use std::sync::Mutex;

use crate::lru_cache::{LookupKey, LruCache};
use crate::style::{FontFeature, FontStyle, FontWeight};

/// Handle to a resolved, shapeable set of fonts (a family list with fallback).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FontSetId(pub u32);

/// Handle to a single typeface owned by a [`FontCollection`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Typeface(pub u32);

/// Font metrics scaled to a font size.
///
/// Signs follow the y-down convention: `ascent` is negative (above the
/// baseline) and `descent` positive.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the tallest glyphs, negative.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the lowest glyphs.
    pub descent: f32,
    /// Recommended extra space between lines.
    pub leading: f32,
    /// Height of lowercase letters, positive.
    pub x_height: f32,
    /// Underline stroke width, if the font provides one.
    pub underline_thickness: Option<f32>,
    /// Underline offset below the baseline, if the font provides one.
    pub underline_position: Option<f32>,
    /// Strikeout stroke width, if the font provides one.
    pub strikeout_thickness: Option<f32>,
    /// Strikeout offset from the baseline (negative is above), if the font
    /// provides one.
    pub strikeout_position: Option<f32>,
}

/// A request to shape one directional, single-style run of text.
#[derive(Copy, Clone, Debug)]
pub struct ShapeRequest<'a> {
    /// UTF-16 code units of the run.
    pub text: &'a [u16],
    /// Shape right-to-left.
    pub is_rtl: bool,
    /// Font set to shape with, including fallback.
    pub font_set: FontSetId,
    /// Font size in pixels.
    pub font_size: f32,
    /// Requested weight.
    pub font_weight: FontWeight,
    /// Requested style.
    pub font_style: FontStyle,
    /// Locale used for language specific shaping.
    pub locale: Option<&'a str>,
    /// Font feature settings.
    pub features: &'a [FontFeature],
}

/// A positioned glyph produced by shaping.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ShapedGlyph {
    /// Glyph identifier within `typeface`.
    pub id: u32,
    /// Horizontal position from the start of the run.
    pub x: f32,
    /// Vertical offset from the baseline.
    pub y: f32,
    /// Horizontal advance.
    pub advance: f32,
    /// Offset of the first code unit of the glyph's cluster, relative to the
    /// start of the shaped text.
    pub cluster: usize,
    /// Typeface the glyph comes from.
    pub typeface: Typeface,
}

/// Output of shaping a run: glyphs in visual (left to right) order.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct GlyphBuffer {
    /// Shaped glyphs.
    pub glyphs: Vec<ShapedGlyph>,
    /// Total advance of the run.
    pub advance: f32,
}

/// Source of fonts, metrics and shaping.
///
/// A collection is shared by many paragraphs, possibly across threads, so
/// implementations must be `Send + Sync`. Any mutation of the collection is
/// the implementation's own concern.
pub trait FontCollection: Send + Sync {
    /// Resolves a family list and locale into a font set, or `None` if no
    /// family is available.
    fn resolve(&self, families: &[String], locale: Option<&str>) -> Option<FontSetId>;

    /// Returns the primary typeface of `set` for a weight and style.
    fn base_typeface(
        &self,
        set: FontSetId,
        weight: FontWeight,
        style: FontStyle,
    ) -> Option<Typeface>;

    /// Returns the metrics of `typeface` at `font_size`.
    fn metrics(&self, typeface: Typeface, font_size: f32) -> FontMetrics;

    /// Shapes a run of text.
    fn shape(&self, request: &ShapeRequest<'_>) -> GlyphBuffer;
}

#[derive(Clone, PartialEq, Debug)]
struct ShapeKey {
    text: Vec<u16>,
    is_rtl: bool,
    font_set: FontSetId,
    font_size: u32,
    font_weight: FontWeight,
    font_style: FontStyle,
    locale: Option<String>,
    features: Vec<FontFeature>,
}

impl LookupKey<ShapeKey> for &ShapeRequest<'_> {
    fn matches(&self, key: &ShapeKey) -> bool {
        self.text == key.text.as_slice()
            && self.is_rtl == key.is_rtl
            && self.font_set == key.font_set
            && self.font_size.to_bits() == key.font_size
            && self.font_weight == key.font_weight
            && self.font_style == key.font_style
            && self.locale == key.locale.as_deref()
            && self.features == key.features.as_slice()
    }

    fn to_key(self) -> ShapeKey {
        ShapeKey {
            text: self.text.to_vec(),
            is_rtl: self.is_rtl,
            font_set: self.font_set,
            font_size: self.font_size.to_bits(),
            font_weight: self.font_weight,
            font_style: self.font_style,
            locale: self.locale.map(str::to_string),
            features: self.features.to_vec(),
        }
    }
}

/// A [`FontCollection`] wrapper that memoizes shaping results.
///
/// The cache is owned by the wrapper and guarded by a mutex, so one instance
/// can serve concurrent layouts. Lookups and inserts are serialized; the
/// wrapped collection is called outside the lock only when the cache lock is
/// poisoned.
pub struct CachedFontCollection<C> {
    inner: C,
    cache: Mutex<LruCache<ShapeKey, GlyphBuffer>>,
}

impl<C: core::fmt::Debug> core::fmt::Debug for CachedFontCollection<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CachedFontCollection")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<C: FontCollection> CachedFontCollection<C> {
    /// Default number of cached shaping results.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Wraps `inner` with a cache of [`Self::DEFAULT_CAPACITY`] entries.
    pub fn new(inner: C) -> Self {
        Self::with_capacity(inner, Self::DEFAULT_CAPACITY)
    }

    /// Wraps `inner` with a cache of `capacity` entries.
    pub fn with_capacity(inner: C, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Returns the wrapped collection.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Returns `(hits, misses)` of the shaping cache.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache
            .lock()
            .map(|cache| cache.stats())
            .unwrap_or_default()
    }

    /// Drops every cached result, e.g. after fonts were added to the
    /// wrapped collection.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
    }
}

impl<C: FontCollection> FontCollection for CachedFontCollection<C> {
    fn resolve(&self, families: &[String], locale: Option<&str>) -> Option<FontSetId> {
        self.inner.resolve(families, locale)
    }

    fn base_typeface(
        &self,
        set: FontSetId,
        weight: FontWeight,
        style: FontStyle,
    ) -> Option<Typeface> {
        self.inner.base_typeface(set, weight, style)
    }

    fn metrics(&self, typeface: Typeface, font_size: f32) -> FontMetrics {
        self.inner.metrics(typeface, font_size)
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> GlyphBuffer {
        match self.cache.lock() {
            Ok(mut cache) => cache
                .get_or_insert_with(request, || self.inner.shape(request))
                .clone(),
            Err(_) => {
                log::warn!("shaping cache lock poisoned, shaping uncached");
                self.inner.shape(request)
            }
        }
    }
}
