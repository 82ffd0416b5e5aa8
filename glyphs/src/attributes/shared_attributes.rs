// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter, Result as FmtResult},
          sync::Arc};

use crate::{AttributeKey, GetMemSize, TextStyle};

/// Handle to an interned [`SharedAttributes`]. Every glyph that uses a format holds a
/// clone of the same [`Arc`], so identity can be checked with [`Arc::ptr_eq`].
pub type SharedAttributesRef = Arc<SharedAttributes>;

/// Approximate font metrics derived from the family name length and the point size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub width: f64,
    pub height: f64,
    pub baseline: f64,
}

impl FontMetrics {
    pub const WIDTH_PER_FONT_NAME_CHAR: f64 = 0.6;
    pub const HEIGHT_FACTOR: f64 = 1.2;
    pub const BASELINE_FACTOR: f64 = 0.8;

    #[must_use]
    pub fn compute(font: &str, size: u32) -> Self {
        let size = f64::from(size);
        let base_width = font.chars().count() as f64 * Self::WIDTH_PER_FONT_NAME_CHAR;
        Self {
            width: size * base_width / 10.0,
            height: size * Self::HEIGHT_FACTOR,
            baseline: size * Self::BASELINE_FACTOR,
        }
    }
}

/// The interned, immutable intrinsic state of a glyph. Only
/// [`crate::AttributeCache`] creates these, once per distinct [`AttributeKey`], and
/// that is also the only place [`FontMetrics`] get computed.
#[derive(Debug, PartialEq)]
pub struct SharedAttributes {
    key: AttributeKey,
    metrics: FontMetrics,
}

impl SharedAttributes {
    pub(crate) fn new(key: AttributeKey) -> Self {
        let metrics = FontMetrics::compute(key.font(), key.size());
        Self { key, metrics }
    }

    #[must_use]
    pub fn key(&self) -> &AttributeKey { &self.key }

    #[must_use]
    pub fn font(&self) -> &str { self.key.font() }

    #[must_use]
    pub fn size(&self) -> u32 { self.key.size() }

    #[must_use]
    pub fn color(&self) -> &str { self.key.color() }

    #[must_use]
    pub fn style(&self) -> TextStyle { self.key.style() }

    #[must_use]
    pub fn metrics(&self) -> FontMetrics { self.metrics }

    /// Same check the cache performs, without building a key.
    #[must_use]
    pub fn is_same_format(&self, font: &str, size: u32, color: &str, style: TextStyle) -> bool {
        self.font() == font
            && self.size() == size
            && self.color() == color
            && self.style() == style
    }
}

impl Display for SharedAttributes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "CharacterFormat({}, {}pt, {}, {})",
            self.font(),
            self.size(),
            self.color(),
            self.style()
        )
    }
}

impl GetMemSize for SharedAttributes {
    fn get_mem_size(&self) -> usize {
        let spilled = |s: &str| {
            if s.len() > crate::DEFAULT_STRING_STORAGE_SIZE {
                s.len()
            } else {
                0
            }
        };
        std::mem::size_of::<Self>() + spilled(self.font()) + spilled(self.color())
    }
}
