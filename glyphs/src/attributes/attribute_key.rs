// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{InlineString, InvalidAttributeError, TextStyle};

/// Lookup key for [`crate::AttributeCache::intern()`]: the intrinsic state of a glyph
/// (font family, size, color, style).
///
/// Equality and hashing are structural over all four fields, derived rather than hand
/// written, so two keys built from equal values always land on the same cache entry.
/// The fields are private and there are no setters, so a key can't change while it
/// sits in the interning table.
///
/// Font and color names are [`InlineString`]s, building a transient key for a lookup
/// does not allocate for typical names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeKey {
    font: InlineString,
    size: u32,
    color: InlineString,
    style: TextStyle,
}

impl AttributeKey {
    /// Build a key. This does not validate, [`crate::AttributeCache::intern()`] does.
    #[must_use]
    pub fn new(
        font: impl AsRef<str>,
        size: u32,
        color: impl AsRef<str>,
        style: TextStyle,
    ) -> Self {
        Self {
            font: font.as_ref().into(),
            size,
            color: color.as_ref().into(),
            style,
        }
    }

    /// Build a key from a style name like `"bold_italic"`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAttributeError::UnknownStyle`] for an unrecognized style name.
    pub fn try_from_style_name(
        font: impl AsRef<str>,
        size: u32,
        color: impl AsRef<str>,
        style_name: &str,
    ) -> Result<Self, InvalidAttributeError> {
        let style = TextStyle::try_from_name(style_name)?;
        Ok(Self::new(font, size, color, style))
    }

    /// # Errors
    ///
    /// - [`InvalidAttributeError::NonPositiveSize`] if `size` is 0.
    /// - [`InvalidAttributeError::EmptyFont`] if the font name is blank.
    /// - [`InvalidAttributeError::EmptyColor`] if the color name is blank.
    pub fn validate(&self) -> Result<(), InvalidAttributeError> {
        if self.size == 0 {
            return Err(InvalidAttributeError::NonPositiveSize { size: self.size });
        }
        if self.font.trim().is_empty() {
            return Err(InvalidAttributeError::EmptyFont);
        }
        if self.color.trim().is_empty() {
            return Err(InvalidAttributeError::EmptyColor);
        }
        Ok(())
    }

    #[must_use]
    pub fn font(&self) -> &str { &self.font }

    #[must_use]
    pub fn size(&self) -> u32 { self.size }

    #[must_use]
    pub fn color(&self) -> &str { &self.color }

    #[must_use]
    pub fn style(&self) -> TextStyle { self.style }
}

impl Display for AttributeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{font} {size}pt {color} {style}",
            font = self.font,
            size = self.size,
            color = self.color,
            style = self.style
        )
    }
}
