// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter, Result as FmtResult},
          sync::Arc};

use crate::{GetMemSize, GridPos, Position, SharedAttributesRef};

/// The flyweight context: one per visible character. Holds only extrinsic state plus a
/// shared handle to its format, it never owns or mutates formatting data.
///
/// Changes produce a new record ([`with_attributes()`], [`with_position()`],
/// [`with_character()`]) instead of mutating in place.
///
/// [`with_attributes()`]: Self::with_attributes
/// [`with_position()`]: Self::with_position
/// [`with_character()`]: Self::with_character
#[derive(Debug, Clone)]
pub struct PositionedGlyph {
    position: Position,
    character: char,
    attributes: SharedAttributesRef,
}

impl PositionedGlyph {
    #[must_use]
    pub fn new(position: Position, character: char, attributes: SharedAttributesRef) -> Self {
        Self {
            position,
            character,
            attributes,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position { self.position }

    #[must_use]
    pub fn grid_pos(&self) -> GridPos { self.position.grid_pos() }

    #[must_use]
    pub fn character(&self) -> char { self.character }

    #[must_use]
    pub fn attributes(&self) -> &SharedAttributesRef { &self.attributes }

    /// `true` if both glyphs point at the very same interned format.
    #[must_use]
    pub fn shares_attributes_with(&self, other: &PositionedGlyph) -> bool {
        Arc::ptr_eq(&self.attributes, &other.attributes)
    }

    #[must_use]
    pub fn with_attributes(&self, attributes: SharedAttributesRef) -> Self {
        Self::new(self.position, self.character, attributes)
    }

    #[must_use]
    pub fn with_position(&self, position: Position) -> Self {
        Self::new(position, self.character, Arc::clone(&self.attributes))
    }

    #[must_use]
    pub fn with_character(&self, character: char) -> Self {
        Self::new(self.position, character, Arc::clone(&self.attributes))
    }
}

impl Display for PositionedGlyph {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "'{}' at {} using {}",
            self.character,
            self.grid_pos(),
            self.attributes
        )
    }
}

impl GetMemSize for PositionedGlyph {
    /// The shared format is not counted, it belongs to the cache.
    fn get_mem_size(&self) -> usize { std::mem::size_of::<Self>() }
}
