// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap, sync::Arc};

use rustc_hash::FxHashSet;

use crate::{AttributeCache, AttributeKey, DocumentError, GetMemSize, GridPos,
            LayoutConfig, LayoutConfigError, MemoryReport, MemorySize, Position,
            PositionedGlyph, RenderSink, SharedAttributes, iter_size,
            new_shared_attribute_cache, ok};

pub type GlyphMap = BTreeMap<GridPos, PositionedGlyph>;

/// An ordered collection of [`PositionedGlyph`]s that gets all of its formats from an
/// [`AttributeCache`].
///
/// - Glyphs are keyed by [`GridPos`], so iteration is reading order (line, then column)
///   no matter in which order text was inserted, and two glyphs can never occupy the
///   same cell.
/// - Every mutation validates first and commits second. A call that returns an error
///   leaves the document (and the cache) exactly as it was.
/// - The cache is held through an [`Arc`]: each document gets its own by default
///   ([`new()`]), or several documents share one ([`with_cache()`]).
///
/// Mutations take `&mut self`, [`render()`] takes `&self`. Concurrent access to one
/// document has to be serialized by the caller.
///
/// [`new()`]: Self::new
/// [`with_cache()`]: Self::with_cache
/// [`render()`]: Self::render
#[derive(Debug)]
pub struct Document {
    name: String,
    glyphs: GlyphMap,
    cache: Arc<AttributeCache>,
    layout_config: LayoutConfig,
}

impl Document {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_cache(name, new_shared_attribute_cache())
    }

    #[must_use]
    pub fn with_cache(name: impl Into<String>, cache: Arc<AttributeCache>) -> Self {
        Self {
            name: name.into(),
            glyphs: GlyphMap::new(),
            cache,
            layout_config: LayoutConfig::default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`LayoutConfigError::OutOfRange`] for a negative or non-finite value,
    /// which would otherwise turn every coordinate into `NaN`.
    pub fn with_layout_config(
        self,
        layout_config: LayoutConfig,
    ) -> Result<Self, LayoutConfigError> {
        layout_config.validate()?;
        ok!(self.with_checked_layout_config(layout_config))
    }

    /// `layout_config` must already have passed [`LayoutConfig::validate()`].
    pub(crate) fn with_checked_layout_config(mut self, layout_config: LayoutConfig) -> Self {
        self.layout_config = layout_config;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    #[must_use]
    pub fn cache(&self) -> &Arc<AttributeCache> { &self.cache }

    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig { self.layout_config }

    #[must_use]
    pub fn len(&self) -> usize { self.glyphs.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.glyphs.is_empty() }

    /// Glyphs in reading order.
    pub fn glyphs(&self) -> impl Iterator<Item = &PositionedGlyph> { self.glyphs.values() }

    pub fn glyph_at(&self, at: impl Into<GridPos>) -> Option<&PositionedGlyph> {
        self.glyphs.get(&at.into())
    }
}

/// Mutations.
impl Document {
    /// Lays `text` out from `start` and adds one glyph per character, all sharing the
    /// single format interned for this call.
    ///
    /// A `'\n'` produces no glyph: it moves to the next line, column 0, back to
    /// `start.x`, and down by [`LayoutConfig::line_height()`].
    ///
    /// # Errors
    ///
    /// - [`DocumentError::InvalidAttribute`] if `key` is malformed.
    /// - [`DocumentError::PositionCollision`] if any target cell is taken. Nothing is
    ///   inserted in that case, not even the characters before the collision.
    /// - [`DocumentError::PositionOverflow`] if a character would land past
    ///   `usize::MAX` on either axis. A glyph in the very last cell is fine.
    pub fn add_text(
        &mut self,
        text: &str,
        start: Position,
        key: AttributeKey,
    ) -> Result<(), DocumentError> {
        key.validate()?;

        let planned = self.layout_text(text, start, key.size())?;
        self.check_vacant(planned.iter().map(|(position, _)| position.grid_pos()))?;

        if planned.is_empty() {
            return ok!();
        }

        let attributes = self.cache.intern(key)?;
        for (position, character) in planned {
            self.glyphs.insert(
                position.grid_pos(),
                PositionedGlyph::new(position, character, Arc::clone(&attributes)),
            );
        }

        ok!()
    }

    /// Adds a single glyph.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::NewlineGlyph`] if `character` is `'\n'`.
    /// - [`DocumentError::InvalidAttribute`] if `key` is malformed.
    /// - [`DocumentError::PositionCollision`] if the cell is taken.
    pub fn add_glyph(
        &mut self,
        character: char,
        position: Position,
        key: AttributeKey,
    ) -> Result<(), DocumentError> {
        if character == '\n' {
            return Err(DocumentError::NewlineGlyph);
        }
        key.validate()?;
        self.check_vacant(std::iter::once(position.grid_pos()))?;

        let attributes = self.cache.intern(key)?;
        self.glyphs.insert(
            position.grid_pos(),
            PositionedGlyph::new(position, character, attributes),
        );

        ok!()
    }

    /// Removes the glyph at `at`, returns whether there was one. The glyph's format
    /// stays in the cache.
    pub fn remove_at(&mut self, at: impl Into<GridPos>) -> bool {
        self.glyphs.remove(&at.into()).is_some()
    }

    /// Points every glyph in the inclusive range `[from, to]` at the format for `key`.
    /// Returns how many glyphs changed.
    ///
    /// Each glyph interns on its own, so a format that is new to the cache costs one
    /// miss and then hits for the rest of the range. `from > to` is an empty range.
    ///
    /// # Errors
    ///
    /// [`DocumentError::InvalidAttribute`] if `key` is malformed, before any change.
    pub fn reformat_range(
        &mut self,
        from: impl Into<GridPos>,
        to: impl Into<GridPos>,
        key: AttributeKey,
    ) -> Result<usize, DocumentError> {
        key.validate()?;

        let (from, to) = (from.into(), to.into());
        if from > to {
            return ok!(0);
        }

        let mut changed = 0;
        for glyph in self.glyphs.range_mut(from..=to).map(|(_, glyph)| glyph) {
            let attributes = self.cache.intern(key.clone())?;
            *glyph = glyph.with_attributes(attributes);
            changed += 1;
        }

        tracing::trace!(
            message = "Reformatted range",
            document = %self.name,
            from = %from,
            to = %to,
            format = %key,
            changed
        );

        ok!(changed)
    }

    /// Moves the glyph at `from` to `to`, keeping its character and format. Returns
    /// `Ok(false)` if there is no glyph at `from`.
    ///
    /// # Errors
    ///
    /// [`DocumentError::PositionCollision`] if another glyph occupies `to`.
    pub fn move_glyph(
        &mut self,
        from: impl Into<GridPos>,
        to: Position,
    ) -> Result<bool, DocumentError> {
        let from = from.into();
        if !self.glyphs.contains_key(&from) {
            return ok!(false);
        }

        let target = to.grid_pos();
        if target != from {
            self.check_vacant(std::iter::once(target))?;
        }

        let Some(glyph) = self.glyphs.remove(&from) else {
            return ok!(false);
        };
        self.glyphs.insert(target, glyph.with_position(to));

        ok!(true)
    }

    /// Swaps the character of the glyph at `at`, keeping its position and format.
    /// Returns `Ok(false)` if there is no glyph at `at`.
    ///
    /// # Errors
    ///
    /// [`DocumentError::NewlineGlyph`] if `character` is `'\n'`.
    pub fn replace_char(
        &mut self,
        at: impl Into<GridPos>,
        character: char,
    ) -> Result<bool, DocumentError> {
        if character == '\n' {
            return Err(DocumentError::NewlineGlyph);
        }

        match self.glyphs.get_mut(&at.into()) {
            Some(glyph) => {
                *glyph = glyph.with_character(character);
                ok!(true)
            }
            None => ok!(false),
        }
    }

    /// Line and column are `None` once they have moved past `usize::MAX`. That is
    /// only an error if another character has to be placed there.
    fn layout_text(
        &self,
        text: &str,
        start: Position,
        size: u32,
    ) -> Result<Vec<(Position, char)>, DocumentError> {
        let advance = self.layout_config.advance(size);
        let line_height = self.layout_config.line_height(size);

        let mut line = Some(start.line);
        let mut column = Some(start.column);
        let (mut x, mut y) = (start.x, start.y);

        let mut acc = Vec::with_capacity(text.len());
        for character in text.chars() {
            if character == '\n' {
                line = line.and_then(|it| it.checked_add(1));
                column = Some(0);
                x = start.x;
                y += line_height;
            } else {
                let (Some(at_line), Some(at_column)) = (line, column) else {
                    return Err(DocumentError::PositionOverflow {
                        line: start.line,
                        column: start.column,
                    });
                };
                acc.push((Position::new(at_line, at_column, x, y), character));
                column = at_column.checked_add(1);
                x += advance;
            }
        }
        ok!(acc)
    }

    fn check_vacant(
        &self,
        mut targets: impl Iterator<Item = GridPos>,
    ) -> Result<(), DocumentError> {
        match targets.find(|it| self.glyphs.contains_key(it)) {
            Some(taken) => Err(DocumentError::PositionCollision {
                line: taken.line,
                column: taken.column,
            }),
            None => ok!(),
        }
    }
}

/// Observers. None of these touch the cache counters.
impl Document {
    /// Hands every glyph, in reading order, to `sink`.
    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        for glyph in self.glyphs.values() {
            sink.draw(
                glyph.character(),
                glyph.position().point(),
                glyph.attributes(),
            );
        }

        tracing::debug!(
            message = "Rendered document",
            document = %self.name,
            glyphs = self.glyphs.len()
        );
    }

    /// `unique_formats` counts the distinct formats this document's glyphs point at.
    /// Formats that only sibling documents sharing the cache use are not included, see
    /// [`crate::WorkspaceReport`] for cache wide totals.
    #[must_use]
    pub fn memory_report(&self) -> MemoryReport {
        MemoryReport::new(self.glyphs.len(), self.distinct_formats().len())
    }

    #[must_use]
    pub fn estimated_heap_bytes(&self) -> MemorySize { MemorySize::new(self.get_mem_size()) }

    /// The characters in reading order.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.glyphs.values().map(PositionedGlyph::character).collect()
    }

    /// One entry per shared instance in use, compared by identity.
    fn distinct_formats(&self) -> Vec<&SharedAttributes> {
        let mut seen = FxHashSet::default();
        self.glyphs
            .values()
            .map(|glyph| &**glyph.attributes())
            .filter(|it| seen.insert(std::ptr::from_ref::<SharedAttributes>(*it)))
            .collect()
    }
}

impl GetMemSize for Document {
    /// Glyph records plus their map keys, plus each format the glyphs use. A format
    /// shared with another document is counted in both.
    fn get_mem_size(&self) -> usize {
        let keys = self.glyphs.len() * std::mem::size_of::<GridPos>();
        let glyphs = iter_size(self.glyphs.values());
        let formats = iter_size(self.distinct_formats().into_iter());
        std::mem::size_of::<Self>() + self.name.len() + keys + glyphs + formats
    }
}
