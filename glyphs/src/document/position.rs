// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Extrinsic placement of a glyph: its logical cell (`line`, `column`) and its canvas
/// coordinates (`x`, `y`). Only the logical cell identifies a glyph inside a
/// [`crate::Document`], see [`GridPos`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(line: usize, column: usize, x: f64, y: f64) -> Self {
        Self {
            line,
            column,
            x,
            y,
        }
    }

    #[must_use]
    pub fn grid_pos(&self) -> GridPos { grid_pos(self.line, self.column) }

    #[must_use]
    pub fn point(&self) -> Point { Point { x: self.x, y: self.y } }
}

/// Logical cell of a glyph. Ordered by `line` then `column`, which is the document's
/// reading (and rendering) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPos {
    pub line: usize,
    pub column: usize,
}

#[must_use]
pub fn grid_pos(line: usize, column: usize) -> GridPos { GridPos { line, column } }

impl From<Position> for GridPos {
    fn from(position: Position) -> Self { position.grid_pos() }
}

impl From<&Position> for GridPos {
    fn from(position: &Position) -> Self { position.grid_pos() }
}

impl From<(usize, usize)> for GridPos {
    fn from((line, column): (usize, usize)) -> Self { grid_pos(line, column) }
}

impl Display for GridPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// Canvas coordinates handed to a [`crate::RenderSink`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
