// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AttributeKey, Point, SharedAttributes};

/// The painting backend a [`crate::Document`] renders into. The document makes no
/// assumption about what a draw call does.
///
/// Any `FnMut(char, Point, &SharedAttributes)` closure is a sink. The parameter types
/// have to be spelled out on the closure so that it is generic over the attributes
/// lifetime:
///
/// ```
/// use styled_glyphs::{AttributeKey, Document, Point, Position, SharedAttributes,
///                     TextStyle};
///
/// let mut doc = Document::new("closure.txt");
/// doc.add_text(
///     "hi",
///     Position::default(),
///     AttributeKey::new("Arial", 12, "black", TextStyle::Normal),
/// )
/// .unwrap();
///
/// let mut drawn = String::new();
/// doc.render(&mut |character: char, _: Point, _: &SharedAttributes| {
///     drawn.push(character);
/// });
/// assert_eq!(drawn, "hi");
/// ```
pub trait RenderSink {
    fn draw(&mut self, character: char, position: Point, attributes: &SharedAttributes);
}

impl<F> RenderSink for F
where
    F: FnMut(char, Point, &SharedAttributes),
{
    fn draw(&mut self, character: char, position: Point, attributes: &SharedAttributes) {
        self(character, position, attributes);
    }
}

/// One draw call captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGlyph {
    pub character: char,
    pub position: Point,
    pub attributes: AttributeKey,
    pub screen_x: f64,
    pub screen_y: f64,
}

/// A sink that records every draw call, scaling canvas coordinates by
/// [`zoom_level`](Self::zoom_level). Useful for tests and for hosts that paint in a
/// later pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSink {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub zoom_level: f64,
    rendered: Vec<RenderedGlyph>,
}

impl Default for RecordingSink {
    fn default() -> Self { Self::new(800, 600) }
}

impl RecordingSink {
    #[must_use]
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            zoom_level: 1.0,
            rendered: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_zoom_level(mut self, zoom_level: f64) -> Self {
        self.zoom_level = zoom_level;
        self
    }

    #[must_use]
    pub fn rendered(&self) -> &[RenderedGlyph] { &self.rendered }

    #[must_use]
    pub fn render_count(&self) -> usize { self.rendered.len() }

    pub fn clear(&mut self) { self.rendered.clear(); }
}

impl RenderSink for RecordingSink {
    fn draw(&mut self, character: char, position: Point, attributes: &SharedAttributes) {
        self.rendered.push(RenderedGlyph {
            character,
            position,
            attributes: attributes.key().clone(),
            screen_x: position.x * self.zoom_level,
            screen_y: position.y * self.zoom_level,
        });
    }
}
