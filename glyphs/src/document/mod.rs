// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Documents made of positioned glyphs that share interned formats, plus the pieces
//! needed to lay them out, render them and report on them.

// Attach sources.
pub mod document_struct;
pub mod layout_config;
pub mod memory_report;
pub mod position;
pub mod positioned_glyph;
pub mod render_sink;

// Re-export.
pub use document_struct::*;
pub use layout_config::*;
pub use memory_report::*;
pub use position::*;
pub use positioned_glyph::*;
pub use render_sink::*;
