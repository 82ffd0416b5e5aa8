// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # styled_glyphs
//!
//! Text documents where every visible character is a small [`PositionedGlyph`] and all
//! of its formatting (font, size, color, style, plus derived [`FontMetrics`]) lives in a
//! [`SharedAttributes`] instance that is interned once and shared.
//!
//! - [`AttributeCache`] hands out one canonical [`SharedAttributesRef`] per distinct
//!   [`AttributeKey`], and counts requests, hits and misses. It is `Send + Sync`.
//! - [`Document`] lays text out, keeps glyphs in reading order, reformats ranges, and
//!   renders into any [`RenderSink`].
//! - [`Workspace`] groups named documents around one shared cache and reports totals.
//!
//! ```
//! use std::sync::Arc;
//! use styled_glyphs::{AttributeKey, Document, Position, RecordingSink, TextStyle};
//!
//! let mut doc = Document::new("hello.txt");
//! let key = AttributeKey::new("Arial", 12, "black", TextStyle::Normal);
//! doc.add_text("Hello\nWorld", Position::new(0, 0, 50.0, 50.0), key).unwrap();
//!
//! let h = doc.glyph_at((0, 0)).unwrap();
//! let w = doc.glyph_at((1, 0)).unwrap();
//! assert!(Arc::ptr_eq(h.attributes(), w.attributes()));
//! assert_eq!(doc.text_content(), "HelloWorld");
//!
//! let mut sink = RecordingSink::default();
//! doc.render(&mut sink);
//! assert_eq!(sink.render_count(), 10);
//! ```
//!
//! Logging is off unless a binary or test opts in with
//! [`try_initialize_logging_global()`] or [`try_initialize_logging_thread_local()`].

// Enforce strict error handling in production library code only.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod attributes;
pub mod cache;
pub mod common;
pub mod document;
pub mod log;
pub mod workspace;

// Re-export.
pub use attributes::*;
pub use cache::*;
pub use common::*;
pub use document::*;
pub use log::*;
pub use workspace::*;
