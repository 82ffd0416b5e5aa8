// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Intrinsic (shared) glyph state: [`TextStyle`], the [`AttributeKey`] lookup value, and
//! the interned [`SharedAttributes`] that [`crate::AttributeCache`] hands out.

// Attach sources.
pub mod attribute_key;
pub mod shared_attributes;
pub mod text_style;

// Re-export.
pub use attribute_key::*;
pub use shared_attributes::*;
pub use text_style::*;
