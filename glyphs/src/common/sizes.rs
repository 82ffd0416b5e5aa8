// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Stack allocation sizes for the transient [`crate::AttributeKey`] strings. Font
//! families and color names rarely exceed 16 bytes, so lookup keys built for every
//! [`crate::AttributeCache::intern`] call do not touch the heap.

// PERF: Larger values make every AttributeKey (and so every cache entry) bigger.
pub const DEFAULT_STRING_STORAGE_SIZE: usize = 16;

use smallstr::SmallString;

/// Stack allocated string storage for small strings. When this gets larger than
/// [`DEFAULT_STRING_STORAGE_SIZE`], it is spilled on the heap.
pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;
