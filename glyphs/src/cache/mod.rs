// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod attribute_cache;
pub mod cache_stats;

// Re-export.
pub use attribute_cache::*;
pub use cache_stats::*;
