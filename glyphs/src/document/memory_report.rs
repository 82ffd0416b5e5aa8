// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Object-count estimate of what sharing formats buys a [`crate::Document`].
///
/// | field                               | value                              |
/// | :---------------------------------- | :--------------------------------- |
/// | `estimated_objects_without_sharing` | `total_glyphs`                     |
/// | `estimated_objects_with_sharing`    | `unique_formats + total_glyphs`    |
/// | `savings_ratio`                     | `1 - with / without` (0 if empty)  |
/// | `format_savings_ratio`              | `1 - unique_formats / total_glyphs` |
///
/// The "without" baseline counts one full format object per glyph and ignores the
/// glyph context itself, so `savings_ratio` is negative for tiny documents and never
/// climbs above 0. `format_savings_ratio` only counts format objects, it is the number
/// that approaches 1 as glyphs share a handful of formats.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemoryReport {
    pub total_glyphs: usize,
    pub unique_formats: usize,
    pub estimated_objects_without_sharing: usize,
    pub estimated_objects_with_sharing: usize,
    pub savings_ratio: f64,
    pub format_savings_ratio: f64,
}

impl MemoryReport {
    #[must_use]
    pub fn new(total_glyphs: usize, unique_formats: usize) -> Self {
        let without = total_glyphs;
        let with = unique_formats + total_glyphs;
        let (savings_ratio, format_savings_ratio) = if total_glyphs == 0 {
            (0.0, 0.0)
        } else {
            (
                1.0 - with as f64 / without as f64,
                1.0 - unique_formats as f64 / total_glyphs as f64,
            )
        };
        Self {
            total_glyphs,
            unique_formats,
            estimated_objects_without_sharing: without,
            estimated_objects_with_sharing: with,
            savings_ratio,
            format_savings_ratio,
        }
    }
}

impl Display for MemoryReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} glyphs, {} unique formats, objects {} -> {} ({:.1}% savings, {:.1}% format savings)",
            self.total_glyphs,
            self.unique_formats,
            self.estimated_objects_without_sharing,
            self.estimated_objects_with_sharing,
            self.savings_ratio * 100.0,
            self.format_savings_ratio * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_reports_zero_ratios() {
        assert_eq!(MemoryReport::new(0, 0), MemoryReport::default());
    }

    #[test]
    fn tiny_document_has_negative_savings() {
        let it = MemoryReport::new(2, 1);
        assert_eq!(it.estimated_objects_without_sharing, 2);
        assert_eq!(it.estimated_objects_with_sharing, 3);
        assert!((it.savings_ratio - -0.5).abs() < 1e-12);
        assert!((it.format_savings_ratio - 0.5).abs() < 1e-12);
    }

    #[test]
    fn display() {
        assert_eq!(
            MemoryReport::new(4, 1).to_string(),
            "4 glyphs, 1 unique formats, objects 4 -> 5 (-25.0% savings, 75.0% format savings)"
        );
    }
}
