// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Snapshot of [`crate::AttributeCache`] effectiveness. Only interning moves these
/// numbers, rendering never does.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CacheStats {
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    /// `hits / requests`, or `0.0` when there were no requests.
    pub hit_rate: f64,
}

impl CacheStats {
    #[must_use]
    pub fn new(requests: u64, hits: u64, misses: u64) -> Self {
        let hit_rate = if requests == 0 {
            0.0
        } else {
            hits as f64 / requests as f64
        };
        Self {
            requests,
            hits,
            misses,
            hit_rate,
        }
    }

    #[must_use]
    pub fn hit_rate_percent(&self) -> f64 { self.hit_rate * 100.0 }
}

impl Display for CacheStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} requests, {} hits, {} misses ({:.1}% hit rate)",
            self.requests,
            self.hits,
            self.misses,
            self.hit_rate_percent()
        )
    }
}
