// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Extension trait for [`AtomicU64`] used by the cache counters. See [`AtomicU64Ext`]
//! for details.
//!
//! [`AtomicU64`]: std::sync::atomic::AtomicU64

use std::sync::atomic::{AtomicU64, Ordering};

/// Ergonomic helpers for [`AtomicU64`] that hide [`SeqCst`] boilerplate and the
/// [`fetch_add`] return-value quirk.
///
/// ## The `fetch_add` quirk
///
/// [`AtomicU64::fetch_add`] returns the **old** value. [`increment`] derives the new
/// value from that old value instead of issuing a second load with [`get`], which
/// could observe another thread's increment.
///
/// ```text
///              Thread A              Thread B          Stored
///              --------              --------          ------
///                                                        5
///  fetch_add(1) -> old=5                                 6
///                              fetch_add(1) -> old=6     7
///
///  // Bad: self.get() returns 7 (Thread B's increment leaked in)
///  // Good: old.wrapping_add(1) returns 6 (derived from own old value)
/// ```
///
/// [`SeqCst`]: Ordering::SeqCst
/// [`fetch_add`]: std::sync::atomic::AtomicU64::fetch_add
/// [`get`]: Self::get
/// [`increment`]: Self::increment
pub trait AtomicU64Ext {
    /// Atomically increments the counter and returns the **new** value.
    fn increment(&self) -> u64;

    /// Reads the current value.
    fn get(&self) -> u64;

    /// Writes `0`.
    fn reset(&self);
}

impl AtomicU64Ext for AtomicU64 {
    fn increment(&self) -> u64 { self.fetch_add(1, Ordering::SeqCst).wrapping_add(1) }

    fn get(&self) -> u64 { self.load(Ordering::SeqCst) }

    fn reset(&self) { self.store(0, Ordering::SeqCst) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashSet, sync::Arc, thread};

    #[test]
    fn increment_returns_new_value() {
        let counter = AtomicU64::new(41);
        assert_eq!(counter.increment(), 42);
        assert_eq!(counter.get(), 42);
    }

    #[test]
    fn reset_zeroes_value() {
        let counter = AtomicU64::new(7);
        counter.reset();
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn concurrent_increments_are_unique() {
        const THREADS: u64 = 8;
        const PER_THREAD: u64 = 250;

        let counter = Arc::new(AtomicU64::new(0));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    (0..PER_THREAD).map(|_| counter.increment()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().unwrap() {
                assert!(seen.insert(value), "duplicate value {value}");
            }
        }

        assert_eq!(counter.get(), THREADS * PER_THREAD);
        assert_eq!(seen.len() as u64, THREADS * PER_THREAD);
    }
}
