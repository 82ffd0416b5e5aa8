// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Write};

use crate::InlineString;

/// Estimated heap + inline footprint of a value, used for the byte estimates that
/// complement [`crate::MemoryReport`].
pub trait GetMemSize {
    fn get_mem_size(&self) -> usize;
}

/// Calculates the total memory size of an iterator of items that implement
/// [`GetMemSize`].
pub fn iter_size<'a, T: GetMemSize + 'a>(iter: impl Iterator<Item = &'a T>) -> usize {
    iter.map(GetMemSize::get_mem_size).sum::<usize>()
}

/// Memory size wrapper for report display. Shows the size in kilobytes with commas, or
/// "?" if the size is not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemorySize {
    inner: Option<usize>,
}

impl MemorySize {
    #[must_use]
    pub fn new(size: usize) -> Self { Self { inner: Some(size) } }

    #[must_use]
    pub fn unknown() -> Self { Self { inner: None } }

    #[must_use]
    pub fn size(&self) -> Option<usize> { self.inner }
}

impl Display for MemorySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner {
            Some(size) => write!(f, "{}", format_as_kilobytes_with_commas(size)),
            None => write!(f, "?"),
        }
    }
}

/// Format the given number of bytes as kilobytes with commas. If the number of bytes is
/// less than 1024, it will be formatted as bytes.
#[must_use]
pub fn format_as_kilobytes_with_commas(bytes_size: usize) -> InlineString {
    if bytes_size < 1024 {
        let mut acc = format_with_commas(bytes_size);
        _ = write!(acc, " B");
        acc
    } else {
        let mut acc = format_with_commas(bytes_size / 1024);
        _ = write!(acc, " KB");
        acc
    }
}

#[must_use]
pub fn format_with_commas(num: usize) -> InlineString {
    let digits = num.to_string();
    let mut acc = InlineString::new();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            acc.push(',');
        }
        acc.push(digit);
    }
    acc
}
