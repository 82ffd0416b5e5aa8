// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumString};

use crate::InvalidAttributeError;

/// The style part of a text format. Displays and parses in snake case, eg:
/// `"bold_italic"`.
#[derive(
    Debug,
    Display,
    EnumString,
    AsRefStr,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[strum(serialize_all = "snake_case")]
pub enum TextStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
    Underline,
}

impl TextStyle {
    /// Parse a style name, mapping failure to
    /// [`InvalidAttributeError::UnknownStyle`].
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not one of the snake case style names.
    pub fn try_from_name(name: &str) -> Result<Self, InvalidAttributeError> {
        TextStyle::from_str(name).map_err(|_| InvalidAttributeError::UnknownStyle {
            name: name.to_string(),
        })
    }
}
