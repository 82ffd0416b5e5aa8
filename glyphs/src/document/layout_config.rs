// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use miette::{IntoDiagnostic, WrapErr};
use serde::{Deserialize, Serialize};

use crate::{CommonResult, ok};

/// How [`crate::Document::add_text()`] advances the canvas coordinates.
///
/// - Each character moves `x` by `size * advance_factor`.
/// - Each newline moves `y` by `size + line_gap` and resets `x` to the start of the
///   call.
///
/// Missing JSON fields fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub advance_factor: f64,
    pub line_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            advance_factor: 0.6,
            line_gap: 2.0,
        }
    }
}

impl LayoutConfig {
    #[must_use]
    pub fn advance(&self, size: u32) -> f64 { f64::from(size) * self.advance_factor }

    #[must_use]
    pub fn line_height(&self, size: u32) -> f64 { f64::from(size) + self.line_gap }

    /// # Errors
    ///
    /// Returns [`LayoutConfigError::OutOfRange`] for a negative or non-finite value.
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        for (field, value) in [
            ("advance_factor", self.advance_factor),
            ("line_gap", self.line_gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutConfigError::OutOfRange { field, value });
            }
        }
        ok!()
    }

    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn try_from_json_str(json: &str) -> CommonResult<Self> {
        let it: Self = serde_json::from_str(json)
            .into_diagnostic()
            .wrap_err(LayoutConfigError::Parse)?;
        it.validate()?;
        ok!(it)
    }

    /// # Errors
    ///
    /// Returns an error if the file can't be read, or its content is rejected by
    /// [`Self::try_from_json_str()`].
    pub fn try_from_json_file(path: impl AsRef<Path>) -> CommonResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| LayoutConfigError::Read {
                path: path.display().to_string(),
            })?;
        Self::try_from_json_str(&json)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error, miette::Diagnostic)]
pub enum LayoutConfigError {
    #[error("📑 Could not read layout config file: '{path}'")]
    #[diagnostic(code(styled_glyphs::layout_config::read))]
    Read { path: String },

    #[error("🔍 Could not parse layout config JSON")]
    #[diagnostic(code(styled_glyphs::layout_config::parse))]
    Parse,

    #[error("Layout value '{field}' must be finite and non-negative, got {value}")]
    #[diagnostic(code(styled_glyphs::layout_config::out_of_range))]
    OutOfRange { field: &'static str, value: f64 },
}
