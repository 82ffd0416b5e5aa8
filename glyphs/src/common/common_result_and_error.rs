// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error types returned by the interning cache, documents, and workspaces. All of them
//! report caller mistakes (bad input or a broken invariant), so none are retryable and
//! none are logged by the library before being returned.

/// Application level result type, used by the logging setup, config loading and the
/// demo binary.
pub type CommonResult<T> = miette::Result<T>;

/// Wrap the given expression in [`Ok`].
#[macro_export]
macro_rules! ok {
    () => {
        Ok(())
    };
    ($value:expr) => {
        Ok($value)
    };
}

/// A malformed [`crate::AttributeKey`], rejected by
/// [`crate::AttributeCache::intern()`] before any counter is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum InvalidAttributeError {
    #[error("Font size must be positive, got {size}")]
    #[diagnostic(
        code(styled_glyphs::attributes::non_positive_size),
        help("Use a size of at least 1 point.")
    )]
    NonPositiveSize { size: u32 },

    #[error("Font family name is empty")]
    #[diagnostic(code(styled_glyphs::attributes::empty_font))]
    EmptyFont,

    #[error("Color name is empty")]
    #[diagnostic(code(styled_glyphs::attributes::empty_color))]
    EmptyColor,

    #[error("Unrecognized text style '{name}'")]
    #[diagnostic(
        code(styled_glyphs::attributes::unknown_style),
        help("Valid styles are: normal, bold, italic, bold_italic, underline.")
    )]
    UnknownStyle { name: String },
}

/// Errors from [`crate::Document`] mutations. A failed call leaves the document
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum DocumentError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidAttribute(#[from] InvalidAttributeError),

    #[error("Position (line {line}, column {column}) is already occupied")]
    #[diagnostic(
        code(styled_glyphs::document::position_collision),
        help("Remove or move the existing glyph first, documents never overwrite.")
    )]
    PositionCollision { line: usize, column: usize },

    #[error("Text starting at (line {line}, column {column}) runs past the last position")]
    #[diagnostic(
        code(styled_glyphs::document::position_overflow),
        help("Start the text at a lower line or column.")
    )]
    PositionOverflow { line: usize, column: usize },

    #[error("A newline can't be stored as a glyph")]
    #[diagnostic(
        code(styled_glyphs::document::newline_glyph),
        help("Use `Document::add_text()` which turns newlines into line breaks.")
    )]
    NewlineGlyph,
}

/// Errors from [`crate::Workspace`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum WorkspaceError {
    #[error("Document '{name}' already exists")]
    #[diagnostic(code(styled_glyphs::workspace::duplicate_document))]
    DuplicateDocument { name: String },

    #[error("Shared attribute cache is still held by {holders} other owner(s)")]
    #[diagnostic(
        code(styled_glyphs::workspace::cache_in_use),
        help("Drop or remove every document that uses the cache before clearing it.")
    )]
    CacheInUse { holders: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_attribute_converts_into_document_error() {
        let err: DocumentError = InvalidAttributeError::EmptyFont.into();
        assert_eq!(err, DocumentError::InvalidAttribute(InvalidAttributeError::EmptyFont));
        assert_eq!(err.to_string(), "Font family name is empty");
    }

    #[test]
    fn collision_message_names_position() {
        let err = DocumentError::PositionCollision { line: 0, column: 5 };
        assert_eq!(
            err.to_string(),
            "Position (line 0, column 5) is already occupied"
        );
    }
}
