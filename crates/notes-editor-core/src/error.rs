//! Error types for the editor core.
//!
//! Nothing here is fatal to the editor: every variant is turned into a
//! no-op or a plain fallback by the caller and logged.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur inside editor operations.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EditorError {
    /// The text surface has not mounted yet.
    #[error("text surface is not ready")]
    #[diagnostic(
        code(notes::editor::surface_not_ready),
        help("the action can be retried once the surface has mounted")
    )]
    SurfaceNotReady,

    /// A range does not fit inside the document.
    #[error("range {start}..{end} is outside the document ({len} chars)")]
    #[diagnostic(code(notes::editor::invalid_range))]
    InvalidRange { start: usize, end: usize, len: usize },

    /// The editor (or its surface) is read-only.
    #[error("editor is read-only")]
    #[diagnostic(code(notes::editor::read_only))]
    ReadOnly,

    /// Syntect failed while highlighting a code block.
    #[error("syntax highlighting failed: {0}")]
    #[diagnostic(code(notes::preview::highlight))]
    Highlight(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    #[diagnostic(code(notes::config::invalid))]
    InvalidConfig(String),
}

impl From<syntect::parsing::ParsingError> for EditorError {
    fn from(e: syntect::parsing::ParsingError) -> Self {
        EditorError::Highlight(e.to_string())
    }
}

impl From<syntect::parsing::ScopeError> for EditorError {
    fn from(e: syntect::parsing::ScopeError) -> Self {
        EditorError::Highlight(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = EditorError> = std::result::Result<T, E>;
