//! Error types
//!
//! The core's failure surface is deliberately small: malformed CSS is skipped
//! during parsing rather than reported as a hard error, missing fonts resolve
//! through the fallback chain, and hit tests never fail. What remains is a
//! compact taxonomy built with `thiserror`.

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
  /// CSS parsing error (only surfaced by the error-collecting entry points)
  #[error("Parse error: {0}")]
  Parse(#[from] ParseError),

  /// Font provider error
  #[error("Font error: {0}")]
  Font(#[from] FontError),

  /// Generic error for miscellaneous issues
  #[error("{0}")]
  Other(String),
}

/// Errors from CSS parsing
///
/// The default parser entry points recover from all of these; they exist so
/// that `parse_stylesheet_with_errors` can hand diagnostics to tooling.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
  /// Invalid CSS syntax
  #[error("Invalid CSS at line {line}, column {column}: {message}")]
  InvalidCss {
    message: String,
    line: u32,
    column: u32,
  },

  /// A selector that could not be parsed
  #[error("Invalid selector: {selector}")]
  InvalidSelector { selector: String },
}

/// Errors from the glyph provider
#[derive(Error, Debug, Clone)]
pub enum FontError {
  /// No font matched the requested family list and no fallback was loaded
  #[error("No font available for families: {families:?}")]
  NoFontAvailable { families: Vec<String> },
}
