//! Core error types for the jackc-util crate.

use thiserror::Error;

/// Error type for source map operations.
#[derive(Debug, Error)]
pub enum SourceMapError {
    /// File not found in the source map.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Invalid span range.
    #[error("invalid span: start {start} > end {end}")]
    InvalidSpan { start: usize, end: usize },

    /// Invalid line number.
    #[error("invalid line number: {line} (file has {max_lines} lines)")]
    InvalidLineNumber { line: usize, max_lines: usize },
}

/// Error type for diagnostic construction.
#[derive(Debug, Error)]
pub enum DiagnosticError {
    /// Invalid diagnostic code.
    #[error("invalid diagnostic code: {0}")]
    InvalidCode(String),
}

/// Result type alias for source map operations.
pub type SourceMapResult<T> = std::result::Result<T, SourceMapError>;

/// Result type alias for diagnostic operations.
pub type DiagnosticResult<T> = std::result::Result<T, DiagnosticError>;
