//! Syntactic error types.

use jackc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found {found} at {span:?}")]
    Unexpected { expected: String, found: String, span: Span },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Unexpected { span, .. } => Some(*span),
            ParseError::UnexpectedEof { .. } => None,
        }
    }
}
