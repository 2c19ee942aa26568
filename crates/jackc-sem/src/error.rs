//! Symbol table error types.

use jackc_util::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("'{name}' is already declared in this scope")]
    Redefined { name: String, first: Span, second: Span },
}

impl SymbolError {
    pub fn first_span(&self) -> Span {
        match self {
            SymbolError::Redefined { first, .. } => *first,
        }
    }

    pub fn second_span(&self) -> Span {
        match self {
            SymbolError::Redefined { second, .. } => *second,
        }
    }
}
