//! Recursive-descent parser for the Jack grammar and the annotated parse
//! tree it produces. Identifier resolution happens inline as the parser
//! walks the token stream, driven by `jackc-sem`'s symbol table.

pub mod ast;
pub mod error;
pub mod parser;
pub mod xml;

pub use ast::Class;
pub use error::ParseError;
pub use parser::parse;
pub use xml::{emit_class, emit_token_stream};
