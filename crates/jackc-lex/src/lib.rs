//! Comment stripping and tokenizing: the first two stages of the front end
//! pipeline. Consumes raw Jack source text and produces a flat, ordered
//! sequence of classified tokens for the parser to consume.

pub mod comment;
pub mod cursor;
pub mod lexer;
pub mod token;

pub use comment::{strip_comments, StrippedLine};
pub use lexer::{SpannedToken, Tokenizer};
pub use token::{Keyword, Token};
