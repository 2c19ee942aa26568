//! Tokenizer: converts stripped source lines into a sequence of tokens.
//!
//! Organized the way the rest of the front end splits lexical concerns:
//! - `core` - the `Tokenizer` struct and its line-scanning dispatch
//! - `identifier` - identifier and keyword scanning
//! - `number` - integer constant scanning
//! - `string` - string constant scanning

mod core;
mod identifier;
mod number;
mod string;

pub use core::{SpannedToken, Tokenizer};
