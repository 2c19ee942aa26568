//! Identifier and keyword lexing.
//!
//! An identifier is a letter or underscore followed by letters, digits, or
//! underscores. After scanning the run, a keyword lookup decides whether it
//! is one of the 21 reserved words or a plain identifier.

use crate::cursor::Cursor;
use crate::lexer::core::Tokenizer;
use crate::token::{Keyword, Token};

impl<'a> Tokenizer<'a> {
    pub(crate) fn lex_identifier(&mut self, cursor: &mut Cursor) -> Token {
        let start = cursor.position();
        while !cursor.is_at_end() {
            let c = cursor.current_char();
            if c.is_ascii_alphanumeric() || c == '_' {
                cursor.advance();
            } else {
                break;
            }
        }
        let text = cursor.slice_from(start);
        match Keyword::from_str(text) {
            Some(kw) => Token::Keyword(kw),
            None => Token::Identifier(text.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jackc_util::Handler;

    fn lex_one(source: &str) -> Token {
        let mut cursor = Cursor::new(source);
        let mut handler = Handler::new();
        let mut tokenizer = Tokenizer::new(&mut handler);
        tokenizer.lex_identifier(&mut cursor)
    }

    #[test]
    fn plain_identifier() {
        assert_eq!(lex_one("count"), Token::Identifier("count".into()));
    }

    #[test]
    fn identifier_with_underscore_and_digits() {
        assert_eq!(lex_one("_x2_y"), Token::Identifier("_x2_y".into()));
    }

    #[test]
    fn keyword_is_recognized() {
        assert_eq!(lex_one("constructor"), Token::Keyword(Keyword::Constructor));
    }

    #[test]
    fn keyword_prefix_does_not_shadow_longer_identifier() {
        assert_eq!(lex_one("classVarDec"), Token::Identifier("classVarDec".into()));
    }

    #[test]
    fn non_ascii_letter_ends_the_run() {
        assert_eq!(lex_one("h\u{e9}llo"), Token::Identifier("h".into()));
    }
}
