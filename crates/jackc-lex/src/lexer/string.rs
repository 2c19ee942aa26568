//! String constant lexing.
//!
//! Jack string constants run from a `"` to the next `"` on the same line;
//! there are no escape sequences, so interior symbol characters (including
//! `;`) are literal text, not part of the surrounding token stream.

use jackc_util::DiagnosticCode;

use crate::cursor::Cursor;
use crate::lexer::core::Tokenizer;
use crate::token::Token;

impl<'a> Tokenizer<'a> {
    pub(crate) fn lex_string(&mut self, cursor: &mut Cursor, line: u32) -> Option<Token> {
        let open_column = cursor.column();
        cursor.advance();

        let start = cursor.position();
        loop {
            if cursor.is_at_end() {
                self.report_error(
                    line,
                    open_column,
                    DiagnosticCode::L_UNTERMINATED_STRING,
                    "unterminated string constant".to_string(),
                );
                return None;
            }
            if cursor.current_char() == '"' {
                break;
            }
            cursor.advance();
        }

        let content = cursor.slice_from(start).to_string();
        cursor.advance();
        Some(Token::StringConst(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jackc_util::Handler;

    fn lex_one(source: &str) -> Option<Token> {
        let mut cursor = Cursor::new(source);
        let mut handler = Handler::new();
        let mut tokenizer = Tokenizer::new(&mut handler);
        tokenizer.lex_string(&mut cursor, 1)
    }

    #[test]
    fn simple_string() {
        assert_eq!(lex_one(r#""hello""#), Some(Token::StringConst("hello".into())));
    }

    #[test]
    fn empty_string() {
        assert_eq!(lex_one(r#""""#), Some(Token::StringConst(String::new())));
    }

    #[test]
    fn symbol_character_inside_string_is_literal() {
        assert_eq!(lex_one(r#""a;b""#), Some(Token::StringConst("a;b".into())));
    }

    #[test]
    fn unterminated_string_yields_no_token() {
        assert_eq!(lex_one(r#""unterminated"#), None);
    }
}
