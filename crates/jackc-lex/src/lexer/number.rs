//! Integer constant lexing.
//!
//! Jack has a single numeric literal form: a run of decimal digits that
//! must fit the 16-bit unsigned range the VM uses for integers, 0..32767.

use jackc_util::DiagnosticCode;

use crate::cursor::Cursor;
use crate::lexer::core::Tokenizer;
use crate::token::Token;

impl<'a> Tokenizer<'a> {
    pub(crate) fn lex_number(&mut self, cursor: &mut Cursor, line: u32, column: u32) -> Option<Token> {
        let start = cursor.position();
        while !cursor.is_at_end() && cursor.current_char().is_ascii_digit() {
            cursor.advance();
        }
        let text = cursor.slice_from(start);

        match text.parse::<u32>() {
            Ok(value) if value <= 32767 => Some(Token::IntConst(value as u16)),
            _ => {
                self.report_error(
                    line,
                    column,
                    DiagnosticCode::L_INTEGER_OUT_OF_RANGE,
                    format!("integer constant '{}' out of range (0..32767)", text),
                );
                None
            },
        }
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
        tokenizer.lex_number(&mut cursor, 1, 1)
    }

    #[test]
    fn small_integer() {
        assert_eq!(lex_one("42"), Some(Token::IntConst(42)));
    }

    #[test]
    fn zero() {
        assert_eq!(lex_one("0"), Some(Token::IntConst(0)));
    }

    #[test]
    fn max_in_range_value() {
        assert_eq!(lex_one("32767"), Some(Token::IntConst(32767)));
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        assert_eq!(lex_one("32768"), None);
    }

    #[test]
    fn many_digit_overflow_is_rejected() {
        assert_eq!(lex_one("999999999999"), None);
    }
}
