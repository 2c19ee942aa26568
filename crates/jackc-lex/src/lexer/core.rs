//! Tokenizer dispatch.
//!
//! Scans each already-comment-stripped line left to right: whitespace
//! separates tokens and is discarded, `"` opens a string constant that
//! runs to the next `"`, any symbol character terminates the current run
//! and is emitted standalone, and any other run of characters is scanned
//! as an identifier/keyword or an integer constant.

use jackc_util::diagnostic::DiagnosticBuilder;
use jackc_util::{DiagnosticCode, Handler, Span};

use crate::comment::StrippedLine;
use crate::cursor::Cursor;
use crate::token::{is_symbol, Token};

/// A token together with the source location it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

pub struct Tokenizer<'a> {
    handler: &'a mut Handler,
}

impl<'a> Tokenizer<'a> {
    pub fn new(handler: &'a mut Handler) -> Self {
        Self { handler }
    }

    /// Tokenizes every stripped line, in order, into a flat token sequence.
    pub fn tokenize(&mut self, lines: &[StrippedLine]) -> Vec<SpannedToken> {
        let mut tokens = Vec::new();
        for line in lines {
            self.tokenize_line(line, &mut tokens);
        }
        tokens
    }

    fn tokenize_line(&mut self, line: &StrippedLine, out: &mut Vec<SpannedToken>) {
        let mut cursor = Cursor::new(&line.text);

        loop {
            while !cursor.is_at_end() && cursor.current_char().is_whitespace() {
                cursor.advance();
            }
            if cursor.is_at_end() {
                return;
            }

            let start = cursor.position();
            let start_column = cursor.column();
            let c = cursor.current_char();

            let token = if c == '"' {
                self.lex_string(&mut cursor, line.line)
            } else if is_symbol(c) {
                cursor.advance();
                Some(Token::Symbol(c))
            } else if c.is_ascii_digit() {
                self.lex_number(&mut cursor, line.line, start_column)
            } else if c.is_ascii_alphabetic() || c == '_' {
                Some(self.lex_identifier(&mut cursor))
            } else {
                let span = Span::new(start, start + c.len_utf8(), line.line, start_column);
                DiagnosticBuilder::error(format!("unrecognized character '{}'", c))
                    .code(DiagnosticCode::L_UNKNOWN_CHAR)
                    .span(span)
                    .emit(self.handler);
                cursor.advance();
                None
            };

            if let Some(token) = token {
                let span = Span::new(start, cursor.position(), line.line, start_column);
                out.push(SpannedToken { token, span });
            }
        }
    }

    pub(crate) fn report_error(&mut self, line: u32, column: u32, code: DiagnosticCode, message: String) {
        let span = Span::new(0, 0, line, column);
        DiagnosticBuilder::error(message).code(code).span(span).emit(self.handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::strip_comments;
    use crate::token::Keyword;
    use jackc_util::Handler;

    fn tokenize(source: &str) -> Vec<Token> {
        let lines = strip_comments(source);
        let mut handler = Handler::new();
        let mut tokenizer = Tokenizer::new(&mut handler);
        tokenizer.tokenize(&lines).into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn single_declaration() {
        let tokens = tokenize("class C { static int x; }");
        assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Class),
                Token::Identifier("C".into()),
                Token::Symbol('{'),
                Token::Keyword(Keyword::Static),
                Token::Keyword(Keyword::Int),
                Token::Identifier("x".into()),
                Token::Symbol(';'),
                Token::Symbol('}'),
            ]
        );
    }

    #[test]
    fn string_with_embedded_symbol() {
        let tokens = tokenize(r#"let s = "a;b";"#);
        assert_eq!(
            tokens,
            vec![
                Token::Keyword(Keyword::Let),
                Token::Identifier("s".into()),
                Token::Symbol('='),
                Token::StringConst("a;b".into()),
                Token::Symbol(';'),
            ]
        );
    }

    #[test]
    fn quote_adjacent_to_identifier_without_whitespace_still_splits() {
        let tokens = tokenize(r#""hi"x"#);
        assert_eq!(
            tokens,
            vec![Token::StringConst("hi".into()), Token::Identifier("x".into())]
        );
    }

    #[test]
    fn unary_and_grouped_term_tokens() {
        let tokens = tokenize("~(a = b)");
        assert_eq!(
            tokens,
            vec![
                Token::Symbol('~'),
                Token::Symbol('('),
                Token::Identifier("a".into()),
                Token::Symbol('='),
                Token::Identifier("b".into()),
                Token::Symbol(')'),
            ]
        );
    }

    #[test]
    fn keywords_are_not_confused_with_identifier_prefixes() {
        let tokens = tokenize("while (i) { return; }");
        assert_eq!(tokens[0], Token::Keyword(Keyword::While));
        assert_eq!(tokens[5], Token::Keyword(Keyword::Return));
    }

    #[test]
    fn non_ascii_character_is_rejected_rather_than_folded_into_an_identifier() {
        let tokens = tokenize("h\u{e9}llo");
        assert_eq!(tokens, vec![Token::Identifier("h".into()), Token::Identifier("llo".into())]);
    }
}
