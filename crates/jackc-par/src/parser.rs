//! Recursive-descent parser for the Jack grammar.
//!
//! Drives a single token of lookahead (`peek`/`advance`), with one
//! exception: `term` needs a second token of lookahead to tell apart a
//! bare variable, an array index, and the two forms of subroutine call.
//! The Symbol Table is consulted and mutated inline as each identifier is
//! encountered, so every `Ident` the parser produces already carries its
//! resolved role.

use jackc_lex::{Keyword, SpannedToken, Token};
use jackc_sem::{Category, SymbolError, SymbolTable};
use jackc_util::Span;

use crate::ast::*;
use crate::error::ParseError;

type PResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    tokens: &'a [SpannedToken],
    pos: usize,
    symbols: SymbolTable,
    current_class: String,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [SpannedToken]) -> Self {
        Self { tokens, pos: 0, symbols: SymbolTable::new(), current_class: String::new() }
    }

    fn current(&self) -> Option<&'a SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn peek(&self, offset: usize) -> Option<&'a SpannedToken> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<&'a SpannedToken> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eof_span(&self) -> Span {
        self.tokens.last().map(|t| t.span).unwrap_or(Span::DUMMY)
    }

    fn describe(tok: &Token) -> String {
        format!("{} '{}'", tok.category(), tok.lexeme())
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.current() {
            Some(tok) => ParseError::Unexpected {
                expected: expected.to_string(),
                found: Self::describe(&tok.token),
                span: tok.span,
            },
            None => ParseError::UnexpectedEof { expected: expected.to_string() },
        }
    }

    fn expect_symbol(&mut self, c: char) -> PResult<Span> {
        match self.current() {
            Some(tok) if tok.token == Token::Symbol(c) => {
                let span = tok.span;
                self.advance();
                Ok(span)
            },
            _ => Err(self.unexpected(&format!("'{}'", c))),
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> PResult<Span> {
        match self.current() {
            Some(tok) if tok.token == Token::Keyword(kw) => {
                let span = tok.span;
                self.advance();
                Ok(span)
            },
            _ => Err(self.unexpected(&format!("'{}'", kw.as_str()))),
        }
    }

    fn expect_identifier(&mut self) -> PResult<(String, Span)> {
        match self.current() {
            Some(tok) => match &tok.token {
                Token::Identifier(name) => {
                    let (name, span) = (name.clone(), tok.span);
                    self.advance();
                    Ok((name, span))
                },
                _ => Err(self.unexpected("an identifier")),
            },
            None => Err(self.unexpected("an identifier")),
        }
    }

    fn at_symbol(&self, c: char) -> bool {
        matches!(self.current(), Some(tok) if tok.token == Token::Symbol(c))
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        matches!(self.current(), Some(tok) if tok.token == Token::Keyword(kw))
    }

    // -- identifier resolution -------------------------------------------------

    fn declare(&mut self, name: String, span: Span, data_type: &str, category: Category) -> PResult<Ident> {
        let index = self.symbols.define(&name, data_type, category, span).map_err(|e| match e {
            SymbolError::Redefined { first, second, .. } => ParseError::Unexpected {
                expected: "a name not already declared in this scope".to_string(),
                found: format!("redeclaration of '{}' (first declared at {:?})", name, first),
                span: second,
            },
        })?;
        Ok(Ident { name, role: IdentRole::Var { category: to_var_category(category), index, usage: Usage::Declared }, span })
    }

    /// Resolves a used identifier: a declared variable if the symbol table
    /// knows it, otherwise a bare class reference. The parser never creates
    /// symbol-table entries on a use.
    fn resolve_use(&self, name: String, span: Span) -> Ident {
        match self.symbols.lookup(&name) {
            Some(record) => Ident {
                name,
                role: IdentRole::Var {
                    category: to_var_category(record.category),
                    index: record.index,
                    usage: Usage::Used,
                },
                span,
            },
            None => Ident { name, role: IdentRole::Class, span },
        }
    }

    fn class_ref(&self, name: String, span: Span) -> Ident {
        Ident { name, role: IdentRole::Class, span }
    }

    fn subroutine_ref(&self, name: String, span: Span) -> Ident {
        Ident { name, role: IdentRole::Subroutine, span }
    }

    // -- grammar ----------------------------------------------------------------

    pub fn parse_class(&mut self) -> PResult<Class> {
        self.symbols.start_class();
        self.expect_keyword(Keyword::Class)?;
        let (name, span) = self.expect_identifier()?;
        self.current_class = name.clone();
        let name = self.class_ref(name, span);
        self.expect_symbol('{')?;

        let mut var_decs = Vec::new();
        while self.at_keyword(Keyword::Static) || self.at_keyword(Keyword::Field) {
            var_decs.push(self.parse_class_var_dec()?);
        }

        let mut subroutines = Vec::new();
        while self.at_keyword(Keyword::Constructor) || self.at_keyword(Keyword::Function) || self.at_keyword(Keyword::Method) {
            subroutines.push(self.parse_subroutine_dec()?);
        }

        self.expect_symbol('}')?;
        Ok(Class { name, var_decs, subroutines })
    }

    fn parse_class_var_dec(&mut self) -> PResult<ClassVarDec> {
        let kind = if self.at_keyword(Keyword::Static) {
            self.advance();
            ClassVarKind::Static
        } else {
            self.expect_keyword(Keyword::Field)?;
            ClassVarKind::Field
        };
        let category = match kind {
            ClassVarKind::Static => Category::Static,
            ClassVarKind::Field => Category::Field,
        };

        let var_type = self.parse_type()?;
        let mut names = Vec::new();
        names.push(self.parse_declared_name(&var_type, category)?);
        while self.at_symbol(',') {
            self.advance();
            names.push(self.parse_declared_name(&var_type, category)?);
        }
        self.expect_symbol(';')?;
        Ok(ClassVarDec { kind, var_type, names })
    }

    fn parse_declared_name(&mut self, var_type: &TypeRef, category: Category) -> PResult<Ident> {
        let (name, span) = self.expect_identifier()?;
        self.declare(name, span, var_type.as_str(), category)
    }

    fn parse_type(&mut self) -> PResult<TypeRef> {
        match self.current() {
            Some(tok) => match &tok.token {
                Token::Keyword(Keyword::Int) => {
                    self.advance();
                    Ok(TypeRef::Int)
                },
                Token::Keyword(Keyword::Char) => {
                    self.advance();
                    Ok(TypeRef::Char)
                },
                Token::Keyword(Keyword::Boolean) => {
                    self.advance();
                    Ok(TypeRef::Boolean)
                },
                Token::Identifier(name) => {
                    let (name, span) = (name.clone(), tok.span);
                    self.advance();
                    Ok(TypeRef::Class(self.class_ref(name, span)))
                },
                _ => Err(self.unexpected("a type")),
            },
            None => Err(self.unexpected("a type")),
        }
    }

    fn parse_subroutine_dec(&mut self) -> PResult<SubroutineDec> {
        let kind = match self.current() {
            Some(tok) if tok.token == Token::Keyword(Keyword::Constructor) => SubroutineKind::Constructor,
            Some(tok) if tok.token == Token::Keyword(Keyword::Function) => SubroutineKind::Function,
            Some(tok) if tok.token == Token::Keyword(Keyword::Method) => SubroutineKind::Method,
            _ => return Err(self.unexpected("'constructor', 'function', or 'method'")),
        };
        self.advance();

        let return_type = if self.at_keyword(Keyword::Void) {
            self.advance();
            ReturnType::Void
        } else {
            ReturnType::Type(self.parse_type()?)
        };

        let (name, span) = self.expect_identifier()?;
        let name = self.subroutine_ref(name, span);

        self.symbols.start_subroutine();
        if kind == SubroutineKind::Method {
            let class_name = self.current_class.clone();
            self.symbols
                .define("this", &class_name, Category::Arg, span)
                .expect("'this' cannot collide with a prior declaration in a fresh subroutine scope");
        }

        self.expect_symbol('(')?;
        let params = self.parse_parameter_list()?;
        self.expect_symbol(')')?;

        let body = self.parse_subroutine_body()?;
        Ok(SubroutineDec { kind, return_type, name, params, body })
    }

    fn parse_parameter_list(&mut self) -> PResult<Vec<Param>> {
        let mut params = Vec::new();
        if self.at_symbol(')') {
            return Ok(params);
        }
        params.push(self.parse_parameter()?);
        while self.at_symbol(',') {
            self.advance();
            params.push(self.parse_parameter()?);
        }
        Ok(params)
    }

    fn parse_parameter(&mut self) -> PResult<Param> {
        let param_type = self.parse_type()?;
        let (name, span) = self.expect_identifier()?;
        let name = self.declare(name, span, param_type.as_str(), Category::Arg)?;
        Ok(Param { param_type, name })
    }

    fn parse_subroutine_body(&mut self) -> PResult<SubroutineBody> {
        self.expect_symbol('{')?;
        let mut var_decs = Vec::new();
        while self.at_keyword(Keyword::Var) {
            var_decs.push(self.parse_var_dec()?);
        }
        let statements = self.parse_statements()?;
        self.expect_symbol('}')?;
        Ok(SubroutineBody { var_decs, statements })
    }

    fn parse_var_dec(&mut self) -> PResult<VarDec> {
        self.expect_keyword(Keyword::Var)?;
        let var_type = self.parse_type()?;
        let mut names = Vec::new();
        names.push(self.parse_declared_name(&var_type, Category::Var)?);
        while self.at_symbol(',') {
            self.advance();
            names.push(self.parse_declared_name(&var_type, Category::Var)?);
        }
        self.expect_symbol(';')?;
        Ok(VarDec { var_type, names })
    }

    fn parse_statements(&mut self) -> PResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            let is_statement_start = matches!(
                self.current().map(|t| &t.token),
                Some(Token::Keyword(Keyword::Let))
                    | Some(Token::Keyword(Keyword::If))
                    | Some(Token::Keyword(Keyword::While))
                    | Some(Token::Keyword(Keyword::Do))
                    | Some(Token::Keyword(Keyword::Return))
            );
            if !is_statement_start {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> PResult<Statement> {
        match self.current().map(|t| &t.token) {
            Some(Token::Keyword(Keyword::Let)) => Ok(Statement::Let(self.parse_let_statement()?)),
            Some(Token::Keyword(Keyword::If)) => Ok(Statement::If(self.parse_if_statement()?)),
            Some(Token::Keyword(Keyword::While)) => Ok(Statement::While(self.parse_while_statement()?)),
            Some(Token::Keyword(Keyword::Do)) => Ok(Statement::Do(self.parse_do_statement()?)),
            Some(Token::Keyword(Keyword::Return)) => Ok(Statement::Return(self.parse_return_statement()?)),
            _ => Err(self.unexpected("a statement")),
        }
    }

    fn parse_let_statement(&mut self) -> PResult<LetStatement> {
        self.expect_keyword(Keyword::Let)?;
        let (name, span) = self.expect_identifier()?;
        let target = self.resolve_use(name, span);

        let index = if self.at_symbol('[') {
            self.advance();
            let expr = self.parse_expression()?;
            self.expect_symbol(']')?;
            Some(expr)
        } else {
            None
        };

        self.expect_symbol('=')?;
        let value = self.parse_expression()?;
        self.expect_symbol(';')?;
        Ok(LetStatement { target, index, value })
    }

    fn parse_if_statement(&mut self) -> PResult<IfStatement> {
        self.expect_keyword(Keyword::If)?;
        self.expect_symbol('(')?;
        let condition = self.parse_expression()?;
        self.expect_symbol(')')?;
        self.expect_symbol('{')?;
        let then_branch = self.parse_statements()?;
        self.expect_symbol('}')?;

        let else_branch = if self.at_keyword(Keyword::Else) {
            self.advance();
            self.expect_symbol('{')?;
            let stmts = self.parse_statements()?;
            self.expect_symbol('}')?;
            Some(stmts)
        } else {
            None
        };

        Ok(IfStatement { condition, then_branch, else_branch })
    }

    fn parse_while_statement(&mut self) -> PResult<WhileStatement> {
        self.expect_keyword(Keyword::While)?;
        self.expect_symbol('(')?;
        let condition = self.parse_expression()?;
        self.expect_symbol(')')?;
        self.expect_symbol('{')?;
        let body = self.parse_statements()?;
        self.expect_symbol('}')?;
        Ok(WhileStatement { condition, body })
    }

    fn parse_do_statement(&mut self) -> PResult<SubroutineCall> {
        self.expect_keyword(Keyword::Do)?;
        let call = self.parse_subroutine_call()?;
        self.expect_symbol(';')?;
        Ok(call)
    }

    fn parse_return_statement(&mut self) -> PResult<ReturnStatement> {
        self.expect_keyword(Keyword::Return)?;
        let value = if self.at_symbol(';') { None } else { Some(self.parse_expression()?) };
        self.expect_symbol(';')?;
        Ok(ReturnStatement { value })
    }

    fn parse_expression(&mut self) -> PResult<Expression> {
        let head = self.parse_term()?;
        let mut rest = Vec::new();
        while let Some(op) = self.peek_bin_op() {
            self.advance();
            let term = self.parse_term()?;
            rest.push((op, term));
        }
        Ok(Expression { head, rest })
    }

    fn peek_bin_op(&self) -> Option<BinOp> {
        match self.current().map(|t| &t.token) {
            Some(Token::Symbol('+')) => Some(BinOp::Add),
            Some(Token::Symbol('-')) => Some(BinOp::Sub),
            Some(Token::Symbol('*')) => Some(BinOp::Mul),
            Some(Token::Symbol('/')) => Some(BinOp::Div),
            Some(Token::Symbol('&')) => Some(BinOp::And),
            Some(Token::Symbol('|')) => Some(BinOp::Or),
            Some(Token::Symbol('<')) => Some(BinOp::Lt),
            Some(Token::Symbol('>')) => Some(BinOp::Gt),
            Some(Token::Symbol('=')) => Some(BinOp::Eq),
            _ => None,
        }
    }

    fn parse_term(&mut self) -> PResult<Term> {
        match self.current().map(|t| t.token.clone()) {
            Some(Token::IntConst(n)) => {
                self.advance();
                Ok(Term::IntConst(n))
            },
            Some(Token::StringConst(s)) => {
                self.advance();
                Ok(Term::StringConst(s))
            },
            Some(Token::Keyword(Keyword::True)) => {
                self.advance();
                Ok(Term::KeywordConst(KeywordConstant::True))
            },
            Some(Token::Keyword(Keyword::False)) => {
                self.advance();
                Ok(Term::KeywordConst(KeywordConstant::False))
            },
            Some(Token::Keyword(Keyword::Null)) => {
                self.advance();
                Ok(Term::KeywordConst(KeywordConstant::Null))
            },
            Some(Token::Keyword(Keyword::This)) => {
                self.advance();
                Ok(Term::KeywordConst(KeywordConstant::This))
            },
            Some(Token::Symbol('-')) => {
                self.advance();
                Ok(Term::Unary(UnaryOp::Neg, Box::new(self.parse_term()?)))
            },
            Some(Token::Symbol('~')) => {
                self.advance();
                Ok(Term::Unary(UnaryOp::Not, Box::new(self.parse_term()?)))
            },
            Some(Token::Symbol('(')) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_symbol(')')?;
                Ok(Term::Paren(Box::new(expr)))
            },
            Some(Token::Identifier(name)) => {
                let span = self.current().unwrap().span;
                match self.peek(1).map(|t| &t.token) {
                    Some(Token::Symbol('[')) => {
                        self.advance();
                        let array = self.resolve_use(name, span);
                        self.expect_symbol('[')?;
                        let index = self.parse_expression()?;
                        self.expect_symbol(']')?;
                        Ok(Term::Index { array, index: Box::new(index) })
                    },
                    Some(Token::Symbol('(')) | Some(Token::Symbol('.')) => {
                        Ok(Term::Call(self.parse_subroutine_call()?))
                    },
                    _ => {
                        self.advance();
                        Ok(Term::Var(self.resolve_use(name, span)))
                    },
                }
            },
            _ => Err(self.unexpected("a term")),
        }
    }

    /// Disambiguates the two surface forms: `name(args)` implicitly calls a
    /// method on the current object, while `first.second(args)` resolves
    /// `first` as a variable if one is in scope, else treats it as a class
    /// name; `second` is always the subroutine being invoked.
    fn parse_subroutine_call(&mut self) -> PResult<SubroutineCall> {
        let (first, first_span) = self.expect_identifier()?;

        if self.at_symbol('(') {
            let name = self.subroutine_ref(first, first_span);
            self.advance();
            let args = self.parse_expression_list()?;
            self.expect_symbol(')')?;
            return Ok(SubroutineCall::Bare { name, args });
        }

        self.expect_symbol('.')?;
        let receiver = self.resolve_use(first, first_span);
        let (method, method_span) = self.expect_identifier()?;
        let name = self.subroutine_ref(method, method_span);
        self.expect_symbol('(')?;
        let args = self.parse_expression_list()?;
        self.expect_symbol(')')?;
        Ok(SubroutineCall::Qualified { receiver, name, args })
    }

    fn parse_expression_list(&mut self) -> PResult<Vec<Expression>> {
        let mut args = Vec::new();
        if self.at_symbol(')') {
            return Ok(args);
        }
        args.push(self.parse_expression()?);
        while self.at_symbol(',') {
            self.advance();
            args.push(self.parse_expression()?);
        }
        Ok(args)
    }
}

fn to_var_category(category: Category) -> VarCategory {
    match category {
        Category::Static => VarCategory::Static,
        Category::Field => VarCategory::Field,
        Category::Arg => VarCategory::Arg,
        Category::Var => VarCategory::Var,
    }
}

/// Parses a single class from a finished token stream.
pub fn parse(tokens: &[SpannedToken]) -> PResult<Class> {
    let mut parser = Parser::new(tokens);
    let class = parser.parse_class()?;
    if let Some(extra) = parser.current() {
        return Err(ParseError::Unexpected {
            expected: "end of input".to_string(),
            found: Parser::describe(&extra.token),
            span: extra.span,
        });
    }
    Ok(class)
}
