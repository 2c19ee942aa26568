//! Serializes the two output artifacts: the flat token stream (format A)
//! and the annotated parse tree (format B). XML escaping is applied only
//! here, at the presentation boundary — every internal representation
//! upstream carries unescaped text.

use jackc_lex::SpannedToken;

use crate::ast::*;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders format A: one `<category> lexeme </category>` line per token,
/// wrapped in `<tokens>`/`</tokens>`.
pub fn emit_token_stream(tokens: &[SpannedToken]) -> String {
    let mut out = String::from("<tokens>\n");
    for spanned in tokens {
        let category = spanned.token.category();
        out.push_str(&format!("<{0}> {1} </{0}>\n", category, escape(&spanned.token.lexeme())));
    }
    out.push_str("</tokens>\n");
    out
}

struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    fn new() -> Self {
        Self { out: String::new(), depth: 0 }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn open(&mut self, tag: &str) {
        self.indent();
        self.out.push_str(&format!("<{}>\n", tag));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.indent();
        self.out.push_str(&format!("</{}>\n", tag));
    }

    fn leaf(&mut self, category: &str, lexeme: &str) {
        self.indent();
        self.out.push_str(&format!("<{0}> {1} </{0}>\n", category, escape(lexeme)));
    }

    fn keyword(&mut self, text: &str) {
        self.leaf("keyword", text);
    }

    fn symbol(&mut self, c: char) {
        self.leaf("symbol", &c.to_string());
    }

    fn ident(&mut self, ident: &Ident) {
        self.indent();
        match ident.role {
            IdentRole::Class => {
                self.out.push_str(&format!(
                    "<identifier category=\"class\"> {} </identifier>\n",
                    escape(&ident.name)
                ));
            },
            IdentRole::Subroutine => {
                self.out.push_str(&format!(
                    "<identifier category=\"subroutine\"> {} </identifier>\n",
                    escape(&ident.name)
                ));
            },
            IdentRole::Var { category, index, usage } => {
                let usage_str = match usage {
                    Usage::Declared => "declared",
                    Usage::Used => "used",
                };
                self.out.push_str(&format!(
                    "<identifier category=\"{}\" index=\"{}\" usage=\"{}\"> {} </identifier>\n",
                    category.as_str(),
                    index,
                    usage_str,
                    escape(&ident.name)
                ));
            },
        }
    }
}

/// Renders format B: the annotated parse tree for one class.
pub fn emit_class(class: &Class) -> String {
    let mut w = Writer::new();
    write_class(&mut w, class);
    w.out
}

fn write_class(w: &mut Writer, class: &Class) {
    w.open("class");
    w.keyword("class");
    w.ident(&class.name);
    w.symbol('{');
    for dec in &class.var_decs {
        write_class_var_dec(w, dec);
    }
    for sub in &class.subroutines {
        write_subroutine_dec(w, sub);
    }
    w.symbol('}');
    w.close("class");
}

fn write_type(w: &mut Writer, ty: &TypeRef) {
    match ty {
        TypeRef::Int => w.keyword("int"),
        TypeRef::Char => w.keyword("char"),
        TypeRef::Boolean => w.keyword("boolean"),
        TypeRef::Class(ident) => w.ident(ident),
    }
}

fn write_class_var_dec(w: &mut Writer, dec: &ClassVarDec) {
    w.open("classVarDec");
    match dec.kind {
        ClassVarKind::Static => w.keyword("static"),
        ClassVarKind::Field => w.keyword("field"),
    }
    write_type(w, &dec.var_type);
    for (i, name) in dec.names.iter().enumerate() {
        if i > 0 {
            w.symbol(',');
        }
        w.ident(name);
    }
    w.symbol(';');
    w.close("classVarDec");
}

fn write_subroutine_dec(w: &mut Writer, sub: &SubroutineDec) {
    w.open("subroutineDec");
    match sub.kind {
        SubroutineKind::Constructor => w.keyword("constructor"),
        SubroutineKind::Function => w.keyword("function"),
        SubroutineKind::Method => w.keyword("method"),
    }
    match &sub.return_type {
        ReturnType::Void => w.keyword("void"),
        ReturnType::Type(ty) => write_type(w, ty),
    }
    w.ident(&sub.name);
    w.symbol('(');
    write_parameter_list(w, &sub.params);
    w.symbol(')');
    write_subroutine_body(w, &sub.body);
    w.close("subroutineDec");
}

fn write_parameter_list(w: &mut Writer, params: &[Param]) {
    w.open("parameterList");
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            w.symbol(',');
        }
        write_type(w, &param.param_type);
        w.ident(&param.name);
    }
    w.close("parameterList");
}

fn write_subroutine_body(w: &mut Writer, body: &SubroutineBody) {
    w.open("subroutineBody");
    w.symbol('{');
    for dec in &body.var_decs {
        write_var_dec(w, dec);
    }
    write_statements(w, &body.statements);
    w.symbol('}');
    w.close("subroutineBody");
}

fn write_var_dec(w: &mut Writer, dec: &VarDec) {
    w.open("varDec");
    w.keyword("var");
    write_type(w, &dec.var_type);
    for (i, name) in dec.names.iter().enumerate() {
        if i > 0 {
            w.symbol(',');
        }
        w.ident(name);
    }
    w.symbol(';');
    w.close("varDec");
}

fn write_statements(w: &mut Writer, statements: &[Statement]) {
    w.open("statements");
    for stmt in statements {
        write_statement(w, stmt);
    }
    w.close("statements");
}

fn write_statement(w: &mut Writer, stmt: &Statement) {
    match stmt {
        Statement::Let(s) => write_let(w, s),
        Statement::If(s) => write_if(w, s),
        Statement::While(s) => write_while(w, s),
        Statement::Do(s) => write_do(w, s),
        Statement::Return(s) => write_return(w, s),
    }
}

fn write_let(w: &mut Writer, stmt: &LetStatement) {
    w.open("letStatement");
    w.keyword("let");
    w.ident(&stmt.target);
    if let Some(index) = &stmt.index {
        w.symbol('[');
        write_expression(w, index);
        w.symbol(']');
    }
    w.symbol('=');
    write_expression(w, &stmt.value);
    w.symbol(';');
    w.close("letStatement");
}

fn write_if(w: &mut Writer, stmt: &IfStatement) {
    w.open("ifStatement");
    w.keyword("if");
    w.symbol('(');
    write_expression(w, &stmt.condition);
    w.symbol(')');
    w.symbol('{');
    write_statements(w, &stmt.then_branch);
    w.symbol('}');
    if let Some(else_branch) = &stmt.else_branch {
        w.keyword("else");
        w.symbol('{');
        write_statements(w, else_branch);
        w.symbol('}');
    }
    w.close("ifStatement");
}

fn write_while(w: &mut Writer, stmt: &WhileStatement) {
    w.open("whileStatement");
    w.keyword("while");
    w.symbol('(');
    write_expression(w, &stmt.condition);
    w.symbol(')');
    w.symbol('{');
    write_statements(w, &stmt.body);
    w.symbol('}');
    w.close("whileStatement");
}

fn write_do(w: &mut Writer, call: &SubroutineCall) {
    w.open("doStatement");
    w.keyword("do");
    write_subroutine_call(w, call);
    w.symbol(';');
    w.close("doStatement");
}

fn write_return(w: &mut Writer, stmt: &ReturnStatement) {
    w.open("returnStatement");
    w.keyword("return");
    if let Some(value) = &stmt.value {
        write_expression(w, value);
    }
    w.symbol(';');
    w.close("returnStatement");
}

fn write_expression(w: &mut Writer, expr: &Expression) {
    w.open("expression");
    write_term(w, &expr.head);
    for (op, term) in &expr.rest {
        w.symbol(op.symbol());
        write_term(w, term);
    }
    w.close("expression");
}

fn write_term(w: &mut Writer, term: &Term) {
    w.open("term");
    match term {
        Term::IntConst(n) => w.leaf("integerConstant", &n.to_string()),
        Term::StringConst(s) => w.leaf("stringConstant", s),
        Term::KeywordConst(k) => w.keyword(match k {
            KeywordConstant::True => "true",
            KeywordConstant::False => "false",
            KeywordConstant::Null => "null",
            KeywordConstant::This => "this",
        }),
        Term::Var(ident) => w.ident(ident),
        Term::Index { array, index } => {
            w.ident(array);
            w.symbol('[');
            write_expression(w, index);
            w.symbol(']');
        },
        Term::Call(call) => write_subroutine_call(w, call),
        Term::Paren(expr) => {
            w.symbol('(');
            write_expression(w, expr);
            w.symbol(')');
        },
        Term::Unary(op, inner) => {
            w.symbol(op.symbol());
            write_term(w, inner);
        },
    }
    w.close("term");
}

fn write_subroutine_call(w: &mut Writer, call: &SubroutineCall) {
    match call {
        SubroutineCall::Bare { name, args } => {
            w.ident(name);
            w.symbol('(');
            write_expression_list(w, args);
            w.symbol(')');
        },
        SubroutineCall::Qualified { receiver, name, args } => {
            w.ident(receiver);
            w.symbol('.');
            w.ident(name);
            w.symbol('(');
            write_expression_list(w, args);
            w.symbol(')');
        },
    }
}

fn write_expression_list(w: &mut Writer, args: &[Expression]) {
    w.open("expressionList");
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            w.symbol(',');
        }
        write_expression(w, arg);
    }
    w.close("expressionList");
}

#[cfg(test)]
mod tests {
    use super::*;
    use jackc_lex::{strip_comments, Tokenizer};
    use jackc_util::Handler;

    #[test]
    fn xml_escapes_reserved_characters_in_string_constants() {
        let source = r#"class C { function void f() { let s = "a<b&c\">d"; return; } }"#;
        let lines = strip_comments(source);
        let mut handler = Handler::new();
        let mut tokenizer = Tokenizer::new(&mut handler);
        let tokens = tokenizer.tokenize(&lines);
        let class = crate::parser::parse(&tokens).unwrap();
        let xml = emit_class(&class);
        assert!(xml.contains("&lt;b&amp;c&quot;&gt;d"));
    }

    #[test]
    fn single_declaration_matches_expected_shape() {
        let source = "class C { static int x; }";
        let lines = strip_comments(source);
        let mut handler = Handler::new();
        let mut tokenizer = Tokenizer::new(&mut handler);
        let tokens = tokenizer.tokenize(&lines);
        let class = crate::parser::parse(&tokens).unwrap();
        let xml = emit_class(&class);
        assert!(xml.contains("<classVarDec>"));
        assert!(xml.contains("category=\"static\" index=\"0\" usage=\"declared\""));
    }

    #[test]
    fn token_stream_wraps_in_tokens_element() {
        let source = "class C {}";
        let lines = strip_comments(source);
        let mut handler = Handler::new();
        let mut tokenizer = Tokenizer::new(&mut handler);
        let tokens = tokenizer.tokenize(&lines);
        let xml = emit_token_stream(&tokens);
        assert!(xml.starts_with("<tokens>\n"));
        assert!(xml.ends_with("</tokens>\n"));
        assert!(xml.contains("<keyword> class </keyword>"));
    }
}
