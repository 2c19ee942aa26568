//! Diagnostic codes for categorizing front-end errors.
//!
//! Codes follow the `{prefix}{number}` shape, grouped by the error taxonomy:
//! lexical (L), syntactic (P for parser), semantic (S), and I/O (D for driver).
//!
//! # Examples
//!
//! ```
//! use jackc_util::diagnostic::DiagnosticCode;
//!
//! let code = DiagnosticCode::L_UNTERMINATED_STRING;
//! assert_eq!(code.prefix(), "L");
//! assert_eq!(code.as_str(), "L0002");
//! ```

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    #[inline]
    pub const fn number(&self) -> u32 {
        self.number
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // Lexical errors (comment stripper, tokenizer) — §7.1
    /// L0001: unrecognized character.
    pub const L_UNKNOWN_CHAR: Self = Self::new("L", 1);
    /// L0002: unterminated string constant (newline or EOF before closing quote).
    pub const L_UNTERMINATED_STRING: Self = Self::new("L", 2);
    /// L0003: unterminated block comment (EOF before `*/`).
    pub const L_UNTERMINATED_COMMENT: Self = Self::new("L", 3);
    /// L0004: integer constant outside 0..32767.
    pub const L_INTEGER_OUT_OF_RANGE: Self = Self::new("L", 4);

    // Syntactic errors (parser) — §7.2
    /// P0001: expected token not found.
    pub const P_EXPECTED_TOKEN: Self = Self::new("P", 1);
    /// P0002: unexpected token where a grammar production could not start.
    pub const P_UNEXPECTED_TOKEN: Self = Self::new("P", 2);
    /// P0003: unexpected end of token stream.
    pub const P_UNEXPECTED_EOF: Self = Self::new("P", 3);

    // Semantic errors (identifier resolution) — §7.3
    /// S0001: identifier used before it was declared in any reachable scope.
    pub const S_UNDECLARED_IDENTIFIER: Self = Self::new("S", 1);
    /// S0002: identifier declared twice in the same scope.
    pub const S_DUPLICATE_DECLARATION: Self = Self::new("S", 2);

    // Driver / I/O errors — §7.4
    /// D0001: input path does not exist or is not readable.
    pub const D_INPUT_UNREADABLE: Self = Self::new("D", 1);
    /// D0002: output file could not be written.
    pub const D_OUTPUT_UNWRITABLE: Self = Self::new("D", 2);
    /// D0003: no `.jack` files found under the given path.
    pub const D_NO_JACK_FILES: Self = Self::new("D", 3);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_pads_to_four_digits() {
        assert_eq!(DiagnosticCode::new("L", 1).as_str(), "L0001");
        assert_eq!(DiagnosticCode::new("P", 42).as_str(), "P0042");
    }

    #[test]
    fn predefined_codes_have_expected_prefixes() {
        assert_eq!(DiagnosticCode::L_UNKNOWN_CHAR.prefix(), "L");
        assert_eq!(DiagnosticCode::P_EXPECTED_TOKEN.prefix(), "P");
        assert_eq!(DiagnosticCode::S_DUPLICATE_DECLARATION.prefix(), "S");
        assert_eq!(DiagnosticCode::D_NO_JACK_FILES.prefix(), "D");
    }

    #[test]
    fn codes_compare_by_value() {
        assert_eq!(DiagnosticCode::new("L", 2), DiagnosticCode::L_UNTERMINATED_STRING);
        assert_ne!(DiagnosticCode::L_UNKNOWN_CHAR, DiagnosticCode::L_UNTERMINATED_STRING);
    }
}
