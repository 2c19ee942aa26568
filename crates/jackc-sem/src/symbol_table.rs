//! The two-scope symbol table the parser consults while it walks the
//! grammar: class scope for `static`/`field` declarations, subroutine scope
//! for `arg`/`var` declarations. Subroutine scope is emptied on entry to
//! every subroutine; class scope lives for the whole class declaration.

use rustc_hash::FxHashMap;

use jackc_util::Span;

use crate::error::SymbolError;

/// The four storage categories a declared variable can have. `class` and
/// `subroutine` identifier roles are attributed at the call site and never
/// stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Static,
    Field,
    Arg,
    Var,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Static => "static",
            Category::Field => "field",
            Category::Arg => "arg",
            Category::Var => "var",
        }
    }

    fn scope(&self) -> Scope {
        match self {
            Category::Static | Category::Field => Scope::Class,
            Category::Arg | Category::Var => Scope::Subroutine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Class,
    Subroutine,
}

/// A declared identifier: its type, its storage category, and its
/// zero-based index within `(scope, category)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRecord {
    pub name: String,
    pub data_type: String,
    pub category: Category,
    pub index: u16,
    span: Span,
}

impl IdentifierRecord {
    pub fn span(&self) -> Span {
        self.span
    }
}

#[derive(Default)]
struct Counters {
    static_count: u16,
    field_count: u16,
    arg_count: u16,
    var_count: u16,
}

impl Counters {
    fn get_mut(&mut self, category: Category) -> &mut u16 {
        match category {
            Category::Static => &mut self.static_count,
            Category::Field => &mut self.field_count,
            Category::Arg => &mut self.arg_count,
            Category::Var => &mut self.var_count,
        }
    }

    fn get(&self, category: Category) -> u16 {
        match category {
            Category::Static => self.static_count,
            Category::Field => self.field_count,
            Category::Arg => self.arg_count,
            Category::Var => self.var_count,
        }
    }

    fn reset_class(&mut self) {
        self.static_count = 0;
        self.field_count = 0;
    }

    fn reset_subroutine(&mut self) {
        self.arg_count = 0;
        self.var_count = 0;
    }
}

/// Scoped storage for every identifier declared in the class currently
/// being compiled. Owned by the parser; its lifetime is nested strictly
/// inside a single `class` compilation.
pub struct SymbolTable {
    class_scope: FxHashMap<String, IdentifierRecord>,
    subroutine_scope: FxHashMap<String, IdentifierRecord>,
    counters: Counters,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            class_scope: FxHashMap::default(),
            subroutine_scope: FxHashMap::default(),
            counters: Counters::default(),
        }
    }

    /// Empties both scopes and zeroes all four counters. Called on entry to
    /// every `class` declaration.
    pub fn start_class(&mut self) {
        self.class_scope.clear();
        self.subroutine_scope.clear();
        self.counters.reset_class();
        self.counters.reset_subroutine();
    }

    /// Empties subroutine scope and zeroes the `arg`/`var` counters. Class
    /// scope and its counters are left untouched.
    pub fn start_subroutine(&mut self) {
        self.subroutine_scope.clear();
        self.counters.reset_subroutine();
    }

    /// Declares `name` with the given type and category. Fails if `name`
    /// already exists in the target scope (`static`/`field` → class scope,
    /// `arg`/`var` → subroutine scope).
    pub fn define(
        &mut self,
        name: &str,
        data_type: &str,
        category: Category,
        span: Span,
    ) -> Result<u16, SymbolError> {
        let index = self.counters.get(category);
        let record = IdentifierRecord {
            name: name.to_string(),
            data_type: data_type.to_string(),
            category,
            index,
            span,
        };

        let scope = match category.scope() {
            Scope::Class => &mut self.class_scope,
            Scope::Subroutine => &mut self.subroutine_scope,
        };

        if let Some(existing) = scope.get(name) {
            return Err(SymbolError::Redefined {
                name: name.to_string(),
                first: existing.span(),
                second: span,
            });
        }

        scope.insert(name.to_string(), record);
        *self.counters.get_mut(category) += 1;
        Ok(index)
    }

    /// Looks up `name`, consulting subroutine scope first so that a
    /// subroutine-local declaration shadows a class-level one of the same
    /// name.
    pub fn lookup(&self, name: &str) -> Option<&IdentifierRecord> {
        self.subroutine_scope.get(name).or_else(|| self.class_scope.get(name))
    }

    /// The current running count for `category`. Exposed for a downstream
    /// code generator that needs the final tally of locals/fields/etc.
    pub fn count(&self, category: Category) -> u16 {
        self.counters.get(category)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_span() -> Span {
        Span::new(0, 1, 1, 1)
    }

    #[test]
    fn start_class_zeroes_all_counters() {
        let mut table = SymbolTable::new();
        table.define("x", "int", Category::Static, dummy_span()).unwrap();
        table.start_class();
        assert_eq!(table.count(Category::Static), 0);
        assert_eq!(table.count(Category::Field), 0);
        assert_eq!(table.count(Category::Arg), 0);
        assert_eq!(table.count(Category::Var), 0);
    }

    #[test]
    fn indices_assigned_in_declaration_order_per_category() {
        let mut table = SymbolTable::new();
        table.start_class();
        assert_eq!(table.define("a", "int", Category::Field, dummy_span()).unwrap(), 0);
        assert_eq!(table.define("b", "int", Category::Field, dummy_span()).unwrap(), 1);
        assert_eq!(table.define("c", "int", Category::Static, dummy_span()).unwrap(), 0);
    }

    #[test]
    fn start_subroutine_clears_locals_but_not_class_scope() {
        let mut table = SymbolTable::new();
        table.start_class();
        table.define("field1", "int", Category::Field, dummy_span()).unwrap();
        table.start_subroutine();
        table.define("local1", "int", Category::Var, dummy_span()).unwrap();
        table.start_subroutine();
        assert!(table.lookup("local1").is_none());
        assert!(table.lookup("field1").is_some());
        assert_eq!(table.count(Category::Var), 0);
    }

    #[test]
    fn subroutine_scope_shadows_class_scope() {
        let mut table = SymbolTable::new();
        table.start_class();
        table.define("n", "int", Category::Field, dummy_span()).unwrap();
        table.start_subroutine();
        table.define("n", "int", Category::Var, dummy_span()).unwrap();
        let found = table.lookup("n").unwrap();
        assert_eq!(found.category, Category::Var);
    }

    #[test]
    fn duplicate_declaration_in_same_scope_is_an_error() {
        let mut table = SymbolTable::new();
        table.start_class();
        table.start_subroutine();
        table.define("i", "int", Category::Var, dummy_span()).unwrap();
        let err = table.define("i", "int", Category::Var, dummy_span()).unwrap_err();
        assert!(matches!(err, SymbolError::Redefined { .. }));
    }

    #[test]
    fn lookup_of_unknown_name_returns_none() {
        let table = SymbolTable::new();
        assert!(table.lookup("mystery").is_none());
    }

    #[test]
    fn implicit_this_occupies_arg_index_zero() {
        let mut table = SymbolTable::new();
        table.start_class();
        table.start_subroutine();
        let idx = table.define("this", "Square", Category::Arg, dummy_span()).unwrap();
        assert_eq!(idx, 0);
        let next = table.define("size", "int", Category::Arg, dummy_span()).unwrap();
        assert_eq!(next, 1);
    }
}
