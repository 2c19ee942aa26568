//! Interned strings for identifiers and keywords.
//!
//! The front end runs single file at a time and single-threaded, so this is a
//! plain `RefCell`-guarded interner rather than the concurrent, lock-free
//! table a multi-threaded compiler would need.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A cheap, copyable handle to an interned string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Self {
        INTERNER.with(|i| i.borrow_mut().intern(s))
    }

    pub fn as_str(&self) -> Rc<str> {
        INTERNER.with(|i| i.borrow().resolve(*self))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct Interner {
    map: FxHashMap<Rc<str>, u32>,
    strings: Vec<Rc<str>>,
}

impl Interner {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            strings: Vec::new(),
        }
    }

    fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&id) = self.map.get(s) {
            return Symbol(id);
        }
        let rc: Rc<str> = Rc::from(s);
        let id = self.strings.len() as u32;
        self.strings.push(rc.clone());
        self.map.insert(rc, id);
        Symbol(id)
    }

    fn resolve(&self, sym: Symbol) -> Rc<str> {
        self.strings[sym.0 as usize].clone()
    }
}

thread_local! {
    static INTERNER: RefCell<Interner> = RefCell::new(Interner::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_the_same_symbol() {
        let a = Symbol::intern("foo");
        let b = Symbol::intern("foo");
        assert_eq!(a, b);
    }

    #[test]
    fn different_text_interns_differently() {
        let a = Symbol::intern("foo");
        let b = Symbol::intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn round_trips_through_as_str() {
        let sym = Symbol::intern("classVarDec");
        assert_eq!(&*sym.as_str(), "classVarDec");
    }
}
