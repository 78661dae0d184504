//! Our symbol sources. You can grab symbols from here.
//!
//! A symbol source tracks the symbols that were declared, along with their
//! names and kinds. Every source starts out with the end-of-input terminal
//! already declared under the name `$`.

use std::borrow::{Borrow, Cow};
use std::collections::HashMap;
use std::ops;
use std::rc::Rc;

use super::{Symbol, SymbolKind};

/// Wrapper for a string holding a symbol's name. Meant to be cheap to clone.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SymbolName {
    name: Rc<str>,
}

impl ops::Deref for SymbolName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.name[..]
    }
}

impl<'a> From<&'a str> for SymbolName {
    fn from(value: &'a str) -> Self {
        SymbolName {
            name: Rc::from(value),
        }
    }
}

impl From<String> for SymbolName {
    fn from(value: String) -> Self {
        SymbolName {
            name: Rc::from(&value[..]),
        }
    }
}

impl Borrow<str> for SymbolName {
    fn borrow(&self) -> &str {
        &self.name[..]
    }
}

/// A source of symbols with names and kinds.
#[derive(Clone, Debug)]
pub struct SymbolSource {
    names: Vec<SymbolName>,
    kinds: Vec<SymbolKind>,
}

impl Default for SymbolSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolSource {
    /// Creates a symbol source. The end-of-input terminal `$` occupies the
    /// first slot.
    pub fn new() -> Self {
        let mut this = SymbolSource {
            names: vec![],
            kinds: vec![],
        };
        this.next_sym("$".into(), SymbolKind::Terminal);
        this
    }

    /// Returns the distinguished end-of-input terminal.
    pub fn eof(&self) -> Symbol {
        Symbol::new(0, SymbolKind::Terminal)
    }

    /// Declares a new terminal symbol.
    pub fn terminal(&mut self, name: impl Into<SymbolName>) -> Symbol {
        self.next_sym(name.into(), SymbolKind::Terminal)
    }

    /// Declares a new nonterminal symbol.
    pub fn nonterminal(&mut self, name: impl Into<SymbolName>) -> Symbol {
        self.next_sym(name.into(), SymbolKind::Nonterminal)
    }

    /// Declares terminal symbols, one per given name.
    pub fn terminals<const N: usize>(&mut self, names: [&str; N]) -> [Symbol; N] {
        names.map(|name| self.terminal(name))
    }

    /// Declares nonterminal symbols, one per given name.
    pub fn nonterminals<const N: usize>(&mut self, names: [&str; N]) -> [Symbol; N] {
        names.map(|name| self.nonterminal(name))
    }

    fn next_sym(&mut self, name: SymbolName, kind: SymbolKind) -> Symbol {
        let sym = Symbol::new(self.names.len() as u32, kind);
        self.names.push(name);
        self.kinds.push(kind);
        sym
    }

    /// Returns either the `Symbol`'s declared name, or a formatted name with
    /// the letter `g` followed by the symbol's numeric value in case the
    /// `Symbol` comes from elsewhere.
    pub fn name_of(&self, sym: Symbol) -> Cow<'_, str> {
        match self.names.get(sym.usize()) {
            Some(name) => Cow::Borrowed(&name[..]),
            None => Cow::Owned(format!("g{}", sym.usize())),
        }
    }

    /// Checks whether the symbol was declared by this source under the kind
    /// it claims to have.
    pub fn owns(&self, sym: Symbol) -> bool {
        self.kinds.get(sym.usize()) == Some(&sym.kind())
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.names.len()
    }

    /// Creates a `HashMap` where you can access a `Symbol` through its name.
    pub fn name_map(&self) -> HashMap<SymbolName, Symbol> {
        self.names
            .iter()
            .zip(self.kinds.iter())
            .enumerate()
            .map(|(id, (name, &kind))| (name.clone(), Symbol::new(id as u32, kind)))
            .collect::<HashMap<_, _>>()
    }
}
