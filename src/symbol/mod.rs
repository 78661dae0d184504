//! A type that can represent symbols in a context-free grammar. Symbols are
//! distinguished by their IDs and carry the kind they were declared with.

pub mod source;

use std::collections::BTreeSet;
use std::num::NonZeroU32;

pub use self::source::{SymbolName, SymbolSource};

/// A set of symbols, ordered by ID.
pub type SymbolSet = BTreeSet<Symbol>;

/// Our common grammar symbol type.
///
/// A symbol is an integer handle into the [`SymbolSource`] it was grabbed
/// from, together with its kind. Best to be careful not to mix symbols
/// between different sources.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub struct Symbol {
    pub(crate) n: NonZeroU32,
    pub(crate) kind: SymbolKind,
}

/// The two disjoint sorts a symbol may belong to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub enum SymbolKind {
    /// An atomic lexical token kind.
    Terminal,
    /// A symbol defined by a grammar rule.
    Nonterminal,
}

impl Symbol {
    pub(crate) fn new(id: u32, kind: SymbolKind) -> Self {
        Symbol {
            n: NonZeroU32::new(id + 1).expect("ran out of Symbol space?"),
            kind,
        }
    }

    /// Returns the symbol's numeric value.
    pub fn usize(self) -> usize {
        self.n.get() as usize - 1
    }

    /// Returns the kind the symbol was declared with.
    pub fn kind(self) -> SymbolKind {
        self.kind
    }

    /// Checks whether the symbol is a terminal.
    pub fn is_terminal(self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    /// Checks whether the symbol is a nonterminal.
    pub fn is_nonterminal(self) -> bool {
        self.kind == SymbolKind::Nonterminal
    }
}
