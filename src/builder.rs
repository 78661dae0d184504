//! Grammars can be built with the builder pattern.

use std::collections::HashMap;

use crate::grammar::Grammar;
use crate::local_prelude::*;

/// The grammar builder.
///
/// Unlike [`Grammar::new`], the builder flattens every right-hand side and
/// merges rules sharing a left-hand side as they come in, so submitting
/// `foo := A` and then `foo := B` leaves one rule `foo := (A | B)`.
pub struct GrammarBuilder {
    sym_source: SymbolSource,
    rules: Vec<Rule>,
    index: HashMap<Symbol, usize>,
}

impl GrammarBuilder {
    /// Creates a grammar builder over the given symbol source.
    pub fn new(sym_source: SymbolSource) -> Self {
        GrammarBuilder {
            sym_source,
            rules: vec![],
            index: HashMap::new(),
        }
    }

    /// Adds a rule to the grammar under construction.
    ///
    /// # Panics
    ///
    /// Panics if the left-hand side is not a nonterminal.
    pub fn rule(mut self, lhs: Symbol, rhs: impl Into<Expr>) -> Self {
        let rule = Rule::new(lhs, rhs.into().flatten());
        match self.index.get(&lhs) {
            Some(&idx) => {
                let merged = self.rules[idx].clone().merge(rule).flatten();
                self.rules[idx] = merged;
            }
            None => {
                self.index.insert(lhs, self.rules.len());
                self.rules.push(rule);
            }
        }
        self
    }

    /// Runs the analysis and freezes the result.
    pub fn finish(self) -> Grammar {
        Grammar::new(self.sym_source, self.rules)
    }
}
