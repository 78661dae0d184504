//! The analysis pipeline behind [`Grammar`] construction.
//!
//! Rules are merged by left-hand side, the symbol inventory is collected and
//! validated, and two fixed points run in sequence: nullability with
//! interleaved left-recursion discovery, then FIRST sets.

mod emptiness;
mod first;

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::grammar::{Grammar, RuleEntry};
use crate::local_prelude::*;

/// A three-state answer used by the fixed-point solvers.
///
/// `Indecisive` is a transient state: after analysis, it only survives on
/// rules that sit in (or behind) a left-recursive cycle.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Decision {
    /// Yes.
    Positive,
    /// No.
    Negative,
    /// Not determinable yet.
    Indecisive,
}

/// Transient analyzer state; freezing turns it into a [`Grammar`].
pub(crate) struct Analyzer {
    pub(crate) sym_source: SymbolSource,
    pub(crate) entries: Vec<RuleEntry>,
    pub(crate) index: HashMap<Symbol, usize>,
    pub(crate) symbols: SymbolSet,
    pub(crate) terminals: SymbolSet,
    pub(crate) nonterminals: SymbolSet,
    pub(crate) undefined: Vec<Symbol>,
    pub(crate) cycles: Vec<Cycle>,
}

pub(crate) fn analyze(sym_source: SymbolSource, rules: Vec<Rule>) -> Grammar {
    let mut analyzer = Analyzer::new(sym_source);
    analyzer.absorb(rules);
    let mut problem = analyzer.collect().err();
    if problem.is_none() {
        problem = analyzer.check_defined().err();
    }
    if problem.is_none() {
        let recursion = analyzer.solve_emptiness().err();
        // FIRST sets of rules outside the cycles are still worth having
        // for inspection, so the pass runs even after a recursion error.
        analyzer.solve_first_sets();
        problem = recursion;
    }
    analyzer.freeze(problem)
}

impl Analyzer {
    fn new(sym_source: SymbolSource) -> Self {
        Analyzer {
            sym_source,
            entries: vec![],
            index: HashMap::new(),
            symbols: SymbolSet::new(),
            terminals: SymbolSet::new(),
            nonterminals: SymbolSet::new(),
            undefined: vec![],
            cycles: vec![],
        }
    }

    /// Installs the rules in submission order, merging every rule into the
    /// slot of the first one with the same left-hand side.
    fn absorb(&mut self, rules: Vec<Rule>) {
        for rule in rules {
            match self.index.entry(rule.lhs()) {
                Entry::Occupied(slot) => {
                    let idx = *slot.get();
                    let merged = self.entries[idx].rule.clone().merge(rule);
                    self.entries[idx].rule = merged;
                }
                Entry::Vacant(slot) => {
                    slot.insert(self.entries.len());
                    self.entries.push(RuleEntry::new(rule));
                }
            }
        }
    }

    /// Collects the symbol inventory and checks the construction contract:
    /// every symbol must come from our source and be used under its
    /// declared kind.
    fn collect(&mut self) -> Result<(), GrammarError> {
        for entry in &self.entries {
            let lhs = entry.rule.lhs();
            if !self.sym_source.owns(lhs) {
                return Err(self.foreign_symbol(lhs));
            }
            self.symbols.insert(lhs);
            self.nonterminals.insert(lhs);
            if let Err(sym) = entry.rule.rhs().check_kinds() {
                return Err(GrammarError::Malformed {
                    reason: format!(
                        "symbol {} is used against its declared kind",
                        self.sym_source.name_of(sym)
                    ),
                });
            }
            for sym in entry.rule.symbols() {
                if !self.sym_source.owns(sym) {
                    return Err(self.foreign_symbol(sym));
                }
                self.symbols.insert(sym);
                match sym.kind() {
                    SymbolKind::Terminal => self.terminals.insert(sym),
                    SymbolKind::Nonterminal => self.nonterminals.insert(sym),
                };
            }
        }
        Ok(())
    }

    fn foreign_symbol(&self, sym: Symbol) -> GrammarError {
        GrammarError::Malformed {
            reason: format!("symbol {} does not come from this source", self.sym_source.name_of(sym)),
        }
    }

    /// Every nonterminal occurring anywhere must have a rule.
    fn check_defined(&mut self) -> Result<(), GrammarError> {
        for &sym in &self.nonterminals {
            if !self.index.contains_key(&sym) {
                self.undefined.push(sym);
            }
        }
        if self.undefined.is_empty() {
            Ok(())
        } else {
            let names = self
                .undefined
                .iter()
                .map(|&sym| self.sym_source.name_of(sym).into_owned())
                .collect();
            Err(GrammarError::UndefinedSymbols {
                symbols: self.undefined.clone(),
                names,
            })
        }
    }

    fn freeze(self, problem: Option<GrammarError>) -> Grammar {
        Grammar {
            sym_source: self.sym_source,
            entries: self.entries,
            index: self.index,
            symbols: self.symbols,
            terminals: self.terminals,
            nonterminals: self.nonterminals,
            undefined: self.undefined,
            cycles: self.cycles,
            problem,
        }
    }
}
