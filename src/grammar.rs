//! Definitions of the frozen grammar artifact and its queries.

use std::collections::HashMap;
use std::fmt::Write;

use crate::analysis::{self, Decision};
use crate::builder::GrammarBuilder;
use crate::local_prelude::*;

/// An analyzed, immutable grammar.
///
/// A grammar is built from a collection of rules in one synchronous pass and
/// frozen afterwards; every query below reads sealed results. Analysis
/// failures are captured in [`problem`] rather than aborting construction,
/// so a rejected grammar can still be inspected.
///
/// [`problem`]: Grammar::problem
#[derive(Clone, Debug)]
pub struct Grammar {
    pub(crate) sym_source: SymbolSource,
    pub(crate) entries: Vec<RuleEntry>,
    pub(crate) index: HashMap<Symbol, usize>,
    pub(crate) symbols: SymbolSet,
    pub(crate) terminals: SymbolSet,
    pub(crate) nonterminals: SymbolSet,
    pub(crate) undefined: Vec<Symbol>,
    pub(crate) cycles: Vec<Cycle>,
    pub(crate) problem: Option<GrammarError>,
}

/// A rule together with its sealed analysis results.
#[derive(Clone, Debug)]
pub struct RuleEntry {
    pub(crate) rule: Rule,
    pub(crate) empty: Decision,
    pub(crate) first: Option<SymbolSet>,
    pub(crate) cycles: Vec<Cycle>,
}

/// Classification of a repetition count against a repetition's bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Amount {
    TooFew,
    Enough,
    Limit,
    TooMany,
}

impl Amount {
    pub(crate) fn classify(count: usize, min: u32, max: Option<u32>) -> Amount {
        match max {
            Some(max) if count > max as usize => Amount::TooMany,
            Some(max) if count == max as usize => Amount::Limit,
            _ if count < min as usize => Amount::TooFew,
            _ => Amount::Enough,
        }
    }

    pub(crate) fn valid(self) -> bool {
        matches!(self, Amount::Enough | Amount::Limit)
    }
}

impl RuleEntry {
    pub(crate) fn new(rule: Rule) -> Self {
        RuleEntry {
            rule,
            empty: Decision::Indecisive,
            first: None,
            cycles: vec![],
        }
    }

    /// Returns the underlying rule.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Returns the rule's left-hand side.
    pub fn lhs(&self) -> Symbol {
        self.rule.lhs()
    }

    /// Returns the rule's right-hand side.
    pub fn rhs(&self) -> &Expr {
        self.rule.rhs()
    }

    /// The nullability decision. `Indecisive` survives analysis only on
    /// rules in or behind a left-recursive cycle.
    pub fn empty(&self) -> Decision {
        self.empty
    }

    /// Whether the rule derives the empty string.
    pub fn can_match_empty(&self) -> bool {
        self.empty == Decision::Positive
    }

    /// The rule's FIRST set, or `None` if left recursion kept it from
    /// resolving.
    pub fn first(&self) -> Option<&SymbolSet> {
        self.first.as_ref()
    }

    /// The cycles this rule participates in.
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Whether the rule participates in a left-recursive cycle.
    pub fn is_left_recursive(&self) -> bool {
        !self.cycles.is_empty()
    }
}

impl Grammar {
    /// Analyzes a collection of rules into a frozen grammar. Rules sharing
    /// a left-hand side are merged into the slot of the first occurrence;
    /// right-hand sides are taken as given, without flattening.
    pub fn new(sym_source: SymbolSource, rules: impl IntoIterator<Item = Rule>) -> Grammar {
        analysis::analyze(sym_source, rules.into_iter().collect())
    }

    /// Starts building a grammar rule by rule; see [`GrammarBuilder`].
    pub fn build(sym_source: SymbolSource) -> GrammarBuilder {
        GrammarBuilder::new(sym_source)
    }

    /// The error captured during analysis, if any.
    pub fn problem(&self) -> Option<&GrammarError> {
        self.problem.as_ref()
    }

    /// Returns an error if analysis captured one. Analytical queries refuse
    /// to operate on a known-bad grammar and go through this check.
    pub fn check_problem(&self) -> Result<(), GrammarError> {
        match &self.problem {
            Some(problem) => Err(problem.clone()),
            None => Ok(()),
        }
    }

    /// Returns an iterator over the rules and their analysis results, in
    /// rule insertion order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleEntry> + '_ {
        self.entries.iter()
    }

    /// Returns the rule for the given nonterminal.
    pub fn rule(&self, lhs: Symbol) -> Option<&RuleEntry> {
        self.index.get(&lhs).map(|&idx| &self.entries[idx])
    }

    /// Checks whether the given nonterminal has a rule.
    pub fn has_rule(&self, lhs: Symbol) -> bool {
        self.index.contains_key(&lhs)
    }

    /// Every symbol occurring in the grammar, on either side of a rule.
    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    /// Every terminal occurring in the grammar.
    pub fn terminals(&self) -> &SymbolSet {
        &self.terminals
    }

    /// Every nonterminal occurring in the grammar.
    pub fn nonterminals(&self) -> &SymbolSet {
        &self.nonterminals
    }

    /// Checks whether the symbol occurs anywhere in the grammar.
    pub fn has(&self, sym: Symbol) -> bool {
        self.symbols.contains(&sym)
    }

    /// Nonterminals referenced by some right-hand side but lacking a rule.
    pub fn undefined(&self) -> &[Symbol] {
        &self.undefined
    }

    /// The left-recursive cycles, in discovery order.
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Whether the nonterminal derives the empty string.
    pub fn can_match_empty(&self, lhs: Symbol) -> Result<bool, GrammarError> {
        self.check_problem()?;
        Ok(self.defined_rule(lhs)?.can_match_empty())
    }

    /// The set of terminals a derivation from the nonterminal can begin
    /// with.
    pub fn first_set(&self, lhs: Symbol) -> Result<&SymbolSet, GrammarError> {
        self.check_problem()?;
        let entry = self.defined_rule(lhs)?;
        Ok(entry
            .first()
            .expect("FIRST set missing for a rule outside any cycle"))
    }

    fn defined_rule(&self, lhs: Symbol) -> Result<&RuleEntry, GrammarError> {
        self.rule(lhs).ok_or_else(|| GrammarError::Malformed {
            reason: format!("no rule for {}", self.sym_source.name_of(lhs)),
        })
    }

    /// Reports the lookahead at a position inside an expression: the
    /// terminals that may come next are added to `out`, and the returned
    /// flag tells whether the position is already a valid completion.
    pub fn next(
        &self,
        expr: &Expr,
        index: usize,
        out: &mut SymbolSet,
    ) -> Result<bool, GrammarError> {
        self.check_problem()?;
        self.check_expr(expr)?;
        Ok(self.lookahead(expr, index, out))
    }

    /// Checks that the expression only references this grammar's rules and
    /// uses symbols under their declared kinds.
    pub(crate) fn check_expr(&self, expr: &Expr) -> Result<(), GrammarError> {
        if let Err(sym) = expr.check_kinds() {
            return Err(GrammarError::Malformed {
                reason: format!(
                    "symbol {} is used against its declared kind",
                    self.sym_source.name_of(sym)
                ),
            });
        }
        for sym in expr.nonterminals() {
            if !self.has_rule(sym) {
                return Err(GrammarError::Malformed {
                    reason: format!("no rule for {}", self.sym_source.name_of(sym)),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn lookahead(&self, expr: &Expr, index: usize, out: &mut SymbolSet) -> bool {
        match expr {
            Expr::Terminal(sym) => {
                if index == 0 {
                    out.insert(*sym);
                    false
                } else {
                    true
                }
            }
            Expr::Any => {
                if index == 0 {
                    out.extend(self.terminals.iter().copied());
                    false
                } else {
                    true
                }
            }
            Expr::Negate(excluded) => {
                if index == 0 {
                    out.extend(
                        self.terminals
                            .iter()
                            .copied()
                            .filter(|sym| !excluded.contains(sym)),
                    );
                    false
                } else {
                    true
                }
            }
            Expr::Nonterminal(sym) => {
                if index == 0 {
                    let entry = self.rule(*sym).expect("checked: nonterminal has a rule");
                    let first = entry
                        .first()
                        .expect("FIRST set missing for a rule outside any cycle");
                    out.extend(first.iter().copied());
                    entry.can_match_empty()
                } else {
                    true
                }
            }
            Expr::Repeat { expr, min, max } => {
                let amount = Amount::classify(index, *min, *max);
                if matches!(amount, Amount::TooFew | Amount::Enough) {
                    self.lookahead(expr, 0, out);
                }
                amount.valid()
            }
            Expr::Seq(items) => {
                for item in items.get(index..).unwrap_or(&[]) {
                    if !self.lookahead(item, 0, out) {
                        return false;
                    }
                }
                true
            }
            Expr::Alt(items) => {
                if index == 0 {
                    let mut matches = false;
                    for item in items {
                        matches |= self.lookahead(item, 0, out);
                    }
                    matches
                } else {
                    true
                }
            }
            Expr::Empty => true,
            Expr::Never => false,
        }
    }

    /// Formats the grammar to a `String`, one `lhs := rhs` line per rule.
    pub fn describe(&self) -> String {
        let mut result = String::new();
        for entry in self.rules() {
            writeln!(&mut result, "{}", entry.rule().describe(&self.sym_source))
                .expect("writing to String failed");
        }
        result
    }
}
