//! This module defines grammar rules. Each rule consists of a single
//! nonterminal on its left-hand side and an expression on its right-hand
//! side.

use std::slice;

use crate::local_prelude::*;

/// Typical grammar rule representation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Rule {
    lhs: Symbol,
    rhs: Expr,
}

impl Rule {
    /// Creates a new rule.
    ///
    /// # Panics
    ///
    /// Panics if the left-hand side is not a nonterminal.
    pub fn new(lhs: Symbol, rhs: impl Into<Expr>) -> Self {
        assert!(
            lhs.is_nonterminal(),
            "a rule's left-hand side must be a nonterminal"
        );
        Rule {
            lhs,
            rhs: rhs.into(),
        }
    }

    /// Returns the rule's left-hand side.
    pub fn lhs(&self) -> Symbol {
        self.lhs
    }

    /// Returns the rule's right-hand side.
    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    /// Returns the right-hand side's list of alternatives: the elements of
    /// an alternative expression, or the whole right-hand side alone.
    pub fn alternatives(&self) -> &[Expr] {
        match &self.rhs {
            Expr::Alt(items) => items,
            other => slice::from_ref(other),
        }
    }

    /// Combines two rules that share a left-hand side into one whose
    /// alternatives are the concatenation of both alternative lists.
    ///
    /// # Panics
    ///
    /// Panics unless both rules have the same left-hand side.
    pub fn merge(self, other: Rule) -> Rule {
        assert_eq!(
            self.lhs, other.lhs,
            "merged rules must share a left-hand side"
        );
        fn into_alternatives(rhs: Expr) -> Vec<Expr> {
            match rhs {
                Expr::Alt(items) => items,
                other => vec![other],
            }
        }
        let mut alternatives = into_alternatives(self.rhs);
        alternatives.extend(into_alternatives(other.rhs));
        Rule {
            lhs: self.lhs,
            rhs: Expr::Alt(alternatives),
        }
    }

    /// Replaces the right-hand side with its flattened form.
    pub fn flatten(self) -> Rule {
        Rule {
            lhs: self.lhs,
            rhs: self.rhs.flatten(),
        }
    }

    /// The set of symbols occurring in the right-hand side.
    pub fn symbols(&self) -> SymbolSet {
        self.rhs.symbols()
    }

    /// The set of terminals occurring in the right-hand side.
    pub fn terminals(&self) -> SymbolSet {
        self.rhs.terminals()
    }

    /// The set of nonterminals occurring in the right-hand side.
    pub fn nonterminals(&self) -> SymbolSet {
        self.rhs.nonterminals()
    }

    /// Formats the rule as `lhs := rhs`.
    pub fn describe(&self, source: &SymbolSource) -> String {
        format!("{} := {}", source.name_of(self.lhs), self.rhs.describe(source))
    }

    #[allow(dead_code)]
    pub(crate) fn into_parts(self) -> (Symbol, Expr) {
        (self.lhs, self.rhs)
    }
}
