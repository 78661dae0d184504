//! Expressions are the right-hand sides of grammar rules.
//!
//! An expression can be thought of as a regular expression over grammar
//! symbols, where nonterminal leaves stand for whatever their rules derive.
//! Expressions are immutable values with structural equality; building and
//! combining them never touches a grammar.

mod display;
mod flatten;

use std::collections::BTreeSet;
use std::ops::{Bound, RangeBounds};

use crate::local_prelude::*;

pub use self::display::DisplayExpr;

/// An expression over grammar symbols.
///
/// The variants form a closed algebra: every analysis in this library
/// matches on all of them.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Expr {
    /// Matches exactly one terminal.
    Terminal(Symbol),
    /// Matches whatever the nonterminal's rule matches.
    Nonterminal(Symbol),
    /// Matches each element in order.
    Seq(Vec<Expr>),
    /// Matches exactly one of the elements, earliest wins.
    Alt(Vec<Expr>),
    /// Matches the inner expression repeatedly, between `min` and `max`
    /// times. `None` means the number of repetitions is unlimited.
    Repeat {
        /// The repeated expression.
        expr: Box<Expr>,
        /// The minimum number of repetitions.
        min: u32,
        /// The inclusive maximum number of repetitions, if bounded.
        max: Option<u32>,
    },
    /// Matches any single terminal not in the set.
    Negate(BTreeSet<Symbol>),
    /// Matches any single terminal.
    Any,
    /// Never matches.
    Never,
    /// Matches zero input.
    Empty,
}

impl From<Symbol> for Expr {
    fn from(sym: Symbol) -> Self {
        match sym.kind() {
            SymbolKind::Terminal => Expr::Terminal(sym),
            SymbolKind::Nonterminal => Expr::Nonterminal(sym),
        }
    }
}

impl Expr {
    /// Builds a sequence. An empty sequence is [`Expr::Empty`] and a
    /// one-element sequence is the element itself.
    pub fn sequence<T: Into<Expr>>(items: impl IntoIterator<Item = T>) -> Expr {
        let mut items: Vec<Expr> = items.into_iter().map(Into::into).collect();
        match items.len() {
            0 => Expr::Empty,
            1 => items.pop().expect("len checked"),
            _ => Expr::Seq(items),
        }
    }

    /// Builds an alternative. An empty alternative is [`Expr::Never`] and a
    /// one-element alternative is the element itself.
    pub fn one_of<T: Into<Expr>>(items: impl IntoIterator<Item = T>) -> Expr {
        let mut items: Vec<Expr> = items.into_iter().map(Into::into).collect();
        match items.len() {
            0 => Expr::Never,
            1 => items.pop().expect("len checked"),
            _ => Expr::Alt(items),
        }
    }

    /// Builds an expression matching any terminal outside the given set.
    /// An empty set gives [`Expr::Any`].
    ///
    /// # Panics
    ///
    /// Panics if one of the symbols is a nonterminal.
    pub fn none_of(terminals: impl IntoIterator<Item = Symbol>) -> Expr {
        let set: BTreeSet<Symbol> = terminals.into_iter().collect();
        for &sym in &set {
            assert!(sym.is_terminal(), "cannot negate a nonterminal");
        }
        if set.is_empty() {
            Expr::Any
        } else {
            Expr::Negate(set)
        }
    }

    /// Repeats the expression between `min` and `max` times, where `None`
    /// means no upper bound.
    ///
    /// Repeating [`Expr::Empty`] is still [`Expr::Empty`], and repeating
    /// [`Expr::Never`] either matches nothing at all, or zero input when
    /// `min == 0` allows it.
    ///
    /// # Panics
    ///
    /// Panics if a bounded `max` is below `min`.
    pub fn repeat(self, min: u32, max: Option<u32>) -> Expr {
        if let Some(max) = max {
            assert!(max >= min, "repetition maximum below minimum");
        }
        match self {
            Expr::Empty => Expr::Empty,
            Expr::Never if min == 0 => Expr::Empty,
            Expr::Never => Expr::Never,
            expr => Expr::Repeat {
                expr: Box::new(expr),
                min,
                max,
            },
        }
    }

    /// Matches the expression zero or one time.
    pub fn optional(self) -> Expr {
        self.repeat(0, Some(1))
    }

    /// Matches the expression any number of times, including zero.
    pub fn zero_or_more(self) -> Expr {
        self.repeat(0, None)
    }

    /// Matches the expression one or more times.
    pub fn one_or_more(self) -> Expr {
        self.repeat(1, None)
    }

    /// Matches the expression at least `min` times.
    pub fn at_least(self, min: u32) -> Expr {
        self.repeat(min, None)
    }

    /// Matches the expression at most `max` times.
    pub fn at_most(self, max: u32) -> Expr {
        self.repeat(0, Some(max))
    }

    /// Matches the expression exactly `n` times.
    pub fn exactly(self, n: u32) -> Expr {
        self.repeat(n, Some(n))
    }

    /// Repeats the expression within the given range of repetition counts.
    pub fn range(self, range: impl RangeBounds<u32>) -> Expr {
        let min = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let max = match range.end_bound() {
            Bound::Included(&end) => Some(end),
            Bound::Excluded(&end) => Some(end - 1),
            Bound::Unbounded => None,
        };
        self.repeat(min, max)
    }

    /// Adds an alternative. Called on an existing alternative, appends to
    /// it; called on [`Expr::Never`], gives the alternative alone.
    pub fn or(self, other: impl Into<Expr>) -> Expr {
        let other = other.into();
        match self {
            Expr::Never => other,
            Expr::Alt(mut items) => {
                items.push(other);
                Expr::Alt(items)
            }
            expr => Expr::Alt(vec![expr, other]),
        }
    }

    /// Appends to a sequence. [`Expr::Never`] absorbs the continuation and
    /// [`Expr::Empty`] vanishes in front of it.
    pub fn then(self, next: impl Into<Expr>) -> Expr {
        let next = next.into();
        match self {
            Expr::Never => Expr::Never,
            Expr::Empty => next,
            Expr::Seq(mut items) => {
                items.push(next);
                Expr::Seq(items)
            }
            expr => Expr::Seq(vec![expr, next]),
        }
    }

    /// Prepends to a sequence.
    pub fn but_first(self, first: impl Into<Expr>) -> Expr {
        let first = first.into();
        match self {
            Expr::Never => Expr::Never,
            Expr::Empty => first,
            Expr::Seq(mut items) => {
                items.insert(0, first);
                Expr::Seq(items)
            }
            expr => Expr::Seq(vec![first, expr]),
        }
    }

    /// Returns the sub-expression that a cursor at the given progress must
    /// attempt next, or `None` when the index is past the expression.
    pub fn get(&self, index: usize) -> Option<&Expr> {
        match self {
            Expr::Terminal(_)
            | Expr::Nonterminal(_)
            | Expr::Negate(_)
            | Expr::Any
            | Expr::Alt(_) => {
                if index == 0 {
                    Some(self)
                } else {
                    None
                }
            }
            Expr::Seq(items) => items.get(index),
            Expr::Repeat { expr, max, .. } => match *max {
                Some(max) if index >= max as usize => None,
                _ => Some(&**expr),
            },
            Expr::Empty | Expr::Never => None,
        }
    }

    /// Calls the closure once per symbol occurrence, in depth-first order.
    pub fn for_each_symbol(&self, f: &mut impl FnMut(Symbol)) {
        match self {
            Expr::Terminal(sym) | Expr::Nonterminal(sym) => f(*sym),
            Expr::Seq(items) | Expr::Alt(items) => {
                for item in items {
                    item.for_each_symbol(f);
                }
            }
            Expr::Repeat { expr, .. } => expr.for_each_symbol(f),
            Expr::Negate(terminals) => {
                for &sym in terminals {
                    f(sym);
                }
            }
            Expr::Any | Expr::Never | Expr::Empty => {}
        }
    }

    /// The set of symbols occurring in the expression.
    pub fn symbols(&self) -> SymbolSet {
        let mut set = SymbolSet::new();
        self.for_each_symbol(&mut |sym| {
            set.insert(sym);
        });
        set
    }

    /// The set of terminals occurring in the expression.
    pub fn terminals(&self) -> SymbolSet {
        let mut set = SymbolSet::new();
        self.for_each_symbol(&mut |sym| {
            if sym.is_terminal() {
                set.insert(sym);
            }
        });
        set
    }

    /// The set of nonterminals occurring in the expression.
    pub fn nonterminals(&self) -> SymbolSet {
        let mut set = SymbolSet::new();
        self.for_each_symbol(&mut |sym| {
            if sym.is_nonterminal() {
                set.insert(sym);
            }
        });
        set
    }

    /// Checks that every leaf uses its symbol under the declared kind.
    /// Returns the first offender otherwise.
    pub(crate) fn check_kinds(&self) -> Result<(), Symbol> {
        match self {
            Expr::Terminal(sym) if !sym.is_terminal() => Err(*sym),
            Expr::Nonterminal(sym) if !sym.is_nonterminal() => Err(*sym),
            Expr::Terminal(_) | Expr::Nonterminal(_) => Ok(()),
            Expr::Seq(items) | Expr::Alt(items) => {
                items.iter().try_for_each(|item| item.check_kinds())
            }
            Expr::Repeat { expr, .. } => expr.check_kinds(),
            Expr::Negate(terminals) => {
                match terminals.iter().find(|sym| !sym.is_terminal()) {
                    Some(&sym) => Err(sym),
                    None => Ok(()),
                }
            }
            Expr::Any | Expr::Never | Expr::Empty => Ok(()),
        }
    }
}
