//! Canonical textual form of expressions, used for debugging and in test
//! golden values. Symbol names are resolved through a [`SymbolSource`].

use std::fmt;

use crate::expr::Expr;
use crate::symbol::SymbolSource;

/// Helper struct for printing an expression with [`fmt::Display`].
#[derive(Clone, Copy)]
pub struct DisplayExpr<'a> {
    expr: &'a Expr,
    source: &'a SymbolSource,
}

impl Expr {
    /// Makes the expression displayable with names taken from the source.
    pub fn display<'a>(&'a self, source: &'a SymbolSource) -> DisplayExpr<'a> {
        DisplayExpr { expr: self, source }
    }

    /// Formats the expression to a `String`.
    pub fn describe(&self, source: &SymbolSource) -> String {
        self.display(source).to_string()
    }
}

impl<'a> DisplayExpr<'a> {
    fn child(&self, expr: &'a Expr) -> DisplayExpr<'a> {
        DisplayExpr {
            expr,
            source: self.source,
        }
    }
}

impl fmt::Display for DisplayExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expr {
            Expr::Terminal(sym) | Expr::Nonterminal(sym) => {
                write!(f, "{}", self.source.name_of(*sym))
            }
            Expr::Any => write!(f, "."),
            Expr::Never => write!(f, "!"),
            Expr::Empty => write!(f, "#"),
            Expr::Negate(terminals) => {
                write!(f, "~(")?;
                for (i, &sym) in terminals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", self.source.name_of(sym))?;
                }
                write!(f, ")")
            }
            Expr::Seq(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", self.child(item))?;
                }
                write!(f, ")")
            }
            Expr::Alt(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", self.child(item))?;
                }
                write!(f, ")")
            }
            Expr::Repeat { expr, min, max } => {
                // A repeated repetition needs parentheses to keep the
                // suffixes apart.
                if matches!(**expr, Expr::Repeat { .. }) {
                    write!(f, "({})", self.child(expr))?;
                } else {
                    write!(f, "{}", self.child(expr))?;
                }
                match (*min, *max) {
                    (min, Some(max)) if min == max => write!(f, "[{}]", min),
                    (0, None) => write!(f, "*"),
                    (1, None) => write!(f, "+"),
                    (0, Some(1)) => write!(f, "?"),
                    (min, None) => write!(f, "[{}..]", min),
                    (0, Some(max)) => write!(f, "[..{}]", max),
                    (min, Some(max)) => write!(f, "[{}..{}]", min, max),
                }
            }
        }
    }
}
