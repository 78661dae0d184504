//! Flattening rewrites an expression into an equivalent simpler form.
//!
//! The rewrite is bottom-up and idempotent. Sequences absorb `Empty` and
//! collapse on `Never`, alternatives absorb `Never` and deduplicate, and
//! nested repetitions merge whenever the merged repetition counts cover a
//! contiguous range.

use crate::expr::Expr;

impl Expr {
    /// Returns an algebraically equivalent, simpler expression.
    ///
    /// Flattening another time changes nothing: `e.flatten().flatten()`
    /// equals `e.flatten()`.
    pub fn flatten(self) -> Expr {
        match self {
            Expr::Seq(items) => flatten_sequence(items),
            Expr::Alt(items) => flatten_alternative(items),
            Expr::Negate(terminals) => {
                if terminals.is_empty() {
                    Expr::Any
                } else {
                    Expr::Negate(terminals)
                }
            }
            Expr::Repeat { expr, min, max } => flatten_repeat(expr.flatten(), min, max),
            leaf => leaf,
        }
    }
}

fn flatten_sequence(items: Vec<Expr>) -> Expr {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item.flatten() {
            Expr::Empty => {}
            Expr::Never => return Expr::Never,
            Expr::Seq(inner) => out.extend(inner),
            other => out.push(other),
        }
    }
    match out.len() {
        0 => Expr::Empty,
        1 => out.pop().expect("length checked"),
        _ => Expr::Seq(out),
    }
}

fn flatten_alternative(items: Vec<Expr>) -> Expr {
    fn push_unique(out: &mut Vec<Expr>, expr: Expr) {
        if !out.contains(&expr) {
            out.push(expr);
        }
    }

    let mut out: Vec<Expr> = Vec::with_capacity(items.len());
    for item in items {
        match item.flatten() {
            Expr::Never => {}
            Expr::Alt(inner) => {
                for expr in inner {
                    push_unique(&mut out, expr);
                }
            }
            other => push_unique(&mut out, other),
        }
    }
    match out.len() {
        0 => Expr::Never,
        1 => out.pop().expect("length checked"),
        _ => Expr::Alt(out),
    }
}

/// Simplifies a repetition of an already-flattened expression.
fn flatten_repeat(expr: Expr, min: u32, max: Option<u32>) -> Expr {
    let expr = match expr {
        Expr::Empty => return Expr::Empty,
        Expr::Never if min == 0 => return Expr::Empty,
        Expr::Never => return Expr::Never,
        Expr::Repeat {
            expr: inner,
            min: inner_min,
            max: inner_max,
        } => match (inner_max, max) {
            // The inner repetition has no upper bound, so a mandatory outer
            // upper bound is vacuous.
            (None, _) if min >= 1 => return flatten_repeat(*inner, min * inner_min, None),
            // An optional unbounded repetition stays optional.
            (None, _) => {
                let unbounded = Expr::Repeat {
                    expr: inner,
                    min: inner_min,
                    max: None,
                };
                return Expr::Repeat {
                    expr: Box::new(unbounded),
                    min: 0,
                    max: Some(1),
                };
            }
            // Without an outer upper bound, the counts reachable with
            // consecutive repetition numbers form one contiguous range iff
            // min*inner_max >= inner_min*(min + 1) - 1. The condition keeps
            // holding for every repetition number past `min` once it holds
            // at `min`.
            (Some(inner_max), None) if min * inner_max + 1 >= inner_min * (min + 1) => {
                return flatten_repeat(*inner, min * inner_min, None)
            }
            (Some(inner_max), Some(max)) if inner_min == inner_max && min == max => {
                return flatten_repeat(*inner, inner_min * min, Some(inner_min * min))
            }
            // Any other nesting would repeat a non-contiguous range.
            _ => Expr::Repeat {
                expr: inner,
                min: inner_min,
                max: inner_max,
            },
        },
        other => other,
    };
    match (min, max) {
        (1, Some(1)) => expr,
        (0, Some(0)) => Expr::Empty,
        _ => Expr::Repeat {
            expr: Box::new(expr),
            min,
            max,
        },
    }
}
