//! FIRST sets.
//!
//! We sweep over the unresolved rules, recomputing each rule's FIRST set
//! from the sets committed so far, until a whole sweep changes nothing.
//! Rules inside left-recursive cycles are excluded up front and keep an
//! absent FIRST set, as do rules that cannot resolve without them.

use bit_vec::BitVec;
use log::debug;

use crate::analysis::{Analyzer, Decision};
use crate::local_prelude::*;

impl Analyzer {
    pub(crate) fn solve_first_sets(&mut self) {
        let num_rules = self.entries.len();
        let mut done = BitVec::from_elem(num_rules, false);
        for (idx, entry) in self.entries.iter().enumerate() {
            if !entry.cycles.is_empty() {
                done.set(idx, true);
            }
        }

        let mut sweeps = 0usize;
        let mut changed = true;
        while changed {
            changed = false;
            sweeps += 1;
            for idx in 0..num_rules {
                if done[idx] {
                    continue;
                }
                let mut first = SymbolSet::new();
                let mut incomplete = false;
                self.first_of(self.entries[idx].rule.rhs(), &mut first, &mut incomplete);
                if !incomplete {
                    self.entries[idx].first = Some(first);
                    done.set(idx, true);
                    changed = true;
                }
            }
        }
        debug!(
            "first sets settled after {} sweep(s), {} rule(s) unresolved",
            sweeps,
            done.iter().filter(|&resolved| !resolved).count()
        );
    }

    /// Accumulates the FIRST set of the expression into `out` and decides
    /// whether the expression can match empty. A nonterminal whose FIRST
    /// set is not committed yet makes the result incomplete; an incomplete
    /// set is never committed.
    ///
    /// The empty string itself is never a member of a FIRST set; the
    /// returned decision carries that information instead.
    fn first_of(&self, expr: &Expr, out: &mut SymbolSet, incomplete: &mut bool) -> Decision {
        match expr {
            Expr::Terminal(sym) => {
                out.insert(*sym);
                Decision::Negative
            }
            Expr::Never => Decision::Negative,
            Expr::Empty => Decision::Positive,
            Expr::Any => {
                out.extend(self.terminals.iter().copied());
                Decision::Negative
            }
            Expr::Negate(excluded) => {
                out.extend(
                    self.terminals
                        .iter()
                        .copied()
                        .filter(|sym| !excluded.contains(sym)),
                );
                Decision::Negative
            }
            Expr::Nonterminal(sym) => {
                let entry = &self.entries[self.index[sym]];
                match &entry.first {
                    Some(first) => {
                        out.extend(first.iter().copied());
                        entry.empty
                    }
                    None => {
                        *incomplete = true;
                        Decision::Indecisive
                    }
                }
            }
            Expr::Repeat { expr, min, max } => {
                if *max == Some(0) {
                    return Decision::Positive;
                }
                let inner = self.first_of(expr, out, incomplete);
                if *min == 0 {
                    Decision::Positive
                } else {
                    inner
                }
            }
            Expr::Seq(items) => {
                for item in items {
                    match self.first_of(item, out, incomplete) {
                        Decision::Positive => {}
                        // A child that cannot match empty ends the scan;
                        // nothing past it can contribute a first terminal.
                        settled => return settled,
                    }
                }
                Decision::Positive
            }
            Expr::Alt(items) => {
                let mut any_positive = false;
                for item in items {
                    match self.first_of(item, out, incomplete) {
                        Decision::Indecisive => return Decision::Indecisive,
                        Decision::Positive => any_positive = true,
                        Decision::Negative => {}
                    }
                }
                if any_positive {
                    Decision::Positive
                } else {
                    Decision::Negative
                }
            }
        }
    }
}
