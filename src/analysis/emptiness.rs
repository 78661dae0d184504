//! Nullability fixed point with interleaved left-recursion discovery.
//!
//! A worklist holds pairs of a rule and the path of nonterminals through
//! which the rule was reached without consuming input. Revisiting a
//! nonterminal on its own path is left recursion; the offending cycle is
//! recorded and its participants drop out of the fixed point.

use std::collections::VecDeque;

use bit_vec::BitVec;
use log::{debug, trace};

use crate::analysis::{Analyzer, Decision};
use crate::local_prelude::*;

impl Analyzer {
    pub(crate) fn solve_emptiness(&mut self) -> Result<(), GrammarError> {
        let num_rules = self.entries.len();
        // Rules proven to sit in a cycle, and rules that can never resolve
        // because every remaining dependency sits in one.
        let mut left_recursive = BitVec::from_elem(num_rules, false);
        let mut blocked = BitVec::from_elem(num_rules, false);

        let mut queue: VecDeque<(usize, Vec<Symbol>)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (idx, vec![entry.rule.lhs()]))
            .collect();

        while let Some((idx, path)) = queue.pop_front() {
            if left_recursive[idx] || blocked[idx] {
                continue;
            }
            if self.entries[idx].empty != Decision::Indecisive {
                continue;
            }

            let mut indecisive = vec![];
            let decision = self.check_empty(self.entries[idx].rule.rhs(), &mut indecisive);
            if decision != Decision::Indecisive {
                trace!(
                    "empty({}) = {:?}",
                    self.sym_source.name_of(self.entries[idx].rule.lhs()),
                    decision
                );
                self.entries[idx].empty = decision;
                continue;
            }

            let mut enqueued_any = false;
            for sym in indecisive {
                if let Some(pos) = path.iter().position(|&on_path| on_path == sym) {
                    // The nonterminal reaches itself with nothing consumed
                    // in between.
                    let mut cycle: Cycle = path[pos..].to_vec();
                    cycle.push(sym);
                    self.record_cycle(&mut left_recursive, cycle);
                } else {
                    let dep = self.index[&sym];
                    if left_recursive[dep] || blocked[dep] {
                        // Nothing to wait for down that path.
                    } else {
                        let mut extended = path.clone();
                        extended.push(sym);
                        queue.push_back((dep, extended));
                        enqueued_any = true;
                    }
                }
            }
            if !left_recursive[idx] {
                if enqueued_any {
                    queue.push_back((idx, path));
                } else {
                    // Every dependency is stuck in a cycle; this rule will
                    // never resolve either.
                    blocked.set(idx, true);
                }
            }
        }

        if self.cycles.is_empty() {
            Ok(())
        } else {
            debug!("left recursion found, {} cycle(s)", self.cycles.len());
            Err(GrammarError::LeftRecursion {
                cycles: self.cycles.clone(),
            })
        }
    }

    /// Decides whether the expression can derive the empty string, given
    /// what is known about the rules so far. Nonterminals whose answer is
    /// still unknown are reported through `indecisive`.
    ///
    /// In a sequence, the first child that is not known to match empty
    /// settles the scan: a negative child settles the whole sequence, and
    /// an undecided child exports its dependencies alone. Later children
    /// are not reachable without consuming input as far as we know, so
    /// exploring them could chase paths that never terminate.
    fn check_empty(&self, expr: &Expr, indecisive: &mut Vec<Symbol>) -> Decision {
        match expr {
            Expr::Terminal(_) | Expr::Negate(_) | Expr::Any | Expr::Never => Decision::Negative,
            Expr::Empty => Decision::Positive,
            Expr::Nonterminal(sym) => {
                let entry = &self.entries[self.index[sym]];
                match entry.empty {
                    Decision::Indecisive => {
                        indecisive.push(*sym);
                        Decision::Indecisive
                    }
                    decided => decided,
                }
            }
            Expr::Repeat { expr, min, .. } => {
                if *min == 0 {
                    Decision::Positive
                } else {
                    self.check_empty(expr, indecisive)
                }
            }
            Expr::Seq(items) => {
                for item in items {
                    match self.check_empty(item, indecisive) {
                        Decision::Positive => {}
                        settled => return settled,
                    }
                }
                Decision::Positive
            }
            Expr::Alt(items) => {
                let mut any_indecisive = false;
                for item in items {
                    match self.check_empty(item, indecisive) {
                        Decision::Positive => return Decision::Positive,
                        Decision::Indecisive => any_indecisive = true,
                        Decision::Negative => {}
                    }
                }
                if any_indecisive {
                    Decision::Indecisive
                } else {
                    Decision::Negative
                }
            }
        }
    }

    /// Records a discovered cycle with every rule participating in it, and
    /// globally. Participants never re-enter the worklist.
    fn record_cycle(&mut self, left_recursive: &mut BitVec, cycle: Cycle) {
        debug!(
            "left-recursive cycle: {}",
            cycle
                .iter()
                .map(|&sym| self.sym_source.name_of(sym).into_owned())
                .collect::<Vec<_>>()
                .join(" -> ")
        );
        for &sym in &cycle[..cycle.len() - 1] {
            let idx = self.index[&sym];
            left_recursive.set(idx, true);
            if !self.entries[idx].cycles.contains(&cycle) {
                self.entries[idx].cycles.push(cycle.clone());
            }
        }
        if !self.cycles.contains(&cycle) {
            self.cycles.push(cycle);
        }
    }
}
