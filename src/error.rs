//! Everything that can go wrong while analyzing a grammar.

use thiserror::Error;

use crate::symbol::Symbol;

/// A left-recursive cycle: an ordered sequence of nonterminals in discovery
/// order, with the first and last element identical.
pub type Cycle = Vec<Symbol>;

/// The failures a grammar analysis can surface.
///
/// The analysis captures its first error into the grammar artifact instead
/// of abandoning it; see [`Grammar::problem`].
///
/// [`Grammar::problem`]: crate::Grammar::problem
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GrammarError {
    /// Some right-hand side references nonterminals that no rule defines.
    #[error("undefined nonterminals: {}", .names.join(", "))]
    UndefinedSymbols {
        /// The offending nonterminals.
        symbols: Vec<Symbol>,
        /// Their names, for display without a symbol source at hand.
        names: Vec<String>,
    },
    /// Some nonterminal can reach itself again with no terminal consumed
    /// in between.
    #[error("grammar is left-recursive, {} cycle(s) found", .cycles.len())]
    LeftRecursion {
        /// The cycle witnesses, in discovery order.
        cycles: Vec<Cycle>,
    },
    /// Catch-all for violations of the construction contract.
    #[error("malformed grammar: {reason}")]
    Malformed {
        /// What went wrong.
        reason: String,
    },
}
