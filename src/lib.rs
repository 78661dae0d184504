//! Library for analyzing context-free grammars with one token of lookahead.
//!
//! Grammars are built from expression-shaped rules: sequences, alternatives,
//! repetitions and terminal classes, rather than flat symbol strings. The
//! analysis computes, for every rule, whether it can derive the empty string
//! and which terminals may begin a derivation, and detects left recursion
//! along the way. A [`Dot`] walks an expression against a frozen [`Grammar`]
//! and reports the legal lookahead at every position.

#![deny(unsafe_code)]
#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, deny(warnings))]
#![cfg_attr(test, allow(missing_docs))]

mod analysis;
pub mod builder;
pub mod dot;
pub mod error;
pub mod expr;
pub mod grammar;
pub mod rule;
pub mod symbol;

pub use crate::builder::GrammarBuilder;
pub use crate::dot::Dot;
pub use crate::error::{Cycle, GrammarError};
pub use crate::expr::Expr;
pub use crate::grammar::{Grammar, RuleEntry};
pub use crate::rule::Rule;
pub use crate::symbol::{Symbol, SymbolKind, SymbolName, SymbolSet, SymbolSource};

pub use crate::analysis::Decision;

mod local_prelude {
    pub use crate::error::{Cycle, GrammarError};
    pub use crate::expr::Expr;
    pub use crate::rule::Rule;
    pub use crate::symbol::{Symbol, SymbolKind, SymbolSet, SymbolSource};
}
