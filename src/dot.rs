//! A dot is a walking position inside an expression.
//!
//! At every position the dot knows which terminals may legally come next
//! and whether the position is already a valid completion. The lookahead
//! cache is rebuilt eagerly on every move, so reading it is free.

use crate::grammar::Grammar;
use crate::local_prelude::*;

/// A position inside an expression, relative to a grammar.
///
/// A dot holds a mutable index and a mutable lookahead cache; use one dot
/// per logical parser. The grammar itself is frozen and freely shared.
#[derive(Clone, Debug)]
pub struct Dot<'a> {
    grammar: &'a Grammar,
    parent: Option<Box<Dot<'a>>>,
    expr: &'a Expr,
    index: usize,
    next: SymbolSet,
    matches: bool,
}

impl<'a> Dot<'a> {
    /// Places a dot at the start of the expression.
    ///
    /// Refuses to operate on a grammar with a captured problem, or on an
    /// expression referencing nonterminals the grammar does not define.
    pub fn new(grammar: &'a Grammar, expr: &'a Expr) -> Result<Self, GrammarError> {
        grammar.check_problem()?;
        grammar.check_expr(expr)?;
        let mut dot = Dot {
            grammar,
            parent: None,
            expr,
            index: 0,
            next: SymbolSet::new(),
            matches: false,
        };
        dot.refresh();
        Ok(dot)
    }

    fn refresh(&mut self) {
        self.next.clear();
        self.matches = self.grammar.lookahead(self.expr, self.index, &mut self.next);
    }

    /// Moves the dot one position forward. Monotone: once [`at_end`] is
    /// true it stays true.
    ///
    /// [`at_end`]: Dot::at_end
    pub fn advance(&mut self) {
        self.index += 1;
        self.refresh();
    }

    /// The grammar the dot walks against.
    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// The expression the dot walks.
    pub fn expr(&self) -> &'a Expr {
        self.expr
    }

    /// The dot's progress within the expression.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The sub-expression the dot must attempt next, or `None` at the end.
    pub fn now(&self) -> Option<&'a Expr> {
        self.expr.get(self.index)
    }

    /// Whether the dot is past its expression.
    pub fn at_end(&self) -> bool {
        self.now().is_none()
    }

    /// The terminals that may legally come next at this position.
    pub fn next(&self) -> &SymbolSet {
        &self.next
    }

    /// Whether the position is already a valid completion.
    pub fn matches(&self) -> bool {
        self.matches
    }

    /// The enclosing dot, if this one was made with [`descend`].
    ///
    /// [`descend`]: Dot::descend
    pub fn parent(&self) -> Option<&Dot<'a>> {
        self.parent.as_deref()
    }

    /// Starts walking a sub-expression, keeping this dot as the parent.
    pub fn descend(self, expr: &'a Expr) -> Result<Dot<'a>, GrammarError> {
        self.grammar.check_expr(expr)?;
        let grammar = self.grammar;
        let mut dot = Dot {
            grammar,
            parent: Some(Box::new(self)),
            expr,
            index: 0,
            next: SymbolSet::new(),
            matches: false,
        };
        dot.refresh();
        Ok(dot)
    }

    /// Returns to the parent dot, if any.
    pub fn ascend(self) -> Option<Dot<'a>> {
        self.parent.map(|parent| *parent)
    }
}
