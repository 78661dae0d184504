mod support;

use ll1::{Decision, Expr, Grammar, Rule, SymbolSource};

#[test]
fn test_simple_lookahead_analysis() {
    support::init_log();

    let mut source = SymbolSource::new();
    let [gus_tok, hello, bar_tok, baz_tok, lorem] =
        source.terminals(["GUS", "HELLO", "BAR", "BAZ", "LOREM"]);
    let [foo, bar, baz, gus] = source.nonterminals(["foo", "bar", "baz", "gus"]);

    let grammar = Grammar::build(source)
        .rule(foo, Expr::from(bar).or(baz).or(lorem))
        .rule(bar, Expr::from(gus_tok).then(hello).or(bar_tok))
        .rule(baz, Expr::from(baz_tok).or(Expr::Empty))
        .rule(gus, Expr::Empty)
        .finish();

    assert_eq!(grammar.problem(), None);

    assert_eq!(
        grammar.first_set(foo).unwrap(),
        &support::set([gus_tok, bar_tok, baz_tok, lorem])
    );
    assert_eq!(
        grammar.first_set(bar).unwrap(),
        &support::set([gus_tok, bar_tok])
    );
    assert_eq!(grammar.first_set(baz).unwrap(), &support::set([baz_tok]));
    assert_eq!(grammar.first_set(gus).unwrap(), &support::set([]));

    assert!(grammar.can_match_empty(foo).unwrap());
    assert!(!grammar.can_match_empty(bar).unwrap());
    assert!(grammar.can_match_empty(baz).unwrap());
    assert!(grammar.can_match_empty(gus).unwrap());

    // The inventory covers both sides of every rule.
    assert_eq!(
        grammar.terminals(),
        &support::set([gus_tok, hello, bar_tok, baz_tok, lorem])
    );
    assert_eq!(grammar.nonterminals(), &support::set([foo, bar, baz, gus]));
    assert!(grammar.has(hello));
    assert!(!grammar.has(grammar.sym_source().eof()));
    assert!(grammar.undefined().is_empty());
    assert!(grammar.cycles().is_empty());

    // Insertion order is preserved.
    let order: Vec<_> = grammar.rules().map(|entry| entry.lhs()).collect();
    assert_eq!(order, vec![foo, bar, baz, gus]);
}

#[test]
fn test_builder_merges_and_flattens() {
    let mut source = SymbolSource::new();
    let [a, b] = source.terminals(["A", "B"]);
    let [foo] = source.nonterminals(["foo"]);

    let grammar = Grammar::build(source)
        .rule(foo, Expr::from(a))
        .rule(foo, Expr::from(b))
        .rule(foo, Expr::from(a))
        .finish();

    assert_eq!(grammar.problem(), None);
    let entry = grammar.rule(foo).unwrap();
    // One slot, alternatives concatenated and deduplicated.
    assert_eq!(
        entry.rhs(),
        &Expr::Alt(vec![Expr::Terminal(a), Expr::Terminal(b)])
    );
    assert_eq!(entry.rule().alternatives().len(), 2);
    assert_eq!(grammar.rules().count(), 1);
}

#[test]
fn test_submission_merges_without_flattening() {
    let mut source = SymbolSource::new();
    let [a, b] = source.terminals(["A", "B"]);
    let [foo] = source.nonterminals(["foo"]);

    let rules = vec![Rule::new(foo, a), Rule::new(foo, b), Rule::new(foo, a)];
    let grammar = Grammar::new(source, rules);

    assert_eq!(grammar.problem(), None);
    let entry = grammar.rule(foo).unwrap();
    // Plain submission keeps duplicate alternatives.
    assert_eq!(entry.rule().alternatives().len(), 3);
    assert_eq!(grammar.first_set(foo).unwrap(), &support::set([a, b]));
}

#[test]
fn test_nullability_through_repetitions() {
    let mut source = SymbolSource::new();
    let [a, b] = source.terminals(["A", "B"]);
    let [opt, plus, wrap] = source.nonterminals(["opt", "plus", "wrap"]);

    let grammar = Grammar::build(source)
        .rule(opt, Expr::from(a).zero_or_more())
        .rule(plus, Expr::from(a).one_or_more())
        .rule(wrap, Expr::from(opt).then(plus).then(Expr::from(b).optional()))
        .finish();

    assert_eq!(grammar.problem(), None);
    assert!(grammar.can_match_empty(opt).unwrap());
    assert!(!grammar.can_match_empty(plus).unwrap());
    assert!(!grammar.can_match_empty(wrap).unwrap());
    // `opt` may be skipped, so `plus` contributes to the first set; `b`
    // stays out because `plus` consumes input first.
    assert_eq!(grammar.first_set(wrap).unwrap(), &support::set([a]));
    assert_eq!(grammar.rule(wrap).unwrap().empty(), Decision::Negative);
}

#[test]
fn test_negate_and_any_first_sets() {
    let mut source = SymbolSource::new();
    let eof = source.eof();
    let [a, b] = source.terminals(["A", "B"]);
    let [not_a, wild] = source.nonterminals(["not_a", "wild"]);

    let grammar = Grammar::build(source)
        .rule(not_a, Expr::none_of([a]).then(eof))
        .rule(wild, Expr::Any.or(Expr::from(b)))
        .finish();

    assert_eq!(grammar.problem(), None);
    // Negation ranges over the terminals occurring in the grammar,
    // end-of-input included.
    assert_eq!(grammar.first_set(not_a).unwrap(), &support::set([eof, b]));
    assert_eq!(grammar.first_set(wild).unwrap(), &support::set([eof, a, b]));
    assert!(!grammar.can_match_empty(not_a).unwrap());
}
