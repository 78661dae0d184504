mod support;

use ll1::{Decision, Expr, Grammar, GrammarError, Rule, SymbolSource};

#[test]
fn test_undefined_nonterminal() {
    let mut source = SymbolSource::new();
    let [foo, bar] = source.nonterminals(["foo", "bar"]);

    let grammar = Grammar::build(source).rule(foo, Expr::from(bar)).finish();

    match grammar.problem() {
        Some(GrammarError::UndefinedSymbols { symbols, names }) => {
            assert_eq!(symbols, &vec![bar]);
            assert_eq!(names, &vec!["bar".to_string()]);
        }
        other => panic!("expected an undefined-symbols problem, got {:?}", other),
    }

    // Analytical queries refuse to operate; structural queries keep working.
    assert!(grammar.can_match_empty(foo).is_err());
    assert!(grammar.first_set(foo).is_err());
    assert_eq!(grammar.undefined(), &[bar]);
    assert!(grammar.has_rule(foo));
    assert!(!grammar.has_rule(bar));
    assert_eq!(grammar.rules().count(), 1);
}

#[test]
fn test_direct_left_recursion() {
    support::init_log();

    let mut source = SymbolSource::new();
    let [bar_tok, baz_tok] = source.terminals(["BAR", "BAZ"]);
    let [foo] = source.nonterminals(["foo"]);

    let grammar = Grammar::build(source)
        .rule(foo, Expr::from(foo).then(bar_tok).or(baz_tok))
        .finish();

    match grammar.problem() {
        Some(GrammarError::LeftRecursion { cycles }) => {
            assert_eq!(cycles, &vec![vec![foo, foo]]);
        }
        other => panic!("expected a left-recursion problem, got {:?}", other),
    }
    let entry = grammar.rule(foo).unwrap();
    assert!(entry.is_left_recursive());
    assert_eq!(entry.cycles(), &[vec![foo, foo]]);
    assert_eq!(entry.empty(), Decision::Indecisive);
    assert_eq!(entry.first(), None);
    assert!(grammar.first_set(foo).is_err());
}

#[test]
fn test_indirect_left_recursion_through_nullable_prefix() {
    let mut source = SymbolSource::new();
    let [x, y] = source.terminals(["X", "Y"]);
    let [a, b] = source.nonterminals(["a", "b"]);

    let grammar = Grammar::build(source)
        .rule(a, Expr::from(b).then(x))
        .rule(b, Expr::from(a).or(y))
        .finish();

    match grammar.problem() {
        Some(GrammarError::LeftRecursion { cycles }) => {
            assert!(cycles.contains(&vec![a, b, a]), "cycles: {:?}", cycles);
        }
        other => panic!("expected a left-recursion problem, got {:?}", other),
    }
    assert!(grammar.rule(a).unwrap().is_left_recursive());
    assert!(grammar.rule(b).unwrap().is_left_recursive());
}

#[test]
fn test_consumed_prefix_is_not_left_recursion() {
    let mut source = SymbolSource::new();
    let [x] = source.terminals(["X"]);
    let [a] = source.nonterminals(["a"]);

    // `a` reaches itself only after consuming `X`.
    let grammar = Grammar::build(source)
        .rule(a, Expr::from(x).then(a).optional())
        .finish();

    assert_eq!(grammar.problem(), None);
    assert!(grammar.can_match_empty(a).unwrap());
    assert_eq!(grammar.first_set(a).unwrap(), &support::set([x]));
}

#[test]
fn test_nullable_prefix_left_recursion() {
    let mut source = SymbolSource::new();
    let [b] = source.terminals(["B"]);
    let [a] = source.nonterminals(["a"]);

    // The optional prefix makes `a` reach itself without consuming.
    let grammar = Grammar::build(source)
        .rule(a, Expr::from(b).optional().then(a))
        .finish();

    match grammar.problem() {
        Some(GrammarError::LeftRecursion { cycles }) => {
            assert_eq!(cycles, &vec![vec![a, a]]);
        }
        other => panic!("expected a left-recursion problem, got {:?}", other),
    }
}

#[test]
fn test_rule_downstream_of_a_cycle_stays_unresolved() {
    let mut source = SymbolSource::new();
    let [x] = source.terminals(["X"]);
    let [a, c] = source.nonterminals(["a", "c"]);

    let grammar = Grammar::build(source)
        .rule(a, Expr::from(a).then(x))
        .rule(c, Expr::from(a))
        .finish();

    assert!(matches!(
        grammar.problem(),
        Some(GrammarError::LeftRecursion { .. })
    ));
    // `c` is not in the cycle, but cannot resolve without it.
    let entry = grammar.rule(c).unwrap();
    assert!(!entry.is_left_recursive());
    assert_eq!(entry.empty(), Decision::Indecisive);
    assert_eq!(entry.first(), None);
    // `a` sits in the cycle proper.
    assert!(grammar.rule(a).unwrap().is_left_recursive());
}

#[test]
fn test_foreign_symbol_is_malformed() {
    let mut source = SymbolSource::new();
    let [x] = source.terminals(["X"]);
    let [foo] = source.nonterminals(["foo"]);

    let mut other = SymbolSource::new();
    let [_s1, _s2, stray] = other.terminals(["S1", "S2", "STRAY"]);

    // `stray`'s ID is past everything this source declared.
    let rules = vec![Rule::new(foo, Expr::from(x).then(stray))];
    let grammar = Grammar::new(source, rules);

    assert!(matches!(
        grammar.problem(),
        Some(GrammarError::Malformed { .. })
    ));
    assert!(grammar.can_match_empty(foo).is_err());
}

#[test]
fn test_kind_mismatch_is_malformed() {
    let mut source = SymbolSource::new();
    let [foo] = source.nonterminals(["foo"]);

    // A nonterminal forced into a terminal leaf violates the contract.
    let rules = vec![Rule::new(foo, Expr::Terminal(foo))];
    let grammar = Grammar::new(source, rules);

    assert!(matches!(
        grammar.problem(),
        Some(GrammarError::Malformed { .. })
    ));
}

#[test]
#[should_panic(expected = "left-hand side")]
fn test_terminal_lhs_panics() {
    let mut source = SymbolSource::new();
    let [x] = source.terminals(["X"]);
    let _rule = Rule::new(x, Expr::Empty);
}

#[test]
#[should_panic(expected = "maximum below minimum")]
fn test_reversed_repetition_bounds_panic() {
    let mut source = SymbolSource::new();
    let [x] = source.terminals(["X"]);
    let _expr = Expr::from(x).repeat(5, Some(2));
}
