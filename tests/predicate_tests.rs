//! The predicate extension: `eq` evaluation, the shrink rules, and the
//! `special_optimize` fixed point.

use mantra::{
    compile, evaluate, shrink_all, special_optimize, Environment, Expr, MantraError,
    SPECIAL_LOGIC,
};

fn tree(text: &str) -> Expr {
    compile(text).unwrap()
}

fn run(env: &Environment, text: &str) -> Result<Expr, MantraError> {
    evaluate(&SPECIAL_LOGIC, env, &tree(text))
}

#[test]
fn eq_compares_resolved_operands() {
    let env = Environment::new().with("A", 5).with("B", 5).with("C", 7);
    assert_eq!(run(&env, "(eq (env A) (env B))").unwrap(), Expr::from(true));
    assert_eq!(run(&env, "(eq (env A) (env C))").unwrap(), Expr::from(false));
    assert_eq!(run(&env, "(eq (env A) 5)").unwrap(), Expr::from(true));
    assert_eq!(
        run(&env, "(eq (env A) (env C) (env B))").unwrap(),
        Expr::from(true)
    );
}

#[test]
fn eq_takes_atom_operands_literally() {
    // `A` here is the symbol itself, not a lookup.
    let env = Environment::new().with("A", 5);
    assert_eq!(run(&env, "(eq A 5)").unwrap(), Expr::from(false));
    assert_eq!(run(&env, "(eq A A)").unwrap(), Expr::from(true));
    assert_eq!(run(&env, "(eq 5 (env A))").unwrap(), Expr::from(true));
}

#[test]
fn eq_stops_at_the_first_match() {
    // The unset key after the match would fail if evaluated.
    let env = Environment::new().with("A", 5);
    assert_eq!(
        run(&env, "(eq (env A) 5 (env missing))").unwrap(),
        Expr::from(true)
    );
    assert!(run(&env, "(eq (env A) (env missing) 5)").is_err());
}

#[test]
fn eq_operand_contract() {
    let env = Environment::new();
    // A probe with nothing to match is false, not an error.
    assert_eq!(run(&env, "(eq zoo)").unwrap(), Expr::from(false));
    assert!(matches!(
        run(&env, "(eq)").unwrap_err(),
        MantraError::ParameterCount { .. }
    ));
}

#[test]
fn special_optimize_shrink_fixtures() {
    for (src, expected) in [
        (
            "(or (eq A a b c) (eq A b c d) E)",
            "(or (eq A a b c d) E)",
        ),
        (
            "(or (or (eq A a) (eq B b) (eq B c)))",
            "(or (eq A a) (eq B b c))",
        ),
        ("(or (and (eq A a)) (eq A b))", "(eq A a b)"),
        ("(or (and a (or a a) (and a a a)) b)", "(or a b)"),
        ("(or (eq a b) (eq a c))", "(eq a b c)"),
    ] {
        let shrunk = special_optimize(&SPECIAL_LOGIC, &tree(src));
        assert_eq!(shrunk.to_string(), expected, "shrinking {src}");
    }
}

#[test]
fn special_optimize_pins_the_eq_subject() {
    // Trailing operands sort; the subject stays first even when it would
    // sort later.
    assert_eq!(
        special_optimize(&SPECIAL_LOGIC, &tree("(eq A c b)")).to_string(),
        "(eq A b c)"
    );
    assert_eq!(
        special_optimize(&SPECIAL_LOGIC, &tree("(eq c A b)")).to_string(),
        "(eq c A b)"
    );
}

#[test]
fn special_optimize_needs_a_shared_subject_to_merge() {
    let expr = tree("(or (eq A a) (eq B b))");
    assert_eq!(special_optimize(&SPECIAL_LOGIC, &expr), expr);
}

#[test]
fn special_optimize_dedups_rewritten_siblings() {
    // Both operands normalize to the same form, so one survives and the
    // single-operand connective unwraps.
    assert_eq!(
        special_optimize(&SPECIAL_LOGIC, &tree("(and (eq A b a) (eq A a b))")).to_string(),
        "(eq A a b)"
    );
}

#[test]
fn special_optimize_leaves_foreign_heads_alone() {
    for text in ["x", "5", "(f1 c b a)"] {
        let expr = tree(text);
        assert_eq!(special_optimize(&SPECIAL_LOGIC, &expr), expr, "for {text}");
    }
    // A foreign head keeps its operand order, but connectives nested
    // beneath it still normalize.
    assert_eq!(
        special_optimize(&SPECIAL_LOGIC, &tree("(f1 (or b a) c)")).to_string(),
        "(f1 (or a b) c)"
    );
}

#[test]
fn shrinking_preserves_evaluation() {
    let env = Environment::new().with("A", 2);
    let original = tree("(or (eq (env A) 1) (eq (env A) 2))");
    let shrunk = shrink_all(original.clone());
    assert_eq!(shrunk, tree("(eq (env A) 1 2)"));
    assert_eq!(
        evaluate(&SPECIAL_LOGIC, &env, &original).unwrap(),
        evaluate(&SPECIAL_LOGIC, &env, &shrunk).unwrap()
    );

    // Same check on a non-matching environment.
    let env = Environment::new().with("A", 9);
    assert_eq!(
        evaluate(&SPECIAL_LOGIC, &env, &original).unwrap(),
        evaluate(&SPECIAL_LOGIC, &env, &shrunk).unwrap()
    );
}
