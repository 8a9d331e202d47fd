//! End-to-end scenarios from spec.md §8, run against a fresh interpreter
//! each time. Grounded on
//! `examples/parcadei-ouros/crates/ouros/tests/depth_guard.rs`'s
//! run-code-and-check-output shape, adapted to this language's `rep`
//! (read + eval + print) instead of a Python `Runner`.

use wisp::{error::WispError, printer, value::Value};

fn fresh() -> wisp::eval::Evaluator {
    wisp::new_interpreter()
}

fn rep(interp: &mut wisp::eval::Evaluator, src: &str) -> Value {
    wisp::rep_eval(interp, src).unwrap_or_else(|e| panic!("eval of `{src}` failed: {e}"))
}

fn printed(interp: &mut wisp::eval::Evaluator, src: &str) -> String {
    printer::print_readable(&rep(interp, src))
}

fn fails(interp: &mut wisp::eval::Evaluator, src: &str) -> WispError {
    wisp::rep_eval(interp, src).expect_err("expected evaluation to fail")
}

#[test]
fn scenario_arithmetic() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "(+ 1 2 3)"), "6");
}

#[test]
fn scenario_recursive_factorial() {
    let mut interp = fresh();
    rep(&mut interp, "(def fact (fn (n) (if (<= n 1) 1 (* n (fact (- n 1))))))");
    assert_eq!(printed(&mut interp, "(fact 5)"), "120");
}

#[test]
fn scenario_let_star_scoping() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "(let* (a 1 b 2) (+ a b))"), "3");
    fails(&mut interp, "a");
}

#[test]
fn scenario_quasiquote_unquote_splice() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "`(1 ~(+ 2 3) ~@(list 4 5))"), "(1 5 4 5)");
}

#[test]
fn scenario_map_assoc_dissoc_contains() {
    let mut interp = fresh();
    rep(&mut interp, "(def m (hash-map :a 1 :b 2))");
    assert_eq!(printed(&mut interp, "(get (assoc (dissoc m :a) :c 3) :c)"), "3");
    assert_eq!(printed(&mut interp, "(contains? m :a)"), "true");
}

#[test]
fn scenario_try_catch() {
    let mut interp = fresh();
    assert_eq!(
        printed(&mut interp, r#"(try* (throw "boom") e (str "caught " e))"#),
        "\"caught boom\""
    );
}

#[test]
fn invariant_equality_is_reflexive() {
    let mut interp = fresh();
    for src in ["nil", "true", "false", "42", "\"s\"", ":k", "sym", "(1 2 3)", "[1 2 3]"] {
        assert_eq!(printed(&mut interp, &format!("(= {src} {src})")), "true", "failed for {src}");
    }
}

#[test]
fn invariant_cons_count_first_rest() {
    let mut interp = fresh();
    rep(&mut interp, "(def l (list 2 3))");
    assert_eq!(printed(&mut interp, "(count (cons 1 l))"), "3");
    assert_eq!(printed(&mut interp, "(first (cons 1 l))"), "1");
    assert_eq!(printed(&mut interp, "(rest (cons 1 l))"), "(2 3)");
}

#[test]
fn invariant_map_assoc_get_dissoc() {
    let mut interp = fresh();
    rep(&mut interp, "(def m (hash-map))");
    assert_eq!(printed(&mut interp, "(get (assoc m :k 7) :k)"), "7");
    assert_eq!(printed(&mut interp, "(contains? (dissoc m :k) :k)"), "false");
    assert_eq!(
        printed(&mut interp, "(list-equal (keys (dissoc (assoc m :k 7) :k)) (keys (dissoc m :k)))"),
        "true"
    );
}

#[test]
fn invariant_reader_round_trip() {
    for src in ["42", "\"hello\\nworld\"", ":kw", "sym", "(1 2 (3 4))", "[1 [2 3] nil true false]"] {
        let original = wisp::reader::read_str(src.as_bytes()).unwrap();
        let round_tripped_src = printer::print_readable(&original);
        let parsed_back = wisp::reader::read_str(round_tripped_src.as_bytes()).unwrap();
        assert!(original == parsed_back, "round-trip mismatch for {src}");
        // Lists stay lists, vectors stay vectors.
        assert_eq!(original.is_list(), parsed_back.is_list());
        assert_eq!(original.is_vector(), parsed_back.is_vector());
    }
}

#[test]
fn invariant_self_evaluating_forms_are_fixed_points() {
    let mut interp = fresh();
    for src in ["42", "\"s\"", ":k", "nil", "true", "false"] {
        assert_eq!(printed(&mut interp, &format!("(eval (quote {src}))")), printed(&mut interp, src));
    }
}

#[test]
fn invariant_tail_recursion_does_not_overflow() {
    let mut interp = fresh();
    rep(
        &mut interp,
        "(def count-down (fn (n) (if (<= n 0) n (count-down (- n 1)))))",
    );
    assert_eq!(printed(&mut interp, "(count-down 100000)"), "0");
}

#[test]
fn non_tail_recursion_hits_the_guard() {
    let mut interp = fresh();
    rep(&mut interp, "(def boom (fn (n) (+ 1 (boom n))))");
    let err = fails(&mut interp, "(boom 1)");
    assert!(err.message().contains("Recursion limit"));
}
