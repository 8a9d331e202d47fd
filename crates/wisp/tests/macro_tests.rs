//! Special-form, macro, quasiquote, atom, and metadata tests (spec.md §4.4,
//! §4.6), exercising the CORE evaluator directly (no bootstrap script).

use wisp::printer::print_readable;

fn fresh() -> wisp::eval::Evaluator {
    wisp::new_interpreter()
}

fn printed(interp: &mut wisp::eval::Evaluator, src: &str) -> String {
    print_readable(&wisp::rep_eval(interp, src).unwrap())
}

#[test]
fn do_evaluates_for_effect_and_returns_last() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "(do (def a 1) (def b 2) (+ a b))"), "3");
}

#[test]
fn empty_do_returns_nil() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "(do)"), "nil");
}

#[test]
fn variadic_function_collects_rest_into_a_list() {
    let mut interp = fresh();
    wisp::rep_eval(&mut interp, "(def f (fn (a & more) (list a more)))").unwrap();
    assert_eq!(printed(&mut interp, "(f 1 2 3)"), "(1 (2 3))");
    assert_eq!(printed(&mut interp, "(f 1)"), "(1 ())");
}

#[test]
fn arity_mismatch_is_an_error() {
    let mut interp = fresh();
    wisp::rep_eval(&mut interp, "(def f (fn (a b) (+ a b)))").unwrap();
    assert!(wisp::rep_eval(&mut interp, "(f 1)").is_err());
    assert!(wisp::rep_eval(&mut interp, "(f 1 2 3)").is_err());
}

#[test]
fn macro_receives_unevaluated_arguments() {
    let mut interp = fresh();
    // `unless` expands to a plain `if` with the branches swapped, without
    // ever evaluating `boom` unless the condition is false.
    wisp::rep_eval(
        &mut interp,
        "(def unless (macro (cond then else) `(if ~cond ~else ~then)))",
    )
    .unwrap();
    assert_eq!(printed(&mut interp, "(unless true 1 2)"), "2");
    assert_eq!(printed(&mut interp, "(unless false (throw \"nope\") 9)"), "9");
}

#[test]
fn macroexpand_expands_without_evaluating() {
    let mut interp = fresh();
    wisp::rep_eval(&mut interp, "(def double (macro (x) `(+ ~x ~x)))").unwrap();
    assert_eq!(printed(&mut interp, "(macroexpand (double 5))"), "(+ 5 5)");
}

#[test]
fn macroexpand_is_a_no_op_on_non_macro_calls() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "(macroexpand (+ 1 2))"), "(+ 1 2)");
}

#[test]
fn nested_quasiquote_splice_and_unquote() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "`(a b ~(+ 1 1) ~@(list 1 2) c)"), "(a b 2 1 2 c)");
}

#[test]
fn atoms_are_mutable_cells() {
    let mut interp = fresh();
    wisp::rep_eval(&mut interp, "(def counter (atom 0))").unwrap();
    assert_eq!(printed(&mut interp, "(deref counter)"), "0");
    assert_eq!(printed(&mut interp, "(reset! counter 5)"), "5");
    assert_eq!(printed(&mut interp, "(deref counter)"), "5");
}

#[test]
fn with_meta_does_not_mutate_the_original() {
    let mut interp = fresh();
    wisp::rep_eval(&mut interp, "(def v [1 2 3])").unwrap();
    wisp::rep_eval(&mut interp, "(def v2 (with-meta v {:tag 1}))").unwrap();
    assert_eq!(printed(&mut interp, "(meta v)"), "nil");
    assert_eq!(printed(&mut interp, "(meta v2)"), "{:tag 1}");
    assert_eq!(printed(&mut interp, "(= v v2)"), "true");
}

#[test]
fn try_star_catches_and_binds_the_payload() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, r#"(try* (+ 1 (throw "boom")) e e)"#), "\"boom\"");
}

#[test]
fn try_star_catches_lookup_errors_too() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "(try* undefined-symbol e (str \"caught: \" e))"), "\"caught: Cannot find 'undefined-symbol' in current context\"");
}

#[test]
fn apply_invokes_a_function_over_a_list_of_arguments() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "(apply + (list 1 2 3))"), "6");
}

#[test]
fn apply_of_a_macro_is_a_type_error() {
    let mut interp = fresh();
    wisp::rep_eval(&mut interp, "(def m (macro (x) x))").unwrap();
    assert!(wisp::rep_eval(&mut interp, "(apply m (list 1))").is_err());
}

#[test]
fn def_returns_the_bound_value() {
    let mut interp = fresh();
    assert_eq!(printed(&mut interp, "(def x 42)"), "42");
}
