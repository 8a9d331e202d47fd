//! Exercises `bootstrap.wisp` the same way the REPL driver's `load-file`
//! does (spec.md §6): wrap the whole file in one `(do ...)` form and
//! evaluate it in the global frame. Grounded on
//! `examples/original_source/src/repl_main.cpp`'s `load-file` one-liner.

const BOOTSTRAP: &str = include_str!("../../../bootstrap.wisp");

fn load_bootstrap(interp: &mut wisp::eval::Evaluator) {
    let wrapped = format!("(do {BOOTSTRAP})");
    let result = wisp::rep_eval(interp, &wrapped).expect("bootstrap.wisp should evaluate");
    assert!(result.is_truthy(), "bootstrap.wisp must return a truthy value");
}

fn fresh_with_bootstrap() -> wisp::eval::Evaluator {
    let mut interp = wisp::new_interpreter();
    load_bootstrap(&mut interp);
    interp
}

fn printed(interp: &mut wisp::eval::Evaluator, src: &str) -> String {
    wisp::printer::print_readable(&wisp::rep_eval(interp, src).unwrap())
}

#[test]
fn not_inverts_truthiness() {
    let mut interp = fresh_with_bootstrap();
    assert_eq!(printed(&mut interp, "(not nil)"), "true");
    assert_eq!(printed(&mut interp, "(not false)"), "true");
    assert_eq!(printed(&mut interp, "(not 0)"), "false");
    assert_eq!(printed(&mut interp, "(not true)"), "false");
}

#[test]
fn and_short_circuits_on_the_first_falsy_value() {
    let mut interp = fresh_with_bootstrap();
    assert_eq!(printed(&mut interp, "(and)"), "true");
    assert_eq!(printed(&mut interp, "(and 1 2 3)"), "3");
    assert_eq!(printed(&mut interp, "(and 1 false 3)"), "false");
    assert_eq!(printed(&mut interp, "(and 1 nil 3)"), "nil");
}

#[test]
fn or_returns_first_truthy_value() {
    let mut interp = fresh_with_bootstrap();
    assert_eq!(printed(&mut interp, "(or)"), "nil");
    assert_eq!(printed(&mut interp, "(or nil false 3)"), "3");
    assert_eq!(printed(&mut interp, "(or 1 2)"), "1");
}

#[test]
fn cond_picks_the_first_true_branch() {
    let mut interp = fresh_with_bootstrap();
    assert_eq!(printed(&mut interp, "(cond false 1 true 2 true 3)"), "2");
    assert_eq!(printed(&mut interp, "(cond false 1 false 2)"), "nil");
}

#[test]
fn and_does_not_evaluate_later_clauses_once_short_circuited() {
    let mut interp = fresh_with_bootstrap();
    // If `and` evaluated every clause eagerly this would error on the
    // unbound `boom` symbol instead of short-circuiting at `false`.
    assert_eq!(printed(&mut interp, "(and false boom)"), "false");
}
