//! Evaluator micro-benchmarks.
//!
//! Grounded on `examples/parcadei-ouros/crates/ouros/benches/arithmetic_non_foldable.rs`'s
//! non-foldable-body approach (measure repeated runtime evaluation, not a
//! constant the optimizer could fold away) — simplified to plain `criterion`
//! since this crate has no CPython-parity counterpart to benchmark against.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wisp::io::NoPrint;

fn new_bench_interp() -> wisp::eval::Evaluator {
    wisp::new_interpreter_with_writer(Box::new(NoPrint))
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut interp = new_bench_interp();
    c.bench_function("non-foldable arithmetic chain", |b| {
        b.iter(|| {
            let v = wisp::rep_eval(&mut interp, "(+ 1 (* 2 3) (- 10 4) (/ 20 5))").unwrap();
            black_box(v);
        });
    });
}

fn bench_recursive_factorial(c: &mut Criterion) {
    let mut interp = new_bench_interp();
    wisp::rep_eval(
        &mut interp,
        "(def fact (fn (n) (if (<= n 1) 1 (* n (fact (- n 1))))))",
    )
    .unwrap();
    c.bench_function("recursive factorial(15)", |b| {
        b.iter(|| {
            let v = wisp::rep_eval(&mut interp, "(fact 15)").unwrap();
            black_box(v);
        });
    });
}

fn bench_tail_recursive_loop(c: &mut Criterion) {
    let mut interp = new_bench_interp();
    wisp::rep_eval(
        &mut interp,
        "(def count-down (fn (n acc) (if (<= n 0) acc (count-down (- n 1) (+ acc 1)))))",
    )
    .unwrap();
    c.bench_function("tail-recursive count-down(2000)", |b| {
        b.iter(|| {
            let v = wisp::rep_eval(&mut interp, "(count-down 2000 0)").unwrap();
            black_box(v);
        });
    });
}

fn bench_map_assoc_chain(c: &mut Criterion) {
    let mut interp = new_bench_interp();
    c.bench_function("hash-map assoc/dissoc overlay chain", |b| {
        b.iter(|| {
            let v = wisp::rep_eval(
                &mut interp,
                "(get (assoc (dissoc (assoc (hash-map :a 1 :b 2) :c 3) :a) :d 4) :d)",
            )
            .unwrap();
            black_box(v);
        });
    });
}

criterion_group!(
    benches,
    bench_arithmetic,
    bench_recursive_factorial,
    bench_tail_recursive_loop,
    bench_map_assoc_chain
);
criterion_main!(benches);
