//! The CLI driver (spec.md §6), an external collaborator of the core
//! library: argv injection, bootstrap-script loading, and the prompt loop.
//!
//! Grounded on `examples/original_source/src/repl_main.cpp`'s `main`: the
//! same `*ARGV*` binding, the same one-line `load-file` bootstrap, the same
//! `Mal Repl v.0.9` banner, and the same `Mal Error: <msg>` error prefix —
//! kept verbatim since spec.md §6 treats it as the observable contract, not
//! an implementation detail.

use std::io::{self, BufRead, Write};

use wisp::{list, printer, value::Value};

const PROMPT: &str = "> ";

fn main() {
    let mut interp = wisp::new_interpreter();

    let argv = list::from_vec(std::env::args().map(|a| Value::string(a.into_bytes())).collect());
    interp.global.set(wisp::value::Bytes::from(&b"*ARGV*"[..]), Value::list(argv));

    if let Err(err) = bootstrap(&mut interp) {
        eprintln!("Script: Mal Error: {err}");
        std::process::exit(1);
    }

    println!("Mal Repl v.0.9");
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("{PROMPT}");
        let _ = io::stdout().flush();
        line.clear();
        let bytes_read = match stdin.lock().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => break,
        };
        if bytes_read == 0 {
            break;
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.is_empty() {
            continue;
        }
        match wisp::rep_eval(&mut interp, trimmed) {
            Ok(v) if !v.is_nil() => println!("{}", printer::print_readable(&v)),
            Ok(_) => {}
            Err(err) => eprintln!("Mal Error: {err}"),
        }
    }
}

/// Defines `load-file` and loads `bootstrap.wisp`. An `Err` here means the
/// bootstrap script itself failed to read or evaluate (spec.md §6's "Script:
/// Mal Error: ..." case); a non-true *result* of the load, as opposed to an
/// error, exits the process directly with status 0.
fn bootstrap(interp: &mut wisp::eval::Evaluator) -> Result<(), wisp::error::WispError> {
    wisp::rep_eval(
        interp,
        r#"(def load-file (fn (fName) (eval (read-string (str "(do " (slurp fName) ")")))))"#,
    )?;
    let result = wisp::rep_eval(interp, r#"(load-file "bootstrap.wisp")"#)?;
    if !result.is_truthy() {
        std::process::exit(0);
    }
    Ok(())
}
