//! The tail-call-optimized evaluator (spec.md §4.4).
//!
//! Grounded on `examples/original_source/src/interpreter.cpp`'s
//! `EvaluateExpression`/`Apply`/`EvalAst`/`QuasiQuote`: a `(current
//! expression, current environment)` pair looped over in
//! [`Evaluator::evaluate`], where every special form either produces a
//! final [`Value`] or rewrites the pair for the next iteration — no Rust
//! stack frame is consumed per tail call.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{
    env::Env,
    error::{RunResult, WispError},
    function::{FnKind, Function},
    list::{self, List},
    value::{Bytes, Value, ValueKind},
};

/// Signature of a host-implemented builtin (spec.md §3 `Builtin`): takes the
/// evaluator (so `eval`/`apply` can re-enter it) and already-evaluated args.
pub type BuiltinFn = fn(&mut Evaluator, Vec<Value>) -> RunResult<Value>;

/// Non-tail recursion bound (spec.md §4.4, §5): "Recursion limit reached".
const MAX_RECURSION_DEPTH: usize = 500;

/// What the main loop does next: a final value, or a rewritten pair to keep
/// trampolining on.
enum Control {
    Done(Value),
    Tail(Value, Env),
}

/// Increments the shared counter on entry, decrements on every exit path —
/// including errors and panics — via `Drop` (spec.md §9 "Recursion guard").
///
/// Holds its own `Rc` clone of the counter rather than a borrow of it, so
/// the guard can stay alive across the re-entrant `&mut self` calls
/// `evaluate`'s loop makes (`apply`, `eval_ast`) without holding a borrow of
/// `Evaluator` itself.
struct RecursionGuard(Rc<Cell<usize>>);

impl RecursionGuard {
    fn enter(depth: &Rc<Cell<usize>>) -> RunResult<Self> {
        if depth.get() >= MAX_RECURSION_DEPTH {
            return Err(WispError::runtime("Recursion limit reached"));
        }
        depth.set(depth.get() + 1);
        Ok(Self(depth.clone()))
    }
}

impl Drop for RecursionGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// Drives evaluation of the language against one global frame.
pub struct Evaluator {
    pub global: Env,
    pub writer: Box<dyn crate::io::PrintWriter>,
    pub interner: Option<Rc<RefCell<crate::intern::InternPool>>>,
    depth: Rc<Cell<usize>>,
}

impl Evaluator {
    pub fn new(global: Env) -> Self {
        Self::with_writer(global, Box::new(crate::io::StdPrint))
    }

    pub fn with_writer(global: Env, writer: Box<dyn crate::io::PrintWriter>) -> Self {
        let interner = Some(Rc::new(RefCell::new(crate::intern::InternPool::new())));
        Self { global, writer, interner, depth: Rc::new(Cell::new(0)) }
    }

    /// Reports the interpreter's fixed recursion bound, for `get-system-info`.
    pub fn recursion_limit() -> usize {
        MAX_RECURSION_DEPTH
    }

    /// Entry point: evaluates `expr` in `env`, trampolining through tail
    /// positions without growing the Rust stack.
    pub fn evaluate(&mut self, expr: Value, env: Env) -> RunResult<Value> {
        let _guard = RecursionGuard::enter(&self.depth)?;
        let mut curr = expr;
        let mut env = env;
        loop {
            match &curr.kind {
                ValueKind::List(None) => return Ok(curr),
                ValueKind::List(Some(node)) => {
                    let head = node.head.clone();
                    let rest = node.tail.clone();
                    match self.apply(head, rest, env.clone())? {
                        Control::Done(v) => return Ok(v),
                        Control::Tail(next_expr, next_env) => {
                            curr = next_expr;
                            env = next_env;
                        }
                    }
                }
                _ => return self.eval_ast(&curr, &env),
            }
        }
    }

    /// `Symbol` resolves via the environment; `List`/`Vector` evaluates each
    /// element into a new list/vector; anything else self-evaluates with its
    /// metadata cleared (spec.md §4.4).
    fn eval_ast(&mut self, expr: &Value, env: &Env) -> RunResult<Value> {
        match &expr.kind {
            ValueKind::Symbol(name) => env.lookup(name),
            ValueKind::List(l) => Ok(Value::list(list::from_vec(self.eval_each(l.clone(), env)?))),
            ValueKind::Vector(l) => Ok(Value::vector(list::from_vec(self.eval_each(l.clone(), env)?))),
            _ => Ok(expr.without_meta()),
        }
    }

    fn eval_each(&mut self, list: List, env: &Env) -> RunResult<Vec<Value>> {
        let mut out = Vec::with_capacity(list::len(&list));
        let mut cur = list;
        while let Some(node) = cur {
            out.push(self.evaluate(node.head.clone(), env.clone())?);
            cur = node.tail.clone();
        }
        Ok(out)
    }

    /// Dispatches a list's `(head . args)` form: reserved special forms by
    /// literal head symbol, otherwise evaluate-and-invoke.
    fn apply(&mut self, head: Value, args: List, env: Env) -> RunResult<Control> {
        if head.is_symbol() {
            match head.as_bytes().expect("is_symbol guarantees a byte body") {
                b"def" => return self.sf_def(args, env),
                b"let*" => return self.sf_let(args, env),
                b"do" => return self.sf_do(args, env),
                b"if" => return self.sf_if(args, env),
                b"fn" => return self.sf_fn(args, env, FnKind::Function),
                b"macro" => return self.sf_fn(args, env, FnKind::Macro),
                b"quote" => return Self::sf_quote(args),
                b"quasiquote" => return self.sf_quasiquote(args, env),
                b"macroexpand" => return self.sf_macroexpand(args, env),
                b"try*" => return self.sf_try(args, env),
                _ => {}
            }
        }

        let func = self.evaluate(head, env.clone())?;
        if let ValueKind::Function(f) = &func.kind {
            if f.kind == FnKind::Macro {
                let expanded = self.eval_function(f, list::to_vec(&args))?;
                return Ok(Control::Tail(expanded, env));
            }
        }
        if !func.is_invokable() {
            return Err(WispError::type_error("Cannot call non-function"));
        }
        let evaled_args = self.eval_each(args, &env)?;
        match &func.kind {
            ValueKind::Builtin(b) => Ok(Control::Done((b.func)(self, evaled_args)?)),
            ValueKind::Function(f) => {
                let frame = f.bind(evaled_args)?;
                Ok(Control::Tail(f.body.clone(), frame))
            }
            _ => unreachable!("is_invokable only accepts Builtin or Function(Function)"),
        }
    }

    /// Fully evaluates a closure body against its bound frame — used for
    /// macro expansion and for `apply`/`eval`-style re-entry from builtins,
    /// both of which need a concrete value back rather than a tail rewrite.
    fn eval_function(&mut self, f: &Rc<Function>, args: Vec<Value>) -> RunResult<Value> {
        let frame = f.bind(args)?;
        self.evaluate(f.body.clone(), frame)
    }

    /// Invokes an already-evaluated callable with already-evaluated args —
    /// the path used by the `apply` and `eval` builtins to re-enter the
    /// evaluator (spec.md §4.5). Macros are not invokable this way (spec.md
    /// §9 Open Question).
    pub fn call(&mut self, func: &Value, args: Vec<Value>) -> RunResult<Value> {
        match &func.kind {
            ValueKind::Builtin(b) => (b.func)(self, args),
            ValueKind::Function(f) if f.kind == FnKind::Function => self.eval_function(f, args),
            ValueKind::Function(f) if f.kind == FnKind::Macro => {
                Err(WispError::type_error("Cannot apply a macro"))
            }
            _ => Err(WispError::type_error("Cannot call non-function")),
        }
    }

    /// `eval`: runs `expr` in the global frame, regardless of the caller's
    /// lexical environment (spec.md §4.5).
    pub fn eval_global(&mut self, expr: Value) -> RunResult<Value> {
        let global = self.global.clone();
        self.evaluate(expr, global)
    }

    fn sf_def(&mut self, args: List, env: Env) -> RunResult<Control> {
        let args = list::to_vec(&args);
        if args.len() != 2 {
            return Err(WispError::arity("Def! takes 2 arguments"));
        }
        let name = expect_symbol(&args[0], "Def! only accepts symbol keys")?;
        let value = self.evaluate(args[1].clone(), env.clone())?;
        env.set(name, value.clone());
        Ok(Control::Done(value))
    }

    fn sf_let(&mut self, args: List, env: Env) -> RunResult<Control> {
        let args = list::to_vec(&args);
        if args.len() != 2 {
            return Err(WispError::arity("Let* takes 2 arguments"));
        }
        let bindings = match &args[0].kind {
            ValueKind::List(l) => l.clone(),
            _ => return Err(WispError::type_error("Let* takes a list as first argument")),
        };
        let child = Env::new(Some(env));
        let mut it = list::to_vec(&bindings).into_iter();
        loop {
            let Some(key) = it.next() else { break };
            let name = expect_symbol(&key, "Let* only accepts symbol keys")?;
            let value_form = it.next().ok_or_else(|| WispError::syntax("Odd number of arguments"))?;
            let value = self.evaluate(value_form, child.clone())?;
            child.set(name, value);
        }
        Ok(Control::Tail(args[1].clone(), child))
    }

    fn sf_do(&mut self, args: List, env: Env) -> RunResult<Control> {
        let items = list::to_vec(&args);
        let Some((last, init)) = items.split_last() else {
            return Ok(Control::Done(Value::nil()));
        };
        for expr in init {
            self.evaluate(expr.clone(), env.clone())?;
        }
        Ok(Control::Tail(last.clone(), env))
    }

    fn sf_if(&mut self, args: List, env: Env) -> RunResult<Control> {
        let items = list::to_vec(&args);
        if items.len() != 2 && items.len() != 3 {
            return Err(WispError::arity("If takes 2 or 3 arguments"));
        }
        let cond = self.evaluate(items[0].clone(), env.clone())?;
        if cond.is_truthy() {
            Ok(Control::Tail(items[1].clone(), env))
        } else if items.len() == 3 {
            Ok(Control::Tail(items[2].clone(), env))
        } else {
            Ok(Control::Done(Value::nil()))
        }
    }

    fn sf_fn(&mut self, args: List, env: Env, kind: FnKind) -> RunResult<Control> {
        let items = list::to_vec(&args);
        if items.len() != 2 {
            return Err(WispError::arity("Function takes 2 arguments"));
        }
        let param_list = match &items[0].kind {
            ValueKind::List(l) | ValueKind::Vector(l) => l.clone(),
            _ => return Err(WispError::type_error("Function takes a list/vector as first argument")),
        };
        let mut params = Vec::new();
        let mut rest = None;
        let mut it = list::to_vec(&param_list).into_iter();
        while let Some(p) = it.next() {
            let name = expect_symbol(&p, "Function only accepts symbol parameter names")?;
            if &*name == b"&" {
                let rest_form = it.next().ok_or_else(|| WispError::syntax("Expected variadic parameter name"))?;
                rest = Some(expect_symbol(&rest_form, "Function only accepts symbol parameter names")?);
                break;
            }
            params.push(name);
        }
        let function = Function { params, rest, env, body: items[1].clone(), kind };
        Ok(Control::Done(Value::function(function)))
    }

    fn sf_quote(args: List) -> RunResult<Control> {
        let mut items = list::to_vec(&args);
        if items.len() != 1 {
            return Err(WispError::arity("Quote takes 1 argument"));
        }
        Ok(Control::Done(items.remove(0)))
    }

    fn sf_quasiquote(&mut self, args: List, env: Env) -> RunResult<Control> {
        let items = list::to_vec(&args);
        if items.len() != 1 {
            return Err(WispError::arity("QuasiQuote takes 1 argument"));
        }
        let rewritten = self.quasiquote_rewrite(&items[0], &env)?;
        Ok(Control::Tail(rewritten, env))
    }

    /// The quasiquote rewrite rule (spec.md §4.4): `cons`/`concat` are
    /// resolved to their *current* bindings once, here, and embedded
    /// directly as values in the rewritten form — rebinding them later does
    /// not change already-rewritten quasiquotes.
    fn quasiquote_rewrite(&mut self, expr: &Value, env: &Env) -> RunResult<Value> {
        if !expr.is_nonempty_list() {
            return Ok(mk_list(vec![sym(b"quote"), expr.clone()]));
        }
        let list = match &expr.kind {
            ValueKind::List(l) => l.clone(),
            _ => unreachable!("is_nonempty_list guarantees a List"),
        };
        let head = list::first(&list);
        let tail = list::rest(&list);

        if head.is_symbol() && head.as_bytes() == Some(b"unquote") {
            let rest_items = list::to_vec(&tail);
            if rest_items.len() != 1 {
                return Err(WispError::syntax("unquote takes 1 argument"));
            }
            return Ok(rest_items.into_iter().next().unwrap());
        }

        if head.is_nonempty_list() {
            let head_list = match &head.kind {
                ValueKind::List(l) => l.clone(),
                _ => unreachable!(),
            };
            let inner_head = list::first(&head_list);
            if inner_head.is_symbol() && inner_head.as_bytes() == Some(b"splice-unquote") {
                let spliced = list::to_vec(&list::rest(&head_list));
                if spliced.len() != 1 {
                    return Err(WispError::syntax("splice-unquote takes 1 argument"));
                }
                let concat_fn = env.lookup(b"concat")?;
                let rest_rewritten = self.quasiquote_rewrite(&Value::list(tail), env)?;
                return Ok(mk_list(vec![concat_fn, spliced.into_iter().next().unwrap(), rest_rewritten]));
            }
        }

        let cons_fn = env.lookup(b"cons")?;
        let head_rewritten = self.quasiquote_rewrite(&head, env)?;
        let tail_rewritten = self.quasiquote_rewrite(&Value::list(tail), env)?;
        Ok(mk_list(vec![cons_fn, head_rewritten, tail_rewritten]))
    }

    /// Repeatedly expands `x` while it's a list call to a macro, swallowing
    /// errors from the (side-effecting) head evaluation, per spec.md §4.4.
    fn sf_macroexpand(&mut self, args: List, env: Env) -> RunResult<Control> {
        let items = list::to_vec(&args);
        if items.len() != 1 {
            return Err(WispError::arity("MacroExpand takes 1 argument"));
        }
        let mut sub_expr = items.into_iter().next().unwrap();
        loop {
            if !sub_expr.is_nonempty_list() {
                break;
            }
            let list = match &sub_expr.kind {
                ValueKind::List(l) => l.clone(),
                _ => unreachable!(),
            };
            let head = list::first(&list);
            let rest = list::rest(&list);
            let evaluated_head = match self.evaluate(head, env.clone()) {
                Ok(v) => v,
                Err(_) => break,
            };
            match &evaluated_head.kind {
                ValueKind::Function(f) if f.kind == FnKind::Macro => {
                    sub_expr = self.eval_function(f, list::to_vec(&rest))?;
                }
                _ => break,
            }
        }
        Ok(Control::Done(sub_expr))
    }

    fn sf_try(&mut self, args: List, env: Env) -> RunResult<Control> {
        let items = list::to_vec(&args);
        if items.len() != 3 {
            return Err(WispError::arity("try* takes 3 arguments"));
        }
        let catch_name = expect_symbol(&items[1], "Second argument must be a name")?;
        match self.evaluate(items[0].clone(), env.clone()) {
            Ok(v) => Ok(Control::Done(v)),
            Err(e) => {
                let frame = Env::new(Some(env));
                frame.set(catch_name, e.payload);
                Ok(Control::Tail(items[2].clone(), frame))
            }
        }
    }
}

fn expect_symbol(v: &Value, message: &str) -> RunResult<Bytes> {
    match &v.kind {
        ValueKind::Symbol(b) => Ok(b.clone()),
        _ => Err(WispError::type_error(message)),
    }
}

fn sym(bytes: &[u8]) -> Value {
    Value::symbol(bytes)
}

fn mk_list(items: Vec<Value>) -> Value {
    Value::list(list::from_vec(items))
}
