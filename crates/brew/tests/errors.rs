//! Fatal error paths (`spec.md` §7): missing `main`, ambiguous bare-name
//! overload reference, arithmetic type mismatches, division by zero, and
//! the ambient recursion guard (`SPEC_FULL.md` §5/§10).

use brew::ast::{BinOp, Expr, Func, Param, Program, Stmt, Target};
use brew::config::Limits;
use brew::io::{CollectOutput, NullTrace, StdInput};
use brew::{Interpreter, InterpreterError};
use pretty_assertions::assert_eq;

fn run_err(program: Program) -> InterpreterError {
    let mut interpreter: Interpreter<_, StdInput, NullTrace> =
        Interpreter::new(CollectOutput::new(), None);
    interpreter.run(&program).expect_err("program should fail")
}

#[test]
fn missing_main_is_name_error() {
    let only_helper = Func::new("helper", vec![], vec![Stmt::Return(Some(Expr::Int(1)))]);
    let err = run_err(Program::new(vec![only_helper]));
    assert!(matches!(err, InterpreterError::Name(_)), "expected NAME_ERROR, got {err:?}");
}

/// A bare name reference (not a direct call) with more than one arity
/// overload and no arity context is ambiguous (`spec.md` §4.2).
#[test]
fn ambiguous_bare_name_reference_is_name_error() {
    let f0 = Func::new("f", vec![], vec![Stmt::Return(Some(Expr::Int(1)))]);
    let f1 = Func::new(
        "f",
        vec![Param::ByValue("x".into())],
        vec![Stmt::Return(Some(Expr::var("x")))],
    );
    let main = Func::new(
        "main",
        vec![],
        // `g = f;` — a plain variable reference to `f`, not a call, so there
        // is no arity context to disambiguate the overload.
        vec![Stmt::assign(Target::name("g"), Expr::var("f"))],
    );
    let err = run_err(Program::new(vec![f0, f1, main]));
    assert!(matches!(err, InterpreterError::Name(_)), "expected NAME_ERROR, got {err:?}");
}

#[test]
fn string_plus_int_is_type_error() {
    let main = Func::new(
        "main",
        vec![],
        vec![Stmt::Call(Expr::call(
            "print",
            vec![Expr::bin(BinOp::Add, Expr::Str("a".into()), Expr::Int(1))],
        ))],
    );
    let err = run_err(Program::new(vec![main]));
    assert!(matches!(err, InterpreterError::Type(_)), "expected TYPE_ERROR, got {err:?}");
}

#[test]
fn comparison_on_strings_is_type_error() {
    let main = Func::new(
        "main",
        vec![],
        vec![Stmt::Call(Expr::call(
            "print",
            vec![Expr::bin(BinOp::Lt, Expr::Str("a".into()), Expr::Str("b".into()))],
        ))],
    );
    let err = run_err(Program::new(vec![main]));
    assert!(matches!(err, InterpreterError::Type(_)), "expected TYPE_ERROR, got {err:?}");
}

#[test]
fn calling_a_non_callable_is_type_error() {
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("x"), Expr::Int(5)),
            Stmt::Call(Expr::call("print", vec![Expr::call("x", vec![])])),
        ],
    );
    let err = run_err(Program::new(vec![main]));
    assert!(matches!(err, InterpreterError::Type(_)), "expected TYPE_ERROR, got {err:?}");
}

#[test]
fn division_by_zero_is_type_error() {
    let main = Func::new(
        "main",
        vec![],
        vec![Stmt::Call(Expr::call(
            "print",
            vec![Expr::bin(BinOp::Div, Expr::Int(1), Expr::Int(0))],
        ))],
    );
    let err = run_err(Program::new(vec![main]));
    assert!(matches!(err, InterpreterError::Type(_)), "expected TYPE_ERROR, got {err:?}");
}

/// Floor division rounds toward negative infinity (`spec.md` §4.1, resolved
/// against the original Python `//` semantics — see `DESIGN.md`).
#[test]
fn division_floors_toward_negative_infinity() {
    let main = Func::new(
        "main",
        vec![],
        vec![Stmt::Call(Expr::call(
            "print",
            vec![Expr::bin(BinOp::Div, Expr::neg(Expr::Int(7)), Expr::Int(2))],
        ))],
    );
    let mut interpreter: Interpreter<_, StdInput, NullTrace> =
        Interpreter::new(CollectOutput::new(), None);
    interpreter.run(&Program::new(vec![main])).unwrap();
    assert_eq!(interpreter.output().output(), "-4");
}

/// Unbounded recursion hits the configured call-depth limit instead of
/// overflowing the host stack (`SPEC_FULL.md` §5/§10 ambient recursion
/// guard).
#[test]
fn runaway_recursion_hits_recursion_limit() {
    let loop_forever = Func::new(
        "loop_forever",
        vec![],
        vec![Stmt::Return(Some(Expr::call("loop_forever", vec![])))],
    );
    let main = Func::new(
        "main",
        vec![],
        vec![Stmt::Return(Some(Expr::call("loop_forever", vec![])))],
    );
    let mut interpreter: Interpreter<_, StdInput, NullTrace> =
        Interpreter::new(CollectOutput::new(), None).with_limits(Limits { max_call_depth: 50 });
    let err = interpreter
        .run(&Program::new(vec![loop_forever, main]))
        .expect_err("should hit the recursion limit");
    assert!(matches!(err, InterpreterError::RecursionLimit(_)), "expected RecursionLimit, got {err:?}");
}
