//! Objects: identity equality, prototype-chain member lookup, and the
//! `proto` slot's special assignment/read handling (`spec.md` §3, §4.1,
//! §4.4, §8: "Object identity: `o1 == o2` is true iff they are the same
//! object; no two distinct `ObjectExpr` evaluations compare equal.").

use brew::ast::{BinOp, Expr, Func, Param, Program, Stmt, Target};
use brew::io::{CollectOutput, NullTrace, StdInput};
use brew::{Interpreter, InterpreterError};
use pretty_assertions::assert_eq;

fn run(program: Program) -> String {
    let mut interpreter: Interpreter<_, StdInput, NullTrace> =
        Interpreter::new(CollectOutput::new(), None);
    interpreter.run(&program).expect("program should run without error");
    interpreter.output().output().to_owned()
}

fn run_err(program: Program) -> InterpreterError {
    let mut interpreter: Interpreter<_, StdInput, NullTrace> =
        Interpreter::new(CollectOutput::new(), None);
    interpreter.run(&program).expect_err("program should fail")
}

#[test]
fn distinct_object_literals_are_not_equal() {
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("a"), Expr::ObjectExpr),
            Stmt::assign(Target::name("b"), Expr::ObjectExpr),
            Stmt::Call(Expr::call("print", vec![Expr::bin(BinOp::Eq, Expr::var("a"), Expr::var("b"))])),
            Stmt::Call(Expr::call("print", vec![Expr::bin(BinOp::Eq, Expr::var("a"), Expr::var("a"))])),
        ],
    );
    let output = run(Program::new(vec![main]));
    assert_eq!(output, "falsetrue");
}

/// Assigning one variable's object to another doesn't copy it — both names
/// observe mutations made through either one (`spec.md` §9 "object
/// references are shared intentionally").
#[test]
fn object_assignment_shares_identity() {
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("a"), Expr::ObjectExpr),
            Stmt::assign(Target::field("a", "n"), Expr::Int(1)),
            Stmt::assign(Target::name("b"), Expr::var("a")),
            Stmt::assign(Target::field("b", "n"), Expr::Int(2)),
            Stmt::Call(Expr::call("print", vec![Expr::field("a", "n")])),
        ],
    );
    let output = run(Program::new(vec![main]));
    assert_eq!(output, "2");
}

/// A member defined only on the proto is found through the chain; a member
/// shadowed on the child hides the proto's version.
#[test]
fn proto_chain_lookup_and_shadowing() {
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("base"), Expr::ObjectExpr),
            Stmt::assign(Target::field("base", "x"), Expr::Int(1)),
            Stmt::assign(Target::name("child"), Expr::ObjectExpr),
            Stmt::assign(Target::field("child", "proto"), Expr::var("base")),
            Stmt::Call(Expr::call("print", vec![Expr::field("child", "x")])),
            Stmt::assign(Target::field("child", "x"), Expr::Int(2)),
            Stmt::Call(Expr::call("print", vec![Expr::field("child", "x")])),
            Stmt::Call(Expr::call("print", vec![Expr::field("base", "x")])),
        ],
    );
    let output = run(Program::new(vec![main]));
    // base.x through the chain, then child's own shadow, then base's
    // untouched original — shadowing never mutates the prototype.
    assert_eq!(output, "121");
}

/// Reading an undefined member anywhere on the chain is a NAME_ERROR.
#[test]
fn missing_member_is_name_error() {
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("o"), Expr::ObjectExpr),
            Stmt::Call(Expr::call("print", vec![Expr::field("o", "nope")])),
        ],
    );
    let err = run_err(Program::new(vec![main]));
    assert!(matches!(err, InterpreterError::Name(_)), "expected NAME_ERROR, got {err:?}");
}

/// `.proto` reassignment to `nil` detaches the chain.
#[test]
fn proto_can_be_reset_to_nil() {
    let get_x = Func::new(
        "get_x",
        vec![Param::ByValue("o".into())],
        vec![Stmt::Return(Some(Expr::field("o", "x")))],
    );
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("base"), Expr::ObjectExpr),
            Stmt::assign(Target::field("base", "x"), Expr::Int(1)),
            Stmt::assign(Target::name("child"), Expr::ObjectExpr),
            Stmt::assign(Target::field("child", "proto"), Expr::var("base")),
            Stmt::assign(Target::field("child", "proto"), Expr::Nil),
            Stmt::Call(Expr::call("print", vec![Expr::call("get_x", vec![Expr::var("child")])])),
        ],
    );
    let err = run_err(Program::new(vec![get_x, main]));
    assert!(matches!(err, InterpreterError::Name(_)), "expected NAME_ERROR, got {err:?}");
}
