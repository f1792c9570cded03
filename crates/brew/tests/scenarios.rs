//! The six worked scenarios from `spec.md` §8, each built directly as an
//! `ast::Program` (no parser in scope) and asserted against a
//! `CollectOutput` sink. `print` adds no separator or trailing newline
//! itself, so a program with several `print` statements produces one
//! unbroken string — these assertions concatenate the expected lines
//! accordingly.

use brew::ast::{BinOp, Expr, Func, Param, Program, Stmt, Target};
use brew::io::{CollectOutput, NullTrace, StdInput};
use brew::Interpreter;
use pretty_assertions::assert_eq;

fn run(program: Program) -> String {
    let mut interpreter: Interpreter<_, StdInput, NullTrace> =
        Interpreter::new(CollectOutput::new(), None);
    interpreter.run(&program).expect("program should run without error");
    interpreter.output().output().to_owned()
}

#[test]
fn arity_overloading() {
    let f0 = Func::new("f", vec![], vec![Stmt::Return(Some(Expr::Int(1)))]);
    let f1 = Func::new(
        "f",
        vec![Param::ByValue("x".into())],
        vec![Stmt::Return(Some(Expr::bin(BinOp::Add, Expr::var("x"), Expr::Int(1))))],
    );
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::Call(Expr::call("print", vec![Expr::call("f", vec![])])),
            Stmt::Call(Expr::call("print", vec![Expr::call("f", vec![Expr::Int(5)])])),
        ],
    );
    let output = run(Program::new(vec![f0, f1, main]));
    assert_eq!(output, "16");
}

#[test]
fn closure_captures_primitive() {
    let make = Func::new(
        "make",
        vec![],
        vec![
            Stmt::assign(Target::name("x"), Expr::Int(10)),
            Stmt::Return(Some(Expr::lambda(
                vec![],
                vec![Stmt::Return(Some(Expr::var("x")))],
            ))),
        ],
    );
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("g"), Expr::call("make", vec![])),
            Stmt::assign(Target::name("x"), Expr::Int(999)),
            Stmt::Call(Expr::call("print", vec![Expr::call("g", vec![])])),
        ],
    );
    let output = run(Program::new(vec![make, main]));
    assert_eq!(output, "10");
}

#[test]
fn reference_parameter() {
    let inc = Func::new(
        "inc",
        vec![Param::ByReference("n".into())],
        vec![Stmt::assign(
            Target::name("n"),
            Expr::bin(BinOp::Add, Expr::var("n"), Expr::Int(1)),
        )],
    );
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("a"), Expr::Int(5)),
            Stmt::Call(Expr::call("inc", vec![Expr::var("a")])),
            Stmt::Call(Expr::call("print", vec![Expr::var("a")])),
        ],
    );
    let output = run(Program::new(vec![inc, main]));
    assert_eq!(output, "6");
}

#[test]
fn prototype_chain() {
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("base"), Expr::ObjectExpr),
            Stmt::assign(
                Target::field("base", "hi"),
                Expr::lambda(vec![], vec![Stmt::Return(Some(Expr::Int(1)))]),
            ),
            Stmt::assign(Target::name("child"), Expr::ObjectExpr),
            Stmt::assign(Target::field("child", "proto"), Expr::var("base")),
            Stmt::Call(Expr::call(
                "print",
                vec![Expr::method_call("child", "hi", vec![])],
            )),
        ],
    );
    let output = run(Program::new(vec![main]));
    assert_eq!(output, "1");
}

#[test]
fn method_rebinds_this() {
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::assign(Target::name("o"), Expr::ObjectExpr),
            Stmt::assign(Target::field("o", "n"), Expr::Int(7)),
            Stmt::assign(
                Target::field("o", "get"),
                Expr::lambda(vec![], vec![Stmt::Return(Some(Expr::field("this", "n")))]),
            ),
            Stmt::Call(Expr::call("print", vec![Expr::method_call("o", "get", vec![])])),
        ],
    );
    let output = run(Program::new(vec![main]));
    assert_eq!(output, "7");
}

#[test]
fn bool_int_mixing() {
    let main = Func::new(
        "main",
        vec![],
        vec![
            Stmt::Call(Expr::call(
                "print",
                vec![Expr::bin(BinOp::Add, Expr::Bool(true), Expr::Int(1))],
            )),
            Stmt::Call(Expr::call(
                "print",
                vec![Expr::bin(BinOp::Eq, Expr::Int(0), Expr::Bool(false))],
            )),
            Stmt::Call(Expr::call("print", vec![Expr::not(Expr::Int(0))])),
        ],
    );
    let output = run(Program::new(vec![main]));
    assert_eq!(output, "2truetrue");
}
