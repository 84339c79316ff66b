//! Integration tests: programs with type errors, and how they are reported.

use stella_syntax::ast::expr::BinaryOp;
use stella_syntax::build::*;
use stella_syntax::{Decl, Expr, Position, Program};
use stella_typecheck::{
    CheckOptions, Diagnostic, Emitter, Ty, TypeChecker, TypeError, check_program,
};

fn errors_of(program: &Program) -> Vec<TypeError> {
    match check_program(program) {
        Ok(()) => panic!("expected type errors"),
        Err(errors) => errors,
    }
}

fn main_decl(body: Expr) -> Decl {
    fun_decl("main", vec![param("n", nat())], nat(), body)
}

fn codes(errors: &[TypeError]) -> Vec<&'static str> {
    errors.iter().map(TypeError::code).collect()
}

#[test]
fn test_applying_a_non_function() {
    let program = program(vec![main_decl(app(var("n"), vec![int(1)]))]);
    let errors = errors_of(&program);
    assert!(matches!(errors[..], [TypeError::NotAFunction { found: Ty::Nat, .. }]));
}

#[test]
fn test_argument_mismatch() {
    let program = program(vec![
        fun_decl("f", vec![param("b", bool_ty())], nat(), int(0)),
        main_decl(app(var("f"), vec![var("n")])),
    ]);
    let errors = errors_of(&program);
    assert!(matches!(
        errors[..],
        [TypeError::Mismatch { expected: Ty::Bool, found: Ty::Nat, .. }]
    ));
}

#[test]
fn test_wrong_argument_count() {
    let program = program(vec![
        fun_decl("f", vec![param("a", nat())], nat(), var("a")),
        main_decl(app(var("f"), vec![var("n"), var("n")])),
    ]);
    let errors = errors_of(&program);
    assert!(matches!(errors[..], [TypeError::WrongArgCount { expected: 1, found: 2, .. }]));
}

#[test]
fn test_if_branches_disagree() {
    let program = program(vec![main_decl(if_(is_zero(var("n")), int(0), boolean(false)))]);
    let errors = errors_of(&program);
    assert_eq!(codes(&errors), vec!["ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION"]);
}

#[test]
fn test_if_condition_must_be_bool() {
    let program = program(vec![main_decl(if_(var("n"), int(0), int(1)))]);
    let errors = errors_of(&program);
    assert!(matches!(
        errors[..],
        [TypeError::Mismatch { expected: Ty::Bool, found: Ty::Nat, .. }]
    ));
}

#[test]
fn test_succ_of_bool() {
    let program = program(vec![main_decl(succ(boolean(true)))]);
    let errors = errors_of(&program);
    assert!(matches!(errors[..], [TypeError::Mismatch { expected: Ty::Nat, .. }]));
}

#[test]
fn test_undefined_variable() {
    let program = program(vec![main_decl(succ(var("m")))]);
    let errors = errors_of(&program);
    assert!(matches!(&errors[..], [TypeError::UndefinedVariable { name, .. }] if name == "m"));
}

#[test]
fn test_missing_main() {
    let program = program(vec![fun_decl("helper", vec![param("n", nat())], nat(), var("n"))]);
    assert_eq!(errors_of(&program), vec![TypeError::MissingMain]);
}

#[test]
fn test_illegal_cast() {
    let program = program_with(["#type-cast"], vec![main_decl(cast(boolean(true), nat()))]);
    let errors = errors_of(&program);
    assert!(matches!(
        errors[..],
        [TypeError::IllegalCast { from: Ty::Bool, to: Ty::Nat, .. }]
    ));
}

#[test]
fn test_throw_without_exception_type() {
    let program = program(vec![main_decl(throw(int(0)))]);
    let errors = errors_of(&program);
    assert_eq!(codes(&errors), vec!["ERROR_EXCEPTION_TYPE_NOT_DECLARED"]);
}

#[test]
fn test_non_exhaustive_match() {
    let body = match_(
        inl(var("n")),
        vec![(p_inl(p_var("k")), var("k"))],
    );
    let program = program(vec![main_decl(body)]);
    let errors = errors_of(&program);
    assert!(matches!(
        &errors[..],
        [TypeError::NonExhaustiveMatch { missing, .. }] if missing == &["inr(_)".to_string()]
    ));
}

#[test]
fn test_duplicate_declaration() {
    let program = program(vec![
        fun_decl("f", vec![], nat(), int(0)),
        fun_decl("f", vec![], nat(), int(1)),
        main_decl(var("n")),
    ]);
    let errors = errors_of(&program);
    assert!(matches!(&errors[..], [TypeError::DuplicateDeclaration { name, .. }] if name == "f"));
}

#[test]
fn test_errors_are_collected_in_order() {
    let program = program(vec![
        fun_decl("f", vec![param("a", nat())], bool_ty(), var("a")),
        main_decl(binary(BinaryOp::Add, var("x"), boolean(true))),
    ]);
    let errors = errors_of(&program);
    assert_eq!(errors.len(), 3);
    assert!(matches!(errors[0], TypeError::Mismatch { expected: Ty::Bool, .. }));
    assert!(matches!(errors[1], TypeError::UndefinedVariable { .. }));
    assert!(matches!(errors[2], TypeError::Mismatch { expected: Ty::Nat, found: Ty::Bool, .. }));
}

#[test]
fn test_fail_fast_stops_at_first_error() {
    let program = program(vec![
        fun_decl("f", vec![param("a", nat())], bool_ty(), var("a")),
        main_decl(binary(BinaryOp::Add, var("x"), boolean(true))),
    ]);
    let mut checker = TypeChecker::with_options(CheckOptions {
        fail_fast: true,
        max_errors: None,
    });
    let errors = checker.check(&program).unwrap_err();
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_diagnostic_rendering() {
    let source = "fn main(n : Nat) -> Nat {\n  return succ(true)\n}\n";
    let argument = boolean(true).at(Position::new(2, 15, 40));
    let program = program(vec![main_decl(succ(argument))]);
    let errors = errors_of(&program);

    let diagnostic = Diagnostic::from(&errors[0]);
    assert_eq!(diagnostic.position, Some(Position::new(2, 15, 40)));

    let rendered = Emitter::new(false).render(&diagnostic, source);
    assert!(rendered.starts_with("2:15: error: type mismatch: expected Nat, found Bool"));
    assert!(rendered.contains("[ERROR_UNEXPECTED_TYPE_FOR_EXPRESSION]"));
    assert!(rendered.contains("  return succ(true)"));
}
