//! Shorthand constructors for producers and tests.
//!
//! Each helper builds one node with no position attached. They take
//! `impl Into<String>` for names and plain children otherwise, so nested
//! trees read close to Stella source.
//!
//! # Examples
//!
//! ```
//! use stella_syntax::build::{cast, int, nat, throw};
//!
//! // throw(5) and 5 cast as Nat
//! let thrown = throw(int(5));
//! let casted = cast(int(5), nat());
//!
//! assert_eq!(thrown, throw(int(5)));
//! assert_ne!(thrown, casted);
//! ```

use crate::ast::decl::{self, Annotation, Decl};
use crate::ast::expr::{self, BinaryOp, Binding, Expr, MatchCase, ParamDecl, PatternBinding};
use crate::ast::pat::{self, LabelledPattern, Pattern};
use crate::ast::program::{Extension, LanguageDecl, Module, Program};
use crate::ast::ty::{self, RecordFieldType, Type, VariantFieldType};

// Expressions

/// Natural number literal.
#[must_use]
pub fn int(value: u64) -> Expr {
    expr::ConstInt::new(value).into()
}

/// `true` or `false`.
#[must_use]
pub fn boolean(value: bool) -> Expr {
    if value {
        expr::ConstTrue::new().into()
    } else {
        expr::ConstFalse::new().into()
    }
}

/// `unit`
#[must_use]
pub fn unit() -> Expr {
    expr::ConstUnit::new().into()
}

/// Memory address literal.
#[must_use]
pub fn memory(address: u64) -> Expr {
    expr::ConstMemory::new(address).into()
}

/// Variable reference.
#[must_use]
pub fn var(name: impl Into<String>) -> Expr {
    expr::Var::new(name.into()).into()
}

/// `throw(e)`
#[must_use]
pub fn throw(value: Expr) -> Expr {
    expr::Throw::new(Box::new(value)).into()
}

/// `e cast as T`
#[must_use]
pub fn cast(value: Expr, target: Type) -> Expr {
    expr::TypeCast::new(Box::new(value), target).into()
}

/// `e as T`
#[must_use]
pub fn ascribe(value: Expr, ty: Type) -> Expr {
    expr::TypeAsc::new(Box::new(value), ty).into()
}

/// `f(args...)`
#[must_use]
pub fn app(function: Expr, args: Vec<Expr>) -> Expr {
    expr::Application::new(Box::new(function), args).into()
}

/// `f [T...]`
#[must_use]
pub fn type_app(function: Expr, types: Vec<Type>) -> Expr {
    expr::TypeApplication::new(Box::new(function), types).into()
}

/// `fn(params...) { return body }`
#[must_use]
pub fn abs(params: Vec<ParamDecl>, body: Expr) -> Expr {
    expr::Abstraction::new(params, Box::new(body)).into()
}

/// `generic [X...] body`
#[must_use]
pub fn type_abs<S: Into<String>>(generics: impl IntoIterator<Item = S>, body: Expr) -> Expr {
    expr::TypeAbstraction::new(names(generics), Box::new(body)).into()
}

/// `name : T`
#[must_use]
pub fn param(name: impl Into<String>, ty: Type) -> ParamDecl {
    ParamDecl::new(name, ty)
}

/// `if c then a else b`
#[must_use]
pub fn if_(condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
    expr::If::new(
        Box::new(condition),
        Box::new(then_branch),
        Box::new(else_branch),
    )
    .into()
}

/// `a op b`
#[must_use]
pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    expr::Binary::new(op, Box::new(left), Box::new(right)).into()
}

/// `e1; e2`
#[must_use]
pub fn seq(first: Expr, second: Expr) -> Expr {
    expr::Sequence::new(Box::new(first), Box::new(second)).into()
}

/// `let p = e, ... in body`
#[must_use]
pub fn let_(bindings: Vec<(Pattern, Expr)>, body: Expr) -> Expr {
    expr::Let::new(pattern_bindings(bindings), Box::new(body)).into()
}

/// `letrec p = e, ... in body`
#[must_use]
pub fn let_rec(bindings: Vec<(Pattern, Expr)>, body: Expr) -> Expr {
    expr::LetRec::new(pattern_bindings(bindings), Box::new(body)).into()
}

/// `succ(e)`
#[must_use]
pub fn succ(value: Expr) -> Expr {
    expr::Succ::new(Box::new(value)).into()
}

/// `Nat::pred(e)`
#[must_use]
pub fn pred(value: Expr) -> Expr {
    expr::Pred::new(Box::new(value)).into()
}

/// `Nat::iszero(e)`
#[must_use]
pub fn is_zero(value: Expr) -> Expr {
    expr::IsZero::new(Box::new(value)).into()
}

/// `not(e)`
#[must_use]
pub fn not(value: Expr) -> Expr {
    expr::LogicNot::new(Box::new(value)).into()
}

/// `Nat::rec(n, z, s)`
#[must_use]
pub fn nat_rec(count: Expr, initial: Expr, step: Expr) -> Expr {
    expr::NatRec::new(Box::new(count), Box::new(initial), Box::new(step)).into()
}

/// `fix(e)`
#[must_use]
pub fn fix(function: Expr) -> Expr {
    expr::Fix::new(Box::new(function)).into()
}

/// `{e1, e2, ...}`
#[must_use]
pub fn tuple(elements: Vec<Expr>) -> Expr {
    expr::Tuple::new(elements).into()
}

/// `e.n`, 1-based
#[must_use]
pub fn dot_tuple(tuple: Expr, index: u64) -> Expr {
    expr::DotTuple::new(Box::new(tuple), index).into()
}

/// `{a = e1, ...}`
#[must_use]
pub fn record<S: Into<String>>(fields: Vec<(S, Expr)>) -> Expr {
    let bindings = fields
        .into_iter()
        .map(|(name, value)| Binding::new(name, value))
        .collect();
    expr::Record::new(bindings).into()
}

/// `e.label`
#[must_use]
pub fn dot_record(record: Expr, label: impl Into<String>) -> Expr {
    expr::DotRecord::new(Box::new(record), label.into()).into()
}

/// `inl(e)`
#[must_use]
pub fn inl(value: Expr) -> Expr {
    expr::Inl::new(Box::new(value)).into()
}

/// `inr(e)`
#[must_use]
pub fn inr(value: Expr) -> Expr {
    expr::Inr::new(Box::new(value)).into()
}

/// `<| label = e |>` or `<| label |>`
#[must_use]
pub fn variant(label: impl Into<String>, data: Option<Expr>) -> Expr {
    expr::Variant::new(label.into(), data.map(Box::new)).into()
}

/// `match e { p => body, ... }`
#[must_use]
pub fn match_(scrutinee: Expr, cases: Vec<(Pattern, Expr)>) -> Expr {
    let cases = cases
        .into_iter()
        .map(|(pattern, body)| MatchCase::new(pattern, body))
        .collect();
    expr::Match::new(Box::new(scrutinee), cases).into()
}

/// `[e1, e2, ...]`
#[must_use]
pub fn list(elements: Vec<Expr>) -> Expr {
    expr::List::new(elements).into()
}

/// `cons(h, t)`
#[must_use]
pub fn cons(head: Expr, tail: Expr) -> Expr {
    expr::ConsList::new(Box::new(head), Box::new(tail)).into()
}

/// `List::head(e)`
#[must_use]
pub fn head(list: Expr) -> Expr {
    expr::Head::new(Box::new(list)).into()
}

/// `List::tail(e)`
#[must_use]
pub fn tail(list: Expr) -> Expr {
    expr::Tail::new(Box::new(list)).into()
}

/// `List::isempty(e)`
#[must_use]
pub fn is_empty(list: Expr) -> Expr {
    expr::IsEmpty::new(Box::new(list)).into()
}

/// `new(e)`
#[must_use]
pub fn new_ref(init: Expr) -> Expr {
    expr::Ref::new(Box::new(init)).into()
}

/// `*e`
#[must_use]
pub fn deref(reference: Expr) -> Expr {
    expr::Deref::new(Box::new(reference)).into()
}

/// `e1 := e2`
#[must_use]
pub fn assign(target: Expr, value: Expr) -> Expr {
    expr::Assign::new(Box::new(target), Box::new(value)).into()
}

/// `panic!`
#[must_use]
pub fn panic() -> Expr {
    expr::Panic::new().into()
}

/// `try { body } catch { p => handler }`
#[must_use]
pub fn try_catch(body: Expr, pattern: Pattern, handler: Expr) -> Expr {
    expr::TryCatch::new(Box::new(body), pattern, Box::new(handler)).into()
}

/// `try { body } with { fallback }`
#[must_use]
pub fn try_with(body: Expr, fallback: Expr) -> Expr {
    expr::TryWith::new(Box::new(body), Box::new(fallback)).into()
}

// Types

/// `Nat`
#[must_use]
pub fn nat() -> Type {
    ty::Nat::new().into()
}

/// `Bool`
#[must_use]
pub fn bool_ty() -> Type {
    ty::Bool::new().into()
}

/// `Unit`
#[must_use]
pub fn unit_ty() -> Type {
    ty::Unit::new().into()
}

/// `Top`
#[must_use]
pub fn top() -> Type {
    ty::Top::new().into()
}

/// `Bot`
#[must_use]
pub fn bottom() -> Type {
    ty::Bottom::new().into()
}

/// `auto`
#[must_use]
pub fn auto() -> Type {
    ty::Auto::new().into()
}

/// `fn(params...) -> ret`
#[must_use]
pub fn fun(params: Vec<Type>, ret: Type) -> Type {
    ty::Fun::new(params, Box::new(ret)).into()
}

/// `forall X, ... . body`
#[must_use]
pub fn for_all<S: Into<String>>(generics: impl IntoIterator<Item = S>, body: Type) -> Type {
    ty::ForAll::new(names(generics), Box::new(body)).into()
}

/// `T1 + T2`
#[must_use]
pub fn sum(left: Type, right: Type) -> Type {
    ty::Sum::new(Box::new(left), Box::new(right)).into()
}

/// `{T1, T2, ...}`
#[must_use]
pub fn tuple_ty(elements: Vec<Type>) -> Type {
    ty::Tuple::new(elements).into()
}

/// `{a : T1, ...}`
#[must_use]
pub fn record_ty<S: Into<String>>(fields: Vec<(S, Type)>) -> Type {
    let fields = fields
        .into_iter()
        .map(|(label, ty)| RecordFieldType::new(label, ty))
        .collect();
    ty::Record::new(fields).into()
}

/// `<| a : T1, b, ... |>`
#[must_use]
pub fn variant_ty<S: Into<String>>(fields: Vec<(S, Option<Type>)>) -> Type {
    let fields = fields
        .into_iter()
        .map(|(label, ty)| VariantFieldType::new(label, ty))
        .collect();
    ty::Variant::new(fields).into()
}

/// `[T]`
#[must_use]
pub fn list_ty(element: Type) -> Type {
    ty::List::new(Box::new(element)).into()
}

/// `&T`
#[must_use]
pub fn ref_ty(referent: Type) -> Type {
    ty::Ref::new(Box::new(referent)).into()
}

/// Type variable or alias name.
#[must_use]
pub fn ty_var(name: impl Into<String>) -> Type {
    ty::Var::new(name.into()).into()
}

// Patterns

/// Variable pattern.
#[must_use]
pub fn p_var(name: impl Into<String>) -> Pattern {
    pat::Var::new(name.into()).into()
}

/// Natural number pattern.
#[must_use]
pub fn p_int(value: u64) -> Pattern {
    pat::Int::new(value).into()
}

/// `true` or `false` pattern.
#[must_use]
pub fn p_bool(value: bool) -> Pattern {
    if value {
        pat::True::new().into()
    } else {
        pat::False::new().into()
    }
}

/// `unit` pattern.
#[must_use]
pub fn p_unit() -> Pattern {
    pat::Unit::new().into()
}

/// `succ(p)`
#[must_use]
pub fn p_succ(inner: Pattern) -> Pattern {
    pat::Succ::new(Box::new(inner)).into()
}

/// `inl(p)`
#[must_use]
pub fn p_inl(inner: Pattern) -> Pattern {
    pat::Inl::new(Box::new(inner)).into()
}

/// `inr(p)`
#[must_use]
pub fn p_inr(inner: Pattern) -> Pattern {
    pat::Inr::new(Box::new(inner)).into()
}

/// `{p1, p2, ...}`
#[must_use]
pub fn p_tuple(elements: Vec<Pattern>) -> Pattern {
    pat::Tuple::new(elements).into()
}

/// `{a = p1, ...}`
#[must_use]
pub fn p_record<S: Into<String>>(fields: Vec<(S, Pattern)>) -> Pattern {
    let fields = fields
        .into_iter()
        .map(|(label, pattern)| LabelledPattern::new(label, pattern))
        .collect();
    pat::Record::new(fields).into()
}

/// `<| label = p |>` or `<| label |>`
#[must_use]
pub fn p_variant(label: impl Into<String>, data: Option<Pattern>) -> Pattern {
    pat::Variant::new(label.into(), data.map(Box::new)).into()
}

/// `[p1, p2, ...]`
#[must_use]
pub fn p_list(elements: Vec<Pattern>) -> Pattern {
    pat::List::new(elements).into()
}

/// `cons(h, t)` pattern.
#[must_use]
pub fn p_cons(head: Pattern, tail: Pattern) -> Pattern {
    pat::Cons::new(Box::new(head), Box::new(tail)).into()
}

/// `p as T`
#[must_use]
pub fn p_asc(inner: Pattern, ty: Type) -> Pattern {
    pat::Asc::new(Box::new(inner), ty).into()
}

/// `p cast as T`
#[must_use]
pub fn p_cast(inner: Pattern, ty: Type) -> Pattern {
    pat::CastAs::new(Box::new(inner), ty).into()
}

// Declarations

/// `fn name(params...) -> ret { return body }`
#[must_use]
pub fn fun_decl(
    name: impl Into<String>,
    params: Vec<ParamDecl>,
    return_type: Type,
    body: Expr,
) -> Decl {
    decl::Fun::new(
        vec![],
        name.into(),
        params,
        Some(return_type),
        vec![],
        vec![],
        Box::new(body),
    )
    .into()
}

/// `generic fn name[X...](params...) -> ret { return body }`
#[must_use]
pub fn generic_fun_decl<S: Into<String>>(
    name: impl Into<String>,
    generics: impl IntoIterator<Item = S>,
    params: Vec<ParamDecl>,
    return_type: Type,
    body: Expr,
) -> Decl {
    decl::FunGeneric::new(
        vec![],
        name.into(),
        names(generics),
        params,
        Some(return_type),
        vec![],
        vec![],
        Box::new(body),
    )
    .into()
}

/// `inline fn ...`, as [`fun_decl`] with the `inline` annotation.
#[must_use]
pub fn inline_fun_decl(
    name: impl Into<String>,
    params: Vec<ParamDecl>,
    return_type: Type,
    body: Expr,
) -> Decl {
    decl::Fun::new(
        vec![Annotation::Inline],
        name.into(),
        params,
        Some(return_type),
        vec![],
        vec![],
        Box::new(body),
    )
    .into()
}

/// `type name = T`
#[must_use]
pub fn type_alias(name: impl Into<String>, ty: Type) -> Decl {
    decl::TypeAlias::new(name.into(), ty).into()
}

/// `exception type = T`
#[must_use]
pub fn exception_type(ty: Type) -> Decl {
    decl::ExceptionType::new(ty).into()
}

/// `exception variant label : T`
#[must_use]
pub fn exception_variant(label: impl Into<String>, ty: Type) -> Decl {
    decl::ExceptionVariant::new(label.into(), ty).into()
}

// Programs

/// `language core;` followed by `decls`, with no extensions.
#[must_use]
pub fn program(decls: Vec<Decl>) -> Program {
    Module::new(LanguageDecl::Core, vec![], decls).into()
}

/// `language core; extend with ...;` followed by `decls`.
#[must_use]
pub fn program_with<S: Into<String>>(
    extensions: impl IntoIterator<Item = S>,
    decls: Vec<Decl>,
) -> Program {
    Module::new(
        LanguageDecl::Core,
        vec![Extension::new(extensions)],
        decls,
    )
    .into()
}

fn names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Vec<String> {
    names.into_iter().map(Into::into).collect()
}

fn pattern_bindings(bindings: Vec<(Pattern, Expr)>) -> Vec<PatternBinding> {
    bindings
        .into_iter()
        .map(|(pattern, value)| PatternBinding::new(pattern, value))
        .collect()
}
