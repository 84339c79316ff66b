//! Integration tests for visitor dispatch.
//!
//! `Rebuild` handles every variant of every family by constructing a fresh
//! copy of the node, so a tree that survives the trip unchanged shows each
//! `accept` routed to the right method with the right record.

use stella_syntax::ast::decl::{self, Decl, DeclVisitor};
use stella_syntax::ast::expr::{
    self, Binding, Expr, ExprVisitor, MatchCase, ParamDecl, PatternBinding,
};
use stella_syntax::ast::pat::{self, LabelledPattern, Pattern, PatternVisitor};
use stella_syntax::ast::program::{self, Program, ProgramVisitor};
use stella_syntax::ast::ty::{self, RecordFieldType, Type, TypeVisitor, VariantFieldType};
use stella_syntax::ast::expr::BinaryOp;
use stella_syntax::build::*;
use stella_syntax::span::Position;
use stella_syntax::walk::{NodeRef, post_order_expr};

type Pos = Option<Position>;

struct Rebuild;

fn place<N>(mut node: N, position: Pos, set: impl FnOnce(&mut N, Position) -> bool) -> N {
    if let Some(position) = position {
        set(&mut node, position);
    }
    node
}

fn e(node: impl Into<Expr>, position: Pos) -> Expr {
    place(node.into(), position, Expr::set_position)
}

fn t(node: impl Into<Type>, position: Pos) -> Type {
    place(node.into(), position, Type::set_position)
}

fn p(node: impl Into<Pattern>, position: Pos) -> Pattern {
    place(node.into(), position, Pattern::set_position)
}

fn d(node: impl Into<Decl>, position: Pos) -> Decl {
    place(node.into(), position, Decl::set_position)
}

impl Rebuild {
    fn expr(&mut self, node: &Expr) -> Expr {
        node.accept(self, ())
    }

    fn boxed(&mut self, node: &Expr) -> Box<Expr> {
        Box::new(self.expr(node))
    }

    fn exprs(&mut self, nodes: &[Expr]) -> Vec<Expr> {
        nodes.iter().map(|n| self.expr(n)).collect()
    }

    fn ty(&mut self, node: &Type) -> Type {
        node.accept(self, ())
    }

    fn types(&mut self, nodes: &[Type]) -> Vec<Type> {
        nodes.iter().map(|n| self.ty(n)).collect()
    }

    fn pattern(&mut self, node: &Pattern) -> Pattern {
        node.accept(self, ())
    }

    fn params(&mut self, params: &[ParamDecl]) -> Vec<ParamDecl> {
        params
            .iter()
            .map(|p| ParamDecl::new(p.name.clone(), self.ty(&p.ty)))
            .collect()
    }

    fn bindings(&mut self, bindings: &[PatternBinding]) -> Vec<PatternBinding> {
        bindings
            .iter()
            .map(|b| PatternBinding::new(self.pattern(&b.pattern), self.expr(&b.expr)))
            .collect()
    }

    fn decl(&mut self, node: &Decl) -> Decl {
        node.accept(self, ())
    }
}

impl<'ast> ExprVisitor<'ast, ()> for Rebuild {
    type Output = Expr;

    fn visit_sequence(&mut self, n: &'ast expr::Sequence, at: Pos, (): ()) -> Expr {
        e(expr::Sequence::new(self.boxed(&n.first), self.boxed(&n.second)), at)
    }

    fn visit_assign(&mut self, n: &'ast expr::Assign, at: Pos, (): ()) -> Expr {
        e(expr::Assign::new(self.boxed(&n.target), self.boxed(&n.value)), at)
    }

    fn visit_if(&mut self, n: &'ast expr::If, at: Pos, (): ()) -> Expr {
        let node = expr::If::new(
            self.boxed(&n.condition),
            self.boxed(&n.then_branch),
            self.boxed(&n.else_branch),
        );
        e(node, at)
    }

    fn visit_let(&mut self, n: &'ast expr::Let, at: Pos, (): ()) -> Expr {
        e(expr::Let::new(self.bindings(&n.bindings), self.boxed(&n.body)), at)
    }

    fn visit_let_rec(&mut self, n: &'ast expr::LetRec, at: Pos, (): ()) -> Expr {
        e(expr::LetRec::new(self.bindings(&n.bindings), self.boxed(&n.body)), at)
    }

    fn visit_type_abstraction(&mut self, n: &'ast expr::TypeAbstraction, at: Pos, (): ()) -> Expr {
        e(expr::TypeAbstraction::new(n.generics.clone(), self.boxed(&n.body)), at)
    }

    fn visit_binary(&mut self, n: &'ast expr::Binary, at: Pos, (): ()) -> Expr {
        e(expr::Binary::new(n.op, self.boxed(&n.left), self.boxed(&n.right)), at)
    }

    fn visit_type_asc(&mut self, n: &'ast expr::TypeAsc, at: Pos, (): ()) -> Expr {
        e(expr::TypeAsc::new(self.boxed(&n.expr), self.ty(&n.ty)), at)
    }

    fn visit_type_cast(&mut self, n: &'ast expr::TypeCast, at: Pos, (): ()) -> Expr {
        e(expr::TypeCast::new(self.boxed(&n.expr), self.ty(&n.ty)), at)
    }

    fn visit_abstraction(&mut self, n: &'ast expr::Abstraction, at: Pos, (): ()) -> Expr {
        e(expr::Abstraction::new(self.params(&n.params), self.boxed(&n.body)), at)
    }

    fn visit_variant(&mut self, n: &'ast expr::Variant, at: Pos, (): ()) -> Expr {
        let data = n.data.as_ref().map(|d| self.boxed(d));
        e(expr::Variant::new(n.label.clone(), data), at)
    }

    fn visit_match(&mut self, n: &'ast expr::Match, at: Pos, (): ()) -> Expr {
        let cases = n
            .cases
            .iter()
            .map(|c| MatchCase::new(self.pattern(&c.pattern), self.expr(&c.body)))
            .collect();
        e(expr::Match::new(self.boxed(&n.scrutinee), cases), at)
    }

    fn visit_list(&mut self, n: &'ast expr::List, at: Pos, (): ()) -> Expr {
        e(expr::List::new(self.exprs(&n.elements)), at)
    }

    fn visit_ref(&mut self, n: &'ast expr::Ref, at: Pos, (): ()) -> Expr {
        e(expr::Ref::new(self.boxed(&n.init)), at)
    }

    fn visit_deref(&mut self, n: &'ast expr::Deref, at: Pos, (): ()) -> Expr {
        e(expr::Deref::new(self.boxed(&n.reference)), at)
    }

    fn visit_application(&mut self, n: &'ast expr::Application, at: Pos, (): ()) -> Expr {
        e(expr::Application::new(self.boxed(&n.function), self.exprs(&n.args)), at)
    }

    fn visit_type_application(&mut self, n: &'ast expr::TypeApplication, at: Pos, (): ()) -> Expr {
        e(
            expr::TypeApplication::new(self.boxed(&n.function), self.types(&n.types)),
            at,
        )
    }

    fn visit_dot_record(&mut self, n: &'ast expr::DotRecord, at: Pos, (): ()) -> Expr {
        e(expr::DotRecord::new(self.boxed(&n.record), n.label.clone()), at)
    }

    fn visit_dot_tuple(&mut self, n: &'ast expr::DotTuple, at: Pos, (): ()) -> Expr {
        e(expr::DotTuple::new(self.boxed(&n.tuple), n.index), at)
    }

    fn visit_tuple(&mut self, n: &'ast expr::Tuple, at: Pos, (): ()) -> Expr {
        e(expr::Tuple::new(self.exprs(&n.elements)), at)
    }

    fn visit_record(&mut self, n: &'ast expr::Record, at: Pos, (): ()) -> Expr {
        let bindings = n
            .bindings
            .iter()
            .map(|b| Binding::new(b.name.clone(), self.expr(&b.expr)))
            .collect();
        e(expr::Record::new(bindings), at)
    }

    fn visit_cons_list(&mut self, n: &'ast expr::ConsList, at: Pos, (): ()) -> Expr {
        e(expr::ConsList::new(self.boxed(&n.head), self.boxed(&n.tail)), at)
    }

    fn visit_head(&mut self, n: &'ast expr::Head, at: Pos, (): ()) -> Expr {
        e(expr::Head::new(self.boxed(&n.list)), at)
    }

    fn visit_is_empty(&mut self, n: &'ast expr::IsEmpty, at: Pos, (): ()) -> Expr {
        e(expr::IsEmpty::new(self.boxed(&n.list)), at)
    }

    fn visit_tail(&mut self, n: &'ast expr::Tail, at: Pos, (): ()) -> Expr {
        e(expr::Tail::new(self.boxed(&n.list)), at)
    }

    fn visit_panic(&mut self, _: &'ast expr::Panic, at: Pos, (): ()) -> Expr {
        e(expr::Panic::new(), at)
    }

    fn visit_throw(&mut self, n: &'ast expr::Throw, at: Pos, (): ()) -> Expr {
        e(expr::Throw::new(self.boxed(&n.expr)), at)
    }

    fn visit_try_catch(&mut self, n: &'ast expr::TryCatch, at: Pos, (): ()) -> Expr {
        let node = expr::TryCatch::new(
            self.boxed(&n.body),
            self.pattern(&n.pattern),
            self.boxed(&n.handler),
        );
        e(node, at)
    }

    fn visit_try_with(&mut self, n: &'ast expr::TryWith, at: Pos, (): ()) -> Expr {
        e(expr::TryWith::new(self.boxed(&n.body), self.boxed(&n.fallback)), at)
    }

    fn visit_try_cast_as(&mut self, n: &'ast expr::TryCastAs, at: Pos, (): ()) -> Expr {
        let node = expr::TryCastAs::new(
            self.boxed(&n.expr),
            self.ty(&n.ty),
            self.pattern(&n.pattern),
            self.boxed(&n.on_success),
            self.boxed(&n.on_failure),
        );
        e(node, at)
    }

    fn visit_inl(&mut self, n: &'ast expr::Inl, at: Pos, (): ()) -> Expr {
        e(expr::Inl::new(self.boxed(&n.expr)), at)
    }

    fn visit_inr(&mut self, n: &'ast expr::Inr, at: Pos, (): ()) -> Expr {
        e(expr::Inr::new(self.boxed(&n.expr)), at)
    }

    fn visit_succ(&mut self, n: &'ast expr::Succ, at: Pos, (): ()) -> Expr {
        e(expr::Succ::new(self.boxed(&n.expr)), at)
    }

    fn visit_logic_not(&mut self, n: &'ast expr::LogicNot, at: Pos, (): ()) -> Expr {
        e(expr::LogicNot::new(self.boxed(&n.expr)), at)
    }

    fn visit_pred(&mut self, n: &'ast expr::Pred, at: Pos, (): ()) -> Expr {
        e(expr::Pred::new(self.boxed(&n.expr)), at)
    }

    fn visit_is_zero(&mut self, n: &'ast expr::IsZero, at: Pos, (): ()) -> Expr {
        e(expr::IsZero::new(self.boxed(&n.expr)), at)
    }

    fn visit_fix(&mut self, n: &'ast expr::Fix, at: Pos, (): ()) -> Expr {
        e(expr::Fix::new(self.boxed(&n.expr)), at)
    }

    fn visit_nat_rec(&mut self, n: &'ast expr::NatRec, at: Pos, (): ()) -> Expr {
        let node = expr::NatRec::new(
            self.boxed(&n.count),
            self.boxed(&n.initial),
            self.boxed(&n.step),
        );
        e(node, at)
    }

    fn visit_fold(&mut self, n: &'ast expr::Fold, at: Pos, (): ()) -> Expr {
        e(expr::Fold::new(self.ty(&n.ty), self.boxed(&n.expr)), at)
    }

    fn visit_unfold(&mut self, n: &'ast expr::Unfold, at: Pos, (): ()) -> Expr {
        e(expr::Unfold::new(self.ty(&n.ty), self.boxed(&n.expr)), at)
    }

    fn visit_const_true(&mut self, _: &'ast expr::ConstTrue, at: Pos, (): ()) -> Expr {
        e(expr::ConstTrue::new(), at)
    }

    fn visit_const_false(&mut self, _: &'ast expr::ConstFalse, at: Pos, (): ()) -> Expr {
        e(expr::ConstFalse::new(), at)
    }

    fn visit_const_unit(&mut self, _: &'ast expr::ConstUnit, at: Pos, (): ()) -> Expr {
        e(expr::ConstUnit::new(), at)
    }

    fn visit_const_int(&mut self, n: &'ast expr::ConstInt, at: Pos, (): ()) -> Expr {
        e(expr::ConstInt::new(n.value), at)
    }

    fn visit_const_memory(&mut self, n: &'ast expr::ConstMemory, at: Pos, (): ()) -> Expr {
        e(expr::ConstMemory::new(n.address), at)
    }

    fn visit_var(&mut self, n: &'ast expr::Var, at: Pos, (): ()) -> Expr {
        e(expr::Var::new(n.name.clone()), at)
    }
}

impl<'ast> TypeVisitor<'ast, ()> for Rebuild {
    type Output = Type;

    fn visit_auto(&mut self, _: &'ast ty::Auto, at: Pos, (): ()) -> Type {
        t(ty::Auto::new(), at)
    }

    fn visit_fun(&mut self, n: &'ast ty::Fun, at: Pos, (): ()) -> Type {
        let params = self.types(&n.params);
        t(ty::Fun::new(params, Box::new(self.ty(&n.ret))), at)
    }

    fn visit_for_all(&mut self, n: &'ast ty::ForAll, at: Pos, (): ()) -> Type {
        t(ty::ForAll::new(n.generics.clone(), Box::new(self.ty(&n.body))), at)
    }

    fn visit_rec(&mut self, n: &'ast ty::Rec, at: Pos, (): ()) -> Type {
        t(ty::Rec::new(n.var.clone(), Box::new(self.ty(&n.body))), at)
    }

    fn visit_sum(&mut self, n: &'ast ty::Sum, at: Pos, (): ()) -> Type {
        let left = Box::new(self.ty(&n.left));
        t(ty::Sum::new(left, Box::new(self.ty(&n.right))), at)
    }

    fn visit_tuple(&mut self, n: &'ast ty::Tuple, at: Pos, (): ()) -> Type {
        t(ty::Tuple::new(self.types(&n.elements)), at)
    }

    fn visit_record(&mut self, n: &'ast ty::Record, at: Pos, (): ()) -> Type {
        let fields = n
            .fields
            .iter()
            .map(|f| RecordFieldType::new(f.label.clone(), self.ty(&f.ty)))
            .collect();
        t(ty::Record::new(fields), at)
    }

    fn visit_variant(&mut self, n: &'ast ty::Variant, at: Pos, (): ()) -> Type {
        let fields = n
            .fields
            .iter()
            .map(|f| VariantFieldType::new(f.label.clone(), f.ty.as_ref().map(|ty| self.ty(ty))))
            .collect();
        t(ty::Variant::new(fields), at)
    }

    fn visit_list(&mut self, n: &'ast ty::List, at: Pos, (): ()) -> Type {
        t(ty::List::new(Box::new(self.ty(&n.element))), at)
    }

    fn visit_bool(&mut self, _: &'ast ty::Bool, at: Pos, (): ()) -> Type {
        t(ty::Bool::new(), at)
    }

    fn visit_nat(&mut self, _: &'ast ty::Nat, at: Pos, (): ()) -> Type {
        t(ty::Nat::new(), at)
    }

    fn visit_unit(&mut self, _: &'ast ty::Unit, at: Pos, (): ()) -> Type {
        t(ty::Unit::new(), at)
    }

    fn visit_top(&mut self, _: &'ast ty::Top, at: Pos, (): ()) -> Type {
        t(ty::Top::new(), at)
    }

    fn visit_bottom(&mut self, _: &'ast ty::Bottom, at: Pos, (): ()) -> Type {
        t(ty::Bottom::new(), at)
    }

    fn visit_ref(&mut self, n: &'ast ty::Ref, at: Pos, (): ()) -> Type {
        t(ty::Ref::new(Box::new(self.ty(&n.referent))), at)
    }

    fn visit_var(&mut self, n: &'ast ty::Var, at: Pos, (): ()) -> Type {
        t(ty::Var::new(n.name.clone()), at)
    }
}

impl<'ast> PatternVisitor<'ast, ()> for Rebuild {
    type Output = Pattern;

    fn visit_cast_as(&mut self, n: &'ast pat::CastAs, at: Pos, (): ()) -> Pattern {
        let inner = Box::new(self.pattern(&n.pattern));
        p(pat::CastAs::new(inner, self.ty(&n.ty)), at)
    }

    fn visit_asc(&mut self, n: &'ast pat::Asc, at: Pos, (): ()) -> Pattern {
        let inner = Box::new(self.pattern(&n.pattern));
        p(pat::Asc::new(inner, self.ty(&n.ty)), at)
    }

    fn visit_variant(&mut self, n: &'ast pat::Variant, at: Pos, (): ()) -> Pattern {
        let data = n.data.as_ref().map(|d| Box::new(self.pattern(d)));
        p(pat::Variant::new(n.label.clone(), data), at)
    }

    fn visit_inl(&mut self, n: &'ast pat::Inl, at: Pos, (): ()) -> Pattern {
        p(pat::Inl::new(Box::new(self.pattern(&n.pattern))), at)
    }

    fn visit_inr(&mut self, n: &'ast pat::Inr, at: Pos, (): ()) -> Pattern {
        p(pat::Inr::new(Box::new(self.pattern(&n.pattern))), at)
    }

    fn visit_tuple(&mut self, n: &'ast pat::Tuple, at: Pos, (): ()) -> Pattern {
        let elements = n.elements.iter().map(|e| self.pattern(e)).collect();
        p(pat::Tuple::new(elements), at)
    }

    fn visit_record(&mut self, n: &'ast pat::Record, at: Pos, (): ()) -> Pattern {
        let fields = n
            .fields
            .iter()
            .map(|f| LabelledPattern::new(f.label.clone(), self.pattern(&f.pattern)))
            .collect();
        p(pat::Record::new(fields), at)
    }

    fn visit_list(&mut self, n: &'ast pat::List, at: Pos, (): ()) -> Pattern {
        let elements = n.elements.iter().map(|e| self.pattern(e)).collect();
        p(pat::List::new(elements), at)
    }

    fn visit_cons(&mut self, n: &'ast pat::Cons, at: Pos, (): ()) -> Pattern {
        let head = Box::new(self.pattern(&n.head));
        p(pat::Cons::new(head, Box::new(self.pattern(&n.tail))), at)
    }

    fn visit_false(&mut self, _: &'ast pat::False, at: Pos, (): ()) -> Pattern {
        p(pat::False::new(), at)
    }

    fn visit_true(&mut self, _: &'ast pat::True, at: Pos, (): ()) -> Pattern {
        p(pat::True::new(), at)
    }

    fn visit_unit(&mut self, _: &'ast pat::Unit, at: Pos, (): ()) -> Pattern {
        p(pat::Unit::new(), at)
    }

    fn visit_int(&mut self, n: &'ast pat::Int, at: Pos, (): ()) -> Pattern {
        p(pat::Int::new(n.value), at)
    }

    fn visit_succ(&mut self, n: &'ast pat::Succ, at: Pos, (): ()) -> Pattern {
        p(pat::Succ::new(Box::new(self.pattern(&n.pattern))), at)
    }

    fn visit_var(&mut self, n: &'ast pat::Var, at: Pos, (): ()) -> Pattern {
        p(pat::Var::new(n.name.clone()), at)
    }
}

impl<'ast> DeclVisitor<'ast, ()> for Rebuild {
    type Output = Decl;

    fn visit_fun(&mut self, n: &'ast decl::Fun, at: Pos, (): ()) -> Decl {
        let node = decl::Fun::new(
            n.annotations.clone(),
            n.name.clone(),
            self.params(&n.params),
            n.return_type.as_ref().map(|r| self.ty(r)),
            self.types(&n.throw_types),
            n.locals.iter().map(|l| self.decl(l)).collect(),
            self.boxed(&n.body),
        );
        d(node, at)
    }

    fn visit_fun_generic(&mut self, n: &'ast decl::FunGeneric, at: Pos, (): ()) -> Decl {
        let node = decl::FunGeneric::new(
            n.annotations.clone(),
            n.name.clone(),
            n.generics.clone(),
            self.params(&n.params),
            n.return_type.as_ref().map(|r| self.ty(r)),
            self.types(&n.throw_types),
            n.locals.iter().map(|l| self.decl(l)).collect(),
            self.boxed(&n.body),
        );
        d(node, at)
    }

    fn visit_type_alias(&mut self, n: &'ast decl::TypeAlias, at: Pos, (): ()) -> Decl {
        d(decl::TypeAlias::new(n.name.clone(), self.ty(&n.ty)), at)
    }

    fn visit_exception_type(&mut self, n: &'ast decl::ExceptionType, at: Pos, (): ()) -> Decl {
        d(decl::ExceptionType::new(self.ty(&n.ty)), at)
    }

    fn visit_exception_variant(
        &mut self,
        n: &'ast decl::ExceptionVariant,
        at: Pos,
        (): (),
    ) -> Decl {
        d(decl::ExceptionVariant::new(n.label.clone(), self.ty(&n.ty)), at)
    }
}

impl<'ast> ProgramVisitor<'ast, ()> for Rebuild {
    type Output = Program;

    fn visit_module(&mut self, n: &'ast program::Module, at: Pos, (): ()) -> Program {
        let decls = n.decls.iter().map(|x| self.decl(x)).collect();
        let module = program::Module::new(n.language, n.extensions.clone(), decls);
        let mut rebuilt = Program::from(module);
        if let Some(position) = at {
            rebuilt.set_position(position);
        }
        rebuilt
    }
}

/// A program touching every expression, type and pattern variant.
fn kitchen_sink() -> Program {
    let at = |line| Position::new(line, 1, line * 10);
    let mut exprs: Vec<Expr> = vec![
        seq(assign(var("r"), int(1)), deref(var("r"))),
        if_(boolean(true), boolean(false), unit()),
        let_(vec![(p_var("x"), int(1))], var("x")),
        let_rec(vec![(p_var("f"), var("g"))], var("f")),
        type_abs(["X"], abs(vec![param("x", ty_var("X"))], var("x"))),
        binary(BinaryOp::LessThanOrEqual, int(1), int(2)),
        ascribe(int(1), nat()),
        cast(int(1), top()),
        variant("some", Some(int(1))),
        variant("none", None),
        match_(
            var("v"),
            vec![
                (p_variant("some", Some(p_var("n"))), var("n")),
                (p_variant("none", None), int(0)),
            ],
        ),
        list(vec![int(1), int(2)]),
        new_ref(memory(0x10)),
        app(var("f"), vec![int(1)]),
        type_app(var("id"), vec![nat()]),
        dot_record(record(vec![("a", int(1))]), "a"),
        dot_tuple(tuple(vec![int(1), int(2)]), 2),
        cons(int(1), list(vec![])),
        head(var("l")),
        is_empty(var("l")),
        tail(var("l")),
        panic(),
        throw(int(5)),
        try_catch(var("e"), p_asc(p_var("x"), nat()), var("x")),
        try_with(var("e"), int(0)),
        expr::TryCastAs::new(
            Box::new(var("e")),
            nat(),
            p_var("n"),
            Box::new(var("n")),
            Box::new(int(0)),
        )
        .into(),
        inl(int(1)),
        inr(boolean(false)),
        succ(int(1)),
        not(boolean(true)),
        pred(int(1)),
        is_zero(int(0)),
        fix(var("f")),
        nat_rec(int(3), int(0), var("step")),
        expr::Fold::new(ty::Rec::new("X".into(), Box::new(nat())).into(), Box::new(int(1))).into(),
        expr::Unfold::new(ty_var("L"), Box::new(var("l"))).into(),
    ];
    for (line, expr) in exprs.iter_mut().enumerate() {
        expr.set_position(at(line + 1));
    }

    let patterns = vec![
        p_cast(p_var("x"), nat()),
        p_inl(p_unit()),
        p_inr(p_bool(false)),
        p_tuple(vec![p_bool(true), p_int(3)]),
        p_record(vec![("a", p_var("a"))]),
        p_list(vec![p_var("x")]),
        p_cons(p_var("h"), p_var("t")),
        p_succ(p_var("m")),
    ];
    let cases = patterns.into_iter().map(|pat| (pat, unit())).collect();

    let types = vec![
        auto(),
        fun(vec![nat()], bool_ty()),
        for_all(["X"], ty_var("X")),
        sum(unit_ty(), bottom()),
        tuple_ty(vec![nat(), top()]),
        record_ty(vec![("a", nat())]),
        variant_ty(vec![("a", Some(nat())), ("b", None)]),
        list_ty(ref_ty(nat())),
    ];

    program_with(
        ["#everything"],
        vec![
            exception_type(nat()),
            exception_variant("oops", unit_ty()),
            type_alias("Types", tuple_ty(types)),
            generic_fun_decl(
                "id",
                ["X"],
                vec![param("x", ty_var("X"))],
                ty_var("X"),
                var("x"),
            ),
            inline_fun_decl("main", vec![param("n", nat())], unit_ty(), tuple(exprs))
                .at(Position::new(100, 1, 1000)),
            fun_decl("cases", vec![], unit_ty(), match_(var("n"), cases)),
        ],
    )
}

#[test]
fn test_rebuild_reconstructs_equal_program() {
    let original = kitchen_sink();
    let rebuilt = original.accept(&mut Rebuild, ());
    assert_eq!(original, rebuilt);
    assert_eq!(original.to_string(), rebuilt.to_string());
}

#[test]
fn test_rebuild_forwards_positions() {
    let original = kitchen_sink();
    let rebuilt = original.accept(&mut Rebuild, ());

    let main = &rebuilt.decls()[4];
    assert_eq!(main.position(), Some(Position::new(100, 1, 1000)));

    let decl::DeclKind::Fun(fun) = main.kind() else {
        panic!("main should be a function");
    };
    let expr::ExprKind::Tuple(items) = fun.body.kind() else {
        panic!("main should return a tuple");
    };
    for (i, item) in items.elements.iter().enumerate() {
        assert_eq!(item.position(), Some(Position::new(i + 1, 1, (i + 1) * 10)));
    }
}

#[test]
fn test_dispatch_picks_method_by_variant() {
    struct Which;

    macro_rules! tag_by_variant {
        ($lt:lifetime; $($method:ident($node:ident) => $name:literal,)*) => {
            $(
                fn $method(&mut self, _: &$lt expr::$node, _: Pos, tag: &'static str) -> String {
                    format!("{tag}:{}", $name)
                }
            )*
        };
    }

    impl<'ast> ExprVisitor<'ast, &'static str> for Which {
        type Output = String;

        fn visit_const_int(
            &mut self,
            n: &'ast expr::ConstInt,
            _: Pos,
            tag: &'static str,
        ) -> String {
            format!("{tag}:int({})", n.value)
        }

        tag_by_variant! {
            'ast;
            visit_sequence(Sequence) => "sequence",
            visit_assign(Assign) => "assign",
            visit_if(If) => "if",
            visit_let(Let) => "let",
            visit_let_rec(LetRec) => "letrec",
            visit_type_abstraction(TypeAbstraction) => "generic",
            visit_binary(Binary) => "binary",
            visit_type_asc(TypeAsc) => "asc",
            visit_type_cast(TypeCast) => "cast",
            visit_abstraction(Abstraction) => "fn",
            visit_variant(Variant) => "variant",
            visit_match(Match) => "match",
            visit_list(List) => "list",
            visit_ref(Ref) => "ref",
            visit_deref(Deref) => "deref",
            visit_application(Application) => "app",
            visit_type_application(TypeApplication) => "tyapp",
            visit_dot_record(DotRecord) => "dotrecord",
            visit_dot_tuple(DotTuple) => "dottuple",
            visit_tuple(Tuple) => "tuple",
            visit_record(Record) => "record",
            visit_cons_list(ConsList) => "cons",
            visit_head(Head) => "head",
            visit_is_empty(IsEmpty) => "isempty",
            visit_tail(Tail) => "tail",
            visit_panic(Panic) => "panic",
            visit_throw(Throw) => "throw",
            visit_try_catch(TryCatch) => "trycatch",
            visit_try_with(TryWith) => "trywith",
            visit_try_cast_as(TryCastAs) => "trycast",
            visit_inl(Inl) => "inl",
            visit_inr(Inr) => "inr",
            visit_succ(Succ) => "succ",
            visit_logic_not(LogicNot) => "not",
            visit_pred(Pred) => "pred",
            visit_is_zero(IsZero) => "iszero",
            visit_fix(Fix) => "fix",
            visit_nat_rec(NatRec) => "natrec",
            visit_fold(Fold) => "fold",
            visit_unfold(Unfold) => "unfold",
            visit_const_true(ConstTrue) => "true",
            visit_const_false(ConstFalse) => "false",
            visit_const_unit(ConstUnit) => "unit",
            visit_const_memory(ConstMemory) => "memory",
            visit_var(Var) => "var",
        }
    }

    assert_eq!(throw(int(5)).accept(&mut Which, "a"), "a:throw");
    assert_eq!(cast(int(5), nat()).accept(&mut Which, "b"), "b:cast");
    assert_eq!(int(5).accept(&mut Which, "c"), "c:int(5)");
}

#[test]
fn test_post_order_literal_throw_cast() {
    let tree = cast(throw(int(5)), nat());
    let order: Vec<_> = post_order_expr(&tree)
        .into_iter()
        .filter_map(NodeRef::as_expr)
        .map(Expr::variant_name)
        .collect();
    assert_eq!(order, ["ConstInt", "Throw", "TypeCast"]);
}
