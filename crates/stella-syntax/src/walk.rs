//! Post-order traversal over every node family.
//!
//! [`PostOrder`] implements all five visitor traits. Each visitor method only
//! descends into the node's children; the callback fires for a node once
//! all of its children have been reported. Children are visited in field
//! order.
//!
//! # Examples
//!
//! ```
//! use stella_syntax::build::{cast, int, nat, throw};
//! use stella_syntax::walk::{post_order_expr, NodeRef};
//!
//! let tree = cast(throw(int(5)), nat());
//! let names: Vec<_> = post_order_expr(&tree)
//!     .into_iter()
//!     .map(NodeRef::variant_name)
//!     .collect();
//!
//! assert_eq!(names, ["ConstInt", "Throw", "Nat", "TypeCast"]);
//! ```

use crate::ast::decl::{self, Decl, DeclVisitor};
use crate::ast::expr::{self, Expr, ExprVisitor, ParamDecl};
use crate::ast::pat::{self, Pattern, PatternVisitor};
use crate::ast::program::{self, Program, ProgramVisitor};
use crate::ast::ty::{self, Type, TypeVisitor};
use crate::span::{Located, Position};

/// A borrowed node of any family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef<'ast> {
    /// An expression
    Expr(&'ast Expr),
    /// A type expression
    Type(&'ast Type),
    /// A pattern
    Pattern(&'ast Pattern),
    /// A declaration
    Decl(&'ast Decl),
    /// A program
    Program(&'ast Program),
}

impl<'ast> NodeRef<'ast> {
    /// Name of the referenced node's variant.
    #[must_use]
    pub fn variant_name(self) -> &'static str {
        match self {
            NodeRef::Expr(node) => node.variant_name(),
            NodeRef::Type(node) => node.variant_name(),
            NodeRef::Pattern(node) => node.variant_name(),
            NodeRef::Decl(node) => node.variant_name(),
            NodeRef::Program(node) => node.variant_name(),
        }
    }

    /// The referenced expression, if this is one.
    #[must_use]
    pub fn as_expr(self) -> Option<&'ast Expr> {
        match self {
            NodeRef::Expr(node) => Some(node),
            _ => None,
        }
    }
}

impl Located for NodeRef<'_> {
    fn position(&self) -> Option<Position> {
        match self {
            NodeRef::Expr(node) => node.position(),
            NodeRef::Type(node) => node.position(),
            NodeRef::Pattern(node) => node.position(),
            NodeRef::Decl(node) => node.position(),
            NodeRef::Program(node) => node.position(),
        }
    }
}

/// Post-order walker that reports each node to a callback.
pub struct PostOrder<F> {
    callback: F,
}

impl<'ast, F> PostOrder<F>
where
    F: FnMut(NodeRef<'ast>),
{
    /// Creates a walker around `callback`.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }

    /// Walks an expression and everything below it.
    pub fn expr(&mut self, node: &'ast Expr) {
        node.accept(self, ());
        (self.callback)(NodeRef::Expr(node));
    }

    /// Walks a type expression.
    pub fn ty(&mut self, node: &'ast Type) {
        node.accept(self, ());
        (self.callback)(NodeRef::Type(node));
    }

    /// Walks a pattern.
    pub fn pattern(&mut self, node: &'ast Pattern) {
        node.accept(self, ());
        (self.callback)(NodeRef::Pattern(node));
    }

    /// Walks a declaration.
    pub fn decl(&mut self, node: &'ast Decl) {
        node.accept(self, ());
        (self.callback)(NodeRef::Decl(node));
    }

    /// Walks a whole program.
    pub fn program(&mut self, node: &'ast Program) {
        node.accept(self, ());
        (self.callback)(NodeRef::Program(node));
    }

    fn exprs(&mut self, nodes: &'ast [Expr]) {
        for node in nodes {
            self.expr(node);
        }
    }

    fn types(&mut self, nodes: &'ast [Type]) {
        for node in nodes {
            self.ty(node);
        }
    }

    fn patterns(&mut self, nodes: &'ast [Pattern]) {
        for node in nodes {
            self.pattern(node);
        }
    }

    fn params(&mut self, params: &'ast [ParamDecl]) {
        for param in params {
            self.ty(&param.ty);
        }
    }

    fn bindings(&mut self, bindings: &'ast [expr::PatternBinding]) {
        for binding in bindings {
            self.pattern(&binding.pattern);
            self.expr(&binding.expr);
        }
    }
}

/// Collects every node below and including `root`, children first.
#[must_use]
pub fn post_order_expr(root: &Expr) -> Vec<NodeRef<'_>> {
    let mut nodes = Vec::new();
    PostOrder::new(|node| nodes.push(node)).expr(root);
    nodes
}

/// Collects every node of `program`, children first.
#[must_use]
pub fn post_order_program(program: &Program) -> Vec<NodeRef<'_>> {
    let mut nodes = Vec::new();
    PostOrder::new(|node| nodes.push(node)).program(program);
    nodes
}

type Pos = Option<Position>;

impl<'ast, F> ExprVisitor<'ast, ()> for PostOrder<F>
where
    F: FnMut(NodeRef<'ast>),
{
    type Output = ();

    fn visit_sequence(&mut self, node: &'ast expr::Sequence, _: Pos, (): ()) {
        self.expr(&node.first);
        self.expr(&node.second);
    }

    fn visit_assign(&mut self, node: &'ast expr::Assign, _: Pos, (): ()) {
        self.expr(&node.target);
        self.expr(&node.value);
    }

    fn visit_if(&mut self, node: &'ast expr::If, _: Pos, (): ()) {
        self.expr(&node.condition);
        self.expr(&node.then_branch);
        self.expr(&node.else_branch);
    }

    fn visit_let(&mut self, node: &'ast expr::Let, _: Pos, (): ()) {
        self.bindings(&node.bindings);
        self.expr(&node.body);
    }

    fn visit_let_rec(&mut self, node: &'ast expr::LetRec, _: Pos, (): ()) {
        self.bindings(&node.bindings);
        self.expr(&node.body);
    }

    fn visit_type_abstraction(&mut self, node: &'ast expr::TypeAbstraction, _: Pos, (): ()) {
        self.expr(&node.body);
    }

    fn visit_binary(&mut self, node: &'ast expr::Binary, _: Pos, (): ()) {
        self.expr(&node.left);
        self.expr(&node.right);
    }

    fn visit_type_asc(&mut self, node: &'ast expr::TypeAsc, _: Pos, (): ()) {
        self.expr(&node.expr);
        self.ty(&node.ty);
    }

    fn visit_type_cast(&mut self, node: &'ast expr::TypeCast, _: Pos, (): ()) {
        self.expr(&node.expr);
        self.ty(&node.ty);
    }

    fn visit_abstraction(&mut self, node: &'ast expr::Abstraction, _: Pos, (): ()) {
        self.params(&node.params);
        self.expr(&node.body);
    }

    fn visit_variant(&mut self, node: &'ast expr::Variant, _: Pos, (): ()) {
        if let Some(data) = &node.data {
            self.expr(data);
        }
    }

    fn visit_match(&mut self, node: &'ast expr::Match, _: Pos, (): ()) {
        self.expr(&node.scrutinee);
        for case in &node.cases {
            self.pattern(&case.pattern);
            self.expr(&case.body);
        }
    }

    fn visit_list(&mut self, node: &'ast expr::List, _: Pos, (): ()) {
        self.exprs(&node.elements);
    }

    fn visit_ref(&mut self, node: &'ast expr::Ref, _: Pos, (): ()) {
        self.expr(&node.init);
    }

    fn visit_deref(&mut self, node: &'ast expr::Deref, _: Pos, (): ()) {
        self.expr(&node.reference);
    }

    fn visit_application(&mut self, node: &'ast expr::Application, _: Pos, (): ()) {
        self.expr(&node.function);
        self.exprs(&node.args);
    }

    fn visit_type_application(&mut self, node: &'ast expr::TypeApplication, _: Pos, (): ()) {
        self.expr(&node.function);
        self.types(&node.types);
    }

    fn visit_dot_record(&mut self, node: &'ast expr::DotRecord, _: Pos, (): ()) {
        self.expr(&node.record);
    }

    fn visit_dot_tuple(&mut self, node: &'ast expr::DotTuple, _: Pos, (): ()) {
        self.expr(&node.tuple);
    }

    fn visit_tuple(&mut self, node: &'ast expr::Tuple, _: Pos, (): ()) {
        self.exprs(&node.elements);
    }

    fn visit_record(&mut self, node: &'ast expr::Record, _: Pos, (): ()) {
        for binding in &node.bindings {
            self.expr(&binding.expr);
        }
    }

    fn visit_cons_list(&mut self, node: &'ast expr::ConsList, _: Pos, (): ()) {
        self.expr(&node.head);
        self.expr(&node.tail);
    }

    fn visit_head(&mut self, node: &'ast expr::Head, _: Pos, (): ()) {
        self.expr(&node.list);
    }

    fn visit_is_empty(&mut self, node: &'ast expr::IsEmpty, _: Pos, (): ()) {
        self.expr(&node.list);
    }

    fn visit_tail(&mut self, node: &'ast expr::Tail, _: Pos, (): ()) {
        self.expr(&node.list);
    }

    fn visit_panic(&mut self, _: &'ast expr::Panic, _: Pos, (): ()) {}

    fn visit_throw(&mut self, node: &'ast expr::Throw, _: Pos, (): ()) {
        self.expr(&node.expr);
    }

    fn visit_try_catch(&mut self, node: &'ast expr::TryCatch, _: Pos, (): ()) {
        self.expr(&node.body);
        self.pattern(&node.pattern);
        self.expr(&node.handler);
    }

    fn visit_try_with(&mut self, node: &'ast expr::TryWith, _: Pos, (): ()) {
        self.expr(&node.body);
        self.expr(&node.fallback);
    }

    fn visit_try_cast_as(&mut self, node: &'ast expr::TryCastAs, _: Pos, (): ()) {
        self.expr(&node.expr);
        self.ty(&node.ty);
        self.pattern(&node.pattern);
        self.expr(&node.on_success);
        self.expr(&node.on_failure);
    }

    fn visit_inl(&mut self, node: &'ast expr::Inl, _: Pos, (): ()) {
        self.expr(&node.expr);
    }

    fn visit_inr(&mut self, node: &'ast expr::Inr, _: Pos, (): ()) {
        self.expr(&node.expr);
    }

    fn visit_succ(&mut self, node: &'ast expr::Succ, _: Pos, (): ()) {
        self.expr(&node.expr);
    }

    fn visit_logic_not(&mut self, node: &'ast expr::LogicNot, _: Pos, (): ()) {
        self.expr(&node.expr);
    }

    fn visit_pred(&mut self, node: &'ast expr::Pred, _: Pos, (): ()) {
        self.expr(&node.expr);
    }

    fn visit_is_zero(&mut self, node: &'ast expr::IsZero, _: Pos, (): ()) {
        self.expr(&node.expr);
    }

    fn visit_fix(&mut self, node: &'ast expr::Fix, _: Pos, (): ()) {
        self.expr(&node.expr);
    }

    fn visit_nat_rec(&mut self, node: &'ast expr::NatRec, _: Pos, (): ()) {
        self.expr(&node.count);
        self.expr(&node.initial);
        self.expr(&node.step);
    }

    fn visit_fold(&mut self, node: &'ast expr::Fold, _: Pos, (): ()) {
        self.ty(&node.ty);
        self.expr(&node.expr);
    }

    fn visit_unfold(&mut self, node: &'ast expr::Unfold, _: Pos, (): ()) {
        self.ty(&node.ty);
        self.expr(&node.expr);
    }

    fn visit_const_true(&mut self, _: &'ast expr::ConstTrue, _: Pos, (): ()) {}

    fn visit_const_false(&mut self, _: &'ast expr::ConstFalse, _: Pos, (): ()) {}

    fn visit_const_unit(&mut self, _: &'ast expr::ConstUnit, _: Pos, (): ()) {}

    fn visit_const_int(&mut self, _: &'ast expr::ConstInt, _: Pos, (): ()) {}

    fn visit_const_memory(&mut self, _: &'ast expr::ConstMemory, _: Pos, (): ()) {}

    fn visit_var(&mut self, _: &'ast expr::Var, _: Pos, (): ()) {}
}

impl<'ast, F> TypeVisitor<'ast, ()> for PostOrder<F>
where
    F: FnMut(NodeRef<'ast>),
{
    type Output = ();

    fn visit_auto(&mut self, _: &'ast ty::Auto, _: Pos, (): ()) {}

    fn visit_fun(&mut self, node: &'ast ty::Fun, _: Pos, (): ()) {
        self.types(&node.params);
        self.ty(&node.ret);
    }

    fn visit_for_all(&mut self, node: &'ast ty::ForAll, _: Pos, (): ()) {
        self.ty(&node.body);
    }

    fn visit_rec(&mut self, node: &'ast ty::Rec, _: Pos, (): ()) {
        self.ty(&node.body);
    }

    fn visit_sum(&mut self, node: &'ast ty::Sum, _: Pos, (): ()) {
        self.ty(&node.left);
        self.ty(&node.right);
    }

    fn visit_tuple(&mut self, node: &'ast ty::Tuple, _: Pos, (): ()) {
        self.types(&node.elements);
    }

    fn visit_record(&mut self, node: &'ast ty::Record, _: Pos, (): ()) {
        for field in &node.fields {
            self.ty(&field.ty);
        }
    }

    fn visit_variant(&mut self, node: &'ast ty::Variant, _: Pos, (): ()) {
        for field in &node.fields {
            if let Some(ty) = &field.ty {
                self.ty(ty);
            }
        }
    }

    fn visit_list(&mut self, node: &'ast ty::List, _: Pos, (): ()) {
        self.ty(&node.element);
    }

    fn visit_bool(&mut self, _: &'ast ty::Bool, _: Pos, (): ()) {}

    fn visit_nat(&mut self, _: &'ast ty::Nat, _: Pos, (): ()) {}

    fn visit_unit(&mut self, _: &'ast ty::Unit, _: Pos, (): ()) {}

    fn visit_top(&mut self, _: &'ast ty::Top, _: Pos, (): ()) {}

    fn visit_bottom(&mut self, _: &'ast ty::Bottom, _: Pos, (): ()) {}

    fn visit_ref(&mut self, node: &'ast ty::Ref, _: Pos, (): ()) {
        self.ty(&node.referent);
    }

    fn visit_var(&mut self, _: &'ast ty::Var, _: Pos, (): ()) {}
}

impl<'ast, F> PatternVisitor<'ast, ()> for PostOrder<F>
where
    F: FnMut(NodeRef<'ast>),
{
    type Output = ();

    fn visit_cast_as(&mut self, node: &'ast pat::CastAs, _: Pos, (): ()) {
        self.pattern(&node.pattern);
        self.ty(&node.ty);
    }

    fn visit_asc(&mut self, node: &'ast pat::Asc, _: Pos, (): ()) {
        self.pattern(&node.pattern);
        self.ty(&node.ty);
    }

    fn visit_variant(&mut self, node: &'ast pat::Variant, _: Pos, (): ()) {
        if let Some(data) = &node.data {
            self.pattern(data);
        }
    }

    fn visit_inl(&mut self, node: &'ast pat::Inl, _: Pos, (): ()) {
        self.pattern(&node.pattern);
    }

    fn visit_inr(&mut self, node: &'ast pat::Inr, _: Pos, (): ()) {
        self.pattern(&node.pattern);
    }

    fn visit_tuple(&mut self, node: &'ast pat::Tuple, _: Pos, (): ()) {
        self.patterns(&node.elements);
    }

    fn visit_record(&mut self, node: &'ast pat::Record, _: Pos, (): ()) {
        for field in &node.fields {
            self.pattern(&field.pattern);
        }
    }

    fn visit_list(&mut self, node: &'ast pat::List, _: Pos, (): ()) {
        self.patterns(&node.elements);
    }

    fn visit_cons(&mut self, node: &'ast pat::Cons, _: Pos, (): ()) {
        self.pattern(&node.head);
        self.pattern(&node.tail);
    }

    fn visit_false(&mut self, _: &'ast pat::False, _: Pos, (): ()) {}

    fn visit_true(&mut self, _: &'ast pat::True, _: Pos, (): ()) {}

    fn visit_unit(&mut self, _: &'ast pat::Unit, _: Pos, (): ()) {}

    fn visit_int(&mut self, _: &'ast pat::Int, _: Pos, (): ()) {}

    fn visit_succ(&mut self, node: &'ast pat::Succ, _: Pos, (): ()) {
        self.pattern(&node.pattern);
    }

    fn visit_var(&mut self, _: &'ast pat::Var, _: Pos, (): ()) {}
}

impl<'ast, F> DeclVisitor<'ast, ()> for PostOrder<F>
where
    F: FnMut(NodeRef<'ast>),
{
    type Output = ();

    fn visit_fun(&mut self, node: &'ast decl::Fun, _: Pos, (): ()) {
        self.params(&node.params);
        if let Some(ret) = &node.return_type {
            self.ty(ret);
        }
        self.types(&node.throw_types);
        for local in &node.locals {
            self.decl(local);
        }
        self.expr(&node.body);
    }

    fn visit_fun_generic(&mut self, node: &'ast decl::FunGeneric, _: Pos, (): ()) {
        self.params(&node.params);
        if let Some(ret) = &node.return_type {
            self.ty(ret);
        }
        self.types(&node.throw_types);
        for local in &node.locals {
            self.decl(local);
        }
        self.expr(&node.body);
    }

    fn visit_type_alias(&mut self, node: &'ast decl::TypeAlias, _: Pos, (): ()) {
        self.ty(&node.ty);
    }

    fn visit_exception_type(&mut self, node: &'ast decl::ExceptionType, _: Pos, (): ()) {
        self.ty(&node.ty);
    }

    fn visit_exception_variant(&mut self, node: &'ast decl::ExceptionVariant, _: Pos, (): ()) {
        self.ty(&node.ty);
    }
}

impl<'ast, F> ProgramVisitor<'ast, ()> for PostOrder<F>
where
    F: FnMut(NodeRef<'ast>),
{
    type Output = ();

    fn visit_module(&mut self, node: &'ast program::Module, _: Pos, (): ()) {
        for decl in &node.decls {
            self.decl(decl);
        }
    }
}
