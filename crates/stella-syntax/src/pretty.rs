//! Pretty-printer for the Stella AST.
//!
//! Converts nodes back to Stella concrete syntax, for:
//! - Debugging and log output
//! - Diagnostics that quote a sub-expression
//! - Test assertions that read like source
//!
//! The printer is itself an operation over every node family. For
//! expressions and types the auxiliary argument is the precedence of the
//! enclosing context; a node whose own precedence is lower gets
//! parenthesised.
//!
//! # Examples
//!
//! ```
//! use stella_syntax::build::{binary, cast, int, nat, var};
//! use stella_syntax::ast::expr::BinaryOp;
//!
//! let sum = binary(BinaryOp::Add, var("x"), int(1));
//! let product = binary(BinaryOp::Multiply, sum, int(2));
//! assert_eq!(product.to_string(), "(x + 1) * 2");
//!
//! assert_eq!(cast(var("x"), nat()).to_string(), "x cast as Nat");
//! ```

use crate::ast::decl::{self, Decl, DeclVisitor};
use crate::ast::expr::{self, Expr, ExprVisitor, ParamDecl, PatternBinding};
use crate::ast::pat::{self, Pattern, PatternVisitor};
use crate::ast::program::{self, Program, ProgramVisitor};
use crate::ast::ty::{self, Type, TypeVisitor};
use crate::span::Position;
use std::fmt;

type Pos = Option<Position>;

/// Precedence levels for expressions, loosest first.
pub mod prec {
    /// Sequences, `let`, `if`, assignment
    pub const TOP: u8 = 0;
    /// Comparisons, ascriptions and casts
    pub const COMPARE: u8 = 1;
    /// `+`, `-`, `or`
    pub const ADD: u8 = 2;
    /// `*`, `/`, `and`, `fold`/`unfold`
    pub const MUL: u8 = 3;
    /// Application, projection, prefix `*` and atoms
    pub const POSTFIX: u8 = 4;

    /// Function, universal and recursive types
    pub const TYPE_TOP: u8 = 0;
    /// Sum types
    pub const TYPE_SUM: u8 = 1;
    /// Everything else
    pub const TYPE_ATOM: u8 = 2;
}

/// Configuration for pretty-printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyConfig {
    /// Indentation string (e.g., "  " or "\t")
    pub indent: String,
    /// Line width beyond which `match` cases go on separate lines
    pub width: usize,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            width: 80,
        }
    }
}

/// Pretty-printer for the Stella AST.
#[derive(Debug, Clone, Default)]
pub struct PrettyPrinter {
    /// Configuration
    config: PrettyConfig,
    /// Current indentation level
    indent_level: usize,
}

impl PrettyPrinter {
    /// Creates a printer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: PrettyConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the current indentation string.
    fn current_indent(&self) -> String {
        self.config.indent.repeat(self.indent_level)
    }

    /// Pretty-prints an expression.
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        expr.accept(self, prec::TOP)
    }

    /// Pretty-prints a type expression.
    pub fn print_type(&mut self, ty: &Type) -> String {
        ty.accept(self, prec::TYPE_TOP)
    }

    /// Pretty-prints a pattern.
    pub fn print_pattern(&mut self, pattern: &Pattern) -> String {
        pattern.accept(self, ())
    }

    /// Pretty-prints a declaration, indented to the current level.
    pub fn print_decl(&mut self, decl: &Decl) -> String {
        decl.accept(self, ())
    }

    /// Pretty-prints a whole program.
    pub fn print_program(&mut self, program: &Program) -> String {
        program.accept(self, ())
    }

    fn expr_at(&mut self, expr: &Expr, ctx: u8) -> String {
        expr.accept(self, ctx)
    }

    fn type_at(&mut self, ty: &Type, ctx: u8) -> String {
        ty.accept(self, ctx)
    }

    fn exprs(&mut self, exprs: &[Expr]) -> String {
        join(exprs.iter().map(|e| self.expr_at(e, prec::TOP)))
    }

    fn types(&mut self, types: &[Type]) -> String {
        join(types.iter().map(|t| self.type_at(t, prec::TYPE_TOP)))
    }

    fn patterns(&mut self, patterns: &[Pattern]) -> String {
        join(patterns.iter().map(|p| self.print_pattern(p)))
    }

    fn params(&mut self, params: &[ParamDecl]) -> String {
        join(
            params
                .iter()
                .map(|p| format!("{} : {}", p.name, self.print_type(&p.ty))),
        )
    }

    fn bindings(&mut self, bindings: &[PatternBinding]) -> String {
        join(bindings.iter().map(|b| {
            let pattern = self.print_pattern(&b.pattern);
            let value = self.print_expr(&b.expr);
            format!("{pattern} = {value}")
        }))
    }

    /// `prefix(e)` with the operand at top level.
    fn call(&mut self, name: &str, operand: &Expr) -> String {
        format!("{name}({})", self.expr_at(operand, prec::TOP))
    }

    fn function_header(
        &mut self,
        annotations: &[decl::Annotation],
        name: &str,
        generics: Option<&[String]>,
        params: &[ParamDecl],
        return_type: Option<&Type>,
        throw_types: &[Type],
    ) -> String {
        let mut out = String::new();
        for annotation in annotations {
            out.push_str(&format!("{annotation} "));
        }
        match generics {
            Some(generics) => {
                out.push_str(&format!("generic fn {name}[{}]", generics.join(", ")));
            }
            None => out.push_str(&format!("fn {name}")),
        }
        out.push_str(&format!("({})", self.params(params)));
        if let Some(ret) = return_type {
            out.push_str(&format!(" -> {}", self.print_type(ret)));
        }
        if !throw_types.is_empty() {
            out.push_str(&format!(" throws {}", self.types(throw_types)));
        }
        out
    }

    fn function_body(&mut self, header: String, locals: &[Decl], body: &Expr) -> String {
        let outer = self.current_indent();
        self.indent_level += 1;
        let inner = self.current_indent();

        let mut out = format!("{outer}{header} {{\n");
        for local in locals {
            out.push_str(&self.print_decl(local));
            out.push('\n');
        }
        out.push_str(&format!("{inner}return {}\n", self.print_expr(body)));

        self.indent_level -= 1;
        out.push_str(&outer);
        out.push('}');
        out
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

fn wrap(own: u8, ctx: u8, text: String) -> String {
    if own < ctx { format!("({text})") } else { text }
}

impl<'ast> ExprVisitor<'ast, u8> for PrettyPrinter {
    type Output = String;

    fn visit_sequence(&mut self, node: &'ast expr::Sequence, _: Pos, ctx: u8) -> String {
        let first = self.expr_at(&node.first, prec::COMPARE);
        let second = self.expr_at(&node.second, prec::TOP);
        wrap(prec::TOP, ctx, format!("{first}; {second}"))
    }

    fn visit_assign(&mut self, node: &'ast expr::Assign, _: Pos, ctx: u8) -> String {
        let target = self.expr_at(&node.target, prec::COMPARE);
        let value = self.expr_at(&node.value, prec::COMPARE);
        wrap(prec::TOP, ctx, format!("{target} := {value}"))
    }

    fn visit_if(&mut self, node: &'ast expr::If, _: Pos, ctx: u8) -> String {
        let condition = self.print_expr(&node.condition);
        let then_branch = self.print_expr(&node.then_branch);
        let else_branch = self.print_expr(&node.else_branch);
        wrap(
            prec::TOP,
            ctx,
            format!("if {condition} then {then_branch} else {else_branch}"),
        )
    }

    fn visit_let(&mut self, node: &'ast expr::Let, _: Pos, ctx: u8) -> String {
        let bindings = self.bindings(&node.bindings);
        let body = self.print_expr(&node.body);
        wrap(prec::TOP, ctx, format!("let {bindings} in {body}"))
    }

    fn visit_let_rec(&mut self, node: &'ast expr::LetRec, _: Pos, ctx: u8) -> String {
        let bindings = self.bindings(&node.bindings);
        let body = self.print_expr(&node.body);
        wrap(prec::TOP, ctx, format!("letrec {bindings} in {body}"))
    }

    fn visit_type_abstraction(
        &mut self,
        node: &'ast expr::TypeAbstraction,
        _: Pos,
        ctx: u8,
    ) -> String {
        let body = self.print_expr(&node.body);
        wrap(
            prec::TOP,
            ctx,
            format!("generic [{}] {body}", node.generics.join(", ")),
        )
    }

    fn visit_binary(&mut self, node: &'ast expr::Binary, _: Pos, ctx: u8) -> String {
        let own = node.op.precedence();
        let left = self.expr_at(&node.left, own);
        let right = self.expr_at(&node.right, own + 1);
        wrap(own, ctx, format!("{left} {} {right}", node.op))
    }

    fn visit_type_asc(&mut self, node: &'ast expr::TypeAsc, _: Pos, ctx: u8) -> String {
        let value = self.expr_at(&node.expr, prec::ADD);
        let ty = self.print_type(&node.ty);
        wrap(prec::COMPARE, ctx, format!("{value} as {ty}"))
    }

    fn visit_type_cast(&mut self, node: &'ast expr::TypeCast, _: Pos, ctx: u8) -> String {
        let value = self.expr_at(&node.expr, prec::ADD);
        let ty = self.print_type(&node.ty);
        wrap(prec::COMPARE, ctx, format!("{value} cast as {ty}"))
    }

    fn visit_abstraction(&mut self, node: &'ast expr::Abstraction, _: Pos, _: u8) -> String {
        let params = self.params(&node.params);
        let body = self.print_expr(&node.body);
        format!("fn({params}) {{ return {body} }}")
    }

    fn visit_variant(&mut self, node: &'ast expr::Variant, _: Pos, _: u8) -> String {
        match &node.data {
            Some(data) => format!("<| {} = {} |>", node.label, self.print_expr(data)),
            None => format!("<| {} |>", node.label),
        }
    }

    fn visit_match(&mut self, node: &'ast expr::Match, _: Pos, _: u8) -> String {
        let scrutinee = self.print_expr(&node.scrutinee);

        self.indent_level += 1;
        let cases: Vec<String> = node
            .cases
            .iter()
            .map(|case| {
                let pattern = self.print_pattern(&case.pattern);
                let body = self.print_expr(&case.body);
                format!("{pattern} => {body}")
            })
            .collect();
        let case_indent = self.current_indent();
        self.indent_level -= 1;

        let flat = format!("match {scrutinee} {{ {} }}", cases.join(" | "));
        if flat.len() + case_indent.len() <= self.config.width || cases.len() < 2 {
            return flat;
        }

        let mut out = format!("match {scrutinee} {{\n");
        for (i, case) in cases.iter().enumerate() {
            let sep = if i == 0 { "  " } else { "| " };
            out.push_str(&format!("{case_indent}{sep}{case}\n"));
        }
        out.push_str(&self.current_indent());
        out.push('}');
        out
    }

    fn visit_list(&mut self, node: &'ast expr::List, _: Pos, _: u8) -> String {
        format!("[{}]", self.exprs(&node.elements))
    }

    fn visit_ref(&mut self, node: &'ast expr::Ref, _: Pos, _: u8) -> String {
        self.call("new", &node.init)
    }

    fn visit_deref(&mut self, node: &'ast expr::Deref, _: Pos, ctx: u8) -> String {
        let reference = self.expr_at(&node.reference, prec::POSTFIX);
        wrap(prec::POSTFIX, ctx, format!("*{reference}"))
    }

    fn visit_application(&mut self, node: &'ast expr::Application, _: Pos, _: u8) -> String {
        let function = self.expr_at(&node.function, prec::POSTFIX);
        format!("{function}({})", self.exprs(&node.args))
    }

    fn visit_type_application(
        &mut self,
        node: &'ast expr::TypeApplication,
        _: Pos,
        _: u8,
    ) -> String {
        let function = self.expr_at(&node.function, prec::POSTFIX);
        format!("{function} [{}]", self.types(&node.types))
    }

    fn visit_dot_record(&mut self, node: &'ast expr::DotRecord, _: Pos, _: u8) -> String {
        let record = self.expr_at(&node.record, prec::POSTFIX);
        format!("{record}.{}", node.label)
    }

    fn visit_dot_tuple(&mut self, node: &'ast expr::DotTuple, _: Pos, _: u8) -> String {
        let tuple = self.expr_at(&node.tuple, prec::POSTFIX);
        format!("{tuple}.{}", node.index)
    }

    fn visit_tuple(&mut self, node: &'ast expr::Tuple, _: Pos, _: u8) -> String {
        format!("{{{}}}", self.exprs(&node.elements))
    }

    fn visit_record(&mut self, node: &'ast expr::Record, _: Pos, _: u8) -> String {
        let fields = join(
            node.bindings
                .iter()
                .map(|b| format!("{} = {}", b.name, self.print_expr(&b.expr))),
        );
        format!("{{{fields}}}")
    }

    fn visit_cons_list(&mut self, node: &'ast expr::ConsList, _: Pos, _: u8) -> String {
        let head = self.print_expr(&node.head);
        let tail = self.print_expr(&node.tail);
        format!("cons({head}, {tail})")
    }

    fn visit_head(&mut self, node: &'ast expr::Head, _: Pos, _: u8) -> String {
        self.call("List::head", &node.list)
    }

    fn visit_is_empty(&mut self, node: &'ast expr::IsEmpty, _: Pos, _: u8) -> String {
        self.call("List::isempty", &node.list)
    }

    fn visit_tail(&mut self, node: &'ast expr::Tail, _: Pos, _: u8) -> String {
        self.call("List::tail", &node.list)
    }

    fn visit_panic(&mut self, _: &'ast expr::Panic, _: Pos, _: u8) -> String {
        "panic!".to_string()
    }

    fn visit_throw(&mut self, node: &'ast expr::Throw, _: Pos, _: u8) -> String {
        self.call("throw", &node.expr)
    }

    fn visit_try_catch(&mut self, node: &'ast expr::TryCatch, _: Pos, _: u8) -> String {
        let body = self.print_expr(&node.body);
        let pattern = self.print_pattern(&node.pattern);
        let handler = self.print_expr(&node.handler);
        format!("try {{ {body} }} catch {{ {pattern} => {handler} }}")
    }

    fn visit_try_with(&mut self, node: &'ast expr::TryWith, _: Pos, _: u8) -> String {
        let body = self.print_expr(&node.body);
        let fallback = self.print_expr(&node.fallback);
        format!("try {{ {body} }} with {{ {fallback} }}")
    }

    fn visit_try_cast_as(&mut self, node: &'ast expr::TryCastAs, _: Pos, _: u8) -> String {
        let value = self.print_expr(&node.expr);
        let ty = self.print_type(&node.ty);
        let pattern = self.print_pattern(&node.pattern);
        let on_success = self.print_expr(&node.on_success);
        let on_failure = self.print_expr(&node.on_failure);
        format!(
            "try {{ {value} }} cast as {ty} {{ {pattern} => {on_success} }} with {{ {on_failure} }}"
        )
    }

    fn visit_inl(&mut self, node: &'ast expr::Inl, _: Pos, _: u8) -> String {
        self.call("inl", &node.expr)
    }

    fn visit_inr(&mut self, node: &'ast expr::Inr, _: Pos, _: u8) -> String {
        self.call("inr", &node.expr)
    }

    fn visit_succ(&mut self, node: &'ast expr::Succ, _: Pos, _: u8) -> String {
        self.call("succ", &node.expr)
    }

    fn visit_logic_not(&mut self, node: &'ast expr::LogicNot, _: Pos, _: u8) -> String {
        self.call("not", &node.expr)
    }

    fn visit_pred(&mut self, node: &'ast expr::Pred, _: Pos, _: u8) -> String {
        self.call("Nat::pred", &node.expr)
    }

    fn visit_is_zero(&mut self, node: &'ast expr::IsZero, _: Pos, _: u8) -> String {
        self.call("Nat::iszero", &node.expr)
    }

    fn visit_fix(&mut self, node: &'ast expr::Fix, _: Pos, _: u8) -> String {
        self.call("fix", &node.expr)
    }

    fn visit_nat_rec(&mut self, node: &'ast expr::NatRec, _: Pos, _: u8) -> String {
        let count = self.print_expr(&node.count);
        let initial = self.print_expr(&node.initial);
        let step = self.print_expr(&node.step);
        format!("Nat::rec({count}, {initial}, {step})")
    }

    fn visit_fold(&mut self, node: &'ast expr::Fold, _: Pos, ctx: u8) -> String {
        let ty = self.print_type(&node.ty);
        let value = self.expr_at(&node.expr, prec::POSTFIX);
        wrap(prec::MUL, ctx, format!("fold [{ty}] {value}"))
    }

    fn visit_unfold(&mut self, node: &'ast expr::Unfold, _: Pos, ctx: u8) -> String {
        let ty = self.print_type(&node.ty);
        let value = self.expr_at(&node.expr, prec::POSTFIX);
        wrap(prec::MUL, ctx, format!("unfold [{ty}] {value}"))
    }

    fn visit_const_true(&mut self, _: &'ast expr::ConstTrue, _: Pos, _: u8) -> String {
        "true".to_string()
    }

    fn visit_const_false(&mut self, _: &'ast expr::ConstFalse, _: Pos, _: u8) -> String {
        "false".to_string()
    }

    fn visit_const_unit(&mut self, _: &'ast expr::ConstUnit, _: Pos, _: u8) -> String {
        "unit".to_string()
    }

    fn visit_const_int(&mut self, node: &'ast expr::ConstInt, _: Pos, _: u8) -> String {
        node.value.to_string()
    }

    fn visit_const_memory(&mut self, node: &'ast expr::ConstMemory, _: Pos, _: u8) -> String {
        format!("<0x{:X}>", node.address)
    }

    fn visit_var(&mut self, node: &'ast expr::Var, _: Pos, _: u8) -> String {
        node.name.clone()
    }
}

impl<'ast> TypeVisitor<'ast, u8> for PrettyPrinter {
    type Output = String;

    fn visit_auto(&mut self, _: &'ast ty::Auto, _: Pos, _: u8) -> String {
        "auto".to_string()
    }

    fn visit_fun(&mut self, node: &'ast ty::Fun, _: Pos, ctx: u8) -> String {
        let params = self.types(&node.params);
        let ret = self.type_at(&node.ret, prec::TYPE_TOP);
        wrap(prec::TYPE_TOP, ctx, format!("fn({params}) -> {ret}"))
    }

    fn visit_for_all(&mut self, node: &'ast ty::ForAll, _: Pos, ctx: u8) -> String {
        let body = self.type_at(&node.body, prec::TYPE_TOP);
        wrap(
            prec::TYPE_TOP,
            ctx,
            format!("forall {}. {body}", node.generics.join(", ")),
        )
    }

    fn visit_rec(&mut self, node: &'ast ty::Rec, _: Pos, ctx: u8) -> String {
        let body = self.type_at(&node.body, prec::TYPE_TOP);
        wrap(prec::TYPE_TOP, ctx, format!("µ {}. {body}", node.var))
    }

    fn visit_sum(&mut self, node: &'ast ty::Sum, _: Pos, ctx: u8) -> String {
        let left = self.type_at(&node.left, prec::TYPE_ATOM);
        let right = self.type_at(&node.right, prec::TYPE_SUM);
        wrap(prec::TYPE_SUM, ctx, format!("{left} + {right}"))
    }

    fn visit_tuple(&mut self, node: &'ast ty::Tuple, _: Pos, _: u8) -> String {
        format!("{{{}}}", self.types(&node.elements))
    }

    fn visit_record(&mut self, node: &'ast ty::Record, _: Pos, _: u8) -> String {
        let fields = join(
            node.fields
                .iter()
                .map(|f| format!("{} : {}", f.label, self.print_type(&f.ty))),
        );
        format!("{{{fields}}}")
    }

    fn visit_variant(&mut self, node: &'ast ty::Variant, _: Pos, _: u8) -> String {
        let fields = join(node.fields.iter().map(|f| match &f.ty {
            Some(ty) => format!("{} : {}", f.label, self.print_type(ty)),
            None => f.label.clone(),
        }));
        format!("<| {fields} |>")
    }

    fn visit_list(&mut self, node: &'ast ty::List, _: Pos, _: u8) -> String {
        format!("[{}]", self.print_type(&node.element))
    }

    fn visit_bool(&mut self, _: &'ast ty::Bool, _: Pos, _: u8) -> String {
        "Bool".to_string()
    }

    fn visit_nat(&mut self, _: &'ast ty::Nat, _: Pos, _: u8) -> String {
        "Nat".to_string()
    }

    fn visit_unit(&mut self, _: &'ast ty::Unit, _: Pos, _: u8) -> String {
        "Unit".to_string()
    }

    fn visit_top(&mut self, _: &'ast ty::Top, _: Pos, _: u8) -> String {
        "Top".to_string()
    }

    fn visit_bottom(&mut self, _: &'ast ty::Bottom, _: Pos, _: u8) -> String {
        "Bot".to_string()
    }

    fn visit_ref(&mut self, node: &'ast ty::Ref, _: Pos, _: u8) -> String {
        format!("&{}", self.type_at(&node.referent, prec::TYPE_ATOM))
    }

    fn visit_var(&mut self, node: &'ast ty::Var, _: Pos, _: u8) -> String {
        node.name.clone()
    }
}

impl<'ast> PatternVisitor<'ast, ()> for PrettyPrinter {
    type Output = String;

    fn visit_cast_as(&mut self, node: &'ast pat::CastAs, _: Pos, (): ()) -> String {
        let pattern = self.print_pattern(&node.pattern);
        format!("{pattern} cast as {}", self.print_type(&node.ty))
    }

    fn visit_asc(&mut self, node: &'ast pat::Asc, _: Pos, (): ()) -> String {
        let pattern = self.print_pattern(&node.pattern);
        format!("{pattern} as {}", self.print_type(&node.ty))
    }

    fn visit_variant(&mut self, node: &'ast pat::Variant, _: Pos, (): ()) -> String {
        match &node.data {
            Some(data) => format!("<| {} = {} |>", node.label, self.print_pattern(data)),
            None => format!("<| {} |>", node.label),
        }
    }

    fn visit_inl(&mut self, node: &'ast pat::Inl, _: Pos, (): ()) -> String {
        format!("inl({})", self.print_pattern(&node.pattern))
    }

    fn visit_inr(&mut self, node: &'ast pat::Inr, _: Pos, (): ()) -> String {
        format!("inr({})", self.print_pattern(&node.pattern))
    }

    fn visit_tuple(&mut self, node: &'ast pat::Tuple, _: Pos, (): ()) -> String {
        format!("{{{}}}", self.patterns(&node.elements))
    }

    fn visit_record(&mut self, node: &'ast pat::Record, _: Pos, (): ()) -> String {
        let fields = join(
            node.fields
                .iter()
                .map(|f| format!("{} = {}", f.label, self.print_pattern(&f.pattern))),
        );
        format!("{{{fields}}}")
    }

    fn visit_list(&mut self, node: &'ast pat::List, _: Pos, (): ()) -> String {
        format!("[{}]", self.patterns(&node.elements))
    }

    fn visit_cons(&mut self, node: &'ast pat::Cons, _: Pos, (): ()) -> String {
        let head = self.print_pattern(&node.head);
        let tail = self.print_pattern(&node.tail);
        format!("cons({head}, {tail})")
    }

    fn visit_false(&mut self, _: &'ast pat::False, _: Pos, (): ()) -> String {
        "false".to_string()
    }

    fn visit_true(&mut self, _: &'ast pat::True, _: Pos, (): ()) -> String {
        "true".to_string()
    }

    fn visit_unit(&mut self, _: &'ast pat::Unit, _: Pos, (): ()) -> String {
        "unit".to_string()
    }

    fn visit_int(&mut self, node: &'ast pat::Int, _: Pos, (): ()) -> String {
        node.value.to_string()
    }

    fn visit_succ(&mut self, node: &'ast pat::Succ, _: Pos, (): ()) -> String {
        format!("succ({})", self.print_pattern(&node.pattern))
    }

    fn visit_var(&mut self, node: &'ast pat::Var, _: Pos, (): ()) -> String {
        node.name.clone()
    }
}

impl<'ast> DeclVisitor<'ast, ()> for PrettyPrinter {
    type Output = String;

    fn visit_fun(&mut self, node: &'ast decl::Fun, _: Pos, (): ()) -> String {
        let header = self.function_header(
            &node.annotations,
            &node.name,
            None,
            &node.params,
            node.return_type.as_ref(),
            &node.throw_types,
        );
        self.function_body(header, &node.locals, &node.body)
    }

    fn visit_fun_generic(&mut self, node: &'ast decl::FunGeneric, _: Pos, (): ()) -> String {
        let header = self.function_header(
            &node.annotations,
            &node.name,
            Some(node.generics.as_slice()),
            &node.params,
            node.return_type.as_ref(),
            &node.throw_types,
        );
        self.function_body(header, &node.locals, &node.body)
    }

    fn visit_type_alias(&mut self, node: &'ast decl::TypeAlias, _: Pos, (): ()) -> String {
        let ty = self.print_type(&node.ty);
        format!("{}type {} = {ty}", self.current_indent(), node.name)
    }

    fn visit_exception_type(
        &mut self,
        node: &'ast decl::ExceptionType,
        _: Pos,
        (): (),
    ) -> String {
        let ty = self.print_type(&node.ty);
        format!("{}exception type = {ty}", self.current_indent())
    }

    fn visit_exception_variant(
        &mut self,
        node: &'ast decl::ExceptionVariant,
        _: Pos,
        (): (),
    ) -> String {
        let ty = self.print_type(&node.ty);
        format!(
            "{}exception variant {} : {ty}",
            self.current_indent(),
            node.label
        )
    }
}

impl<'ast> ProgramVisitor<'ast, ()> for PrettyPrinter {
    type Output = String;

    fn visit_module(&mut self, node: &'ast program::Module, _: Pos, (): ()) -> String {
        let mut out = format!("language {};\n", node.language);
        for extension in &node.extensions {
            out.push_str(&format!("extend with {};\n", extension.names.join(", ")));
        }
        for decl in &node.decls {
            out.push('\n');
            out.push_str(&self.print_decl(decl));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PrettyPrinter::new().print_expr(self))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PrettyPrinter::new().print_type(self))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PrettyPrinter::new().print_pattern(self))
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PrettyPrinter::new().print_decl(self))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PrettyPrinter::new().print_program(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::BinaryOp;
    use crate::build::*;

    #[test]
    fn test_pretty_config_default() {
        let config = PrettyConfig::default();
        assert_eq!(config.indent, "  ");
        assert_eq!(config.width, 80);
    }

    #[test]
    fn test_pretty_printer_new() {
        let printer = PrettyPrinter::new();
        assert_eq!(printer.indent_level, 0);
    }

    #[test]
    fn test_literals() {
        assert_eq!(int(42).to_string(), "42");
        assert_eq!(boolean(true).to_string(), "true");
        assert_eq!(unit().to_string(), "unit");
        assert_eq!(memory(255).to_string(), "<0xFF>");
        assert_eq!(panic().to_string(), "panic!");
    }

    #[test]
    fn test_throw_and_cast() {
        assert_eq!(throw(int(5)).to_string(), "throw(5)");
        assert_eq!(cast(int(5), nat()).to_string(), "5 cast as Nat");
    }

    #[test]
    fn test_binary_precedence() {
        let left_nested = binary(
            BinaryOp::Subtract,
            binary(BinaryOp::Subtract, var("a"), var("b")),
            var("c"),
        );
        assert_eq!(left_nested.to_string(), "a - b - c");

        let right_nested = binary(
            BinaryOp::Subtract,
            var("a"),
            binary(BinaryOp::Subtract, var("b"), var("c")),
        );
        assert_eq!(right_nested.to_string(), "a - (b - c)");

        let mixed = binary(
            BinaryOp::Add,
            var("a"),
            binary(BinaryOp::Multiply, var("b"), var("c")),
        );
        assert_eq!(mixed.to_string(), "a + b * c");
    }

    #[test]
    fn test_if_inside_application_is_parenthesised_only_when_needed() {
        let cond = if_(var("b"), int(1), int(2));
        assert_eq!(
            app(var("f"), vec![cond.clone()]).to_string(),
            "f(if b then 1 else 2)"
        );
        assert_eq!(
            binary(BinaryOp::Add, cond, int(1)).to_string(),
            "(if b then 1 else 2) + 1"
        );
    }

    #[test]
    fn test_types() {
        assert_eq!(fun(vec![nat()], nat()).to_string(), "fn(Nat) -> Nat");
        assert_eq!(
            sum(sum(nat(), bool_ty()), unit_ty()).to_string(),
            "(Nat + Bool) + Unit"
        );
        assert_eq!(
            list_ty(fun(vec![], bool_ty())).to_string(),
            "[fn() -> Bool]"
        );
        assert_eq!(
            variant_ty(vec![("some", Some(nat())), ("none", None)]).to_string(),
            "<| some : Nat, none |>"
        );
        assert_eq!(
            record_ty(vec![("x", nat()), ("y", bool_ty())]).to_string(),
            "{x : Nat, y : Bool}"
        );
    }

    #[test]
    fn test_patterns() {
        assert_eq!(p_inl(p_var("x")).to_string(), "inl(x)");
        assert_eq!(p_succ(p_int(0)).to_string(), "succ(0)");
        assert_eq!(
            p_tuple(vec![p_bool(true), p_unit()]).to_string(),
            "{true, unit}"
        );
    }

    #[test]
    fn test_match_breaks_when_too_wide() {
        let m = match_(
            var("x"),
            vec![(p_inl(p_var("a")), var("a")), (p_inr(p_var("b")), var("b"))],
        );
        assert_eq!(m.to_string(), "match x { inl(a) => a | inr(b) => b }");

        let narrow = PrettyConfig {
            indent: "  ".to_string(),
            width: 10,
        };
        let printed = PrettyPrinter::new().with_config(narrow).print_expr(&m);
        assert_eq!(printed, "match x {\n    inl(a) => a\n  | inr(b) => b\n}");
    }

    #[test]
    fn test_program() {
        let p = program_with(
            ["#unit-type"],
            vec![fun_decl(
                "main",
                vec![param("n", nat())],
                nat(),
                succ(var("n")),
            )],
        );
        assert_eq!(
            p.to_string(),
            "language core;\nextend with #unit-type;\n\nfn main(n : Nat) -> Nat {\n  return succ(n)\n}\n"
        );
    }

    #[test]
    fn test_nested_function_indentation() {
        let inner = fun_decl("id", vec![param("x", nat())], nat(), var("x"));
        let outer: Decl = decl::Fun::new(
            vec![decl::Annotation::Inline],
            "main".to_string(),
            vec![param("n", nat())],
            Some(nat()),
            vec![],
            vec![inner],
            Box::new(app(var("id"), vec![var("n")])),
        )
        .into();
        assert_eq!(
            outer.to_string(),
            "inline fn main(n : Nat) -> Nat {\n  fn id(x : Nat) -> Nat {\n    return x\n  }\n  return id(n)\n}"
        );
    }
}
