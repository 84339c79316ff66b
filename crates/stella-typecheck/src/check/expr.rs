//! Expression type synthesis.
//!
//! Every expression synthesises a [`Ty`]. Where the type of a construct is
//! only partly known from its subexpressions (`inl`, `[]`, `panic!`), the
//! unknown parts are [`Ty::Unknown`] and get filled in when the type meets
//! an expected one.

use super::TypeChecker;
use crate::context::Scope;
use crate::error::TypeError;
use crate::types::Ty;
use stella_syntax::ast::expr::{
    Abstraction, Application, Assign, Binary, BinaryOp, ConsList, ConstFalse, ConstInt,
    ConstMemory, ConstTrue, ConstUnit, Deref, DotRecord, DotTuple, Fix, Fold, Head, If, Inl, Inr,
    IsEmpty, IsZero, Let, LetRec, List, LogicNot, Match, NatRec, Panic, Pred, Record, Ref,
    Sequence, Succ, Tail, Throw, TryCastAs, TryCatch, TryWith, Tuple, TypeAbstraction,
    TypeApplication, TypeAsc, TypeCast, Unfold, Var, Variant,
};
use stella_syntax::ast::{Expr, ExprVisitor, PatternKind};
use stella_syntax::Position;

impl<'ast> TypeChecker<'ast> {
    /// Result of an elimination form applied to a wildcard.
    fn propagate(found: &Ty) -> Ty {
        match found {
            Ty::Error => Ty::Error,
            _ => Ty::Unknown,
        }
    }

    fn check_nat_unary(&mut self, expr: &'ast Expr, result: Ty, scope: &mut Scope) -> Ty {
        self.expect(expr, &Ty::Nat, scope);
        result
    }
}

impl<'ast, 's> ExprVisitor<'ast, &'s mut Scope> for TypeChecker<'ast> {
    type Output = Ty;

    fn visit_sequence(
        &mut self,
        node: &'ast Sequence,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        self.expect(&node.first, &Ty::Unit, scope);
        self.synth(&node.second, scope)
    }

    fn visit_assign(
        &mut self,
        node: &'ast Assign,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let target = self.synth(&node.target, scope);
        match &target {
            Ty::Ref(referent) => {
                self.expect(&node.value, referent, scope);
            }
            t if t.is_wildcard() => {
                self.synth(&node.value, scope);
            }
            _ => {
                self.synth(&node.value, scope);
                self.report(TypeError::NotAReference {
                    found: target.clone(),
                    position: node.target.position(),
                });
            }
        }
        Ty::Unit
    }

    fn visit_if(
        &mut self,
        node: &'ast If,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        self.expect(&node.condition, &Ty::Bool, scope);
        let then_ty = self.synth(&node.then_branch, scope);
        let else_ty = self.synth(&node.else_branch, scope);
        self.join(&then_ty, &else_ty, node.else_branch.position())
    }

    fn visit_let(
        &mut self,
        node: &'ast Let,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        scope.push();
        for binding in &node.bindings {
            let ty = self.synth(&binding.expr, scope);
            let bound = self.check_pattern(&binding.pattern, &ty, scope);
            scope.bind_all(bound);
        }
        let body = self.synth(&node.body, scope);
        scope.pop();
        body
    }

    fn visit_let_rec(
        &mut self,
        node: &'ast LetRec,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        scope.push();

        // Every binding is visible in every right-hand side, so all
        // ascriptions are bound before any expression is checked.
        let mut declared = Vec::with_capacity(node.bindings.len());
        for binding in &node.bindings {
            let PatternKind::Asc(asc) = binding.pattern.kind() else {
                self.report(TypeError::AmbiguousType {
                    position: binding.pattern.position(),
                });
                declared.push(Ty::Error);
                continue;
            };
            let ty = self.lower(&asc.ty, scope);
            let bound = self.check_pattern(&asc.pattern, &ty, scope);
            scope.bind_all(bound);
            declared.push(ty);
        }

        for (binding, ty) in node.bindings.iter().zip(&declared) {
            self.expect(&binding.expr, ty, scope);
        }

        let body = self.synth(&node.body, scope);
        scope.pop();
        body
    }

    fn visit_type_abstraction(
        &mut self,
        node: &'ast TypeAbstraction,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        scope.push();
        for generic in &node.generics {
            scope.bind_type_var(generic.as_str());
        }
        let body = self.synth(&node.body, scope);
        scope.pop();
        Ty::ForAll {
            vars: node.generics.clone(),
            body: Box::new(body),
        }
    }

    fn visit_binary(
        &mut self,
        node: &'ast Binary,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match node.op {
            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
                self.expect(&node.left, &Ty::Nat, scope);
                self.expect(&node.right, &Ty::Nat, scope);
                Ty::Nat
            }
            BinaryOp::LogicAnd | BinaryOp::LogicOr => {
                self.expect(&node.left, &Ty::Bool, scope);
                self.expect(&node.right, &Ty::Bool, scope);
                Ty::Bool
            }
            BinaryOp::Equal | BinaryOp::NotEqual => {
                let left = self.synth(&node.left, scope);
                let right = self.synth(&node.right, scope);
                self.join(&left, &right, node.right.position());
                Ty::Bool
            }
            BinaryOp::LessThan
            | BinaryOp::LessThanOrEqual
            | BinaryOp::GreaterThan
            | BinaryOp::GreaterThanOrEqual => {
                self.expect(&node.left, &Ty::Nat, scope);
                self.expect(&node.right, &Ty::Nat, scope);
                Ty::Bool
            }
        }
    }

    fn visit_type_asc(
        &mut self,
        node: &'ast TypeAsc,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let ascribed = self.lower(&node.ty, scope);
        self.expect(&node.expr, &ascribed, scope);
        ascribed
    }

    fn visit_type_cast(
        &mut self,
        node: &'ast TypeCast,
        position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let target = self.lower(&node.ty, scope);
        let found = self.synth(&node.expr, scope);
        if !found.castable_to(&target) {
            self.report(TypeError::IllegalCast {
                from: found,
                to: target.clone(),
                position,
            });
        }
        target
    }

    fn visit_abstraction(
        &mut self,
        node: &'ast Abstraction,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        scope.push();
        let mut params = Vec::with_capacity(node.params.len());
        for param in &node.params {
            let ty = self.lower(&param.ty, scope);
            scope.bind(param.name.as_str(), ty.clone());
            params.push(ty);
        }
        let ret = self.synth(&node.body, scope);
        scope.pop();
        Ty::fun(params, ret)
    }

    fn visit_variant(
        &mut self,
        node: &'ast Variant,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let payload = node.data.as_ref().map(|data| self.synth(data, scope));
        Ty::Variant(vec![(node.label.clone(), payload)])
    }

    fn visit_match(
        &mut self,
        node: &'ast Match,
        position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let scrutinee = self.synth(&node.scrutinee, scope);
        if node.cases.is_empty() {
            return self.report(TypeError::EmptyMatch { position });
        }

        let mut result = Ty::Unknown;
        for case in &node.cases {
            scope.push();
            let bound = self.check_pattern(&case.pattern, &scrutinee, scope);
            scope.bind_all(bound);
            let arm = self.synth(&case.body, scope);
            scope.pop();
            result = self.join(&result, &arm, case.body.position());
        }

        let patterns: Vec<_> = node.cases.iter().map(|case| &case.pattern).collect();
        let missing = super::exhaustive::missing_patterns(&scrutinee, &patterns);
        if !missing.is_empty() {
            self.report(TypeError::NonExhaustiveMatch { missing, position });
        }
        result
    }

    fn visit_list(
        &mut self,
        node: &'ast List,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let mut element = Ty::Unknown;
        for item in &node.elements {
            let ty = self.synth(item, scope);
            element = self.join(&element, &ty, item.position());
        }
        Ty::list(element)
    }

    fn visit_ref(
        &mut self,
        node: &'ast Ref,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        Ty::reference(self.synth(&node.init, scope))
    }

    fn visit_deref(
        &mut self,
        node: &'ast Deref,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match self.synth(&node.reference, scope) {
            Ty::Ref(referent) => *referent,
            t if t.is_wildcard() => Self::propagate(&t),
            found => self.report(TypeError::NotAReference {
                found,
                position: node.reference.position(),
            }),
        }
    }

    fn visit_application(
        &mut self,
        node: &'ast Application,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match self.synth(&node.function, scope) {
            Ty::Fun { params, ret } => {
                if params.len() == node.args.len() {
                    for (arg, param) in node.args.iter().zip(&params) {
                        self.expect(arg, param, scope);
                    }
                } else {
                    for arg in &node.args {
                        self.synth(arg, scope);
                    }
                    self.report(TypeError::WrongArgCount {
                        expected: params.len(),
                        found: node.args.len(),
                        position: node.function.position(),
                    });
                }
                *ret
            }
            callee => {
                for arg in &node.args {
                    self.synth(arg, scope);
                }
                if callee.is_wildcard() {
                    Self::propagate(&callee)
                } else {
                    self.report(TypeError::NotAFunction {
                        found: callee,
                        position: node.function.position(),
                    })
                }
            }
        }
    }

    fn visit_type_application(
        &mut self,
        node: &'ast TypeApplication,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let generic = self.synth(&node.function, scope);
        let args: Vec<Ty> = node.types.iter().map(|ty| self.lower(ty, scope)).collect();

        match generic {
            Ty::ForAll { vars, body } => {
                if vars.len() != args.len() {
                    return self.report(TypeError::WrongTypeArgCount {
                        expected: vars.len(),
                        found: args.len(),
                        position: node.function.position(),
                    });
                }
                Ty::instantiate(&vars, &body, &args)
            }
            t if t.is_wildcard() => Self::propagate(&t),
            found => self.report(TypeError::NotAGeneric {
                found,
                position: node.function.position(),
            }),
        }
    }

    fn visit_dot_record(
        &mut self,
        node: &'ast DotRecord,
        position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match self.synth(&node.record, scope) {
            Ty::Record(fields) => {
                if let Some((_, ty)) = fields.iter().find(|(label, _)| *label == node.label) {
                    return ty.clone();
                }
                self.report(TypeError::MissingRecordField {
                    label: node.label.clone(),
                    ty: Ty::Record(fields),
                    position,
                })
            }
            t if t.is_wildcard() => Self::propagate(&t),
            found => self.report(TypeError::NotARecord {
                found,
                position: node.record.position(),
            }),
        }
    }

    fn visit_dot_tuple(
        &mut self,
        node: &'ast DotTuple,
        position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match self.synth(&node.tuple, scope) {
            Ty::Tuple(mut elements) => {
                let index = node.index;
                if index == 0 || index > elements.len() as u64 {
                    return self.report(TypeError::TupleIndexOutOfBounds {
                        index,
                        len: elements.len(),
                        position,
                    });
                }
                elements.swap_remove((index - 1) as usize)
            }
            t if t.is_wildcard() => Self::propagate(&t),
            found => self.report(TypeError::NotATuple {
                found,
                position: node.tuple.position(),
            }),
        }
    }

    fn visit_tuple(
        &mut self,
        node: &'ast Tuple,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        Ty::Tuple(node.elements.iter().map(|e| self.synth(e, scope)).collect())
    }

    fn visit_record(
        &mut self,
        node: &'ast Record,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        Ty::Record(
            node.bindings
                .iter()
                .map(|binding| (binding.name.clone(), self.synth(&binding.expr, scope)))
                .collect(),
        )
    }

    fn visit_cons_list(
        &mut self,
        node: &'ast ConsList,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let head = self.synth(&node.head, scope);
        let list = Ty::list(head);
        let tail = self.expect(&node.tail, &list, scope);
        list.merge(&tail)
    }

    fn visit_head(
        &mut self,
        node: &'ast Head,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match self.synth(&node.list, scope) {
            Ty::List(element) => *element,
            t if t.is_wildcard() => Self::propagate(&t),
            found => self.report(TypeError::NotAList {
                found,
                position: node.list.position(),
            }),
        }
    }

    fn visit_is_empty(
        &mut self,
        node: &'ast IsEmpty,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match self.synth(&node.list, scope) {
            Ty::List(_) => {}
            t if t.is_wildcard() => {}
            found => {
                self.report(TypeError::NotAList {
                    found,
                    position: node.list.position(),
                });
            }
        }
        Ty::Bool
    }

    fn visit_tail(
        &mut self,
        node: &'ast Tail,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match self.synth(&node.list, scope) {
            list @ Ty::List(_) => list,
            t if t.is_wildcard() => Self::propagate(&t),
            found => self.report(TypeError::NotAList {
                found,
                position: node.list.position(),
            }),
        }
    }

    fn visit_panic(
        &mut self,
        _node: &'ast Panic,
        _position: Option<Position>,
        _scope: &'s mut Scope,
    ) -> Ty {
        Ty::Never
    }

    fn visit_throw(
        &mut self,
        node: &'ast Throw,
        position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match self.exception_type() {
            Some(exception) => {
                self.expect(&node.expr, &exception, scope);
            }
            None => {
                self.synth(&node.expr, scope);
                self.report(TypeError::ExceptionTypeNotDeclared { position });
            }
        }
        Ty::Never
    }

    fn visit_try_catch(
        &mut self,
        node: &'ast TryCatch,
        position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let body = self.synth(&node.body, scope);
        let exception = match self.exception_type() {
            Some(exception) => exception,
            None => self.report(TypeError::ExceptionTypeNotDeclared { position }),
        };

        scope.push();
        let bound = self.check_pattern(&node.pattern, &exception, scope);
        scope.bind_all(bound);
        let handler = self.synth(&node.handler, scope);
        scope.pop();

        self.join(&body, &handler, node.handler.position())
    }

    fn visit_try_with(
        &mut self,
        node: &'ast TryWith,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let body = self.synth(&node.body, scope);
        let fallback = self.synth(&node.fallback, scope);
        self.join(&body, &fallback, node.fallback.position())
    }

    fn visit_try_cast_as(
        &mut self,
        node: &'ast TryCastAs,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        self.synth(&node.expr, scope);
        let target = self.lower(&node.ty, scope);

        scope.push();
        let bound = self.check_pattern(&node.pattern, &target, scope);
        scope.bind_all(bound);
        let success = self.synth(&node.on_success, scope);
        scope.pop();

        let failure = self.synth(&node.on_failure, scope);
        self.join(&success, &failure, node.on_failure.position())
    }

    fn visit_inl(
        &mut self,
        node: &'ast Inl,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        Ty::sum(self.synth(&node.expr, scope), Ty::Unknown)
    }

    fn visit_inr(
        &mut self,
        node: &'ast Inr,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        Ty::sum(Ty::Unknown, self.synth(&node.expr, scope))
    }

    fn visit_succ(
        &mut self,
        node: &'ast Succ,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        self.check_nat_unary(&node.expr, Ty::Nat, scope)
    }

    fn visit_logic_not(
        &mut self,
        node: &'ast LogicNot,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        self.expect(&node.expr, &Ty::Bool, scope);
        Ty::Bool
    }

    fn visit_pred(
        &mut self,
        node: &'ast Pred,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        self.check_nat_unary(&node.expr, Ty::Nat, scope)
    }

    fn visit_is_zero(
        &mut self,
        node: &'ast IsZero,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        self.check_nat_unary(&node.expr, Ty::Bool, scope)
    }

    fn visit_fix(
        &mut self,
        node: &'ast Fix,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match self.synth(&node.expr, scope) {
            Ty::Fun { params, ret } if params.len() == 1 => {
                let param = &params[0];
                if !ret.conforms_to(param, self.subtyping) {
                    return self.report(TypeError::Mismatch {
                        expected: Ty::fun(vec![param.clone()], param.clone()),
                        found: Ty::Fun { params: params.clone(), ret },
                        position: node.expr.position(),
                    });
                }
                param.merge(&ret)
            }
            t if t.is_wildcard() => Self::propagate(&t),
            found => self.report(TypeError::NotAFunction {
                found,
                position: node.expr.position(),
            }),
        }
    }

    fn visit_nat_rec(
        &mut self,
        node: &'ast NatRec,
        _position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        self.expect(&node.count, &Ty::Nat, scope);
        let initial = self.synth(&node.initial, scope);
        let step = Ty::fun(vec![Ty::Nat], Ty::fun(vec![initial.clone()], initial.clone()));
        self.expect(&node.step, &step, scope);
        initial
    }

    fn visit_fold(
        &mut self,
        node: &'ast Fold,
        position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let target = self.lower(&node.ty, scope);
        if matches!(target, Ty::Rec { .. }) {
            self.expect(&node.expr, &target.unfold(), scope);
            return target;
        }

        self.synth(&node.expr, scope);
        if target.is_wildcard() {
            target
        } else {
            self.report(TypeError::NotARecursiveType {
                found: target,
                position,
            })
        }
    }

    fn visit_unfold(
        &mut self,
        node: &'ast Unfold,
        position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        let target = self.lower(&node.ty, scope);
        if matches!(target, Ty::Rec { .. }) {
            self.expect(&node.expr, &target, scope);
            return target.unfold();
        }

        self.synth(&node.expr, scope);
        if target.is_wildcard() {
            target
        } else {
            self.report(TypeError::NotARecursiveType {
                found: target,
                position,
            })
        }
    }

    fn visit_const_true(
        &mut self,
        _node: &'ast ConstTrue,
        _position: Option<Position>,
        _scope: &'s mut Scope,
    ) -> Ty {
        Ty::Bool
    }

    fn visit_const_false(
        &mut self,
        _node: &'ast ConstFalse,
        _position: Option<Position>,
        _scope: &'s mut Scope,
    ) -> Ty {
        Ty::Bool
    }

    fn visit_const_unit(
        &mut self,
        _node: &'ast ConstUnit,
        _position: Option<Position>,
        _scope: &'s mut Scope,
    ) -> Ty {
        Ty::Unit
    }

    fn visit_const_int(
        &mut self,
        _node: &'ast ConstInt,
        _position: Option<Position>,
        _scope: &'s mut Scope,
    ) -> Ty {
        Ty::Nat
    }

    fn visit_const_memory(
        &mut self,
        _node: &'ast ConstMemory,
        _position: Option<Position>,
        _scope: &'s mut Scope,
    ) -> Ty {
        Ty::reference(Ty::Unknown)
    }

    fn visit_var(
        &mut self,
        node: &'ast Var,
        position: Option<Position>,
        scope: &'s mut Scope,
    ) -> Ty {
        match scope.lookup(&node.name) {
            Some(ty) => ty.clone(),
            None => self.report(TypeError::UndefinedVariable {
                name: node.name.clone(),
                position,
            }),
        }
    }
}
