//! Lowering of type annotations.
//!
//! Converts `ast::Type` into the checker's [`Ty`], resolving type variables
//! against the generics in scope and the program's aliases. Annotations
//! without type variables always lower to the same `Ty`, so they are cached
//! by structure.

use super::TypeChecker;
use crate::context::Scope;
use crate::error::TypeError;
use crate::types::Ty;
use stella_syntax::ast::ty::{
    Auto, Bool, Bottom, ForAll, Fun, List, Nat, Rec, Record, Ref, Sum, Top, Tuple, Unit, Var,
    Variant,
};
use stella_syntax::ast::{Type, TypeKind, TypeVisitor};
use stella_syntax::{NodeRef, Position, PostOrder};

impl<'ast> TypeChecker<'ast> {
    /// Lower an annotation to a [`Ty`].
    pub fn lower(&mut self, ty: &'ast Type, scope: &Scope) -> Ty {
        if !is_closed(ty) {
            return ty.accept(self, scope);
        }

        if let Some(cached) = self.type_cache.lookup(ty) {
            stella_log::trace!("type cache hit for {}", ty);
            return cached.clone();
        }
        let lowered = ty.accept(self, scope);
        self.type_cache.insert(ty, lowered.clone());
        lowered
    }

    fn lower_all(&mut self, types: &'ast [Type], scope: &Scope) -> Vec<Ty> {
        types.iter().map(|ty| ty.accept(self, scope)).collect()
    }

    fn lower_under(&mut self, vars: &[String], body: &'ast Type, scope: &Scope) -> Ty {
        let mark = self.type_binders.len();
        self.type_binders.extend(vars.iter().cloned());
        let lowered = body.accept(self, scope);
        self.type_binders.truncate(mark);
        lowered
    }
}

/// Returns `true` if the annotation mentions no type variable.
fn is_closed(ty: &Type) -> bool {
    let mut closed = true;
    PostOrder::new(|node: NodeRef<'_>| {
        if matches!(node, NodeRef::Type(ty) if matches!(ty.kind(), TypeKind::Var(_))) {
            closed = false;
        }
    })
    .ty(ty);
    closed
}

impl<'ast, 's> TypeVisitor<'ast, &'s Scope> for TypeChecker<'ast> {
    type Output = Ty;

    fn visit_auto(
        &mut self,
        _node: &'ast Auto,
        _position: Option<Position>,
        _scope: &'s Scope,
    ) -> Ty {
        Ty::Unknown
    }

    fn visit_fun(&mut self, node: &'ast Fun, _position: Option<Position>, scope: &'s Scope) -> Ty {
        let params = self.lower_all(&node.params, scope);
        let ret = node.ret.accept(self, scope);
        Ty::fun(params, ret)
    }

    fn visit_for_all(
        &mut self,
        node: &'ast ForAll,
        _position: Option<Position>,
        scope: &'s Scope,
    ) -> Ty {
        let body = self.lower_under(&node.generics, &node.body, scope);
        Ty::ForAll {
            vars: node.generics.clone(),
            body: Box::new(body),
        }
    }

    fn visit_rec(&mut self, node: &'ast Rec, _position: Option<Position>, scope: &'s Scope) -> Ty {
        let body = self.lower_under(std::slice::from_ref(&node.var), &node.body, scope);
        Ty::Rec {
            var: node.var.clone(),
            body: Box::new(body),
        }
    }

    fn visit_sum(&mut self, node: &'ast Sum, _position: Option<Position>, scope: &'s Scope) -> Ty {
        let left = node.left.accept(self, scope);
        let right = node.right.accept(self, scope);
        Ty::sum(left, right)
    }

    fn visit_tuple(
        &mut self,
        node: &'ast Tuple,
        _position: Option<Position>,
        scope: &'s Scope,
    ) -> Ty {
        Ty::Tuple(self.lower_all(&node.elements, scope))
    }

    fn visit_record(
        &mut self,
        node: &'ast Record,
        _position: Option<Position>,
        scope: &'s Scope,
    ) -> Ty {
        Ty::Record(
            node.fields
                .iter()
                .map(|field| (field.label.clone(), field.ty.accept(self, scope)))
                .collect(),
        )
    }

    fn visit_variant(
        &mut self,
        node: &'ast Variant,
        _position: Option<Position>,
        scope: &'s Scope,
    ) -> Ty {
        Ty::Variant(
            node.fields
                .iter()
                .map(|field| {
                    let payload = field.ty.as_ref().map(|ty| ty.accept(self, scope));
                    (field.label.clone(), payload)
                })
                .collect(),
        )
    }

    fn visit_list(
        &mut self,
        node: &'ast List,
        _position: Option<Position>,
        scope: &'s Scope,
    ) -> Ty {
        Ty::list(node.element.accept(self, scope))
    }

    fn visit_bool(
        &mut self,
        _node: &'ast Bool,
        _position: Option<Position>,
        _scope: &'s Scope,
    ) -> Ty {
        Ty::Bool
    }

    fn visit_nat(
        &mut self,
        _node: &'ast Nat,
        _position: Option<Position>,
        _scope: &'s Scope,
    ) -> Ty {
        Ty::Nat
    }

    fn visit_unit(
        &mut self,
        _node: &'ast Unit,
        _position: Option<Position>,
        _scope: &'s Scope,
    ) -> Ty {
        Ty::Unit
    }

    fn visit_top(
        &mut self,
        _node: &'ast Top,
        _position: Option<Position>,
        _scope: &'s Scope,
    ) -> Ty {
        Ty::Top
    }

    fn visit_bottom(
        &mut self,
        _node: &'ast Bottom,
        _position: Option<Position>,
        _scope: &'s Scope,
    ) -> Ty {
        Ty::Bottom
    }

    fn visit_ref(&mut self, node: &'ast Ref, _position: Option<Position>, scope: &'s Scope) -> Ty {
        Ty::reference(node.referent.accept(self, scope))
    }

    fn visit_var(&mut self, node: &'ast Var, position: Option<Position>, scope: &'s Scope) -> Ty {
        let name = node.name.as_str();
        if self.type_binders.iter().any(|v| v == name) || scope.has_type_var(name) {
            return Ty::Var(node.name.clone());
        }
        if let Some(alias) = self.aliases.get(name) {
            return alias.clone();
        }
        self.report(TypeError::UndefinedVariable {
            name: node.name.clone(),
            position,
        })
    }
}
