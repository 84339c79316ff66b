//! Pattern checking.
//!
//! A pattern is checked against the type of the value it destructures and
//! yields the variables it binds, in left-to-right order.

use super::TypeChecker;
use crate::context::Scope;
use crate::error::TypeError;
use crate::types::Ty;
use stella_syntax::ast::pat::{
    Asc, CastAs, Cons, False, Inl, Inr, Int, List, Record, Succ, True, Tuple, Unit, Var, Variant,
};
use stella_syntax::ast::{Pattern, PatternVisitor};
use stella_syntax::Position;

/// Variables bound by a pattern.
pub type Bindings = Vec<(String, Ty)>;

impl<'ast> TypeChecker<'ast> {
    fn pattern_mismatch(&mut self, ty: &Ty, position: Option<Position>) -> Bindings {
        self.report(TypeError::PatternMismatch {
            ty: ty.clone(),
            position,
        });
        Vec::new()
    }

    /// Checks `pattern` against a wildcard, binding its variables to `ty`.
    fn check_under_wildcard(
        &mut self,
        patterns: &[&'ast Pattern],
        ty: &Ty,
        scope: &Scope,
    ) -> Bindings {
        patterns
            .iter()
            .flat_map(|&pattern| self.check_pattern(pattern, ty, scope))
            .collect()
    }

    /// Checks a literal pattern that requires the scrutinee to be `expected`.
    fn check_literal(&mut self, ty: &Ty, expected: &Ty, position: Option<Position>) -> Bindings {
        if ty.conforms_to(expected, self.subtyping) {
            Vec::new()
        } else {
            self.pattern_mismatch(ty, position)
        }
    }
}

impl<'ast, 't, 's> PatternVisitor<'ast, (&'t Ty, &'s Scope)> for TypeChecker<'ast> {
    type Output = Bindings;

    fn visit_cast_as(
        &mut self,
        node: &'ast CastAs,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        let target = self.lower(&node.ty, scope);
        if !ty.castable_to(&target) {
            self.report(TypeError::IllegalCast {
                from: ty.clone(),
                to: target.clone(),
                position,
            });
        }
        self.check_pattern(&node.pattern, &target, scope)
    }

    fn visit_asc(
        &mut self,
        node: &'ast Asc,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        let ascribed = self.lower(&node.ty, scope);
        self.require(ty, &ascribed, position);
        self.check_pattern(&node.pattern, &ascribed, scope)
    }

    fn visit_variant(
        &mut self,
        node: &'ast Variant,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        match ty {
            Ty::Variant(fields) => {
                let Some((_, payload)) = fields.iter().find(|(label, _)| *label == node.label)
                else {
                    self.report(TypeError::UnexpectedVariantLabel {
                        label: node.label.clone(),
                        position,
                    });
                    return Vec::new();
                };
                match (&node.data, payload) {
                    (Some(data), Some(payload)) => self.check_pattern(data, payload, scope),
                    (None, None) => Vec::new(),
                    _ => self.pattern_mismatch(ty, position),
                }
            }
            t if t.is_wildcard() => {
                self.check_under_wildcard(node.data.as_deref().as_slice(), t, scope)
            }
            _ => {
                self.report(TypeError::NotAVariant {
                    found: ty.clone(),
                    position,
                });
                Vec::new()
            }
        }
    }

    fn visit_inl(
        &mut self,
        node: &'ast Inl,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        match ty {
            Ty::Sum(left, _) => self.check_pattern(&node.pattern, left, scope),
            t if t.is_wildcard() => self.check_pattern(&node.pattern, t, scope),
            _ => self.pattern_mismatch(ty, position),
        }
    }

    fn visit_inr(
        &mut self,
        node: &'ast Inr,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        match ty {
            Ty::Sum(_, right) => self.check_pattern(&node.pattern, right, scope),
            t if t.is_wildcard() => self.check_pattern(&node.pattern, t, scope),
            _ => self.pattern_mismatch(ty, position),
        }
    }

    fn visit_tuple(
        &mut self,
        node: &'ast Tuple,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        match ty {
            Ty::Tuple(elements) if elements.len() == node.elements.len() => node
                .elements
                .iter()
                .zip(elements)
                .flat_map(|(pattern, ty)| self.check_pattern(pattern, ty, scope))
                .collect(),
            t if t.is_wildcard() => {
                let patterns: Vec<_> = node.elements.iter().collect();
                self.check_under_wildcard(&patterns, t, scope)
            }
            _ => self.pattern_mismatch(ty, position),
        }
    }

    fn visit_record(
        &mut self,
        node: &'ast Record,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        match ty {
            Ty::Record(fields) => {
                let mut bound = Vec::new();
                for field in &node.fields {
                    match fields.iter().find(|(label, _)| *label == field.label) {
                        Some((_, field_ty)) => {
                            bound.extend(self.check_pattern(&field.pattern, field_ty, scope));
                        }
                        None => {
                            self.report(TypeError::MissingRecordField {
                                label: field.label.clone(),
                                ty: ty.clone(),
                                position,
                            });
                        }
                    }
                }
                bound
            }
            t if t.is_wildcard() => {
                let patterns: Vec<_> = node.fields.iter().map(|field| &field.pattern).collect();
                self.check_under_wildcard(&patterns, t, scope)
            }
            _ => self.pattern_mismatch(ty, position),
        }
    }

    fn visit_list(
        &mut self,
        node: &'ast List,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        match ty {
            Ty::List(element) => node
                .elements
                .iter()
                .flat_map(|pattern| self.check_pattern(pattern, element, scope))
                .collect(),
            t if t.is_wildcard() => {
                let patterns: Vec<_> = node.elements.iter().collect();
                self.check_under_wildcard(&patterns, t, scope)
            }
            _ => self.pattern_mismatch(ty, position),
        }
    }

    fn visit_cons(
        &mut self,
        node: &'ast Cons,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        match ty {
            Ty::List(element) => {
                let mut bound = self.check_pattern(&node.head, element, scope);
                bound.extend(self.check_pattern(&node.tail, ty, scope));
                bound
            }
            t if t.is_wildcard() => {
                self.check_under_wildcard(&[&*node.head, &*node.tail], t, scope)
            }
            _ => self.pattern_mismatch(ty, position),
        }
    }

    fn visit_false(
        &mut self,
        _node: &'ast False,
        position: Option<Position>,
        (ty, _): (&'t Ty, &'s Scope),
    ) -> Bindings {
        self.check_literal(ty, &Ty::Bool, position)
    }

    fn visit_true(
        &mut self,
        _node: &'ast True,
        position: Option<Position>,
        (ty, _): (&'t Ty, &'s Scope),
    ) -> Bindings {
        self.check_literal(ty, &Ty::Bool, position)
    }

    fn visit_unit(
        &mut self,
        _node: &'ast Unit,
        position: Option<Position>,
        (ty, _): (&'t Ty, &'s Scope),
    ) -> Bindings {
        self.check_literal(ty, &Ty::Unit, position)
    }

    fn visit_int(
        &mut self,
        _node: &'ast Int,
        position: Option<Position>,
        (ty, _): (&'t Ty, &'s Scope),
    ) -> Bindings {
        self.check_literal(ty, &Ty::Nat, position)
    }

    fn visit_succ(
        &mut self,
        node: &'ast Succ,
        position: Option<Position>,
        (ty, scope): (&'t Ty, &'s Scope),
    ) -> Bindings {
        let mut bound = self.check_literal(ty, &Ty::Nat, position);
        bound.extend(self.check_pattern(&node.pattern, &Ty::Nat, scope));
        bound
    }

    fn visit_var(
        &mut self,
        node: &'ast Var,
        _position: Option<Position>,
        (ty, _): (&'t Ty, &'s Scope),
    ) -> Bindings {
        vec![(node.name.clone(), ty.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stella_syntax::build::*;

    fn check(pattern: &Pattern, ty: &Ty) -> (Bindings, Vec<TypeError>) {
        let mut checker = TypeChecker::new();
        let bound = checker.check_pattern(pattern, ty, &Scope::new());
        (bound, checker.errors().to_vec())
    }

    #[test]
    fn test_var_binds_whole_value() {
        let (bound, errors) = check(&p_var("x"), &Ty::list(Ty::Nat));
        assert!(errors.is_empty());
        assert_eq!(bound, vec![("x".to_string(), Ty::list(Ty::Nat))]);
    }

    #[test]
    fn test_nested_bindings_in_order() {
        let pattern = p_tuple(vec![p_inl(p_var("a")), p_cons(p_var("h"), p_var("t"))]);
        let ty = Ty::Tuple(vec![Ty::sum(Ty::Nat, Ty::Bool), Ty::list(Ty::Unit)]);
        let (bound, errors) = check(&pattern, &ty);
        assert!(errors.is_empty());
        assert_eq!(
            bound,
            vec![
                ("a".to_string(), Ty::Nat),
                ("h".to_string(), Ty::Unit),
                ("t".to_string(), Ty::list(Ty::Unit)),
            ]
        );
    }

    #[test]
    fn test_record_pattern() {
        let pattern = p_record(vec![("y", p_var("b"))]);
        let ty = Ty::Record(vec![("x".into(), Ty::Nat), ("y".into(), Ty::Bool)]);
        assert_eq!(check(&pattern, &ty).0, vec![("b".to_string(), Ty::Bool)]);

        let missing = p_record(vec![("z", p_var("c"))]);
        let (_, errors) = check(&missing, &ty);
        assert!(matches!(errors[..], [TypeError::MissingRecordField { .. }]));
    }

    #[test]
    fn test_variant_pattern() {
        let option = Ty::Variant(vec![("some".into(), Some(Ty::Nat)), ("none".into(), None)]);
        assert_eq!(
            check(&p_variant("some", Some(p_var("n"))), &option).0,
            vec![("n".to_string(), Ty::Nat)]
        );

        let (_, errors) = check(&p_variant("other", None), &option);
        assert!(matches!(errors[..], [TypeError::UnexpectedVariantLabel { .. }]));

        let (_, errors) = check(&p_variant("none", Some(p_var("x"))), &option);
        assert!(matches!(errors[..], [TypeError::PatternMismatch { .. }]));
    }

    #[test]
    fn test_literal_mismatch() {
        let (_, errors) = check(&p_int(3), &Ty::Bool);
        assert!(matches!(errors[..], [TypeError::PatternMismatch { .. }]));

        let (bound, errors) = check(&p_succ(p_var("m")), &Ty::Nat);
        assert!(errors.is_empty());
        assert_eq!(bound, vec![("m".to_string(), Ty::Nat)]);
    }

    #[test]
    fn test_wildcard_scrutinee_binds_wildcards() {
        let pattern = p_tuple(vec![p_var("a"), p_var("b")]);
        let (bound, errors) = check(&pattern, &Ty::Error);
        assert!(errors.is_empty());
        assert_eq!(bound.len(), 2);
        assert!(bound.iter().all(|(_, ty)| *ty == Ty::Error));
    }

    #[test]
    fn test_ascription_in_pattern() {
        let (bound, errors) = check(&p_asc(p_var("x"), nat()), &Ty::Nat);
        assert!(errors.is_empty());
        assert_eq!(bound, vec![("x".to_string(), Ty::Nat)]);

        let (_, errors) = check(&p_asc(p_var("x"), bool_ty()), &Ty::Nat);
        assert!(matches!(errors[..], [TypeError::Mismatch { .. }]));
    }
}
