//! Core type representation for type checking.
//!
//! This module defines the `Ty` enum, which represents **semantic types**
//! during type checking. This is distinct from `ast::Type`, which is a type
//! as written in source: aliases are resolved and `auto` becomes
//! [`Ty::Unknown`] before a `Ty` exists.
//!
//! # Design
//!
//! - **Wildcards**: [`Ty::Never`], [`Ty::Unknown`] and [`Ty::Error`] fit
//!   any expected type, so one failure does not cascade into its parents
//! - **Conformance** is structural. In exact mode it is equality up to
//!   wildcards; in subtyping mode `Top`, `Bot`, record width/depth and
//!   contravariant parameters apply as well
//! - **Variant literals** are open: `<| a = e |>` conforms to any variant
//!   type that has an `a` alternative of the right payload

/// Internal type representation for type checking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    /// `Bool`
    Bool,

    /// `Nat`
    Nat,

    /// `Unit`
    Unit,

    /// `Top`, the supertype of everything under subtyping.
    Top,

    /// `Bot`, the subtype of everything under subtyping.
    Bottom,

    /// A generic or recursive type variable.
    Var(String),

    /// Function type.
    Fun {
        /// Parameter types
        params: Vec<Ty>,
        /// Return type
        ret: Box<Ty>,
    },

    /// Universal type of a generic function.
    ForAll {
        /// Bound type variables
        vars: Vec<String>,
        /// Body, may mention `vars`
        body: Box<Ty>,
    },

    /// Tuple type, components indexed from 1 in source.
    Tuple(Vec<Ty>),

    /// Binary sum type.
    Sum(Box<Ty>, Box<Ty>),

    /// Record type, fields in declaration order.
    Record(Vec<(String, Ty)>),

    /// Variant type, alternatives in declaration order.
    Variant(Vec<(String, Option<Ty>)>),

    /// List type.
    List(Box<Ty>),

    /// Reference type.
    Ref(Box<Ty>),

    /// Recursive type `µ var. body`.
    Rec {
        /// Bound variable
        var: String,
        /// Body, may mention `var`
        body: Box<Ty>,
    },

    /// Type of expressions that never produce a value (`throw`, `panic!`).
    Never,

    /// A part of a type the checker has not determined, such as the other
    /// half of `inl(e)` or the element of `[]`.
    Unknown,

    /// Error type (for type errors that don't stop checking).
    ///
    /// Fits anything, which keeps one error from producing more.
    Error,
}

impl Ty {
    /// Shorthand for a function type.
    #[must_use]
    pub fn fun(params: Vec<Ty>, ret: Ty) -> Ty {
        Ty::Fun {
            params,
            ret: Box::new(ret),
        }
    }

    /// Shorthand for a list type.
    #[must_use]
    pub fn list(element: Ty) -> Ty {
        Ty::List(Box::new(element))
    }

    /// Shorthand for a reference type.
    #[must_use]
    pub fn reference(referent: Ty) -> Ty {
        Ty::Ref(Box::new(referent))
    }

    /// Shorthand for a sum type.
    #[must_use]
    pub fn sum(left: Ty, right: Ty) -> Ty {
        Ty::Sum(Box::new(left), Box::new(right))
    }

    /// Returns `true` for [`Ty::Never`], [`Ty::Unknown`] and [`Ty::Error`].
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Ty::Never | Ty::Unknown | Ty::Error)
    }

    /// Returns `true` if `self` can be used where `expected` is required.
    ///
    /// With `subtyping` off this is equality up to wildcards and open
    /// variant literals.
    #[must_use]
    pub fn conforms_to(&self, expected: &Ty, subtyping: bool) -> bool {
        conforms(self, expected, subtyping)
    }

    /// Subtyping check, regardless of the `#structural-subtyping` extension.
    #[must_use]
    pub fn is_subtype_of(&self, other: &Ty) -> bool {
        conforms(self, other, true)
    }

    /// Returns `true` if a cast from `self` to `target` can succeed at
    /// runtime, which requires the two to be related by subtyping in either
    /// direction.
    #[must_use]
    pub fn castable_to(&self, target: &Ty) -> bool {
        self.is_subtype_of(target) || target.is_subtype_of(self)
    }

    /// Replaces free occurrences of the variable `name` with `replacement`.
    #[must_use]
    pub fn substitute(&self, name: &str, replacement: &Ty) -> Ty {
        let sub = |ty: &Ty| ty.substitute(name, replacement);
        match self {
            Ty::Var(var) if var == name => replacement.clone(),
            Ty::Fun { params, ret } => Ty::Fun {
                params: params.iter().map(sub).collect(),
                ret: Box::new(sub(ret)),
            },
            Ty::ForAll { vars, .. } if vars.iter().any(|v| v == name) => self.clone(),
            Ty::ForAll { vars, body } => {
                let mut body = (**body).clone();
                let vars = vars
                    .iter()
                    .map(|var| {
                        let (var, renamed) = avoid_capture(var, vars, &body, name, replacement);
                        body = renamed;
                        var
                    })
                    .collect();
                Ty::ForAll {
                    vars,
                    body: Box::new(sub(&body)),
                }
            }
            Ty::Rec { var, .. } if var == name => self.clone(),
            Ty::Rec { var, body } => {
                let (var, body) = avoid_capture(var, &[], body, name, replacement);
                Ty::Rec {
                    var,
                    body: Box::new(sub(&body)),
                }
            }
            Ty::Tuple(elements) => Ty::Tuple(elements.iter().map(sub).collect()),
            Ty::Sum(left, right) => Ty::sum(sub(left), sub(right)),
            Ty::Record(fields) => Ty::Record(
                fields
                    .iter()
                    .map(|(label, ty)| (label.clone(), sub(ty)))
                    .collect(),
            ),
            Ty::Variant(fields) => Ty::Variant(
                fields
                    .iter()
                    .map(|(label, ty)| (label.clone(), ty.as_ref().map(sub)))
                    .collect(),
            ),
            Ty::List(element) => Ty::list(sub(element)),
            Ty::Ref(referent) => Ty::reference(sub(referent)),
            Ty::Var(_)
            | Ty::Bool
            | Ty::Nat
            | Ty::Unit
            | Ty::Top
            | Ty::Bottom
            | Ty::Never
            | Ty::Unknown
            | Ty::Error => self.clone(),
        }
    }

    /// One-step unfolding of a recursive type: `µX.T` becomes `T[X := µX.T]`.
    ///
    /// Other types are returned unchanged.
    #[must_use]
    pub fn unfold(&self) -> Ty {
        match self {
            Ty::Rec { var, body } => body.substitute(var, self),
            other => other.clone(),
        }
    }

    /// Combines two types that must describe the same value, filling
    /// wildcards in one with the known parts of the other.
    ///
    /// `inl(0)` and `inr(true)` in two branches merge to `Nat + Bool`.
    #[must_use]
    pub fn merge(&self, other: &Ty) -> Ty {
        match (self, other) {
            (Ty::Error, _) | (_, Ty::Error) => Ty::Error,
            (Ty::Never | Ty::Unknown, t) | (t, Ty::Never | Ty::Unknown) => t.clone(),
            (Ty::Sum(l1, r1), Ty::Sum(l2, r2)) => Ty::sum(l1.merge(l2), r1.merge(r2)),
            (Ty::List(a), Ty::List(b)) => Ty::list(a.merge(b)),
            (Ty::Ref(a), Ty::Ref(b)) => Ty::reference(a.merge(b)),
            (Ty::Tuple(a), Ty::Tuple(b)) if a.len() == b.len() => {
                Ty::Tuple(a.iter().zip(b).map(|(x, y)| x.merge(y)).collect())
            }
            (Ty::Fun { params: p1, ret: r1 }, Ty::Fun { params: p2, ret: r2 })
                if p1.len() == p2.len() =>
            {
                Ty::fun(
                    p1.iter().zip(p2).map(|(x, y)| x.merge(y)).collect(),
                    r1.merge(r2),
                )
            }
            (Ty::Variant(a), Ty::Variant(b)) => {
                let mut fields = a.clone();
                for (label, ty) in b {
                    if !fields.iter().any(|(l, _)| l == label) {
                        fields.push((label.clone(), ty.clone()));
                    }
                }
                Ty::Variant(fields)
            }
            (a, _) => a.clone(),
        }
    }

    /// Replaces each of `vars` in `body` with the matching entry of `args`,
    /// all at once: a variable free in one argument is never replaced by a
    /// later one.
    #[must_use]
    pub fn instantiate(vars: &[String], body: &Ty, args: &[Ty]) -> Ty {
        let clashes = |name: &str| args.iter().any(|arg| arg.mentions(name));
        let mut body = body.clone();
        let mut renamed = Vec::with_capacity(vars.len());
        for var in vars {
            if clashes(var) {
                let fresh = fresh_name(var, |candidate| {
                    clashes(candidate)
                        || body.mentions(candidate)
                        || vars.iter().any(|v| v == candidate)
                });
                body = body.substitute(var, &Ty::Var(fresh.clone()));
                renamed.push(fresh);
            } else {
                renamed.push(var.clone());
            }
        }
        renamed
            .iter()
            .zip(args)
            .fold(body, |ty, (var, arg)| ty.substitute(var, arg))
    }

    /// Returns `true` if `name` occurs free in this type.
    #[must_use]
    pub fn mentions(&self, name: &str) -> bool {
        match self {
            Ty::Var(var) => var == name,
            Ty::Fun { params, ret } => {
                params.iter().any(|p| p.mentions(name)) || ret.mentions(name)
            }
            Ty::ForAll { vars, body } => !vars.iter().any(|v| v == name) && body.mentions(name),
            Ty::Rec { var, body } => var != name && body.mentions(name),
            Ty::Tuple(elements) => elements.iter().any(|t| t.mentions(name)),
            Ty::Sum(left, right) => left.mentions(name) || right.mentions(name),
            Ty::Record(fields) => fields.iter().any(|(_, t)| t.mentions(name)),
            Ty::Variant(fields) => fields
                .iter()
                .any(|(_, t)| t.as_ref().is_some_and(|t| t.mentions(name))),
            Ty::List(inner) | Ty::Ref(inner) => inner.mentions(name),
            Ty::Bool
            | Ty::Nat
            | Ty::Unit
            | Ty::Top
            | Ty::Bottom
            | Ty::Never
            | Ty::Unknown
            | Ty::Error => false,
        }
    }
}

/// First name of the form `{base}1`, `{base}2`, ... not already `taken`.
fn fresh_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    (1u32..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Renames the binder `var` of `body` if substituting `name := replacement`
/// under it would capture one of `replacement`'s free variables. The new
/// name differs from every binder in `siblings`.
fn avoid_capture(
    var: &str,
    siblings: &[String],
    body: &Ty,
    name: &str,
    replacement: &Ty,
) -> (String, Ty) {
    if !replacement.mentions(var) || !body.mentions(name) {
        return (var.to_string(), body.clone());
    }
    let fresh = fresh_name(var, |candidate| {
        candidate == name
            || siblings.iter().any(|sibling| sibling == candidate)
            || replacement.mentions(candidate)
            || body.mentions(candidate)
    });
    let renamed = body.substitute(var, &Ty::Var(fresh.clone()));
    (fresh, renamed)
}

/// Renames the binder `a` of `left` and `b` of `right` to one name free in
/// both, so the bodies can be compared directly.
fn rename_both(left: &Ty, a: &str, right: &Ty, b: &str) -> (Ty, Ty) {
    let fresh = Ty::Var(fresh_name("'", |candidate| {
        left.mentions(candidate) || right.mentions(candidate)
    }));
    (left.substitute(a, &fresh), right.substitute(b, &fresh))
}

fn conforms(actual: &Ty, expected: &Ty, sub: bool) -> bool {
    match (actual, expected) {
        (a, e) if a.is_wildcard() || e.is_wildcard() => true,
        (_, Ty::Top) if sub => true,
        (Ty::Bottom, _) if sub => true,

        (Ty::Bool, Ty::Bool)
        | (Ty::Nat, Ty::Nat)
        | (Ty::Unit, Ty::Unit)
        | (Ty::Top, Ty::Top)
        | (Ty::Bottom, Ty::Bottom) => true,

        (Ty::Var(a), Ty::Var(b)) => a == b,

        (Ty::Fun { params: p1, ret: r1 }, Ty::Fun { params: p2, ret: r2 }) => {
            p1.len() == p2.len()
                && p1.iter().zip(p2).all(|(a, e)| conforms(e, a, sub))
                && conforms(r1, r2, sub)
        }

        (Ty::ForAll { vars: v1, body: b1 }, Ty::ForAll { vars: v2, body: b2 }) => {
            v1.len() == v2.len() && {
                let (left, right) = v1.iter().zip(v2).fold(
                    ((**b1).clone(), (**b2).clone()),
                    |(left, right), (a, b)| rename_both(&left, a, &right, b),
                );
                conforms(&left, &right, sub)
            }
        }

        (Ty::Rec { var: v1, body: b1 }, Ty::Rec { var: v2, body: b2 }) => {
            let (left, right) = rename_both(b1, v1, b2, v2);
            conforms(&left, &right, sub)
        }

        (Ty::Tuple(a), Ty::Tuple(e)) => {
            a.len() == e.len() && a.iter().zip(e).all(|(x, y)| conforms(x, y, sub))
        }

        (Ty::Sum(l1, r1), Ty::Sum(l2, r2)) => conforms(l1, l2, sub) && conforms(r1, r2, sub),

        (Ty::Record(actual), Ty::Record(expected)) => {
            (sub || actual.len() == expected.len())
                && expected.iter().all(|(label, ety)| {
                    actual
                        .iter()
                        .find(|(l, _)| l == label)
                        .is_some_and(|(_, aty)| conforms(aty, ety, sub))
                })
        }

        (Ty::Variant(actual), Ty::Variant(expected)) => actual.iter().all(|(label, aty)| {
            expected
                .iter()
                .find(|(l, _)| l == label)
                .is_some_and(|(_, ety)| match (aty, ety) {
                    (Some(a), Some(e)) => conforms(a, e, sub),
                    (None, None) => true,
                    _ => false,
                })
        }),

        (Ty::List(a), Ty::List(e)) => conforms(a, e, sub),

        (Ty::Ref(a), Ty::Ref(e)) => conforms(a, e, sub) && conforms(e, a, sub),

        _ => false,
    }
}
