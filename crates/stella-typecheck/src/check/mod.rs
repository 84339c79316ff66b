//! The type checker.
//!
//! [`TypeChecker`] is a set of visitors over the Stella AST, one per node
//! family:
//!
//! - Types: lowering of annotations to [`Ty`] (`ty.rs`)
//! - Expressions: type synthesis (`expr.rs`)
//! - Patterns: checking against the scrutinee type and collecting bindings
//!   (`pat.rs`), plus match exhaustiveness (`exhaustive.rs`)
//! - Declarations and programs: signature collection and body checking
//!   (`decl.rs`, `program.rs`)
//!
//! Errors are collected rather than returned early. A failing node reports
//! its error and synthesises [`Ty::Error`], which conforms to everything, so
//! checking continues with its siblings.

pub mod decl;
pub mod exhaustive;
pub mod expr;
pub mod pat;
pub mod program;
pub mod ty;

use crate::context::Scope;
use crate::error::TypeError;
use crate::types::Ty;
use hashbrown::HashMap;
use stella_syntax::ast::{Expr, Pattern, Program, Type};
use stella_syntax::{MemoStats, Position, StructuralMemo};

/// Checker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckOptions {
    /// Stop at the first error.
    pub fail_fast: bool,
    /// Stop once this many errors have been reported.
    pub max_errors: Option<usize>,
}

/// Type checker for a single program.
///
/// # Example
///
/// ```
/// use stella_syntax::build::*;
/// use stella_typecheck::TypeChecker;
///
/// let program = program(vec![fun_decl(
///     "main",
///     vec![param("n", nat())],
///     nat(),
///     succ(var("n")),
/// )]);
///
/// let mut checker = TypeChecker::new();
/// assert!(checker.check(&program).is_ok());
/// ```
pub struct TypeChecker<'ast> {
    options: CheckOptions,
    errors: Vec<TypeError>,
    halted: bool,
    /// `#structural-subtyping` is enabled.
    subtyping: bool,
    aliases: HashMap<String, Ty>,
    exception_type: Option<Ty>,
    exception_variants: Vec<(String, Option<Ty>)>,
    /// Variables bound by `forall`/`µ` while lowering a type.
    type_binders: Vec<String>,
    type_cache: StructuralMemo<'ast, Type, Ty>,
}

impl<'ast> TypeChecker<'ast> {
    /// Create a checker with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(CheckOptions::default())
    }

    /// Create a checker with the given options.
    #[must_use]
    pub fn with_options(options: CheckOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
            halted: false,
            subtyping: false,
            aliases: HashMap::new(),
            exception_type: None,
            exception_variants: Vec::new(),
            type_binders: Vec::new(),
            type_cache: StructuralMemo::new(),
        }
    }

    /// Check a whole program.
    ///
    /// # Errors
    ///
    /// Returns every error found, in the order they were reported.
    pub fn check(&mut self, program: &'ast Program) -> Result<(), Vec<TypeError>> {
        let mut scope = Scope::new();
        program.accept(self, &mut scope);

        let errors = std::mem::take(&mut self.errors);
        stella_log::info!(
            "checked {} declarations: {} errors",
            program.decls().len(),
            errors.len()
        );
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Synthesise the type of an expression in `scope`.
    pub fn synth(&mut self, expr: &'ast Expr, scope: &mut Scope) -> Ty {
        if self.halted {
            return Ty::Error;
        }
        expr.accept(self, scope)
    }

    /// Errors reported so far and not yet returned by [`Self::check`].
    #[must_use]
    pub fn errors(&self) -> &[TypeError] {
        &self.errors
    }

    /// Hit/miss counters of the annotation lowering cache.
    #[must_use]
    pub fn type_cache_stats(&self) -> MemoStats {
        self.type_cache.stats()
    }

    /// Enable or disable `#structural-subtyping` rules.
    pub fn set_subtyping(&mut self, enabled: bool) {
        self.subtyping = enabled;
    }

    /// Records an error and returns the type a failing node synthesises.
    fn report(&mut self, error: TypeError) -> Ty {
        if self.halted {
            return Ty::Error;
        }

        stella_log::debug!("{}: {}", error.code(), error);
        self.errors.push(error);

        let limit_reached = self
            .options
            .max_errors
            .is_some_and(|max| self.errors.len() >= max);
        if self.options.fail_fast || limit_reached {
            stella_log::trace!("halting after {} errors", self.errors.len());
            self.halted = true;
        }
        Ty::Error
    }

    /// Reports a mismatch unless `found` conforms to `expected`.
    fn require(&mut self, found: &Ty, expected: &Ty, position: Option<Position>) {
        if !found.conforms_to(expected, self.subtyping) {
            self.report(TypeError::Mismatch {
                expected: expected.clone(),
                found: found.clone(),
                position,
            });
        }
    }

    /// Synthesises `expr` and requires the result to conform to `expected`.
    fn expect(&mut self, expr: &'ast Expr, expected: &Ty, scope: &mut Scope) -> Ty {
        let found = self.synth(expr, scope);
        self.require(&found, expected, expr.position());
        found
    }

    /// Joins the types of two alternatives (if branches, match arms), which
    /// must agree up to wildcards.
    ///
    /// Variant literals are open, so two variant types join to the union of
    /// their labels as long as the labels they share carry compatible
    /// payloads.
    fn join(&mut self, first: &Ty, second: &Ty, position: Option<Position>) -> Ty {
        let subtyping = self.subtyping;
        let related = |a: &Ty, b: &Ty| a.conforms_to(b, subtyping) || b.conforms_to(a, subtyping);
        let compatible = match (first, second) {
            (Ty::Variant(left), Ty::Variant(right)) => left.iter().all(|(label, payload)| {
                right
                    .iter()
                    .find(|(other, _)| other == label)
                    .is_none_or(|(_, other)| match (payload, other) {
                        (Some(a), Some(b)) => related(a, b),
                        (None, None) => true,
                        _ => false,
                    })
            }),
            _ => related(first, second),
        };

        if compatible {
            first.merge(second)
        } else {
            self.report(TypeError::Mismatch {
                expected: first.clone(),
                found: second.clone(),
                position,
            })
        }
    }

    /// Checks `pattern` against `ty`, returning the variables it binds.
    fn check_pattern(
        &mut self,
        pattern: &'ast Pattern,
        ty: &Ty,
        scope: &Scope,
    ) -> Vec<(String, Ty)> {
        if self.halted {
            return Vec::new();
        }
        pattern.accept(self, (ty, scope))
    }

    /// The type of thrown values, if the program declares one.
    fn exception_type(&self) -> Option<Ty> {
        if let Some(ty) = &self.exception_type {
            return Some(ty.clone());
        }
        if self.exception_variants.is_empty() {
            None
        } else {
            Some(Ty::Variant(self.exception_variants.clone()))
        }
    }
}

impl Default for TypeChecker<'_> {
    fn default() -> Self {
        Self::new()
    }
}
