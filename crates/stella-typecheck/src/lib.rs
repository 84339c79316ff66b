//! Stella Type Checker
//!
//! A type checker for Stella programs, written as a set of visitors over the
//! `stella-syntax` AST. It covers the core language and the common
//! extensions:
//! - Sum, tuple, record, variant, list and reference types
//! - Pattern matching with exhaustiveness checking
//! - Exceptions (`throw`, `try`/`catch`, `try`/`with`, `panic!`)
//! - Universal types (`generic fn`, `forall`) and recursive types (`µ`)
//! - Structural subtyping when `#structural-subtyping` is enabled
//!
//! # Example
//!
//! ```
//! use stella_syntax::build::*;
//! use stella_typecheck::{check_program, TypeError};
//!
//! let ok = program(vec![fun_decl("main", vec![param("n", nat())], nat(), var("n"))]);
//! assert!(check_program(&ok).is_ok());
//!
//! let bad = program(vec![fun_decl("main", vec![param("n", nat())], bool_ty(), var("n"))]);
//! let errors = check_program(&bad).unwrap_err();
//! assert!(matches!(errors[0], TypeError::Mismatch { .. }));
//! ```

#![warn(missing_docs)]

pub mod check;
pub mod context;
pub mod diagnostic;
pub mod error;
pub mod types;

pub use check::{CheckOptions, TypeChecker};
pub use context::Scope;
pub use diagnostic::{Diagnostic, DiagnosticLevel, Emitter};
pub use error::TypeError;
pub use types::Ty;

use stella_syntax::Program;

/// Type check a program with default options.
///
/// # Errors
///
/// Returns every type error in the program.
pub fn check_program(program: &Program) -> Result<(), Vec<TypeError>> {
    TypeChecker::new().check(program)
}
