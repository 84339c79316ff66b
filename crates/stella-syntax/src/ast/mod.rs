//! Abstract Syntax Tree (AST) for the Stella language.
//!
//! The tree is split into five node families, one module each. Every family
//! is a closed set of variant records behind a wrapper that also carries the
//! node's source position.
//!
//! # Design Principles
//!
//! - **Closed families**: adding a variant changes the family's visitor
//!   trait, so every operation over that family stops compiling until it
//!   handles the new case
//! - **Structural identity**: equality and hashing look at variant and
//!   fields only, never at positions
//! - **Write-once positions**: a producer may attach a position once, after
//!   construction
//! - **Owned children**: nodes own their sub-trees and are immutable once
//!   built, so trees can be shared across threads by reference
//!
//! # Modules
//!
//! - [`expr`] - Expression nodes
//! - [`ty`] - Type expressions
//! - [`pat`] - Patterns
//! - [`decl`] - Declarations
//! - [`program`] - Whole programs
//!
//! # Exhaustiveness
//!
//! A visitor that forgets a variant is rejected at compile time:
//!
//! ```compile_fail
//! use stella_syntax::ast::pat::*;
//! use stella_syntax::span::Position;
//!
//! struct OnlyVars;
//!
//! impl<'ast> PatternVisitor<'ast, ()> for OnlyVars {
//!     type Output = bool;
//!
//!     fn visit_var(&mut self, _: &'ast Var, _: Option<Position>, _: ()) -> bool {
//!         true
//!     }
//! }
//! ```

#[macro_use]
mod macros;

pub mod decl;
pub mod expr;
pub mod pat;
pub mod program;
pub mod ty;

// Re-exports for convenience
pub use decl::{Decl, DeclKind, DeclVisitor};
pub use expr::{Expr, ExprKind, ExprVisitor};
pub use pat::{Pattern, PatternKind, PatternVisitor};
pub use program::{Program, ProgramKind, ProgramVisitor};
pub use ty::{Type, TypeKind, TypeVisitor};
