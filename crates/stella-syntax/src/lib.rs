//! Stella Syntax: AST, dispatch and structural identity
//!
//! This crate provides the abstract syntax tree for the Stella language:
//! - Node families for expressions, types, patterns, declarations and programs
//! - One visitor trait per family, checked for exhaustiveness at compile time
//! - Structural equality and hashing that ignore source positions
//! - Write-once source positions
//! - A pretty-printer, a post-order walker and structural memo tables
//!
//! # Modules
//!
//! - [`ast`] - Node families and visitor traits
//! - [`span`] - Source positions and node metadata
//! - [`build`] - Shorthand constructors
//! - [`walk`] - Post-order traversal
//! - [`pretty`] - Conversion back to Stella syntax
//! - [`memo`] - Memo tables keyed by structure
//!
//! # Examples
//!
//! ## Building a tree and attaching a position
//!
//! ```
//! use stella_syntax::build::{int, throw};
//! use stella_syntax::span::Position;
//!
//! let mut node = throw(int(5));
//! assert!(node.set_position(Position::new(4, 9, 61)));
//! assert_eq!(node.position(), Some(Position::new(4, 9, 61)));
//!
//! // The position does not take part in equality.
//! assert_eq!(node, throw(int(5)));
//! ```
//!
//! ## Writing an operation
//!
//! ```
//! use stella_syntax::ast::pat::{self, Pattern, PatternVisitor};
//! use stella_syntax::build::{p_inl, p_tuple, p_var};
//! use stella_syntax::span::Position;
//!
//! /// Counts variable bindings in a pattern.
//! struct Binders;
//!
//! type Pos = Option<Position>;
//!
//! impl<'ast> PatternVisitor<'ast, ()> for Binders {
//!     type Output = usize;
//!
//!     fn visit_cast_as(&mut self, n: &'ast pat::CastAs, _: Pos, _: ()) -> usize {
//!         n.pattern.accept(self, ())
//!     }
//!     fn visit_asc(&mut self, n: &'ast pat::Asc, _: Pos, _: ()) -> usize {
//!         n.pattern.accept(self, ())
//!     }
//!     fn visit_variant(&mut self, n: &'ast pat::Variant, _: Pos, _: ()) -> usize {
//!         n.data.as_ref().map_or(0, |p| p.accept(self, ()))
//!     }
//!     fn visit_inl(&mut self, n: &'ast pat::Inl, _: Pos, _: ()) -> usize {
//!         n.pattern.accept(self, ())
//!     }
//!     fn visit_inr(&mut self, n: &'ast pat::Inr, _: Pos, _: ()) -> usize {
//!         n.pattern.accept(self, ())
//!     }
//!     fn visit_tuple(&mut self, n: &'ast pat::Tuple, _: Pos, _: ()) -> usize {
//!         n.elements.iter().map(|p| p.accept(self, ())).sum()
//!     }
//!     fn visit_record(&mut self, n: &'ast pat::Record, _: Pos, _: ()) -> usize {
//!         n.fields.iter().map(|f| f.pattern.accept(self, ())).sum()
//!     }
//!     fn visit_list(&mut self, n: &'ast pat::List, _: Pos, _: ()) -> usize {
//!         n.elements.iter().map(|p| p.accept(self, ())).sum()
//!     }
//!     fn visit_cons(&mut self, n: &'ast pat::Cons, _: Pos, _: ()) -> usize {
//!         n.head.accept(self, ()) + n.tail.accept(self, ())
//!     }
//!     fn visit_false(&mut self, _: &'ast pat::False, _: Pos, _: ()) -> usize { 0 }
//!     fn visit_true(&mut self, _: &'ast pat::True, _: Pos, _: ()) -> usize { 0 }
//!     fn visit_unit(&mut self, _: &'ast pat::Unit, _: Pos, _: ()) -> usize { 0 }
//!     fn visit_int(&mut self, _: &'ast pat::Int, _: Pos, _: ()) -> usize { 0 }
//!     fn visit_succ(&mut self, n: &'ast pat::Succ, _: Pos, _: ()) -> usize {
//!         n.pattern.accept(self, ())
//!     }
//!     fn visit_var(&mut self, _: &'ast pat::Var, _: Pos, _: ()) -> usize { 1 }
//! }
//!
//! let pattern: Pattern = p_tuple(vec![p_var("a"), p_inl(p_var("b"))]);
//! assert_eq!(pattern.accept(&mut Binders, ()), 2);
//! ```

#![warn(missing_docs)]

// Public modules
pub mod ast;
pub mod build;
pub mod memo;
pub mod pretty;
pub mod span;
pub mod walk;

// Re-exports for convenience
pub use ast::{Decl, Expr, Pattern, Program, Type};
pub use memo::{MemoStats, StructuralMemo, find_duplicates};
pub use pretty::{PrettyConfig, PrettyPrinter};
pub use span::{Located, NodeMeta, Position};
pub use walk::{NodeRef, PostOrder};
