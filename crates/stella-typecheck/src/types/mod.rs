//! Type representation and operations.
//!
//! This module defines the semantic types used during type checking:
//!
//! - **Ty**: Types after alias resolution, plus checker-only wildcards
//! - **Operations**: Conformance, subtyping, substitution, unfolding
//! - **Display**: Stella syntax for error messages

pub mod display;
pub mod ty;

pub use ty::Ty;
