//! Type checking context.
//!
//! - **Scope**: lexical environment of term and type variables

pub mod env;

pub use env::Scope;
