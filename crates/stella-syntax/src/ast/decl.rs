//! Top-level and local declarations.

use crate::ast::expr::{Expr, ParamDecl};
use crate::ast::ty::Type;
use std::fmt;

node_family! {
    /// A declaration.
    family Decl(DeclKind) visited by DeclVisitor;

    /// Function declaration
    ///
    /// ```text
    /// inline fn name(x : T) -> R throws E { decls; return body }
    /// ```
    Fun => visit_fun {
        /// Modifiers such as `inline`
        annotations: Vec<Annotation>,
        /// Function name
        name: String,
        /// Parameters
        params: Vec<ParamDecl>,
        /// Declared return type, if any
        return_type: Option<Type>,
        /// Types listed after `throws`
        throw_types: Vec<Type>,
        /// Nested declarations
        locals: Vec<Decl>,
        /// Returned expression
        body: Box<Expr>,
    }

    /// Generic function declaration: `generic fn name[X](x : X) -> X { ... }`
    FunGeneric => visit_fun_generic {
        /// Modifiers such as `inline`
        annotations: Vec<Annotation>,
        /// Function name
        name: String,
        /// Type parameters
        generics: Vec<String>,
        /// Parameters
        params: Vec<ParamDecl>,
        /// Declared return type, if any
        return_type: Option<Type>,
        /// Types listed after `throws`
        throw_types: Vec<Type>,
        /// Nested declarations
        locals: Vec<Decl>,
        /// Returned expression
        body: Box<Expr>,
    }

    /// `type Name = T`
    TypeAlias => visit_type_alias {
        /// Alias name
        name: String,
        /// Aliased type
        ty: Type,
    }

    /// `exception type = T`
    ExceptionType => visit_exception_type {
        /// Type of thrown values
        ty: Type,
    }

    /// `exception variant label : T`
    ExceptionVariant => visit_exception_variant {
        /// Alternative label
        label: String,
        /// Payload type
        ty: Type,
    }
}

impl Decl {
    /// Name introduced by the declaration, if it introduces one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self.kind() {
            DeclKind::Fun(fun) => Some(&fun.name),
            DeclKind::FunGeneric(fun) => Some(&fun.name),
            DeclKind::TypeAlias(alias) => Some(&alias.name),
            DeclKind::ExceptionType(_) | DeclKind::ExceptionVariant(_) => None,
        }
    }
}

/// Function modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// `inline`
    Inline,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Inline => f.write_str("inline"),
        }
    }
}
