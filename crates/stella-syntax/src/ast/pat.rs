//! Patterns in the Stella AST.
//!
//! Patterns appear in `match` cases, `let` bindings and exception handlers.

use crate::ast::ty::Type;

node_family! {
    /// A pattern.
    family Pattern(PatternKind) visited by PatternVisitor;

    /// `p cast as T`
    CastAs => visit_cast_as {
        /// Inner pattern
        pattern: Box<Pattern>,
        /// Target type
        ty: Type,
    }

    /// `p as T`
    Asc => visit_asc {
        /// Inner pattern
        pattern: Box<Pattern>,
        /// Ascribed type
        ty: Type,
    }

    /// `<| label = p |>` or `<| label |>`
    Variant => visit_variant {
        /// Variant label
        label: String,
        /// Optional payload pattern
        data: Option<Box<Pattern>>,
    }

    /// `inl(p)`
    Inl => visit_inl {
        /// Payload pattern
        pattern: Box<Pattern>,
    }

    /// `inr(p)`
    Inr => visit_inr {
        /// Payload pattern
        pattern: Box<Pattern>,
    }

    /// `{p1, p2}`
    Tuple => visit_tuple {
        /// Component patterns
        elements: Vec<Pattern>,
    }

    /// `{a = p1, b = p2}`
    Record => visit_record {
        /// Field patterns
        fields: Vec<LabelledPattern>,
    }

    /// `[p1, p2]`
    List => visit_list {
        /// Element patterns
        elements: Vec<Pattern>,
    }

    /// `cons(h, t)`
    Cons => visit_cons {
        /// Head pattern
        head: Box<Pattern>,
        /// Tail pattern
        tail: Box<Pattern>,
    }

    /// `false`
    False => visit_false {}

    /// `true`
    True => visit_true {}

    /// `unit`
    Unit => visit_unit {}

    /// Natural number literal
    Int => visit_int {
        /// The value
        value: u64,
    }

    /// `succ(p)`
    Succ => visit_succ {
        /// Predecessor pattern
        pattern: Box<Pattern>,
    }

    /// Variable binding
    Var => visit_var {
        /// Bound name
        name: String,
    }
}

/// A record field pattern: `label = p`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelledPattern {
    /// Field label
    pub label: String,
    /// Pattern for the field
    pub pattern: Pattern,
}

impl LabelledPattern {
    /// Creates a record field pattern.
    #[must_use]
    pub fn new(label: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            label: label.into(),
            pattern,
        }
    }
}
