//! Type expressions in the Stella AST.
//!
//! These are types as written in source. The type checker lowers them into
//! its own semantic representation.

node_family! {
    /// A type expression.
    family Type(TypeKind) visited by TypeVisitor;

    /// `auto`, to be inferred
    Auto => visit_auto {}

    /// Function type: `fn(T1, T2) -> R`
    Fun => visit_fun {
        /// Parameter types
        params: Vec<Type>,
        /// Return type
        ret: Box<Type>,
    }

    /// Universal type: `forall X, Y. T`
    ForAll => visit_for_all {
        /// Bound type variables
        generics: Vec<String>,
        /// Body
        body: Box<Type>,
    }

    /// Recursive type: `µ X. T`
    Rec => visit_rec {
        /// Bound type variable
        var: String,
        /// Body
        body: Box<Type>,
    }

    /// Sum type: `T1 + T2`
    Sum => visit_sum {
        /// Left alternative
        left: Box<Type>,
        /// Right alternative
        right: Box<Type>,
    }

    /// Tuple type: `{T1, T2}`
    Tuple => visit_tuple {
        /// Component types
        elements: Vec<Type>,
    }

    /// Record type: `{a : T1, b : T2}`
    Record => visit_record {
        /// Field types
        fields: Vec<RecordFieldType>,
    }

    /// Variant type: `<| a : T1, b |>`
    Variant => visit_variant {
        /// Variant alternatives
        fields: Vec<VariantFieldType>,
    }

    /// List type: `[T]`
    List => visit_list {
        /// Element type
        element: Box<Type>,
    }

    /// `Bool`
    Bool => visit_bool {}

    /// `Nat`
    Nat => visit_nat {}

    /// `Unit`
    Unit => visit_unit {}

    /// `Top`
    Top => visit_top {}

    /// `Bot`
    Bottom => visit_bottom {}

    /// Reference type: `&T`
    Ref => visit_ref {
        /// Referenced type
        referent: Box<Type>,
    }

    /// Type variable or alias name
    Var => visit_var {
        /// The name
        name: String,
    }
}

/// A record field type: `label : T`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordFieldType {
    /// Field label
    pub label: String,
    /// Field type
    pub ty: Type,
}

impl RecordFieldType {
    /// Creates a record field type.
    #[must_use]
    pub fn new(label: impl Into<String>, ty: Type) -> Self {
        Self {
            label: label.into(),
            ty,
        }
    }
}

/// A variant alternative: `label : T` or a bare `label`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantFieldType {
    /// Alternative label
    pub label: String,
    /// Payload type, `None` for a nullary alternative
    pub ty: Option<Type>,
}

impl VariantFieldType {
    /// Creates a variant alternative.
    #[must_use]
    pub fn new(label: impl Into<String>, ty: Option<Type>) -> Self {
        Self {
            label: label.into(),
            ty,
        }
    }
}
