//! The `node_family!` macro.
//!
//! Every syntactic category is written down once, as a list of variants and
//! their fields. From that list the macro generates:
//!
//! - one record struct per variant, with public fields and a `new` constructor
//! - the `*Kind` enum over those records
//! - the family wrapper (kind plus [`NodeMeta`](crate::span::NodeMeta))
//!   with `accept`, position access and `From` conversions
//! - the family's visitor trait, with one required method per variant
//!
//! Equality and hashing are derived on all of them, so they follow the field
//! lists automatically.

macro_rules! node_family {
    (
        $(#[$family_attr:meta])*
        family $family:ident($kind:ident) visited by $visitor:ident;
        $(
            $(#[$variant_attr:meta])*
            $variant:ident => $visit:ident {
                $(
                    $(#[$field_attr:meta])*
                    $field:ident : $field_ty:ty
                ),* $(,)?
            }
        )+
    ) => {
        $(
            $(#[$variant_attr])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash)]
            pub struct $variant {
                $(
                    $(#[$field_attr])*
                    pub $field: $field_ty,
                )*
            }

            impl $variant {
                #[doc = concat!("Creates a `", stringify!($variant), "` node.")]
                #[must_use]
                #[allow(clippy::new_without_default, clippy::too_many_arguments)]
                pub fn new($($field: $field_ty),*) -> Self {
                    Self { $($field),* }
                }
            }

            impl From<$variant> for $kind {
                fn from(node: $variant) -> Self {
                    $kind::$variant(node)
                }
            }

            impl From<$variant> for $family {
                fn from(node: $variant) -> Self {
                    $family::new($kind::$variant(node))
                }
            }
        )+

        #[doc = concat!("The closed set of [`", stringify!($family), "`] variants.")]
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $kind {
            $(
                #[doc = concat!("See [`", stringify!($variant), "`].")]
                $variant($variant),
            )+
        }

        impl $kind {
            /// Name of the variant, for logs and diagnostics.
            #[must_use]
            pub const fn variant_name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )+
                }
            }
        }

        $(#[$family_attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $family {
            kind: $kind,
            meta: $crate::span::NodeMeta,
        }

        impl $family {
            /// Wraps a variant into a node with no position attached.
            #[must_use]
            pub const fn new(kind: $kind) -> Self {
                Self {
                    kind,
                    meta: $crate::span::NodeMeta::new(),
                }
            }

            /// The node's variant.
            #[must_use]
            pub const fn kind(&self) -> &$kind {
                &self.kind
            }

            /// Name of the node's variant.
            #[must_use]
            pub const fn variant_name(&self) -> &'static str {
                self.kind.variant_name()
            }

            /// The position attached by the producer, if any.
            #[must_use]
            pub const fn position(&self) -> Option<$crate::span::Position> {
                self.meta.position()
            }

            /// Attaches a position. Only the first call has an effect; later
            /// calls return `false` and keep the original position.
            pub fn set_position(&mut self, position: $crate::span::Position) -> bool {
                self.meta.set_position(position)
            }

            /// Consuming form of [`Self::set_position`] for producers.
            #[must_use]
            pub fn at(mut self, position: $crate::span::Position) -> Self {
                self.meta.set_position(position);
                self
            }

            /// Dispatches to the visitor method of this node's variant.
            pub fn accept<'ast, A, V>(&'ast self, visitor: &mut V, arg: A) -> V::Output
            where
                V: $visitor<'ast, A> + ?Sized,
            {
                let position = self.meta.position();
                match &self.kind {
                    $( $kind::$variant(node) => visitor.$visit(node, position, arg), )+
                }
            }
        }

        impl From<$kind> for $family {
            fn from(kind: $kind) -> Self {
                $family::new(kind)
            }
        }

        impl $crate::span::Located for $family {
            fn position(&self) -> Option<$crate::span::Position> {
                self.meta.position()
            }
        }

        #[doc = concat!(
            "An operation over [`", stringify!($family), "`] nodes.\n\n",
            "There is one method per variant and none has a default body, so ",
            "adding a variant breaks every implementation until it handles it. ",
            "`A` is the auxiliary argument threaded through [`",
            stringify!($family), "::accept`]."
        )]
        pub trait $visitor<'ast, A> {
            /// Result of the operation for one node.
            type Output;

            $(
                #[doc = concat!("Handles a [`", stringify!($variant), "`] node.")]
                fn $visit(
                    &mut self,
                    node: &'ast $variant,
                    position: Option<$crate::span::Position>,
                    arg: A,
                ) -> Self::Output;
            )+
        }
    };
}
