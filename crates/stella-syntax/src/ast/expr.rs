//! Expression nodes in the Stella AST.
//!
//! One record per expression form of the language. Sub-expressions are owned
//! through `Box`/`Vec`, so a tree never shares a child between two parents.
//!
//! # Examples
//!
//! ```
//! use stella_syntax::ast::expr::{ConstInt, Expr, Throw, TypeCast};
//! use stella_syntax::ast::ty::{Nat, Type};
//!
//! let five = Expr::from(ConstInt::new(5));
//! let thrown = Expr::from(Throw::new(Box::new(five.clone())));
//! let cast = Expr::from(TypeCast::new(Box::new(five), Type::from(Nat::new())));
//!
//! assert_eq!(thrown.variant_name(), "Throw");
//! assert_ne!(thrown, cast);
//! ```

use crate::ast::pat::Pattern;
use crate::ast::ty::Type;
use std::fmt;

node_family! {
    /// An expression.
    ///
    /// Structural fields are fixed at construction; only the position can be
    /// attached afterwards.
    family Expr(ExprKind) visited by ExprVisitor;

    /// Sequencing: `e1; e2`
    Sequence => visit_sequence {
        /// Evaluated for its effect
        first: Box<Expr>,
        /// Provides the value
        second: Box<Expr>,
    }

    /// Reference assignment: `e1 := e2`
    Assign => visit_assign {
        /// The reference being written
        target: Box<Expr>,
        /// The stored value
        value: Box<Expr>,
    }

    /// Conditional: `if c then a else b`
    If => visit_if {
        /// Condition
        condition: Box<Expr>,
        /// Value when the condition holds
        then_branch: Box<Expr>,
        /// Value otherwise
        else_branch: Box<Expr>,
    }

    /// Let binding: `let p = e in body`
    Let => visit_let {
        /// Bindings, in order
        bindings: Vec<PatternBinding>,
        /// Scope of the bindings
        body: Box<Expr>,
    }

    /// Recursive let binding: `letrec p = e in body`
    LetRec => visit_let_rec {
        /// Bindings, visible in their own right-hand sides
        bindings: Vec<PatternBinding>,
        /// Scope of the bindings
        body: Box<Expr>,
    }

    /// Generic abstraction: `generic [X, Y] e`
    TypeAbstraction => visit_type_abstraction {
        /// Type parameters
        generics: Vec<String>,
        /// Body
        body: Box<Expr>,
    }

    /// Binary operator: `a + b`, `a < b`, `a and b`, ...
    Binary => visit_binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    }

    /// Type ascription: `e as T`
    TypeAsc => visit_type_asc {
        /// Ascribed expression
        expr: Box<Expr>,
        /// Asserted type
        ty: Type,
    }

    /// Type cast: `e cast as T`
    TypeCast => visit_type_cast {
        /// Cast expression
        expr: Box<Expr>,
        /// Target type
        ty: Type,
    }

    /// Anonymous function: `fn(x : T) { return e }`
    Abstraction => visit_abstraction {
        /// Parameters
        params: Vec<ParamDecl>,
        /// Returned expression
        body: Box<Expr>,
    }

    /// Variant injection: `<| label = e |>` or `<| label |>`
    Variant => visit_variant {
        /// Variant label
        label: String,
        /// Optional payload
        data: Option<Box<Expr>>,
    }

    /// Pattern match: `match e { p => e, ... }`
    Match => visit_match {
        /// Matched value
        scrutinee: Box<Expr>,
        /// Cases, tried in order
        cases: Vec<MatchCase>,
    }

    /// List literal: `[e1, e2]`
    List => visit_list {
        /// Elements
        elements: Vec<Expr>,
    }

    /// Reference allocation: `new(e)`
    Ref => visit_ref {
        /// Initial contents
        init: Box<Expr>,
    }

    /// Dereference: `*e`
    Deref => visit_deref {
        /// The reference
        reference: Box<Expr>,
    }

    /// Function application: `f(e1, e2)`
    Application => visit_application {
        /// Callee
        function: Box<Expr>,
        /// Arguments
        args: Vec<Expr>,
    }

    /// Type application: `f [T1, T2]`
    TypeApplication => visit_type_application {
        /// Generic callee
        function: Box<Expr>,
        /// Type arguments
        types: Vec<Type>,
    }

    /// Record projection: `e.label`
    DotRecord => visit_dot_record {
        /// Record value
        record: Box<Expr>,
        /// Field label
        label: String,
    }

    /// Tuple projection: `e.1` (1-based)
    DotTuple => visit_dot_tuple {
        /// Tuple value
        tuple: Box<Expr>,
        /// 1-based component index
        index: u64,
    }

    /// Tuple literal: `{e1, e2}`
    Tuple => visit_tuple {
        /// Components
        elements: Vec<Expr>,
    }

    /// Record literal: `{a = e1, b = e2}`
    Record => visit_record {
        /// Field bindings
        bindings: Vec<Binding>,
    }

    /// List construction: `cons(h, t)`
    ConsList => visit_cons_list {
        /// Head element
        head: Box<Expr>,
        /// Tail list
        tail: Box<Expr>,
    }

    /// `List::head(e)`
    Head => visit_head {
        /// The list
        list: Box<Expr>,
    }

    /// `List::isempty(e)`
    IsEmpty => visit_is_empty {
        /// The list
        list: Box<Expr>,
    }

    /// `List::tail(e)`
    Tail => visit_tail {
        /// The list
        list: Box<Expr>,
    }

    /// `panic!`
    Panic => visit_panic {}

    /// Raise an exception: `throw(e)`
    Throw => visit_throw {
        /// The exception value
        expr: Box<Expr>,
    }

    /// `try { e } catch { p => handler }`
    TryCatch => visit_try_catch {
        /// Protected expression
        body: Box<Expr>,
        /// Pattern for the caught exception
        pattern: Pattern,
        /// Handler
        handler: Box<Expr>,
    }

    /// `try { e } with { fallback }`
    TryWith => visit_try_with {
        /// Protected expression
        body: Box<Expr>,
        /// Value used when the body throws
        fallback: Box<Expr>,
    }

    /// `try { e } cast as T { p => ok } with { err }`
    TryCastAs => visit_try_cast_as {
        /// Cast expression
        expr: Box<Expr>,
        /// Target type
        ty: Type,
        /// Binds the cast value
        pattern: Pattern,
        /// Value when the cast succeeds
        on_success: Box<Expr>,
        /// Value when the cast fails
        on_failure: Box<Expr>,
    }

    /// Left injection: `inl(e)`
    Inl => visit_inl {
        /// Injected value
        expr: Box<Expr>,
    }

    /// Right injection: `inr(e)`
    Inr => visit_inr {
        /// Injected value
        expr: Box<Expr>,
    }

    /// `succ(e)`
    Succ => visit_succ {
        /// Operand
        expr: Box<Expr>,
    }

    /// `not(e)`
    LogicNot => visit_logic_not {
        /// Operand
        expr: Box<Expr>,
    }

    /// `Nat::pred(e)`
    Pred => visit_pred {
        /// Operand
        expr: Box<Expr>,
    }

    /// `Nat::iszero(e)`
    IsZero => visit_is_zero {
        /// Operand
        expr: Box<Expr>,
    }

    /// Fixpoint: `fix(e)`
    Fix => visit_fix {
        /// Function to take the fixpoint of
        expr: Box<Expr>,
    }

    /// Primitive recursion: `Nat::rec(n, z, s)`
    NatRec => visit_nat_rec {
        /// Number of iterations
        count: Box<Expr>,
        /// Initial value
        initial: Box<Expr>,
        /// Step function `fn(Nat) { fn(T) { T } }`
        step: Box<Expr>,
    }

    /// `fold [T] e`
    Fold => visit_fold {
        /// Recursive type being folded into
        ty: Type,
        /// Unfolded value
        expr: Box<Expr>,
    }

    /// `unfold [T] e`
    Unfold => visit_unfold {
        /// Recursive type being unfolded
        ty: Type,
        /// Folded value
        expr: Box<Expr>,
    }

    /// `true`
    ConstTrue => visit_const_true {}

    /// `false`
    ConstFalse => visit_const_false {}

    /// `unit`
    ConstUnit => visit_const_unit {}

    /// Natural number literal
    ConstInt => visit_const_int {
        /// The value
        value: u64,
    }

    /// Memory address literal: `<0x1F>`
    ConstMemory => visit_const_memory {
        /// The address
        address: u64,
    }

    /// Variable reference
    Var => visit_var {
        /// Referenced name
        name: String,
    }
}

impl Expr {
    /// Returns `true` for nodes without sub-expressions, types or patterns.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(
            self.kind(),
            ExprKind::ConstTrue(_)
                | ExprKind::ConstFalse(_)
                | ExprKind::ConstUnit(_)
                | ExprKind::ConstInt(_)
                | ExprKind::ConstMemory(_)
                | ExprKind::Var(_)
                | ExprKind::Panic(_)
        )
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `or`
    LogicOr,
    /// `and`
    LogicAnd,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
}

impl BinaryOp {
    /// Returns `true` for `<`, `<=`, `>`, `>=`, `==` and `!=`.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::LessThan
                | Self::LessThanOrEqual
                | Self::GreaterThan
                | Self::GreaterThanOrEqual
                | Self::Equal
                | Self::NotEqual
        )
    }

    /// Returns `true` for `and` and `or`.
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::LogicAnd | Self::LogicOr)
    }

    /// Binding strength; higher binds tighter.
    ///
    /// Comparisons sit below additive operators, which sit below
    /// multiplicative ones, matching the Stella grammar's precedence levels.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::LessThan
            | Self::LessThanOrEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::Equal
            | Self::NotEqual => 1,
            Self::Add | Self::Subtract | Self::LogicOr => 2,
            Self::Multiply | Self::Divide | Self::LogicAnd => 3,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::LogicOr => "or",
            Self::LogicAnd => "and",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        })
    }
}

/// A function parameter: `x : T`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamDecl {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub ty: Type,
}

impl ParamDecl {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A match case: `pattern => body`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchCase {
    /// Pattern tested against the scrutinee
    pub pattern: Pattern,
    /// Value of the case
    pub body: Expr,
}

impl MatchCase {
    /// Creates a match case.
    #[must_use]
    pub fn new(pattern: Pattern, body: Expr) -> Self {
        Self { pattern, body }
    }
}

/// A record field binding: `label = expr`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    /// Field label
    pub name: String,
    /// Field value
    pub expr: Expr,
}

impl Binding {
    /// Creates a record field binding.
    #[must_use]
    pub fn new(name: impl Into<String>, expr: Expr) -> Self {
        Self {
            name: name.into(),
            expr,
        }
    }
}

/// A `let` binding: `pattern = expr`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternBinding {
    /// Bound pattern
    pub pattern: Pattern,
    /// Bound value
    pub expr: Expr,
}

impl PatternBinding {
    /// Creates a `let` binding.
    #[must_use]
    pub fn new(pattern: Pattern, expr: Expr) -> Self {
        Self { pattern, expr }
    }
}
