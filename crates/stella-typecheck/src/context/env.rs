//! Lexical scope for type checking.
//!
//! The scope is a stack of frames. Each frame maps variable names to their
//! types and records the generic type variables introduced at that level.
//! Inner frames shadow outer ones.
//!
//! # Example
//!
//! ```
//! use stella_typecheck::context::Scope;
//! use stella_typecheck::types::Ty;
//!
//! let mut scope = Scope::new();
//! scope.bind("n", Ty::Nat);
//!
//! scope.push();
//! scope.bind("n", Ty::Bool);
//! assert_eq!(scope.lookup("n"), Some(&Ty::Bool));
//!
//! scope.pop();
//! assert_eq!(scope.lookup("n"), Some(&Ty::Nat));
//! ```

use crate::types::Ty;
use hashbrown::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
struct Frame {
    vars: HashMap<String, Ty>,
    type_vars: HashSet<String>,
}

/// Stack of lexical frames mapping names to types.
#[derive(Debug, Clone)]
pub struct Scope {
    frames: Vec<Frame>,
}

impl Scope {
    /// Create a scope with a single, global frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Get the current nesting depth (number of frames).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Enter a new frame.
    pub fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Exit the current frame. The global frame is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Bind a variable in the innermost frame, replacing any binding of the
    /// same name in that frame.
    pub fn bind(&mut self, name: impl Into<String>, ty: Ty) {
        if let Some(frame) = self.frames.last_mut() {
            frame.vars.insert(name.into(), ty);
        }
    }

    /// Bind every `(name, type)` pair in the innermost frame.
    pub fn bind_all(&mut self, bindings: impl IntoIterator<Item = (String, Ty)>) {
        for (name, ty) in bindings {
            self.bind(name, ty);
        }
    }

    /// Introduce a generic type variable in the innermost frame.
    pub fn bind_type_var(&mut self, name: impl Into<String>) {
        if let Some(frame) = self.frames.last_mut() {
            frame.type_vars.insert(name.into());
        }
    }

    /// Look up a variable, searching from the innermost frame outward.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Ty> {
        self.frames.iter().rev().find_map(|frame| frame.vars.get(name))
    }

    /// Returns `true` if `name` is a generic type variable in scope.
    #[must_use]
    pub fn has_type_var(&self, name: &str) -> bool {
        self.frames.iter().any(|frame| frame.type_vars.contains(name))
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
