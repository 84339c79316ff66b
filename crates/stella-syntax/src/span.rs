//! Source positions attached to AST nodes.
//!
//! The parser attaches a [`Position`] to a node after building it. The
//! position lives in a [`NodeMeta`] next to the node's structural fields and
//! is invisible to equality and hashing, so two trees parsed from different
//! places in a file still compare equal when their structure matches.
//!
//! # Examples
//!
//! ```
//! use stella_syntax::span::{NodeMeta, Position};
//!
//! let mut meta = NodeMeta::new();
//! assert_eq!(meta.position(), None);
//!
//! assert!(meta.set_position(Position::new(3, 7, 42)));
//! assert!(!meta.set_position(Position::new(9, 1, 100)));
//! assert_eq!(meta.position(), Some(Position::new(3, 7, 42)));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

/// A location in Stella source text.
///
/// - `line`: 1-indexed line number
/// - `column`: 1-indexed column, in bytes
/// - `offset`: 0-indexed byte offset from the start of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number in bytes (1-indexed)
    pub column: usize,

    /// Byte offset (0-indexed)
    pub offset: usize,
}

impl Position {
    /// Creates a position from its line, column and byte offset.
    ///
    /// ```
    /// use stella_syntax::span::Position;
    ///
    /// let pos = Position::new(2, 5, 17);
    /// assert_eq!(pos.line, 2);
    /// assert_eq!(pos.to_string(), "2:5");
    /// ```
    #[must_use]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Per-node metadata that does not take part in structural comparison.
///
/// Holds the node's position, which can be set exactly once. `NodeMeta`
/// compares equal to every other `NodeMeta` and hashes to nothing, which
/// lets the node families derive `PartialEq`, `Eq` and `Hash` from their
/// field lists without the position leaking into either.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeMeta {
    position: Option<Position>,
}

impl NodeMeta {
    /// Metadata with no position attached.
    #[must_use]
    pub const fn new() -> Self {
        Self { position: None }
    }

    /// The attached position, or `None` if the producer never set one.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Attaches `position` if none is attached yet.
    ///
    /// Returns `false`, leaving the first position in place, when a position
    /// was already set.
    pub fn set_position(&mut self, position: Position) -> bool {
        if let Some(existing) = self.position {
            stella_log::warn!(
                "position {} already attached, ignoring {}",
                existing,
                position
            );
            return false;
        }
        self.position = Some(position);
        true
    }
}

impl PartialEq for NodeMeta {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for NodeMeta {}

impl Hash for NodeMeta {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

/// Anything that may carry a source position.
pub trait Located {
    /// Returns the attached position, if any.
    fn position(&self) -> Option<Position>;
}

impl Located for Position {
    fn position(&self) -> Option<Position> {
        Some(*self)
    }
}

impl Located for NodeMeta {
    fn position(&self) -> Option<Position> {
        self.position
    }
}
