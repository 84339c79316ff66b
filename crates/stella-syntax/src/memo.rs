//! Memo tables keyed by structural identity.
//!
//! Because equality and hashing ignore positions, two occurrences of the
//! same sub-tree share one entry no matter where they were parsed. Keys are
//! borrowed from the tree, so a table lives no longer than the AST it
//! describes.
//!
//! # Examples
//!
//! ```
//! use stella_syntax::build::{int, succ};
//! use stella_syntax::memo::StructuralMemo;
//! use stella_syntax::span::Position;
//!
//! let a = succ(int(1)).at(Position::new(1, 1, 0));
//! let b = succ(int(1)).at(Position::new(8, 4, 120));
//!
//! let mut memo = StructuralMemo::new();
//! memo.insert(&a, "seen");
//!
//! assert_eq!(memo.lookup(&b), Some(&"seen"));
//! assert_eq!(memo.stats().hits, 1);
//! ```

use crate::ast::{Expr, Program};
use crate::walk::{NodeRef, PostOrder};
use fxhash::FxHashMap;
use std::hash::Hash;

/// Hit and miss counts of a [`StructuralMemo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// Lookups that found an entry
    pub hits: usize,
    /// Lookups that found nothing
    pub misses: usize,
    /// Entries currently stored
    pub entries: usize,
}

impl MemoStats {
    /// Fraction of lookups that hit, or `0.0` before the first lookup.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A map from borrowed nodes to cached results.
#[derive(Debug, Clone)]
pub struct StructuralMemo<'ast, N: ?Sized, V> {
    table: FxHashMap<&'ast N, V>,
    hits: usize,
    misses: usize,
}

impl<'ast, N, V> StructuralMemo<'ast, N, V>
where
    N: Eq + Hash + ?Sized,
{
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: FxHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up the entry for a structurally equal node.
    pub fn lookup(&mut self, node: &N) -> Option<&V> {
        let found = self.table.get(node);
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Stores `value` for `node`, returning the previous entry.
    pub fn insert(&mut self, node: &'ast N, value: V) -> Option<V> {
        self.table.insert(node, value)
    }

    /// Returns the cached value for `node`, computing and storing it first
    /// on a miss.
    pub fn get_or_insert_with(&mut self, node: &'ast N, compute: impl FnOnce() -> V) -> &V {
        if self.table.contains_key(node) {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.table.entry(node).or_insert_with(compute)
    }

    /// Returns `true` if a structurally equal node has an entry. Not counted
    /// in the statistics.
    pub fn contains(&self, node: &N) -> bool {
        self.table.contains_key(node)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.table.len(),
        }
    }

    /// Drops all entries and resets the counters.
    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl<N, V> Default for StructuralMemo<'_, N, V>
where
    N: Eq + Hash + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A sub-expression that occurs more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplicate<'ast> {
    /// First occurrence in post-order
    pub expr: &'ast Expr,
    /// Number of structurally equal occurrences
    pub count: usize,
}

/// Finds non-leaf expressions that occur more than once in `program`.
///
/// Results are ordered by first occurrence in post-order, so inner
/// duplicates come before the larger trees that contain them.
#[must_use]
pub fn find_duplicates(program: &Program) -> Vec<Duplicate<'_>> {
    let mut counts: StructuralMemo<'_, Expr, usize> = StructuralMemo::new();
    let mut order = Vec::new();

    PostOrder::new(|node| {
        let Some(expr) = NodeRef::as_expr(node) else {
            return;
        };
        if expr.is_leaf() {
            return;
        }
        let count = counts.table.entry(expr).or_insert(0);
        if *count == 0 {
            order.push(expr);
        }
        *count += 1;
    })
    .program(program);

    let duplicates: Vec<_> = order
        .into_iter()
        .filter_map(|expr| {
            let count = counts.table.get(expr).copied().unwrap_or(0);
            (count > 1).then_some(Duplicate { expr, count })
        })
        .collect();

    stella_log::debug!(
        "{} distinct non-leaf expressions, {} duplicated",
        counts.len(),
        duplicates.len()
    );
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::BinaryOp;
    use crate::build::*;

    #[test]
    fn test_lookup_counts_hits_and_misses() {
        let a = throw(int(5));
        let b = throw(int(5));
        let c = cast(int(5), nat());

        let mut memo = StructuralMemo::new();
        assert_eq!(memo.lookup(&a), None);
        memo.insert(&a, 1);
        assert_eq!(memo.lookup(&b), Some(&1));
        assert_eq!(memo.lookup(&c), None);

        let stats = memo.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_get_or_insert_with_computes_once() {
        let a = succ(int(0));
        let b = succ(int(0));
        let mut calls = 0;
        let mut memo = StructuralMemo::new();

        let first = *memo.get_or_insert_with(&a, || {
            calls += 1;
            "one"
        });
        let second = *memo.get_or_insert_with(&b, || {
            calls += 1;
            "two"
        });

        assert_eq!((first, second), ("one", "one"));
        assert_eq!(calls, 1);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_clear_resets() {
        let a = int(1);
        let mut memo: StructuralMemo<'_, Expr, ()> = StructuralMemo::default();
        memo.insert(&a, ());
        let _ = memo.lookup(&a);
        memo.clear();
        assert!(memo.is_empty());
        assert_eq!(memo.stats(), MemoStats::default());
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(MemoStats::default().hit_rate(), 0.0);
        let stats = MemoStats {
            hits: 3,
            misses: 1,
            entries: 1,
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_find_duplicates() {
        let shared = binary(BinaryOp::Add, var("n"), int(1));
        let p = program(vec![
            fun_decl("f", vec![param("n", nat())], nat(), shared.clone()),
            fun_decl(
                "g",
                vec![param("n", nat())],
                nat(),
                binary(BinaryOp::Multiply, shared.clone(), shared),
            ),
        ]);

        let duplicates = find_duplicates(&p);
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].count, 3);
        assert_eq!(duplicates[0].expr.to_string(), "n + 1");
    }

    #[test]
    fn test_leaves_are_not_duplicates() {
        let p = program(vec![fun_decl(
            "main",
            vec![param("n", nat())],
            nat(),
            binary(BinaryOp::Add, var("n"), var("n")),
        )]);
        assert!(find_duplicates(&p).is_empty());
    }
}
