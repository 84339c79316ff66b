//! Match exhaustiveness.
//!
//! Coverage is computed per scrutinee type: `Bool` and `Unit` by their
//! literals, sums and variants by constructor (recursively on payloads),
//! `Nat` by literal and `succ` depth, lists by `[]` and an irrefutable
//! `cons`. Tuples and records are checked column by column: a single
//! refutable column exactly, several only by splitting `Bool` columns.
//! Any other type is covered only by an irrefutable pattern.

use crate::types::Ty;
use stella_syntax::ast::{Pattern, PatternKind};

/// Most uncovered `Nat` values listed before giving up.
const MAX_NAT_WITNESSES: usize = 3;

/// Looks through ascriptions, which do not affect what a pattern matches.
fn strip(pattern: &Pattern) -> &Pattern {
    match pattern.kind() {
        PatternKind::Asc(asc) => strip(&asc.pattern),
        _ => pattern,
    }
}

/// Returns `true` if the pattern matches every value of its type.
#[must_use]
pub fn is_irrefutable(pattern: &Pattern) -> bool {
    match strip(pattern).kind() {
        PatternKind::Var(_) | PatternKind::Unit(_) => true,
        PatternKind::Tuple(tuple) => tuple.elements.iter().all(is_irrefutable),
        PatternKind::Record(record) => {
            record.fields.iter().all(|field| is_irrefutable(&field.pattern))
        }
        _ => false,
    }
}

/// Describes the values of `ty` that none of `patterns` match.
///
/// Returns an empty list when the patterns are exhaustive.
#[must_use]
pub fn missing_patterns(ty: &Ty, patterns: &[&Pattern]) -> Vec<String> {
    if ty.is_wildcard() || patterns.iter().any(|pattern| is_irrefutable(pattern)) {
        return Vec::new();
    }
    let patterns: Vec<&Pattern> = patterns.iter().map(|pattern| strip(pattern)).collect();

    match ty {
        Ty::Bool => {
            let mut missing = Vec::new();
            if !patterns.iter().any(|p| matches!(p.kind(), PatternKind::True(_))) {
                missing.push("true".to_string());
            }
            if !patterns.iter().any(|p| matches!(p.kind(), PatternKind::False(_))) {
                missing.push("false".to_string());
            }
            missing
        }
        // `unit` is irrefutable, so reaching here means it is absent.
        Ty::Unit => vec!["unit".to_string()],
        Ty::Sum(left, right) => {
            let inl: Vec<&Pattern> = patterns
                .iter()
                .filter_map(|p| match p.kind() {
                    PatternKind::Inl(inl) => Some(&*inl.pattern),
                    _ => None,
                })
                .collect();
            let inr: Vec<&Pattern> = patterns
                .iter()
                .filter_map(|p| match p.kind() {
                    PatternKind::Inr(inr) => Some(&*inr.pattern),
                    _ => None,
                })
                .collect();

            let mut missing = nested("inl", left, &inl);
            missing.extend(nested("inr", right, &inr));
            missing
        }
        Ty::Variant(fields) => fields
            .iter()
            .flat_map(|(label, payload)| missing_variant(label, payload.as_ref(), &patterns))
            .collect(),
        Ty::Nat => missing_nat(&patterns),
        Ty::List(_) => {
            let mut missing = Vec::new();
            let has_nil = patterns
                .iter()
                .any(|p| matches!(p.kind(), PatternKind::List(list) if list.elements.is_empty()));
            let has_cons = patterns.iter().any(|p| match p.kind() {
                PatternKind::Cons(cons) => is_irrefutable(&cons.head) && is_irrefutable(&cons.tail),
                _ => false,
            });
            if !has_nil {
                missing.push("[]".to_string());
            }
            if !has_cons {
                missing.push("cons(_, _)".to_string());
            }
            missing
        }
        Ty::Tuple(elements) => {
            let rows: Vec<Row<'_>> = patterns
                .iter()
                .filter_map(|p| match p.kind() {
                    PatternKind::Tuple(tuple) if tuple.elements.len() == elements.len() => {
                        Some(tuple.elements.iter().map(Some).collect())
                    }
                    _ => None,
                })
                .collect();
            missing_columns(elements, &rows)
                .into_iter()
                .map(|columns| format!("{{{}}}", columns.join(", ")))
                .collect()
        }
        Ty::Record(fields) => {
            let rows: Vec<Row<'_>> = patterns
                .iter()
                .filter_map(|p| match p.kind() {
                    PatternKind::Record(record) => Some(
                        fields
                            .iter()
                            .map(|(label, _)| {
                                record
                                    .fields
                                    .iter()
                                    .find(|field| field.label == *label)
                                    .map(|field| &field.pattern)
                            })
                            .collect(),
                    ),
                    _ => None,
                })
                .collect();
            let types: Vec<Ty> = fields.iter().map(|(_, ty)| ty.clone()).collect();
            missing_columns(&types, &rows)
                .into_iter()
                .map(|columns| {
                    let labelled: Vec<String> = fields
                        .iter()
                        .zip(columns)
                        .map(|((label, _), column)| format!("{label} = {column}"))
                        .collect();
                    format!("{{{}}}", labelled.join(", "))
                })
                .collect()
        }
        _ => vec!["_".to_string()],
    }
}

/// One product pattern split into columns; `None` matches anything.
type Row<'p> = Vec<Option<&'p Pattern>>;

/// Uncovered rows of a product type, one rendered pattern per column.
///
/// With several refutable columns only `Bool` columns are split further;
/// otherwise the rows are not proven exhaustive and an all-`_` row is
/// reported.
fn missing_columns(types: &[Ty], rows: &[Row<'_>]) -> Vec<Vec<String>> {
    let wildcard = || vec!["_".to_string(); types.len()];
    if rows.is_empty() {
        return vec![wildcard()];
    }
    let refutable: Vec<usize> = (0..types.len())
        .filter(|&column| {
            rows.iter()
                .any(|row| row[column].is_some_and(|p| !is_irrefutable(p)))
        })
        .collect();

    match refutable[..] {
        [] => Vec::new(),
        [column] => {
            if rows.iter().any(|row| row[column].is_none()) {
                return Vec::new();
            }
            let cells: Vec<&Pattern> = rows.iter().filter_map(|row| row[column]).collect();
            missing_patterns(&types[column], &cells)
                .into_iter()
                .map(|missing| {
                    let mut row = wildcard();
                    row[column] = missing;
                    row
                })
                .collect()
        }
        [column, ..] if types[column] == Ty::Bool => {
            let rest: Vec<Ty> = without(types, column);
            [true, false]
                .into_iter()
                .flat_map(|value| {
                    let specialised: Vec<Row<'_>> = rows
                        .iter()
                        .filter(|row| row[column].is_none_or(|p| matches_bool(p, value)))
                        .map(|row| without(row, column))
                        .collect();
                    missing_columns(&rest, &specialised)
                        .into_iter()
                        .map(move |mut row| {
                            row.insert(column, value.to_string());
                            row
                        })
                })
                .collect()
        }
        _ => vec![wildcard()],
    }
}

fn without<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    let mut items = items.to_vec();
    items.remove(index);
    items
}

fn matches_bool(pattern: &Pattern, value: bool) -> bool {
    match strip(pattern).kind() {
        PatternKind::True(_) => value,
        PatternKind::False(_) => !value,
        _ => is_irrefutable(pattern),
    }
}

fn nested(constructor: &str, ty: &Ty, inner: &[&Pattern]) -> Vec<String> {
    if inner.is_empty() {
        return vec![format!("{constructor}(_)")];
    }
    missing_patterns(ty, inner)
        .into_iter()
        .map(|m| format!("{constructor}({m})"))
        .collect()
}

fn missing_variant(label: &str, payload: Option<&Ty>, patterns: &[&Pattern]) -> Vec<String> {
    let mut matched = false;
    let mut inner = Vec::new();
    for pattern in patterns {
        let PatternKind::Variant(variant) = pattern.kind() else {
            continue;
        };
        if variant.label == label {
            matched = true;
            if let Some(data) = &variant.data {
                inner.push(&**data);
            }
        }
    }

    match payload {
        _ if !matched => match payload {
            Some(_) => vec![format!("<| {label} = _ |>")],
            None => vec![format!("<| {label} |>")],
        },
        Some(ty) if !inner.is_empty() => missing_patterns(ty, &inner)
            .into_iter()
            .map(|m| format!("<| {label} = {m} |>"))
            .collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NatShape {
    Exactly(u64),
    AtLeast(u64),
}

fn nat_shape(pattern: &Pattern) -> Option<NatShape> {
    match strip(pattern).kind() {
        PatternKind::Int(int) => Some(NatShape::Exactly(int.value)),
        PatternKind::Succ(succ) => nat_shape(&succ.pattern).map(|shape| match shape {
            NatShape::Exactly(n) => NatShape::Exactly(n.saturating_add(1)),
            NatShape::AtLeast(n) => NatShape::AtLeast(n.saturating_add(1)),
        }),
        _ if is_irrefutable(pattern) => Some(NatShape::AtLeast(0)),
        _ => None,
    }
}

fn succ_wildcard(depth: u64) -> String {
    let depth = usize::try_from(depth).unwrap_or(usize::MAX).min(64);
    format!("{}_{}", "succ(".repeat(depth), ")".repeat(depth))
}

fn missing_nat(patterns: &[&Pattern]) -> Vec<String> {
    let shapes: Vec<NatShape> = patterns.iter().filter_map(|p| nat_shape(p)).collect();
    let exact: Vec<u64> = shapes
        .iter()
        .filter_map(|shape| match shape {
            NatShape::Exactly(n) => Some(*n),
            NatShape::AtLeast(_) => None,
        })
        .collect();
    let threshold = shapes
        .iter()
        .filter_map(|shape| match shape {
            NatShape::AtLeast(n) => Some(*n),
            NatShape::Exactly(_) => None,
        })
        .min();

    // Every value at or above the threshold is covered; below it, only the
    // literals are.
    let limit = threshold
        .unwrap_or_else(|| exact.iter().max().map_or(0, |max| max.saturating_add(1)));
    let mut missing: Vec<String> = (0..limit)
        .filter(|n| !exact.contains(n))
        .take(MAX_NAT_WITNESSES)
        .map(|n| n.to_string())
        .collect();

    if threshold.is_none() {
        missing.push(succ_wildcard(limit));
    }
    missing
}
