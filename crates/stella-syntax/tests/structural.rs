//! Integration tests for structural equality and hashing.
//!
//! Equality and hashing follow the variant and its fields, never the
//! attached position.

use stella_syntax::ast::expr::BinaryOp;
use stella_syntax::ast::{Decl, Expr, Pattern, Program, Type};
use stella_syntax::build::*;
use stella_syntax::span::Position;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Builds three copies of a node at different positions and checks that
/// equality behaves as an equivalence relation agreeing with the hash.
fn assert_equivalence<T: Clone + PartialEq + Hash + Debug>(build: impl Fn(Option<Position>) -> T) {
    let a = build(None);
    let b = build(Some(Position::new(1, 1, 0)));
    let c = build(Some(Position::new(40, 7, 913)));

    assert_eq!(a, a.clone());
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(b, c);
    assert_eq!(a, c);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(hash_of(&b), hash_of(&c));
}

fn placed<T>(node: T, position: Option<Position>, at: impl Fn(T, Position) -> T) -> T {
    match position {
        Some(position) => at(node, position),
        None => node,
    }
}

#[test]
fn test_equality_is_an_equivalence_for_every_family() {
    assert_equivalence(|position| {
        let inner = placed(int(5), position, Expr::at);
        placed(cast(throw(inner), nat()), position, Expr::at)
    });
    assert_equivalence(|position| {
        placed(fun(vec![list_ty(nat())], sum(bool_ty(), unit_ty())), position, Type::at)
    });
    assert_equivalence(|position| {
        placed(p_variant("some", Some(p_succ(p_var("k")))), position, Pattern::at)
    });
    assert_equivalence(|position| {
        let body = placed(succ(var("n")), position, Expr::at);
        placed(fun_decl("main", vec![param("n", nat())], nat(), body), position, Decl::at)
    });
    assert_equivalence(|position| {
        let main = placed(fun_decl("main", vec![], nat(), int(0)), position, Decl::at);
        placed(program_with(["#natural-literals"], vec![main]), position, Program::at)
    });
}

#[test]
fn test_inequality_is_symmetric() {
    let thrown = throw(int(5));
    let casted = cast(int(5), nat());
    assert_ne!(thrown, casted);
    assert_ne!(casted, thrown);

    let decl = fun_decl("f", vec![], nat(), int(0));
    let other = fun_decl("g", vec![], nat(), int(0));
    assert_ne!(decl, other);
    assert_ne!(other, decl);
}

#[test]
fn test_throw_of_same_literal_is_equal() {
    let a = throw(int(5));
    let b = throw(int(5));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn test_throw_of_different_literal_differs() {
    assert_ne!(throw(int(5)), throw(int(6)));
}

#[test]
fn test_same_fields_different_variant_differs() {
    // Both carry a single boxed expression.
    assert_ne!(throw(int(5)), succ(int(5)));
    assert_ne!(inl(int(5)), inr(int(5)));
    assert_ne!(head(var("l")), tail(var("l")));
}

#[test]
fn test_cast_compares_expression_and_type() {
    assert_eq!(cast(int(5), nat()), cast(int(5), nat()));
    assert_ne!(cast(int(5), nat()), cast(int(5), bool_ty()));
    assert_ne!(cast(int(5), nat()), cast(int(6), nat()));
    assert_ne!(cast(int(5), nat()), ascribe(int(5), nat()));
}

#[test]
fn test_position_invisible_to_equality_and_hash() {
    let placed = throw(int(5).at(Position::new(2, 11, 40))).at(Position::new(2, 5, 34));
    let elsewhere = throw(int(5).at(Position::new(90, 1, 5000))).at(Position::new(90, 1, 4994));
    let unplaced = throw(int(5));

    assert_eq!(placed, elsewhere);
    assert_eq!(placed, unplaced);
    assert_eq!(hash_of(&placed), hash_of(&unplaced));
    assert_eq!(hash_of(&elsewhere), hash_of(&unplaced));
}

#[test]
fn test_equality_is_deep() {
    let a = app(var("f"), vec![binary(BinaryOp::Add, var("x"), int(1))]);
    let b = app(var("f"), vec![binary(BinaryOp::Add, var("x"), int(2))]);
    let c = app(var("f"), vec![binary(BinaryOp::Subtract, var("x"), int(1))]);
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(a, a.clone());
}

#[test]
fn test_argument_order_matters() {
    let ab = app(var("f"), vec![var("a"), var("b")]);
    let ba = app(var("f"), vec![var("b"), var("a")]);
    assert_ne!(ab, ba);
}

#[test]
fn test_optional_children() {
    assert_ne!(variant("none", None), variant("none", Some(unit())));
    assert_eq!(
        variant("some", Some(int(1))),
        variant("some", Some(int(1)))
    );
}

#[test]
fn test_nodes_as_hash_set_keys() {
    let mut set = HashSet::new();
    set.insert(throw(int(5)));
    set.insert(throw(int(5)).at(Position::new(3, 3, 3)));
    set.insert(cast(int(5), nat()));
    set.insert(throw(int(6)));
    assert_eq!(set.len(), 3);
    assert!(set.contains(&throw(int(5))));
}

#[test]
fn test_nodes_as_hash_map_keys() {
    let mut counts: HashMap<Type, usize> = HashMap::new();
    for ty in [
        fun(vec![nat()], nat()),
        fun(vec![nat()], nat()),
        list_ty(bool_ty()),
        fun(vec![nat()], bool_ty()),
    ] {
        *counts.entry(ty).or_default() += 1;
    }
    assert_eq!(counts[&fun(vec![nat()], nat())], 2);
    assert_eq!(counts[&list_ty(bool_ty())], 1);
    assert_eq!(counts.len(), 3);
}

#[test]
fn test_pattern_and_type_families() {
    let a: Pattern = p_cons(p_var("h"), p_var("t"));
    let b: Pattern = p_cons(p_var("h"), p_var("t")).at(Position::new(1, 1, 0));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, p_cons(p_var("t"), p_var("h")));

    assert_ne!(top(), bottom());
    assert_ne!(sum(nat(), bool_ty()), sum(bool_ty(), nat()));
}

#[test]
fn test_declarations_and_programs() {
    let make = || {
        program(vec![fun_decl(
            "main",
            vec![param("n", nat())],
            nat(),
            succ(var("n")),
        )])
    };
    assert_eq!(make(), make());
    assert_eq!(hash_of(&make()), hash_of(&make()));

    let renamed = program(vec![fun_decl(
        "main",
        vec![param("m", nat())],
        nat(),
        succ(var("n")),
    )]);
    assert_ne!(make(), renamed);
}

#[test]
fn test_position_is_write_once() {
    let mut expr: Expr = throw(int(5));
    assert_eq!(expr.position(), None);
    assert!(expr.set_position(Position::new(1, 2, 1)));
    assert!(!expr.set_position(Position::new(7, 7, 70)));
    assert_eq!(expr.position(), Some(Position::new(1, 2, 1)));

    let again = expr.at(Position::new(8, 8, 80));
    assert_eq!(again.position(), Some(Position::new(1, 2, 1)));
}

#[test]
fn test_nodes_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Expr>();
    assert_send_sync::<Type>();
    assert_send_sync::<Pattern>();
    assert_send_sync::<stella_syntax::ast::Decl>();
    assert_send_sync::<stella_syntax::ast::Program>();
}

#[test]
fn test_shared_tree_across_threads() {
    let tree = std::sync::Arc::new(cast(throw(int(5)), nat()));
    let expected = hash_of(&*tree);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = std::sync::Arc::clone(&tree);
            std::thread::spawn(move || hash_of(&*tree))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
