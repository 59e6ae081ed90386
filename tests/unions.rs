//! Integration tests for UNION and UNION ALL.

use cypher_dsl::cypher;
use cypher_dsl::functions;
use cypher_dsl::prelude::*;
use cypher_dsl::{Error, Statement};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

fn match_return(label: &str, name: &str) -> Statement {
    let node = cypher::node(label).named(name);
    cypher::match_([&node]).returning([&node]).build().unwrap()
}

// ============================================================================
// 1. Rendering
// ============================================================================

#[test]
fn test_union() {
    let statement = cypher::union([match_return("Bike", "b"), match_return("User", "u")]).unwrap();
    assert_eq!(
        statement.cypher(),
        "MATCH (b:`Bike`) RETURN b UNION MATCH (u:`User`) RETURN u"
    );
}

#[test]
fn test_union_all() {
    let statement = cypher::union_all([
        match_return("Bike", "b"),
        match_return("User", "u"),
        match_return("Trip", "t"),
    ])
    .unwrap();
    assert_eq!(
        statement.cypher(),
        "MATCH (b:`Bike`) RETURN b UNION ALL MATCH (u:`User`) RETURN u UNION ALL MATCH (t:`Trip`) RETURN t"
    );
}

#[test]
fn test_declared_nodes_carry_across_parts() {
    let statement = cypher::union([match_return("Bike", "b"), match_return("Bike", "b")]).unwrap();
    assert_eq!(statement.cypher(), "MATCH (b:`Bike`) RETURN b UNION MATCH (b) RETURN b");
}

#[test]
fn test_aliases_reset_per_part() {
    let part = || {
        let b = cypher::node("Bike").named("b");
        let total = functions::count(cypher::name("b")).as_("total");
        cypher::match_([&b]).returning([&total]).build().unwrap()
    };
    let statement = cypher::union([part(), part()]).unwrap();
    assert_eq!(
        statement.cypher(),
        "MATCH (b:`Bike`) RETURN count(b) AS total UNION MATCH (b) RETURN count(b) AS total"
    );
}

// ============================================================================
// 2. Extending an existing union
// ============================================================================

#[test]
fn test_union_is_extended_when_flags_match() {
    let first = cypher::union([match_return("Bike", "b"), match_return("User", "u")]).unwrap();
    let statement = cypher::union([first, match_return("Trip", "t")]).unwrap();
    let Statement::Union(union) = &statement else { panic!("expected union") };
    assert_eq!(union.queries.len(), 3);
    assert!(!union.all);
    assert_eq!(
        statement.cypher(),
        "MATCH (b:`Bike`) RETURN b UNION MATCH (u:`User`) RETURN u UNION MATCH (t:`Trip`) RETURN t"
    );
}

// ============================================================================
// 3. Failures
// ============================================================================

#[test]
fn test_mixing_union_kinds_fails() {
    let first = cypher::union([match_return("Bike", "b"), match_return("User", "u")]).unwrap();
    let err = cypher::union_all([first, match_return("Trip", "t")]).unwrap_err();
    assert_eq!(err, Error::MixedUnion);
    assert_eq!(err.to_string(), "Cannot mix union and union all!");
}

#[test]
fn test_single_statement_is_not_a_union() {
    let err = cypher::union([match_return("Bike", "b")]).unwrap_err();
    assert_eq!(err, Error::TooFewUnionParts);
    assert_eq!(err.to_string(), "At least two statements are required!");
}

#[test]
fn test_union_in_later_position_fails() {
    let nested = cypher::union([match_return("Bike", "b"), match_return("User", "u")]).unwrap();
    let err = cypher::union([match_return("Trip", "t"), nested]).unwrap_err();
    assert_eq!(err, Error::NestedUnion);
    assert_eq!(err.to_string(), "Can only union single queries!");
}
