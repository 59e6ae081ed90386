//! Integration tests for the foreign-query bridge.
//!
//! Scenarios A-F build the same movie queries twice: once through the
//! fluent `EntityQuery` and once from a deserialized `ForeignQuery`.

use cypher_dsl::adapter::{
    self, DefaultLabelProvider, EntityDescriptor, EntityQuery, ForeignExpression, ForeignOperator,
    ForeignQuery, MappedLabelProvider,
};
use cypher_dsl::{cypher, Error, Expression};
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// Helpers
// ============================================================================

fn movies() -> EntityQuery {
    EntityQuery::for_entity(&EntityDescriptor::new("Movie", "r"), &DefaultLabelProvider).unwrap()
}

fn title() -> Expression {
    cypher::property("r", "title")
}

fn foreign(value: serde_json::Value) -> String {
    let query: ForeignQuery = serde_json::from_value(value).unwrap();
    query.to_statement(&DefaultLabelProvider).unwrap().cypher()
}

fn path(property: &str) -> serde_json::Value {
    json!({"kind": "path", "root": "r", "property": property})
}

fn eq(property: &str, value: serde_json::Value) -> serde_json::Value {
    json!({
        "kind": "operation",
        "operator": "EQ",
        "args": [path(property), {"kind": "constant", "value": value}]
    })
}

fn movie_query(filter: serde_json::Value) -> serde_json::Value {
    json!({"entity": {"type_name": "Movie", "variable": "r"}, "filter": filter})
}

// ============================================================================
// Scenario A: no condition
// ============================================================================

#[test]
fn test_scenario_a_plain_match() {
    assert_eq!(movies().build().unwrap().cypher(), "MATCH (r:`Movie`) RETURN r");
    assert_eq!(
        foreign(json!({"entity": {"type_name": "Movie", "variable": "r"}})),
        "MATCH (r:`Movie`) RETURN r"
    );
}

// ============================================================================
// Scenario B: equality
// ============================================================================

#[test]
fn test_scenario_b_equality() {
    let expected = "MATCH (r:`Movie`) WHERE r.title = 'The Matrix' RETURN r";
    let query = movies().filter(title().is_equal_to(cypher::literal_of("The Matrix")));
    assert_eq!(query.build().unwrap().cypher(), expected);
    assert_eq!(foreign(movie_query(eq("title", json!("The Matrix")))), expected);
}

// ============================================================================
// Scenario C: negation
// ============================================================================

#[test]
fn test_scenario_c_negation() {
    let expected = "MATCH (r:`Movie`) WHERE NOT (r.title = 'The Matrix') RETURN r";
    let query = movies().filter(title().is_equal_to(cypher::literal_of("The Matrix")).not());
    assert_eq!(query.build().unwrap().cypher(), expected);
    let not = json!({"kind": "operation", "operator": "NOT", "args": [eq("title", json!("The Matrix"))]});
    assert_eq!(foreign(movie_query(not)), expected);
}

// ============================================================================
// Scenario D: case-insensitive contains
// ============================================================================

#[test]
fn test_scenario_d_contains_ignore_case() {
    let expected = "MATCH (r:`Movie`) WHERE toLower(r.title) CONTAINS toLower('Matrix') RETURN r";
    let query = movies().filter(title().contains_ignore_case(cypher::literal_of("Matrix")));
    assert_eq!(query.build().unwrap().cypher(), expected);
    let contains = json!({
        "kind": "operation",
        "operator": "STRING_CONTAINS_IC",
        "args": [path("title"), {"kind": "constant", "value": "Matrix"}]
    });
    assert_eq!(foreign(movie_query(contains)), expected);
}

// ============================================================================
// Scenario E: paging
// ============================================================================

#[test]
fn test_scenario_e_skip_and_limit() {
    let expected = "MATCH (r:`Movie`) RETURN r SKIP 23 LIMIT 42";
    assert_eq!(movies().skip(23).limit(42).build().unwrap().cypher(), expected);
    assert_eq!(movies().limit(42).skip(23).build().unwrap().cypher(), expected);
    assert_eq!(
        foreign(json!({"entity": {"type_name": "Movie", "variable": "r"}, "limit": 42, "offset": 23})),
        expected
    );
}

// ============================================================================
// Scenario F: grouping
// ============================================================================

#[test]
fn test_scenario_f_or_inside_and() {
    let expected = "MATCH (r:`Movie`) WHERE ((r.title = 'The Matrix' OR r.title = 'Cloud Atlas') \
                    AND r.released = 1999) RETURN r";
    let either = title()
        .is_equal_to(cypher::literal_of("The Matrix"))
        .or(title().is_equal_to(cypher::literal_of("Cloud Atlas")));
    let query = movies()
        .filter(either)
        .filter(cypher::property("r", "released").is_equal_to(cypher::literal_of(1999)));
    assert_eq!(query.build().unwrap().cypher(), expected);

    let or = json!({
        "kind": "operation",
        "operator": "OR",
        "args": [eq("title", json!("The Matrix")), eq("title", json!("Cloud Atlas"))]
    });
    let and = json!({"kind": "operation", "operator": "AND", "args": [or, eq("released", json!(1999))]});
    assert_eq!(foreign(movie_query(and)), expected);
}

// ============================================================================
// Projections and label providers
// ============================================================================

#[test]
fn test_foreign_projection() {
    let query = json!({
        "entity": {"type_name": "Movie", "variable": "r"},
        "projection": [path("title"), path("released")],
        "limit": 10
    });
    assert_eq!(foreign(query), "MATCH (r:`Movie`) RETURN r.title, r.released LIMIT 10");
}

#[test]
fn test_mapped_labels() {
    let provider = MappedLabelProvider::new().with_labels("Person", ["Person", "Actor"]);
    let query = EntityQuery::for_entity(&EntityDescriptor::new("Person", "p"), &provider).unwrap();
    assert_eq!(query.build().unwrap().cypher(), "MATCH (p:`Person`:`Actor`) RETURN p");
}

#[test]
fn test_mapped_provider_from_config() {
    let provider: MappedLabelProvider =
        serde_json::from_value(json!({"labels": {"Person": ["Human"]}})).unwrap();
    let node = adapter::to_node(&EntityDescriptor::new("Person", "p"), &provider).unwrap();
    assert_eq!(node.labels.as_slice(), ["Human"]);
}

#[test]
fn test_unknown_entity_has_no_labels() {
    let query: ForeignQuery =
        serde_json::from_value(json!({"entity": {"type_name": "Ghost", "variable": "g"}})).unwrap();
    let err = query.to_statement(&MappedLabelProvider::new()).unwrap_err();
    assert_eq!(err, Error::MissingLabels("Ghost".into()));
}

// ============================================================================
// Unsupported constructs
// ============================================================================

#[test]
fn test_unsupported_operator_fails_the_query() {
    let between = json!({
        "kind": "operation",
        "operator": "BETWEEN",
        "args": [path("released"), {"kind": "constant", "value": 1990}, {"kind": "constant", "value": 2000}]
    });
    let query: ForeignQuery = serde_json::from_value(movie_query(between)).unwrap();
    assert_eq!(
        query.to_statement(&DefaultLabelProvider).unwrap_err(),
        Error::UnsupportedOperator("Between".into())
    );
}

#[test]
fn test_unsupported_expression_kinds() {
    let kinds = [
        ForeignExpression::Param { name: "title".into() },
        ForeignExpression::SubQuery { description: "select 1".into() },
        ForeignExpression::Template { template: "{0} > 1".into() },
    ];
    for kind in &kinds {
        assert!(matches!(adapter::translate(kind), Err(Error::UnsupportedExpression(_))));
    }
}

#[test]
fn test_operator_names_round_trip() {
    let op: ForeignOperator = serde_json::from_value(json!("IS_NOT_NULL")).unwrap();
    assert_eq!(op, ForeignOperator::IsNotNull);
    assert_eq!(serde_json::to_value(ForeignOperator::Goe).unwrap(), json!("GOE"));
}
