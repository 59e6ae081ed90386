//! Integration tests for pattern rendering: nodes, relationships, chains,
//! variable lengths, named paths and the "already declared" node shortcut.

use cypher_dsl::cypher;
use cypher_dsl::prelude::*;
use cypher_dsl::{Node, PatternElement};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

fn user() -> Node {
    cypher::node("User").named("u")
}

fn bike() -> Node {
    cypher::node("Bike").named("b")
}

fn create(pattern: impl Into<PatternElement>) -> String {
    let pattern: PatternElement = pattern.into();
    cypher::create([pattern]).build().unwrap().cypher()
}

// ============================================================================
// 1. Nodes
// ============================================================================

#[test]
fn test_node_forms() {
    assert_eq!(create(cypher::any_node()), "CREATE ()");
    assert_eq!(create(cypher::node("Bike")), "CREATE (:`Bike`)");
    assert_eq!(create(bike()), "CREATE (b:`Bike`)");
    assert_eq!(
        create(cypher::node_with_labels("Person", &["Actor", "Director"]).named("p")),
        "CREATE (p:`Person`:`Actor`:`Director`)"
    );
}

#[test]
fn test_node_properties() {
    let timothy = [("name", cypher::literal_of("Timothy"))];
    assert_eq!(
        create(cypher::node("Person").named("p").with_properties(timothy.clone())),
        "CREATE (p:`Person` {name: 'Timothy'})"
    );
    assert_eq!(create(cypher::any_node().with_properties(timothy)), "CREATE ( {name: 'Timothy'})");
}

#[test]
fn test_property_keys_and_labels_are_escaped() {
    let node = cypher::node("Odd`Label")
        .named("n")
        .with_properties([("first name", cypher::literal_of(1)), ("age", cypher::literal_of(2))]);
    assert_eq!(create(node), "CREATE (n:`Odd``Label` {`first name`: 1, age: 2})");
}

// ============================================================================
// 2. Relationships
// ============================================================================

#[test]
fn test_relationship_directions() {
    let (u, b) = (user(), bike());
    assert_eq!(create(u.relationship_to(&b, &["OWNS"])), "CREATE (u:`User`)-[:`OWNS`]->(b:`Bike`)");
    assert_eq!(create(u.relationship_from(&b, &["OWNS"])), "CREATE (u:`User`)<-[:`OWNS`]-(b:`Bike`)");
    assert_eq!(create(u.relationship_between(&b, &["OWNS"])), "CREATE (u:`User`)-[:`OWNS`]-(b:`Bike`)");
}

#[test]
fn test_empty_details_collapse() {
    let (u, b) = (user(), bike());
    assert_eq!(create(u.relationship_to(&b, &[])), "CREATE (u:`User`)-->(b:`Bike`)");
    assert_eq!(create(u.relationship_from(&b, &[])), "CREATE (u:`User`)<--(b:`Bike`)");
    assert_eq!(create(u.relationship_between(&b, &[])), "CREATE (u:`User`)--(b:`Bike`)");
}

#[test]
fn test_relationship_details() {
    let (u, b) = (user(), bike());
    let owns = u
        .relationship_to(&b, &["OWNS", "RENTS"])
        .named("r")
        .with_properties([("since", cypher::literal_of(2020))]);
    assert_eq!(create(owns), "CREATE (u:`User`)-[r:`OWNS`|`RENTS` {since: 2020}]->(b:`Bike`)");
}

#[test]
fn test_variable_lengths() {
    let a = cypher::any_node().named("a");
    let b = cypher::any_node().named("b");
    let cases = [
        (a.relationship_to(&b, &["KNOWS"]).unbounded(), "(a)-[:`KNOWS`*]->(b)"),
        (a.relationship_to(&b, &["KNOWS"]).min(2), "(a)-[:`KNOWS`*2..]->(b)"),
        (a.relationship_to(&b, &["KNOWS"]).max(5), "(a)-[:`KNOWS`*..5]->(b)"),
        (a.relationship_to(&b, &["KNOWS"]).min(1).max(3), "(a)-[:`KNOWS`*1..3]->(b)"),
        (a.relationship_to(&b, &[]).length(Some(2), Some(2)), "(a)-[*2]->(b)"),
    ];
    for (relationship, expected) in cases {
        assert_eq!(create(relationship), format!("CREATE {expected}"));
    }
}

#[test]
fn test_chain() {
    let (u, b) = (user(), bike());
    let trip = cypher::node("Trip").named("t");
    let chain = u
        .relationship_to(&b, &["OWNS"])
        .relationship_from(&trip, &["USES"])
        .named("used");
    assert_eq!(
        create(chain),
        "CREATE (u:`User`)-[:`OWNS`]->(b:`Bike`)<-[used:`USES`]-(t:`Trip`)"
    );
}

// ============================================================================
// 3. Named paths
// ============================================================================

#[test]
fn test_named_path() {
    let (u, b) = (user(), bike());
    let p = cypher::path("p").defined_by(u.relationship_to(&b, &["OWNS"]));
    let statement = cypher::match_([&p]).returning([&p]).build().unwrap();
    assert_eq!(statement.cypher(), "MATCH p = (u:`User`)-[:`OWNS`]->(b:`Bike`) RETURN p");
}

#[test]
fn test_shortest_path() {
    let a = cypher::node("Person").named("a");
    let b = cypher::node("Person").named("b");
    let p = cypher::shortest_path("p").defined_by(a.relationship_between(&b, &[]).unbounded());
    let statement = cypher::match_([&p]).returning([&p]).build().unwrap();
    assert_eq!(
        statement.cypher(),
        "MATCH p = shortestPath((a:`Person`)-[*]-(b:`Person`)) RETURN p"
    );
}

// ============================================================================
// 4. Nodes declared earlier in the statement
// ============================================================================

#[test]
fn test_declared_node_renders_name_only() {
    let (u, b) = (user(), bike());
    let statement = cypher::match_([&u])
        .match_([u.relationship_to(&b, &["OWNS"])])
        .returning([&b])
        .build()
        .unwrap();
    assert_eq!(
        statement.cypher(),
        "MATCH (u:`User`) MATCH (u)-[:`OWNS`]->(b:`Bike`) RETURN b"
    );
}

#[test]
fn test_redeclared_node_with_other_labels_renders_in_full() {
    let u = user();
    let admin = cypher::node("Admin").named("u");
    let statement = cypher::match_([&u]).match_([&admin]).returning([&u]).build().unwrap();
    assert_eq!(statement.cypher(), "MATCH (u:`User`) MATCH (u:`Admin`) RETURN u");
}

#[test]
fn test_equal_nodes_built_separately_count_as_declared() {
    let statement = cypher::match_([user()]).match_([user()]).returning([&user()]).build().unwrap();
    assert_eq!(statement.cypher(), "MATCH (u:`User`) MATCH (u) RETURN u");
}

#[test]
fn test_relationship_properties_and_functions() {
    let (u, b) = (user(), bike());
    let owns = u.relationship_to(&b, &["OWNS"]).named("o");
    let statement = cypher::match_([&owns])
        .returning([
            owns.property("since").unwrap(),
            cypher_dsl::functions::type_(&owns).unwrap(),
            cypher_dsl::functions::start_node(&owns).unwrap(),
        ])
        .build()
        .unwrap();
    assert_eq!(
        statement.cypher(),
        "MATCH (u:`User`)-[o:`OWNS`]->(b:`Bike`) RETURN o.since, type(o), startNode(o)"
    );
}
