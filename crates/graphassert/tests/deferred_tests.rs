//! Integration tests for deferred collections and set comparisons.

use graphassert::collection::{contains, contains_only, is_empty};
use graphassert::deferred::{
    find_nodes_by_label, find_nodes_by_label_and_property, get_all_constraints, get_constraints,
    get_indexes, get_property_keys,
};
use graphassert::{
    assert_that, check, in_transaction, Deferred, Error, GraphDatabase, GraphError, MatchResult,
    Materialize, MemoryEngine, NodeId, Rows, TxOutcome,
};

fn create_person(db: &GraphDatabase<MemoryEngine>, name: &str) -> NodeId {
    in_transaction(db, TxOutcome::Commit, |tx| {
        let node = tx.create_node()?.with_label("Person").with_property("name", name);
        tx.put_node(&node)?;
        Ok(node.id)
    })
    .expect("failed to create person")
}

// ============================================================================
// Materialization Tests
// ============================================================================

#[test]
fn test_each_materialization_uses_its_own_transaction() {
    let db = GraphDatabase::in_memory();
    let alice = create_person(&db, "Alice");
    let bob = create_person(&db, "Bob");
    let people = find_nodes_by_label(&db, "Person");
    let before = db.stats();

    let first = people.collection().expect("first read failed");
    let second = people.collection().expect("second read failed");

    assert_eq!(first, second);
    assert_eq!(first, vec![alice, bob]);
    let after = db.stats();
    assert_eq!(after.begun - before.begun, 2);
    assert_eq!(after.open(), 0);
}

#[test]
fn test_query_runs_at_assertion_time() {
    let db = GraphDatabase::in_memory();
    let people = find_nodes_by_label(&db, "Person");
    assert_eq!(db.stats().begun, 0);
    assert_that(&people, &is_empty());

    let alice = create_person(&db, "Alice");
    assert_that(&people, &contains_only([alice]));
}

#[test]
fn test_producer_error_propagates_after_close() {
    let db = GraphDatabase::in_memory();
    let failing: Deferred<'_, MemoryEngine, NodeId> =
        Deferred::new(&db, |_tx| Err(GraphError::Internal("query failed".into())));

    let result = failing.collection();

    assert!(matches!(result, Err(Error::Graph(GraphError::Internal(_)))));
    assert_eq!(db.stats().open(), 0);
}

#[test]
fn test_row_error_propagates_after_close() {
    let db = GraphDatabase::in_memory();
    let failing: Deferred<'_, MemoryEngine, NodeId> = Deferred::new(&db, |_tx| {
        let rows = vec![Ok(NodeId::new(1)), Err(GraphError::Internal("bad row".into()))];
        Ok(Rows::new(rows.into_iter()))
    });

    let result = check(&failing, &contains_only([NodeId::new(1)]));

    assert!(result.expect_err("row error should fail the check").is_store_error());
    assert_eq!(db.stats().open(), 0);
}

#[test]
fn test_vectors_materialize_without_a_store() {
    let found = vec!["b", "a"];
    assert_eq!(found.collection().expect("collect failed"), vec!["b", "a"]);
    assert_that(&found, &contains_only(["a", "b"]));
}

// ============================================================================
// Set Comparison Tests
// ============================================================================

#[test]
fn test_exact_comparison_against_the_store() {
    let db = GraphDatabase::in_memory();
    let alice = create_person(&db, "Alice");
    let bob = create_person(&db, "Bob");
    let people = find_nodes_by_label(&db, "Person");

    assert_that(&people, &contains_only([bob, alice, bob]));

    let carol = create_person(&db, "Carol");
    let outcome = check(&people, &contains_only([alice, bob])).expect("check failed");
    assert_eq!(outcome, MatchResult::mismatch(format!("found [{alice}, {bob}, {carol}]")));
}

#[test]
fn test_contains_against_the_store() {
    let db = GraphDatabase::in_memory();
    let alice = create_person(&db, "Alice");
    let bob = create_person(&db, "Bob");
    let people = find_nodes_by_label(&db, "Person");

    assert_that(&people, &contains([alice]));
    let missing = NodeId::new(999);
    let outcome = check(&people, &contains([alice, missing])).expect("check failed");
    assert_eq!(outcome, MatchResult::mismatch(format!("found [{alice}, {bob}]")));
}

#[test]
#[should_panic(expected = "Expected: empty collection\n     but: was [Node[1]]")]
fn test_empty_reports_found_elements() {
    let db = GraphDatabase::in_memory();
    create_person(&db, "Alice");
    assert_that(&find_nodes_by_label(&db, "Person"), &is_empty());
}

// ============================================================================
// Query Constructor Tests
// ============================================================================

#[test]
fn test_find_by_label_and_property() {
    let db = GraphDatabase::in_memory();
    let alice = create_person(&db, "Alice");
    create_person(&db, "Bob");

    let alices = find_nodes_by_label_and_property(&db, "Person", "name", "Alice");
    let carols = find_nodes_by_label_and_property(&db, "Person", "name", "Carol");
    assert_that(&alices, &contains_only([alice]));
    assert_that(&carols, &is_empty());
}

#[test]
fn test_property_keys() {
    let db = GraphDatabase::in_memory();
    let id = in_transaction(&db, TxOutcome::Commit, |tx| {
        let node = tx.create_node()?.with_property("name", "Alice").with_property("age", 30i64);
        tx.put_node(&node)?;
        Ok(node.id)
    })
    .expect("failed to create");

    let keys = get_property_keys(&db, id);
    let collected = keys.collection().expect("collect failed");
    assert_eq!(collected, vec!["age".to_owned(), "name".to_owned()]);
    assert_that(&keys, &contains(["name".to_owned()]));
}

#[test]
fn test_schema_queries() {
    let db = GraphDatabase::in_memory();
    let indexes = get_indexes(&db, "Person");
    let constraints = get_constraints(&db, "Person");
    let all_constraints = get_all_constraints(&db);
    assert_that(&indexes, &is_empty());
    assert_that(&all_constraints, &is_empty());

    let (index, constraint) = in_transaction(&db, TxOutcome::Commit, |tx| {
        let index = tx.create_index("Person", "name")?;
        let constraint = tx.create_uniqueness_constraint("Person", "email")?;
        tx.create_uniqueness_constraint("Pet", "chip")?;
        Ok((index, constraint))
    })
    .expect("failed to define schema");

    assert_that(&indexes, &contains_only([index]));
    assert_that(&constraints, &contains_only([constraint.clone()]));
    assert_eq!(all_constraints.collection().expect("collect failed").len(), 2);
    assert_that(&all_constraints, &contains([constraint]));
}
