//! Integration tests for graph transactions.

use graphassert_core::{Label, NodeId, Value};
use graphassert_graph::{GraphDatabase, GraphError, GraphResult, Rows};
use graphassert_storage::backends::MemoryEngine;

fn collect<T>(rows: GraphResult<Rows<'_, T>>) -> Vec<T> {
    rows.expect("query failed").collect::<GraphResult<_>>().expect("row failed")
}

fn create_person(db: &GraphDatabase<MemoryEngine>, name: &str) -> NodeId {
    let mut tx = db.begin_tx().expect("failed to begin");
    let node = tx.create_node().expect("failed to create").with_label("Person").with_property("name", name);
    tx.put_node(&node).expect("failed to put");
    tx.success();
    tx.close().expect("failed to commit");
    node.id
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_transaction_ids_are_unique() {
    let db = GraphDatabase::in_memory();
    let tx1 = db.begin_tx().expect("failed to begin tx1");
    let tx2 = db.begin_tx().expect("failed to begin tx2");
    assert_ne!(tx1.id(), tx2.id());
}

#[test]
fn test_commit_requires_success() {
    let db = GraphDatabase::in_memory();

    let mut tx = db.begin_tx().expect("failed to begin");
    let node = tx.create_node().expect("failed to create");
    tx.close().expect("failed to close");

    let tx = db.begin_tx().expect("failed to begin");
    assert!(matches!(tx.get_node(node.id), Err(GraphError::NodeNotFound(_))));
}

#[test]
fn test_failure_overrides_success() {
    let db = GraphDatabase::in_memory();

    let mut tx = db.begin_tx().expect("failed to begin");
    let node = tx.create_node().expect("failed to create");
    tx.failure();
    tx.success();
    tx.close().expect("failed to close");

    let tx = db.begin_tx().expect("failed to begin");
    assert!(tx.get_node(node.id).is_err());
}

#[test]
fn test_drop_rolls_back() {
    let db = GraphDatabase::in_memory();

    let id = {
        let mut tx = db.begin_tx().expect("failed to begin");
        let node = tx.create_node().expect("failed to create");
        tx.success();
        node.id
    };

    let tx = db.begin_tx().expect("failed to begin");
    assert!(tx.get_node(id).is_err());
    drop(tx);

    let stats = db.stats();
    assert_eq!(stats.begun, 2);
    assert_eq!(stats.rolled_back, 2);
    assert_eq!(stats.open(), 0);
}

#[test]
fn test_stats_track_open_transactions() {
    let db = GraphDatabase::in_memory();

    let tx = db.begin_tx().expect("failed to begin");
    assert_eq!(db.stats().open(), 1);

    let mut tx2 = db.begin_tx().expect("failed to begin");
    tx2.success();
    tx2.close().expect("failed to close");
    tx.close().expect("failed to close");

    let stats = db.stats();
    assert_eq!(stats.committed, 1);
    assert_eq!(stats.rolled_back, 1);
    assert_eq!(stats.closed(), 2);
    assert_eq!(stats.open(), 0);
}

#[test]
fn test_reads_do_not_upgrade() {
    let db = GraphDatabase::in_memory();
    create_person(&db, "Alice");

    let mut tx = db.begin_tx().expect("failed to begin");
    let _ = collect(tx.find_nodes_by_label(&Label::new("Person")));
    assert!(!tx.is_writable());

    tx.create_node().expect("failed to create");
    assert!(tx.is_writable());
}

#[test]
fn test_snapshot_isolation() {
    let db = GraphDatabase::in_memory();
    let reader = db.begin_tx().expect("failed to begin");

    create_person(&db, "Alice");

    assert!(collect(reader.find_nodes_by_label(&Label::new("Person"))).is_empty());
    let fresh = db.begin_tx().expect("failed to begin");
    assert_eq!(collect(fresh.find_nodes_by_label(&Label::new("Person"))).len(), 1);
}

// ============================================================================
// Node Tests
// ============================================================================

#[test]
fn test_put_node_updates_labels() {
    let db = GraphDatabase::in_memory();
    let id = create_person(&db, "Alice");

    let mut tx = db.begin_tx().expect("failed to begin");
    let mut node = tx.get_node(id).expect("failed to get");
    node.remove_label(&Label::new("Person"));
    node.add_label("Employee");
    tx.put_node(&node).expect("failed to put");
    tx.success();
    tx.close().expect("failed to commit");

    let tx = db.begin_tx().expect("failed to begin");
    assert!(collect(tx.find_nodes_by_label(&Label::new("Person"))).is_empty());
    assert_eq!(collect(tx.find_nodes_by_label(&Label::new("Employee"))), vec![id]);
}

#[test]
fn test_delete_node() {
    let db = GraphDatabase::in_memory();
    let id = create_person(&db, "Alice");

    let mut tx = db.begin_tx().expect("failed to begin");
    assert!(tx.delete_node(id).expect("failed to delete"));
    assert!(!tx.delete_node(id).expect("failed to delete"));
    assert!(collect(tx.find_nodes_by_label(&Label::new("Person"))).is_empty());
}

#[test]
fn test_find_by_label_and_property_scans_without_index() {
    let db = GraphDatabase::in_memory();
    let alice = create_person(&db, "Alice");
    create_person(&db, "Bob");

    let tx = db.begin_tx().expect("failed to begin");
    let found = collect(tx.find_nodes_by_label_and_property(
        &Label::new("Person"),
        "name",
        &Value::from("Alice"),
    ));
    assert_eq!(found, vec![alice]);
}

#[test]
fn test_property_keys_are_sorted() {
    let db = GraphDatabase::in_memory();

    let mut tx = db.begin_tx().expect("failed to begin");
    let node = tx
        .create_node()
        .expect("failed to create")
        .with_property("zeta", 1i64)
        .with_property("alpha", 2i64);
    tx.put_node(&node).expect("failed to put");

    assert_eq!(collect(tx.property_keys(node.id)), vec!["alpha".to_owned(), "zeta".to_owned()]);
}

// ============================================================================
// Constraint Tests
// ============================================================================

#[test]
fn test_uniqueness_constraint_rejects_duplicates() {
    let db = GraphDatabase::in_memory();
    create_person(&db, "Alice");

    let mut tx = db.begin_tx().expect("failed to begin");
    let constraint = tx.create_uniqueness_constraint("Person", "name").expect("failed to create");
    tx.success();
    tx.close().expect("failed to commit");

    let mut tx = db.begin_tx().expect("failed to begin");
    let dup = tx.create_node().expect("failed to create").with_label("Person").with_property("name", "Alice");
    assert!(matches!(tx.put_node(&dup), Err(GraphError::ConstraintViolation(_))));

    assert_eq!(collect(tx.constraints(&Label::new("Person"))), vec![constraint.clone()]);
    assert_eq!(collect(tx.all_constraints()), vec![constraint]);
    assert!(collect(tx.constraints(&Label::new("Pet"))).is_empty());
}

#[test]
fn test_uniqueness_constraint_checks_existing_data() {
    let db = GraphDatabase::in_memory();
    create_person(&db, "Alice");
    create_person(&db, "Alice");

    let mut tx = db.begin_tx().expect("failed to begin");
    let result = tx.create_uniqueness_constraint("Person", "name");
    assert!(matches!(result, Err(GraphError::ConstraintViolation(_))));
}

#[test]
fn test_duplicate_constraint_is_rejected() {
    let db = GraphDatabase::in_memory();

    let mut tx = db.begin_tx().expect("failed to begin");
    tx.create_uniqueness_constraint("Person", "name").expect("failed to create");
    let result = tx.create_uniqueness_constraint("Person", "name");
    assert!(matches!(result, Err(GraphError::ConstraintAlreadyExists { .. })));
}

#[test]
fn test_node_may_keep_its_own_unique_value() {
    let db = GraphDatabase::in_memory();
    let id = create_person(&db, "Alice");

    let mut tx = db.begin_tx().expect("failed to begin");
    tx.create_uniqueness_constraint("Person", "name").expect("failed to create");
    let node = tx.get_node(id).expect("failed to get").with_property("age", 30i64);
    tx.put_node(&node).expect("re-putting the same value should succeed");
}
