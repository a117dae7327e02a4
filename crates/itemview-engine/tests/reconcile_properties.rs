use itemview_engine::{effective_columns, reconcile};
use std::collections::BTreeSet;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn cases() -> Vec<(Option<Vec<String>>, Vec<String>)> {
    let live = names(&["id", "name", "created_at", "price"]);
    vec![
        (None, live.clone()),
        (Some(vec![]), live.clone()),
        (Some(names(&["name", "id"])), live.clone()),
        (Some(names(&["price", "created_at", "name", "id"])), live.clone()),
        (Some(names(&["ghost", "price", "ghost", "id"])), live.clone()),
        (Some(names(&["a", "b", "c"])), live.clone()),
        (Some(names(&["name", "id"])), vec![]),
        (Some(names(&["b", "a"])), names(&["a", "b", "a"])),
    ]
}

fn is_permutation_of(order: &[String], live: &[String]) -> bool {
    let expected: BTreeSet<&String> = live.iter().collect();
    let actual: BTreeSet<&String> = order.iter().collect();
    order.len() == expected.len() && actual == expected
}

#[test]
fn test_result_is_always_a_permutation_of_live_fields() {
    for (stored, live) in cases() {
        let result = reconcile(stored.as_deref(), &live);
        assert!(
            is_permutation_of(&result.order, &live),
            "stored={:?} live={:?} result={:?}",
            stored,
            live,
            result.order
        );
    }
}

#[test]
fn test_reconcile_is_idempotent() {
    for (stored, live) in cases() {
        let once = reconcile(stored.as_deref(), &live);
        let twice = reconcile(Some(once.order.as_slice()), &live);
        assert_eq!(twice.order, once.order);
        assert!(!twice.changed, "second pass must not request a write");
    }
}

#[test]
fn test_schema_drift_scenario() {
    let stored = names(&["name", "id"]);
    let live = names(&["id", "name", "created_at"]);
    let result = reconcile(Some(stored.as_slice()), &live);
    insta::assert_json_snapshot!(result.order, @r#"
    [
      "name",
      "id",
      "created_at"
    ]
    "#);
    assert!(result.changed);
}

#[test]
fn test_hiding_keeps_neighbours_in_place() {
    let live = names(&["id", "title", "description", "price"]);
    let order = reconcile(None, &live).order;
    let hidden: BTreeSet<String> = ["description".to_string()].into();
    assert_eq!(
        effective_columns(&order, &hidden),
        names(&["id", "title", "price"])
    );
}
