/*!
 * Registry Lifecycle Tests
 * Put/Delete semantics, handle independence, iteration
 */

use pretty_assertions::assert_eq;
use rendezvous::cell::{BroadcastCell, CellKind, RepeatableCell, SharedCell};
use rendezvous::registry::{IntRegistry, Registry, RegistryConfig, StringRegistry};
use std::collections::BTreeSet;
use std::ops::ControlFlow;
use std::sync::Arc;

#[test]
fn test_delete_keeps_held_cell_usable() {
    let registry = StringRegistry::<i32>::new();
    let (cell, _) = registry.get_or_create("k");

    assert!(registry.delete("k").is_some());
    cell.broadcast(7);

    assert_eq!(*cell.wait(), 7);
    assert!(registry.get("k").is_none());
    assert_eq!(registry.len(), 0);
}

#[test]
fn test_put_overwrite_and_read_only_none() {
    let registry = StringRegistry::<i32>::new();
    let a: SharedCell<i32> = Arc::new(RepeatableCell::new());
    let b: SharedCell<i32> = Arc::new(RepeatableCell::new());

    assert!(registry.put("k".to_string(), Some(a.clone())).is_none());

    let previous = registry.put("k".to_string(), Some(b.clone()));
    assert!(Arc::ptr_eq(&previous.unwrap(), &a));

    let current = registry.put("k".to_string(), None);
    assert!(Arc::ptr_eq(&current.unwrap(), &b));

    let (stored, existed) = registry.get_or_create("k");
    assert!(existed);
    assert!(Arc::ptr_eq(&stored, &b));
}

#[test]
fn test_len_tracks_inserts_minus_deletes() {
    let registry = IntRegistry::<()>::new();
    for key in 0..50i64 {
        registry.get_or_create(&key);
    }
    for key in (0..50i64).step_by(5) {
        registry.delete(&key);
    }
    // Deleting twice or deleting absent keys changes nothing
    registry.delete(&0);
    registry.delete(&1000);

    assert_eq!(registry.len(), 40);
}

#[test]
fn test_range_visits_every_key() {
    let registry = StringRegistry::<u8>::with_kind(CellKind::Once);
    for key in ["a", "b", "c", "d"] {
        registry.get_or_create(key);
    }

    let mut seen = BTreeSet::new();
    registry.range(|key, cell| {
        assert_eq!(cell.name(), "once");
        seen.insert(key.clone());
        ControlFlow::Continue(())
    });

    let expected: BTreeSet<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_range_stops_on_break() {
    let registry = IntRegistry::<u8>::new();
    for key in 0..20i64 {
        registry.get_or_create(&key);
    }

    let mut visits = 0;
    registry.range(|_, _| {
        visits += 1;
        ControlFlow::Break(())
    });
    assert_eq!(visits, 1);
}

#[test]
fn test_mixed_value_types_through_enum() {
    #[derive(Debug, PartialEq)]
    enum Outcome {
        Number(i64),
        Text(String),
        Nothing,
    }

    let registry: Registry<i64, Outcome> = Registry::new();
    let (one, _) = registry.get_or_create(&1);
    let (two, _) = registry.get_or_create(&777);
    let (three, _) = registry.get_or_create(&3);

    one.broadcast(Outcome::Number(123));
    two.broadcast(Outcome::Text("foobar".into()));
    three.broadcast(Outcome::Nothing);

    assert_eq!(*registry.get(&1).unwrap().wait(), Outcome::Number(123));
    assert_eq!(
        *registry.get(&777).unwrap().receive().unwrap(),
        Outcome::Text("foobar".into())
    );
    assert_eq!(*three.wait(), Outcome::Nothing);
}

#[test]
fn test_clear_and_debug() {
    let registry = StringRegistry::<u8>::with_config(RegistryConfig::high_contention()).unwrap();
    registry.get_or_create("x");
    registry.get_or_create("y");

    let debug = format!("{:?}", registry);
    assert!(debug.contains("Sharded"));
    assert!(debug.contains("len: 2"));

    registry.clear();
    assert!(registry.is_empty());
}
