#![cfg(all(feature = "serde", feature = "ordered", feature = "sequence"))]
//! JSON serialization tests for every container.

use rstest::rstest;
use strata::ordered::{TreeMap, TreeMultiset, TreeSet};
use strata::sequence::{Deque, FixedArray, List, Queue, Stack, Vector};

#[rstest]
fn test_tree_map_serializes_as_sorted_object() {
    let map: TreeMap<String, i32> = [("b".to_string(), 2), ("a".to_string(), 1)]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":1,"b":2}"#);
    let restored: TreeMap<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, map);
}

#[rstest]
fn test_tree_map_last_duplicate_key_wins() {
    let restored: TreeMap<String, i32> = serde_json::from_str(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(restored.get("a"), Some(&2));
    assert_eq!(restored.len(), 1);
}

#[rstest]
fn test_sets_serialize_as_sorted_arrays() {
    let set: TreeSet<i32> = [3, 1, 2, 1].into_iter().collect();
    assert_eq!(serde_json::to_string(&set).unwrap(), "[1,2,3]");

    let multiset: TreeMultiset<i32> = serde_json::from_str("[2,1,2]").unwrap();
    assert_eq!(multiset.count(&2), 2);
    assert_eq!(serde_json::to_string(&multiset).unwrap(), "[1,2,2]");
}

#[rstest]
fn test_sequences_keep_their_order() {
    let vector: Vector<i32> = serde_json::from_str("[3,1,2]").unwrap();
    assert_eq!(vector.as_slice(), &[3, 1, 2]);

    let list: List<i32> = serde_json::from_str("[3,1,2]").unwrap();
    assert_eq!(serde_json::to_string(&list).unwrap(), "[3,1,2]");

    let mut deque: Deque<i32> = serde_json::from_str("[2,3]").unwrap();
    deque.push_front(1);
    assert_eq!(serde_json::to_string(&deque).unwrap(), "[1,2,3]");
}

#[rstest]
fn test_fixed_array_checks_length() {
    let array: FixedArray<u8, 3> = serde_json::from_str("[1,2,3]").unwrap();
    assert_eq!(array.into_inner(), [1, 2, 3]);
    assert!(serde_json::from_str::<FixedArray<u8, 3>>("[1,2]").is_err());
}

#[rstest]
fn test_adapters_serialize_their_storage() {
    let mut stack: Stack<i32> = Stack::new();
    stack.push(1);
    stack.push(2);
    assert_eq!(serde_json::to_string(&stack).unwrap(), "[1,2]");

    let mut queue: Queue<i32, List<i32>> = serde_json::from_str("[1,2]").unwrap();
    assert_eq!(queue.pop(), Ok(1));
}
