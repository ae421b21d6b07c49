#![cfg(feature = "sequence")]
//! Integration tests for the linear containers and the stack/queue adapters.

use rstest::rstest;
use strata::error::ContainerError;
use strata::sequence::{Deque, FixedArray, List, Queue, Stack, Vector};

fn empty(container: &'static str, operation: &'static str) -> ContainerError {
    ContainerError::EmptyContainerAccess {
        container,
        operation,
    }
}

// =============================================================================
// Vector
// =============================================================================

#[rstest]
fn test_vector_checked_access() {
    let vector: Vector<i32> = (1..=3).collect();
    assert_eq!(vector.at(2), Ok(&3));
    assert_eq!(
        vector.at(3),
        Err(ContainerError::IndexOutOfRange {
            index: 3,
            length: 3
        })
    );
    assert_eq!(vector[0], 1);
}

#[rstest]
fn test_vector_insert_and_erase_in_the_middle() {
    let mut vector: Vector<char> = "ace".chars().collect();
    assert_eq!(vector.insert(1, 'b'), Ok(1));
    assert_eq!(vector.insert(3, 'd'), Ok(3));
    assert_eq!(vector.as_slice(), &['a', 'b', 'c', 'd', 'e']);
    assert_eq!(vector.erase(0), Ok('a'));
    assert!(vector.erase(4).is_err());
    assert_eq!(vector.len(), 4);
}

#[rstest]
fn test_vector_empty_access() {
    let mut vector: Vector<u8> = Vector::new();
    assert_eq!(vector.front(), Err(empty("Vector", "front")));
    assert_eq!(vector.pop_back(), Err(empty("Vector", "pop_back")));
}

#[rstest]
fn test_vector_capacity_limits() {
    let mut vector: Vector<u64> = Vector::new();
    assert!(vector.reserve(16).is_ok());
    assert!(vector.capacity() >= 16);
    let too_many = Vector::<u64>::max_size() + 1;
    assert_eq!(
        vector.reserve(too_many),
        Err(ContainerError::CapacityExceeded {
            requested: too_many,
            maximum: Vector::<u64>::max_size(),
        })
    );
    assert!(Vector::<u64>::with_len(too_many).is_err());
    assert_eq!(Vector::<u64>::with_len(4).map(|vector| vector.len()), Ok(4));
}

#[rstest]
fn test_vector_unsatisfiable_reserve_is_an_error() {
    let mut vector: Vector<u64> = [1, 2, 3].into_iter().collect();
    let requested = Vector::<u64>::max_size();
    assert_eq!(
        vector.reserve(requested),
        Err(ContainerError::CapacityExceeded {
            requested,
            maximum: Vector::<u64>::max_size(),
        })
    );
    assert_eq!(vector.as_slice(), &[1, 2, 3]);
    assert!(Vector::<u64>::with_len(requested).is_err());
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Ticket(u32);

#[rstest]
fn test_vector_default_does_not_need_default_elements() {
    let vector: Vector<Ticket> = Vector::default();
    assert!(vector.is_empty());
    let mut stack: Stack<Ticket, Vector<Ticket>> = Stack::default();
    stack.push(Ticket(7));
    assert_eq!(stack.pop(), Ok(Ticket(7)));
}

// =============================================================================
// List
// =============================================================================

#[rstest]
fn test_list_positions_survive_sort_and_reverse() {
    let mut list: List<i32> = [3, 1, 2].into_iter().collect();
    let three = list.first_position();
    list.sort();
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(list.last_position(), three);
    list.reverse();
    assert_eq!(list.first_position(), three);
    assert_eq!(list.get(three), Some(&3));
}

#[rstest]
fn test_list_splice_empties_the_source() {
    let mut list: List<i32> = [1, 4].into_iter().collect();
    let mut other: List<i32> = [2, 3].into_iter().collect();
    let stale = other.first_position();
    let four = list.last_position();
    assert_eq!(list.splice(four, &mut other), Ok(()));
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert!(other.is_empty());
    assert!(!other.is_valid(stale));
}

#[rstest]
fn test_list_merge_and_unique() {
    let mut list: List<i32> = [1, 3, 5].into_iter().collect();
    let mut other: List<i32> = [1, 2, 5, 6].into_iter().collect();
    list.merge(&mut other);
    assert_eq!(
        list.iter().copied().collect::<Vec<_>>(),
        vec![1, 1, 2, 3, 5, 5, 6]
    );
    assert_eq!(list.unique(), 2);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 5, 6]);
}

#[rstest]
fn test_list_erase_end_is_invalid() {
    let mut list: List<i32> = [1].into_iter().collect();
    assert_eq!(
        list.erase(list.end_position()),
        Err(ContainerError::InvalidIterator)
    );
    let only = list.first_position();
    assert_eq!(list.erase(only), Ok(1));
    assert_eq!(list.erase(only), Err(ContainerError::InvalidIterator));
    assert_eq!(list.pop_front(), Err(empty("List", "pop_front")));
}

// =============================================================================
// Deque
// =============================================================================

#[rstest]
fn test_deque_pops_across_the_middle() {
    let mut deque = Deque::new();
    for value in 0..6 {
        deque.push_back(value);
    }
    assert_eq!(deque.pop_front(), Ok(0));
    deque.push_front(-1);
    assert_eq!(deque.pop_back(), Ok(5));
    assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![-1, 1, 2, 3, 4]);
    assert_eq!(deque.get(1), Some(&1));
    assert_eq!(deque.get(5), None);
}

#[rstest]
fn test_deque_drains_from_one_side() {
    let mut deque: Deque<i32> = Deque::new();
    for value in 0..5 {
        deque.push_front(value);
    }
    let drained: Vec<i32> = std::iter::from_fn(|| deque.pop_front().ok()).collect();
    assert_eq!(drained, vec![4, 3, 2, 1, 0]);
    assert_eq!(deque.back(), Err(empty("Deque", "back")));
}

// =============================================================================
// FixedArray
// =============================================================================

#[rstest]
fn test_fixed_array_access() {
    let mut array = FixedArray::from_array([1, 2, 3]);
    assert_eq!(array.len(), 3);
    assert_eq!(array.front(), Ok(&1));
    assert_eq!(array.back(), Ok(&3));
    *array.at_mut(1).unwrap() = 20;
    assert_eq!(array.into_inner(), [1, 20, 3]);
}

#[rstest]
fn test_zero_length_fixed_array() {
    let array: FixedArray<u8, 0> = FixedArray::new();
    assert!(array.is_empty());
    assert_eq!(array.front(), Err(empty("FixedArray", "front")));
    assert!(array.at(0).is_err());
}

// =============================================================================
// Adapters
// =============================================================================

#[rstest]
fn test_stack_is_lifo_over_any_storage() {
    let mut on_deque: Stack<i32> = Stack::new();
    let mut on_vector: Stack<i32, Vector<i32>> = Stack::new();
    let mut on_list: Stack<i32, List<i32>> = Stack::new();
    for value in 1..=3 {
        on_deque.push(value);
        on_vector.push(value);
        on_list.push(value);
    }
    assert_eq!(on_deque.top(), Ok(&3));
    for expected in (1..=3).rev() {
        assert_eq!(on_deque.pop(), Ok(expected));
        assert_eq!(on_vector.pop(), Ok(expected));
        assert_eq!(on_list.pop(), Ok(expected));
    }
    assert_eq!(on_vector.pop(), Err(empty("Stack", "pop")));
}

#[rstest]
fn test_queue_is_fifo() {
    let mut queue: Queue<&str, List<&str>> = Queue::new();
    queue.push("a");
    queue.push("b");
    assert_eq!(queue.front(), Ok(&"a"));
    assert_eq!(queue.back(), Ok(&"b"));
    assert_eq!(queue.pop(), Ok("a"));
    assert_eq!(queue.pop(), Ok("b"));
    assert_eq!(queue.front(), Err(empty("Queue", "front")));
}
