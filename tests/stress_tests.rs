//! Stress tests that push the heap through large operation counts
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use fibonacci_ring_heap::fibonacci::FibonacciHeap;
use fibonacci_ring_heap::{DecreaseKeyHeap, Heap};

/// Test massive numbers of inserts and pops
fn test_massive_operations<H: Heap<i32>>() {
    let mut heap = H::new();

    for i in 0..10_000 {
        heap.push(i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.pop(), Some(i));
    }
    assert!(heap.is_empty());
}

/// Test many decrease_key operations
fn test_many_decrease_keys<H: DecreaseKeyHeap<i32>>() {
    let mut heap = H::new();
    let mut handles = Vec::new();

    for i in 0..500 {
        handles.push(heap.push_with_handle(10_000 + i));
    }
    // Build trees before decreasing
    heap.push_with_handle(-1);
    assert_eq!(heap.pop(), Some(-1));

    for (i, handle) in handles.iter().enumerate() {
        assert!(heap.decrease_key(handle, i as i32).is_ok());
    }

    for i in 0..500 {
        assert_eq!(heap.pop(), Some(i));
    }
}

/// Test alternating insert and pop
fn test_alternating_ops<H: Heap<i32>>() {
    let mut heap = H::new();
    let mut last = i32::MIN;

    for i in 0..2_000 {
        heap.push(i * 2);
        heap.push(i * 2 + 1);

        let popped = heap.pop().unwrap();
        assert!(popped >= last);
        last = popped;
    }

    assert_eq!(heap.len(), 2_000);
    while let Some(key) = heap.pop() {
        assert!(key >= last);
        last = key;
    }
}

/// Decrease keys of spread-out elements between extractions
fn test_decrease_between_extractions<H: DecreaseKeyHeap<i64>>() {
    let mut heap = H::new();
    let mut handles = Vec::new();
    let mut live: Vec<Option<i64>> = Vec::new();

    for i in 0..2_000i64 {
        let key = (i * 7919) % 10_007 + 20_000;
        handles.push(heap.push_with_handle(key));
        live.push(Some(key));
    }

    for round in 0..1_000usize {
        let idx = (round * 131) % handles.len();
        if let Some(current) = live[idx] {
            let lowered = current - 15_000;
            heap.decrease_key(&handles[idx], lowered).unwrap();
            live[idx] = Some(lowered);
        }

        if round % 3 == 0 {
            let expected = live.iter().flatten().min().copied();
            let popped = heap.pop();
            assert_eq!(popped, expected);
            // Keys are distinct, so the model entry is unambiguous
            let pos = live.iter().position(|key| *key == popped).unwrap();
            live[pos] = None;
        }
    }

    assert_eq!(heap.len(), live.iter().flatten().count());
    let mut last = i64::MIN;
    while let Some(key) = heap.pop() {
        assert!(key >= last);
        last = key;
    }
}

/// Decrease every key to the same value; ties must all come out
fn test_all_equal_after_decrease<H: DecreaseKeyHeap<i32>>() {
    let mut heap = H::new();
    let handles: Vec<_> = (0..300).map(|i| heap.push_with_handle(i + 1)).collect();
    heap.push_with_handle(0);
    assert_eq!(heap.pop(), Some(0));

    for handle in handles.iter().rev() {
        heap.decrease_key(handle, -7).unwrap();
    }

    for _ in 0..300 {
        assert_eq!(heap.pop(), Some(-7));
    }
    assert_eq!(heap.pop(), None);
}

#[test]
fn test_fibonacci_massive() {
    test_massive_operations::<FibonacciHeap<i32>>();
}

#[test]
fn test_fibonacci_many_decrease_keys() {
    test_many_decrease_keys::<FibonacciHeap<i32>>();
}

#[test]
fn test_fibonacci_alternating() {
    test_alternating_ops::<FibonacciHeap<i32>>();
}

#[test]
fn test_fibonacci_decrease_between_extractions() {
    test_decrease_between_extractions::<FibonacciHeap<i64>>();
}

#[test]
fn test_fibonacci_all_equal_after_decrease() {
    test_all_equal_after_decrease::<FibonacciHeap<i32>>();
}

#[test]
fn test_fibonacci_structure_under_load() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..4_096).map(|i| heap.insert(i * 3)).collect();

    for round in 0..512 {
        heap.extract_min();
        let idx = 4_095 - (round * 5) % 3_000;
        let _ = heap.decrease_key(&handles[idx], -(round as i32));
        if round % 64 == 0 {
            heap.validate().unwrap();
        }
    }

    heap.validate().unwrap();
    let remaining = heap.len();
    let sorted = heap.into_sorted_vec();
    assert_eq!(sorted.len(), remaining);
    assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
}
