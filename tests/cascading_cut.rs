//! Structural tests for cuts and cascading cuts
//!
//! Seventeen inserts followed by one extraction leave a single binomial tree
//! of degree 4, whose shape is fully determined. The tests walk it through
//! the public introspection API and check mark bits and parents after each
//! decrease-key.

use fibonacci_ring_heap::fibonacci::{FibonacciHandle, FibonacciHeap};

/// Builds a heap holding one degree-4 tree of the keys 10, 20, ..., 160
fn degree_four_tree() -> FibonacciHeap<i32> {
    let mut heap = FibonacciHeap::new();
    for key in 0..=16 {
        heap.insert(key * 10);
    }
    assert_eq!(heap.extract_min(), Some(0));

    let roots: Vec<_> = heap.roots().collect();
    assert_eq!(roots.len(), 1);
    assert_eq!(heap.node_state(&roots[0]).unwrap().degree, 4);
    heap.validate().unwrap();
    heap
}

fn child_with_degree(heap: &FibonacciHeap<i32>, parent: &FibonacciHandle, degree: usize) -> FibonacciHandle {
    heap.children(parent)
        .find(|child| heap.node_state(child).unwrap().degree == degree)
        .unwrap()
}

fn is_marked(heap: &FibonacciHeap<i32>, node: &FibonacciHandle) -> bool {
    heap.node_state(node).unwrap().marked
}

fn parent_of(heap: &FibonacciHeap<i32>, node: &FibonacciHandle) -> Option<FibonacciHandle> {
    heap.node_state(node).unwrap().parent
}

#[test]
fn test_binomial_shape_after_consolidation() {
    let heap = degree_four_tree();
    let root = heap.roots().next().unwrap();

    let mut degrees: Vec<_> = heap
        .children(&root)
        .map(|child| heap.node_state(&child).unwrap().degree)
        .collect();
    degrees.sort_unstable();
    assert_eq!(degrees, vec![0, 1, 2, 3]);
    assert_eq!(heap.get(&root), Some(&10));
}

#[test]
fn test_cascading_cut_chain() {
    let mut heap = degree_four_tree();

    // root -> a (degree 3) -> b (degree 2) -> {c1 (degree 1), c0 (degree 0)}
    let root = heap.roots().next().unwrap();
    let a = child_with_degree(&heap, &root, 3);
    let b = child_with_degree(&heap, &a, 2);
    let c1 = child_with_degree(&heap, &b, 1);
    let c0 = child_with_degree(&heap, &b, 0);

    // First loss: b becomes marked, nothing else moves
    heap.decrease_key(&c0, -10).unwrap();
    assert_eq!(parent_of(&heap, &c0), None);
    assert!(is_marked(&heap, &b));
    assert_eq!(parent_of(&heap, &b), Some(a));
    assert!(!is_marked(&heap, &a));
    assert_eq!(heap.peek_min(), Some(&-10));
    heap.validate().unwrap();

    // Second loss: marked b is cut to the roots and unmarked, a gets marked
    heap.decrease_key(&c1, -20).unwrap();
    assert_eq!(parent_of(&heap, &c1), None);
    assert_eq!(parent_of(&heap, &b), None);
    assert!(!is_marked(&heap, &b));
    assert_eq!(heap.node_state(&b).unwrap().degree, 0);
    assert!(is_marked(&heap, &a));
    assert_eq!(parent_of(&heap, &a), Some(root));
    assert_eq!(heap.node_state(&a).unwrap().degree, 2);
    assert!(!is_marked(&heap, &root));
    assert_eq!(heap.peek_min(), Some(&-20));
    heap.validate().unwrap();

    // Third loss, at a: a is cut, and the cascade stops at the root without
    // marking it
    let a0 = child_with_degree(&heap, &a, 0);
    heap.decrease_key(&a0, -30).unwrap();
    assert_eq!(parent_of(&heap, &a), None);
    assert!(!is_marked(&heap, &a));
    assert!(!is_marked(&heap, &root));
    assert_eq!(heap.node_state(&root).unwrap().degree, 3);
    assert_eq!(heap.peek_min(), Some(&-30));
    heap.validate().unwrap();

    let roots = heap.roots().count();
    assert_eq!(roots, 6);

    let sorted = heap.into_sorted_vec();
    assert_eq!(sorted.len(), 16);
    assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(&sorted[..3], &[-30, -20, -10]);
}

#[test]
fn test_cut_of_unmarked_parent_only_marks() {
    let mut heap = degree_four_tree();
    let root = heap.roots().next().unwrap();
    let a = child_with_degree(&heap, &root, 3);
    let a0 = child_with_degree(&heap, &a, 0);

    heap.decrease_key(&a0, 5).unwrap();
    assert!(is_marked(&heap, &a));
    assert_eq!(parent_of(&heap, &a), Some(root));
    assert_eq!(heap.roots().count(), 2);
    assert_eq!(heap.peek_min(), Some(&5));
}

#[test]
fn test_cut_child_of_root_leaves_root_unmarked() {
    let mut heap = degree_four_tree();
    let root = heap.roots().next().unwrap();
    let leaf = child_with_degree(&heap, &root, 0);

    heap.decrease_key(&leaf, 1).unwrap();
    assert_eq!(parent_of(&heap, &leaf), None);
    assert!(!is_marked(&heap, &root));
    assert_eq!(heap.node_state(&root).unwrap().degree, 3);
    heap.validate().unwrap();
}

#[test]
fn test_extract_clears_marks_of_promoted_children() {
    let mut heap = degree_four_tree();
    let root = heap.roots().next().unwrap();
    let a = child_with_degree(&heap, &root, 3);
    let b = child_with_degree(&heap, &a, 2);
    let c0 = child_with_degree(&heap, &b, 0);

    // Mark b by cutting one of its children
    heap.decrease_key(&c0, 15).unwrap();
    assert!(is_marked(&heap, &b));

    // Extract 10 (the root) then 15 (c0); whichever of a and b end up as
    // roots must have lost their marks
    assert_eq!(heap.extract_min(), Some(10));
    assert_eq!(heap.extract_min(), Some(15));
    for handle in [a, b] {
        if parent_of(&heap, &handle).is_none() {
            assert!(!is_marked(&heap, &handle));
        }
    }
    heap.validate().unwrap();
}
