//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for min-priority queues
//! whose elements are bare ordered keys:
//!
//! - [`Heap`]: Base trait for simple heaps without `decrease_key` support
//! - [`DecreaseKeyHeap`]: Extended trait adding handle-based `decrease_key`
//!
//! The base [`Heap`] trait mirrors `BinaryHeap`'s `push`/`peek`/`pop` naming so
//! a std-backed heap can sit behind the same interface and serve as a
//! reference model in tests.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new key is greater than the current key
    KeyIncreased,
    /// The handle is no longer valid (element was extracted)
    InvalidHandle,
    /// A k-ary heap was asked for fewer than two children per node
    InvalidArity,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::KeyIncreased => {
                write!(f, "new key is greater than current key")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was extracted)")
            }
            HeapError::InvalidArity => write!(f, "heap arity must be at least 2"),
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
/// Handles never keep their element alive.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for min-heaps of ordered keys
///
/// # Example
///
/// ```rust
/// use fibonacci_ring_heap::Heap;
/// use fibonacci_ring_heap::stdlib_compat::StdHeap;
///
/// let mut heap = StdHeap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait Heap<K> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts a key
    fn push(&mut self, key: K);

    /// Returns the minimum key without removing it
    ///
    /// # Time Complexity
    /// O(1) for all implementations
    fn peek(&self) -> Option<&K>;

    /// Removes and returns the minimum key
    fn pop(&mut self) -> Option<K>;
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use fibonacci_ring_heap::{DecreaseKeyHeap, Heap};
/// use fibonacci_ring_heap::fibonacci::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<i32> = Heap::new();
/// let handle = heap.push_with_handle(10);
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some(&5));
/// ```
pub trait DecreaseKeyHeap<K>: Heap<K> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts a key, returning a handle to it
    fn push_with_handle(&mut self, key: K) -> Self::Handle;

    /// Lowers the key of the element identified by the handle
    ///
    /// The handle must come from this heap. Handles of extracted elements
    /// are rejected; handles of a different heap instance are not detected.
    ///
    /// # Errors
    /// Returns `HeapError::KeyIncreased` if the new key is greater than the
    /// current key, and `HeapError::InvalidHandle` if the element was already
    /// extracted. The heap is unchanged in both cases.
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;
}
