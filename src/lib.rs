//! Fibonacci heap on an intrusive circular ring
//!
//! This crate provides a min-priority queue with efficient `decrease_key`
//! support, built from two layers:
//!
//! - [`intrusive_circular_list`]: an index-addressed circular doubly-linked
//!   ring with O(1) append, O(1) removal of a known element and O(1) splice
//! - [`fibonacci::FibonacciHeap`]: the heap itself, whose root list and
//!   sibling lists are such rings over an arena of nodes
//!
//! [`kary::KaryHeap`] is an array-backed k-ary heap for callers that never
//! need `decrease_key`.
//!
//! # Complexity
//!
//! | Operation      | Cost               |
//! |----------------|--------------------|
//! | `insert`       | O(1)               |
//! | `peek_min`     | O(1)               |
//! | `extract_min`  | O(log n) amortized |
//! | `decrease_key` | O(1) amortized     |
//!
//! # Example
//!
//! ```rust
//! use fibonacci_ring_heap::fibonacci::FibonacciHeap;
//! use fibonacci_ring_heap::HeapError;
//!
//! let mut heap = FibonacciHeap::new();
//! heap.insert(10);
//! let handle = heap.insert(20);
//! heap.decrease_key(&handle, 2).unwrap();
//! assert_eq!(heap.peek_min(), Some(&2));
//! assert_eq!(heap.decrease_key(&handle, 3), Err(HeapError::KeyIncreased));
//! ```

pub mod comparator;
pub mod fibonacci;
pub mod kary;
pub mod stdlib_compat;
pub mod traits;

pub use intrusive_circular_list;

// Re-export the main traits for convenience
pub use comparator::{Comparator, Natural, Reversed};
pub use fibonacci::{FibonacciHandle, FibonacciHeap};
pub use kary::KaryHeap;
pub use traits::{DecreaseKeyHeap, Heap, HeapError};
