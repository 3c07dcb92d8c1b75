//! Standard library compatibility layer
//!
//! Wraps `std::collections::BinaryHeap` behind the [`Heap`] trait.
//!
//! # Differences from BinaryHeap
//!
//! - **Min-heap vs Max-heap**: This is a min-heap, while `BinaryHeap` is a max-heap.
//!   Keys are stored as `std::cmp::Reverse<K>` internally.
//! - No `decrease_key`: this is the baseline the Fibonacci heap is checked
//!   against, not a replacement for it.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_ring_heap::Heap;
//! use fibonacci_ring_heap::stdlib_compat::StdHeap;
//!
//! let mut heap = StdHeap::new();
//! heap.push(5);
//! heap.push(3);
//! heap.push(7);
//! assert_eq!(heap.peek(), Some(&3)); // min-heap, unlike BinaryHeap's max-heap
//! assert_eq!(heap.pop(), Some(3));
//! ```

use crate::traits::Heap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A `BinaryHeap`-backed min-heap
#[derive(Debug, Clone)]
pub struct StdHeap<K: Ord> {
    heap: BinaryHeap<Reverse<K>>,
}

impl<K: Ord> Heap<K> for StdHeap<K> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn push(&mut self, key: K) {
        self.heap.push(Reverse(key))
    }

    fn peek(&self) -> Option<&K> {
        self.heap.peek().map(|Reverse(key)| key)
    }

    fn pop(&mut self) -> Option<K> {
        self.heap.pop().map(|Reverse(key)| key)
    }
}

impl<K: Ord> Default for StdHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}
