//! K-ary heap implementation
//!
//! An array-backed heap in which every node has up to `k` children, stored in
//! level order: the children of index `i` sit at `k * i + 1 ..= k * i + k`.
//! A wider node makes the tree shallower, so `push` does fewer comparisons
//! while `pop` compares more siblings on each level.
//!
//! Like [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) it returns the
//! smallest key under its [`Comparator`] first; wrap the comparator in
//! [`Reversed`](crate::comparator::Reversed) for a max-heap. It has no
//! `decrease_key`, since array positions move on every sift.
//!
//! # Time Complexity
//!
//! | Operation  | Complexity     |
//! |------------|----------------|
//! | `push`     | O(log_k n)     |
//! | `pop`      | O(k log_k n)   |
//! | `peek`     | O(1)           |
//! | `push_pop` | O(k log_k n)   |
//! | `replace`  | O(k log_k n)   |
//! | `from_vec` | O(n)           |
//!
//! # Example
//!
//! ```rust
//! use fibonacci_ring_heap::kary::KaryHeap;
//! use fibonacci_ring_heap::{Natural, Reversed};
//!
//! let mut heap = KaryHeap::with_arity(4).unwrap();
//! heap.push(3);
//! heap.push(1);
//! heap.push(2);
//! assert_eq!(heap.peek(), Some(&1));
//! assert_eq!(heap.pop(), Some(1));
//!
//! let max = KaryHeap::from_vec(3, Reversed(Natural), vec![4, 9, 1]).unwrap();
//! assert_eq!(max.into_sorted_vec(), vec![9, 4, 1]);
//! ```

use tracing::trace;

use crate::comparator::{Comparator, Natural};
use crate::traits::{Heap, HeapError};

/// Smallest arity accepted by the constructors
pub const MIN_ARITY: usize = 2;

/// A k-ary min-heap of keys ordered by `C`
#[derive(Debug, Clone)]
pub struct KaryHeap<K, C = Natural> {
    /// Keys in level order; index 0 is the root
    data: Vec<K>,
    arity: usize,
    cmp: C,
}

impl<K: Ord> KaryHeap<K> {
    /// Creates an empty binary heap ordered by `K`'s `Ord`
    pub fn new() -> Self {
        Self::empty(MIN_ARITY, Natural)
    }

    /// Creates an empty heap with `arity` children per node, ordered by `K`'s `Ord`
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidArity`] if `arity` is below [`MIN_ARITY`].
    pub fn with_arity(arity: usize) -> Result<Self, HeapError> {
        Self::with_comparator(arity, Natural)
    }
}

impl<K: Ord> Default for KaryHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Comparator<K>> KaryHeap<K, C> {
    /// Creates an empty heap with `arity` children per node, ordered by `cmp`
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidArity`] if `arity` is below [`MIN_ARITY`].
    pub fn with_comparator(arity: usize, cmp: C) -> Result<Self, HeapError> {
        Self::from_vec(arity, cmp, Vec::new())
    }

    /// Builds a heap from arbitrary keys in O(n)
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidArity`] if `arity` is below [`MIN_ARITY`].
    pub fn from_vec(arity: usize, cmp: C, data: Vec<K>) -> Result<Self, HeapError> {
        if arity < MIN_ARITY {
            return Err(HeapError::InvalidArity);
        }

        let mut heap = Self { data, arity, cmp };
        heap.heapify();
        Ok(heap)
    }

    fn empty(arity: usize, cmp: C) -> Self {
        Self {
            data: Vec::new(),
            arity,
            cmp,
        }
    }

    /// Number of children per node
    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the minimum key without removing it
    #[inline]
    pub fn peek(&self) -> Option<&K> {
        self.data.first()
    }

    /// Inserts a key
    pub fn push(&mut self, key: K) {
        self.data.push(key);
        self.sift_up(self.data.len() - 1);
    }

    /// Removes and returns the minimum key
    pub fn pop(&mut self) -> Option<K> {
        if self.data.is_empty() {
            return None;
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let result = self.data.pop();

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        result
    }

    /// Pushes `key`, then pops the minimum, in one sift
    ///
    /// Returns `key` itself, leaving the heap untouched, when the heap is
    /// empty or `key` does not order after the current minimum.
    pub fn push_pop(&mut self, mut key: K) -> K {
        match self.data.first_mut() {
            Some(root) if self.cmp.less(root, &key) => {
                std::mem::swap(root, &mut key);
                self.sift_down(0);
                key
            }
            _ => key,
        }
    }

    /// Pops the minimum, then pushes `key`, in one sift
    ///
    /// Unlike [`push_pop`](Self::push_pop) the old minimum is returned even
    /// when `key` orders before it. On an empty heap `key` is simply
    /// inserted and `None` is returned.
    pub fn replace(&mut self, mut key: K) -> Option<K> {
        let Some(root) = self.data.first_mut() else {
            self.data.push(key);
            return None;
        };

        std::mem::swap(root, &mut key);
        self.sift_down(0);
        Some(key)
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The keys in level order
    pub fn as_slice(&self) -> &[K] {
        &self.data
    }

    /// Consumes the heap, returning its keys in level order
    pub fn into_vec(self) -> Vec<K> {
        self.data
    }

    /// Consumes the heap, returning its keys in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(key) = self.pop() {
            out.push(key);
        }
        out
    }

    /// Sifts down every internal node, last parent first
    fn heapify(&mut self) {
        let len = self.data.len();
        if len < 2 {
            return;
        }

        for index in (0..=(len - 2) / self.arity).rev() {
            self.sift_down(index);
        }

        trace!(len, arity = self.arity, "heapified");
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.cmp.less(&self.data[a], &self.data[b])
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / self.arity;
            if self.less(index, parent) {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let first = self.arity * index + 1;
            if first >= len {
                break;
            }

            // Leftmost child wins among equals
            let last = (first + self.arity).min(len);
            let mut best = first;
            for child in first + 1..last {
                if self.less(child, best) {
                    best = child;
                }
            }

            if self.less(best, index) {
                self.data.swap(index, best);
                index = best;
            } else {
                break;
            }
        }
    }
}

impl<K, C: Comparator<K>> Extend<K> for KaryHeap<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.push(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for KaryHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::empty(MIN_ARITY, Natural);
        heap.data = iter.into_iter().collect();
        heap.heapify();
        heap
    }
}

impl<K, C: Comparator<K> + Default> Heap<K> for KaryHeap<K, C> {
    fn new() -> Self {
        Self::empty(MIN_ARITY, C::default())
    }

    fn is_empty(&self) -> bool {
        KaryHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        KaryHeap::len(self)
    }

    fn push(&mut self, key: K) {
        KaryHeap::push(self, key);
    }

    fn peek(&self) -> Option<&K> {
        KaryHeap::peek(self)
    }

    fn pop(&mut self) -> Option<K> {
        KaryHeap::pop(self)
    }
}
