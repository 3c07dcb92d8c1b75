//! Key ordering fixed at heap construction.
//!
//! A [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) orders its keys with
//! a [`Comparator`] chosen once, when the heap is built. [`Natural`] uses the
//! key's own `Ord`; any `Fn(&K, &K) -> Ordering` closure works as well, which
//! covers keys like `f64` that only have a total order through
//! `f64::total_cmp`.
//!
//! ```rust
//! use fibonacci_ring_heap::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::with_comparator(f64::total_cmp);
//! heap.insert(2.5);
//! heap.insert(-1.0);
//! assert_eq!(heap.peek_min(), Some(&-1.0));
//! ```

use std::cmp::Ordering;

/// A total order over `K`.
///
/// Implementations must be consistent for the lifetime of the heap: the same
/// pair of keys must always compare the same way.
pub trait Comparator<K> {
    /// Compares two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Returns true if `a` orders strictly before `b`.
    #[inline]
    fn less(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator, turning the min-heap into a max-heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<K, C: Comparator<K>> Comparator<K> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<K, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural() {
        assert!(Natural.less(&1, &2));
        assert!(!Natural.less(&2, &2));
        assert_eq!(Natural.compare(&"b", &"a"), Ordering::Greater);
    }

    #[test]
    fn test_reversed() {
        let cmp = Reversed(Natural);
        assert!(cmp.less(&2, &1));
        assert!(!cmp.less(&1, &2));
    }

    #[test]
    fn test_closure() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert!(by_len.less(&"ab", &"abc"));
        assert!(Comparator::<f64>::less(&f64::total_cmp, &-0.5, &0.5));
    }
}
