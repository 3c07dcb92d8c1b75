//! Intrusive circular doubly-linked ring.
//!
//! Elements are named by a small copyable id (an arena key, a slice index,
//! ...) and carry their own [`CircularLink`]. The links live wherever the
//! elements live; a [`CircularList`] only records an entry point and a
//! length, and every operation borrows the [`LinkStore`] that owns the links.
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single element points to itself (both `next` and `prev`)
//! - The head is only an entry point; the tail is `head.prev`
//! - Appending, removing a known element and splicing two rings are O(1)
//! - Iteration wraps around, so traversal is bounded by the ring length
//!
//! This is the shape Fibonacci heaps want: siblings form a ring around their
//! parent, the roots form another ring, and an element moves between rings by
//! being spliced out of one and appended to another.
//!
//! # Example
//!
//! ```rust
//! use intrusive_circular_list::{CircularLink, CircularList};
//!
//! // Elements 0..4 addressed by index; their links live in a Vec.
//! let mut links: Vec<CircularLink<usize>> = (0..4).map(|_| CircularLink::new()).collect();
//! let mut ring = CircularList::new();
//!
//! ring.push_back(&mut links, 0);
//! ring.push_back(&mut links, 1);
//! ring.push_back(&mut links, 2);
//! ring.push_front(&mut links, 3);
//! assert_eq!(ring.to_vec(&links), vec![3, 0, 1, 2]);
//!
//! // O(1) removal given the element itself
//! ring.remove(&mut links, 0);
//! assert_eq!(ring.to_vec(&links), vec![3, 1, 2]);
//! assert!(!links[0].is_linked());
//! ```
//!
//! # Identity
//!
//! Searches and removals compare element ids with `==`, never the payload
//! the ids refer to. Two elements holding equal values are still distinct
//! ring members.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;
use core::iter::FusedIterator;

// =============================================================================
// CircularLink
// =============================================================================

/// Intrusive link that allows an element to be inserted into a circular list.
///
/// When unlinked, both `next` and `prev` are `None`.
/// When linked (even as a single element), both name valid ring members.
/// A single element in a circular list points to itself.
pub struct CircularLink<K> {
    next: Option<K>,
    prev: Option<K>,
}

impl<K: Copy> CircularLink<K> {
    /// Creates a new unlinked `CircularLink`.
    #[inline]
    pub const fn new() -> CircularLink<K> {
        CircularLink {
            next: None,
            prev: None,
        }
    }

    /// Checks whether the `CircularLink` is linked into a circular list.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.next.is_some()
    }

    /// Gets the id of the next element.
    #[inline]
    pub fn next(&self) -> Option<K> {
        self.next
    }

    /// Gets the id of the previous element.
    #[inline]
    pub fn prev(&self) -> Option<K> {
        self.prev
    }

    #[inline]
    fn unlink(&mut self) {
        self.next = None;
        self.prev = None;
    }
}

impl<K: Copy> Default for CircularLink<K> {
    #[inline]
    fn default() -> Self {
        CircularLink::new()
    }
}

impl<K: Copy> Clone for CircularLink<K> {
    /// Cloning a link creates a new unlinked link.
    #[inline]
    fn clone(&self) -> Self {
        CircularLink::new()
    }
}

impl<K: Copy> fmt::Debug for CircularLink<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_linked() {
            write!(f, "CircularLink(linked)")
        } else {
            write!(f, "CircularLink(unlinked)")
        }
    }
}

// =============================================================================
// LinkStore
// =============================================================================

/// Owner of the links embedded in ring elements.
///
/// Implementations map an element id to the [`CircularLink`] stored inside
/// that element. Asking for an id that is not present is a caller bug and may
/// panic.
pub trait LinkStore<K> {
    /// Returns the link embedded in element `id`.
    fn link(&self, id: K) -> &CircularLink<K>;

    /// Returns the link embedded in element `id` mutably.
    fn link_mut(&mut self, id: K) -> &mut CircularLink<K>;
}

impl LinkStore<usize> for [CircularLink<usize>] {
    #[inline]
    fn link(&self, id: usize) -> &CircularLink<usize> {
        &self[id]
    }

    #[inline]
    fn link_mut(&mut self, id: usize) -> &mut CircularLink<usize> {
        &mut self[id]
    }
}

impl LinkStore<usize> for Vec<CircularLink<usize>> {
    #[inline]
    fn link(&self, id: usize) -> &CircularLink<usize> {
        &self[id]
    }

    #[inline]
    fn link_mut(&mut self, id: usize) -> &mut CircularLink<usize> {
        &mut self[id]
    }
}

// =============================================================================
// CircularList
// =============================================================================

/// A circular doubly-linked ring of element ids.
///
/// The list itself is two words: an entry point and a length. It is not
/// `Clone`, since a copy would claim membership of elements whose links
/// already belong to this ring.
///
/// # Panics
///
/// Operations that follow links panic if the store reports a linked element
/// without neighbours, which only happens when the ring was corrupted by
/// mixing stores or removing an element that was never appended.
pub struct CircularList<K> {
    head: Option<K>,
    len: usize,
}

impl<K> Default for CircularList<K> {
    #[inline]
    fn default() -> Self {
        CircularList { head: None, len: 0 }
    }
}

impl<K: fmt::Debug> fmt::Debug for CircularList<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularList")
            .field("head", &self.head)
            .field("len", &self.len)
            .finish()
    }
}

impl<K: Copy + Eq> CircularList<K> {
    /// Creates an empty ring.
    #[inline]
    pub const fn new() -> Self {
        CircularList { head: None, len: 0 }
    }

    /// The entry point of the ring, if any.
    #[inline]
    pub fn head(&self) -> Option<K> {
        self.head
    }

    /// Number of elements in the ring. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the ring holds no elements. O(1).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn neighbours<S: LinkStore<K> + ?Sized>(store: &S, id: K) -> (K, K) {
        let link = store.link(id);
        match (link.prev, link.next) {
            (Some(prev), Some(next)) => (prev, next),
            _ => panic!("ring element is not linked"),
        }
    }

    /// Appends `id` at the tail, just before the head. O(1).
    ///
    /// `id` must not currently be linked into any ring.
    pub fn push_back<S: LinkStore<K> + ?Sized>(&mut self, store: &mut S, id: K) {
        debug_assert!(!store.link(id).is_linked(), "element is already linked");

        match self.head {
            None => {
                let link = store.link_mut(id);
                link.next = Some(id);
                link.prev = Some(id);
                self.head = Some(id);
            }
            Some(head) => {
                let (tail, _) = Self::neighbours(store, head);

                store.link_mut(tail).next = Some(id);
                let link = store.link_mut(id);
                link.prev = Some(tail);
                link.next = Some(head);
                store.link_mut(head).prev = Some(id);
            }
        }

        self.len += 1;
    }

    /// Prepends `id`, making it the new head. O(1).
    ///
    /// `id` must not currently be linked into any ring.
    pub fn push_front<S: LinkStore<K> + ?Sized>(&mut self, store: &mut S, id: K) {
        self.push_back(store, id);
        self.head = Some(id);
    }

    /// Splices `id` out of the ring using its own link. O(1).
    ///
    /// `id` must be a member of this ring. Membership is not validated
    /// beyond a debug assertion that the element is linked; removing an
    /// element of a different ring corrupts both rings' lengths.
    ///
    /// If `id` was the head, its successor becomes the head. The relative
    /// order of the remaining elements is unchanged.
    pub fn remove<S: LinkStore<K> + ?Sized>(&mut self, store: &mut S, id: K) {
        debug_assert!(store.link(id).is_linked(), "element is not linked");
        debug_assert!(self.len > 0, "remove from an empty ring");

        let (prev, next) = Self::neighbours(store, id);

        if next == id {
            // Single element - ring becomes empty
            self.head = None;
        } else {
            store.link_mut(prev).next = Some(next);
            store.link_mut(next).prev = Some(prev);
            if self.head == Some(id) {
                self.head = Some(next);
            }
        }

        store.link_mut(id).unlink();
        self.len -= 1;
    }

    /// Scans from the head for `id` and removes the first match.
    ///
    /// This is O(len); prefer [`remove`](Self::remove) when the caller already
    /// knows `id` is a member. Returns whether `id` was found.
    pub fn remove_by_identity<S: LinkStore<K> + ?Sized>(&mut self, store: &mut S, id: K) -> bool {
        match self.find(store, |candidate| candidate == id) {
            Some(found) => {
                self.remove(store, found);
                true
            }
            None => false,
        }
    }

    /// Returns true if `id` is a member of this ring. O(len).
    pub fn contains<S: LinkStore<K> + ?Sized>(&self, store: &S, id: K) -> bool {
        self.iter(store).any(|candidate| candidate == id)
    }

    /// Returns the first element, in ring order from the head, matching
    /// `predicate`.
    pub fn find<S, F>(&self, store: &S, mut predicate: F) -> Option<K>
    where
        S: LinkStore<K> + ?Sized,
        F: FnMut(K) -> bool,
    {
        self.iter(store).find(|&id| predicate(id))
    }

    /// Iterates over the ring once, starting at the head.
    ///
    /// The iterator copies the entry point and length, so every call starts a
    /// fresh traversal that visits each element exactly once.
    #[inline]
    pub fn iter<'a, S: LinkStore<K> + ?Sized>(&self, store: &'a S) -> Iter<'a, K, S> {
        Iter {
            store,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Copies the ring, in order from the head, into an independent vector.
    ///
    /// The snapshot stays valid however the ring is mutated afterwards.
    pub fn to_vec<S: LinkStore<K> + ?Sized>(&self, store: &S) -> Vec<K> {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.iter(store));
        out
    }

    /// Unlinks every element and leaves the ring empty. O(len).
    pub fn clear<S: LinkStore<K> + ?Sized>(&mut self, store: &mut S) {
        let mut cursor = self.head;
        for _ in 0..self.len {
            let Some(id) = cursor else { break };
            let link = store.link_mut(id);
            cursor = link.next;
            link.unlink();
        }

        self.head = None;
        self.len = 0;
    }

    /// Moves every element of `other` to the tail of `self`. O(1).
    ///
    /// Both rings must use the same store. Afterwards `self` starts at its
    /// old head (or at `other`'s head if `self` was empty), followed by its
    /// old elements and then `other`'s elements in their order.
    pub fn splice<S: LinkStore<K> + ?Sized>(&mut self, store: &mut S, other: CircularList<K>) {
        match (self.head, other.head) {
            (_, None) => {}
            (None, Some(_)) => *self = other,
            (Some(a), Some(b)) => {
                // Before:
                //   Ring A: a <-> ... <-> a_tail <-> a
                //   Ring B: b <-> ... <-> b_tail <-> b
                //
                // After:
                //   a <-> ... <-> a_tail <-> b <-> ... <-> b_tail <-> a
                let (a_tail, _) = Self::neighbours(store, a);
                let (b_tail, _) = Self::neighbours(store, b);

                store.link_mut(a_tail).next = Some(b);
                store.link_mut(b).prev = Some(a_tail);

                store.link_mut(b_tail).next = Some(a);
                store.link_mut(a).prev = Some(b_tail);

                self.len += other.len;
            }
        }
    }

    /// Counts elements by walking `next` links from the head until the walk
    /// returns to the head.
    ///
    /// This is O(n) - use sparingly. A consistent ring returns
    /// [`len`](Self::len); the walk gives up after `len + 1` steps so a
    /// corrupted ring reports a mismatch instead of looping.
    pub fn count_links<S: LinkStore<K> + ?Sized>(&self, store: &S) -> usize {
        let Some(head) = self.head else { return 0 };

        let mut count = 1;
        let mut current = store.link(head).next;
        while let Some(id) = current {
            if id == head || count > self.len {
                break;
            }
            count += 1;
            current = store.link(id).next;
        }

        count
    }
}

// =============================================================================
// Iter
// =============================================================================

/// Single pass over a [`CircularList`], in ring order from the head.
pub struct Iter<'a, K, S: ?Sized> {
    store: &'a S,
    next: Option<K>,
    remaining: usize,
}

impl<'a, K: Copy, S: LinkStore<K> + ?Sized> Iterator for Iter<'a, K, S> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<K> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        self.next = self.store.link(id).next();
        self.remaining -= 1;
        Some(id)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: Copy, S: LinkStore<K> + ?Sized> ExactSizeIterator for Iter<'a, K, S> {}

impl<'a, K: Copy, S: LinkStore<K> + ?Sized> FusedIterator for Iter<'a, K, S> {}

// =============================================================================
// Tests
// =============================================================================
