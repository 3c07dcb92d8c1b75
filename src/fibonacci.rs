//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(1) find_min
//! - O(log n) amortized extract_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular ring, and so are the children of every node. The heap keeps a
//! reference to the minimum root.
//!
//! # Storage
//!
//! Nodes live in a [`SlotMap`] arena and refer to each other by key, so the
//! parent/child cycles of the tree are plain data rather than owning pointers.
//! Each node embeds one [`CircularLink`]: a node is a member of exactly one ring
//! at a time (the root ring or its parent's child ring), so cutting it out is an
//! O(1) splice through that link.
//!
//! Handles are arena keys. They are generational, so a handle whose element has
//! been extracted is reported as [`HeapError::InvalidHandle`] rather than
//! addressing whatever reused the slot. Handles from a different heap instance
//! are not detected.

use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use intrusive_circular_list::{CircularLink, CircularList, LinkStore};
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::comparator::{Comparator, Natural};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};

new_key_type! {
    /// Arena key of a heap node
    struct NodeKey;
}

/// Handle to an element in a Fibonacci heap
///
/// Returned by [`FibonacciHeap::insert`]; pass it to
/// [`FibonacciHeap::decrease_key`] to lower that element's key. A handle does
/// not keep its element alive and becomes stale once the element is extracted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle(NodeKey);

impl Handle for FibonacciHandle {}

struct Node<K> {
    key: K,
    degree: usize,
    marked: bool,
    parent: Option<NodeKey>,
    children: CircularList<NodeKey>,
    // Position in the root ring or in the parent's child ring
    link: CircularLink<NodeKey>,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            degree: 0,
            marked: false,
            parent: None,
            children: CircularList::new(),
            link: CircularLink::new(),
        }
    }
}

impl<K> LinkStore<NodeKey> for SlotMap<NodeKey, Node<K>> {
    #[inline]
    fn link(&self, id: NodeKey) -> &CircularLink<NodeKey> {
        &self[id].link
    }

    #[inline]
    fn link_mut(&mut self, id: NodeKey) -> &mut CircularLink<NodeKey> {
        &mut self[id].link
    }
}

/// Read-only view of one node's place in the heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState<'a, K> {
    /// Current key
    pub key: &'a K,
    /// Number of direct children
    pub degree: usize,
    /// Whether the node lost a child since it last became a child
    pub marked: bool,
    /// Parent, or `None` for a root
    pub parent: Option<FibonacciHandle>,
}

/// A structural invariant found broken by [`FibonacciHeap::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `min` is missing on a non-empty heap or present on an empty one
    MinPresence,
    /// `min` is not a root, or some root orders strictly before it
    MinNotSmallestRoot(FibonacciHandle),
    /// A root carries the mark bit
    MarkedRoot(FibonacciHandle),
    /// A node's parent back-reference disagrees with the ring holding it
    ParentMismatch(FibonacciHandle),
    /// A node's degree differs from the length of its child ring
    DegreeMismatch(FibonacciHandle),
    /// A ring's recorded length differs from the number of linked elements
    RingLength(Option<FibonacciHandle>),
    /// A child orders strictly before its parent
    HeapOrder(FibonacciHandle),
    /// Nodes reachable from the roots do not account for every stored node
    Unreachable {
        /// Nodes found by walking every tree
        reachable: usize,
        /// Nodes held by the heap
        len: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::MinPresence => {
                write!(f, "minimum reference disagrees with heap emptiness")
            }
            InvariantViolation::MinNotSmallestRoot(node) => {
                write!(f, "minimum {node:?} is not the smallest root")
            }
            InvariantViolation::MarkedRoot(node) => write!(f, "root {node:?} is marked"),
            InvariantViolation::ParentMismatch(node) => {
                write!(f, "node {node:?} has a stale parent reference")
            }
            InvariantViolation::DegreeMismatch(node) => {
                write!(f, "degree of {node:?} differs from its child count")
            }
            InvariantViolation::RingLength(Some(node)) => {
                write!(f, "child ring of {node:?} is inconsistent")
            }
            InvariantViolation::RingLength(None) => write!(f, "root ring is inconsistent"),
            InvariantViolation::HeapOrder(node) => {
                write!(f, "node {node:?} orders before its parent")
            }
            InvariantViolation::Unreachable { reachable, len } => {
                write!(f, "{reachable} of {len} nodes reachable from the roots")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Fibonacci Heap
///
/// `C` is the key order, fixed at construction; [`FibonacciHeap::new`] uses
/// the key's `Ord`.
///
/// # Example
///
/// ```rust
/// use fibonacci_ring_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(5);
/// let handle = heap.insert(8);
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek_min(), Some(&1));
/// assert_eq!(heap.extract_min(), Some(1));
/// assert_eq!(heap.extract_min(), Some(5));
/// assert_eq!(heap.extract_min(), None);
/// ```
pub struct FibonacciHeap<K, C = Natural> {
    nodes: SlotMap<NodeKey, Node<K>>,
    roots: CircularList<NodeKey>,
    min: Option<NodeKey>,
    cmp: C,
}

impl<K: Ord> FibonacciHeap<K> {
    /// Creates an empty heap ordered by `K`'s `Ord`
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: Comparator<K>> FibonacciHeap<K, C> {
    /// Creates an empty heap ordered by `cmp`
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: CircularList::new(),
            min: None,
            cmp,
        }
    }

    /// Returns the number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Inserts `key` as a new single-node tree in the root ring
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, key: K) -> FibonacciHandle {
        let node = self.nodes.insert(Node::new(key));
        self.roots.push_back(&mut self.nodes, node);

        match self.min {
            Some(min) if !self.less(node, min) => {}
            _ => self.min = Some(node),
        }

        FibonacciHandle(node)
    }

    /// Returns the minimum key without removing it
    ///
    /// # Time Complexity
    /// O(1)
    #[inline]
    pub fn peek_min(&self) -> Option<&K> {
        self.min.map(|min| &self.nodes[min].key)
    }

    /// Removes and returns the minimum key
    ///
    /// The children of the minimum are promoted to the root ring, then the
    /// root ring is consolidated so that no two roots share a degree.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Option<K> {
        let min = self.min?;

        let children = mem::take(&mut self.nodes[min].children);
        for child in children.to_vec(&self.nodes) {
            let node = &mut self.nodes[child];
            node.parent = None;
            node.marked = false;
        }
        self.roots.splice(&mut self.nodes, children);

        self.roots.remove(&mut self.nodes, min);
        let Some(removed) = self.nodes.remove(min) else {
            unreachable!("minimum {min:?} is not in the arena");
        };

        if self.nodes.is_empty() {
            debug_assert!(self.roots.is_empty());
            self.min = None;
        } else {
            self.consolidate();
        }

        Some(removed.key)
    }

    /// Lowers the key of the element behind `handle` to `new_key`
    ///
    /// A key equal to the current one is accepted and changes nothing.
    ///
    /// # Errors
    /// - [`HeapError::KeyIncreased`] if `new_key` orders after the current key
    /// - [`HeapError::InvalidHandle`] if the element was already extracted
    ///
    /// The heap is unchanged on error.
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        let id = handle.0;
        let node = self.nodes.get_mut(id).ok_or(HeapError::InvalidHandle)?;
        if self.cmp.less(&node.key, &new_key) {
            return Err(HeapError::KeyIncreased);
        }
        node.key = new_key;

        if let Some(parent) = node.parent {
            if self.less(id, parent) {
                self.cut(id, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.less(id, min) {
                self.min = Some(id);
            }
        }

        Ok(())
    }

    /// Returns the current key of the element behind `handle`
    pub fn get(&self, handle: &FibonacciHandle) -> Option<&K> {
        self.nodes.get(handle.0).map(|node| &node.key)
    }

    /// Returns true if the element behind `handle` is still in the heap
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.nodes.contains_key(handle.0)
    }

    /// Removes every element; outstanding handles become stale
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots = CircularList::new();
        self.min = None;
    }

    /// Removes every element in ascending key order
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, K, C> {
        DrainSorted { heap: self }
    }

    /// Consumes the heap, returning its keys in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.drain_sorted());
        out
    }

    /// Iterates over the current roots, in root-ring order
    pub fn roots(&self) -> impl Iterator<Item = FibonacciHandle> + '_ {
        self.roots.iter(&self.nodes).map(FibonacciHandle)
    }

    /// Iterates over the direct children of the element behind `handle`
    ///
    /// Yields nothing for a stale handle.
    pub fn children(&self, handle: &FibonacciHandle) -> impl Iterator<Item = FibonacciHandle> + '_ {
        self.nodes
            .get(handle.0)
            .into_iter()
            .flat_map(|node| node.children.iter(&self.nodes))
            .map(FibonacciHandle)
    }

    /// Returns the structural state of the element behind `handle`
    pub fn node_state(&self, handle: &FibonacciHandle) -> Option<NodeState<'_, K>> {
        self.nodes.get(handle.0).map(|node| NodeState {
            key: &node.key,
            degree: node.degree,
            marked: node.marked,
            parent: node.parent.map(FibonacciHandle),
        })
    }

    /// Walks every tree and checks the heap's structural invariants
    ///
    /// This is O(n); it exists for tests and for callers auditing a heap
    /// built with an untrusted comparator.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        match self.min {
            None if !self.nodes.is_empty() || !self.roots.is_empty() => {
                return Err(InvariantViolation::MinPresence)
            }
            Some(_) if self.nodes.is_empty() => return Err(InvariantViolation::MinPresence),
            _ => {}
        }

        if self.roots.count_links(&self.nodes) != self.roots.len() {
            return Err(InvariantViolation::RingLength(None));
        }

        let mut stack = Vec::new();
        for root in self.roots.iter(&self.nodes) {
            let node = &self.nodes[root];
            if node.parent.is_some() {
                return Err(InvariantViolation::ParentMismatch(FibonacciHandle(root)));
            }
            if node.marked {
                return Err(InvariantViolation::MarkedRoot(FibonacciHandle(root)));
            }
            if let Some(min) = self.min {
                if self.less(root, min) {
                    return Err(InvariantViolation::MinNotSmallestRoot(FibonacciHandle(min)));
                }
            }
            stack.push(root);
        }

        if let Some(min) = self.min {
            if self.nodes[min].parent.is_some() || !self.roots.contains(&self.nodes, min) {
                return Err(InvariantViolation::MinNotSmallestRoot(FibonacciHandle(min)));
            }
        }

        let mut reachable = 0;
        while let Some(id) = stack.pop() {
            reachable += 1;
            let node = &self.nodes[id];
            if node.children.count_links(&self.nodes) != node.children.len() {
                return Err(InvariantViolation::RingLength(Some(FibonacciHandle(id))));
            }
            if node.degree != node.children.len() {
                return Err(InvariantViolation::DegreeMismatch(FibonacciHandle(id)));
            }
            for child in node.children.iter(&self.nodes) {
                if self.nodes[child].parent != Some(id) {
                    return Err(InvariantViolation::ParentMismatch(FibonacciHandle(child)));
                }
                if self.less(child, id) {
                    return Err(InvariantViolation::HeapOrder(FibonacciHandle(child)));
                }
                stack.push(child);
            }
        }

        if reachable != self.nodes.len() {
            return Err(InvariantViolation::Unreachable {
                reachable,
                len: self.nodes.len(),
            });
        }

        Ok(())
    }

    #[inline]
    fn less(&self, a: NodeKey, b: NodeKey) -> bool {
        self.cmp.less(&self.nodes[a].key, &self.nodes[b].key)
    }

    /// Links roots of equal degree until every root degree is unique, then
    /// rebuilds the root ring and recomputes the minimum
    fn consolidate(&mut self) {
        // A degree-d tree holds at least F(d+2) >= phi^d nodes, which bounds
        // degrees by log_phi(n), about 1.44 * log2(n). Start at log2(n) + 2
        // slots and grow for the sparse trees cascading cuts leave behind.
        let slots = self.nodes.len().ilog2() as usize + 2;
        let mut table: SmallVec<[Option<NodeKey>; 64]> = smallvec![None; slots];

        let snapshot = self.roots.to_vec(&self.nodes);
        self.roots.clear(&mut self.nodes);

        let mut links = 0usize;
        for root in &snapshot {
            let mut current = *root;
            let mut degree = self.nodes[current].degree;

            loop {
                if degree >= table.len() {
                    table.resize(degree + 1, None);
                }
                let Some(other) = table[degree].take() else {
                    break;
                };

                // Ties go to the node being processed
                let (parent, child) = if self.less(other, current) {
                    (other, current)
                } else {
                    (current, other)
                };
                self.link(child, parent);
                links += 1;

                current = parent;
                degree = self.nodes[current].degree;
            }

            table[degree] = Some(current);
        }

        self.min = None;
        for root in table.into_iter().flatten() {
            self.nodes[root].parent = None;
            self.roots.push_back(&mut self.nodes, root);
            match self.min {
                Some(min) if !self.less(root, min) => {}
                _ => self.min = Some(root),
            }
        }

        trace!(
            before = snapshot.len(),
            after = self.roots.len(),
            links,
            "consolidated root ring"
        );
    }

    /// Makes `child` (an unlinked former root) a child of `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.marked = false;

        self.update_children(parent, |children, nodes| children.push_back(nodes, child));
        self.nodes[parent].degree += 1;
    }

    /// Moves `node` from `parent`'s child ring to the root ring
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        self.update_children(parent, |children, nodes| children.remove(nodes, node));
        self.nodes[parent].degree -= 1;

        let cut = &mut self.nodes[node];
        cut.parent = None;
        cut.marked = false;
        self.roots.push_back(&mut self.nodes, node);
    }

    /// Walks up from `ancestor`, cutting marked nodes until an unmarked
    /// non-root is found and marked, or a root is reached
    fn cascading_cut(&mut self, mut ancestor: NodeKey) {
        let mut cuts = 0usize;
        while let Some(parent) = self.nodes[ancestor].parent {
            if !self.nodes[ancestor].marked {
                self.nodes[ancestor].marked = true;
                break;
            }
            self.cut(ancestor, parent);
            cuts += 1;
            ancestor = parent;
        }

        if cuts > 0 {
            trace!(cuts, "cascading cut");
        }
    }

    /// Runs `f` on `parent`'s child ring with the arena available as link store
    fn update_children<F>(&mut self, parent: NodeKey, f: F)
    where
        F: FnOnce(&mut CircularList<NodeKey>, &mut SlotMap<NodeKey, Node<K>>),
    {
        let mut children = mem::take(&mut self.nodes[parent].children);
        f(&mut children, &mut self.nodes);
        self.nodes[parent].children = children;
    }
}

impl<K: fmt::Debug, C> fmt::Debug for FibonacciHeap<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.nodes.len())
            .field("roots", &self.roots.len())
            .field("min", &self.min.map(|min| &self.nodes[min].key))
            .finish()
    }
}

impl<K, C: Comparator<K>> Extend<K> for FibonacciHeap<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for FibonacciHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = FibonacciHeap::new();
        heap.extend(iter);
        heap
    }
}

impl<K, C: Comparator<K> + Default> Heap<K> for FibonacciHeap<K, C> {
    fn new() -> Self {
        Self::with_comparator(C::default())
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, key: K) {
        self.insert(key);
    }

    fn peek(&self) -> Option<&K> {
        self.peek_min()
    }

    fn pop(&mut self) -> Option<K> {
        self.extract_min()
    }
}

impl<K, C: Comparator<K> + Default> DecreaseKeyHeap<K> for FibonacciHeap<K, C> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, key: K) -> Self::Handle {
        self.insert(key)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_key)
    }
}

/// Draining iterator returned by [`FibonacciHeap::drain_sorted`]
///
/// Each `next` is one `extract_min`. Elements not consumed stay in the heap.
pub struct DrainSorted<'a, K, C> {
    heap: &'a mut FibonacciHeap<K, C>,
}

impl<K, C: Comparator<K>> Iterator for DrainSorted<'_, K, C> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<K> {
        self.heap.extract_min()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<K, C: Comparator<K>> ExactSizeIterator for DrainSorted<'_, K, C> {}

impl<K, C: Comparator<K>> FusedIterator for DrainSorted<'_, K, C> {}
