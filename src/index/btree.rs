//! B-tree directory index - the core keyed container of memfs.
//!
//! The [`BTree`] maps string names to caller-owned values. Every
//! directory in the file system owns one instance; the engine itself
//! knows nothing about files or directories.
//!
//! # Structure
//! ```text
//!                    ┌───────────────┐
//!                    │   [ g │ p ]   │          internal node
//!                    └─┬─────┬─────┬─┘
//!          ┌───────────┘     │     └───────────┐
//!    ┌─────┴─────┐     ┌─────┴─────┐     ┌─────┴─────┐
//!    │ [ a │ c ] │     │ [ j │ m ] │     │ [ r │ t ] │   leaves
//!    └───────────┘     └───────────┘     └───────────┘
//! ```
//!
//! With minimum degree `T`, every node holds at most `2T - 1` entries
//! and every node except the root holds at least `T - 1`. All leaves
//! sit at the same depth; balance is maintained by construction:
//! - **insert** splits a full node *before* descending into it, so the
//!   recursion never needs to back up (top-down / proactive splitting).
//! - **remove** tops a minimally-filled child up to `T` entries (by
//!   borrowing from a sibling or merging with one) *before* descending
//!   into it, so the recursion never needs to back up either.
//!
//! Height grows only by splitting a full root and shrinks only by
//! discarding a root left with zero entries.
//!
//! # Thread Safety
//! `BTree` is **single-threaded**: mutations are multi-step structural
//! edits and mid-operation state is inconsistent. A caller sharing a
//! tree across threads must serialize every call externally.

use std::mem;

use crate::common::config::MIN_DEGREE;
use crate::common::{Error, Result};

/// A named entry in a tree.
///
/// The key is compared byte-lexicographically and case-sensitively.
/// The value is opaque to the engine: it is never inspected or copied,
/// only moved as a unit during splits, merges, and rotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    pub key: String,
    pub value: V,
}

impl<V> Entry<V> {
    /// Create an entry from any string-ish key.
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Entry {
            key: key.into(),
            value,
        }
    }
}

/// One node of the tree.
///
/// `children` is empty on leaves and holds exactly `entries.len() + 1`
/// nodes otherwise. The classic `num_keys` / `leaf` bookkeeping fields
/// are redundant with `Vec` storage and derived instead.
#[derive(Debug)]
struct Node<V> {
    entries: Vec<Entry<V>>,
    children: Vec<Box<Node<V>>>,
}

impl<V> Node<V> {
    fn leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Index of the first entry whose key is `>= key`.
    ///
    /// Entries within a node are strictly increasing, so this is both
    /// the lookup slot and the descent slot: if `entries[i]` is not an
    /// exact match, `children[i]` is the subtree that would hold `key`.
    fn find_slot(&self, key: &str) -> usize {
        self.entries.partition_point(|e| e.key.as_str() < key)
    }
}

/// An in-memory, string-keyed B-tree of minimum degree `T`.
///
/// Keys are unique: [`BTree::insert`] rejects a key already present
/// rather than storing a duplicate. Absent keys are not an error
/// anywhere else - [`BTree::search`] and [`BTree::remove`] report them
/// as `None`.
///
/// `T` defaults to [`MIN_DEGREE`]; tests instantiate `T = 2` (a 2-3-4
/// tree) to force splits and merges with few entries.
///
/// # Example
/// ```
/// use memfs::index::{BTree, Entry};
///
/// let mut tree: BTree<u32> = BTree::new();
/// tree.insert(Entry::new("b", 2)).unwrap();
/// tree.insert(Entry::new("a", 1)).unwrap();
///
/// assert_eq!(tree.get("a"), Some(&1));
/// let keys: Vec<&str> = tree.iter().map(|e| e.key.as_str()).collect();
/// assert_eq!(keys, ["a", "b"]);
/// ```
#[derive(Debug)]
pub struct BTree<V, const T: usize = MIN_DEGREE> {
    root: Option<Box<Node<V>>>,
    len: usize,
}

impl<V, const T: usize> Default for BTree<V, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, const T: usize> BTree<V, T> {
    /// Maximum entries per node.
    const MAX: usize = 2 * T - 1;

    /// Minimum entries per non-root node.
    const MIN: usize = T - 1;

    /// Monomorphization-time guard: `T = 1` would allow zero-entry nodes.
    const DEGREE_OK: () = assert!(T >= 2, "B-tree minimum degree must be at least 2");

    /// Create a new, empty tree.
    pub fn new() -> Self {
        let () = Self::DEGREE_OK;
        BTree { root: None, len: 0 }
    }

    /// Number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find the entry with the given key.
    pub fn search(&self, key: &str) -> Option<&Entry<V>> {
        fn descend<'a, V>(node: &'a Node<V>, key: &str) -> Option<&'a Entry<V>> {
            let idx = node.find_slot(key);
            if idx < node.entries.len() && node.entries[idx].key == key {
                return Some(&node.entries[idx]);
            }
            if node.leaf() {
                return None;
            }
            descend(&node.children[idx], key)
        }

        descend(self.root.as_deref()?, key)
    }

    /// Find the value stored under the given key.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.search(key).map(|e| &e.value)
    }

    /// Find the value stored under the given key, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        fn descend<'a, V>(node: &'a mut Node<V>, key: &str) -> Option<&'a mut V> {
            let idx = node.entries.partition_point(|e| e.key.as_str() < key);
            if idx < node.entries.len() && node.entries[idx].key == key {
                return Some(&mut node.entries[idx].value);
            }
            if node.children.is_empty() {
                return None;
            }
            descend(&mut node.children[idx], key)
        }

        descend(self.root.as_deref_mut()?, key)
    }

    /// Insert an entry.
    ///
    /// Splitting is proactive: the root is split up front if full, and
    /// [`Self::insert_non_full`] splits any full child before stepping
    /// into it, so every node the recursion touches has a free slot.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] (and leaves the tree untouched)
    /// if an entry with the same key already exists.
    pub fn insert(&mut self, entry: Entry<V>) -> Result<()> {
        if self.search(&entry.key).is_some() {
            return Err(Error::DuplicateKey(entry.key));
        }

        match self.root.take() {
            None => {
                self.root = Some(Box::new(Node {
                    entries: vec![entry],
                    children: Vec::new(),
                }));
            }
            Some(root) => {
                if root.entries.len() == Self::MAX {
                    // Only place tree height grows: new root over the old one.
                    let mut new_root = Box::new(Node {
                        entries: Vec::new(),
                        children: vec![root],
                    });
                    Self::split_child(&mut new_root, 0);
                    tracing::debug!(key = %new_root.entries[0].key, "root split; tree height +1");

                    let idx = usize::from(entry.key > new_root.entries[0].key);
                    Self::insert_non_full(&mut new_root.children[idx], entry);
                    self.root = Some(new_root);
                } else {
                    let mut root = root;
                    Self::insert_non_full(&mut root, entry);
                    self.root = Some(root);
                }
            }
        }

        self.len += 1;
        Ok(())
    }

    /// Insert into a subtree whose root is guaranteed not full.
    fn insert_non_full(node: &mut Node<V>, entry: Entry<V>) {
        let mut idx = node.find_slot(&entry.key);

        if node.leaf() {
            node.entries.insert(idx, entry);
            return;
        }

        if node.children[idx].entries.len() == Self::MAX {
            Self::split_child(node, idx);
            // The split promoted a median into `idx`; the new entry may
            // belong to the right of it.
            if entry.key > node.entries[idx].key {
                idx += 1;
            }
        }
        Self::insert_non_full(&mut node.children[idx], entry);
    }

    /// Split the full child at `parent.children[idx]`.
    ///
    /// The child's upper `T - 1` entries (and upper `T` children, if
    /// internal) move into a brand-new right sibling; the median entry
    /// moves up into `parent` at position `idx`. This is the only
    /// operation that allocates a node.
    fn split_child(parent: &mut Node<V>, idx: usize) {
        let (median, right) = {
            let child = &mut parent.children[idx];
            debug_assert_eq!(child.entries.len(), Self::MAX);

            let entries = child.entries.split_off(T);
            let median = child.entries.remove(T - 1);
            let children = if child.leaf() {
                Vec::new()
            } else {
                child.children.split_off(T)
            };
            (median, Box::new(Node { entries, children }))
        };

        tracing::debug!(key = %median.key, "split full node; median promoted");
        parent.entries.insert(idx, median);
        parent.children.insert(idx + 1, right);
    }

    /// Remove the entry with the given key, returning it.
    ///
    /// Returns `None` (and leaves the tree untouched) if the key is
    /// absent; removing from an empty tree is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<Entry<V>> {
        let mut root = self.root.take()?;
        let removed = Self::remove_from_node(&mut root, key);

        if root.entries.is_empty() {
            // Only place tree height shrinks: discard the empty root.
            if root.leaf() {
                tracing::debug!("last entry removed; tree now empty");
                self.root = None;
            } else {
                tracing::debug!("root drained; tree height -1");
                self.root = Some(root.children.remove(0));
            }
        } else {
            self.root = Some(root);
        }

        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Remove `key` from the subtree rooted at `node`.
    ///
    /// Descent invariant: `node` has at least `T` entries (or is the
    /// root), so removing one entry from it can never underflow. Any
    /// child about to be descended into is topped up by [`Self::fill`]
    /// first, which keeps the invariant without backtracking.
    fn remove_from_node(node: &mut Node<V>, key: &str) -> Option<Entry<V>> {
        let idx = node.find_slot(key);

        if idx < node.entries.len() && node.entries[idx].key == key {
            if node.leaf() {
                return Some(node.entries.remove(idx));
            }
            return Some(Self::remove_internal(node, idx));
        }

        if node.leaf() {
            // Absent key: silent no-op.
            return None;
        }

        let was_last = idx == node.entries.len();
        if node.children[idx].entries.len() <= Self::MIN {
            Self::fill(node, idx);
        }
        // A merge of the last two children shifts the target one slot left.
        let idx = if was_last && idx > node.entries.len() {
            idx - 1
        } else {
            idx
        };
        Self::remove_from_node(&mut node.children[idx], key)
    }

    /// Remove the entry at `node.entries[idx]` of an internal node.
    ///
    /// The entry cannot simply be cut out - it separates two subtrees.
    /// It is swapped with an adjacent leaf-resident entry (in-order
    /// predecessor or successor) when either neighboring child can
    /// spare one, and otherwise both children merge around it and the
    /// removal recurses into the merged node.
    fn remove_internal(node: &mut Node<V>, idx: usize) -> Entry<V> {
        if node.children[idx].entries.len() >= T {
            let pred = Self::remove_max(&mut node.children[idx]);
            mem::replace(&mut node.entries[idx], pred)
        } else if node.children[idx + 1].entries.len() >= T {
            let succ = Self::remove_min(&mut node.children[idx + 1]);
            mem::replace(&mut node.entries[idx], succ)
        } else {
            // Both neighbors at minimum: the separator is pulled down
            // into the merged child, landing at position T - 1.
            Self::merge_children(node, idx);
            let child = &mut node.children[idx];
            if child.leaf() {
                child.entries.remove(T - 1)
            } else {
                Self::remove_internal(child, T - 1)
            }
        }
    }

    /// Remove and return the largest entry of `node`'s subtree (the
    /// in-order predecessor of the entry just above it).
    ///
    /// Fills on descent like [`Self::remove_from_node`].
    fn remove_max(node: &mut Node<V>) -> Entry<V> {
        if node.leaf() {
            let last = node.entries.len() - 1;
            return node.entries.remove(last);
        }
        let mut idx = node.children.len() - 1;
        if node.children[idx].entries.len() <= Self::MIN {
            Self::fill(node, idx);
            // A merge shortens the child list by one.
            idx = node.children.len() - 1;
        }
        Self::remove_max(&mut node.children[idx])
    }

    /// Remove and return the smallest entry of `node`'s subtree (the
    /// in-order successor of the entry just above it).
    fn remove_min(node: &mut Node<V>) -> Entry<V> {
        if node.leaf() {
            return node.entries.remove(0);
        }
        if node.children[0].entries.len() <= Self::MIN {
            Self::fill(node, 0);
        }
        Self::remove_min(&mut node.children[0])
    }

    /// Top `node.children[idx]` up to at least `T` entries before it is
    /// descended into: borrow from a sibling that can spare an entry,
    /// else merge with one.
    fn fill(node: &mut Node<V>, idx: usize) {
        if idx > 0 && node.children[idx - 1].entries.len() >= T {
            Self::borrow_from_prev(node, idx);
        } else if idx + 1 < node.children.len() && node.children[idx + 1].entries.len() >= T {
            Self::borrow_from_next(node, idx);
        } else if idx + 1 < node.children.len() {
            Self::merge_children(node, idx);
        } else {
            Self::merge_children(node, idx - 1);
        }
    }

    /// Rotate the left sibling's last entry up through the parent and
    /// the separator down into the front of `children[idx]`.
    fn borrow_from_prev(node: &mut Node<V>, idx: usize) {
        let (left, right) = node.children.split_at_mut(idx);
        let sibling = &mut left[idx - 1];
        let child = &mut right[0];

        let last = sibling.entries.len() - 1;
        let stolen = sibling.entries.remove(last);
        let sep = mem::replace(&mut node.entries[idx - 1], stolen);
        child.entries.insert(0, sep);

        // The sibling's last subtree follows its entry across.
        if let Some(grandchild) = sibling.children.pop() {
            child.children.insert(0, grandchild);
        }
        tracing::debug!(key = %node.entries[idx - 1].key, "borrowed from left sibling");
    }

    /// Mirror image of [`Self::borrow_from_prev`]: rotate the right
    /// sibling's first entry up and the separator down onto the back of
    /// `children[idx]`.
    fn borrow_from_next(node: &mut Node<V>, idx: usize) {
        let (left, right) = node.children.split_at_mut(idx + 1);
        let child = &mut left[idx];
        let sibling = &mut right[0];

        let stolen = sibling.entries.remove(0);
        let sep = mem::replace(&mut node.entries[idx], stolen);
        child.entries.push(sep);

        if !sibling.children.is_empty() {
            let grandchild = sibling.children.remove(0);
            child.children.push(grandchild);
        }
        tracing::debug!(key = %node.entries[idx].key, "borrowed from right sibling");
    }

    /// Merge `children[idx]`, the separator entry above it, and
    /// `children[idx + 1]` into a single node.
    ///
    /// Both children hold `T - 1` entries when this is called, so the
    /// merged node holds exactly `2T - 1`. The right sibling is the
    /// only node ever deallocated.
    fn merge_children(node: &mut Node<V>, idx: usize) {
        let sep = node.entries.remove(idx);
        tracing::debug!(key = %sep.key, "merging siblings around separator");

        let Node { entries, children } = *node.children.remove(idx + 1);
        let child = &mut node.children[idx];
        child.entries.push(sep);
        child.entries.extend(entries);
        child.children.extend(children);
    }

    /// Iterate over all entries in ascending key order.
    ///
    /// The iterator is lazy and restartable: each call walks the tree
    /// afresh from the smallest key.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_deref())
    }

    /// Verify the structural invariants of the whole tree.
    ///
    /// Checks occupancy bounds, entry/child arity, strict key ordering
    /// within and across nodes, uniform leaf depth, and the cached
    /// length. Intended for tests; returns `false` on any violation.
    pub fn check_invariants(&self) -> bool {
        // Returns the subtree depth, or None on violation. `lo`/`hi`
        // are exclusive key bounds inherited from ancestors.
        fn check<V>(
            node: &Node<V>,
            is_root: bool,
            min: usize,
            max: usize,
            lo: Option<&str>,
            hi: Option<&str>,
        ) -> Option<usize> {
            let n = node.entries.len();
            if n > max || (!is_root && n < min) || (is_root && n == 0) {
                return None;
            }
            for pair in node.entries.windows(2) {
                if pair[0].key >= pair[1].key {
                    return None;
                }
            }
            if let Some(lo) = lo {
                if node.entries[0].key.as_str() <= lo {
                    return None;
                }
            }
            if let Some(hi) = hi {
                if node.entries[n - 1].key.as_str() >= hi {
                    return None;
                }
            }

            if node.leaf() {
                return Some(0);
            }
            if node.children.len() != n + 1 {
                return None;
            }

            let mut depth = None;
            for (i, child) in node.children.iter().enumerate() {
                let child_lo = if i == 0 {
                    lo
                } else {
                    Some(node.entries[i - 1].key.as_str())
                };
                let child_hi = if i == n {
                    hi
                } else {
                    Some(node.entries[i].key.as_str())
                };
                let d = check(child, false, min, max, child_lo, child_hi)?;
                if *depth.get_or_insert(d) != d {
                    return None;
                }
            }
            depth.map(|d| d + 1)
        }

        match &self.root {
            None => self.len == 0,
            Some(root) => {
                check(root, true, Self::MIN, Self::MAX, None, None).is_some()
                    && self.iter().count() == self.len
            }
        }
    }
}

/// In-order iterator over a tree's entries.
///
/// Holds an explicit descent stack of `(node, next entry index)` pairs
/// rather than suspending a recursive walk.
pub struct Iter<'a, V> {
    stack: Vec<(&'a Node<V>, usize)>,
}

impl<'a, V> Iter<'a, V> {
    fn new(root: Option<&'a Node<V>>) -> Self {
        let mut iter = Iter { stack: Vec::new() };
        if let Some(root) = root {
            iter.descend(root);
        }
        iter
    }

    /// Push the leftmost path of `node`'s subtree onto the stack.
    fn descend(&mut self, mut node: &'a Node<V>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child.as_ref(),
                None => break,
            }
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, idx) = self.stack.pop()?;
            if idx == node.entries.len() {
                continue;
            }
            let entry = &node.entries[idx];
            self.stack.push((node, idx + 1));
            if let Some(child) = node.children.get(idx + 1) {
                self.descend(child);
            }
            return Some(entry);
        }
    }
}

impl<'a, V, const T: usize> IntoIterator for &'a BTree<V, T> {
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2-3-4 tree: smallest degree, splits and merges fire fast.
    type SmallTree = BTree<u32, 2>;

    fn keys<V, const T: usize>(tree: &BTree<V, T>) -> Vec<String> {
        tree.iter().map(|e| e.key.clone()).collect()
    }

    fn leaf(entries: Vec<Entry<u32>>) -> Box<Node<u32>> {
        Box::new(Node {
            entries,
            children: Vec::new(),
        })
    }

    #[test]
    fn test_empty_tree() {
        let tree: SmallTree = BTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.search("anything").is_none());
        assert_eq!(tree.iter().count(), 0);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_insert_and_search() {
        let mut tree: SmallTree = BTree::new();
        for (i, k) in ["delta", "alpha", "echo", "bravo", "charlie"]
            .iter()
            .enumerate()
        {
            tree.insert(Entry::new(*k, i as u32)).unwrap();
        }

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.get("alpha"), Some(&1));
        assert_eq!(tree.get("echo"), Some(&2));
        assert!(tree.get("foxtrot").is_none());
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_get_mut() {
        let mut tree: SmallTree = BTree::new();
        tree.insert(Entry::new("a", 1)).unwrap();

        *tree.get_mut("a").unwrap() = 99;
        assert_eq!(tree.get("a"), Some(&99));
        assert!(tree.get_mut("b").is_none());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut tree: SmallTree = BTree::new();
        tree.insert(Entry::new("a", 1)).unwrap();

        let err = tree.insert(Entry::new("a", 2)).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(k) if k == "a"));

        // Tree untouched: original value survives.
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("a"), Some(&1));
    }

    /// 2-3-4 tree: the fourth insert overflows the 3-entry
    /// root and the median "b" is promoted into a new root.
    #[test]
    fn test_root_split_promotes_median() {
        let mut tree: SmallTree = BTree::new();
        for k in ["c", "a", "b", "d"] {
            tree.insert(Entry::new(k, 0)).unwrap();
        }

        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.entries.len(), 1);
        assert_eq!(root.entries[0].key, "b");
        assert_eq!(root.children.len(), 2);

        tree.insert(Entry::new("e", 0)).unwrap();
        assert_eq!(keys(&tree), ["a", "b", "c", "d", "e"]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_sorted_traversal_random_order() {
        let mut tree: SmallTree = BTree::new();
        // Pseudo-shuffled: stride 7 mod 26 visits every letter once.
        for i in 0..26u32 {
            let k = char::from(b'a' + ((i * 7) % 26) as u8).to_string();
            tree.insert(Entry::new(k, i)).unwrap();
        }

        let expected: Vec<String> = (b'a'..=b'z').map(|b| char::from(b).to_string()).collect();
        assert_eq!(keys(&tree), expected);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_iterator_restartable() {
        let mut tree: SmallTree = BTree::new();
        for k in ["b", "a", "c"] {
            tree.insert(Entry::new(k, 0)).unwrap();
        }

        let first: Vec<String> = tree.iter().map(|e| e.key.clone()).collect();
        let second: Vec<String> = tree.iter().map(|e| e.key.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_remove_from_leaf() {
        let mut tree: SmallTree = BTree::new();
        for k in ["a", "b", "c"] {
            tree.insert(Entry::new(k, 0)).unwrap();
        }

        let removed = tree.remove("b").unwrap();
        assert_eq!(removed.key, "b");
        assert_eq!(keys(&tree), ["a", "c"]);
        assert_eq!(tree.len(), 2);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut tree: SmallTree = BTree::new();
        assert!(tree.remove("ghost").is_none());

        for k in ["a", "b", "c", "d", "e"] {
            tree.insert(Entry::new(k, 0)).unwrap();
        }
        let before = keys(&tree);
        assert!(tree.remove("ghost").is_none());
        assert_eq!(keys(&tree), before);
        assert_eq!(tree.len(), 5);
    }

    /// Predecessor path (t = 3): the deleted entry lives in
    /// an internal node and its left child can spare an entry, so the
    /// rightmost entry of the left subtree replaces it in place.
    #[test]
    fn test_remove_internal_uses_predecessor() {
        let mut tree: BTree<u32, 3> = BTree::new();
        tree.root = Some(Box::new(Node {
            entries: vec![Entry::new("k10", 0)],
            children: vec![
                leaf(vec![Entry::new("k05", 0), Entry::new("k06", 0), Entry::new("k07", 0)],
                ),
                leaf(vec![Entry::new("k15", 0), Entry::new("k16", 0)]),
            ],
        }));
        tree.len = 6;
        assert!(tree.check_invariants());

        let removed = tree.remove("k10").unwrap();
        assert_eq!(removed.key, "k10");

        // "k07" rotated up from the left subtree; no merge happened.
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.entries[0].key, "k07");
        assert_eq!(root.children.len(), 2);
        assert_eq!(keys(&tree), ["k05", "k06", "k15", "k16"]);
        assert!(tree.check_invariants());
    }

    /// Mirror case: left child at minimum, right child can spare one,
    /// so the leftmost entry of the right subtree replaces the deleted
    /// internal entry.
    #[test]
    fn test_remove_internal_uses_successor() {
        let mut tree: BTree<u32, 3> = BTree::new();
        tree.root = Some(Box::new(Node {
            entries: vec![Entry::new("k10", 0)],
            children: vec![
                leaf(vec![Entry::new("k05", 0), Entry::new("k06", 0)]),
                leaf(vec![Entry::new("k15", 0), Entry::new("k16", 0), Entry::new("k17", 0)],
                ),
            ],
        }));
        tree.len = 6;

        tree.remove("k10").unwrap();
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.entries[0].key, "k15");
        assert_eq!(keys(&tree), ["k05", "k06", "k16", "k17"]);
        assert!(tree.check_invariants());
    }

    /// Bulk case (t = 3): twenty keys, delete one out of the
    /// middle, traversal stays complete and ordered.
    #[test]
    fn test_remove_one_of_twenty() {
        let mut tree: BTree<u32, 3> = BTree::new();
        for i in 1..=20u32 {
            tree.insert(Entry::new(format!("k{i:02}"), i)).unwrap();
        }
        assert!(tree.check_invariants());

        tree.remove("k10").unwrap();

        let expected: Vec<String> = (1..=20u32)
            .filter(|&i| i != 10)
            .map(|i| format!("k{i:02}"))
            .collect();
        assert_eq!(keys(&tree), expected);
        assert_eq!(tree.len(), 19);
        assert!(tree.check_invariants());
    }

    /// Merge path: two adjacent leaves at minimum occupancy.
    /// Deleting from one forces them to merge around the separator and
    /// the parent sheds an entry.
    #[test]
    fn test_remove_forces_merge() {
        let mut tree: SmallTree = BTree::new();
        tree.root = Some(Box::new(Node {
            entries: vec![Entry::new("b", 0), Entry::new("d", 0)],
            children: vec![
                leaf(vec![Entry::new("a", 0)]),
                leaf(vec![Entry::new("c", 0)]),
                leaf(vec![Entry::new("e", 0)]),
            ],
        }));
        tree.len = 5;
        assert!(tree.check_invariants());

        tree.remove("a").unwrap();

        // [a] and [c] merged around "b"; parent dropped from 2 entries to 1.
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.entries.len(), 1);
        assert_eq!(root.entries[0].key, "d");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].entries.len(), 2);
        assert_eq!(keys(&tree), ["b", "c", "e"]);
        assert!(tree.check_invariants());
    }

    /// Rotation path: left child at minimum but the right
    /// sibling above it. Deleting from the left subtree borrows through
    /// the parent instead of merging.
    #[test]
    fn test_remove_forces_borrow_from_next() {
        let mut tree: SmallTree = BTree::new();
        tree.root = Some(Box::new(Node {
            entries: vec![Entry::new("b", 0)],
            children: vec![
                leaf(vec![Entry::new("a", 0)]),
                leaf(vec![Entry::new("c", 0), Entry::new("d", 0)]),
            ],
        }));
        tree.len = 4;
        assert!(tree.check_invariants());

        tree.remove("a").unwrap();

        // "c" rotated up; height unchanged, no merge.
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.entries[0].key, "c");
        assert_eq!(root.children.len(), 2);
        assert_eq!(keys(&tree), ["b", "d"]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_remove_forces_borrow_from_prev() {
        let mut tree: SmallTree = BTree::new();
        tree.root = Some(Box::new(Node {
            entries: vec![Entry::new("c", 0)],
            children: vec![
                leaf(vec![Entry::new("a", 0), Entry::new("b", 0)]),
                leaf(vec![Entry::new("d", 0)]),
            ],
        }));
        tree.len = 4;

        tree.remove("d").unwrap();

        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.entries[0].key, "b");
        assert_eq!(keys(&tree), ["a", "c"]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_height_shrinks_on_root_collapse() {
        let mut tree: SmallTree = BTree::new();
        tree.root = Some(Box::new(Node {
            entries: vec![Entry::new("b", 0)],
            children: vec![
                leaf(vec![Entry::new("a", 0)]),
                leaf(vec![Entry::new("c", 0)]),
            ],
        }));
        tree.len = 3;

        tree.remove("a").unwrap();

        // The merge drained the root; its sole child took over.
        let root = tree.root.as_ref().unwrap();
        assert!(root.leaf());
        assert_eq!(keys(&tree), ["b", "c"]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_drain_to_empty() {
        let mut tree: SmallTree = BTree::new();
        let names: Vec<String> = (0..40u32).map(|i| format!("e{:02}", (i * 13) % 40)).collect();
        for (i, k) in names.iter().enumerate() {
            tree.insert(Entry::new(k.clone(), i as u32)).unwrap();
        }
        assert_eq!(tree.len(), 40);
        assert!(tree.check_invariants());

        // Delete in a different order than insertion.
        for k in names.iter().rev() {
            assert!(tree.remove(k).is_some());
            assert!(tree.check_invariants());
        }

        assert!(tree.is_empty());
        assert!(tree.root.is_none());
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut tree: SmallTree = BTree::new();
        tree.insert(Entry::new("README", 1)).unwrap();
        tree.insert(Entry::new("readme", 2)).unwrap();

        assert_eq!(tree.get("README"), Some(&1));
        assert_eq!(tree.get("readme"), Some(&2));
        // Uppercase sorts first byte-lexicographically.
        assert_eq!(keys(&tree), ["README", "readme"]);
    }
}
