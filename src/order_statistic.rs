use alloc::vec::Vec;

use crate::augment::{Augment, TreeView};
use crate::raw::Handle;

/// A zero-based rank into the sorted order of a map or set.
///
/// This is an order-statistic extension and is not part of the standard
/// `BTreeMap` or `BTreeSet` APIs.
///
/// # Examples
///
/// ```
/// use rubi_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::new();
/// map.insert("a", 10);
/// map.insert("b", 20);
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

/// Subtree sizes, maintained through the [`Augment`] hooks.
///
/// For every live node `n`, `size(n) == size(left(n)) + size(right(n)) + 1`, and the sentinel
/// has size `0`. The table is indexed by [`Handle::slot`]; only the nodes on the path touched by
/// a mutation are updated, so upkeep is O(log n) per insert or remove.
#[derive(Clone, Debug, Default)]
pub struct SubtreeSizes {
    sizes: Vec<usize>,
}

impl SubtreeSizes {
    /// Number of entries in the subtree rooted at `node`, including `node`.
    #[must_use]
    pub fn size(&self, node: Handle) -> usize {
        self.sizes.get(node.slot()).copied().unwrap_or(0)
    }

    fn set(&mut self, node: Handle, size: usize) {
        let slot = node.slot();
        if slot >= self.sizes.len() {
            self.sizes.resize(slot + 1, 0);
        }
        self.sizes[slot] = size;
    }

    fn recompute<K, V>(&mut self, tree: &TreeView<'_, K, V>, node: Handle) {
        let size = self.size(tree.left(node)) + self.size(tree.right(node)) + 1;
        self.set(node, size);
    }
}

impl Augment for SubtreeSizes {
    fn on_inserted<K, V>(&mut self, tree: &TreeView<'_, K, V>, node: Handle) {
        let mut x = node;
        while !x.is_nil() {
            self.recompute(tree, x);
            x = tree.parent(x);
        }
    }

    fn on_removing<K, V>(&mut self, tree: &TreeView<'_, K, V>, node: Handle) {
        // Every proper ancestor loses exactly this one node.
        let mut x = tree.parent(node);
        while !x.is_nil() {
            self.sizes[x.slot()] -= 1;
            x = tree.parent(x);
        }
        self.set(node, 0);
    }

    fn on_rotated<K, V>(&mut self, tree: &TreeView<'_, K, V>, old_root: Handle, new_root: Handle) {
        // `old_root` is now the child, so it goes first.
        self.recompute(tree, old_root);
        self.recompute(tree, new_root);
    }
}
