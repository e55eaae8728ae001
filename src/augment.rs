//! Hooks that let a tree carry derived per-node data.
//!
//! The rebalancing engine knows nothing about what an augmentation stores. It calls the three
//! [`Augment`] methods at fixed points of every structural mutation and hands over a read-only
//! [`TreeView`] of the shape at that moment. [`SubtreeSizes`](crate::SubtreeSizes) is the
//! augmentation behind the order-statistic collections; [`NoAugment`] is the default and
//! compiles away.

use crate::raw::{Arena, Color, Entry, Handle, Links};

/// Bookkeeping that piggybacks on tree mutations.
///
/// All methods default to doing nothing.
///
/// # Contract
///
/// - [`on_inserted`](Augment::on_inserted): `node` has just been attached as a red leaf. It
///   runs before any rebalancing rotation.
/// - [`on_removing`](Augment::on_removing): `node` is about to be unlinked. It has at most one
///   real child, which will take its place under the same parent. Every other entry already
///   holds its final key and value.
/// - [`on_rotated`](Augment::on_rotated): a single rotation just completed. `old_root` is now a
///   child of `new_root`; no other node changed its subtree.
///
/// # Examples
///
/// Counting rotations:
///
/// ```
/// use rubi_tree::{Augment, Handle, Natural, TreeMap, TreeView};
///
/// #[derive(Default)]
/// struct Rotations(usize);
///
/// impl Augment for Rotations {
///     fn on_rotated<K, V>(&mut self, _: &TreeView<'_, K, V>, _: Handle, _: Handle) {
///         self.0 += 1;
///     }
/// }
///
/// let mut map = TreeMap::with_augment(Natural, Rotations::default());
/// for i in 0..3 {
///     map.insert(i, ());
/// }
/// assert_eq!(map.augment().0, 1);
/// ```
pub trait Augment {
    /// Called after `node` is attached, before rebalancing.
    fn on_inserted<K, V>(&mut self, tree: &TreeView<'_, K, V>, node: Handle) {
        let _ = (tree, node);
    }

    /// Called before `node` is unlinked from the tree.
    fn on_removing<K, V>(&mut self, tree: &TreeView<'_, K, V>, node: Handle) {
        let _ = (tree, node);
    }

    /// Called after a rotation moved `new_root` above `old_root`.
    fn on_rotated<K, V>(&mut self, tree: &TreeView<'_, K, V>, old_root: Handle, new_root: Handle) {
        let _ = (tree, old_root, new_root);
    }
}

/// The augmentation that does nothing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NoAugment;

impl Augment for NoAugment {}

/// A read-only view of a tree's shape, passed to [`Augment`] hooks.
///
/// Every accessor accepts [`Handle::NIL`]; links of the sentinel are `NIL` and it is black.
pub struct TreeView<'a, K, V> {
    pub(crate) links: &'a [Links],
    pub(crate) entries: &'a Arena<Entry<K, V>>,
    pub(crate) root: Handle,
}

impl<K, V> Clone for TreeView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for TreeView<'_, K, V> {}

impl<'a, K, V> TreeView<'a, K, V> {
    /// The root, or `NIL` for an empty tree.
    #[must_use]
    pub const fn root(&self) -> Handle {
        self.root
    }

    /// Left child of `node`.
    #[must_use]
    pub fn left(&self, node: Handle) -> Handle {
        self.links[node.slot()].left
    }

    /// Right child of `node`.
    #[must_use]
    pub fn right(&self, node: Handle) -> Handle {
        self.links[node.slot()].right
    }

    /// Parent of `node`; `NIL` for the root.
    #[must_use]
    pub fn parent(&self, node: Handle) -> Handle {
        self.links[node.slot()].parent
    }

    /// Returns `true` if `node` is red. The sentinel is black.
    #[must_use]
    pub fn is_red(&self, node: Handle) -> bool {
        self.links[node.slot()].color == Color::Red
    }

    /// Key and value stored at `node`, or `None` for the sentinel.
    #[must_use]
    pub fn entry(&self, node: Handle) -> Option<(&'a K, &'a V)> {
        (!node.is_nil()).then(|| {
            let entry = self.entries.get(node);
            (&entry.key, &entry.value)
        })
    }
}
