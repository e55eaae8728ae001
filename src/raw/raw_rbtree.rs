use alloc::vec;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Entry, Links, SENTINEL};
use crate::augment::{Augment, TreeView};
use crate::compare::Compare;

/// The red-black engine backing `RBTreeMap` and `RBTreeSet`.
///
/// Links live in `links`, indexed by [`Handle::slot`]. Slot `0` holds [`SENTINEL`] and is never
/// written, so reading the links of `NIL` needs no special case. Payloads live in `entries`,
/// whose handles line up with the link slots.
#[derive(Clone)]
pub(crate) struct RawRBTree<K, V, C, A> {
    /// Structural links; `links[0]` is the sentinel.
    links: Vec<Links>,
    /// Key/value storage, one slot per live node.
    entries: Arena<Entry<K, V>>,
    /// Root node, or `NIL` if the tree is empty.
    root: Handle,
    /// Number of live nodes.
    len: usize,
    compare: C,
    augment: A,
}

/// Outcome of [`RawRBTree::insert`].
pub(crate) enum InsertResult<V> {
    /// A new node was attached.
    Inserted,
    /// The key was present and its value was overwritten; holds the previous value.
    Replaced(V),
    /// The key was present and `replace` was not requested; the supplied pair was dropped.
    Rejected,
}

/// Explicit traversal stack. Red-black height is at most `2 * log2(n + 1)`.
type Stack = SmallVec<[Handle; 64]>;

impl<K, V, C, A> RawRBTree<K, V, C, A> {
    /// Creates a new, empty tree.
    pub(crate) fn new(compare: C, augment: A) -> Self {
        Self {
            links: vec![SENTINEL],
            entries: Arena::new(),
            root: Handle::NIL,
            len: 0,
            compare,
            augment,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, compare: C, augment: A) -> Self {
        let mut links = Vec::with_capacity(capacity + 1);
        links.push(SENTINEL);
        Self {
            links,
            entries: Arena::with_capacity(capacity),
            root: Handle::NIL,
            len: 0,
            compare,
            augment,
        }
    }

    /// Returns the number of entries in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no entries.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of entries the tree can hold without reallocating.
    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub(crate) const fn root(&self) -> Handle {
        self.root
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.compare
    }

    pub(crate) const fn augment(&self) -> &A {
        &self.augment
    }

    /// A read-only view of the current shape.
    pub(crate) fn view(&self) -> TreeView<'_, K, V> {
        TreeView {
            links: &self.links,
            entries: &self.entries,
            root: self.root,
        }
    }

    /// Removes every entry. The comparator and augmentation are kept.
    pub(crate) fn clear(&mut self) {
        debug!(len = self.len, "clearing tree");
        self.links.truncate(1);
        self.entries.clear();
        self.root = Handle::NIL;
        self.len = 0;
    }

    /// Moves every entry out in ascending order, leaving the tree empty.
    ///
    /// This is O(n): nodes are taken straight out of the arena without rebalancing.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut result = Vec::with_capacity(self.len);
        let mut stack = Stack::new();
        let mut x = self.root;

        loop {
            while !x.is_nil() {
                stack.push(x);
                x = self.left(x);
            }
            let Some(h) = stack.pop() else {
                break;
            };
            x = self.right(h);
            result.push(self.entries.take(h).into_pair());
        }

        self.clear();
        result
    }

    // ─── Links ──────────────────────────────────────────────────────────────

    #[inline]
    pub(crate) fn left(&self, h: Handle) -> Handle {
        self.links[h.slot()].left
    }

    #[inline]
    pub(crate) fn right(&self, h: Handle) -> Handle {
        self.links[h.slot()].right
    }

    #[inline]
    pub(crate) fn parent(&self, h: Handle) -> Handle {
        self.links[h.slot()].parent
    }

    #[inline]
    fn color(&self, h: Handle) -> Color {
        self.links[h.slot()].color
    }

    #[inline]
    fn is_red(&self, h: Handle) -> bool {
        self.color(h) == Color::Red
    }

    #[inline]
    fn is_black(&self, h: Handle) -> bool {
        self.color(h) == Color::Black
    }

    #[inline]
    fn link_mut(&mut self, h: Handle) -> &mut Links {
        debug_assert!(!h.is_nil(), "the sentinel must never be written");
        &mut self.links[h.slot()]
    }

    #[inline]
    fn paint(&mut self, h: Handle, color: Color) {
        self.link_mut(h).color = color;
    }

    /// Points whichever link of `parent` referenced `old` at `new`.
    fn replace_child(&mut self, parent: Handle, old: Handle, new: Handle) {
        if parent.is_nil() {
            self.root = new;
        } else if self.left(parent) == old {
            self.link_mut(parent).left = new;
        } else {
            self.link_mut(parent).right = new;
        }
    }

    // ─── Entries ────────────────────────────────────────────────────────────

    #[inline]
    pub(crate) fn key(&self, h: Handle) -> &K {
        &self.entries.get(h).key
    }

    #[inline]
    pub(crate) fn key_value(&self, h: Handle) -> (&K, &V) {
        let entry = self.entries.get(h);
        (&entry.key, &entry.value)
    }

    #[inline]
    pub(crate) fn key_value_mut(&mut self, h: Handle) -> (&K, &mut V) {
        let entry = self.entries.get_mut(h);
        (&entry.key, &mut entry.value)
    }

    /// Splits the tree into its link table and a raw pointer to entry storage, for
    /// iterators that hand out disjoint `&mut V`.
    pub(crate) fn split_for_iter_mut(&mut self) -> (&[Links], *mut Option<Entry<K, V>>) {
        let base = self.entries.as_mut_ptr();
        (&self.links, base)
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    /// Leftmost node of the subtree at `h`; `NIL` if `h` is `NIL`.
    pub(crate) fn minimum(&self, mut h: Handle) -> Handle {
        if h.is_nil() {
            return h;
        }
        while !self.left(h).is_nil() {
            h = self.left(h);
        }
        h
    }

    /// Rightmost node of the subtree at `h`; `NIL` if `h` is `NIL`.
    pub(crate) fn maximum(&self, mut h: Handle) -> Handle {
        if h.is_nil() {
            return h;
        }
        while !self.right(h).is_nil() {
            h = self.right(h);
        }
        h
    }

    pub(crate) fn first(&self) -> Handle {
        self.minimum(self.root)
    }

    pub(crate) fn last(&self) -> Handle {
        self.maximum(self.root)
    }

    /// In-order successor of `h`, or `NIL`.
    pub(crate) fn next(&self, h: Handle) -> Handle {
        next_in(&self.links, h)
    }

    /// Allocates a red leaf under `parent`. The caller links it into `parent`.
    fn alloc(&mut self, key: K, value: V, parent: Handle) -> Handle {
        let h = self.entries.alloc(Entry::new(key, value));
        let links = Links::leaf(parent);
        if h.slot() == self.links.len() {
            self.links.push(links);
        } else {
            self.links[h.slot()] = links;
        }
        h
    }
}

/// In-order successor of `h` over a bare link table.
pub(crate) fn next_in(links: &[Links], h: Handle) -> Handle {
    let right = links[h.slot()].right;
    if !right.is_nil() {
        let mut x = right;
        while !links[x.slot()].left.is_nil() {
            x = links[x.slot()].left;
        }
        return x;
    }
    let mut x = h;
    let mut p = links[x.slot()].parent;
    while !p.is_nil() && x == links[p.slot()].right {
        x = p;
        p = links[p.slot()].parent;
    }
    p
}

/// In-order predecessor of `h` over a bare link table.
pub(crate) fn prev_in(links: &[Links], h: Handle) -> Handle {
    let left = links[h.slot()].left;
    if !left.is_nil() {
        let mut x = left;
        while !links[x.slot()].right.is_nil() {
            x = links[x.slot()].right;
        }
        return x;
    }
    let mut x = h;
    let mut p = links[x.slot()].parent;
    while !p.is_nil() && x == links[p.slot()].left {
        x = p;
        p = links[p.slot()].parent;
    }
    p
}

impl<K, V, C, A: Augment> RawRBTree<K, V, C, A> {
    /// Runs `hook` against the augmentation with a view of the current shape.
    fn notify<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut A, &TreeView<'_, K, V>),
    {
        let view = TreeView {
            links: &self.links,
            entries: &self.entries,
            root: self.root,
        };
        hook(&mut self.augment, &view);
    }

    //     x               y
    //    / \             / \
    //   a   y    =>     x   c
    //      / \         / \
    //     b   c       a   b
    fn rotate_left(&mut self, x: Handle) {
        let y = self.right(x);
        debug_assert!(!y.is_nil(), "rotate_left requires a right child");

        let b = self.left(y);
        self.link_mut(x).right = b;
        if !b.is_nil() {
            self.link_mut(b).parent = x;
        }

        let p = self.parent(x);
        self.link_mut(y).parent = p;
        self.replace_child(p, x, y);

        self.link_mut(y).left = x;
        self.link_mut(x).parent = y;

        self.notify(|augment, tree| augment.on_rotated(tree, x, y));
    }

    //       y           x
    //      / \         / \
    //     x   c  =>   a   y
    //    / \             / \
    //   a   b           b   c
    fn rotate_right(&mut self, y: Handle) {
        let x = self.left(y);
        debug_assert!(!x.is_nil(), "rotate_right requires a left child");

        let b = self.right(x);
        self.link_mut(y).left = b;
        if !b.is_nil() {
            self.link_mut(b).parent = y;
        }

        let p = self.parent(y);
        self.link_mut(x).parent = p;
        self.replace_child(p, y, x);

        self.link_mut(x).right = y;
        self.link_mut(y).parent = x;

        self.notify(|augment, tree| augment.on_rotated(tree, y, x));
    }

    /// Restores the red-black properties after attaching the red leaf `z`.
    fn insert_fixup(&mut self, mut z: Handle) {
        while self.is_red(self.parent(z)) {
            let p = self.parent(z);
            // `p` is red, so it is not the root and `g` is real.
            let g = self.parent(p);

            if p == self.left(g) {
                let uncle = self.right(g);
                if self.is_red(uncle) {
                    trace!(node = z.slot(), "insert: red uncle, recolor");
                    self.paint(p, Color::Black);
                    self.paint(uncle, Color::Black);
                    self.paint(g, Color::Red);
                    z = g;
                } else {
                    if z == self.right(p) {
                        trace!(node = z.slot(), "insert: inner grandchild, rotate parent");
                        z = p;
                        self.rotate_left(z);
                    }
                    trace!(node = z.slot(), "insert: outer grandchild, rotate grandparent");
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.paint(p, Color::Black);
                    self.paint(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.is_red(uncle) {
                    trace!(node = z.slot(), "insert: red uncle, recolor");
                    self.paint(p, Color::Black);
                    self.paint(uncle, Color::Black);
                    self.paint(g, Color::Red);
                    z = g;
                } else {
                    if z == self.left(p) {
                        trace!(node = z.slot(), "insert: inner grandchild, rotate parent");
                        z = p;
                        self.rotate_right(z);
                    }
                    trace!(node = z.slot(), "insert: outer grandchild, rotate grandparent");
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.paint(p, Color::Black);
                    self.paint(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }

        let root = self.root;
        self.paint(root, Color::Black);
    }

    /// Unlinks and frees `z`, returning its entry.
    pub(crate) fn remove_handle(&mut self, z: Handle) -> (K, V) {
        // A node with two children trades entries with its successor, which has no left
        // child, and the successor's node is the one spliced out.
        let y = if self.left(z).is_nil() || self.right(z).is_nil() {
            z
        } else {
            let y = self.minimum(self.right(z));
            self.entries.swap(z, y);
            y
        };

        self.notify(|augment, tree| augment.on_removing(tree, y));

        let x = if self.left(y).is_nil() {
            self.right(y)
        } else {
            self.left(y)
        };
        let x_parent = self.parent(y);
        if !x.is_nil() {
            self.link_mut(x).parent = x_parent;
        }
        self.replace_child(x_parent, y, x);

        let removed_color = self.color(y);
        self.links[y.slot()] = SENTINEL;
        let entry = self.entries.take(y);
        self.len -= 1;
        debug_assert_eq!(self.entries.len(), self.len, "arena and tree disagree on length");

        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }

        entry.into_pair()
    }

    /// Restores the red-black properties after a black node was spliced out above `x`.
    ///
    /// `x` may be `NIL`, whose parent link is meaningless, so its parent is tracked separately.
    fn remove_fixup(&mut self, mut x: Handle, mut parent: Handle) {
        while x != self.root && self.is_black(x) {
            if x == self.left(parent) {
                let mut w = self.right(parent);
                if self.is_red(w) {
                    trace!(node = parent.slot(), "remove: red sibling, rotate parent");
                    self.paint(w, Color::Black);
                    self.paint(parent, Color::Red);
                    self.rotate_left(parent);
                    w = self.right(parent);
                }
                if self.is_black(self.left(w)) && self.is_black(self.right(w)) {
                    trace!(node = parent.slot(), "remove: black nephews, move up");
                    self.paint(w, Color::Red);
                    x = parent;
                    parent = self.parent(x);
                } else {
                    if self.is_black(self.right(w)) {
                        trace!(node = w.slot(), "remove: near nephew red, rotate sibling");
                        let near = self.left(w);
                        self.paint(near, Color::Black);
                        self.paint(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(parent);
                    }
                    trace!(node = parent.slot(), "remove: far nephew red, rotate parent");
                    let parent_color = self.color(parent);
                    self.paint(w, parent_color);
                    self.paint(parent, Color::Black);
                    let far = self.right(w);
                    self.paint(far, Color::Black);
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut w = self.left(parent);
                if self.is_red(w) {
                    trace!(node = parent.slot(), "remove: red sibling, rotate parent");
                    self.paint(w, Color::Black);
                    self.paint(parent, Color::Red);
                    self.rotate_right(parent);
                    w = self.left(parent);
                }
                if self.is_black(self.right(w)) && self.is_black(self.left(w)) {
                    trace!(node = parent.slot(), "remove: black nephews, move up");
                    self.paint(w, Color::Red);
                    x = parent;
                    parent = self.parent(x);
                } else {
                    if self.is_black(self.left(w)) {
                        trace!(node = w.slot(), "remove: near nephew red, rotate sibling");
                        let near = self.right(w);
                        self.paint(near, Color::Black);
                        self.paint(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(parent);
                    }
                    trace!(node = parent.slot(), "remove: far nephew red, rotate parent");
                    let parent_color = self.color(parent);
                    self.paint(w, parent_color);
                    self.paint(parent, Color::Black);
                    let far = self.left(w);
                    self.paint(far, Color::Black);
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }

        if !x.is_nil() {
            self.paint(x, Color::Black);
        }
    }

    /// Removes and returns the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let h = self.first();
        (!h.is_nil()).then(|| self.remove_handle(h))
    }

    /// Removes and returns the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let h = self.last();
        (!h.is_nil()).then(|| self.remove_handle(h))
    }

    /// Keeps only the entries for which `f` returns `true`.
    pub(crate) fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut doomed: Vec<Handle> = Vec::new();
        let mut h = self.first();
        while !h.is_nil() {
            let (key, value) = self.key_value_mut(h);
            if !f(key, value) {
                doomed.push(h);
            }
            h = self.next(h);
        }

        // Largest first: removing a node only relocates its successor's entry, and every
        // pending handle is smaller, so none of them move.
        for h in doomed.into_iter().rev() {
            drop(self.remove_handle(h));
        }
    }

    /// Inserts `key`, overwriting the value of an equal key only when `replace` is set.
    pub(crate) fn insert(&mut self, key: K, value: V, replace: bool) -> InsertResult<V>
    where
        C: Compare<K>,
    {
        let mut parent = Handle::NIL;
        let mut x = self.root;
        let mut ordering = Ordering::Equal;

        while !x.is_nil() {
            parent = x;
            ordering = self.compare.compare(&key, self.key(x));
            match ordering {
                Ordering::Less => x = self.left(x),
                Ordering::Greater => x = self.right(x),
                Ordering::Equal if replace => {
                    let old = mem::replace(&mut self.entries.get_mut(x).value, value);
                    return InsertResult::Replaced(old);
                }
                Ordering::Equal => return InsertResult::Rejected,
            }
        }

        let node = self.alloc(key, value, parent);
        if parent.is_nil() {
            self.root = node;
        } else if ordering == Ordering::Less {
            self.link_mut(parent).left = node;
        } else {
            self.link_mut(parent).right = node;
        }
        self.len += 1;

        self.notify(|augment, tree| augment.on_inserted(tree, node));
        self.insert_fixup(node);
        InsertResult::Inserted
    }

    /// Removes `key` and returns its entry, or `None` if it is absent.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let h = self.find(key);
        (!h.is_nil()).then(|| self.remove_handle(h))
    }
}

impl<K, V, C, A> RawRBTree<K, V, C, A> {
    /// Searches for `key` and returns its node, or `NIL`.
    pub(crate) fn find<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let mut x = self.root;
        while !x.is_nil() {
            match self.compare.compare(key, self.key(x).borrow()) {
                Ordering::Less => x = self.left(x),
                Ordering::Greater => x = self.right(x),
                Ordering::Equal => return x,
            }
        }
        Handle::NIL
    }

    /// Smallest node whose key is strictly greater than `key`.
    pub(crate) fn strict_successor<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let mut x = self.root;
        let mut candidate = Handle::NIL;
        while !x.is_nil() {
            if self.compare.compare(key, self.key(x).borrow()) == Ordering::Less {
                candidate = x;
                x = self.left(x);
            } else {
                x = self.right(x);
            }
        }
        candidate
    }

    /// Smallest node whose key is greater than or equal to `key`.
    pub(crate) fn weak_successor<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let mut x = self.root;
        let mut candidate = Handle::NIL;
        while !x.is_nil() {
            match self.compare.compare(key, self.key(x).borrow()) {
                Ordering::Equal => return x,
                Ordering::Less => {
                    candidate = x;
                    x = self.left(x);
                }
                Ordering::Greater => x = self.right(x),
            }
        }
        candidate
    }

    /// Largest node whose key is strictly less than `key`.
    pub(crate) fn strict_predecessor<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let mut x = self.root;
        let mut candidate = Handle::NIL;
        while !x.is_nil() {
            if self.compare.compare(key, self.key(x).borrow()) == Ordering::Greater {
                candidate = x;
                x = self.right(x);
            } else {
                x = self.left(x);
            }
        }
        candidate
    }

    /// Largest node whose key is less than or equal to `key`.
    pub(crate) fn weak_predecessor<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let mut x = self.root;
        let mut candidate = Handle::NIL;
        while !x.is_nil() {
            match self.compare.compare(key, self.key(x).borrow()) {
                Ordering::Equal => return x,
                Ordering::Greater => {
                    candidate = x;
                    x = self.right(x);
                }
                Ordering::Less => x = self.left(x),
            }
        }
        candidate
    }
}
