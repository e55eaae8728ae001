use super::handle::Handle;

/// The color bit of a red-black node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Structural links of a node.
///
/// Stored apart from the payload so traversal never touches keys or values. Every link is
/// either a live handle or [`Handle::NIL`], never absent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Links {
    pub(crate) color: Color,
    pub(crate) left: Handle,
    pub(crate) right: Handle,
    pub(crate) parent: Handle,
}

/// The links record behind [`Handle::NIL`]: black, and pointing nowhere.
///
/// Slot `0` of every tree's link table holds this value and is never written.
pub(crate) const SENTINEL: Links = Links {
    color: Color::Black,
    left: Handle::NIL,
    right: Handle::NIL,
    parent: Handle::NIL,
};

impl Links {
    /// Links of a freshly attached node: red, no children.
    pub(crate) const fn leaf(parent: Handle) -> Self {
        Self {
            color: Color::Red,
            left: Handle::NIL,
            right: Handle::NIL,
            parent,
        }
    }
}

/// The payload of a node.
#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Entry<K, V> {
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}
