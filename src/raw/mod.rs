mod arena;
mod handle;
mod node;
mod raw_rbtree;

pub(crate) use arena::Arena;
pub use handle::Handle;
pub(crate) use node::{Color, Entry, Links};
pub(crate) use raw_rbtree::{InsertResult, RawRBTree, next_in, prev_in};
