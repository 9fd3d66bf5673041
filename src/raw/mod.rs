mod arena;
mod handle;
mod navigate;
mod node;
mod raw_bst_map;

pub(crate) use arena::Arena;
pub(crate) use handle::{Handle, Link};
pub(crate) use node::Node;
pub(crate) use raw_bst_map::{Attach, RawBstMap, SearchResult};
