mod error;
mod lazy_tree;
mod strategy;
mod util;

pub use error::RangeTreeError;
pub use lazy_tree::RangeTree;
pub use strategy::{MaxStrategy, MinStrategy, Selector};
pub use util::tree_size;
