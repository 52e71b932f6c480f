//! Ordered collections backed by self-balancing binary search trees.

mod error;
pub mod avl_tree;

pub use crate::error::{Error, Result};
