//! Index structures.
//!
//! Every directory owns one [`BTree`] mapping entry names to their
//! contents. The engine is purely in-memory and knows nothing about
//! files or directories; it stores opaque values keyed by string.

pub mod btree;

pub use btree::{BTree, Entry};
