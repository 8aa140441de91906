//! memfs - An in-memory file system with B-tree directory indexes.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                         memfs                           │
//! ├─────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────┐   │
//! │  │             Shell Layer (fs/shell)               │   │
//! │  │    line → Command → FileSystem mutation/output   │   │
//! │  └─────────────────────────────────────────────────┘   │
//! │                           ↓                             │
//! │  ┌─────────────────────────────────────────────────┐   │
//! │  │           File-System Layer (fs/)                │   │
//! │  │   FileSystem + Directory + File + tree-dump      │   │
//! │  │   exporter (fs/export)                           │   │
//! │  └─────────────────────────────────────────────────┘   │
//! │                           ↓                             │
//! │  ┌─────────────────────────────────────────────────┐   │
//! │  │             Index Layer (index/)                 │   │
//! │  │   BTree<V, T>: search / insert / remove / iter   │   │
//! │  │   (one tree per directory, entirely in memory)   │   │
//! │  └─────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`index`] - The B-tree engine
//! - [`fs`] - Files, directories, shell, and the report exporter
//!
//! # Quick Start
//! ```
//! use memfs::fs::FileSystem;
//!
//! let mut fs = FileSystem::new();
//! fs.create_dir("docs").unwrap();
//! fs.create_file("readme.md", "hello").unwrap();
//!
//! let names: Vec<String> = fs.list().unwrap().into_iter().map(|e| e.name).collect();
//! assert_eq!(names, ["docs", "readme.md"]);
//! ```

pub mod common;
pub mod fs;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::MIN_DEGREE;
pub use common::{Error, Result};
pub use fs::{Directory, File, FileSystem, FsNode};
pub use index::{BTree, Entry};
