//! Error types for memfs.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write
/// `Result<T>`. This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in memfs.
///
/// By having a single error type, error handling stays consistent
/// across the index engine and the file-system layer. None of these is
/// fatal: the shell reports them and keeps running.
#[derive(Debug, Error)]
pub enum Error {
    /// An entry with this name already exists in the tree.
    ///
    /// Returned by `BTree::insert`; keys are unique across a tree.
    #[error("'{0}' already exists")]
    DuplicateKey(String),

    /// No entry with this name exists.
    #[error("'{0}' not found")]
    NotFound(String),

    /// The named entry exists but is a directory, not a file.
    #[error("'{0}' is not a file")]
    NotAFile(String),

    /// The named entry exists but is a file, not a directory.
    #[error("'{0}' is not a directory")]
    NotADirectory(String),

    /// The directory still holds entries and cannot be removed.
    #[error("directory '{0}' is not empty")]
    DirectoryNotEmpty(String),

    /// I/O error while writing the tree-dump report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
