//! File-system layer: files, directories, and the working-directory
//! view the shell operates on.
//!
//! Every [`Directory`] owns one [`BTree`] mapping entry names to
//! [`FsNode`] values, so listing a directory is just the tree's
//! in-order traversal. The tree engine holds no file-system knowledge;
//! this module is the only place that interprets entry values.

pub mod export;
pub mod shell;

use crate::common::{Error, Result};
use crate::index::{BTree, Entry};

/// A plain text file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct File {
    content: String,
}

impl File {
    /// Create a file with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        File {
            content: content.into(),
        }
    }

    /// File size in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A directory: a B-tree of named children.
///
/// One tree instance per directory; nothing is shared between
/// directories (and nothing is synchronized - see the engine's
/// thread-safety notes).
#[derive(Debug, Default)]
pub struct Directory {
    tree: BTree<FsNode>,
}

impl Directory {
    pub fn new() -> Self {
        Directory { tree: BTree::new() }
    }

    /// Number of entries directly inside this directory.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Look up a child by name.
    pub fn get(&self, name: &str) -> Option<&FsNode> {
        self.tree.get(name)
    }

    /// Iterate over children in ascending name order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<FsNode>> {
        self.tree.iter()
    }
}

/// What a directory entry holds: a file or a nested directory.
#[derive(Debug)]
pub enum FsNode {
    File(File),
    Directory(Directory),
}

impl FsNode {
    /// One-word tag used by listings and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            FsNode::File(_) => "FILE",
            FsNode::Directory(_) => "DIR",
        }
    }
}

/// One line of a directory listing.
#[derive(Debug, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub kind: &'static str,
    /// File size in bytes; `None` for directories.
    pub size: Option<usize>,
}

/// The whole in-memory file system: a root directory plus the current
/// working directory, kept as a path from the root.
///
/// The working directory is stored as name components and re-resolved
/// on each operation rather than held as a reference, since every
/// directory is owned by its parent's tree and may move when that tree
/// rebalances.
#[derive(Debug, Default)]
pub struct FileSystem {
    root: Directory,
    cwd: Vec<String>,
}

impl FileSystem {
    /// Create a file system with an empty root directory.
    pub fn new() -> Self {
        FileSystem {
            root: Directory::new(),
            cwd: Vec::new(),
        }
    }

    /// The root directory.
    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// Absolute path of the working directory, `/`-joined.
    pub fn path(&self) -> String {
        if self.cwd.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.cwd.join("/"))
        }
    }

    /// Resolve the working directory from the root.
    fn cwd_dir(&self) -> Result<&Directory> {
        let mut dir = &self.root;
        for name in &self.cwd {
            dir = match dir.get(name) {
                Some(FsNode::Directory(sub)) => sub,
                _ => return Err(Error::NotFound(name.clone())),
            };
        }
        Ok(dir)
    }

    fn cwd_dir_mut(&mut self) -> Result<&mut Directory> {
        let mut dir = &mut self.root;
        for name in &self.cwd {
            dir = match dir.tree.get_mut(name) {
                Some(FsNode::Directory(sub)) => sub,
                _ => return Err(Error::NotFound(name.clone())),
            };
        }
        Ok(dir)
    }

    /// Create a text file in the working directory.
    ///
    /// # Errors
    /// [`Error::DuplicateKey`] if an entry with this name exists.
    pub fn create_file(&mut self, name: &str, content: &str) -> Result<()> {
        let node = FsNode::File(File::new(content));
        self.cwd_dir_mut()?
            .tree
            .insert(Entry::new(name, node))?;
        tracing::info!(name, "created file");
        Ok(())
    }

    /// Create an empty subdirectory in the working directory.
    ///
    /// # Errors
    /// [`Error::DuplicateKey`] if an entry with this name exists.
    pub fn create_dir(&mut self, name: &str) -> Result<()> {
        let node = FsNode::Directory(Directory::new());
        self.cwd_dir_mut()?
            .tree
            .insert(Entry::new(name, node))?;
        tracing::info!(name, "created directory");
        Ok(())
    }

    /// Remove a file from the working directory.
    ///
    /// # Errors
    /// [`Error::NotFound`] if no such entry exists, [`Error::NotAFile`]
    /// if the entry is a directory.
    pub fn remove_file(&mut self, name: &str) -> Result<()> {
        let dir = self.cwd_dir_mut()?;
        match dir.get(name) {
            None => return Err(Error::NotFound(name.to_string())),
            Some(FsNode::Directory(_)) => return Err(Error::NotAFile(name.to_string())),
            Some(FsNode::File(_)) => {}
        }
        // The checks above guarantee the removal hits.
        dir.tree.remove(name);
        tracing::info!(name, "removed file");
        Ok(())
    }

    /// Remove an empty subdirectory from the working directory.
    ///
    /// # Errors
    /// [`Error::NotFound`] if no such entry exists,
    /// [`Error::NotADirectory`] if the entry is a file,
    /// [`Error::DirectoryNotEmpty`] if it still holds entries.
    pub fn remove_dir(&mut self, name: &str) -> Result<()> {
        let dir = self.cwd_dir_mut()?;
        match dir.get(name) {
            None => return Err(Error::NotFound(name.to_string())),
            Some(FsNode::File(_)) => return Err(Error::NotADirectory(name.to_string())),
            Some(FsNode::Directory(sub)) => {
                if !sub.is_empty() {
                    return Err(Error::DirectoryNotEmpty(name.to_string()));
                }
            }
        }
        dir.tree.remove(name);
        tracing::info!(name, "removed directory");
        Ok(())
    }

    /// Change the working directory.
    ///
    /// `"/"` jumps to the root, `".."` goes up one level (a no-op at
    /// the root), anything else descends into the named child.
    ///
    /// # Errors
    /// [`Error::NotFound`] if no such entry exists,
    /// [`Error::NotADirectory`] if the entry is a file.
    pub fn change_dir(&mut self, path: &str) -> Result<()> {
        match path {
            "/" => self.cwd.clear(),
            ".." => {
                self.cwd.pop();
            }
            name => {
                match self.cwd_dir()?.get(name) {
                    None => return Err(Error::NotFound(name.to_string())),
                    Some(FsNode::File(_)) => return Err(Error::NotADirectory(name.to_string())),
                    Some(FsNode::Directory(_)) => {}
                }
                self.cwd.push(name.to_string());
            }
        }
        Ok(())
    }

    /// List the working directory in ascending name order.
    pub fn list(&self) -> Result<Vec<ListEntry>> {
        let dir = self.cwd_dir()?;
        Ok(dir
            .entries()
            .map(|e| ListEntry {
                name: e.key.clone(),
                kind: e.value.kind(),
                size: match &e.value {
                    FsNode::File(f) => Some(f.size()),
                    FsNode::Directory(_) => None,
                },
            })
            .collect())
    }
}
