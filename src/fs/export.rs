//! Tree-dump exporter.
//!
//! Writes the whole hierarchy as an indented text report (the shell's
//! `save` command, traditionally to `fs.img`). The report is for human
//! eyes only; nothing ever parses it back.

use std::io::Write;

use crate::common::Result;
use crate::fs::{Directory, FileSystem, FsNode};

/// Write the hierarchy report for the whole file system.
///
/// Format:
/// ```text
/// ROOT
/// │   └── docs
/// │   │   └── notes.txt
/// │   └── readme.md
/// ```
/// Entries are listed in ascending name order at every level; one
/// `│   ` indent per directory level.
///
/// # Errors
/// Any I/O error from the underlying writer.
pub fn write_report(fs: &FileSystem, mut out: impl Write) -> Result<()> {
    writeln!(out, "ROOT")?;
    write_dir(fs.root(), 1, &mut out)
}

fn write_dir(dir: &Directory, depth: usize, out: &mut impl Write) -> Result<()> {
    for entry in dir.entries() {
        for _ in 0..depth {
            write!(out, "│   ")?;
        }
        writeln!(out, "└── {}", entry.key)?;

        if let FsNode::Directory(sub) = &entry.value {
            write_dir(sub, depth + 1, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(fs: &FileSystem) -> String {
        let mut buf = Vec::new();
        write_report(fs, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_filesystem() {
        let fs = FileSystem::new();
        assert_eq!(report(&fs), "ROOT\n");
    }

    #[test]
    fn test_nested_report() {
        let mut fs = FileSystem::new();
        fs.create_dir("docs").unwrap();
        fs.create_file("readme.md", "hi").unwrap();
        fs.change_dir("docs").unwrap();
        fs.create_file("notes.txt", "").unwrap();
        fs.change_dir("/").unwrap();

        assert_eq!(
            report(&fs),
            "ROOT\n\
             │   └── docs\n\
             │   │   └── notes.txt\n\
             │   └── readme.md\n"
        );
    }

    #[test]
    fn test_entries_sorted_at_each_level() {
        let mut fs = FileSystem::new();
        for name in ["zeta", "alpha", "mid"] {
            fs.create_file(name, "").unwrap();
        }

        let output = report(&fs);
        let lines: Vec<&str> = output.lines().skip(1).collect();
        assert_eq!(
            lines,
            ["│   └── alpha", "│   └── mid", "│   └── zeta"]
        );
    }

    #[test]
    fn test_report_reaches_disk() {
        // The shell hands `write_report` a real file; make sure the
        // plumbing holds outside of in-memory buffers.
        let mut fs = FileSystem::new();
        fs.create_file("a", "").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fs.img");
        let file = std::fs::File::create(&path).unwrap();
        write_report(&fs, file).unwrap();

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, "ROOT\n│   └── a\n");
    }
}
