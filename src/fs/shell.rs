//! Interactive command shell.
//!
//! Parses one-line commands (`ls`, `mkdir`, `touch`, `rm`, `rmdir`,
//! `cd`, `save`, `help`, `exit`) and applies them to a [`FileSystem`].
//! Command errors are printed and the session keeps going; nothing here
//! is fatal.
//!
//! The REPL binary owns the line editing; this module is pure
//! parse-and-execute so sessions can be scripted in tests.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::fs::{export, FileSystem};

/// Help text printed on startup and by `help`.
pub const HELP: &str = "\
--- memfs --- available commands ---
  ls              - list the contents of the working directory
  mkdir <name>    - create a new directory
  touch <name>    - create a new empty file
  rm <name>       - remove a file
  rmdir <name>    - remove a directory (must be empty)
  cd <path>       - change directory; '/' is the root, '..' goes up
  save            - write the hierarchy report to 'fs.img'
  help            - show this help
  exit            - quit
";

/// A parsed shell command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    List,
    MakeDir(String),
    Touch(String),
    RemoveFile(String),
    RemoveDir(String),
    ChangeDir(String),
    Save,
    Help,
    Exit,
    /// A known verb missing its argument; holds the usage string.
    Usage(&'static str),
    Unknown(String),
}

/// Parse one input line. Returns `None` for a blank line.
///
/// The grammar is a verb plus at most one argument; anything after the
/// argument is ignored, matching the original shell's tokenizer.
pub fn parse(line: &str) -> Option<Command> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next()?;
    let arg = tokens.next();

    let with_arg = |usage, build: fn(String) -> Command| match arg {
        Some(a) => build(a.to_string()),
        None => Command::Usage(usage),
    };

    Some(match verb {
        "ls" => Command::List,
        "mkdir" => with_arg("usage: mkdir <name>", Command::MakeDir),
        "touch" => with_arg("usage: touch <name>", Command::Touch),
        "rm" => with_arg("usage: rm <name>", Command::RemoveFile),
        "rmdir" => with_arg("usage: rmdir <name>", Command::RemoveDir),
        "cd" => with_arg("usage: cd <path>", Command::ChangeDir),
        "save" => Command::Save,
        "help" => Command::Help,
        "exit" => Command::Exit,
        other => Command::Unknown(other.to_string()),
    })
}

/// Whether the session continues after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// A shell session: the file system plus where `save` writes its report.
#[derive(Debug)]
pub struct Shell {
    fs: FileSystem,
    report_path: PathBuf,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// New session over an empty file system; `save` writes `fs.img` in
    /// the process working directory.
    pub fn new() -> Self {
        Self::with_report_path("fs.img")
    }

    /// New session with an explicit report path (tests point this into
    /// a temporary directory).
    pub fn with_report_path(path: impl AsRef<Path>) -> Self {
        Shell {
            fs: FileSystem::new(),
            report_path: path.as_ref().to_path_buf(),
        }
    }

    /// Prompt string reflecting the working directory.
    pub fn prompt(&self) -> String {
        format!("FS {} > ", self.fs.path())
    }

    /// Parse and execute one input line, writing any output to `out`.
    ///
    /// # Errors
    /// Only I/O errors from `out` itself; file-system errors are
    /// reported as output and the session continues.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<Outcome> {
        let Some(cmd) = parse(line) else {
            return Ok(Outcome::Continue);
        };
        tracing::info!(?cmd, "executing");

        let result = match cmd {
            Command::List => {
                let listing = self.fs.list();
                match &listing {
                    Ok(entries) if entries.is_empty() => writeln!(out, "(empty directory)")?,
                    Ok(entries) => {
                        for e in entries {
                            match e.size {
                                Some(size) => {
                                    writeln!(out, "  - {:<20} [{} {}B]", e.name, e.kind, size)?
                                }
                                None => writeln!(out, "  - {:<20} [{}]", e.name, e.kind)?,
                            }
                        }
                    }
                    Err(_) => {}
                }
                listing.map(|_| ())
            }
            Command::MakeDir(name) => self.fs.create_dir(&name),
            Command::Touch(name) => self.fs.create_file(&name, ""),
            Command::RemoveFile(name) => self.fs.remove_file(&name).and_then(|()| {
                writeln!(out, "removed file '{name}'")?;
                Ok(())
            }),
            Command::RemoveDir(name) => self.fs.remove_dir(&name).and_then(|()| {
                writeln!(out, "removed directory '{name}'")?;
                Ok(())
            }),
            Command::ChangeDir(path) => self.fs.change_dir(&path),
            Command::Save => self.save(out),
            Command::Help => {
                write!(out, "{HELP}")?;
                Ok(())
            }
            Command::Exit => {
                writeln!(out, "bye.")?;
                return Ok(Outcome::Exit);
            }
            Command::Usage(usage) => {
                writeln!(out, "{usage}")?;
                Ok(())
            }
            Command::Unknown(verb) => {
                writeln!(
                    out,
                    "unknown command: '{verb}'. Type 'help' for the list of commands."
                )?;
                Ok(())
            }
        };

        if let Err(e) = result {
            writeln!(out, "error: {e}")?;
        }
        Ok(Outcome::Continue)
    }

    fn save(&self, out: &mut impl Write) -> crate::common::Result<()> {
        let file = std::fs::File::create(&self.report_path)?;
        export::write_report(&self.fs, file)?;
        writeln!(out, "file system saved to {}", self.report_path.display())?;
        Ok(())
    }
}
