//! Interactive memfs REPL.
//!
//! Reads commands with line editing, applies them to an in-memory file
//! system, and prints results until `exit` or end of input.

use std::io;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memfs::fs::shell::{Outcome, Shell, HELP};

fn main() -> rustyline::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut shell = Shell::new();
    let mut rl = DefaultEditor::new()?;
    let mut stdout = io::stdout();

    print!("{HELP}");

    loop {
        match rl.readline(&shell.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(&line)?;
                }
                match shell.handle(&line, &mut stdout) {
                    Ok(Outcome::Continue) => {}
                    Ok(Outcome::Exit) => break,
                    Err(e) => {
                        tracing::error!("output error: {e}");
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("bye.");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
