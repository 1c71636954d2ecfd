//! Command line front end for the lesson page

use std::io::{BufReader, IsTerminal, Write};

use clap::Parser;

/// Reusable imports
mod prelude {
    pub use anyhow::{Context, Result};
    pub use owo_colors::OwoColorize;
}

use prelude::*;
use respond_lesson::session::{self, Session};

mod options;

fn main() -> Result<()> {
    let cli = options::Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_level(cli.log_level.into())
        .init()
        .context("Installing logger")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        options::Command::Render { id } => {
            let html = session::render(id.as_deref())?;
            writeln!(out, "{html}")?;
        }
        options::Command::Run { script: Some(path) } => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Opening script {}", path.display()))?;
            Session::new()?.run(BufReader::new(file), &mut out)?;
        }
        options::Command::Run { script: None } => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                writeln!(
                    out,
                    "{} type `help` for commands, `quit` to leave",
                    "respond-lesson".bold()
                )?;
            }
            Session::new()?.run(stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}
