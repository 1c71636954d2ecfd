//! Define cli options

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Render and interact with the "Responding to Events" lesson page
#[derive(Parser)]
#[clap(version, about, author)]
pub(crate) struct Cli {
    /// Most verbose log level written to stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub(crate) log_level: LogLevel,
    /// What to do
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Subcommands
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print the page as html
    Render {
        /// Only print the element with this id
        #[arg(long)]
        id: Option<String>,
    },
    /// Click around the page with text commands
    Run {
        /// Read commands from this file instead of stdin
        #[arg(short, long)]
        script: Option<PathBuf>,
    },
}

/// Log levels selectable on the command line
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Warnings, such as a form reloading the page
    Warn,
    /// Mounting and alerts
    Info,
    /// Commands and rendering
    Debug,
    /// Event dispatch and reactivity internals
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_level_is_global() {
        let cli = Cli::try_parse_from(["respond-lesson", "render", "--log-level", "trace"]);
        assert!(cli.is_ok_and(|cli| matches!(cli.log_level, LogLevel::Trace)));
    }
}
