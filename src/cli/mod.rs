//! CLI module for the chapter dashboard
//!
//! Runs without a window: lists chapters, shows option tables, manages the
//! config file and hosts an interactive shell around a live store.

mod commands;
mod output;
mod shell;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

/// PYQ Chapters - chapter-wise previous year question browser
#[derive(Parser, Debug)]
#[command(name = "pyq-chapters")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Launches the GUI when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List chapters matching the given filters
    List(commands::list::ListArgs),

    /// Show unit options per subject
    Units {
        /// Only this subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Interactive shell holding a live chapter store
    Shell,
}

/// Run the CLI with parsed arguments. `command` must be set.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output.format();
    let quiet = cli.output.quiet;

    match cli.command {
        Some(Commands::List(args)) => commands::list::run(args, format, quiet).await,
        Some(Commands::Units { subject }) => commands::units::run(subject, format, quiet).await,
        Some(Commands::Config { command }) => commands::config::run(command, format, quiet).await,
        Some(Commands::Shell) => shell::run().await,
        None => anyhow::bail!("No command given"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["pyq-chapters"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_flags() {
        let cli = Cli::try_parse_from([
            "pyq-chapters",
            "list",
            "--subject",
            "Chemistry",
            "--status",
            "Not Started",
            "--sort",
            "asc",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.output.format(), OutputFormat::Json);
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.subject.as_deref(), Some("Chemistry"));
                assert_eq!(args.status.as_deref(), Some("Not Started"));
                assert_eq!(args.sort, Some(crate::view::SortOrder::Asc));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_sort_rejected() {
        assert!(Cli::try_parse_from(["pyq-chapters", "list", "--sort", "sideways"]).is_err());
    }
}
