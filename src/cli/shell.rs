//! Interactive shell mode
//!
//! A REPL with command history and tab completion. Unlike the one-shot
//! commands it keeps one store alive, so filters and loaded chapters carry
//! over from one command to the next.

use anyhow::Result;
use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

use super::commands;
use super::commands::list::print_chapters;
use super::output::{print_error, print_success};
use super::{Cli, Commands};
use crate::catalog;
use crate::chapter::Subject;
use crate::config::Config;
use crate::filter::FilterField;
use crate::store::{ChaptersStore, StoreEvent};
use crate::view::{self, SortOrder};

/// Command completer for the shell
struct ShellCompleter {
    commands: Vec<(&'static str, Vec<&'static str>)>,
}

impl ShellCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                ("load", vec![]),
                ("filter", vec!["subject", "unit", "status", "class", "weak"]),
                ("reset", vec![]),
                ("sort", vec!["asc", "desc"]),
                ("list", vec![]),
                ("filters", vec![]),
                ("status", vec![]),
                ("units", vec![]),
                ("config", vec!["show", "get", "set", "path"]),
                ("help", vec![]),
                ("exit", vec![]),
                ("quit", vec![]),
            ],
        }
    }

    fn pairs<'a>(words: impl Iterator<Item = &'a &'static str>) -> Vec<Pair> {
        words
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect()
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let words: Vec<&str> = line.split_whitespace().collect();
        let start = line.rfind(' ').map(|i| i + 1).unwrap_or(0);

        match (words.as_slice(), line.ends_with(' ')) {
            ([], _) => Ok((0, Self::pairs(self.commands.iter().map(|(cmd, _)| cmd)))),
            ([prefix], false) => {
                let matches = self.commands.iter().map(|(cmd, _)| cmd).filter(|cmd| cmd.starts_with(prefix));
                Ok((start, Self::pairs(matches)))
            }
            ([cmd], true) => {
                let subs = self.commands.iter().find(|(c, _)| c == cmd).map(|(_, subs)| subs);
                Ok((pos, subs.map(|subs| Self::pairs(subs.iter())).unwrap_or_default()))
            }
            ([cmd, prefix], false) => {
                let subs = self.commands.iter().find(|(c, _)| c == cmd).map(|(_, subs)| subs);
                let candidates = subs
                    .map(|subs| Self::pairs(subs.iter().filter(|sub| sub.starts_with(prefix))))
                    .unwrap_or_default();
                Ok((start, candidates))
            }
            _ => Ok((pos, vec![])),
        }
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}
impl Helper for ShellCompleter {}

/// Parse a command line into arguments, handling quotes
fn parse_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            (c, Some(q)) if c == q => quote = None,
            (' ', None) => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// State carried between shell commands
struct Session {
    store: ChaptersStore,
    sort: SortOrder,
}

impl Session {
    fn new(config: &Config) -> Self {
        Self {
            store: ChaptersStore::new(catalog::source_from_config(config)),
            sort: config.display.default_sort,
        }
    }

    /// Run a single command.
    /// Returns Ok(true) to continue, Ok(false) to exit gracefully.
    async fn run_command(&mut self, args: Vec<String>) -> Result<bool> {
        let Some(cmd) = args.first().cloned() else {
            return Ok(true);
        };

        match cmd.as_str() {
            "help" => print_help(),
            "exit" | "quit" => return Ok(false),
            "load" => self.load().await,
            "filter" => self.filter(&args[1..])?,
            "reset" => {
                self.store.set_filter(FilterField::Subject, Subject::Physics.as_str());
                self.print_filters();
            }
            "sort" => {
                self.sort = match args.get(1) {
                    Some(order) => order.parse().map_err(anyhow::Error::msg)?,
                    None => self.sort.toggled(),
                };
                print_success(&format!("Sort: {}", self.sort.as_str()), false);
            }
            "list" => self.list(&args)?,
            "filters" => self.print_filters(),
            "status" => self.print_status(),
            _ => self.run_one_shot(args).await?,
        }

        Ok(true)
    }

    async fn load(&mut self) {
        self.store.load();
        for event in self.store.settle().await {
            match event {
                StoreEvent::Loaded { total, shown } => {
                    print_success(&format!("Loaded {} chapters ({} shown)", total, shown), false)
                }
                StoreEvent::LoadFailed(message) => print_error(&message),
            }
        }
    }

    /// `filter <field> <value...>`. Words after the field are joined so
    /// "filter status Not Started" needs no quotes.
    fn filter(&mut self, args: &[String]) -> Result<()> {
        let [field, value @ ..] = args else {
            anyhow::bail!("Usage: filter <subject|unit|status|class|weak> <value>");
        };
        if value.is_empty() {
            anyhow::bail!("Missing value for {}", field);
        }
        let field: FilterField = field.parse().map_err(anyhow::Error::msg)?;
        self.store.set_filter(field, &value.join(" "));
        self.print_filters();
        Ok(())
    }

    /// `list` takes the same flags as the one-shot command. Filter flags
    /// update the live store; `--sort` applies to this listing only.
    fn list(&mut self, args: &[String]) -> Result<()> {
        let mut argv: Vec<String> = vec!["pyq-chapters".to_string()];
        argv.extend(args.iter().cloned());

        let cli = match Cli::try_parse_from(&argv) {
            Ok(cli) => cli,
            Err(e) if e.use_stderr() => anyhow::bail!("{}", e.to_string().trim_end()),
            Err(e) => {
                // --help and friends
                println!("{}", e);
                return Ok(());
            }
        };
        let Some(Commands::List(list_args)) = cli.command else {
            return Ok(());
        };

        list_args.apply(&mut self.store);

        if let Some(error) = self.store.error() {
            print_error(error);
            return Ok(());
        }
        if self.store.loading() {
            println!("Still loading");
            return Ok(());
        }
        let order = list_args.sort.unwrap_or(self.sort);
        let chapters = view::sorted(self.store.filtered_chapters(), order);
        print_chapters(&chapters, cli.output.format(), cli.output.quiet);
        Ok(())
    }

    fn print_filters(&self) {
        let filters = self.store.filters();
        for &field in FilterField::all() {
            println!("  {:<8} {}", field.as_str(), filters.encoded(field));
        }
    }

    fn print_status(&self) {
        println!("Source:   {}", self.store.source_description());
        println!("Status:   {}", self.store.status().description());
        println!("Chapters: {}", self.store.chapters().len());
        println!("Shown:    {}", self.store.filtered_chapters().len());
        if let Some(error) = self.store.error() {
            println!("Error:    {}", error);
        }
    }

    /// Hand anything else to the one-shot command parser
    async fn run_one_shot(&self, args: Vec<String>) -> Result<()> {
        let mut argv: Vec<String> = vec!["pyq-chapters".to_string()];
        argv.extend(args);

        let cli = match Cli::try_parse_from(&argv) {
            Ok(cli) => cli,
            Err(e) => {
                // Print clap's error message (includes usage hints)
                println!("{}", e);
                return Ok(());
            }
        };

        let format = cli.output.format();
        let quiet = cli.output.quiet;

        match cli.command {
            Some(Commands::Units { subject }) => commands::units::run(subject, format, quiet).await,
            Some(Commands::Config { command }) => commands::config::run(command, format, quiet).await,
            Some(Commands::Shell) => {
                println!("Already in shell mode.");
                Ok(())
            }
            Some(Commands::List(_)) | None => Ok(()),
        }
    }
}

fn print_help() {
    println!(
        r#"PYQ Chapters Interactive Shell

Commands:
  load                       Fetch the chapter catalog
  filter <field> <value>     Set a filter (subject, unit, status, class, weak)
                             Use "all" to clear; unit and class take a comma list
  reset                      Back to Physics with no other filters
  sort [asc|desc]            Set or flip the sort order
  list [flags]               Show the filtered chapters. Takes the same
                             --subject/--unit/--status/--class/--weak/--sort
                             flags as the list command
  filters                    Show the active filters
  status                     Show load status and counts

  units [--subject S]        Show unit options
  config show                Show current configuration
  config get <key>           Get a specific setting
  config set <key> <value>   Set a configuration value
  config path                Show config file path

  help                       Show this help
  exit, quit                 Exit the shell

Flags (for list, units and config):
  --json                     Output in JSON format
  --quiet, -q                Suppress non-essential output
"#
    );
}

/// Get the history file path
fn history_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "pyq", "PyqChapters")
        .map(|dirs| dirs.data_dir().join("shell_history"))
}

/// Run the interactive shell
pub async fn run() -> Result<()> {
    println!("PYQ Chapters Interactive Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for available commands, 'exit' to quit.\n");

    let config = Config::load_or_default();
    let mut session = Session::new(&config);
    session.load().await;

    let editor_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let mut rl = Editor::with_config(editor_config)?;
    rl.set_helper(Some(ShellCompleter::new()));

    // Load history
    if let Some(path) = history_path() {
        let _ = rl.load_history(&path);
    }

    loop {
        match rl.readline("pyq> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                match session.run_command(parse_args(line)).await {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(e) => print_error(&e.to_string()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    // Save history
    if let Some(path) = history_path() {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(&path);
    }

    Ok(())
}
