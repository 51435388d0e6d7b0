use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::Level;

use jsonsmith::config::Config;
use jsonsmith::document::validation::{minify_json, validate};
use jsonsmith::editor::state::EditorState;
use jsonsmith::file::loader::{read_import_file, read_import_stdin};
use jsonsmith::file::saver::save_serialized;
use jsonsmith::ui::tree_view::{flatten_visible_nodes, matches_search, render_outline};

/// jsonsmith - a structural JSON editor toolkit
#[derive(Parser)]
#[command(name = "jsonsmith")]
#[command(version)]
#[command(about = "Validate, format, and inspect JSON documents as trees", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that a document is well-formed JSON
    Validate {
        /// JSON file (omit to read from stdin)
        file: Option<PathBuf>,
    },
    /// Pretty-print or minify a document
    Format {
        /// JSON file (omit to read from stdin)
        file: Option<PathBuf>,

        /// Emit compact JSON instead of indented
        #[arg(long)]
        minify: bool,

        /// Write to this file instead of stdout (gzip when it ends in .gz)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the document as an outline
    Tree {
        /// JSON file (omit to read from stdin)
        file: Option<PathBuf>,

        /// Flag nodes whose key or value contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Start with every container collapsed
        #[arg(long)]
        collapsed: bool,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Reads the input text from a file, or from stdin when no file is given.
fn read_input(file: Option<&Path>, config: &Config) -> Result<String> {
    match file {
        Some(path) => read_import_file(path, config.max_import_bytes)
            .with_context(|| format!("Failed to load {}", path.display())),
        None => {
            if io::stdin().is_terminal() {
                bail!("No input: pass a FILE or pipe JSON on stdin");
            }
            read_import_stdin(config.max_import_bytes).context("Failed to read stdin")
        }
    }
}

fn load_state(file: Option<&Path>, config: &Config) -> Result<EditorState> {
    let text = read_input(file, config)?;
    let mut state = EditorState::new(config);
    state.import_json(&text)?;
    Ok(state)
}

fn run_validate(file: Option<&Path>, config: &Config) -> Result<()> {
    let text = read_input(file, config)?;
    let result = validate(&text);
    if result.valid {
        println!("valid");
        return Ok(());
    }

    let message = result.error.unwrap_or_default();
    match result.position {
        Some(position) => bail!(
            "invalid JSON at line {}, column {}: {}",
            position.line,
            position.column,
            message
        ),
        None => bail!("invalid JSON: {}", message),
    }
}

fn run_format(
    file: Option<&Path>,
    minify: bool,
    output: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let state = load_state(file, config)?;
    let mut formatted = state.get_json();
    if minify {
        formatted = minify_json(&formatted);
    }
    formatted.push('\n');

    match output {
        Some(path) => save_serialized(path, &formatted, config)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            io::stdout()
                .write_all(formatted.as_bytes())
                .context("Failed to write to stdout")?;
            Ok(())
        }
    }
}

fn run_tree(
    file: Option<&Path>,
    search: Option<&str>,
    collapsed: bool,
    config: &Config,
) -> Result<()> {
    let mut state = load_state(file, config)?;
    if collapsed {
        state.collapse_all();
    }
    if let Some(term) = search {
        state.set_search_term(term);
    }

    let lines = flatten_visible_nodes(state.tree().nodes());
    let outline = render_outline(&lines, state.search_term());
    io::stdout()
        .write_all(outline.as_bytes())
        .context("Failed to write to stdout")?;

    if !state.search_term().is_empty() {
        let hits = lines
            .iter()
            .filter(|line| matches_search(line.node, state.search_term()))
            .count();
        eprintln!("{} matching node(s) visible", hits);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load();

    match cli.command {
        Command::Validate { file } => run_validate(file.as_deref(), &config),
        Command::Format {
            file,
            minify,
            output,
        } => run_format(file.as_deref(), minify, output.as_deref(), &config),
        Command::Tree {
            file,
            search,
            collapsed,
        } => run_tree(file.as_deref(), search.as_deref(), collapsed, &config),
    }
}
