//! ZQLZ Explain CLI
//!
//! Parses captured Redis explain/profile output and prints the entity tree.
//!
//! # Usage
//!
//! ```bash
//! # FT.EXPLAIN text from a file
//! zqlz-explain --module search --core explain --file plan.txt
//!
//! # FT.PROFILE reply (JSON) from stdin
//! redis-cli --json FT.PROFILE idx SEARCH QUERY hello | zqlz-explain --core profile
//!
//! # Time spent in a GRAPH.PROFILE plan
//! zqlz-explain --module graph --core profile --file plan.txt total-time
//! ```

mod config;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use config::{DEFAULT_LOG_FILTER, ExplainConfig};
use serde_json::Value;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zqlz_explain::{
    CoreType, EntityInfo, ModuleType, get_ancestors, get_total_execution_time, parse_output_with,
};

#[derive(Parser, Debug)]
#[command(name = "zqlz-explain")]
#[command(version)]
#[command(about = "Parse Redis search and graph explain/profile output")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Module that produced the output
    #[arg(long, short, value_enum, default_value = "search", global = true)]
    module: Module,

    /// Command family that produced the output
    #[arg(long, short, value_enum, default_value = "explain", global = true)]
    core: Core,

    /// Input file (reads stdin if not provided)
    #[arg(long, short, global = true)]
    file: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Maximum nesting depth accepted by the parsers
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Config file (defaults to <config dir>/zqlz/explain.toml)
    #[arg(long, env = "ZQLZ_EXPLAIN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "ZQLZ_EXPLAIN_LOG", global = true)]
    log_filter: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Print the entity tree as JSON (default)
    Tree,

    /// Print the (parent, child) edges from a node up to the root
    Ancestors {
        /// Node id as printed by `tree`
        id: String,
    },

    /// Print the summed execution time of every node, in ms
    TotalTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Module {
    Search,
    Graph,
}

impl From<Module> for ModuleType {
    fn from(module: Module) -> Self {
        match module {
            Module::Search => ModuleType::Search,
            Module::Graph => ModuleType::Graph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Core {
    Explain,
    Profile,
}

impl From<Core> for CoreType {
    fn from(core: Core) -> Self {
        match core {
            Core::Explain => CoreType::Explain,
            Core::Profile => CoreType::Profile,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, config_file) = ExplainConfig::load(cli.config.as_deref())?;

    let filter = cli.log_filter.as_deref().unwrap_or(&config.log_filter);
    init_logging(filter);
    match &config_file {
        Some(path) => tracing::debug!(path = %path.display(), ?config, "loaded config"),
        None => tracing::debug!("no config file, using defaults"),
    }

    let input = read_input(cli.file.as_ref())?;
    let reply = to_reply(cli.module.into(), cli.core.into(), &input)?;

    let mut options = config.parse_options();
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }

    let tree = parse_output_with(cli.module.into(), cli.core.into(), &reply, &options)
        .context("Failed to parse output")?;
    tracing::info!(nodes = tree.node_count(), depth = tree.depth(), "parsed entity tree");

    let pretty = cli.pretty || config.pretty;
    let output = render(cli.command.unwrap_or(Command::Tree), &tree, pretty)?;
    println!("{output}");
    Ok(())
}

/// Installs a stderr subscriber, RUST_LOG takes precedence over `default_filter`
fn init_logging(default_filter: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Turns raw input into the reply value `parse_output` expects
///
/// Profile replies must be JSON. Plans may be JSON (a string or a list of
/// lines, as `redis-cli --json` prints them) or plain text.
fn to_reply(module: ModuleType, core: CoreType, input: &str) -> Result<Value> {
    if (module, core) == (ModuleType::Search, CoreType::Profile) {
        return serde_json::from_str(input).context("FT.PROFILE input must be a JSON reply");
    }

    match serde_json::from_str::<Value>(input) {
        Ok(value @ (Value::String(_) | Value::Array(_))) => Ok(value),
        _ => Ok(Value::String(input.to_string())),
    }
}

fn render(command: Command, tree: &EntityInfo, pretty: bool) -> Result<String> {
    let value = match command {
        Command::Tree => serde_json::to_value(tree)?,
        Command::Ancestors { id } => {
            let ancestors = get_ancestors(tree, &id);
            if !ancestors.found {
                bail!("No node with id {id}");
            }
            serde_json::to_value(ancestors.pairs)?
        }
        Command::TotalTime => return Ok(get_total_execution_time(tree).to_string()),
    };

    let output = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(output)
}
