mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Spreadsheet formula evaluator.
#[derive(Parser)]
#[command(name = "gridcalc", version, about = "Spreadsheet formula evaluator")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./gridcalc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a formula
    Eval {
        /// Formula text, with or without a leading `=`
        expr: String,
        /// JSON object mapping cell references to raw cell text
        #[arg(long)]
        cells: Option<PathBuf>,
        /// Reference of the cell holding the formula, for cycle detection
        #[arg(long)]
        cell: Option<String>,
        /// Longest chain of nested reference resolutions
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Check a formula's syntax without evaluating it
    Check {
        /// Formula text, with or without a leading `=`
        expr: String,
    },

    /// Print the token stream of a formula
    Tokens {
        /// Formula text, with or without a leading `=`
        expr: String,
    },

    /// Load a cells file, recalculate every cell and print the results
    Recalc {
        /// JSON object mapping cell references to raw cell text
        file: PathBuf,
        /// Longest chain of nested reference resolutions
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_error(&format!("error: {}", e), cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Eval {
            expr,
            cells,
            cell,
            max_depth,
        } => {
            commands::eval::cmd_eval(
                &expr,
                cells.as_deref(),
                cell.as_deref(),
                config::eval_options(&config, max_depth),
                cli.output,
                cli.quiet,
            );
        }
        Commands::Check { expr } => {
            commands::check::cmd_check(&expr, cli.output, cli.quiet);
        }
        Commands::Tokens { expr } => {
            commands::tokens::cmd_tokens(&expr, cli.output, cli.quiet);
        }
        Commands::Recalc { file, max_depth } => {
            commands::recalc::cmd_recalc(
                &file,
                config::eval_options(&config, max_depth),
                cli.output,
                cli.quiet,
            );
        }
    }
}

/// Install the logger. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Report an error message to stderr in the appropriate format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Pretty-print any serializable value to stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!("serialization error: {}", e))
    );
}
