//! CLI command definitions for gapforge.
//!
//! One subcommand: read a raw model response from a file or stdin, run
//! the decode/render pipeline and write the combined export document.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::pipeline::transform;

/// Gap-fill exercise converter for LLM responses.
#[derive(Parser)]
#[command(name = "gapforge")]
#[command(about = "Convert LLM gap-fill responses into OLAT FIB/Inlinechoice import blocks")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Convert a raw model response into the combined export document.
    #[command(alias = "conv")]
    Convert(ConvertArgs),
}

/// Arguments for `gapforge convert`.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input file containing the raw model response (stdin if omitted).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file for the combined document (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Shuffle seed for reproducible distractor order.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Parses CLI arguments from the process environment.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI to its command handler.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert(args) => run_convert(&args),
    }
}

/// Runs the convert command end to end.
pub fn run_convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let output = transform(&raw, args.seed).context("failed to convert model response")?;

    for skipped in &output.skipped {
        warn!(
            index = skipped.index,
            preview = %skipped.preview,
            "skipped item: {}",
            skipped.reason
        );
    }
    info!(
        items = output.item_count,
        skipped = output.skipped.len(),
        "converted model response"
    );

    match &args.output {
        Some(path) => fs::write(path, &output.document)
            .with_context(|| format!("failed to write output file {}", path.display()))?,
        None => println!("{}", output.document),
    }

    Ok(())
}
