//! Command-line interface for gfagraphs
//!
//! A thin shell over the library: it reads files, calls the public graph
//! API, and prints the results. No graph logic lives here.

use crate::export::ExportGraph;
use crate::graph::GfaGraph;
use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// gfagraphs - in-memory GFA graph toolkit
#[derive(Parser)]
#[command(name = "gfagraphs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Display summary information about a GFA file
    Stats {
        /// Path to the GFA file (plain or .gz)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a GFA file and report every problem line
    Validate {
        /// Path to the GFA file (plain or .gz)
        #[arg(short, long)]
        input: PathBuf,

        /// Stop at the first error instead of collecting all of them
        #[arg(long)]
        strict: bool,
    },

    /// Parse a GFA file and write it back in canonical form
    Convert {
        /// Path to the GFA file (plain or .gz)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export a GFA file as a generic node/edge JSON document
    Export {
        /// Path to the GFA file (plain or .gz)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { input, format } => cmd_stats(&input, &format),
        Commands::Validate { input, strict } => cmd_validate(&input, strict),
        Commands::Convert { input, output } => cmd_convert(&input, &output),
        Commands::Export { input, output } => cmd_export(&input, output.as_deref()),
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn load(input: &Path) -> anyhow::Result<GfaGraph> {
    let spinner = create_spinner("Reading GFA file...");
    let start = Instant::now();
    let graph = GfaGraph::from_file(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    spinner.finish_with_message(format!("Loaded in {:.2?}", start.elapsed()));
    Ok(graph)
}

fn cmd_stats(input: &Path, format: &str) -> anyhow::Result<()> {
    let graph = load(input)?;

    match format.to_lowercase().as_str() {
        "json" => {
            let summary = serde_json::json!({
                "version": graph.version.to_string(),
                "segments": graph.segment_count(),
                "edges": graph.edge_count(),
                "paths": graph.path_count(),
                "total_sequence_length": graph.total_sequence_length(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            println!("{}", graph);
            println!(
                "Total sequence length: {} bp",
                graph.total_sequence_length()
            );
        }
    }
    Ok(())
}

fn cmd_validate(input: &Path, strict: bool) -> anyhow::Result<()> {
    use std::fs::File;
    use std::io::BufReader;

    let spinner = create_spinner("Validating GFA file...");
    let start = Instant::now();

    if strict {
        let graph = GfaGraph::from_file(input)
            .with_context(|| format!("{} is not a valid GFA file", input.display()))?;
        spinner.finish_with_message(format!("Validated in {:.2?}", start.elapsed()));
        println!("OK: {}", graph);
        return Ok(());
    }

    let file = File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
    let (graph, issues) = if input.extension().is_some_and(|e| e == "gz") {
        GfaGraph::parse_lenient(BufReader::new(flate2::read::MultiGzDecoder::new(file)))?
    } else {
        GfaGraph::parse_lenient(BufReader::new(file))?
    };
    spinner.finish_with_message(format!("Validated in {:.2?}", start.elapsed()));

    if issues.is_empty() {
        println!("OK: {}", graph);
    } else {
        for issue in &issues {
            eprintln!("line {}: {}", issue.line, issue.error);
        }
        anyhow::bail!("{} invalid line(s) in {}", issues.len(), input.display());
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: &Path) -> anyhow::Result<()> {
    let graph = load(input)?;
    graph
        .to_file(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn cmd_export(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let graph = load(input)?;
    let json = ExportGraph::from_graph(&graph).to_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!("Export written to: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
