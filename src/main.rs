use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf, time::Instant};
#[allow(unused_imports)]
use tracing::*;
use tracing_subscriber::prelude::*;

use crate::{registry::Registry, tally::Filters};

mod error;
mod input;
mod ledger;
mod normalize;
mod pattern;
mod registry;
mod render;
mod tally;

/// Totals spending per merchant across CSV or TSV statements.
///
/// Each file should have two columns, merchant and cost, and becomes a column
/// in the report named after the file. Merchants can be folded into groups
/// with a JSON file of the form {"group": ["merchant", "/regex/i"]}. Patterns
/// wrapped in slashes are regular expressions, an optional trailing "i" makes
/// them case-insensitive. A group named "ignore" is hidden from the report.
#[derive(Parser)]
#[command(author, version, about, long_about)]
struct Cli {
    /// Statements to total, one report column per file
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
    /// Filter out a group or merchant (can be used more than once)
    #[arg(short, long, value_name = "NAME")]
    exclude: Vec<String>,
    /// Show subtotals for grouped merchants
    #[arg(short = 'x', long)]
    expand: bool,
    /// Group merchants using the patterns in this JSON file
    #[arg(short, long, value_name = "FILE")]
    groups: Option<PathBuf>,
    /// Only show these groups or merchants (can be used more than once)
    #[arg(short, long, value_name = "NAME")]
    include: Vec<String>,
    /// Disable colorized output
    #[arg(long)]
    no_color: bool,
    /// Print the report grid as JSON
    #[arg(long)]
    json: bool,
    /// More logging, and detailed errors
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(groups) = &self.groups {
            if !groups.exists() {
                anyhow::bail!("group file {} not found", groups.display());
            }
        }

        for file in &self.files {
            if !file.exists() {
                anyhow::bail!("csv file {} not found", file.display());
            }
        }

        Ok(())
    }

    fn filters(&self) -> Filters {
        Filters {
            exclude: self.exclude.clone(),
            include: self.include.clone(),
            expand: self.expand,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let get_rust_log = || std::env::var("RUST_LOG").unwrap_or_else(|_| cli.log_level().into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(get_rust_log()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        if cli.verbose > 0 {
            eprintln!("error: {:?}", e);
        } else {
            eprint!("error");
            e.chain().for_each(|cause| eprint!(": {}", cause));
            eprintln!();
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    cli.validate()?;

    let mut registry = Registry::new();

    if let Some(path) = &cli.groups {
        let json =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        registry
            .create_groups(&json)
            .with_context(|| format!("invalid groups in {}", path.display()))?;
    }

    let started = Instant::now();
    for path in &cli.files {
        let _span = span!(Level::INFO, "reading", path = %path.display()).entered();
        for purchase in input::read_file(path)? {
            registry.purchase(&purchase.label, &purchase.merchant, purchase.cost);
        }
    }
    info!(
        files = cli.files.len(),
        labels = registry.labels().len(),
        merchants = registry.ledgers().len(),
        "loaded in {:?}",
        started.elapsed()
    );

    registry.set_filters(cli.filters());
    debug!(filters = ?registry.filters(), "filtering");

    let tally = registry.tally();
    info!(labels = ?tally.labels(), rows = tally.rows().len(), "tallied");

    if cli.json {
        println!("{}", serde_json::to_string(tally)?);
    } else {
        println!("\n{}\n", render::render(tally));
    }

    Ok(())
}
