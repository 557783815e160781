//! Command-line front end for the deckcore pipeline.
//!
//! One-shot mode analyzes the name given on the command line; with no name
//! it drops into an interactive prompt, analyzing each entered name until
//! `exit`. Each successful run writes a plain-text report (or prints JSON
//! with `--json`).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use deckcore::{config, report, Deckcore};

#[derive(Parser)]
#[command(
    name = "deckcore",
    version,
    about = "Analyze the core composition of a card's tournament-winning decks"
)]
struct Cli {
    /// Card name to analyze; starts an interactive prompt when omitted
    name: Option<String>,

    /// Earliest tournament date to consider (YYYY-MM-DD)
    #[arg(long)]
    since: Option<NaiveDate>,

    /// Directory for the report file (defaults to ~/Deck_Analysis)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the run as JSON to stdout instead of writing a report
    #[arg(long)]
    json: bool,
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "analysis failed");
        std::process::exit(1);
    }
}

fn run() -> deckcore::Result<()> {
    let cli = Cli::parse();

    let mut builder = Deckcore::builder();
    if let Some(since) = cli.since {
        builder = builder.cutoff(since);
    }
    let engine = builder.build();

    match &cli.name {
        Some(name) => analyze_one(&engine, name, &cli),
        None => interactive(&engine, &cli),
    }
}

fn analyze_one(engine: &Deckcore, name: &str, cli: &Cli) -> deckcore::Result<()> {
    let run = engine.run(name)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&run)?);
        return Ok(());
    }

    let dir = cli.out.clone().unwrap_or_else(config::default_report_dir);
    let today = Local::now().date_naive();
    let path = report::write_report(&dir, &run.found, run.since, today, &run.result)?;
    info!(report = %path.display(), "analysis report written");
    println!(
        "{}: {} winning lists analyzed, report written to {}",
        run.found,
        run.result.n_lists,
        path.display()
    );
    Ok(())
}

fn interactive(engine: &Deckcore, cli: &Cli) -> deckcore::Result<()> {
    let stdin = io::stdin();
    loop {
        print!("Card name (or 'exit'): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("exit") {
            break;
        }

        // per-query failures keep the loop alive
        if let Err(err) = analyze_one(engine, query, cli) {
            eprintln!("{err}");
        }
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
