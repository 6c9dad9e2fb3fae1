use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ata_scraper::catalog::{self, EventQuery, Gender};
use ata_scraper::config::Config;
use ata_scraper::error::Result;
use ata_scraper::export;
use ata_scraper::fetch::{HttpTableSource, TableSource};
use ata_scraper::logging;
use ata_scraper::pipeline;

#[derive(Parser)]
#[command(name = "ata_scraper")]
#[command(about = "All-time athletics result list scraper")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape events and export one combined result file
    Scrape {
        /// Specific event codes to scrape (comma-separated, e.g. 100m,200).
        /// Default: the full catalogue
        #[arg(long)]
        events: Option<String>,
        /// Restrict to one gender: men or women. Default: both
        #[arg(long)]
        gender: Option<String>,
        /// Output file path (overrides the config)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Output format: csv or jsonl
        #[arg(long, default_value = "csv")]
        format: String,
        /// Processing year for birth-year century correction (overrides the
        /// config)
        #[arg(long)]
        current_year: Option<i32>,
    },
    /// List the event catalogue
    Events,
}

enum OutputFormat {
    Csv,
    Jsonl,
}

fn parse_format(raw: &str) -> std::result::Result<OutputFormat, String> {
    match raw {
        "csv" => Ok(OutputFormat::Csv),
        "jsonl" => Ok(OutputFormat::Jsonl),
        other => Err(format!("Unknown output format: {other} (expected csv or jsonl)")),
    }
}

/// Expands the CLI filters into the list of (gender, event) queries to run,
/// rejecting codes outside the catalogue before any fetching starts.
fn build_queries(events: Option<&str>, gender: Option<&str>) -> Result<Vec<EventQuery>> {
    if events.is_none() && gender.is_none() {
        return Ok(catalog::all_queries());
    }

    let genders: Vec<Gender> = match gender {
        Some(raw) => {
            let gender = Gender::parse(raw).ok_or_else(|| {
                ata_scraper::error::ScraperError::Config(format!(
                    "Unknown gender: {raw} (expected men or women)"
                ))
            })?;
            vec![gender]
        }
        None => Gender::ALL.to_vec(),
    };

    let codes: Vec<&'static str> = match events {
        Some(list) => list
            .split(',')
            .map(|code| catalog::resolve_event_code(code.trim()))
            .collect::<Result<_>>()?,
        None => catalog::EVENT_CATALOGUE.to_vec(),
    };

    let mut queries = Vec::with_capacity(codes.len() * genders.len());
    for event in codes {
        for gender in &genders {
            queries.push(EventQuery::new(*gender, event));
        }
    }
    Ok(queries)
}

async fn scrape(
    config: &Config,
    queries: Vec<EventQuery>,
    current_year: i32,
    out_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let source: Arc<dyn TableSource> = Arc::new(HttpTableSource::new(&config.fetch)?);
    let outcomes = pipeline::run_queries(source, queries, current_year).await;

    let mut sets = Vec::new();
    let mut missing = Vec::new();
    for (query, outcome) in outcomes {
        match outcome {
            Some(set) => sets.push(set),
            None => missing.push(query.describe()),
        }
    }

    match format {
        OutputFormat::Csv => export::write_csv(out_path, &sets)?,
        OutputFormat::Jsonl => export::write_jsonl(out_path, &sets)?,
    }

    let records: usize = sets.iter().map(Vec::len).sum();
    println!("\n📊 Scrape results:");
    println!("   Result sets: {}", sets.len());
    println!("   Records: {}", records);
    println!("   Output file: {}", out_path.display());
    if !missing.is_empty() {
        println!("\n⚠️  No data for:");
        for query in &missing {
            println!("   - {}", query);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            events,
            gender,
            out,
            format,
            current_year,
        } => {
            let format = parse_format(&format)?;
            let config = Config::load(&cli.config)?;
            let queries = build_queries(events.as_deref(), gender.as_deref())?;
            let current_year = current_year.unwrap_or(config.pipeline.current_year);
            let out_path = out.unwrap_or_else(|| PathBuf::from(&config.export.path));

            println!(
                "🏃 Scraping {} event queries (processing year {})...",
                queries.len(),
                current_year
            );
            scrape(&config, queries, current_year, &out_path, format).await?;
        }
        Commands::Events => {
            println!("Event catalogue ({} codes):", catalog::EVENT_CATALOGUE.len());
            for code in catalog::EVENT_CATALOGUE {
                let query = EventQuery::new(Gender::Male, code);
                println!("   {:<6} {}", code, query.discipline().as_str());
            }
        }
    }
    Ok(())
}
