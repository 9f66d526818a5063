//! contact-queue: print today's outreach queue from a record snapshot
//!
//! Reads a JSON array of contact records (as exported by the dashboard's
//! record store), optionally a YAML queue config, and prints the ordered
//! queue. Logs go to stderr so stdout can be piped.

mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing::info;

use contact_queue::{parse_records, QueueConfig, QueueGenerator};

#[derive(Parser)]
#[command(name = "contact-queue")]
#[command(about = "Rank alumni contact records into today's outreach queue")]
struct Cli {
    /// Path to the JSON record snapshot
    #[arg(short, long, env = "CONTACT_QUEUE_RECORDS")]
    records: PathBuf,

    /// Path to a YAML queue configuration
    #[arg(short, long, env = "CONTACT_QUEUE_CONFIG")]
    config: Option<PathBuf>,

    /// Date to generate the queue for (defaults to the local date)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Maximum number of queue items (overrides config file)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Also list excluded records and why
    #[arg(long)]
    show_excluded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("contact_queue=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(limit) = cli.limit {
        config.queue.max_items = Some(limit);
    }
    let generator = QueueGenerator::with_config(config).context("invalid queue configuration")?;

    let content = std::fs::read_to_string(&cli.records)
        .with_context(|| format!("failed to read records from {}", cli.records.display()))?;
    let records = parse_records(&content)
        .with_context(|| format!("failed to parse records in {}", cli.records.display()))?;

    // Fixed once for the whole run.
    let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());
    info!(%today, records = records.len(), "Generating contact queue");

    let report = generator.report(&records, today);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print!("{}", render::table(&report));
            if cli.show_excluded {
                print!("{}", render::exclusions(&report));
            }
            print!("{}", render::summary(&report.summary));
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<QueueConfig> {
    let Some(path) = path else {
        info!("No config file given, using defaults");
        return Ok(QueueConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    let config = QueueConfig::from_yaml(&content)
        .with_context(|| format!("invalid config in {}", path.display()))?;
    info!(path = %path.display(), "Loaded queue config");
    Ok(config)
}
