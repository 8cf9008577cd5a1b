//! CLI entry point for the EV population stats tool.
//!
//! Provides subcommands for the overview summary, chart projections, the
//! searchable table view, and a full JSON report.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use ev_pop_stats::{
    fetch::{fetch_text, BasicClient},
    output::{export_make_csv, export_year_csv, print_json, write_report},
    parser::parse_records,
    record::VehicleRecord,
    report::DashboardReport,
    stats::{self, SummaryStats},
    store::{DataStore, LoadState},
    table::{self, TableQuery, DEFAULT_PAGE_SIZE},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

#[derive(Parser)]
#[command(name = "ev_pop_stats")]
#[command(about = "Analytics over an EV registration dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary statistics for the dataset
    Summary {
        /// Path to a CSV file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Print the top makes by registration count
    TopMakes {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Number of makes to include
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
    /// Print the model-year histogram (years after 2010)
    Years {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,
    },
    /// Browse the dataset as a filtered, paginated table
    Table {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Substring to match against make, model, city, or county
        #[arg(short, long)]
        search: Option<String>,

        /// Exact model-year filter
        #[arg(short, long)]
        year: Option<u16>,

        /// 1-based page index
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Write the full dashboard report as JSON, with optional chart CSVs
    Report {
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file to write the report to
        #[arg(short, long, default_value = "report.json")]
        output: String,

        /// Number of makes to include in the top-makes chart
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Optional: also export top-makes chart data as CSV
        #[arg(long)]
        makes_csv: Option<String>,

        /// Optional: also export year histogram chart data as CSV
        #[arg(long)]
        years_csv: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/ev_pop_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("ev_pop_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { source } => {
            let records = load_snapshot(&source).await?;
            let summary = SummaryStats::from_records(&records);

            info!(
                bev_pct = format!("{:.1}", summary.bev_pct()),
                phev_pct = format!("{:.1}", summary.phev_pct()),
                "Fleet composition"
            );
            print_json(&summary)?;
        }
        Commands::TopMakes { source, limit } => {
            let records = load_snapshot(&source).await?;
            print_json(&stats::top_makes(&records, limit))?;
        }
        Commands::Years { source } => {
            let records = load_snapshot(&source).await?;
            print_json(&stats::year_distribution(&records))?;
        }
        Commands::Table {
            source,
            search,
            year,
            page,
            page_size,
        } => {
            let records = load_snapshot(&source).await?;
            let query = TableQuery {
                search,
                year,
                page,
                page_size,
            };
            let result = table::query(&records, &query);

            for row in &result.rows {
                info!(
                    make = %row.make,
                    model = %row.model,
                    year = row.model_year,
                    vehicle_type = row.vehicle_type.map(|t| t.label()),
                    city = %row.city,
                    county = %row.county,
                    range = row.electric_range,
                    "Vehicle"
                );
            }

            info!(
                page = result.page,
                total_pages = result.total_pages,
                matched = result.matched,
                total = result.total,
                "Table view"
            );
        }
        Commands::Report {
            source,
            output,
            limit,
            makes_csv,
            years_csv,
        } => {
            let records = load_snapshot(&source).await?;
            let report = DashboardReport::build(&records, limit);

            write_report(&output, &report)?;
            info!(path = %output, "Report written");

            if let Some(path) = makes_csv {
                export_make_csv(&path, &report.top_makes)?;
            }
            if let Some(path) = years_csv {
                export_year_csv(&path, &report.year_distribution)?;
            }
        }
    }

    Ok(())
}

/// Loads dataset text from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %source))]
async fn fetch_source(source: &str) -> Result<String> {
    let text = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_text(&client, source).await?
    } else {
        std::fs::read_to_string(source)?
    };
    Ok(text)
}

/// Runs the one-shot load: fetch, parse, and settle the store into either
/// `Ready` or `Failed`. A failure is terminal for the attempt.
async fn load_snapshot(source: &str) -> Result<Vec<VehicleRecord>> {
    let mut store = DataStore::new();

    match fetch_source(source).await.and_then(|text| parse_records(&text)) {
        Ok(records) => {
            info!(records = records.len(), "Dataset loaded");
            store.complete(records);
        }
        Err(e) => {
            error!(error = %e, "Dataset load failed");
            store.fail(e.to_string());
        }
    }

    match store.into_state() {
        LoadState::Ready(records) => Ok(records),
        LoadState::Failed(message) => Err(anyhow!("failed to load data: {message}")),
        LoadState::Loading => Err(anyhow!("dataset load never settled")),
    }
}
