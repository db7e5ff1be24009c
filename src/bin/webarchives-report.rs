//! webarchives-report CLI — writes the file-version host report.

use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use webarchives_report::catalog::AspaceClient;
use webarchives_report::config::{CatalogConfig, ReportConfig};
use webarchives_report::report::run_report;
use webarchives_report::telemetry::{
    TelemetryConfig, init_telemetry, log_file_name, open_log_file,
};

#[derive(Parser)]
#[command(
    name = "webarchives-report",
    about = "Report where digital-object file versions are hosted"
)]
struct Cli {
    /// Repository number used to name the log file
    #[arg(long, default_value_t = 0)]
    repository: i64,
    /// Catalog environment (profile name in the config file)
    #[arg(long, default_value = "")]
    environment: String,
    /// Catalog configuration file
    #[arg(long, default_value = "/etc/webarchives-report.toml")]
    config: PathBuf,
    /// Accepted for compatibility; has no effect on the run
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true"
    )]
    test: bool,
    /// Report file. Not part of the fixed interface: without it the report
    /// always goes to `output.tsv`. Lines are appended if the file exists.
    #[arg(long, default_value = "output.tsv")]
    output: PathBuf,
}

/// Long flags that may also be spelled with a single dash, as in
/// `-environment prod` or `-test=true`.
const LONG_FLAGS: [&str; 5] = ["repository", "environment", "config", "test", "output"];

/// Rewrite single-dash spellings of [`LONG_FLAGS`] to `--name` so clap
/// doesn't read them as clusters of short flags. Everything after a bare
/// `--` is left alone.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            if arg == "--" {
                passthrough = true;
                return arg;
            }
            match arg.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
                    if LONG_FLAGS.contains(&name) {
                        format!("-{arg}")
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_from(normalize_args(std::env::args()));

    let log_name = log_file_name(&cli.environment, cli.repository);
    println!("Running, logging to {log_name}");
    let log_file = open_log_file(Path::new(&log_name))?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: std::env::var("OTEL_ENDPOINT").ok(),
        service_name: "webarchives-report".to_string(),
        log_file: Some(log_file),
    })?;
    info!(
        environment = %cli.environment,
        repository = cli.repository,
        test = cli.test,
        "webarchive update tool"
    );

    if let Err(e) = run(cli).await {
        error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let catalog_config = CatalogConfig::load(&cli.config, &cli.environment)?;
    let client = AspaceClient::connect(&catalog_config).await?;
    info!(
        url = %catalog_config.url,
        "connected using {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = ReportConfig {
        output_path: cli.output,
        ..ReportConfig::default()
    };
    let summary = run_report(Arc::new(client), &config).await?;
    info!(
        work_items = summary.work_items,
        chunks = summary.chunks,
        records = summary.records,
        "run complete"
    );
    println!();

    Ok(())
}
