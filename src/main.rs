//! CLI entry point for the OSU public-API tool.
//!
//! Authenticates once per session against the OAuth2 client-credentials
//! endpoint, then runs one of the API tasks: Beaver Bus overview, academic
//! terms, textbook-term lookup by date, or stops/vehicles with ETAs on a
//! route.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use osu_api::api::OsuApiClient;
use osu_api::config::AppConfig;
use osu_api::fetch::{BasicClient, BearerAuth};
use osu_api::output::{print_json, print_record, print_record_json};
use osu_api::token::TokenProvider;
use osu_api::{terms, workflow};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "osu_api")]
#[command(about = "A client for the OSU public APIs", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "configuration.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the Beaver Bus system overview
    BeaverBus,
    /// List academic terms
    Terms {
        /// Only the term containing this date (yyyy-mm-dd)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Resolve the academic term used for textbook search on a date
    Textbooks {
        /// Date to resolve (yyyy-mm-dd)
        #[arg(value_name = "DATE")]
        date: String,
    },
    /// Show every stop on a route with the next vehicle and its ETA
    Route {
        /// Route number to look up
        #[arg(value_name = "ROUTE_ID")]
        route_id: String,

        /// Emit records as JSON lines instead of the console format
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/osu_api.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("osu_api.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    info!(config = %cli.config.display(), "Loading configuration");
    let config = AppConfig::load(&cli.config)?;

    // One token per session; every API call below reuses it.
    let provider = TokenProvider::new(config.credentials())?;
    let token = provider
        .acquire()
        .await
        .context("invalid access_token of the application, could not connect")?;

    let client = BearerAuth::new(BasicClient::new()?, token)?;

    osu_api::config::verify_endpoints(&client, &config.api_urls)
        .await
        .context("'configuration.yaml' file is not correct")?;

    let api = OsuApiClient::new(client, config.api_urls.clone());

    match cli.command {
        Commands::BeaverBus => {
            let body = api.beaver_bus().await?;
            print_json(&body)?;
        }
        Commands::Terms { date } => {
            if let Some(ref date) = date {
                parse_date(date)?;
            }
            let body = api.terms(date.as_deref()).await?;
            print_json(&body)?;
        }
        Commands::Textbooks { date } => {
            parse_date(&date)?;
            textbook_term(&api, &date).await?;
        }
        Commands::Route { route_id, json } => {
            let emitted = workflow::stops_and_vehicles(&api, &route_id, |record| {
                if json {
                    print_record_json(&record);
                } else {
                    print_record(&record);
                }
            })
            .await?;
            info!(%route_id, emitted, "Route lookup finished");
        }
    }

    Ok(())
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{date}', expected yyyy-mm-dd"))
}

/// Looks up the academic term containing `date` and prints the calendar
/// year and season textbook searches are keyed on.
async fn textbook_term<C: osu_api::fetch::HttpClient>(
    api: &OsuApiClient<C>,
    date: &str,
) -> Result<()> {
    let body = api.terms(Some(date)).await?;

    match terms::term_for_date(&body, date) {
        Ok(term) => println!("Term for {date}: {} {}", term.season, term.calendar_year),
        Err(e) => error!(date, error = %e, "Term lookup returned no usable data"),
    }
    Ok(())
}
