//! CLI entry point for the bikeshare explorer.
//!
//! Loads the three city trip logs once, then either runs the interactive
//! explore session or prints a single report for the given filters.

use anyhow::Result;
use bikeshare_explorer::{
    console::{Console, RULE},
    dataset::{City, DatasetRegistry},
    filters::{DayFilter, FilterParams, MonthFilter},
    output::{OutputFormat, write_report},
    session::Session,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(short, long, env = "BIKESHARE_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    /// Print reports as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick filters and browse statistics (default)
    Explore,
    /// Print statistics for one selection and exit
    Report {
        /// chicago, "new york city" or washington
        #[arg(short, long)]
        city: City,

        /// Month name, or "none" for no month filter
        #[arg(short, long, default_value = "none")]
        month: MonthFilter,

        /// Weekday name, or "all" for no day filter
        #[arg(short = 'w', long, default_value = "all")]
        day: DayFilter,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: quiet stderr (the console is interactive) + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // keep stdout clean for JSON consumers
    let banner = format == OutputFormat::Text;
    if banner {
        println!("\nStarting bikeshare analysis program. We are just getting things set up for you!");
        println!("If you wish to exit at any time, use the keyboard interrupt signal (ctrl+c)");
        println!("Initialising datasets...");
    }
    let registry = DatasetRegistry::load(&cli.data_dir)?;
    if banner {
        println!("Initialisation complete");
        println!("{RULE}");
    }

    let session = Session::new(&registry, format);

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let mut console = Console::stdio();
            session.run(&mut console)?;
        }
        Commands::Report { city, month, day } => {
            let params = FilterParams { city, month, day };
            info!(%params, "One-shot report");
            let report = session.run_once(params);
            write_report(&mut std::io::stdout().lock(), &report, format)?;
        }
    }

    Ok(())
}
