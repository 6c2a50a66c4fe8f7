use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tdoll")]
#[command(about = "Girls' Frontline T-Doll catalog scraper")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the T-Doll list page and write the catalog JSON
    Scrape {
        /// Output file for the catalog
        #[arg(short = 'O', long, default_value = "tdolls.json")]
        output: String,

        /// Also save the raw fetched HTML to this path
        #[arg(long)]
        cache_html: Option<String>,
    },

    /// Check a written catalog file against the output contract
    Validate {
        /// Path to the catalog JSON file
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Scrape { output, cache_html } => {
            tracing::info!(output = %output, "Scraping T-Doll catalog");
            tdoll_acquire::gamepress::scrape(&output, cache_html.as_deref()).await?;
        }
        Commands::Validate { file } => {
            tracing::info!(file = %file, "Validating");
            let errors = tdoll_validate::validate(&file)?;
            if !errors.is_empty() {
                anyhow::bail!("{} validation errors in {file}", errors.len());
            }
        }
    }

    Ok(())
}
