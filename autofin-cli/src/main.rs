use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod quote_file;
mod render;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "autofin", about = "Auto-financing quoting store operations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Create types and tables (safe to repeat)
    Migrate,
    /// Drop every table and type
    Cleanup,
    /// Insert the demonstration data set unless it is already present
    Seed,
    /// Delete all clients, vehicles and products with their calculations and sessions
    Clear,
    #[command(subcommand)]
    Report(ReportCommand),
    /// Latest calculations of one client
    History(HistoryArgs),
    /// Price, score and record a quote described by a JSON file
    Quote(QuoteArgs),
}

#[derive(Subcommand, Debug, Clone)]
enum ReportCommand {
    /// Count, average payment and average score per day
    DailySummary(RangeArgs),
    /// Approved and rejected calculations per day
    Approvals(RangeArgs),
    /// Calculations per financing type since a date
    PopularProducts {
        #[arg(long)]
        since: NaiveDate,
    },
}

#[derive(Args, Debug, Clone)]
struct RangeArgs {
    #[arg(long)]
    from: NaiveDate,
    /// Defaults to `--from`
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
struct HistoryArgs {
    #[arg(long)]
    passport_series: String,
    #[arg(long)]
    passport_number: String,
    /// dd.mm.yyyy
    #[arg(long, value_parser = autofin_api::parse_birth_date)]
    birth_date: NaiveDate,
    #[arg(long, default_value_t = autofin_postgres::repository::report_repository::DEFAULT_HISTORY_LIMIT)]
    limit: usize,
}

#[derive(Args, Debug, Clone)]
struct QuoteArgs {
    file: PathBuf,
    /// Print the month-by-month payment schedule
    #[arg(long)]
    schedule: bool,
    /// Write the result, schedule and recommendations as JSON
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

fn init_logging(config: &AppConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.loglevel));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let config = AppConfig::load()?;
    init_logging(&config);

    let cli = Cli::parse();
    let pool = commands::connect(&config).await?;

    match cli.command {
        Command::Migrate => commands::migrate(&pool).await,
        Command::Cleanup => commands::cleanup(&pool).await,
        Command::Seed => commands::seed(&pool, config.require_encryption_key()?).await,
        Command::Clear => commands::clear(&pool).await,
        Command::Report(ReportCommand::DailySummary(range)) => {
            commands::daily_summary(&pool, range.from, range.to.unwrap_or(range.from)).await
        }
        Command::Report(ReportCommand::Approvals(range)) => {
            commands::approvals(&pool, range.from, range.to.unwrap_or(range.from)).await
        }
        Command::Report(ReportCommand::PopularProducts { since }) => {
            commands::popular_products(&pool, since).await
        }
        Command::History(args) => {
            let hash = autofin_db::utils::passport_hash_of(
                &args.passport_series,
                &args.passport_number,
                args.birth_date,
            );
            commands::history(&pool, &hash, args.limit).await
        }
        Command::Quote(args) => {
            commands::quote(
                &pool,
                &args.file,
                config.require_encryption_key()?,
                args.schedule,
                args.save.as_deref(),
            )
            .await
        }
    }
}
