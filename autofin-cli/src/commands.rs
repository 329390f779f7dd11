use anyhow::{anyhow, Context, Result};
use autofin_db::models::DateRange;
use autofin_postgres::repository::db_init::{cleanup_database, init_database};
use autofin_postgres::repository::seed::seed_database;
use autofin_postgres::{PostgresRepositories, QuoteWorkflow};
use chrono::{NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::AppConfig;
use crate::quote_file::QuoteFile;
use crate::render::{recommendations_table, schedule_table, QuoteDocument};

// Boxed repository errors do not implement `std::error::Error` themselves.
fn boxed(err: Box<dyn std::error::Error + Send + Sync>) -> anyhow::Error {
    anyhow!(err)
}

pub async fn connect(config: &AppConfig) -> Result<PostgresRepositories> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database_url)
        .await
        .context("connecting to the database")?;
    Ok(PostgresRepositories::new(Arc::new(pool)))
}

pub async fn migrate(repositories: &PostgresRepositories) -> Result<()> {
    init_database(repositories.pool()).await?;
    info!("schema is up to date");
    Ok(())
}

pub async fn cleanup(repositories: &PostgresRepositories) -> Result<()> {
    cleanup_database(repositories.pool()).await?;
    info!("schema dropped");
    Ok(())
}

pub async fn seed(repositories: &PostgresRepositories, encryption_key: &str) -> Result<()> {
    let repos = repositories.create_quoting_repositories().await?;
    match seed_database(&repos, encryption_key).await.map_err(boxed)? {
        Some(summary) => {
            repos.commit().await.map_err(boxed)?;
            println!(
                "Seeded {} clients, {} vehicles, {} products, {} calculations, {} sessions",
                summary.clients,
                summary.vehicles,
                summary.products,
                summary.calculations,
                summary.sessions
            );
        }
        None => println!("Seed data already present"),
    }
    Ok(())
}

pub async fn clear(repositories: &PostgresRepositories) -> Result<()> {
    let repos = repositories.create_quoting_repositories().await?;
    repos.maintenance_repository.clear_all().await.map_err(boxed)?;
    let counts = repos.maintenance_repository.table_counts().await.map_err(boxed)?;
    repos.commit().await.map_err(boxed)?;
    println!(
        "Remaining rows: clients {}, vehicles {}, products {}, calculations {}, sessions {}",
        counts.clients,
        counts.vehicles,
        counts.product_configs,
        counts.calculations,
        counts.user_sessions
    );
    Ok(())
}

pub async fn daily_summary(
    repositories: &PostgresRepositories,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<()> {
    let range = DateRange::new(from, to)?;
    let repos = repositories.create_quoting_repositories().await?;
    let rows = repos.report_repository.daily_summary(range).await.map_err(boxed)?;

    println!("{:<12} {:>8} {:>16} {:>10}", "day", "count", "avg payment", "avg score");
    for row in rows {
        println!(
            "{:<12} {:>8} {:>16} {:>10}",
            row.day.to_string(),
            row.calculations_count,
            row.avg_monthly_payment.to_string(),
            row.avg_score.to_string()
        );
    }
    Ok(())
}

pub async fn approvals(
    repositories: &PostgresRepositories,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<()> {
    let range = DateRange::new(from, to)?;
    let repos = repositories.create_quoting_repositories().await?;
    let rows = repos
        .report_repository
        .daily_approval_breakdown(range)
        .await
        .map_err(boxed)?;

    println!(
        "{:<12} {:>8} {:>9} {:>9} {:>10}",
        "day", "count", "approved", "rejected", "avg score"
    );
    for row in rows {
        println!(
            "{:<12} {:>8} {:>9} {:>9} {:>10}",
            row.day.to_string(),
            row.calculations_count,
            row.approved,
            row.rejected,
            row.avg_score.to_string()
        );
    }
    Ok(())
}

pub async fn popular_products(repositories: &PostgresRepositories, since: NaiveDate) -> Result<()> {
    let since = since.and_time(chrono::NaiveTime::MIN).and_utc();
    let repos = repositories.create_quoting_repositories().await?;
    let rows = repos.report_repository.popular_products(since).await.map_err(boxed)?;

    println!(
        "{:<10} {:>8} {:>16} {:>10} {:>9}",
        "type", "count", "avg amount", "avg months", "approved"
    );
    for row in rows {
        println!(
            "{:<10} {:>8} {:>16} {:>10} {:>9}",
            row.financing_type.to_string(),
            row.calculations_count,
            row.avg_amount.to_string(),
            row.avg_months.to_string(),
            row.approved
        );
    }
    Ok(())
}

pub async fn history(repositories: &PostgresRepositories, passport_hash: &str, limit: usize) -> Result<()> {
    let repos = repositories.create_quoting_repositories().await?;
    let rows = repos
        .report_repository
        .client_history(passport_hash, limit)
        .await
        .map_err(boxed)?;

    if rows.is_empty() {
        println!("No calculations found");
        return Ok(());
    }
    for row in rows {
        println!(
            "{}  {} {}  {}  amount {}  monthly {}  {} ({})",
            row.created_at.format("%d.%m.%Y %H:%M"),
            row.brand,
            row.model,
            row.financing_type,
            row.amount,
            row.monthly_payment,
            row.approval_status.description(),
            row.approval_score
        );
    }
    Ok(())
}

pub async fn quote(
    repositories: &PostgresRepositories,
    file: &Path,
    encryption_key: &str,
    show_schedule: bool,
    save_to: Option<&Path>,
) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let input: QuoteFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", file.display()))?;

    let now = Utc::now();
    let request = input.into_request(now);
    let outcome = QuoteWorkflow::new(encryption_key)
        .submit(repositories, &request, now)
        .await
        .map_err(boxed)?;

    println!("Calculation {}", outcome.calculation.id);
    if let Some(product) = &outcome.product {
        println!("Product:          {} ({})", product.name, product.code);
    }
    println!("Monthly payment:  {}", outcome.result.monthly_payment);
    println!("Total payment:    {}", outcome.result.total_payment);
    if let Some(buyout) = outcome.result.conditions.residual_value {
        println!("Buyout:           {buyout}");
    }
    println!("Overpayment:      {}", outcome.result.overpayment);
    println!("Base rate:        {}%", outcome.result.conditions.base_rate);
    println!("Effective rate:   {}%", outcome.result.effective_rate);
    println!(
        "Decision:         {} (score {})",
        outcome.assessment.status.description(),
        outcome.assessment.score
    );
    for reason in &outcome.assessment.reasons {
        println!("  - {reason}");
    }

    println!();
    println!("Recommended products:");
    print!("{}", recommendations_table(&outcome.recommendations));

    if show_schedule {
        println!();
        print!("{}", schedule_table(&outcome.result.schedule));
    }

    if let Some(path) = save_to {
        let document = QuoteDocument {
            calculation_id: outcome.calculation.id,
            product_code: outcome.product.as_ref().map(|p| p.code.as_str()),
            result: &outcome.result,
            assessment: &outcome.assessment,
            recommendations: &outcome.recommendations,
        };
        std::fs::write(path, serde_json::to_string_pretty(&document)?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "quote saved");
    }
    Ok(())
}
