//! Schema setup and teardown from the SQL files shipped with this crate.
//!
//! `migrations/*.sql` run in ascending file order and `cleanup/*.sql` in
//! descending order, so tables are dropped before the types they use.

use sqlx::PgPool;
use std::fs;
use std::path::Path;
use tracing::info;

/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use autofin_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    execute_sql_files_in_order(pool, &migrations_dir, true).await
}

pub async fn cleanup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let cleanup_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cleanup");
    execute_sql_files_in_order(pool, &cleanup_dir, false).await
}

fn sql_files(dir: &Path, ascending: bool) -> Result<Vec<std::path::PathBuf>, sqlx::Error> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .map_err(sqlx::Error::Io)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("sql"))
        .collect();

    files.sort();
    if !ascending {
        files.reverse();
    }
    Ok(files)
}

async fn execute_sql_files_in_order(
    pool: &PgPool,
    dir: &Path,
    ascending: bool,
) -> Result<(), sqlx::Error> {
    for path in sql_files(dir, ascending)? {
        let sql = fs::read_to_string(&path).map_err(sqlx::Error::Io)?;
        sqlx::raw_sql(&sql).execute(pool).await?;
        info!(file = %path.display(), "executed schema script");
    }
    Ok(())
}
