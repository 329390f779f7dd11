use autofin_db::models::{DailySummaryRow, DateRange};
use crate::error::db_error;
use super::repo_impl::ReportRepositoryImpl;
use std::error::Error;

impl ReportRepositoryImpl {
    /// Count, average monthly payment and average score per day, both
    /// averages rounded to 2 dp. Days without calculations are absent.
    pub async fn daily_summary(
        &self,
        range: DateRange,
    ) -> Result<Vec<DailySummaryRow>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let rows = sqlx::query_as::<_, DailySummaryRow>(
            r#"
            SELECT
                (created_at AT TIME ZONE 'UTC')::date AS day,
                COUNT(*) AS calculations_count,
                ROUND(AVG(monthly_payment), 2) AS avg_monthly_payment,
                ROUND(AVG(approval_score), 2) AS avg_score
            FROM calculations
            WHERE (created_at AT TIME ZONE 'UTC')::date BETWEEN $1 AND $2
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&mut **transaction)
        .await
        .map_err(db_error)?;

        tracing::debug!(from = %range.from, to = %range.to, days = rows.len(), "daily summary");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::seed::seed_database;
    use crate::test_helper::{setup_test_context, TEST_ENCRYPTION_KEY};
    use autofin_db::models::DateRange;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_daily_summary_over_seed_window() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        seed_database(repos, TEST_ENCRYPTION_KEY).await?;

        let day = |d| NaiveDate::from_ymd_opt(2025, 12, d).unwrap();
        let rows = repos
            .report_repository
            .daily_summary(DateRange::new(day(28), day(30))?)
            .await?;

        let days: Vec<_> = rows.iter().map(|r| r.day).collect();
        assert_eq!(days, vec![day(28), day(29), day(30)]);

        let dec_29 = &rows[1];
        assert_eq!(dec_29.calculations_count, 2);
        assert_eq!(dec_29.avg_score, dec!(73.90));
        assert_eq!(dec_29.avg_monthly_payment, dec!(66109.75));
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_daily_summary_empty_range() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        seed_database(repos, TEST_ENCRYPTION_KEY).await?;

        let day = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let rows = repos
            .report_repository
            .daily_summary(DateRange::single_day(day))
            .await?;
        assert!(rows.is_empty());
        Ok(())
    }
}
