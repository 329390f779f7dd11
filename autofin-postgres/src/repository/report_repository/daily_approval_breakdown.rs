use autofin_db::models::{ApprovalBreakdownRow, DateRange};
use crate::error::db_error;
use super::repo_impl::ReportRepositoryImpl;
use std::error::Error;

impl ReportRepositoryImpl {
    /// Approved (`pre_approved`) and rejected counts per day with the
    /// average score rounded to one decimal, half away from zero.
    pub async fn daily_approval_breakdown(
        &self,
        range: DateRange,
    ) -> Result<Vec<ApprovalBreakdownRow>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        let rows = sqlx::query_as::<_, ApprovalBreakdownRow>(
            r#"
            SELECT
                (created_at AT TIME ZONE 'UTC')::date AS day,
                COUNT(*) AS calculations_count,
                COUNT(*) FILTER (WHERE approval_status = 'pre_approved') AS approved,
                COUNT(*) FILTER (WHERE approval_status = 'rejected') AS rejected,
                ROUND(AVG(approval_score), 1) AS avg_score
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
    async fn test_approval_breakdown_for_last_seed_day() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        seed_database(repos, TEST_ENCRYPTION_KEY).await?;

        let day = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        let rows = repos
            .report_repository
            .daily_approval_breakdown(DateRange::single_day(day))
            .await?;

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.day, day);
        assert_eq!(row.calculations_count, 2);
        assert_eq!(row.approved, 1);
        assert_eq!(row.rejected, 1);
        // 70.85 rounds up
        assert_eq!(row.avg_score, dec!(70.9));
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn test_approval_breakdown_counts_add_up() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let repos = ctx.repos();
        seed_database(repos, TEST_ENCRYPTION_KEY).await?;

        let day = |d| NaiveDate::from_ymd_opt(2025, 12, d).unwrap();
        let rows = repos
            .report_repository
            .daily_approval_breakdown(DateRange::new(day(28), day(30))?)
            .await?;

        let total: i64 = rows.iter().map(|r| r.calculations_count).sum();
        let approved: i64 = rows.iter().map(|r| r.approved).sum();
        let rejected: i64 = rows.iter().map(|r| r.rejected).sum();
        assert_eq!((total, approved, rejected), (6, 3, 1));
        for row in &rows {
            assert!(row.approved + row.rejected <= row.calculations_count);
        }
        Ok(())
    }
}
