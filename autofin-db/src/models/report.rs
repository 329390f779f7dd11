use autofin_api::{ApiError, ApiResult, ApprovalStatus, FinancingType};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Inclusive range of UTC calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> ApiResult<Self> {
        if from > to {
            return Err(ApiError::validation(format!(
                "Report range start {from} is after its end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }
}

/// One day of the daily summary report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DailySummaryRow {
    pub day: NaiveDate,
    pub calculations_count: i64,
    /// Rounded to 2 dp
    pub avg_monthly_payment: Decimal,
    /// Rounded to 2 dp
    pub avg_score: Decimal,
}

/// One day of the approval breakdown report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ApprovalBreakdownRow {
    pub day: NaiveDate,
    pub calculations_count: i64,
    /// Count of `pre_approved`
    pub approved: i64,
    pub rejected: i64,
    /// Rounded to 1 dp, half away from zero
    pub avg_score: Decimal,
}

/// Demand per financing type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductPopularityRow {
    pub financing_type: FinancingType,
    pub calculations_count: i64,
    pub avg_amount: Decimal,
    pub avg_months: Decimal,
    pub approved: i64,
}

/// Calculation joined with its vehicle, as shown in a client's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ClientHistoryRow {
    pub calculation_id: uuid::Uuid,
    pub created_at: DateTime<Utc>,
    pub brand: String,
    pub model: String,
    pub financing_type: FinancingType,
    pub amount: Decimal,
    pub monthly_payment: Decimal,
    pub approval_status: ApprovalStatus,
    pub approval_score: Decimal,
}
