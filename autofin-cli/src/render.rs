//! Output of `autofin quote`: plain-text tables and the saved JSON document.

use autofin_api::{Assessment, CalculationResult, Recommendation, ScheduleEntry};
use serde::Serialize;
use std::fmt::Write;
use uuid::Uuid;

/// Everything `autofin quote --save` writes to disk.
#[derive(Debug, Serialize)]
pub struct QuoteDocument<'a> {
    pub calculation_id: Uuid,
    pub product_code: Option<&'a str>,
    pub result: &'a CalculationResult,
    pub assessment: &'a Assessment,
    pub recommendations: &'a [Recommendation],
}

/// One line per month: number, date, payment, principal, interest, balance.
pub fn schedule_table(schedule: &[ScheduleEntry]) -> String {
    let mut out = format!(
        "{:>5}  {:<10}  {:>12}  {:>12}  {:>12}  {:>14}\n",
        "Month", "Date", "Payment", "Principal", "Interest", "Balance"
    );
    for entry in schedule {
        let _ = writeln!(
            out,
            "{:>5}  {:<10}  {:>12}  {:>12}  {:>12}  {:>14}",
            entry.month,
            entry.date.format("%d.%m.%Y").to_string(),
            entry.payment.to_string(),
            entry.principal.to_string(),
            entry.interest.to_string(),
            entry.balance.to_string(),
        );
    }
    out
}

pub fn recommendations_table(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return "No products available for this vehicle\n".to_string();
    }
    let mut out = String::new();
    for rec in recommendations {
        let _ = writeln!(
            out,
            "{:<20} {:<8} {:>6}%  monthly {:>12}  {}",
            rec.product_code,
            rec.financing_type.to_string(),
            rec.rate.to_string(),
            rec.monthly_payment.to_string(),
            rec.reason,
        );
    }
    out
}
