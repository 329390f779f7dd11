use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{
    ApprovalStatus, Assessment, CalculationParameters, ClientProfile, EmploymentType,
};
use crate::error::ApiResult;
use crate::service::calculator::{round_money, Calculator, SmartCalculator};

pub const PRE_APPROVAL_THRESHOLD: Decimal = dec!(70);
pub const CONDITIONAL_APPROVAL_THRESHOLD: Decimal = dec!(50);

/// Scores a client for pre-approval of a financing request.
pub trait ScoringEngine: Send + Sync {
    fn assess_client(
        &self,
        client: &ClientProfile,
        params: &CalculationParameters,
        today: NaiveDate,
    ) -> ApiResult<Assessment>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRules {
    /// Monthly payment above this share of income is penalised
    pub max_payment_to_income: Decimal,
    pub min_age: i32,
    pub max_age: i32,
    /// Months at the current employer
    pub min_experience_months: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            max_payment_to_income: dec!(0.4),
            min_age: 21,
            max_age: 70,
            min_experience_months: 3,
        }
    }
}

pub fn status_for_score(score: Decimal) -> ApprovalStatus {
    if score >= PRE_APPROVAL_THRESHOLD {
        ApprovalStatus::PreApproved
    } else if score >= CONDITIONAL_APPROVAL_THRESHOLD {
        ApprovalStatus::ConditionalApproval
    } else {
        ApprovalStatus::Rejected
    }
}

/// Rule-based scoring. Starts from 100 and subtracts penalties.
pub struct ScoringSystem<C: Calculator = SmartCalculator> {
    rules: ScoringRules,
    calculator: C,
}

impl Default for ScoringSystem<SmartCalculator> {
    fn default() -> Self {
        Self::new(ScoringRules::default(), SmartCalculator::default())
    }
}

impl<C: Calculator> ScoringSystem<C> {
    pub fn new(rules: ScoringRules, calculator: C) -> Self {
        Self { rules, calculator }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }
}

impl<C: Calculator> ScoringEngine for ScoringSystem<C> {
    fn assess_client(
        &self,
        client: &ClientProfile,
        params: &CalculationParameters,
        today: NaiveDate,
    ) -> ApiResult<Assessment> {
        let mut score = dec!(100);
        let mut reasons = Vec::new();

        let age = today.year() - client.birth_date.year();
        if age < self.rules.min_age {
            score -= dec!(30);
            reasons.push(format!("Age under {}", self.rules.min_age));
        } else if age > self.rules.max_age {
            score -= dec!(20);
            reasons.push(format!("Age over {}", self.rules.max_age));
        }

        let quote = self.calculator.calculate(params, today)?;
        if client.monthly_income > Decimal::ZERO {
            let ratio = quote.monthly_payment / client.monthly_income;
            if ratio > self.rules.max_payment_to_income {
                score -= (ratio - self.rules.max_payment_to_income) * dec!(100);
                reasons.push(format!(
                    "High payment-to-income ratio: {}%",
                    (ratio * dec!(100)).round_dp(1)
                ));
            }
        } else {
            score = Decimal::ZERO;
            reasons.push("No declared income".to_string());
        }

        if client.experience_months < self.rules.min_experience_months {
            score -= dec!(15);
            reasons.push(format!(
                "Short tenure at current job: {} months",
                client.experience_months
            ));
        }

        match client.employment_type {
            EmploymentType::SelfEmployed => {
                score -= dec!(10);
                reasons.push("Self-employed: elevated risk".to_string());
            }
            EmploymentType::BusinessOwner => {
                score -= dec!(5);
                reasons.push("Business owner: moderate risk".to_string());
            }
            EmploymentType::Employed => {}
        }

        let score = round_money(score.clamp(Decimal::ZERO, dec!(100)));

        Ok(Assessment {
            score,
            status: status_for_score(score),
            reasons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FinancingType;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()
    }

    fn client(birth_year: i32, income: Decimal, employment: EmploymentType, experience: i32) -> ClientProfile {
        ClientProfile {
            full_name: "Петрова Анна Сергеевна".to_string(),
            birth_date: NaiveDate::from_ymd_opt(birth_year, 6, 1).unwrap(),
            passport_series: "4511".to_string(),
            passport_number: "654321".to_string(),
            phone: "+79031112233".to_string(),
            email: "petrova@example.ru".to_string(),
            monthly_income: income,
            employment_type: employment,
            experience_months: experience,
        }
    }

    fn params() -> CalculationParameters {
        CalculationParameters::new(FinancingType::Credit, dec!(1000000), dec!(200000), 36)
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(status_for_score(dec!(70)), ApprovalStatus::PreApproved);
        assert_eq!(status_for_score(dec!(69.99)), ApprovalStatus::ConditionalApproval);
        assert_eq!(status_for_score(dec!(50)), ApprovalStatus::ConditionalApproval);
        assert_eq!(status_for_score(dec!(49.99)), ApprovalStatus::Rejected);
    }

    #[test]
    fn test_reliable_client_scores_full() {
        let scoring = ScoringSystem::default();
        let result = scoring
            .assess_client(&client(1985, dec!(500000), EmploymentType::Employed, 36), &params(), today())
            .unwrap();
        assert_eq!(result.score, dec!(100));
        assert_eq!(result.status, ApprovalStatus::PreApproved);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_penalties_accumulate() {
        let scoring = ScoringSystem::default();
        let result = scoring
            .assess_client(&client(1985, dec!(500000), EmploymentType::SelfEmployed, 2), &params(), today())
            .unwrap();
        assert_eq!(result.score, dec!(75));
        assert_eq!(result.reasons.len(), 2);

        let young = scoring
            .assess_client(&client(2005, dec!(500000), EmploymentType::SelfEmployed, 12), &params(), today())
            .unwrap();
        assert_eq!(young.score, dec!(60));
        assert_eq!(young.status, ApprovalStatus::ConditionalApproval);

        let senior = scoring
            .assess_client(&client(1950, dec!(500000), EmploymentType::BusinessOwner, 12), &params(), today())
            .unwrap();
        assert_eq!(senior.score, dec!(75));
    }

    #[test]
    fn test_payment_to_income_ratio_rejects() {
        let scoring = ScoringSystem::default();
        let result = scoring
            .assess_client(&client(1985, dec!(15000), EmploymentType::Employed, 36), &params(), today())
            .unwrap();
        assert_eq!(result.score, Decimal::ZERO);
        assert_eq!(result.status, ApprovalStatus::Rejected);
        assert!(result.reasons[0].starts_with("High payment-to-income ratio"));
    }
}
