use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::domain::{
    ApprovalStatus, CalculationConditions, CalculationParameters, CalculationResult,
    FinancingType, ScheduleEntry, VehicleCategory,
};
use crate::error::{ApiError, ApiResult};

pub const MIN_INITIAL_SHARE: Decimal = dec!(0.15);
pub const MIN_MONTHS: i32 = 12;
pub const MAX_MONTHS: i32 = 84;
/// CASCO premium, share of the vehicle price per year
pub const CASCO_ANNUAL_SHARE: Decimal = dec!(0.005);
pub const LIFE_INSURANCE_MONTHLY: Decimal = dec!(500);

/// Rounds a money amount to kopecks, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Produces a priced quote from calculation parameters.
pub trait Calculator: Send + Sync {
    fn validate_parameters(&self, params: &CalculationParameters) -> ApiResult<()>;

    /// Prices the parameters. The schedule starts at `start`.
    ///
    /// Does not call `validate_parameters`; product recommendations price
    /// initial payments below the general minimum.
    fn calculate(
        &self,
        params: &CalculationParameters,
        start: NaiveDate,
    ) -> ApiResult<CalculationResult>;
}

/// Annual base rates as fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRates {
    pub credit_new: Decimal,
    pub credit_used: Decimal,
    pub leasing_new: Decimal,
    pub leasing_used: Decimal,
}

impl Default for BaseRates {
    fn default() -> Self {
        Self {
            credit_new: dec!(0.159),
            credit_used: dec!(0.189),
            leasing_new: dec!(0.149),
            leasing_used: dec!(0.179),
        }
    }
}

impl BaseRates {
    pub fn rate_for(&self, financing_type: FinancingType, category: VehicleCategory) -> Decimal {
        match (financing_type, category) {
            (FinancingType::Credit, VehicleCategory::New) => self.credit_new,
            (FinancingType::Credit, VehicleCategory::Used) => self.credit_used,
            (FinancingType::Leasing, VehicleCategory::New) => self.leasing_new,
            (FinancingType::Leasing, VehicleCategory::Used) => self.leasing_used,
        }
    }
}

/// Annuity calculator for credit and leasing.
#[derive(Debug, Clone, Default)]
pub struct SmartCalculator {
    base_rates: BaseRates,
}

impl SmartCalculator {
    pub fn new(base_rates: BaseRates) -> Self {
        Self { base_rates }
    }

    /// Base rate after the term adjustment: long terms cost 2pp more, short terms 1pp less.
    ///
    /// A product rate on the parameters replaces the built-in table.
    pub fn annual_rate(&self, params: &CalculationParameters) -> Decimal {
        let rate = match params.base_rate {
            Some(percent) => percent / dec!(100),
            None => self
                .base_rates
                .rate_for(params.financing_type, params.vehicle_category()),
        };
        if params.months > 60 {
            rate + dec!(0.02)
        } else if params.months < 24 {
            rate - dec!(0.01)
        } else {
            rate
        }
    }

    /// Buyout left at the end of a lease; zero for credit.
    pub fn residual_value(params: &CalculationParameters) -> Decimal {
        match (params.financing_type, params.vehicle.as_ref()) {
            (FinancingType::Leasing, Some(vehicle)) => vehicle.residual_value(params.months),
            _ => Decimal::ZERO,
        }
    }

    /// Part of the price repaid through monthly payments.
    pub fn amortised_amount(params: &CalculationParameters) -> ApiResult<Decimal> {
        let amount = params.financed_amount() - Self::residual_value(params);
        if amount <= Decimal::ZERO {
            return Err(ApiError::validation(
                "Initial payment and buyout cover the whole price, nothing left to finance",
            ));
        }
        Ok(amount)
    }

    pub fn annuity_payment(amount: Decimal, annual_rate: Decimal, months: i32) -> Decimal {
        let n = Decimal::from(months);
        if annual_rate.is_zero() {
            return amount / n;
        }
        let monthly_rate = annual_rate / dec!(12);
        let growth = (Decimal::ONE + monthly_rate).powi(months as i64);
        amount * monthly_rate * growth / (growth - Decimal::ONE)
    }

    /// Simplified effective rate: total cost over the financed amount, annualised.
    pub fn effective_rate(
        params: &CalculationParameters,
        monthly_payment: Decimal,
    ) -> ApiResult<Decimal> {
        let financed = params.financed_amount();
        if financed <= Decimal::ZERO {
            return Err(ApiError::validation(
                "Initial payment must be lower than the amount",
            ));
        }
        let months = Decimal::from(params.months);
        let total_cost = monthly_payment * months;
        Ok(((total_cost / financed) - Decimal::ONE) * (dec!(12) / months) * dec!(100))
    }

    pub fn generate_schedule(
        params: &CalculationParameters,
        monthly_payment: Decimal,
        annual_rate: Decimal,
        start: NaiveDate,
    ) -> Vec<ScheduleEntry> {
        let monthly_rate = annual_rate / dec!(12);
        let mut balance = params.financed_amount();
        let mut schedule = Vec::with_capacity(params.months.max(0) as usize);

        for month in 1..=params.months {
            let interest = balance * monthly_rate;
            let principal = monthly_payment - interest;
            balance -= principal;

            schedule.push(ScheduleEntry {
                month,
                date: start + Duration::days(30 * i64::from(month)),
                payment: round_money(monthly_payment),
                principal: round_money(principal),
                interest: round_money(interest),
                balance: round_money(balance).max(Decimal::ZERO),
            });
        }

        schedule
    }
}

impl Calculator for SmartCalculator {
    fn validate_parameters(&self, params: &CalculationParameters) -> ApiResult<()> {
        if params.amount <= Decimal::ZERO {
            return Err(ApiError::validation("Amount must be positive"));
        }
        if params.initial_payment < params.amount * MIN_INITIAL_SHARE {
            return Err(ApiError::validation("Initial payment must be at least 15%"));
        }
        if params.months < MIN_MONTHS || params.months > MAX_MONTHS {
            return Err(ApiError::validation(format!(
                "Term must be between {MIN_MONTHS} and {MAX_MONTHS} months"
            )));
        }
        Self::amortised_amount(params)?;
        Ok(())
    }

    fn calculate(
        &self,
        params: &CalculationParameters,
        start: NaiveDate,
    ) -> ApiResult<CalculationResult> {
        if params.months <= 0 {
            return Err(ApiError::validation("Term must be positive"));
        }

        let annual_rate = self.annual_rate(params);

        let residual_value = Self::residual_value(params);
        let financed_amount = Self::amortised_amount(params)?;

        let mut monthly_payment =
            Self::annuity_payment(financed_amount, annual_rate, params.months);
        if params.insurance_included {
            monthly_payment += params.amount * CASCO_ANNUAL_SHARE / dec!(12);
        }
        if params.life_insurance {
            monthly_payment += LIFE_INSURANCE_MONTHLY;
        }

        let total_payment = monthly_payment * Decimal::from(params.months);
        // The buyout is paid on top of the monthly payments.
        let overpayment = total_payment + residual_value - params.financed_amount();
        let effective_rate = Self::effective_rate(params, monthly_payment)?;
        let schedule = Self::generate_schedule(params, monthly_payment, annual_rate, start);

        let conditions = CalculationConditions {
            base_rate: (annual_rate * dec!(100))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            vehicle_type: params.vehicle_category(),
            residual_value: (residual_value > Decimal::ZERO).then(|| round_money(residual_value)),
            insurance_included: params.insurance_included,
            life_insurance: params.life_insurance,
        };

        Ok(CalculationResult {
            monthly_payment: round_money(monthly_payment),
            total_payment: round_money(total_payment),
            overpayment: round_money(overpayment),
            effective_rate: round_money(effective_rate),
            schedule,
            approval_status: ApprovalStatus::Pending,
            approval_score: Decimal::ZERO,
            conditions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleSpec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()
    }

    fn credit(amount: Decimal, initial: Decimal, months: i32) -> CalculationParameters {
        let mut params = CalculationParameters::new(FinancingType::Credit, amount, initial, months);
        params.insurance_included = false;
        params
    }

    fn new_vehicle(price: Decimal) -> VehicleSpec {
        VehicleSpec {
            brand: "Skoda".to_string(),
            model: "Octavia".to_string(),
            year: 2025,
            price,
            vin: "TMBJJ7NX0RY000001".to_string(),
            category: VehicleCategory::New,
        }
    }

    #[test]
    fn test_annuity_payment_reference_value() {
        let payment = SmartCalculator::annuity_payment(dec!(120000), dec!(0.12), 12);
        assert_eq!(round_money(payment), dec!(10661.85));
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        let payment = SmartCalculator::annuity_payment(dec!(120000), Decimal::ZERO, 12);
        assert_eq!(payment, dec!(10000));
    }

    #[test]
    fn test_term_adjusts_rate() {
        let calc = SmartCalculator::default();
        let long = calc
            .calculate(&credit(dec!(1000000), dec!(200000), 72), start())
            .unwrap();
        assert_eq!(long.conditions.base_rate, dec!(20.9));

        let short = calc
            .calculate(&credit(dec!(1000000), dec!(200000), 18), start())
            .unwrap();
        assert_eq!(short.conditions.base_rate, dec!(17.9));

        let regular = calc
            .calculate(&credit(dec!(1000000), dec!(200000), 36), start())
            .unwrap();
        assert_eq!(regular.conditions.base_rate, dec!(18.9));
        assert_eq!(regular.conditions.vehicle_type, VehicleCategory::Used);
    }

    #[test]
    fn test_credit_totals_and_schedule() {
        let calc = SmartCalculator::default();
        let params = credit(dec!(1000000), dec!(200000), 36);
        let result = calc.calculate(&params, start()).unwrap();

        let expected_total = result.monthly_payment * Decimal::from(36);
        assert!((result.total_payment - expected_total).abs() <= dec!(0.36));
        assert_eq!(result.overpayment, result.total_payment - dec!(800000));
        assert!(result.effective_rate > Decimal::ZERO);
        assert_eq!(result.approval_status, ApprovalStatus::Pending);

        assert_eq!(result.schedule.len(), 36);
        let first = &result.schedule[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 1, 28).unwrap());
        assert_eq!(first.interest, dec!(12600.00));
        let last = result.schedule.last().unwrap();
        assert!(last.balance <= dec!(1.00));
    }

    #[test]
    fn test_insurance_increases_payment() {
        let calc = SmartCalculator::default();
        let bare = credit(dec!(1200000), dec!(240000), 36);
        let mut insured = bare.clone();
        insured.insurance_included = true;
        insured.life_insurance = true;

        let bare_result = calc.calculate(&bare, start()).unwrap();
        let insured_result = calc.calculate(&insured, start()).unwrap();

        // 1 200 000 * 0.5% / 12 = 500, plus 500 life insurance
        assert_eq!(
            insured_result.monthly_payment - bare_result.monthly_payment,
            dec!(1000.00)
        );
        assert!(insured_result.conditions.insurance_included);
        assert!(insured_result.conditions.life_insurance);
    }

    #[test]
    fn test_leasing_includes_residual_value() {
        let calc = SmartCalculator::default();
        let vehicle = new_vehicle(dec!(3000000));
        let mut params = CalculationParameters::new(
            FinancingType::Leasing,
            dec!(3000000),
            dec!(450000),
            36,
        )
        .with_vehicle(vehicle);
        params.insurance_included = false;

        let result = calc.calculate(&params, start()).unwrap();

        assert_eq!(result.conditions.residual_value, Some(dec!(1800000.00)));
        assert_eq!(result.conditions.base_rate, dec!(14.9));
        let paid = result.monthly_payment * Decimal::from(36);
        assert!((result.total_payment - paid).abs() <= dec!(0.36));
        assert!((result.overpayment - (paid + dec!(1800000) - dec!(2550000))).abs() <= dec!(0.36));
    }

    #[test]
    fn test_short_lease_with_buyout_above_balance_is_rejected() {
        let calc = SmartCalculator::default();
        // 12 months keeps 80% of a new car; with 30% down nothing is left to pay off
        let params = CalculationParameters::new(
            FinancingType::Leasing,
            dec!(3000000),
            dec!(900000),
            12,
        )
        .with_vehicle(new_vehicle(dec!(3000000)));

        assert!(matches!(
            calc.validate_parameters(&params),
            Err(ApiError::ValidationError(_))
        ));
        assert!(matches!(
            calc.calculate(&params, start()),
            Err(ApiError::ValidationError(_))
        ));

        let mut longer = params.clone();
        longer.months = 36;
        calc.validate_parameters(&longer).unwrap();
        assert!(calc.calculate(&longer, start()).unwrap().monthly_payment > Decimal::ZERO);
    }

    #[test]
    fn test_product_rate_replaces_table_rate() {
        let calc = SmartCalculator::default();
        let table = credit(dec!(1000000), dec!(200000), 36);
        let product = table.clone().with_base_rate(dec!(12.5));

        let table_result = calc.calculate(&table, start()).unwrap();
        let product_result = calc.calculate(&product, start()).unwrap();

        assert_eq!(table_result.conditions.base_rate, dec!(18.9));
        assert_eq!(product_result.conditions.base_rate, dec!(12.5));
        assert!(product_result.monthly_payment < table_result.monthly_payment);

        // Term adjustment still applies on top of a product rate
        let mut long = product.clone();
        long.months = 72;
        assert_eq!(calc.calculate(&long, start()).unwrap().conditions.base_rate, dec!(14.5));
    }

    #[test]
    fn test_validate_parameters() {
        let calc = SmartCalculator::default();
        assert!(calc
            .validate_parameters(&credit(dec!(1000000), dec!(150000), 12))
            .is_ok());

        let low_initial = calc.validate_parameters(&credit(dec!(1000000), dec!(149999), 36));
        assert_eq!(
            low_initial.unwrap_err(),
            ApiError::validation("Initial payment must be at least 15%")
        );

        assert!(calc
            .validate_parameters(&credit(dec!(1000000), dec!(200000), 11))
            .is_err());
        assert!(calc
            .validate_parameters(&credit(dec!(1000000), dec!(200000), 85))
            .is_err());
        assert!(calc
            .validate_parameters(&credit(Decimal::ZERO, Decimal::ZERO, 36))
            .is_err());
    }

    #[test]
    fn test_full_initial_payment_cannot_be_priced() {
        let calc = SmartCalculator::default();
        let err = calc
            .calculate(&credit(dec!(500000), dec!(500000), 24), start())
            .unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)));
    }
}
