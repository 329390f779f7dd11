use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{
    CalculationParameters, ClientProfile, EmploymentType, FinancingType, ProductRule,
    Recommendation, VehicleCategory, VehicleSpec,
};
use crate::error::{ApiError, ApiResult};
use crate::service::calculator::Calculator;

/// Longest term used when pricing a recommendation
pub const RECOMMENDATION_MAX_MONTHS: i32 = 60;

/// Matches financing products to a vehicle and client.
#[derive(Debug, Clone)]
pub struct ProductConfigurator {
    rules: Vec<ProductRule>,
}

impl Default for ProductConfigurator {
    fn default() -> Self {
        Self {
            rules: Self::default_catalogue(),
        }
    }
}

impl ProductConfigurator {
    /// Uses the given rules, or the built-in catalogue when none are configured.
    pub fn new(rules: Vec<ProductRule>) -> Self {
        if rules.is_empty() {
            Self::default()
        } else {
            Self { rules }
        }
    }

    pub fn rules(&self) -> &[ProductRule] {
        &self.rules
    }

    pub fn default_catalogue() -> Vec<ProductRule> {
        vec![
            ProductRule {
                id: None,
                code: "credit_std".to_string(),
                name: "Standard credit".to_string(),
                financing_type: FinancingType::Credit,
                min_amount: dec!(100000),
                max_amount: dec!(5000000),
                min_months: 12,
                max_months: 84,
                base_rate: dec!(15.9),
                min_initial: dec!(0.15),
                available_for: vec![VehicleCategory::New, VehicleCategory::Used],
                residual_percent: None,
            },
            ProductRule {
                id: None,
                code: "credit_premium".to_string(),
                name: "Premium credit".to_string(),
                financing_type: FinancingType::Credit,
                min_amount: dec!(500000),
                max_amount: dec!(10000000),
                min_months: 12,
                max_months: 60,
                base_rate: dec!(15.9),
                min_initial: dec!(0.20),
                available_for: vec![VehicleCategory::New],
                residual_percent: None,
            },
            ProductRule {
                id: None,
                code: "leasing_std".to_string(),
                name: "Standard leasing".to_string(),
                financing_type: FinancingType::Leasing,
                min_amount: dec!(300000),
                max_amount: dec!(10000000),
                min_months: 12,
                max_months: 60,
                base_rate: dec!(14.9),
                min_initial: dec!(0.10),
                available_for: vec![VehicleCategory::New, VehicleCategory::Used],
                residual_percent: Some(dec!(0.20)),
            },
        ]
    }

    pub fn is_product_available(rule: &ProductRule, vehicle: &VehicleSpec) -> bool {
        rule.available_for.contains(&vehicle.category)
            && vehicle.price >= rule.min_amount
            && vehicle.price <= rule.max_amount
    }

    pub fn available_products(&self, vehicle: &VehicleSpec) -> Vec<&ProductRule> {
        self.rules
            .iter()
            .filter(|rule| Self::is_product_available(rule, vehicle))
            .collect()
    }

    /// Prices every available product at its own rate and minimum initial payment.
    ///
    /// Products whose terms cannot be priced for this vehicle are left out.
    pub fn recommendations<C: Calculator>(
        &self,
        client: &ClientProfile,
        vehicle: &VehicleSpec,
        calculator: &C,
        start: NaiveDate,
    ) -> ApiResult<Vec<Recommendation>> {
        let mut recommendations = Vec::new();
        for rule in self.available_products(vehicle) {
            let params = CalculationParameters::new(
                rule.financing_type,
                vehicle.price,
                Self::min_initial_payment(rule, vehicle.price),
                rule.max_months.min(RECOMMENDATION_MAX_MONTHS),
            )
            .with_vehicle(vehicle.clone())
            .with_base_rate(rule.base_rate);

            let result = match calculator.calculate(&params, start) {
                Ok(result) => result,
                Err(ApiError::ValidationError(_)) => continue,
                Err(err) => return Err(err),
            };

            recommendations.push(Recommendation {
                product_id: rule.id,
                product_code: rule.code.clone(),
                product_name: rule.name.clone(),
                financing_type: rule.financing_type,
                monthly_payment: result.monthly_payment,
                rate: result.conditions.base_rate,
                reason: Self::recommendation_reason(client, rule),
            });
        }
        Ok(recommendations)
    }

    pub fn recommendation_reason(client: &ClientProfile, rule: &ProductRule) -> String {
        let mut reasons = Vec::new();

        if client.monthly_income > dec!(100000) && rule.min_initial >= dec!(0.2) {
            reasons.push("suits a high income");
        }
        if client.experience_months > 24 && rule.financing_type == FinancingType::Credit {
            reasons.push("good credit history");
        }
        if client.employment_type == EmploymentType::BusinessOwner
            && rule.financing_type == FinancingType::Leasing
        {
            reasons.push("tax advantages of leasing");
        }

        if reasons.is_empty() {
            "standard offer".to_string()
        } else {
            reasons.join("; ")
        }
    }

    /// Minimum initial payment required by a rule for the given price.
    pub fn min_initial_payment(rule: &ProductRule, price: Decimal) -> Decimal {
        price * rule.min_initial
    }
}
