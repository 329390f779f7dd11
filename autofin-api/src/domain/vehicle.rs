use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::financing::VehicleCategory;

/// Vehicle being financed, as entered by the manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleSpec {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub vin: String,
    pub category: VehicleCategory,
}

impl VehicleSpec {
    /// Buyout value at the end of a lease of `months` months.
    ///
    /// New vehicles keep 80% of the price through the first year and lose a
    /// further 10% per year after that. Used vehicles lose 15% per year.
    /// Never negative.
    pub fn residual_value(&self, months: i32) -> Decimal {
        let years = Decimal::from(months) / dec!(12);
        let share = match self.category {
            VehicleCategory::New if years <= Decimal::ONE => dec!(0.80),
            VehicleCategory::New => dec!(0.80) - (years - Decimal::ONE) * dec!(0.10),
            VehicleCategory::Used => Decimal::ONE - years * dec!(0.15),
        };
        (self.price * share).max(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(category: VehicleCategory) -> VehicleSpec {
        VehicleSpec {
            brand: "Volkswagen".to_string(),
            model: "Tiguan".to_string(),
            year: 2025,
            price: dec!(1000000),
            vin: "WVGZZZ5NZRW000001".to_string(),
            category,
        }
    }

    #[test]
    fn test_new_vehicle_residual() {
        let v = vehicle(VehicleCategory::New);
        assert_eq!(v.residual_value(12), dec!(800000));
        assert_eq!(v.residual_value(6), dec!(800000));
        assert_eq!(v.residual_value(36), dec!(600000));
    }

    #[test]
    fn test_used_vehicle_residual() {
        let v = vehicle(VehicleCategory::Used);
        assert_eq!(v.residual_value(24), dec!(700000));
    }

    #[test]
    fn test_residual_is_floored_at_zero() {
        let v = vehicle(VehicleCategory::Used);
        assert_eq!(v.residual_value(84), Decimal::ZERO);
    }
}
