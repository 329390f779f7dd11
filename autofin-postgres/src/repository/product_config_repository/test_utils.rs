#[cfg(test)]
pub mod test_utils {
    use autofin_api::{FinancingType, VehicleCategory};
    use autofin_db::models::{ProductConditions, ProductConfigModel};
    use chrono::{NaiveDate, SubsecRound, Utc};
    use heapless::String as HeaplessString;
    use rust_decimal_macros::dec;
    use sqlx::types::Json;
    use uuid::Uuid;

    /// Credit product with a unique code, valid from 2025-01-01 without end.
    pub fn create_test_product() -> ProductConfigModel {
        let id = Uuid::new_v4();
        let code = format!("test_{}", &id.simple().to_string()[..12]);
        ProductConfigModel {
            id,
            code: HeaplessString::try_from(code.as_str()).unwrap(),
            name: HeaplessString::try_from("Test credit").unwrap(),
            product_type: FinancingType::Credit,
            min_amount: dec!(100000),
            max_amount: dec!(5000000),
            min_months: 12,
            max_months: 84,
            base_rate: dec!(15.9),
            conditions: Json(ProductConditions {
                min_initial: dec!(0.15),
                available_for: vec![VehicleCategory::New, VehicleCategory::Used],
                residual_percent: None,
            }),
            is_active: true,
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            valid_to: None,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }
}
