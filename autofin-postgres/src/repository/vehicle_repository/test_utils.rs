#[cfg(test)]
pub mod test_utils {
    use autofin_api::{VehicleCategory, VehicleSpec};
    use autofin_db::models::VehicleModel;
    use chrono::{SubsecRound, Utc};
    use rand::Rng;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    /// Seventeen-character VIN unique per call.
    pub fn random_vin() -> String {
        let n: u64 = rand::thread_rng().gen_range(0..10_000_000_000_000);
        format!("TST{n:014}")
    }

    pub fn create_test_vehicle_spec(category: VehicleCategory) -> VehicleSpec {
        VehicleSpec {
            brand: "Skoda".to_string(),
            model: "Kodiaq".to_string(),
            year: 2024,
            price: dec!(3200000),
            vin: random_vin(),
            category,
        }
    }

    pub fn create_test_vehicle() -> VehicleModel {
        // Postgres keeps microseconds; truncate so loaded rows compare equal
        let now = Utc::now().trunc_subsecs(6);
        VehicleModel::from_spec(
            Uuid::new_v4(),
            &create_test_vehicle_spec(VehicleCategory::New),
            Some("EA-TEST-01"),
            now,
        )
        .unwrap()
    }
}
