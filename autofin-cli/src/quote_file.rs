use autofin_api::{ClientProfile, FinancingType, VehicleSpec};
use autofin_postgres::{ManagerContext, QuoteRequest};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::net::IpAddr;

fn default_true() -> bool {
    true
}

/// JSON document accepted by `autofin quote`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteFile {
    pub client: ClientProfile,
    pub vehicle: VehicleSpec,
    #[serde(default)]
    pub stock_id: Option<String>,
    pub financing_type: FinancingType,
    pub initial_payment: Decimal,
    pub months: i32,
    #[serde(default = "default_true")]
    pub insurance_included: bool,
    #[serde(default)]
    pub life_insurance: bool,
    #[serde(default)]
    pub product_code: Option<String>,
    pub manager: String,
    #[serde(default)]
    pub ip_address: Option<IpAddr>,
    /// When the manager opened the session; defaults to the submission time
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

impl QuoteFile {
    pub fn into_request(self, now: DateTime<Utc>) -> QuoteRequest {
        QuoteRequest {
            client: self.client,
            vehicle: self.vehicle,
            stock_id: self.stock_id,
            financing_type: self.financing_type,
            initial_payment: self.initial_payment,
            months: self.months,
            insurance_included: self.insurance_included,
            life_insurance: self.life_insurance,
            product_code: self.product_code,
            manager: ManagerContext {
                user_id: self.manager,
                ip_address: self.ip_address,
                user_agent: Some(format!("autofin-cli/{}", env!("CARGO_PKG_VERSION"))),
                started_at: self.started_at.unwrap_or(now),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofin_api::{EmploymentType, VehicleCategory};
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"{
        "client": {
            "full_name": "Иванов Иван Иванович",
            "birth_date": "15.03.1985",
            "passport_series": "4510",
            "passport_number": "123456",
            "phone": "+79161234567",
            "email": "ivanov@example.ru",
            "monthly_income": "150000",
            "employment_type": "employed",
            "experience_months": 60
        },
        "vehicle": {
            "brand": "Kia",
            "model": "Sportage",
            "year": 2024,
            "price": "2800000",
            "vin": "XWEPH81ADR0012345",
            "category": "new"
        },
        "financing_type": "credit",
        "initial_payment": "560000",
        "months": 48,
        "manager": "m.orlova"
    }"#;

    #[test]
    fn test_defaults_fill_optional_fields() {
        let input: QuoteFile = serde_json::from_str(SAMPLE).unwrap();
        assert!(input.insurance_included);
        assert!(!input.life_insurance);
        assert_eq!(input.client.employment_type, EmploymentType::Employed);
        assert_eq!(input.vehicle.category, VehicleCategory::New);
        assert_eq!(input.client.birth_date, NaiveDate::from_ymd_opt(1985, 3, 15).unwrap());

        let now = Utc.with_ymd_and_hms(2026, 2, 3, 9, 0, 0).unwrap();
        let request = input.into_request(now);
        assert_eq!(request.manager.started_at, now);
        assert_eq!(request.parameters().amount, dec!(2800000));
        assert_eq!(request.parameters().financed_amount(), dec!(2240000));
    }

    #[test]
    fn test_iso_birth_date_is_rejected() {
        let iso = SAMPLE.replace("15.03.1985", "1985-03-15");
        let err = serde_json::from_str::<QuoteFile>(&iso).unwrap_err();
        assert!(err.to_string().contains("dd.mm.yyyy"));
    }
}
