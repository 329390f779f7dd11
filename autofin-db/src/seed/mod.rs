//! Deterministic demonstration data for the quoting schema.
//!
//! Five clients, six vehicles, five products, six calculations spread over
//! 2025-12-28..=2025-12-30 and one manager session per calculation. Ids are
//! fixed so seeding is idempotent and tests can refer to rows directly.

use autofin_api::{
    ApiError, ApiResult, ApprovalStatus, CalculationConditions, ClientProfile, EmploymentType,
    FinancingType, VehicleCategory, VehicleSpec,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::{
    CalculationModel, ClientModel, ProductConditions, ProductConfigModel, SessionData,
    UserSessionModel, VehicleModel,
};
use crate::utils::bounded;

pub const CLIENT_IDS: [Uuid; 5] = [
    Uuid::from_u128(0x1000_0000_0000_4000_8000_0000_0000_0001),
    Uuid::from_u128(0x1000_0000_0000_4000_8000_0000_0000_0002),
    Uuid::from_u128(0x1000_0000_0000_4000_8000_0000_0000_0003),
    Uuid::from_u128(0x1000_0000_0000_4000_8000_0000_0000_0004),
    Uuid::from_u128(0x1000_0000_0000_4000_8000_0000_0000_0005),
];

pub const VEHICLE_IDS: [Uuid; 6] = [
    Uuid::from_u128(0x2000_0000_0000_4000_8000_0000_0000_0001),
    Uuid::from_u128(0x2000_0000_0000_4000_8000_0000_0000_0002),
    Uuid::from_u128(0x2000_0000_0000_4000_8000_0000_0000_0003),
    Uuid::from_u128(0x2000_0000_0000_4000_8000_0000_0000_0004),
    Uuid::from_u128(0x2000_0000_0000_4000_8000_0000_0000_0005),
    Uuid::from_u128(0x2000_0000_0000_4000_8000_0000_0000_0006),
];

pub const PRODUCT_IDS: [Uuid; 5] = [
    Uuid::from_u128(0x3000_0000_0000_4000_8000_0000_0000_0001),
    Uuid::from_u128(0x3000_0000_0000_4000_8000_0000_0000_0002),
    Uuid::from_u128(0x3000_0000_0000_4000_8000_0000_0000_0003),
    Uuid::from_u128(0x3000_0000_0000_4000_8000_0000_0000_0004),
    Uuid::from_u128(0x3000_0000_0000_4000_8000_0000_0000_0005),
];

pub const CALCULATION_IDS: [Uuid; 6] = [
    Uuid::from_u128(0x4000_0000_0000_4000_8000_0000_0000_0001),
    Uuid::from_u128(0x4000_0000_0000_4000_8000_0000_0000_0002),
    Uuid::from_u128(0x4000_0000_0000_4000_8000_0000_0000_0003),
    Uuid::from_u128(0x4000_0000_0000_4000_8000_0000_0000_0004),
    Uuid::from_u128(0x4000_0000_0000_4000_8000_0000_0000_0005),
    Uuid::from_u128(0x4000_0000_0000_4000_8000_0000_0000_0006),
];

pub const SESSION_IDS: [Uuid; 6] = [
    Uuid::from_u128(0x5000_0000_0000_4000_8000_0000_0000_0001),
    Uuid::from_u128(0x5000_0000_0000_4000_8000_0000_0000_0002),
    Uuid::from_u128(0x5000_0000_0000_4000_8000_0000_0000_0003),
    Uuid::from_u128(0x5000_0000_0000_4000_8000_0000_0000_0004),
    Uuid::from_u128(0x5000_0000_0000_4000_8000_0000_0000_0005),
    Uuid::from_u128(0x5000_0000_0000_4000_8000_0000_0000_0006),
];

/// Client fixture. The full name stays in plaintext here; it is encrypted
/// by the database when the row is written.
#[derive(Debug, Clone)]
pub struct SeedClient {
    pub id: Uuid,
    pub profile: ClientProfile,
    pub created_at: DateTime<Utc>,
}

impl SeedClient {
    pub fn to_model(&self, full_name_encrypted: Vec<u8>) -> ApiResult<ClientModel> {
        ClientModel::from_profile(self.id, &self.profile, full_name_encrypted, self.created_at)
    }
}

#[derive(Debug, Clone)]
pub struct SeedData {
    pub clients: Vec<SeedClient>,
    pub vehicles: Vec<VehicleModel>,
    pub products: Vec<ProductConfigModel>,
    pub calculations: Vec<CalculationModel>,
    pub sessions: Vec<UserSessionModel>,
}

fn date(year: i32, month: u32, day: u32) -> ApiResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ApiError::InternalError(format!("Invalid date {year}-{month}-{day}")))
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> ApiResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| {
            ApiError::InternalError(format!(
                "Invalid timestamp {year}-{month}-{day} {hour}:{minute}"
            ))
        })
}

impl SeedData {
    pub fn build() -> ApiResult<Self> {
        let clients = Self::clients()?;
        let vehicles = Self::vehicles()?;
        let products = Self::products()?;
        let calculations = Self::calculations()?;
        let sessions = Self::sessions(&calculations)?;
        Ok(Self {
            clients,
            vehicles,
            products,
            calculations,
            sessions,
        })
    }

    fn clients() -> ApiResult<Vec<SeedClient>> {
        let rows = [
            ("Иванов Иван Иванович", (1985, 3, 14), "4510", "123456", "+79161234567", "ivanov.ii@example.ru", dec!(185000), EmploymentType::Employed, 64),
            ("Петрова Анна Сергеевна", (1990, 7, 22), "4511", "654321", "+79031112233", "petrova.as@example.ru", dec!(95000), EmploymentType::Employed, 28),
            ("Сидоров Алексей Петрович", (1979, 2, 11), "4602", "778899", "+79265550011", "sidorov.ap@example.ru", dec!(140000), EmploymentType::SelfEmployed, 40),
            ("Кузнецова Мария Олеговна", (1988, 11, 5), "4515", "246810", "+79857773344", "kuznetsova.mo@example.ru", dec!(210000), EmploymentType::Employed, 52),
            ("Смирнов Дмитрий Андреевич", (1975, 9, 30), "4503", "135790", "+79672223344", "smirnov.da@example.ru", dec!(650000), EmploymentType::BusinessOwner, 120),
        ];

        rows.into_iter()
            .zip(CLIENT_IDS)
            .enumerate()
            .map(|(i, (row, id))| {
                let (name, (y, m, d), series, number, phone, email, income, employment, experience) = row;
                Ok(SeedClient {
                    id,
                    profile: ClientProfile {
                        full_name: name.to_string(),
                        birth_date: date(y, m, d)?,
                        passport_series: series.to_string(),
                        passport_number: number.to_string(),
                        phone: phone.to_string(),
                        email: email.to_string(),
                        monthly_income: income,
                        employment_type: employment,
                        experience_months: experience,
                    },
                    created_at: at(2025, 12, 27, 9 + i as u32, 0)?,
                })
            })
            .collect()
    }

    /// Vehicle specs with their plaintext VINs, before hashing.
    pub fn vehicle_specs() -> Vec<(VehicleSpec, &'static str)> {
        let spec = |brand: &str, model: &str, year, price, vin: &str, category| VehicleSpec {
            brand: brand.to_string(),
            model: model.to_string(),
            year,
            price,
            vin: vin.to_string(),
            category,
        };
        vec![
            (spec("Volkswagen", "Tiguan", 2025, dec!(4250000), "WVGZZZ5NZSW012345", VehicleCategory::New), "EA-000101"),
            (spec("Skoda", "Octavia", 2025, dec!(2890000), "TMBAJ7NX5SY054321", VehicleCategory::New), "EA-000102"),
            (spec("Toyota", "Camry", 2021, dec!(2650000), "XW7BF4FK20S123456", VehicleCategory::Used), "EA-000215"),
            (spec("Kia", "Sportage", 2024, dec!(3490000), "XWEPH81ADR0011223", VehicleCategory::New), "EA-000118"),
            (spec("Hyundai", "Solaris", 2019, dec!(1150000), "Z94K241CBKR098765", VehicleCategory::Used), "EA-000233"),
            (spec("BMW", "X5", 2022, dec!(7900000), "X4XCR99420L765432", VehicleCategory::Used), "EA-000247"),
        ]
    }

    fn vehicles() -> ApiResult<Vec<VehicleModel>> {
        let created_at = at(2025, 12, 26, 8, 0)?;
        Self::vehicle_specs()
            .iter()
            .zip(VEHICLE_IDS)
            .map(|((spec, stock_id), id)| VehicleModel::from_spec(id, spec, Some(*stock_id), created_at))
            .collect()
    }

    fn products() -> ApiResult<Vec<ProductConfigModel>> {
        use VehicleCategory::{New, Used};

        let launch = date(2025, 1, 1)?;
        let created_at = at(2025, 1, 1, 0, 0)?;
        let product = |id,
                       code: &str,
                       name: &str,
                       product_type,
                       (min_amount, max_amount),
                       (min_months, max_months),
                       base_rate,
                       conditions,
                       is_active,
                       valid_to|
         -> ApiResult<ProductConfigModel> {
            let model = ProductConfigModel {
                id,
                code: bounded(code, "code")?,
                name: bounded(name, "name")?,
                product_type,
                min_amount,
                max_amount,
                min_months,
                max_months,
                base_rate,
                conditions: Json(conditions),
                is_active,
                valid_from: launch,
                valid_to,
                created_at,
            };
            model.validate()?;
            Ok(model)
        };
        let conditions = |min_initial, available_for: &[VehicleCategory], residual_percent| {
            ProductConditions {
                min_initial,
                available_for: available_for.to_vec(),
                residual_percent,
            }
        };

        Ok(vec![
            product(PRODUCT_IDS[0], "credit_std", "Стандартный автокредит", FinancingType::Credit,
                (dec!(100000), dec!(5000000)), (12, 84), dec!(15.9),
                conditions(dec!(0.15), &[New, Used], None), true, None)?,
            product(PRODUCT_IDS[1], "credit_premium", "Премиум автокредит", FinancingType::Credit,
                (dec!(500000), dec!(10000000)), (12, 60), dec!(15.9),
                conditions(dec!(0.20), &[New], None), true, None)?,
            product(PRODUCT_IDS[2], "leasing_std", "Стандартный лизинг", FinancingType::Leasing,
                (dec!(300000), dec!(10000000)), (12, 60), dec!(14.9),
                conditions(dec!(0.10), &[New, Used], Some(dec!(0.20))), true, None)?,
            product(PRODUCT_IDS[3], "credit_used_plus", "Кредит на автомобиль с пробегом", FinancingType::Credit,
                (dec!(200000), dec!(3000000)), (12, 60), dec!(18.9),
                conditions(dec!(0.20), &[Used], None), true, None)?,
            product(PRODUCT_IDS[4], "leasing_business", "Лизинг для бизнеса", FinancingType::Leasing,
                (dec!(1000000), dec!(15000000)), (12, 48), dec!(13.9),
                conditions(dec!(0.10), &[New], Some(dec!(0.25))), false, Some(date(2025, 6, 30)?))?,
        ])
    }

    fn calculations() -> ApiResult<Vec<CalculationModel>> {
        struct Row {
            client: usize,
            vehicle: usize,
            product: usize,
            financing_type: FinancingType,
            initial_payment: Decimal,
            months: i32,
            monthly_payment: Decimal,
            base_rate: Decimal,
            effective_rate: Decimal,
            status: ApprovalStatus,
            score: Decimal,
            created_at: (u32, u32, u32),
            reasons: &'static [&'static str],
        }

        let rows = [
            Row { client: 0, vehicle: 0, product: 1, financing_type: FinancingType::Credit, initial_payment: dec!(850000), months: 60, monthly_payment: dec!(84512.40), base_rate: dec!(15.9), effective_rate: dec!(19.84), status: ApprovalStatus::PreApproved, score: dec!(78.4), created_at: (28, 10, 15), reasons: &["Payment to income ratio 0.46 exceeds 0.40"] },
            Row { client: 1, vehicle: 2, product: 3, financing_type: FinancingType::Credit, initial_payment: dec!(530000), months: 48, monthly_payment: dec!(63210.75), base_rate: dec!(18.9), effective_rate: dec!(22.35), status: ApprovalStatus::ConditionalApproval, score: dec!(55.3), created_at: (28, 15, 40), reasons: &["Payment to income ratio 0.67 exceeds 0.40"] },
            Row { client: 2, vehicle: 1, product: 2, financing_type: FinancingType::Leasing, initial_payment: dec!(289000), months: 36, monthly_payment: dec!(71344.20), base_rate: dec!(14.9), effective_rate: dec!(17.12), status: ApprovalStatus::ConditionalApproval, score: dec!(62.1), created_at: (29, 11, 5), reasons: &["Payment to income ratio 0.51 exceeds 0.40", "Self-employed applicant"] },
            Row { client: 3, vehicle: 3, product: 0, financing_type: FinancingType::Credit, initial_payment: dec!(698000), months: 72, monthly_payment: dec!(60875.30), base_rate: dec!(17.9), effective_rate: dec!(21.08), status: ApprovalStatus::PreApproved, score: dec!(85.7), created_at: (29, 16, 30), reasons: &[] },
            Row { client: 4, vehicle: 5, product: 2, financing_type: FinancingType::Leasing, initial_payment: dec!(1580000), months: 48, monthly_payment: dec!(148920.00), base_rate: dec!(17.9), effective_rate: dec!(19.46), status: ApprovalStatus::PreApproved, score: dec!(96.5), created_at: (30, 9, 50), reasons: &["Business owner"] },
            Row { client: 0, vehicle: 4, product: 0, financing_type: FinancingType::Credit, initial_payment: dec!(172500), months: 84, monthly_payment: dec!(22180.45), base_rate: dec!(20.9), effective_rate: dec!(24.17), status: ApprovalStatus::Rejected, score: dec!(45.2), created_at: (30, 14, 20), reasons: &["Open application with outstanding payment burden"] },
        ];

        let specs = Self::vehicle_specs();
        rows.iter()
            .zip(CALCULATION_IDS)
            .map(|(row, id)| {
                let (vehicle, _) = &specs[row.vehicle];
                let residual = match row.financing_type {
                    FinancingType::Leasing => Some(vehicle.residual_value(row.months)),
                    FinancingType::Credit => None,
                };
                let total_payment = row.monthly_payment * Decimal::from(row.months);
                let (day, hour, minute) = row.created_at;
                Ok(CalculationModel {
                    id,
                    client_id: CLIENT_IDS[row.client],
                    vehicle_id: VEHICLE_IDS[row.vehicle],
                    financing_type: row.financing_type,
                    amount: vehicle.price,
                    initial_payment: row.initial_payment,
                    months: row.months,
                    monthly_payment: row.monthly_payment,
                    total_payment,
                    effective_rate: row.effective_rate,
                    approval_status: row.status,
                    approval_score: row.score,
                    session_data: Json(SessionData {
                        product_config_id: Some(PRODUCT_IDS[row.product]),
                        insurance_included: true,
                        life_insurance: false,
                        conditions: Some(CalculationConditions {
                            base_rate: row.base_rate,
                            vehicle_type: vehicle.category,
                            residual_value: residual,
                            insurance_included: true,
                            life_insurance: false,
                        }),
                        reasons: row.reasons.iter().map(|r| r.to_string()).collect(),
                    }),
                    created_at: at(2025, 12, day, hour, minute)?,
                })
            })
            .collect()
    }

    fn sessions(calculations: &[CalculationModel]) -> ApiResult<Vec<UserSessionModel>> {
        let managers = ["m.orlova", "a.belov"];
        let addresses = ["10.12.4.21", "10.12.4.37", "10.12.5.8"];
        let last = calculations.len().saturating_sub(1);

        calculations
            .iter()
            .zip(SESSION_IDS)
            .enumerate()
            .map(|(i, (calculation, id))| {
                let ip_address = addresses[i % addresses.len()]
                    .parse()
                    .map_err(|e| ApiError::InternalError(format!("Invalid seed address: {e}")))?;
                let session = UserSessionModel {
                    id,
                    user_id: bounded(managers[i % managers.len()], "user_id")?,
                    client_id: calculation.client_id,
                    calculation_id: calculation.id,
                    ip_address: Some(ip_address),
                    user_agent: Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string()),
                    started_at: calculation.created_at - Duration::minutes(12),
                    // The latest session is still in progress.
                    ended_at: (i != last).then(|| calculation.created_at + Duration::minutes(5)),
                };
                session.validate()?;
                Ok(session)
            })
            .collect()
    }
}
