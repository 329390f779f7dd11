use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::financing::EmploymentType;
use crate::error::{ApiError, ApiResult};

/// Lowest monthly income accepted for an application, in rubles.
pub const MIN_MONTHLY_INCOME: Decimal = dec!(15000);

/// Birth dates are entered and exchanged as `dd.mm.yyyy`.
pub const BIRTH_DATE_FORMAT: &str = "%d.%m.%Y";

pub fn parse_birth_date(value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), BIRTH_DATE_FORMAT).map_err(|_| {
        ApiError::validation(format!("Birth date '{value}' must be formatted as dd.mm.yyyy"))
    })
}

pub fn serialize_birth_date<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(BIRTH_DATE_FORMAT).to_string())
}

pub fn deserialize_birth_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    parse_birth_date(&value_str).map_err(serde::de::Error::custom)
}

/// Confidential applicant data as entered by the manager.
///
/// Only hashes and the encrypted full name ever reach the database.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientProfile {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,
    #[serde(
        serialize_with = "serialize_birth_date",
        deserialize_with = "deserialize_birth_date"
    )]
    pub birth_date: NaiveDate,
    #[validate(custom(function = "validate_passport_series"))]
    pub passport_series: String,
    #[validate(custom(function = "validate_passport_number"))]
    pub passport_number: String,
    pub phone: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(custom(function = "validate_monthly_income"))]
    pub monthly_income: Decimal,
    pub employment_type: EmploymentType,
    #[validate(range(min = 0, message = "Experience cannot be negative"))]
    pub experience_months: i32,
}

impl ClientProfile {
    /// Validates the profile and flattens validator output into a single message.
    pub fn check(&self) -> ApiResult<()> {
        self.validate().map_err(validation_message)
    }
}

fn validation_message(errors: ValidationErrors) -> ApiError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    messages.sort();
    ApiError::ValidationError(messages.join("; "))
}

fn is_capitalised_cyrillic_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if matches!(first, 'А'..='Я' | 'Ё') => {}
        _ => return false,
    }
    let rest: Vec<char> = chars.collect();
    !rest.is_empty() && rest.iter().all(|c| matches!(c, 'а'..='я' | 'ё'))
}

/// Surname, given name and patronymic, each a capitalised Cyrillic word.
fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    let words: Vec<&str> = value.split(' ').collect();
    if words.len() == 3 && words.iter().all(|w| is_capitalised_cyrillic_word(w)) {
        Ok(())
    } else {
        Err(ValidationError::new("full_name")
            .with_message("Full name must be formatted as: Surname Name Patronymic".into()))
    }
}

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn validate_passport_series(value: &str) -> Result<(), ValidationError> {
    if all_digits(value, 4) {
        Ok(())
    } else {
        Err(ValidationError::new("passport_series")
            .with_message("Passport must be formatted as: 1234 567890".into()))
    }
}

fn validate_passport_number(value: &str) -> Result<(), ValidationError> {
    if all_digits(value, 6) {
        Ok(())
    } else {
        Err(ValidationError::new("passport_number")
            .with_message("Passport must be formatted as: 1234 567890".into()))
    }
}

fn validate_monthly_income(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= MIN_MONTHLY_INCOME {
        Ok(())
    } else {
        Err(ValidationError::new("monthly_income")
            .with_message(format!("Income must be at least {MIN_MONTHLY_INCOME} RUB").into()))
    }
}
