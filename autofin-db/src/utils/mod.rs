use autofin_api::{ApiError, ApiResult, ClientProfile, BIRTH_DATE_FORMAT};
use chrono::NaiveDate;
use heapless::String as HeaplessString;

/// Hex blake3 digest used for every identity column (passport, phone, email, VIN).
///
/// Inputs are normalised by the typed helpers below so the same document
/// always maps to the same hash.
pub fn identity_hash(value: &str) -> String {
    blake3::hash(value.as_bytes()).to_hex().to_string()
}

pub fn passport_hash(profile: &ClientProfile) -> String {
    passport_hash_of(
        &profile.passport_series,
        &profile.passport_number,
        profile.birth_date,
    )
}

/// Passport series, number and birth date (`dd.mm.yyyy`) hashed together.
pub fn passport_hash_of(series: &str, number: &str, birth_date: NaiveDate) -> String {
    identity_hash(&format!(
        "{}{}{}",
        series.trim(),
        number.trim(),
        birth_date.format(BIRTH_DATE_FORMAT)
    ))
}

pub fn phone_hash(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    identity_hash(&digits)
}

pub fn email_hash(email: &str) -> String {
    identity_hash(&email.trim().to_lowercase())
}

pub fn vin_hash(vin: &str) -> String {
    identity_hash(&vin.trim().to_uppercase())
}

/// Copies `value` into a bounded string, failing with a validation error when it is too long.
pub fn bounded<const N: usize>(value: &str, field: &str) -> ApiResult<HeaplessString<N>> {
    HeaplessString::try_from(value).map_err(|_| {
        ApiError::ValidationError(format!("Value for '{field}' is too long (max {N} chars)"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_hash_is_hex_64() {
        let hash = identity_hash("4510123456");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_normalisation() {
        assert_eq!(vin_hash(" wvgzzz5nzsw012345 "), vin_hash("WVGZZZ5NZSW012345"));
        assert_eq!(email_hash("Ivanov@Example.RU"), email_hash("ivanov@example.ru"));
        assert_eq!(phone_hash("+7 (916) 123-45-67"), phone_hash("+79161234567"));
        assert_ne!(vin_hash("WVGZZZ5NZSW012345"), vin_hash("WVGZZZ5NZSW012346"));
    }

    #[test]
    fn test_bounded_rejects_long_values() {
        let ok: HeaplessString<8> = bounded("Kia", "brand").unwrap();
        assert_eq!(ok.as_str(), "Kia");
        let err = bounded::<4>("Volkswagen", "brand").unwrap_err();
        assert_eq!(
            err,
            ApiError::ValidationError("Value for 'brand' is too long (max 4 chars)".to_string())
        );
    }
}
