use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use std::net::IpAddr;
use std::str::FromStr;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

fn too_long<const N: usize>(col_name: &str) -> Box<dyn Error + Send + Sync> {
    format!("Value for column '{col_name}' is too long (max {N} chars)").into()
}

pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s).map_err(|_| too_long::<N>(col_name))
}

pub fn get_optional_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>> {
    let s: Option<String> = row.try_get(col_name)?;
    s.map(|val| HeaplessString::from_str(&val))
        .transpose()
        .map_err(|_| too_long::<N>(col_name))
}

/// Addresses are stored as text (`VARCHAR(45)` fits IPv6).
pub fn get_optional_ip_address(
    row: &PgRow,
    col_name: &str,
) -> Result<Option<IpAddr>, Box<dyn Error + Send + Sync>> {
    let s: Option<String> = row.try_get(col_name)?;
    s.map(|val| {
        val.parse::<IpAddr>()
            .map_err(|e| format!("Invalid address in column '{col_name}': {e}").into())
    })
    .transpose()
}
