//! Translation of storage failures into the `ApiError` taxonomy.

use autofin_api::ApiError;
use std::error::Error;

pub const UNIQUE_VIOLATION: &str = "23505";
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
pub const CHECK_VIOLATION: &str = "23514";

/// Maps a SQLSTATE code and the violated constraint name to an `ApiError`.
pub fn classify_sqlstate(code: &str, constraint: Option<&str>, message: &str) -> ApiError {
    let constraint = constraint.unwrap_or("unknown").to_string();
    match code {
        UNIQUE_VIOLATION => ApiError::UniqueViolation { constraint },
        FOREIGN_KEY_VIOLATION => ApiError::ForeignKeyViolation { constraint },
        CHECK_VIOLATION => ApiError::CheckViolation { constraint },
        _ => ApiError::DatabaseError(format!("{code}: {message}")),
    }
}

pub fn classify(error: &sqlx::Error) -> ApiError {
    match error {
        sqlx::Error::Database(db) => match db.code() {
            Some(code) => classify_sqlstate(&code, db.constraint(), db.message()),
            None => ApiError::DatabaseError(db.message().to_string()),
        },
        sqlx::Error::RowNotFound => ApiError::NotFound("Row not found".to_string()),
        other => ApiError::DatabaseError(other.to_string()),
    }
}

/// `map_err` adapter for repository code returning boxed errors.
pub fn db_error(error: sqlx::Error) -> Box<dyn Error + Send + Sync> {
    let classified = classify(&error);
    if classified.is_constraint_violation() {
        tracing::debug!(%classified, "constraint violation");
    }
    Box::new(classified)
}

/// Extracts the `ApiError` from a boxed repository error, if it carries one.
pub fn as_api_error(error: &(dyn Error + Send + Sync + 'static)) -> Option<&ApiError> {
    error.downcast_ref::<ApiError>()
}
