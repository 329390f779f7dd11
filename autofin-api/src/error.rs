use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint rejected the write (duplicate passport, VIN or product code)
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A referenced client, vehicle or calculation does not exist
    #[error("Foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    #[error("Check constraint violated: {constraint}")]
    CheckViolation { constraint: String },

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    /// True for the three storage-level constraint failures.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            ApiError::UniqueViolation { .. }
                | ApiError::ForeignKeyViolation { .. }
                | ApiError::CheckViolation { .. }
        )
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
