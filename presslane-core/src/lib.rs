pub mod money;
pub mod units;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Boxed error alias used by repository traits.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
