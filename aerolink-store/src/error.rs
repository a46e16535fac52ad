/// Storage-layer error taxonomy. Validation never reaches this layer; it is
/// rejected in the domain crate before any write.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("booking reference space exhausted after {0} attempts")]
    ReferenceSpaceExhausted(u32),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Maps a unique-constraint violation to Conflict, leaving every other
    /// database failure as-is.
    pub fn conflict_on_unique(err: sqlx::Error, what: &str) -> StoreError {
        match err.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                StoreError::Conflict(format!("{} already exists", what))
            }
            _ => StoreError::Database(err),
        }
    }
}
