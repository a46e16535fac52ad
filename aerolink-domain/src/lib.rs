pub mod booking;
pub mod cabin;
pub mod catalog;
pub mod flight;
pub mod notify;
pub mod pnr;
pub mod search;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
