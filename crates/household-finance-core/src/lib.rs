pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "metrics")]
pub mod config;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "growth")]
pub mod growth;

#[cfg(feature = "household")]
pub mod household;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use error::DomainError;
pub use types::*;

/// Standard result type for all household-finance operations
pub type DomainResult<T> = Result<T, DomainError>;
