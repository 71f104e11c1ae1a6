//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while driving a simulation.
///
/// Only configuration problems surface here; ticks themselves are total.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<sl_components::ComponentError> for SimError {
    fn from(e: sl_components::ComponentError) -> Self {
        SimError::InvalidParameter {
            what: e.to_string(),
        }
    }
}

impl From<sl_core::SlError> for SimError {
    fn from(e: sl_core::SlError) -> Self {
        SimError::InvalidParameter {
            what: e.to_string(),
        }
    }
}
