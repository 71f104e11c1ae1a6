//! Error types for component operations.

use sl_core::error::SlError;
use thiserror::Error;

/// Errors raised when constructing or validating component models.
///
/// Evaluation itself never fails: near-zero gradients and zero flow are
/// handled with explicit floors inside the correlations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for SlError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => SlError::Invariant { what },
            ComponentError::InvalidArg { what } => SlError::InvalidArg { what },
        }
    }
}
