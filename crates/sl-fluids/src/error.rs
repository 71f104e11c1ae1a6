//! Fluid property errors.

use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur when resolving fluids.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Identifier does not name any catalog entry.
    #[error("Unknown fluid '{query}'")]
    UnknownFluid { query: String },

    /// Temperature outside the fluid's liquid range.
    #[error("Temperature {temperature_k} K outside liquid range of {fluid}")]
    OutsideLiquidRange {
        fluid: &'static str,
        temperature_k: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::UnknownFluid {
            query: "brine".into(),
        };
        assert!(err.to_string().contains("brine"));
    }

    #[test]
    fn liquid_range_message_names_fluid() {
        let err = FluidError::OutsideLiquidRange {
            fluid: "Water",
            temperature_k: 400.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Water"));
        assert!(msg.contains("400"));
    }
}
