//! Scenario validation logic.

use crate::convert::to_parameters;
use crate::schema::Scenario;
use sl_fluids::FluidError;
use sl_sim::SimError;

/// Longest run a scenario may request: one simulated year at one tick per second.
pub const MAX_RUN_TICKS: u64 = 365 * 24 * 3600;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Fluid(#[from] FluidError),

    #[error(transparent)]
    Parameter(#[from] SimError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Check that `scenario` describes a run the engine would accept.
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if scenario.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: scenario.name.clone(),
            reason: "must not be empty".to_string(),
        });
    }

    if let Some(run) = &scenario.run {
        if run.ticks == 0 {
            return Err(ValidationError::InvalidValue {
                field: "run.ticks".to_string(),
                value: run.ticks.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if run.ticks > MAX_RUN_TICKS {
            return Err(ValidationError::InvalidValue {
                field: "run.ticks".to_string(),
                value: run.ticks.to_string(),
                reason: format!("must not exceed {MAX_RUN_TICKS}"),
            });
        }
        if run.period_ms == Some(0) {
            return Err(ValidationError::InvalidValue {
                field: "run.period_ms".to_string(),
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
    }

    let params = to_parameters(scenario)?;
    params.validate()?;
    Ok(())
}
