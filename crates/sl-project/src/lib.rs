//! sl-project: scenario file format, unit parsing and validation.

pub mod convert;
pub mod migrate;
pub mod schema;
pub mod units;
pub mod validate;

pub use convert::{from_parameters, to_parameters};
pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use units::{Quantity, UnitError, parse_quantity};
pub use validate::{MAX_RUN_TICKS, ValidationError, validate_scenario};

use std::path::Path;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unsupported scenario format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn finish_load(scenario: Scenario) -> ProjectResult<Scenario> {
    let scenario = migrate_to_latest(scenario)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn load_yaml(path: &Path) -> ProjectResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    finish_load(serde_yaml::from_str(&content)?)
}

pub fn save_yaml(path: &Path, scenario: &Scenario) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_yaml::to_string(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    finish_load(serde_json::from_str(&content)?)
}

pub fn save_json(path: &Path, scenario: &Scenario) -> ProjectResult<()> {
    validate_scenario(scenario)?;
    let content = serde_json::to_string_pretty(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by file extension: `.yaml`/`.yml` or `.json`.
pub fn load(path: &Path) -> ProjectResult<Scenario> {
    match extension(path).as_str() {
        "yaml" | "yml" => load_yaml(path),
        "json" => load_json(path),
        other => Err(ProjectError::UnsupportedFormat(other.to_string())),
    }
}

/// Save by file extension: `.yaml`/`.yml` or `.json`.
pub fn save(path: &Path, scenario: &Scenario) -> ProjectResult<()> {
    match extension(path).as_str() {
        "yaml" | "yml" => save_yaml(path, scenario),
        "json" => save_json(path, scenario),
        other => Err(ProjectError::UnsupportedFormat(other.to_string())),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
