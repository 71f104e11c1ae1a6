//! Scenario loading, saving, validation, and parameter extraction.

use std::path::Path;

use sl_core::units::to_k;
use sl_project::Scenario;
use sl_sim::SimulationParameters;

use crate::error::{AppError, AppResult};

/// Load a scenario file (`.yaml`, `.yml` or `.json`), migrated and validated.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(sl_project::load(path)?)
}

/// Save a scenario; the format follows the file extension.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    Ok(sl_project::save(path, scenario)?)
}

pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    Ok(sl_project::validate_scenario(scenario)?)
}

/// Simulation inputs described by a scenario.
pub fn scenario_parameters(scenario: &Scenario) -> AppResult<SimulationParameters> {
    let params = sl_project::to_parameters(scenario)?;
    params.validate()?;
    Ok(params)
}

/// Scenario holding the reference parameters, for `init`-style commands.
pub fn default_scenario(name: &str) -> Scenario {
    sl_project::from_parameters(name, &SimulationParameters::default())
}

/// Catalog entries matching `query`; every fluid when `query` is `None`.
pub fn list_fluids(query: Option<&str>) -> Vec<sl_fluids::FluidCatalogEntry> {
    sl_fluids::filter_catalog(query.unwrap_or_default())
}

/// Start temperatures at which the loop fluid would not be liquid.
///
/// Reported to the user only; the integrator does not model phase change.
pub fn liquid_range_warnings(params: &SimulationParameters) -> Vec<String> {
    let entry = params.fluid.entry();
    [
        ("ambient temperature", params.ambient_temperature),
        ("initial tank temperature", params.initial_tank_temperature),
    ]
    .into_iter()
    .filter_map(|(what, t)| {
        entry
            .check_liquid(to_k(t))
            .err()
            .map(|err| format!("{what}: {err}"))
    })
    .collect()
}
