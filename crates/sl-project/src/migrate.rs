//! Schema migration framework.

use crate::ProjectError;
use crate::schema::{PassiveFlowModelDef, Scenario};

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    while scenario.version < LATEST_VERSION {
        scenario = migrate_one_version(scenario)?;
    }
    Ok(scenario)
}

fn migrate_one_version(scenario: Scenario) -> Result<Scenario, ProjectError> {
    match scenario.version {
        0 => migrate_v0_to_v1(scenario),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 predates the friction-limited thermosiphon solve; those
/// scenarios were always evaluated with the linear passive model.
fn migrate_v0_to_v1(mut scenario: Scenario) -> Result<Scenario, ProjectError> {
    scenario.passive_flow_model = PassiveFlowModelDef::Linear;
    scenario.version = 1;
    Ok(scenario)
}
