//! Scenario file schema.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fluid id or alias from the catalog, e.g. `water` or `glycol`
    pub fluid: String,
    pub conditions: ConditionsDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector: Option<CollectorDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipe: Option<PipeDef>,
    #[serde(default)]
    pub passive_flow_model: PassiveFlowModelDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<RunDef>,
}

/// Operating conditions as unit-tagged strings (`"70 F"`, `"1 L/min"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionsDef {
    pub irradiance: String,
    pub efficiency: String,
    pub ambient_temperature: String,
    pub pump_flow_rate: String,
    pub tank_volume: String,
    pub initial_tank_temperature: String,
    pub panel_area: String,
    pub elevation_difference: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteDef {
    pub altitude: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectorDef {
    pub reference_temperature_k: f64,
    pub temperature_coefficient_per_k: f64,
    pub mass_per_area_kg_m2: f64,
    pub specific_heat_j_kg_k: f64,
    pub height_m: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    pub length_m: f64,
    pub diameter_m: f64,
    pub roughness_m: f64,
    pub k_minor: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PassiveFlowModelDef {
    Linear,
    #[default]
    Thermosiphon,
}

/// Defaults for a batch run from the command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    pub ticks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_ms: Option<u64>,
}
