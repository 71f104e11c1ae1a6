//! Mapping between scenario files and engine parameters.

use crate::migrate::LATEST_VERSION;
use crate::schema::{
    CollectorDef, ConditionsDef, PassiveFlowModelDef, PipeDef, Scenario, SiteDef,
};
use crate::units::{Quantity, parse_quantity};
use crate::validate::ValidationError;
use sl_components::{Collector, LoopPipe, PassiveFlowModel};
use sl_core::units::{k, m, m2, m3, m3ps, to_k, to_lpm, to_m, to_m2, to_m3, to_w_per_m2, w_per_m2};
use sl_fluids::FluidId;
use sl_sim::SimulationParameters;

fn field(name: &str, raw: &str, quantity: Quantity) -> Result<f64, ValidationError> {
    parse_quantity(raw, quantity).map_err(|e| ValidationError::InvalidValue {
        field: name.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

impl From<PassiveFlowModelDef> for PassiveFlowModel {
    fn from(def: PassiveFlowModelDef) -> Self {
        match def {
            PassiveFlowModelDef::Linear => PassiveFlowModel::Linear,
            PassiveFlowModelDef::Thermosiphon => PassiveFlowModel::Thermosiphon,
        }
    }
}

impl From<PassiveFlowModel> for PassiveFlowModelDef {
    fn from(model: PassiveFlowModel) -> Self {
        match model {
            PassiveFlowModel::Linear => PassiveFlowModelDef::Linear,
            PassiveFlowModel::Thermosiphon => PassiveFlowModelDef::Thermosiphon,
        }
    }
}

/// Parse every field of `scenario` into engine parameters.
///
/// Values are converted but not range-checked; call
/// [`SimulationParameters::validate`] or [`crate::validate_scenario`].
pub fn to_parameters(scenario: &Scenario) -> Result<SimulationParameters, ValidationError> {
    let c = &scenario.conditions;
    let fluid: FluidId = scenario.fluid.parse()?;

    let site_altitude = match &scenario.site {
        Some(site) => field("site.altitude", &site.altitude, Quantity::Length)?,
        None => 0.0,
    };

    let collector = match &scenario.collector {
        Some(def) => Collector {
            reference_temperature_k: def.reference_temperature_k,
            temperature_coefficient_per_k: def.temperature_coefficient_per_k,
            mass_per_area_kg_m2: def.mass_per_area_kg_m2,
            specific_heat_j_kg_k: def.specific_heat_j_kg_k,
            height_m: def.height_m,
        },
        None => Collector::default(),
    };

    let pipe = match &scenario.pipe {
        Some(def) => LoopPipe {
            length_m: def.length_m,
            diameter_m: def.diameter_m,
            roughness_m: def.roughness_m,
            k_minor: def.k_minor,
        },
        None => LoopPipe::default(),
    };

    Ok(SimulationParameters {
        fluid,
        irradiance: w_per_m2(field("conditions.irradiance", &c.irradiance, Quantity::Irradiance)?),
        efficiency: field("conditions.efficiency", &c.efficiency, Quantity::Dimensionless)?,
        ambient_temperature: k(field(
            "conditions.ambient_temperature",
            &c.ambient_temperature,
            Quantity::Temperature,
        )?),
        pump_flow_rate: m3ps(field(
            "conditions.pump_flow_rate",
            &c.pump_flow_rate,
            Quantity::VolumeRate,
        )?),
        tank_volume: m3(field("conditions.tank_volume", &c.tank_volume, Quantity::Volume)?),
        initial_tank_temperature: k(field(
            "conditions.initial_tank_temperature",
            &c.initial_tank_temperature,
            Quantity::Temperature,
        )?),
        panel_area: m2(field("conditions.panel_area", &c.panel_area, Quantity::Area)?),
        elevation_difference: m(field(
            "conditions.elevation_difference",
            &c.elevation_difference,
            Quantity::Length,
        )?),
        site_altitude: m(site_altitude),
        passive_flow_model: scenario.passive_flow_model.into(),
        collector,
        pipe,
    })
}

/// Describe `params` as a scenario; hardware sections are written only when
/// they differ from the defaults.
pub fn from_parameters(name: &str, params: &SimulationParameters) -> Scenario {
    let altitude_m = to_m(params.site_altitude);
    let collector = params.collector;
    let pipe = params.pipe;

    Scenario {
        version: LATEST_VERSION,
        name: name.to_string(),
        description: None,
        fluid: params.fluid.canonical_id().to_string(),
        conditions: ConditionsDef {
            irradiance: format!("{} W/m2", to_w_per_m2(params.irradiance)),
            efficiency: format!("{}", params.efficiency),
            ambient_temperature: format!("{} K", to_k(params.ambient_temperature)),
            pump_flow_rate: format!("{} L/min", to_lpm(params.pump_flow_rate)),
            tank_volume: format!("{} m3", to_m3(params.tank_volume)),
            initial_tank_temperature: format!("{} K", to_k(params.initial_tank_temperature)),
            panel_area: format!("{} m2", to_m2(params.panel_area)),
            elevation_difference: format!("{} m", to_m(params.elevation_difference)),
        },
        site: (altitude_m != 0.0).then(|| SiteDef {
            altitude: format!("{altitude_m} m"),
        }),
        collector: (collector != Collector::default()).then(|| CollectorDef {
            reference_temperature_k: collector.reference_temperature_k,
            temperature_coefficient_per_k: collector.temperature_coefficient_per_k,
            mass_per_area_kg_m2: collector.mass_per_area_kg_m2,
            specific_heat_j_kg_k: collector.specific_heat_j_kg_k,
            height_m: collector.height_m,
        }),
        pipe: (pipe != LoopPipe::default()).then(|| PipeDef {
            length_m: pipe.length_m,
            diameter_m: pipe.diameter_m,
            roughness_m: pipe.roughness_m,
            k_minor: pipe.k_minor,
        }),
        passive_flow_model: params.passive_flow_model.into(),
        run: None,
    }
}
