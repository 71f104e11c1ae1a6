//! Flow-mode resolution: forced pump flow or passive return.
//!
//! The resolver is evaluated fresh every tick and holds no state between
//! ticks. It produces the effective volumetric flow used in the energy
//! balance together with the mechanism that drives it.

use crate::collector::DEFAULT_PANEL_HEIGHT;
use crate::common::EPSILON_FLOW;
use crate::pipe::LoopPipe;
use sl_core::units::constants::SECONDS_PER_MINUTE;
use sl_fluids::FluidProperties;

/// Pump settings above this are treated as forced circulation (L/min).
pub const FORCED_THRESHOLD_LPM: f64 = 0.01;

/// Gravity-assisted return per metre of tank elevation (L/min per m).
pub const GRAVITY_FLOW_LPM_PER_M: f64 = 0.1;

/// Linear thermosiphon return per kelvin of panel excess (L/min per K).
pub const THERMOSIPHON_FLOW_LPM_PER_K: f64 = 0.05;

/// Passive flow cap per metre of driving column per metre of pipe bore (m/s).
pub const PASSIVE_FLOW_CAP_M_PER_S: f64 = 0.002;

#[inline]
fn lpm_to_m3ps(v: f64) -> f64 {
    v / 1000.0 / SECONDS_PER_MINUTE
}

/// How the thermosiphon candidate is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassiveFlowModel {
    /// Proportional to the panel's temperature excess over the tank.
    Linear,
    /// Buoyancy head driven through the loop pipe's friction.
    #[default]
    Thermosiphon,
}

/// Mechanism driving circulation during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowMode {
    Forced,
    Gravity,
    Thermosiphon,
    #[default]
    Stagnant,
}

impl FlowMode {
    pub fn label(self) -> &'static str {
        match self {
            FlowMode::Forced => "forced",
            FlowMode::Gravity => "gravity",
            FlowMode::Thermosiphon => "thermosiphon",
            FlowMode::Stagnant => "stagnant",
        }
    }
}

/// Per-tick inputs to the resolver, all SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowInputs {
    /// Pump setting (m³/s)
    pub pump_m3_s: f64,
    /// Tank elevation above the panel (m); negative when below
    pub elevation_m: f64,
    pub panel_k: f64,
    pub tank_k: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowResolution {
    /// Effective volumetric flow (m³/s), never negative
    pub rate_m3_s: f64,
    pub mode: FlowMode,
}

impl FlowResolution {
    pub fn stagnant() -> Self {
        Self {
            rate_m3_s: 0.0,
            mode: FlowMode::Stagnant,
        }
    }

    pub fn mass_flow_kg_s(&self, density_kg_m3: f64) -> f64 {
        self.rate_m3_s * density_kg_m3
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowResolver {
    pub passive_model: PassiveFlowModel,
    pub pipe: LoopPipe,
    /// Height of the collector riser; adds to the thermosiphon column (m)
    pub collector_height_m: f64,
}

impl Default for FlowResolver {
    fn default() -> Self {
        Self {
            passive_model: PassiveFlowModel::default(),
            pipe: LoopPipe::default(),
            collector_height_m: DEFAULT_PANEL_HEIGHT,
        }
    }
}

impl FlowResolver {
    pub fn new(passive_model: PassiveFlowModel, pipe: LoopPipe, collector_height_m: f64) -> Self {
        Self {
            passive_model,
            pipe,
            collector_height_m,
        }
    }

    pub fn resolve(&self, fluid: &FluidProperties, inputs: FlowInputs) -> FlowResolution {
        let pump = inputs.pump_m3_s.max(0.0);
        if pump > lpm_to_m3ps(FORCED_THRESHOLD_LPM) {
            return FlowResolution {
                rate_m3_s: pump,
                mode: FlowMode::Forced,
            };
        }

        let gravity = gravity_candidate(inputs.elevation_m);
        let thermosiphon = self.thermosiphon_candidate(fluid, inputs);

        // Alternative drivers of the same return loop, not additive.
        let mut rate = gravity.max(thermosiphon).max(0.0);
        if pump > 0.0 {
            // A trickling pump still throttles the loop.
            rate = rate.min(pump);
        }

        if rate <= EPSILON_FLOW {
            return FlowResolution::stagnant();
        }

        let mode = if thermosiphon > gravity {
            FlowMode::Thermosiphon
        } else {
            FlowMode::Gravity
        };
        FlowResolution {
            rate_m3_s: rate,
            mode,
        }
    }

    /// Buoyancy-driven return candidate (m³/s); zero unless the panel is
    /// hotter than the tank.
    pub fn thermosiphon_candidate(&self, fluid: &FluidProperties, inputs: FlowInputs) -> f64 {
        let excess_k = inputs.panel_k - inputs.tank_k;
        if excess_k <= 0.0 {
            return 0.0;
        }

        match self.passive_model {
            PassiveFlowModel::Linear => lpm_to_m3ps(THERMOSIPHON_FLOW_LPM_PER_K) * excess_k,
            PassiveFlowModel::Thermosiphon => self.solved_thermosiphon(fluid, inputs),
        }
    }

    fn solved_thermosiphon(&self, fluid: &FluidProperties, inputs: FlowInputs) -> f64 {
        let column_m = inputs.elevation_m.max(0.0) + self.collector_height_m;
        let rho_hot = fluid.density_at(inputs.panel_k);
        let rho_cold = fluid.density_at(inputs.tank_k);
        if rho_hot <= 0.0 {
            return 0.0;
        }

        let head_m = column_m * (rho_cold - rho_hot) / rho_hot;
        if head_m <= 0.0 {
            return 0.0;
        }

        let rho_mean = 0.5 * (rho_hot + rho_cold);
        let solution = self
            .pipe
            .solve_thermosiphon(head_m, rho_mean, fluid.viscosity_pa_s);
        let rate = solution.velocity_m_s * self.pipe.flow_area_m2();
        let cap = PASSIVE_FLOW_CAP_M_PER_S * column_m * self.pipe.diameter_m;
        rate.min(cap)
    }
}

/// Gravity-assisted return candidate (m³/s); only a tank above the panel
/// contributes.
pub fn gravity_candidate(elevation_m: f64) -> f64 {
    if elevation_m > 0.0 {
        lpm_to_m3ps(GRAVITY_FLOW_LPM_PER_M) * elevation_m
    } else {
        0.0
    }
}
