//! User-facing run parameters and their validation.

use crate::error::SimResult;
use sl_components::{Collector, LoopPipe, PassiveFlowModel};
use sl_core::numeric::{ensure_finite, ensure_fraction, ensure_non_negative, ensure_positive};
use sl_core::units::{
    Area, Irradiance, Length, Temperature, Volume, VolumeRate, degf, liters, lpm, m, m2, to_k,
    to_m, to_m2, to_m3, to_m3ps, to_w_per_m2, w_per_m2,
};
use sl_fluids::FluidId;

/// Everything needed to start a run.
///
/// The first nine fields mirror the controls a user sets; the rest describe
/// the hardware and site and default to a typical residential install.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    pub fluid: FluidId,
    pub irradiance: Irradiance,
    /// Rated collector efficiency, 0..=1
    pub efficiency: f64,
    pub ambient_temperature: Temperature,
    pub pump_flow_rate: VolumeRate,
    pub tank_volume: Volume,
    pub initial_tank_temperature: Temperature,
    pub panel_area: Area,
    /// Tank height above the panel; negative when the tank sits below it
    pub elevation_difference: Length,
    pub site_altitude: Length,
    pub passive_flow_model: PassiveFlowModel,
    pub collector: Collector,
    pub pipe: LoopPipe,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            fluid: FluidId::Water,
            irradiance: w_per_m2(1000.0),
            efficiency: 0.8,
            ambient_temperature: degf(70.0),
            pump_flow_rate: lpm(1.0),
            tank_volume: liters(200.0),
            initial_tank_temperature: degf(68.0),
            panel_area: m2(2.0),
            elevation_difference: m(10.0),
            site_altitude: m(0.0),
            passive_flow_model: PassiveFlowModel::default(),
            collector: Collector::default(),
            pipe: LoopPipe::default(),
        }
    }
}

impl SimulationParameters {
    pub fn with_fluid(mut self, fluid: FluidId) -> Self {
        self.fluid = fluid;
        self
    }

    pub fn with_pump_flow_rate(mut self, rate: VolumeRate) -> Self {
        self.pump_flow_rate = rate;
        self
    }

    pub fn with_elevation_difference(mut self, elevation: Length) -> Self {
        self.elevation_difference = elevation;
        self
    }

    pub fn with_irradiance(mut self, irradiance: Irradiance) -> Self {
        self.irradiance = irradiance;
        self
    }

    pub fn with_site_altitude(mut self, altitude: Length) -> Self {
        self.site_altitude = altitude;
        self
    }

    pub fn with_passive_flow_model(mut self, model: PassiveFlowModel) -> Self {
        self.passive_flow_model = model;
        self
    }

    /// Check every field for physical sense.
    ///
    /// A run must never start from parameters that fail here.
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(to_m2(self.panel_area), "panel area")?;
        ensure_positive(to_m3(self.tank_volume), "tank volume")?;
        ensure_fraction(self.efficiency, "efficiency")?;
        ensure_non_negative(to_m3ps(self.pump_flow_rate), "pump flow rate")?;
        ensure_non_negative(to_w_per_m2(self.irradiance), "irradiance")?;
        // Kelvin, so positivity is the absolute-zero bound.
        ensure_positive(to_k(self.ambient_temperature), "ambient temperature")?;
        ensure_positive(to_k(self.initial_tank_temperature), "initial tank temperature")?;
        ensure_finite(to_m(self.elevation_difference), "elevation difference")?;
        ensure_finite(to_m(self.site_altitude), "site altitude")?;

        self.collector.validate()?;
        self.pipe.validate()?;
        Ok(())
    }
}
