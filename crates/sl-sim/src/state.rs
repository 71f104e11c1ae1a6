//! Live simulation state and per-tick records.

use crate::params::SimulationParameters;
use sl_components::FlowMode;
use sl_core::units::{Power, Temperature, VolumeRate, k, m3ps, w};

/// Temperature an idle engine reports before any run was configured (K).
pub const REST_TEMPERATURE_K: f64 = 293.15;

/// Snapshot of the loop after the most recent tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    /// Elapsed ticks; one tick is one simulated second
    pub time: u64,
    pub tank_temperature: Temperature,
    pub panel_temperature: Temperature,
    /// Solar power absorbed during the last tick
    pub heat_input: Power,
    /// Convective power lost to ambient during the last tick
    pub heat_loss: Power,
    pub flow_rate: VolumeRate,
    pub flow_mode: FlowMode,
    pub running: bool,
}

impl SimulationState {
    /// State of an engine that has never been started.
    pub fn at_rest() -> Self {
        Self {
            time: 0,
            tank_temperature: k(REST_TEMPERATURE_K),
            panel_temperature: k(REST_TEMPERATURE_K),
            heat_input: w(0.0),
            heat_loss: w(0.0),
            flow_rate: m3ps(0.0),
            flow_mode: FlowMode::Stagnant,
            running: false,
        }
    }

    /// Time zero for a run: tank at its initial temperature, panel at ambient.
    pub fn initial(params: &SimulationParameters) -> Self {
        Self {
            tank_temperature: params.initial_tank_temperature,
            panel_temperature: params.ambient_temperature,
            ..Self::at_rest()
        }
    }

    pub fn record(&self) -> TickRecord {
        TickRecord {
            time: self.time,
            tank_temperature: self.tank_temperature,
            panel_temperature: self.panel_temperature,
            heat_input: self.heat_input,
            heat_loss: self.heat_loss,
            flow_rate: self.flow_rate,
            flow_mode: self.flow_mode,
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::at_rest()
    }
}

/// One entry of the bounded history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRecord {
    pub time: u64,
    pub tank_temperature: Temperature,
    pub panel_temperature: Temperature,
    pub heat_input: Power,
    pub heat_loss: Power,
    pub flow_rate: VolumeRate,
    pub flow_mode: FlowMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_core::units::{degf, to_k};

    #[test]
    fn initial_state_seeds_from_parameters() {
        let p = SimulationParameters::default();
        let s = SimulationState::initial(&p);
        assert_eq!(s.time, 0);
        assert!(!s.running);
        assert!((to_k(s.tank_temperature) - to_k(degf(68.0))).abs() < 1e-9);
        assert!((to_k(s.panel_temperature) - to_k(degf(70.0))).abs() < 1e-9);
        assert_eq!(s.flow_mode, FlowMode::Stagnant);
    }

    #[test]
    fn record_copies_reported_fields() {
        let s = SimulationState {
            time: 7,
            heat_input: w(12.0),
            flow_rate: m3ps(1e-4),
            flow_mode: FlowMode::Forced,
            ..SimulationState::at_rest()
        };
        let r = s.record();
        assert_eq!(r.time, 7);
        assert_eq!(r.heat_input, w(12.0));
        assert_eq!(r.tank_temperature, s.tank_temperature);
        assert_eq!(r.flow_rate, m3ps(1e-4));
        assert_eq!(r.flow_mode, FlowMode::Forced);
    }
}
