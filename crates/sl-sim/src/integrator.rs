//! One-second explicit energy balance for the panel and tank nodes.
//!
//! ```text
//! Q_in       = G · η(T_p) · A
//! Q_loss     = h · A · (T_p − T_a) · p/p₀
//! Q_transfer = ε_p (C_p/Δt) (T_t − T_p)    only while the tank is hotter
//! T_p'       = T_p + (Q_in − Q_loss + Q_transfer) Δt / C_p
//! T_out      = T_p' + ΔT_fluid
//! T_t'       = T_t + ε_t (T_out − T_t)
//! ε_n        = 1 − exp(−ṁ c_p Δt / C_n)
//! ```
//!
//! `ε_n` is the fraction of the temperature gap node `n` closes when one
//! tick's worth of loop fluid passes through it. It equals `ṁ c_p Δt / C_n`
//! to first order and never exceeds 1, so a tank or panel that holds less
//! than one tick of flow settles instead of overshooting.
//!
//! The fluid rise `ΔT_fluid` is `Q_net / (ṁ c_p)` when the panel is hotter
//! and `−Q_transfer / (ṁ c_p)` when the tank is hotter. With no flow the
//! tank is untouched and the panel only exchanges with ambient.

use crate::params::SimulationParameters;
use crate::state::SimulationState;
use sl_components::{Collector, ConvectionEstimator, FlowInputs, FlowResolution, FlowResolver};
use sl_core::units::{Temperature, k, m3ps, to_k, to_m, to_m2, to_m3, to_m3ps, to_w_per_m2, w};
use sl_fluids::{FluidProperties, air, lookup};
use tracing::trace;

/// Simulated seconds per tick.
pub const TICK_SECONDS: f64 = 1.0;

/// Everything a tick computed, beyond the new state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub state: SimulationState,
    pub flow: FlowResolution,
    /// Convective coefficient used for the loss term (W/(m²·K))
    pub convection_h: f64,
    /// Heat pulled from a hotter tank back into the panel (W)
    pub heat_transfer_w: f64,
    /// Heat carried into the tank by the return flow (W); negative when
    /// the loop cools the tank
    pub heat_delivered_w: f64,
    /// Collector outlet temperature; `None` without flow
    pub outlet_temperature: Option<Temperature>,
}

/// Per-run tick kernel with the parameter-derived models prebuilt.
#[derive(Debug, Clone, Copy)]
pub struct TickIntegrator {
    fluid: &'static FluidProperties,
    collector: Collector,
    convection: ConvectionEstimator,
    resolver: FlowResolver,
    irradiance_w_m2: f64,
    efficiency: f64,
    ambient_k: f64,
    pump_m3_s: f64,
    elevation_m: f64,
    area_m2: f64,
    /// Air-density scaling of convective loss at the site
    loss_scale: f64,
    panel_capacity_j_k: f64,
    tank_capacity_j_k: f64,
}

/// Share of the gap closed by a node of heat capacity `capacity_j_k` when
/// `flow_j_k` of fluid heat capacity passes through it.
fn exchange_fraction(flow_j_k: f64, capacity_j_k: f64) -> f64 {
    -(-flow_j_k / capacity_j_k).exp_m1()
}

impl TickIntegrator {
    /// Build the kernel; `params` are assumed validated.
    pub fn new(params: &SimulationParameters) -> Self {
        let fluid = lookup(params.fluid);
        let altitude_m = to_m(params.site_altitude);
        let area_m2 = to_m2(params.panel_area);
        let collector = params.collector;

        Self {
            fluid,
            collector,
            convection: ConvectionEstimator::new(collector.height_m).with_altitude(altitude_m),
            resolver: FlowResolver::new(params.passive_flow_model, params.pipe, collector.height_m),
            irradiance_w_m2: to_w_per_m2(params.irradiance),
            efficiency: params.efficiency,
            ambient_k: to_k(params.ambient_temperature),
            pump_m3_s: to_m3ps(params.pump_flow_rate),
            elevation_m: to_m(params.elevation_difference),
            area_m2,
            loss_scale: air::pressure_ratio(altitude_m),
            panel_capacity_j_k: collector.heat_capacity_j_per_k(area_m2),
            tank_capacity_j_k: to_m3(params.tank_volume)
                * fluid.density_kg_m3
                * fluid.specific_heat_j_kg_k,
        }
    }

    pub fn fluid(&self) -> &'static FluidProperties {
        self.fluid
    }

    /// Advance `state` by one tick.
    pub fn step(&self, state: &SimulationState) -> TickOutcome {
        let dt = TICK_SECONDS;
        let panel_k = to_k(state.panel_temperature);
        let tank_k = to_k(state.tank_temperature);
        let cp = self.fluid.specific_heat_j_kg_k;

        let q_in = self
            .collector
            .heat_input_w(self.irradiance_w_m2, self.efficiency, self.area_m2, panel_k);
        let h = self.convection.coefficient(panel_k, self.ambient_k);
        let q_loss = h * self.area_m2 * (panel_k - self.ambient_k) * self.loss_scale;

        let flow = self.resolver.resolve(
            self.fluid,
            FlowInputs {
                pump_m3_s: self.pump_m3_s,
                elevation_m: self.elevation_m,
                panel_k,
                tank_k,
            },
        );
        let capacity_rate = flow.mass_flow_kg_s(self.fluid.density_kg_m3) * cp;

        let tank_hotter = tank_k > panel_k;
        let q_transfer = if capacity_rate > 0.0 && tank_hotter {
            let share = exchange_fraction(capacity_rate * dt, self.panel_capacity_j_k);
            share * self.panel_capacity_j_k / dt * (tank_k - panel_k)
        } else {
            0.0
        };

        let q_net = q_in - q_loss + q_transfer;
        let new_panel_k = panel_k + q_net * dt / self.panel_capacity_j_k;

        let (outlet_k, q_delivered) = if capacity_rate > 0.0 {
            let fluid_rise = if tank_hotter {
                -q_transfer / capacity_rate
            } else {
                q_net / capacity_rate
            };
            let outlet_k = new_panel_k + fluid_rise;
            let share = exchange_fraction(capacity_rate * dt, self.tank_capacity_j_k);
            (
                Some(outlet_k),
                share * self.tank_capacity_j_k / dt * (outlet_k - tank_k),
            )
        } else {
            (None, 0.0)
        };

        let new_tank_k = tank_k + q_delivered * dt / self.tank_capacity_j_k;

        trace!(
            time = state.time + 1,
            q_in,
            q_loss,
            q_transfer,
            q_delivered,
            mode = flow.mode.label(),
            "tick"
        );

        TickOutcome {
            state: SimulationState {
                time: state.time + 1,
                tank_temperature: k(new_tank_k),
                panel_temperature: k(new_panel_k),
                heat_input: w(q_in),
                heat_loss: w(q_loss),
                flow_rate: m3ps(flow.rate_m3_s),
                flow_mode: flow.mode,
                running: state.running,
            },
            flow,
            convection_h: h,
            heat_transfer_w: q_transfer,
            heat_delivered_w: q_delivered,
            outlet_temperature: outlet_k.map(k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_components::FlowMode;
    use sl_core::units::{degc, degf, liters, lpm, m, to_k, to_w, w_per_m2};
    use sl_fluids::FluidId;

    fn run(params: &SimulationParameters, ticks: usize) -> SimulationState {
        let integrator = TickIntegrator::new(params);
        let mut s = SimulationState::initial(params);
        for _ in 0..ticks {
            s = integrator.step(&s).state;
        }
        s
    }

    #[test]
    fn forced_loop_first_tick() {
        let params = SimulationParameters::default();
        let s0 = SimulationState::initial(&params);
        let out = TickIntegrator::new(&params).step(&s0);

        assert_eq!(out.state.time, 1);
        assert_eq!(out.flow.mode, FlowMode::Forced);
        // Panel starts at ambient: no loss, full derated absorption.
        assert_eq!(to_w(out.state.heat_loss), 0.0);
        let q_in = to_w(out.state.heat_input);
        assert!(q_in > 1600.0 && q_in < 1650.0, "q_in = {q_in}");

        let d_panel = to_k(out.state.panel_temperature) - to_k(s0.panel_temperature);
        let d_tank = to_k(out.state.tank_temperature) - to_k(s0.tank_temperature);
        assert!(d_panel > 0.05 && d_panel < 0.15, "d_panel = {d_panel}");
        assert!(d_tank > 0.0 && d_tank < 0.01, "d_tank = {d_tank}");
    }

    #[test]
    fn stagnant_loop_leaves_tank_alone() {
        // Tank warmer than the panel: no buoyancy, no elevation, no pump.
        let params = SimulationParameters {
            initial_tank_temperature: degf(75.0),
            ..SimulationParameters::default()
                .with_pump_flow_rate(lpm(0.0))
                .with_elevation_difference(m(0.0))
                .with_irradiance(w_per_m2(0.0))
        };
        let s0 = SimulationState::initial(&params);
        let out = TickIntegrator::new(&params).step(&s0);
        assert_eq!(out.flow.mode, FlowMode::Stagnant);
        assert_eq!(out.state.tank_temperature, s0.tank_temperature);
        assert_eq!(out.outlet_temperature, None);
        assert_eq!(out.heat_delivered_w, 0.0);
    }

    #[test]
    fn hot_tank_warms_cold_panel() {
        let params = SimulationParameters {
            irradiance: w_per_m2(0.0),
            ambient_temperature: degc(10.0),
            initial_tank_temperature: degc(60.0),
            ..Default::default()
        };
        let s0 = SimulationState::initial(&params);
        let out = TickIntegrator::new(&params).step(&s0);
        assert!(out.heat_transfer_w > 0.0);
        assert!(out.state.panel_temperature > s0.panel_temperature);
        assert!(out.state.tank_temperature < s0.tank_temperature);
    }

    #[test]
    fn dark_panel_relaxes_toward_ambient() {
        let params = SimulationParameters {
            irradiance: w_per_m2(0.0),
            pump_flow_rate: lpm(0.0),
            elevation_difference: m(-1.0),
            ambient_temperature: degf(70.0),
            initial_tank_temperature: degf(70.0),
            ..Default::default()
        };
        let integrator = TickIntegrator::new(&params);
        let mut s = SimulationState {
            panel_temperature: degc(60.0),
            ..SimulationState::initial(&params)
        };
        let start = to_k(s.panel_temperature);
        for _ in 0..600 {
            s = integrator.step(&s).state;
        }
        let end = to_k(s.panel_temperature);
        let ambient = to_k(params.ambient_temperature);
        assert!(end < start);
        assert!(end > ambient - 0.5);
    }

    #[test]
    fn tank_heats_over_an_hour_of_sun() {
        let params = SimulationParameters {
            tank_volume: liters(100.0),
            ..Default::default()
        };
        let s = run(&params, 3600);
        assert!(s.tank_temperature > params.initial_tank_temperature);
        assert!(to_k(s.panel_temperature).is_finite());
    }

    #[test]
    fn thimble_sized_tank_settles() {
        // Far less fluid in the tank than one second of pump flow.
        let params = SimulationParameters {
            tank_volume: liters(0.005),
            ..Default::default()
        };
        let integrator = TickIntegrator::new(&params);
        let mut s = SimulationState::initial(&params);
        for _ in 0..3600 {
            s = integrator.step(&s).state;
            let (tank, panel) = (to_k(s.tank_temperature), to_k(s.panel_temperature));
            assert!(tank > 250.0 && tank < 600.0, "t={} tank={tank}", s.time);
            assert!(panel > 250.0 && panel < 600.0, "t={} panel={panel}", s.time);
        }
    }

    #[test]
    fn exchange_fraction_is_bounded() {
        assert_eq!(exchange_fraction(0.0, 10.0), 0.0);
        assert!((exchange_fraction(1e-6, 1.0) - 1e-6).abs() < 1e-12);
        assert!(exchange_fraction(1e6, 1.0) <= 1.0);
        assert!(exchange_fraction(5.0, 1.0) > exchange_fraction(1.0, 1.0));
    }

    #[test]
    fn higher_altitude_loses_less() {
        let hot = SimulationParameters::default();
        let mut s0 = SimulationState::initial(&hot);
        s0.panel_temperature = degc(60.0);

        let sea = TickIntegrator::new(&hot).step(&s0);
        let high = TickIntegrator::new(&hot.clone().with_site_altitude(m(2500.0))).step(&s0);
        assert!(to_w(high.state.heat_loss) < to_w(sea.state.heat_loss));
    }

    #[test]
    fn fluid_choice_changes_tank_response() {
        let water = run(&SimulationParameters::default(), 120);
        let oil = run(&SimulationParameters::default().with_fluid(FluidId::ThermalOil), 120);
        // Lower volumetric heat capacity heats faster for the same volume.
        assert!(oil.tank_temperature > water.tank_temperature);
    }
}
