//! Flat-plate collector: absorbed solar power and lumped thermal mass.

use crate::common::{check_finite, check_positive};
use crate::error::ComponentResult;

/// Standard test condition cell temperature, 25 °C (K).
pub const DEFAULT_REFERENCE_K: f64 = 298.15;

/// Relative efficiency change per kelvin above the reference temperature.
pub const DEFAULT_TEMPERATURE_COEFFICIENT: f64 = -0.004;

/// Absorber + glazing mass per unit aperture area (kg/m²).
pub const DEFAULT_MASS_PER_AREA: f64 = 10.0;

/// Specific heat of the absorber node, aluminium-like (J/(kg·K)).
pub const DEFAULT_PANEL_SPECIFIC_HEAT: f64 = 900.0;

/// Characteristic height of the panel for natural convection (m).
pub const DEFAULT_PANEL_HEIGHT: f64 = 1.5;

/// Single well-mixed panel node.
///
/// ## Model
///
/// ```text
/// η(T)  = max(η₀ · (1 + β · (T − T_ref)), 0)
/// Q_in  = G · η(T) · A
/// C     = m'' · A · c_p
/// ```
///
/// With a negative β the panel loses efficiency as it heats up; the floor
/// keeps absorbed power from ever going negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collector {
    /// Temperature at which the base efficiency is rated (K)
    pub reference_temperature_k: f64,
    /// Efficiency temperature coefficient β (1/K)
    pub temperature_coefficient_per_k: f64,
    /// Panel mass per unit area (kg/m²)
    pub mass_per_area_kg_m2: f64,
    /// Panel specific heat (J/(kg·K))
    pub specific_heat_j_kg_k: f64,
    /// Characteristic height for the convection correlation (m)
    pub height_m: f64,
}

impl Default for Collector {
    fn default() -> Self {
        Self {
            reference_temperature_k: DEFAULT_REFERENCE_K,
            temperature_coefficient_per_k: DEFAULT_TEMPERATURE_COEFFICIENT,
            mass_per_area_kg_m2: DEFAULT_MASS_PER_AREA,
            specific_heat_j_kg_k: DEFAULT_PANEL_SPECIFIC_HEAT,
            height_m: DEFAULT_PANEL_HEIGHT,
        }
    }
}

impl Collector {
    /// Create a collector, rejecting non-physical constants.
    pub fn new(
        reference_temperature_k: f64,
        temperature_coefficient_per_k: f64,
        mass_per_area_kg_m2: f64,
        specific_heat_j_kg_k: f64,
        height_m: f64,
    ) -> ComponentResult<Self> {
        let collector = Self {
            reference_temperature_k,
            temperature_coefficient_per_k,
            mass_per_area_kg_m2,
            specific_heat_j_kg_k,
            height_m,
        };
        collector.validate()?;
        Ok(collector)
    }

    pub fn validate(&self) -> ComponentResult<()> {
        check_positive(self.reference_temperature_k, "collector reference temperature")?;
        check_finite(
            self.temperature_coefficient_per_k,
            "collector temperature coefficient",
        )?;
        check_positive(self.mass_per_area_kg_m2, "collector mass per area")?;
        check_positive(self.specific_heat_j_kg_k, "collector specific heat")?;
        check_positive(self.height_m, "collector height")?;
        Ok(())
    }

    /// Temperature-derated efficiency, floored at zero.
    pub fn efficiency_at(&self, base_efficiency: f64, panel_k: f64) -> f64 {
        let derate =
            1.0 + self.temperature_coefficient_per_k * (panel_k - self.reference_temperature_k);
        (base_efficiency * derate).max(0.0)
    }

    /// Absorbed solar power (W).
    pub fn heat_input_w(
        &self,
        irradiance_w_m2: f64,
        base_efficiency: f64,
        area_m2: f64,
        panel_k: f64,
    ) -> f64 {
        irradiance_w_m2 * self.efficiency_at(base_efficiency, panel_k) * area_m2
    }

    /// Heat capacity of the panel node (J/K).
    pub fn heat_capacity_j_per_k(&self, area_m2: f64) -> f64 {
        self.mass_per_area_kg_m2 * area_m2 * self.specific_heat_j_kg_k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rated_efficiency_at_reference() {
        let c = Collector::default();
        assert!((c.efficiency_at(0.8, DEFAULT_REFERENCE_K) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn hot_panel_loses_efficiency_but_never_goes_negative() {
        let c = Collector::default();
        let warm = c.efficiency_at(0.8, DEFAULT_REFERENCE_K + 50.0);
        assert!(warm < 0.8);
        // 1 - 0.004 * 300 < 0
        assert_eq!(c.efficiency_at(0.8, DEFAULT_REFERENCE_K + 300.0), 0.0);
    }

    #[test]
    fn heat_input_scales_with_area() {
        let c = Collector::default();
        let one = c.heat_input_w(1000.0, 0.8, 1.0, 300.0);
        let two = c.heat_input_w(1000.0, 0.8, 2.0, 300.0);
        assert!((two - 2.0 * one).abs() < 1e-9);
    }

    #[test]
    fn heat_capacity() {
        let c = Collector::default();
        assert_eq!(c.heat_capacity_j_per_k(2.0), 10.0 * 2.0 * 900.0);
    }

    #[test]
    fn rejects_zero_mass() {
        assert!(Collector::new(298.15, -0.004, 0.0, 900.0, 1.5).is_err());
        assert!(Collector::new(298.15, -0.004, 10.0, 900.0, 1.5).is_ok());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn more_sun_never_means_less_heat(
                g in 0.0_f64..1500.0,
                dg in 0.0_f64..500.0,
                eff in 0.0_f64..=1.0,
                below_ref in 0.0_f64..60.0,
            ) {
                let c = Collector::default();
                let t = DEFAULT_REFERENCE_K - below_ref;
                let q1 = c.heat_input_w(g, eff, 2.0, t);
                let q2 = c.heat_input_w(g + dg, eff, 2.0, t);
                prop_assert!(q2 >= q1);
            }
        }
    }
}
