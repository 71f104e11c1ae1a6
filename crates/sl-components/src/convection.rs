//! Panel-to-ambient convective heat-transfer coefficient.
//!
//! Natural convection off a vertical plate (Churchill–Chu, laminar form used
//! across the whole Rayleigh range) plus a light-wind forced term.

use crate::collector::DEFAULT_PANEL_HEIGHT;
use sl_core::units::constants::G_MPS2;
use sl_fluids::air;

/// Coefficient returned when the panel/ambient gradient is too small for the
/// correlation to be well conditioned (W/(m²·K)).
pub const H_FLOOR: f64 = 5.0;

/// Gradient below which [`H_FLOOR`] is returned (K).
pub const MIN_GRADIENT_K: f64 = 0.1;

/// Assumed light-wind speed at sea level (m/s).
pub const BASE_WIND_SPEED: f64 = 0.5;

/// Fractional wind-speed increase per km of site altitude.
pub const WIND_GAIN_PER_KM: f64 = 0.1;

// h_forced = a + b·v (McAdams flat-plate fit)
const FORCED_INTERCEPT: f64 = 5.7;
const FORCED_SLOPE: f64 = 3.8;

/// Intermediate terms of one coefficient evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvectionBreakdown {
    pub grashof: f64,
    pub rayleigh: f64,
    pub nusselt: f64,
    /// Natural-convection coefficient (W/(m²·K))
    pub h_natural: f64,
    /// Forced-convection coefficient (W/(m²·K))
    pub h_forced: f64,
    /// Total coefficient (W/(m²·K))
    pub h_total: f64,
    /// True when the gradient floor was applied
    pub floored: bool,
}

impl ConvectionBreakdown {
    fn floor() -> Self {
        Self {
            grashof: 0.0,
            rayleigh: 0.0,
            nusselt: 0.0,
            h_natural: 0.0,
            h_forced: 0.0,
            h_total: H_FLOOR,
            floored: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvectionEstimator {
    /// Characteristic (vertical) panel length L (m)
    pub panel_height_m: f64,
    /// Site altitude (m); scales the assumed wind speed and the air density
    pub altitude_m: f64,
}

impl Default for ConvectionEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_PANEL_HEIGHT)
    }
}

impl ConvectionEstimator {
    pub fn new(panel_height_m: f64) -> Self {
        Self {
            panel_height_m,
            altitude_m: 0.0,
        }
    }

    pub fn with_altitude(mut self, altitude_m: f64) -> Self {
        self.altitude_m = altitude_m;
        self
    }

    pub fn wind_speed_m_s(&self) -> f64 {
        BASE_WIND_SPEED * (1.0 + WIND_GAIN_PER_KM * self.altitude_m.max(0.0) / 1000.0)
    }

    pub fn forced_coefficient(&self) -> f64 {
        FORCED_INTERCEPT + FORCED_SLOPE * self.wind_speed_m_s()
    }

    /// Total coefficient h (W/(m²·K)).
    pub fn coefficient(&self, panel_k: f64, ambient_k: f64) -> f64 {
        self.evaluate(panel_k, ambient_k).h_total
    }

    pub fn evaluate(&self, panel_k: f64, ambient_k: f64) -> ConvectionBreakdown {
        let dt = (panel_k - ambient_k).abs();
        if dt < MIN_GRADIENT_K {
            return ConvectionBreakdown::floor();
        }

        let film_k = air::film_temperature(panel_k, ambient_k);
        let props = air::properties(film_k, self.altitude_m);

        let l = self.panel_height_m;
        let beta = 1.0 / film_k;
        let nu = props.kinematic_viscosity_m2_s();

        let grashof = G_MPS2 * beta * dt * l.powi(3) / (nu * nu);
        let rayleigh = grashof * props.prandtl;

        let shape = (1.0 + (0.492 / props.prandtl).powf(9.0 / 16.0)).powf(4.0 / 9.0);
        let nusselt = 0.68 + 0.67 * rayleigh.powf(0.25) / shape;

        let h_natural = nusselt * props.conductivity_w_m_k / l;
        let h_forced = self.forced_coefficient();

        ConvectionBreakdown {
            grashof,
            rayleigh,
            nusselt,
            h_natural,
            h_forced,
            h_total: h_natural + h_forced,
            floored: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiny_gradient_returns_floor_exactly() {
        let est = ConvectionEstimator::default();
        assert_eq!(est.coefficient(300.0, 300.0), H_FLOOR);
        assert_eq!(est.coefficient(300.05, 300.0), H_FLOOR);
        assert_eq!(est.coefficient(299.95, 300.0), H_FLOOR);
        assert!(est.evaluate(300.0, 300.0).floored);
    }

    #[test]
    fn forced_term_at_default_wind() {
        let est = ConvectionEstimator::default();
        assert!((est.forced_coefficient() - 7.6).abs() < 1e-12);
    }

    #[test]
    fn warm_panel_sits_in_laminar_range() {
        let est = ConvectionEstimator::default();
        let b = est.evaluate(320.0, 300.0);
        assert!(!b.floored);
        assert!(b.rayleigh > 1e8 && b.rayleigh < 1e11, "Ra = {}", b.rayleigh);
        // a few W/(m²·K) of natural convection on top of the wind term
        assert!(b.h_natural > 1.0 && b.h_natural < 10.0, "h_nat = {}", b.h_natural);
        assert!((b.h_total - (b.h_natural + b.h_forced)).abs() < 1e-12);
    }

    #[test]
    fn symmetric_in_gradient_sign_for_forced_term() {
        let est = ConvectionEstimator::default();
        let hot = est.evaluate(320.0, 300.0);
        let cold = est.evaluate(280.0, 300.0);
        assert_eq!(hot.h_forced, cold.h_forced);
        assert!(cold.h_total > H_FLOOR);
    }

    #[test]
    fn altitude_raises_wind() {
        let sea = ConvectionEstimator::default();
        let high = ConvectionEstimator::default().with_altitude(2000.0);
        assert!(high.wind_speed_m_s() > sea.wind_speed_m_s());
        assert!(high.forced_coefficient() > sea.forced_coefficient());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn floor_iff_small_gradient(
                ambient in 250.0_f64..320.0,
                dt in -40.0_f64..40.0,
                height in 0.3_f64..3.0,
            ) {
                prop_assume!((dt.abs() - MIN_GRADIENT_K).abs() > 1e-6);
                let est = ConvectionEstimator::new(height);
                let h = est.coefficient(ambient + dt, ambient);
                if dt.abs() < MIN_GRADIENT_K {
                    prop_assert_eq!(h, H_FLOOR);
                } else {
                    prop_assert!(h > H_FLOOR);
                    prop_assert!(h.is_finite());
                }
            }
        }
    }
}
