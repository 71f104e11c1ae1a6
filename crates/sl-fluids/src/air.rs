//! Dry-air properties evaluated at the collector film temperature.
//!
//! All functions take Kelvin and metres and are defined for any physically
//! reasonable input; callers must not pass non-finite values.

use sl_core::units::constants;

/// Specific gas constant of dry air (J/(kg·K)).
pub const R_AIR: f64 = 287.05;

/// Sutherland reference viscosity (Pa·s) at [`SUTHERLAND_T0_K`].
pub const SUTHERLAND_MU0: f64 = 1.716e-5;
/// Sutherland reference temperature (K).
pub const SUTHERLAND_T0_K: f64 = 273.15;
/// Sutherland constant for air (K).
pub const SUTHERLAND_S_K: f64 = 110.4;

/// Linearisation point for conductivity and Prandtl number (K).
pub const LINEAR_REF_K: f64 = 300.0;
const CONDUCTIVITY_REF: f64 = 0.02624;
const CONDUCTIVITY_SLOPE: f64 = 7.58e-5;
const PRANDTL_REF: f64 = 0.7073;
const PRANDTL_SLOPE: f64 = -1.4e-4;

// International Standard Atmosphere, troposphere layer.
const ISA_T0_K: f64 = 288.15;
const ISA_LAPSE_K_PER_M: f64 = 0.0065;
const ISA_EXPONENT: f64 = 5.255_88;
const ISA_MIN_ALTITUDE_M: f64 = -500.0;
const ISA_MAX_ALTITUDE_M: f64 = 11_000.0;

/// Air properties at one film temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirProperties {
    /// Density (kg/m³)
    pub density_kg_m3: f64,
    /// Dynamic viscosity (Pa·s)
    pub viscosity_pa_s: f64,
    /// Thermal conductivity (W/(m·K))
    pub conductivity_w_m_k: f64,
    /// Prandtl number (-)
    pub prandtl: f64,
}

impl AirProperties {
    /// Kinematic viscosity ν = μ/ρ (m²/s).
    pub fn kinematic_viscosity_m2_s(&self) -> f64 {
        self.viscosity_pa_s / self.density_kg_m3
    }
}

/// Mean of surface and free-stream temperature.
#[inline]
pub fn film_temperature(surface_k: f64, ambient_k: f64) -> f64 {
    0.5 * (surface_k + ambient_k)
}

/// Static pressure at altitude from the barometric formula (Pa).
pub fn pressure_at_altitude(altitude_m: f64) -> f64 {
    let h = altitude_m.clamp(ISA_MIN_ALTITUDE_M, ISA_MAX_ALTITUDE_M);
    constants::P_ATM_PA * (1.0 - ISA_LAPSE_K_PER_M * h / ISA_T0_K).powf(ISA_EXPONENT)
}

/// Ratio of pressure at altitude to sea-level pressure.
pub fn pressure_ratio(altitude_m: f64) -> f64 {
    pressure_at_altitude(altitude_m) / constants::P_ATM_PA
}

/// Ideal-gas density (kg/m³).
pub fn density(t_k: f64, altitude_m: f64) -> f64 {
    pressure_at_altitude(altitude_m) / (R_AIR * t_k)
}

/// Sutherland's law (Pa·s).
pub fn viscosity(t_k: f64) -> f64 {
    SUTHERLAND_MU0 * (t_k / SUTHERLAND_T0_K).powf(1.5) * (SUTHERLAND_T0_K + SUTHERLAND_S_K)
        / (t_k + SUTHERLAND_S_K)
}

/// Thermal conductivity (W/(m·K)), linear about 300 K.
pub fn conductivity(t_k: f64) -> f64 {
    CONDUCTIVITY_REF + CONDUCTIVITY_SLOPE * (t_k - LINEAR_REF_K)
}

/// Prandtl number, linear about 300 K.
pub fn prandtl(t_k: f64) -> f64 {
    PRANDTL_REF + PRANDTL_SLOPE * (t_k - LINEAR_REF_K)
}

pub fn properties(film_k: f64, altitude_m: f64) -> AirProperties {
    AirProperties {
        density_kg_m3: density(film_k, altitude_m),
        viscosity_pa_s: viscosity(film_k),
        conductivity_w_m_k: conductivity(film_k),
        prandtl: prandtl(film_k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_density_near_textbook() {
        let rho = density(300.0, 0.0);
        assert!((rho - 1.177).abs() < 0.01, "rho = {rho}");
    }

    #[test]
    fn sutherland_reproduces_reference_point() {
        assert!((viscosity(SUTHERLAND_T0_K) - SUTHERLAND_MU0).abs() < 1e-15);
        // ~1.85e-5 Pa·s at 300 K
        assert!((viscosity(300.0) - 1.846e-5).abs() < 2e-7);
    }

    #[test]
    fn linear_fits_hit_reference_point() {
        assert!((conductivity(LINEAR_REF_K) - CONDUCTIVITY_REF).abs() < 1e-15);
        assert!((prandtl(LINEAR_REF_K) - PRANDTL_REF).abs() < 1e-15);
    }

    #[test]
    fn altitude_thins_air() {
        assert!((pressure_ratio(0.0) - 1.0).abs() < 1e-12);
        let r = pressure_ratio(1500.0);
        assert!(r > 0.8 && r < 0.9, "ratio = {r}");
        assert!(density(300.0, 1500.0) < density(300.0, 0.0));
    }

    #[test]
    fn film_temperature_is_mean() {
        assert_eq!(film_temperature(320.0, 300.0), 310.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn properties_stay_physical(t in 230.0_f64..400.0, alt in 0.0_f64..4000.0) {
                let p = properties(t, alt);
                prop_assert!(p.density_kg_m3 > 0.0);
                prop_assert!(p.viscosity_pa_s > 0.0);
                prop_assert!(p.conductivity_w_m_k > 0.0);
                prop_assert!(p.prandtl > 0.6 && p.prandtl < 0.8);
            }

            #[test]
            fn viscosity_rises_with_temperature(t in 230.0_f64..400.0) {
                prop_assert!(viscosity(t + 1.0) > viscosity(t));
            }
        }
    }
}
