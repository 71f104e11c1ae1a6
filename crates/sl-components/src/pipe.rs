//! Loop piping with Darcy-Weisbach friction, and the thermosiphon velocity
//! solve that runs over it.

use crate::common::{EPSILON_VELOCITY, check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use sl_core::units::constants::G_MPS2;

/// Iteration budget for the thermosiphon velocity solve.
pub const MAX_THERMOSIPHON_ITER: usize = 10;

/// Early-exit tolerance on velocity change between iterations (m/s).
pub const VELOCITY_TOL: f64 = 1e-6;

const LAMINAR_RE: f64 = 2300.0;

/// Return line between collector and tank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopPipe {
    /// Developed loop length (m)
    pub length_m: f64,
    /// Inner diameter (m)
    pub diameter_m: f64,
    /// Absolute surface roughness (m)
    pub roughness_m: f64,
    /// Minor loss coefficient (sum of K factors for fittings, bends, exit, etc.)
    pub k_minor: f64,
}

impl Default for LoopPipe {
    /// 15 mm drawn copper, 8 m developed length.
    fn default() -> Self {
        Self {
            length_m: 8.0,
            diameter_m: 0.015,
            roughness_m: 1.5e-6,
            k_minor: 2.5,
        }
    }
}

/// Outcome of a thermosiphon velocity solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermosiphonSolution {
    /// Loop velocity (m/s)
    pub velocity_m_s: f64,
    pub reynolds: f64,
    pub friction_factor: f64,
    pub iterations: usize,
    /// False when the iteration budget ran out first; the last iterate is
    /// still returned.
    pub converged: bool,
}

impl ThermosiphonSolution {
    fn at_rest() -> Self {
        Self {
            velocity_m_s: 0.0,
            reynolds: 0.0,
            friction_factor: 0.0,
            iterations: 0,
            converged: true,
        }
    }
}

impl LoopPipe {
    /// Create a new pipe.
    pub fn new(
        length_m: f64,
        diameter_m: f64,
        roughness_m: f64,
        k_minor: f64,
    ) -> ComponentResult<Self> {
        let pipe = Self {
            length_m,
            diameter_m,
            roughness_m,
            k_minor,
        };
        pipe.validate()?;
        Ok(pipe)
    }

    pub fn validate(&self) -> ComponentResult<()> {
        check_positive(self.length_m, "pipe length")?;
        check_positive(self.diameter_m, "pipe diameter")?;
        check_finite(self.roughness_m, "pipe roughness")?;
        check_finite(self.k_minor, "pipe minor loss")?;
        if self.roughness_m < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "pipe roughness must be non-negative",
            });
        }
        if self.k_minor < 0.0 {
            return Err(ComponentError::InvalidArg {
                what: "pipe minor loss must be non-negative",
            });
        }
        Ok(())
    }

    /// Flow cross-section (m²).
    pub fn flow_area_m2(&self) -> f64 {
        std::f64::consts::PI * self.diameter_m.powi(2) / 4.0
    }

    /// Compute friction factor using Colebrook-White with Swamee-Jain approximation.
    pub fn friction_factor(&self, reynolds: f64) -> f64 {
        if reynolds < LAMINAR_RE {
            // Laminar
            64.0 / reynolds
        } else {
            // Turbulent: Swamee-Jain
            let e_d = self.roughness_m / self.diameter_m;
            let a = e_d / 3.7;
            let b = 5.74 / reynolds.powf(0.9);
            let f = 0.25 / (a + b).log10().powi(2);
            f.max(0.0001) // Clamp to avoid issues
        }
    }

    /// Velocity that a given driving head sustains against friction factor `f`.
    ///
    /// `v = sqrt(2·g·h / (f·L/D + K))`
    pub fn velocity_for_head(&self, head_m: f64, f: f64) -> f64 {
        let resistance = f * self.length_m / self.diameter_m + self.k_minor;
        if resistance <= 0.0 {
            return (2.0 * G_MPS2 * head_m).sqrt();
        }
        (2.0 * G_MPS2 * head_m / resistance).sqrt()
    }

    /// Solve for the velocity a buoyancy head drives around the loop.
    ///
    /// Starts from the frictionless (Torricelli) velocity and refines with
    /// the friction factor at the current Reynolds number, stopping after
    /// [`MAX_THERMOSIPHON_ITER`] iterations or once the velocity moves by
    /// less than [`VELOCITY_TOL`].
    pub fn solve_thermosiphon(
        &self,
        head_m: f64,
        density_kg_m3: f64,
        viscosity_pa_s: f64,
    ) -> ThermosiphonSolution {
        if !(head_m > 0.0) || !(density_kg_m3 > 0.0) || !(viscosity_pa_s > 0.0) {
            return ThermosiphonSolution::at_rest();
        }

        let mut velocity = (2.0 * G_MPS2 * head_m).sqrt();
        let mut reynolds = 0.0;
        let mut f = 0.0;

        for iteration in 1..=MAX_THERMOSIPHON_ITER {
            if velocity < EPSILON_VELOCITY {
                return ThermosiphonSolution {
                    velocity_m_s: 0.0,
                    reynolds: 0.0,
                    friction_factor: f,
                    iterations: iteration,
                    converged: true,
                };
            }

            reynolds = density_kg_m3 * velocity * self.diameter_m / viscosity_pa_s;
            f = self.friction_factor(reynolds);
            let next = self.velocity_for_head(head_m, f);
            let change = (next - velocity).abs();
            velocity = next;

            if change < VELOCITY_TOL {
                return ThermosiphonSolution {
                    velocity_m_s: velocity,
                    reynolds,
                    friction_factor: f,
                    iterations: iteration,
                    converged: true,
                };
            }
        }

        ThermosiphonSolution {
            velocity_m_s: velocity,
            reynolds,
            friction_factor: f,
            iterations: MAX_THERMOSIPHON_ITER,
            converged: false,
        }
    }
}
