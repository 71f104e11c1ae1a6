//! sl-components: physical building blocks of a solar-thermal loop.
//!
//! Provides models for:
//! - The collector node (temperature-derated absorption, thermal mass)
//! - Panel-to-ambient convection (Churchill–Chu + light wind)
//! - Loop piping with friction and a thermosiphon velocity solve
//! - Flow-mode resolution between pump and passive return
//!
//! All models are deterministic functions of their inputs and never fail
//! during evaluation; construction validates geometry and constants.
//!
//! # Example
//!
//! ```
//! use sl_components::{ConvectionEstimator, FlowInputs, FlowResolver};
//! use sl_fluids::{FluidId, lookup};
//!
//! let h = ConvectionEstimator::default().coefficient(320.0, 300.0);
//! assert!(h > 5.0);
//!
//! let flow = FlowResolver::default().resolve(
//!     lookup(FluidId::Water),
//!     FlowInputs { pump_m3_s: 0.0, elevation_m: 2.0, panel_k: 320.0, tank_k: 300.0 },
//! );
//! assert!(flow.rate_m3_s > 0.0);
//! ```

pub mod collector;
pub mod common;
pub mod convection;
pub mod error;
pub mod flow;
pub mod pipe;

// Re-exports
pub use collector::Collector;
pub use convection::{ConvectionBreakdown, ConvectionEstimator, H_FLOOR};
pub use error::{ComponentError, ComponentResult};
pub use flow::{FlowInputs, FlowMode, FlowResolution, FlowResolver, PassiveFlowModel};
pub use pipe::{LoopPipe, ThermosiphonSolution};
