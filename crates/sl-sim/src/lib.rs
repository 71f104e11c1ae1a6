//! Transient simulation of a solar-thermal loop.
//!
//! Provides:
//! - Parameter validation for a collector/tank/loop run
//! - One-second explicit tick integration of the panel and tank nodes
//! - A pure reducer for the start/pause/resume/reset lifecycle
//! - A bounded history of recent ticks
//! - A real-time [`Engine`] driven by a cancellable background ticker
//!
//! # Example
//!
//! ```
//! use sl_sim::{Action, RunPhase, Simulation, SimulationParameters};
//!
//! let mut sim = Simulation::new();
//! sim.dispatch(Action::Start(SimulationParameters::default())).unwrap();
//! sim.dispatch(Action::Tick).unwrap();
//! assert_eq!(sim.phase(), RunPhase::Running);
//! assert_eq!(sim.state().time, 1);
//! ```

pub mod engine;
pub mod error;
pub mod history;
pub mod integrator;
pub mod machine;
pub mod params;
pub mod state;
pub mod ticker;

// Re-exports for public API
pub use engine::{DEFAULT_TICK_PERIOD, Engine, EngineSnapshot};
pub use error::{SimError, SimResult};
pub use history::{HISTORY_CAPACITY, HistoryBuffer};
pub use integrator::{TICK_SECONDS, TickIntegrator, TickOutcome};
pub use machine::{Action, RunPhase, Simulation};
pub use params::SimulationParameters;
pub use state::{SimulationState, TickRecord};
pub use ticker::{CancelToken, Ticker};
