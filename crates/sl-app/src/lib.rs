//! Shared application service layer for solarloop.
//!
//! Frontends go through this crate for scenario handling, run execution
//! with caching, and stored-run queries.

pub mod error;
pub mod progress;
pub mod project_service;
pub mod run_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage, TickProgress};
pub use project_service::{
    default_scenario, liquid_range_warnings, list_fluids, load_scenario, save_scenario,
    scenario_parameters, validate_scenario,
};
pub use run_service::{
    DEFAULT_RUN_TICKS, RunMode, RunOptions, RunRequest, RunResponse, ensure_run,
    ensure_run_with_progress, list_runs, load_run,
};
pub use sl_results::{RunManifest, RunSummary, TickSnapshot};
