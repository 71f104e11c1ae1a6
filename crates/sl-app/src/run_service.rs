//! Run execution and caching service.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use sl_project::MAX_RUN_TICKS;
use sl_results::{RunManifest, RunStore, TickSnapshot};
use sl_sim::{Action, Engine, Simulation, SimulationParameters};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage, TickProgress};
use crate::project_service;

/// Tick count used when neither the request nor the scenario names one.
pub const DEFAULT_RUN_TICKS: u64 = 600;

const PREALLOCATE_TICKS: u64 = 86_400;

/// How ticks are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Step the reducer as fast as possible.
    Batch,
    /// Drive an [`Engine`] on its background ticker at `period`.
    Realtime { period: Duration },
}

impl RunMode {
    fn cache_tag(&self) -> &'static str {
        match self {
            RunMode::Batch => "batch",
            RunMode::Realtime { .. } => "realtime",
        }
    }
}

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub scenario_path: &'a Path,
    /// Overrides the scenario's `run.ticks`.
    pub ticks: Option<u64>,
    pub mode: RunMode,
    pub options: RunOptions,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub elapsed_wall_s: f64,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    mode: RunMode,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    tick: Option<TickProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        let mut event =
            RunProgressEvent::stage(mode, stage, started.elapsed().as_secs_f64(), message);
        event.tick = tick;
        cb(event);
    }
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mode = request.mode;

    emit_progress(
        &mut progress_cb,
        mode,
        RunStage::LoadingScenario,
        started,
        Some("Loading scenario".to_string()),
        None,
    );

    let scenario = project_service::load_scenario(request.scenario_path)?;
    let params = project_service::scenario_parameters(&scenario)?;
    let ticks = request
        .ticks
        .or_else(|| scenario.run.as_ref().map(|r| r.ticks))
        .unwrap_or(DEFAULT_RUN_TICKS);
    if ticks == 0 || ticks > MAX_RUN_TICKS {
        return Err(AppError::InvalidInput(format!(
            "tick count must be between 1 and {MAX_RUN_TICKS}, got {ticks}"
        )));
    }

    emit_progress(
        &mut progress_cb,
        mode,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
        None,
    );

    let cache_key = format!("{}+{}", request.options.solver_version, mode.cache_tag());
    let run_id = sl_results::compute_run_id(&scenario, ticks, &cache_key);
    let store = RunStore::for_scenario(request.scenario_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            mode,
            RunStage::LoadingCachedResult,
            started,
            Some("Loading cached run".to_string()),
            None,
        );

        let manifest = store.load_manifest(&run_id)?;
        debug!(run_id = %run_id, "run loaded from cache");

        emit_progress(
            &mut progress_cb,
            mode,
            RunStage::Completed,
            started,
            Some("Loaded cached run".to_string()),
            None,
        );

        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            elapsed_wall_s: started.elapsed().as_secs_f64(),
        });
    }

    emit_progress(
        &mut progress_cb,
        mode,
        RunStage::Simulating,
        started,
        Some(format!("Simulating {ticks} ticks")),
        None,
    );

    let records = match mode {
        RunMode::Batch => run_batch(params, ticks, &mut progress_cb, started)?,
        RunMode::Realtime { period } => {
            run_realtime(params, ticks, period, &mut progress_cb, started)?
        }
    };

    emit_progress(
        &mut progress_cb,
        mode,
        RunStage::SavingResults,
        started,
        Some("Saving results".to_string()),
        None,
    );

    let manifest = RunManifest::new(
        run_id.clone(),
        &scenario.name,
        &scenario.fluid,
        &request.options.solver_version,
        &records,
    );
    store.save_run(&manifest, &records)?;

    info!(
        run_id = %run_id,
        ticks = manifest.ticks,
        final_tank_k = manifest.summary.final_tank_k.unwrap_or(f64::NAN),
        "run saved"
    );

    emit_progress(
        &mut progress_cb,
        mode,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
        None,
    );

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        elapsed_wall_s: started.elapsed().as_secs_f64(),
    })
}

fn tick_progress(snapshot: &TickSnapshot, total_ticks: u64) -> TickProgress {
    TickProgress {
        tick: snapshot.time_s,
        total_ticks,
        fraction_complete: (snapshot.time_s as f64 / total_ticks as f64).min(1.0),
        tank_k: snapshot.tank_k,
        panel_k: snapshot.panel_k,
        flow_mode: snapshot.flow_mode.clone(),
    }
}

/// Up-front capacity for a run's records; long runs grow as they go.
fn preallocation(ticks: u64) -> usize {
    ticks.min(PREALLOCATE_TICKS) as usize
}

/// Progress is reported roughly every percent of the run.
fn progress_stride(ticks: u64) -> u64 {
    (ticks / 100).max(1)
}

fn run_batch(
    params: SimulationParameters,
    ticks: u64,
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    started: Instant,
) -> AppResult<Vec<TickSnapshot>> {
    let mut sim = Simulation::new();
    sim.dispatch(Action::Start(params))?;

    let stride = progress_stride(ticks);
    let mut records = Vec::with_capacity(preallocation(ticks));
    for _ in 0..ticks {
        sim.dispatch(Action::Tick)?;
        let snapshot = TickSnapshot::from(sim.state());
        if snapshot.time_s % stride == 0 {
            emit_progress(
                progress_cb,
                RunMode::Batch,
                RunStage::Simulating,
                started,
                None,
                Some(tick_progress(&snapshot, ticks)),
            );
        }
        records.push(snapshot);
    }
    Ok(records)
}

/// Collects ticks `1..=ticks` from the engine's history, polling at half
/// the tick period. Progress is reported once per poll for the newest tick,
/// so a slow callback delays collection but never drops a tick. The run
/// fails if the poller falls a full history buffer behind.
fn run_realtime(
    params: SimulationParameters,
    ticks: u64,
    period: Duration,
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    started: Instant,
) -> AppResult<Vec<TickSnapshot>> {
    if period.is_zero() {
        return Err(AppError::InvalidInput(
            "tick period must be positive".to_string(),
        ));
    }

    let mode = RunMode::Realtime { period };
    let mut engine = Engine::with_period(period);
    engine.start(params)?;

    let poll = period / 2;
    let mut records = Vec::with_capacity(preallocation(ticks));
    let mut last_time = 0;
    while last_time < ticks {
        thread::sleep(poll);
        let running = engine.is_running();
        let fresh: Vec<TickSnapshot> = engine
            .history()
            .iter()
            .filter(|r| r.time > last_time && r.time <= ticks)
            .map(TickSnapshot::from)
            .collect();

        if let Some(first) = fresh.first() {
            if first.time_s != last_time + 1 {
                engine.pause();
                return Err(AppError::Simulation(format!(
                    "realtime run fell behind: ticks {}..{} left the history buffer",
                    last_time + 1,
                    first.time_s - 1
                )));
            }
        } else if !running {
            return Err(AppError::Simulation(format!(
                "engine stopped after {last_time} of {ticks} ticks"
            )));
        }

        let newest = fresh.last().map(|r| (r.time_s, tick_progress(r, ticks)));
        if let Some((time, tick)) = newest {
            last_time = time;
            records.extend(fresh);
            emit_progress(progress_cb, mode, RunStage::Simulating, started, None, Some(tick));
        }
    }
    engine.pause();
    Ok(records)
}

/// Stored runs for a scenario file, newest first.
pub fn list_runs(scenario_path: &Path) -> AppResult<Vec<RunManifest>> {
    let scenario = project_service::load_scenario(scenario_path)?;
    let store = RunStore::for_scenario(scenario_path)?;
    Ok(store.list_runs(Some(&scenario.name))?)
}

/// Load a specific run.
pub fn load_run(scenario_path: &Path, run_id: &str) -> AppResult<(RunManifest, Vec<TickSnapshot>)> {
    let store = RunStore::for_scenario(scenario_path)?;

    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;

    Ok((manifest, records))
}
