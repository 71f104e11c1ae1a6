//! Real-time driver: a [`Simulation`] advanced by a background [`Ticker`].
//!
//! Control calls and ticks serialize on one mutex, so a tick never
//! observes a half-applied start or reset. At most one ticker exists; it
//! is cancelled and joined before any state is replaced.

use crate::error::SimResult;
use crate::machine::{Action, RunPhase, Simulation};
use crate::params::SimulationParameters;
use crate::state::{SimulationState, TickRecord};
use crate::ticker::Ticker;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

/// Wall-clock time between ticks by default.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Consistent copy of everything a display needs.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub phase: RunPhase,
    pub state: SimulationState,
    pub history: Vec<TickRecord>,
    pub parameters: Option<SimulationParameters>,
}

pub struct Engine {
    sim: Arc<Mutex<Simulation>>,
    ticker: Option<Ticker>,
    period: Duration,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(sim: &Mutex<Simulation>) -> MutexGuard<'_, Simulation> {
    // A panicked tick leaves the last complete snapshot behind.
    sim.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Engine {
    pub fn new() -> Self {
        Self::with_period(DEFAULT_TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            sim: Arc::new(Mutex::new(Simulation::new())),
            ticker: None,
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Validate `params` and begin a fresh run.
    ///
    /// On error the engine is left exactly as it was, including any run in
    /// progress.
    pub fn start(&mut self, params: SimulationParameters) -> SimResult<()> {
        let next = match lock(&self.sim).reduce(Action::Start(params)) {
            Ok(next) => next,
            Err(err) => {
                warn!(error = %err, "start rejected");
                return Err(err);
            }
        };

        self.stop_ticker();
        *lock(&self.sim) = next;
        self.spawn_ticker();
        info!(period_ms = self.period.as_millis() as u64, "simulation started");
        Ok(())
    }

    pub fn pause(&mut self) {
        self.stop_ticker();
        self.apply(Action::Pause);
        info!("simulation paused");
    }

    /// Continue a paused run; no-op in any other phase.
    pub fn resume(&mut self) {
        self.apply(Action::Resume);
        if self.phase() == RunPhase::Running && self.ticker.is_none() {
            self.spawn_ticker();
            info!("simulation resumed");
        }
    }

    pub fn reset(&mut self) {
        self.stop_ticker();
        self.apply(Action::Reset);
        info!("simulation reset");
    }

    /// Advance one tick by hand; ignored unless running.
    pub fn step(&self) {
        self.apply(Action::Tick);
    }

    pub fn phase(&self) -> RunPhase {
        lock(&self.sim).phase()
    }

    pub fn is_running(&self) -> bool {
        self.phase() == RunPhase::Running
    }

    pub fn state(&self) -> SimulationState {
        *lock(&self.sim).state()
    }

    /// Oldest first, at most the history capacity.
    pub fn history(&self) -> Vec<TickRecord> {
        lock(&self.sim).history().to_vec()
    }

    pub fn latest(&self) -> Option<TickRecord> {
        lock(&self.sim).latest().copied()
    }

    pub fn parameters(&self) -> Option<SimulationParameters> {
        lock(&self.sim).parameters().cloned()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let sim = lock(&self.sim);
        EngineSnapshot {
            phase: sim.phase(),
            state: *sim.state(),
            history: sim.history().to_vec(),
            parameters: sim.parameters().cloned(),
        }
    }

    fn apply(&self, action: Action) {
        if let Err(err) = lock(&self.sim).dispatch(action) {
            warn!(error = %err, "action rejected");
        }
    }

    fn spawn_ticker(&mut self) {
        let sim = Arc::clone(&self.sim);
        self.ticker = Some(Ticker::spawn(self.period, move |token| {
            let mut guard = lock(&sim);
            // Cancelled while waiting for the lock.
            if token.is_cancelled() {
                return;
            }
            if let Err(err) = guard.dispatch(Action::Tick) {
                warn!(error = %err, "tick failed");
            }
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
