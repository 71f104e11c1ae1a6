//! Run lifecycle as a pure reducer over actions.
//!
//! ```text
//!            Start            Pause
//!   Idle ───────────▶ Running ──────▶ Paused
//!    ▲                  ▲  │ ◀────────  │
//!    │                  └──┘  Resume    │
//!    └──────────────── Reset ◀──────────┘
//! ```
//!
//! `Start` from any phase discards the previous run. `Tick` only advances
//! a running simulation; in every other phase it is a no-op.

use crate::error::SimResult;
use crate::history::HistoryBuffer;
use crate::integrator::TickIntegrator;
use crate::params::SimulationParameters;
use crate::state::{SimulationState, TickRecord};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Start(SimulationParameters),
    Pause,
    Resume,
    Reset,
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

impl RunPhase {
    pub fn label(self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::Running => "running",
            RunPhase::Paused => "paused",
        }
    }
}

/// Complete simulation snapshot: phase, parameters, state and history.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    phase: RunPhase,
    params: Option<SimulationParameters>,
    integrator: Option<TickIntegrator>,
    state: SimulationState,
    history: HistoryBuffer,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn parameters(&self) -> Option<&SimulationParameters> {
        self.params.as_ref()
    }

    pub fn latest(&self) -> Option<&TickRecord> {
        self.history.latest()
    }

    /// Next snapshot after `action`; `self` is left untouched.
    ///
    /// Only `Start` can fail, and only on invalid parameters.
    pub fn reduce(&self, action: Action) -> SimResult<Simulation> {
        let mut next = self.clone();
        match action {
            Action::Start(params) => {
                params.validate()?;
                next = Self::started(params);
            }
            Action::Pause => {
                if next.phase == RunPhase::Running {
                    next.phase = RunPhase::Paused;
                    next.state.running = false;
                }
            }
            Action::Resume => {
                if next.phase == RunPhase::Paused {
                    next.phase = RunPhase::Running;
                    next.state.running = true;
                }
            }
            Action::Reset => {
                next = Self::reset_from(self.params.clone());
            }
            Action::Tick => next.advance(),
        }
        Ok(next)
    }

    /// Apply `action` in place; on error nothing changes.
    pub fn dispatch(&mut self, action: Action) -> SimResult<()> {
        *self = self.reduce(action)?;
        Ok(())
    }

    fn started(params: SimulationParameters) -> Self {
        let mut state = SimulationState::initial(&params);
        state.running = true;
        Self {
            phase: RunPhase::Running,
            integrator: Some(TickIntegrator::new(&params)),
            params: Some(params),
            state,
            history: HistoryBuffer::default(),
        }
    }

    fn reset_from(params: Option<SimulationParameters>) -> Self {
        match params {
            Some(params) => Self {
                state: SimulationState::initial(&params),
                integrator: Some(TickIntegrator::new(&params)),
                params: Some(params),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    fn advance(&mut self) {
        if self.phase != RunPhase::Running {
            return;
        }
        let Some(integrator) = self.integrator.as_ref() else {
            return;
        };
        let outcome = integrator.step(&self.state);
        self.state = outcome.state;
        self.history.push(self.state.record());
        debug!(
            time = self.state.time,
            mode = self.state.flow_mode.label(),
            "simulation advanced"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::history::HISTORY_CAPACITY;
    use sl_core::units::m2;

    fn running() -> Simulation {
        Simulation::new()
            .reduce(Action::Start(SimulationParameters::default()))
            .unwrap()
    }

    #[test]
    fn fresh_simulation_is_idle_at_rest() {
        let sim = Simulation::new();
        assert_eq!(sim.phase(), RunPhase::Idle);
        assert_eq!(*sim.state(), SimulationState::at_rest());
        assert!(sim.history().is_empty());
        assert!(sim.parameters().is_none());
    }

    #[test]
    fn start_seeds_state_and_clears_history() {
        let mut sim = running();
        sim.dispatch(Action::Tick).unwrap();
        sim.dispatch(Action::Start(SimulationParameters::default())).unwrap();

        assert_eq!(sim.phase(), RunPhase::Running);
        assert!(sim.state().running);
        assert_eq!(sim.state().time, 0);
        assert!(sim.history().is_empty());
    }

    #[test]
    fn invalid_start_leaves_snapshot_unchanged() {
        let mut sim = running();
        sim.dispatch(Action::Tick).unwrap();
        let before = *sim.state();

        let bad = SimulationParameters {
            panel_area: m2(-1.0),
            ..Default::default()
        };
        let err = sim.dispatch(Action::Start(bad)).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter { .. }));
        assert_eq!(*sim.state(), before);
        assert_eq!(sim.phase(), RunPhase::Running);
    }

    #[test]
    fn tick_only_advances_while_running() {
        let idle = Simulation::new().reduce(Action::Tick).unwrap();
        assert_eq!(idle.state().time, 0);

        let mut sim = running();
        sim.dispatch(Action::Tick).unwrap();
        assert_eq!(sim.state().time, 1);
        assert_eq!(sim.history().len(), 1);

        sim.dispatch(Action::Pause).unwrap();
        sim.dispatch(Action::Tick).unwrap();
        assert_eq!(sim.state().time, 1);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut sim = running();
        sim.dispatch(Action::Tick).unwrap();
        let once = sim.reduce(Action::Pause).unwrap();
        let twice = once.reduce(Action::Pause).unwrap();
        assert_eq!(once.phase(), RunPhase::Paused);
        assert_eq!(twice.phase(), RunPhase::Paused);
        assert_eq!(once.state(), twice.state());
        assert!(!twice.state().running);
    }

    #[test]
    fn resume_continues_from_paused_state() {
        let mut sim = running();
        sim.dispatch(Action::Tick).unwrap();
        sim.dispatch(Action::Pause).unwrap();
        sim.dispatch(Action::Resume).unwrap();
        assert_eq!(sim.phase(), RunPhase::Running);
        sim.dispatch(Action::Tick).unwrap();
        assert_eq!(sim.state().time, 2);
    }

    #[test]
    fn resume_does_not_start_an_idle_simulation() {
        let sim = Simulation::new().reduce(Action::Resume).unwrap();
        assert_eq!(sim.phase(), RunPhase::Idle);
    }

    #[test]
    fn reset_restores_initial_state() {
        let params = SimulationParameters::default();
        let mut sim = running();
        for _ in 0..5 {
            sim.dispatch(Action::Tick).unwrap();
        }
        sim.dispatch(Action::Reset).unwrap();

        assert_eq!(sim.phase(), RunPhase::Idle);
        assert_eq!(*sim.state(), SimulationState::initial(&params));
        assert!(sim.history().is_empty());
        assert_eq!(sim.parameters(), Some(&params));

        // Ticks after a reset are ignored until the next start.
        sim.dispatch(Action::Tick).unwrap();
        assert_eq!(sim.state().time, 0);
    }

    #[test]
    fn reset_without_run_returns_to_rest() {
        let sim = Simulation::new().reduce(Action::Reset).unwrap();
        assert_eq!(*sim.state(), SimulationState::at_rest());
    }

    #[test]
    fn history_keeps_last_fifty_of_sixty() {
        let mut sim = running();
        for _ in 0..60 {
            sim.dispatch(Action::Tick).unwrap();
        }
        let times: Vec<u64> = sim.history().iter().map(|r| r.time).collect();
        assert_eq!(times.len(), HISTORY_CAPACITY);
        assert_eq!(times.first(), Some(&11));
        assert_eq!(times.last(), Some(&60));
        assert_eq!(sim.latest().map(|r| r.time), Some(60));
    }

    #[test]
    fn reduce_does_not_mutate_source() {
        let sim = running();
        let _ = sim.reduce(Action::Tick).unwrap();
        assert_eq!(sim.state().time, 0);
    }
}
