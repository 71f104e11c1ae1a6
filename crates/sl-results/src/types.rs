//! Result data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sl_core::units::{to_k, to_lpm, to_w};
use sl_sim::{SimulationState, TICK_SECONDS, TickRecord};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub fluid: String,
    pub timestamp: String,
    pub ticks: u64,
    pub solver_version: String,
    pub summary: RunSummary,
}

impl RunManifest {
    pub fn new(
        run_id: RunId,
        scenario_name: &str,
        fluid: &str,
        solver_version: &str,
        records: &[TickSnapshot],
    ) -> Self {
        Self {
            run_id,
            scenario_name: scenario_name.to_string(),
            fluid: fluid.to_string(),
            timestamp: now_rfc3339(),
            ticks: records.last().map(|r| r.time_s).unwrap_or(0),
            solver_version: solver_version.to_string(),
            summary: RunSummary::from_records(records),
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Headline numbers for a finished run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub initial_tank_k: Option<f64>,
    pub final_tank_k: Option<f64>,
    pub final_panel_k: Option<f64>,
    pub peak_panel_k: Option<f64>,
    /// Absorbed solar energy over the run (J)
    pub energy_absorbed_j: f64,
    /// Convective loss over the run (J)
    pub energy_lost_j: f64,
}

impl RunSummary {
    pub fn from_records(records: &[TickSnapshot]) -> Self {
        let peak_panel_k = records
            .iter()
            .map(|r| r.panel_k)
            .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))));

        Self {
            initial_tank_k: records.first().map(|r| r.tank_k),
            final_tank_k: records.last().map(|r| r.tank_k),
            final_panel_k: records.last().map(|r| r.panel_k),
            peak_panel_k,
            energy_absorbed_j: records.iter().map(|r| r.heat_input_w * TICK_SECONDS).sum(),
            energy_lost_j: records.iter().map(|r| r.heat_loss_w * TICK_SECONDS).sum(),
        }
    }
}

/// One line of `timeseries.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickSnapshot {
    pub time_s: u64,
    pub tank_k: f64,
    pub panel_k: f64,
    pub heat_input_w: f64,
    pub heat_loss_w: f64,
    pub flow_lpm: f64,
    pub flow_mode: String,
}

impl From<&SimulationState> for TickSnapshot {
    fn from(state: &SimulationState) -> Self {
        Self {
            time_s: state.time,
            tank_k: to_k(state.tank_temperature),
            panel_k: to_k(state.panel_temperature),
            heat_input_w: to_w(state.heat_input),
            heat_loss_w: to_w(state.heat_loss),
            flow_lpm: to_lpm(state.flow_rate),
            flow_mode: state.flow_mode.label().to_string(),
        }
    }
}

impl From<&TickRecord> for TickSnapshot {
    fn from(record: &TickRecord) -> Self {
        Self {
            time_s: record.time,
            tank_k: to_k(record.tank_temperature),
            panel_k: to_k(record.panel_temperature),
            heat_input_w: to_w(record.heat_input),
            heat_loss_w: to_w(record.heat_loss),
            flow_lpm: to_lpm(record.flow_rate),
            flow_mode: record.flow_mode.label().to_string(),
        }
    }
}
