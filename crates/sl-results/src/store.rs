//! Run storage API.
//!
//! Layout: `<root>/<run_id>/manifest.json` plus one JSON object per tick
//! in `<root>/<run_id>/timeseries.jsonl`. A stored timeseries always
//! holds ticks `1..=manifest.ticks` in order.

use crate::types::{RunManifest, TickSnapshot};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

fn check_contiguous(manifest: &RunManifest, records: &[TickSnapshot]) -> ResultsResult<()> {
    let inconsistent = |message: String| ResultsError::InconsistentRun {
        run_id: manifest.run_id.clone(),
        message,
    };

    if records.len() as u64 != manifest.ticks {
        return Err(inconsistent(format!(
            "manifest names {} ticks but {} were recorded",
            manifest.ticks,
            records.len()
        )));
    }
    if let Some((expected, record)) = (1u64..)
        .zip(records)
        .find(|(expected, record)| record.time_s != *expected)
    {
        return Err(inconsistent(format!(
            "expected tick {expected}, found tick {}",
            record.time_s
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store kept next to a scenario file, under `.solarloop/runs`.
    pub fn for_scenario(scenario_path: &Path) -> ResultsResult<Self> {
        let scenario_dir = scenario_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "scenario path has no parent directory".to_string(),
            })?;
        Self::new(scenario_dir.join(".solarloop").join("runs"))
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, records: &[TickSnapshot]) -> ResultsResult<()> {
        check_contiguous(manifest, records)?;
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;

        let mut timeseries = String::new();
        for record in records {
            timeseries.push_str(&serde_json::to_string(record)?);
            timeseries.push('\n');
        }
        fs::write(run_dir.join("timeseries.jsonl"), timeseries)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");
        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<TickSnapshot>> {
        let timeseries_path = self.run_dir(run_id).join("timeseries.jsonl");
        if !timeseries_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(timeseries_path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(ResultsError::from))
            .collect()
    }

    /// All stored runs, newest first; optionally only those of one scenario.
    pub fn list_runs(&self, scenario_name: Option<&str>) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();
        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().to_string();
            if let Ok(manifest) = self.load_manifest(&run_id)
                && scenario_name.is_none_or(|name| manifest.scenario_name == name)
            {
                runs.push(manifest);
            }
        }

        runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
