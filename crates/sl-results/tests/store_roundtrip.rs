use sl_core::{Tolerances, nearly_equal};
use sl_project::from_parameters;
use sl_results::{ResultsError, RunManifest, RunStore, TickSnapshot, compute_run_id};
use sl_sim::{Action, Simulation, SimulationParameters};

fn temp_store(tag: &str) -> RunStore {
    let dir = std::env::temp_dir().join(format!("sl_results_{tag}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    RunStore::new(dir).unwrap()
}

fn simulate(ticks: u64) -> Vec<TickSnapshot> {
    let mut sim = Simulation::new();
    sim.dispatch(Action::Start(SimulationParameters::default())).unwrap();
    (0..ticks)
        .map(|_| {
            sim.dispatch(Action::Tick).unwrap();
            TickSnapshot::from(sim.state())
        })
        .collect()
}

#[test]
fn save_and_reload_run() {
    let store = temp_store("reload");
    let scenario = from_parameters("Rooftop", &SimulationParameters::default());
    let records = simulate(120);
    let run_id = compute_run_id(&scenario, 120, "0.1.0");
    let manifest =
        RunManifest::new(run_id.clone(), &scenario.name, &scenario.fluid, "0.1.0", &records);

    store.save_run(&manifest, &records).unwrap();
    assert!(store.has_run(&run_id));

    let loaded = store.load_manifest(&run_id).unwrap();
    assert_eq!(loaded.run_id, manifest.run_id);
    assert_eq!(loaded.timestamp, manifest.timestamp);
    assert_eq!(loaded.ticks, 120);
    let tol = Tolerances::default();
    assert!(nearly_equal(
        loaded.summary.energy_absorbed_j,
        manifest.summary.energy_absorbed_j,
        tol
    ));
    assert!(nearly_equal(
        loaded.summary.energy_lost_j,
        manifest.summary.energy_lost_j,
        tol
    ));

    let series = store.load_timeseries(&run_id).unwrap();
    assert_eq!(series.len(), 120);
    assert_eq!(series.first().map(|r| r.time_s), Some(1));
    assert!(series.last().unwrap().tank_k > series.first().unwrap().tank_k);
}

#[test]
fn list_filters_by_scenario() {
    let store = temp_store("list");
    let records = simulate(5);
    for name in ["Alpha", "Beta"] {
        let scenario = from_parameters(name, &SimulationParameters::default());
        let id = compute_run_id(&scenario, 5, "0.1.0");
        let manifest = RunManifest::new(id, name, "water", "0.1.0", &records);
        store.save_run(&manifest, &records).unwrap();
    }

    assert_eq!(store.list_runs(None).unwrap().len(), 2);
    let alpha = store.list_runs(Some("Alpha")).unwrap();
    assert_eq!(alpha.len(), 1);
    assert_eq!(alpha[0].scenario_name, "Alpha");
}

#[test]
fn missing_run_is_reported() {
    let store = temp_store("missing");
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
    store.delete_run("nope").unwrap();
}

#[test]
fn delete_removes_run() {
    let store = temp_store("delete");
    let records = simulate(3);
    let manifest = RunManifest::new("run-x".to_string(), "X", "water", "0.1.0", &records);
    store.save_run(&manifest, &records).unwrap();
    store.delete_run("run-x").unwrap();
    assert!(!store.has_run("run-x"));
}

#[test]
fn gapped_timeseries_is_refused() {
    let store = temp_store("gapped");
    let mut records = simulate(6);
    records.remove(2);
    let manifest = RunManifest::new("run-gap".to_string(), "G", "water", "0.1.0", &records);

    let err = store.save_run(&manifest, &records).unwrap_err();
    assert!(matches!(err, ResultsError::InconsistentRun { .. }));
    assert!(!store.has_run("run-gap"));
}

#[test]
fn short_timeseries_is_refused() {
    let store = temp_store("short");
    let records = simulate(4);
    let mut manifest = RunManifest::new("run-short".to_string(), "S", "water", "0.1.0", &records);
    manifest.ticks = 10;

    assert!(matches!(
        store.save_run(&manifest, &records),
        Err(ResultsError::InconsistentRun { .. })
    ));
}
