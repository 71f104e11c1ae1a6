//! Content-based hashing for run IDs.

use sha2::{Digest, Sha256};
use sl_project::schema::Scenario;

/// Identical scenario, tick count and solver version hash to the same id.
pub fn compute_run_id(scenario: &Scenario, ticks: u64, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let scenario_json = serde_json::to_string(scenario).unwrap_or_default();
    hasher.update(scenario_json.as_bytes());
    hasher.update(ticks.to_le_bytes());
    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_project::from_parameters;
    use sl_sim::SimulationParameters;

    fn scenario(name: &str) -> Scenario {
        from_parameters(name, &SimulationParameters::default())
    }

    #[test]
    fn hash_stability() {
        let s = scenario("Test");
        assert_eq!(compute_run_id(&s, 60, "v1"), compute_run_id(&s, 60, "v1"));
        assert_eq!(compute_run_id(&s, 60, "v1").len(), 64);
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let a = scenario("A");
        let b = scenario("B");
        assert_ne!(compute_run_id(&a, 60, "v1"), compute_run_id(&b, 60, "v1"));
        assert_ne!(compute_run_id(&a, 60, "v1"), compute_run_id(&a, 61, "v1"));
        assert_ne!(compute_run_id(&a, 60, "v1"), compute_run_id(&a, 60, "v2"));
    }
}
