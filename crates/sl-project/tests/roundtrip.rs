use sl_project::schema::*;
use sl_project::{
    LATEST_VERSION, MAX_RUN_TICKS, ProjectError, ValidationError, load, load_json, load_yaml,
    save_json, save_yaml, to_parameters, validate_scenario,
};

fn rooftop() -> Scenario {
    Scenario {
        version: LATEST_VERSION,
        name: "Rooftop loop".to_string(),
        description: Some("South-facing roof, tank in the attic".to_string()),
        fluid: "water".to_string(),
        conditions: ConditionsDef {
            irradiance: "1000 W/m2".to_string(),
            efficiency: "0.8".to_string(),
            ambient_temperature: "70 F".to_string(),
            pump_flow_rate: "1 L/min".to_string(),
            tank_volume: "200 L".to_string(),
            initial_tank_temperature: "68 F".to_string(),
            panel_area: "2 m2".to_string(),
            elevation_difference: "10 m".to_string(),
        },
        site: None,
        collector: None,
        pipe: Some(PipeDef {
            length_m: 12.0,
            diameter_m: 0.022,
            roughness_m: 1.5e-6,
            k_minor: 4.0,
        }),
        passive_flow_model: PassiveFlowModelDef::Thermosiphon,
        run: Some(RunDef {
            ticks: 600,
            period_ms: None,
        }),
    }
}

#[test]
fn roundtrip_yaml() {
    let scenario = rooftop();
    validate_scenario(&scenario).unwrap();

    let path = std::env::temp_dir().join("sl_project_roundtrip.yaml");
    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json() {
    let scenario = rooftop();
    let path = std::env::temp_dir().join("sl_project_roundtrip.json");
    save_json(&path, &scenario).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(scenario, loaded);
    assert_eq!(load_json(&path).unwrap(), loaded);
}

#[test]
fn save_refuses_invalid_scenario() {
    let mut scenario = rooftop();
    scenario.conditions.efficiency = "1.5".to_string();
    let path = std::env::temp_dir().join("sl_project_invalid.yaml");
    let err = save_yaml(&path, &scenario).unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::Parameter(_))
    ));
}

#[test]
fn version_zero_migrates_to_linear_passive_model() {
    let yaml = r#"
version: 0
name: Legacy
fluid: water
conditions:
  irradiance: "800"
  efficiency: "0.7"
  ambient_temperature: "20 C"
  pump_flow_rate: "0"
  tank_volume: "150"
  initial_tank_temperature: "18 C"
  panel_area: "2"
  elevation_difference: "1.5"
"#;
    let path = std::env::temp_dir().join("sl_project_legacy.yml");
    std::fs::write(&path, yaml).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(loaded.version, LATEST_VERSION);
    assert_eq!(loaded.passive_flow_model, PassiveFlowModelDef::Linear);
}

#[test]
fn missing_passive_model_defaults_to_thermosiphon() {
    let yaml = r#"
version: 1
name: Minimal
fluid: ethylene glycol
conditions:
  irradiance: "0.6 kW/m2"
  efficiency: "65%"
  ambient_temperature: "5 C"
  pump_flow_rate: "0.5 gpm"
  tank_volume: "80 gal"
  initial_tank_temperature: "40 C"
  panel_area: "30 ft2"
  elevation_difference: "-3 ft"
"#;
    let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(scenario.passive_flow_model, PassiveFlowModelDef::Thermosiphon);
    validate_scenario(&scenario).unwrap();
    let params = to_parameters(&scenario).unwrap();
    assert!((params.efficiency - 0.65).abs() < 1e-12);
}

#[test]
fn run_length_is_bounded() {
    let mut scenario = rooftop();
    scenario.run = Some(RunDef {
        ticks: MAX_RUN_TICKS,
        period_ms: None,
    });
    validate_scenario(&scenario).unwrap();

    scenario.run = Some(RunDef {
        ticks: u64::MAX,
        period_ms: None,
    });
    let err = validate_scenario(&scenario).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidValue { ref field, .. } if field == "run.ticks"
    ));
}

#[test]
fn future_version_is_rejected() {
    let mut scenario = rooftop();
    scenario.version = LATEST_VERSION + 1;
    assert!(matches!(
        validate_scenario(&scenario),
        Err(ValidationError::UnsupportedVersion { .. })
    ));
}

#[test]
fn unknown_extension_is_rejected() {
    let path = std::env::temp_dir().join("sl_project_scenario.toml");
    assert!(matches!(
        load(&path),
        Err(ProjectError::UnsupportedFormat(_))
    ));
}
