use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use sl_app::{
    AppError, AppResult, RunMode, RunOptions, RunProgressEvent, RunRequest, RunStage,
    project_service, run_service,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SolarLoop CLI - solar thermal loop simulator", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file
    Validate {
        /// Path to the scenario file (.yaml or .json)
        scenario_path: PathBuf,
    },
    /// List the heat-transfer fluid catalog
    Fluids {
        /// Only show fluids whose id, name or alias contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Write a scenario holding the reference parameters
    Init {
        /// Output path (.yaml or .json)
        scenario_path: PathBuf,
        /// Scenario name
        #[arg(long, default_value = "Rooftop loop")]
        name: String,
    },
    /// Run a scenario and store the results next to it
    Run {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Number of one-second ticks (defaults to the scenario's run.ticks)
        #[arg(long)]
        ticks: Option<u64>,
        /// Drive ticks on a wall-clock timer instead of as fast as possible
        #[arg(long)]
        realtime: bool,
        /// Tick period for --realtime, in milliseconds
        #[arg(long)]
        period_ms: Option<u64>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List stored runs for a scenario
    Runs {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Show details of a stored run
    ShowRun {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export a run's time series as CSV
    ExportSeries {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: logging disabled: {err}");
    }

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Fluids { filter } => cmd_fluids(filter.as_deref()),
        Commands::Init {
            scenario_path,
            name,
        } => cmd_init(&scenario_path, &name),
        Commands::Run {
            scenario_path,
            ticks,
            realtime,
            period_ms,
            no_cache,
        } => cmd_run(&scenario_path, ticks, realtime, period_ms, !no_cache),
        Commands::Runs { scenario_path } => cmd_runs(&scenario_path),
        Commands::ShowRun {
            scenario_path,
            run_id,
        } => cmd_show_run(&scenario_path, &run_id),
        Commands::ExportSeries {
            scenario_path,
            run_id,
            output,
        } => cmd_export_series(&scenario_path, &run_id, output.as_deref()),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = project_service::load_scenario(scenario_path)?;
    let params = project_service::scenario_parameters(&scenario)?;
    println!("✓ Scenario '{}' is valid", scenario.name);
    println!("  Fluid: {}", params.fluid);
    println!("  Passive flow model: {:?}", params.passive_flow_model);
    for warning in project_service::liquid_range_warnings(&params) {
        println!("  warning: {warning}");
    }
    Ok(())
}

fn cmd_fluids(filter: Option<&str>) -> AppResult<()> {
    let entries = project_service::list_fluids(filter);
    if entries.is_empty() {
        println!("No fluids match");
        return Ok(());
    }

    println!(
        "{:<20} {:<24} {:>10} {:>12} {:>10}",
        "id", "name", "rho kg/m3", "cp J/(kg K)", "mu mPa s"
    );
    for entry in entries {
        let p = entry.properties;
        println!(
            "{:<20} {:<24} {:>10.1} {:>12.1} {:>10.3}",
            entry.canonical_id,
            entry.display_name,
            p.density_kg_m3,
            p.specific_heat_j_kg_k,
            p.viscosity_pa_s * 1.0e3
        );
    }
    Ok(())
}

fn cmd_init(scenario_path: &Path, name: &str) -> AppResult<()> {
    if scenario_path.exists() {
        return Err(AppError::InvalidInput(format!(
            "{} already exists",
            scenario_path.display()
        )));
    }
    let scenario = project_service::default_scenario(name);
    project_service::save_scenario(scenario_path, &scenario)?;
    println!("✓ Wrote {}", scenario_path.display());
    Ok(())
}

fn cmd_run(
    scenario_path: &Path,
    ticks: Option<u64>,
    realtime: bool,
    period_ms: Option<u64>,
    use_cache: bool,
) -> AppResult<()> {
    let mode = if realtime {
        let period_ms = match period_ms {
            Some(ms) => ms,
            None => project_service::load_scenario(scenario_path)?
                .run
                .and_then(|r| r.period_ms)
                .unwrap_or(1000),
        };
        RunMode::Realtime {
            period: Duration::from_millis(period_ms),
        }
    } else {
        RunMode::Batch
    };

    let request = RunRequest {
        scenario_path,
        ticks,
        mode,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_stage = RunStage::LoadingScenario;
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event| {
            let emit_now = event.stage != last_stage
                || (event.tick.is_some() && last_emit.elapsed().as_millis() >= 100)
                || matches!(request.mode, RunMode::Realtime { .. });
            if emit_now {
                render_cli_progress(&event);
                last_stage = event.stage;
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }
    println!("  Wall time: {:.3}s", response.elapsed_wall_s);
    print_manifest(&response.manifest);
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match &event.tick {
        Some(t) => {
            let width = 28usize;
            let filled = ((t.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  t={}/{}s  tank={:.2}K  panel={:.2}K  flow={}  elapsed={:.1}s",
                bar,
                t.fraction_complete * 100.0,
                t.tick,
                t.total_ticks,
                t.tank_k,
                t.panel_k,
                t.flow_mode,
                event.elapsed_wall_s
            );
        }
        None => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
        }
    }
    let _ = io::stdout().flush();
}

fn print_manifest(manifest: &sl_app::RunManifest) {
    let s = &manifest.summary;
    let kelvin = |t: Option<f64>| t.map_or_else(|| "-".to_string(), |k| format!("{k:.2} K"));
    println!("  Scenario: {} ({})", manifest.scenario_name, manifest.fluid);
    println!("  Ticks: {}", manifest.ticks);
    println!("  Tank: {} -> {}", kelvin(s.initial_tank_k), kelvin(s.final_tank_k));
    println!(
        "  Panel: final {}, peak {}",
        kelvin(s.final_panel_k),
        kelvin(s.peak_panel_k)
    );
    println!("  Absorbed: {:.1} kJ", s.energy_absorbed_j / 1.0e3);
    println!("  Lost:     {:.1} kJ", s.energy_lost_j / 1.0e3);
}

fn cmd_runs(scenario_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(scenario_path)?;

    if runs.is_empty() {
        println!("No stored runs for {}", scenario_path.display());
    } else {
        println!("Stored runs for {}:", scenario_path.display());
        for manifest in runs {
            println!(
                "  {} ({}, {} ticks)",
                manifest.run_id, manifest.timestamp, manifest.ticks
            );
        }
    }
    Ok(())
}

fn cmd_show_run(scenario_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, records) = run_service::load_run(scenario_path, run_id)?;

    println!("\nRun Summary:");
    println!("  Created: {}", manifest.timestamp);
    println!("  Solver version: {}", manifest.solver_version);
    print_manifest(&manifest);
    println!("  Records: {}", records.len());
    if let Some(last) = records.last() {
        println!("  Final flow: {:.3} L/min ({})", last.flow_lpm, last.flow_mode);
    }
    Ok(())
}

fn cmd_export_series(scenario_path: &Path, run_id: &str, output: Option<&Path>) -> AppResult<()> {
    let (_manifest, records) = run_service::load_run(scenario_path, run_id)?;

    let mut csv = String::from("time_s,tank_k,panel_k,heat_input_w,heat_loss_w,flow_lpm,flow_mode\n");
    for r in &records {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            r.time_s, r.tank_k, r.panel_k, r.heat_input_w, r.heat_loss_w, r.flow_lpm, r.flow_mode
        ));
    }

    match output {
        Some(path) => {
            std::fs::write(path, csv)?;
            println!("✓ Exported {} records to {}", records.len(), path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}
