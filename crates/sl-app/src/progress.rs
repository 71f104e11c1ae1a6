use crate::run_service::RunMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingScenario,
    CheckingCache,
    LoadingCachedResult,
    Simulating,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(self) -> &'static str {
        match self {
            RunStage::LoadingScenario => "loading-scenario",
            RunStage::CheckingCache => "checking-cache",
            RunStage::LoadingCachedResult => "loading-cache",
            RunStage::Simulating => "simulating",
            RunStage::SavingResults => "saving",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TickProgress {
    pub tick: u64,
    pub total_ticks: u64,
    pub fraction_complete: f64,
    pub tank_k: f64,
    pub panel_k: f64,
    pub flow_mode: String,
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub mode: RunMode,
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub tick: Option<TickProgress>,
}

impl RunProgressEvent {
    pub fn stage(
        mode: RunMode,
        stage: RunStage,
        elapsed_wall_s: f64,
        message: Option<String>,
    ) -> Self {
        Self {
            mode,
            stage,
            elapsed_wall_s,
            message,
            tick: None,
        }
    }
}
