use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct ShellDiagnostics {
    pub(super) phase: String,
    pub(super) persona: Option<String>,
    pub(super) missing_optional_ids: Vec<String>,
    pub(super) last_error: Option<String>,
    pub(super) storage_degraded: bool,
    pub(super) timers_started: u64,
    pub(super) timers_fired: u64,
}
