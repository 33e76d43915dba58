use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use process_matcher::error::AppError;
use process_matcher::workflows::staffing::{
    CommunicationLevel, Potential, ProcessCatalog, ProcessTableImporter,
};
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Process table bundled with the binary for demos and an empty configuration.
pub(crate) const SAMPLE_PROCESSES: &str =
    include_str!("../../../crates/process-matcher/data/sample_processes.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read the catalog from `path`, or fall back to the bundled sample table.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<ProcessCatalog, AppError> {
    let catalog = match path {
        Some(path) => ProcessTableImporter::from_path(path)?,
        None => ProcessTableImporter::from_reader(Cursor::new(SAMPLE_PROCESSES))?,
    };
    Ok(catalog)
}

pub(crate) fn parse_potential(raw: &str) -> Result<Potential, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

pub(crate) fn parse_communication(raw: &str) -> Result<CommunicationLevel, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
