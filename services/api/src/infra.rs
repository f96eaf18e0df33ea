use medisync::config::AppConfig;
use medisync::error::AppError;
use medisync::interactions::{DoseEntry, ReferenceData};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Parses `DRUG=MG` (e.g. `Ibuprofen=4000`) into a dose entry.
pub(crate) fn parse_dose(raw: &str) -> Result<DoseEntry, String> {
    let (drug, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DRUG=MG, got '{raw}'"))?;

    let drug = drug.trim();
    if drug.is_empty() {
        return Err(format!("missing drug name in '{raw}'"));
    }

    let daily_mg = amount
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| format!("'{}' is not a valid daily dose in mg", amount.trim()))?;

    Ok(DoseEntry::new(drug, daily_mg))
}

/// Loads the reference tables from `data_dir`, falling back to `MEDISYNC_DATA_DIR`.
pub(crate) fn load_reference(data_dir: Option<PathBuf>) -> Result<ReferenceData, AppError> {
    let config = AppConfig::load()?;
    medisync::telemetry::try_init_quiet(&config.telemetry)?;

    let dir = data_dir.unwrap_or(config.data.dir);
    Ok(ReferenceData::load_from_dir(dir)?)
}
