use super::super::reference::ReferenceData;
use super::super::request::DoseEntry;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DosageWarning {
    pub drug: String,
    pub daily_mg: f64,
    pub max_daily_mg: f64,
    pub unit: String,
    pub message: String,
}

/// Flags doses strictly above the stored daily maximum. Doses equal to the maximum
/// pass. Entries for drugs outside the request are still checked.
pub(crate) fn check_dosages(doses: &[DoseEntry], reference: &ReferenceData) -> Vec<DosageWarning> {
    let mut warnings = Vec::new();

    for entry in doses {
        let raw_name = entry.drug.trim();
        if raw_name.is_empty() {
            continue;
        }
        let Some(daily_mg) = entry.daily_mg else {
            debug!(drug = raw_name, "dose entry without a numeric daily dose skipped");
            continue;
        };

        let drug = reference.canonical_name(raw_name).unwrap_or(raw_name);
        let Some(limit) = reference.dosage_limit(drug) else {
            continue;
        };
        let Some(max_daily_mg) = limit.max_daily_mg else {
            continue;
        };

        if daily_mg > max_daily_mg {
            let unit = limit.unit_label();
            warnings.push(DosageWarning {
                drug: drug.to_string(),
                daily_mg,
                max_daily_mg,
                unit: unit.to_string(),
                message: format!(
                    "Daily dose {daily_mg} {unit} exceeds maximum {max_daily_mg} {unit} for {drug}."
                ),
            });
        }
    }

    warnings
}
