//! Read-only reference tables shared by every check.
//!
//! Loaded once at startup and handed to [`crate::interactions::check_interactions`]
//! explicitly; nothing mutates them afterwards.

mod tables;

pub use tables::{
    ContraindicationTable, DosageLimit, DosageLimitTable, InteractionEntry, InteractionTable,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const INTERACTIONS_FILE: &str = "drug_interactions.json";
pub const DOSAGE_LIMITS_FILE: &str = "drug_dosage_limits.json";
pub const CONTRAINDICATIONS_FILE: &str = "drug_contraindications.json";

#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("interaction data not found at {path}; run `medisync-api import-dataset` first")]
    MissingInteractions { path: PathBuf },
    #[error("failed to read reference data {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid reference data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Metadata returned by the drug lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugInfo {
    pub name: String,
    pub in_database: bool,
    pub interaction_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    interactions: InteractionTable,
    dosage_limits: DosageLimitTable,
    contraindications: ContraindicationTable,
    canonical_by_lower: HashMap<String, String>,
    partner_counts: HashMap<String, usize>,
}

impl ReferenceData {
    pub fn from_tables(
        interactions: InteractionTable,
        dosage_limits: DosageLimitTable,
        contraindications: ContraindicationTable,
    ) -> Self {
        let mut canonical_by_lower = HashMap::new();
        for name in interactions.drug_names() {
            canonical_by_lower
                .entry(name.to_lowercase())
                .or_insert_with(|| name.to_string());
        }
        let partner_counts = interactions.partner_counts();

        Self {
            interactions,
            dosage_limits,
            contraindications,
            canonical_by_lower,
            partner_counts,
        }
    }

    /// Loads the three tables from `dir`. The interaction table is required; the dosage
    /// and contraindication tables are optional and degrade to empty tables when they
    /// are missing or unreadable.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        let dir = dir.as_ref();

        let interactions_path = dir.join(INTERACTIONS_FILE);
        if !interactions_path.exists() {
            return Err(ReferenceDataError::MissingInteractions {
                path: interactions_path,
            });
        }
        let interactions: InteractionTable = read_json(&interactions_path)?;
        let dosage_limits =
            tables::dosage_limits_from_json(read_optional_json(&dir.join(DOSAGE_LIMITS_FILE)));
        let contraindications = tables::contraindications_from_json(read_optional_json(
            &dir.join(CONTRAINDICATIONS_FILE),
        ));

        let data = Self::from_tables(interactions, dosage_limits, contraindications);
        info!(
            dir = %dir.display(),
            drugs = data.drug_count(),
            interactions = data.interactions.len(),
            dosage_limits = data.dosage_limits.len(),
            contraindications = data.contraindications.len(),
            "reference data loaded"
        );
        Ok(data)
    }

    /// Parses an interaction table from any reader, with empty auxiliary tables.
    pub fn interactions_from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        let interactions: InteractionTable = serde_json::from_reader(reader)?;
        Ok(Self::from_tables(
            interactions,
            DosageLimitTable::new(),
            ContraindicationTable::new(),
        ))
    }

    /// Case-insensitive resolution of a raw drug name to its canonical spelling.
    pub fn canonical_name(&self, raw: &str) -> Option<&str> {
        self.canonical_by_lower
            .get(&raw.trim().to_lowercase())
            .map(String::as_str)
    }

    pub fn interaction(&self, a: &str, b: &str) -> Option<&InteractionEntry> {
        self.interactions.lookup(a, b)
    }

    pub fn dosage_limit(&self, canonical: &str) -> Option<&DosageLimit> {
        self.dosage_limits.get(canonical)
    }

    pub fn contraindications_for(&self, canonical: &str) -> Option<&BTreeMap<String, String>> {
        self.contraindications.get(canonical)
    }

    pub fn drug_info(&self, raw: &str) -> Option<DrugInfo> {
        let name = self.canonical_name(raw)?;
        Some(DrugInfo {
            name: name.to_string(),
            in_database: true,
            interaction_count: self.partner_counts.get(name).copied().unwrap_or(0),
        })
    }

    pub fn drug_count(&self) -> usize {
        self.canonical_by_lower.len()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ReferenceDataError> {
    let file = std::fs::File::open(path).map_err(|source| ReferenceDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
        ReferenceDataError::Json {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn read_optional_json<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        info!(path = %path.display(), "optional reference table missing, checks skipped");
        return T::default();
    }

    match read_json(path) {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "could not load optional reference table");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactions::domain::Severity;

    fn sample() -> ReferenceData {
        let mut interactions = InteractionTable::new();
        interactions.insert(
            "Aspirin",
            "Warfarin",
            InteractionEntry::new(Severity::Severe, "Major bleeding risk"),
        );
        interactions.insert(
            "Ibuprofen",
            "Aspirin",
            InteractionEntry::new(Severity::Mild, "Reduced antiplatelet effect"),
        );
        ReferenceData::from_tables(
            interactions,
            DosageLimitTable::new(),
            ContraindicationTable::new(),
        )
    }

    #[test]
    fn canonical_name_is_case_insensitive_and_trimmed() {
        let data = sample();
        assert_eq!(data.canonical_name("  aSpIrIn "), Some("Aspirin"));
        assert_eq!(data.canonical_name("warfarin"), Some("Warfarin"));
        assert_eq!(data.canonical_name("Paracetamol"), None);
        assert_eq!(data.drug_count(), 3);
    }

    #[test]
    fn drug_info_counts_partners_in_both_directions() {
        let data = sample();
        let info = data.drug_info("ASPIRIN").expect("aspirin known");
        assert_eq!(
            info,
            DrugInfo {
                name: "Aspirin".to_string(),
                in_database: true,
                interaction_count: 2,
            }
        );
        assert!(data.drug_info("FakeDrugXYZ").is_none());
    }

    #[test]
    fn interactions_from_reader_builds_index() {
        let json = r#"{"Digoxin":{"Amiodarone":{"severity":"Severe","description":"toxicity"}}}"#;
        let data = ReferenceData::interactions_from_reader(json.as_bytes()).expect("parses");
        assert_eq!(data.canonical_name("amiodarone"), Some("Amiodarone"));
        assert!(data.interaction("Amiodarone", "Digoxin").is_some());
    }
}
