//! Builds `drug_interactions.json` from the public drug-drug interaction CSV export.

mod parser;
mod severity;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::reference::{InteractionEntry, InteractionTable, INTERACTIONS_FILE};
use super::report::truncate_description;
use parser::DatasetRecord;

pub const DEFAULT_TOP_DRUGS: usize = 400;
pub const DEFAULT_MAX_INTERACTIONS: usize = 12_000;

#[derive(Debug, Error)]
pub enum DatasetImportError {
    #[error("failed to access dataset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid interaction CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode interaction table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Curation limits applied after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Only pairs whose drugs are both among this many most frequent drugs are kept.
    pub top_drugs: usize,
    /// Upper bound on kept pairs; the first rows in file order win.
    pub max_interactions: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            top_drugs: DEFAULT_TOP_DRUGS,
            max_interactions: DEFAULT_MAX_INTERACTIONS,
        }
    }
}

/// A curated, symmetric interaction map ready to be written to the data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct CuratedDataset {
    interactions: BTreeMap<String, BTreeMap<String, InteractionEntry>>,
    pub source_rows: usize,
    pub unique_pairs: usize,
    pub kept_pairs: usize,
}

impl CuratedDataset {
    pub fn drug_count(&self) -> usize {
        self.interactions.len()
    }

    pub fn to_table(&self) -> InteractionTable {
        let mut table = InteractionTable::new();
        for (drug, partners) in &self.interactions {
            for (partner, entry) in partners {
                table.insert(drug, partner, entry.clone());
            }
        }
        table
    }

    /// Writes compact JSON to `<dir>/drug_interactions.json`, creating `dir` if needed.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, DatasetImportError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| DatasetImportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(INTERACTIONS_FILE);
        let io_error = |source| DatasetImportError::Io {
            path: path.clone(),
            source,
        };
        let file = File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &self.interactions)?;
        writer.flush().map_err(io_error)?;

        info!(
            path = %path.display(),
            drugs = self.drug_count(),
            pairs = self.kept_pairs,
            "interaction table written"
        );
        Ok(path)
    }
}

pub struct DatasetImporter;

impl DatasetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        options: &ImportOptions,
    ) -> Result<CuratedDataset, DatasetImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, options)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        options: &ImportOptions,
    ) -> Result<CuratedDataset, DatasetImportError> {
        let records = parser::parse_records(reader)?;
        let source_rows = records.len();
        let unique = dedupe_pairs(records);
        let unique_pairs = unique.len();

        let top = most_frequent_drugs(&unique, options.top_drugs);
        let mut interactions: BTreeMap<String, BTreeMap<String, InteractionEntry>> =
            BTreeMap::new();
        let mut kept_pairs = 0;

        for record in unique
            .into_iter()
            .filter(|record| top.contains(&record.drug_a) && top.contains(&record.drug_b))
            .take(options.max_interactions)
        {
            let entry = InteractionEntry::new(
                severity::infer_severity(&record.description),
                truncate_description(&record.description),
            );
            interactions
                .entry(record.drug_b.clone())
                .or_default()
                .insert(record.drug_a.clone(), entry.clone());
            interactions
                .entry(record.drug_a)
                .or_default()
                .insert(record.drug_b, entry);
            kept_pairs += 1;
        }

        info!(
            source_rows,
            unique_pairs,
            kept_pairs,
            top_drugs = options.top_drugs,
            "interaction dataset curated"
        );

        Ok(CuratedDataset {
            interactions,
            source_rows,
            unique_pairs,
            kept_pairs,
        })
    }
}

/// Keeps the first row of every unordered pair. Self-pairs never resolve during a check
/// and are dropped.
fn dedupe_pairs(records: Vec<DatasetRecord>) -> Vec<DatasetRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    records
        .into_iter()
        .filter(|record| record.drug_a != record.drug_b)
        .filter(|record| {
            let key = if record.drug_a <= record.drug_b {
                (record.drug_a.clone(), record.drug_b.clone())
            } else {
                (record.drug_b.clone(), record.drug_a.clone())
            };
            seen.insert(key)
        })
        .collect()
}

/// Ranks drugs by how many pairs mention them, ties broken by name.
fn most_frequent_drugs(records: &[DatasetRecord], limit: usize) -> HashSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.drug_a.as_str()).or_default() += 1;
        *counts.entry(record.drug_b.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(a_name, a_count), (b_name, b_count)| {
        b_count.cmp(a_count).then_with(|| a_name.cmp(b_name))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_string())
        .collect()
}
