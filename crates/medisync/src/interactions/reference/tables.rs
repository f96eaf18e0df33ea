use super::super::domain::Severity;
use crate::interactions::request::lenient_number;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

/// Interaction details for one ordered key of the nested table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEntry {
    #[serde(default = "default_severity")]
    pub severity: Severity,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

impl InteractionEntry {
    pub fn new(severity: Severity, description: impl Into<String>) -> Self {
        Self {
            severity,
            description: description.into(),
        }
    }
}

fn default_severity() -> Severity {
    Severity::Moderate
}

/// Nested `drug -> drug -> entry` map as published in `drug_interactions.json`.
///
/// The file may hold only one direction of a pair, so [`InteractionTable::lookup`]
/// probes `a -> b` first and falls back to `b -> a`. Deserialization skips single
/// unusable entries instead of rejecting the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InteractionTable {
    entries: HashMap<String, HashMap<String, InteractionEntry>>,
}

impl InteractionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the entry under `a -> b` only.
    pub fn insert(&mut self, a: &str, b: &str, entry: InteractionEntry) {
        self.entries
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), entry);
    }

    /// Stores the entry under both directions.
    pub fn insert_symmetric(&mut self, a: &str, b: &str, entry: InteractionEntry) {
        self.insert(b, a, entry.clone());
        self.insert(a, b, entry);
    }

    pub fn lookup(&self, a: &str, b: &str) -> Option<&InteractionEntry> {
        self.directed(a, b).or_else(|| self.directed(b, a))
    }

    fn directed(&self, from: &str, to: &str) -> Option<&InteractionEntry> {
        self.entries.get(from).and_then(|partners| partners.get(to))
    }

    /// Every name that appears as an outer or inner key, sorted.
    pub fn drug_names(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        for (drug, partners) in &self.entries {
            names.insert(drug.as_str());
            names.extend(partners.keys().map(String::as_str));
        }
        names
    }

    /// Number of distinct partners per drug, counting both directions.
    pub fn partner_counts(&self) -> HashMap<String, usize> {
        let mut partners: HashMap<&str, BTreeSet<&str>> = HashMap::new();
        for (drug, inner) in &self.entries {
            let drug = drug.as_str();
            for partner in inner.keys().map(String::as_str) {
                if partner == drug {
                    continue;
                }
                partners.entry(drug).or_default().insert(partner);
                partners.entry(partner).or_default().insert(drug);
            }
        }

        partners
            .into_iter()
            .map(|(drug, set)| (drug.to_string(), set.len()))
            .collect()
    }

    /// Count of stored directed entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'de> Deserialize<'de> for InteractionTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Value>::deserialize(deserializer)?;
        let mut table = Self::new();

        for (drug, partners) in raw {
            let Value::Object(partners) = partners else {
                warn!(drug = %drug, "interaction partners are not an object, skipped");
                continue;
            };
            table.entries.entry(drug.clone()).or_default();

            for (partner, entry) in partners {
                match InteractionEntry::deserialize(entry) {
                    Ok(entry) => table.insert(&drug, &partner, entry),
                    Err(error) => {
                        warn!(%drug, %partner, %error, "unusable interaction entry skipped");
                    }
                }
            }
        }

        Ok(table)
    }
}

/// Maximum daily dose for one drug. `max_daily_mg` tolerates strings and garbage; an
/// unusable value reads as `None` and the limit is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DosageLimit {
    #[serde(default, deserialize_with = "lenient_optional_number")]
    pub max_daily_mg: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub route: Option<String>,
}

impl DosageLimit {
    pub fn mg(max_daily_mg: f64) -> Self {
        Self {
            max_daily_mg: Some(max_daily_mg),
            unit: Some("mg".to_string()),
            route: None,
        }
    }

    pub fn unit_label(&self) -> &str {
        self.unit
            .as_deref()
            .filter(|unit| !unit.trim().is_empty())
            .unwrap_or("mg")
    }
}

pub type DosageLimitTable = HashMap<String, DosageLimit>;

/// `drug -> condition -> advice`. Conditions iterate in key order.
pub type ContraindicationTable = HashMap<String, BTreeMap<String, String>>;

/// Builds the dosage table entry by entry. A drug whose entry is not an object is
/// dropped; the rest of the table is kept.
pub(crate) fn dosage_limits_from_json(raw: HashMap<String, Value>) -> DosageLimitTable {
    raw.into_iter()
        .filter_map(|(drug, entry)| match DosageLimit::deserialize(entry) {
            Ok(limit) => Some((drug, limit)),
            Err(error) => {
                warn!(%drug, %error, "unusable dosage limit skipped");
                None
            }
        })
        .collect()
}

/// Builds the contraindication table, keeping only conditions whose advice is a
/// non-empty string.
pub(crate) fn contraindications_from_json(raw: HashMap<String, Value>) -> ContraindicationTable {
    let mut table = ContraindicationTable::new();

    for (drug, conditions) in raw {
        let Value::Object(conditions) = conditions else {
            warn!(%drug, "contraindications are not an object, skipped");
            continue;
        };

        let usable: BTreeMap<String, String> = conditions
            .into_iter()
            .filter_map(|(condition, advice)| match advice {
                Value::String(advice) if !advice.trim().is_empty() => Some((condition, advice)),
                other => {
                    debug!(%drug, %condition, advice = %other, "contraindication without advice skipped");
                    None
                }
            })
            .collect();
        table.insert(drug, usable);
    }

    table
}

fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value))
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}
