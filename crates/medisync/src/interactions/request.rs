use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Input of a single interaction check.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckRequest {
    pub drugs: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub drug_doses: Vec<DoseEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub patient_context: PatientContext,
}

impl CheckRequest {
    pub fn new<I, S>(drugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            drugs: drugs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_dose(mut self, drug: impl Into<String>, daily_mg: f64) -> Self {
        self.drug_doses.push(DoseEntry::new(drug, daily_mg));
        self
    }

    pub fn with_condition(mut self, condition: &str) -> Self {
        self.patient_context.activate(condition);
        self
    }
}

/// One supplied daily dose. Deserialization is lenient: the drug may arrive as `drug` or
/// `name` and the dose as `daily_mg` or `daily_dose` (number or numeric string). Entries
/// that cannot be read end up with an empty drug or no dose and are skipped by the
/// dosage check.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct DoseEntry {
    pub drug: String,
    pub daily_mg: Option<f64>,
}

impl DoseEntry {
    pub fn new(drug: impl Into<String>, daily_mg: f64) -> Self {
        Self {
            drug: drug.into(),
            daily_mg: Some(daily_mg),
        }
    }
}

impl From<Value> for DoseEntry {
    fn from(value: Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::default();
        };

        let drug = ["drug", "name"]
            .iter()
            .filter_map(|key| fields.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .find(|name| !name.is_empty())
            .unwrap_or_default()
            .to_string();

        let daily_mg = ["daily_mg", "daily_dose"]
            .iter()
            .find_map(|key| fields.get(*key).filter(|value| !value.is_null()))
            .and_then(lenient_number);

        Self { drug, daily_mg }
    }
}

/// Active patient conditions, stored trimmed and lower-cased. Built from a map of
/// condition flags where any truthy value marks the condition as present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct PatientContext {
    active: BTreeSet<String>,
}

impl PatientContext {
    pub fn from_flags<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut context = Self::default();
        for (condition, enabled) in flags {
            if enabled {
                context.activate(condition.as_ref());
            }
        }
        context
    }

    pub fn activate(&mut self, condition: &str) {
        let key = condition.trim().to_lowercase();
        if !key.is_empty() {
            self.active.insert(key);
        }
    }

    pub fn is_active(&self, condition: &str) -> bool {
        self.active.contains(&condition.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active_conditions(&self) -> impl Iterator<Item = &str> {
        self.active.iter().map(String::as_str)
    }
}

impl From<BTreeMap<String, Value>> for PatientContext {
    fn from(flags: BTreeMap<String, Value>) -> Self {
        let mut context = Self::default();
        for (condition, value) in &flags {
            if is_truthy(value) {
                context.activate(condition);
            }
        }
        context
    }
}

/// Reads a number from JSON, accepting numeric strings. Anything else is `None`.
pub(crate) fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
