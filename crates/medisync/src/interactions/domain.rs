use serde::{Deserialize, Deserializer, Serialize};

/// Smallest number of unique drugs a check accepts.
pub const MIN_DRUGS: usize = 2;
/// Largest number of unique drugs a check accepts (45 pairs).
pub const MAX_DRUGS: usize = 10;

/// Normalized interaction strength. Raw reference labels are folded into these three
/// values when the tables are deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const fn ordered() -> [Self; 3] {
        [Self::Mild, Self::Moderate, Self::Severe]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }

    pub const fn weight(self) -> u32 {
        match self {
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Mild => "#4CAF50",
            Self::Moderate => "#FF9800",
            Self::Severe => "#F44336",
        }
    }

    /// Folds a raw label into a severity. `None` means the label was not recognized
    /// and the caller should fall back to [`Severity::Moderate`].
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mild" => Some(Self::Mild),
            "moderate" => Some(Self::Moderate),
            "severe" | "critical" => Some(Self::Severe),
            _ => None,
        }
    }

    pub fn normalize(raw: &str) -> Self {
        Self::parse_label(raw).unwrap_or(Self::Moderate)
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let parsed = raw.as_str().and_then(Severity::parse_label);
        Ok(parsed.unwrap_or_else(|| {
            tracing::warn!(label = %raw, "unrecognized severity label, defaulting to Moderate");
            Severity::Moderate
        }))
    }
}

/// Severity as reported for a single pair, where `Unknown` means the tables have no
/// record for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairSeverity {
    Mild,
    Moderate,
    Severe,
    Unknown,
}

impl PairSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn known(self) -> Option<Severity> {
        match self {
            Self::Mild => Some(Severity::Mild),
            Self::Moderate => Some(Severity::Moderate),
            Self::Severe => Some(Severity::Severe),
            Self::Unknown => None,
        }
    }

    /// Grey for pairs without data.
    pub const fn color(self) -> &'static str {
        match self.known() {
            Some(severity) => severity.color(),
            None => "#9E9E9E",
        }
    }
}

impl From<Severity> for PairSeverity {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Mild => Self::Mild,
            Severity::Moderate => Self::Moderate,
            Severity::Severe => Self::Severe,
        }
    }
}

/// Overall risk of the requested combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Mild,
    Moderate,
    Severe,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

impl From<Severity> for RiskLevel {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Mild => Self::Mild,
            Severity::Moderate => Self::Moderate,
            Severity::Severe => Self::Severe,
        }
    }
}

/// Qualitative band for how much of the requested pair space had data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::High
        } else if percentage >= 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Request validation failures. Nothing else aborts a check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("Drug not found in database: {0}")]
    UnknownDrug(String),
    #[error("At least 2 drugs are required (got {found})")]
    TooFewDrugs { found: usize },
    #[error("At most 10 drugs are supported (got {found})")]
    TooManyDrugs { found: usize },
}
