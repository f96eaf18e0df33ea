use super::super::domain::Severity;

const SEVERE_KEYWORDS: &[&str] = &[
    "contraindicated",
    "life-threatening",
    "fatal",
    "death",
    "serious adverse",
    "major bleeding",
    "cardiac arrest",
    "respiratory depression",
    "severe toxicity",
    "absolute contraindication",
];

const MODERATE_KEYWORDS: &[&str] = &[
    "risk or severity of adverse effects",
    "increase the risk",
    "may increase",
    "may decrease",
    "toxicity",
    "cardiotoxic",
    "hepatotoxic",
    "nephrotoxic",
    "hypotension",
    "hypoglycemia",
    "bleeding risk",
    "qt prolongation",
];

const MILD_KEYWORDS: &[&str] = &[
    "may alter",
    "may affect",
    "may reduce",
    "absorption",
    "bioavailability",
    "metabolism",
];

/// Keyword rules over the free-text description, checked from most to least severe.
/// Descriptions matching nothing are treated as Moderate.
pub(crate) fn infer_severity(description: &str) -> Severity {
    let lowered = description.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| lowered.contains(keyword));

    if lowered.trim().is_empty() {
        Severity::Moderate
    } else if mentions(SEVERE_KEYWORDS) {
        Severity::Severe
    } else if mentions(MODERATE_KEYWORDS) {
        Severity::Moderate
    } else if mentions(MILD_KEYWORDS) {
        Severity::Mild
    } else {
        Severity::Moderate
    }
}
