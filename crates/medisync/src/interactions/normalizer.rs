use super::domain::{CheckError, MAX_DRUGS, MIN_DRUGS};
use super::reference::ReferenceData;
use std::collections::HashSet;

/// Resolves raw names to unique canonical names, keeping first-seen order.
///
/// Blank entries are ignored. The first unresolvable entry aborts the whole request.
pub(crate) fn normalize_drugs<S: AsRef<str>>(
    raw: &[S],
    reference: &ReferenceData,
) -> Result<Vec<String>, CheckError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();

    for entry in raw {
        let trimmed = entry.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }

        let canonical = reference
            .canonical_name(trimmed)
            .ok_or_else(|| CheckError::UnknownDrug(trimmed.to_string()))?;

        if seen.insert(canonical.to_lowercase()) {
            unique.push(canonical.to_string());
        }
    }

    if unique.len() < MIN_DRUGS {
        return Err(CheckError::TooFewDrugs {
            found: unique.len(),
        });
    }
    if unique.len() > MAX_DRUGS {
        return Err(CheckError::TooManyDrugs {
            found: unique.len(),
        });
    }

    Ok(unique)
}
