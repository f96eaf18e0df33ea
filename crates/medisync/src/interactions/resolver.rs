use super::domain::PairSeverity;
use super::reference::ReferenceData;
use super::report::views::{DrugPair, PairResult};

pub(crate) const NO_DATA_DESCRIPTION: &str =
    "No interaction data available in the current offline database.";

#[derive(Debug, Default)]
pub(crate) struct PairResolution {
    pub pairs: Vec<PairResult>,
    pub not_found: Vec<DrugPair>,
}

impl PairResolution {
    pub fn total_pairs(&self) -> usize {
        self.pairs.len()
    }

    pub fn unknown_pairs(&self) -> usize {
        self.not_found.len()
    }

    pub fn known_pairs(&self) -> usize {
        self.total_pairs() - self.unknown_pairs()
    }
}

/// Resolves one pair in the given orientation. Missing records come back as `Unknown`
/// with the no-data description.
pub(crate) fn resolve_pair(drug_a: &str, drug_b: &str, reference: &ReferenceData) -> PairResult {
    let (severity, description) = match reference.interaction(drug_a, drug_b) {
        Some(entry) => (entry.severity.into(), entry.description.clone()),
        None => (PairSeverity::Unknown, NO_DATA_DESCRIPTION.to_string()),
    };

    PairResult {
        drug_a: drug_a.to_string(),
        drug_b: drug_b.to_string(),
        severity,
        description,
    }
}

/// Looks up every unordered pair `(i, j)` with `i < j`. Pairs without a record stay in
/// the output as `Unknown` and are listed in `not_found`.
pub(crate) fn resolve_pairs(drugs: &[String], reference: &ReferenceData) -> PairResolution {
    let mut resolution = PairResolution::default();

    for (i, drug_a) in drugs.iter().enumerate() {
        for drug_b in &drugs[i + 1..] {
            let pair = resolve_pair(drug_a, drug_b, reference);
            if pair.severity == PairSeverity::Unknown {
                resolution.not_found.push(DrugPair {
                    drug_a: drug_a.clone(),
                    drug_b: drug_b.clone(),
                });
            }
            resolution.pairs.push(pair);
        }
    }

    resolution
}
