//! Drug interaction checking.
//!
//! A check runs strictly forward: normalize names, resolve every pair, aggregate
//! severities, estimate coverage, run the dosage and contraindication checks, and
//! assemble the report. Only normalization can fail.

mod aggregate;
mod confidence;
pub mod dataset;
pub mod domain;
mod normalizer;
pub mod reference;
pub mod report;
pub mod request;
mod resolver;
pub mod router;
pub mod safety;

pub use domain::{
    CheckError, ConfidenceLevel, PairSeverity, RiskLevel, Severity, MAX_DRUGS, MIN_DRUGS,
};
pub use reference::{DrugInfo, ReferenceData, ReferenceDataError};
pub use report::views::{
    CheckResult, DrugPair, GraphData, GraphEdge, GraphNode, PairCheck, PairResult,
};
pub use request::{CheckRequest, DoseEntry, PatientContext};
pub use router::{interaction_router, ApiKey};
pub use safety::{ContraindicationWarning, DosageWarning};

use tracing::debug;

/// Computes the full interaction report for `request` against `reference`.
///
/// Pure with respect to its inputs: the same request against the same tables always
/// yields the same result.
pub fn check_interactions(
    reference: &ReferenceData,
    request: &CheckRequest,
) -> Result<CheckResult, CheckError> {
    let drugs = normalizer::normalize_drugs(&request.drugs, reference)?;
    let resolution = resolver::resolve_pairs(&drugs, reference);
    let dosage_warnings = safety::check_dosages(&request.drug_doses, reference);
    let contraindication_warnings =
        safety::check_contraindications(&drugs, &request.patient_context, reference);

    let result = report::assemble_report(
        &drugs,
        resolution,
        dosage_warnings,
        contraindication_warnings,
    );

    debug!(
        drugs = drugs.len(),
        known_pairs = result.known_pairs,
        unknown_pairs = result.unknown_pairs,
        overall_risk = result.overall_risk.label(),
        "interaction check complete"
    );

    Ok(result)
}

/// Looks up a single pair of drugs. Both names must resolve and must differ.
pub fn check_pair(
    reference: &ReferenceData,
    drug1: &str,
    drug2: &str,
) -> Result<PairCheck, CheckError> {
    let drugs = normalizer::normalize_drugs(&[drug1, drug2], reference)?;
    let pair = PairCheck::from(resolver::resolve_pair(&drugs[0], &drugs[1], reference));

    debug!(
        drug_a = %pair.drug_a,
        drug_b = %pair.drug_b,
        severity = pair.severity.label(),
        "pair check complete"
    );

    Ok(pair)
}
