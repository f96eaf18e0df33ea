use super::super::aggregate::SeverityTally;
use super::super::confidence::Coverage;
use super::super::domain::Severity;
use super::super::resolver::PairResolution;
use super::super::safety::{ContraindicationWarning, DosageWarning};
use super::narrative::{recommendation, risk_explanation, UNKNOWN_PAIRS_WARNING};
use super::views::{CheckResult, GraphData, GraphEdge, GraphNode, PairResult};
use std::collections::BTreeMap;

const EDGE_DESCRIPTION_LIMIT: usize = 150;
const ELLIPSIS: &str = "...";

pub(crate) fn assemble_report(
    drugs: &[String],
    resolution: PairResolution,
    dosage_warnings: Vec<DosageWarning>,
    contraindication_warnings: Vec<ContraindicationWarning>,
) -> CheckResult {
    let tally = SeverityTally::from_pairs(&resolution.pairs);
    let total_pairs = resolution.total_pairs();
    let known_pairs = resolution.known_pairs();
    let unknown_pairs = resolution.unknown_pairs();
    let coverage = Coverage::estimate(known_pairs, total_pairs);
    let overall_risk = tally.overall_risk();

    let graph_data = project_graph(drugs, &resolution.pairs);
    let highest_risk_pair = tally
        .highest_risk
        .and_then(|index| resolution.pairs.get(index).cloned());

    let risk_explanation = risk_explanation(
        overall_risk,
        tally.severe,
        tally.moderate,
        tally.mild,
        unknown_pairs,
        total_pairs,
    );
    let warning = (unknown_pairs > 0).then(|| UNKNOWN_PAIRS_WARNING.to_string());

    CheckResult {
        pair_results: resolution.pairs,
        graph_data,
        total_pairs,
        known_pairs,
        unknown_pairs,
        interactions_not_found: resolution.not_found,
        confidence_percentage: coverage.percentage,
        confidence_level: coverage.level,
        graph_density: coverage.graph_density,
        total_score: tally.total_score,
        mild_count: tally.mild,
        moderate_count: tally.moderate,
        severe_count: tally.severe,
        overall_risk,
        severity_score_map: Severity::ordered()
            .into_iter()
            .map(|severity| (severity.label(), severity.weight()))
            .collect(),
        highest_risk_pair,
        risk_explanation,
        recommendation: recommendation(overall_risk).to_string(),
        dosage_warnings,
        contraindication_warnings,
        warning,
    }
}

/// One node per drug, one edge per pair with a known interaction.
fn project_graph(drugs: &[String], pairs: &[PairResult]) -> GraphData {
    let nodes = drugs
        .iter()
        .map(|drug| GraphNode { id: drug.clone() })
        .collect();

    let edges = pairs
        .iter()
        .filter_map(|pair| {
            pair.severity.known().map(|severity| GraphEdge {
                source: pair.drug_a.clone(),
                target: pair.drug_b.clone(),
                severity,
                weight: severity.weight(),
                color: severity.color(),
                description: truncate_description(&pair.description),
            })
        })
        .collect();

    let severity_color_map: BTreeMap<&'static str, &'static str> = Severity::ordered()
        .into_iter()
        .map(|severity| (severity.label(), severity.color()))
        .collect();

    GraphData {
        nodes,
        edges,
        severity_color_map,
    }
}

/// Caps the text at 150 characters, ending in `...` when something was cut.
pub(crate) fn truncate_description(description: &str) -> String {
    if description.chars().count() <= EDGE_DESCRIPTION_LIMIT {
        return description.to_string();
    }

    let kept: String = description
        .chars()
        .take(EDGE_DESCRIPTION_LIMIT - ELLIPSIS.len())
        .collect();
    format!("{kept}{ELLIPSIS}")
}
