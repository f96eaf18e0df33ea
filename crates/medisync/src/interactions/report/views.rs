use super::super::domain::{ConfidenceLevel, PairSeverity, RiskLevel, Severity};
use super::super::safety::{ContraindicationWarning, DosageWarning};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairResult {
    #[serde(rename = "drugA")]
    pub drug_a: String,
    #[serde(rename = "drugB")]
    pub drug_b: String,
    pub severity: PairSeverity,
    pub description: String,
}

/// Answer for a single two-drug lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairCheck {
    #[serde(rename = "drugA")]
    pub drug_a: String,
    #[serde(rename = "drugB")]
    pub drug_b: String,
    pub severity: PairSeverity,
    pub description: String,
    pub color: &'static str,
    pub interaction_found: bool,
}

impl From<PairResult> for PairCheck {
    fn from(pair: PairResult) -> Self {
        Self {
            color: pair.severity.color(),
            interaction_found: pair.severity.known().is_some(),
            drug_a: pair.drug_a,
            drug_b: pair.drug_b,
            severity: pair.severity,
            description: pair.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugPair {
    #[serde(rename = "drugA")]
    pub drug_a: String,
    #[serde(rename = "drugB")]
    pub drug_b: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub severity: Severity,
    pub weight: u32,
    pub color: &'static str,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub severity_color_map: BTreeMap<&'static str, &'static str>,
}

/// Complete report for one check. Serializes to the public response shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub pair_results: Vec<PairResult>,
    pub graph_data: GraphData,
    pub total_pairs: usize,
    pub known_pairs: usize,
    pub unknown_pairs: usize,
    pub interactions_not_found: Vec<DrugPair>,
    pub confidence_percentage: f64,
    pub confidence_level: ConfidenceLevel,
    pub graph_density: f64,
    pub total_score: u32,
    pub mild_count: usize,
    pub moderate_count: usize,
    pub severe_count: usize,
    pub overall_risk: RiskLevel,
    pub severity_score_map: BTreeMap<&'static str, u32>,
    pub highest_risk_pair: Option<PairResult>,
    pub risk_explanation: String,
    pub recommendation: String,
    pub dosage_warnings: Vec<DosageWarning>,
    pub contraindication_warnings: Vec<ContraindicationWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl CheckResult {
    /// Canonical drug names in request order, as projected onto the graph.
    pub fn drugs(&self) -> impl Iterator<Item = &str> {
        self.graph_data.nodes.iter().map(|node| node.id.as_str())
    }
}
