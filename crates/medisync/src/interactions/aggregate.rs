use super::domain::{RiskLevel, Severity};
use super::report::views::PairResult;

const MILD_ESCALATION_COUNT: usize = 3;
const MODERATE_ESCALATION_COUNT: usize = 2;

/// Running severity counts over the pairs with known interactions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct SeverityTally {
    pub mild: usize,
    pub moderate: usize,
    pub severe: usize,
    pub total_score: u32,
    /// Index into the pair list of the first pair with the strictly highest weight.
    pub highest_risk: Option<usize>,
    highest_weight: u32,
}

impl SeverityTally {
    pub fn from_pairs(pairs: &[PairResult]) -> Self {
        let mut tally = Self::default();
        for (index, pair) in pairs.iter().enumerate() {
            if let Some(severity) = pair.severity.known() {
                tally.record(index, severity);
            }
        }
        tally
    }

    fn record(&mut self, index: usize, severity: Severity) {
        match severity {
            Severity::Mild => self.mild += 1,
            Severity::Moderate => self.moderate += 1,
            Severity::Severe => self.severe += 1,
        }

        let weight = severity.weight();
        self.total_score += weight;
        if weight > self.highest_weight {
            self.highest_weight = weight;
            self.highest_risk = Some(index);
        }
    }

    pub fn known(&self) -> usize {
        self.mild + self.moderate + self.severe
    }

    /// Base level from the worst severity seen, then a single escalation step: three or
    /// more mild pairs lift Mild to Moderate, two or more moderate pairs lift Moderate
    /// to Severe. An escalated level is never escalated again.
    pub fn overall_risk(&self) -> RiskLevel {
        let base = if self.severe >= 1 {
            RiskLevel::Severe
        } else if self.moderate >= 1 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Mild
        };

        match base {
            RiskLevel::Mild if self.mild >= MILD_ESCALATION_COUNT => RiskLevel::Moderate,
            RiskLevel::Moderate if self.moderate >= MODERATE_ESCALATION_COUNT => {
                RiskLevel::Severe
            }
            level => level,
        }
    }
}
