use super::domain::ConfidenceLevel;

/// Data coverage over the requested pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Coverage {
    pub percentage: f64,
    pub level: ConfidenceLevel,
    pub graph_density: f64,
}

impl Coverage {
    /// With no pairs there is nothing to be unsure about, so coverage is full.
    pub fn estimate(known_pairs: usize, total_pairs: usize) -> Self {
        let (percentage, graph_density) = if total_pairs > 0 {
            let ratio = known_pairs as f64 / total_pairs as f64;
            (round2(ratio * 100.0), round2(ratio))
        } else {
            (100.0, 1.0)
        };

        Self {
            percentage,
            level: ConfidenceLevel::from_percentage(percentage),
            graph_density,
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
