use super::super::domain::RiskLevel;

pub(crate) const UNKNOWN_PAIRS_WARNING: &str = "Some drug pairs have no interaction data in the offline database. Absence of data does not mean the combination is safe.";

pub(crate) fn risk_explanation(
    risk: RiskLevel,
    severe: usize,
    moderate: usize,
    mild: usize,
    unknown_pairs: usize,
    total_pairs: usize,
) -> String {
    let mut text = match risk {
        RiskLevel::Severe if severe > 0 => format!(
            "{severe} severe interaction(s) found. This combination may cause serious harm."
        ),
        RiskLevel::Severe => format!(
            "{moderate} moderate interactions together raise this combination to severe risk."
        ),
        RiskLevel::Moderate if moderate > 0 => format!(
            "{moderate} moderate interaction(s) found. Effects may need monitoring or dose adjustment."
        ),
        RiskLevel::Moderate => format!(
            "{mild} mild interactions together raise this combination to moderate risk."
        ),
        RiskLevel::Mild if mild > 0 => format!(
            "Only mild interaction(s) found ({mild}). Clinical impact is expected to be limited."
        ),
        RiskLevel::Mild => "No known interactions were found between these drugs.".to_string(),
    };

    if unknown_pairs > 0 {
        text.push_str(&format!(
            " Interaction data is missing for {unknown_pairs} of {total_pairs} pair(s), so the risk may be understated."
        ));
    }

    text
}

pub(crate) const fn recommendation(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Severe => {
            "Avoid this combination unless a prescriber or pharmacist has reviewed it."
        }
        RiskLevel::Moderate => {
            "Use with caution, monitor for adverse effects, and consult a pharmacist."
        }
        RiskLevel::Mild => "Generally low risk. Continue routine monitoring.",
    }
}
