use super::super::reference::ReferenceData;
use super::super::request::PatientContext;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContraindicationWarning {
    pub drug: String,
    pub condition: String,
    pub advice: String,
    pub message: String,
}

pub(crate) fn check_contraindications(
    drugs: &[String],
    context: &PatientContext,
    reference: &ReferenceData,
) -> Vec<ContraindicationWarning> {
    if context.is_empty() {
        return Vec::new();
    }

    let mut warnings = Vec::new();
    for drug in drugs {
        let Some(conditions) = reference.contraindications_for(drug) else {
            continue;
        };

        for (condition, advice) in conditions {
            if advice.trim().is_empty() || !context.is_active(condition) {
                continue;
            }
            warnings.push(ContraindicationWarning {
                drug: drug.clone(),
                condition: condition.clone(),
                advice: advice.clone(),
                message: format!("{drug}: {condition} - {advice}."),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactions::reference::{
        ContraindicationTable, DosageLimitTable, InteractionTable,
    };
    use std::collections::BTreeMap;

    fn reference() -> ReferenceData {
        let mut contraindications = ContraindicationTable::new();
        contraindications.insert(
            "Warfarin".to_string(),
            BTreeMap::from([
                ("pregnancy".to_string(), "Contraindicated".to_string()),
                ("Severe_Liver_Impairment".to_string(), "Avoid".to_string()),
                ("bleeding_disorder".to_string(), String::new()),
            ]),
        );
        ReferenceData::from_tables(
            InteractionTable::new(),
            DosageLimitTable::new(),
            contraindications,
        )
    }

    fn drugs() -> Vec<String> {
        vec!["Aspirin".to_string(), "Warfarin".to_string()]
    }

    #[test]
    fn matches_active_conditions_case_insensitively() {
        let context = PatientContext::from_flags([
            ("Pregnancy", true),
            ("severe_liver_impairment", true),
            ("bleeding_disorder", true),
        ]);

        let warnings = check_contraindications(&drugs(), &context, &reference());

        let conditions: Vec<&str> = warnings.iter().map(|w| w.condition.as_str()).collect();
        assert_eq!(conditions, vec!["Severe_Liver_Impairment", "pregnancy"]);
        assert!(warnings.iter().all(|w| w.drug == "Warfarin"));
        assert_eq!(warnings[1].message, "Warfarin: pregnancy - Contraindicated.");
    }

    #[test]
    fn inactive_context_yields_nothing() {
        let context = PatientContext::from_flags([("pregnancy", false)]);
        assert!(check_contraindications(&drugs(), &context, &reference()).is_empty());
        assert!(
            check_contraindications(&drugs(), &PatientContext::default(), &reference()).is_empty()
        );
    }
}
