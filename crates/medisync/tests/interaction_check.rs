use medisync::interactions::reference::{
    ContraindicationTable, DosageLimit, DosageLimitTable, InteractionEntry, InteractionTable,
};
use medisync::interactions::{
    check_interactions, check_pair, CheckError, CheckRequest, ConfidenceLevel, PairSeverity, ReferenceData,
    RiskLevel, Severity,
};
use std::collections::BTreeMap;

fn reference() -> ReferenceData {
    let mut table = InteractionTable::new();
    let mut add = |a: &str, b: &str, severity: Severity, description: &str| {
        table.insert(a, b, InteractionEntry::new(severity, description));
    };
    add("Aspirin", "Warfarin", Severity::Severe, "Major bleeding risk.");
    add("Warfarin", "Ibuprofen", Severity::Severe, "GI bleeding risk.");
    add("Aspirin", "Ibuprofen", Severity::Moderate, "Reduced antiplatelet effect.");
    add("Ibuprofen", "Lisinopril", Severity::Moderate, "Reduced antihypertensive effect.");
    add("Digoxin", "Amiodarone", Severity::Severe, "Digoxin toxicity.");
    add("Metformin", "Lisinopril", Severity::Mild, "Slight hypoglycemic effect.");
    add("Metformin", "Furosemide", Severity::Mild, "Raised metformin levels.");
    add("Lisinopril", "Furosemide", Severity::Mild, "Additive hypotension.");
    add("Levothyroxine", "Omeprazole", Severity::Mild, "Reduced absorption.");
    add("Sertraline", "Tramadol", Severity::Severe, "Serotonin syndrome.");

    let mut limits = DosageLimitTable::new();
    limits.insert("Ibuprofen".to_string(), DosageLimit::mg(3200.0));
    limits.insert("Aspirin".to_string(), DosageLimit::mg(4000.0));

    let mut contraindications = ContraindicationTable::new();
    contraindications.insert(
        "Warfarin".to_string(),
        BTreeMap::from([(
            "pregnancy".to_string(),
            "Teratogenic, avoid during pregnancy".to_string(),
        )]),
    );

    ReferenceData::from_tables(table, limits, contraindications)
}

#[test]
fn aspirin_and_warfarin_is_a_severe_combination() {
    let result = check_interactions(&reference(), &CheckRequest::new(["Aspirin", "Warfarin"]))
        .expect("check succeeds");

    assert_eq!(result.total_pairs, 1);
    assert_eq!(result.known_pairs, 1);
    assert_eq!(result.severe_count, 1);
    assert_eq!(result.total_score, 3);
    assert_eq!(result.overall_risk, RiskLevel::Severe);
    assert_eq!(result.confidence_percentage, 100.0);
    assert_eq!(result.confidence_level, ConfidenceLevel::High);
    assert!(result.warning.is_none());

    let highest = result.highest_risk_pair.expect("highest risk pair present");
    assert_eq!(highest.severity, PairSeverity::Severe);
    assert_eq!(result.graph_data.edges.len(), 1);
    assert_eq!(result.graph_data.edges[0].color, "#F44336");
}

#[test]
fn drugs_without_any_known_pair_report_low_confidence() {
    let request = CheckRequest::new(["Metformin", "Digoxin", "Omeprazole"]);
    let result = check_interactions(&reference(), &request).expect("check succeeds");

    assert_eq!(result.total_pairs, 3);
    assert_eq!(result.unknown_pairs, 3);
    assert_eq!(result.interactions_not_found.len(), 3);
    assert_eq!(result.confidence_percentage, 0.0);
    assert_eq!(result.confidence_level, ConfidenceLevel::Low);
    assert_eq!(result.graph_density, 0.0);
    assert_eq!(result.overall_risk, RiskLevel::Mild);
    assert_eq!(result.total_score, 0);
    assert!(result.highest_risk_pair.is_none());
    assert!(result.graph_data.edges.is_empty());
    assert_eq!(result.graph_data.nodes.len(), 3);
    assert!(result.warning.is_some());
}

#[test]
fn three_mild_pairs_escalate_to_moderate() {
    let request = CheckRequest::new(["Metformin", "Lisinopril", "Furosemide", "Levothyroxine"]);
    let result = check_interactions(&reference(), &request).expect("check succeeds");

    assert_eq!(result.total_pairs, 6);
    assert_eq!(result.mild_count, 3);
    assert_eq!(result.moderate_count, 0);
    assert_eq!(result.overall_risk, RiskLevel::Moderate);
    assert_eq!(result.confidence_percentage, 50.0);
    assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
    assert_eq!(result.graph_density, 0.5);
}

#[test]
fn two_moderate_pairs_escalate_to_severe() {
    let request = CheckRequest::new(["Aspirin", "Ibuprofen", "Lisinopril"]);
    let result = check_interactions(&reference(), &request).expect("check succeeds");

    assert_eq!(result.moderate_count, 2);
    assert_eq!(result.severe_count, 0);
    assert_eq!(result.overall_risk, RiskLevel::Severe);
}

#[test]
fn dose_above_the_daily_maximum_is_flagged() {
    let request = CheckRequest::new(["Ibuprofen", "Aspirin"])
        .with_dose("ibuprofen", 4000.0)
        .with_dose("Aspirin", 4000.0);
    let result = check_interactions(&reference(), &request).expect("check succeeds");

    assert_eq!(result.dosage_warnings.len(), 1);
    let warning = &result.dosage_warnings[0];
    assert_eq!(warning.drug, "Ibuprofen");
    assert_eq!(warning.max_daily_mg, 3200.0);
    assert_eq!(
        warning.message,
        "Daily dose 4000 mg exceeds maximum 3200 mg for Ibuprofen."
    );
}

#[test]
fn active_condition_raises_contraindication() {
    let request = CheckRequest::new(["Warfarin", "Aspirin"]).with_condition("Pregnancy");
    let result = check_interactions(&reference(), &request).expect("check succeeds");

    assert_eq!(result.contraindication_warnings.len(), 1);
    assert_eq!(
        result.contraindication_warnings[0].message,
        "Warfarin: pregnancy - Teratogenic, avoid during pregnancy."
    );

    let without = check_interactions(&reference(), &CheckRequest::new(["Warfarin", "Aspirin"]))
        .expect("check succeeds");
    assert!(without.contraindication_warnings.is_empty());
}

#[test]
fn request_size_is_validated_on_unique_drugs() {
    let reference = reference();

    assert_eq!(
        check_interactions(&reference, &CheckRequest::new(["Aspirin"])),
        Err(CheckError::TooFewDrugs { found: 1 })
    );
    assert_eq!(
        check_interactions(&reference, &CheckRequest::new(["Aspirin", " ASPIRIN "])),
        Err(CheckError::TooFewDrugs { found: 1 })
    );

    let ten = [
        "Aspirin",
        "Warfarin",
        "Ibuprofen",
        "Lisinopril",
        "Digoxin",
        "Amiodarone",
        "Metformin",
        "Furosemide",
        "Levothyroxine",
        "Omeprazole",
    ];
    let result = check_interactions(&reference, &CheckRequest::new(ten)).expect("ten drugs ok");
    assert_eq!(result.total_pairs, 45);

    let mut eleven = ten.to_vec();
    eleven.push("Sertraline");
    assert_eq!(
        check_interactions(&reference, &CheckRequest::new(eleven)),
        Err(CheckError::TooManyDrugs { found: 11 })
    );
}

#[test]
fn unknown_drug_rejects_the_whole_request() {
    let error = check_interactions(&reference(), &CheckRequest::new(["Aspirin", "Unobtainium"]))
        .expect_err("unknown drug rejected");

    assert_eq!(error, CheckError::UnknownDrug("Unobtainium".to_string()));
    assert_eq!(error.to_string(), "Drug not found in database: Unobtainium");
}

#[test]
fn names_resolve_case_insensitively_to_canonical_spelling() {
    let reference = reference();
    let canonical = check_interactions(&reference, &CheckRequest::new(["Aspirin", "Warfarin"]))
        .expect("check succeeds");
    let shouted = check_interactions(&reference, &CheckRequest::new(["ASPIRIN", " warfarin "]))
        .expect("check succeeds");

    assert_eq!(canonical, shouted);
    assert_eq!(
        shouted.drugs().collect::<Vec<_>>(),
        vec!["Aspirin", "Warfarin"]
    );
}

#[test]
fn checks_are_repeatable_and_aggregates_ignore_input_order() {
    let reference = reference();
    let forward = CheckRequest::new(["Aspirin", "Warfarin", "Ibuprofen", "Digoxin"]);
    let reversed = CheckRequest::new(["Digoxin", "Ibuprofen", "Warfarin", "Aspirin"]);

    let first = check_interactions(&reference, &forward).expect("check succeeds");
    let again = check_interactions(&reference, &forward).expect("check succeeds");
    assert_eq!(first, again);

    let other = check_interactions(&reference, &reversed).expect("check succeeds");
    assert_eq!(first.total_pairs, other.total_pairs);
    assert_eq!(first.known_pairs, other.known_pairs);
    assert_eq!(first.total_score, other.total_score);
    assert_eq!(first.overall_risk, other.overall_risk);
    assert_eq!(first.confidence_percentage, other.confidence_percentage);
    assert_eq!(first.severe_count, 2);
    assert_eq!(first.moderate_count, 1);

    let unordered = |result: &medisync::interactions::CheckResult| {
        let mut pairs: Vec<(String, String, PairSeverity)> = result
            .pair_results
            .iter()
            .map(|pair| {
                let (a, b) = if pair.drug_a <= pair.drug_b {
                    (pair.drug_a.clone(), pair.drug_b.clone())
                } else {
                    (pair.drug_b.clone(), pair.drug_a.clone())
                };
                (a, b, pair.severity)
            })
            .collect();
        pairs.sort_by(|left, right| (&left.0, &left.1).cmp(&(&right.0, &right.1)));
        pairs
    };
    assert_eq!(unordered(&first), unordered(&other));
}

#[test]
fn counts_and_score_are_consistent_with_pairs() {
    let request = CheckRequest::new(["Aspirin", "Warfarin", "Ibuprofen", "Lisinopril", "Metformin"]);
    let result = check_interactions(&reference(), &request).expect("check succeeds");

    assert_eq!(result.total_pairs, result.pair_results.len());
    assert_eq!(result.known_pairs + result.unknown_pairs, result.total_pairs);
    assert_eq!(
        result.mild_count + result.moderate_count + result.severe_count,
        result.known_pairs
    );
    assert_eq!(
        result.total_score as usize,
        result.mild_count + 2 * result.moderate_count + 3 * result.severe_count
    );
    assert_eq!(result.graph_data.edges.len(), result.known_pairs);
    assert_eq!(result.interactions_not_found.len(), result.unknown_pairs);
}

#[test]
fn pair_check_matches_the_full_report() {
    let reference = reference();
    let pair = check_pair(&reference, "ibuprofen", "Lisinopril").expect("pair resolves");
    let full = check_interactions(&reference, &CheckRequest::new(["Ibuprofen", "Lisinopril"]))
        .expect("check succeeds");

    assert_eq!(pair.drug_a, full.pair_results[0].drug_a);
    assert_eq!(pair.severity, full.pair_results[0].severity);
    assert_eq!(pair.description, full.pair_results[0].description);
    assert_eq!(pair.color, "#FF9800");
    assert!(pair.interaction_found);

    assert_eq!(
        check_pair(&reference, "Aspirin", "Unobtainium"),
        Err(CheckError::UnknownDrug("Unobtainium".to_string()))
    );
}
