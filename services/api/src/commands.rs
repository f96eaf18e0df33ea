use crate::infra::{load_reference, parse_dose};
use clap::Args;
use medisync::config::AppConfig;
use medisync::error::AppError;
use medisync::interactions::dataset::{
    DatasetImporter, ImportOptions, DEFAULT_MAX_INTERACTIONS, DEFAULT_TOP_DRUGS,
};
use medisync::interactions::{
    check_interactions, check_pair, CheckRequest, CheckResult, DoseEntry, PairCheck,
    PairSeverity, PatientContext,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Drug names to check (2 to 10 unique drugs)
    #[arg(required = true, num_args = 1..)]
    pub(crate) drugs: Vec<String>,
    /// Daily dose as DRUG=MG, e.g. Ibuprofen=4000. Repeat for several drugs.
    #[arg(long = "dose", value_parser = parse_dose)]
    pub(crate) doses: Vec<DoseEntry>,
    /// Active patient condition, e.g. pregnancy. Repeatable.
    #[arg(long = "condition")]
    pub(crate) conditions: Vec<String>,
    /// Print the JSON report instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
    /// Override the reference data directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct PairArgs {
    /// First drug name
    pub(crate) drug1: String,
    /// Second drug name
    pub(crate) drug2: String,
    /// Print the JSON answer instead of one line of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Override the reference data directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DrugArgs {
    /// Drug name (case-insensitive)
    pub(crate) name: String,
    /// Override the reference data directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportDatasetArgs {
    /// CSV export with drug 1, drug 2 and description columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Directory receiving drug_interactions.json (defaults to the data directory)
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
    /// Keep only pairs between the N most frequent drugs
    #[arg(long, default_value_t = DEFAULT_TOP_DRUGS)]
    pub(crate) top_drugs: usize,
    /// Upper bound on the number of interaction pairs written
    #[arg(long, default_value_t = DEFAULT_MAX_INTERACTIONS)]
    pub(crate) max_interactions: usize,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        drugs,
        doses,
        conditions,
        json,
        data_dir,
    } = args;

    let reference = load_reference(data_dir)?;
    let request = CheckRequest {
        drugs,
        drug_doses: doses,
        patient_context: PatientContext::from_flags(
            conditions.iter().map(|condition| (condition, true)),
        ),
    };
    let result = check_interactions(&reference, &request)?;

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report payload unavailable: {err}"),
        }
    } else {
        print!("{}", render_check_report(&result));
    }

    Ok(())
}

pub(crate) fn run_pair_check(args: PairArgs) -> Result<(), AppError> {
    let reference = load_reference(args.data_dir)?;
    let pair = check_pair(&reference, &args.drug1, &args.drug2)?;

    if args.json {
        match serde_json::to_string_pretty(&pair) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Pair payload unavailable: {err}"),
        }
    } else {
        println!("{}", render_pair(&pair));
    }
    Ok(())
}

pub(crate) fn render_pair(pair: &PairCheck) -> String {
    if pair.interaction_found {
        format!(
            "{} + {}: {} ({})",
            pair.drug_a,
            pair.drug_b,
            pair.severity.label(),
            pair.description
        )
    } else {
        format!("{} + {}: no interaction data", pair.drug_a, pair.drug_b)
    }
}

pub(crate) fn run_drug_lookup(args: DrugArgs) -> Result<(), AppError> {
    let reference = load_reference(args.data_dir)?;
    let info = reference
        .drug_info(&args.name)
        .ok_or_else(|| AppError::DrugNotFound(args.name.clone()))?;

    println!(
        "{}: in database, {} known interaction partner(s)",
        info.name, info.interaction_count
    );
    Ok(())
}

pub(crate) fn run_import_dataset(args: ImportDatasetArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    medisync::telemetry::try_init_quiet(&config.telemetry)?;

    let options = ImportOptions {
        top_drugs: args.top_drugs,
        max_interactions: args.max_interactions,
    };
    let dataset = DatasetImporter::from_path(&args.csv, &options)?;
    let out_dir = args.out_dir.unwrap_or(config.data.dir);
    let path = dataset.write_to_dir(&out_dir)?;

    println!(
        "Curated {} interactions across {} drugs (from {} unique pairs, {} rows)",
        dataset.kept_pairs,
        dataset.drug_count(),
        dataset.unique_pairs,
        dataset.source_rows
    );
    println!("Exported to {}", path.display());
    Ok(())
}

/// Plain-text rendering of a check result for terminal use.
pub(crate) fn render_check_report(result: &CheckResult) -> String {
    let mut out = String::new();
    let drugs: Vec<&str> = result.drugs().collect();

    out.push_str(&format!("Interaction check: {}\n", drugs.join(", ")));
    out.push_str(&format!(
        "Overall risk: {} (score {}, {} severe / {} moderate / {} mild)\n",
        result.overall_risk.label(),
        result.total_score,
        result.severe_count,
        result.moderate_count,
        result.mild_count
    ));
    out.push_str(&format!(
        "Data coverage: {}/{} pairs known ({:.2}%, {} confidence)\n",
        result.known_pairs,
        result.total_pairs,
        result.confidence_percentage,
        result.confidence_level.label()
    ));
    out.push_str(&format!("{}\n", result.risk_explanation));
    out.push_str(&format!("Recommendation: {}\n", result.recommendation));

    out.push_str("\nPairs:\n");
    for pair in &result.pair_results {
        let detail = if pair.severity == PairSeverity::Unknown {
            "no data".to_string()
        } else {
            pair.description.clone()
        };
        out.push_str(&format!(
            "  - {} + {}: {} ({})\n",
            pair.drug_a,
            pair.drug_b,
            pair.severity.label(),
            detail
        ));
    }

    if !result.dosage_warnings.is_empty() {
        out.push_str("\nDosage warnings:\n");
        for warning in &result.dosage_warnings {
            out.push_str(&format!("  - {}\n", warning.message));
        }
    }

    if !result.contraindication_warnings.is_empty() {
        out.push_str("\nContraindications:\n");
        for warning in &result.contraindication_warnings {
            out.push_str(&format!("  - {}\n", warning.message));
        }
    }

    if let Some(warning) = &result.warning {
        out.push_str(&format!("\nNote: {warning}\n"));
    }

    out
}
