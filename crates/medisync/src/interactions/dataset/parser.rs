use std::io::Read;

/// One row of the public drug-drug interaction export, after name cleanup.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DatasetRecord {
    pub(crate) drug_a: String,
    pub(crate) drug_b: String,
    pub(crate) description: String,
}

/// Reads the three positional columns (drug 1, drug 2, description). Header names vary
/// between exports, so only the position matters. Rows with a blank drug are dropped.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<DatasetRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let drug_a = title_case(row.get(0).unwrap_or_default());
        let drug_b = title_case(row.get(1).unwrap_or_default());
        if drug_a.is_empty() || drug_b.is_empty() {
            continue;
        }

        records.push(DatasetRecord {
            drug_a,
            drug_b,
            description: row.get(2).unwrap_or_default().to_string(),
        });
    }

    Ok(records)
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest,
/// so `"ACETYLSALICYLIC acid"` becomes `"Acetylsalicylic Acid"`.
pub(crate) fn title_case(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut previous_alphabetic = false;

    for ch in value.trim().chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                titled.extend(ch.to_lowercase());
            } else {
                titled.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            titled.push(ch);
            previous_alphabetic = false;
        }
    }

    titled
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn title_case_matches_dataset_conventions() {
        assert_eq!(title_case("  warfarin "), "Warfarin");
        assert_eq!(title_case("ACETYLSALICYLIC acid"), "Acetylsalicylic Acid");
        assert_eq!(title_case("5-fluorouracil"), "5-Fluorouracil");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn parses_positional_columns_and_skips_blank_names() {
        let csv = "Drug 1,Drug 2,Interaction Description\n\
trioxsalen,verteporfin,Trioxsalen may increase the photosensitizing activities of Verteporfin.\n\
,aminolevulinic acid,missing first drug\n";

        let records = parse_records(Cursor::new(csv)).expect("csv parses");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].drug_a, "Trioxsalen");
        assert_eq!(records[0].drug_b, "Verteporfin");
        assert!(records[0].description.starts_with("Trioxsalen may increase"));
    }
}
