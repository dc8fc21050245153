use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::workflows::assessment::domain::ObligationRecord;
use crate::workflows::assessment::extraction::parse_amount_text;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ObligationRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<ObligationRow>() {
        let row = row?;
        records.push(ObligationRecord {
            has_loan_statement: row.corroborated(),
            emi_amount: parse_amount_text(&row.emi_amount).max(0.0),
            lender: row.lender,
            loan_type: row.loan_type.unwrap_or_default(),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ObligationRow {
    #[serde(rename = "Lender")]
    lender: String,
    #[serde(rename = "EMI Amount", default)]
    emi_amount: String,
    #[serde(rename = "Loan Type", default, deserialize_with = "empty_string_as_none")]
    loan_type: Option<String>,
    #[serde(
        rename = "Has Loan Statement",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    has_loan_statement: Option<String>,
}

impl ObligationRow {
    fn corroborated(&self) -> bool {
        self.has_loan_statement
            .as_deref()
            .map(|value| {
                matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "yes" | "y" | "true" | "1"
                )
            })
            .unwrap_or(false)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
