//! Typed results returned by the external document-understanding service.
//!
//! The service classifies an uploaded document and extracts a field mapping
//! specific to that category, or reports a failure for documents it could not
//! read. Everything here is data; the service itself (vision model, PDF
//! handling) stays outside this crate. Each category is an explicit struct
//! with defaulted fields so partial extractions deserialize cleanly.

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{DeductionBreakdown, EarningsBreakdown};

/// Document categories the extraction service can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    SalarySlip,
    BankStatement,
    PanCard,
    AadhaarCard,
    Form16,
    LoanStatement,
    Other,
}

impl DocumentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SalarySlip => "Salary Slip",
            Self::BankStatement => "Bank Statement",
            Self::PanCard => "PAN Card",
            Self::AadhaarCard => "Aadhaar Card",
            Self::Form16 => "Form 16",
            Self::LoanStatement => "Loan Statement",
            Self::Other => "Other Document",
        }
    }
}

/// One analyzed upload: where it came from plus what the service returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedDocument {
    pub source: String,
    #[serde(flatten)]
    pub outcome: ExtractionOutcome,
}

/// Category-specific extraction result, or a failure marker. A failure is
/// never fatal downstream; the document simply contributes no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document_type", rename_all = "snake_case")]
pub enum ExtractionOutcome {
    SalarySlip(SalarySlipExtraction),
    BankStatement(BankStatementExtraction),
    PanCard(PanCardExtraction),
    AadhaarCard(AadhaarCardExtraction),
    Form16(Form16Extraction),
    LoanStatement(LoanStatementExtraction),
    Other(GenericExtraction),
    Failed { error: String },
}

impl ExtractionOutcome {
    pub fn kind(&self) -> Option<DocumentKind> {
        match self {
            Self::SalarySlip(_) => Some(DocumentKind::SalarySlip),
            Self::BankStatement(_) => Some(DocumentKind::BankStatement),
            Self::PanCard(_) => Some(DocumentKind::PanCard),
            Self::AadhaarCard(_) => Some(DocumentKind::AadhaarCard),
            Self::Form16(_) => Some(DocumentKind::Form16),
            Self::LoanStatement(_) => Some(DocumentKind::LoanStatement),
            Self::Other(_) => Some(DocumentKind::Other),
            Self::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalarySlipExtraction {
    pub month: Option<String>,
    pub employee_name: Option<String>,
    pub employee_id: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub employer: Option<String>,
    pub pan: Option<String>,
    pub earnings: EarningsBreakdown,
    pub deductions: DeductionBreakdown,
    pub gross_salary: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankStatementExtraction {
    pub account_holder: Option<String>,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub statement_start_date: Option<String>,
    pub statement_end_date: Option<String>,
    pub statement_period_months: u32,
    #[serde(deserialize_with = "lenient_amount")]
    pub average_balance: f64,
    pub emis_found: Vec<EmiSighting>,
}

/// A recurring debit the statement analysis flagged as a likely EMI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmiSighting {
    pub lender: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub emi_amount: f64,
    pub frequency: Option<String>,
    pub loan_type: String,
    pub has_loan_document: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanCardExtraction {
    pub name: Option<String>,
    pub pan_number: Option<String>,
    pub father_name: Option<String>,
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AadhaarCardExtraction {
    pub name: Option<String>,
    pub aadhaar_number: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Form16Extraction {
    pub employee_name: Option<String>,
    pub pan: Option<String>,
    pub employer: Option<String>,
    pub employer_tan: Option<String>,
    pub financial_year: Option<String>,
    pub gross_salary: f64,
    pub total_income: f64,
    pub tax_deducted: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanStatementExtraction {
    pub borrower_name: Option<String>,
    pub lender: String,
    pub loan_type: String,
    pub loan_account_number: Option<String>,
    #[serde(deserialize_with = "lenient_amount")]
    pub emi_amount: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub outstanding_amount: f64,
    pub tenure_months: u32,
    pub interest_rate: f64,
    pub is_closed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericExtraction {
    pub key_information: Option<String>,
    pub applicant_name: Option<String>,
    pub additional_details: Option<String>,
}

/// Accepts a number, a numeric string ("12,500" or "Rs 12500"), null, or a
/// missing field; everything unparseable coerces to 0.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let parsed = match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(value)) if value.is_finite() => value,
        Some(Raw::Number(_)) | None => 0.0,
        Some(Raw::Text(text)) => parse_amount_text(&text),
    };
    Ok(parsed)
}

pub(crate) fn parse_amount_text(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_round_trip_by_document_type_tag() {
        let json = r#"{
            "source": "slip-jan.pdf",
            "document_type": "salary_slip",
            "month": "January 2025",
            "earnings": {"basic": 40000, "hra": 16000},
            "gross_salary": 56000
        }"#;

        let document: AnalyzedDocument = serde_json::from_str(json).expect("valid payload");
        match &document.outcome {
            ExtractionOutcome::SalarySlip(slip) => {
                assert_eq!(slip.month.as_deref(), Some("January 2025"));
                assert_eq!(slip.earnings.basic, 40_000.0);
                assert_eq!(slip.earnings.incentive, 0.0);
            }
            other => panic!("expected salary slip, got {other:?}"),
        }
        assert_eq!(document.outcome.kind(), Some(DocumentKind::SalarySlip));
    }

    #[test]
    fn failed_extraction_carries_the_error() {
        let json = r#"{"source": "blurry.jpg", "document_type": "failed", "error": "unreadable scan"}"#;
        let document: AnalyzedDocument = serde_json::from_str(json).expect("valid payload");

        assert_eq!(document.outcome.kind(), None);
        assert_eq!(
            document.outcome,
            ExtractionOutcome::Failed {
                error: "unreadable scan".to_string()
            }
        );
    }

    #[test]
    fn lenient_amount_coerces_strings_and_null() {
        let statement: BankStatementExtraction =
            serde_json::from_str(r#"{"average_balance": "Rs 12,500.50"}"#).expect("valid");
        assert_eq!(statement.average_balance, 12_500.50);

        let statement: BankStatementExtraction =
            serde_json::from_str(r#"{"average_balance": null}"#).expect("valid");
        assert_eq!(statement.average_balance, 0.0);

        let statement: BankStatementExtraction =
            serde_json::from_str(r#"{"average_balance": "n/a"}"#).expect("valid");
        assert_eq!(statement.average_balance, 0.0);
    }
}
