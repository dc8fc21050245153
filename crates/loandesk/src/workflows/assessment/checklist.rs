//! Static document and form checklists plus identity-number masking.
//!
//! Simple lookups over the mandatory document set and the required
//! application-form fields; the assessment pipeline consumes the resulting
//! pending/uploaded breakdowns and feeds them to the query generator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::ObligationRecord;

pub const REQUIRED_SALARY_SLIPS: usize = 3;
pub const REQUIRED_STATEMENT_MONTHS: u32 = 6;
const JOB_TENURE_PROOF_YEARS: f64 = 3.0;

/// Document categories every salaried application must supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MandatoryDocument {
    AadhaarCard,
    PanCard,
    SalarySlips,
    Form16,
    BankStatement,
}

impl MandatoryDocument {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::AadhaarCard,
            Self::PanCard,
            Self::SalarySlips,
            Self::Form16,
            Self::BankStatement,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AadhaarCard => "Aadhaar Card",
            Self::PanCard => "PAN Card",
            Self::SalarySlips => "Latest 3 Months Salary Slips",
            Self::Form16 => "Form 16 (with Part A and Part B)",
            Self::BankStatement => "6 Months Bank Statement",
        }
    }
}

/// Which document categories the applicant has supplied, with the counts and
/// coverage the checklist rules need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentInventory {
    pub aadhaar_card: bool,
    pub pan_card: bool,
    pub salary_slip_count: usize,
    pub form16: bool,
    pub bank_statement: bool,
    pub bank_statement_months: u32,
    pub appointment_letter: bool,
    pub resume: bool,
}

/// Pending/uploaded breakdown over the mandatory document set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecklistStatus {
    pub pending_documents: Vec<String>,
    pub uploaded_documents: Vec<String>,
    pub completion_percent: f64,
}

pub fn pending_documents(inventory: &DocumentInventory) -> ChecklistStatus {
    let mut pending = Vec::new();
    let mut uploaded = Vec::new();

    for document in MandatoryDocument::ordered() {
        let label = document.label();
        match document {
            MandatoryDocument::SalarySlips => {
                let count = inventory.salary_slip_count;
                if count < REQUIRED_SALARY_SLIPS {
                    pending.push(format!(
                        "{label} - Found {count}/{REQUIRED_SALARY_SLIPS} required"
                    ));
                } else {
                    uploaded.push(format!("{label} - Complete ({count} slips)"));
                }
            }
            MandatoryDocument::BankStatement => {
                if inventory.bank_statement {
                    let months = inventory.bank_statement_months;
                    if months < REQUIRED_STATEMENT_MONTHS {
                        pending.push(format!(
                            "{label} - Only {months} months found ({REQUIRED_STATEMENT_MONTHS} months required)"
                        ));
                    } else {
                        uploaded.push(format!("{label} - Complete ({months} months)"));
                    }
                } else {
                    pending.push(label.to_string());
                }
            }
            MandatoryDocument::AadhaarCard | MandatoryDocument::PanCard
            | MandatoryDocument::Form16 => {
                let supplied = match document {
                    MandatoryDocument::AadhaarCard => inventory.aadhaar_card,
                    MandatoryDocument::PanCard => inventory.pan_card,
                    _ => inventory.form16,
                };
                if supplied {
                    uploaded.push(format!("{label} - Uploaded"));
                } else {
                    pending.push(label.to_string());
                }
            }
        }
    }

    let completion_percent = round1(
        uploaded.len() as f64 / MandatoryDocument::ordered().len() as f64 * 100.0,
    );

    ChecklistStatus {
        pending_documents: pending,
        uploaded_documents: uploaded,
        completion_percent,
    }
}

/// Documents required only under specific circumstances: short job tenure, or
/// an identified EMI without a corroborating loan statement.
pub fn conditional_documents(
    inventory: &DocumentInventory,
    job_since_years: f64,
    obligations: &[ObligationRecord],
) -> Vec<String> {
    let mut required = Vec::new();

    if job_since_years < JOB_TENURE_PROOF_YEARS {
        if !inventory.appointment_letter {
            required.push("Appointment Letter (if job < 3 years)".to_string());
        }
        if !inventory.resume {
            required.push("Resume (if job < 3 years)".to_string());
        }
    }

    for obligation in obligations {
        if !obligation.has_loan_statement {
            required.push(format!(
                "Loan Statement/SOA for {} loan with {}",
                obligation.loan_type_label(),
                obligation.lender_label()
            ));
        }
    }

    required
}

/// The application-form fields an underwriter needs filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    ApplicantName,
    SpouseName,
    MotherName,
    CurrentAddress,
    MobileNumber,
    EmailId,
    ChildrenDetails,
    Qualification,
    OfficeAddress,
    OfficeLandline,
    OfficialEmail,
    JobSince,
    TotalExperience,
    Department,
    Designation,
    LoanAmount,
    Tenure,
    InvestmentDetails,
    PropertyAddress,
    PropertyType,
    PropertyPincode,
    PropertyCarpetArea,
    SaleDeedAmount,
    Reference1Name,
    Reference1Mobile,
    Reference1Email,
    Reference1Address,
    Reference2Name,
    Reference2Mobile,
    Reference2Email,
    Reference2Address,
}

impl FormField {
    pub const fn ordered() -> [Self; 31] {
        [
            Self::ApplicantName,
            Self::SpouseName,
            Self::MotherName,
            Self::CurrentAddress,
            Self::MobileNumber,
            Self::EmailId,
            Self::ChildrenDetails,
            Self::Qualification,
            Self::OfficeAddress,
            Self::OfficeLandline,
            Self::OfficialEmail,
            Self::JobSince,
            Self::TotalExperience,
            Self::Department,
            Self::Designation,
            Self::LoanAmount,
            Self::Tenure,
            Self::InvestmentDetails,
            Self::PropertyAddress,
            Self::PropertyType,
            Self::PropertyPincode,
            Self::PropertyCarpetArea,
            Self::SaleDeedAmount,
            Self::Reference1Name,
            Self::Reference1Mobile,
            Self::Reference1Email,
            Self::Reference1Address,
            Self::Reference2Name,
            Self::Reference2Mobile,
            Self::Reference2Email,
            Self::Reference2Address,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ApplicantName => "Applicant Name",
            Self::SpouseName => "Applicant Spouse Name",
            Self::MotherName => "Mother Name",
            Self::CurrentAddress => "Current Address",
            Self::MobileNumber => "Mobile Number",
            Self::EmailId => "Email ID",
            Self::ChildrenDetails => "Children Details",
            Self::Qualification => "Qualification",
            Self::OfficeAddress => "Office Address",
            Self::OfficeLandline => "Office Landline Number",
            Self::OfficialEmail => "Official Email ID",
            Self::JobSince => "Job Since (Date)",
            Self::TotalExperience => "Total Experience",
            Self::Department => "Department",
            Self::Designation => "Designation",
            Self::LoanAmount => "Loan Amount Requested",
            Self::Tenure => "Loan Tenure",
            Self::InvestmentDetails => "Investment Details",
            Self::PropertyAddress => "Property Address",
            Self::PropertyType => "Property Type (Builder/Resale)",
            Self::PropertyPincode => "Property Pincode",
            Self::PropertyCarpetArea => "Property Carpet Area",
            Self::SaleDeedAmount => "Sale Deed Amount",
            Self::Reference1Name => "Reference 1 - Name",
            Self::Reference1Mobile => "Reference 1 - Mobile",
            Self::Reference1Email => "Reference 1 - Email",
            Self::Reference1Address => "Reference 1 - Address",
            Self::Reference2Name => "Reference 2 - Name",
            Self::Reference2Mobile => "Reference 2 - Mobile",
            Self::Reference2Email => "Reference 2 - Email",
            Self::Reference2Address => "Reference 2 - Address",
        }
    }
}

/// Form values gathered from documents and the application surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    values: BTreeMap<FormField, String>,
}

impl FormData {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn set_if_present(&mut self, field: FormField, value: Option<&str>) {
        if let Some(value) = value {
            if !value.trim().is_empty() {
                self.values.insert(field, value.to_string());
            }
        }
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }
}

/// Pending/filled breakdown over the required form fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormStatus {
    pub pending_form_fields: Vec<String>,
    pub filled_form_fields: Vec<String>,
    pub completion_percent: f64,
}

pub fn pending_form_fields(form: &FormData) -> FormStatus {
    let mut pending = Vec::new();
    let mut filled = Vec::new();

    for field in FormField::ordered() {
        let value = form.get(field).map(str::trim).unwrap_or("");
        if value.is_empty() || value == "Not found" || value == "N/A" {
            pending.push(field.label().to_string());
        } else {
            filled.push(format!("{} - Filled", field.label()));
        }
    }

    let completion_percent =
        round1(filled.len() as f64 / FormField::ordered().len() as f64 * 100.0);

    FormStatus {
        pending_form_fields: pending,
        filled_form_fields: filled,
        completion_percent,
    }
}

/// Mask a PAN for display: `XXXXXX` plus the last four characters. Values
/// that are not ten characters after whitespace removal pass through
/// unchanged.
pub fn mask_pan(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();
    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() == 10 {
        let tail: String = chars[6..].iter().collect();
        format!("XXXXXX{tail}")
    } else {
        raw.to_string()
    }
}

/// Mask an Aadhaar number for display: `XXXX XXXX` plus the last four
/// digits. Values without exactly twelve digits pass through unchanged.
pub fn mask_aadhaar(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 12 {
        let tail: String = digits[8..].iter().collect();
        format!("XXXX XXXX {tail}")
    } else {
        raw.to_string()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
