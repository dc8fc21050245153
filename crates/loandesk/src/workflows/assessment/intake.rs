//! Boundary where extraction output becomes engine input.
//!
//! Partitions analyzed documents by category, clamps suspect numbers, builds
//! the obligation list with loan-statement corroboration, derives the
//! document inventory, and merges applicant facts in the documented
//! precedence order: salary slip, PAN, Aadhaar, Form 16, bank statement.

use serde::{Deserialize, Serialize};

use super::checklist::{self, DocumentInventory, FormData, FormField};
use super::domain::{ObligationRecord, SalaryRecord};
use super::extraction::{
    AadhaarCardExtraction, AnalyzedDocument, BankStatementExtraction, ExtractionOutcome,
    Form16Extraction, LoanStatementExtraction, PanCardExtraction, SalarySlipExtraction,
};
use super::profile::{ApplicantProfile, ProfileFacts};

/// Headline figures from the primary (first) bank statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BankSummary {
    pub average_balance: f64,
    pub statement_period_months: u32,
}

/// A document the extraction service could not read. Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    pub source: String,
    pub error: String,
}

/// Everything the assessment pipeline needs, compiled from one document set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledCase {
    pub profile: ApplicantProfile,
    pub salary_records: Vec<SalaryRecord>,
    pub obligations: Vec<ObligationRecord>,
    pub bank: Option<BankSummary>,
    pub inventory: DocumentInventory,
    pub form: FormData,
    pub extraction_failures: Vec<ExtractionFailure>,
}

pub fn compile(documents: &[AnalyzedDocument]) -> CompiledCase {
    let mut slips: Vec<&SalarySlipExtraction> = Vec::new();
    let mut statements: Vec<&BankStatementExtraction> = Vec::new();
    let mut pan: Option<&PanCardExtraction> = None;
    let mut aadhaar: Option<&AadhaarCardExtraction> = None;
    let mut form16: Option<&Form16Extraction> = None;
    let mut loan_statements: Vec<&LoanStatementExtraction> = Vec::new();
    let mut failures = Vec::new();

    for document in documents {
        match &document.outcome {
            ExtractionOutcome::SalarySlip(slip) => slips.push(slip),
            ExtractionOutcome::BankStatement(statement) => statements.push(statement),
            ExtractionOutcome::PanCard(card) => {
                pan.get_or_insert(card);
            }
            ExtractionOutcome::AadhaarCard(card) => {
                aadhaar.get_or_insert(card);
            }
            ExtractionOutcome::Form16(form) => {
                form16.get_or_insert(form);
            }
            ExtractionOutcome::LoanStatement(statement) => loan_statements.push(statement),
            ExtractionOutcome::Other(_) => {}
            ExtractionOutcome::Failed { error } => failures.push(ExtractionFailure {
                source: document.source.clone(),
                error: error.clone(),
            }),
        }
    }

    let salary_records = slips.iter().map(|slip| salary_record(slip)).collect();
    let obligations = collect_obligations(&statements, &loan_statements);
    let bank = statements.first().map(|statement| BankSummary {
        average_balance: statement.average_balance.max(0.0),
        statement_period_months: statement.statement_period_months,
    });

    let inventory = DocumentInventory {
        aadhaar_card: aadhaar.is_some(),
        pan_card: pan.is_some(),
        salary_slip_count: slips.len(),
        form16: form16.is_some(),
        bank_statement: !statements.is_empty(),
        bank_statement_months: bank.map(|summary| summary.statement_period_months).unwrap_or(0),
        appointment_letter: false,
        resume: false,
    };

    let profile = merge_profile(&slips, pan, aadhaar, form16, &statements);
    let form = document_form_data(&profile);

    CompiledCase {
        profile,
        salary_records,
        obligations,
        bank,
        inventory,
        form,
        extraction_failures: failures,
    }
}

fn salary_record(slip: &SalarySlipExtraction) -> SalaryRecord {
    SalaryRecord {
        month: slip.month.clone(),
        earnings: slip.earnings.clone().sanitized(),
        deductions: slip.deductions.clone(),
        gross_salary: slip.gross_salary.max(0.0),
        total_deductions: slip.total_deductions.max(0.0),
        net_salary: slip.net_salary.max(0.0),
    }
}

fn collect_obligations(
    statements: &[&BankStatementExtraction],
    loan_statements: &[&LoanStatementExtraction],
) -> Vec<ObligationRecord> {
    let mut obligations: Vec<ObligationRecord> = statements
        .iter()
        .flat_map(|statement| statement.emis_found.iter())
        .map(|sighting| ObligationRecord {
            lender: sighting.lender.clone(),
            emi_amount: sighting.emi_amount.max(0.0),
            loan_type: sighting.loan_type.clone(),
            has_loan_statement: sighting.has_loan_document,
        })
        .collect();

    for statement in loan_statements {
        for obligation in &mut obligations {
            if lenders_match(&obligation.lender, &statement.lender) {
                obligation.has_loan_statement = true;
            }
        }
    }

    obligations
}

fn merge_profile(
    slips: &[&SalarySlipExtraction],
    pan: Option<&PanCardExtraction>,
    aadhaar: Option<&AadhaarCardExtraction>,
    form16: Option<&Form16Extraction>,
    statements: &[&BankStatementExtraction],
) -> ApplicantProfile {
    let mut profile = ApplicantProfile::default();

    if let Some(slip) = slips.first() {
        profile.absorb(ProfileFacts {
            applicant_name: slip.employee_name.clone(),
            employer: slip.employer.clone(),
            designation: slip.designation.clone(),
            department: slip.department.clone(),
            ..ProfileFacts::default()
        });
    }
    if let Some(card) = pan {
        profile.absorb(ProfileFacts {
            applicant_name: card.name.clone(),
            date_of_birth: card.date_of_birth.clone(),
            father_name: card.father_name.clone(),
            pan_masked: card.pan_number.as_deref().map(checklist::mask_pan),
            ..ProfileFacts::default()
        });
    }
    if let Some(card) = aadhaar {
        profile.absorb(ProfileFacts {
            applicant_name: card.name.clone(),
            date_of_birth: card.date_of_birth.clone(),
            gender: card.gender.clone(),
            current_address: card.address.clone(),
            aadhaar_masked: card.aadhaar_number.as_deref().map(checklist::mask_aadhaar),
            ..ProfileFacts::default()
        });
    }
    if let Some(form) = form16 {
        profile.absorb(ProfileFacts {
            applicant_name: form.employee_name.clone(),
            employer: form.employer.clone(),
            ..ProfileFacts::default()
        });
    }
    if let Some(statement) = statements.first() {
        profile.absorb(ProfileFacts {
            applicant_name: statement.account_holder.clone(),
            ..ProfileFacts::default()
        });
    }

    profile
}

fn document_form_data(profile: &ApplicantProfile) -> FormData {
    let mut form = FormData::default();
    form.set_if_present(FormField::ApplicantName, profile.applicant_name.as_deref());
    form.set_if_present(FormField::CurrentAddress, profile.current_address.as_deref());
    form.set_if_present(FormField::OfficeAddress, profile.employer.as_deref());
    form.set_if_present(FormField::Designation, profile.designation.as_deref());
    form.set_if_present(FormField::Department, profile.department.as_deref());
    form
}

/// Conservative lender matching for corroboration: case and punctuation are
/// folded, and containment either way counts so branch suffixes still match.
pub(crate) fn lenders_match(left: &str, right: &str) -> bool {
    let left = normalize_lender(left);
    let right = normalize_lender(right);
    if left.is_empty() || right.is_empty() {
        return false;
    }
    left == right || left.contains(&right) || right.contains(&left)
}

fn normalize_lender(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !folded.is_empty() {
                folded.push(' ');
            }
            pending_space = false;
            folded.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lender_matching_folds_case_and_punctuation() {
        assert!(lenders_match("HDFC Bank", "hdfc bank"));
        assert!(lenders_match("Bajaj Finance Ltd.", "Bajaj Finance"));
        assert!(lenders_match("HDFC Bank Home Loans", "HDFC Bank"));
        assert!(!lenders_match("HDFC Bank", "ICICI Bank"));
        assert!(!lenders_match("", "ICICI Bank"));
    }

    #[test]
    fn normalization_collapses_separators() {
        assert_eq!(normalize_lender("  Bajaj--Finance  Ltd. "), "bajaj finance ltd");
    }
}
