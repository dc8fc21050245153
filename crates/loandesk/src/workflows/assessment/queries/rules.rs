use super::super::checklist::{ChecklistStatus, FormStatus};
use super::super::domain::format_amount;
use super::super::eligibility::{EligibilityIssue, EligibilityResult};
use super::{AnalysisSummary, Query, QueryCategory, QueryPriority};

const STRETCHED_FOIR_PERCENT: f64 = 40.0;
const MIN_INCOME_PROOF_THRESHOLD: f64 = 25_000.0;
const MIN_AVERAGE_BALANCE: f64 = 10_000.0;
const REQUIRED_SALARY_SLIPS: usize = 3;
const MIN_JOB_TENURE_YEARS: f64 = 3.0;

/// Form fields whose absence blocks processing outright.
const CRITICAL_FORM_FIELDS: [&str; 4] = [
    "Mobile Number",
    "Email ID",
    "Current Address",
    "Office Address",
];

/// Each rule appends zero or more queries; all rules run unconditionally
/// over the same inputs.
pub(super) fn collect(
    summary: &AnalysisSummary,
    eligibility: &EligibilityResult,
    pending_docs: &ChecklistStatus,
    pending_forms: &FormStatus,
) -> Vec<Query> {
    let mut queries = Vec::new();

    pending_document_queries(pending_docs, &mut queries);
    employment_queries(summary, pending_forms, &mut queries);
    obligation_queries(summary, &mut queries);
    eligibility_queries(eligibility, &mut queries);
    ratio_and_income_queries(eligibility, &mut queries);
    form_field_queries(pending_forms, &mut queries);
    banking_queries(summary, &mut queries);
    salary_slip_count_queries(summary, &mut queries);

    queries
}

fn pending_document_queries(pending_docs: &ChecklistStatus, queries: &mut Vec<Query>) {
    for document in &pending_docs.pending_documents {
        let text = if document.contains("Salary Slip") {
            format!("SALARY SLIP - {document}")
        } else if document.contains("Form 16") {
            "FORM 16 - Latest Form 16 with Part A and Part B required".to_string()
        } else if document.contains("Bank Statement") {
            "BANK STATEMENT - 6 months salary account bank statement required in PDF format"
                .to_string()
        } else {
            format!("{} - Required for processing", document.to_uppercase())
        };
        queries.push(Query {
            category: QueryCategory::Documents,
            text,
            priority: QueryPriority::High,
        });
    }
}

fn employment_queries(
    summary: &AnalysisSummary,
    pending_forms: &FormStatus,
    queries: &mut Vec<Query>,
) {
    if summary.job_since_years < MIN_JOB_TENURE_YEARS {
        queries.push(Query {
            category: QueryCategory::Employment,
            text: "APPOINTMENT LETTER - Required as current employment is less than 3 years"
                .to_string(),
            priority: QueryPriority::Medium,
        });
        queries.push(Query {
            category: QueryCategory::Employment,
            text: "RESUME - Complete work history required".to_string(),
            priority: QueryPriority::Medium,
        });
    }

    if pending_forms
        .pending_form_fields
        .iter()
        .any(|field| field.contains("Office Address"))
    {
        queries.push(Query {
            category: QueryCategory::Employment,
            text: "EMPLOYER LETTER - Detailed office address required for verification"
                .to_string(),
            priority: QueryPriority::High,
        });
    }
}

fn obligation_queries(summary: &AnalysisSummary, queries: &mut Vec<Query>) {
    for obligation in &summary.obligations {
        if obligation.has_loan_statement {
            continue;
        }
        queries.push(Query {
            category: QueryCategory::Obligations,
            text: format!(
                "LOAN OUTSTANDING LETTER - {} loan with {}, EMI Rs{} - Statement of Account required",
                obligation.loan_type_label(),
                obligation.lender_label(),
                format_amount(obligation.emi_amount)
            ),
            priority: QueryPriority::High,
        });
    }

    if summary
        .obligations
        .iter()
        .any(|obligation| obligation.loan_type.eq_ignore_ascii_case("credit card"))
    {
        queries.push(Query {
            category: QueryCategory::Obligations,
            text: "CREDIT CARD STATEMENT - Latest credit card statement required to verify \
                   outstanding and utilization"
                .to_string(),
            priority: QueryPriority::Medium,
        });
    }
}

fn eligibility_queries(eligibility: &EligibilityResult, queries: &mut Vec<Query>) {
    if eligibility.eligible {
        return;
    }

    for issue in &eligibility.issues {
        match issue {
            EligibilityIssue::FoirExceeded {
                foir_with_loan_percent,
                limit_percent,
            } => queries.push(Query {
                category: QueryCategory::Eligibility,
                text: format!(
                    "LOAN ELIGIBILITY NOT AS PER NORMS - FOIR at {foir_with_loan_percent:.1}% \
                     exceeds {limit_percent:.0}%. Loan amount may need to be reduced or existing \
                     loans closed."
                ),
                priority: QueryPriority::Critical,
            }),
            EligibilityIssue::AgeBeyondPolicy { .. }
            | EligibilityIssue::TenureBeyondPolicy { .. } => queries.push(Query {
                category: QueryCategory::Eligibility,
                text: "LOAN TERM NOT AS PER NORMS - Tenure exceeds maximum allowed based on \
                       applicant age. Confirmation required."
                    .to_string(),
                priority: QueryPriority::High,
            }),
            EligibilityIssue::UnknownDateOfBirth => {}
        }
    }
}

fn ratio_and_income_queries(eligibility: &EligibilityResult, queries: &mut Vec<Query>) {
    let current_foir = eligibility.calculations.current_foir_percent;
    if current_foir > STRETCHED_FOIR_PERCENT {
        queries.push(Query {
            category: QueryCategory::Ratios,
            text: format!(
                "STRETCHED RATIOS NOT JUSTIFIED - Current FOIR at {current_foir:.1}% indicates \
                 high existing obligations. Consider loan closure before disbursement."
            ),
            priority: QueryPriority::High,
        });
    }

    let gross_income = eligibility.calculations.gross_monthly_income;
    if gross_income < MIN_INCOME_PROOF_THRESHOLD {
        queries.push(Query {
            category: QueryCategory::Eligibility,
            text: format!(
                "OTHER INCOME PROOF - Gross monthly income (Rs{}) is below minimum threshold. \
                 Additional income proof may be required.",
                format_amount(gross_income)
            ),
            priority: QueryPriority::Medium,
        });
    }
}

fn form_field_queries(pending_forms: &FormStatus, queries: &mut Vec<Query>) {
    for field in &pending_forms.pending_form_fields {
        if CRITICAL_FORM_FIELDS
            .iter()
            .any(|critical| field.contains(critical))
        {
            queries.push(Query {
                category: QueryCategory::Verification,
                text: format!("FORM DETAILS INCOMPLETE - {field} required for processing"),
                priority: QueryPriority::High,
            });
        }
    }

    if pending_forms
        .pending_form_fields
        .iter()
        .any(|field| field == "Property Address")
    {
        queries.push(Query {
            category: QueryCategory::Property,
            text: "PROPERTY - COST BREAK UP SHEET - Property details and cost breakup required"
                .to_string(),
            priority: QueryPriority::Medium,
        });
    }

    // One reference query regardless of how many reference fields are open.
    if pending_forms
        .pending_form_fields
        .iter()
        .any(|field| field.contains("Reference"))
    {
        queries.push(Query {
            category: QueryCategory::Verification,
            text: "REFERENCE DETAILS - Complete details of both references required \
                   (Name, Mobile, Email, Address)"
                .to_string(),
            priority: QueryPriority::Low,
        });
    }
}

fn banking_queries(summary: &AnalysisSummary, queries: &mut Vec<Query>) {
    if summary.average_bank_balance < MIN_AVERAGE_BALANCE {
        queries.push(Query {
            category: QueryCategory::Ratios,
            text: format!(
                "BANK BALANCES NOT AS PER NORMS - Low average balance (Rs{}) observed. \
                 Better banking required.",
                format_amount(summary.average_bank_balance)
            ),
            priority: QueryPriority::Medium,
        });
    }
}

fn salary_slip_count_queries(summary: &AnalysisSummary, queries: &mut Vec<Query>) {
    if summary.salary_slip_count < REQUIRED_SALARY_SLIPS {
        let months_needed = REQUIRED_SALARY_SLIPS - summary.salary_slip_count;
        queries.push(Query {
            category: QueryCategory::Documents,
            text: format!(
                "SALARY SLIP - {months_needed} additional month(s) salary slip required \
                 (total {REQUIRED_SALARY_SLIPS} months needed)"
            ),
            priority: QueryPriority::High,
        });
    }
}
