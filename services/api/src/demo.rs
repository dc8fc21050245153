use chrono::{Local, NaiveDate};
use clap::Args;
use loandesk::error::AppError;
use loandesk::workflows::assessment::{
    AnalysisSession, AnalyzedDocument, ApplicantProfile, CaseAssessment, ExtractionOutcome,
    LoanRequest, PolicyConfig,
};
use loandesk::workflows::assessment::extraction::{
    AadhaarCardExtraction, BankStatementExtraction, EmiSighting, Form16Extraction,
    LoanStatementExtraction, PanCardExtraction, SalarySlipExtraction,
};
use loandesk::workflows::assessment::EarningsBreakdown;
use loandesk::workflows::statement::ObligationCsvImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding an array of extracted document payloads
    #[arg(long)]
    pub(crate) documents: PathBuf,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) amount: f64,
    /// Annual interest rate in percent
    #[arg(long, default_value_t = 8.5)]
    pub(crate) rate: f64,
    /// Requested tenure in years (auto-computed from age when omitted)
    #[arg(long)]
    pub(crate) tenure: Option<u32>,
    /// Obligation indices to exclude from the FOIR computation
    #[arg(long)]
    pub(crate) exclude: Vec<usize>,
    /// Optional CSV export of additional EMI obligations
    #[arg(long)]
    pub(crate) obligations_csv: Option<PathBuf>,
    /// Employment tenure in years at the current employer
    #[arg(long)]
    pub(crate) job_since_years: Option<f64>,
    /// Assessment date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Requested loan amount for the canned applicant
    #[arg(long, default_value_t = 5_200_000.0)]
    pub(crate) amount: f64,
    /// Annual interest rate in percent
    #[arg(long, default_value_t = 8.5)]
    pub(crate) rate: f64,
    /// Assessment date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        documents,
        amount,
        rate,
        tenure,
        exclude,
        obligations_csv,
        job_since_years,
        today,
    } = args;

    let file = std::fs::File::open(&documents)?;
    let documents: Vec<AnalyzedDocument> = serde_json::from_reader(file)
        .map_err(|err| AppError::InvalidInput(format!("document payloads: {err}")))?;

    let mut session = AnalysisSession::new(PolicyConfig::default());
    session.load_documents(&documents);
    if let Some(years) = job_since_years {
        session.set_job_since_years(years);
    }
    if let Some(path) = obligations_csv {
        let imported = ObligationCsvImporter::from_path(path)?;
        session
            .append_obligations(imported)
            .map_err(|err| AppError::InvalidInput(err.to_string()))?;
    }
    for index in exclude {
        session
            .toggle_exclusion(index)
            .map_err(|err| AppError::InvalidInput(err.to_string()))?;
    }

    let request = LoanRequest {
        amount,
        tenure_years: tenure,
        annual_rate_percent: rate,
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let profile = session
        .case()
        .map(|case| case.profile.clone())
        .unwrap_or_default();
    let assessment = session
        .run(&request, today)
        .map_err(|err| AppError::InvalidInput(err.to_string()))?;

    render_assessment(&profile, assessment, today);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { amount, rate, today } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let mut session = AnalysisSession::new(PolicyConfig::default());
    session.load_documents(&demo_documents());

    let request = LoanRequest::auto_tenure(amount, rate);
    let profile = session
        .case()
        .map(|case| case.profile.clone())
        .unwrap_or_default();
    let assessment = session
        .run(&request, today)
        .map_err(|err| AppError::InvalidInput(err.to_string()))?;

    println!("Loan assessment demo (canned document set)\n");
    render_assessment(&profile, assessment, today);
    Ok(())
}

fn render_assessment(profile: &ApplicantProfile, assessment: &CaseAssessment, today: NaiveDate) {
    let calculations = &assessment.eligibility.calculations;

    println!("Applicant");
    println!(
        "- Name: {}",
        profile.applicant_name.as_deref().unwrap_or("Not found")
    );
    println!(
        "- Employer: {}",
        profile.employer.as_deref().unwrap_or("Not found")
    );
    if let Some(pan) = profile.pan_masked.as_deref() {
        println!("- PAN: {pan}");
    }
    if let Some(aadhaar) = profile.aadhaar_masked.as_deref() {
        println!("- Aadhaar: {aadhaar}");
    }
    println!("- Age: {} (as of {})", calculations.current_age, today);

    println!("\nEligibility");
    println!(
        "- Verdict: {}",
        if assessment.eligibility.eligible {
            "ELIGIBLE"
        } else {
            "NOT ELIGIBLE"
        }
    );
    println!(
        "- Gross monthly income: Rs{:.2}",
        calculations.gross_monthly_income
    );
    println!(
        "- Existing obligations: Rs{:.2}",
        calculations.total_existing_obligations
    );
    println!(
        "- Tenure: {} years (max allowed {})",
        calculations.approved_tenure_years, calculations.max_tenure_allowed
    );
    println!(
        "- EMI for requested loan: Rs{:.2}",
        calculations.emi_for_requested_loan
    );
    println!(
        "- FOIR with requested loan: {:.2}%",
        calculations.foir_with_requested_loan
    );
    if let Some(approved) = calculations.approved_loan_amount {
        println!("- Approved amount: Rs{approved:.2}");
    }
    if let Some(recommended) = calculations.recommended_loan_amount {
        println!("- Recommended amount: Rs{recommended:.2}");
    }

    for issue in assessment.eligibility.issue_summaries() {
        println!("- Issue: {issue}");
    }
    for warning in assessment.eligibility.warning_summaries() {
        println!("- Warning: {warning}");
    }

    println!("\nObligations");
    if calculations.obligation_details.is_empty() {
        println!("- none identified");
    }
    for detail in &calculations.obligation_details {
        println!(
            "- {} | {} | Rs{:.2}/month | {}{}",
            detail.lender,
            detail.loan_type,
            detail.amount,
            if detail.has_loan_statement {
                "statement on file"
            } else {
                "no statement"
            },
            if detail.excluded { " | excluded" } else { "" }
        );
    }

    println!(
        "\nDocument checklist ({:.1}% complete)",
        assessment.pending_documents.completion_percent
    );
    if assessment.pending_documents.pending_documents.is_empty() {
        println!("- nothing pending");
    }
    for pending in &assessment.pending_documents.pending_documents {
        println!("- Pending: {pending}");
    }

    println!(
        "\nForm completeness: {:.1}% ({} fields pending)",
        assessment.pending_form_fields.completion_percent,
        assessment.pending_form_fields.pending_form_fields.len()
    );

    println!("\nQueries for the applicant");
    println!("{}", assessment.formatted_queries);

    println!("\nRecommendations");
    for recommendation in &assessment.recommendations {
        println!("{recommendation}");
    }
}

fn demo_documents() -> Vec<AnalyzedDocument> {
    let earnings = EarningsBreakdown {
        basic: 45_000.0,
        hra: 20_000.0,
        special_allowance: 12_000.0,
        incentive: 6_000.0,
        ..EarningsBreakdown::default()
    };

    let slip = |month: &str| AnalyzedDocument {
        source: format!("salary-{month}.pdf"),
        outcome: ExtractionOutcome::SalarySlip(SalarySlipExtraction {
            month: Some(month.to_string()),
            employee_name: Some("Rahul Verma".to_string()),
            designation: Some("Senior Engineer".to_string()),
            department: Some("Platform".to_string()),
            employer: Some("Acme Industries Pvt Ltd".to_string()),
            earnings: earnings.clone(),
            gross_salary: 83_000.0,
            net_salary: 74_500.0,
            ..SalarySlipExtraction::default()
        }),
    };

    vec![
        slip("2025-06"),
        slip("2025-07"),
        slip("2025-08"),
        AnalyzedDocument {
            source: "pan.jpg".to_string(),
            outcome: ExtractionOutcome::PanCard(PanCardExtraction {
                name: Some("RAHUL VERMA".to_string()),
                pan_number: Some("ABCDE1234F".to_string()),
                father_name: Some("Suresh Verma".to_string()),
                date_of_birth: Some("15/06/1995".to_string()),
            }),
        },
        AnalyzedDocument {
            source: "aadhaar.jpg".to_string(),
            outcome: ExtractionOutcome::AadhaarCard(AadhaarCardExtraction {
                name: Some("Rahul Verma".to_string()),
                aadhaar_number: Some("123456789012".to_string()),
                date_of_birth: Some("15/06/1995".to_string()),
                gender: Some("Male".to_string()),
                address: Some("14 MG Road, Pune 411001".to_string()),
            }),
        },
        AnalyzedDocument {
            source: "form16.pdf".to_string(),
            outcome: ExtractionOutcome::Form16(Form16Extraction {
                employee_name: Some("Rahul Verma".to_string()),
                employer: Some("Acme Industries Pvt Ltd".to_string()),
                financial_year: Some("2024-25".to_string()),
                gross_salary: 996_000.0,
                ..Form16Extraction::default()
            }),
        },
        AnalyzedDocument {
            source: "statement.pdf".to_string(),
            outcome: ExtractionOutcome::BankStatement(BankStatementExtraction {
                account_holder: Some("Rahul Verma".to_string()),
                bank_name: Some("HDFC Bank".to_string()),
                statement_period_months: 6,
                average_balance: 38_000.0,
                emis_found: vec![
                    EmiSighting {
                        lender: "HDFC Bank".to_string(),
                        emi_amount: 10_000.0,
                        loan_type: "home".to_string(),
                        ..EmiSighting::default()
                    },
                    EmiSighting {
                        lender: "SBI Cards".to_string(),
                        emi_amount: 6_000.0,
                        loan_type: "credit card".to_string(),
                        ..EmiSighting::default()
                    },
                ],
                ..BankStatementExtraction::default()
            }),
        },
        AnalyzedDocument {
            source: "soa-hdfc.pdf".to_string(),
            outcome: ExtractionOutcome::LoanStatement(LoanStatementExtraction {
                lender: "HDFC Bank Home Loans".to_string(),
                loan_type: "home".to_string(),
                emi_amount: 10_000.0,
                ..LoanStatementExtraction::default()
            }),
        },
    ]
}
