//! End-to-end coverage of the document pipeline: JSON extraction payloads in,
//! compiled case, assessment, and queries out.

use chrono::NaiveDate;

use loandesk::workflows::assessment::{
    AnalysisSession, AnalyzedDocument, LoanRequest, PolicyConfig, QueryPriority,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 15).expect("valid date")
}

fn documents() -> Vec<AnalyzedDocument> {
    let payload = serde_json::json!([
        {
            "source": "slip-june.pdf",
            "document_type": "salary_slip",
            "month": "June 2025",
            "employee_name": "Rahul Verma",
            "designation": "Senior Engineer",
            "department": "Platform",
            "employer": "Acme Industries Pvt Ltd",
            "earnings": {"basic": 45000, "hra": 20000, "special_allowance": 15000},
            "gross_salary": 80000,
            "net_salary": 71000
        },
        {
            "source": "slip-july.pdf",
            "document_type": "salary_slip",
            "month": "July 2025",
            "earnings": {"basic": 45000, "hra": 20000, "special_allowance": 15000},
            "gross_salary": 80000
        },
        {
            "source": "pan.jpg",
            "document_type": "pan_card",
            "name": "RAHUL VERMA",
            "pan_number": "ABCDE1234F",
            "date_of_birth": "15/06/1995"
        },
        {
            "source": "aadhaar.jpg",
            "document_type": "aadhaar_card",
            "name": "Rahul Verma",
            "aadhaar_number": "1234 5678 9012",
            "date_of_birth": "1995-06-15",
            "address": "14 MG Road, Pune"
        },
        {
            "source": "statement.pdf",
            "document_type": "bank_statement",
            "account_holder": "Rahul Verma",
            "bank_name": "HDFC Bank",
            "statement_period_months": 6,
            "average_balance": "42,500",
            "emis_found": [
                {"lender": "HDFC Bank", "emi_amount": 10000, "loan_type": "home"},
                {"lender": "SBI Cards", "emi_amount": 6000, "loan_type": "credit card"}
            ]
        },
        {
            "source": "soa-hdfc.pdf",
            "document_type": "loan_statement",
            "lender": "HDFC Bank Home Loans",
            "loan_type": "home",
            "emi_amount": 10000
        },
        {
            "source": "blurry.jpg",
            "document_type": "failed",
            "error": "unreadable scan"
        }
    ]);
    serde_json::from_value(payload).expect("valid document payloads")
}

#[test]
fn documents_compile_into_a_merged_case() {
    let mut session = AnalysisSession::new(PolicyConfig::default());
    session.load_documents(&documents());
    let case = session.case().expect("case compiled");

    // precedence: the salary slip supplies the name before PAN and Aadhaar
    assert_eq!(case.profile.applicant_name.as_deref(), Some("Rahul Verma"));
    assert_eq!(case.profile.date_of_birth.as_deref(), Some("15/06/1995"));
    assert_eq!(case.profile.pan_masked.as_deref(), Some("XXXXXX234F"));
    assert_eq!(case.profile.aadhaar_masked.as_deref(), Some("XXXX XXXX 9012"));
    assert_eq!(case.profile.current_address.as_deref(), Some("14 MG Road, Pune"));

    assert_eq!(case.salary_records.len(), 2);
    assert_eq!(case.obligations.len(), 2);
    // the SOA from "HDFC Bank Home Loans" corroborates the "HDFC Bank" EMI
    assert!(case.obligations[0].has_loan_statement);
    assert!(!case.obligations[1].has_loan_statement);

    let bank = case.bank.expect("bank summary");
    assert_eq!(bank.average_balance, 42_500.0);
    assert_eq!(bank.statement_period_months, 6);

    assert_eq!(case.extraction_failures.len(), 1);
    assert_eq!(case.extraction_failures[0].source, "blurry.jpg");

    assert!(case.inventory.pan_card);
    assert!(case.inventory.aadhaar_card);
    assert!(!case.inventory.form16);
    assert_eq!(case.inventory.salary_slip_count, 2);
}

#[test]
fn assessment_combines_verdict_checklists_and_queries() {
    let mut session = AnalysisSession::new(PolicyConfig::default());
    session.load_documents(&documents());

    let assessment = session
        .run(&LoanRequest::auto_tenure(2_000_000.0, 8.5), today())
        .expect("assessment runs");

    let eligibility = &assessment.eligibility;
    assert_eq!(eligibility.calculations.current_age, 30);
    assert_eq!(eligibility.calculations.gross_monthly_income, 80_000.0);
    assert_eq!(eligibility.calculations.total_existing_obligations, 16_000.0);
    assert!(eligibility.eligible);

    // two slips supplied, three required
    assert!(assessment
        .pending_documents
        .pending_documents
        .iter()
        .any(|item| item.contains("Found 2/3 required")));
    // Form 16 never supplied
    assert!(assessment
        .pending_documents
        .pending_documents
        .iter()
        .any(|item| item.contains("Form 16")));
    // the uncorroborated credit card EMI lands in the conditional list
    assert!(assessment
        .pending_documents
        .pending_documents
        .iter()
        .any(|item| item.contains("Credit Card loan with SBI Cards")));

    assert!(assessment
        .queries
        .iter()
        .any(|query| query.text.contains("additional month(s) salary slip")));
    assert!(assessment
        .queries
        .iter()
        .any(|query| query.text.starts_with("CREDIT CARD STATEMENT")));
    // no Critical queries for an eligible file
    assert!(!assessment
        .queries
        .iter()
        .any(|query| query.priority == QueryPriority::Critical));
    assert!(assessment.formatted_queries.starts_with("1. "));
}

#[test]
fn queries_are_ordered_by_priority_rank() {
    let mut session = AnalysisSession::new(PolicyConfig::default());
    session.load_documents(&documents());

    let assessment = session
        .run(&LoanRequest::auto_tenure(2_000_000.0, 8.5), today())
        .expect("assessment runs");

    let ranks: Vec<u8> = assessment
        .queries
        .iter()
        .map(|query| query.priority.rank())
        .collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted);
}

#[test]
fn an_empty_document_set_still_produces_a_full_assessment() {
    let mut session = AnalysisSession::new(PolicyConfig::default());
    session.load_documents(&[]);

    let assessment = session
        .run(&LoanRequest::auto_tenure(1_000_000.0, 8.5), today())
        .expect("assessment runs");

    assert!(!assessment.eligibility.eligible);
    assert_eq!(
        assessment.eligibility.calculations.gross_monthly_income,
        0.0
    );
    assert_eq!(assessment.pending_documents.completion_percent, 0.0);
    // all five mandatory documents missing, plus the short-tenure conditionals
    let pending = &assessment.pending_documents.pending_documents;
    assert_eq!(pending.len(), 7);
    assert!(pending.iter().any(|item| item.contains("Appointment Letter")));
}
