use chrono::NaiveDate;

use loandesk::workflows::assessment::{AnalysisSession, LoanRequest, PolicyConfig};
use loandesk::workflows::statement::ObligationCsvImporter;

const EXPORT: &str = "\
Lender,EMI Amount,Loan Type,Has Loan Statement
HDFC Bank,\"10,000\",home,yes
Bajaj Finance,5000,personal,no
SBI Cards,6000,credit card,
";

#[test]
fn csv_exports_hydrate_obligation_records() {
    let records = ObligationCsvImporter::from_reader(EXPORT.as_bytes()).expect("valid export");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].lender, "HDFC Bank");
    assert_eq!(records[0].emi_amount, 10_000.0);
    assert!(records[0].has_loan_statement);
    assert_eq!(records[1].loan_type, "personal");
    assert!(!records[1].has_loan_statement);
    assert!(!records[2].has_loan_statement);
}

#[test]
fn imported_obligations_flow_into_the_assessment() {
    let today = NaiveDate::from_ymd_opt(2025, 9, 15).expect("valid date");
    let records = ObligationCsvImporter::from_reader(EXPORT.as_bytes()).expect("valid export");

    let mut session = AnalysisSession::new(PolicyConfig::default());
    session.load_documents(&[]);
    session
        .append_obligations(records)
        .expect("case is loaded");

    let assessment = session
        .run(&LoanRequest::auto_tenure(1_000_000.0, 8.5), today)
        .expect("assessment runs");

    assert_eq!(
        assessment.eligibility.calculations.total_existing_obligations,
        21_000.0
    );
    assert!(assessment
        .queries
        .iter()
        .any(|query| query.text.starts_with("CREDIT CARD STATEMENT")));
}

#[test]
fn malformed_csv_reports_an_import_error() {
    let broken = "Lender,EMI Amount\n\"unterminated,10";
    let result = ObligationCsvImporter::from_reader(broken.as_bytes());
    assert!(result.is_err());
}
