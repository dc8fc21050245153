use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::workflows::assessment::domain::{
    EarningsBreakdown, LoanRequest, ObligationRecord, SalaryRecord,
};
use crate::workflows::assessment::eligibility::{
    EligibilityEngine, EligibilityResult, PolicyConfig,
};
use crate::workflows::assessment::profile::ApplicantProfile;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 15).expect("valid date")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(PolicyConfig::default())
}

pub(super) fn salary_slip(basic: f64, hra: f64, special: f64, incentive: f64) -> SalaryRecord {
    SalaryRecord {
        earnings: EarningsBreakdown {
            basic,
            hra,
            special_allowance: special,
            incentive,
            ..EarningsBreakdown::default()
        },
        ..SalaryRecord::default()
    }
}

/// Three months of a fixed Rs 80,000 package with no variable pay.
pub(super) fn standard_salary_records() -> Vec<SalaryRecord> {
    (0..3)
        .map(|_| salary_slip(45_000.0, 20_000.0, 15_000.0, 0.0))
        .collect()
}

pub(super) fn obligations() -> Vec<ObligationRecord> {
    vec![
        ObligationRecord {
            lender: "HDFC Bank".to_string(),
            emi_amount: 10_000.0,
            loan_type: "home".to_string(),
            has_loan_statement: true,
        },
        ObligationRecord {
            lender: "Bajaj Finance".to_string(),
            emi_amount: 5_000.0,
            loan_type: "personal".to_string(),
            has_loan_statement: false,
        },
    ]
}

/// Thirty years old as of [`today`].
pub(super) fn profile() -> ApplicantProfile {
    ApplicantProfile {
        applicant_name: Some("Rahul Verma".to_string()),
        date_of_birth: Some("15/06/1995".to_string()),
        employer: Some("Acme Industries".to_string()),
        designation: Some("Senior Engineer".to_string()),
        ..ApplicantProfile::default()
    }
}

pub(super) fn profile_aged(date_of_birth: &str) -> ApplicantProfile {
    ApplicantProfile {
        date_of_birth: Some(date_of_birth.to_string()),
        ..profile()
    }
}

pub(super) fn request(amount: f64) -> LoanRequest {
    LoanRequest::auto_tenure(amount, 8.5)
}

pub(super) fn assess(
    profile: &ApplicantProfile,
    salary_records: &[SalaryRecord],
    obligations: &[ObligationRecord],
    request: &LoanRequest,
) -> EligibilityResult {
    engine().assess(
        profile,
        salary_records,
        obligations,
        request,
        &BTreeSet::new(),
        today(),
    )
}
