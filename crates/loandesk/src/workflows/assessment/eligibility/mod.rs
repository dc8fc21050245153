mod amortization;
mod config;
mod income;
mod policy;

pub use amortization::{emi_for_principal, foir, principal_for_emi};
pub use config::{PolicyConfig, RawPolicyConfig};
pub use policy::{EligibilityIssue, EligibilityWarning};

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{EarningsBreakdown, LoanRequest, ObligationRecord, SalaryRecord};
use super::profile::ApplicantProfile;
use amortization::round2;
use policy::{decide, VerdictInputs};

/// Age assumed when the date of birth cannot be parsed and no age was
/// declared elsewhere.
const DEFAULT_ASSUMED_AGE: u32 = 30;

const DATE_OF_BIRTH_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%d.%m.%Y"];

/// Stateless calculator applying a [`PolicyConfig`] to one assessment's
/// inputs. Every call recomputes from scratch.
pub struct EligibilityEngine {
    config: PolicyConfig,
}

impl EligibilityEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Compute the full eligibility verdict. Never fails: unparseable or
    /// missing inputs degrade to defaults and are recorded as issues.
    pub fn assess(
        &self,
        profile: &ApplicantProfile,
        salary_records: &[SalaryRecord],
        obligations: &[ObligationRecord],
        request: &LoanRequest,
        excluded: &BTreeSet<usize>,
        today: NaiveDate,
    ) -> EligibilityResult {
        let config = &self.config;
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        let age = match profile
            .date_of_birth
            .as_deref()
            .and_then(parse_date_of_birth)
        {
            Some(dob) => age_on(dob, today),
            None => {
                issues.push(EligibilityIssue::UnknownDateOfBirth);
                profile.declared_age.unwrap_or(DEFAULT_ASSUMED_AGE)
            }
        };

        if age >= config.max_age_salaried {
            issues.push(EligibilityIssue::AgeBeyondPolicy {
                age,
                limit: config.max_age_salaried,
            });
        }

        let remaining_service_years = config.max_age_salaried.saturating_sub(age);
        let max_tenure_allowed = config.max_tenure_years.min(remaining_service_years);

        let mut approved_tenure_years = request.tenure_years.unwrap_or(max_tenure_allowed);
        if approved_tenure_years > max_tenure_allowed {
            issues.push(EligibilityIssue::TenureBeyondPolicy {
                requested_years: approved_tenure_years,
                allowed_years: max_tenure_allowed,
                age,
            });
            approved_tenure_years = max_tenure_allowed;
        }

        let income = income::monthly_income(salary_records);
        let (total_obligations, obligation_details) = aggregate_obligations(obligations, excluded);

        let current_foir = foir(total_obligations, income.gross_monthly_income);
        let max_emi_allowed =
            (income.gross_monthly_income * config.foir_salaried_max - total_obligations).max(0.0);

        let tenure_months = approved_tenure_years * 12;
        let max_loan_by_income =
            principal_for_emi(max_emi_allowed, request.annual_rate_percent, tenure_months);
        let emi_for_requested =
            emi_for_principal(request.amount, request.annual_rate_percent, tenure_months);
        let foir_with_loan = foir(
            total_obligations + emi_for_requested,
            income.gross_monthly_income,
        );

        let verdict = decide(
            &VerdictInputs {
                age,
                max_tenure_allowed,
                approved_tenure_years,
                requested_amount: request.amount,
                gross_monthly_income: income.gross_monthly_income,
                foir_with_loan_percent: foir_with_loan,
                max_loan_by_income,
            },
            config,
            &mut issues,
            &mut warnings,
        );

        if income.gross_monthly_income < config.min_income_threshold {
            warnings.push(EligibilityWarning::IncomeBelowThreshold {
                income: round2(income.gross_monthly_income),
                threshold: config.min_income_threshold,
            });
        }
        if current_foir > config.high_foir_percent() {
            warnings.push(EligibilityWarning::HighExistingObligations {
                current_foir_percent: round2(current_foir),
            });
        }

        EligibilityResult {
            eligible: verdict.eligible,
            issues,
            warnings,
            calculations: CalculationSheet {
                current_age: age,
                remaining_service_years,
                max_tenure_allowed,
                approved_tenure_years,
                gross_monthly_income: round2(income.gross_monthly_income),
                fixed_income: round2(income.fixed_income),
                variable_income_considered: round2(income.variable_income_considered),
                averaged_earnings: income.averaged_earnings,
                total_existing_obligations: round2(total_obligations),
                obligation_details,
                current_foir_percent: round2(current_foir),
                max_emi_allowed: round2(max_emi_allowed),
                max_loan_by_income: round2(max_loan_by_income),
                emi_for_requested_loan: round2(emi_for_requested),
                foir_with_requested_loan: round2(foir_with_loan),
                approved_loan_amount: verdict.approved_loan_amount.map(round2),
                recommended_loan_amount: verdict.recommended_loan_amount.map(round2),
            },
        }
    }
}

/// The calculator's verdict plus every intermediate figure, recomputed from
/// scratch on each call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    pub issues: Vec<EligibilityIssue>,
    pub warnings: Vec<EligibilityWarning>,
    pub calculations: CalculationSheet,
}

impl EligibilityResult {
    pub fn issue_summaries(&self) -> Vec<String> {
        self.issues.iter().map(EligibilityIssue::summary).collect()
    }

    pub fn warning_summaries(&self) -> Vec<String> {
        self.warnings
            .iter()
            .map(EligibilityWarning::summary)
            .collect()
    }
}

/// Intermediate calculation trail; monetary figures are rounded to two
/// decimals here and nowhere earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSheet {
    pub current_age: u32,
    pub remaining_service_years: u32,
    pub max_tenure_allowed: u32,
    pub approved_tenure_years: u32,
    pub gross_monthly_income: f64,
    pub fixed_income: f64,
    pub variable_income_considered: f64,
    pub averaged_earnings: EarningsBreakdown,
    pub total_existing_obligations: f64,
    pub obligation_details: Vec<ObligationDetail>,
    pub current_foir_percent: f64,
    pub max_emi_allowed: f64,
    pub max_loan_by_income: f64,
    pub emi_for_requested_loan: f64,
    pub foir_with_requested_loan: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_loan_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_loan_amount: Option<f64>,
}

/// Per-obligation audit row; excluded obligations stay listed with their
/// flag set so the exclusion is visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationDetail {
    pub lender: String,
    pub amount: f64,
    pub loan_type: String,
    pub excluded: bool,
    pub has_loan_statement: bool,
}

fn aggregate_obligations(
    obligations: &[ObligationRecord],
    excluded: &BTreeSet<usize>,
) -> (f64, Vec<ObligationDetail>) {
    let mut total = 0.0;
    let mut details = Vec::with_capacity(obligations.len());

    for (index, obligation) in obligations.iter().enumerate() {
        let is_excluded = excluded.contains(&index);
        if !is_excluded {
            total += obligation.emi_amount;
        }
        details.push(ObligationDetail {
            lender: obligation.lender_label().to_string(),
            amount: obligation.emi_amount,
            loan_type: obligation.loan_type.clone(),
            excluded: is_excluded,
            has_loan_statement: obligation.has_loan_statement,
        });
    }

    (total, details)
}

fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_OF_BIRTH_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}
