use serde::{Deserialize, Serialize};

use super::super::domain::format_amount;
use super::amortization::round2;
use super::config::PolicyConfig;

/// Blocking problems recorded against an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityIssue {
    UnknownDateOfBirth,
    AgeBeyondPolicy {
        age: u32,
        limit: u32,
    },
    TenureBeyondPolicy {
        requested_years: u32,
        allowed_years: u32,
        age: u32,
    },
    FoirExceeded {
        foir_with_loan_percent: f64,
        limit_percent: f64,
    },
}

impl EligibilityIssue {
    pub fn summary(&self) -> String {
        match self {
            EligibilityIssue::UnknownDateOfBirth => {
                "Unable to determine applicant age from date of birth".to_string()
            }
            EligibilityIssue::AgeBeyondPolicy { age, limit } => {
                format!("Applicant age ({age}) exceeds maximum age limit ({limit})")
            }
            EligibilityIssue::TenureBeyondPolicy {
                requested_years,
                allowed_years,
                age,
            } => format!(
                "Requested tenure ({requested_years} years) exceeds maximum allowed \
                 ({allowed_years} years based on age {age})"
            ),
            EligibilityIssue::FoirExceeded {
                foir_with_loan_percent,
                limit_percent,
            } => format!(
                "FOIR ({foir_with_loan_percent:.2}%) exceeds maximum allowed ({limit_percent:.0}%)"
            ),
        }
    }
}

/// Non-blocking concerns; these can co-occur with an eligible verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EligibilityWarning {
    ConditionalApproval,
    IncomeBelowThreshold { income: f64, threshold: f64 },
    HighExistingObligations { current_foir_percent: f64 },
}

impl EligibilityWarning {
    pub fn summary(&self) -> String {
        match self {
            EligibilityWarning::ConditionalApproval => {
                "Loan may be approved with conditions".to_string()
            }
            EligibilityWarning::IncomeBelowThreshold { threshold, .. } => format!(
                "Gross income is below typical minimum threshold (Rs{})",
                format_amount(*threshold)
            ),
            EligibilityWarning::HighExistingObligations {
                current_foir_percent,
            } => format!("High existing obligations (FOIR: {current_foir_percent:.2}%)"),
        }
    }
}

pub(crate) struct VerdictInputs {
    pub age: u32,
    pub max_tenure_allowed: u32,
    pub approved_tenure_years: u32,
    pub requested_amount: f64,
    pub gross_monthly_income: f64,
    pub foir_with_loan_percent: f64,
    pub max_loan_by_income: f64,
}

pub(crate) struct Verdict {
    pub eligible: bool,
    pub approved_loan_amount: Option<f64>,
    pub recommended_loan_amount: Option<f64>,
}

/// Final eligibility rule. The FOIR test is hard-blocking; failing only the
/// age/tenure sub-conditions downgrades to a conditional approval with the
/// amount capped by income capacity. Zero income cannot carry a positive
/// requested amount even though its FOIR reads 0.
pub(crate) fn decide(
    inputs: &VerdictInputs,
    config: &PolicyConfig,
    issues: &mut Vec<EligibilityIssue>,
    warnings: &mut Vec<EligibilityWarning>,
) -> Verdict {
    let income_supports_loan =
        inputs.gross_monthly_income > 0.0 || inputs.requested_amount == 0.0;
    let foir_within =
        inputs.foir_with_loan_percent <= config.foir_limit_percent() && income_supports_loan;

    if foir_within {
        if inputs.age < config.max_age_salaried
            && inputs.approved_tenure_years <= inputs.max_tenure_allowed
        {
            Verdict {
                eligible: true,
                approved_loan_amount: Some(inputs.requested_amount),
                recommended_loan_amount: None,
            }
        } else {
            warnings.push(EligibilityWarning::ConditionalApproval);
            Verdict {
                eligible: false,
                approved_loan_amount: Some(
                    inputs.requested_amount.min(inputs.max_loan_by_income),
                ),
                recommended_loan_amount: None,
            }
        }
    } else {
        issues.push(EligibilityIssue::FoirExceeded {
            foir_with_loan_percent: round2(inputs.foir_with_loan_percent),
            limit_percent: config.foir_limit_percent(),
        });
        Verdict {
            eligible: false,
            approved_loan_amount: None,
            recommended_loan_amount: Some(inputs.max_loan_by_income),
        }
    }
}
