mod rules;

use serde::{Deserialize, Serialize};

use super::checklist::{ChecklistStatus, FormStatus};
use super::domain::{format_amount, ObligationRecord};
use super::eligibility::EligibilityResult;

/// Urgency rank for an outstanding query; Critical sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryPriority {
    Critical,
    High,
    Medium,
    Low,
}

impl QueryPriority {
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    Documents,
    Employment,
    Obligations,
    Eligibility,
    Property,
    Ratios,
    Verification,
}

impl QueryCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Documents => "Document Related Queries",
            Self::Employment => "Employment Verification",
            Self::Obligations => "Loan Obligations & Credit",
            Self::Eligibility => "Loan Eligibility",
            Self::Property => "Property Related",
            Self::Ratios => "Financial Ratios",
            Self::Verification => "Verification Queries",
        }
    }
}

/// One outstanding item an underwriter must resolve before disbursement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub category: QueryCategory,
    pub text: String,
    pub priority: QueryPriority,
}

/// Completeness signals the generator consumes alongside the eligibility
/// verdict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub obligations: Vec<ObligationRecord>,
    pub salary_slip_count: usize,
    pub job_since_years: f64,
    pub average_bank_balance: f64,
}

/// Run every rule over the same inputs, then order the result by priority.
/// The sort is stable, so queries of equal priority keep generation order.
pub fn generate_queries(
    summary: &AnalysisSummary,
    eligibility: &EligibilityResult,
    pending_docs: &ChecklistStatus,
    pending_forms: &FormStatus,
) -> Vec<Query> {
    let mut queries = rules::collect(summary, eligibility, pending_docs, pending_forms);
    queries.sort_by_key(|query| query.priority.rank());
    queries
}

/// Numbered presentation of the query list, or the fixed sentinel when
/// nothing is outstanding.
pub fn format_queries(queries: &[Query]) -> String {
    if queries.is_empty() {
        return "No queries identified. File appears complete for processing.".to_string();
    }

    queries
        .iter()
        .enumerate()
        .map(|(index, query)| format!("{}. {}", index + 1, query.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Underwriter-facing recommendations derived from the verdict.
pub fn generate_recommendations(eligibility: &EligibilityResult) -> Vec<String> {
    let mut recommendations = Vec::new();

    if eligibility.eligible {
        recommendations.push("APPROVED: Application meets eligibility criteria".to_string());
        if let Some(amount) = eligibility.calculations.approved_loan_amount {
            recommendations.push(format!(
                "APPROVED: Recommended loan amount: Rs{}",
                format_amount(amount)
            ));
        }
        return recommendations;
    }

    if let Some(amount) = eligibility.calculations.recommended_loan_amount {
        if amount > 0.0 {
            recommendations.push(format!(
                "WARNING: Maximum possible loan amount: Rs{}",
                format_amount(amount)
            ));
        }
    }
    recommendations.push("WARNING: Consider the following to improve eligibility:".to_string());

    if eligibility.calculations.current_foir_percent > 40.0 {
        recommendations.push("  - Close or reduce existing loan obligations".to_string());
    }
    if eligibility
        .issues
        .iter()
        .any(|issue| matches!(issue, super::eligibility::EligibilityIssue::TenureBeyondPolicy { .. }))
    {
        recommendations.push("  - Reduce loan tenure to match age eligibility".to_string());
    }
    if eligibility
        .issues
        .iter()
        .any(|issue| matches!(issue, super::eligibility::EligibilityIssue::FoirExceeded { .. }))
    {
        recommendations.push("  - Reduce requested loan amount to meet FOIR norms".to_string());
    }

    recommendations
}
