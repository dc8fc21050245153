//! Loan eligibility assessment over extracted applicant documents.
//!
//! The pipeline is deterministic and synchronous: typed extraction results
//! compile into a case, the eligibility engine produces a verdict with its
//! full calculation trail, the checklists report completeness, and the query
//! generator turns all of it into a prioritized worklist for the underwriter.

pub mod checklist;
pub mod domain;
pub mod eligibility;
pub mod extraction;
pub mod intake;
pub mod profile;
pub mod queries;
pub mod session;

#[cfg(test)]
mod tests;

pub use checklist::{
    ChecklistStatus, DocumentInventory, FormData, FormField, FormStatus, MandatoryDocument,
};
pub use domain::{
    DeductionBreakdown, EarningsBreakdown, LoanRequest, ObligationRecord, SalaryRecord,
};
pub use eligibility::{
    emi_for_principal, foir, principal_for_emi, CalculationSheet, EligibilityEngine,
    EligibilityIssue, EligibilityResult, EligibilityWarning, ObligationDetail, PolicyConfig,
    RawPolicyConfig,
};
pub use extraction::{AnalyzedDocument, DocumentKind, ExtractionOutcome};
pub use intake::{BankSummary, CompiledCase, ExtractionFailure};
pub use profile::{ApplicantProfile, ProfileFacts};
pub use queries::{
    format_queries, generate_queries, generate_recommendations, AnalysisSummary, Query,
    QueryCategory, QueryPriority,
};
pub use session::{assess_case, AnalysisSession, CaseAssessment, SessionError};
