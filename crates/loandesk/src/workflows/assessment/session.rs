use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::checklist::{self, ChecklistStatus, FormField, FormStatus};
use super::domain::{format_amount, LoanRequest, ObligationRecord};
use super::eligibility::{EligibilityEngine, EligibilityResult, PolicyConfig};
use super::extraction::AnalyzedDocument;
use super::intake::{self, CompiledCase};
use super::queries::{self, AnalysisSummary, Query};

/// Employment tenure assumed when the application surface has not supplied
/// one; short enough to keep the appointment-letter requirement in play.
const DEFAULT_JOB_SINCE_YEARS: f64 = 2.0;

/// One full assessment: verdict, completeness breakdowns, and the ordered
/// query list with its presentation rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseAssessment {
    pub eligibility: EligibilityResult,
    pub pending_documents: ChecklistStatus,
    pub pending_form_fields: FormStatus,
    pub queries: Vec<Query>,
    pub formatted_queries: String,
    pub recommendations: Vec<String>,
}

/// Errors raised by session operations. Domain outcomes (ineligibility,
/// missing documents) are never errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no document set has been loaded")]
    NoCaseLoaded,
    #[error("obligation index {index} out of range ({count} obligations)")]
    ObligationIndexOutOfRange { index: usize, count: usize },
}

/// Application context for one analysis session: policy, exclusions, the
/// compiled case, and the last assessment. The engine itself stays
/// stateless; recomputation is always total and replaces the prior result
/// atomically.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    policy: PolicyConfig,
    excluded: BTreeSet<usize>,
    job_since_years: Option<f64>,
    case: Option<CompiledCase>,
    latest: Option<CaseAssessment>,
}

impl AnalysisSession {
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: PolicyConfig) {
        self.policy = policy;
    }

    pub fn set_job_since_years(&mut self, years: f64) {
        self.job_since_years = Some(years);
    }

    /// Compile a new document set. The exclusion set refers to positions in
    /// the obligation list, so it resets whenever the list changes shape.
    pub fn load_documents(&mut self, documents: &[AnalyzedDocument]) {
        self.case = Some(intake::compile(documents));
        self.excluded.clear();
        self.latest = None;
    }

    /// Add obligations from an out-of-band source (e.g. a CSV import).
    pub fn append_obligations(
        &mut self,
        obligations: Vec<ObligationRecord>,
    ) -> Result<(), SessionError> {
        let case = self.case.as_mut().ok_or(SessionError::NoCaseLoaded)?;
        case.obligations.extend(obligations);
        self.excluded.clear();
        self.latest = None;
        Ok(())
    }

    pub fn case(&self) -> Option<&CompiledCase> {
        self.case.as_ref()
    }

    pub fn excluded(&self) -> &BTreeSet<usize> {
        &self.excluded
    }

    pub fn latest(&self) -> Option<&CaseAssessment> {
        self.latest.as_ref()
    }

    /// Flip an obligation in or out of the FOIR computation. Returns whether
    /// the obligation is excluded after the toggle.
    pub fn toggle_exclusion(&mut self, index: usize) -> Result<bool, SessionError> {
        let count = self
            .case
            .as_ref()
            .ok_or(SessionError::NoCaseLoaded)?
            .obligations
            .len();
        if index >= count {
            return Err(SessionError::ObligationIndexOutOfRange { index, count });
        }

        let now_excluded = if self.excluded.remove(&index) {
            false
        } else {
            self.excluded.insert(index);
            true
        };
        Ok(now_excluded)
    }

    /// Recompute the assessment over the full current input set and store it
    /// as the latest result.
    pub fn run(
        &mut self,
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<&CaseAssessment, SessionError> {
        let case = self.case.as_ref().ok_or(SessionError::NoCaseLoaded)?;
        let assessment = assess_case(
            case,
            &self.policy,
            &self.excluded,
            request,
            self.job_since_years.unwrap_or(DEFAULT_JOB_SINCE_YEARS),
            today,
        );
        Ok(self.latest.insert(assessment))
    }
}

/// The full pipeline over one compiled case: eligibility, checklists, then
/// queries. Pure with respect to its arguments; the stateless HTTP surface
/// calls this directly.
pub fn assess_case(
    case: &CompiledCase,
    policy: &PolicyConfig,
    excluded: &BTreeSet<usize>,
    request: &LoanRequest,
    job_since_years: f64,
    today: NaiveDate,
) -> CaseAssessment {
    let engine = EligibilityEngine::new(*policy);
    let eligibility = engine.assess(
        &case.profile,
        &case.salary_records,
        &case.obligations,
        request,
        excluded,
        today,
    );

    let mut pending_documents = checklist::pending_documents(&case.inventory);
    pending_documents.pending_documents.extend(
        checklist::conditional_documents(&case.inventory, job_since_years, &case.obligations),
    );

    let mut form = case.form.clone();
    form.set(FormField::LoanAmount, format_amount(request.amount));
    form.set(
        FormField::Tenure,
        format!(
            "{} years",
            eligibility.calculations.approved_tenure_years
        ),
    );
    let pending_form_fields = checklist::pending_form_fields(&form);

    let summary = AnalysisSummary {
        obligations: case.obligations.clone(),
        salary_slip_count: case.salary_records.len(),
        job_since_years,
        average_bank_balance: case
            .bank
            .map(|bank| bank.average_balance)
            .unwrap_or(0.0),
    };

    let ordered = queries::generate_queries(
        &summary,
        &eligibility,
        &pending_documents,
        &pending_form_fields,
    );
    let formatted_queries = queries::format_queries(&ordered);
    let recommendations = queries::generate_recommendations(&eligibility);

    CaseAssessment {
        eligibility,
        pending_documents,
        pending_form_fields,
        queries: ordered,
        formatted_queries,
        recommendations,
    }
}
