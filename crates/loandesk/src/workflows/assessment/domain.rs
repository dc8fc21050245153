use serde::{Deserialize, Serialize};

/// One payslip's earning components, split into the fixed components counted
/// at face value and the variable components that are damped by policy.
///
/// Missing components default to zero so partially extracted slips still
/// participate in the income average.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarningsBreakdown {
    pub basic: f64,
    pub hra: f64,
    pub conveyance_allowance: f64,
    pub travel_allowance: f64,
    pub medical_allowance: f64,
    pub special_allowance: f64,
    pub lta: f64,
    pub city_compensatory_allowance: f64,
    pub education_allowance: f64,
    pub other_allowances: f64,
    pub incentive: f64,
    pub overtime: f64,
    pub bonus: f64,
    pub commission: f64,
    pub arrears: f64,
}

impl EarningsBreakdown {
    /// Sum of the guaranteed recurring components.
    pub fn fixed_total(&self) -> f64 {
        self.basic
            + self.hra
            + self.conveyance_allowance
            + self.travel_allowance
            + self.medical_allowance
            + self.special_allowance
            + self.lta
            + self.city_compensatory_allowance
            + self.education_allowance
            + self.other_allowances
    }

    /// Sum of the performance-linked components.
    pub fn variable_total(&self) -> f64 {
        self.incentive + self.overtime + self.bonus + self.commission + self.arrears
    }

    pub(crate) fn accumulate(&mut self, other: &EarningsBreakdown) {
        self.basic += other.basic;
        self.hra += other.hra;
        self.conveyance_allowance += other.conveyance_allowance;
        self.travel_allowance += other.travel_allowance;
        self.medical_allowance += other.medical_allowance;
        self.special_allowance += other.special_allowance;
        self.lta += other.lta;
        self.city_compensatory_allowance += other.city_compensatory_allowance;
        self.education_allowance += other.education_allowance;
        self.other_allowances += other.other_allowances;
        self.incentive += other.incentive;
        self.overtime += other.overtime;
        self.bonus += other.bonus;
        self.commission += other.commission;
        self.arrears += other.arrears;
    }

    /// Extraction output is clamped at the boundary; a negative amount is
    /// treated as not extracted.
    pub(crate) fn sanitized(mut self) -> Self {
        for value in [
            &mut self.basic,
            &mut self.hra,
            &mut self.conveyance_allowance,
            &mut self.travel_allowance,
            &mut self.medical_allowance,
            &mut self.special_allowance,
            &mut self.lta,
            &mut self.city_compensatory_allowance,
            &mut self.education_allowance,
            &mut self.other_allowances,
            &mut self.incentive,
            &mut self.overtime,
            &mut self.bonus,
            &mut self.commission,
            &mut self.arrears,
        ] {
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
            }
        }
        self
    }
}

/// Deduction components reported on a payslip. Informational only; the
/// eligibility computation works on gross earnings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionBreakdown {
    pub pf: f64,
    pub esi: f64,
    pub professional_tax: f64,
    pub tds: f64,
    pub loan_recovery: f64,
    pub other_deductions: f64,
}

/// One month of extracted payslip data. Immutable once compiled; the engine
/// only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryRecord {
    pub month: Option<String>,
    pub earnings: EarningsBreakdown,
    pub deductions: DeductionBreakdown,
    pub gross_salary: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
}

/// A recurring debt instalment identified from bank-statement analysis and
/// cross-referenced against loan statements for corroboration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObligationRecord {
    pub lender: String,
    pub emi_amount: f64,
    pub loan_type: String,
    pub has_loan_statement: bool,
}

impl ObligationRecord {
    pub fn lender_label(&self) -> &str {
        if self.lender.trim().is_empty() {
            "Unknown Lender"
        } else {
            &self.lender
        }
    }

    pub fn loan_type_label(&self) -> String {
        if self.loan_type.trim().is_empty() {
            "Unknown".to_string()
        } else {
            title_case(&self.loan_type)
        }
    }
}

/// The loan terms the applicant is asking for. A `None` tenure requests
/// auto-computation from the applicant's remaining service years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub amount: f64,
    pub tenure_years: Option<u32>,
    pub annual_rate_percent: f64,
}

impl LoanRequest {
    pub fn auto_tenure(amount: f64, annual_rate_percent: f64) -> Self {
        Self {
            amount,
            tenure_years: None,
            annual_rate_percent,
        }
    }
}

/// Rupee amount for display: rounded to whole units, thousands separated.
pub(crate) fn format_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub(crate) fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
