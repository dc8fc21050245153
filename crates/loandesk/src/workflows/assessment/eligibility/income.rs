use super::super::domain::{EarningsBreakdown, SalaryRecord};

/// Fixed six-month horizon for damping variable pay. The divisor does not
/// shrink with fewer payslips, so short histories understate the variable
/// contribution; that is the lending policy, not an averaging bug.
const VARIABLE_AVERAGING_MONTHS: f64 = 6.0;
const VARIABLE_HAIRCUT: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct IncomeComputation {
    pub gross_monthly_income: f64,
    pub fixed_income: f64,
    pub variable_income_considered: f64,
    /// Per-component view matching the headline figures: fixed components as
    /// monthly averages, variable components after damping.
    pub averaged_earnings: EarningsBreakdown,
}

pub(crate) fn monthly_income(records: &[SalaryRecord]) -> IncomeComputation {
    if records.is_empty() {
        return IncomeComputation::default();
    }

    let count = records.len() as f64;
    let mut totals = EarningsBreakdown::default();
    for record in records {
        totals.accumulate(&record.earnings);
    }

    let fixed_income = totals.fixed_total() / count;
    let variable_income_considered =
        totals.variable_total() / VARIABLE_AVERAGING_MONTHS * VARIABLE_HAIRCUT;

    let damp = |value: f64| value / VARIABLE_AVERAGING_MONTHS * VARIABLE_HAIRCUT;
    let averaged_earnings = EarningsBreakdown {
        basic: totals.basic / count,
        hra: totals.hra / count,
        conveyance_allowance: totals.conveyance_allowance / count,
        travel_allowance: totals.travel_allowance / count,
        medical_allowance: totals.medical_allowance / count,
        special_allowance: totals.special_allowance / count,
        lta: totals.lta / count,
        city_compensatory_allowance: totals.city_compensatory_allowance / count,
        education_allowance: totals.education_allowance / count,
        other_allowances: totals.other_allowances / count,
        incentive: damp(totals.incentive),
        overtime: damp(totals.overtime),
        bonus: damp(totals.bonus),
        commission: damp(totals.commission),
        arrears: damp(totals.arrears),
    };

    IncomeComputation {
        gross_monthly_income: fixed_income + variable_income_considered,
        fixed_income,
        variable_income_considered,
        averaged_earnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slip(basic: f64, hra: f64, incentive: f64) -> SalaryRecord {
        SalaryRecord {
            earnings: EarningsBreakdown {
                basic,
                hra,
                incentive,
                ..EarningsBreakdown::default()
            },
            ..SalaryRecord::default()
        }
    }

    #[test]
    fn no_records_means_zero_income() {
        let income = monthly_income(&[]);
        assert_eq!(income.gross_monthly_income, 0.0);
        assert_eq!(income.fixed_income, 0.0);
        assert_eq!(income.variable_income_considered, 0.0);
    }

    #[test]
    fn fixed_income_averages_over_supplied_records() {
        let records = vec![slip(50_000.0, 20_000.0, 0.0), slip(52_000.0, 20_000.0, 0.0)];
        let income = monthly_income(&records);
        assert_eq!(income.fixed_income, 71_000.0);
        assert_eq!(income.gross_monthly_income, 71_000.0);
    }

    #[test]
    fn variable_income_divides_by_six_even_with_fewer_slips() {
        // Documented policy behavior: two months of Rs 12,000 incentive is
        // averaged over a six-month horizon, then halved.
        let records = vec![slip(40_000.0, 0.0, 12_000.0), slip(40_000.0, 0.0, 12_000.0)];
        let income = monthly_income(&records);
        assert_eq!(income.variable_income_considered, 2_000.0);
        assert_eq!(income.gross_monthly_income, 42_000.0);
        assert_eq!(income.averaged_earnings.incentive, 2_000.0);
    }
}
