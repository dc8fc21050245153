//! Amortization math shared by the eligibility steps. Every division hazard
//! (zero income, zero rate, zero tenure) degrades to 0 instead of faulting.

/// Fixed Obligation to Income Ratio as a percentage of gross monthly income.
pub fn foir(total_obligations: f64, gross_income: f64) -> f64 {
    if gross_income == 0.0 {
        return 0.0;
    }
    total_obligations / gross_income * 100.0
}

/// Monthly instalment servicing `principal` over `tenure_months` at the given
/// annual rate. A zero rate degrades to flat division by the month count.
pub fn emi_for_principal(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> f64 {
    if tenure_months == 0 {
        return 0.0;
    }
    if annual_rate_percent == 0.0 {
        return principal / f64::from(tenure_months);
    }

    let monthly_rate = annual_rate_percent / 1200.0;
    let growth = (1.0 + monthly_rate).powi(tenure_months as i32);
    let denominator = growth - 1.0;
    if denominator == 0.0 {
        return 0.0;
    }
    principal * monthly_rate * growth / denominator
}

/// Largest principal an instalment of `emi` can amortize; inverse of
/// [`emi_for_principal`].
pub fn principal_for_emi(emi: f64, annual_rate_percent: f64, tenure_months: u32) -> f64 {
    if tenure_months == 0 {
        return 0.0;
    }
    if annual_rate_percent == 0.0 {
        return emi * f64::from(tenure_months);
    }

    let monthly_rate = annual_rate_percent / 1200.0;
    let growth = (1.0 + monthly_rate).powi(tenure_months as i32);
    let denominator = monthly_rate * growth;
    if denominator == 0.0 {
        return 0.0;
    }
    emi * (growth - 1.0) / denominator
}

/// Monetary boundary rounding; applied once when results are published.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foir_guards_zero_income() {
        assert_eq!(foir(15_000.0, 0.0), 0.0);
        assert_eq!(foir(0.0, 0.0), 0.0);
    }

    #[test]
    fn foir_is_a_percentage() {
        assert_eq!(foir(30_000.0, 100_000.0), 30.0);
    }

    #[test]
    fn zero_rate_emi_is_flat_division() {
        assert_eq!(emi_for_principal(1_200_000.0, 0.0, 120), 10_000.0);
        assert_eq!(principal_for_emi(10_000.0, 0.0, 120), 1_200_000.0);
    }

    #[test]
    fn zero_tenure_degrades_to_zero() {
        assert_eq!(emi_for_principal(5_200_000.0, 8.5, 0), 0.0);
        assert_eq!(principal_for_emi(48_000.0, 8.5, 0), 0.0);
    }

    #[test]
    fn emi_matches_the_reference_formula() {
        let principal = 5_200_000.0;
        let rate = 8.5;
        let months = 360;

        let monthly_rate = rate / 1200.0;
        let growth = (1.0_f64 + monthly_rate).powi(months);
        let expected = principal * monthly_rate * growth / (growth - 1.0);

        let emi = emi_for_principal(principal, rate, months as u32);
        assert!((emi - expected).abs() < 1e-6);
    }

    #[test]
    fn emi_and_principal_conversions_invert() {
        let emi = 39_000.0;
        let principal = principal_for_emi(emi, 9.25, 240);
        let recovered = emi_for_principal(principal, 9.25, 240);
        assert!((recovered - emi).abs() < 1e-6);
    }
}
