use serde::{Deserialize, Serialize};

/// Lending policy thresholds applied by the eligibility engine.
///
/// Invariant: ratio fields are stored as fractions in [0, 1]. Constructors
/// and deserialization accept whole percentages (values above 1) and divide
/// them by 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPolicyConfig")]
pub struct PolicyConfig {
    pub foir_salaried_max: f64,
    pub max_age_salaried: u32,
    pub max_tenure_years: u32,
    pub min_income_threshold: f64,
    pub high_foir_threshold: f64,
}

impl PolicyConfig {
    pub fn new(
        foir_salaried_max: f64,
        max_age_salaried: u32,
        max_tenure_years: u32,
        min_income_threshold: f64,
        high_foir_threshold: f64,
    ) -> Self {
        Self {
            foir_salaried_max: normalize_ratio(foir_salaried_max),
            max_age_salaried,
            max_tenure_years,
            min_income_threshold,
            high_foir_threshold: normalize_ratio(high_foir_threshold),
        }
    }

    /// FOIR ceiling as a percentage, for comparisons against FOIR values.
    pub fn foir_limit_percent(&self) -> f64 {
        self.foir_salaried_max * 100.0
    }

    pub fn high_foir_percent(&self) -> f64 {
        self.high_foir_threshold * 100.0
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::new(0.60, 60, 30, 25_000.0, 0.40)
    }
}

fn normalize_ratio(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

/// Wire shape for policy edits; every field optional, ratios accepted as
/// either fractions or whole percentages.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RawPolicyConfig {
    pub foir_salaried_max: f64,
    pub max_age_salaried: u32,
    pub max_tenure_years: u32,
    pub min_income_threshold: f64,
    pub high_foir_threshold: f64,
}

impl Default for RawPolicyConfig {
    fn default() -> Self {
        Self {
            foir_salaried_max: 60.0,
            max_age_salaried: 60,
            max_tenure_years: 30,
            min_income_threshold: 25_000.0,
            high_foir_threshold: 40.0,
        }
    }
}

impl From<RawPolicyConfig> for PolicyConfig {
    fn from(raw: RawPolicyConfig) -> Self {
        Self::new(
            raw.foir_salaried_max,
            raw.max_age_salaried,
            raw.max_tenure_years,
            raw.min_income_threshold,
            raw.high_foir_threshold,
        )
    }
}
