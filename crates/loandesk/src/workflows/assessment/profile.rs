use serde::{Deserialize, Serialize};

/// Identity and application facts accumulated while documents are processed.
///
/// Built by merging [`ProfileFacts`] in a fixed precedence order (salary slip,
/// then PAN, Aadhaar, Form 16, bank statement); a field populated by an
/// earlier source is never overwritten by a later one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantProfile {
    pub applicant_name: Option<String>,
    pub date_of_birth: Option<String>,
    /// Fallback used when no date of birth parses; the engine assumes 30
    /// when this is also absent.
    pub declared_age: Option<u32>,
    pub father_name: Option<String>,
    pub gender: Option<String>,
    pub current_address: Option<String>,
    pub employer: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub pan_masked: Option<String>,
    pub aadhaar_masked: Option<String>,
}

/// Facts a single document contributes to the profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFacts {
    pub applicant_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub father_name: Option<String>,
    pub gender: Option<String>,
    pub current_address: Option<String>,
    pub employer: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub pan_masked: Option<String>,
    pub aadhaar_masked: Option<String>,
}

impl ApplicantProfile {
    /// First-write-wins merge: only empty fields take the incoming value.
    pub fn absorb(&mut self, facts: ProfileFacts) {
        merge_field(&mut self.applicant_name, facts.applicant_name);
        merge_field(&mut self.date_of_birth, facts.date_of_birth);
        merge_field(&mut self.father_name, facts.father_name);
        merge_field(&mut self.gender, facts.gender);
        merge_field(&mut self.current_address, facts.current_address);
        merge_field(&mut self.employer, facts.employer);
        merge_field(&mut self.designation, facts.designation);
        merge_field(&mut self.department, facts.department);
        merge_field(&mut self.pan_masked, facts.pan_masked);
        merge_field(&mut self.aadhaar_masked, facts.aadhaar_masked);
    }
}

fn merge_field(slot: &mut Option<String>, incoming: Option<String>) {
    if slot.is_some() {
        return;
    }
    if let Some(value) = incoming {
        if !value.trim().is_empty() {
            *slot = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_never_overwrites_a_populated_field() {
        let mut profile = ApplicantProfile::default();
        profile.absorb(ProfileFacts {
            applicant_name: Some("Rahul Verma".to_string()),
            employer: Some("Acme Industries".to_string()),
            ..ProfileFacts::default()
        });
        profile.absorb(ProfileFacts {
            applicant_name: Some("RAHUL V".to_string()),
            date_of_birth: Some("15/06/1995".to_string()),
            ..ProfileFacts::default()
        });

        assert_eq!(profile.applicant_name.as_deref(), Some("Rahul Verma"));
        assert_eq!(profile.employer.as_deref(), Some("Acme Industries"));
        assert_eq!(profile.date_of_birth.as_deref(), Some("15/06/1995"));
    }

    #[test]
    fn absorb_ignores_blank_values() {
        let mut profile = ApplicantProfile::default();
        profile.absorb(ProfileFacts {
            applicant_name: Some("   ".to_string()),
            ..ProfileFacts::default()
        });

        assert_eq!(profile.applicant_name, None);
    }
}
