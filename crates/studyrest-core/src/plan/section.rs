use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Rest phases never drop below this many seconds.
pub const MIN_REST_SECS: u64 = 6;

/// One study→rest cycle, derived from a minute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub study_secs: u64,
    pub rest_secs: u64,
}

impl Section {
    /// Derive study and rest seconds from a study duration in minutes.
    ///
    /// `study_secs = floor(minutes * 60)` and
    /// `rest_secs = max(6, ceil(minutes * 10))`, i.e. one sixth of the study
    /// time. Pure and deterministic: restoring a saved session re-derives
    /// sections through here, so the same input must always give the same
    /// section.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidMinutes`] for non-positive or
    /// non-finite input, and for values so small the study phase would be
    /// zero seconds long.
    pub fn derive(minutes: f64) -> Result<Self, ValidationError> {
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(ValidationError::InvalidMinutes { minutes });
        }
        let study_secs = (minutes * 60.0).floor() as u64;
        if study_secs == 0 {
            return Err(ValidationError::InvalidMinutes { minutes });
        }
        let rest_secs = ((minutes * 10.0).ceil() as u64).max(MIN_REST_SECS);
        Ok(Self {
            study_secs,
            rest_secs,
        })
    }
}

/// Ordered, non-empty list of sections.
///
/// Only constructible through [`Plan::from_minutes`] (or [`Plan::new`] with a
/// non-empty list), so holding a `Plan` means there is something to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    sections: Vec<Section>,
}

impl Plan {
    /// Build a plan from raw editor values, silently dropping entries that
    /// cannot become a section.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyPlan`] when nothing survives.
    pub fn from_minutes(minutes: &[f64]) -> Result<Self, ValidationError> {
        let sections = minutes
            .iter()
            .filter_map(|&m| Section::derive(m).ok())
            .collect();
        Self::new(sections)
    }

    /// # Errors
    /// Returns [`ValidationError::EmptyPlan`] for an empty list.
    pub fn new(sections: Vec<Section>) -> Result<Self, ValidationError> {
        if sections.is_empty() {
            return Err(ValidationError::EmptyPlan);
        }
        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn total_secs(&self) -> u64 {
        self.sections
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.study_secs.saturating_add(s.rest_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn derive_small_value_hits_rest_floor() {
        let s = Section::derive(0.6).unwrap();
        assert_eq!(s.study_secs, 36);
        assert_eq!(s.rest_secs, 6);
    }

    #[test]
    fn derive_ten_minutes() {
        let s = Section::derive(10.0).unwrap();
        assert_eq!(s.study_secs, 600);
        assert_eq!(s.rest_secs, 100);
    }

    #[test]
    fn derive_one_minute() {
        assert_eq!(
            Section::derive(1.0).unwrap(),
            Section {
                study_secs: 60,
                rest_secs: 10
            }
        );
    }

    #[test]
    fn derive_twenty_five_minutes_is_exact() {
        assert_eq!(Section::derive(25.0).unwrap().rest_secs, 250);
    }

    #[test]
    fn derive_fractional_rounds_rest_up() {
        let s = Section::derive(1.05).unwrap();
        assert_eq!(s.study_secs, 63);
        assert_eq!(s.rest_secs, 11);
    }

    #[test]
    fn derive_rejects_non_positive() {
        assert!(Section::derive(0.0).is_err());
        assert!(Section::derive(-1.0).is_err());
        assert!(Section::derive(f64::NAN).is_err());
        assert!(Section::derive(f64::INFINITY).is_err());
    }

    #[test]
    fn derive_rejects_zero_length_study() {
        assert_eq!(
            Section::derive(0.001),
            Err(ValidationError::InvalidMinutes { minutes: 0.001 })
        );
    }

    #[test]
    fn plan_filters_invalid_entries() {
        let plan = Plan::from_minutes(&[0.0, 1.0, -3.0, 2.0]).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.get(0).unwrap().study_secs, 60);
        assert_eq!(plan.get(1).unwrap().study_secs, 120);
    }

    #[test]
    fn plan_rejects_when_nothing_survives() {
        assert_eq!(Plan::from_minutes(&[0.0, -1.0]), Err(ValidationError::EmptyPlan));
        assert_eq!(Plan::from_minutes(&[]), Err(ValidationError::EmptyPlan));
    }

    #[test]
    fn plan_total_secs() {
        let plan = Plan::from_minutes(&[1.0, 1.0]).unwrap();
        assert_eq!(plan.total_secs(), 140);
    }

    #[test]
    fn plan_total_secs_saturates_for_huge_entries() {
        let plan = Plan::from_minutes(&[1.6e17, 1.6e17]).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.total_secs(), u64::MAX);
    }

    proptest! {
        #[test]
        fn rest_never_below_floor(minutes in 0.017f64..10_000.0) {
            let s = Section::derive(minutes).unwrap();
            prop_assert!(s.rest_secs >= MIN_REST_SECS);
            prop_assert_eq!(s.study_secs, (minutes * 60.0).floor() as u64);
        }

        #[test]
        fn derive_is_deterministic(minutes in 0.017f64..10_000.0) {
            prop_assert_eq!(Section::derive(minutes), Section::derive(minutes));
        }
    }
}
