//! Cadence: the four numbers that drive a roster.
//!
//! Every derived quantity the engine relies on (drilling ceiling, hand-over
//! days, lead times) is computed here so the baseline generator and the
//! filling agents agree on the same arithmetic.

use serde::{Deserialize, Serialize};

/// Shortest horizon the engine accepts.
pub const MIN_HORIZON_DAYS: usize = 15;

/// Work/rest cadence shared by all three supervisors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cadence {
    /// Days on site per cycle, travel-in day excluded.
    pub work_days: usize,

    /// Days away from the drill floor per cycle, travel days included.
    pub rest_days: usize,

    /// One-time onboarding before a supervisor's first drilling shift.
    pub induction_days: usize,

    /// Number of simulated days.
    pub horizon_days: usize,
}

/// Reasons a cadence is rejected before simulation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CadenceError {
    #[error("work days must be at least 1 (got {0})")]
    WorkTooShort(usize),

    #[error("rest days must be at least 2 (got {0})")]
    RestTooShort(usize),

    #[error("induction days ({induction}) must be less than work days minus one ({limit})")]
    InductionTooLong { induction: usize, limit: usize },

    #[error("horizon must be at least {} days (got {})", MIN_HORIZON_DAYS, .0)]
    HorizonTooShort(usize),

    #[error("work days ({work}) cannot exceed the horizon ({horizon})")]
    WorkExceedsHorizon { work: usize, horizon: usize },
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            work_days: 14,
            rest_days: 7,
            induction_days: 5,
            horizon_days: 30,
        }
    }
}

impl Cadence {
    pub const fn new(
        work_days: usize,
        rest_days: usize,
        induction_days: usize,
        horizon_days: usize,
    ) -> Self {
        Self {
            work_days,
            rest_days,
            induction_days,
            horizon_days,
        }
    }

    /// Check the cadence against the engine's input contract.
    pub fn validate(&self) -> Result<(), CadenceError> {
        if self.work_days < 1 {
            return Err(CadenceError::WorkTooShort(self.work_days));
        }
        if self.rest_days < 2 {
            return Err(CadenceError::RestTooShort(self.rest_days));
        }
        let limit = self.work_days - 1;
        if self.induction_days >= limit {
            return Err(CadenceError::InductionTooLong {
                induction: self.induction_days,
                limit,
            });
        }
        if self.horizon_days < MIN_HORIZON_DAYS {
            return Err(CadenceError::HorizonTooShort(self.horizon_days));
        }
        if self.work_days > self.horizon_days {
            return Err(CadenceError::WorkExceedsHorizon {
                work: self.work_days,
                horizon: self.horizon_days,
            });
        }
        Ok(())
    }

    /// Drilling days in the anchor's first cycle.
    pub fn first_cycle_drilling_days(&self) -> usize {
        self.work_days.saturating_sub(self.induction_days)
    }

    /// Cap on consecutive drilling days for a filling agent.
    ///
    /// `work - 1 - induction` is the second supervisor's first stint.
    /// `rest + 1` lets both filling agents drill through a whole anchor
    /// absence with one day to spare for the hand-over before it.
    pub fn drilling_ceiling(&self) -> usize {
        self.work_days
            .saturating_sub(1 + self.induction_days)
            .max(self.rest_days + 1)
    }

    /// The anchor's last drilling day of its first cycle.
    ///
    /// The second supervisor leaves and the third starts drilling here.
    pub fn coordination_day(&self) -> usize {
        self.work_days
    }

    /// Day the third supervisor travels in for the first time.
    pub fn third_entry_day(&self) -> usize {
        self.coordination_day()
            .saturating_sub(self.induction_days + 1)
    }

    /// Days between a return decision and the target drilling day.
    ///
    /// One travel day, the induction if still owed, and one buffer day.
    pub fn lead_time(&self, onboarded: bool) -> usize {
        let induction = if onboarded { 0 } else { self.induction_days };
        1 + induction + 1
    }

    /// Whether the engine guarantees exact two-person coverage.
    ///
    /// The third supervisor must enter while the anchor and the second
    /// supervisor are already drilling, which needs `work >= 2 * induction + 2`.
    pub fn within_coverage_envelope(&self) -> bool {
        self.work_days >= 2 * self.induction_days + 2
    }

    /// Short form used in reports, e.g. `14x7, ind 5, 40 days`.
    pub fn describe(&self) -> String {
        format!(
            "{}x{}, ind {}, {} days",
            self.work_days, self.rest_days, self.induction_days, self.horizon_days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(Cadence::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_short_rest() {
        let err = Cadence::new(14, 1, 5, 40).validate().unwrap_err();
        assert_eq!(err, CadenceError::RestTooShort(1));
    }

    #[test]
    fn rejects_long_induction() {
        let err = Cadence::new(7, 7, 6, 30).validate().unwrap_err();
        assert_eq!(
            err,
            CadenceError::InductionTooLong {
                induction: 6,
                limit: 6
            }
        );
    }

    #[test]
    fn rejects_short_horizon() {
        let err = Cadence::new(7, 7, 1, 14).validate().unwrap_err();
        assert_eq!(err, CadenceError::HorizonTooShort(14));
    }

    #[test]
    fn rejects_work_beyond_horizon() {
        let err = Cadence::new(21, 7, 3, 20).validate().unwrap_err();
        assert_eq!(
            err,
            CadenceError::WorkExceedsHorizon {
                work: 21,
                horizon: 20
            }
        );
    }

    #[test]
    fn rejects_zero_work() {
        let err = Cadence::new(0, 7, 0, 30).validate().unwrap_err();
        assert_eq!(err, CadenceError::WorkTooShort(0));
    }

    #[test]
    fn ceiling_for_reference_cadences() {
        assert_eq!(Cadence::new(14, 7, 5, 40).drilling_ceiling(), 8);
        assert_eq!(Cadence::new(7, 7, 1, 30).drilling_ceiling(), 8);
        assert_eq!(Cadence::new(21, 7, 3, 60).drilling_ceiling(), 17);
        assert_eq!(Cadence::new(10, 5, 2, 30).drilling_ceiling(), 7);
    }

    #[test]
    fn ceiling_covers_a_full_absence() {
        for rest in 2..20 {
            let cadence = Cadence::new(10, rest, 2, 60);
            assert!(cadence.drilling_ceiling() > rest);
        }
    }

    #[test]
    fn third_supervisor_finishes_induction_before_coordination_day() {
        let cadence = Cadence::new(14, 7, 5, 40);
        assert_eq!(cadence.third_entry_day(), 8);
        assert_eq!(
            cadence.third_entry_day() + 1 + cadence.induction_days,
            cadence.coordination_day()
        );
    }

    #[test]
    fn lead_time_includes_owed_induction() {
        let cadence = Cadence::new(14, 7, 5, 40);
        assert_eq!(cadence.lead_time(false), 7);
        assert_eq!(cadence.lead_time(true), 2);
    }

    #[test]
    fn coverage_envelope() {
        assert!(Cadence::new(14, 7, 5, 40).within_coverage_envelope());
        assert!(Cadence::new(7, 7, 1, 30).within_coverage_envelope());
        assert!(!Cadence::new(10, 5, 6, 30).within_coverage_envelope());
    }

    #[test]
    fn toml_uses_kebab_case_keys() {
        let cadence: Cadence = toml::from_str(
            "work-days = 21\nrest-days = 7\ninduction-days = 3\nhorizon-days = 60\n",
        )
        .unwrap();
        assert_eq!(cadence, Cadence::new(21, 7, 3, 60));
    }
}
