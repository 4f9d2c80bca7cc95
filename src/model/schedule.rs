//! Schedule: the engine's output record.

use serde::{Deserialize, Serialize};

use super::{Cadence, Status, Timeline};

/// The three supervisors on a rota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Supervisor {
    /// Fixed cadence, computed up front.
    Anchor,
    /// First filling agent. Deploys with the anchor on day 0.
    Second,
    /// Second filling agent. Deploys in time to relieve the second.
    Third,
}

impl Supervisor {
    pub const ALL: [Self; 3] = [Self::Anchor, Self::Second, Self::Third];

    /// Short row label, e.g. `S1`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Anchor => "S1",
            Self::Second => "S2",
            Self::Third => "S3",
        }
    }

    /// Column heading, e.g. `Supervisor 1`.
    pub fn title(self) -> &'static str {
        match self {
            Self::Anchor => "Supervisor 1",
            Self::Second => "Supervisor 2",
            Self::Third => "Supervisor 3",
        }
    }
}

/// What kind of staffing breach a violation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// More than two drilling.
    Overstaffed,
    /// Fewer than two drilling after the third supervisor deployed.
    Understaffed,
}

/// One coverage breach on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Zero-based day index.
    pub day: usize,
    pub kind: ViolationKind,
    /// Supervisors drilling that day.
    pub count: usize,
    pub message: String,
}

impl Violation {
    pub fn overstaffed(day: usize, count: usize) -> Self {
        Self {
            day,
            kind: ViolationKind::Overstaffed,
            count,
            message: format!("{count} drilling (max 2)"),
        }
    }

    pub fn understaffed(day: usize, count: usize) -> Self {
        Self {
            day,
            kind: ViolationKind::Understaffed,
            count,
            message: format!("{count} drilling (required 2)"),
        }
    }
}

/// A computed roster: three equal-length timelines plus any violations.
///
/// A non-empty `violations` list means the roster was computed but the
/// coverage invariant does not hold. It is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub cadence: Cadence,
    pub anchor: Timeline,
    pub second: Timeline,
    pub third: Timeline,
    pub violations: Vec<Violation>,
}

impl Schedule {
    pub fn timeline(&self, supervisor: Supervisor) -> &[Status] {
        match supervisor {
            Supervisor::Anchor => &self.anchor,
            Supervisor::Second => &self.second,
            Supervisor::Third => &self.third,
        }
    }

    pub fn days(&self) -> usize {
        self.anchor.len()
    }

    /// Supervisors drilling on `day`.
    pub fn drilling_count(&self, day: usize) -> usize {
        Supervisor::ALL
            .iter()
            .filter(|s| self.timeline(**s).get(day).is_some_and(|st| st.is_drilling()))
            .count()
    }

    /// First day the third supervisor is anywhere but home.
    pub fn third_active_from(&self) -> Option<usize> {
        self.third.iter().position(|s| *s != Status::Rest)
    }

    /// Longest run of consecutive drilling days for one supervisor.
    pub fn longest_stint(&self, supervisor: Supervisor) -> usize {
        self.timeline(supervisor)
            .iter()
            .fold((0, 0), |(longest, current), status| {
                let current = if status.is_drilling() { current + 1 } else { 0 };
                (longest.max(current), current)
            })
            .0
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}
