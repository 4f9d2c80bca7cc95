//! Filling agent state: phase, counters, and the directives that steer it.

use serde::Serialize;

use super::Status;

/// Where a filling agent is in its rotation.
///
/// `Standby` is the never-deployed sentinel. It reports as [`Status::Rest`]
/// but, unlike `Rest`, means the agent has not yet left home once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Standby,
    TravelIn,
    Induction,
    Drilling,
    TravelOut,
    Rest,
}

impl Phase {
    /// The status recorded for a day spent in this phase.
    pub fn status(self) -> Status {
        match self {
            Self::Standby | Self::Rest => Status::Rest,
            Self::TravelIn => Status::TravelIn,
            Self::Induction => Status::Induction,
            Self::Drilling => Status::Drilling,
            Self::TravelOut => Status::TravelOut,
        }
    }

    /// Home, or on the way home.
    pub fn is_off_site(self) -> bool {
        matches!(self, Self::Standby | Self::TravelOut | Self::Rest)
    }
}

/// Per-day override issued by the roster to one filling agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Directive {
    /// No override: the natural transition applies.
    #[default]
    Auto,

    /// Leave the drill floor today, whatever the elapsed days.
    ForceDepart,

    /// Keep drilling today even if the ceiling says otherwise.
    ForceStay,

    /// Skip travel and induction and drill today. Onboarded agents only;
    /// anyone else follows the normal return path.
    EmergencyReturn,
}

/// Value-typed state of one filling agent.
///
/// Threaded through [`crate::agent::advance`] one day at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentState {
    pub phase: Phase,

    /// Days spent in `phase`, counting the current one. 1 on entry.
    pub days_in_phase: usize,

    /// Set once, the first time the agent reaches the drill floor.
    pub onboarded: bool,

    /// Drilling stints completed (Drilling → `TravelOut` transitions).
    pub completed_cycles: usize,
}

impl Default for AgentState {
    fn default() -> Self {
        Self::STANDBY
    }
}

impl AgentState {
    /// A fresh, never-deployed agent.
    pub const STANDBY: Self = Self {
        phase: Phase::Standby,
        days_in_phase: 0,
        onboarded: false,
        completed_cycles: 0,
    };

    pub fn status(&self) -> Status {
        self.phase.status()
    }

    pub fn is_drilling(&self) -> bool {
        self.phase == Phase::Drilling
    }

    /// Consecutive drilling days so far, or 0 when not drilling.
    pub fn stint(&self) -> usize {
        if self.is_drilling() {
            self.days_in_phase
        } else {
            0
        }
    }

    /// Same phase, one more day.
    pub(crate) fn stay(self) -> Self {
        Self {
            days_in_phase: self.days_in_phase + 1,
            ..self
        }
    }

    /// First day of a new phase.
    pub(crate) fn enter(self, phase: Phase) -> Self {
        Self {
            phase,
            days_in_phase: 1,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standby_reports_rest() {
        assert_eq!(AgentState::STANDBY.status(), Status::Rest);
        assert!(AgentState::STANDBY.phase.is_off_site());
        assert_ne!(Phase::Standby, Phase::Rest);
    }

    #[test]
    fn stint_counts_only_drilling() {
        let drilling = AgentState::STANDBY.enter(Phase::Drilling).stay().stay();
        assert_eq!(drilling.stint(), 3);

        let resting = drilling.enter(Phase::Rest).stay();
        assert_eq!(resting.stint(), 0);
        assert_eq!(resting.days_in_phase, 2);
    }
}
