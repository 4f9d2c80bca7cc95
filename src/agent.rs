//! Filling agent state machine.
//!
//! [`advance`] is a pure transition: it takes yesterday's state, today's
//! directive, and whether a return was requested, and yields today's state.
//! The status recorded for today is `advance(..).status()`.
//!
//! | Phase | Trigger | Next |
//! |---|---|---|
//! | Standby / Rest | emergency return, onboarded | Drilling |
//! | Standby / Rest | return requested | `TravelIn` |
//! | `TravelIn` | onboarded, or no induction configured | Drilling |
//! | `TravelIn` | otherwise | Induction |
//! | Induction | induction days served | Drilling |
//! | Drilling | force depart, or ceiling reached under `Auto` | `TravelOut` |
//! | Drilling | force stay, emergency return | Drilling |
//! | `TravelOut` | emergency return, onboarded | Drilling |
//! | `TravelOut` | return requested | `TravelIn` |
//! | `TravelOut` | otherwise | Rest |
//!
//! Travel phases last exactly one day.

use crate::model::{AgentState, Cadence, Directive, Phase};

/// Advance one filling agent by one day.
pub fn advance(
    state: AgentState,
    directive: Directive,
    demand_start: bool,
    cadence: &Cadence,
) -> AgentState {
    let emergency = directive == Directive::EmergencyReturn && state.onboarded;

    match state.phase {
        Phase::Standby | Phase::Rest => {
            if emergency {
                begin_drilling(state)
            } else if demand_start {
                state.enter(Phase::TravelIn)
            } else {
                state.stay()
            }
        }
        Phase::TravelIn => {
            if state.onboarded || cadence.induction_days == 0 {
                begin_drilling(state)
            } else {
                state.enter(Phase::Induction)
            }
        }
        Phase::Induction => {
            if state.days_in_phase >= cadence.induction_days {
                begin_drilling(state)
            } else {
                state.stay()
            }
        }
        Phase::Drilling => match directive {
            Directive::ForceDepart => depart(state),
            Directive::ForceStay | Directive::EmergencyReturn => state.stay(),
            Directive::Auto if state.days_in_phase >= cadence.drilling_ceiling() => depart(state),
            Directive::Auto => state.stay(),
        },
        Phase::TravelOut => {
            if emergency {
                begin_drilling(state)
            } else if demand_start {
                state.enter(Phase::TravelIn)
            } else {
                state.enter(Phase::Rest)
            }
        }
    }
}

/// Whether the agent would be drilling today under `directive`.
pub fn will_drill(state: AgentState, directive: Directive, cadence: &Cadence) -> bool {
    advance(state, directive, false, cadence).is_drilling()
}

fn begin_drilling(state: AgentState) -> AgentState {
    AgentState {
        onboarded: true,
        ..state.enter(Phase::Drilling)
    }
}

fn depart(state: AgentState) -> AgentState {
    AgentState {
        completed_cycles: state.completed_cycles + 1,
        ..state.enter(Phase::TravelOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::Status;

    fn cadence() -> Cadence {
        Cadence::new(14, 7, 5, 40)
    }

    fn state(phase: Phase, days_in_phase: usize, onboarded: bool) -> AgentState {
        AgentState {
            phase,
            days_in_phase,
            onboarded,
            completed_cycles: 0,
        }
    }

    fn step(from: AgentState, directive: Directive, demand: bool) -> AgentState {
        advance(from, directive, demand, &cadence())
    }

    #[test]
    fn standby_waits_without_demand() {
        let next = step(AgentState::STANDBY, Directive::Auto, false);
        assert_eq!(next.phase, Phase::Standby);
        assert_eq!(next.status(), Status::Rest);
    }

    #[test]
    fn standby_travels_on_demand() {
        let next = step(AgentState::STANDBY, Directive::Auto, true);
        assert_eq!(next.phase, Phase::TravelIn);
        assert_eq!(next.days_in_phase, 1);
    }

    #[test]
    fn emergency_ignored_before_onboarding() {
        let next = step(AgentState::STANDBY, Directive::EmergencyReturn, false);
        assert_eq!(next.phase, Phase::Standby);

        let next = step(AgentState::STANDBY, Directive::EmergencyReturn, true);
        assert_eq!(next.phase, Phase::TravelIn);
    }

    #[test]
    fn emergency_from_rest_skips_travel() {
        let next = step(state(Phase::Rest, 3, true), Directive::EmergencyReturn, false);
        assert_eq!(next.phase, Phase::Drilling);
        assert_eq!(next.days_in_phase, 1);
    }

    #[test]
    fn first_travel_leads_to_induction() {
        let next = step(state(Phase::TravelIn, 1, false), Directive::Auto, false);
        assert_eq!(next.phase, Phase::Induction);
        assert!(!next.onboarded);
    }

    #[test]
    fn onboarded_travel_leads_to_drilling() {
        let next = step(state(Phase::TravelIn, 1, true), Directive::Auto, false);
        assert_eq!(next.phase, Phase::Drilling);
    }

    #[test]
    fn zero_induction_goes_straight_to_drilling() {
        let cadence = Cadence::new(10, 5, 0, 30);
        let next = advance(state(Phase::TravelIn, 1, false), Directive::Auto, false, &cadence);
        assert_eq!(next.phase, Phase::Drilling);
        assert!(next.onboarded);
    }

    #[test]
    fn induction_runs_its_full_length() {
        let mut agent = step(state(Phase::TravelIn, 1, false), Directive::Auto, false);
        let mut induction_days = 1;
        while agent.phase == Phase::Induction {
            agent = step(agent, Directive::Auto, false);
            if agent.phase == Phase::Induction {
                induction_days += 1;
            }
        }
        assert_eq!(induction_days, cadence().induction_days);
        assert_eq!(agent.phase, Phase::Drilling);
        assert!(agent.onboarded);
    }

    #[test]
    fn drilling_leaves_at_ceiling() {
        let ceiling = cadence().drilling_ceiling();
        let below = step(state(Phase::Drilling, ceiling - 1, true), Directive::Auto, false);
        assert_eq!(below.phase, Phase::Drilling);
        assert_eq!(below.days_in_phase, ceiling);

        let at = step(below, Directive::Auto, false);
        assert_eq!(at.phase, Phase::TravelOut);
        assert_eq!(at.completed_cycles, 1);
    }

    #[test]
    fn force_depart_leaves_early() {
        let next = step(state(Phase::Drilling, 2, true), Directive::ForceDepart, false);
        assert_eq!(next.phase, Phase::TravelOut);
        assert_eq!(next.completed_cycles, 1);
    }

    #[test]
    fn force_stay_and_emergency_hold_drilling() {
        let ceiling = cadence().drilling_ceiling();
        for directive in [Directive::ForceStay, Directive::EmergencyReturn] {
            let next = step(state(Phase::Drilling, ceiling, true), directive, false);
            assert_eq!(next.phase, Phase::Drilling);
            assert_eq!(next.days_in_phase, ceiling + 1);
        }
    }

    #[test]
    fn travel_out_branches() {
        let out = state(Phase::TravelOut, 1, true);
        assert_eq!(
            step(out, Directive::EmergencyReturn, false).phase,
            Phase::Drilling
        );
        assert_eq!(step(out, Directive::Auto, true).phase, Phase::TravelIn);
        assert_eq!(step(out, Directive::Auto, false).phase, Phase::Rest);
    }

    #[test]
    fn onboarding_never_resets() {
        let mut agent = step(AgentState::STANDBY, Directive::Auto, true);
        let mut flips = 0;
        let mut was_onboarded = agent.onboarded;
        for day in 0..120 {
            let directive = if day % 11 == 0 {
                Directive::ForceDepart
            } else {
                Directive::Auto
            };
            agent = step(agent, directive, day % 5 == 0);
            if agent.onboarded != was_onboarded {
                flips += 1;
                was_onboarded = agent.onboarded;
            }
        }
        assert_eq!(flips, 1);
        assert!(agent.onboarded);
    }

    #[test]
    fn will_drill_ignores_demand() {
        let resting = state(Phase::Rest, 1, true);
        assert!(!will_drill(resting, Directive::Auto, &cadence()));
        assert!(will_drill(resting, Directive::EmergencyReturn, &cadence()));
    }
}
