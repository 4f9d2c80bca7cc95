//! Demand and excess projection for the filling agents.
//!
//! The anchor timeline is known in full before the first filling decision,
//! so every projection here is a look-ahead over it combined with what the
//! partner agent is doing right now.

use crate::agent;
use crate::model::{AgentState, Cadence, Directive, Phase, Status};

/// Look-ahead queries over one roster's anchor timeline.
pub struct Projector<'a> {
    anchor: &'a [Status],
    cadence: &'a Cadence,
}

impl<'a> Projector<'a> {
    pub fn new(anchor: &'a [Status], cadence: &'a Cadence) -> Self {
        Self { anchor, cadence }
    }

    /// Whether the anchor drills on `day`. False past the horizon.
    pub fn anchor_drills(&self, day: usize) -> bool {
        self.anchor.get(day).is_some_and(|s| s.is_drilling())
    }

    /// Whether an agent at home should leave now to close a coming gap.
    ///
    /// Only meaningful while `this` is in standby or rest. Looks `lead_time`
    /// days ahead and counts the anchor plus the partner, assuming the
    /// partner stays on site only while its ceiling allows and that a partner
    /// in travel or induction arrives in time.
    pub fn gap(
        &self,
        day: usize,
        lead_time: usize,
        this: &AgentState,
        partner: &AgentState,
    ) -> bool {
        if !matches!(this.phase, Phase::Standby | Phase::Rest) {
            return false;
        }
        let target = day + lead_time;
        if target >= self.anchor.len() {
            return false;
        }

        let anchor = usize::from(self.anchor_drills(target));
        let partner = match partner.phase {
            Phase::Drilling => {
                let headroom = self
                    .cadence
                    .drilling_ceiling()
                    .saturating_sub(partner.days_in_phase);
                usize::from(lead_time <= headroom)
            }
            Phase::TravelIn | Phase::Induction => 1,
            Phase::Standby | Phase::TravelOut | Phase::Rest => 0,
        };

        anchor + partner < 2
    }

    /// Whether `this`, currently drilling, makes `day` overstaffed.
    ///
    /// Counts the anchor, `this`, and the partner's projected status under
    /// `partner_directive`.
    pub fn excess(
        &self,
        day: usize,
        this: &AgentState,
        partner: &AgentState,
        partner_directive: Directive,
    ) -> bool {
        if !this.is_drilling() {
            return false;
        }
        let anchor = usize::from(self.anchor_drills(day));
        let partner = usize::from(agent::will_drill(*partner, partner_directive, self.cadence));
        anchor + 1 + partner > 2
    }

    /// Whether `this` should hand the drill floor to `partner` today.
    ///
    /// True when `this` could not drill through the end of the anchor's next
    /// absence without passing its ceiling, a fresh stint starting today
    /// could, and the partner is onboarded and free to come back.
    pub fn hand_over(&self, day: usize, this: &AgentState, partner: &AgentState) -> bool {
        if !this.is_drilling() || !partner.onboarded {
            return false;
        }
        if !(partner.phase.is_off_site() || partner.phase == Phase::TravelIn) {
            return false;
        }
        let Some(window_end) = self.absence_end(day) else {
            return false;
        };

        let ceiling = self.cadence.drilling_ceiling();
        let span = window_end - day + 1;
        this.days_in_phase + span > ceiling && span <= ceiling
    }

    /// Last day of the anchor's next absence at or after `day`.
    ///
    /// Clipped to the horizon. `None` when the anchor drills to the end.
    pub fn absence_end(&self, day: usize) -> Option<usize> {
        let start = (day..self.anchor.len()).find(|d| !self.anchor_drills(*d))?;
        let end = (start..self.anchor.len())
            .take_while(|d| !self.anchor_drills(*d))
            .last()
            .unwrap_or(start);
        Some(end)
    }
}
