//! Roster: the day-by-day driver.
//!
//! The anchor timeline is generated once. Each day, both filling agents get
//! a directive from a priority cascade, are advanced one step, and their
//! status is recorded. Days are never revisited.
//!
//! Cascade, highest priority first. A rule only fills a directive that is
//! still `Auto` unless noted.
//!
//! 1. First-cycle coordination: the second supervisor leaves on the
//!    coordination day, when the third starts drilling.
//! 2. Ceiling: an agent at its drilling ceiling leaves.
//! 3. Balancing (both still `Auto`): trim overstaffing, hold drilling agents
//!    when short, and hand over ahead of an anchor absence that would push
//!    the on-duty agent past its ceiling.
//! 4. Failsafe (may override): emergency return when short, force out the
//!    longer stint when over.
//! 5. Cascade re-check (may override): repeat the overstaffing half of 4.

use tracing::{debug, info, warn};

use crate::agent::{self, will_drill};
use crate::model::{AgentState, Cadence, Directive, Phase, Schedule};
use crate::projector::Projector;
use crate::validate;

/// Simulate a full roster for `cadence`.
///
/// Never fails. Coverage breaches are reported in `Schedule::violations`.
pub fn run(cadence: &Cadence) -> Schedule {
    let anchor = crate::baseline::generate(cadence);
    let projector = Projector::new(&anchor, cadence);

    let mut second = AgentState::STANDBY;
    let mut third = AgentState::STANDBY;
    let mut second_line = Vec::with_capacity(cadence.horizon_days);
    let mut third_line = Vec::with_capacity(cadence.horizon_days);

    for day in 0..cadence.horizon_days {
        let orders = Orders::resolve(day, &projector, cadence, &second, &third);
        let (second_demand, third_demand) = demand(day, &projector, cadence, &second, &third);

        if orders != Orders::default() || second_demand || third_demand {
            debug!(
                day,
                second = ?orders.second,
                third = ?orders.third,
                second_demand,
                third_demand,
                "orders"
            );
        }

        second = agent::advance(second, orders.second, second_demand, cadence);
        third = agent::advance(third, orders.third, third_demand, cadence);
        second_line.push(second.status());
        third_line.push(third.status());
    }

    let violations = validate::validate(&anchor, &second_line, &third_line);
    if let Some(first) = violations.first() {
        warn!(
            cadence = %cadence.describe(),
            violations = violations.len(),
            first_day = first.day,
            "roster breaks two-person coverage"
        );
    } else {
        info!(cadence = %cadence.describe(), "roster computed");
    }

    Schedule {
        cadence: *cadence,
        anchor,
        second: second_line,
        third: third_line,
        violations,
    }
}

/// One day's directives for the two filling agents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Orders {
    second: Directive,
    third: Directive,
}

impl Orders {
    fn resolve(
        day: usize,
        projector: &Projector<'_>,
        cadence: &Cadence,
        second: &AgentState,
        third: &AgentState,
    ) -> Self {
        let mut orders = Self::default();
        let ceiling = cadence.drilling_ceiling();

        if second.completed_cycles == 0
            && second.is_drilling()
            && day >= cadence.coordination_day()
        {
            debug!(day, "second supervisor leaves on coordination day");
            orders.second = Directive::ForceDepart;
        }

        if orders.second == Directive::Auto && second.stint() >= ceiling {
            orders.second = Directive::ForceDepart;
        }
        if orders.third == Directive::Auto && third.stint() >= ceiling {
            orders.third = Directive::ForceDepart;
        }

        if orders == Self::default() {
            orders.balance(day, projector, cadence, second, third);
        }

        orders.failsafe(day, projector, cadence, second, third);
        orders.recheck_excess(day, projector, cadence, second, third);
        orders
    }

    fn balance(
        &mut self,
        day: usize,
        projector: &Projector<'_>,
        cadence: &Cadence,
        second: &AgentState,
        third: &AgentState,
    ) {
        let anchor = projector.anchor_drills(day);
        let count = usize::from(anchor)
            + usize::from(will_drill(*second, Directive::Auto, cadence))
            + usize::from(will_drill(*third, Directive::Auto, cadence));

        if count > 2 {
            let second_excess = projector.excess(day, second, third, Directive::Auto);
            let third_excess = projector.excess(day, third, second, Directive::Auto);
            match (second_excess, third_excess) {
                (true, true) => self.force_out_longer(second, third),
                (true, false) => self.second = Directive::ForceDepart,
                (false, true) => self.third = Directive::ForceDepart,
                (false, false) => {}
            }
        } else if count < 2 {
            let ceiling = cadence.drilling_ceiling();
            if second.is_drilling() && second.days_in_phase < ceiling {
                self.second = Directive::ForceStay;
            }
            if third.is_drilling() && third.days_in_phase < ceiling {
                self.third = Directive::ForceStay;
            }
        } else if anchor {
            if projector.hand_over(day, second, third) {
                debug!(day, from = "S2", to = "S3", "hand-over ahead of anchor absence");
                self.second = Directive::ForceDepart;
                self.third = Directive::EmergencyReturn;
            } else if projector.hand_over(day, third, second) {
                debug!(day, from = "S3", to = "S2", "hand-over ahead of anchor absence");
                self.third = Directive::ForceDepart;
                self.second = Directive::EmergencyReturn;
            }
        }
    }

    fn failsafe(
        &mut self,
        day: usize,
        projector: &Projector<'_>,
        cadence: &Cadence,
        second: &AgentState,
        third: &AgentState,
    ) {
        let second_drills = will_drill(*second, self.second, cadence);
        let third_drills = will_drill(*third, self.third, cadence);
        let total = usize::from(projector.anchor_drills(day))
            + usize::from(second_drills)
            + usize::from(third_drills);

        if total < 2 {
            if third.onboarded && !third_drills && !third.is_drilling() {
                debug!(day, supervisor = "S3", "emergency return");
                self.third = Directive::EmergencyReturn;
            } else if second.onboarded && !second_drills && !second.is_drilling() {
                debug!(day, supervisor = "S2", "emergency return");
                self.second = Directive::EmergencyReturn;
            }
        } else if total > 2 && second_drills && third_drills {
            self.force_out_longer(second, third);
        }
    }

    fn recheck_excess(
        &mut self,
        day: usize,
        projector: &Projector<'_>,
        cadence: &Cadence,
        second: &AgentState,
        third: &AgentState,
    ) {
        let second_drills = will_drill(*second, self.second, cadence);
        let third_drills = will_drill(*third, self.third, cadence);
        let total = usize::from(projector.anchor_drills(day))
            + usize::from(second_drills)
            + usize::from(third_drills);

        if total > 2 && second_drills && third_drills {
            debug!(day, "second-order overstaffing");
            self.force_out_longer(second, third);
        }
    }

    /// Send home whichever agent has spent longer in its phase. Ties go to
    /// the second supervisor.
    fn force_out_longer(&mut self, second: &AgentState, third: &AgentState) {
        if second.days_in_phase >= third.days_in_phase {
            self.second = Directive::ForceDepart;
        } else {
            self.third = Directive::ForceDepart;
        }
    }
}

/// Whether each agent should start travelling today.
///
/// The second supervisor leaves with the anchor on day 0 and the third on
/// its entry day. After that both follow the gap projection.
fn demand(
    day: usize,
    projector: &Projector<'_>,
    cadence: &Cadence,
    second: &AgentState,
    third: &AgentState,
) -> (bool, bool) {
    let second_demand =
        day == 0 || projector.gap(day, cadence.lead_time(second.onboarded), second, third);

    let third_demand = if third.phase == Phase::Standby {
        day == cadence.third_entry_day()
    } else {
        projector.gap(day, cadence.lead_time(third.onboarded), third, second)
    };

    (second_demand, third_demand)
}
