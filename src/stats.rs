//! Workload analytics over a computed schedule.

use serde::Serialize;

use crate::model::{Schedule, Status, Supervisor};

/// Drilling-day deviation from the anchor worth flagging.
const WORKLOAD_DEVIATION_DAYS: usize = 5;

/// Day counts per status for one supervisor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorStats {
    pub supervisor: Supervisor,
    pub travel_in: usize,
    pub induction: usize,
    pub drilling: usize,
    pub travel_out: usize,
    pub rest: usize,
    /// Share of the horizon spent drilling, in percent.
    pub utilization: f64,
}

impl SupervisorStats {
    /// Travel and induction days together.
    pub fn overhead(&self) -> usize {
        self.travel_in + self.induction + self.travel_out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub supervisors: Vec<SupervisorStats>,
    /// A filling supervisor drills noticeably more or less than the anchor.
    pub workload_deviation: bool,
}

pub fn analyze(schedule: &Schedule) -> Analytics {
    let supervisors: Vec<SupervisorStats> = Supervisor::ALL
        .iter()
        .map(|s| supervisor_stats(*s, schedule.timeline(*s)))
        .collect();

    let anchor = supervisors[0].drilling;
    let workload_deviation = supervisors[1..]
        .iter()
        .any(|s| s.drilling.abs_diff(anchor) > WORKLOAD_DEVIATION_DAYS);

    Analytics {
        supervisors,
        workload_deviation,
    }
}

fn supervisor_stats(supervisor: Supervisor, timeline: &[Status]) -> SupervisorStats {
    let count = |status: Status| timeline.iter().filter(|s| **s == status).count();
    let drilling = count(Status::Drilling);

    #[allow(clippy::cast_precision_loss)]
    let utilization = if timeline.is_empty() {
        0.0
    } else {
        drilling as f64 / timeline.len() as f64 * 100.0
    };

    SupervisorStats {
        supervisor,
        travel_in: count(Status::TravelIn),
        induction: count(Status::Induction),
        drilling,
        travel_out: count(Status::TravelOut),
        rest: count(Status::Rest),
        utilization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::Cadence;
    use crate::roster;

    #[test]
    fn counts_cover_whole_horizon() {
        let schedule = roster::run(&Cadence::new(14, 7, 5, 40));
        let analytics = analyze(&schedule);
        for stats in &analytics.supervisors {
            assert_eq!(stats.overhead() + stats.drilling + stats.rest, 40);
        }
    }

    #[test]
    fn anchor_counts_for_reference_cadence() {
        let schedule = roster::run(&Cadence::new(14, 7, 5, 40));
        let anchor = &analyze(&schedule).supervisors[0];
        assert_eq!(anchor.supervisor, Supervisor::Anchor);
        assert_eq!(anchor.drilling, 23);
        assert_eq!(anchor.induction, 5);
        assert_eq!(anchor.travel_in, 2);
        assert_eq!(anchor.travel_out, 2);
        assert_eq!(anchor.rest, 8);
        assert!((anchor.utilization - 57.5).abs() < 1e-9);
    }

    #[test]
    fn flags_workload_deviation() {
        let mut schedule = roster::run(&Cadence::new(14, 7, 5, 40));
        assert!(!analyze(&schedule).workload_deviation);

        schedule.third = vec![Status::Rest; 40];
        assert!(analyze(&schedule).workload_deviation);
    }
}
