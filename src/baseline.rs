//! Baseline generator: the anchor supervisor's fixed timeline.
//!
//! Cycle 1 carries the one-time induction out of its drilling days:
//!
//! ```text
//! S  I×induction  P×(work - induction)  B  D×(rest - 2)
//! ```
//!
//! Every later cycle drills the full `work` days:
//!
//! ```text
//! S  P×work  B  D×(rest - 2)
//! ```
//!
//! Both are `work + rest` days long. The last cycle is cut wherever the
//! horizon ends.

use std::iter;

use crate::model::{Cadence, Status, Timeline};

/// Produce the anchor timeline for the full horizon.
pub fn generate(cadence: &Cadence) -> Timeline {
    let horizon = cadence.horizon_days;
    let mut timeline = Vec::with_capacity(horizon);

    let segments = first_cycle(cadence)
        .into_iter()
        .chain(iter::repeat_with(|| later_cycle(cadence)).flatten());

    for (status, length) in segments {
        let remaining = horizon - timeline.len();
        if remaining == 0 {
            break;
        }
        timeline.extend(iter::repeat_n(status, length.min(remaining)));
    }

    timeline
}

fn first_cycle(cadence: &Cadence) -> Vec<(Status, usize)> {
    vec![
        (Status::TravelIn, 1),
        (Status::Induction, cadence.induction_days),
        (Status::Drilling, cadence.first_cycle_drilling_days()),
        (Status::TravelOut, 1),
        (Status::Rest, cadence.rest_days.saturating_sub(2)),
    ]
}

fn later_cycle(cadence: &Cadence) -> Vec<(Status, usize)> {
    vec![
        (Status::TravelIn, 1),
        (Status::Drilling, cadence.work_days),
        (Status::TravelOut, 1),
        (Status::Rest, cadence.rest_days.saturating_sub(2)),
    ]
}
