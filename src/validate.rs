//! Coverage validator.
//!
//! Scans the three finished timelines once and reports every day that breaks
//! two-person coverage. Overstaffing is always a breach. Understaffing only
//! counts once the third supervisor has left home for the first time; before
//! that, the anchor and the second supervisor cover alone.

use crate::model::{Status, Violation};

pub fn validate(anchor: &[Status], second: &[Status], third: &[Status]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut third_deployed = false;

    for (day, ((a, s), t)) in anchor.iter().zip(second).zip(third).enumerate() {
        third_deployed |= *t != Status::Rest;

        let count = [a, s, t].into_iter().filter(|st| st.is_drilling()).count();
        if count > 2 {
            violations.push(Violation::overstaffed(day, count));
        }
        if third_deployed && count < 2 {
            violations.push(Violation::understaffed(day, count));
        }
    }

    violations
}
