//! Output formatting for CLI display.

use std::fmt::Write as _;

use crate::model::{Schedule, Status, Supervisor};
use crate::stats::Analytics;

use super::Verification;

/// Days per grid block before wrapping.
const BLOCK_DAYS: usize = 30;

/// Violations listed in full before summarizing the rest.
const SHOWN_VIOLATIONS: usize = 5;

/// Render the roster as a status grid.
///
/// Days are shown 1-based. A `!` marks days whose drilling count is not 2
/// once the third supervisor is active.
pub(super) fn format_grid(schedule: &Schedule) -> String {
    let mut out = String::new();

    let legend: Vec<String> = Status::ALL
        .iter()
        .map(|s| format!("{} {}", s.code(), s.label()))
        .collect();
    let _ = writeln!(out, "Legend: {}", legend.join("  "));

    let active_from = schedule.third_active_from().unwrap_or(schedule.days());
    let flagged = |day: usize| day >= active_from && schedule.drilling_count(day) != 2;

    let days: Vec<usize> = (0..schedule.days()).collect();
    for block in days.chunks(BLOCK_DAYS) {
        out.push('\n');
        push_row(&mut out, "Day", block.iter().map(|d| (d + 1).to_string()));
        for supervisor in Supervisor::ALL {
            let timeline = schedule.timeline(supervisor);
            push_row(
                &mut out,
                supervisor.label(),
                block.iter().map(|d| timeline[*d].to_string()),
            );
        }
        push_row(
            &mut out,
            "#P",
            block.iter().map(|d| schedule.drilling_count(*d).to_string()),
        );
        if block.iter().any(|d| flagged(*d)) {
            push_row(
                &mut out,
                "",
                block
                    .iter()
                    .map(|d| if flagged(*d) { "!" } else { "" }.to_string()),
            );
        }
    }

    out.push('\n');
    out.push_str(&format_violations(schedule));
    out
}

fn push_row(out: &mut String, label: &str, cells: impl Iterator<Item = String>) {
    let mut line = format!("{label:<4}");
    for cell in cells {
        let _ = write!(line, "{cell:>3}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn format_violations(schedule: &Schedule) -> String {
    let violations = &schedule.violations;
    if violations.is_empty() {
        return "No violations.\n".to_string();
    }

    let mut out = format!("Errors detected ({})\n", violations.len());
    for v in violations.iter().take(SHOWN_VIOLATIONS) {
        let _ = writeln!(out, "  Day {}: {}", v.day + 1, v.message);
    }
    if violations.len() > SHOWN_VIOLATIONS {
        let _ = writeln!(out, "  ... and {} more.", violations.len() - SHOWN_VIOLATIONS);
    }
    out
}

pub(super) fn format_analytics(analytics: &Analytics) -> String {
    let mut out = String::new();
    for stats in &analytics.supervisors {
        let role = match stats.supervisor {
            Supervisor::Anchor => "fixed",
            Supervisor::Second | Supervisor::Third => "filling",
        };
        let _ = writeln!(
            out,
            "{} ({role}): drilling {}, utilization {:.1}%, rest {}, travel/induction {}",
            stats.supervisor.title(),
            stats.drilling,
            stats.utilization,
            stats.rest,
            stats.overhead(),
        );
    }
    if analytics.workload_deviation {
        out.push_str("Note: significant workload deviation to cover gaps.\n");
    }
    out
}

pub(super) fn format_verification(verification: &Verification) -> String {
    let schedule = &verification.schedule;
    let short_print = &verification.fingerprint[..8];
    let mut out = format!("{}: ", schedule.cadence.describe());

    if verification.passed() {
        let _ = writeln!(
            out,
            "ok (max stint {}, fingerprint {short_print})",
            verification.longest_stint
        );
        return out;
    }

    if !verification.deterministic {
        out.push_str("NON-DETERMINISTIC ");
    }
    let _ = writeln!(out, "{} violation(s)", schedule.violations.len());
    for v in schedule.violations.iter().take(3) {
        let _ = writeln!(out, "  Day {}: {}", v.day + 1, v.message);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{Cadence, Violation};
    use crate::{roster, stats};

    #[test]
    fn grid_has_legend_and_rows() {
        let grid = format_grid(&roster::run(&Cadence::new(14, 7, 5, 40)));
        let lines: Vec<&str> = grid.lines().collect();

        assert!(lines[0].starts_with("Legend: S Travel In  I Induction  P Drilling"));
        assert!(lines[2].starts_with("Day   1  2  3"));
        assert!(lines[3].starts_with("S1    S  I  I"));
        assert!(lines[4].starts_with("S2    S  I  I"));
        assert!(lines[5].starts_with("S3    D  D  D"));
        assert!(lines[6].starts_with("#P    0  0  0"));
        assert!(grid.ends_with("No violations.\n"));
    }

    #[test]
    fn grid_wraps_long_horizons() {
        let grid = format_grid(&roster::run(&Cadence::new(14, 7, 5, 65)));
        let blocks = grid.lines().filter(|l| l.starts_with("Day")).count();
        assert_eq!(blocks, 3);
    }

    #[test]
    fn grid_marks_and_summarizes_violations() {
        let mut schedule = roster::run(&Cadence::new(14, 7, 5, 40));
        for day in 20..27 {
            schedule.third[day] = Status::Rest;
            schedule.violations.push(Violation::understaffed(day, 1));
        }

        let grid = format_grid(&schedule);
        assert!(grid.lines().any(|l| l.trim_start().starts_with('!')));
        assert!(grid.contains("Errors detected (7)"));
        assert!(grid.contains("  Day 21: 1 drilling (required 2)"));
        assert!(grid.contains("  ... and 2 more."));
    }

    #[test]
    fn analytics_lines() {
        let analytics = stats::analyze(&roster::run(&Cadence::new(14, 7, 5, 40)));
        let text = format_analytics(&analytics);
        assert!(text.starts_with(
            "Supervisor 1 (fixed): drilling 23, utilization 57.5%, rest 8, travel/induction 9\n"
        ));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn verification_line() {
        let verification = super::super::verify(&Cadence::new(14, 7, 5, 40)).unwrap();
        let line = format_verification(&verification);
        assert!(line.starts_with("14x7, ind 5, 40 days: ok (max stint 8, fingerprint "));
    }
}
